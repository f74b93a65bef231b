use std::collections::{BTreeMap, HashMap};

use crate::ir::{Network, Project, Service, Volume};

/// Orders entries by explicit order, then by declared position, then by name.
///
/// A missing order counts as zero. Names that never appear in `declared`
/// sort after every declared name; for duplicated names the first
/// occurrence counts.
fn resolve_order<'a, T>(
    entries: &'a BTreeMap<String, T>,
    declared: &[String],
    order_of: impl Fn(&T) -> Option<u32>,
) -> Vec<(&'a str, &'a T)> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(declared.len());
    for (idx, name) in declared.iter().enumerate() {
        position.entry(name.as_str()).or_insert(idx);
    }

    let mut ordered: Vec<(&str, &T)> = entries
        .iter()
        .map(|(name, entry)| (name.as_str(), entry))
        .collect();
    ordered.sort_by(|(name_a, a), (name_b, b)| {
        let order_a = order_of(*a).unwrap_or(0);
        let order_b = order_of(*b).unwrap_or(0);
        let pos_a = position.get(name_a).copied().unwrap_or(usize::MAX);
        let pos_b = position.get(name_b).copied().unwrap_or(usize::MAX);
        order_a
            .cmp(&order_b)
            .then_with(|| pos_a.cmp(&pos_b))
            .then_with(|| name_a.cmp(name_b))
    });
    ordered
}

pub(crate) fn ordered_services(project: &Project) -> Vec<(&str, &Service)> {
    resolve_order(&project.services, &project.service_order, |service| service.order)
}

pub(crate) fn ordered_volumes(project: &Project) -> Vec<(&str, &Volume)> {
    resolve_order(&project.volumes, &project.volume_order, |volume| volume.order)
}

/// Networks carry no order of their own; they sort by name.
pub(crate) fn ordered_networks(project: &Project) -> Vec<(&str, &Network)> {
    project
        .networks
        .iter()
        .map(|(name, network)| (name.as_str(), network))
        .collect()
}

use std::collections::HashMap;

use crate::config::LayoutOptions;
use crate::ir::{Project, Volume};

use super::ordering::ordered_services;

/// A used volume together with the grid point it was given.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedVolume<'a> {
    pub name: &'a str,
    pub volume: &'a Volume,
    pub used_by: Vec<&'a str>,
    pub x: i64,
    pub y: i64,
}

/// Service names consuming each named volume, in service order. A service
/// that mounts the same volume twice is listed once.
pub(crate) fn collect_volume_usage(project: &Project) -> HashMap<&str, Vec<&str>> {
    let mut usage: HashMap<&str, Vec<&str>> = HashMap::new();
    for (service_name, service) in ordered_services(project) {
        for volume in service.volumes.iter().filter_map(|m| m.named_volume()) {
            let consumers = usage.entry(volume).or_default();
            if !consumers.contains(&service_name) {
                consumers.push(service_name);
            }
        }
    }
    usage
}

/// Places used volumes to the right of their consumers.
///
/// Each volume aims for the mean position of its consumers. Volumes are then
/// visited by ascending target Y and pushed down so that consecutive volumes
/// are at least `column_top_gap` apart and the first sits no higher than
/// `padding`.
pub(crate) fn place_used_volumes<'a>(
    used: Vec<(&'a str, &'a Volume, Vec<&'a str>)>,
    service_positions: &HashMap<&str, (i64, i64)>,
    options: &LayoutOptions,
) -> Vec<PlacedVolume<'a>> {
    let mut targets: Vec<(PlacedVolume<'a>, i64)> = used
        .into_iter()
        .map(|(name, volume, used_by)| {
            let (mean_x, mean_y) = mean_position(&used_by, service_positions);
            let placed = PlacedVolume {
                name,
                volume,
                used_by,
                x: mean_x.saturating_add(options.volume_x_offset),
                y: mean_y,
            };
            (placed, mean_y)
        })
        .collect();
    // Stable: equal targets keep volume order.
    targets.sort_by_key(|(_, target_y)| *target_y);

    let mut last_y = options.initial_last_placed_y;
    let mut placed = Vec::with_capacity(targets.len());
    for (idx, (mut volume, target_y)) in targets.into_iter().enumerate() {
        let floor = if idx == 0 {
            options.padding
        } else {
            last_y.saturating_add(options.column_top_gap)
        };
        volume.y = target_y.max(floor);
        last_y = volume.y;
        placed.push(volume);
    }
    placed
}

/// Truncating integer mean of the consumer positions; the origin when none
/// of them has a position.
fn mean_position(consumers: &[&str], service_positions: &HashMap<&str, (i64, i64)>) -> (i64, i64) {
    let mut sum_x = 0i64;
    let mut sum_y = 0i64;
    let mut count = 0i64;
    for name in consumers {
        if let Some((x, y)) = service_positions.get(name) {
            sum_x = sum_x.saturating_add(*x);
            sum_y = sum_y.saturating_add(*y);
            count += 1;
        }
    }
    if count == 0 {
        return (0, 0);
    }
    (sum_x / count, sum_y / count)
}

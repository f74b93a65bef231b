use std::collections::HashMap;

use serde_json::json;

use crate::config::LayoutOptions;
use crate::ir::{Network, Project, Service, Volume};
use crate::theme::Theme;

use super::dimensions::{GraphDimensions, NETWORK_ROW_SPACING};
use super::types::{Node, NodeData, NodeKind, Position, StyleMap};
use super::volumes::PlacedVolume;

fn properties(value: serde_json::Value) -> StyleMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => StyleMap::new(),
    }
}

fn node(kind: NodeKind, name: &str, position: Position, data: NodeData) -> Node {
    Node {
        id: kind.node_id(name),
        kind,
        position,
        data,
        width: None,
        height: None,
        style: None,
    }
}

fn bare_data(kind: NodeKind, label: &str) -> NodeData {
    NodeData {
        label: label.to_string(),
        kind,
        service: None,
        network: None,
        volume: None,
        status: None,
        properties: StyleMap::new(),
    }
}

pub(crate) fn root_node(project: &Project, dims: &GraphDimensions) -> Node {
    let mut data = bare_data(NodeKind::Root, &project.name);
    data.properties = properties(json!({
        "services": dims.service_count,
        "networks": dims.network_count,
        "volumes": dims.volume_count,
        "version": project.version,
    }));
    node(
        NodeKind::Root,
        &project.name,
        Position::from_grid(dims.root_x, dims.root_y),
        data,
    )
}

pub(crate) fn network_node(name: &str, network: &Network, row: usize, dims: &GraphDimensions) -> Node {
    let y = dims
        .network_column_start_y
        .saturating_add((row as i64).saturating_mul(NETWORK_ROW_SPACING));
    let mut data = bare_data(NodeKind::Network, name);
    data.properties = properties(json!({
        "driver": network.driver,
        "internal": network.internal,
        "external": network.external,
        "attachable": network.attachable,
    }));
    data.network = Some(network.clone());
    node(
        NodeKind::Network,
        name,
        Position::from_grid(dims.network_column_x, y),
        data,
    )
}

pub(crate) fn service_grid_position(row: usize, dims: &GraphDimensions, options: &LayoutOptions) -> (i64, i64) {
    (
        dims.service_column_x,
        dims.service_column_start_y
            .saturating_add((row as i64).saturating_mul(options.column_top_gap)),
    )
}

pub(crate) fn service_node(name: &str, service: &Service, (x, y): (i64, i64), theme: &Theme) -> Node {
    let mut data = bare_data(NodeKind::Service, name);
    data.status = Some("saved".to_string());
    data.properties = properties(json!({
        "image": service.image,
        "ports": service.ports.len(),
        "volumes": service.volumes.len(),
        "depends_on": service.depends_on.len(),
        "networks": service.networks.len(),
        "color": theme.service_color,
        "order": service.order.unwrap_or(0),
    }));
    data.service = Some(service.clone());
    node(NodeKind::Service, name, Position::from_grid(x, y), data)
}

pub(crate) fn used_volume_node(placed: &PlacedVolume<'_>) -> Node {
    let mut data = bare_data(NodeKind::Volume, placed.name);
    data.properties = volume_properties(placed.volume, &placed.used_by, true);
    data.volume = Some(placed.volume.clone());
    node(
        NodeKind::Volume,
        placed.name,
        Position::from_grid(placed.x, placed.y),
        data,
    )
}

/// Unused volumes hang below the root node, one `node_gap_x` apart.
pub(crate) fn unused_volume_node(
    name: &str,
    volume: &Volume,
    row: usize,
    dims: &GraphDimensions,
    options: &LayoutOptions,
    theme: &Theme,
) -> Node {
    let y = dims
        .unused_volume_start_y
        .saturating_add((row as i64).saturating_mul(options.node_gap_x));
    let mut data = bare_data(NodeKind::Volume, name);
    data.status = Some("unused".to_string());
    let mut props = volume_properties(volume, &[], false);
    props.insert("status".to_string(), json!("unused"));
    data.properties = props;
    data.volume = Some(volume.clone());

    let mut volume_node = node(
        NodeKind::Volume,
        name,
        Position::from_grid(dims.root_x, y),
        data,
    );
    volume_node.style = Some(properties(json!({ "opacity": theme.unused_node_opacity })));
    volume_node
}

fn volume_properties(volume: &Volume, used_by: &[&str], used: bool) -> StyleMap {
    properties(json!({
        "driver": volume.driver,
        "external": volume.external,
        "order": volume.order.unwrap_or(0),
        "used_by": used_by,
        "used": used,
    }))
}

/// Id lookup for every node of one kind, keyed by entity name.
pub(crate) fn index_by_name<'a>(names: impl IntoIterator<Item = &'a str>, kind: NodeKind) -> HashMap<&'a str, String> {
    names.into_iter().map(|name| (name, kind.node_id(name))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_carries_counts_and_version() {
        let mut project = Project::new("shop");
        project.version = "3.8".to_string();
        project.add_service("web", Service::default());
        project.add_volume("data", Volume::default());
        let dims = GraphDimensions::compute(&project, &LayoutOptions::default());
        let root = root_node(&project, &dims);
        assert_eq!(root.id, "docker-compose");
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(root.data.label, "shop");
        assert_eq!(root.position, Position { x: -350.0, y: 50.0 });
        assert_eq!(root.data.properties["services"], json!(1));
        assert_eq!(root.data.properties["networks"], json!(0));
        assert_eq!(root.data.properties["volumes"], json!(1));
        assert_eq!(root.data.properties["version"], json!("3.8"));
    }

    #[test]
    fn networks_stack_at_fixed_spacing() {
        let project = Project::new("p");
        let dims = GraphDimensions::compute(&project, &LayoutOptions::default());
        let network = Network {
            driver: "bridge".to_string(),
            ..Default::default()
        };
        let second = network_node("back", &network, 1, &dims);
        assert_eq!(second.id, "network-back");
        assert_eq!(second.position.x, 20.0);
        assert_eq!(second.position.y, (dims.network_column_start_y + 120) as f64);
        assert_eq!(second.data.properties["driver"], json!("bridge"));
        assert_eq!(second.data.properties["attachable"], json!(false));
        assert!(second.data.network.is_some());
    }

    #[test]
    fn service_properties_are_counts() {
        let service = Service {
            image: "nginx:latest".to_string(),
            depends_on: vec!["db".to_string(), "cache".to_string()],
            order: Some(2),
            ..Default::default()
        };
        let node = service_node("web", &service, (440, 170), &Theme::default());
        assert_eq!(node.id, "services-web");
        assert_eq!(node.data.status.as_deref(), Some("saved"));
        assert_eq!(node.data.properties["depends_on"], json!(2));
        assert_eq!(node.data.properties["ports"], json!(0));
        assert_eq!(node.data.properties["color"], json!("#3b82f6"));
        assert_eq!(node.data.properties["order"], json!(2));
    }

    #[test]
    fn unused_volume_is_muted() {
        let project = Project::new("p");
        let options = LayoutOptions::default();
        let dims = GraphDimensions::compute(&project, &options);
        let node = unused_volume_node("old", &Volume::default(), 2, &dims, &options, &Theme::default());
        assert_eq!(node.position, Position::from_grid(-350, dims.unused_volume_start_y + 200));
        assert_eq!(node.data.properties["used"], json!(false));
        assert_eq!(node.data.properties["status"], json!("unused"));
        assert_eq!(node.data.properties["used_by"], json!([]));
        assert_eq!(node.style.as_ref().unwrap()["opacity"], json!(0.5));
    }
}

use std::collections::{HashMap, HashSet};

use serde_json::json;
use tracing::debug;

use crate::ir::Service;
use crate::theme::Theme;

use super::types::{Edge, EdgeKind, NodeKind, ROOT_NODE_ID, StyleMap};

fn style(value: serde_json::Value) -> Option<StyleMap> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

pub(crate) fn root_network_edges(network_ids: &[String]) -> Vec<Edge> {
    network_ids
        .iter()
        .map(|id| Edge::new(EdgeKind::RootNetwork, ROOT_NODE_ID, id, "step"))
        .collect()
}

/// Network membership edges, plus a dashed root edge for every service that
/// ends up in no known network.
pub(crate) fn membership_edges(
    services: &[(&str, &Service)],
    network_ids: &HashMap<&str, String>,
    theme: &Theme,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (service_name, service) in services {
        let service_id = NodeKind::Service.node_id(service_name);
        let mut joined: HashSet<&str> = HashSet::new();

        for network_name in &service.networks {
            let Some(network_id) = network_ids.get(network_name.as_str()) else {
                debug!(service = %service_name, network = %network_name, "dropping edge to undefined network");
                continue;
            };
            if !joined.insert(network_name.as_str()) {
                continue;
            }
            let mut edge = Edge::new(EdgeKind::NetworkService, network_id, &service_id, "smoothstep");
            edge.style = style(json!({
                "strokeWidth": 0,
                "stroke": "transparent",
            }));
            edge.label = Some(network_name.clone());
            edge.label_style = style(json!({
                "fill": theme.network_label_color,
                "opacity": theme.network_label_opacity,
                "textAlign": "center",
            }));
            edge.network_name = Some(network_name.clone());
            edge.service_name = Some(service_name.to_string());
            edges.push(edge);
        }

        if joined.is_empty() {
            let mut edge = Edge::new(EdgeKind::RootService, ROOT_NODE_ID, &service_id, "smoothstep");
            edge.style = style(json!({
                "strokeWidth": theme.fallback_stroke_width,
                "strokeDasharray": theme.fallback_dasharray,
            }));
            edges.push(edge);
        }
    }
    edges
}

/// Animated dependent → dependency edges.
pub(crate) fn depends_on_edges(
    services: &[(&str, &Service)],
    service_ids: &HashMap<&str, String>,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (service_name, service) in services {
        let source_id = NodeKind::Service.node_id(service_name);
        for dependency in &service.depends_on {
            let Some(target_id) = service_ids.get(dependency.as_str()) else {
                debug!(service = %service_name, dependency = %dependency, "dropping edge to undefined service");
                continue;
            };
            let mut edge = Edge::new(EdgeKind::DependsOn, &source_id, target_id, "smoothstep");
            if !seen.insert(edge.id.clone()) {
                continue;
            }
            edge.source_handle = Some(format!("{source_id}-source-2"));
            edge.target_handle = Some(format!("{target_id}-target-2"));
            edge.animated = true;
            edges.push(edge);
        }
    }
    edges
}

/// One animated edge per named-volume mount; the mount target tells apart
/// two mounts of the same volume.
pub(crate) fn service_volume_edges(
    services: &[(&str, &Service)],
    volume_ids: &HashMap<&str, String>,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (service_name, service) in services {
        let source_id = NodeKind::Service.node_id(service_name);
        for mount in &service.volumes {
            let Some(volume) = mount.named_volume() else {
                continue;
            };
            let Some(target_id) = volume_ids.get(volume) else {
                debug!(service = %service_name, volume = %volume, "dropping edge to undefined volume");
                continue;
            };
            let mut edge = Edge::new(EdgeKind::ServiceVolume, &source_id, target_id, "smoothstep");
            edge.id = format!("{}@{}", edge.id, mount.target);
            if !seen.insert(edge.id.clone()) {
                continue;
            }
            edge.animated = true;
            edges.push(edge);
        }
    }
    edges
}

pub(crate) fn unused_volume_edge(volume_id: &str, theme: &Theme) -> Edge {
    let mut edge = Edge::new(EdgeKind::RootUnusedVolume, ROOT_NODE_ID, volume_id, "step");
    edge.source_handle = Some(format!("{ROOT_NODE_ID}-source-2"));
    edge.style = style(json!({
        "strokeWidth": 1,
        "stroke": theme.unused_color,
        "strokeDasharray": theme.unused_dasharray,
        "opacity": theme.unused_edge_opacity,
    }));
    edge.label = Some("unused".to_string());
    edge.label_style = style(json!({
        "fill": theme.unused_color,
        "fontWeight": "400",
        "fontSize": "9px",
        "background": theme.unused_label_background,
        "padding": "1px 4px",
        "borderRadius": "3px",
    }));
    edge
}

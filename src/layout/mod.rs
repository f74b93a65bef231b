mod dimensions;
mod edges;
mod nodes;
mod ordering;
pub(crate) mod types;
mod viewport;
mod volumes;
pub use types::*;
pub use viewport::{compute_bounds, compute_viewport};

use dimensions::GraphDimensions;
use edges::*;
use nodes::*;
use ordering::{ordered_networks, ordered_services, ordered_volumes};
use volumes::{collect_volume_usage, place_used_volumes};

use crate::config::LayoutOptions;
use crate::ir::{Project, Volume};
use crate::theme::Theme;
use chrono::Utc;
use std::collections::HashMap;
use tracing::debug;

/// Lays out a compose project as root, network, service and volume columns.
///
/// The result depends only on `project`, `theme` and `options`, apart from
/// the `created_at` stamp. References to undefined networks, services or
/// volumes produce no edge.
pub fn compute_layout(project: &Project, theme: &Theme, options: &LayoutOptions) -> Graph {
    let dims = GraphDimensions::compute(project, options);

    let root = root_node(project, &dims);

    let networks = ordered_networks(project);
    let network_nodes: Vec<Node> = networks
        .iter()
        .enumerate()
        .map(|(row, (name, network))| network_node(name, network, row, &dims))
        .collect();
    let network_ids = index_by_name(networks.iter().map(|(name, _)| *name), NodeKind::Network);

    let services = ordered_services(project);
    let mut service_positions: HashMap<&str, (i64, i64)> = HashMap::with_capacity(services.len());
    let mut service_nodes = Vec::with_capacity(services.len());
    for (row, (name, service)) in services.iter().enumerate() {
        let grid = service_grid_position(row, &dims, options);
        service_positions.insert(*name, grid);
        service_nodes.push(service_node(name, service, grid, theme));
    }
    let service_ids = index_by_name(services.iter().map(|(name, _)| *name), NodeKind::Service);

    let network_id_list: Vec<String> = network_nodes.iter().map(|node| node.id.clone()).collect();
    let mut edges = root_network_edges(&network_id_list);
    edges.extend(membership_edges(&services, &network_ids, theme));

    let mut usage = collect_volume_usage(project);
    let mut used: Vec<(&str, &Volume, Vec<&str>)> = Vec::new();
    let mut unused: Vec<(&str, &Volume)> = Vec::new();
    for (name, volume) in ordered_volumes(project) {
        match usage.remove(name) {
            Some(consumers) => used.push((name, volume, consumers)),
            None => unused.push((name, volume)),
        }
    }
    for undeclared in usage.keys() {
        debug!(volume = %undeclared, "mounted volume is not declared, no node created");
    }

    let placed = place_used_volumes(used, &service_positions, options);
    let mut volume_nodes: Vec<Node> = placed.iter().map(used_volume_node).collect();
    let mut unused_edges = Vec::with_capacity(unused.len());
    for (row, (name, volume)) in unused.iter().enumerate() {
        let node = unused_volume_node(name, volume, row, &dims, options, theme);
        unused_edges.push(unused_volume_edge(&node.id, theme));
        volume_nodes.push(node);
    }
    let volume_ids = index_by_name(
        placed
            .iter()
            .map(|volume| volume.name)
            .chain(unused.iter().map(|(name, _)| *name)),
        NodeKind::Volume,
    );

    edges.extend(unused_edges);
    edges.extend(depends_on_edges(&services, &service_ids));
    edges.extend(service_volume_edges(&services, &volume_ids));

    let mut nodes = Vec::with_capacity(1 + network_nodes.len() + service_nodes.len() + volume_nodes.len());
    nodes.push(root);
    nodes.extend(network_nodes);
    nodes.extend(service_nodes);
    nodes.append(&mut volume_nodes);

    let bounds = compute_bounds(&nodes, options.padding as f64);
    debug!(
        project = %project.name,
        nodes = nodes.len(),
        edges = edges.len(),
        used_volumes = placed.len(),
        unused_volumes = unused.len(),
        "computed compose layout"
    );

    Graph {
        nodes,
        edges,
        project: project.name.clone(),
        layout: LAYOUT_ENGINE.to_string(),
        direction: LAYOUT_DIRECTION.to_string(),
        viewport: compute_viewport(&bounds),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Network, Service, VolumeMount};
    use std::collections::HashSet;

    fn mount(source: &str, target: &str) -> VolumeMount {
        VolumeMount {
            kind: "volume".to_string(),
            source: source.to_string(),
            target: target.to_string(),
            read_only: false,
        }
    }

    fn stack() -> Project {
        let mut project = Project::new("stack");
        project.version = "3.9".to_string();
        project.add_network("front", Network::default());
        project.add_network("back", Network::default());
        project.add_service(
            "proxy",
            Service {
                image: "traefik".to_string(),
                networks: vec!["front".to_string()],
                depends_on: vec!["api".to_string()],
                ..Default::default()
            },
        );
        project.add_service(
            "api",
            Service {
                networks: vec!["front".to_string(), "back".to_string()],
                depends_on: vec!["db".to_string()],
                volumes: vec![mount("uploads", "/srv/uploads")],
                ..Default::default()
            },
        );
        project.add_service(
            "db",
            Service {
                networks: vec!["back".to_string()],
                volumes: vec![mount("pgdata", "/var/lib/postgresql/data")],
                ..Default::default()
            },
        );
        project.add_service("cron", Service::default());
        project.add_volume("pgdata", Volume::default());
        project.add_volume("uploads", Volume::default());
        project.add_volume("legacy", Volume::default());
        project
    }

    fn layout(project: &Project) -> Graph {
        compute_layout(project, &Theme::default(), &LayoutOptions::default())
    }

    #[test]
    fn node_order_is_root_networks_services_volumes() {
        let graph = layout(&stack());
        let ids: Vec<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "docker-compose",
                "network-back",
                "network-front",
                "services-proxy",
                "services-api",
                "services-db",
                "services-cron",
                "volume-uploads",
                "volume-pgdata",
                "volume-legacy",
            ]
        );
    }

    #[test]
    fn services_stack_in_declared_order() {
        let graph = layout(&stack());
        let ys: Vec<f64> = graph
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Service)
            .map(|node| node.position.y)
            .collect();
        assert_eq!(ys, vec![50.0, 170.0, 290.0, 410.0]);
        assert!(graph
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Service)
            .all(|node| node.position.x == 440.0));
    }

    #[test]
    fn volumes_sit_beside_their_consumers() {
        let graph = layout(&stack());
        let uploads = graph.node("volume-uploads").unwrap();
        assert_eq!(uploads.position, Position { x: 740.0, y: 170.0 });
        let pgdata = graph.node("volume-pgdata").unwrap();
        assert_eq!(pgdata.position, Position { x: 740.0, y: 290.0 });
        let legacy = graph.node("volume-legacy").unwrap();
        // Root Y is 4 * 120 / 2 - 10 = 230.
        assert_eq!(legacy.position, Position { x: -350.0, y: 410.0 });
        assert_eq!(legacy.data.status.as_deref(), Some("unused"));
    }

    #[test]
    fn network_column_is_centred_on_services() {
        let graph = layout(&stack());
        let back = graph.node("network-back").unwrap();
        // Services span 480, networks 240: start = 50 + 120.
        assert_eq!(back.position, Position { x: 20.0, y: 170.0 });
        let front = graph.node("network-front").unwrap();
        assert_eq!(front.position.y, 290.0);
    }

    #[test]
    fn edges_reference_existing_nodes_and_are_unique() {
        let graph = layout(&stack());
        let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut edge_ids = HashSet::new();
        for edge in &graph.edges {
            assert!(node_ids.contains(edge.source.as_str()), "{}", edge.id);
            assert!(node_ids.contains(edge.target.as_str()), "{}", edge.id);
            assert!(edge_ids.insert(edge.id.clone()), "duplicate {}", edge.id);
        }
        // 2 root-network, 4 memberships, 1 fallback (cron), 1 unused,
        // 2 dependencies, 2 mounts.
        assert_eq!(graph.edges.len(), 12);
    }

    #[test]
    fn viewport_pads_the_extent() {
        let graph = layout(&stack());
        assert_eq!(graph.viewport.x, -400.0);
        assert_eq!(graph.viewport.y, 0.0);
        assert_eq!(graph.viewport.zoom, 0.8);
        assert_eq!(graph.layout, "custom");
        assert_eq!(graph.direction, "LR");
    }

    #[test]
    fn undeclared_volume_mount_is_dropped() {
        let mut project = Project::new("p");
        project.add_service(
            "app",
            Service {
                volumes: vec![mount("ghost", "/ghost")],
                ..Default::default()
            },
        );
        let graph = layout(&project);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, ROOT_NODE_ID);
    }
}

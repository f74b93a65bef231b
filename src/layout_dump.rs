use crate::layout::{Graph, compute_bounds};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Geometry-only view of a graph, stable across runs and easy to diff.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub project: String,
    pub direction: String,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub animated: bool,
}

impl LayoutDump {
    pub fn from_graph(graph: &Graph) -> Self {
        let bounds = compute_bounds(&graph.nodes, 0.0);
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind.as_str().to_string(),
                x: node.position.x,
                y: node.position.y,
            })
            .collect();

        let mut edges: Vec<EdgeDump> = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                from: edge.source.clone(),
                to: edge.target.clone(),
                label: edge.label.clone(),
                animated: edge.animated,
            })
            .collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));

        LayoutDump {
            project: graph.project.clone(),
            direction: graph.direction.clone(),
            width: bounds.width(),
            height: bounds.height(),
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, graph: &Graph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_graph(graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

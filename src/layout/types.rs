use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ir::{Network, Service, Volume};

pub const ROOT_NODE_ID: &str = "docker-compose";
pub const LAYOUT_ENGINE: &str = "custom";
pub const LAYOUT_DIRECTION: &str = "LR";
pub const VIEWPORT_ZOOM: f64 = 0.8;

/// Free-form JSON bag used for properties and style overrides.
pub type StyleMap = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[serde(rename = "compose")]
    Root,
    Network,
    #[serde(rename = "services")]
    Service,
    Volume,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "compose",
            Self::Network => "network",
            Self::Service => "services",
            Self::Volume => "volume",
        }
    }

    /// Node id for an entity of this kind; ids are prefixed with the wire tag.
    pub fn node_id(self, name: &str) -> String {
        match self {
            Self::Root => ROOT_NODE_ID.to_string(),
            _ => format!("{}-{}", self.as_str(), name),
        }
    }
}

/// Relation an edge stands for. Not serialized; it only feeds edge ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    RootNetwork,
    NetworkService,
    RootService,
    DependsOn,
    ServiceVolume,
    RootUnusedVolume,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RootNetwork => "compose-network",
            Self::NetworkService => "network-service",
            Self::RootService => "compose-service",
            Self::DependsOn => "depends",
            Self::ServiceVolume => "service-volume",
            Self::RootUnusedVolume => "compose-unused-volume",
        }
    }

    /// Stable id for an edge of this kind between two node ids.
    pub fn edge_id(self, source: &str, target: &str) -> String {
        format!("edge-{}:{}->{}", self.as_str(), source, target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn from_grid(x: i64, y: i64) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(rename = "services", skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub properties: StyleMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    /// Connector drawing style: `step` or `smoothstep`.
    #[serde(rename = "type")]
    pub line_type: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub animated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_style: Option<StyleMap>,
}

impl Edge {
    pub(crate) fn new(kind: EdgeKind, source: &str, target: &str, line_type: &str) -> Self {
        Self {
            id: kind.edge_id(source, target),
            source: source.to_string(),
            source_handle: None,
            target: target.to_string(),
            target_handle: None,
            line_type: line_type.to_string(),
            animated: false,
            style: None,
            label: None,
            network_name: None,
            service_name: None,
            label_style: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Padded extent of a node set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Laid-out project, ready for a node/edge diagram front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub project: String,
    pub layout: String,
    pub direction: String,
    pub viewport: Viewport,
    pub created_at: DateTime<Utc>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edges_between<'a>(&'a self, source: &'a str, target: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges
            .iter()
            .filter(move |edge| edge.source == source && edge.target == target)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Decoded compose project, as handed over by the document decoder.
///
/// Declared order of services and volumes travels in `service_order` and
/// `volume_order`; the maps themselves carry no ordering meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub version: String,
    pub services: BTreeMap<String, Service>,
    pub service_order: Vec<String>,
    pub networks: BTreeMap<String, Network>,
    pub volumes: BTreeMap<String, Volume>,
    pub volume_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub restart: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expose: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_mode: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub context: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dockerfile: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortMapping {
    pub target: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<u16>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub interval: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u64>,
}

/// One entry of a service's `volumes:` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMount {
    /// `bind`, `volume`, `tmpfs` or `npipe`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

impl VolumeMount {
    /// Name of the named volume this mount consumes, if it consumes one.
    pub fn named_volume(&self) -> Option<&str> {
        if self.kind == "volume" && !self.source.is_empty() {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub attachable: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// A name that some service refers to but the project does not define.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnresolvedReference {
    Network { service: String, network: String },
    Dependency { service: String, dependency: String },
    Volume { service: String, volume: String },
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Adds a service and records it in the declared order.
    pub fn add_service(&mut self, name: &str, service: Service) -> &mut Self {
        self.services.insert(name.to_string(), service);
        self.service_order.push(name.to_string());
        self
    }

    pub fn add_network(&mut self, name: &str, network: Network) -> &mut Self {
        self.networks.insert(name.to_string(), network);
        self
    }

    /// Adds a volume and records it in the declared order.
    pub fn add_volume(&mut self, name: &str, volume: Volume) -> &mut Self {
        self.volumes.insert(name.to_string(), volume);
        self.volume_order.push(name.to_string());
        self
    }

    /// References that layout will drop because their target is not defined.
    pub fn unresolved_references(&self) -> BTreeSet<UnresolvedReference> {
        let mut missing = BTreeSet::new();
        for (name, service) in &self.services {
            for network in &service.networks {
                if !self.networks.contains_key(network) {
                    missing.insert(UnresolvedReference::Network {
                        service: name.clone(),
                        network: network.clone(),
                    });
                }
            }
            for dependency in &service.depends_on {
                if !self.services.contains_key(dependency) {
                    missing.insert(UnresolvedReference::Dependency {
                        service: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
            for volume in service.volumes.iter().filter_map(VolumeMount::named_volume) {
                if !self.volumes.contains_key(volume) {
                    missing.insert(UnresolvedReference::Volume {
                        service: name.clone(),
                        volume: volume.to_string(),
                    });
                }
            }
        }
        missing
    }
}

impl std::fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { service, network } => {
                write!(f, "service `{service}` joins undefined network `{network}`")
            }
            Self::Dependency {
                service,
                dependency,
            } => write!(f, "service `{service}` depends on undefined service `{dependency}`"),
            Self::Volume { service, volume } => {
                write!(f, "service `{service}` mounts undefined volume `{volume}`")
            }
        }
    }
}

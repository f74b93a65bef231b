use serde::{Deserialize, Serialize};

/// Colours and opacities stamped into node and edge styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub service_color: String,
    pub network_label_color: String,
    pub network_label_opacity: f64,
    pub fallback_stroke_width: f64,
    pub fallback_dasharray: String,
    pub unused_color: String,
    pub unused_node_opacity: f64,
    pub unused_edge_opacity: f64,
    pub unused_dasharray: String,
    pub unused_label_background: String,
}

impl Theme {
    /// The palette the compose front end expects.
    pub fn compose_default() -> Self {
        Self {
            service_color: "#3b82f6".to_string(),
            network_label_color: "#3b82f6".to_string(),
            network_label_opacity: 0.4,
            fallback_stroke_width: 1.5,
            fallback_dasharray: "5,5".to_string(),
            unused_color: "#9ca3af".to_string(),
            unused_node_opacity: 0.5,
            unused_edge_opacity: 0.6,
            unused_dasharray: "3,3".to_string(),
            unused_label_background: "rgba(255, 255, 255, 0.8)".to_string(),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            service_color: "#374151".to_string(),
            network_label_color: "#111827".to_string(),
            network_label_opacity: 0.6,
            unused_color: "#d1d5db".to_string(),
            ..Self::compose_default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::compose_default()
    }
}

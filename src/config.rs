use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

static OVERRIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*=\s*(\S+)\s*$").unwrap());

/// Flow direction advertised to the front end. It does not change geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TB" | "TD" => Some(Self::TopBottom),
            "BT" => Some(Self::BottomTop),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }
}

/// Spacing and offset constants for one layout run.
///
/// Every field is optional in serialized form; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: Direction,
    pub node_width: i64,
    pub node_height: i64,
    pub node_gap_x: i64,
    pub node_gap_y: i64,
    pub padding: i64,
    pub column_gap: i64,
    pub column_top_gap: i64,
    pub root_column_start_x: i64,
    pub volume_x_offset: i64,
    pub volume_y_offset: i64,
    pub initial_last_placed_y: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::LeftRight,
            node_width: 240,
            node_height: 120,
            node_gap_x: 100,
            node_gap_y: 50,
            padding: 50,
            column_gap: 440,
            column_top_gap: 120,
            root_column_start_x: -350,
            volume_x_offset: 300,
            volume_y_offset: 180,
            initial_last_placed_y: -1000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutOptions,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed override `{0}`, expected key=value")]
    MalformedOverride(String),
    #[error("unknown layout option `{0}`")]
    UnknownOption(String),
    #[error("layout option `{key}` expects an integer, got `{value}`")]
    InvalidInteger { key: String, value: String },
    #[error("unknown direction `{0}`, expected one of TB, BT, LR, RL")]
    UnknownDirection(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    service_color: Option<String>,
    network_label_color: Option<String>,
    network_label_opacity: Option<f64>,
    fallback_stroke_width: Option<f64>,
    fallback_dasharray: Option<String>,
    unused_color: Option<String>,
    unused_node_opacity: Option<f64>,
    unused_edge_opacity: Option<f64>,
    unused_dasharray: Option<String>,
    unused_label_background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOptions>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document. Strict JSON is tried first, then JSON5.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|_| json_err)?,
    };

    let mut config = Config::default();
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "monochrome" {
            config.theme = Theme::monochrome();
        } else if theme_name == "default" || theme_name == "compose" {
            config.theme = Theme::compose_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.service_color {
            config.theme.service_color = v;
        }
        if let Some(v) = vars.network_label_color {
            config.theme.network_label_color = v;
        }
        if let Some(v) = vars.network_label_opacity {
            config.theme.network_label_opacity = v;
        }
        if let Some(v) = vars.fallback_stroke_width {
            config.theme.fallback_stroke_width = v;
        }
        if let Some(v) = vars.fallback_dasharray {
            config.theme.fallback_dasharray = v;
        }
        if let Some(v) = vars.unused_color {
            config.theme.unused_color = v;
        }
        if let Some(v) = vars.unused_node_opacity {
            config.theme.unused_node_opacity = v;
        }
        if let Some(v) = vars.unused_edge_opacity {
            config.theme.unused_edge_opacity = v;
        }
        if let Some(v) = vars.unused_dasharray {
            config.theme.unused_dasharray = v;
        }
        if let Some(v) = vars.unused_label_background {
            config.theme.unused_label_background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    Ok(config)
}

/// Applies `key=value` overrides on top of loaded options, in order.
pub fn apply_overrides(options: &mut LayoutOptions, overrides: &[String]) -> Result<(), ConfigError> {
    for raw in overrides {
        let caps = OVERRIDE_RE
            .captures(raw)
            .ok_or_else(|| ConfigError::MalformedOverride(raw.clone()))?;
        let key = &caps[1];
        let value = &caps[2];

        if matches!(key, "direction") {
            options.direction = Direction::from_token(value)
                .ok_or_else(|| ConfigError::UnknownDirection(value.to_string()))?;
            continue;
        }

        let slot = match key {
            "nodeWidth" | "node_width" => &mut options.node_width,
            "nodeHeight" | "node_height" => &mut options.node_height,
            "nodeGapX" | "node_gap_x" => &mut options.node_gap_x,
            "nodeGapY" | "node_gap_y" => &mut options.node_gap_y,
            "padding" => &mut options.padding,
            "columnGap" | "column_gap" => &mut options.column_gap,
            "columnTopGap" | "column_top_gap" => &mut options.column_top_gap,
            "rootColumnStartX" | "root_column_start_x" => &mut options.root_column_start_x,
            "volumeXOffset" | "volume_x_offset" => &mut options.volume_x_offset,
            "volumeYOffset" | "volume_y_offset" => &mut options.volume_y_offset,
            "initialLastPlacedY" | "initial_last_placed_y" => &mut options.initial_last_placed_y,
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        };
        *slot = value.parse().map_err(|_| ConfigError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        })?;
    }
    Ok(())
}

use compose_graph::config::apply_overrides;
use compose_graph::{LayoutOptions, Project, Theme, compute_layout, render_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComposeGraphOptions {
    theme: Option<String>,
    layout: Option<LayoutOptions>,
    /// `key=value` pairs, same syntax as the CLI `--set` flag.
    overrides: Option<Vec<String>>,
    pretty: Option<bool>,
}

fn build_theme(options: &ComposeGraphOptions) -> Theme {
    match options.theme.as_deref() {
        Some("monochrome") => Theme::monochrome(),
        _ => Theme::compose_default(),
    }
}

fn layout_json(project_json: &str, options: ComposeGraphOptions) -> Result<String, String> {
    let project = Project::from_json(project_json).map_err(|error| error.to_string())?;
    let theme = build_theme(&options);
    let mut layout = options.layout.unwrap_or_default();
    if let Some(overrides) = &options.overrides {
        apply_overrides(&mut layout, overrides).map_err(|error| error.to_string())?;
    }
    let graph = compute_layout(&project, &theme, &layout);
    render_json(&graph, options.pretty.unwrap_or(false)).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_compose_graph(project_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ComposeGraphOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ComposeGraphOptions::default()
    };

    layout_json(project_json, options).map_err(|error| JsValue::from_str(&error))
}

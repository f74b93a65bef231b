pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, ConfigError, Direction, LayoutOptions};
pub use ir::Project;
pub use layout::{Graph, compute_layout};
pub use render::render_json;
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;

/// Lays out `project` with the default palette and serializes the result.
pub fn layout_to_json(project: &Project, options: &LayoutOptions, pretty: bool) -> serde_json::Result<String> {
    let graph = compute_layout(project, &Theme::default(), options);
    render_json(&graph, pretty)
}

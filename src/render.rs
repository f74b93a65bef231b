use crate::layout::Graph;
use anyhow::Result;
use std::path::Path;

/// Serializes a laid-out graph into the JSON document the front end loads.
pub fn render_json(graph: &Graph, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(graph)
    } else {
        serde_json::to_string(graph)
    }
}

pub fn write_output_json(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutOptions;
    use crate::ir::{Project, Service};
    use crate::layout::compute_layout;
    use crate::theme::Theme;
    use serde_json::Value;

    #[test]
    fn emits_front_end_field_names() {
        let mut project = Project::new("demo");
        project.add_service(
            "web",
            Service {
                depends_on: vec!["web".to_string()],
                ..Default::default()
            },
        );
        let graph = compute_layout(&project, &Theme::default(), &LayoutOptions::default());
        let value: Value = serde_json::from_str(&render_json(&graph, false).unwrap()).unwrap();

        assert_eq!(value["project"], "demo");
        assert_eq!(value["layout"], "custom");
        assert_eq!(value["viewport"]["zoom"], 0.8);
        assert!(value["created_at"].is_string());

        let service = &value["nodes"][1];
        assert_eq!(service["type"], "services");
        assert_eq!(service["data"]["type"], "services");
        assert_eq!(service["id"], "services-web");
        assert_eq!(service["data"]["services"]["depends_on"][0], "web");
        assert!(service["data"].get("service").is_none());
        assert!(service.get("width").is_none());

        let self_dependency = value["edges"]
            .as_array()
            .unwrap()
            .iter()
            .find(|edge| edge["animated"] == true)
            .unwrap();
        assert_eq!(self_dependency["sourceHandle"], "services-web-source-2");
        assert_eq!(self_dependency["targetHandle"], "services-web-target-2");
        assert_eq!(self_dependency["type"], "smoothstep");
    }

    #[test]
    fn pretty_output_round_trips() {
        let graph = compute_layout(&Project::new("x"), &Theme::default(), &LayoutOptions::default());
        let pretty = render_json(&graph, true).unwrap();
        assert!(pretty.contains('\n'));
        let back: Graph = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, graph);
    }
}

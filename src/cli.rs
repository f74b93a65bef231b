use crate::config::{apply_overrides, load_config};
use crate::ir::Project;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_json, write_output_json};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "composegraph",
    version,
    about = "Lay out a decoded docker compose project as a node/edge diagram"
)]
pub struct Args {
    /// Project snapshot (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the graph JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5) with `layout` and `themeVariables`
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout option override, e.g. `--set columnGap=400` (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Pretty-print the graph JSON
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Also write a geometry-only dump to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", args.config))?;
    apply_overrides(&mut config.layout, &args.overrides)?;

    let input = read_input(args.input.as_deref())?;
    let project = Project::from_json(&input).context("invalid project snapshot")?;
    for reference in project.unresolved_references() {
        warn!("{reference}; no edge will be drawn");
    }

    let graph = compute_layout(&project, &config.theme, &config.layout);
    info!(
        project = %graph.project,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "layout complete"
    );

    let json = render_json(&graph, args.pretty)?;
    write_output_json(&json, args.output.as_deref())?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &graph)?;
    }

    Ok(())
}

/// Logs go to stderr so stdout stays a clean JSON document.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_overrides() {
        let args = Args::parse_from([
            "composegraph",
            "-i",
            "stack.json",
            "--set",
            "columnGap=400",
            "-s",
            "padding=10",
            "--pretty",
            "-vv",
        ]);
        assert_eq!(args.input.as_deref(), Some(Path::new("stack.json")));
        assert_eq!(args.overrides, vec!["columnGap=400", "padding=10"]);
        assert!(args.pretty);
        assert_eq!(args.verbose, 2);
        assert!(args.output.is_none());
    }

    #[test]
    fn reads_snapshot_from_file() {
        let path = std::env::temp_dir().join(format!("composegraph-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"name": "tmp"}"#).unwrap();
        let input = read_input(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(Project::from_json(&input).unwrap().name, "tmp");
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use whiteboard::config::{ConfigError, EngineConfig};
use whiteboard::engine::{Action, EngineCore};
use whiteboard::input::{InputEvent, ShapeTool, Tool};
use whiteboard::render::DisplayList;

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "whiteboard", about = "Replay a whiteboard input script and print the rendered frame")]
struct Cli {
    /// JSON array of steps: input events or tool/style changes.
    script: PathBuf,

    /// Engine configuration (JSON).
    #[arg(long, env = "WHITEBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Print only object and command counts instead of every draw call.
    #[arg(long)]
    summary: bool,
}

/// Changes the surrounding UI would make outside the input stream.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Control {
    SetTool { tool: Tool },
    SetShape { shape: ShapeTool },
    SetColor { color: String },
    SetThickness { thickness: f64 },
    SetFontSize { size: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Control(Control),
    Event(InputEvent),
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json(&read(path)?)?,
        None => EngineConfig::default(),
    };
    let steps: Vec<Step> = serde_json::from_str(&read(&cli.script)?)?;

    let mut core = EngineCore::with_config(config);
    core.set_viewport(cli.width, cli.height);
    let mut actions = Vec::new();
    for step in steps {
        actions.extend(apply(&mut core, step));
    }

    let mut list = DisplayList::new();
    let Ok(()) = core.render(&mut list);

    let created = actions.iter().filter(|a| matches!(a, Action::ObjectCreated(_))).count();
    info!(actions = actions.len(), created, objects = core.scene.len(), commands = list.commands().len(), "replay finished");

    if cli.summary {
        let mut kinds: BTreeMap<String, usize> = BTreeMap::new();
        for obj in core.scene.iter() {
            *kinds.entry(format!("{:?}", obj.shape.kind())).or_default() += 1;
        }
        println!("objects: {}", core.scene.len());
        for (kind, count) in kinds {
            println!("  {kind}: {count}");
        }
        println!("selected: {}", core.selection().len());
        println!("draw commands: {}", list.commands().len());
    } else {
        for command in list.commands() {
            println!("{command:?}");
        }
    }
    Ok(())
}

fn apply(core: &mut EngineCore, step: Step) -> Vec<Action> {
    match step {
        Step::Event(event) => core.handle(event),
        Step::Control(Control::SetTool { tool }) => core.set_tool(tool),
        Step::Control(Control::SetShape { shape }) => {
            core.set_shape_kind(shape);
            Vec::new()
        }
        Step::Control(Control::SetColor { color }) => {
            core.set_color(color);
            Vec::new()
        }
        Step::Control(Control::SetThickness { thickness }) => {
            core.set_thickness(thickness);
            Vec::new()
        }
        Step::Control(Control::SetFontSize { size }) => core.set_font_size(size),
    }
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_owned(), source })
}

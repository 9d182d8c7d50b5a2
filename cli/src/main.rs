use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use breadboard::config::{ConfigError, EXPORT_NAME_VAR, EditorConfig, THEME_FILE_VAR, THEME_VAR};
use breadboard::export::{ExportError, export_markdown};
use breadboard::outline::{self, Graph};
use breadboard::reconcile::{PositionMap, apply_share_state};
use breadboard::share::{self, ShareError, ShareState};
use breadboard::theme::ThemeMode;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Share(#[from] ShareError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "breadboard", about = "Compile breadboard outlines into node-link diagrams")]
struct Cli {
    /// Color mode; a theme file's own `mode` wins.
    #[arg(long, global = true, value_enum, env = "BREADBOARD_THEME")]
    theme: Option<ThemeArg>,

    /// JSON theme file.
    #[arg(long, global = true, env = "BREADBOARD_THEME_FILE")]
    theme_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed outline document as JSON.
    Parse(InputArgs),
    /// Print the laid-out nodes and edges as JSON.
    Render(RenderArgs),
    /// Encode or decode share-link hashes.
    Share(ShareCommand),
    /// Write the outline as a markdown file.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(default_value = "-", help = "Input file path, or - for stdin")]
    input: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(help = "Input file path, or - for stdin; ignored with --share")]
    input: Option<String>,

    /// Share hash supplying the text and any saved positions.
    #[arg(long)]
    share: Option<String>,
}

#[derive(Args, Debug)]
struct ShareCommand {
    #[command(subcommand)]
    command: ShareSubcommand,
}

#[derive(Subcommand, Debug)]
enum ShareSubcommand {
    /// Encode an outline (and optional positions) into a share hash.
    Encode {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,

        /// Saved positions as a JSON object keyed by node id.
        #[arg(long)]
        positions: Option<String>,

        /// Mark the positions as a manual layout.
        #[arg(long, default_value_t = false)]
        manual: bool,
    },
    /// Decode a share hash and print the state as JSON.
    Decode { hash: String },
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// File name; defaults to breadboard.md.
    #[arg(long, env = "BREADBOARD_EXPORT_NAME")]
    name: Option<String>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Parse(args) => {
            let text = read_input(&args.input)?;
            let (doc, diagnostics) = outline::parse_with_diagnostics(&text);
            for d in &diagnostics {
                tracing::warn!(line = d.line + 1, kind = ?d.kind, text = %d.text, "line ignored");
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::Render(args) => {
            let graph = render(&args, &config)?;
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        Command::Share(ShareCommand { command }) => match command {
            ShareSubcommand::Encode { input, positions, manual } => {
                let positions = positions
                    .as_deref()
                    .map(serde_json::from_str::<PositionMap>)
                    .transpose()?;
                let state = ShareState {
                    text: read_input(&input)?,
                    positions,
                    has_manual_layout: manual.then_some(true),
                };
                println!("{}", share::encode(&state)?);
            }
            ShareSubcommand::Decode { hash } => {
                let state = share::decode(&hash)?;
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
        },
        Command::Export(args) => {
            let text = read_input(&args.input)?;
            let path = export_markdown(&text, &config.export_name)?.write_to(&args.out)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Editor config from the flags, which clap has already merged with their
/// environment variables.
fn resolve_config(cli: &Cli) -> Result<EditorConfig, CliError> {
    let export_name = match &cli.command {
        Command::Export(args) => args.name.clone(),
        _ => None,
    };
    let config = EditorConfig::from_lookup(|key| match key {
        THEME_VAR => cli.theme.map(|arg| ThemeMode::from(arg).to_string()),
        THEME_FILE_VAR => cli.theme_file.as_ref().map(|path| path.display().to_string()),
        EXPORT_NAME_VAR => export_name.clone(),
        _ => None,
    })?;
    Ok(config)
}

fn render(args: &RenderArgs, config: &EditorConfig) -> Result<Graph, CliError> {
    let Some(hash) = &args.share else {
        let text = read_input(args.input.as_deref().unwrap_or("-"))?;
        return Ok(outline::render(&text, &config.theme));
    };

    let state = share::decode(hash)?;
    let graph = outline::render(&state.text, &config.theme);
    Ok(Graph { nodes: apply_share_state(&state, graph.nodes), edges: graph.edges })
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".into(), source })?;
        return Ok(buf);
    }
    fs::read_to_string(Path::new(input)).map_err(|source| CliError::Read { path: input.to_owned(), source })
}

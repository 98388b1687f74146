mod items;
mod names;
mod preferences;
mod render;
mod resolve;
mod summary;
mod types;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use preferences::Preferences;
use render::OutputFormat;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use types::ApiResponse;

/// Normalize a medical search response read from stdin and write the
/// renderable view to stdout.
#[derive(Debug, Parser)]
#[command(name = "mediq-normalizer", version)]
struct Cli {
    /// Preferences file [default: ./mediq-normalizer.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format; overrides the preferences file.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MEDIQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(preferences::FILENAME));
    let prefs = Preferences::load(&config_path)?;
    let format = cli.format.unwrap_or_else(|| prefs.output_format());

    let input = read_stdin().context("reading stdin")?;
    let response: ApiResponse =
        serde_json::from_str(&input).context("parsing search response")?;
    let view = view::build_view(&response);

    match format {
        OutputFormat::Json => render::render_json(&view, cli.pretty || prefs.pretty),
        OutputFormat::Text => {
            let base_dir = config_path.parent().unwrap_or(Path::new("."));
            let template = prefs.load_text_template(base_dir)?;
            render::render_text(&view, &template)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("mediq-normalizer: {err:#}");
            process::exit(2);
        }
    }
}

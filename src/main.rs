use clap::{Parser, Subcommand};
use cv_builder::{config, output, preview, sample, shell};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cv-builder")]
#[command(about = "Résumé builder with a live, print-ready preview")]
#[command(long_about = "\
Résumé builder with a live, print-ready preview

The résumé is personal info plus an ordered list of typed sections:

  text       a paragraph (professional summary)
  list       bullet items (achievements, certifications)
  entries    dated items with bullets (experience, education)
  skills     label/value pairs (skills; `languages` renders inline)

`edit` opens an interactive session on stdin. Sections can be added,
edited, reordered by drag (drag/up/down/drop) or deleted; `print` writes
the current preview as HTML for the browser's print-to-PDF. Nothing is
saved back to the seed.

Run 'cv-builder gen-config' to generate a documented cv.toml.")]
#[command(version)]
struct Cli {
    /// Preview and page settings
    #[arg(long, default_value = "cv.toml", global = true)]
    config: PathBuf,

    /// Starting document as JSON (default: built-in sample)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Edit the résumé interactively
    Edit,
    /// Render the preview once
    Preview {
        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the built-in sample résumé as JSON
    Sample,
    /// Print a stock cv.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cv_builder=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Command::Edit => {
            let config = config::load_config(&cli.config)?;
            let doc = shell::load_seed(cli.seed.as_deref())?;
            let printer = shell::FilePrinter::new(&config.export.output);
            info!(sections = doc.sections.len(), "session started");

            let mut session = shell::Session::new(doc, config, printer);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            session.run(&mut input, &mut out)?;
        }
        Command::Preview { output: target } => {
            let config = config::load_config(&cli.config)?;
            let doc = shell::load_seed(cli.seed.as_deref())?;
            let html = preview::render_document(&doc, &config).into_string();
            match target {
                Some(path) => {
                    std::fs::write(&path, &html)?;
                    println!("{}", output::format_printed(&path, html.len()));
                }
                None => io::stdout().write_all(html.as_bytes())?,
            }
        }
        Command::Sample => {
            let doc = sample::sample_document();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use tokenweave::{ConfigLoader, ExportScope, RunSummary, Transformer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "tokenweave")]
#[command(version, about = "Resolve design tokens and generate Kotlin, Android XML and CSS")]
struct Cli {
    /// Workspace root containing the token sources
    workspace: PathBuf,

    /// Export every brand/theme combination into per-mode directories
    #[arg(long)]
    modes: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokenweave=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<RunSummary> {
    if !cli.workspace.is_dir() {
        bail!("workspace {} is not a directory", cli.workspace.display());
    }

    let config = ConfigLoader::new()
        .with_workspace(&cli.workspace)
        .build()
        .context("failed to load configuration")?;
    let transformer = Transformer::new(&cli.workspace, config)?;

    let scope = if cli.modes {
        ExportScope::AllModes
    } else {
        ExportScope::Default
    };
    transformer
        .run(scope)
        .with_context(|| format!("export of {} failed", cli.workspace.display()))
}

fn print_summary(summary: &RunSummary) {
    for mode in &summary.modes {
        println!(
            "{} {}: {} tokens, {} files",
            style("✓").green(),
            style(&mode.mode).bold(),
            mode.total(),
            mode.files.len()
        );
        if !mode.report.unresolved.is_empty() {
            println!(
                "  {} {} unresolved reference(s)",
                style("!").yellow(),
                mode.report.unresolved.len()
            );
        }
    }
    if let Some(provider) = &summary.provider {
        println!("{} {}", style("✓").green(), provider.display());
    }
    if !summary.removed.is_empty() {
        println!("  removed {} stale root file(s)", summary.removed.len());
    }
    println!("{} files written", style(summary.files_written()).bold());
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

//! Command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use lang_reconcile::Pipeline;
use lang_reconcile::config::ConfigManager;
use lang_reconcile::pipeline::{
    PipelineError,
    VersionReport,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{
    EnvFilter,
    Layer,
    fmt,
};

#[derive(Parser, Debug)]
#[command(name = "lang-reconcile", version, about = "Backport translations to older game releases")]
struct Cli {
    /// Project root holding the settings file and data directories
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Maximum number of files read at once
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile releases against the latest language files
    Reconcile {
        /// Release to process; repeat for several, omit for all
        #[arg(long = "version", value_name = "VERSION")]
        versions: Vec<String>,
    },

    /// Archive reconciled releases as resource packs
    Pack {
        /// Release to pack; repeat for several, omit for all
        #[arg(long = "version", value_name = "VERSION")]
        versions: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] lang_reconcile::config::ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Console logs at `RUST_LOG` (default info); debug logs to `log_file` when given.
fn init_tracing(log_file: Option<&PathBuf>) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file_name = path.file_name().map_or_else(
                || "lang-reconcile.log".into(),
                |name| name.to_string_lossy().into_owned(),
            );
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console_layer).with(file_layer).init();
    guard
}

/// Logs per-release and per-variant counts.
fn report(reports: &[VersionReport]) {
    for version in reports {
        tracing::info!(
            version = %version.version,
            elapsed_ms = version.elapsed.as_millis(),
            "Release reconciled"
        );
        for variant in &version.variants {
            tracing::info!(
                "  {}{}: {} updated, {} summary, {} manual check{}",
                variant.variant,
                if variant.extra { " (extra)" } else { "" },
                variant.updated,
                variant.summary,
                variant.manual_check,
                if variant.conflicts > 0 {
                    format!(", {} conflicts", variant.conflicts)
                } else {
                    String::new()
                },
            );
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ConfigManager::new(&cli.root);
    config.load_settings()?;
    if let Some(jobs) = cli.jobs {
        let mut settings = config.get_settings().clone();
        settings.concurrency = Some(jobs);
        config.update_settings(settings)?;
    }

    let pipeline = Pipeline::from_config(config)?;
    match cli.command {
        Command::Reconcile { versions } => {
            let reports = pipeline.run(&versions).await?;
            report(&reports);
        }
        Command::Pack { versions } => {
            for archive in pipeline.pack(&versions).await? {
                tracing::info!(archive = %archive.display(), "Packed");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_ref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

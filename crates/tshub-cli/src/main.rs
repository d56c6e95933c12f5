//! CLI entry point for the tshub generator.
//!
//! This binary reads the metadata exported from a SignalR server assembly
//! and writes a typed TypeScript client for every hub it finds.
//!
//! # Usage
//!
//! ```bash
//! tshub [OPTIONS] <COMMAND>
//!
//! # Generate clients (and React context glue) into ./src/hubs
//! tshub generate -f ./metadata.json -o ./src/hubs --create-react-context
//!
//! # List the hubs found in a metadata export
//! tshub list -f ./metadata.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod writer;

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tshub_codegen::HubGenerator;
use tshub_core::{Config, MetadataDocument};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Generates typed TypeScript clients for SignalR hubs.
///
/// Reads the JSON metadata exported from a server assembly and emits one
/// proxy class per hub plus a declaration file per referenced type.
#[derive(Parser)]
#[command(name = "tshub", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript clients for every hub.
    Generate {
        /// Path to the exported assembly metadata (JSON).
        #[arg(short = 'f', long, env = "TSHUB_ASSEMBLY_PATH")]
        assembly_path: Utf8PathBuf,

        /// Folder the generated files are written to.
        #[arg(short, long, env = "TSHUB_OUTPUT_FOLDER")]
        output_folder: Utf8PathBuf,

        /// Also emit a React context provider and hook per hub.
        #[arg(long)]
        create_react_context: bool,

        /// Generator configuration file (JSON).
        #[arg(short, long, env = "TSHUB_CONFIG")]
        config: Option<Utf8PathBuf>,
    },

    /// List the hubs found in the metadata and their client interfaces.
    List {
        /// Path to the exported assembly metadata (JSON).
        #[arg(short = 'f', long, env = "TSHUB_ASSEMBLY_PATH")]
        assembly_path: Utf8PathBuf,

        /// Generator configuration file (JSON).
        #[arg(short, long, env = "TSHUB_CONFIG")]
        config: Option<Utf8PathBuf>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file, or the defaults when none is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config = Config::load(path).wrap_err_with(|| format!("Invalid configuration {path}"))?;
    info!(path = %path, "Loaded configuration");
    Ok(config)
}

/// Loads the metadata document.
///
/// # Errors
///
/// Returns an error if the file is missing or is not a valid export.
fn load_metadata(path: &Utf8Path) -> color_eyre::Result<MetadataDocument> {
    let document = MetadataDocument::load(path)
        .wrap_err("Assembly metadata could not be loaded; check the path and re-export it")?;
    info!(
        path = %path,
        assembly = document.assembly().unwrap_or("<unknown>"),
        types = document.len(),
        "Loaded metadata"
    );
    Ok(document)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Generates and writes a client bundle for every hub.
///
/// Successful hubs are written even when others fail; any failure makes the
/// command return an error afterwards.
///
/// # Errors
///
/// Returns an error if no hub is found, or if any hub failed to generate or
/// could not be written.
async fn run_generate(
    document: MetadataDocument,
    config: Config,
    output_folder: &Utf8Path,
) -> color_eyre::Result<()> {
    let hub_count = HubGenerator::new(&document, &config).hubs().len();
    if hub_count == 0 {
        return Err(eyre!(
            "No hubs found; expected types deriving from one of: {}",
            config.generator.hub_base_types.join(", ")
        ));
    }

    info!(hubs = hub_count, output = %output_folder, "Generating hub clients");

    // Generation is CPU-bound rayon work; keep it off the async workers.
    let results = tokio::task::spawn_blocking(move || {
        HubGenerator::new(&document, &config).generate_all()
    })
    .await
    .wrap_err("Generation task failed")?;

    let summary = writer::write_results(output_folder, results).await;
    let files: usize = summary.written.iter().map(|(_, paths)| paths.len()).sum();
    info!(hubs = summary.written.len(), files, output = %output_folder, "Finished writing");

    let failures = &summary.failures;

    if !failures.is_empty() {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle)?;
        writeln!(handle, "Errors ({}):", failures.len())?;
        for (hub, error) in failures {
            writeln!(handle, "  {hub} - {error}")?;
        }

        return Err(eyre!(
            "{} of {} hub(s) failed to generate or write",
            failures.len(),
            hub_count
        ));
    }

    Ok(())
}

/// Prints every discovered hub with its client interface.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
fn run_list(document: &MetadataDocument, config: &Config) -> color_eyre::Result<()> {
    let generator = HubGenerator::new(document, config);
    let hubs = generator.hubs();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Hubs ({}):", hubs.len())?;
    for hub in hubs {
        let class_name = config.generator.client_class_name(&hub.name);
        match generator.client_interface(hub) {
            Ok(client) => writeln!(
                handle,
                "  {} -> {class_name} (client: {})",
                hub.full_name, client.full_name
            )?,
            Err(e) => writeln!(handle, "  {} -> unresolved: {e}", hub.full_name)?,
        }
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    match cli.command {
        Commands::Generate {
            assembly_path,
            output_folder,
            create_react_context,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            config.output.create_react_context |= create_react_context;
            let document = load_metadata(&assembly_path)?;
            run_generate(document, config, &output_folder).await
        }
        Commands::List {
            assembly_path,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let document = load_metadata(&assembly_path)?;
            run_list(&document, &config)
        }
    }
}

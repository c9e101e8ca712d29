//! Fabric Override
//!
//! Renders one resource template for an IBPOrderer: loads the CR and the
//! template, runs the override for the template's kind, and prints the
//! customized object to stdout.
//!
//! ```text
//! fabric-override --instance orderer.yaml --template definitions/orderer/pvc.yaml --action create
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fabric_override::{manifest, Action, OverrideRegistry, Result};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Fabric Override - customize orderer resource templates from an IBPOrderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// IBPOrderer manifest (YAML or JSON)
    #[arg(long, env = "FABRIC_INSTANCE")]
    instance: PathBuf,

    /// Resource template to customize (YAML or JSON)
    #[arg(long, env = "FABRIC_TEMPLATE")]
    template: PathBuf,

    /// Lifecycle action (create, update)
    #[arg(long, env = "OVERRIDE_ACTION", default_value = "create")]
    action: String,

    /// Output format for the customized object
    #[arg(long, env = "OUTPUT_FORMAT", value_enum, default_value = "yaml")]
    output: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    match run(&args) {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                user_error = e.is_user_error(),
                retryable = e.is_retryable(),
                "Override failed: {}",
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let action: Action = args.action.parse()?;

    let instance = manifest::load_instance_file(&args.instance)?;
    let mut object = manifest::load_object_file(&args.template)?;

    info!(
        instance = instance.name(),
        kind = %object.kind(),
        action = %action,
        "Applying override"
    );

    let registry = OverrideRegistry::with_defaults();
    registry.apply(&instance.spec, &mut object, action)?;
    debug!(kind = %object.kind(), "Override applied");

    match args.output {
        OutputFormat::Yaml => manifest::to_yaml(&object),
        OutputFormat::Json => manifest::to_json(&object).map(|json| json + "\n"),
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the rendered object
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

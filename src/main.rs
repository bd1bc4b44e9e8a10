use anyhow::{Context, Result};
use clap::Parser;
use perfmodel::cli::{Cli, OutputFormat};
use perfmodel::params::ModelParameters;
use perfmodel::{loader, model, report};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber
///
/// Data-quality warnings are always shown; `--debug` adds per-rank traces.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve calibration: defaults, then the TOML profile, then CLI flags
fn resolve_params(args: &Cli) -> Result<ModelParameters> {
    let base = if let Some(path) = &args.params {
        ModelParameters::from_toml(path)
            .with_context(|| format!("Failed to load params profile: {}", path.display()))?
    } else {
        ModelParameters::default()
    };

    let params = args.apply_overrides(base);
    params.validate().context("Invalid model parameters")?;
    Ok(params)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let params = resolve_params(&args)?;

    let records = loader::load_path(&args.input).with_context(|| {
        format!("Failed to load counter table: {}", args.input.display())
    })?;

    if args.show_records {
        print!("{}", report::format_records(&records));
    }

    let result = model::evaluate(&records, &params).context("Model evaluation failed")?;

    match args.format {
        OutputFormat::Text => print!("{}", report::format_text(&result)),
        OutputFormat::Json => println!("{}", report::format_json(&result)?),
        OutputFormat::Csv => print!("{}", report::format_csv(&result)),
    }

    Ok(())
}

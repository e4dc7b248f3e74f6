//! ClaML to FHIR CodeSystem converter binary.

use anyhow::{Context, Result};
use clap::Parser;
use claml_cli::Cli;
use claml_loader::convert_file;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = cli.transform_config().context("Invalid options")?;

    tracing::info!("Converting {} to {}", cli.input.display(), cli.output.display());
    let stats = convert_file(&cli.input, &cli.output, &config).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    tracing::info!(
        "Read {} classes: {} concepts emitted ({} declared, {} from modifiers), {} excluded",
        stats.classes_read,
        stats.total_concepts(),
        stats.declared_concepts,
        stats.modifier_concepts,
        stats.excluded_classes
    );
    if stats.duplicate_codes > 0 || stats.modifier_collisions > 0 || stats.empty_labels > 0 {
        tracing::warn!(
            "Skipped {} duplicate codes, {} modifier collisions and {} empty labels",
            stats.duplicate_codes,
            stats.modifier_collisions,
            stats.empty_labels
        );
    }
    tracing::info!("Inclusion rate: {:.1}%", stats.inclusion_rate());

    Ok(())
}

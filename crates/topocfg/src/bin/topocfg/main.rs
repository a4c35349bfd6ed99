mod cli;

use anyhow::Context;
use std::path::PathBuf;
use topocfg::documents;
use topocfg::ConfigurationProcessor;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    init_tracing();

    let processor = ConfigurationProcessor::default();
    let command_result = enter_directories(&cli.directory).and_then(|()| match cli.command {
        cli::Command::Materialize(transform_cli) => materialize(&processor, transform_cli),
        cli::Command::Export(transform_cli) => export(&processor, transform_cli),
        cli::Command::Registry(registry_cli) => registry(&processor, registry_cli),
    });

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("TOPOCFG_LOG"))
        .with_writer(std::io::stderr)
        .init();
}

/// Applies each `-C/--directory` in order, relative to the previous one
fn enter_directories(directories: &[PathBuf]) -> anyhow::Result<()> {
    for directory in directories {
        let work_dir = directory.canonicalize().with_context(|| {
            format!(
                "Failed to resolve path for -C/--directory {}",
                directory.display()
            )
        })?;
        std::env::set_current_dir(&work_dir).with_context(|| {
            format!("Failed to set work directory to {}", work_dir.display())
        })?;

        tracing::info!(directory=%work_dir.display(), "Changed working directory");
    }

    Ok(())
}

pub fn materialize(
    processor: &ConfigurationProcessor,
    cli: cli::TransformCommand,
) -> anyhow::Result<()> {
    let mut properties = documents::load_properties(&cli.input.properties)?;
    let topology = documents::load_topology(&cli.input.topology)?;

    let properties = processor.materialize(&mut properties, &topology)?;

    output(&cli.output, &*properties)
}

pub fn export(
    processor: &ConfigurationProcessor,
    cli: cli::TransformCommand,
) -> anyhow::Result<()> {
    let mut properties = documents::load_properties(&cli.input.properties)?;
    let topology = documents::load_topology(&cli.input.topology)?;

    let properties = processor.export(&mut properties, &topology);

    output(&cli.output, &*properties)
}

#[derive(serde::Serialize)]
struct RegistryRow<'r> {
    config_type: &'r str,
    property: &'r str,
    category: topocfg::Category,
    updater: String,
}

pub fn registry(
    processor: &ConfigurationProcessor,
    cli: cli::RegistryCommand,
) -> anyhow::Result<()> {
    let category = cli.category.map(topocfg::Category::from);

    let rows: Vec<RegistryRow> = processor
        .registry()
        .entries()
        .filter(|entry| category.map_or(true, |category| entry.category == category))
        .map(|entry| RegistryRow {
            config_type: entry.config_type,
            property: entry.name,
            category: entry.category,
            updater: entry.updater.to_string(),
        })
        .collect();

    output(&cli.output, &rows)
}

fn output(output: &cli::OutputArgs, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
    };

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_directory_is_reported() {
        let err = enter_directories(&[PathBuf::from("does/not/exist/anywhere")])
            .expect_err("must error");

        assert!(err
            .to_string()
            .starts_with("Failed to resolve path for -C/--directory does/not/exist/anywhere"));
    }

    #[test]
    fn no_directories() {
        assert!(enter_directories(&[]).is_ok());
    }
}

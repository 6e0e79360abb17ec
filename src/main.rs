use anyhow::{bail, Context, Result};
use clap::Parser;

use omnibar::cli::{CliArgs, CliCommand, ConfigSource};
use omnibar::script::{replay, Script};
use omnibar::TypeaheadConfig;

fn main() -> Result<()> {
    omnibar::tracing::init();

    let args = CliArgs::parse();
    let source = args.command.config_source();

    match args.command {
        CliCommand::Replay { script, json, .. } => {
            let config = match source {
                ConfigSource::User => TypeaheadConfig::load(),
                ConfigSource::File(path) => TypeaheadConfig::read(&path).map_err(anyhow::Error::msg)?,
            };
            let script = Script::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;
            let report = replay(&script, config).context("replaying script")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        CliCommand::CheckConfig { .. } => {
            let (label, config) = match source {
                ConfigSource::User => {
                    let path = omnibar::config_paths::typeahead_file()
                        .context("no config directory available")?;
                    let config = if path.exists() {
                        TypeaheadConfig::read(&path).map_err(anyhow::Error::msg)?
                    } else {
                        TypeaheadConfig::default()
                    };
                    (path.display().to_string(), config)
                }
                ConfigSource::File(path) => {
                    let config = TypeaheadConfig::read(&path).map_err(anyhow::Error::msg)?;
                    (path.display().to_string(), config)
                }
            };

            let problems = config.problems();
            if !problems.is_empty() {
                for problem in &problems {
                    eprintln!("{}: {}", label, problem);
                }
                bail!("{} problem(s) in {}", problems.len(), label);
            }
            println!("{}: ok ({} trigger(s))", label, config.triggers.len());
        }
    }

    Ok(())
}

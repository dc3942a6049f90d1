use std::path::Path;

use tracing::instrument;
use unimatch::Config;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show or modify store configuration
///
/// Configuration is stored in .unimatch/config.toml.
///
/// Available configuration keys:
///   `store_key`  Name the store document is saved under (default:
/// `unimatch_db_v1`)
///   `seed_demo`  Seed demonstration participants into an empty store
/// (default: false)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        ///
        /// Available keys: `store_key`, `seed_demo`
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   unimatch config set `seed_demo` true
    ///   unimatch config set `store_key` cohort_2025
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = Config::path(root);
        let config = if config_path.exists() {
            Config::load(&config_path).map_err(|e| anyhow::anyhow!("{e}"))?
        } else {
            Config::default()
        };

        match self.command {
            ConfigCommand::Show => {
                Self::show_config(root, &config);
                Ok(())
            }
            ConfigCommand::Get { key } => Self::get_config(&config, &key),
            ConfigCommand::Set { key, value } => {
                Self::set_config(config, &config_path, &key, &value)
            }
        }
    }

    fn show_config(root: &Path, config: &Config) {
        println!("Configuration:");
        println!(
            "  store_key: {} ({})",
            config.store_key(),
            config.store_path(root).display().to_string().dim()
        );
        println!("  seed_demo: {}", config.seed_demo);
    }

    fn get_config(config: &Config, key: &str) -> anyhow::Result<()> {
        match key {
            "store_key" => println!("{}", config.store_key()),
            "seed_demo" => println!("{}", config.seed_demo),
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: '{key}'\n\nAvailable keys:\n  store_key\n  seed_demo",
                );
            }
        }
        Ok(())
    }

    fn set_config(
        mut config: Config,
        config_path: &Path,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        match key {
            "store_key" => {
                config
                    .set_store_key(value)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                println!(
                    "{}",
                    format!("Store key: {}", config.store_key()).success()
                );
                println!(
                    "{}",
                    "Existing participants stay under the previous key; move the document to keep them."
                        .dim()
                );
            }
            "seed_demo" => {
                config.seed_demo = value
                    .parse::<bool>()
                    .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
                println!(
                    "{}",
                    format!("Seed demonstration participants: {}", config.seed_demo).success()
                );
            }
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: '{key}'\nSupported keys: store_key, seed_demo",
                );
            }
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))
    }
}

use std::path::Path;

use tracing::instrument;
use unimatch::Config;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Populate the store with demonstration participants while it is empty
    #[arg(long)]
    seed_demo: bool,

    /// Save the store document under this key instead of the default
    #[arg(long, value_name = "KEY")]
    store_key: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = Config::path(root);
        if config_path.exists() {
            anyhow::bail!("Store already initialized (found existing .unimatch directory)");
        }

        let mut config = Config::default();
        config.seed_demo = self.seed_demo;
        if let Some(key) = &self.store_key {
            config
                .set_store_key(key)
                .map_err(|e| anyhow::anyhow!("Invalid store key: {e}"))?;
        }

        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!(
            "{}",
            format!("Initialized nomination store in {}", root.display()).success()
        );
        println!("  Created: .unimatch/config.toml");
        println!(
            "  Store:   {}",
            config.store_path(root).display().to_string().dim()
        );
        println!();
        println!("Next steps:");
        println!("  unimatch login <ID>");
        println!("  unimatch submit <ID> <A> <B> <C>");

        Ok(())
    }
}

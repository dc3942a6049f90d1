use std::path::Path;

use clap::Parser;
use tracing::instrument;
use unimatch::{ParticipantId, find_matches};

use super::{join, open_store, parse_id, print_matches, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show a participant's nominations and matches")]
pub struct Command {
    /// The participant's identifier
    #[clap(value_parser = parse_id)]
    id: ParticipantId,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;

        let Some(record) = store.read(&self.id) else {
            anyhow::bail!("Participant {} not found", self.id);
        };
        let matches = find_matches(store.roster(), &self.id);

        match self.output {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "identifier": record.identifier(),
                    "nominations": record.nominations().as_slice(),
                    "matches": matches,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table => {
                println!("{}", record.identifier().as_str().success());
                if record.nominations().is_empty() {
                    println!("  Nominations: {}", "none".dim());
                } else {
                    println!("  Nominations: {}", join(record.nominations().as_slice()));
                }
                println!();
                print_matches(&matches);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use unimatch::ParticipantId;

    use super::{Command, OutputFormat};

    #[test]
    fn unknown_participant_is_an_error() {
        let tmp = tempdir().unwrap();

        let result = Command {
            id: ParticipantId::new("101").unwrap(),
            output: OutputFormat::Json,
        }
        .run(tmp.path());

        assert!(result.is_err());
    }
}

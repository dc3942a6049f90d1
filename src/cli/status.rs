use std::path::Path;

use clap::Parser;
use tracing::instrument;
use unimatch::{NOMINATION_LIMIT, NominationIndex, ParticipantId};

use super::{
    open_store,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show participant counts and matched pairs")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Counts describing the whole store.
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
struct Summary {
    participants: usize,
    complete: usize,
    nominations: usize,
    pairs: Vec<(ParticipantId, ParticipantId)>,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;

        if store.is_empty() {
            println!("No participants yet. Log in with 'unimatch login <ID>'.");
            return Ok(());
        }

        let summary = summarize(store.roster());

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Table if self.quiet => {
                println!(
                    "participants={} complete={} pairs={}",
                    summary.participants,
                    summary.complete,
                    summary.pairs.len()
                );
            }
            OutputFormat::Table => Self::output_table(&summary),
        }

        Ok(())
    }

    fn output_table(summary: &Summary) {
        println!("Participants:  {}", summary.participants);
        println!(
            "Complete:      {} {}",
            summary.complete,
            format!("(nominated {NOMINATION_LIMIT})").dim()
        );
        println!("Nominations:   {}", summary.nominations);
        println!("Matched pairs: {}", summary.pairs.len().to_string().matched());

        if summary.pairs.is_empty() {
            return;
        }

        println!();
        let narrow = is_narrow();
        for (a, b) in &summary.pairs {
            if narrow {
                println!("  {a}/{b}");
            } else {
                println!("  {} ♥ {}", a.as_str().matched(), b.as_str().matched());
            }
        }
    }
}

fn summarize(roster: &unimatch::Roster) -> Summary {
    let index = NominationIndex::from_roster(roster);

    Summary {
        participants: roster.len(),
        complete: roster
            .iter()
            .filter(|record| record.nominations().len() == NOMINATION_LIMIT)
            .count(),
        nominations: roster.iter().map(|record| record.nominations().len()).sum(),
        pairs: index.mutual_pairs(),
    }
}

#[cfg(test)]
mod tests {
    use unimatch::{Roster, domain::seed::demo_participants};

    use super::*;

    #[test]
    fn summarizes_demo_roster() {
        let roster: Roster = demo_participants().into_iter().collect();

        let summary = summarize(&roster);

        assert_eq!(summary.participants, 3);
        assert_eq!(summary.complete, 3);
        assert_eq!(summary.nominations, 9);
        assert_eq!(summary.pairs.len(), 1);
        assert_eq!(summary.pairs[0].0.as_str(), "101");
        assert_eq!(summary.pairs[0].1.as_str(), "102");
    }

    #[test]
    fn empty_store_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        Command::default().run(tmp.path()).unwrap();
    }
}

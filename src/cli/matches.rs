use std::path::Path;

use tracing::instrument;
use unimatch::{ParticipantId, find_matches};

use super::{open_store, parse_id, print_matches, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The participant's identifier
    #[clap(value_parser = parse_id)]
    id: ParticipantId,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;

        if store.read(&self.id).is_none() {
            println!(
                "{}",
                format!("{} has not logged in yet", self.id).warning()
            );
        }

        print_matches(&find_matches(store.roster(), &self.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use unimatch::{Config, FileBackend, ParticipantId, Store};

    use super::Command;

    #[test]
    fn does_not_register_unknown_participant() {
        let tmp = tempdir().unwrap();

        Command {
            id: ParticipantId::new("101").unwrap(),
        }
        .run(tmp.path())
        .unwrap();

        let config = Config::load_or_default(tmp.path());
        let store = Store::open(FileBackend::for_root(tmp.path(), &config)).unwrap();
        assert!(store.is_empty());
        assert!(!config.store_path(tmp.path()).exists());
    }
}

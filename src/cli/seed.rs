use std::path::Path;

use tracing::instrument;
use unimatch::domain::seed::demo_participants;

use super::{open_store, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;

        if store.seed_if_empty(demo_participants())? {
            println!(
                "{}",
                format!("Seeded {} demonstration participants", store.len()).success()
            );
        } else {
            println!(
                "{}",
                format!(
                    "Store already holds {} participants, nothing seeded",
                    store.len()
                )
                .warning()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use unimatch::{Config, FileBackend, Store, find_matches};

    use super::Command;

    fn reopen(root: &std::path::Path) -> Store<FileBackend> {
        let config = Config::load_or_default(root);
        Store::open(FileBackend::for_root(root, &config)).unwrap()
    }

    #[test]
    fn seeds_once() {
        let tmp = tempdir().unwrap();

        Command {}.run(tmp.path()).unwrap();
        let first = reopen(tmp.path()).roster().clone();
        Command {}.run(tmp.path()).unwrap();
        let second = reopen(tmp.path());

        assert_eq!(first.len(), 3);
        assert_eq!(second.roster(), &first);
        let matches = find_matches(second.roster(), "101");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].as_str(), "102");
    }
}

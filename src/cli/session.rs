use std::path::Path;

use dialoguer::{Confirm, Input};
use tracing::instrument;
use unimatch::{Backend, NOMINATION_LIMIT, ParticipantId, Session, SessionError, Store};

use super::{join, open_store, print_matches, terminal::Colorize};

/// Log in and submit nominations interactively.
///
/// Invalid input is reported and asked for again.
#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;
        converse(&mut store, &mut Terminal)
    }
}

/// The answers an interactive session asks for.
trait Prompt {
    fn identifier(&mut self) -> anyhow::Result<String>;

    fn change_nominations(&mut self) -> anyhow::Result<bool>;

    /// The `n`th nomination, pre-filled with `initial`.
    fn nomination(&mut self, n: usize, initial: String) -> anyhow::Result<String>;
}

/// Prompts on the controlling terminal.
struct Terminal;

impl Prompt for Terminal {
    fn identifier(&mut self) -> anyhow::Result<String> {
        Ok(Input::new()
            .with_prompt("Your identifier")
            .allow_empty(true)
            .interact_text()?)
    }

    fn change_nominations(&mut self) -> anyhow::Result<bool> {
        Ok(Confirm::new()
            .with_prompt("Change your nominations?")
            .default(false)
            .interact()?)
    }

    fn nomination(&mut self, n: usize, initial: String) -> anyhow::Result<String> {
        Ok(Input::new()
            .with_prompt(format!("Nomination {n}"))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?)
    }
}

fn converse<B: Backend>(store: &mut Store<B>, prompt: &mut impl Prompt) -> anyhow::Result<()> {
    let id = loop {
        match ParticipantId::new(prompt.identifier()?) {
            Ok(id) => break id,
            Err(e) => eprintln!("{}", format!("{e}, please try again.").warning()),
        }
    };
    let mut session = Session::login(store, &id)?;

    println!("Logged in as {}", session.participant().as_str().success());
    let current = session.record().nominations().as_slice().to_vec();
    if !current.is_empty() {
        println!("Your nominations: {}", join(&current));
        println!();
        print_matches(&session.matches());

        if !prompt.change_nominations()? {
            return Ok(());
        }
    }

    loop {
        let mut entries = Vec::with_capacity(NOMINATION_LIMIT);
        for n in 1..=NOMINATION_LIMIT {
            let initial = current.get(n - 1).map(ToString::to_string).unwrap_or_default();
            entries.push(prompt.nomination(n, initial)?);
        }

        match session.submit(&entries) {
            Ok(matches) => {
                println!("{}", "Nominations saved".success());
                println!();
                print_matches(&matches);
                return Ok(());
            }
            Err(SessionError::Submission(e)) => {
                eprintln!("{}", e.to_string().warning());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use unimatch::{MemoryBackend, domain::seed::demo_participants};

    use super::*;

    #[derive(Debug, Default)]
    struct Scripted {
        identifiers: VecDeque<&'static str>,
        change: bool,
        nominations: VecDeque<&'static str>,
        prefilled: Vec<String>,
    }

    impl Prompt for Scripted {
        fn identifier(&mut self) -> anyhow::Result<String> {
            let answer = self.identifiers.pop_front().expect("script ran out of identifiers");
            Ok(answer.to_string())
        }

        fn change_nominations(&mut self) -> anyhow::Result<bool> {
            Ok(self.change)
        }

        fn nomination(&mut self, _n: usize, initial: String) -> anyhow::Result<String> {
            self.prefilled.push(initial);
            let answer = self.nominations.pop_front().expect("script ran out of nominations");
            Ok(answer.to_string())
        }
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn saved(store: &Store<MemoryBackend>, who: &str) -> Vec<String> {
        store
            .read(&id(who))
            .unwrap()
            .nominations()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn asks_again_until_submission_is_valid() {
        let mut store = Store::open(MemoryBackend::new()).unwrap();
        let mut prompt = Scripted {
            identifiers: ["  ", "101"].into(),
            nominations: ["101", "102", "102", "102", "103", "104"].into(),
            ..Scripted::default()
        };

        converse(&mut store, &mut prompt).unwrap();

        assert!(prompt.identifiers.is_empty());
        assert!(prompt.nominations.is_empty());
        assert_eq!(saved(&store, "101"), ["102", "103", "104"]);
    }

    #[test]
    fn keeps_nominations_when_change_is_declined() {
        let mut store = Store::open(MemoryBackend::new()).unwrap();
        store.seed_if_empty(demo_participants()).unwrap();
        let mut prompt = Scripted {
            identifiers: ["101"].into(),
            ..Scripted::default()
        };

        converse(&mut store, &mut prompt).unwrap();

        assert!(prompt.prefilled.is_empty());
        assert_eq!(saved(&store, "101"), ["102", "103", "104"]);
    }

    #[test]
    fn prefills_current_nominations_when_changing() {
        let mut store = Store::open(MemoryBackend::new()).unwrap();
        store.seed_if_empty(demo_participants()).unwrap();
        let mut prompt = Scripted {
            identifiers: ["103"].into(),
            change: true,
            nominations: ["101", "104", "105"].into(),
            ..Scripted::default()
        };

        converse(&mut store, &mut prompt).unwrap();

        assert_eq!(prompt.prefilled, ["107", "108", "109"]);
        assert_eq!(saved(&store, "103"), ["101", "104", "105"]);
    }
}

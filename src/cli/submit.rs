use std::path::Path;

use tracing::instrument;
use unimatch::{NOMINATION_LIMIT, Session, SessionError};

use super::{join, open_store, print_matches, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The submitting participant's identifier
    id: String,

    /// Exactly three distinct identifiers of the peers being nominated
    #[arg(num_args = 1.., required = true, value_name = "NOMINEE")]
    nominees: Vec<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;
        let mut session = Session::login(&mut store, &self.id)?;

        let matches = session.submit(&self.nominees).map_err(with_hint)?;

        println!(
            "{}",
            format!(
                "Saved nominations for {}: {}",
                session.participant(),
                join(session.record().nominations().as_slice())
            )
            .success()
        );
        println!();
        print_matches(&matches);

        Ok(())
    }
}

/// Attach the re-entry hint to errors the participant can fix.
fn with_hint(error: SessionError) -> anyhow::Error {
    match error {
        SessionError::Submission(e) => anyhow::anyhow!(
            "{e}\nPlease enter {NOMINATION_LIMIT} different identifiers, not including your own."
        ),
        e => e.into(),
    }
}

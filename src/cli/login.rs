use std::path::Path;

use tracing::instrument;
use unimatch::Session;

use super::{join, open_store, print_matches, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The participant's identifier
    id: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;
        let session = Session::login(&mut store, &self.id)?;

        println!("Logged in as {}", session.participant().as_str().success());

        let nominations = session.record().nominations();
        if nominations.is_empty() {
            println!("{}", "You have not nominated anyone yet.".dim());
            println!(
                "{}",
                format!(
                    "Submit three with: unimatch submit {} <A> <B> <C>",
                    session.participant()
                )
                .dim()
            );
            return Ok(());
        }

        println!("Your nominations: {}", join(nominations.as_slice()));
        println!();
        print_matches(&session.matches());

        Ok(())
    }
}

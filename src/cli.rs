use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quizrun", version, about = "Timed multiple-choice quiz in the terminal")]
pub struct Cli {
    /// Quiz file (YAML or JSON)
    pub quiz: PathBuf,

    /// Quiz page URL; answers are POSTed here
    #[arg(long, env = "QUIZRUN_URL", required_unless_present = "check")]
    pub url: Option<String>,

    /// Sign in under this name before starting
    #[arg(long, env = "QUIZRUN_NAME")]
    pub name: Option<String>,

    /// Seconds per question [default: quiz file value, else 20]
    #[arg(long, value_name = "secs")]
    pub time_per_question: Option<u32>,

    /// Validate the quiz file and print a summary without starting
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Command line wins over the quiz file; zero counts as unset.
    pub fn time_limit(&self, from_quiz: Option<u32>) -> Option<u32> {
        self.time_per_question
            .filter(|secs| *secs > 0)
            .or(from_quiz)
    }
}

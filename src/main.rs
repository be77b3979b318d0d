use clap::Parser;

use quizrun::cli::Cli;
use quizrun::model::effective_time_limit;
use quizrun::parser;
use quizrun::submit::HttpSubmitter;
use quizrun::tui;

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let quiz = parser::load_quiz(&cli.quiz)?;
    let time_limit = cli.time_limit(quiz.time_per_question);
    log::info!(
        "loaded {} questions from {}",
        quiz.questions.len(),
        cli.quiz.display()
    );

    // Handle --check
    if cli.check {
        println!("{}", quiz.display_title());
        println!(
            "{} questions, {}s per question",
            quiz.questions.len(),
            effective_time_limit(time_limit)
        );
        for (i, q) in quiz.questions.iter().enumerate() {
            println!("  {:>3}. [{}] {} options", i + 1, q.id, q.options().len());
        }
        return Ok(());
    }

    let url = cli
        .url
        .as_deref()
        .ok_or_else(|| "--url is required to run the quiz".to_string())?;
    let submitter = HttpSubmitter::new(url)?;

    if let Some(ref name) = cli.name {
        submitter.sign_in(name)?;
    }

    tui::run_tui(quiz, time_limit, submitter)?;

    Ok(())
}

//! Command-line front end: solve one problem and print the report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mathmentor::config::is_single_letter;
use mathmentor::{Feedback, FeedbackLog, Pipeline, Report, Settings, SolutionView};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The problem text; several words are joined with spaces.
    #[arg(required = true)]
    problem: Vec<String>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,

    /// Unknown to solve for and differentiate by.
    #[arg(long, value_parser = parse_variable)]
    variable: Option<String>,

    /// Record feedback on the solution (correct or incorrect).
    #[arg(long)]
    feedback: Option<Feedback>,

    /// Comment stored with the feedback.
    #[arg(long, requires = "feedback")]
    comment: Option<String>,

    /// Feedback log location.
    #[arg(long)]
    feedback_log: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_variable(raw: &str) -> Result<String, String> {
    if is_single_letter(raw) {
        Ok(raw.to_ascii_lowercase())
    } else {
        Err(format!("`{raw}` is not a single letter"))
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let env_filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
    } else {
        EnvFilter::new(level.as_str())
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::from_env();
    if let Some(variable) = cli.variable {
        settings.solver.variable = variable;
    }
    if let Some(path) = cli.feedback_log {
        settings.feedback_path = path;
    }

    let text = cli.problem.join(" ");
    let pipeline = Pipeline::new(settings);
    let report = match pipeline.run(&text) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot serialize report: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    if let Some(feedback) = cli.feedback {
        let log = FeedbackLog::new(&pipeline.settings().feedback_path);
        log.record(
            &report.parsed.problem_text,
            &report.solution,
            feedback,
            cli.comment.as_deref(),
        );
    }

    ExitCode::SUCCESS
}

fn print_report(report: &Report) {
    println!("Problem: {}", report.parsed.problem_text);
    println!("Topic: {}", report.parsed.topic);
    println!("Strategy: {}", report.route.strategy);

    let view = SolutionView::from(&report.solution);
    println!("Steps:");
    for step in &view.steps {
        println!("  - {step}");
    }
    println!("Answer: {}", view.final_answer);

    let status = if report.verification.valid {
        "valid"
    } else {
        "invalid"
    };
    println!("Verification: {status}");
    for issue in &report.verification.issues {
        println!("  ! {issue}");
    }

    match &report.explanation {
        Some(lines) => {
            println!();
            for line in lines {
                println!("{line}");
            }
        }
        None => println!("Solution could not be verified."),
    }
}

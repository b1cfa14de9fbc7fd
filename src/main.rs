use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tscore::{compute, output, Answer, SurveyDefinition};

const EXIT_SUCCESS: i32 = 0;
const EXIT_ANSWERS: i32 = 1;
const EXIT_SURVEY: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "tscore")]
#[command(about = "Score a psychometric questionnaire against a survey definition", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the survey definition JSON
    survey: PathBuf,

    /// Answers, one of y/n/- per statement (e.g. "yn-y"), or @path to a
    /// file containing them; whitespace is ignored
    answers: String,

    /// Print the report as pretty JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let survey = match load_survey(&cli.survey) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Survey error: {e:#}");
            std::process::exit(EXIT_SURVEY);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded \"{}\": {} statements, {} primary / {} additional scales",
            survey.description(),
            survey.statement_count(),
            survey.primary_scales().len(),
            survey.additional_scales().len()
        );
    }

    let answers = match read_answers(&cli.answers) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Answer error: {e:#}");
            std::process::exit(EXIT_ANSWERS);
        }
    };

    let total = match compute(&survey, &answers) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Answer error: {e}");
            std::process::exit(EXIT_ANSWERS);
        }
    };

    let rendered = if cli.json {
        output::format_json(&total).expect("score report always serializes")
    } else {
        output::format_score_table(&total, output::should_use_colors())
    };
    println!("{rendered}");

    std::process::exit(EXIT_SUCCESS);
}

fn load_survey(path: &Path) -> Result<SurveyDefinition> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read survey file at {}", path.display()))?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(SurveyDefinition::from_json(&doc)?)
}

/// Answers come inline or, with a leading `@`, from a file.
fn read_answers(arg: &str) -> Result<Vec<Answer>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file at {path}"))?,
        None => arg.to_string(),
    };

    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            Answer::from_char(c)
                .with_context(|| format!("invalid answer character '{c}' (expected y, n, or -)"))
        })
        .collect()
}

mod agent;
mod kb;
mod lang;
mod translate;

pub const USER_AGENT: &str = concat!("krishi/", env!("CARGO_PKG_VERSION"));

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use agent::{Agent, AnswerRecord};
use translate::GoogleTranslate;

#[derive(Parser)]
#[command(
    name = "krishi",
    version,
    about = "Agricultural Q&A assistant (English/Telugu) over a CSV knowledge base"
)]
struct Cli {
    /// Path to the knowledge base CSV (columns: query, answer)
    #[arg(long, env = "KRISHI_KB", default_value = "organic_farming_curated_kb.csv")]
    kb: PathBuf,

    /// One-shot question (English or Telugu); omit for an interactive prompt
    #[arg(long)]
    text: Option<String>,

    /// Minimum similarity score to accept a knowledge-base match
    #[arg(long, default_value_t = agent::DEFAULT_MIN_SCORE)]
    min_score: f64,

    /// Print the full answer record as JSON instead of just the answer
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("krishi=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let docs = kb::load_corpus(&cli.kb)?;
    let index = kb::TfidfIndex::build(docs);
    info!(entries = index.len(), min_score = cli.min_score, "index built");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let agent = Agent::new(index, GoogleTranslate::new(http), cli.min_score);

    match cli.text {
        Some(text) => print_record(&agent.answer(&text).await, cli.json)?,
        None => interactive_loop(&agent, cli.json).await?,
    }

    Ok(())
}

async fn interactive_loop(
    agent: &Agent<GoogleTranslate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Krishi assistant (type 'quit' to exit)");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }

        print_record(&agent.answer(question).await, json)?;
    }

    Ok(())
}

fn print_record(record: &AnswerRecord, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", record.answer_out);
    }
    Ok(())
}

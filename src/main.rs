//! MI Practice CLI
//!
//! Interactive surface for the retrieval-grounded Motivational Interviewing
//! practice tool: runs a dialogue session in the terminal and prints the
//! rubric evaluation when the trainee finishes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mi_practice::{
    Config, Embedder, KnowledgeRetriever, LlmClient, Scenario, Session,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// MI Practice - a virtual patient for Motivational Interviewing training
#[derive(Parser)]
#[command(name = "mi-practice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    /// HPV vaccination counseling
    Hpv,
    /// Oral hygiene counseling
    OralHygiene,
}

impl ScenarioArg {
    fn to_scenario(self) -> Scenario {
        match self {
            ScenarioArg::Hpv => Scenario::hpv_vaccine(),
            ScenarioArg::OralHygiene => Scenario::oral_hygiene(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive practice session
    Practice {
        /// Training scenario to practice
        #[arg(short, long, value_enum, default_value = "hpv")]
        scenario: ScenarioArg,

        /// Directory of plain-text rubric files used to ground the evaluation
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// API key for the generation service (overrides config/env)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Query the knowledge retriever directly
    Retrieve {
        /// The query text
        query: String,

        /// Directory of plain-text rubric files to index
        #[arg(short, long)]
        corpus: PathBuf,

        /// Number of chunks to return
        #[arg(short = 'k', long, default_value_t = 2)]
        top_k: usize,
    },

    /// Test the generation-service connection
    Test {
        /// API key for the generation service (overrides config/env)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Practice {
            scenario,
            corpus,
            api_key,
        } => cmd_practice(scenario, corpus, api_key).await,
        Commands::Retrieve {
            query,
            corpus,
            top_k,
        } => cmd_retrieve(query, corpus, top_k),
        Commands::Test { api_key } => cmd_test(api_key).await,
    }
}

fn load_config(api_key: Option<String>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(key) = api_key {
        config.llm.api_key = key;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(feature = "local-embeddings")]
fn load_embedder() -> Result<Arc<dyn Embedder>> {
    println!("Loading embedding model (all-MiniLM-L6-v2)...");
    let embedder = mi_practice::MiniLmEmbedder::load().context("Failed to load embedding model")?;
    Ok(Arc::new(embedder))
}

#[cfg(not(feature = "local-embeddings"))]
fn load_embedder() -> Result<Arc<dyn Embedder>> {
    anyhow::bail!("This binary was built without the 'local-embeddings' feature")
}

async fn cmd_practice(
    scenario_arg: ScenarioArg,
    corpus: Option<PathBuf>,
    api_key: Option<String>,
) -> Result<()> {
    let config = load_config(api_key)?;
    let scenario = scenario_arg.to_scenario();
    let corpus_dir = corpus.unwrap_or_else(|| PathBuf::from(scenario.default_corpus_dir));

    let embedder = load_embedder()?;
    println!("Indexing rubric corpus: {}", corpus_dir.display());
    let retriever = Arc::new(
        KnowledgeRetriever::from_corpus_dir(
            &corpus_dir,
            embedder,
            config.retrieval.max_chunk_chars,
        )
        .context("Failed to build the knowledge index")?,
    );
    println!("  Indexed {} chunks", retriever.chunk_count());

    let client = Arc::new(LlmClient::new(config.llm.clone()));
    let mut session = Session::new(scenario, client, retriever)
        .with_grounding_top_k(config.retrieval.grounding_top_k);

    let persona_label = session.scenario().persona_label;
    let trainee_label = session.scenario().trainee_label;

    println!("\n{}", session.scenario().name);
    println!("{}", "─".repeat(60));
    println!("Type your responses; 'finish' ends the session and prints feedback.\n");
    println!("{}: {}", persona_label, session.scenario().opening_line);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\n{}> ", trainee_label);
        std::io::stdout().flush().ok();

        let Some(line) = lines.next() else {
            break; // EOF ends the session like 'finish'
        };
        let line = line.context("Failed to read input")?;
        let text = line.trim();

        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("finish") {
            break;
        }

        match session.submit_trainee_turn(text).await {
            Ok(transcript) => {
                let reply = transcript.turns().last().expect("reply just appended");
                println!("\n{}: {}", persona_label, reply.text);
            }
            Err(e) => {
                // Trainee turn is kept; the same action can be retried.
                println!("\nError: {}", e);
                println!("You can send your next message to continue.");
            }
        }
    }

    if session.transcript().trainee_turn_count() == 0 {
        println!("\nNo trainee turns; nothing to evaluate.");
        return Ok(());
    }

    println!("\nGenerating session feedback...");
    match session.finish().await {
        Ok(report) => {
            println!("\nSession Feedback");
            println!("{}", "─".repeat(60));
            println!("{}", report);
        }
        Err(e) => {
            println!("\nEvaluation failed: {}", e);
        }
    }

    Ok(())
}

fn cmd_retrieve(query: String, corpus: PathBuf, top_k: usize) -> Result<()> {
    let embedder = load_embedder()?;

    println!("Indexing rubric corpus: {}", corpus.display());
    let config = Config::load().context("Failed to load configuration")?;
    let retriever = KnowledgeRetriever::from_corpus_dir(
        &corpus,
        embedder,
        config.retrieval.max_chunk_chars,
    )
    .context("Failed to build the knowledge index")?;
    println!("  Indexed {} chunks", retriever.chunk_count());

    let results = retriever
        .retrieve(&query, top_k)
        .context("Retrieval failed")?;

    if results.is_empty() {
        println!("\nNo chunks retrieved (empty corpus).");
    } else {
        println!("\nTop {} chunks for \"{}\":", results.len(), query);
        println!("{}", "─".repeat(60));
        for (i, text) in results.iter().enumerate() {
            println!("{:>2}. {}", i + 1, text);
        }
    }

    Ok(())
}

async fn cmd_test(api_key: Option<String>) -> Result<()> {
    println!("Testing generation-service connection...\n");

    let config = load_config(api_key)?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        &config.llm.api_key[..config.llm.api_key.len().min(8)]
    );
    println!();

    let client = LlmClient::new(config.llm);

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful!");
        }
        Err(e) => {
            println!("Connection failed: {}", e);
        }
    }

    Ok(())
}

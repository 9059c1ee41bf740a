//! scrapegraph binary: parse CLI options, run the search pipeline, print the
//! answer and the execution trace.

use clap::Parser;
use scrapegraph_cli::{format_execution_info, run, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "scrapegraph")]
#[command(about = "Search the web and answer a prompt from what it finds")]
struct Args {
    /// The user prompt to research.
    prompt: String,

    /// Model as provider/model (e.g. openai/gpt-4o-mini, ollama/llama3, mock/test).
    #[arg(short, long, default_value = "openai/gpt-4o-mini")]
    model: String,

    /// Search engine: google, bing, duckduckgo, serper or searxng.
    #[arg(short = 'e', long, default_value = "duckduckgo")]
    search_engine: String,

    /// Maximum number of search results to fetch.
    #[arg(long, default_value_t = 10)]
    max_results: usize,

    /// Per-request timeout for search and fetch, in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Log node-level progress.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = RunOptions {
        prompt: args.prompt,
        model: args.model,
        search_engine: args.search_engine,
        max_results: args.max_results,
        timeout: args.timeout,
        verbose: args.verbose,
    };

    let (answer, info) = match run(options).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("{answer}");
    println!("---");
    print!("{}", format_execution_info(&info));

    Ok(())
}

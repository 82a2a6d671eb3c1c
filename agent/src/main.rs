use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delve_agent::{run_interactive, run_query, ResearchAgent};
use delve_core::config::{DEFAULT_SUMMARY_SENTENCES, DEFAULT_TOP_K};
use delve_core::{DirectoryCorpus, DocSearch, Summarizer};
use delve_websearch::{WebSearch, WebSearchConfig};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "Research a topic across local documents and the web", long_about = None)]
struct Cli {
    /// Directory holding the local knowledge base
    #[arg(long, global = true, default_value = ".")]
    corpus: PathBuf,
    /// Directory names to skip while scanning the corpus (hidden paths are always skipped)
    #[arg(long, global = true, default_values = ["target", "research_reports"])]
    exclude: Vec<String>,
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Research a single query and print the Markdown report
    Research {
        query: String,
        /// Only search local documents
        #[arg(long, default_value_t = false)]
        offline: bool,
        /// Also write the report to the reports directory
        #[arg(short, long, default_value_t = false)]
        save: bool,
        #[arg(long, default_value = "research_reports")]
        reports_dir: PathBuf,
        /// Local documents to include in the report
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Read queries from stdin until `quit`
    Interactive {
        #[arg(long, default_value_t = false)]
        offline: bool,
        #[arg(short, long, default_value_t = false)]
        save: bool,
        #[arg(long, default_value = "research_reports")]
        reports_dir: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Rank local documents for a query
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Summarize a file (or stdin) extractively
    Summarize {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SUMMARY_SENTENCES)]
        sentences: usize,
        /// Print this many key points instead of a summary
        #[arg(long)]
        key_points: Option<usize>,
    },
    /// List indexed documents
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let docs = DocSearch::new(DirectoryCorpus::new(&cli.corpus).exclude(cli.exclude.clone()));

    match cli.command {
        Commands::Research { query, offline, save, reports_dir, top_k } => {
            let agent = ResearchAgent::new(docs, web_search(offline)?).with_top_k(top_k);
            run_query(&agent, &query, save.then_some(reports_dir.as_path()), &mut io::stdout()).await
        }
        Commands::Interactive { offline, save, reports_dir, top_k } => {
            let agent = ResearchAgent::new(docs, web_search(offline)?).with_top_k(top_k);
            let stdin = io::stdin();
            run_interactive(&agent, save.then_some(reports_dir.as_path()), stdin.lock(), &mut io::stdout()).await
        }
        Commands::Search { query, top_k } => {
            let hits = docs.search(&query, top_k);
            if hits.is_empty() {
                println!("No matching documents.");
            }
            for hit in hits {
                println!("{} (relevance: {:.3})", hit.document_id, hit.score);
                for excerpt in hit.excerpts {
                    for line in excerpt.lines() {
                        println!("    {line}");
                    }
                    println!();
                }
            }
            Ok(())
        }
        Commands::Summarize { file, sentences, key_points } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let summarizer = Summarizer::default().with_sentences(Some(sentences)).with_points(key_points);
            if key_points.is_some() {
                for (i, point) in summarizer.extract_key_points(&text).iter().enumerate() {
                    println!("{}. {point}", i + 1);
                }
            } else {
                println!("{}", summarizer.summarize(&text));
            }
            Ok(())
        }
        Commands::List => {
            for id in docs.list_documents() {
                println!("{id}");
            }
            Ok(())
        }
    }
}

fn web_search(offline: bool) -> Result<Option<WebSearch>> {
    if offline {
        return Ok(None);
    }
    Ok(Some(WebSearch::new(WebSearchConfig::default())?))
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use docqa_cli::{
    ChatHistory, DEFAULT_CONTEXT_MESSAGES, DEFAULT_SEARCH_K, DEFAULT_SEARCH_LIMIT, QaPipeline,
    init_tracing, print_analysis, print_chat_statistics, print_collection_stats, print_favorites,
    print_gated, print_messages, print_metrics, print_response, print_sources,
};
use docqa_core::{QueryType, SourceDocument};
use docqa_openai::OpenAiClient;
use docqa_quality::QualityAssessor;
use docqa_rag::{InMemoryRetriever, IndexingConfig, IndexingReport, TextIndexer, search_similar};
use docqa_router::{QueryRouter, template_for};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Answer questions about your documents, honestly", long_about = None)]
struct Cli {
    /// Directory holding chat history and favorites
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a query and show the processing strategy it gets
    Analyze {
        query: String,
        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },
    /// Print the instruction template for a query type
    Template {
        /// factual, analytical, summarization, procedural or general
        query_type: QueryType,
    },
    /// Score a draft answer and show what would be delivered
    Assess {
        #[arg(long)]
        query: String,
        #[arg(long)]
        answer: String,
        /// JSON array of source documents the answer was drawn from
        #[arg(long)]
        sources: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Index local documents and answer a question from them
    Ask {
        question: String,
        /// File or directory of .txt / .md documents
        #[arg(long)]
        docs: PathBuf,
        /// Chat session the question and answer are recorded in
        #[arg(long, default_value = "default")]
        session: String,
        #[arg(long)]
        json: bool,
    },
    /// Index local documents and list the passages closest to a query
    Search {
        query: String,
        #[arg(long)]
        docs: PathBuf,
        /// Number of passages to return
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_K)]
        k: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show, search or clear the chat history of a session
    History {
        #[arg(long, default_value = "default")]
        session: String,
        /// Only the most recent messages
        #[arg(long)]
        limit: Option<usize>,
        /// Case-insensitive text to look for
        #[arg(long)]
        search: Option<String>,
        /// Show message counts instead of messages
        #[arg(long)]
        stats: bool,
        /// Show favorites instead of messages
        #[arg(long)]
        favorites: bool,
        /// Print recent turns as conversation context
        #[arg(long)]
        context: bool,
        /// Delete the session's messages
        #[arg(long)]
        clear: bool,
        #[arg(long)]
        json: bool,
    },
    /// Add a message to favorites, or remove it with --remove
    Favorite {
        message_id: String,
        #[arg(long, default_value = "default")]
        session: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        remove: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { query, json } => {
            let analysis = QueryRouter::new().analyze(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Commands::Template { query_type } => {
            println!("{}", template_for(query_type));
        }
        Commands::Assess {
            query,
            answer,
            sources,
            json,
        } => {
            let sources = match sources {
                Some(path) => load_sources(&path)?,
                None => Vec::new(),
            };

            let (metrics, gated) = QualityAssessor::new().review(&query, &answer, &sources);
            if json {
                let output = serde_json::json!({ "metrics": metrics, "response": gated });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_metrics(&metrics);
                println!();
                print_gated(&gated);
            }
        }
        Commands::Ask {
            question,
            docs,
            session,
            json,
        } => {
            let retriever = Arc::new(InMemoryRetriever::new());
            let report = index_documents(&retriever, &docs)?;
            if !json {
                print_report(&report);
            }

            let generator = OpenAiClient::from_env()?;
            let pipeline = QaPipeline::new(generator, retriever);
            let response = pipeline.ask(&question).await?;

            let mut history = ChatHistory::open(&cli.data_dir, &session)?;
            history.add_qa_pair(&response)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response);
            }
        }
        Commands::Search {
            query,
            docs,
            k,
            json,
        } => {
            let retriever = Arc::new(InMemoryRetriever::new());
            let report = index_documents(&retriever, &docs)?;
            let hits = search_similar(retriever.as_ref(), &query, k).await?;

            if json {
                let output = serde_json::json!({ "stats": retriever.stats()?, "results": hits });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&report);
                print_collection_stats(&retriever.stats()?);
                println!();
                if hits.is_empty() {
                    println!("{}", "No matching passages.".dimmed());
                } else {
                    print_sources(&hits);
                }
            }
        }
        Commands::History {
            session,
            limit,
            search,
            stats,
            favorites,
            context,
            clear,
            json,
        } => {
            let mut history = ChatHistory::open(&cli.data_dir, &session)?;

            if clear {
                history.clear()?;
                println!("{} Cleared chat history of session '{}'", "🧹".green(), session);
            } else if stats {
                let statistics = history.statistics();
                if json {
                    println!("{}", serde_json::to_string_pretty(&statistics)?);
                } else {
                    print_chat_statistics(&statistics);
                }
            } else if favorites {
                if json {
                    println!("{}", serde_json::to_string_pretty(history.favorites())?);
                } else {
                    print_favorites(history.favorites());
                }
            } else if context {
                let turns = limit.unwrap_or(DEFAULT_CONTEXT_MESSAGES);
                println!("{}", history.conversation_context(turns));
            } else {
                let messages = match &search {
                    Some(query) => history.search(query, limit.unwrap_or(DEFAULT_SEARCH_LIMIT)),
                    None => history.messages(limit).iter().collect(),
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&messages)?);
                } else {
                    print_messages(&messages);
                }
            }
        }
        Commands::Favorite {
            message_id,
            session,
            title,
            remove,
        } => {
            let mut history = ChatHistory::open(&cli.data_dir, &session)?;

            if remove {
                if history.remove_favorite(&message_id)? {
                    println!("{} Removed {} from favorites", "✅".green(), message_id);
                } else {
                    println!("{} {} is not a favorite", "⚠️".yellow(), message_id);
                }
            } else if history.add_favorite(&message_id, title.as_deref())? {
                println!("{} Added {} to favorites", "⭐".yellow(), message_id);
            } else {
                println!(
                    "{} No new favorite: {} is unknown or already saved",
                    "⚠️".yellow(),
                    message_id
                );
            }
        }
    }

    Ok(())
}

fn index_documents(retriever: &Arc<InMemoryRetriever>, docs: &Path) -> Result<IndexingReport> {
    let indexer = TextIndexer::new(retriever.clone()).with_config(IndexingConfig::from_env()?);
    let report = indexer
        .index_path(docs)
        .with_context(|| format!("failed to index {}", docs.display()))?;
    info!(files = report.files_indexed, chunks = report.chunks, "documents indexed");
    Ok(report)
}

fn print_report(report: &IndexingReport) {
    println!(
        "{} Indexed {} files ({} chunks)",
        "📚".blue(),
        report.files_indexed,
        report.chunks
    );
    if report.files_skipped > 0 {
        println!("  {} {} duplicate files skipped", "↷".dimmed(), report.files_skipped);
    }
    for error in &report.errors {
        println!("  {} {}", "⚠️".yellow(), error);
    }
    println!();
}

fn load_sources(path: &Path) -> Result<Vec<SourceDocument>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let sources = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of source documents", path.display()))?;
    Ok(sources)
}

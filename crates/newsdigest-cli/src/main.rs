mod news;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsdigest-cli")]
#[command(about = "Summarize, score, and compare news coverage of a company")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and annotate articles, printed as JSON
    Fetch {
        /// Company name to search for
        company: String,

        /// Number of articles to process (defaults to `NEWSDIGEST_DEFAULT_MAX_ARTICLES`)
        #[arg(long)]
        max_articles: Option<usize>,
    },
    /// Print the sentiment distribution across articles
    Compare {
        /// Company name to search for
        company: String,

        #[arg(long)]
        max_articles: Option<usize>,
    },
    /// Print the articles together with the comparative report
    Report {
        /// Company name to search for
        company: String,

        #[arg(long)]
        max_articles: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = newsdigest_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Fetch {
            company,
            max_articles,
        }) => news::run_fetch(&config, &company, max_articles).await?,
        Some(Commands::Compare {
            company,
            max_articles,
        }) => news::run_compare(&config, &company, max_articles).await?,
        Some(Commands::Report {
            company,
            max_articles,
        }) => news::run_report(&config, &company, max_articles).await?,
        None => println!("newsdigest-cli: run with --help to list commands"),
    }

    Ok(())
}

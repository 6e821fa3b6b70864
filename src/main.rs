use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kidpicks::{
    api::{create_router, AppState},
    config::Config,
    console::{Answers, Console},
    services::Recommender,
};

/// Age-appropriate movie and series picks for kids, limited to your streaming services
#[derive(Debug, Parser)]
#[command(name = "kidpicks", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask for one set of recommendations in the terminal
    Ask {
        /// Child's age (1-18)
        #[arg(long)]
        age: Option<u32>,
        /// What the child is interested in
        #[arg(long)]
        interests: Option<String>,
        /// Comma-separated streaming services
        #[arg(long)]
        platforms: Option<String>,
    },
    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kidpicks=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Ask {
        age: None,
        interests: None,
        platforms: None,
    }) {
        Command::Ask {
            age,
            interests,
            platforms,
        } => ask(config, Answers { age, interests, platforms }).await,
        Command::Serve => serve(config).await,
    }
}

async fn ask(config: Config, answers: Answers) -> anyhow::Result<()> {
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let context = console.collect_context(answers, &config)?;

    let report = Recommender::from_config(&config).recommend(&context).await;
    console.render(&report)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app).await.context("Server error")
}

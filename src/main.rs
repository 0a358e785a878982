//! Chorus CLI entry point.

use anyhow::Result;
use chorus::cli::{preflight, session, Cli, Output};
use chorus::config::Prompts;
use chorus::orchestrator::Orchestrator;
use chorus::rag::RagEngine;
use chorus::youtube::extract_video_id;
use chorus::ChorusError;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("chorus={}", cli.log_level())),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Startup errors are reported once, by anyhow, on return from main
    let settings = cli.load_settings(|key| std::env::var(key).ok())?;
    preflight::check(&settings)?;

    let video_id = extract_video_id(&cli.video).ok_or_else(|| {
        ChorusError::InvalidInput(format!("'{}' is not a YouTube video ID or URL", cli.video))
    })?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let orchestrator = Orchestrator::new(settings.clone());

    let spinner = Output::spinner(&format!("Fetching comments for {}...", video_id));
    let fetched = orchestrator.fetch(&video_id).await;
    spinner.finish_and_clear();
    let fetched = fetched?;

    Output::header(&fetched.title);
    Output::kv("Total comments fetched", &fetched.comments.len().to_string());
    Output::kv("Pages", &fetched.pages.to_string());

    let spinner = Output::spinner("Indexing comments...");
    let indexed = orchestrator.build_index(&fetched.title, &fetched.comments).await;
    spinner.finish_and_clear();
    let indexed = indexed?;

    Output::kv("Usable comments", &indexed.usable_comments.to_string());
    Output::kv("Chunks indexed", &indexed.chunk_count.to_string());
    if indexed.chunk_count == 0 {
        Output::warning("No usable comment text; answers will be empty.");
    }

    let engine = RagEngine::new(&settings.rag, indexed.title, indexed.retriever).with_prompts(prompts);

    println!("\n{}", style("You can now start asking questions about the comments.").bold().cyan());
    println!("{}\n", style("Type 'exit' to quit.").dim());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run(&engine, stdin.lock(), &mut stdout).await?;

    Ok(())
}

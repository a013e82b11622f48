//! `run` subcommand: execute one pipeline over input text

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::AppConfig;
use crate::create_provider;
use crate::domain::{RunSink, RunStatus, StepKind, WorkflowDefinition, WorkflowId};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::{
    InMemoryDefinitionStore, InMemoryRunSink, JsonlRunSink, PipelineEngine, WorkflowRunner,
};

#[derive(Args)]
pub struct RunArgs {
    /// Comma-separated step sequence, e.g. "clean,summarize"
    #[arg(long, value_delimiter = ',')]
    pub steps: Vec<StepKind>,

    /// Input text; read from --file or stdin when omitted
    #[arg(long)]
    pub text: Option<String>,

    /// Read input text from this file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Display name recorded for this pipeline
    #[arg(long, default_value = "Ad-hoc pipeline")]
    pub name: String,

    /// Append the finished run record to this JSONL file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let input = read_input(&args).await?;

    let workflow_id = WorkflowId::new("cli")?;
    let definition = WorkflowDefinition::new(workflow_id.clone(), &args.name, args.steps.clone())?;

    let provider = create_provider(&config.provider);
    let engine = PipelineEngine::new(provider, &config.engine);
    let definitions = Arc::new(InMemoryDefinitionStore::with_definitions(vec![definition]));

    let sink: Arc<dyn RunSink> = match &args.out {
        Some(path) => Arc::new(JsonlRunSink::new(path)),
        None => Arc::new(InMemoryRunSink::new()),
    };

    let runner = WorkflowRunner::new(definitions, sink, engine, &config.engine);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling run");
                cancel.cancel();
            }
        });
    }

    let record = runner.run(&workflow_id, &input, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    if record.result.status == RunStatus::Failed {
        std::process::exit(1);
    }

    Ok(())
}

async fn read_input(args: &RunArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    use tokio::io::AsyncReadExt;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read stdin")?;

    Ok(input)
}

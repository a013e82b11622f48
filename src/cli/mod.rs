//! CLI module for textflow
//!
//! Provides subcommands for driving the engine from the terminal:
//! - `run`: execute a step pipeline over input text
//! - `probe`: check that the provider is reachable

pub mod probe;
pub mod run;

use clap::{Parser, Subcommand};

/// textflow - Sequential LLM text-transformation pipelines
#[derive(Parser)]
#[command(name = "textflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a pipeline of transformation steps over input text
    Run(run::RunArgs),

    /// Probe the provider with one trivial call
    Probe,
}

use clap::{Parser, Subcommand};

/// Doga provider driver
#[derive(Debug, Parser)]
#[command(name = "doga")]
#[command(version)]
#[command(about = "Drive the doga model provider the way a host would", long_about = None)]
pub struct Args {
    /// Model name
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Return one complete response instead of streaming chunks
    #[arg(long = "no-stream")]
    pub no_stream: bool,

    /// Stop sequence (repeatable)
    #[arg(long = "stop", value_name = "SEQ")]
    pub stop: Vec<String>,

    /// End-user identifier passed to the model
    #[arg(long = "user")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Prompt text (positional) (used when no subcommand is given)
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate provider credentials from config/environment
    Validate,

    /// Count prompt tokens for a message
    Tokens {
        #[arg(value_name = "PROMPT")]
        prompt: Vec<String>,
    },

    /// Print the unified error mapping
    Errors,
}

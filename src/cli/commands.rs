//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spritetags")]
#[command(about = "Resolve variant tags of displayed images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Rule file (default: SPRITETAGS_RULES, then the nearest spritetags.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the adjusters registered for an image tag
    Adjust(RequestArgs),

    /// Run the defaulters registered for an image tag
    Default(RequestArgs),

    /// Adjust, then add the defaults of the adjusted tags
    Resolve(RequestArgs),

    /// List registered names and their callback counts
    Rules,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Image tag name followed by attribute tokens; prefix a token with '-'
    /// to remove it (e.g., eileen happy -sad)
    #[arg(
        value_name = "NAME [TOKENS]",
        required = true,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub request: Vec<String>,
}

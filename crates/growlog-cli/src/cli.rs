use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "growlog",
    about = "GrowLog: validation and merge checks for growing well logs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a fetch, insert, or update request against a store fixture
    Validate(ValidateArgs),
    /// Inspect row data with the wire codecs
    Codec(CodecArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Operation {
    Get,
    Insert,
    Update,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON file holding the request: a fetch query or a growing object
    pub request: PathBuf,
    /// JSON store fixture with the wells, wellbores, and objects already stored
    #[arg(long)]
    pub store: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "insert")]
    pub operation: Operation,
    /// Object type tag: log or channelSet
    #[arg(long, default_value = "log")]
    pub object_type: String,
    /// TOML gate configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CodecArgs {
    #[command(subcommand)]
    pub action: CodecAction,
}

#[derive(Subcommand)]
pub enum CodecAction {
    /// Split one delimited string into its fields
    Split {
        text: String,
        #[arg(short, long, default_value = ",")]
        delimiter: String,
    },
    /// Decode the row data of a growing object and check its ordering
    Decode { path: PathBuf },
    /// Check the shape of channel-set row data and print its normal form
    Channels {
        path: PathBuf,
        /// JSON array of channel declarations the rows must carry point
        /// metadata for
        #[arg(long)]
        columns: Option<PathBuf>,
    },
}

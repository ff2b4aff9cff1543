//! CLI argument definitions for the jsonobject binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect and convert JSON documents
#[derive(Parser, Debug)]
#[command(name = "jsonobject")]
#[command(about = "jsonobject: case-insensitive, type-preserving JSON documents")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(
        short,
        long,
        global = true,
        default_value = "human",
        env = "JSONOBJECT_FORMAT"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a document and print its canonical JSON
    Normalize(NormalizeArgs),
    /// List the reference fields of a document
    Refs(InputArgs),
    /// Wrap a document in a base64 envelope
    Encode(InputArgs),
    /// Unwrap a base64 or raw-text envelope
    Decode(InputArgs),
}

/// Input file shared by every command
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// File to read; standard input when absent or `-`
    pub file: Option<PathBuf>,
}

/// Arguments for the normalize command
#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Keep generated fields (a_gen_/e_gen_) instead of dropping them
    #[arg(long, env = "JSONOBJECT_KEEP_GENERATED")]
    pub keep_generated: bool,

    /// Keep timestamp-like strings as text
    #[arg(long)]
    pub no_dates: bool,

    /// Indent the output
    #[arg(long)]
    pub pretty: bool,
}

//! Envelope commands - base64 wrapping for text-only transports.

use jsonobject::{Doc, envelope};

use crate::cli::InputArgs;
use crate::commands::read_input;
use crate::output::OutputFormat;

/// Run the encode command
pub fn encode(args: &InputArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Doc::parse(&read_input(args.file.as_deref())?)?;
    let encoded = envelope::encode(&doc);

    match format {
        OutputFormat::Human => println!("{encoded}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "envelope": encoded }));
        }
    }

    Ok(())
}

/// Run the decode command
pub fn decode(args: &InputArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = envelope::decode(&read_input(args.file.as_deref())?)?;

    match format {
        OutputFormat::Human => println!("{doc}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "document": doc.to_json_value() }));
        }
    }

    Ok(())
}

//! Normalize command - parses a document and prints canonical JSON.

use jsonobject::{DateHandling, Doc, ParseOptions};

use crate::cli::NormalizeArgs;
use crate::commands::read_input;
use crate::output::OutputFormat;

/// Run the normalize command
pub fn run(args: &NormalizeArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(args.input.file.as_deref())?;

    let dates = if args.no_dates {
        DateHandling::AsText
    } else {
        DateHandling::Detect
    };
    let options = ParseOptions::new()
        .with_generated(args.keep_generated)
        .with_dates(dates);
    let doc = Doc::parse_with(&text, options)?;
    tracing::debug!(entries = doc.len(), "parsed document");

    match format {
        OutputFormat::Human if args.pretty => println!("{}", doc.to_json_pretty()?),
        OutputFormat::Human => println!("{doc}"),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "entries": doc.len(),
                "document": doc.to_json_value(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}

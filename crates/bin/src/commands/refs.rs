//! Refs command - lists the reference fields of a document.

use jsonobject::{Doc, ReferenceKind, ReferenceRead};

use crate::cli::InputArgs;
use crate::commands::read_input;
use crate::output::{OutputFormat, print_table};

fn kind_label(key: &str) -> &'static str {
    match ReferenceKind::of_key(key) {
        Some(ReferenceKind::Article) => "article",
        Some(ReferenceKind::Entity) => "entity",
        None => "other",
    }
}

/// Run the refs command
pub fn run(args: &InputArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Doc::parse(&read_input(args.file.as_deref())?)?;
    let fields = doc.reference_fields();

    match format {
        OutputFormat::Human => {
            if fields.is_empty() {
                println!("No reference fields found.");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = fields
                .iter()
                .map(|(key, _)| {
                    vec![
                        key.to_string(),
                        kind_label(key).to_string(),
                        doc.type_from_reference(key),
                        doc.values_from_reference(key).join(","),
                    ]
                })
                .collect();
            print_table(&["KEY", "KIND", "TYPE", "VALUES"], &rows);
        }
        OutputFormat::Json => {
            let value: Vec<serde_json::Value> = fields
                .iter()
                .map(|(key, _)| {
                    serde_json::json!({
                        "key": key,
                        "kind": kind_label(key),
                        "type": doc.type_from_reference(key),
                        "values": doc.values_from_reference(key),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}

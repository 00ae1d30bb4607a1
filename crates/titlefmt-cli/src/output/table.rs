//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use titlefmt::interpreter::FunctionEntry;

/// Format the built-in function catalog as a table.
pub fn format_functions_table(entries: &[FunctionEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Function", "Arguments", "Family"]);

    for entry in entries {
        table.add_row(vec![
            format!("${}", entry.name),
            entry.arity.to_string(),
            format!("{:?}", entry.family),
        ]);
    }

    table
}

//! Output formatting for resolved configuration tables.

use crate::config::{ConfigTable, ResolvedValue};
use serde_json::{Value, json};

/// Output format for dumping a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Render a table in the requested format.
pub fn format_table(table: &ConfigTable, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => table.to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&table_to_json(table)).unwrap_or_default()
        }
        OutputFormat::Markdown => format_table_markdown(table),
    }
}

/// JSON array of entries in options order.
pub fn table_to_json(table: &ConfigTable) -> Value {
    Value::Array(table.iter().map(entry_to_json).collect())
}

fn entry_to_json(resolved: &ResolvedValue) -> Value {
    json!({
        "name": resolved.name,
        "type": resolved.value_type,
        "value": resolved.value,
        "source": resolved.source,
        "required": resolved.required,
    })
}

/// Format a table as markdown.
pub fn format_table_markdown(table: &ConfigTable) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Configuration ({})\n\n", table.len()));
    if table.is_empty() {
        return md;
    }

    md.push_str("| name | type | value | source | required |\n");
    md.push_str("|---|---|---|---|---|\n");
    for resolved in table.iter() {
        let value = resolved
            .value
            .as_ref()
            .map(|v| format!("`{}`", v))
            .unwrap_or_else(|| "-".to_string());
        let source = resolved
            .source
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            resolved.name,
            resolved.value_type,
            value,
            source,
            if resolved.required { "yes" } else { "no" }
        ));
    }

    md
}

/// `KEY=value` lines for seeding an environment.
pub fn format_exports(table: &ConfigTable) -> String {
    let mut out = String::new();
    for (name, value) in table.env_exports() {
        out.push_str(&format!("{}={}\n", name, value));
    }
    out
}

//! Output formatting: plain text (human-readable) and JSON.

use serde_json::json;
use std::fmt::Write;
use thousandeyes_lib::WebTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable key-value lines
    #[default]
    Plain,
    /// JSON (pretty-printed)
    Json,
}

pub fn render(test: &WebTransaction, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Plain => Ok(format_plain(test)),
        OutputFormat::Json => format_json(test),
    }
}

/// One `key: value` line per field; unset fields show as `-`.
/// Multi-line scripts are indented under their key.
pub fn format_plain(test: &WebTransaction) -> String {
    let mut out = String::new();
    let id = test.test_id.map(|id| id.to_string());
    let fields = [
        ("test_id", id.as_deref()),
        ("test_name", test.test_name.as_deref()),
        ("created_date", test.created_date.as_deref()),
        ("created_by", test.created_by.as_deref()),
    ];
    for (key, value) in fields {
        let _ = writeln!(out, "{}: {}", key, value.unwrap_or("-"));
    }
    match test.transaction_script.as_deref() {
        Some(script) if script.contains('\n') => {
            let _ = writeln!(out, "transaction_script:");
            for line in script.lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }
        Some(script) => {
            let _ = writeln!(out, "transaction_script: {}", script);
        }
        None => {
            let _ = writeln!(out, "transaction_script: -");
        }
    }
    out.trim_end().to_string()
}

/// Pretty-printed JSON including the server-assigned fields, which the wire
/// serializer leaves out of request bodies.
pub fn format_json(test: &WebTransaction) -> Result<String, String> {
    let value = json!({
        "testId": test.test_id,
        "testName": test.test_name,
        "createdDate": test.created_date,
        "createdBy": test.created_by,
        "transactionScript": test.transaction_script,
    });
    serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
}

//! JSON report output

use crate::output::{OutputResult, ScrapeReport};

/// Serializes a report as pretty-printed JSON, with the title included
pub fn format_json(report: &ScrapeReport) -> OutputResult<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("title".to_string(), serde_json::Value::String(report.title()));
    }

    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    Ok(json)
}

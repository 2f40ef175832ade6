//! Report renderers for query records.
//!
//! Pure functions producing HTML, Markdown, and CSV views of a record plus
//! one shared execution result. All three views of a record are derived from
//! the same result, so they always agree on execution statistics.

use crate::artifact::metadata::{extract_keywords, query_hash};
use crate::engine::{ExecutionResult, SamplePreview};
use crate::query::QueryRecord;

/// Placeholder shown in place of an empty sample preview.
const NO_RESULTS_PLACEHOLDER: &str = "No results to display.";

/// Renders an HTML document presenting the query, its execution statistics,
/// and a sample-result table.
pub fn render_html(record: &QueryRecord, result: &ExecutionResult) -> String {
    let mut html = String::new();

    html.push_str(
        "<div style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;\">\n",
    );
    html.push_str(&format!(
        "<h2 style=\"color: #333;\">SQL Query: {}</h2>\n",
        escape_html(&record.name)
    ));

    html.push_str(
        "<div style=\"background: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n",
    );
    html.push_str("<h3 style=\"color: #666; margin-top: 0;\">Query</h3>\n");
    html.push_str(&format!(
        "<pre style=\"background: #fff; padding: 10px; border-left: 4px solid #007acc; \
         overflow-x: auto;\"><code>{}</code></pre>\n",
        escape_html(&record.query)
    ));
    html.push_str("</div>\n");

    if let Some(description) = &record.description {
        html.push_str(&format!(
            "<p><strong>Description:</strong> {}</p>\n",
            escape_html(description)
        ));
    }

    html.push_str(
        "<div style=\"background: #e8f5e8; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n",
    );
    html.push_str("<h3 style=\"color: #2d5a2d; margin-top: 0;\">Execution Results</h3>\n");
    html.push_str(&format!(
        "<p><strong>Status:</strong> {}</p>\n",
        result.status
    ));
    html.push_str(&format!(
        "<p><strong>Rows Affected:</strong> {}</p>\n",
        result.rows_affected
    ));
    html.push_str(&format!(
        "<p><strong>Execution Time:</strong> {:.2} ms</p>\n",
        result.execution_time_ms
    ));
    html.push_str(&render_preview_table(&result.preview));
    html.push_str("</div>\n");

    html.push_str(
        "<div style=\"background: #f0f8ff; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n",
    );
    html.push_str("<h3 style=\"color: #1e3a8a; margin-top: 0;\">Metadata</h3>\n");
    html.push_str(&format!(
        "<p><strong>Created At:</strong> {}</p>\n",
        record.created_at.to_rfc3339()
    ));
    html.push_str(&format!(
        "<p><strong>Query Hash:</strong> {}</p>\n",
        query_hash(&record.query)
    ));
    if let Some(parameters) = &record.parameters {
        let rendered = serde_json::to_string_pretty(parameters).unwrap_or_default();
        html.push_str(&format!(
            "<p><strong>Parameters:</strong></p>\n<pre>{}</pre>\n",
            escape_html(&rendered)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("</div>\n");
    html
}

/// Renders the sample preview as an HTML table, or the no-results
/// placeholder when the preview is empty.
fn render_preview_table(preview: &SamplePreview) -> String {
    if preview.is_empty() {
        return format!("<p>{NO_RESULTS_PLACEHOLDER}</p>\n");
    }

    let mut table =
        String::from("<table style=\"width: 100%; border-collapse: collapse; margin: 10px 0;\">\n");

    table.push_str("<thead><tr>");
    for column in &preview.columns {
        table.push_str(&format!(
            "<th style=\"border: 1px solid #ddd; padding: 8px; background: #f2f2f2;\">{}</th>",
            escape_html(column)
        ));
    }
    table.push_str("</tr></thead>\n<tbody>\n");

    for row_idx in 0..preview.rows.len() {
        table.push_str("<tr>");
        for col_idx in 0..preview.columns.len() {
            table.push_str(&format!(
                "<td style=\"border: 1px solid #ddd; padding: 8px;\">{}</td>",
                escape_html(&preview.cell(row_idx, col_idx))
            ));
        }
        table.push_str("</tr>\n");
    }

    table.push_str("</tbody></table>\n");
    table
}

/// Renders a Markdown summary of the record and its execution result.
pub fn render_markdown(record: &QueryRecord, result: &ExecutionResult) -> String {
    let description = record
        .description
        .as_deref()
        .unwrap_or("No description provided");
    let parameters = match &record.parameters {
        Some(p) => serde_json::to_string_pretty(p).unwrap_or_default(),
        None => "No parameters".to_string(),
    };
    let keywords = extract_keywords(&record.query).join(", ");

    format!(
        "# SQL Query: {name}\n\
         \n\
         ## Query Details\n\
         - **Name:** {name}\n\
         - **Created:** {created}\n\
         - **Status:** {status}\n\
         \n\
         ## SQL Query\n\
         ```sql\n\
         {query}\n\
         ```\n\
         \n\
         ## Description\n\
         {description}\n\
         \n\
         ## Execution Results\n\
         - **Rows Affected:** {rows}\n\
         - **Execution Time:** {time:.2} ms\n\
         - **Status:** {status}\n\
         \n\
         ## Parameters\n\
         {parameters}\n\
         \n\
         ## Metadata\n\
         - **Query Hash:** {hash}\n\
         - **SQL Keywords:** {keywords}\n",
        name = record.name,
        created = record.created_at.to_rfc3339(),
        status = result.status,
        query = record.query,
        description = description,
        rows = result.rows_affected,
        time = result.execution_time_ms,
        parameters = parameters,
        hash = query_hash(&record.query),
        keywords = keywords,
    )
}

/// Renders a fixed two-column `attribute,value` CSV of record and execution
/// metadata.
pub fn render_csv(record: &QueryRecord, result: &ExecutionResult) -> String {
    let mut csv = String::from("attribute,value\n");
    csv.push_str(&format!("name,{}\n", escape_csv(&record.name)));
    csv.push_str(&format!("query_length,{}\n", record.query.chars().count()));
    csv.push_str(&format!("query_hash,{}\n", query_hash(&record.query)));
    csv.push_str(&format!("created_at,{}\n", record.created_at.to_rfc3339()));
    csv.push_str(&format!("execution_status,{}\n", result.status));
    csv.push_str(&format!("rows_affected,{}\n", result.rows_affected));
    csv.push_str(&format!(
        "execution_time_ms,{:.2}\n",
        result.execution_time_ms
    ));
    csv.push_str(&format!("has_parameters,{}\n", record.has_parameters()));
    csv.push_str(&format!("parameter_count,{}\n", record.parameter_count()));
    csv
}

/// Escapes HTML special characters.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Quotes a CSV field when it contains separators or quotes.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

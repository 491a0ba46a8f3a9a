//! HTML rendering for the single-page UI.
//!
//! The results section is the Screen target of the shared normalizer:
//! the same field sequence the exporters consume, rendered as markup.

use bioquery_common::models::{QueryResult, SourceDescriptor, SourceResult};
use bioquery_report::markdown::{flow_lines, strip_markdown, FlowLine};
use bioquery_report::normalize::{normalize_record, Field, RenderTarget};

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn source_css_class(source: &str) -> &'static str {
    let source = source.to_lowercase();
    if source.contains("pubmed") {
        "source-pubmed"
    } else if source.contains("uniprot") {
        "source-uniprot"
    } else if source.contains("swissadme") {
        "source-swissadme"
    } else {
        "source-default"
    }
}

/// The main page: status bar, query form, and (when present) results
/// with the export menu.
pub fn page(
    sources: &[SourceDescriptor],
    results: Option<&QueryResult>,
    status: &str,
) -> String {
    let source_boxes: String = sources
        .iter()
        .map(|s| {
            format!(
                r#"<label class="source-option"><input type="checkbox" name="sources" value="{name}" checked> {name} <small>{desc}</small></label>"#,
                name = escape_html(&s.name),
                desc = escape_html(&s.description),
            )
        })
        .collect();

    let export_menu = if results.is_some() {
        r#"<div class="export-menu">
            <span>Export Results:</span>
            <a href="/export/pdf">PDF</a>
            <a href="/export/json">JSON</a>
            <a href="/export/csv">CSV</a>
            <a href="/export/txt">TXT</a>
        </div>"#
            .to_string()
    } else {
        String::new()
    };

    let results_section = results.map(results_html).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Bioquery — Biomedical Research Platform</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<main class="main-content">
    <h1>Biomedical Research Platform</h1>
    <div class="status-bar">{status}</div>
    {export_menu}
    <form method="POST" action="/query" class="query-form">
        <label>Research Query
            <textarea name="query" rows="3" required
                placeholder="e.g. CRISPR gene editing in pancreatic cancer"></textarea>
        </label>
        <fieldset>
            <legend>Data Sources</legend>
            {source_boxes}
        </fieldset>
        <label>Max Results
            <input type="number" name="max_results" min="1" max="50" value="10">
        </label>
        <label>Processing Mode
            <select name="processing_mode">
                <option value="ai" selected>AI orchestration</option>
                <option value="direct">Direct retrieval</option>
            </select>
        </label>
        <button type="submit">Search</button>
    </form>
    {results_section}
</main>
</body>
</html>"#,
        status = escape_html(status),
    )
}

/// Summary cards, per-source blocks, and the AI analysis panel.
pub fn results_html(results: &QueryResult) -> String {
    let summary = format!(
        r#"<section class="summary">
            <div class="summary-card"><strong>{}</strong> Total Results</div>
            <div class="summary-card"><strong>{}</strong> Sources Queried</div>
            <div class="summary-card"><strong>{}</strong> Orchestration Method</div>
        </section>"#,
        results.total_results(),
        results.sources_queried(),
        escape_html(results.orchestration_label()),
    );

    let sources: String = results
        .results
        .iter()
        .map(|(source, result)| source_block_html(source, result))
        .collect();

    let analysis = results
        .ai_analysis
        .as_deref()
        .map(ai_analysis_html)
        .unwrap_or_default();

    format!(r#"<section class="results">{summary}{sources}{analysis}</section>"#)
}

fn source_block_html(source: &str, result: &SourceResult) -> String {
    let header = format!(
        r#"<h3 class="source-header {}">{}</h3>"#,
        source_css_class(source),
        escape_html(&bioquery_report::document::source_display_name(source)),
    );

    if let Some(error) = result.error() {
        return format!(
            r#"<div class="source-block">{header}<div class="error-box">Error: {}</div></div>"#,
            escape_html(error),
        );
    }

    let records = match result.records() {
        Some(records) if !records.is_empty() => records,
        _ => {
            return format!(
                r#"<div class="source-block">{header}<p class="empty">No results found for this source.</p></div>"#
            );
        }
    };

    let items: String = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields: String = normalize_record(source, record, index, RenderTarget::Screen)
                .iter()
                .map(field_html)
                .collect();
            format!(r#"<div class="result-item">{fields}</div>"#)
        })
        .collect();

    format!(
        r#"<div class="source-block">{header}<p class="count">Found {} results:</p>{items}</div>"#,
        records.len(),
    )
}

fn field_html(field: &Field) -> String {
    match field {
        Field::RecordHeading(number) => format!(r#"<h4>Result {number}</h4>"#),
        Field::Title(title) => format!(r#"<div class="result-title">{}</div>"#, escape_html(title)),
        Field::Meta(meta) => format!(r#"<div class="result-meta">{}</div>"#, escape_html(meta)),
        Field::Text(body) => format!(r#"<p class="result-text">{}</p>"#, escape_html(body)),
        Field::KeyValue { key, value } => format!(
            r#"<p class="result-kv"><strong>{}:</strong> {}</p>"#,
            escape_html(key),
            escape_html(value),
        ),
        Field::Link { label, url } => format!(
            r#"<a class="result-link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(url),
            escape_html(label),
        ),
        Field::Diagram { label, url } => format!(
            r#"<figure class="diagram"><img src="{}" alt="{}"><figcaption>{}</figcaption></figure>"#,
            escape_html(url),
            escape_html(label),
            escape_html(label),
        ),
        Field::MoleculeHeader { index, smiles } => format!(
            r#"<div class="molecule-header"><span>Molecule {index}</span><code>{}</code></div>"#,
            escape_html(smiles),
        ),
        Field::PropertyGroup { name, rows } => {
            let body: String = rows
                .iter()
                .map(|row| {
                    format!(
                        r#"<tr><td>{}</td><td>{}</td></tr>"#,
                        escape_html(&row.name),
                        escape_html(&row.value),
                    )
                })
                .collect();
            format!(
                r#"<table class="property-table"><caption>{}</caption><thead><tr><th>Property</th><th>Value</th></tr></thead><tbody>{body}</tbody></table>"#,
                escape_html(name),
            )
        }
        Field::ImageNote(note) => format!(r#"<p class="image-note">{}</p>"#, escape_html(note)),
    }
}

fn ai_analysis_html(analysis: &str) -> String {
    let body: String = flow_lines(&strip_markdown(analysis))
        .into_iter()
        .map(|line| match line {
            FlowLine::Paragraph(text) => format!("<p>{}</p>", escape_html(&text)),
            FlowLine::Bullet(text) => format!("<li>{}</li>", escape_html(&text)),
            FlowLine::Numbered(text) => format!(r#"<p class="numbered">{}</p>"#, escape_html(&text)),
        })
        .collect();
    format!(
        r#"<section class="ai-analysis"><h3>AI Analysis &amp; Synthesis</h3>{body}</section>"#
    )
}

pub fn notice_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Bioquery — Notice</title></head>
<body>
<main class="notice">
    <p>{}</p>
    <a href="/">Dismiss</a>
</main>
</body>
</html>"#,
        escape_html(message),
    )
}

pub fn error_page(message: &str, detail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Bioquery — Error</title></head>
<body>
<main class="error-panel">
    <h1>Something went wrong</h1>
    <p>{}</p>
    <details><summary>Details</summary><pre>{}</pre></details>
    <a href="/">Reload</a>
    <a href="/">Try again</a>
</main>
</body>
</html>"#,
        escape_html(message),
        escape_html(detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>&\"x\""), "&lt;b&gt;&amp;&quot;x&quot;");
    }

    #[test]
    fn export_menu_only_with_results() {
        let idle = page(&[], None, "Ready");
        assert!(!idle.contains("/export/pdf"));

        let results: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "direct",
            "results": {"pubmed": []}
        }))
        .unwrap();
        let with_results = page(&[], Some(&results), "Done");
        assert!(with_results.contains("/export/pdf"));
        assert!(with_results.contains("No results found for this source."));
    }

    #[test]
    fn error_sources_render_error_box() {
        let results: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "ai",
            "results": {"uniprot": {"error": "upstream timeout"}}
        }))
        .unwrap();
        let html = results_html(&results);
        assert!(html.contains("Error: upstream timeout"));
        assert!(!html.contains("result-item"));
    }

    #[test]
    fn screen_records_use_display_truncation() {
        let long = "y".repeat(500);
        let results: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "direct",
            "results": {"pubmed": [{"title": "t", "abstract": long}]}
        }))
        .unwrap();
        let html = results_html(&results);
        assert!(html.contains(&format!("{}...", "y".repeat(200))));
        assert!(!html.contains(&"y".repeat(201).to_string()));
    }
}

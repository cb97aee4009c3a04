use crate::application::services::{IntakeOutcome, IntakeReport};
use crate::domain::ClassificationResult;

use super::cards::{FieldCard, format_type_heading, render_cards};

pub const CLASSIFICATION_FAILED_MESSAGE: &str = "Classification failed for this document.";

pub fn unmapped_type_message(doc_type: &str) -> String {
    format!("No extractor found for document type: {doc_type}")
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 24px; color: #111; }
.hero { background: #f5f5f7; padding: 25px; border-radius: 15px; text-align: center; }
.hero p { color: #555; font-size: 16px; }
form.upload { margin: 24px 0; padding: 20px; border: 2px dashed #ccc; border-radius: 12px; }
.classification { background: #e0f7fa; padding: 15px; border-radius: 10px; border-left: 6px solid #00acc1; }
.classification h3 { margin: 0; color: #00796b; }
.cards { display: flex; gap: 20px; flex-wrap: wrap; }
.card { flex: 1; background: #e0f7fa; padding: 20px; border-radius: 12px; min-width: 250px; }
.card h4 { margin: 0; color: #00796b; }
.card p { margin: 5px 0; font-weight: bold; white-space: pre-line; }
.error { background: #fdecea; color: #b71c1c; padding: 15px; border-radius: 10px; }
.warning { background: #fff8e1; color: #8d6e00; padding: 15px; border-radius: 10px; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_upload_page(max_file_size_mb: usize) -> String {
    page(max_file_size_mb, "")
}

pub fn render_error_page(message: &str, max_file_size_mb: usize) -> String {
    page(
        max_file_size_mb,
        &format!(r#"<div class="error">{}</div>"#, escape_html(message)),
    )
}

pub fn render_result_page(report: &IntakeReport, max_file_size_mb: usize) -> String {
    let mut body = format!(
        r#"<p>File: <strong>{}</strong></p>"#,
        escape_html(&report.filename)
    );

    match &report.outcome {
        IntakeOutcome::ClassificationFailed => {
            body.push_str(&format!(
                r#"<div class="error">{CLASSIFICATION_FAILED_MESSAGE}</div>"#
            ));
        }
        IntakeOutcome::UnmappedType { classification } => {
            body.push_str(&classification_card(classification));
            body.push_str(&format!(
                r#"<div class="warning">{}</div>"#,
                escape_html(&unmapped_type_message(&classification.doc_type))
            ));
        }
        IntakeOutcome::Extracted {
            classification,
            extraction,
        } => {
            body.push_str(&classification_card(classification));
            body.push_str(&format!(
                "<h3>{}</h3>",
                escape_html(&format_type_heading(&classification.doc_type))
            ));
            body.push_str(&cards_html(&render_cards(extraction)));
        }
    }

    page(max_file_size_mb, &body)
}

fn classification_card(classification: &ClassificationResult) -> String {
    format!(
        r#"<div class="classification">
  <h3>Document classified as <strong>{}</strong></h3>
  <p>Confidence: {:.2}</p>
</div>
<p><strong>Reasoning:</strong> {}</p>"#,
        escape_html(&classification.doc_type),
        classification.confidence,
        escape_html(&classification.reasoning)
    )
}

fn cards_html(cards: &[FieldCard]) -> String {
    let cards: String = cards
        .iter()
        .map(|card| {
            format!(
                r#"<div class="card"><h4>{}</h4><p>{}</p></div>"#,
                escape_html(&card.title),
                escape_html(&card.value)
            )
        })
        .collect();
    format!(r#"<div class="cards">{cards}</div>"#)
}

fn page(max_file_size_mb: usize, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Universal Document Extractor</title>
<style>{STYLE}</style>
</head>
<body>
<div class="hero">
  <h1>Universal Document Classifier &amp; Extractor</h1>
  <p>Upload any document (PDF/DOCX) and get structured data instantly!</p>
</div>
<form class="upload" method="post" action="/" enctype="multipart/form-data">
  <label for="file">Drag &amp; drop your document here</label>
  <input id="file" type="file" name="file" accept=".pdf,.docx" required>
  <small>Max size: {max_file_size_mb}MB</small>
  <button type="submit">Upload</button>
</form>
{content}
</body>
</html>
"#
    )
}

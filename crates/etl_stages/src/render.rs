//! Report rendering.
//!
//! Metrics reports are rendered as pretty JSON, validation results as a
//! standalone HTML page.

use crate::{Result, StageError};
use chrono::{DateTime, Local};
use etl_core::ValidationResult;
use serde::Serialize;
use std::fmt::Write;

/// Turns a report value into a document.
pub trait Renderer<T: ?Sized> {
    /// Renders the value.
    fn render(&self, value: &T) -> Result<String>;
}

/// Renders any serializable value as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl<T: Serialize + ?Sized> Renderer<T> for JsonRenderer {
    fn render(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| StageError::render(e.to_string()))
    }
}

/// Renders validation results as an HTML page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
    generated_at: Option<DateTime<Local>>,
}

impl HtmlRenderer {
    /// Creates a renderer with the default title.
    pub fn new() -> Self {
        Self {
            title: "Data Quality Validation Report".to_string(),
            generated_at: None,
        }
    }

    /// Sets the page title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Fixes the generation timestamp printed in the footer.
    pub fn generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

const STYLE: &str = "
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; background-color: #f0f2f5; color: #333; line-height: 1.6; }
.container { max-width: 900px; margin: 40px auto; background: #fff; padding: 30px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
.status { font-size: 1.2em; padding: 10px; border-radius: 5px; margin-bottom: 20px; }
.success { background-color: #d4edda; color: #155724; border: 1px solid #c3e6cb; }
.failure { background-color: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
.validation-item { background-color: #e9ecef; border-left: 4px solid #3498db; padding: 15px; margin-bottom: 15px; border-radius: 0 5px 5px 0; }
.validation-item h3 { margin-top: 0; color: #3498db; }
ul { list-style-type: none; padding-left: 0; }
.footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e9ecef; font-size: 0.9em; color: #7f8c8d; }
";

impl Renderer<ValidationResult> for HtmlRenderer {
    fn render(&self, result: &ValidationResult) -> Result<String> {
        let generated_at = self.generated_at.unwrap_or_else(Local::now);
        let (status_class, status_text) = if result.success {
            ("success", "All expectations were met.")
        } else {
            ("failure", "Problems were found while validating the data.")
        };

        let mut html = String::new();
        let fmt_err = |e: std::fmt::Error| StageError::render(e.to_string());

        write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
             <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
             <div class=\"container\">\n<h1>{title}</h1>\n\
             <div class=\"status {status_class}\">{status_text}</div>\n\
             <p>Suite <strong>{suite}</strong>: {successful} of {evaluated} expectations met.</p>\n\
             <h2>Expectations</h2>\n",
            title = escape(&self.title),
            suite = escape(&result.suite),
            successful = result.statistics.successful,
            evaluated = result.statistics.evaluated,
        )
        .map_err(fmt_err)?;

        for item in &result.results {
            write!(
                html,
                "<div class=\"validation-item\">\n<h3>{kind}</h3>\n<ul>\n\
                 <li><strong>Column:</strong> {column}</li>\n\
                 <li><strong>Success:</strong> {success}</li>\n\
                 <li><strong>Observed:</strong> {observed}</li>\n</ul>\n</div>\n",
                kind = item.expectation.kind_name(),
                column = escape(&item.expectation.column),
                success = if item.success { "Yes" } else { "No" },
                observed = escape(&item.observed.to_string()),
            )
            .map_err(fmt_err)?;
        }

        write!(
            html,
            "<div class=\"footer\">\n<p>Report generated on {}</p>\n</div>\n</div>\n</body>\n</html>\n",
            generated_at.format("%d/%m/%Y at %H:%M:%S")
        )
        .map_err(fmt_err)?;

        Ok(html)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use etl_core::{Expectation, ExpectationResult, ObservedValue};
    use pretty_assertions::assert_eq;

    fn result(success: bool) -> ValidationResult {
        ValidationResult::from_results(
            "clean_data",
            vec![
                ExpectationResult {
                    expectation: Expectation::not_null("nome"),
                    success,
                    observed: ObservedValue::NullCount(if success { 0 } else { 1 }),
                },
                ExpectationResult {
                    expectation: Expectation::column_exists("<id>"),
                    success: true,
                    observed: ObservedValue::Exists(true),
                },
            ],
        )
    }

    #[test]
    fn test_html_report_contents() {
        let at = Local.with_ymd_and_hms(2024, 1, 31, 10, 15, 0).unwrap();
        let html = HtmlRenderer::new().generated_at(at).render(&result(false)).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("status failure"));
        assert!(html.contains("<h3>expect_column_values_to_not_be_null</h3>"));
        assert!(html.contains("<strong>Observed:</strong> 1 null"));
        assert!(html.contains("&lt;id&gt;"));
        assert!(html.contains("1 of 2 expectations met"));
        assert!(html.contains("Report generated on 31/01/2024 at 10:15:00"));
    }

    #[test]
    fn test_html_report_success_banner() {
        let html = HtmlRenderer::new().render(&result(true)).unwrap();
        assert!(html.contains("status success"));
        assert!(!html.contains("status failure"));
    }

    #[test]
    fn test_json_renderer() {
        let json = JsonRenderer.render(&result(true).statistics).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["evaluated"], 2);
        assert_eq!(value["successful"], 2);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}

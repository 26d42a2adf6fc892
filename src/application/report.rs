//! Static HTML report export.
//!
//! The document is self-contained (inline CSS, no scripts beyond the print
//! button, no external resources) so it can be opened from disk, printed, or
//! saved as PDF. Export is one-way; reports are never read back.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::{Confidence, HealthAnalysis};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const STYLES: &str = r#"
      body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 2rem; background-color: #fff; }
      h1, h2, h3, h4 { color: #111; margin-bottom: 0.5em; }
      h1 { font-size: 2.5em; text-align: center; border-bottom: 2px solid #eee; padding-bottom: 0.5em; margin-bottom: 1em; color: #0891b2; }
      h2 { font-size: 1.8em; border-bottom: 1px solid #eee; padding-bottom: 0.3em; margin-top: 2em; color: #0e7490; }
      h3 { font-size: 1.3em; color: #155e75; }
      ul { padding-left: 20px; }
      li { margin-bottom: 0.5em; }
      .generated { text-align: center; color: #64748b; font-size: 0.9em; }
      .disclaimer { background-color: #fffbe6; border: 1px solid #fde68a; padding: 1em; border-radius: 8px; margin-bottom: 2em; }
      .section { margin-bottom: 2em; }
      .condition { background-color: #f8fafc; border: 1px solid #e2e8f0; padding: 1em; border-radius: 8px; margin-bottom: 1em; }
      .condition-header { display: flex; justify-content: space-between; align-items: center; }
      .confidence-badge { padding: 0.2em 0.6em; border-radius: 9999px; font-size: 0.8em; font-weight: 500; white-space: nowrap; }
      .confidence-Low { background-color: #dbeafe; color: #1e40af; }
      .confidence-Medium { background-color: #fef9c3; color: #854d0e; }
      .confidence-High { background-color: #fee2e2; color: #991b1b; }
      .confidence-Other { background-color: #e2e8f0; color: #334155; }
      .next-steps { background-color: #ecfeff; border-left: 4px solid #0891b2; padding: 1em; margin-top: 2em; }
      .print-button { margin-top: 2rem; padding: 0.8em 1.5em; font-size: 1em; cursor: pointer; background-color: #0891b2; color: white; border: none; border-radius: 5px; }
      @media print {
        body { margin: 1in; padding: 0; }
        .no-print { display: none; }
      }
"#;

/// Escape text for safe inclusion in HTML element content and attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn confidence_class(confidence: &Confidence) -> &'static str {
    match confidence {
        Confidence::Low => "confidence-Low",
        Confidence::Medium => "confidence-Medium",
        Confidence::High => "confidence-High",
        Confidence::Other(_) => "confidence-Other",
    }
}

fn push_list(html: &mut String, items: &[String]) {
    html.push_str("<ul>");
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>\n");
}

/// Render the full report document.
#[must_use]
pub fn render_report_html(analysis: &HealthAnalysis, generated_at: DateTime<Local>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("  <title>HealthMate AI Report</title>\n");
    let _ = write!(html, "  <style>{STYLES}  </style>\n</head>\n<body>\n");

    html.push_str("  <h1>HealthMate AI Report</h1>\n");
    let _ = writeln!(
        html,
        "  <p class=\"generated\">Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M")
    );
    html.push_str(
        "  <div class=\"disclaimer\">\n    <strong>Disclaimer:</strong> This report is for \
         informational purposes only and is not a substitute for professional medical advice, \
         diagnosis, or treatment.\n  </div>\n",
    );

    // Potential conditions
    html.push_str("  <div class=\"section\">\n    <h2>Potential Conditions</h2>\n");
    for item in &analysis.potential_conditions {
        let _ = write!(
            html,
            "    <div class=\"condition\">\n      <div class=\"condition-header\">\n        \
             <h3>{}</h3>\n        <span class=\"confidence-badge {}\">{} Confidence</span>\n      \
             </div>\n      <p>{}</p>\n    </div>\n",
            escape_html(&item.condition),
            confidence_class(&item.confidence),
            escape_html(item.confidence.as_str()),
            escape_html(&item.explanation),
        );
    }
    html.push_str("  </div>\n");

    // Diet
    let diet = &analysis.dietary_suggestions;
    html.push_str("  <div class=\"section\">\n    <h2>Dietary Suggestions</h2>\n");
    html.push_str("    <h3>General Advice</h3>\n    ");
    push_list(&mut html, &diet.general_advice);
    html.push_str("    <h3>Meal Plan</h3>\n");
    for (slot, items) in diet.meal_plan.iter() {
        let _ = write!(html, "    <h4>{}</h4>\n    ", slot.title());
        push_list(&mut html, items);
    }
    html.push_str("  </div>\n");

    // Lifestyle
    html.push_str("  <div class=\"section\">\n    <h2>Lifestyle Recommendations</h2>\n    ");
    push_list(&mut html, &analysis.lifestyle_recommendations);
    html.push_str("  </div>\n");

    let _ = write!(
        html,
        "  <div class=\"next-steps\">\n    <h3>Next Steps</h3>\n    <p>Based on this analysis, \
         it is recommended to consult with a <strong>{}</strong> for a comprehensive evaluation \
         and formal diagnosis.</p>\n  </div>\n",
        escape_html(&analysis.specialist_recommendation)
    );

    html.push_str(
        "  <div class=\"no-print\" style=\"text-align: center;\">\n    <button \
         class=\"print-button\" onclick=\"window.print()\">Print or Save as PDF</button>\n  \
         </div>\n",
    );
    html.push_str("</body>\n</html>\n");

    html
}

/// File name for a report generated at `at`.
#[must_use]
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("healthmate-report-{}.html", at.format("%Y%m%d-%H%M%S"))
}

/// Write the report into `dir` and return its path.
///
/// # Errors
/// Returns `ReportError::Write` if the directory or file cannot be written.
pub fn export_report(analysis: &HealthAnalysis, dir: &Path) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let path = dir.join(report_file_name(now));

    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, render_report_html(analysis, now)).map_err(|source| {
        ReportError::Write {
            path: path.clone(),
            source,
        }
    })?;

    tracing::info!("Report exported to {}", path.display());
    Ok(path)
}

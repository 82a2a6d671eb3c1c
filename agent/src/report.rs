use anyhow::{Context, Result};
use delve_core::tokenizer::tokenize;
use delve_core::Report;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

const MAX_SLUG_LEN: usize = 50;

/// Render a report as Markdown: title, generation time, then one `##` block per section.
pub fn render_markdown(report: &Report, generated_at: &str) -> String {
    let mut out = format!("# Research Report: {}\n\n*Generated: {}*\n", report.query, generated_at);
    for section in &report.sections {
        out.push_str(&format!("\n## {}\n\n{}\n", section.heading, section.body.trim_end()));
    }
    out
}

/// File-name friendly form of a query, e.g. `"EV battery costs?"` -> `ev_battery_costs`.
pub fn slug(query: &str) -> String {
    let mut s = tokenize(query).join("_");
    if s.len() > MAX_SLUG_LEN {
        // tokens are ASCII, so any byte offset is a char boundary
        s.truncate(MAX_SLUG_LEN);
        s = s.trim_end_matches('_').to_string();
    }
    if s.is_empty() {
        s.push_str("report");
    }
    s
}

/// Write `report` as Markdown under `dir` and return the path of the new file.
pub fn save_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    let now = OffsetDateTime::now_utc();
    let generated_at = now.format(&Rfc3339).unwrap_or_default();
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .context("formatting report timestamp")?;

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("research_{}_{}.md", slug(&report.query), stamp));
    fs::write(&path, render_markdown(report, &generated_at)).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}

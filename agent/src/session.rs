use crate::agent::ResearchAgent;
use crate::report::{render_markdown, save_report};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const PROMPT: &str = "research> ";

/// Research `query`, write the Markdown report to `out` and, with `save_to`, also save it there.
pub async fn run_query<W: Write>(
    agent: &ResearchAgent,
    query: &str,
    save_to: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let report = agent.research(query).await;
    let generated_at = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    writeln!(out, "{}", render_markdown(&report, &generated_at))?;
    if let Some(dir) = save_to {
        let path = save_report(&report, dir)?;
        writeln!(out, "Report saved to: {}", path.display())?;
    }
    Ok(())
}

/// Prompt for queries on `input` until `quit`, `exit`, `q` or end of input.
///
/// A query that fails is reported and the session carries on with the next one.
pub async fn run_interactive<R: BufRead, W: Write>(
    agent: &ResearchAgent,
    save_to: Option<&Path>,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Type a research query, or 'quit' to exit.")?;
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if let Err(err) = run_query(agent, query, save_to, out).await {
            tracing::error!(query, error = %err, "research query failed");
            writeln!(out, "Error: {err:#}")?;
        }
    }
    Ok(())
}

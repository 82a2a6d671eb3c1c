//! Research orchestration: local search, web/news search, synthesis and Markdown reports.

pub mod agent;
pub mod report;
pub mod session;

pub use agent::ResearchAgent;
pub use report::{render_markdown, save_report};
pub use session::{run_interactive, run_query};

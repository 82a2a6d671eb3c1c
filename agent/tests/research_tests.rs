use delve_agent::{run_interactive, save_report, ResearchAgent};
use delve_core::{DirectoryCorpus, DocSearch, MemoryCorpus};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

#[tokio::test]
async fn offline_research_over_directory_and_save() {
    let corpus = tempdir().unwrap();
    fs::write(
        corpus.path().join("ev.md"),
        "# EVs\nElectric vehicles grew 20% in 2024.\nBattery costs fell sharply.\n",
    )
    .unwrap();
    fs::write(corpus.path().join("garden.txt"), "Tomatoes need sun.").unwrap();

    let agent = ResearchAgent::new(DocSearch::new(DirectoryCorpus::new(corpus.path())), None);
    let report = agent.research("electric battery").await;

    let local = &report.sections[0];
    assert_eq!(local.heading, "Local Knowledge Base Findings");
    assert!(local.body.contains("### ev.md"));
    assert!(!local.body.contains("garden.txt"));

    let out = tempdir().unwrap();
    let path = save_report(&report, &out.path().join("reports")).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("research_electric_battery_"));
    assert!(name.ends_with(".md"));
    let md = fs::read_to_string(&path).unwrap();
    assert!(md.starts_with("# Research Report: electric battery"));
    assert!(md.contains("## Synthesis & Key Takeaways"));
}

#[tokio::test]
async fn missing_corpus_still_produces_a_report() {
    let dir = tempdir().unwrap();
    let agent = ResearchAgent::new(DocSearch::new(DirectoryCorpus::new(dir.path().join("nope"))), None);
    let report = agent.research("anything").await;
    assert_eq!(report.sections[0].body, "No matching documents found in the local knowledge base.");
    assert!(report.sections.last().unwrap().body.starts_with("No information was found"));
}

#[tokio::test]
async fn interactive_session_survives_a_failed_save() {
    let out_dir = tempdir().unwrap();
    // a regular file where the reports directory should go makes every save fail
    let blocked = out_dir.path().join("reports");
    fs::write(&blocked, "not a directory").unwrap();

    let docs = DocSearch::new(MemoryCorpus::from_pairs([("ev.md", "Battery costs fell sharply.")]));
    let agent = ResearchAgent::new(docs, None);
    let input = Cursor::new("battery costs\n\nsolar\nquit\nnever reached\n");
    let mut out = Vec::new();
    run_interactive(&agent, Some(blocked.as_path()), input, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("# Research Report: battery costs"));
    assert!(printed.contains("# Research Report: solar"));
    assert!(!printed.contains("never reached"));
    assert_eq!(printed.matches("Error: ").count(), 2);
    assert!(!printed.contains("Report saved to"));
}

#[tokio::test]
async fn interactive_session_ends_at_end_of_input() {
    let agent = ResearchAgent::new(DocSearch::new(MemoryCorpus::default()), None);
    let mut out = Vec::new();
    run_interactive(&agent, None, Cursor::new("dark matter\n"), &mut out).await.unwrap();
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("No information was found"));
    assert!(printed.ends_with("research> \n"));
}

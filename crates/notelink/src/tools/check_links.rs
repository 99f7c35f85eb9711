use crate::corpus::Corpus;
use notelink_core::analyze_links;
use serde_json::Value;

/// Execute the `check_links` tool: summarize broken links, orphan notes and
/// duplicate titles across the corpus.
pub fn execute(corpus: &Corpus, _arguments: &Value) -> Result<String, String> {
    let report = analyze_links(&corpus.notes);

    let mut output = format!(
        "Notes: {}\nLinks: {} ({} resolved, {} broken)\n",
        corpus.notes.len(),
        report.total_links,
        report.resolved_links,
        report.broken_links()
    );

    if !report.broken.is_empty() {
        output.push_str("\nBroken links:\n");
        for entry in &report.broken {
            output.push_str(&format!("- {}: {}\n", entry.note_title, entry.targets.join(", ")));
        }
    }

    if !report.orphans.is_empty() {
        output.push_str("\nOrphan notes (no incoming links):\n");
        for (_id, title) in &report.orphans {
            output.push_str(&format!("- {}\n", title));
        }
    }

    if !report.collisions.is_empty() {
        output.push_str("\nDuplicate titles (links resolve to the last note):\n");
        for title in &report.collisions {
            output.push_str(&format!("- {}\n", title));
        }
    }

    Ok(output)
}

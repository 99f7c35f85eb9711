use super::required_str;
use crate::corpus::Corpus;
use notelink_core::{build_backlinks, extract_titles, forward_links, TitleIndex};
use serde_json::Value;

/// Execute the `get_links` tool: return backlinks and forward links for a note.
pub fn execute(corpus: &Corpus, arguments: &Value) -> Result<String, String> {
    let title = required_str(arguments, "title")?;

    let index = TitleIndex::build(&corpus.notes);
    let note = index
        .resolve(title)
        .ok_or_else(|| format!("Error: Note not found: {}", title))?;

    // --- Backlinks ---
    let backlinks = build_backlinks(&corpus.notes);
    let backlink_titles: Vec<&str> = backlinks
        .backlinks_for(&note.title)
        .iter()
        .map(|n| display_title(&n.title))
        .collect();

    // --- Forward links ---
    let forward_titles: Vec<&str> = forward_links(note, &index)
        .into_iter()
        .map(|n| display_title(&n.title))
        .collect();

    let mut broken: Vec<String> = Vec::new();
    for link_title in extract_titles(&note.content) {
        if !index.contains(&link_title) && !broken.contains(&link_title) {
            broken.push(link_title);
        }
    }

    // Format output
    let mut output = String::new();
    output.push_str("Backlinks (notes linking to this):\n");
    push_list(&mut output, &backlink_titles);

    output.push_str("\nForward links (notes this links to):\n");
    push_list(&mut output, &forward_titles);

    if !broken.is_empty() {
        output.push_str("\nBroken links (no such note):\n");
        for title in &broken {
            output.push_str(&format!("- {}\n", title));
        }
    }

    Ok(output)
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        "(untitled)"
    } else {
        title
    }
}

fn push_list(output: &mut String, items: &[&str]) {
    if items.is_empty() {
        output.push_str("- (none)\n");
    } else {
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
    }
}

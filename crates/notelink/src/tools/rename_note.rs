use super::required_str;
use crate::corpus::Corpus;
use chrono::Utc;
use notelink_core::{build_backlinks, is_linkable_title, normalize_title, plan_rename, TitleIndex};
use serde_json::Value;
use similar::TextDiff;

/// Execute the `rename_note` tool: retitle a note and rewrite every
/// `[[Old Title]]` link in the notes that reference it.
///
/// With `dry_run` the corpus is left untouched and a unified diff of each
/// affected note is returned instead.
pub fn execute(corpus: &mut Corpus, arguments: &Value) -> Result<String, String> {
    let old_title = required_str(arguments, "old_title")?;
    let new_title = required_str(arguments, "new_title")?.trim();
    let dry_run = arguments
        .get("dry_run")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if new_title.is_empty() {
        return Err("new_title must not be empty".to_string());
    }
    if !is_linkable_title(new_title) {
        return Err("new_title must not contain brackets".to_string());
    }

    // Resolve the note being renamed and validate the new title
    let (note_id, current_title) = {
        let index = TitleIndex::build(&corpus.notes);
        let note = index
            .resolve(old_title)
            .ok_or_else(|| format!("Note not found: {}", old_title))?;

        if let Some(existing) = index.resolve(new_title) {
            if existing.id != note.id {
                return Err(format!("A note titled '{}' already exists", existing.title));
            }
        }
        (note.id.clone(), note.title.trim().to_string())
    };

    if current_title == new_title {
        return Ok(format!("Note '{}' already has that title; nothing to do\n", current_title));
    }

    // Links are matched against the stored title, not the caller's spelling
    let rewrites = plan_rename(&corpus.notes, &current_title, new_title);
    let link_count: usize = rewrites.iter().map(|r| r.edit_count).sum();

    let mut output = String::new();
    if dry_run {
        output.push_str(&format!(
            "Dry run: would rename '{}' -> '{}' and update {} links in {} notes\n",
            current_title,
            new_title,
            link_count,
            rewrites.len()
        ));
        for rewrite in &rewrites {
            let diff = TextDiff::from_lines(&rewrite.old_content, &rewrite.new_content);
            let label = format!("{} ({})", rewrite.note_title, rewrite.note_id);
            output.push('\n');
            output.push_str(
                &diff
                    .unified_diff()
                    .context_radius(1)
                    .header(&label, &label)
                    .to_string(),
            );
        }
        return Ok(output);
    }

    let now = Utc::now();
    let applied = corpus.apply_rewrites(&rewrites, now);
    corpus.set_title(&note_id, new_title, now);

    tracing::info!(
        "Renamed {:?} -> {:?}: {} links in {} notes",
        current_title,
        new_title,
        link_count,
        applied
    );

    output.push_str(&format!(
        "Renamed '{}' -> '{}'\nUpdated {} links in {} notes",
        current_title, new_title, link_count, applied
    ));
    if rewrites.is_empty() {
        output.push('\n');
    } else {
        output.push_str(":\n");
        for rewrite in &rewrites {
            output.push_str(&format!("- {} ({} links)\n", rewrite.note_title, rewrite.edit_count));
        }
    }

    // Links that still point at the old title (e.g. written with padding)
    let remaining = build_backlinks(&corpus.notes)
        .backlinks_for(&current_title)
        .len();
    if remaining > 0 && normalize_title(&current_title) != normalize_title(new_title) {
        output.push_str(&format!(
            "Warning: {} notes still contain links to '{}' that were not rewritten\n",
            remaining, current_title
        ));
    }

    Ok(output)
}

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

// Compile regex once, reuse across calls
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink pattern is valid")
});

/// A `[[Title]]` occurrence in a text body.
///
/// `start` and `end` are byte offsets of the whole span including brackets,
/// so `&text[start..end] == raw_text` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReference {
    /// Full matched span, e.g. `"[[Project Plan]]"`
    pub raw_text: String,
    /// Bracketed text with surrounding whitespace trimmed
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl LinkReference {
    /// The text between the brackets exactly as written.
    pub fn inner(&self) -> &str {
        &self.raw_text[2..self.raw_text.len() - 2]
    }
}

/// Normalize a title into the key used for every lookup: trimmed, lowercased.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Extract every `[[...]]` occurrence, left to right, non-overlapping.
///
/// Text with no complete link (including `[[]]` and unterminated `[[`)
/// yields an empty vec.
pub fn extract_links(text: &str) -> Vec<LinkReference> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let full = cap.get(0)?;
            let inner = cap.get(1)?;
            Some(LinkReference {
                raw_text: full.as_str().to_string(),
                title: inner.as_str().trim().to_string(),
                start: full.start(),
                end: full.end(),
            })
        })
        .collect()
}

/// Extract link titles only (trimmed), in order of appearance.
/// Whitespace-only titles are dropped.
pub fn extract_titles(text: &str) -> Vec<String> {
    extract_links(text)
        .into_iter()
        .map(|link| link.title)
        .filter(|title| !title.is_empty())
        .collect()
}

/// Whether `title` can be written as `[[title]]` and extracted back intact.
///
/// The pattern stops at the first `]`, and `[[` inside the brackets would open
/// a new link while typing, so titles containing either are rejected, as are
/// empty ones.
pub fn is_linkable_title(title: &str) -> bool {
    let title = title.trim();
    !title.is_empty() && !title.contains(']') && !title.contains("[[")
}

/// A text edit: replace `remove_len` bytes at `offset` with `insert_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset in source
    pub offset: usize,
    /// Number of bytes to remove
    pub remove_len: usize,
    /// Replacement text
    pub insert_text: String,
}

/// Apply edits given in reverse offset order (as produced by
/// `compute_rename_edits`) and return the rewritten text.
///
/// Returns `None` if an edit falls outside `text`, splits a character, or
/// overlaps/follows the previous edit instead of preceding it.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Option<String> {
    let mut out = text.to_string();
    let mut limit = text.len();
    for edit in edits {
        let end = edit.offset.checked_add(edit.remove_len)?;
        if end > limit {
            return None;
        }
        // Checks bounds and char boundaries on both ends
        text.get(edit.offset..end)?;
        out.replace_range(edit.offset..end, &edit.insert_text);
        limit = edit.offset;
    }
    Some(out)
}

fn rename_is_noop(old_title: &str, new_title: &str) -> bool {
    old_title.is_empty() || new_title.is_empty() || old_title == new_title
}

/// Find every link whose entire bracket content equals `old_title`
/// (case-insensitive) and return edits replacing the whole span with
/// `[[new_title]]`. A link like `[[Oldish]]` never matches `Old`.
///
/// Returns edits in reverse offset order for safe sequential application.
pub fn compute_rename_edits(content: &str, old_title: &str, new_title: &str) -> Vec<TextEdit> {
    if rename_is_noop(old_title, new_title) {
        return Vec::new();
    }

    let pattern = format!(r"\[\[{}\]\]", regex::escape(old_title));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Cannot build rename pattern for {:?}: {}", old_title, e);
            return Vec::new();
        }
    };

    let replacement = format!("[[{}]]", new_title);
    let mut edits: Vec<TextEdit> = re
        .find_iter(content)
        .map(|m| TextEdit {
            offset: m.start(),
            remove_len: m.len(),
            insert_text: replacement.clone(),
        })
        .collect();

    edits.sort_by(|a, b| b.offset.cmp(&a.offset));
    edits
}

/// Rewrite every `[[old_title]]` in `content` to `[[new_title]]`.
///
/// Returns the content unchanged when either title is empty or both are equal.
pub fn rename_links(content: &str, old_title: &str, new_title: &str) -> String {
    let edits = compute_rename_edits(content, old_title, new_title);
    if edits.is_empty() {
        return content.to_string();
    }
    apply_edits(content, &edits).unwrap_or_else(|| content.to_string())
}

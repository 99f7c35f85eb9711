use crate::link_parser::is_linkable_title;

/// An unterminated `[[...` span ending at the cursor.
///
/// `query` is the raw text typed since the opening brackets, untrimmed, so a
/// trailing space reaches the autocomplete filter as typed. `start` is the
/// offset of the `[[`, `end` is the cursor. Both are byte offsets. Not being in
/// a link is `None` from [`detect_in_progress_link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InProgressLink {
    pub query: String,
    pub start: usize,
    pub end: usize,
}

/// Move `offset` into `text` and back onto a char boundary.
fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Decide whether the cursor sits inside an unterminated `[[...` link.
///
/// Returns `None` when there is no `[[` before the cursor, when the last one
/// is already closed by a `]]` before the cursor, or when the typed query
/// spans a line break. Cursor offsets past the end clamp to the end.
pub fn detect_in_progress_link(content: &str, cursor: usize) -> Option<InProgressLink> {
    let cursor = clamp_to_char_boundary(content, cursor);
    let before = &content[..cursor];

    let open = before.rfind("[[")?;
    if let Some(close) = before.rfind("]]") {
        if close > open {
            return None;
        }
    }

    let query = &content[open + 2..cursor];
    if query.contains("]]") || query.contains('\n') {
        return None;
    }

    Some(InProgressLink {
        query: query.to_string(),
        start: open,
        end: cursor,
    })
}

/// Replace an in-progress link with the completed `[[title]]`.
///
/// A `]]` directly after the cursor (an editor's auto-closed brackets) is
/// consumed so the result never ends up with doubled brackets. Returns the new
/// content and the cursor offset just past the inserted link, or `None` when
/// `link` does not describe a span of `content` or `title` would not extract
/// back as a link (see [`is_linkable_title`]).
pub fn complete_in_progress_link(
    content: &str,
    link: &InProgressLink,
    title: &str,
) -> Option<(String, usize)> {
    if !is_linkable_title(title) {
        return None;
    }
    let head = content.get(..link.start)?;
    let span = content.get(link.start..link.end)?;
    if !span.starts_with("[[") {
        return None;
    }

    let mut tail = content.get(link.end..)?;
    if let Some(rest) = tail.strip_prefix("]]") {
        tail = rest;
    }

    let inserted = format!("[[{}]]", title.trim());
    let cursor = head.len() + inserted.len();

    let mut out = String::with_capacity(head.len() + inserted.len() + tail.len());
    out.push_str(head);
    out.push_str(&inserted);
    out.push_str(tail);
    Some((out, cursor))
}

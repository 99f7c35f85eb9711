use super::required_str;
use crate::corpus::Corpus;
use notelink_core::{segment_with_index, ContentSegment, TitleIndex};
use serde_json::Value;

/// Execute the `render_note` tool: list the text and link segments of a note,
/// one per line, flagging links that resolve to no note.
pub fn execute(corpus: &Corpus, arguments: &Value) -> Result<String, String> {
    let title = required_str(arguments, "title")?;

    let index = TitleIndex::build(&corpus.notes);
    let note = index
        .resolve(title)
        .ok_or_else(|| format!("Error: Note not found: {}", title))?;

    let segments = segment_with_index(&note.content, &index);
    if segments.is_empty() {
        return Ok("(empty note)\n".to_string());
    }

    let mut output = String::new();
    for seg in &segments {
        let line = match seg {
            ContentSegment::Text { content, start, end } => {
                format!("text {}..{} {:?}\n", start, end, content)
            }
            ContentSegment::Link {
                raw_text,
                start,
                end,
                resolved: Some(target),
                ..
            } => format!("link {}..{} {} -> {}\n", start, end, raw_text, target.id),
            ContentSegment::Link {
                raw_text,
                start,
                end,
                resolved: None,
                ..
            } => format!("link {}..{} {} (broken)\n", start, end, raw_text),
        };
        output.push_str(&line);
    }
    Ok(output)
}

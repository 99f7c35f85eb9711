use super::required_str;
use crate::corpus::Corpus;
use notelink_core::{detect_in_progress_link, TitleIndex};
use serde_json::Value;

const MAX_CANDIDATES: usize = 10;

/// Execute the `detect_link` tool: report whether `cursor` (a byte offset,
/// default end of text) sits inside an unterminated `[[...` and, if so, the
/// note titles starting with the typed query.
pub fn execute(corpus: &Corpus, arguments: &Value) -> Result<String, String> {
    let content = required_str(arguments, "content")?;
    let cursor = match arguments.get("cursor") {
        None | Some(Value::Null) => content.len(),
        Some(v) => {
            let cursor = v
                .as_u64()
                .ok_or_else(|| "cursor must be a non-negative integer".to_string())?;
            // Past-the-end cursors clamp to the end of the content anyway
            usize::try_from(cursor).unwrap_or(usize::MAX)
        }
    };

    let Some(link) = detect_in_progress_link(content, cursor) else {
        return Ok("Not in a link\n".to_string());
    };

    let mut output = format!(
        "In link: query {:?} at {}..{}\n",
        link.query, link.start, link.end
    );

    // Plain prefix match; ranking belongs to the search collaborator
    let query = link.query.to_lowercase();
    let index = TitleIndex::build(&corpus.notes);
    let candidates: Vec<&str> = index
        .titles()
        .into_iter()
        .filter(|t| t.starts_with(&query))
        .take(MAX_CANDIDATES)
        .collect();

    if candidates.is_empty() {
        output.push_str("Candidates: (none)\n");
    } else {
        output.push_str("Candidates:\n");
        for title in candidates {
            // Display the stored spelling, not the normalized key
            let shown = index.resolve(title).map(|n| n.title.as_str()).unwrap_or(title);
            output.push_str(&format!("- {}\n", shown));
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notelink_core::Note;
    use serde_json::json;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Note::new("a", "Project Plan", ""),
            Note::new("b", "Projector", ""),
            Note::new("c", "Groceries", ""),
        ])
    }

    #[test]
    fn reports_query_and_candidates() {
        let out = execute(&corpus(), &json!({"content": "Link to [[pro"})).unwrap();
        assert_eq!(
            out,
            "In link: query \"pro\" at 8..13\nCandidates:\n- Project Plan\n- Projector\n"
        );
    }

    #[test]
    fn closed_link_is_not_in_progress() {
        let out = execute(&corpus(), &json!({"content": "[[Done]] more text"})).unwrap();
        assert_eq!(out, "Not in a link\n");
    }

    #[test]
    fn explicit_cursor_is_used() {
        let out = execute(&corpus(), &json!({"content": "[[Gro]] tail", "cursor": 4})).unwrap();
        assert!(out.starts_with("In link: query \"Gr\" at 0..4\n"), "got {out}");
        assert!(out.contains("- Groceries"));
    }

    #[test]
    fn trailing_space_is_kept_in_query() {
        let out = execute(&corpus(), &json!({"content": "[[project "})).unwrap();
        assert!(out.contains("query \"project \""));
        assert!(out.contains("- Project Plan"));
        assert!(!out.contains("- Projector"));
    }

    #[test]
    fn huge_cursor_clamps_to_end() {
        let out = execute(&corpus(), &json!({"content": "[[Gro", "cursor": u64::MAX})).unwrap();
        assert!(out.starts_with("In link: query \"Gro\" at 0..5\n"), "got {out}");
    }

    #[test]
    fn invalid_cursor_is_an_error() {
        let err = execute(&corpus(), &json!({"content": "[[x", "cursor": -1})).unwrap_err();
        assert_eq!(err, "cursor must be a non-negative integer");
    }
}

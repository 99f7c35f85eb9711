pub mod check_links;
pub mod detect_link;
pub mod get_links;
pub mod rename_note;
pub mod render_note;

use crate::corpus::Corpus;
use serde_json::{json, Value};

/// Read a required string argument.
pub(crate) fn required_str<'a>(arguments: &'a Value, name: &str) -> Result<&'a str, String> {
    arguments
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing required parameter: {}", name))
}

/// Tool descriptors: name, description and a JSON schema for the arguments.
pub fn list_tools() -> Value {
    json!([
        {
            "name": "get_links",
            "description": "List the notes linking to a note (backlinks) and the notes it links to.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {"type": "string", "description": "Note title (case-insensitive)"}
                },
                "required": ["title"]
            }
        },
        {
            "name": "rename_note",
            "description": "Rename a note and rewrite every [[Old Title]] link that references it.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "old_title": {"type": "string"},
                    "new_title": {"type": "string"},
                    "dry_run": {"type": "boolean", "description": "Show diffs without changing anything"}
                },
                "required": ["old_title", "new_title"]
            }
        },
        {
            "name": "render_note",
            "description": "Split a note into text and link segments, marking broken links.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {"type": "string"}
                },
                "required": ["title"]
            }
        },
        {
            "name": "detect_link",
            "description": "Detect an unterminated [[ link at the cursor and suggest matching titles.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "content": {"type": "string"},
                    "cursor": {"type": "integer", "minimum": 0, "description": "Byte offset; defaults to end of content"}
                },
                "required": ["content"]
            }
        },
        {
            "name": "check_links",
            "description": "Report broken links, orphan notes and duplicate titles.",
            "inputSchema": {"type": "object", "properties": {}}
        }
    ])
}

/// Dispatch a tool call by name.
pub fn call_tool(corpus: &mut Corpus, name: &str, arguments: &Value) -> Result<String, String> {
    tracing::debug!("Calling tool {} with {}", name, arguments);
    match name {
        "get_links" => get_links::execute(corpus, arguments),
        "rename_note" => rename_note::execute(corpus, arguments),
        "render_note" => render_note::execute(corpus, arguments),
        "detect_link" => detect_link::execute(corpus, arguments),
        "check_links" => check_links::execute(corpus, arguments),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notelink_core::Note;

    #[test]
    fn every_listed_tool_dispatches() {
        let mut corpus = Corpus::new(vec![Note::new("a", "A", "[[A]]")]);
        let tools = list_tools();
        let tools = tools.as_array().expect("tool list is an array");
        assert_eq!(tools.len(), 5);

        for tool in tools {
            let name = tool["name"].as_str().unwrap();
            let result = call_tool(&mut corpus, name, &json!({}));
            if let Err(e) = result {
                assert!(
                    e.starts_with("Missing required parameter"),
                    "tool {name} failed unexpectedly: {e}"
                );
            }
        }
    }

    #[test]
    fn unknown_tool_is_an_error() {
        let mut corpus = Corpus::default();
        assert_eq!(
            call_tool(&mut corpus, "delete_everything", &json!({})).unwrap_err(),
            "Unknown tool: delete_everything"
        );
    }

    #[test]
    fn schemas_name_their_required_arguments() {
        let tools = list_tools();
        let rename = tools
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == "rename_note")
            .unwrap();
        assert_eq!(rename["inputSchema"]["required"], json!(["old_title", "new_title"]));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as supplied by the persistence layer.
///
/// The linking code only reads `id`, `title` and `content`. Timestamps are
/// carried through untouched for collaborators that sort or display notes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// True when the title is empty or whitespace-only. Untitled notes can
    /// never be the target of a link.
    pub fn is_untitled(&self) -> bool {
        self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_and_content_default_to_empty() {
        let note: Note = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();
        assert_eq!(note.id, "n1");
        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
        assert!(note.is_untitled());
    }

    #[test]
    fn timestamps_round_trip_through_json() {
        let json = r#"{"id":"n1","title":"A","content":"","created_at":"2024-05-01T10:00:00Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert!(note.created_at.is_some());
        assert!(note.updated_at.is_none());

        let out = serde_json::to_string(&note).unwrap();
        assert!(out.contains("created_at"));
        assert!(!out.contains("updated_at"), "absent timestamps are not serialized: {out}");
    }

    #[test]
    fn whitespace_title_is_untitled() {
        assert!(Note::new("n1", "   ", "").is_untitled());
        assert!(!Note::new("n1", "Plan", "").is_untitled());
    }
}

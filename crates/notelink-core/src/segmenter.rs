use crate::link_parser::extract_links;
use crate::note::Note;
use crate::title_index::TitleIndex;

/// One piece of a parsed note body.
///
/// Segments from a single parse cover the whole body in ascending order with
/// no gaps or overlaps. Offsets are byte offsets, half-open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSegment {
    Text {
        content: String,
        start: usize,
        end: usize,
    },
    Link {
        /// Trimmed title between the brackets
        raw_title: String,
        /// Full `[[...]]` span as written
        raw_text: String,
        start: usize,
        end: usize,
        /// `None` for a broken (not yet created) note
        resolved: Option<Note>,
    },
}

impl ContentSegment {
    /// The exact source text this segment covers.
    pub fn raw_text(&self) -> &str {
        match self {
            ContentSegment::Text { content, .. } => content,
            ContentSegment::Link { raw_text, .. } => raw_text,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            ContentSegment::Text { start, .. } | ContentSegment::Link { start, .. } => *start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            ContentSegment::Text { end, .. } | ContentSegment::Link { end, .. } => *end,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, ContentSegment::Link { .. })
    }

    pub fn is_broken_link(&self) -> bool {
        matches!(self, ContentSegment::Link { resolved: None, .. })
    }
}

fn text_segment(content: &str, start: usize, end: usize) -> ContentSegment {
    ContentSegment::Text {
        content: content[start..end].to_string(),
        start,
        end,
    }
}

/// Split `content` into text and link segments, resolving links against `notes`.
///
/// Empty content yields no segments. Content without links yields a single
/// text segment.
pub fn segment(content: &str, notes: &[Note]) -> Vec<ContentSegment> {
    let index = TitleIndex::build(notes);
    segment_with_index(content, &index)
}

/// Like `segment`, but reuses a title index built by the caller.
pub fn segment_with_index(content: &str, index: &TitleIndex<'_>) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for link in extract_links(content) {
        if link.start > cursor {
            segments.push(text_segment(content, cursor, link.start));
        }
        let resolved = index.resolve(&link.title).cloned();
        segments.push(ContentSegment::Link {
            raw_title: link.title,
            raw_text: link.raw_text,
            start: link.start,
            end: link.end,
            resolved,
        });
        cursor = link.end;
    }

    if cursor < content.len() {
        segments.push(text_segment(content, cursor, content.len()));
    }

    segments
}

/// Reassemble the source text from segments.
pub fn render_plain(segments: &[ContentSegment]) -> String {
    segments.iter().map(ContentSegment::raw_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Note> {
        vec![
            Note::new("id-a", "Page A", "alpha"),
            Note::new("id-b", "Page B", "beta"),
        ]
    }

    fn assert_covers(content: &str, segments: &[ContentSegment]) {
        let mut expected_start = 0;
        for seg in segments {
            assert_eq!(seg.start(), expected_start, "gap or overlap at {:?}", seg);
            assert!(seg.end() > seg.start(), "empty segment {:?}", seg);
            assert_eq!(&content[seg.start()..seg.end()], seg.raw_text());
            expected_start = seg.end();
        }
        assert_eq!(expected_start, content.len());
    }

    // === segment tests ===

    #[test]
    fn splits_text_and_links_in_order() {
        let notes = corpus();
        let content = "See [[Page A]] and [[page b]].";
        let segments = segment(content, &notes);

        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].raw_text(), "See ");
        match &segments[1] {
            ContentSegment::Link { raw_title, resolved, .. } => {
                assert_eq!(raw_title, "Page A");
                assert_eq!(resolved.as_ref().map(|n| n.id.as_str()), Some("id-a"));
            }
            other => panic!("expected link, got {:?}", other),
        }
        assert_eq!(segments[2].raw_text(), " and ");
        match &segments[3] {
            ContentSegment::Link { resolved, .. } => {
                assert_eq!(resolved.as_ref().map(|n| n.id.as_str()), Some("id-b"));
            }
            other => panic!("expected link, got {:?}", other),
        }
        assert_eq!(segments[4].raw_text(), ".");
        assert_covers(content, &segments);
    }

    #[test]
    fn unresolved_link_has_no_note() {
        let segments = segment("[[Nonexistent]]", &[]);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_broken_link());
        match &segments[0] {
            ContentSegment::Link { raw_title, start, end, .. } => {
                assert_eq!(raw_title, "Nonexistent");
                assert_eq!((*start, *end), (0, 15));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn empty_content_yields_no_segments() {
        assert!(segment("", &corpus()).is_empty());
    }

    #[test]
    fn content_without_links_is_one_text_segment() {
        let segments = segment("just words [[ unterminated", &corpus());
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].is_link());
        assert_eq!(segments[0].raw_text(), "just words [[ unterminated");
    }

    #[test]
    fn adjacent_links_have_no_empty_text_between() {
        let segments = segment("[[Page A]][[Page B]]", &corpus());
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(ContentSegment::is_link));
    }

    #[test]
    fn round_trip_reconstructs_content() {
        let notes = corpus();
        let samples = [
            "",
            "plain",
            "[[Page A]]",
            "lead [[Page A]] mid [[Missing]] tail",
            "[[]] and [[ ]] and [[Page B]]]",
            "[[[Page A]] ]] [[",
            "multi\nline [[Page A]]\n[[x\ny]]",
            "ünïcödé [[Café]] ✓✓ [[Page B]]",
        ];
        for content in samples {
            let segments = segment(content, &notes);
            assert_eq!(render_plain(&segments), content, "round trip failed for {:?}", content);
            assert_covers(content, &segments);
        }
    }

    #[test]
    fn reuses_caller_index() {
        let notes = corpus();
        let index = TitleIndex::build(&notes);
        let a = segment_with_index("[[Page A]] x", &index);
        let b = segment("[[Page A]] x", &notes);
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_title_link_resolves_to_last_note() {
        let notes = vec![Note::new("old", "Same", ""), Note::new("new", "same", "")];
        let segments = segment("[[SAME]]", &notes);
        match &segments[0] {
            ContentSegment::Link { resolved, .. } => {
                assert_eq!(resolved.as_ref().map(|n| n.id.as_str()), Some("new"));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }
}

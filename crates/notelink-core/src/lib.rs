//! Wiki-style `[[Note Title]]` linking for an in-memory note corpus.
//!
//! Every function here is pure: it takes the current corpus (or one text
//! buffer) by reference and returns freshly computed values. Callers rebuild
//! derived structures after each edit.

pub mod in_progress;
pub mod link_indexer;
pub mod link_parser;
pub mod note;
pub mod segmenter;
pub mod title_index;

pub use in_progress::{complete_in_progress_link, detect_in_progress_link, InProgressLink};
pub use link_indexer::{
    analyze_links, build_backlinks, forward_links, plan_rename, BacklinkIndex, BrokenLinks,
    LinkReport, NoteRewrite,
};
pub use link_parser::{
    apply_edits, compute_rename_edits, extract_links, extract_titles, is_linkable_title,
    normalize_title, rename_links, LinkReference, TextEdit,
};
pub use note::Note;
pub use segmenter::{render_plain, segment, segment_with_index, ContentSegment};
pub use title_index::{build_title_index, resolve, TitleIndex};

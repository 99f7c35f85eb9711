use crate::link_parser::{
    apply_edits, compute_rename_edits, extract_links, extract_titles, normalize_title,
};
use crate::note::Note;
use crate::title_index::TitleIndex;
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Backlink index
// ---------------------------------------------------------------------------

/// Inverted link index: normalized target title -> notes linking to it.
///
/// Buckets list source notes in corpus order, each at most once. Targets do
/// not have to exist in the corpus; links to missing notes are indexed too.
#[derive(Debug, Default)]
pub struct BacklinkIndex<'a> {
    by_target: HashMap<String, Vec<&'a Note>>,
}

impl<'a> BacklinkIndex<'a> {
    /// Notes linking to `title`. The argument is normalized before lookup.
    pub fn backlinks_for(&self, title: &str) -> &[&'a Note] {
        self.by_target
            .get(&normalize_title(title))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All normalized target titles, sorted.
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self.by_target.keys().map(|k| k.as_str()).collect();
        targets.sort_unstable();
        targets
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

/// Build the backlink index for a corpus.
///
/// Self-links are kept: a note linking to its own title appears in its own
/// bucket.
pub fn build_backlinks(notes: &[Note]) -> BacklinkIndex<'_> {
    let mut by_target: HashMap<String, Vec<&Note>> = HashMap::new();

    for note in notes {
        for link in extract_links(&note.content) {
            let key = normalize_title(&link.title);
            if key.is_empty() {
                continue;
            }
            let bucket = by_target.entry(key).or_default();
            if !bucket.iter().any(|existing| existing.id == note.id) {
                bucket.push(note);
            }
        }
    }

    tracing::debug!(
        "Built backlink index: {} notes -> {} targets",
        notes.len(),
        by_target.len()
    );
    BacklinkIndex { by_target }
}

/// Notes that `note` links to and that exist in the index, first occurrence
/// first, each at most once.
pub fn forward_links<'a>(note: &Note, index: &TitleIndex<'a>) -> Vec<&'a Note> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut targets = Vec::new();
    for title in extract_titles(&note.content) {
        if let Some(target) = index.resolve(&title) {
            if seen.insert(target.id.as_str()) {
                targets.push(target);
            }
        }
    }
    targets
}

// ---------------------------------------------------------------------------
// Link report: broken links, orphans, title collisions
// ---------------------------------------------------------------------------

/// Broken links found in one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLinks {
    pub note_id: String,
    pub note_title: String,
    /// Unresolvable titles as written (trimmed), in order, without duplicates
    pub targets: Vec<String>,
}

/// Corpus-wide link health summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub total_links: usize,
    pub resolved_links: usize,
    pub broken: Vec<BrokenLinks>,
    /// `(id, title)` of titled notes no other note links to
    pub orphans: Vec<(String, String)>,
    /// Normalized titles shared by more than one note
    pub collisions: Vec<String>,
}

impl LinkReport {
    pub fn broken_links(&self) -> usize {
        self.total_links - self.resolved_links
    }
}

/// Count resolved and broken links and find orphan notes.
pub fn analyze_links(notes: &[Note]) -> LinkReport {
    let index = TitleIndex::build(notes);
    let mut report = LinkReport {
        collisions: index.collisions().to_vec(),
        ..LinkReport::default()
    };
    // ids of notes that have at least one incoming link from another note
    let mut linked: HashSet<&str> = HashSet::new();

    for note in notes {
        let titles = extract_titles(&note.content);
        report.total_links += titles.len();

        let mut broken: Vec<String> = Vec::new();
        for title in titles {
            match index.resolve(&title) {
                Some(target) => {
                    report.resolved_links += 1;
                    if target.id != note.id {
                        linked.insert(target.id.as_str());
                    }
                }
                None => {
                    if !broken.contains(&title) {
                        broken.push(title);
                    }
                }
            }
        }

        if !broken.is_empty() {
            report.broken.push(BrokenLinks {
                note_id: note.id.clone(),
                note_title: note.title.clone(),
                targets: broken,
            });
        }
    }

    report.orphans = notes
        .iter()
        .filter(|n| !n.is_untitled() && !linked.contains(n.id.as_str()))
        .map(|n| (n.id.clone(), n.title.clone()))
        .collect();

    report
}

// ---------------------------------------------------------------------------
// Rename propagation across the corpus
// ---------------------------------------------------------------------------

/// A content rewrite for one note, produced by `plan_rename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRewrite {
    pub note_id: String,
    pub note_title: String,
    pub old_content: String,
    pub new_content: String,
    pub edit_count: usize,
}

/// Compute the content rewrites needed after renaming `old_title` to
/// `new_title`.
///
/// Only notes that the backlink index lists for `old_title` are examined, and
/// only those whose content actually changes are returned. A link written
/// with padding (`[[ Old ]]`) is a backlink but is not rewritten, since the
/// rename matches the whole bracket content.
///
/// Nothing is persisted; the caller stores `new_content` for each rewrite.
pub fn plan_rename(notes: &[Note], old_title: &str, new_title: &str) -> Vec<NoteRewrite> {
    if old_title.is_empty() || new_title.is_empty() || old_title == new_title {
        return Vec::new();
    }

    let backlinks = build_backlinks(notes);
    let sources = backlinks.backlinks_for(old_title);

    let rewrites: Vec<NoteRewrite> = sources
        .iter()
        .filter_map(|note| {
            let edits = compute_rename_edits(&note.content, old_title, new_title);
            if edits.is_empty() {
                return None;
            }
            Some(NoteRewrite {
                note_id: note.id.clone(),
                note_title: note.title.clone(),
                old_content: note.content.clone(),
                new_content: apply_edits(&note.content, &edits)?,
                edit_count: edits.len(),
            })
        })
        .collect();

    tracing::debug!(
        "Rename {:?} -> {:?}: {} backlinking notes, {} rewrites",
        old_title,
        new_title,
        sources.len(),
        rewrites.len()
    );
    rewrites
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

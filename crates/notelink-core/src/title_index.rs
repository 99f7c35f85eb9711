use crate::link_parser::normalize_title;
use crate::note::Note;
use std::collections::HashMap;

/// Case-insensitive lookup from note title to note.
///
/// Keys are `trim().to_lowercase()` of the title. When several notes share a
/// normalized title the last one in input order wins; the shadowed titles are
/// reported by `collisions()` so a caller can warn about them.
///
/// The index borrows the corpus and is meant to be rebuilt whenever the
/// corpus changes. Nothing is cached between builds.
#[derive(Debug, Default)]
pub struct TitleIndex<'a> {
    by_title: HashMap<String, &'a Note>,
    /// Normalized titles seen more than once, in first-collision order
    collisions: Vec<String>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(notes: &'a [Note]) -> Self {
        let mut index = Self {
            by_title: HashMap::with_capacity(notes.len()),
            collisions: Vec::new(),
        };
        for note in notes {
            index.insert(note);
        }
        tracing::debug!(
            "Built title index: {} notes -> {} titles, {} collisions",
            notes.len(),
            index.by_title.len(),
            index.collisions.len()
        );
        index
    }

    fn insert(&mut self, note: &'a Note) {
        let key = normalize_title(&note.title);
        if key.is_empty() {
            return;
        }
        if self.by_title.insert(key.clone(), note).is_some() && !self.collisions.contains(&key) {
            self.collisions.push(key);
        }
    }

    /// Look up a note by title. Absence is the normal result for a broken link.
    pub fn resolve(&self, title: &str) -> Option<&'a Note> {
        let key = normalize_title(title);
        if key.is_empty() {
            return None;
        }
        self.by_title.get(&key).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.resolve(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Normalized titles claimed by more than one note.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    /// All indexed (normalized) titles, sorted.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.by_title.keys().map(|k| k.as_str()).collect();
        titles.sort_unstable();
        titles
    }
}

/// Free-function form of `TitleIndex::build`.
pub fn build_title_index(notes: &[Note]) -> TitleIndex<'_> {
    TitleIndex::build(notes)
}

/// Free-function form of `TitleIndex::resolve`.
pub fn resolve<'a>(title: &str, index: &TitleIndex<'a>) -> Option<&'a Note> {
    index.resolve(title)
}

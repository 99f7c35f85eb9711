use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use notelink_core::{Note, NoteRewrite, TitleIndex};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The working set of notes, loaded whole from a JSON file.
///
/// Tools mutate `notes` in memory and mark the corpus dirty; `save` writes it
/// back only when something changed.
#[derive(Debug, Default)]
pub struct Corpus {
    path: Option<PathBuf>,
    pub notes: Vec<Note>,
    dirty: bool,
}

impl Corpus {
    /// An in-memory corpus with no backing file.
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            path: None,
            notes,
            dirty: false,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read corpus {}", path.display()))?;
        let notes: Vec<Note> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse corpus {}", path.display()))?;

        tracing::info!("Loaded {} notes from {}", notes.len(), path.display());
        let index = TitleIndex::build(&notes);
        for title in index.collisions() {
            tracing::warn!("Several notes share the title {:?}; links resolve to the last one", title);
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            notes,
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the corpus back if it changed. Returns whether a write happened.
    pub fn save(&mut self, backup: bool) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let Some(path) = self.path.clone() else {
            anyhow::bail!("corpus has no backing file");
        };

        if backup && path.exists() {
            let backup_path = backup_path(&path);
            std::fs::copy(&path, &backup_path)
                .with_context(|| format!("failed to write backup {}", backup_path.display()))?;
            tracing::info!("Backed up corpus to {}", backup_path.display());
        }

        let json = serde_json::to_string_pretty(&self.notes).context("failed to serialize corpus")?;
        // Write next to the corpus and rename over it, so a crash never leaves a truncated file
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .with_context(|| format!("failed to write corpus {}", path.display()))?;
        tmp.persist(&path)
            .with_context(|| format!("failed to replace corpus {}", path.display()))?;

        tracing::info!("Saved {} notes to {}", self.notes.len(), path.display());
        self.dirty = false;
        Ok(true)
    }

    /// Find a note by title (case-insensitive, last duplicate wins).
    pub fn find_by_title(&self, title: &str) -> Option<&Note> {
        TitleIndex::build(&self.notes).resolve(title)
    }

    /// Store the new content of each rewrite. Returns how many notes changed.
    pub fn apply_rewrites(&mut self, rewrites: &[NoteRewrite], now: DateTime<Utc>) -> usize {
        let mut applied = 0;
        for rewrite in rewrites {
            if let Some(note) = self.notes.iter_mut().find(|n| n.id == rewrite.note_id) {
                note.content = rewrite.new_content.clone();
                note.updated_at = Some(now);
                applied += 1;
            }
        }
        if applied > 0 {
            self.dirty = true;
        }
        applied
    }

    /// Change a note's title. Returns false when no note has `id`.
    pub fn set_title(&mut self, id: &str, title: &str, now: DateTime<Utc>) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        note.title = title.to_string();
        note.updated_at = Some(now);
        self.dirty = true;
        true
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

//! In-memory File Collection
//!
//! The dashboard's copy of the user's files. It mirrors the server at fetch
//! time and after each successful mutation; failed mutations never touch it.

use crate::model::FileRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileCollection {
    files: Vec<FileRecord>,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh fetch
    pub fn replace_all(&mut self, files: Vec<FileRecord>) {
        self.files = files;
    }

    /// Add an uploaded record. A record whose id is already present replaces
    /// the old entry in place so each id appears exactly once.
    pub fn append(&mut self, record: FileRecord) {
        match self.position(&record.id) {
            Some(idx) => self.files[idx] = record,
            None => self.files.push(record),
        }
    }

    /// Remove a record, returning it if it was present
    pub fn remove(&mut self, id: &str) -> Option<FileRecord> {
        let idx = self.position(id)?;
        Some(self.files.remove(idx))
    }

    /// Replace a record's tag list. Returns false if the id is unknown.
    pub fn set_tags(&mut self, id: &str, tags: Vec<String>) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.tags = tags;
                true
            }
            None => false,
        }
    }

    pub fn set_views(&mut self, id: &str, views: u64) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.views = views;
                true
            }
            None => false,
        }
    }

    /// Merge the record returned by the share endpoint
    pub fn apply_share(&mut self, shared: &FileRecord) -> bool {
        match self.get_mut(&shared.id) {
            Some(file) => {
                file.views = shared.views;
                if shared.shareable_link.is_some() {
                    file.shareable_link = shared.shareable_link.clone();
                }
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut FileRecord> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter()
    }

    pub fn to_vec(&self) -> Vec<FileRecord> {
        self.files.clone()
    }
}

impl From<Vec<FileRecord>> for FileCollection {
    fn from(files: Vec<FileRecord>) -> Self {
        Self { files }
    }
}

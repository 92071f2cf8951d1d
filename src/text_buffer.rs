//! In-memory document buffer with whole-file persistence
//!
//! A buffer holds the entire document as one contiguous string. Loads and
//! saves transfer the whole file in a single call; the modified flag tracks
//! whether the text has changed since the last successful load or save.

use crate::error::DocumentError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single document: its full text, the optional backing file and the
/// modified flag
pub struct TextBuffer {
    /// Optional file path for persistence
    file_path: Option<PathBuf>,

    /// The whole document as one contiguous string
    text: String,

    /// Has the buffer been modified since the last load/save?
    modified: bool,
}

impl TextBuffer {
    /// Create a new empty buffer with no backing file
    pub fn new() -> Self {
        TextBuffer {
            file_path: None,
            text: String::new(),
            modified: false,
        }
    }

    /// Create a buffer from initial content, with no backing file
    pub fn from_str(s: &str) -> Self {
        TextBuffer {
            file_path: None,
            text: s.to_string(),
            modified: false,
        }
    }

    /// Load a buffer from a file, reading the whole file eagerly
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(DocumentError::InvalidPath);
        }
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
        tracing::debug!("Loaded {} bytes from {:?}", text.len(), path);

        Ok(TextBuffer {
            file_path: Some(path.to_path_buf()),
            text,
            modified: false,
        })
    }

    /// Save the buffer to its associated file
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = match &self.file_path {
            Some(path) => path.clone(),
            None => return Err(DocumentError::NoPath),
        };

        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Save the buffer to a specific file and adopt that path
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(DocumentError::InvalidPath);
        }

        self.write_to(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let mut file = std::fs::File::create(path).map_err(|e| DocumentError::io(path, e))?;
        file.write_all(self.text.as_bytes())
            .map_err(|e| DocumentError::io(path, e))?;
        tracing::debug!("Wrote {} bytes to {:?}", self.text.len(), path);
        Ok(())
    }

    /// Replace the buffer's text.
    ///
    /// Returns the previous text when the new content differs. Setting the
    /// same content again is a no-op: the modified flag is left untouched
    /// and `None` is returned.
    pub fn set_text(&mut self, new_text: &str) -> Option<String> {
        if self.text == new_text {
            return None;
        }
        let old = std::mem::replace(&mut self.text, new_text.to_string());
        self.modified = true;
        Some(old)
    }

    /// Mark the buffer as modified
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Clear the modified flag (after save)
    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// The document content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The associated file path, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Check if the buffer has been modified since the last load/save
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Length of the document in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty_and_clean() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert!(!buffer.is_modified());
        assert!(buffer.file_path().is_none());
    }

    #[test]
    fn test_set_text_marks_modified_and_returns_old() {
        let mut buffer = TextBuffer::from_str("hello");
        let old = buffer.set_text("world");
        assert_eq!(old.as_deref(), Some("hello"));
        assert_eq!(buffer.text(), "world");
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_set_text_identical_is_noop() {
        let mut buffer = TextBuffer::from_str("same");
        assert!(buffer.set_text("same").is_none());
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_save_without_path_fails_and_keeps_flag() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("unsaved");
        assert!(buffer.is_modified());

        match buffer.save() {
            Err(DocumentError::NoPath) => {}
            other => panic!("expected NoPath, got {:?}", other.map(|_| ())),
        }
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_save_as_empty_path_fails() {
        let mut buffer = TextBuffer::from_str("text");
        match buffer.save_as("") {
            Err(DocumentError::InvalidPath) => {}
            other => panic!("expected InvalidPath, got {:?}", other.map(|_| ())),
        }
        assert!(buffer.file_path().is_none());
    }

    #[test]
    fn test_load_missing_file_fails_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.txt");
        match TextBuffer::load_from_file(&path) {
            Err(DocumentError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_empty_path_fails_with_invalid_path() {
        match TextBuffer::load_from_file("") {
            Err(DocumentError::InvalidPath) => {}
            other => panic!("expected InvalidPath, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");

        let mut buffer = TextBuffer::new();
        buffer.set_text("line one\nline two\n");
        buffer.save_as(&path).unwrap();
        assert!(!buffer.is_modified());
        assert_eq!(buffer.file_path(), Some(path.as_path()));

        let loaded = TextBuffer::load_from_file(&path).unwrap();
        assert_eq!(loaded.text(), "line one\nline two\n");
        assert!(!loaded.is_modified());
    }

    #[test]
    fn test_save_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");

        let mut buffer = TextBuffer::new();
        buffer.save_as(&path).unwrap();
        buffer.set_text("changed");
        assert!(buffer.is_modified());

        buffer.save().unwrap();
        assert!(!buffer.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "changed");
    }
}

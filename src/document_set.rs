//! Open-document collection and the operations a presentation layer drives
//!
//! The set owns every open buffer, tracks which one is active, delegates
//! edit/search/replace/save to it and runs the auto-save sweep. Each state
//! change is announced through the hook registry after it has been applied
//! and before the triggering call returns.

use crate::error::DocumentError;
use crate::hooks::{HookArgs, HookRegistry};
use crate::replace::replace_all;
use crate::search::{find_backward, find_forward};
use crate::text_buffer::TextBuffer;
use std::path::Path;

/// Identifies one open buffer for the lifetime of the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// The set of open buffers and the active one
///
/// Buffers are kept in the order they were opened. Opening the same path
/// twice creates two independent buffers; the set never deduplicates by
/// path. There is always an active buffer: closing the last one replaces
/// it with a fresh empty buffer.
pub struct DocumentSet {
    /// Open buffers in the order they were opened
    buffers: Vec<(BufferId, TextBuffer)>,

    /// The buffer edit/search/replace/save operations target
    active: BufferId,

    /// Next buffer id to assign
    next_buffer_id: usize,

    /// Subscribers notified after each state change
    hooks: HookRegistry,
}

impl DocumentSet {
    /// Create a set holding one empty active buffer
    pub fn new() -> Self {
        let id = BufferId(0);
        DocumentSet {
            buffers: vec![(id, TextBuffer::new())],
            active: id,
            next_buffer_id: 1,
            hooks: HookRegistry::new(),
        }
    }

    fn alloc_id(&mut self) -> BufferId {
        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id += 1;
        id
    }

    fn position(&self, id: BufferId) -> Option<usize> {
        self.buffers.iter().position(|(bid, _)| *bid == id)
    }

    /// The hook registry, for subscribing to document events
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Id of the active buffer
    pub fn active_id(&self) -> BufferId {
        self.active
    }

    /// The active buffer
    pub fn active(&self) -> &TextBuffer {
        let idx = self.position(self.active).expect("active buffer is in the set");
        &self.buffers[idx].1
    }

    fn active_mut(&mut self) -> &mut TextBuffer {
        let idx = self.position(self.active).expect("active buffer is in the set");
        &mut self.buffers[idx].1
    }

    /// Look up a buffer by id
    pub fn buffer(&self, id: BufferId) -> Option<&TextBuffer> {
        self.position(id).map(|idx| &self.buffers[idx].1)
    }

    /// Number of open buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Iterate over open buffers in opening order
    pub fn iter(&self) -> impl Iterator<Item = (BufferId, &TextBuffer)> {
        self.buffers.iter().map(|(id, buffer)| (*id, buffer))
    }

    /// Create an empty buffer, append it and make it active
    pub fn new_document(&mut self) -> BufferId {
        let id = self.alloc_id();
        self.buffers.push((id, TextBuffer::new()));
        self.active = id;
        self.hooks
            .run_hooks("document-opened", &HookArgs::DocumentOpened { id, path: None });
        id
    }

    /// Load a file into a new buffer, append it and make it active
    ///
    /// Buffers loaded from the same path stay independent: every load
    /// constructs a new buffer, so the set never deduplicates by path.
    pub fn open_document<P: AsRef<Path>>(&mut self, path: P) -> Result<BufferId, DocumentError> {
        let buffer = TextBuffer::load_from_file(path)?;
        let path = buffer.file_path().map(Path::to_path_buf);

        let id = self.alloc_id();
        self.buffers.push((id, buffer));
        self.active = id;
        self.hooks
            .run_hooks("document-opened", &HookArgs::DocumentOpened { id, path });
        Ok(id)
    }

    /// Close the active buffer
    ///
    /// The new active buffer is the most recently opened of the remaining
    /// ones, or a fresh empty buffer when none remain. Returns the id of
    /// the new active buffer.
    pub fn close_active(&mut self) -> BufferId {
        if let Some(idx) = self.position(self.active) {
            self.buffers.remove(idx);
        }
        match self.buffers.last() {
            Some((id, _)) => self.active = *id,
            None => {
                let id = self.alloc_id();
                self.buffers.push((id, TextBuffer::new()));
                self.active = id;
            }
        }
        self.active
    }

    /// Replace the active buffer's text, marking it dirty on a real change
    ///
    /// Returns true when the content changed.
    pub fn update_active_text(&mut self, new_text: &str) -> bool {
        let id = self.active;
        let old_text = match self.active_mut().set_text(new_text) {
            Some(old) => old,
            None => return false,
        };
        self.hooks.run_hooks(
            "document-changed",
            &HookArgs::DocumentChanged {
                id,
                old_text,
                new_text: new_text.to_string(),
            },
        );
        true
    }

    /// Save the active buffer to its associated file
    pub fn save_active(&mut self) -> Result<(), DocumentError> {
        let id = self.active;
        self.active_mut().save()?;
        let path = self
            .active()
            .file_path()
            .expect("buffer saved without a path")
            .to_path_buf();
        self.hooks
            .run_hooks("document-saved", &HookArgs::DocumentSaved { id, path });
        Ok(())
    }

    /// Save the active buffer to a specific file, adopting that path
    pub fn save_active_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DocumentError> {
        let id = self.active;
        let path = path.as_ref().to_path_buf();
        self.active_mut().save_as(&path)?;
        self.hooks
            .run_hooks("document-saved", &HookArgs::DocumentSaved { id, path });
        Ok(())
    }

    /// Search the active buffer's text
    ///
    /// `start` is a byte offset. A backward search returns the last match
    /// ending at or before `start`. A miss is `None`, never an error.
    pub fn find_in_active(
        &self,
        needle: &str,
        start: usize,
        case_sensitive: bool,
        backward: bool,
    ) -> Option<usize> {
        let text = self.active().text();
        if backward {
            find_backward(text, needle, start, case_sensitive)
        } else {
            find_forward(text, needle, start, case_sensitive)
        }
    }

    /// Replace every occurrence of `find` in the active buffer
    ///
    /// Returns the number of substitutions. When any were made the buffer
    /// is marked dirty (even if the replacement text equals the match) and
    /// the change is announced.
    pub fn replace_all_in_active(
        &mut self,
        find: &str,
        replace: &str,
        case_sensitive: bool,
    ) -> usize {
        let id = self.active;
        let (new_text, count) = replace_all(self.active().text(), find, replace, case_sensitive);
        if count == 0 {
            return 0;
        }

        let old_text = match self.active_mut().set_text(&new_text) {
            Some(old) => old,
            None => {
                // find == replace leaves the text identical
                self.active_mut().mark_modified();
                new_text.clone()
            }
        };
        self.hooks.run_hooks(
            "document-changed",
            &HookArgs::DocumentChanged {
                id,
                old_text,
                new_text,
            },
        );
        count
    }

    /// Save every modified buffer that has a file path
    ///
    /// A buffer whose save fails is logged and skipped; the sweep
    /// continues with the rest. Returns the number of buffers saved.
    pub fn auto_save_dirty(&mut self) -> usize {
        let mut saved = 0;

        for idx in 0..self.buffers.len() {
            let (id, buffer) = &mut self.buffers[idx];
            let id = *id;
            let path = match buffer.file_path() {
                Some(path) if buffer.is_modified() => path.to_path_buf(),
                _ => continue,
            };
            match buffer.save() {
                Ok(()) => {
                    saved += 1;
                    self.hooks
                        .run_hooks("document-saved", &HookArgs::DocumentSaved { id, path });
                }
                Err(e) => {
                    tracing::warn!("Auto-save failed for {:?}: {}", path, e);
                }
            }
        }

        if saved > 0 {
            tracing::debug!("Auto-save sweep wrote {} buffer(s)", saved);
        }
        saved
    }
}

impl Default for DocumentSet {
    fn default() -> Self {
        Self::new()
    }
}

//! scribe: the document engine behind a minimal text editor
//!
//! A buffer holds a whole document as one string together with its backing
//! file and modified flag. [`DocumentSet`] tracks the open buffers and the
//! active one, delegates search/replace/save to it, and sweeps modified
//! buffers to disk on a timer the caller drives. Presentation layers drive
//! the set through plain calls and observe it through the hook registry;
//! the core never touches display state.

pub mod app;
pub mod config;
pub mod document_set;
pub mod error;
pub mod hooks;
pub mod replace;
pub mod search;
pub mod text_buffer;

pub use config::{ConfigError, EditorConfig};
pub use document_set::{BufferId, DocumentSet};
pub use error::DocumentError;
pub use hooks::{HookArgs, HookCallback, HookRegistry};
pub use replace::replace_all;
pub use search::{find_backward, find_forward};
pub use text_buffer::TextBuffer;

//! Headless front end: a line-command interpreter over a DocumentSet
//!
//! This is the presentation layer the library expects: it forwards edits
//! into the active buffer, runs searches with the wrap-around retry, and
//! drives the auto-save sweep from its own run loop so timer ticks and
//! user edits are serialized on the one thread that owns the documents.

use crate::config::EditorConfig;
use crate::document_set::{BufferId, DocumentSet};
use crate::error::DocumentError;
use crate::hooks::HookArgs;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A search request that `next` repeats
#[derive(Debug, Clone)]
struct LastSearch {
    needle: String,
    case_sensitive: bool,
    backward: bool,
}

/// Result of one interpreted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// The command interpreter and owner of the document set
pub struct App {
    docs: DocumentSet,
    config: EditorConfig,

    /// Status lines produced by commands and hooks, drained by the run loop
    status: Rc<RefCell<Vec<String>>>,

    /// Byte offset the next search starts from
    cursor: usize,

    last_search: Option<LastSearch>,
    last_sweep: Instant,
}

impl App {
    pub fn new(config: EditorConfig) -> Self {
        let mut docs = DocumentSet::new();
        let status: Rc<RefCell<Vec<String>>> = Rc::default();

        // Mirror the document lifecycle into status lines, the way a
        // windowed front end reflects it into the title bar.
        let sink = Rc::clone(&status);
        docs.hooks_mut().add_hook(
            "document-opened",
            Box::new(move |args| {
                if let HookArgs::DocumentOpened { path, .. } = args {
                    sink.borrow_mut().push(match path {
                        Some(p) => format!("Opened {}", p.display()),
                        None => "New document".to_string(),
                    });
                }
                true
            }),
        );

        let sink = Rc::clone(&status);
        docs.hooks_mut().add_hook(
            "document-saved",
            Box::new(move |args| {
                if let HookArgs::DocumentSaved { path, .. } = args {
                    sink.borrow_mut().push(format!("Saved {}", path.display()));
                }
                true
            }),
        );

        App {
            docs,
            config,
            status,
            cursor: 0,
            last_search: None,
            last_sweep: Instant::now(),
        }
    }

    /// The document set, for inspection
    pub fn documents(&self) -> &DocumentSet {
        &self.docs
    }

    /// Open a file into a new active buffer
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<BufferId, DocumentError> {
        self.cursor = 0;
        self.docs.open_document(path)
    }

    /// Read commands from `input` until end of stream or `quit`,
    /// writing status lines to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        self.flush_status(&mut output)?;

        for line in input.lines() {
            let line = line?;
            let outcome = self.handle_command(&line);
            self.auto_save_tick();
            self.flush_status(&mut output)?;
            if outcome == Outcome::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Interpret one command line
    pub fn handle_command(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "new" => {
                self.docs.new_document();
                self.cursor = 0;
            }
            "open" => {
                if rest.is_empty() {
                    self.report("Usage: open <path>");
                } else if let Err(e) = self.open(rest) {
                    self.report(format!("Error: {}", e));
                }
            }
            "close" => {
                self.docs.close_active();
                self.cursor = 0;
                self.report("Closed");
            }
            "text" => {
                self.docs.update_active_text(rest);
                self.cursor = 0;
            }
            "show" => {
                self.report(self.docs.active().text().to_string());
            }
            "ls" => self.cmd_ls(),
            "find" => self.cmd_find(rest),
            "next" => self.run_search(),
            "replace" => self.cmd_replace(rest),
            "save" => {
                if let Err(e) = self.docs.save_active() {
                    self.report(format!("Error: {}", e));
                }
            }
            "saveas" => {
                if rest.is_empty() {
                    self.report("Usage: saveas <path>");
                } else if let Err(e) = self.docs.save_active_as(rest) {
                    self.report(format!("Error: {}", e));
                }
            }
            "autosave" => {
                let saved = self.docs.auto_save_dirty();
                self.report(format!("Auto-saved {} buffer(s)", saved));
            }
            "help" => self.cmd_help(),
            "quit" | "q" => return Outcome::Quit,
            _ => self.report(format!("Unknown command: {} (try 'help')", cmd)),
        }

        Outcome::Continue
    }

    fn cmd_ls(&self) {
        let active = self.docs.active_id();
        for (id, buffer) in self.docs.iter() {
            let marker = if id == active { '*' } else { ' ' };
            let dirty = if buffer.is_modified() { '+' } else { ' ' };
            let name = buffer
                .file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "[untitled]".to_string());
            self.report(format!("{}{} #{} {}", marker, dirty, id.0, name));
        }
    }

    fn cmd_find(&mut self, args: &str) {
        let mut case_sensitive = true;
        let mut backward = false;
        let mut tokens = args.split_whitespace().peekable();
        while let Some(&tok) = tokens.peek() {
            match tok {
                "-i" => {
                    case_sensitive = false;
                    tokens.next();
                }
                "-b" => {
                    backward = true;
                    tokens.next();
                }
                _ => break,
            }
        }
        let needle = tokens.collect::<Vec<_>>().join(" ");
        if needle.is_empty() {
            self.report("Usage: find [-i] [-b] <text>");
            return;
        }

        self.last_search = Some(LastSearch {
            needle,
            case_sensitive,
            backward,
        });
        self.run_search();
    }

    fn cmd_replace(&mut self, args: &str) {
        let mut tokens: Vec<&str> = args.split_whitespace().collect();
        let mut case_sensitive = true;
        if tokens.first() == Some(&"-i") {
            case_sensitive = false;
            tokens.remove(0);
        }
        if tokens.len() != 2 {
            self.report("Usage: replace [-i] <find> <replace>");
            return;
        }

        let count = self.docs.replace_all_in_active(tokens[0], tokens[1], case_sensitive);
        self.cursor = 0;
        self.report(format!("Replaced {} occurrence(s)", count));
    }

    /// Run the last search from the cursor, with the wrap-around retry
    fn run_search(&mut self) {
        let Some(search) = self.last_search.clone() else {
            self.report("No previous search");
            return;
        };

        match self.find_wrapped(
            &search.needle,
            self.cursor,
            search.case_sensitive,
            search.backward,
        ) {
            Some(pos) => {
                // Continue past the match next time: forward searches
                // resume after it, backward searches before it.
                self.cursor = if search.backward {
                    pos
                } else {
                    pos + search.needle.len()
                };
                self.report(format!("Found at {}", pos));
            }
            None => self.report(format!("'{}' not found", search.needle)),
        }
    }

    /// Search from `start`, retrying once from the opposite end when the
    /// first attempt misses and wrap-around is enabled
    fn find_wrapped(
        &self,
        needle: &str,
        start: usize,
        case_sensitive: bool,
        backward: bool,
    ) -> Option<usize> {
        if let Some(pos) = self.docs.find_in_active(needle, start, case_sensitive, backward) {
            return Some(pos);
        }
        if !self.config.wrap_search {
            return None;
        }
        let opposite = if backward { self.docs.active().len() } else { 0 };
        self.docs.find_in_active(needle, opposite, case_sensitive, backward)
    }

    /// Invoke the auto-save sweep once the configured interval has
    /// elapsed. Runs on the same thread as every other DocumentSet
    /// operation, so a sweep can never race an edit.
    fn auto_save_tick(&mut self) {
        if self.config.auto_save_interval_ms == 0 {
            return;
        }
        if self.last_sweep.elapsed() >= Duration::from_millis(self.config.auto_save_interval_ms) {
            self.docs.auto_save_dirty();
            self.last_sweep = Instant::now();
        }
    }

    fn report(&self, msg: impl Into<String>) {
        self.status.borrow_mut().push(msg.into());
    }

    /// Drain pending status lines
    pub fn drain_status(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.status.borrow_mut())
    }

    fn flush_status<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        for msg in self.drain_status() {
            writeln!(output, "{}", msg)?;
        }
        Ok(())
    }

    fn cmd_help(&self) {
        self.report(
            "Commands:\n\
             \x20 new                          create an empty document\n\
             \x20 open <path>                  open a file\n\
             \x20 close                        close the active document\n\
             \x20 text <content>               replace the active document's text\n\
             \x20 show                         print the active document's text\n\
             \x20 ls                           list open documents\n\
             \x20 find [-i] [-b] <text>        search (-i ignore case, -b backward)\n\
             \x20 next                         repeat the last search\n\
             \x20 replace [-i] <find> <with>   replace all occurrences\n\
             \x20 save / saveas <path>         write the active document\n\
             \x20 autosave                     sweep-save all modified documents\n\
             \x20 quit                         exit",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(EditorConfig::default())
    }

    fn last_line(app: &mut App) -> String {
        app.drain_status().pop().unwrap_or_default()
    }

    #[test]
    fn test_text_and_show() {
        let mut app = app();
        app.handle_command("text hello world");
        app.handle_command("show");
        assert_eq!(last_line(&mut app), "hello world");
    }

    #[test]
    fn test_find_reports_position_and_advances() {
        let mut app = app();
        app.handle_command("text Hello World Hello");
        app.drain_status();

        app.handle_command("find Hello");
        assert_eq!(last_line(&mut app), "Found at 0");

        app.handle_command("next");
        assert_eq!(last_line(&mut app), "Found at 12");
    }

    #[test]
    fn test_find_wraps_to_start() {
        let mut app = app();
        app.handle_command("text Hello World Hello");
        app.drain_status();

        app.handle_command("find World");
        assert_eq!(last_line(&mut app), "Found at 6");

        // No further occurrence ahead; the retry from index 0 finds the
        // same match again instead of reporting a miss.
        app.handle_command("next");
        assert_eq!(last_line(&mut app), "Found at 6");
    }

    #[test]
    fn test_find_without_wrap_reports_miss() {
        let mut app = App::new(EditorConfig {
            wrap_search: false,
            ..EditorConfig::default()
        });
        app.handle_command("text Hello World");
        app.drain_status();

        app.handle_command("find World");
        assert_eq!(last_line(&mut app), "Found at 6");
        app.handle_command("next");
        assert_eq!(last_line(&mut app), "'World' not found");
    }

    #[test]
    fn test_backward_find_walks_toward_start() {
        let mut app = app();
        app.handle_command("text ab ab ab");
        app.drain_status();

        app.handle_command("find -b ab");
        // Backward searches start from the cursor; a fresh buffer leaves
        // it at 0, so the first hit comes from the wrap to the end.
        assert_eq!(last_line(&mut app), "Found at 6");
        app.handle_command("next");
        assert_eq!(last_line(&mut app), "Found at 3");
        app.handle_command("next");
        assert_eq!(last_line(&mut app), "Found at 0");
    }

    #[test]
    fn test_case_insensitive_find_flag() {
        let mut app = app();
        app.handle_command("text say Foo twice");
        app.drain_status();

        app.handle_command("find foo");
        assert_eq!(last_line(&mut app), "'foo' not found");
        app.handle_command("find -i foo");
        assert_eq!(last_line(&mut app), "Found at 4");
    }

    #[test]
    fn test_replace_command() {
        let mut app = app();
        app.handle_command("text ababab");
        app.drain_status();

        app.handle_command("replace ab x");
        assert_eq!(last_line(&mut app), "Replaced 3 occurrence(s)");
        app.handle_command("show");
        assert_eq!(last_line(&mut app), "xxx");
    }

    #[test]
    fn test_save_without_path_reports_error() {
        let mut app = app();
        app.handle_command("text something");
        app.drain_status();

        app.handle_command("save");
        assert_eq!(last_line(&mut app), "Error: No file path associated with buffer");
    }

    #[test]
    fn test_run_loop_quits_and_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let script = format!("text from the loop\nsaveas {}\nquit\n", path.display());
        let mut output = Vec::new();

        let mut app = app();
        app.run(script.as_bytes(), &mut output).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "from the loop");
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains(&format!("Saved {}", path.display())));
    }

    #[test]
    fn test_open_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");

        let mut app = app();
        app.handle_command(&format!("open {}", missing.display()));
        let line = last_line(&mut app);
        assert!(line.starts_with("Error: File not found"), "got: {line}");
    }
}

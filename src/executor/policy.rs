//! Injectable side-effect policies: destructive-action confirmation and
//! diagnostic reporting. The interactive implementations live next to the
//! test doubles so the executor is exercisable without a terminal.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Asks before a destructive operation (drop_table, delete) runs.
pub trait ConfirmPolicy {
    fn confirm(&self, action: &str) -> bool;
}

/// Interactive yes/no prompt on stdin.
pub struct StdinConfirm;

impl ConfirmPolicy for StdinConfirm {
    fn confirm(&self, action: &str) -> bool {
        print!("Proceed with {action}? [y/n]: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        line.trim().eq_ignore_ascii_case("y")
    }
}

/// Confirms everything.
pub struct AutoConfirm;

impl ConfirmPolicy for AutoConfirm {
    fn confirm(&self, _action: &str) -> bool {
        true
    }
}

/// Denies everything.
pub struct DenyAll;

impl ConfirmPolicy for DenyAll {
    fn confirm(&self, _action: &str) -> bool {
        false
    }
}

/// Receives the human-readable status lines operations emit (timings,
/// degraded-storage warnings). Results and errors travel through return
/// values instead.
pub trait MessageSink {
    fn emit(&self, line: &str);
}

/// Prints each line to stdout.
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Buffers lines so tests can assert on emitted diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }
}

impl MessageSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

// Lets tests keep a handle on a sink they hand to the executor.
impl<T: MessageSink + ?Sized> MessageSink for Rc<T> {
    fn emit(&self, line: &str) {
        (**self).emit(line);
    }
}

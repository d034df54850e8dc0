// src/printer/capture.rs
use super::Printer;
use std::cell::RefCell;

/// Keeps printed output in memory, split by stream.
#[derive(Debug, Default)]
pub struct Capture {
    stdout: RefCell<String>,
    stderr: RefCell<String>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(&self) -> String {
        self.stdout.borrow().clone()
    }

    pub fn stderr(&self) -> String {
        self.stderr.borrow().clone()
    }
}

impl Printer for Capture {
    fn println(&self, output: &str) {
        let mut stdout = self.stdout.borrow_mut();
        stdout.push_str(output);
        stdout.push('\n');
    }

    fn eprintln(&self, output: &str) {
        let mut stderr = self.stderr.borrow_mut();
        stderr.push_str(output);
        stderr.push('\n');
    }
}

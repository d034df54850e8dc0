// src/printer/mod.rs
mod capture;
mod console;

pub use capture::Capture;
pub use console::Console;

/// Where reports and error lines end up.
pub trait Printer {
    fn println(&self, output: &str);
    fn eprintln(&self, output: &str);
}

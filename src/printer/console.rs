// src/printer/console.rs
use super::Printer;

#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Console {
    pub fn new() -> Self {
        Self
    }
}

impl Printer for Console {
    fn println(&self, output: &str) {
        println!("{output}");
    }

    fn eprintln(&self, output: &str) {
        eprintln!("{output}");
    }
}

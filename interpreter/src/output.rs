//! Where `print` writes.

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for program output.
#[derive(Debug, Clone, Default)]
pub enum Output {
    /// Process standard output.
    #[default]
    Stdout,
    /// Lines collected in memory.
    Captured(OutputBuffer),
}

impl Output {
    /// A capturing output and a handle to read what it collects.
    pub fn captured() -> (Self, OutputBuffer) {
        let buffer = OutputBuffer::default();
        (Output::Captured(buffer.clone()), buffer)
    }

    pub fn write_line(&self, line: impl Into<String>) {
        match self {
            Output::Stdout => println!("{}", line.into()),
            Output::Captured(buffer) => buffer.push(line.into()),
        }
    }
}

/// Shared line buffer behind `Output::Captured`.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    lines: Rc<RefCell<Vec<String>>>,
}

impl OutputBuffer {
    fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    /// Lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Drain the lines written so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

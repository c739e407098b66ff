//! A reporter that prints problems to a terminal.

use diagbridge_reporter::{Problem, Reporter, Severity};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Prints problems as they arrive and counts them for the summary.
pub struct ConsoleReporter<W> {
    out: Mutex<W>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
    infos: AtomicUsize,
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
            infos: AtomicUsize::new(0),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    pub fn info_count(&self) -> usize {
        self.infos.load(Ordering::Relaxed)
    }

    /// "1 warning found" / "2 errors found", one line per non-zero count.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if self.warning_count() > 0 {
            lines.push(count_string(self.warning_count(), "warning"));
        }
        if self.error_count() > 0 {
            lines.push(count_string(self.error_count(), "error"));
        }
        lines.join("\n")
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{text}") {
            tracing::warn!(error = %e, "failed to write to console");
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn log(&self, problem: Problem) {
        let counter = match problem.severity() {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.write(problem.rendered());
    }

    fn print_summary(&self) {
        let summary = self.summary();
        if !summary.is_empty() {
            self.write(&summary);
        }
    }
}

fn count_string(n: usize, element: &str) -> String {
    if n == 1 {
        format!("{n} {element} found")
    } else {
        format!("{n} {element}s found")
    }
}

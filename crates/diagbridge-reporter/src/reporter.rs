//! Forwarding of compiler diagnostics to a build tool's reporter.

use crate::error::Result;
use crate::position::ExternalPosition;
use crate::problem::Problem;
use crate::render::{render, Context};
use crate::severity::Severity;
use diagbridge_common::Diagnostic;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// The build tool's side of the contract.
///
/// [`DelegatingReporter`] adds no synchronization of its own: sharing one
/// across threads is only sound when the implementation tolerates concurrent
/// calls, which `Sync` expresses.
pub trait Reporter {
    /// Take ownership of one finished problem.
    fn log(&self, problem: Problem);

    /// Emit the end-of-run summary.
    fn print_summary(&self);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn log(&self, problem: Problem) {
        (**self).log(problem)
    }

    fn print_summary(&self) {
        (**self).print_summary()
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn log(&self, problem: Problem) {
        (**self).log(problem)
    }

    fn print_summary(&self) {
        (**self).print_summary()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn log(&self, problem: Problem) {
        (**self).log(problem)
    }

    fn print_summary(&self) {
        (**self).print_summary()
    }
}

/// Forwards compiler diagnostics to a build tool's [`Reporter`].
#[derive(Debug)]
pub struct DelegatingReporter<R> {
    delegate: R,
}

impl<R: Reporter> DelegatingReporter<R> {
    pub fn new(delegate: R) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }

    pub fn print_summary(&self) {
        self.delegate.print_summary();
    }

    /// Translate one diagnostic and hand it to the delegate.
    ///
    /// Fails without forwarding anything when the diagnostic's level code is
    /// unknown.
    pub fn report(&self, dia: &Diagnostic, ctx: &Context<'_>) -> Result<()> {
        let severity = Severity::from_level(dia.level()).map_err(|e| {
            error!(level = dia.level(), msg = dia.msg().msg(), "bad diagnostic level");
            e
        })?;

        let position = ExternalPosition::translate(dia.pos());
        trace!(?position, "translated position");

        let rendered = render(dia, severity.level(), ctx);
        debug!(
            %severity,
            line = position.line,
            pointer = position.pointer,
            "forwarding problem"
        );

        self.delegate
            .log(Problem::new(position, dia.msg().msg(), severity, rendered));
        Ok(())
    }
}

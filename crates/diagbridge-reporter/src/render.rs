//! Rendering of the text that accompanies a problem.
//!
//! The formatting itself belongs to the compiler and is injected through
//! [`MessageRendering`]; whether the long explanation is shown is decided by
//! an [`ExplainPolicy`]. This module only composes the two.

use crate::position::ExternalPosition;
use diagbridge_common::{Diagnostic, Level, Message, SourcePosition};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::sync::{PoisonError, RwLock};

/// The compiler's formatting rules for diagnostics.
pub trait MessageRendering: Send + Sync {
    /// The short message prefixed with its position.
    fn message_and_pos(&self, msg: &Message, pos: &SourcePosition, level: &str) -> String;

    /// The block appended when the message is explained.
    fn explanation(&self, msg: &Message) -> String;
}

/// Decides whether a diagnostic's explanation is shown.
pub trait ExplainPolicy: Send + Sync {
    fn should_explain(&self, dia: &Diagnostic) -> bool;
}

/// Everything the reporter needs from the compiler besides the diagnostic.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub rendering: &'a dyn MessageRendering,
    pub explain: &'a dyn ExplainPolicy,
}

impl<'a> Context<'a> {
    pub fn new(rendering: &'a dyn MessageRendering, explain: &'a dyn ExplainPolicy) -> Self {
        Self { rendering, explain }
    }
}

/// Render the text of a diagnostic whose level is already known to be `level`.
pub fn render(dia: &Diagnostic, level: Level, ctx: &Context<'_>) -> String {
    let msg = dia.msg();
    let mut rendered = ctx.rendering.message_and_pos(msg, dia.pos(), level.name());
    if ctx.explain.should_explain(dia) && msg.has_explanation() {
        rendered.push_str(&ctx.rendering.explanation(msg));
    }
    rendered
}

/// Plain-text rendering in the `path:line:column: level: message` style,
/// optionally followed by the source line and a caret.
#[derive(Debug, Clone, Copy)]
pub struct PlainRendering {
    pub show_source: bool,
}

impl Default for PlainRendering {
    fn default() -> Self {
        Self { show_source: true }
    }
}

impl MessageRendering for PlainRendering {
    fn message_and_pos(&self, msg: &Message, pos: &SourcePosition, level: &str) -> String {
        let position = ExternalPosition::translate(pos);
        let mut out = String::new();

        match (&position.source_path, position.line) {
            (Some(path), Some(line)) => {
                let column = position.pointer.unwrap_or(0) + 1;
                out.push_str(&format!("{path}:{line}:{column}: "));
            }
            (Some(path), None) => out.push_str(&format!("{path}: ")),
            _ => {}
        }
        out.push_str(&format!("{level}: {}", msg.msg()));

        if self.show_source {
            if let (Some(content), Some(space)) = (&position.line_content, &position.pointer_space) {
                out.push_str(&format!("\n{content}\n{space}^"));
            }
        }
        out
    }

    fn explanation(&self, msg: &Message) -> String {
        format!("\n\nExplanation\n===========\n{}", msg.explanation())
    }
}

/// The compiler's explain switch, restricted to some levels.
#[derive(Debug, Clone)]
pub struct ExplainSetting {
    pub enabled: bool,
    pub levels: Vec<Level>,
}

impl ExplainSetting {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            levels: Level::ALL.to_vec(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            levels: Level::ALL.to_vec(),
        }
    }
}

impl ExplainPolicy for ExplainSetting {
    fn should_explain(&self, dia: &Diagnostic) -> bool {
        self.enabled
            && Level::from_code(dia.level()).is_some_and(|level| self.levels.contains(&level))
    }
}

impl ExplainPolicy for bool {
    fn should_explain(&self, _dia: &Diagnostic) -> bool {
        *self
    }
}

/// Explains each distinct message at most once per run.
#[derive(Debug, Default)]
pub struct ExplainOnce<P> {
    inner: P,
    explained: RwLock<FxHashSet<SmolStr>>,
}

impl<P: ExplainPolicy> ExplainOnce<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            explained: RwLock::new(FxHashSet::default()),
        }
    }
}

impl<P: ExplainPolicy> ExplainPolicy for ExplainOnce<P> {
    fn should_explain(&self, dia: &Diagnostic) -> bool {
        if !self.inner.should_explain(dia) {
            return false;
        }
        // Nothing would be shown, so nothing to remember.
        if !dia.msg().has_explanation() {
            return true;
        }

        let msg = dia.msg().msg();
        {
            let explained = self.explained.read().unwrap_or_else(PoisonError::into_inner);
            if explained.contains(msg) {
                return false;
            }
        }

        let mut explained = self.explained.write().unwrap_or_else(PoisonError::into_inner);
        explained.insert(SmolStr::new(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagbridge_common::{Source, SourceFile};
    use std::sync::Arc;

    fn position(content: &str, point: usize) -> SourcePosition {
        let src: Arc<dyn Source> = Arc::new(SourceFile::new("src/A.scala", content.to_string()));
        SourcePosition::new(src, point)
    }

    fn explained_error() -> Diagnostic {
        Diagnostic::error("type mismatch")
            .with_explanation("found Int, required String")
            .with_position(position("val s: String =\n\t1\n", 17))
    }

    #[test]
    fn test_short_rendering_with_position() {
        let rendering = PlainRendering::default();
        let dia = explained_error();
        let text = rendering.message_and_pos(dia.msg(), dia.pos(), "Error");
        assert_eq!(text, "src/A.scala:2:2: Error: type mismatch\n\t1\n\t^");
    }

    #[test]
    fn test_short_rendering_without_source() {
        let rendering = PlainRendering { show_source: false };
        let dia = explained_error();
        let text = rendering.message_and_pos(dia.msg(), dia.pos(), "Error");
        assert_eq!(text, "src/A.scala:2:2: Error: type mismatch");
    }

    #[test]
    fn test_short_rendering_without_position() {
        let rendering = PlainRendering::default();
        let msg = Message::new("no main method");
        let text = rendering.message_and_pos(&msg, &SourcePosition::none(), "Warning");
        assert_eq!(text, "Warning: no main method");
    }

    #[test]
    fn test_render_appends_explanation() {
        let rendering = PlainRendering { show_source: false };
        let ctx = Context::new(&rendering, &true);
        let text = render(&explained_error(), Level::Error, &ctx);
        assert_eq!(
            text,
            "src/A.scala:2:2: Error: type mismatch\n\nExplanation\n===========\nfound Int, required String"
        );
    }

    #[test]
    fn test_render_without_explain_is_short_rendering() {
        let rendering = PlainRendering::default();
        let ctx = Context::new(&rendering, &false);
        let with = explained_error();
        let without = Diagnostic::error("type mismatch").with_position(with.pos().clone());

        let short = rendering.message_and_pos(with.msg(), with.pos(), "Error");
        assert_eq!(render(&with, Level::Error, &ctx), short);
        assert_eq!(render(&without, Level::Error, &ctx), short);
    }

    #[test]
    fn test_render_with_empty_explanation() {
        let rendering = PlainRendering::default();
        let ctx = Context::new(&rendering, &true);
        let dia = Diagnostic::warning("deprecated").with_explanation("");
        assert_eq!(render(&dia, Level::Warning, &ctx), "Warning: deprecated");
    }

    #[test]
    fn test_explain_setting_levels() {
        let setting = ExplainSetting {
            enabled: true,
            levels: vec![Level::Error],
        };
        assert!(setting.should_explain(&Diagnostic::error("e")));
        assert!(!setting.should_explain(&Diagnostic::warning("w")));
        assert!(!ExplainSetting::disabled().should_explain(&Diagnostic::error("e")));
        assert!(ExplainSetting::enabled().should_explain(&Diagnostic::info("i")));
    }

    #[test]
    fn test_explain_once() {
        let policy = ExplainOnce::new(ExplainSetting::enabled());
        let first = explained_error();
        let other = Diagnostic::error("not found: value x").with_explanation("declare x");

        assert!(policy.should_explain(&first));
        assert!(!policy.should_explain(&first));
        assert!(policy.should_explain(&other));

        let plain = Diagnostic::error("type mismatch");
        assert!(policy.should_explain(&plain));
    }

    #[test]
    fn test_explain_once_respects_inner() {
        let policy = ExplainOnce::new(false);
        assert!(!policy.should_explain(&explained_error()));
    }
}

mod diagnostic;
mod position;
mod source;

pub use diagnostic::{Diagnostic, Level, Message};
pub use position::{SourcePosition, UNKNOWN_LINE};
pub use source::{Source, SourceFile};

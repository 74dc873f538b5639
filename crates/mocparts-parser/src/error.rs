//! Fatal diagnostics for the mocparts parser.
//!
//! Every problem found while a document is classified, collected or
//! flattened is a [`Diagnostic`] carrying an [`ErrorCode`], the document
//! line and model it was found in, and labels for the CLI to underline.
//! [`ParseError`] is what the public entry points return.
//!
//! # Example
//!
//! ```
//! # use mocparts_parser::error::{Diagnostic, ErrorCode};
//! # use mocparts_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E001, "sub-model reference has no name")
//!     .at_line(3)
//!     .with_label(Span::new(42..58), "expected a model name after this field")
//!     .with_help("a reference row is `1 <color> <x y z> <a b c d e f g h i> <name>.ldr`");
//!
//! assert_eq!(diag.line(), Some(3));
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelRole};
pub use parse_error::ParseError;

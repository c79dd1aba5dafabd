//! Docstring dialect detection and parameter extraction.
//!
//! Commands document their parameters in one of three dialects:
//! reStructuredText field lists, NumPy underlined sections, or Google
//! `Args:` sections. This crate normalizes whitespace, detects the
//! dialect, and extracts a uniform [`Docstring`] model so callers never
//! see dialect differences.
//!
//! # Examples
//!
//! ```
//! use argbind_doctext::parse;
//!
//! let doc = parse("Add numbers.\n\n:param a: first\n:param b: second");
//! assert_eq!(doc.short_description.as_deref(), Some("Add numbers."));
//! assert_eq!(doc.params.len(), 2);
//! assert_eq!(doc.params[0].arg_name, "a");
//! ```

mod description;
mod detect;
mod model;
mod strategies;

use tracing::debug;

pub use detect::detect_style;
pub use model::{DocParam, Docstring, DocstringStyle};

use strategies::google::GoogleStrategy;
use strategies::numpy::NumpyStrategy;
use strategies::rest::RestStrategy;
use strategies::DialectStrategy;

/// Parse a raw docstring, auto-detecting its dialect.
pub fn parse(text: &str) -> Docstring {
    let cleaned = description::clean(text);
    let style = detect::detect_style(&cleaned);
    parse_cleaned(&cleaned, style)
}

/// Parse a raw docstring as a specific dialect.
pub fn parse_with_style(text: &str, style: DocstringStyle) -> Docstring {
    parse_cleaned(&description::clean(text), style)
}

fn parse_cleaned(cleaned: &str, style: DocstringStyle) -> Docstring {
    let strategy: Option<&dyn DialectStrategy> = match style {
        DocstringStyle::Rest => Some(&RestStrategy),
        DocstringStyle::Numpy => Some(&NumpyStrategy),
        DocstringStyle::Google => Some(&GoogleStrategy),
        DocstringStyle::Plain => None,
    };
    let (desc_text, params) = match strategy {
        Some(strategy) => {
            debug!(strategy = strategy.name(), "extracting parameters");
            strategy.extract(cleaned)
        }
        None => (cleaned.to_string(), Vec::new()),
    };
    let (short_description, long_description) = description::split_short_long(&desc_text);
    Docstring {
        short_description,
        long_description,
        params,
    }
}

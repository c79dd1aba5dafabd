//! Pluggable extraction strategies, one per docstring dialect.

pub mod google;
pub mod numpy;
pub mod rest;

use crate::model::DocParam;

/// Pluggable strategy for one docstring dialect.
///
/// Each strategy splits a cleaned docstring into its free-text
/// description and its parameter entries. Dialect detection picks which
/// strategy runs; strategies themselves never re-detect.
pub trait DialectStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, text: &str) -> (String, Vec<DocParam>);
}

/// Count leading spaces of a line.
pub(crate) fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

/// Strip surrounding quotes or backticks from a default-value token.
pub(crate) fn unquote(token: &str) -> String {
    token
        .trim_matches(|c| c == '\'' || c == '"' || c == '`')
        .to_string()
}

//! Parsed docstring model.
//!
//! The output shape is the same for every dialect: a short summary, an
//! optional long description, and a flat list of parameter entries.

use serde::{Deserialize, Serialize};

/// Docstring dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocstringStyle {
    /// reStructuredText field lists (`:param name: ...`).
    Rest,
    /// NumPy sections with dashed underlines.
    Numpy,
    /// Google sections (`Args:` with indented entries).
    Google,
    /// No recognized parameter markup; everything is description.
    Plain,
}

/// One parameter entry extracted from a docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocParam {
    /// Name exactly as spelled in the docstring (dashes included).
    pub arg_name: String,
    /// Declared type text, if any.
    pub type_name: Option<String>,
    /// Description with continuation lines folded in.
    pub description: String,
    /// Documented default value, if the dialect expresses one.
    pub default: Option<String>,
}

impl DocParam {
    /// A minimal entry with just a name and description.
    pub fn new(arg_name: &str, description: &str) -> Self {
        Self {
            arg_name: arg_name.to_string(),
            type_name: None,
            description: description.to_string(),
            default: None,
        }
    }
}

/// A fully parsed docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docstring {
    /// First paragraph of the description.
    pub short_description: Option<String>,
    /// Remaining description paragraphs, joined with blank lines.
    pub long_description: Option<String>,
    /// Parameter entries in order of appearance.
    pub params: Vec<DocParam>,
}

impl Docstring {
    /// Look up a parameter entry by its documented name.
    pub fn param(&self, name: &str) -> Option<&DocParam> {
        self.params.iter().find(|p| p.arg_name == name)
    }
}

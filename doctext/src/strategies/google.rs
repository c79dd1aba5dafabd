//! Google-style section extraction (`Args:` with indented entries).

use std::sync::LazyLock;

use regex::Regex;

use super::{indent_of, unquote, DialectStrategy};
use crate::model::DocParam;

struct GooglePatterns {
    section: Regex,
    entry: Regex,
    defaults_to: Regex,
}

static PATTERNS: LazyLock<GooglePatterns> = LazyLock::new(|| GooglePatterns {
    section: Regex::new(
        r"^(\s*)(Args|Arguments|Keyword Args|Keyword Arguments|Attributes|Returns|Yields|Raises|Note|Notes|Example|Examples|Todo)\s*:\s*$",
    )
    .expect("static regex must compile"),
    entry: Regex::new(r"^([\w\-\*]+)\s*(?:\(([^)]*)\))?\s*:\s*(.*)$")
        .expect("static regex must compile"),
    defaults_to: Regex::new(r"(?i)defaults?\s+to\s+([^\s.,]+)").expect("static regex must compile"),
});

const PARAM_SECTIONS: &[&str] = &["Args", "Arguments", "Keyword Args", "Keyword Arguments"];

/// Extraction strategy for Google-style sections.
pub struct GoogleStrategy;

impl DialectStrategy for GoogleStrategy {
    fn name(&self) -> &'static str {
        "google"
    }

    fn extract(&self, text: &str) -> (String, Vec<DocParam>) {
        let mut description = Vec::new();
        let mut params = Vec::new();
        let mut seen_section = false;
        let mut in_params = false;
        let mut section_indent = 0;
        let mut entry_indent: Option<usize> = None;

        for line in text.lines() {
            if let Some(caps) = PATTERNS.section.captures(line) {
                seen_section = true;
                let name = caps.get(2).map_or("", |m| m.as_str());
                in_params = PARAM_SECTIONS.contains(&name);
                section_indent = caps.get(1).map_or(0, |m| m.as_str().len());
                entry_indent = None;
                continue;
            }
            if !seen_section {
                description.push(line);
                continue;
            }
            if !in_params || line.trim().is_empty() {
                continue;
            }
            let indent = indent_of(line);
            if indent <= section_indent {
                // Dedented back out of the section body.
                in_params = false;
                continue;
            }
            let expected = *entry_indent.get_or_insert(indent);
            if indent == expected {
                if let Some(caps) = PATTERNS.entry.captures(line.trim()) {
                    let type_name = caps
                        .get(2)
                        .map(|m| m.as_str())
                        .map(clean_type)
                        .filter(|t| !t.is_empty());
                    params.push(DocParam {
                        arg_name: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                        type_name,
                        description: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
                        default: None,
                    });
                }
            } else if indent > expected {
                if let Some(entry) = params.last_mut() {
                    if !entry.description.is_empty() {
                        entry.description.push(' ');
                    }
                    entry.description.push_str(line.trim());
                }
            }
        }

        for entry in &mut params {
            if let Some(caps) = PATTERNS.defaults_to.captures(&entry.description) {
                entry.default = caps.get(1).map(|m| unquote(m.as_str()));
            }
        }
        (description.join("\n"), params)
    }
}

/// Drop `optional` markers from a parenthesized type list.
fn clean_type(raw: &str) -> String {
    let kept: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("optional"))
        .collect();
    kept.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (String, Vec<DocParam>) {
        GoogleStrategy.extract(text)
    }

    #[test]
    fn test_basic_args_section() {
        let doc = "Add numbers.\n\nArgs:\n    a (int): The first number.\n    b (int): The second number.";
        let (desc, params) = extract(doc);
        assert_eq!(desc.trim(), "Add numbers.");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].arg_name, "a");
        assert_eq!(params[0].type_name.as_deref(), Some("int"));
        assert_eq!(params[1].description, "The second number.");
    }

    #[test]
    fn test_untyped_entry() {
        let doc = "Run.\n\nArgs:\n    verbose: Say more.";
        let (_, params) = extract(doc);
        assert_eq!(params[0].arg_name, "verbose");
        assert_eq!(params[0].type_name, None);
    }

    #[test]
    fn test_optional_marker_dropped() {
        let doc = "Run.\n\nArgs:\n    depth (int, optional): How deep.";
        let (_, params) = extract(doc);
        assert_eq!(params[0].type_name.as_deref(), Some("int"));
    }

    #[test]
    fn test_defaults_to_extracted() {
        let doc = "Run.\n\nArgs:\n    mode (str): Output mode. Defaults to 'text'.";
        let (_, params) = extract(doc);
        assert_eq!(params[0].default.as_deref(), Some("text"));
    }

    #[test]
    fn test_continuation_and_returns_excluded() {
        let doc = "Run.\n\nArgs:\n    path (str): The input\n        file path.\n\nReturns:\n    int: status";
        let (_, params) = extract(doc);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].description, "The input file path.");
    }
}

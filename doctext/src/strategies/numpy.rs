//! NumPy-style section extraction (underlined `Parameters` blocks).

use std::sync::LazyLock;

use regex::Regex;

use super::{indent_of, unquote, DialectStrategy};
use crate::model::DocParam;

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("static regex must compile"));

const PARAM_SECTIONS: &[&str] = &["Parameters", "Other Parameters", "Args", "Arguments"];

/// Extraction strategy for NumPy-style sections.
pub struct NumpyStrategy;

impl DialectStrategy for NumpyStrategy {
    fn name(&self) -> &'static str {
        "numpy"
    }

    fn extract(&self, text: &str) -> (String, Vec<DocParam>) {
        let lines: Vec<&str> = text.lines().collect();
        let first_header = (0..lines.len())
            .find(|&i| is_header(&lines, i))
            .unwrap_or(lines.len());
        let description = lines[..first_header].join("\n");

        let mut params = Vec::new();
        let mut i = first_header;
        while i < lines.len() {
            if is_header(&lines, i) {
                let section = lines[i].trim().to_string();
                i += 2;
                let start = i;
                while i < lines.len() && !is_header(&lines, i) {
                    i += 1;
                }
                if PARAM_SECTIONS.contains(&section.as_str()) {
                    parse_entries(&lines[start..i], &mut params);
                }
            } else {
                i += 1;
            }
        }
        (description, params)
    }
}

/// Whether `lines[i]` is a section name underlined with dashes.
fn is_header(lines: &[&str], i: usize) -> bool {
    !lines[i].trim().is_empty()
        && lines.get(i + 1).is_some_and(|next| UNDERLINE.is_match(next))
}

/// Parse `name : type` entries with indented description lines.
fn parse_entries(body: &[&str], params: &mut Vec<DocParam>) {
    let entry_indent = body
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .unwrap_or(0);

    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) <= entry_indent {
            let trimmed = line.trim();
            let (name, type_text) = match trimmed.split_once(':') {
                Some((name, ty)) => (name.trim(), Some(ty.trim())),
                None => (trimmed, None),
            };
            let (type_name, default) = split_type_and_default(type_text);
            params.push(DocParam {
                arg_name: name.to_string(),
                type_name,
                description: String::new(),
                default,
            });
        } else if let Some(entry) = params.last_mut() {
            if !entry.description.is_empty() {
                entry.description.push(' ');
            }
            entry.description.push_str(line.trim());
        }
    }
}

/// Split a type expression like `int, optional, default 5` into the type
/// text and the documented default.
fn split_type_and_default(type_text: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(type_text) = type_text else {
        return (None, None);
    };
    let mut kept = Vec::new();
    let mut default = None;
    for segment in type_text.split(',') {
        let segment = segment.trim();
        if segment.is_empty() || segment.eq_ignore_ascii_case("optional") {
            continue;
        }
        if let Some(rest) = segment.strip_prefix("default") {
            let value = rest.trim_start_matches(['=', ':', ' ']).trim();
            if !value.is_empty() {
                default = Some(unquote(value));
            }
            continue;
        }
        kept.push(segment);
    }
    let type_name = if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    };
    (type_name, default)
}

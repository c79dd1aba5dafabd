//! reStructuredText field-list extraction (`:param name: ...`).

use std::sync::LazyLock;

use regex::Regex;

use super::DialectStrategy;
use crate::model::DocParam;

struct RestPatterns {
    param: Regex,
    type_field: Regex,
    any_field: Regex,
}

static PATTERNS: LazyLock<RestPatterns> = LazyLock::new(|| RestPatterns {
    // Head may carry a type before the name (":param int depth:") and the
    // name may contain dashes (":param a-param:", ":param -j:").
    param: Regex::new(r"^\s*:(?:param|parameter|arg|argument|key|keyword)\s+([^:]+?)\s*:\s*(.*)$")
        .expect("static regex must compile"),
    type_field: Regex::new(r"^\s*:type\s+([^:]+?)\s*:\s*(.*)$").expect("static regex must compile"),
    any_field: Regex::new(r"^\s*:[a-zA-Z][^:]*:").expect("static regex must compile"),
});

/// Extraction strategy for reST field lists.
pub struct RestStrategy;

impl DialectStrategy for RestStrategy {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn extract(&self, text: &str) -> (String, Vec<DocParam>) {
        let mut description = Vec::new();
        let mut params: Vec<DocParam> = Vec::new();
        let mut current: Option<DocParam> = None;
        let mut in_fields = false;

        for line in text.lines() {
            if let Some(caps) = PATTERNS.param.captures(line) {
                in_fields = true;
                if let Some(done) = current.take() {
                    params.push(done);
                }
                let head = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                let mut tokens: Vec<&str> = head.split_whitespace().collect();
                let name = tokens.pop().unwrap_or_default().to_string();
                let type_name = if tokens.is_empty() {
                    None
                } else {
                    Some(tokens.join(" "))
                };
                current = Some(DocParam {
                    arg_name: name,
                    type_name,
                    description: body.trim().to_string(),
                    default: None,
                });
            } else if let Some(caps) = PATTERNS.type_field.captures(line) {
                in_fields = true;
                if let Some(done) = current.take() {
                    params.push(done);
                }
                let name = caps.get(1).map_or("", |m| m.as_str()).trim();
                let ty = caps.get(2).map_or("", |m| m.as_str()).trim();
                if let Some(param) = params.iter_mut().find(|p| p.arg_name == name) {
                    if param.type_name.is_none() && !ty.is_empty() {
                        param.type_name = Some(ty.to_string());
                    }
                }
            } else if PATTERNS.any_field.is_match(line) {
                // :returns:, :rtype:, :raises: and friends end the current
                // entry and are otherwise ignored.
                in_fields = true;
                if let Some(done) = current.take() {
                    params.push(done);
                }
            } else if in_fields {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    if let Some(done) = current.take() {
                        params.push(done);
                    }
                } else if let Some(entry) = current.as_mut() {
                    if !entry.description.is_empty() {
                        entry.description.push(' ');
                    }
                    entry.description.push_str(trimmed);
                }
            } else {
                description.push(line);
            }
        }
        if let Some(done) = current.take() {
            params.push(done);
        }
        (description.join("\n"), params)
    }
}

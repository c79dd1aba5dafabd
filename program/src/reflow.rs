//! Paragraph-aware description reflow.
//!
//! Long descriptions are rewrapped before being handed to the help
//! renderer: indentation is normalized, runs of blank lines collapse to
//! one, paragraphs are detected by their sub-indent (so list items keep
//! their hanging indent), and each paragraph is wrapped to the target
//! width. Blank paragraphs survive as empty lines, which keeps the
//! spacing between paragraphs intact.

use std::sync::LazyLock;

use regex::Regex;

struct ReflowPatterns {
    list_marker: Regex,
    blank_run: Regex,
    whitespace: Regex,
}

static PATTERNS: LazyLock<ReflowPatterns> = LazyLock::new(|| ReflowPatterns {
    // Leading indent plus a bullet or enumeration marker: "* ", "- ",
    // "> ", "1. ", "a) ".
    list_marker: Regex::new(r"^( *)(([*\-+>]+|\w+\)|\w+\.) +)").expect("static regex must compile"),
    blank_run: Regex::new(r"\n{3,}").expect("static regex must compile"),
    whitespace: Regex::new(r"\s+").expect("static regex must compile"),
});

/// Reflow text to `width`, returning the wrapped lines.
pub fn reflow(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in split_paragraphs(text) {
        let (indent, sub_indent) = indents(&paragraph);
        let collapsed = PATTERNS.whitespace.replace_all(&paragraph, " ");
        let wrapped = wrap(collapsed.trim(), width, indent, sub_indent);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

/// Reflow text to `width` as a single newline-joined string.
pub fn reflow_text(text: &str, width: usize) -> String {
    reflow(text, width).join("\n")
}

/// Leading indent of a line, and the indent its continuation lines
/// should get. They differ only when the line opens with a list marker.
fn indents(line: &str) -> (usize, usize) {
    let indent = line.chars().take_while(|c| *c == ' ').count();
    let sub_indent = match PATTERNS.list_marker.captures(line) {
        Some(caps) => indent + caps.get(2).map_or(0, |m| m.as_str().chars().count()),
        None => indent,
    };
    (indent, sub_indent)
}

/// Strip the common space margin from every line.
fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| *c == ' ').count())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|l| l.get(l.len().min(margin)..).unwrap_or("").to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group lines into paragraphs.
///
/// A line joins the previous paragraph when its indent equals both its
/// own sub-indent and the previous line's sub-indent; anything else
/// (including blank lines) starts a new paragraph.
fn split_paragraphs(text: &str) -> Vec<String> {
    let dedented = dedent(text);
    let trimmed = dedented.trim();
    let collapsed = PATTERNS.blank_run.replace_all(trimmed, "\n\n");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut last_sub_indent: Option<usize> = None;
    for line in collapsed.lines() {
        let (indent, sub_indent) = indents(line);
        let is_text = !line.trim().is_empty();
        let joins = is_text && indent == sub_indent && Some(indent) == last_sub_indent;
        match paragraphs.last_mut() {
            Some(last) if joins => {
                last.push(' ');
                last.push_str(line);
            }
            _ => paragraphs.push(line.to_string()),
        }
        last_sub_indent = is_text.then_some(sub_indent);
    }
    paragraphs
}

/// Greedy word wrap with distinct first-line and continuation indents.
/// Widths count characters, not bytes.
fn wrap(text: &str, width: usize, initial_indent: usize, subsequent_indent: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = " ".repeat(initial_indent);
    let mut line_width = initial_indent;
    let mut has_words = false;
    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if has_words && line_width + 1 + word_width > width {
            out.push(line);
            line = " ".repeat(subsequent_indent);
            line_width = subsequent_indent;
            has_words = false;
        }
        if has_words {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
        has_words = true;
    }
    if has_words {
        out.push(line);
    }
    out
}

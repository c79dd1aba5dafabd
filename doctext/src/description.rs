//! Whitespace cleanup and description splitting shared by all dialects.

/// Normalize a raw docstring's indentation.
///
/// The first line is taken as-is (minus leading whitespace); the common
/// space margin of the remaining non-blank lines is stripped from each of
/// them. Leading and trailing blank lines are dropped.
pub(crate) fn clean(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| *c == ' ').count())
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push(line.trim_start().to_string());
        } else {
            out.push(strip_indent(line, margin).to_string());
        }
    }
    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Strip up to `n` leading spaces from a line.
fn strip_indent(line: &str, n: usize) -> &str {
    let mut rest = line;
    for _ in 0..n {
        match rest.strip_prefix(' ') {
            Some(r) => rest = r,
            None => break,
        }
    }
    rest
}

/// Split description text into a short summary and a long description.
///
/// The summary is the first paragraph; the long description is every
/// paragraph after it, re-joined with single blank lines. Empty input
/// yields neither.
pub(crate) fn split_short_long(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }
    let paragraphs = split_paragraphs(text);
    let short = paragraphs[0].clone();
    if paragraphs.len() == 1 {
        return (Some(short), None);
    }
    let long = paragraphs[1..].join("\n\n");
    (Some(short), Some(long))
}

/// Split trimmed text into paragraphs on blank-line runs.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

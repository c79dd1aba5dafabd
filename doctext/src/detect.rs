//! Docstring dialect detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::DocstringStyle;

struct DetectPatterns {
    rest_field: Regex,
    numpy_underline: Regex,
    google_section: Regex,
}

static PATTERNS: LazyLock<DetectPatterns> = LazyLock::new(|| DetectPatterns {
    rest_field: Regex::new(
        r"(?m)^\s*:(param|parameter|arg|argument|key|keyword|type|returns?|rtype|raises?|yields?)\b",
    )
    .expect("static regex must compile"),
    numpy_underline: Regex::new(r"^\s*-{3,}\s*$").expect("static regex must compile"),
    google_section: Regex::new(
        r"^\s*(Args|Arguments|Keyword Args|Keyword Arguments|Attributes|Returns|Yields|Raises|Note|Notes|Example|Examples|Todo)\s*:\s*$",
    )
    .expect("static regex must compile"),
});

/// Section names that mark a NumPy-style docstring when underlined.
const NUMPY_SECTIONS: &[&str] = &[
    "Parameters",
    "Other Parameters",
    "Args",
    "Arguments",
    "Returns",
    "Yields",
    "Raises",
    "Attributes",
    "See Also",
    "Notes",
    "Examples",
    "Warns",
    "References",
];

/// Classify a cleaned docstring's dialect.
///
/// reStructuredText field markers win, then NumPy underlined sections,
/// then Google section headers. Text with none of these is `Plain`.
pub fn detect_style(text: &str) -> DocstringStyle {
    if PATTERNS.rest_field.is_match(text) {
        return DocstringStyle::Rest;
    }
    let lines: Vec<&str> = text.lines().collect();
    for window in lines.windows(2) {
        if PATTERNS.numpy_underline.is_match(window[1])
            && NUMPY_SECTIONS.contains(&window[0].trim())
        {
            return DocstringStyle::Numpy;
        }
    }
    if lines.iter().any(|l| PATTERNS.google_section.is_match(l)) {
        return DocstringStyle::Google;
    }
    DocstringStyle::Plain
}

//! Normalizing parsed docstrings into binder metadata.
//!
//! The dialect layer yields names exactly as documented; here they are
//! folded into valid storage keys and the per-parameter entries become
//! metadata fragments for the merge engine.

use std::collections::HashMap;

use argbind_core::{ArgMeta, Value};

/// Docstring content keyed the way the binder consumes it.
#[derive(Debug, Clone, Default)]
pub(crate) struct NormalizedDoc {
    /// First paragraph, used as the command's one-line help.
    pub help: String,
    /// Long description, falling back to the help line.
    pub description: String,
    /// Per-parameter docstring spellings and metadata fragments, keyed
    /// by normalized parameter name.
    pub params: HashMap<String, (Vec<String>, ArgMeta)>,
}

/// Parse and normalize a raw docstring.
///
/// Documented names keep their raw spelling as option candidates, while
/// the lookup key has dashes folded to underscores and leading
/// underscores stripped, matching how the names appear in signatures.
pub(crate) fn normalize_docstring(raw: &str) -> NormalizedDoc {
    let doc = argbind_doctext::parse(raw);
    let help = doc.short_description.clone().unwrap_or_default();
    let description = doc.long_description.clone().unwrap_or_else(|| help.clone());

    let mut params = HashMap::new();
    for entry in &doc.params {
        let mut meta = ArgMeta::default();
        if !entry.description.is_empty() {
            meta.help = Some(entry.description.clone());
        }
        if let Some(default) = &entry.default {
            meta.default = Some(Value::Str(default.clone()));
        }
        let key = normalize_name(&entry.arg_name);
        params.insert(key, (vec![entry.arg_name.clone()], meta));
    }
    NormalizedDoc {
        help,
        description,
        params,
    }
}

/// Fold a documented name into a signature-compatible key.
fn normalize_name(name: &str) -> String {
    name.replace('-', "_").trim_start_matches('_').to_string()
}

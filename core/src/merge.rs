//! The merge engine: combining defaults, docstring metadata, inference,
//! and user overrides into final parser argument specs.
//!
//! Merging is deterministic and ordered. For an optional parameter the
//! layers are, lowest to highest precedence: docstring metadata, the
//! declared default, action/type inference, the explicit annotation, and
//! finally the user override. Required parameters skip inference and
//! option spelling entirely; they become bare positionals.

use crate::infer::action_by_type;
use crate::types::{ArgMeta, ArgOverride, MergedArgSpec, Param};

/// Normalize bare option names into dashed spellings.
///
/// Already-dashed spellings pass through untouched. Single-character
/// names get one dash, everything else two.
///
/// # Examples
///
/// ```
/// use argbind_core::ensure_dashes;
///
/// assert_eq!(ensure_dashes(&["m"]), vec!["-m"]);
/// assert_eq!(ensure_dashes(&["message"]), vec!["--message"]);
/// assert_eq!(ensure_dashes(&["-m", "--message"]), vec!["-m", "--message"]);
/// ```
pub fn ensure_dashes<S: AsRef<str>>(opts: &[S]) -> Vec<String> {
    opts.iter()
        .map(|opt| {
            let opt = opt.as_ref();
            if opt.starts_with('-') {
                opt.to_string()
            } else if opt.chars().count() == 1 {
                format!("-{opt}")
            } else {
                format!("--{opt}")
            }
        })
        .collect()
}

/// Derive the storage name the external parser would use for a set of
/// option spellings.
///
/// The first long spelling wins; otherwise the first spelling of any
/// shape. Leading dashes are stripped and remaining dashes become
/// underscores.
pub fn derive_dest(option_strings: &[String]) -> String {
    let chosen = option_strings
        .iter()
        .find(|s| s.starts_with("--"))
        .or_else(|| option_strings.first());
    match chosen {
        Some(s) => s.trim_start_matches('-').replace('-', "_"),
        None => String::new(),
    }
}

/// Merge one parameter's layers into a final argument spec.
///
/// `doc_opts` and `doc_meta` come from the command's docstring (both may
/// be empty), `override_` is the user's per-parameter override, if any.
///
/// Required parameters (no default) become positionals named after the
/// parameter, with any docstring metavar discarded and no inference
/// applied. Optional parameters take their spellings from the docstring
/// (or the parameter name), run through [`ensure_dashes`], and receive
/// the inferred action/type plus the default and storage name.
///
/// An explicit annotation on the parameter replaces the inferred value
/// kind. The override is layered last: non-empty override spellings
/// replace the derived ones wholesale, and override metadata wins field
/// by field.
///
/// # Examples
///
/// ```
/// use argbind_core::{merge, ArgAction, Param, Value};
///
/// let param = Param::optional("verbose", Value::Bool(false));
/// let spec = merge(&param, None, &[], Default::default());
/// assert_eq!(spec.option_strings, vec!["--verbose"]);
/// assert_eq!(spec.meta.action, Some(ArgAction::StoreTrue));
/// assert_eq!(spec.meta.dest.as_deref(), Some("verbose"));
/// ```
pub fn merge(
    param: &Param,
    override_: Option<&ArgOverride>,
    doc_opts: &[String],
    doc_meta: ArgMeta,
) -> MergedArgSpec {
    let mut meta = doc_meta;
    let mut option_strings;

    match &param.default {
        None => {
            option_strings = vec![param.name.clone()];
            meta.metavar = None;
        }
        Some(default) => {
            if doc_opts.is_empty() {
                option_strings = ensure_dashes(std::slice::from_ref(&param.name));
            } else {
                option_strings = ensure_dashes(doc_opts);
            }
            meta.apply(action_by_type(default));
            meta.default = Some(default.clone());
            meta.dest = Some(param.name.clone());
        }
    }

    if param.annotation.is_some() {
        meta.value_type = param.annotation;
    }

    if let Some(override_) = override_ {
        if !override_.option_strings.is_empty() {
            option_strings = override_.option_strings.clone();
        }
        meta.apply(override_.meta.clone());
    }

    MergedArgSpec {
        option_strings,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArgAction, Value, ValueKind};

    #[test]
    fn test_ensure_dashes_single_char() {
        assert_eq!(ensure_dashes(&["m"]), vec!["-m"]);
    }

    #[test]
    fn test_ensure_dashes_word() {
        assert_eq!(ensure_dashes(&["message"]), vec!["--message"]);
    }

    #[test]
    fn test_ensure_dashes_passthrough() {
        assert_eq!(
            ensure_dashes(&["-m", "--message"]),
            vec!["-m", "--message"]
        );
    }

    #[test]
    fn test_derive_dest_prefers_long() {
        let opts = vec!["-n".to_string(), "--dry-run".to_string()];
        assert_eq!(derive_dest(&opts), "dry_run");
    }

    #[test]
    fn test_derive_dest_short_only() {
        let opts = vec!["-j".to_string()];
        assert_eq!(derive_dest(&opts), "j");
    }

    #[test]
    fn test_required_param_is_bare_positional() {
        let param = Param::required("path");
        let doc_meta = ArgMeta::default()
            .with_metavar("<path>")
            .with_help("the path");
        let spec = merge(&param, None, &[], doc_meta);
        assert_eq!(spec.option_strings, vec!["path"]);
        assert!(spec.is_positional());
        // Positionals carry no metavar and no inference.
        assert!(spec.meta.metavar.is_none());
        assert!(spec.meta.action.is_none());
        assert_eq!(spec.meta.help.as_deref(), Some("the path"));
    }

    #[test]
    fn test_optional_param_gets_default_and_dest() {
        let param = Param::optional("count", Value::Int(3));
        let spec = merge(&param, None, &[], ArgMeta::default());
        assert_eq!(spec.option_strings, vec!["--count"]);
        assert_eq!(spec.meta.default, Some(Value::Int(3)));
        assert_eq!(spec.meta.dest.as_deref(), Some("count"));
        assert_eq!(spec.meta.value_type, Some(ValueKind::Int));
    }

    #[test]
    fn test_docstring_spellings_are_dashed() {
        let param = Param::optional("jobs", Value::Int(1));
        let doc_opts = vec!["j".to_string(), "jobs".to_string()];
        let spec = merge(&param, None, &doc_opts, ArgMeta::default());
        assert_eq!(spec.option_strings, vec!["-j", "--jobs"]);
        assert_eq!(spec.meta.dest.as_deref(), Some("jobs"));
    }

    #[test]
    fn test_bool_default_true_becomes_store_false() {
        let param = Param::optional("color", Value::Bool(true));
        let spec = merge(&param, None, &[], ArgMeta::default());
        assert_eq!(spec.meta.action, Some(ArgAction::StoreFalse));
        assert_eq!(spec.meta.default, Some(Value::Bool(true)));
    }

    #[test]
    fn test_annotation_wins_over_inference() {
        let param = Param::optional("port", Value::Str("8080".into()))
            .with_annotation(ValueKind::Int);
        let spec = merge(&param, None, &[], ArgMeta::default());
        assert_eq!(spec.meta.value_type, Some(ValueKind::Int));
    }

    #[test]
    fn test_annotation_applies_to_positionals() {
        let param = Param::required("base").with_annotation(ValueKind::Int);
        let spec = merge(&param, None, &[], ArgMeta::default());
        assert_eq!(spec.meta.value_type, Some(ValueKind::Int));
    }

    #[test]
    fn test_override_spellings_replace_wholesale() {
        let param = Param::optional("message", Value::Str("".into()));
        let doc_opts = vec!["message".to_string()];
        let override_ = ArgOverride::options(&["-m", "--msg"]);
        let spec = merge(&param, Some(&override_), &doc_opts, ArgMeta::default());
        assert_eq!(spec.option_strings, vec!["-m", "--msg"]);
        // Storage name still tracks the parameter.
        assert_eq!(spec.meta.dest.as_deref(), Some("message"));
    }

    #[test]
    fn test_override_meta_wins_last() {
        let param = Param::optional("level", Value::Int(0)).with_annotation(ValueKind::Int);
        let override_ = ArgOverride::meta(
            ArgMeta::default()
                .with_type(ValueKind::Str)
                .with_help("override help"),
        );
        let doc_meta = ArgMeta::default().with_help("doc help");
        let spec = merge(&param, Some(&override_), &[], doc_meta);
        assert_eq!(spec.meta.value_type, Some(ValueKind::Str));
        assert_eq!(spec.meta.help.as_deref(), Some("override help"));
    }

    #[test]
    fn test_empty_override_spellings_keep_derived() {
        let param = Param::optional("verbose", Value::Bool(false));
        let override_ = ArgOverride::meta(ArgMeta::default().with_help("chatty"));
        let spec = merge(&param, Some(&override_), &[], ArgMeta::default());
        assert_eq!(spec.option_strings, vec!["--verbose"]);
        assert_eq!(spec.meta.help.as_deref(), Some("chatty"));
    }

    #[test]
    fn test_list_default_becomes_append() {
        let param = Param::optional("include", Value::List(vec![]));
        let spec = merge(&param, None, &[], ArgMeta::default());
        assert_eq!(spec.meta.action, Some(ArgAction::Append));
        assert_eq!(spec.meta.default, Some(Value::List(vec![])));
    }
}

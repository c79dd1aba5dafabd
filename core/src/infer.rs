//! Action and type inference from default values.
//!
//! Given an optional parameter's default, infer how the parser should
//! treat the corresponding option: boolean defaults become presence
//! flags, list defaults become repeatable options, scalar defaults pin
//! the coercion type.

use crate::types::{ArgAction, ArgMeta, Value, ValueKind};

/// Infer a metadata fragment from a default value.
///
/// The rules mirror what a caller would write by hand:
///
/// - `Bool(true)` → a flag that stores `false` when present
/// - `Bool(false)` → a flag that stores `true` when present
/// - `List(..)` → a repeatable option; the element kind is propagated
///   only when every element shares one
/// - other scalars → the matching coercion kind
/// - `None` → an empty fragment
///
/// # Examples
///
/// ```
/// use argbind_core::{action_by_type, ArgAction, Value, ValueKind};
///
/// let flag = action_by_type(&Value::Bool(false));
/// assert_eq!(flag.action, Some(ArgAction::StoreTrue));
///
/// let count = action_by_type(&Value::Int(1));
/// assert_eq!(count.value_type, Some(ValueKind::Int));
/// assert!(count.action.is_none());
/// ```
pub fn action_by_type(default: &Value) -> ArgMeta {
    let mut meta = ArgMeta::default();
    match default {
        Value::Bool(true) => meta.action = Some(ArgAction::StoreFalse),
        Value::Bool(false) => meta.action = Some(ArgAction::StoreTrue),
        Value::List(items) => {
            meta.action = Some(ArgAction::Append);
            meta.value_type = shared_element_kind(items);
        }
        other => meta.value_type = other.kind(),
    }
    meta
}

/// The single kind shared by every list element, if there is one.
///
/// An empty or mixed-kind list yields `None`, leaving element values as
/// raw strings.
fn shared_element_kind(items: &[Value]) -> Option<ValueKind> {
    let first = items.first()?.kind()?;
    for item in &items[1..] {
        if item.kind() != Some(first) {
            return None;
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_true_stores_false() {
        let meta = action_by_type(&Value::Bool(true));
        assert_eq!(meta.action, Some(ArgAction::StoreFalse));
        assert!(meta.value_type.is_none());
    }

    #[test]
    fn test_bool_false_stores_true() {
        let meta = action_by_type(&Value::Bool(false));
        assert_eq!(meta.action, Some(ArgAction::StoreTrue));
        assert!(meta.value_type.is_none());
    }

    #[test]
    fn test_empty_list_appends_untyped() {
        let meta = action_by_type(&Value::List(vec![]));
        assert_eq!(meta.action, Some(ArgAction::Append));
        assert!(meta.value_type.is_none());
    }

    #[test]
    fn test_mixed_list_appends_untyped() {
        let meta = action_by_type(&Value::List(vec![Value::Int(1), Value::Bool(false)]));
        assert_eq!(meta.action, Some(ArgAction::Append));
        assert!(meta.value_type.is_none());
    }

    #[test]
    fn test_uniform_list_propagates_element_kind() {
        let meta = action_by_type(&Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(meta.action, Some(ArgAction::Append));
        assert_eq!(meta.value_type, Some(ValueKind::Int));
    }

    #[test]
    fn test_none_yields_empty_fragment() {
        let meta = action_by_type(&Value::None);
        assert!(meta.action.is_none());
        assert!(meta.value_type.is_none());
    }

    #[test]
    fn test_scalars_pin_coercion_kind() {
        assert_eq!(
            action_by_type(&Value::Int(1)).value_type,
            Some(ValueKind::Int)
        );
        assert_eq!(
            action_by_type(&Value::Float(1.1)).value_type,
            Some(ValueKind::Float)
        );
        assert_eq!(
            action_by_type(&Value::Str("1".into())).value_type,
            Some(ValueKind::Str)
        );
    }
}

//! Core data model and merge engine for argbind.
//!
//! This crate holds the pieces of the binder that are independent of any
//! docstring dialect or external parser: the runtime [`Value`] type, the
//! parameter and signature model, action/type inference from defaults,
//! the layered [`merge`] algorithm that produces final argument specs,
//! and eager registration-time validation.
//!
//! # Examples
//!
//! ```
//! use argbind_core::{merge, ArgAction, Param, Value};
//!
//! // An optional boolean parameter becomes a presence flag.
//! let param = Param::optional("force", Value::Bool(false));
//! let spec = merge(&param, None, &[], Default::default());
//! assert_eq!(spec.option_strings, vec!["--force"]);
//! assert_eq!(spec.meta.action, Some(ArgAction::StoreTrue));
//! ```

mod infer;
mod merge;
mod types;
mod validate;

pub use infer::action_by_type;
pub use merge::{derive_dest, ensure_dashes, merge};
pub use types::{
    ArgAction, ArgMeta, ArgOverride, Completer, MergedArgSpec, Nargs, Param, Signature, Value,
    ValueKind,
};
pub use validate::{validate_option_strings, validate_signature, ConfigError, Result};

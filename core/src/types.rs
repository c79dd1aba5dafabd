//! Data model for command parameters and parser argument fragments.
//!
//! This module defines the runtime value type, the parameter model that
//! describes a command's call signature, and the argument-metadata
//! fragments that the merge engine combines into complete parser specs.
//! Everything except completion callbacks round-trips through [`serde`].

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::merge::derive_dest;

/// A dynamically typed runtime value.
///
/// Used both for parameter defaults and for the values handed to command
/// functions after a parse. `None` models an explicit "no value" default,
/// distinct from a parameter having no default at all.
///
/// # Examples
///
/// ```
/// use argbind_core::{Value, ValueKind};
///
/// assert_eq!(Value::Int(3).kind(), Some(ValueKind::Int));
/// assert_eq!(Value::None.kind(), None);
/// assert_eq!(Value::Str("hi".into()).as_str(), Some("hi"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// Explicit absence of a value.
    #[default]
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Heterogeneous list.
    List(Vec<Value>),
}

impl Value {
    /// The scalar kind of this value, if it has one.
    ///
    /// `None` and `List` have no scalar kind.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::None | Value::List(_) => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Str(_) => Some(ValueKind::Str),
        }
    }

    /// Borrow as `&str` if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as `i64` if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as `f64` if this is a `Float` or `Int`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Extract as `bool` if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as a slice if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Scalar value kinds an argument can coerce its raw text into.
///
/// Attached to an argument spec either by inference from a default value
/// or by an explicit annotation on the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Coerce to a signed integer.
    Int,
    /// Coerce to a floating point number.
    Float,
    /// Keep as a string.
    Str,
    /// Coerce to a boolean.
    Bool,
}

/// How the parser should store an argument when it appears on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgAction {
    /// Store the converted value (the default behavior).
    Store,
    /// Presence stores `true`.
    StoreTrue,
    /// Presence stores `false`.
    StoreFalse,
    /// Each occurrence appends its value to a list.
    Append,
}

/// Arity marker for arguments that consume a variable number of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nargs {
    /// Zero or more values.
    Star,
}

/// Completion callback invoked with the partial word under the cursor.
pub type Completer = Rc<dyn Fn(&str) -> Vec<String>>;

/// A partial bundle of parser argument metadata.
///
/// Every field is optional; `None` means "this fragment says nothing about
/// that field". Fragments from different sources (docstrings, inference,
/// user overrides) are layered with [`apply`](ArgMeta::apply), later
/// fragments winning field by field.
///
/// # Examples
///
/// ```
/// use argbind_core::{ArgMeta, ValueKind};
///
/// let mut meta = ArgMeta::default().with_help("verbosity level");
/// meta.apply(ArgMeta::default().with_type(ValueKind::Int));
/// assert_eq!(meta.value_type, Some(ValueKind::Int));
/// assert_eq!(meta.help.as_deref(), Some("verbosity level"));
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ArgMeta {
    /// Scalar kind raw values are coerced into.
    pub value_type: Option<ValueKind>,
    /// Placeholder shown in usage and help text.
    pub metavar: Option<String>,
    /// One-line help for this argument.
    pub help: Option<String>,
    /// Value used when the argument is absent.
    pub default: Option<Value>,
    /// Name the parsed value is stored under.
    pub dest: Option<String>,
    /// Store behavior on occurrence.
    pub action: Option<ArgAction>,
    /// Variable arity marker.
    pub nargs: Option<Nargs>,
    /// Shell completion callback (never serialized).
    #[serde(skip)]
    pub completer: Option<Completer>,
}

impl ArgMeta {
    /// Layer `overlay` on top of this fragment.
    ///
    /// Fields the overlay sets replace this fragment's fields; fields the
    /// overlay leaves as `None` are kept.
    pub fn apply(&mut self, overlay: ArgMeta) {
        if overlay.value_type.is_some() {
            self.value_type = overlay.value_type;
        }
        if overlay.metavar.is_some() {
            self.metavar = overlay.metavar;
        }
        if overlay.help.is_some() {
            self.help = overlay.help;
        }
        if overlay.default.is_some() {
            self.default = overlay.default;
        }
        if overlay.dest.is_some() {
            self.dest = overlay.dest;
        }
        if overlay.action.is_some() {
            self.action = overlay.action;
        }
        if overlay.nargs.is_some() {
            self.nargs = overlay.nargs;
        }
        if overlay.completer.is_some() {
            self.completer = overlay.completer;
        }
    }

    /// Set the value kind.
    pub fn with_type(mut self, kind: ValueKind) -> Self {
        self.value_type = Some(kind);
        self
    }

    /// Set the usage placeholder.
    pub fn with_metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Set the help line.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Set the absent-value default.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the storage name.
    pub fn with_dest(mut self, dest: &str) -> Self {
        self.dest = Some(dest.to_string());
        self
    }

    /// Set the store action.
    pub fn with_action(mut self, action: ArgAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the arity marker.
    pub fn with_nargs(mut self, nargs: Nargs) -> Self {
        self.nargs = Some(nargs);
        self
    }

    /// Attach a completion callback.
    pub fn with_completer(mut self, completer: impl Fn(&str) -> Vec<String> + 'static) -> Self {
        self.completer = Some(Rc::new(completer));
        self
    }
}

impl fmt::Debug for ArgMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgMeta")
            .field("value_type", &self.value_type)
            .field("metavar", &self.metavar)
            .field("help", &self.help)
            .field("default", &self.default)
            .field("dest", &self.dest)
            .field("action", &self.action)
            .field("nargs", &self.nargs)
            .field("completer", &self.completer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// One parameter in a command's call signature.
///
/// Parameters come in three shapes: required (no default, bound to a
/// positional argument), optional (has a default, bound to a dashed
/// option), and variadic (collects all leftover positional values).
///
/// # Examples
///
/// ```
/// use argbind_core::{Param, Value, ValueKind};
///
/// let base = Param::required("base").with_annotation(ValueKind::Int);
/// assert!(base.default.is_none());
///
/// let exp = Param::optional("exp", Value::Int(2));
/// assert_eq!(exp.default, Some(Value::Int(2)));
///
/// let rest = Param::variadic("files");
/// assert!(rest.variadic);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as spelled in the command function.
    pub name: String,
    /// Default value; `None` makes the parameter required.
    pub default: Option<Value>,
    /// Explicit type annotation; wins over inference from the default.
    pub annotation: Option<ValueKind>,
    /// Whether this parameter collects leftover positional values.
    pub variadic: bool,
}

impl Param {
    /// A required parameter, bound to a positional argument.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            annotation: None,
            variadic: false,
        }
    }

    /// An optional parameter with a default, bound to a dashed option.
    pub fn optional(name: &str, default: Value) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default),
            annotation: None,
            variadic: false,
        }
    }

    /// A variadic parameter collecting zero or more leftover values.
    pub fn variadic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            annotation: None,
            variadic: true,
        }
    }

    /// Attach an explicit type annotation.
    pub fn with_annotation(mut self, kind: ValueKind) -> Self {
        self.annotation = Some(kind);
        self
    }
}

/// A command's call signature: its parameters in declaration order.
///
/// Recorded once per command function so dispatch can walk parameters in
/// order when assembling the argument vector for a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Parameters in declaration order.
    pub params: Vec<Param>,
}

impl Signature {
    /// Build a signature from a parameter list.
    pub fn new(params: Vec<Param>) -> Self {
        Self { params }
    }

    /// Look up a parameter by name.
    pub fn find(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A user-supplied per-parameter override.
///
/// Non-empty `option_strings` replace the derived spellings wholesale;
/// `meta` fields are layered on last, after inference and annotations.
#[derive(Debug, Clone, Default)]
pub struct ArgOverride {
    /// Replacement option spellings, applied wholesale when non-empty.
    pub option_strings: Vec<String>,
    /// Metadata fragment layered on with highest precedence.
    pub meta: ArgMeta,
}

impl ArgOverride {
    /// An override that only replaces option spellings.
    pub fn options(strings: &[&str]) -> Self {
        Self {
            option_strings: strings.iter().map(|s| s.to_string()).collect(),
            meta: ArgMeta::default(),
        }
    }

    /// An override that only layers metadata.
    pub fn meta(meta: ArgMeta) -> Self {
        Self {
            option_strings: Vec::new(),
            meta,
        }
    }

    /// Layer metadata onto this override.
    pub fn with_meta(mut self, meta: ArgMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// The fully merged specification for one parser argument.
///
/// Produced by [`merge`](crate::merge::merge) from a parameter, its
/// docstring metadata, inference, and any user override. This is the
/// final form handed to the external parser.
#[derive(Debug, Clone, Default)]
pub struct MergedArgSpec {
    /// Option spellings, or a single bare name for positionals.
    pub option_strings: Vec<String>,
    /// Merged metadata.
    pub meta: ArgMeta,
}

impl MergedArgSpec {
    /// Whether this spec is a positional argument (single bare spelling).
    pub fn is_positional(&self) -> bool {
        self.option_strings.len() == 1 && !self.option_strings[0].starts_with('-')
    }

    /// The name the parsed value is stored under.
    ///
    /// Uses the explicit `dest` when set, otherwise derives one from the
    /// option spellings the way the external parser would.
    pub fn dest(&self) -> String {
        match &self.meta.dest {
            Some(dest) => dest.clone(),
            None => derive_dest(&self.option_strings),
        }
    }
}

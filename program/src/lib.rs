//! Declarative command binding over a standard argument parser.
//!
//! Commands are declared once, with their signature, docstring, and any
//! per-parameter overrides; the binder derives a complete parser from
//! them. Required parameters become positionals, optional parameters
//! become dashed options with inferred actions and types, docstrings in
//! any of three dialects supply option spellings and help text, and a
//! successful parse binds values back into a call in signature order.
//!
//! # Examples
//!
//! ```
//! use argbind::{CommandDef, Param, Program, Value, ValueKind};
//!
//! let mut program = Program::new("pow.py");
//! program
//!     .command(
//!         CommandDef::new("pow", |args| {
//!             let base = args[0].as_int().unwrap_or(0);
//!             let exp = args[1].as_int().unwrap_or(0) as u32;
//!             Value::Int(base.pow(exp))
//!         })
//!         .doc("Raise a number to a power.\n\n:param base: the base\n:param exp: the exponent")
//!         .param(Param::required("base").with_annotation(ValueKind::Int))
//!         .param(Param::optional("exp", Value::Int(2))),
//!     )
//!     .unwrap();
//!
//! assert_eq!(program.execute(&["pow", "3", "--exp", "4"]), Value::Int(81));
//! assert_eq!(program.execute(&["pow", "5"]), Value::Int(25));
//! ```

mod complete;
mod dispatch;
mod docstring;
mod program;
mod reflow;

pub use program::{CommandDef, CommandFn, Invocation, ParsedValues, Program, SubProgram};
pub use reflow::{reflow, reflow_text};

pub use argbind_core::{
    ArgAction, ArgMeta, ArgOverride, Completer, ConfigError, MergedArgSpec, Nargs, Param,
    Result, Signature, Value, ValueKind,
};

//! Parsing and dispatch over the external argument parser.
//!
//! The registered tree is lowered into a [`clap::Command`] fresh for
//! every parse; the parser stays a black box behind this module. After
//! a successful parse the matched command's signature is walked in
//! order to bind values into an [`Invocation`].

use std::rc::Rc;

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction as ClapAction, ArgMatches, Command};
use tracing::debug;

use argbind_core::{ArgAction, MergedArgSpec, Nargs, Signature, Value, ValueKind};

use crate::program::{CommandNode, Invocation, ParsedValues, Program, SubProgram};

impl Program {
    /// Parse an argument vector, returning the resolved invocation.
    ///
    /// `argv` excludes the program name. A line that never reaches a
    /// command (including an empty one) fails with "Too few arguments.";
    /// coercion failures, unknown options, and help/version requests
    /// surface as the parser's own errors.
    pub fn try_parse(&mut self, argv: &[&str]) -> Result<Invocation, clap::Error> {
        crate::complete::autocomplete(self);
        let mut cmd = build_command_tree(self);
        let line: Vec<String> = std::iter::once(self.name().to_string())
            .chain(argv.iter().map(|s| s.to_string()))
            .collect();
        let matches = cmd.clone().try_get_matches_from(line)?;

        let mut values = ParsedValues::default();
        let outcome = resolve(&self.root, &matches, &mut values).map(|(node, node_matches)| {
            let signature = self.signature_of(&node.func_name);
            bind(node, &signature, node_matches, &mut values)
        });
        match outcome {
            Some(invocation) => {
                self.last_values = Some(values);
                Ok(invocation)
            }
            None => Err(cmd.error(ErrorKind::MissingSubcommand, "Too few arguments.")),
        }
    }

    /// Parse an argument vector, exiting the process on failure.
    ///
    /// Follows the external parser's terminal conventions: errors print
    /// to stderr and exit non-zero, help and version print to stdout and
    /// exit zero.
    pub fn parse(&mut self, argv: &[&str]) -> Invocation {
        match self.try_parse(argv) {
            Ok(invocation) => invocation,
            Err(err) => err.exit(),
        }
    }

    /// Parse and immediately run the resolved command.
    pub fn execute(&mut self, argv: &[&str]) -> Value {
        let invocation = self.parse(argv);
        self.current_command = Some(invocation.name().to_string());
        invocation.call()
    }

    /// Non-exiting variant of [`execute`](Program::execute).
    pub fn try_execute(&mut self, argv: &[&str]) -> Result<Value, clap::Error> {
        let invocation = self.try_parse(argv)?;
        self.current_command = Some(invocation.name().to_string());
        Ok(invocation.call())
    }

    /// Run with the process's own arguments.
    pub fn run(&mut self) -> Value {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        let refs: Vec<&str> = argv.iter().map(String::as_str).collect();
        self.execute(&refs)
    }
}

/// Lower the whole registered tree into a parser command.
pub(crate) fn build_command_tree(program: &Program) -> Command {
    let mut cmd = build_level(&program.root);
    if let Some(version) = &program.version {
        // The parser's own -V flag is replaced with the conventional -v.
        cmd = cmd.version(version.clone()).disable_version_flag(true).arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ClapAction::Version)
                .help("Print version"),
        );
    }
    cmd
}

fn build_level(level: &SubProgram) -> Command {
    let mut cmd = Command::new(level.name.clone());
    if !level.help.is_empty() {
        cmd = cmd.about(level.help.clone());
    }
    for spec in &level.options {
        cmd = cmd.arg(build_arg(spec));
    }
    for child in &level.subprogs {
        cmd = cmd.subcommand(build_level(child));
    }
    for node in &level.commands {
        cmd = cmd.subcommand(build_command(node));
    }
    cmd
}

fn build_command(node: &CommandNode) -> Command {
    let mut cmd = Command::new(node.name.clone());
    if !node.help.is_empty() {
        cmd = cmd.about(node.help.clone());
    }
    if !node.description.is_empty() {
        cmd = cmd.long_about(node.description.clone());
    }
    if !node.aliases.is_empty() {
        cmd = cmd.visible_aliases(node.aliases.clone());
    }
    for spec in &node.args {
        cmd = cmd.arg(build_arg(spec));
    }
    cmd
}

/// Lower one merged spec into a parser argument.
///
/// Defaults are forwarded to the parser only for scalar-valued options;
/// list defaults and required positionals are handled at extraction
/// instead, keeping the parser's occurrence semantics simple.
fn build_arg(spec: &MergedArgSpec) -> Arg {
    let mut arg = Arg::new(spec.dest());
    let is_flag = matches!(
        spec.meta.action,
        Some(ArgAction::StoreTrue | ArgAction::StoreFalse)
    );

    if spec.is_positional() {
        arg = match spec.meta.nargs {
            Some(Nargs::Star) => arg.num_args(0..).required(false),
            None => arg.required(true),
        };
    } else {
        let mut first_short = true;
        let mut first_long = true;
        for spelling in &spec.option_strings {
            if let Some(rest) = spelling.strip_prefix("--") {
                if first_long {
                    arg = arg.long(rest.to_string());
                    first_long = false;
                } else {
                    arg = arg.visible_alias(rest.to_string());
                }
            } else if let Some(rest) = spelling.strip_prefix('-') {
                if let Some(c) = rest.chars().next() {
                    if first_short {
                        arg = arg.short(c);
                        first_short = false;
                    } else {
                        arg = arg.visible_short_alias(c);
                    }
                }
            }
        }
    }

    arg = match spec.meta.action {
        Some(ArgAction::StoreTrue) => arg.action(ClapAction::SetTrue),
        Some(ArgAction::StoreFalse) => arg.action(ClapAction::SetFalse),
        Some(ArgAction::Append) => arg.action(ClapAction::Append),
        Some(ArgAction::Store) | None => arg.action(ClapAction::Set),
    };

    if !is_flag {
        arg = match spec.meta.value_type {
            Some(ValueKind::Int) => arg.value_parser(value_parser!(i64)),
            Some(ValueKind::Float) => arg.value_parser(value_parser!(f64)),
            Some(ValueKind::Bool) => arg.value_parser(value_parser!(bool)),
            Some(ValueKind::Str) | None => arg.value_parser(value_parser!(String)),
        };
    }
    if let Some(help) = &spec.meta.help {
        arg = arg.help(help.clone());
    }
    if let Some(metavar) = &spec.meta.metavar {
        arg = arg.value_name(metavar.clone());
    }
    if !is_flag && !spec.is_positional() && spec.meta.action != Some(ArgAction::Append) {
        if let Some(default) = &spec.meta.default {
            if default.kind().is_some() {
                arg = arg.default_value(default.to_string());
            }
        }
    }
    arg
}

/// Walk the subcommand chain, collecting global option values at every
/// visited level, down to the matched command node.
fn resolve<'a>(
    root: &'a SubProgram,
    matches: &'a ArgMatches,
    values: &mut ParsedValues,
) -> Option<(&'a CommandNode, &'a ArgMatches)> {
    let mut level = root;
    let mut level_matches = matches;
    collect_options(level, level_matches, values);
    loop {
        let (name, sub_matches) = level_matches.subcommand()?;
        if let Some(child) = level.subprogs.iter().find(|s| s.name == name) {
            level = child;
            level_matches = sub_matches;
            collect_options(level, level_matches, values);
            continue;
        }
        let node = level.commands.iter().find(|c| c.answers_to(name))?;
        return Some((node, sub_matches));
    }
}

fn collect_options(level: &SubProgram, matches: &ArgMatches, values: &mut ParsedValues) {
    for spec in &level.options {
        let value = extract(matches, spec);
        values.insert(spec.dest(), value);
    }
}

/// Bind parsed values into an invocation, walking the signature in
/// declaration order. Specs sit at the same index as their parameter,
/// so a `dest` override cannot detach a parameter from its spec.
/// Variadic values are splatted into the argument vector.
fn bind(
    node: &CommandNode,
    signature: &Signature,
    matches: &ArgMatches,
    values: &mut ParsedValues,
) -> Invocation {
    let mut args = Vec::with_capacity(signature.params.len());
    for (param, spec) in signature.params.iter().zip(&node.args) {
        if param.variadic {
            let items = extract_list(matches, spec);
            args.extend(items.iter().cloned());
            values.insert(spec.dest(), Value::List(items));
            continue;
        }
        let value = extract(matches, spec);
        values.insert(spec.dest(), value.clone());
        args.push(value);
    }
    debug!(command = %node.func_name, args = args.len(), "bound invocation");
    Invocation {
        name: node.func_name.clone(),
        args,
        func: Rc::clone(&node.func),
    }
}

/// Pull one spec's value out of the matches, falling back to the merged
/// default when the argument never appeared.
fn extract(matches: &ArgMatches, spec: &MergedArgSpec) -> Value {
    let id = spec.dest();
    match spec.meta.action {
        Some(ArgAction::StoreTrue | ArgAction::StoreFalse) => {
            Value::Bool(matches.get_flag(&id))
        }
        Some(ArgAction::Append) => {
            if matches.contains_id(&id) {
                Value::List(extract_list(matches, spec))
            } else {
                spec.meta.default.clone().unwrap_or(Value::List(Vec::new()))
            }
        }
        Some(ArgAction::Store) | None => match extract_one(matches, &id, spec.meta.value_type) {
            Some(value) => value,
            None => spec.meta.default.clone().unwrap_or(Value::None),
        },
    }
}

fn extract_one(matches: &ArgMatches, id: &str, kind: Option<ValueKind>) -> Option<Value> {
    match kind {
        Some(ValueKind::Int) => matches.get_one::<i64>(id).map(|n| Value::Int(*n)),
        Some(ValueKind::Float) => matches.get_one::<f64>(id).map(|x| Value::Float(*x)),
        Some(ValueKind::Bool) => matches.get_one::<bool>(id).map(|b| Value::Bool(*b)),
        Some(ValueKind::Str) | None => {
            matches.get_one::<String>(id).map(|s| Value::Str(s.clone()))
        }
    }
}

fn extract_list(matches: &ArgMatches, spec: &MergedArgSpec) -> Vec<Value> {
    let id = spec.dest();
    match spec.meta.value_type {
        Some(ValueKind::Int) => matches
            .get_many::<i64>(&id)
            .map(|vals| vals.map(|n| Value::Int(*n)).collect()),
        Some(ValueKind::Float) => matches
            .get_many::<f64>(&id)
            .map(|vals| vals.map(|x| Value::Float(*x)).collect()),
        Some(ValueKind::Bool) => matches
            .get_many::<bool>(&id)
            .map(|vals| vals.map(|b| Value::Bool(*b)).collect()),
        Some(ValueKind::Str) | None => matches
            .get_many::<String>(&id)
            .map(|vals| vals.map(|s| Value::Str(s.clone())).collect()),
    }
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argbind_core::ArgMeta;

    #[test]
    fn test_build_arg_positional_required() {
        let spec = MergedArgSpec {
            option_strings: vec!["path".into()],
            meta: ArgMeta::default(),
        };
        let arg = build_arg(&spec);
        assert!(arg.is_required_set());
        assert!(arg.is_positional());
    }

    #[test]
    fn test_build_arg_variadic_not_required() {
        let spec = MergedArgSpec {
            option_strings: vec!["files".into()],
            meta: ArgMeta::default().with_nargs(Nargs::Star),
        };
        let arg = build_arg(&spec);
        assert!(!arg.is_required_set());
    }

    #[test]
    fn test_build_arg_option_spellings() {
        let spec = MergedArgSpec {
            option_strings: vec!["-m".into(), "--message".into()],
            meta: ArgMeta::default().with_dest("message"),
        };
        let arg = build_arg(&spec);
        assert_eq!(arg.get_short(), Some('m'));
        assert_eq!(arg.get_long(), Some("message"));
    }

    #[test]
    fn test_build_arg_extra_long_becomes_alias() {
        let spec = MergedArgSpec {
            option_strings: vec!["--msg".into(), "--message".into()],
            meta: ArgMeta::default().with_dest("msg"),
        };
        let arg = build_arg(&spec);
        assert_eq!(arg.get_long(), Some("msg"));
        let aliases = arg.get_visible_aliases().unwrap_or_default();
        assert_eq!(aliases, vec!["message"]);
    }

    #[test]
    fn test_build_arg_scalar_default_forwarded() {
        let spec = MergedArgSpec {
            option_strings: vec!["--count".into()],
            meta: ArgMeta::default()
                .with_type(ValueKind::Int)
                .with_dest("count")
                .with_default(Value::Int(3)),
        };
        let arg = build_arg(&spec);
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();
        assert_eq!(defaults, vec!["3"]);
    }

    #[test]
    fn test_build_arg_flag_default_not_forwarded() {
        let spec = MergedArgSpec {
            option_strings: vec!["--force".into()],
            meta: ArgMeta::default()
                .with_action(ArgAction::StoreTrue)
                .with_dest("force")
                .with_default(Value::Bool(false)),
        };
        let arg = build_arg(&spec);
        assert!(arg.get_default_values().is_empty());
    }
}

//! The command tree: programs, sub-programs, and registered commands.
//!
//! Registration is eager and infallible at parse time: every merge,
//! docstring normalization, and validation happens when a command is
//! added, so a successfully built tree always produces a well-formed
//! parser.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use argbind_core::{
    merge, validate_option_strings, validate_signature, ArgMeta, ArgOverride, ConfigError,
    MergedArgSpec, Nargs, Param, Result, Signature, Value,
};

use crate::docstring::normalize_docstring;
use crate::reflow;

/// Width long descriptions are reflowed to before help rendering.
const DESCRIPTION_WIDTH: usize = 78;

/// A command's body: takes the bound values in signature order.
pub type CommandFn = dyn Fn(&[Value]) -> Value;

/// Declarative definition of one command.
///
/// Collects everything the binder needs up front: the function, its
/// signature, its docstring, aliases, and per-parameter overrides. The
/// definition is consumed by [`SubProgram::command`], which is where
/// merging and validation happen.
///
/// # Examples
///
/// ```
/// use argbind::{CommandDef, Param, Value};
///
/// let def = CommandDef::new("greet", |args| {
///     Value::Str(format!("hello {}", args[0]))
/// })
/// .doc("Greet someone.\n\n:param name: who to greet")
/// .param(Param::required("name"));
/// assert_eq!(def.name(), "greet");
/// ```
pub struct CommandDef {
    name: String,
    doc: String,
    params: Vec<Param>,
    aliases: Vec<String>,
    overrides: HashMap<String, ArgOverride>,
    func: Rc<CommandFn>,
}

impl CommandDef {
    /// Start a definition from a name and body.
    pub fn new(name: &str, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            params: Vec::new(),
            aliases: Vec::new(),
            overrides: HashMap::new(),
            func: Rc::new(func),
        }
    }

    /// Attach the command's docstring.
    pub fn doc(mut self, text: &str) -> Self {
        self.doc = text.to_string();
        self
    }

    /// Append a parameter to the signature.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Register an additional invocable name.
    pub fn alias(mut self, name: &str) -> Self {
        self.aliases.push(name.to_string());
        self
    }

    /// Override a parameter's derived spellings and metadata.
    ///
    /// A later override for the same parameter replaces the earlier one.
    pub fn arg(mut self, param: &str, option_strings: &[&str], meta: ArgMeta) -> Self {
        self.overrides.insert(
            param.to_string(),
            ArgOverride::options(option_strings).with_meta(meta),
        );
        self
    }

    /// The command's natural name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// A fully registered command in the tree.
pub(crate) struct CommandNode {
    /// Name this node answers to under its parent.
    pub(crate) name: String,
    /// The defining function's natural name; keys the signature registry.
    pub(crate) func_name: String,
    /// One-line help from the docstring.
    pub(crate) help: String,
    /// Reflowed long description.
    pub(crate) description: String,
    /// Additional invocable names.
    pub(crate) aliases: Vec<String>,
    /// Merged argument specs in signature order.
    pub(crate) args: Vec<MergedArgSpec>,
    /// The command body.
    pub(crate) func: Rc<CommandFn>,
}

impl CommandNode {
    /// Whether `name` invokes this node.
    pub(crate) fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("func_name", &self.func_name)
            .field("args", &self.args.len())
            .finish_non_exhaustive()
    }
}

/// One level of the command tree.
///
/// Holds this level's global options, its commands, and nested
/// sub-programs. Names share a single namespace per level: an option
/// destination, a command name or alias, and a sub-program name may not
/// collide.
pub struct SubProgram {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) options: Vec<MergedArgSpec>,
    pub(crate) commands: Vec<CommandNode>,
    pub(crate) subprogs: Vec<SubProgram>,
    signatures: Rc<RefCell<HashMap<String, Signature>>>,
}

impl SubProgram {
    fn new(name: &str, help: &str, signatures: Rc<RefCell<HashMap<String, Signature>>>) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            options: Vec::new(),
            commands: Vec::new(),
            subprogs: Vec::new(),
            signatures,
        }
    }

    /// This level's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn name_taken(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.dest() == name)
            || self.commands.iter().any(|c| c.answers_to(name))
            || self.subprogs.iter().any(|s| s.name == name)
    }

    /// Register a global option at this level.
    ///
    /// Spellings must be dashed; the storage name comes from `meta.dest`
    /// or is derived from the spellings.
    pub fn option(&mut self, option_strings: &[&str], meta: ArgMeta) -> Result<()> {
        let option_strings: Vec<String> =
            option_strings.iter().map(|s| s.to_string()).collect();
        validate_option_strings(&option_strings)?;
        let mut spec = MergedArgSpec {
            option_strings,
            meta,
        };
        let dest = spec.dest();
        if self.name_taken(&dest) {
            return Err(ConfigError::DuplicateOptionDest(dest));
        }
        spec.meta.dest = Some(dest);
        debug!(level = %self.name, option = ?spec.option_strings, "registered global option");
        self.options.push(spec);
        Ok(())
    }

    /// Add a nested sub-program and return it for further registration.
    ///
    /// Without an explicit summary the help line reads `<name> subcommand`.
    pub fn add_subprog(&mut self, name: &str, help: Option<&str>) -> Result<&mut SubProgram> {
        if self.name_taken(name) {
            return Err(ConfigError::DuplicateSubprogram(name.to_string()));
        }
        let help = match help {
            Some(text) => text.to_string(),
            None => format!("{name} subcommand"),
        };
        let signatures = Rc::clone(&self.signatures);
        let index = self.subprogs.len();
        self.subprogs.push(SubProgram::new(name, &help, signatures));
        debug!(level = %self.name, subprog = name, "registered sub-program");
        Ok(&mut self.subprogs[index])
    }

    /// Register a command under its natural name.
    pub fn command(&mut self, def: CommandDef) -> Result<()> {
        let name = def.name.clone();
        self.command_named(&name, def)
    }

    /// Register a command under an explicit name.
    ///
    /// The same definition can be registered under several names; its
    /// signature is recorded once, keyed by the natural name.
    pub fn command_named(&mut self, name: &str, def: CommandDef) -> Result<()> {
        if self.name_taken(name) {
            return Err(ConfigError::DuplicateCommand(name.to_string()));
        }
        for alias in &def.aliases {
            if self.name_taken(alias) {
                return Err(ConfigError::DuplicateCommand(alias.clone()));
            }
        }
        let signature = Signature::new(def.params.clone());
        validate_signature(name, &signature)?;
        for param in def.overrides.keys() {
            let known = signature.find(param).is_some_and(|p| !p.variadic);
            if !known {
                return Err(ConfigError::UnknownOverrideParam {
                    command: name.to_string(),
                    param: param.clone(),
                });
            }
        }

        let doc = normalize_docstring(&def.doc);
        self.signatures
            .borrow_mut()
            .entry(def.name.clone())
            .or_insert_with(|| signature.clone());

        let mut args = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            if param.variadic {
                args.push(variadic_spec(param, &doc.params));
                continue;
            }
            let (doc_opts, doc_meta) = doc
                .params
                .get(&param.name)
                .cloned()
                .unwrap_or((Vec::new(), ArgMeta::default()));
            args.push(merge(
                param,
                def.overrides.get(&param.name),
                &doc_opts,
                doc_meta,
            ));
        }
        debug!(level = %self.name, command = name, args = args.len(), "registered command");

        self.commands.push(CommandNode {
            name: name.to_string(),
            func_name: def.name,
            help: doc.help.clone(),
            description: reflow::reflow_text(&doc.description, DESCRIPTION_WIDTH),
            aliases: def.aliases,
            args,
            func: def.func,
        });
        Ok(())
    }
}

impl fmt::Debug for SubProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubProgram")
            .field("name", &self.name)
            .field("options", &self.options.len())
            .field("commands", &self.commands)
            .field("subprogs", &self.subprogs)
            .finish()
    }
}

/// Build the spec for a variadic parameter.
///
/// Variadic positionals take no merging and no inference; docstring
/// metadata (help, documented default) is layered on top of the arity
/// marker.
fn variadic_spec(
    param: &Param,
    doc_params: &HashMap<String, (Vec<String>, ArgMeta)>,
) -> MergedArgSpec {
    let mut meta = ArgMeta::default().with_nargs(Nargs::Star);
    if let Some((_, doc_meta)) = doc_params.get(&param.name) {
        meta.apply(doc_meta.clone());
    }
    MergedArgSpec {
        option_strings: vec![param.name.clone()],
        meta,
    }
}

/// The values stored by the most recent parse, keyed by destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValues {
    values: HashMap<String, Value>,
}

impl ParsedValues {
    /// Look up a stored value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterate over stored names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }
}

/// A resolved command call, ready to run.
///
/// Produced by a successful parse; holds the bound argument values in
/// signature order and the command body.
pub struct Invocation {
    pub(crate) name: String,
    pub(crate) args: Vec<Value>,
    pub(crate) func: Rc<CommandFn>,
}

impl Invocation {
    /// The resolved command function's natural name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound argument values in signature order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Run the command body.
    pub fn call(&self) -> Value {
        (self.func)(&self.args)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// The root of a command-line program.
///
/// Owns the command tree and the per-program signature registry, and
/// remembers the outcome of the most recent parse.
///
/// # Examples
///
/// ```
/// use argbind::{CommandDef, Param, Program, Value};
///
/// let mut program = Program::new("calc");
/// program
///     .command(
///         CommandDef::new("double", |args| {
///             Value::Int(args[0].as_int().unwrap_or(0) * 2)
///         })
///         .param(Param::required("n").with_annotation(argbind::ValueKind::Int)),
///     )
///     .unwrap();
///
/// let result = program.execute(&["double", "21"]);
/// assert_eq!(result, Value::Int(42));
/// ```
pub struct Program {
    pub(crate) root: SubProgram,
    pub(crate) version: Option<String>,
    pub(crate) current_command: Option<String>,
    pub(crate) last_values: Option<ParsedValues>,
}

impl Program {
    /// Create a program with the given invocation name.
    pub fn new(name: &str) -> Self {
        let signatures = Rc::new(RefCell::new(HashMap::new()));
        Self {
            root: SubProgram::new(name, "", signatures),
            version: None,
            current_command: None,
            last_values: None,
        }
    }

    /// Create a program that also answers to `-v`/`--version`.
    pub fn with_version(name: &str, version: &str) -> Self {
        let mut program = Self::new(name);
        program.version = Some(version.to_string());
        program
    }

    /// The program's invocation name.
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Register a command at the root level.
    pub fn command(&mut self, def: CommandDef) -> Result<()> {
        self.root.command(def)
    }

    /// Register a command at the root level under an explicit name.
    pub fn command_named(&mut self, name: &str, def: CommandDef) -> Result<()> {
        self.root.command_named(name, def)
    }

    /// Register a root-level global option.
    pub fn option(&mut self, option_strings: &[&str], meta: ArgMeta) -> Result<()> {
        self.root.option(option_strings, meta)
    }

    /// Add a root-level sub-program.
    pub fn add_subprog(&mut self, name: &str, help: Option<&str>) -> Result<&mut SubProgram> {
        self.root.add_subprog(name, help)
    }

    /// The natural name of the command most recently executed.
    pub fn current_command(&self) -> Option<&str> {
        self.current_command.as_deref()
    }

    /// The values stored by the most recent successful parse.
    pub fn last_parse(&self) -> Option<&ParsedValues> {
        self.last_values.as_ref()
    }

    pub(crate) fn signature_of(&self, func_name: &str) -> Signature {
        self.root
            .signatures
            .borrow()
            .get(func_name)
            .cloned()
            .unwrap_or_default()
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("root", &self.root)
            .field("version", &self.version)
            .field("current_command", &self.current_command)
            .finish_non_exhaustive()
    }
}

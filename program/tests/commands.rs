//! End-to-end tests: register commands, parse argument vectors, run them.

use argbind::{ArgMeta, CommandDef, Param, Program, Value, ValueKind};

fn repeat_program() -> Program {
    let mut program = Program::with_version("example.py", "1.0.10");
    program
        .command(
            CommandDef::new("simple_numpy_docstring", |args| {
                let times: usize = args[0].as_str().and_then(|s| s.parse().ok()).unwrap_or(0);
                let text = args[1].as_str().unwrap_or("");
                Value::Str(text.repeat(times))
            })
            .doc(
                "One line summary.\n\n\
                 Extended description.\n\n\
                 Parameters\n\
                 ----------\n\
                 arg1 : int\n\
                 \x20   Description of `arg1`\n\
                 arg2 : str\n\
                 \x20   Description of `arg2`",
            )
            .param(Param::required("arg1"))
            .param(Param::optional("arg2", Value::Str("string".into()))),
        )
        .unwrap();
    program
}

#[test]
fn test_numpy_documented_command_end_to_end() {
    let mut program = repeat_program();
    let result = program.execute(&["simple_numpy_docstring", "2", "--arg2=test"]);
    assert_eq!(result, Value::Str("testtest".into()));
    assert_eq!(program.current_command(), Some("simple_numpy_docstring"));
}

#[test]
fn test_positional_without_annotation_stays_text() {
    let mut program = repeat_program();
    let invocation = program
        .try_parse(&["simple_numpy_docstring", "2"])
        .unwrap();
    // No inference runs for required parameters; "2" is not coerced.
    assert_eq!(invocation.args()[0], Value::Str("2".into()));
    assert_eq!(invocation.args()[1], Value::Str("string".into()));
}

#[test]
fn test_annotated_positional_coerces() {
    let mut program = Program::new("pow.py");
    program
        .command(
            CommandDef::new("pow", |args| {
                let base = args[0].as_int().unwrap_or(0);
                let exp = args[1].as_int().unwrap_or(0) as u32;
                Value::Int(base.pow(exp))
            })
            .param(Param::required("base").with_annotation(ValueKind::Int))
            .param(Param::optional("exp", Value::Int(2))),
        )
        .unwrap();

    assert_eq!(program.execute(&["pow", "3", "--exp", "4"]), Value::Int(81));
    assert_eq!(program.execute(&["pow", "9"]), Value::Int(81));
}

#[test]
fn test_bad_int_is_a_parse_error() {
    let mut program = Program::new("pow.py");
    program
        .command(
            CommandDef::new("pow", |args| args[0].clone())
                .param(Param::required("base").with_annotation(ValueKind::Int)),
        )
        .unwrap();
    let err = program.try_parse(&["pow", "seven"]).unwrap_err();
    assert!(matches!(
        err.kind(),
        clap::error::ErrorKind::ValueValidation | clap::error::ErrorKind::InvalidValue
    ));
}

#[test]
fn test_no_command_is_too_few_arguments() {
    let mut program = repeat_program();
    let err = program.try_parse(&[]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingSubcommand);
    assert!(err.to_string().contains("Too few arguments."));
}

#[test]
fn test_bool_default_false_flag() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("push", |args| args[0].clone())
                .param(Param::optional("force", Value::Bool(false))),
        )
        .unwrap();
    assert_eq!(program.execute(&["push"]), Value::Bool(false));
    assert_eq!(program.execute(&["push", "--force"]), Value::Bool(true));
}

#[test]
fn test_bool_default_true_flag_flips_down() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("build", |args| args[0].clone())
                .param(Param::optional("color", Value::Bool(true))),
        )
        .unwrap();
    assert_eq!(program.execute(&["build"]), Value::Bool(true));
    assert_eq!(program.execute(&["build", "--color"]), Value::Bool(false));
}

#[test]
fn test_list_default_collects_repeats() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("scan", |args| args[0].clone())
                .param(Param::optional("include", Value::List(vec![]))),
        )
        .unwrap();
    assert_eq!(program.execute(&["scan"]), Value::List(vec![]));
    let result = program.execute(&["scan", "--include", "a", "--include", "b"]);
    assert_eq!(
        result,
        Value::List(vec![Value::Str("a".into()), Value::Str("b".into())])
    );
}

#[test]
fn test_typed_list_coerces_elements() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("sum", |args| {
                let total = args[0]
                    .as_list()
                    .unwrap_or(&[])
                    .iter()
                    .filter_map(Value::as_int)
                    .sum();
                Value::Int(total)
            })
            .param(Param::optional("n", Value::List(vec![Value::Int(0)]))),
        )
        .unwrap();
    assert_eq!(program.execute(&["sum", "-n", "2", "-n", "3"]), Value::Int(5));
}

#[test]
fn test_variadic_values_are_splatted() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("join", |args| {
                let joined: Vec<&str> = args.iter().filter_map(Value::as_str).collect();
                Value::Str(joined.join("+"))
            })
            .param(Param::variadic("words")),
        )
        .unwrap();
    assert_eq!(
        program.execute(&["join", "a", "b", "c"]),
        Value::Str("a+b+c".into())
    );
    assert_eq!(program.execute(&["join"]), Value::Str("".into()));
}

#[test]
fn test_docstring_spellings_drive_options() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("make", |args| args[0].clone())
                .doc("Build targets.\n\n:param -j: Number of jobs")
                .param(Param::optional("j", Value::Int(1))),
        )
        .unwrap();
    assert_eq!(program.execute(&["make", "-j", "8"]), Value::Int(8));
    assert_eq!(program.execute(&["make"]), Value::Int(1));
}

#[test]
fn test_dashed_docstring_name_maps_to_underscored_param() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("greet", |args| args[0].clone())
                .doc("Say hi.\n\n:param a-param: Dashed spelling")
                .param(Param::optional("a_param", Value::Str("hello".into()))),
        )
        .unwrap();
    assert_eq!(
        program.execute(&["greet", "--a-param", "hola"]),
        Value::Str("hola".into())
    );
}

#[test]
fn test_override_replaces_spellings() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("commit", |args| args[0].clone())
                .param(Param::optional("message", Value::Str("".into())))
                .arg("message", &["-m", "--msg"], ArgMeta::default()),
        )
        .unwrap();
    assert_eq!(
        program.execute(&["commit", "-m", "fix"]),
        Value::Str("fix".into())
    );
    assert_eq!(
        program.execute(&["commit", "--msg", "feat"]),
        Value::Str("feat".into())
    );
}

#[test]
fn test_dest_override_still_binds_parameter() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("save", |args| args[0].clone())
                .param(Param::optional("output", Value::Str("".into())))
                .arg("output", &[], ArgMeta::default().with_dest("out")),
        )
        .unwrap();
    let invocation = program.try_parse(&["save", "--output", "x"]).unwrap();
    // The renamed storage slot still feeds the parameter's position.
    assert_eq!(invocation.args().len(), 1);
    assert_eq!(invocation.args()[0], Value::Str("x".into()));
    let values = program.last_parse().unwrap();
    assert_eq!(values.get("out"), Some(&Value::Str("x".into())));
}

#[test]
fn test_alias_invokes_same_command() {
    let mut program = Program::new("app");
    program
        .command(
            CommandDef::new("remove", |args| args[0].clone())
                .alias("rm")
                .param(Param::required("path")),
        )
        .unwrap();
    assert_eq!(
        program.execute(&["rm", "target"]),
        Value::Str("target".into())
    );
    assert_eq!(program.current_command(), Some("remove"));
}

#[test]
fn test_subprogram_commands_and_global_options() {
    let mut program = Program::new("git");
    program.option(&["--verbose"], ArgMeta::default().with_action(argbind::ArgAction::StoreTrue)).unwrap();
    let stash = program.add_subprog("stash", Some("Stash changes")).unwrap();
    stash
        .command(
            CommandDef::new("save", |args| args[0].clone())
                .param(Param::optional("message", Value::Str("".into()))),
        )
        .unwrap();

    let result = program.execute(&["--verbose", "stash", "save", "--message", "wip"]);
    assert_eq!(result, Value::Str("wip".into()));
    assert_eq!(program.current_command(), Some("save"));

    let values = program.last_parse().unwrap();
    assert_eq!(values.get("verbose"), Some(&Value::Bool(true)));
    assert_eq!(values.get("message"), Some(&Value::Str("wip".into())));
}

#[test]
fn test_subprogram_without_summary_gets_default_help() {
    let mut program = Program::new("git");
    let stash = program.add_subprog("stash", None).unwrap();
    stash.command(CommandDef::new("list", |_| Value::None)).unwrap();
    let err = program.try_parse(&["--help"]).unwrap_err();
    assert!(err.to_string().contains("stash subcommand"));
}

#[test]
fn test_last_parse_replaced_each_run() {
    let mut program = repeat_program();
    program.execute(&["simple_numpy_docstring", "1", "--arg2=x"]);
    program.execute(&["simple_numpy_docstring", "1"]);
    let values = program.last_parse().unwrap();
    assert_eq!(values.get("arg2"), Some(&Value::Str("string".into())));
}

#[test]
fn test_three_dialect_commands_agree() {
    let rest_doc = "Add two numbers.\n\n:param a: The first number.\n:param b: The second number.";
    let numpy_doc = "Add two numbers.\n\nParameters\n----------\na : int\n    The first number.\nb : int\n    The second number.";
    let google_doc = "Add two numbers.\n\nArgs:\n    a (int): The first number.\n    b (int): The second number.";

    for (name, doc) in [
        ("rest_add", rest_doc),
        ("numpy_add", numpy_doc),
        ("google_add", google_doc),
    ] {
        let mut program = Program::new("calc");
        program
            .command(
                CommandDef::new(name, |args| {
                    Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0))
                })
                .doc(doc)
                .param(Param::required("a").with_annotation(ValueKind::Int))
                .param(Param::required("b").with_annotation(ValueKind::Int)),
            )
            .unwrap();
        assert_eq!(program.execute(&[name, "2", "3"]), Value::Int(5));
    }
}

#[test]
fn test_duplicate_registration_surfaces_config_error() {
    fn register(program: &mut Program) -> argbind::Result<()> {
        program.command(CommandDef::new("go", |_| Value::None))
    }
    let mut program = Program::new("app");
    register(&mut program).unwrap();
    assert!(matches!(
        register(&mut program),
        Err(argbind::ConfigError::DuplicateCommand(_))
    ));
}

#[test]
fn test_help_request_is_an_error_not_a_panic() {
    let mut program = repeat_program();
    let err = program.try_parse(&["--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    let rendered = err.to_string();
    assert!(rendered.contains("simple_numpy_docstring"));
    assert!(rendered.contains("One line summary."));
}

#[test]
fn test_version_flag() {
    let mut program = repeat_program();
    let err = program.try_parse(&["--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    assert!(err.to_string().contains("1.0.10"));
}

#[test]
fn test_command_help_shows_parameter_docs() {
    let mut program = repeat_program();
    let err = program
        .try_parse(&["simple_numpy_docstring", "--help"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    let rendered = err.to_string();
    assert!(rendered.contains("Description of `arg2`"));
}

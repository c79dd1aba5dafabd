//! A toy slice of the git porcelain.
//!
//! Demonstrates sub-programs, global options, aliases, overrides with
//! short spellings, and a completion callback for branch names.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example git -- commit -m "message"
//! cargo run -p argbind-demos --example git -- stash save --message wip
//! ```

use argbind::{ArgAction, ArgMeta, CommandDef, Param, Program, Value};

fn main() {
    let mut program = Program::with_version("git", "0.3.0");
    program
        .option(
            &["--verbose"],
            ArgMeta::default()
                .with_action(ArgAction::StoreTrue)
                .with_help("Explain what is being done"),
        )
        .expect("git registration is static");

    program
        .command(
            CommandDef::new("commit", |args| {
                let message = args[0].as_str().unwrap_or("");
                let all = args[1].as_bool().unwrap_or(false);
                println!("commit (all: {all}): {message}");
                Value::None
            })
            .doc(
                "Record changes to the repository.\n\n\
                 Stores the current contents of the index in a new commit,\n\
                 along with a log message describing the changes.\n\n\
                 :param message: use the given commit message\n\
                 :param all: automatically stage modified files",
            )
            .param(Param::optional("message", Value::Str("".into())))
            .param(Param::optional("all", Value::Bool(false)))
            .arg("message", &["-m", "--message"], ArgMeta::default())
            .arg(
                "all",
                &["-a", "--all"],
                ArgMeta::default().with_action(ArgAction::StoreTrue),
            ),
        )
        .expect("git registration is static");

    program
        .command(
            CommandDef::new("checkout", |args| {
                let branch = args[0].as_str().unwrap_or("");
                println!("switched to '{branch}'");
                Value::None
            })
            .doc("Switch branches.\n\n:param branch: branch to switch to")
            .alias("co")
            .param(Param::optional("branch", Value::Str("main".into())))
            .arg(
                "branch",
                &["-b", "--branch"],
                ArgMeta::default().with_completer(|word| {
                    ["main", "develop", "release"]
                        .iter()
                        .filter(|b| b.starts_with(word))
                        .map(|b| b.to_string())
                        .collect()
                }),
            ),
        )
        .expect("git registration is static");

    let stash = program
        .add_subprog("stash", Some("Stash away changes"))
        .expect("git registration is static");
    stash
        .command(
            CommandDef::new("save", |args| {
                let message = args[0].as_str().unwrap_or("");
                println!("stashed: {message}");
                Value::None
            })
            .doc("Save local modifications.\n\n:param message: stash description")
            .param(Param::optional("message", Value::Str("".into()))),
        )
        .expect("git registration is static");
    stash
        .command(
            CommandDef::new("list", |_| {
                println!("stash@{{0}}: WIP");
                Value::None
            })
            .doc("List stash entries."),
        )
        .expect("git registration is static");

    program.run();
}

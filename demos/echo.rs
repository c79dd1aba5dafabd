//! Minimal echo demo.
//!
//! One command, one required positional, two boolean flags inferred
//! from their defaults.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example echo -- echo "hello world" --capitalize
//! ```

use argbind::{CommandDef, Param, Program, Value};

fn main() {
    let mut program = Program::with_version("echo", "1.0.0");
    program
        .command(
            CommandDef::new("echo", |args| {
                let text = args[0].as_str().unwrap_or("");
                let capitalize = args[1].as_bool().unwrap_or(false);
                let trailing_newline = args[2].as_bool().unwrap_or(true);
                let rendered = if capitalize {
                    text.to_uppercase()
                } else {
                    text.to_string()
                };
                if trailing_newline {
                    println!("{rendered}");
                } else {
                    print!("{rendered}");
                }
                Value::None
            })
            .doc(
                "Print text back.\n\n\
                 :param text: the text to print\n\
                 :param capitalize: print in upper case\n\
                 :param trailing-newline: end output with a newline",
            )
            .param(Param::required("text"))
            .param(Param::optional("capitalize", Value::Bool(false)))
            .param(Param::optional("trailing_newline", Value::Bool(true))),
        )
        .expect("echo registration is static");

    program.run();
}

//! GNU-flavored demo with a long, reflowed description.
//!
//! The command's long description is written with paragraphs and a list;
//! `gnu_find find --help` shows it rewrapped with the list structure
//! preserved.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example gnu_find -- find . --name "*.rs" --maxdepth 2
//! ```

use argbind::{CommandDef, Param, Program, Value, ValueKind};

fn main() {
    let mut program = Program::new("gnu_find");
    program
        .command(
            CommandDef::new("find", |args| {
                let path = args[0].as_str().unwrap_or(".");
                let name = args[1].as_str().unwrap_or("*");
                let maxdepth = args[2].as_int().unwrap_or(-1);
                println!("searching {path} for {name} (maxdepth {maxdepth})");
                Value::None
            })
            .doc(
                "Search for files in a directory hierarchy.\n\
                 \n\
                 This demo evaluates a small subset of the real tool's tests. It\n\
                 walks the given starting point and prints matches. Supported\n\
                 tests:\n\
                 \n\
                 * name matching with shell patterns\n\
                 * a maximum descent depth\n\
                 \n\
                 :param path: starting point of the search\n\
                 :param name: match files against a shell pattern\n\
                 :param int maxdepth: descend at most this many levels",
            )
            .param(Param::required("path"))
            .param(Param::optional("name", Value::Str("*".into())))
            .param(Param::optional("maxdepth", Value::Int(-1)).with_annotation(ValueKind::Int)),
        )
        .expect("find registration is static");

    program.run();
}

//! Power calculator demo.
//!
//! Shows type annotations: the positional is coerced to an integer by
//! the parser, so `pow seven` fails before the command body runs.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example pow -- pow 3 --exp 4
//! ```

use argbind::{CommandDef, Param, Program, Value, ValueKind};

fn main() {
    let mut program = Program::new("pow");
    program
        .command(
            CommandDef::new("pow", |args| {
                let base = args[0].as_int().unwrap_or(0);
                let exp = args[1].as_int().unwrap_or(0) as u32;
                let result = base.pow(exp);
                println!("{result}");
                Value::Int(result)
            })
            .doc(
                "Raise a number to a power.\n\n\
                 :param base: the number to raise\n\
                 :param exp: the exponent",
            )
            .param(Param::required("base").with_annotation(ValueKind::Int))
            .param(Param::optional("exp", Value::Int(2))),
        )
        .expect("pow registration is static");

    program.run();
}

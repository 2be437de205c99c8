use std::{fs, io::Write};

use clap::Parser;
use trio::{Context, Function, NativeFunction, run};

/// trio is a small embeddable scripting language; this binary runs a single
/// script.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells trio to treat CONTENTS as a file path instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Name used for the script in error messages. Defaults to the file path,
    /// or `script` for inline scripts.
    #[arg(short, long)]
    name: Option<String>,

    /// Maximum nesting of function calls.
    #[arg(long, default_value_t = trio::DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Prints the value of a top-level `return` after the script finishes.
    #[arg(short, long)]
    print_result: bool,

    contents: String,
}

fn print_native() -> NativeFunction {
    NativeFunction::new("print", &[], true, |activation| {
        let line = activation.variadic_arguments()
                             .iter()
                             .map(ToString::to_string)
                             .collect::<Vec<_>>()
                             .join(" ");
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}").map_err(|e| activation.error(e.to_string()))?;
        Ok(None)
    })
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let (script, name) = if args.file {
        let script = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                         eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                   &args.contents);
                         std::process::exit(1);
                     });
        (script, args.name.unwrap_or_else(|| args.contents.clone()))
    } else {
        (args.contents, args.name.unwrap_or_else(|| "script".to_string()))
    };

    let mut context = Context::new().with_max_call_depth(args.max_call_depth);
    if let Err(e) = context.define_function(Function::native(print_native())) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&script, &name, &mut context) {
        Ok(value) => {
            if args.print_result
               && let Some(v) = value
            {
                println!("{v}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

use std::{
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::Path,
    process::exit,
    time::Instant,
};

use lox::{
    errors::errors::Error, init_tracing, lexer::lexer::tokenize, lexer::tokens::Token,
    render_error,
};
use tracing::info;

// sysexits.h
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_NOINPUT: i32 = 66;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            if let Err(err) = run_prompt() {
                eprintln!("Failed to read input: {}", err);
                exit(EX_NOINPUT);
            }
        }
        [path] => run_file(path),
        _ => {
            println!("Usage: lox [script]");
            exit(EX_USAGE);
        }
    }
}

fn run_file(file_path: &str) {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            exit(EX_NOINPUT);
        }
    };

    let had_error = run(&source, Some(file_name));

    if had_error {
        exit(EX_DATAERR);
    }
}

fn run_prompt() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };

        // An error in one line does not end the session
        run(&line?, None);
    }
}

/// Scans `source`, prints its tokens, then reports diagnostics. Returns
/// whether any diagnostic was produced.
fn run(source: &str, file: Option<String>) -> bool {
    let start = Instant::now();
    let (tokens, errors) = tokenize(source, file);
    info!("Tokenized in {:?}", start.elapsed());

    print_tokens(&tokens);
    report_errors(&errors, source);

    !errors.is_empty()
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!("{}", token);
    }
}

fn report_errors(errors: &[Error], source: &str) {
    for error in errors {
        eprintln!("{}", error);
        eprint!("{}", render_error(error, source));
    }
}

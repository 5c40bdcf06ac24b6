use clap::{Arg, Command};
use monkey::error::MonkeyError;
use monkey::object::Object;
use monkey::{repl, runner};
use std::fs;
use std::process::ExitCode;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=monkey=trace`. Safe to call more than once.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();

    let matches = Command::new("monkey")
        .about("Tree-walking interpreter for the Monkey language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream instead of evaluating")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let dump_tokens = matches.get_flag("tokens");

    let outcome = match matches.get_one::<String>("file") {
        Some(path) if !matches.get_flag("interactive") => run_file(path, dump_tokens),
        _ => repl::start(dump_tokens).map_err(MonkeyError::from),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        // Diagnostics have already been printed
        Err(MonkeyError::Parse(_)) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &str, dump_tokens: bool) -> Result<(), MonkeyError> {
    let source = fs::read_to_string(path).map_err(|source| MonkeyError::ReadFile {
        path: path.to_string(),
        source,
    })?;

    if dump_tokens {
        repl::print_tokens(&source);
        return Ok(());
    }

    match runner::run(&source, Some(path))? {
        Object::Error(message) => Err(MonkeyError::Runtime(message)),
        _ => Ok(()),
    }
}

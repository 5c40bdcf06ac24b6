use crate::ast::Statement;
use crate::environment::{Env, Environment};
use crate::error::report_all;
use crate::evaluator::eval_program;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::parser::parse;
use std::io::{self, Write};

const PROMPT: &str = ">> ";

/// Interactive loop. One global environment lives for the whole session so
/// bindings carry over between lines.
pub fn start(dump_tokens: bool) -> io::Result<()> {
    println!("Type 'exit' or press Ctrl+D to quit");

    let env = Environment::new();
    let stdin = io::stdin();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF reached (Ctrl+D or piped input ended)
            println!();
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            return Ok(());
        }

        if dump_tokens {
            print_tokens(line);
        } else {
            run_repl_command(line, &env)?;
        }
    }
}

/// Token dump format shared with the CLI's `--tokens` mode.
pub fn format_token(token: &Token) -> String {
    format!("{{Type:{} Literal:{}}}", token.kind, token.literal)
}

/// Print every token of `source` up to, but not including, EOF.
pub fn print_tokens(source: &str) {
    for token in tokenize(source) {
        if token.kind == TokenKind::Eof {
            break;
        }
        println!("{}", format_token(&token));
    }
}

fn run_repl_command(source: &str, env: &Env) -> io::Result<()> {
    let (program, errors) = parse(source);
    if !errors.is_empty() {
        if let Err(error) = report_all(&errors, source, None) {
            eprintln!("{}", error);
        }
        return Ok(());
    }

    let result = eval_program(&program, env);

    // A trailing `let` has no value worth echoing
    if matches!(program.statements.last(), Some(Statement::Let { .. })) && !result.is_error() {
        return Ok(());
    }

    println!("{}", result.inspect());
    Ok(())
}

use crate::environment::{Env, Environment};
use crate::error::{report_all, MonkeyError};
use crate::evaluator::eval_program;
use crate::object::Object;
use crate::parser::parse;

/// Parse and evaluate `source` in `env`. Syntax errors are rendered as
/// diagnostics and nothing is evaluated.
pub fn run_in(source: &str, filename: Option<&str>, env: &Env) -> Result<Object, MonkeyError> {
    let (program, errors) = parse(source);
    if !errors.is_empty() {
        report_all(&errors, source, filename)?;
        return Err(MonkeyError::Parse(errors));
    }

    Ok(eval_program(&program, env))
}

/// Run a script in a fresh global environment.
pub fn run(source: &str, filename: Option<&str>) -> Result<Object, MonkeyError> {
    let env = Environment::new();
    run_in(source, filename, &env)
}

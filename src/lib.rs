// Monkey Language Interpreter Library
//
// Lexer, Pratt parser and tree-walking evaluator for the Monkey language:
// integers, floats, booleans, strings, arrays, let bindings, closures,
// conditionals and return.

// Public modules
pub mod ast;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use ast::{BlockStatement, Expression, Program, Statement};
pub use environment::{Env, Environment};
pub use error::{MonkeyError, ParseError, Span};
pub use evaluator::{eval_program, evaluate};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use object::{Object, FALSE, NULL, TRUE};
pub use parser::{parse, Parser};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;

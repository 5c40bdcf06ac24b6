use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::builtins;
use crate::environment::{Env, Environment};
use crate::object::{Function, Object, NULL};
use std::rc::Rc;
use tracing::trace;

/// Evaluate a whole program. A top-level `return` yields its value; an error
/// object stops evaluation and is returned as is.
#[tracing::instrument(level = "trace", skip_all, fields(statements = program.statements.len()))]
pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = NULL;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

/// Alias matching the embedding API: evaluate `program` in `env`.
pub fn evaluate(program: &Program, env: &Env) -> Object {
    eval_program(program, env)
}

// Unlike `eval_program`, return values stay wrapped so that enclosing blocks
// stop too.
fn eval_block_statement(block: &BlockStatement, env: &Env) -> Object {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Object {
    match statement {
        Statement::Expression { expression, .. } => eval_expression(expression, env),
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(name.value.as_str(), value);
            NULL
        }
    }
}

pub fn eval_expression(expression: &Expression, env: &Env) -> Object {
    match expression {
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::FloatLiteral { value, .. } => Object::Float(*value),
        Expression::StringLiteral { value, .. } => Object::String(value.clone()),
        Expression::Boolean { value, .. } => Object::from_bool(*value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::ArrayLiteral { elements, .. } => match eval_expressions(elements, env) {
            Ok(elements) => Object::array(elements),
            Err(error) => error,
        },
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }

            if condition.is_truthy() {
                eval_block_statement(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, env)
            } else {
                NULL
            }
        }
        Expression::Function(literal) => Object::Function(Rc::new(Function {
            literal: Rc::clone(literal),
            env: Rc::clone(env),
        })),
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }

            match eval_expressions(arguments, env) {
                Ok(args) => apply_function(function, args),
                Err(error) => error,
            }
        }
    }
}

fn eval_identifier(ident: &Identifier, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }

    builtins::lookup(&ident.value)
        .unwrap_or_else(|| Object::error(format!("identifier not found: {}", ident.value)))
}

/// Evaluate left to right, stopping at the first error.
fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
    let mut values = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }

    Ok(values)
}

#[tracing::instrument(level = "trace", skip_all, fields(callee = function.type_name(), args = args.len()))]
fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(function) => {
            let env = extend_function_env(&function, args);
            let evaluated = eval_block_statement(&function.literal.body, &env);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(builtin) => {
            trace!(name = builtin.name, "calling builtin");
            (builtin.func)(&args)
        }
        other => Object::error(format!("not a function: {}", other.type_name())),
    }
}

// Surplus arguments are ignored; missing ones are left unbound.
fn extend_function_env(function: &Function, args: Vec<Object>) -> Env {
    let env = Environment::new_enclosed(Rc::clone(&function.env));

    {
        let mut scope = env.borrow_mut();
        for (parameter, arg) in function.literal.parameters.iter().zip(args) {
            scope.set(parameter.value.as_str(), arg);
        }
    }

    env
}

fn unwrap_return_value(object: Object) -> Object {
    match object {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::from_bool(!right.is_truthy()),
        "-" => match right {
            Object::Integer(n) => Object::Integer(n.wrapping_neg()),
            Object::Float(n) => Object::Float(-n),
            other => Object::error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Object::error(format!("unknown operator: {}{}", operator, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::Float(l), Object::Float(r)) => eval_float_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operator, l, r),
        _ if operator == "==" => Object::from_bool(left.is_identical(&right)),
        _ if operator == "!=" => Object::from_bool(!left.is_identical(&right)),
        _ if left.type_name() != right.type_name() => Object::error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => unknown_infix_operator(operator, &left, &right),
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Object::error("division by zero")
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        "<" => Object::from_bool(left < right),
        ">" => Object::from_bool(left > right),
        "==" => Object::from_bool(left == right),
        "!=" => Object::from_bool(left != right),
        _ => unknown_infix_operator(operator, &Object::Integer(left), &Object::Integer(right)),
    }
}

fn eval_float_infix_expression(operator: &str, left: f64, right: f64) -> Object {
    match operator {
        "+" => Object::Float(left + right),
        "-" => Object::Float(left - right),
        "*" => Object::Float(left * right),
        "/" => Object::Float(left / right),
        "<" => Object::from_bool(left < right),
        ">" => Object::from_bool(left > right),
        "==" => Object::from_bool(left == right),
        "!=" => Object::from_bool(left != right),
        _ => unknown_infix_operator(operator, &Object::Float(left), &Object::Float(right)),
    }
}

fn eval_string_infix_expression(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{}{}", left, right)),
        _ => Object::error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

fn unknown_infix_operator(operator: &str, left: &Object, right: &Object) -> Object {
    Object::error(format!(
        "unknown operator: {} {} {}",
        left.type_name(),
        operator,
        right.type_name()
    ))
}

use crate::object::{Builtin, Object, NULL};

const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
    Builtin { name: "puts", func: puts },
];

/// Find a built-in by name. Consulted only after the environment chain.
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.name == name)
        .map(|builtin| Object::Builtin(*builtin))
}

fn check_arity(args: &[Object], want: usize) -> Option<Object> {
    if args.len() == want {
        None
    } else {
        Some(Object::error(format!(
            "wrong number of arguments. got={}, want={}",
            args.len(),
            want
        )))
    }
}

fn len(args: &[Object]) -> Object {
    if let Some(error) = check_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::String(s) => Object::Integer(s.chars().count() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: &[Object]) -> Object {
    if let Some(error) = check_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(NULL),
        other => not_an_array("first", other),
    }
}

fn last(args: &[Object]) -> Object {
    if let Some(error) = check_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(NULL),
        other => not_an_array("last", other),
    }
}

fn rest(args: &[Object]) -> Object {
    if let Some(error) = check_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) if elements.is_empty() => NULL,
        Object::Array(elements) => Object::array(elements[1..].to_vec()),
        other => not_an_array("rest", other),
    }
}

fn push(args: &[Object]) -> Object {
    if let Some(error) = check_arity(args, 2) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend(elements.iter().cloned());
            extended.push(args[1].clone());
            Object::array(extended)
        }
        other => not_an_array("push", other),
    }
}

fn puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg.inspect());
    }
    NULL
}

fn not_an_array(name: &str, got: &Object) -> Object {
    Object::error(format!(
        "argument to `{}` must be ARRAY, got {}",
        name,
        got.type_name()
    ))
}

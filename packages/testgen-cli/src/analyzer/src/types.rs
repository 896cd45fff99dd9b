//! Textual type inference for declarations without annotations.

use ng_testgen::type_names::clean_type_name;
use ng_testgen::ReactiveKind;
use oxc_ast::ast::{CallExpression, Expression};
use oxc_span::GetSpan;

use super::host::{call_target, explicit_type_argument, source_text};

pub const UNKNOWN_TYPE: &str = "any";

/// Angular factory behind a field initializer such as `signal(0)`.
pub fn reactive_kind(initializer: &Expression<'_>) -> Option<ReactiveKind> {
    match initializer {
        Expression::CallExpression(call) => match call_target(call)? {
            ("signal", None) => Some(ReactiveKind::Signal),
            ("computed", None) | ("toSignal", None) | ("linkedSignal", None) => Some(ReactiveKind::Computed),
            ("input", None) | ("input", Some("required")) => Some(ReactiveKind::Input),
            ("model", None) | ("model", Some("required")) => Some(ReactiveKind::Model),
            ("output", None) | ("outputFromObservable", None) => Some(ReactiveKind::Output),
            _ => None,
        },
        Expression::NewExpression(new) => match &new.callee {
            Expression::Identifier(ident) if ident.name == "EventEmitter" => Some(ReactiveKind::EventEmitter),
            _ => None,
        },
        _ => None,
    }
}

/// Type of a literal value, `None` when it is not a literal.
fn literal_type(expr: &Expression<'_>) -> Option<&'static str> {
    match expr {
        Expression::StringLiteral(_) | Expression::TemplateLiteral(_) => Some("string"),
        Expression::NumericLiteral(_) => Some("number"),
        Expression::BooleanLiteral(_) => Some("boolean"),
        Expression::ArrayExpression(_) => Some("any[]"),
        _ => None,
    }
}

/// Value type carried by a signal factory: the explicit type argument, else
/// the type of the initial value.
pub fn signal_value_type(source: &str, call: &CallExpression<'_>) -> String {
    if let Some(explicit) = explicit_type_argument(source, call) {
        return explicit;
    }
    let required = matches!(call_target(call), Some((_, Some("required"))));
    if required {
        return UNKNOWN_TYPE.to_string();
    }
    call.arguments
        .first()
        .and_then(|arg| arg.as_expression())
        .and_then(literal_type)
        .unwrap_or(UNKNOWN_TYPE)
        .to_string()
}

/// Type string for an initializer expression.
pub fn infer_expression_type(source: &str, expr: &Expression<'_>) -> String {
    if let Some(literal) = literal_type(expr) {
        return literal.to_string();
    }
    match expr {
        Expression::NewExpression(new) => match &new.callee {
            Expression::Identifier(ident) => {
                // `new X<T>()` keeps its type argument
                let callee_end = new.callee.span().end as usize;
                let rest = source.get(callee_end..new.span.end as usize).unwrap_or_default();
                match rest.trim_start().strip_prefix('<').and_then(|r| r.find(">(").map(|end| &r[..end])) {
                    Some(argument) => format!("{}<{}>", ident.name, argument.trim()),
                    None => ident.name.to_string(),
                }
            }
            _ => UNKNOWN_TYPE.to_string(),
        },
        Expression::CallExpression(call) => infer_call_type(source, call),
        Expression::TSAsExpression(cast) => {
            clean_type_name(source_text(source, cast.type_annotation.span()))
        }
        _ => UNKNOWN_TYPE.to_string(),
    }
}

pub fn infer_call_type(source: &str, call: &CallExpression<'_>) -> String {
    let wrap = |wrapper: &str| format!("{}<{}>", wrapper, signal_value_type(source, call));
    match call_target(call) {
        Some(("signal", None)) => wrap("WritableSignal"),
        Some(("computed", None)) => wrap("Signal"),
        Some(("input", _)) => wrap("InputSignal"),
        Some(("model", _)) => wrap("ModelSignal"),
        Some(("output", None)) => match explicit_type_argument(source, call) {
            Some(payload) => format!("OutputEmitterRef<{}>", payload),
            None => "OutputEmitterRef<void>".to_string(),
        },
        Some(("inject", None)) => injected_type(source, call).unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        _ => UNKNOWN_TYPE.to_string(),
    }
}

/// Token passed to `inject(...)`, as written.
pub fn injected_type(source: &str, call: &CallExpression<'_>) -> Option<String> {
    let token = call.arguments.first()?.as_expression()?;
    Some(clean_type_name(source_text(source, token.span())))
}

/// Return type of a method without an annotation.
pub fn fallback_return_type(is_async: bool, returns_value: bool) -> String {
    match (is_async, returns_value) {
        (true, true) => "Promise<any>",
        (true, false) => "Promise<void>",
        (false, true) => UNKNOWN_TYPE,
        (false, false) => "void",
    }
    .to_string()
}

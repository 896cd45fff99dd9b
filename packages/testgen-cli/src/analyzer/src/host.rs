//! Syntax helpers over the oxc AST
//!
//! Small accessors for decorators, member keys and source text. They only
//! read the tree; nothing is resolved across files.

use ng_testgen::type_names;
use ng_testgen::Visibility;
use oxc_ast::ast::{
    Argument, CallExpression, Decorator, Expression, ObjectExpression, ObjectPropertyKind,
    PropertyKey, TSAccessibility, TSTypeAnnotation,
};
use oxc_span::{GetSpan, Span};

/// Text covered by `span`.
pub fn source_text(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}

/// Strip one pair of matching quotes or backticks.
pub fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['\'', '"', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Name of the function a call invokes: `name(...)` gives `("name", None)`,
/// `ns.name(...)` gives `("ns", Some("name"))`.
pub fn call_target<'b>(call: &'b CallExpression<'_>) -> Option<(&'b str, Option<&'b str>)> {
    match &call.callee {
        Expression::Identifier(ident) => Some((ident.name.as_str(), None)),
        Expression::StaticMemberExpression(member) => match &member.object {
            Expression::Identifier(object) => {
                Some((object.name.as_str(), Some(member.property.name.as_str())))
            }
            _ => None,
        },
        _ => None,
    }
}

/// `@Name`, `@Name(...)` and `@ns.Name(...)` all yield `Name`.
pub fn decorator_name(decorator: &Decorator<'_>) -> Option<String> {
    fn expression_name(expr: &Expression<'_>) -> Option<String> {
        match expr {
            Expression::Identifier(ident) => Some(ident.name.to_string()),
            Expression::StaticMemberExpression(member) => Some(member.property.name.to_string()),
            _ => None,
        }
    }

    match &decorator.expression {
        Expression::CallExpression(call) => expression_name(&call.callee),
        other => expression_name(other),
    }
}

pub fn decorator_names(decorators: &[Decorator<'_>]) -> Vec<String> {
    decorators.iter().filter_map(decorator_name).collect()
}

pub fn find_decorator<'b, 'a>(decorators: &'b [Decorator<'a>], name: &str) -> Option<&'b Decorator<'a>> {
    decorators
        .iter()
        .find(|decorator| decorator_name(decorator).as_deref() == Some(name))
}

/// Arguments of a decorator call; empty for `@Name` without parentheses.
pub fn decorator_arguments<'b, 'a>(decorator: &'b Decorator<'a>) -> &'b [Argument<'a>] {
    match &decorator.expression {
        Expression::CallExpression(call) => &call.arguments[..],
        _ => &[],
    }
}

pub fn first_argument<'b, 'a>(arguments: &'b [Argument<'a>]) -> Option<&'b Expression<'a>> {
    arguments.first().and_then(|arg| arg.as_expression())
}

/// Member name and whether it was written as `#name`.
pub fn property_key_name(key: &PropertyKey<'_>) -> Option<(String, bool)> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some((id.name.to_string(), false)),
        PropertyKey::PrivateIdentifier(id) => Some((id.name.to_string(), true)),
        PropertyKey::StringLiteral(lit) => Some((lit.value.to_string(), false)),
        PropertyKey::Identifier(id) => Some((id.name.to_string(), false)),
        _ => None,
    }
}

pub fn visibility(accessibility: Option<TSAccessibility>, private_name: bool) -> Visibility {
    if private_name {
        return Visibility::Private;
    }
    match accessibility {
        Some(TSAccessibility::Private) => Visibility::Private,
        Some(TSAccessibility::Protected) => Visibility::Protected,
        Some(TSAccessibility::Public) | None => Visibility::Public,
    }
}

/// Cleaned text of a type annotation.
pub fn annotation_text(source: &str, annotation: Option<&TSTypeAnnotation<'_>>) -> Option<String> {
    annotation.map(|annotation| {
        type_names::clean_type_name(source_text(source, annotation.type_annotation.span()))
    })
}

/// String literals and template literals without substitutions.
pub fn string_value(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
            .quasis
            .first()
            .map(|quasi| quasi.value.raw.to_string()),
        _ => None,
    }
}

pub fn object_property<'b, 'a>(object: &'b ObjectExpression<'a>, key: &str) -> Option<&'b Expression<'a>> {
    object.properties.iter().find_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(prop) => match property_key_name(&prop.key) {
            Some((name, _)) if name == key => Some(&prop.value),
            _ => None,
        },
        _ => None,
    })
}

pub fn is_true(expr: Option<&Expression<'_>>) -> bool {
    matches!(expr, Some(Expression::BooleanLiteral(lit)) if lit.value)
}

/// Explicit type argument of a call, read from the text between the callee
/// and the opening parenthesis: `signal<User[]>(...)` gives `User[]`.
pub fn explicit_type_argument(source: &str, call: &CallExpression<'_>) -> Option<String> {
    let start = call.callee.span().end as usize;
    let end = call.span.end as usize;
    let rest = source.get(start..end)?.trim_start();
    let inner = rest.strip_prefix('<')?;

    let mut depth = 1usize;
    let mut previous = '\0';
    for (index, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if previous != '=' => {
                depth -= 1;
                if depth == 0 {
                    return Some(type_names::clean_type_name(&inner[..index]));
                }
            }
            _ => {}
        }
        previous = c;
    }
    None
}

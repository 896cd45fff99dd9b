//! Pieces shared by every template: method tests, lifecycle tests and the
//! final assembly of imports and body.

use crate::class_description::{ClassDescription, MethodInfo, ParameterInfo};
use crate::emitter::{is_legal_identifier, quote, SpecEmitter};
use crate::import_set::ImportSet;
use crate::mock_providers::import_core;
use crate::mock_values;
use crate::type_names;

pub(super) const ANGULAR_TESTING: &str = "@angular/core/testing";

/// Locals every template declares itself; parameter mocks must not shadow them.
const TEMPLATE_LOCALS: &[&str] = &[
    "result",
    "component",
    "fixture",
    "service",
    "pipe",
    "directive",
    "directiveElement",
    "element",
    "spy",
    "value",
    "changes",
];

pub(super) struct SpecContext<'a> {
    pub desc: &'a ClassDescription,
    pub imports: ImportSet,
    reserved: Vec<String>,
}

impl<'a> SpecContext<'a> {
    pub fn new(desc: &'a ClassDescription) -> Self {
        let mut imports = ImportSet::new();
        imports.add(desc.class_name.clone(), desc.module_specifier());
        Self {
            desc,
            imports,
            reserved: TEMPLATE_LOCALS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Keep generated locals clear of `name`.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.push(name.into());
    }

    /// Mock literal for a value, registering the imports it needs.
    pub fn mock(&mut self, type_name: &str, name: Option<&str>) -> &'static str {
        let value = mock_values::mock_value(type_name, name);
        if mock_values::needs_rxjs(value) {
            self.imports.add("of", "rxjs");
        }
        value
    }

    pub fn testing(&mut self, symbol: &str) {
        self.imports.add(symbol, ANGULAR_TESTING);
    }

    fn local_name(&self, param: &ParameterInfo, index: usize) -> String {
        if !is_legal_identifier(&param.name) {
            return format!("arg{}", index);
        }
        if self.reserved.iter().any(|name| *name == param.name) {
            format!("{}Arg", param.name)
        } else {
            param.name.clone()
        }
    }

    /// Import block, a blank line, then the body.
    pub fn finish(self, body: SpecEmitter) -> String {
        let mut out = self.imports.render().join("\n");
        out.push_str("\n\n");
        out.push_str(&body.to_source());
        out.push('\n');
        out
    }
}

struct ArrangedArgument {
    local: String,
    value: &'static str,
    rest: bool,
}

fn arrange_arguments(ctx: &mut SpecContext<'_>, params: &[ParameterInfo]) -> Vec<ArrangedArgument> {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| ArrangedArgument {
            local: ctx.local_name(param, index),
            value: ctx.mock(&param.type_name, Some(&param.name)),
            rest: param.rest,
        })
        .collect()
}

fn call_arguments(arguments: &[ArrangedArgument]) -> String {
    arguments
        .iter()
        .map(|arg| {
            if arg.rest {
                format!("...{}", arg.local)
            } else {
                arg.local.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assertion lines for a method result, chosen by return type.
pub(super) fn result_assertions(method: &MethodInfo) -> [&'static str; 2] {
    let returned = if method.is_async {
        type_names::awaited_type(&method.return_type)
    } else {
        &method.return_type
    };

    if type_names::is_void(returned) {
        ["expect(result).toBeUndefined();", ""]
    } else if type_names::is_observable_like(returned) {
        [
            "expect(result).toBeDefined();",
            "// TODO: subscribe and assert on the emitted values",
        ]
    } else if type_names::is_promise_like(returned) {
        [
            "expect(result).toBeDefined();",
            "// TODO: await the promise and assert on the resolved value",
        ]
    } else {
        [
            "expect(result).toBeDefined();",
            "// TODO: assert on the expected result",
        ]
    }
}

/// Receiver of a method call: the class for static methods, `subject` otherwise.
fn call_target<'s>(desc: &'s ClassDescription, method: &MethodInfo, subject: &'s str) -> &'s str {
    if method.is_static {
        &desc.class_name
    } else {
        subject
    }
}

pub(super) fn emit_method_test(
    e: &mut SpecEmitter,
    ctx: &mut SpecContext<'_>,
    method: &MethodInfo,
    subject: &str,
) {
    let desc = ctx.desc;
    let arguments = arrange_arguments(ctx, &method.params);
    let call = format!(
        "{}.{}({})",
        call_target(desc, method, subject),
        method.name,
        call_arguments(&arguments)
    );
    let (prefix, awaited) = if method.is_async {
        ("async ", "await ")
    } else {
        ("", "")
    };

    let title = format!("should run {}()", method.name);
    e.block(format!("it({}, {}() => {{", quote(&title), prefix), "});", |e| {
        if !arguments.is_empty() {
            e.println("// Arrange");
            for arg in &arguments {
                e.println(format!("const {} = {};", arg.local, arg.value));
            }
            e.blank_line();
        }
        e.println("// Act");
        e.println(format!("const result = {}{};", awaited, call));
        e.blank_line();
        e.println("// Assert");
        for line in result_assertions(method).iter().filter(|l| !l.is_empty()) {
            e.println(*line);
        }
    });
}

/// Expression calling `method` with mock arguments inline.
pub(super) fn inline_call(ctx: &mut SpecContext<'_>, method: &MethodInfo, subject: &str) -> String {
    let desc = ctx.desc;
    let args: Vec<String> = method
        .params
        .iter()
        .map(|param| {
            let value = ctx.mock(&param.type_name, Some(&param.name));
            if param.rest {
                format!("...{}", value)
            } else {
                value.to_string()
            }
        })
        .collect();
    format!(
        "{}.{}({})",
        call_target(desc, method, subject),
        method.name,
        args.join(", ")
    )
}

/// One `it` per public method that is not a lifecycle hook or listed in `skip`.
pub(super) fn emit_method_tests(
    e: &mut SpecEmitter,
    ctx: &mut SpecContext<'_>,
    subject: &str,
    skip: &[&str],
) {
    let desc = ctx.desc;
    let methods: Vec<&MethodInfo> = desc
        .testable_methods()
        .filter(|method| !skip.contains(&method.name.as_str()))
        .collect();
    if methods.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('methods', () => {", "});", |e| {
        for (index, method) in methods.into_iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            emit_method_test(e, ctx, method, subject);
        }
    });
}

/// Tests for the lifecycle hooks listed in `implements`.
pub(super) fn emit_lifecycle_tests(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>, subject: &str) {
    let hooks = ctx.desc.lifecycle_hooks();
    if hooks.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('lifecycle hooks', () => {", "});", |e| {
        for (index, hook) in hooks.into_iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let title = format!("should run {}", hook);
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                e.println(format!("const spy = jest.spyOn({}, '{}');", subject, hook));
                if hook == "ngOnChanges" {
                    import_core(&mut ctx.imports, "SimpleChanges");
                    e.println("const changes: SimpleChanges = {};");
                    e.blank_line();
                    e.println(format!("{}.{}(changes);", subject, hook));
                    e.blank_line();
                    e.println("expect(spy).toHaveBeenCalledWith(changes);");
                } else {
                    e.blank_line();
                    e.println(format!("{}.{}();", subject, hook));
                    e.blank_line();
                    e.println("expect(spy).toHaveBeenCalled();");
                }
            });
        }
    });
}

/// `describe` title for a class.
pub(super) fn describe_open(desc: &ClassDescription) -> String {
    format!("describe({}, () => {{", quote(&desc.class_name))
}

use super::common::{describe_open, emit_lifecycle_tests, emit_method_tests, SpecContext};
use crate::class_description::{ClassDescription, MethodInfo, ParameterInfo};
use crate::emitter::SpecEmitter;
use crate::mock_providers::{MockPlan, ProviderKind};
use crate::mock_values;
use crate::type_names;

/// Spec for a `@Pipe` class.
pub fn render_pipe_spec(desc: &ClassDescription) -> String {
    let mut ctx = SpecContext::new(desc);
    let mut factories: Vec<String> = Vec::new();
    let arguments = constructor_arguments(&mut ctx, &mut factories);

    // `inject()` fields need an injection context around `new`
    let plan = if desc.field_injections.is_empty() {
        None
    } else {
        ctx.testing("TestBed");
        Some(MockPlan::build(desc, &mut ctx.imports))
    };

    let transform = desc.methods.iter().find(|method| method.name == "transform");
    let call = TransformCall::new(&mut ctx, transform);
    let class_type = desc.type_reference();

    let mut e = SpecEmitter::new();
    e.block(describe_open(desc), "});", |e| {
        e.println(format!("let pipe: {};", class_type));
        e.blank_line();

        let construct = format!("new {}({})", desc.class_name, arguments.join(", "));
        e.block("beforeEach(() => {", "});", |e| match &plan {
            Some(plan) => {
                e.block("TestBed.configureTestingModule({", "});", |e| {
                    plan.emit_providers(e, &[]);
                });
                e.println(format!("pipe = TestBed.runInInjectionContext(() => {});", construct));
            }
            None => e.println(format!("pipe = {};", construct)),
        });

        e.blank_line();
        e.block("describe('creation', () => {", "});", |e| {
            e.block("it('should create', () => {", "});", |e| {
                e.println("expect(pipe).toBeTruthy();");
            });
            e.blank_line();
            e.block(
                format!("it('should be an instance of {}', () => {{", desc.class_name),
                "});",
                |e| e.println(format!("expect(pipe).toBeInstanceOf({});", desc.class_name)),
            );
        });

        e.blank_line();
        emit_transform_tests(e, &call);
        e.blank_line();
        emit_edge_case_tests(e, &call);
        e.blank_line();
        emit_performance_test(e, &call);

        emit_lifecycle_tests(e, &mut ctx, "pipe");
        emit_method_tests(e, &mut ctx, "pipe", &["transform"]);
    });

    if let Some(plan) = &plan {
        for type_name in &plan.factories {
            if !factories.contains(type_name) {
                factories.push(type_name.clone());
            }
        }
    }
    let factory_plan = MockPlan {
        factories,
        ..MockPlan::default()
    };
    factory_plan.emit_factories(&mut e);
    ctx.finish(e)
}

/// Arguments passed to `new`: literals for primitives, mock factories otherwise.
fn constructor_arguments(ctx: &mut SpecContext<'_>, factories: &mut Vec<String>) -> Vec<String> {
    let desc = ctx.desc;
    desc.dependencies
        .iter()
        .map(|dependency| {
            let type_name = type_names::primary_type(&dependency.type_name).to_string();
            if ProviderKind::of(dependency) == ProviderKind::Value {
                return ctx.mock(&type_name, Some(&dependency.name)).to_string();
            }
            crate::mock_providers::import_type(desc, &mut ctx.imports, &type_name);
            if !factories.contains(&type_name) {
                factories.push(type_name.clone());
            }
            format!("{}()", type_names::mock_factory_name(&type_name))
        })
        .collect()
}

/// How `transform` is called: the input value and the trailing arguments.
struct TransformCall {
    input_type: String,
    input: &'static str,
    extra: String,
}

impl TransformCall {
    fn new(ctx: &mut SpecContext<'_>, transform: Option<&MethodInfo>) -> Self {
        let params: &[ParameterInfo] = transform.map(|m| m.params.as_slice()).unwrap_or(&[]);
        let (input_type, input) = match params.first() {
            Some(first) => (
                type_names::primary_type(&first.type_name).to_string(),
                ctx.mock(&first.type_name, Some(&first.name)),
            ),
            None => ("any".to_string(), mock_values::mock_value("string", None)),
        };
        let extra: Vec<&str> = params
            .iter()
            .skip(1)
            .filter(|param| !param.optional && param.default_value.is_none() && !param.rest)
            .map(|param| ctx.mock(&param.type_name, Some(&param.name)))
            .collect();
        let extra = extra.iter().map(|arg| format!(", {}", arg)).collect();
        Self {
            input_type,
            input,
            extra,
        }
    }

    fn call(&self, value: &str) -> String {
        format!("pipe.transform({}{})", value, self.extra)
    }

    fn empty_value(&self) -> &'static str {
        if type_names::is_array_type(&self.input_type) {
            "[]"
        } else {
            match self.input_type.as_str() {
                "number" => "0",
                "string" | "any" | "unknown" => "''",
                _ => "'' as any",
            }
        }
    }

    fn iteration_value(&self) -> &'static str {
        match self.input_type.as_str() {
            "string" | "any" | "unknown" => "`test-value-${i}`",
            "number" => "i",
            _ => "value",
        }
    }
}

fn emit_transform_tests(e: &mut SpecEmitter, call: &TransformCall) {
    e.block("describe('transform', () => {", "});", |e| {
        e.block("it('should transform a value', () => {", "});", |e| {
            e.println("// Arrange");
            e.println(format!("const value = {};", call.input));
            e.blank_line();
            e.println("// Act");
            e.println(format!("const result = {};", call.call("value")));
            e.blank_line();
            e.println("// Assert");
            e.println("expect(result).toBeDefined();");
            e.println("// TODO: assert on the expected output");
        });
        e.blank_line();
        e.block("it('should handle null and undefined', () => {", "});", |e| {
            e.println(format!("expect(() => {}).not.toThrow();", call.call("null as any")));
            e.println(format!("expect(() => {}).not.toThrow();", call.call("undefined as any")));
        });
        e.blank_line();
        e.block("it('should handle an empty value', () => {", "});", |e| {
            e.println(format!("const result = {};", call.call(call.empty_value())));
            e.blank_line();
            e.println("expect(result).toBeDefined();");
        });
        e.blank_line();
        e.block("it('should return the same output for the same input', () => {", "});", |e| {
            e.println(format!("const value = {};", call.input));
            e.blank_line();
            e.println(format!("const first = {};", call.call("value")));
            e.println(format!("const second = {};", call.call("value")));
            e.blank_line();
            e.println("expect(first).toEqual(second);");
        });
    });
}

fn emit_edge_case_tests(e: &mut SpecEmitter, call: &TransformCall) {
    let cases = [
        ("an object", "{ unexpected: 'object' } as any"),
        ("an array", "['item1', 'item2', 'item3'] as any"),
        ("a number", "12345 as any"),
    ];
    e.block("describe('edge cases', () => {", "});", |e| {
        for (label, value) in cases {
            e.block(format!("it('should not throw on {}', () => {{", label), "});", |e| {
                e.println(format!("expect(() => {}).not.toThrow();", call.call(value)));
            });
            e.blank_line();
        }
        e.block("it('should not throw on booleans', () => {", "});", |e| {
            e.println(format!("expect(() => {}).not.toThrow();", call.call("true as any")));
            e.println(format!("expect(() => {}).not.toThrow();", call.call("false as any")));
        });
    });
}

fn emit_performance_test(e: &mut SpecEmitter, call: &TransformCall) {
    e.block("describe('performance', () => {", "});", |e| {
        e.block("it('should transform 1000 values within a second', () => {", "});", |e| {
            if call.iteration_value() == "value" {
                e.println(format!("const value = {};", call.input));
            }
            e.println("const iterations = 1000;");
            e.println("const startTime = performance.now();");
            e.blank_line();
            e.block("for (let i = 0; i < iterations; i++) {", "}", |e| {
                e.println(format!("{};", call.call(call.iteration_value())));
            });
            e.blank_line();
            e.println("const duration = performance.now() - startTime;");
            e.println("expect(duration).toBeLessThan(1000);");
        });
    });
}

use super::common::{
    describe_open, emit_lifecycle_tests, emit_method_test, inline_call, SpecContext,
};
use crate::class_description::{ClassDescription, MethodInfo};
use crate::emitter::{member_access, quote, SpecEmitter};
use crate::mock_providers::MockPlan;
use crate::type_names;

/// Spec for an `@Injectable` class.
pub fn render_service_spec(desc: &ClassDescription) -> String {
    let mut ctx = SpecContext::new(desc);
    ctx.testing("TestBed");

    let plan = MockPlan::build(desc, &mut ctx.imports);
    for handle in &plan.handles {
        ctx.reserve(handle.identifier.clone());
    }

    let mut e = SpecEmitter::new();
    e.block(describe_open(desc), "});", |e| {
        e.println(format!("let service: {};", desc.type_reference()));
        plan.emit_handle_declarations(e);
        e.blank_line();

        e.block("beforeEach(() => {", "});", |e| {
            e.block("TestBed.configureTestingModule({", "});", |e| {
                plan.emit_providers(e, &[desc.class_name.clone()]);
            });
            e.blank_line();
            e.println(format!("service = TestBed.inject({});", desc.class_name));
            plan.emit_handle_initialization(e);
        });

        e.blank_line();
        e.block("describe('creation', () => {", "});", |e| {
            e.block("it('should be created', () => {", "});", |e| {
                e.println("expect(service).toBeTruthy();");
            });
            e.blank_line();
            e.block(
                format!("it('should be an instance of {}', () => {{", desc.class_name),
                "});",
                |e| e.println(format!("expect(service).toBeInstanceOf({});", desc.class_name)),
            );
            if let Some(scope) = desc.metadata("providedIn") {
                e.blank_line();
                let title = format!("should be provided in \"{}\"", scope);
                e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                    e.println(format!("expect(TestBed.inject({})).toBe(service);", desc.class_name));
                });
            }
        });

        emit_lifecycle_tests(e, &mut ctx, "service");
        emit_service_method_tests(e, &mut ctx);
        emit_dependency_tests(e, desc, &plan);
    });

    plan.emit_factories(&mut e);
    ctx.finish(e)
}

/// Whether a method gets an error-path test, and which matcher it uses.
fn error_matcher(method: &MethodInfo) -> Option<&'static str> {
    if type_names::is_void(&method.return_type) || type_names::is_observable_like(&method.return_type) {
        None
    } else if method.is_async || type_names::is_promise_like(&method.return_type) {
        Some("rejects.toThrow")
    } else {
        Some("not.toThrow")
    }
}

fn emit_service_method_tests(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>) {
    let desc = ctx.desc;
    let methods: Vec<&MethodInfo> = desc.testable_methods().collect();
    if methods.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('methods', () => {", "});", |e| {
        for (index, method) in methods.into_iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            emit_method_test(e, ctx, method, "service");

            let Some(matcher) = error_matcher(method) else {
                continue;
            };
            let call = inline_call(ctx, method, "service");
            let title = format!("should handle errors in {}()", method.name);
            e.blank_line();
            if matcher == "rejects.toThrow" {
                e.block(format!("it({}, async () => {{", quote(&title)), "});", |e| {
                    e.println("// TODO: arrange a failing dependency before calling");
                    e.println(format!("await expect({}).{}();", call, matcher));
                });
            } else {
                e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                    e.println("// TODO: arrange the error scenario for this method");
                    e.println(format!("expect(() => {}).{}();", call, matcher));
                });
            }
        }
    });
}

fn emit_dependency_tests(e: &mut SpecEmitter, desc: &ClassDescription, plan: &MockPlan) {
    let injections = desc.injections();
    let checks: Vec<(String, Vec<String>)> = injections
        .into_iter()
        .filter_map(|dependency| {
            let field = member_access("(service as any)", &dependency.name);
            let handle = plan.handle_for(dependency);
            let lines = match (dependency.is_field, handle) {
                (true, Some(handle)) => vec![
                    format!("expect({}).toBeDefined();", field),
                    format!("expect({}).toBe({});", field, handle.identifier),
                ],
                (true, None) => vec![format!("expect({}).toBeDefined();", field)],
                (false, Some(handle)) => vec![format!("expect({}).toBeDefined();", handle.identifier)],
                (false, None) => return None,
            };
            Some((dependency.provider_token().to_string(), lines))
        })
        .collect();
    if checks.is_empty() {
        return;
    }

    e.blank_line();
    e.block("describe('dependencies', () => {", "});", |e| {
        for (index, (token, lines)) in checks.into_iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let title = format!("should inject {}", token);
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                for line in lines {
                    e.println(line);
                }
            });
        }
    });
}

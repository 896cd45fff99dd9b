use super::common::{
    describe_open, emit_lifecycle_tests, emit_method_tests, SpecContext,
};
use crate::class_description::{ClassDescription, InputBinding, OutputBinding, PropertyInfo, Visibility};
use crate::emitter::{member_access, quote, SpecEmitter};
use crate::mock_providers::MockPlan;
use crate::type_names;

/// Spec for an `@Component` class.
pub fn render_component_spec(desc: &ClassDescription) -> String {
    let mut ctx = SpecContext::new(desc);
    ctx.testing("ComponentFixture");
    ctx.testing("TestBed");

    let plan = MockPlan::build(desc, &mut ctx.imports);
    for handle in &plan.handles {
        ctx.reserve(handle.identifier.clone());
    }
    let class_type = desc.type_reference();

    let mut e = SpecEmitter::new();
    e.block(describe_open(desc), "});", |e| {
        e.println(format!("let component: {};", class_type));
        e.println(format!("let fixture: ComponentFixture<{}>;", class_type));
        plan.emit_handle_declarations(e);
        e.blank_line();

        emit_setup(e, &mut ctx, &plan);

        e.blank_line();
        e.block("describe('creation', () => {", "});", |e| {
            e.block("it('should create', () => {", "});", |e| {
                e.println("expect(component).toBeTruthy();");
            });
            e.blank_line();
            e.block(
                format!("it('should be an instance of {}', () => {{", desc.class_name),
                "});",
                |e| e.println(format!("expect(component).toBeInstanceOf({});", desc.class_name)),
            );
            e.blank_line();
            e.block("it('should render its template', () => {", "});", |e| {
                e.println("expect(fixture.nativeElement).toBeTruthy();");
            });
        });

        emit_lifecycle_tests(e, &mut ctx, "component");
        emit_input_tests(e, &mut ctx);
        emit_output_tests(e, &mut ctx);
        emit_view_query_tests(e, desc);
        emit_property_tests(e, &mut ctx);
        emit_method_tests(e, &mut ctx, "component", &[]);
    });

    plan.emit_factories(&mut e);
    ctx.finish(e)
}

fn emit_setup(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>, plan: &MockPlan) {
    let desc = ctx.desc;
    let required: Vec<&InputBinding> = desc.inputs.iter().filter(|input| input.required).collect();

    e.block("beforeEach(async () => {", "});", |e| {
        e.block("await TestBed.configureTestingModule({", "}).compileComponents();", |e| {
            e.println(format!("imports: [{}],", desc.class_name));
            plan.emit_providers(e, &[]);
        });
        e.blank_line();
        e.println(format!("fixture = TestBed.createComponent({});", desc.class_name));
        e.println("component = fixture.componentInstance;");
        plan.emit_handle_initialization(e);
        for input in required {
            let value = ctx.mock(&input.type_name, Some(&input.name));
            e.println(format!(
                "fixture.componentRef.setInput({}, {});",
                quote(input.binding_name()),
                value
            ));
        }
        e.println("fixture.detectChanges();");
    });
}

fn emit_input_tests(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>) {
    let desc = ctx.desc;
    if desc.inputs.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('inputs', () => {", "});", |e| {
        for (index, input) in desc.inputs.iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let value = ctx.mock(&input.type_name, Some(&input.name));
            let read = if input.signal {
                format!("{}()", member_access("component", &input.name))
            } else {
                member_access("component", &input.name)
            };
            let title = format!("should accept the \"{}\" input", input.binding_name());
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                e.println(format!("const value = {};", value));
                e.blank_line();
                e.println(format!(
                    "fixture.componentRef.setInput({}, value);",
                    quote(input.binding_name())
                ));
                e.println("fixture.detectChanges();");
                e.blank_line();
                e.println(format!("expect({}).toEqual(value);", read));
            });
        }
    });
}

fn emitted_value(ctx: &mut SpecContext<'_>, output: &OutputBinding) -> &'static str {
    let payload = type_names::generic_argument(&output.type_name).unwrap_or("void");
    ctx.mock(payload, None)
}

fn emit_output_tests(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>) {
    let desc = ctx.desc;
    if desc.outputs.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('outputs', () => {", "});", |e| {
        for (index, output) in desc.outputs.iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let value = emitted_value(ctx, output);
            let emitter = member_access("component", &output.name);
            let title = format!(
                "should emit through the \"{}\" output",
                output.alias.as_deref().unwrap_or(&output.name)
            );
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                if output.signal {
                    e.println("const emitted: unknown[] = [];");
                    e.println(format!(
                        "{}.subscribe((event) => emitted.push(event));",
                        emitter
                    ));
                    e.blank_line();
                    e.println(format!("{}.emit({});", emitter, value));
                    e.blank_line();
                    e.println(format!("expect(emitted).toEqual([{}]);", value));
                } else {
                    e.println(format!("const spy = jest.spyOn({}, 'emit');", emitter));
                    e.blank_line();
                    e.println(format!("{}.emit({});", emitter, value));
                    e.blank_line();
                    e.println(format!("expect(spy).toHaveBeenCalledWith({});", value));
                }
            });
        }
    });
}

fn emit_view_query_tests(e: &mut SpecEmitter, desc: &ClassDescription) {
    if desc.view_children.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('view queries', () => {", "});", |e| {
        for (index, query) in desc.view_children.iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let title = format!("should resolve the \"{}\" {} query", query.name, query.decorator);
            let access = member_access("component", &query.name);
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                e.println("fixture.detectChanges();");
                e.blank_line();
                e.println(format!("expect(() => {}).not.toThrow();", access));
                match &query.selector {
                    Some(selector) => e.println(format!(
                        "// TODO: render a match for {} and assert on {}",
                        selector, access
                    )),
                    None => e.println(format!("// TODO: assert on {}", access)),
                }
            });
        }
    });
}

fn is_tested_property(desc: &ClassDescription, property: &PropertyInfo) -> bool {
    property.visibility == Visibility::Public
        && !property.is_static
        && !property.name.starts_with('_')
        && !desc.is_binding(&property.name)
}

fn emit_property_tests(e: &mut SpecEmitter, ctx: &mut SpecContext<'_>) {
    let desc = ctx.desc;
    let properties: Vec<&PropertyInfo> = desc
        .properties
        .iter()
        .filter(|property| is_tested_property(desc, property))
        .filter(|property| property.initializer.is_some() || property.is_writable())
        .collect();
    if properties.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('properties', () => {", "});", |e| {
        let mut first = true;
        for property in properties {
            let access = member_access("component", &property.name);
            if property.initializer.is_some() {
                if !first {
                    e.blank_line();
                }
                first = false;
                let title = format!("should initialise \"{}\"", property.name);
                e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                    e.println(format!("expect({}).toBeDefined();", access));
                });
            }
            if property.is_writable() {
                if !first {
                    e.blank_line();
                }
                first = false;
                let value = ctx.mock(&property.type_name, Some(&property.name));
                let title = format!("should allow assigning \"{}\"", property.name);
                e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                    e.println(format!("const value = {};", value));
                    e.blank_line();
                    e.println(format!("{} = value;", access));
                    e.blank_line();
                    e.println(format!("expect({}).toBe(value);", access));
                });
            }
        }
    });
}

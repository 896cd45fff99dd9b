use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{
    describe_open, emit_lifecycle_tests, emit_method_tests, SpecContext,
};
use crate::class_description::ClassDescription;
use crate::emitter::{member_access, quote, SpecEmitter};
use crate::mock_providers::{import_core, MockPlan};

/// `tag`, `[attr]`, `[attr=value]` and `.class` parts of a simple CSS selector.
static SIMPLE_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z][\w-]*)?((?:\[[^\]]+\]|\.[\w-]+)*)$").unwrap()
});

static SELECTOR_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]=]+)(?:=([^\]]*))?\]|\.([\w-]+)").unwrap());

const VOID_ELEMENTS: &[&str] = &["input", "img", "br", "hr", "meta", "link", "source"];

/// Markup for one element matching `selector`, or `None` when the selector
/// is too complex to satisfy.
pub fn host_element(selector: &str, text: &str) -> Option<String> {
    let first = selector.split(',').next()?.trim();
    let captures = SIMPLE_SELECTOR.captures(first)?;
    let tag = captures.get(1).map_or("div", |m| m.as_str());
    let parts = captures.get(2).map_or("", |m| m.as_str());
    if tag == "div" && parts.is_empty() && captures.get(1).is_none() {
        return None;
    }

    let mut attributes: Vec<String> = Vec::new();
    let mut classes: Vec<&str> = Vec::new();
    for part in SELECTOR_PART.captures_iter(parts) {
        if let Some(class) = part.get(3) {
            classes.push(class.as_str());
        } else if let Some(name) = part.get(1) {
            match part.get(2) {
                Some(value) => {
                    let value = value.as_str().trim_matches(|c| c == '"' || c == '\'');
                    attributes.push(format!("{}=\"{}\"", name.as_str().trim(), value));
                }
                None => attributes.push(name.as_str().trim().to_string()),
            }
        }
    }
    if !classes.is_empty() {
        attributes.push(format!("class=\"{}\"", classes.join(" ")));
    }

    let open = if attributes.is_empty() {
        tag.to_string()
    } else {
        format!("{} {}", tag, attributes.join(" "))
    };
    if VOID_ELEMENTS.contains(&tag) {
        Some(format!("<{} />", open))
    } else {
        Some(format!("<{}>{}</{}>", open, text, tag))
    }
}

/// Attribute derived from the class name when no selector is declared.
fn fallback_selector(class_name: &str) -> String {
    let stem = class_name.strip_suffix("Directive").unwrap_or(class_name);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => format!("[{}{}]", first.to_ascii_lowercase(), chars.as_str()),
        None => "[directive]".to_string(),
    }
}

/// Spec for a `@Directive` class, hosted by a generated `TestComponent`.
pub fn render_directive_spec(desc: &ClassDescription) -> String {
    let mut ctx = SpecContext::new(desc);
    ctx.testing("ComponentFixture");
    ctx.testing("TestBed");
    import_core(&mut ctx.imports, "Component");
    import_core(&mut ctx.imports, "DebugElement");
    ctx.imports.add("By", "@angular/platform-browser");

    let plan = MockPlan::build(desc, &mut ctx.imports);
    for handle in &plan.handles {
        ctx.reserve(handle.identifier.clone());
    }

    let selector = desc
        .metadata("selector")
        .map(String::from)
        .unwrap_or_else(|| fallback_selector(&desc.class_name));

    let mut e = SpecEmitter::new();
    emit_test_component(&mut e, desc, &selector);
    e.blank_line();

    e.block(describe_open(desc), "});", |e| {
        e.println("let fixture: ComponentFixture<TestComponent>;");
        e.println("let directiveElement: DebugElement;");
        e.println(format!("let directive: {};", desc.type_reference()));
        plan.emit_handle_declarations(e);
        e.blank_line();

        e.block("beforeEach(async () => {", "});", |e| {
            e.block("await TestBed.configureTestingModule({", "}).compileComponents();", |e| {
                e.println(format!("imports: [TestComponent, {}],", desc.class_name));
                plan.emit_providers(e, &[]);
            });
            e.blank_line();
            e.println("fixture = TestBed.createComponent(TestComponent);");
            e.println(format!(
                "directiveElement = fixture.debugElement.query(By.directive({}));",
                desc.class_name
            ));
            e.println(format!(
                "directive = directiveElement.injector.get({});",
                desc.class_name
            ));
            plan.emit_handle_initialization(e);
            e.println("fixture.detectChanges();");
        });

        e.blank_line();
        e.block("describe('creation', () => {", "});", |e| {
            e.block("it('should attach to the host element', () => {", "});", |e| {
                e.println("expect(directiveElement).toBeTruthy();");
            });
            e.blank_line();
            e.block(
                format!("it('should create an instance of {}', () => {{", desc.class_name),
                "});",
                |e| e.println(format!("expect(directive).toBeInstanceOf({});", desc.class_name)),
            );
        });

        e.blank_line();
        e.block("describe('behaviour', () => {", "});", |e| {
            e.block("it('should update the host element', () => {", "});", |e| {
                e.println("const element: HTMLElement = directiveElement.nativeElement;");
                e.blank_line();
                e.println("expect(element).toBeDefined();");
                e.println("// TODO: assert on the changes the directive makes to its host");
            });
            e.blank_line();
            e.block("it('should react to host events', () => {", "});", |e| {
                e.println("const element: HTMLElement = directiveElement.nativeElement;");
                e.blank_line();
                e.println("element.click();");
                e.println("fixture.detectChanges();");
                e.blank_line();
                e.println("expect(element).toBeDefined();");
                e.println("// TODO: assert on the expected state after the event");
            });
        });

        e.blank_line();
        e.block("describe('DOM manipulation', () => {", "});", |e| {
            for (title, member) in [
                ("should expose CSS classes on the host", "classList"),
                ("should expose attributes on the host", "attributes"),
                ("should expose inline styles on the host", "style"),
            ] {
                e.block(format!("it('{}', () => {{", title), "});", |e| {
                    e.println("const element: HTMLElement = directiveElement.nativeElement;");
                    e.blank_line();
                    e.println(format!("expect(element.{}).toBeDefined();", member));
                    e.println(format!("// TODO: assert on the expected {}", member));
                });
                e.blank_line();
            }
        });

        emit_host_binding_tests(e, desc);
        emit_lifecycle_tests(e, &mut ctx, "directive");
        emit_method_tests(e, &mut ctx, "directive", &[]);

        e.blank_line();
        e.block("describe('edge cases', () => {", "});", |e| {
            e.block("it('should apply to every matching element', () => {", "});", |e| {
                e.println(format!(
                    "const matches = fixture.debugElement.queryAll(By.directive({}));",
                    desc.class_name
                ));
                e.blank_line();
                e.println("expect(matches.length).toBe(2);");
            });
            e.blank_line();
            e.block("it('should survive being destroyed', () => {", "});", |e| {
                e.println("expect(() => fixture.destroy()).not.toThrow();");
            });
        });
    });

    plan.emit_factories(&mut e);
    ctx.finish(e)
}

fn emit_test_component(e: &mut SpecEmitter, desc: &ClassDescription, selector: &str) {
    let first = host_element(selector, "First host");
    let second = host_element(selector, "Second host");

    e.block("@Component({", "})", |e| {
        e.println("selector: 'test-host',");
        e.println("standalone: true,");
        e.println(format!("imports: [{}],", desc.class_name));
        e.println("template: `");
        e.inc_indent();
        match (first, second) {
            (Some(first), Some(second)) => {
                e.println(first);
                e.println(second);
            }
            _ => {
                e.println(format!("<!-- TODO: add two elements matching {} -->", selector));
            }
        }
        e.dec_indent();
        e.println("`,");
    });
    e.println("class TestComponent {}");
}

fn emit_host_binding_tests(e: &mut SpecEmitter, desc: &ClassDescription) {
    if desc.host_bindings.is_empty() {
        return;
    }
    e.blank_line();
    e.block("describe('host bindings', () => {", "});", |e| {
        for (index, binding) in desc.host_bindings.iter().enumerate() {
            if index > 0 {
                e.blank_line();
            }
            let target = binding.binding.as_deref().unwrap_or(&binding.name);
            let title = format!("should bind \"{}\" to the host", target);
            let access = member_access("directive", &binding.name);
            e.block(format!("it({}, () => {{", quote(&title)), "});", |e| {
                e.println("fixture.detectChanges();");
                e.blank_line();
                e.println(format!("expect(() => {}).not.toThrow();", access));
                e.println(format!("// TODO: assert that the host reflects {}", access));
            });
        }
    });
}

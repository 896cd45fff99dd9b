//! Component Template Tests
//!
//! Renders specs for hand-built component descriptions and checks the
//! generated TestBed setup, bindings and method tests.

use chrono::{TimeZone, Utc};
use ng_testgen::{
    ClassDescription, ClassKind, Dependency, GeneratorOptions, InputBinding, MethodInfo,
    OutputBinding, ParameterInfo, PropertyInfo, ReactiveKind, TestGenerator, ViewChildQuery,
    Visibility,
};

fn generator() -> TestGenerator {
    TestGenerator::new(GeneratorOptions {
        generated_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    })
}

fn method(name: &str, return_type: &str) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        return_type: return_type.to_string(),
        visibility: Visibility::Public,
        params: Vec::new(),
        is_async: false,
        is_static: false,
        is_abstract: false,
        decorators: Vec::new(),
        complexity: 1,
        has_return_statement: false,
        calls: Vec::new(),
    }
}

fn simple_component() -> ClassDescription {
    let mut desc = ClassDescription::new("SimpleComponent", "simple.component.ts", ClassKind::Component);
    desc.interfaces = vec!["OnInit".to_string()];
    desc.inputs.push(InputBinding {
        name: "title".into(),
        type_name: "string".into(),
        alias: None,
        required: false,
        signal: false,
    });
    desc.outputs.push(OutputBinding {
        name: "loaded".into(),
        type_name: "EventEmitter<void>".into(),
        alias: None,
        signal: false,
    });
    desc.properties.push(PropertyInfo {
        name: "count".into(),
        type_name: "number".into(),
        visibility: Visibility::Public,
        is_static: false,
        readonly: false,
        optional: false,
        initializer: Some("0".into()),
        reactive: None,
        decorators: Vec::new(),
    });
    desc.methods.push(method("ngOnInit", "void"));
    desc.methods.push(method("increment", "void"));
    desc
}

#[test]
fn should_configure_the_testbed_with_the_standalone_component() {
    let out = generator().generate(&simple_component()).unwrap();

    assert!(out.contains("import { ComponentFixture, TestBed } from '@angular/core/testing';"));
    assert!(out.contains("import { SimpleComponent } from './simple.component';"));
    assert!(out.contains("describe('SimpleComponent', () => {"));
    assert!(out.contains("imports: [SimpleComponent],"));
    assert!(out.contains("fixture = TestBed.createComponent(SimpleComponent);"));
    assert!(out.contains("expect(component).toBeTruthy();"));
}

#[test]
fn should_put_angular_imports_before_local_ones() {
    let out = generator().generate(&simple_component()).unwrap();
    let angular = out.find("from '@angular/core/testing'").unwrap();
    let local = out.find("from './simple.component'").unwrap();
    assert!(angular < local);
}

#[test]
fn should_gate_lifecycle_tests_on_implements() {
    let out = generator().generate(&simple_component()).unwrap();
    assert!(out.contains("it('should run ngOnInit', () => {"));
    assert!(!out.contains("ngOnDestroy"));
    // lifecycle hooks are not repeated as plain method tests
    assert!(!out.contains("should run ngOnInit()"));
}

#[test]
fn should_test_inputs_and_outputs() {
    let out = generator().generate(&simple_component()).unwrap();
    assert!(out.contains("fixture.componentRef.setInput('title', value);"));
    assert!(out.contains("expect(component.title).toEqual(value);"));
    assert!(out.contains("const spy = jest.spyOn(component.loaded, 'emit');"));
    assert!(out.contains("component.loaded.emit(undefined);"));
}

#[test]
fn should_assert_undefined_for_void_methods() {
    let out = generator().generate(&simple_component()).unwrap();
    assert!(out.contains("const result = component.increment();"));
    assert!(out.contains("expect(result).toBeUndefined();"));
}

#[test]
fn should_set_required_signal_inputs_before_first_change_detection() {
    let mut desc = ClassDescription::new("UserProfileComponent", "user-profile.component.ts", ClassKind::Component);
    desc.inputs.push(InputBinding {
        name: "userId".into(),
        type_name: "number".into(),
        alias: None,
        required: true,
        signal: true,
    });
    desc.outputs.push(OutputBinding {
        name: "userLoaded".into(),
        type_name: "OutputEmitterRef<User>".into(),
        alias: None,
        signal: true,
    });

    let out = generator().generate(&desc).unwrap();
    let set_input = out.find("fixture.componentRef.setInput('userId', 1);").unwrap();
    let first_detect = out.find("fixture.detectChanges();").unwrap();
    assert!(set_input < first_detect);
    assert!(out.contains("expect(component.userId()).toEqual(value);"));
    assert!(out.contains("component.userLoaded.subscribe((event) => emitted.push(event));"));
}

#[test]
fn should_skip_assignment_tests_for_signals() {
    let mut desc = ClassDescription::new("CounterComponent", "counter.component.ts", ClassKind::Component);
    desc.properties.push(PropertyInfo {
        name: "visitCount".into(),
        type_name: "WritableSignal<number>".into(),
        visibility: Visibility::Public,
        is_static: false,
        readonly: false,
        optional: false,
        initializer: Some("signal(0)".into()),
        reactive: Some(ReactiveKind::Signal),
        decorators: Vec::new(),
    });

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("expect(component.visitCount).toBeDefined();"));
    assert!(!out.contains("component.visitCount = value;"));
}

#[test]
fn should_mock_constructor_dependencies() {
    let mut desc = ClassDescription::new("UserListComponent", "user-list.component.ts", ClassKind::Component);
    desc.dependencies.push(Dependency {
        name: "users".into(),
        type_name: "UserService".into(),
        visibility: Visibility::Private,
        readonly: true,
        optional: false,
        inject_token: None,
        is_field: true,
    });

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("let mockUserService: jest.Mocked<UserService>;"));
    assert!(out.contains("{ provide: UserService, useValue: createMockUserService() },"));
    assert!(out.contains("mockUserService = TestBed.inject(UserService) as jest.Mocked<UserService>;"));
    assert!(out.contains("function createMockUserService(): jest.Mocked<UserService> {"));
}

#[test]
fn should_test_view_queries() {
    let mut desc = ClassDescription::new("ChartComponent", "chart.component.ts", ClassKind::Component);
    desc.view_children.push(ViewChildQuery {
        name: "canvas".into(),
        type_name: "ElementRef<HTMLCanvasElement>".into(),
        selector: Some("'canvas'".into()),
        decorator: "ViewChild".into(),
    });

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("describe('view queries', () => {"));
    assert!(out.contains("expect(() => component.canvas).not.toThrow();"));
}

#[test]
fn should_pass_mock_arguments_to_methods() {
    let mut desc = ClassDescription::new("FormComponent", "form.component.ts", ClassKind::Component);
    let mut submit = method("submit", "boolean");
    submit.params.push(ParameterInfo {
        name: "email".into(),
        type_name: "string".into(),
        optional: false,
        default_value: None,
        rest: false,
    });
    desc.methods.push(submit);

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("const email = 'test@example.com';"));
    assert!(out.contains("const result = component.submit(email);"));
    assert!(out.contains("expect(result).toBeDefined();"));
    assert!(out.contains("// TODO: assert on the expected result"));
}

#[test]
fn should_reference_generic_components_with_any_arguments() {
    let mut desc = ClassDescription::new("TableComponent", "table.component.ts", ClassKind::Component);
    desc.type_parameters.push(ng_testgen::TypeParameterInfo {
        name: "T".into(),
        constraint: None,
        default: None,
    });

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("let component: TableComponent<any>;"));
    assert!(out.contains("let fixture: ComponentFixture<TableComponent<any>>;"));
}

//! Service Template Tests

use chrono::{TimeZone, Utc};
use ng_testgen::{
    ClassDescription, ClassKind, Dependency, GeneratorOptions, ImportInfo, ImportKind,
    MethodInfo, ParameterInfo, TestGenerator, Visibility,
};

fn generator() -> TestGenerator {
    TestGenerator::new(GeneratorOptions {
        generated_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    })
}

fn dependency(name: &str, type_name: &str) -> Dependency {
    Dependency {
        name: name.to_string(),
        type_name: type_name.to_string(),
        visibility: Visibility::Private,
        readonly: true,
        optional: false,
        inject_token: None,
        is_field: true,
    }
}

fn method(name: &str, return_type: &str, is_async: bool) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        return_type: return_type.to_string(),
        visibility: Visibility::Public,
        params: Vec::new(),
        is_async,
        is_static: false,
        is_abstract: false,
        decorators: Vec::new(),
        complexity: 1,
        has_return_statement: true,
        calls: Vec::new(),
    }
}

fn foo_service() -> ClassDescription {
    let mut desc = ClassDescription::new("FooService", "foo.service.ts", ClassKind::Service);
    desc.decorator_metadata.insert("providedIn".into(), "root".into());
    desc.dependencies.push(dependency("foo", "Foo"));
    desc.imports.push(ImportInfo {
        kind: ImportKind::Named,
        names: vec!["Foo".into()],
        from: "./foo".into(),
    });
    desc
}

#[test]
fn should_provide_a_mock_for_each_dependency() {
    let out = generator().generate(&foo_service()).unwrap();

    assert!(out.contains("import { TestBed } from '@angular/core/testing';"));
    assert!(out.contains("import { Foo } from './foo';"));
    assert!(out.contains("providers: ["));
    assert!(out.contains("FooService,"));
    assert!(out.contains("{ provide: Foo, useValue: createMockFoo() },"));
    assert!(out.contains("service = TestBed.inject(FooService);"));
    assert!(out.contains("function createMockFoo(): jest.Mocked<Foo> {"));
}

#[test]
fn should_test_provided_in_scope() {
    let out = generator().generate(&foo_service()).unwrap();
    assert!(out.contains("it('should be provided in \"root\"', () => {"));
}

#[test]
fn should_assert_each_injected_dependency() {
    let out = generator().generate(&foo_service()).unwrap();
    assert!(out.contains("it('should inject Foo', () => {"));
    assert!(out.contains("expect((service as any).foo).toBe(mockFoo);"));
}

#[test]
fn should_use_testing_providers_for_http_and_router() {
    let mut desc = ClassDescription::new("ApiService", "api.service.ts", ClassKind::Service);
    desc.dependencies.push(dependency("http", "HttpClient"));
    desc.dependencies.push(dependency("router", "Router"));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("import { provideHttpClient, HttpClient } from '@angular/common/http';"));
    assert!(out.contains("import { provideHttpClientTesting } from '@angular/common/http/testing';"));
    assert!(out.contains("import { provideRouter, Router } from '@angular/router';"));
    assert!(out.contains("provideHttpClient(),"));
    assert!(out.contains("provideHttpClientTesting(),"));
    assert!(out.contains("provideRouter([]),"));
    assert!(!out.contains("createMockHttpClient"));
}

#[test]
fn should_only_check_definedness_for_observable_results() {
    let mut desc = ClassDescription::new("UserService", "user.service.ts", ClassKind::Service);
    desc.methods.push(method("getUsers", "Observable<User[]>", false));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("const result = service.getUsers();"));
    assert!(out.contains("expect(result).toBeDefined();"));
    assert!(out.contains("// TODO: subscribe and assert on the emitted values"));
    assert!(!out.contains("toBeUndefined"));
    // observables get no error test
    assert!(!out.contains("should handle errors in getUsers()"));
}

#[test]
fn should_generate_error_tests_for_async_and_sync_methods() {
    let mut desc = ClassDescription::new("CartService", "cart.service.ts", ClassKind::Service);
    let mut save = method("save", "Promise<boolean>", true);
    save.params.push(ParameterInfo {
        name: "itemCount".into(),
        type_name: "number".into(),
        optional: false,
        default_value: None,
        rest: false,
    });
    desc.methods.push(save);
    desc.methods.push(method("total", "number", false));
    desc.methods.push(method("clear", "void", false));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("const result = await service.save(itemCount);"));
    assert!(out.contains("await expect(service.save(10)).rejects.toThrow();"));
    assert!(out.contains("expect(() => service.total()).not.toThrow();"));
    assert!(!out.contains("should handle errors in clear()"));
}

#[test]
fn should_include_inject_function_fields() {
    let mut desc = ClassDescription::new("StoreService", "store.service.ts", ClassKind::Service);
    let mut store = dependency("store", "Store<AppState>");
    store.visibility = Visibility::Private;
    desc.field_injections.push(store);

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("let mockStore: jest.Mocked<Store<AppState>>;"));
    assert!(out.contains("{ provide: Store, useValue: createMockStore() },"));
    assert!(out.contains("mockStore = TestBed.inject(Store) as jest.Mocked<Store<AppState>>;"));
}

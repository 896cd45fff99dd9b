//! Pipe Template Tests

use chrono::{TimeZone, Utc};
use ng_testgen::{
    ClassDescription, ClassKind, Dependency, GeneratorOptions, MethodInfo, ParameterInfo,
    TestGenerator, Visibility,
};

fn generator() -> TestGenerator {
    TestGenerator::new(GeneratorOptions {
        generated_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    })
}

fn param(name: &str, type_name: &str) -> ParameterInfo {
    ParameterInfo {
        name: name.to_string(),
        type_name: type_name.to_string(),
        optional: false,
        default_value: None,
        rest: false,
    }
}

fn transform(params: Vec<ParameterInfo>, return_type: &str) -> MethodInfo {
    MethodInfo {
        name: "transform".to_string(),
        return_type: return_type.to_string(),
        visibility: Visibility::Public,
        params,
        is_async: false,
        is_static: false,
        is_abstract: false,
        decorators: Vec::new(),
        complexity: 1,
        has_return_statement: true,
        calls: Vec::new(),
    }
}

fn upper_pipe() -> ClassDescription {
    let mut desc = ClassDescription::new("UpperPipe", "upper.pipe.ts", ClassKind::Pipe);
    desc.decorator_metadata.insert("name".into(), "upper".into());
    desc.methods.push(transform(vec![param("value", "string")], "string"));
    desc
}

#[test]
fn should_generate_the_upper_pipe_suite() {
    let out = generator().generate(&upper_pipe()).unwrap();

    assert!(out.contains("import { UpperPipe } from './upper.pipe';"));
    assert!(out.contains("describe('UpperPipe', () => {"));
    assert!(out.contains("pipe = new UpperPipe();"));
    assert!(out.contains("it('should create', () => {"));
    assert!(out.contains("it('should transform a value', () => {"));
    assert!(out.contains("it('should handle null and undefined', () => {"));
    assert!(out.contains("expect(() => pipe.transform(null as any)).not.toThrow();"));
    assert!(out.contains("expect(() => pipe.transform(undefined as any)).not.toThrow();"));
    assert!(out.contains("it('should transform 1000 values within a second', () => {"));
    assert!(out.contains("expect(duration).toBeLessThan(1000);"));
}

#[test]
fn should_not_need_testbed_for_plain_pipes() {
    let out = generator().generate(&upper_pipe()).unwrap();
    assert!(!out.contains("TestBed"));
    assert!(!out.contains("should run transform()"));
}

#[test]
fn should_use_string_values_for_string_inputs() {
    let out = generator().generate(&upper_pipe()).unwrap();
    assert!(out.contains("const value = 'test-value';"));
    assert!(out.contains("const result = pipe.transform('');"));
    assert!(out.contains("pipe.transform(`test-value-${i}`);"));
}

#[test]
fn should_pass_required_extra_arguments() {
    let mut desc = ClassDescription::new("TruncatePipe", "truncate.pipe.ts", ClassKind::Pipe);
    let mut suffix = param("suffix", "string");
    suffix.default_value = Some("'...'".into());
    desc.methods.push(transform(
        vec![param("text", "string"), param("maxLength", "number"), suffix],
        "string",
    ));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("const result = pipe.transform(value, 10);"));
    assert!(out.contains("pipe.transform(null as any, 10)"));
}

#[test]
fn should_pass_mocks_to_the_constructor() {
    let mut desc = ClassDescription::new("CurrencyFormatPipe", "currency-format.pipe.ts", ClassKind::Pipe);
    desc.dependencies.push(Dependency {
        name: "locale".into(),
        type_name: "LocaleService".into(),
        visibility: Visibility::Private,
        readonly: true,
        optional: false,
        inject_token: None,
        is_field: true,
    });
    desc.methods.push(transform(vec![param("amount", "number")], "string"));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("pipe = new CurrencyFormatPipe(createMockLocaleService());"));
    assert!(out.contains("function createMockLocaleService(): jest.Mocked<LocaleService> {"));
    assert!(out.contains("const result = pipe.transform(0);"));
    assert!(out.contains("pipe.transform(i);"));
}

#[test]
fn should_use_an_injection_context_for_inject_fields() {
    let mut desc = ClassDescription::new("TranslatePipe", "translate.pipe.ts", ClassKind::Pipe);
    desc.field_injections.push(Dependency {
        name: "i18n".into(),
        type_name: "I18nService".into(),
        visibility: Visibility::Private,
        readonly: true,
        optional: false,
        inject_token: None,
        is_field: true,
    });
    desc.methods.push(transform(vec![param("key", "string")], "string"));

    let out = generator().generate(&desc).unwrap();
    assert!(out.contains("{ provide: I18nService, useValue: createMockI18nService() },"));
    assert!(out.contains("pipe = TestBed.runInInjectionContext(() => new TranslatePipe());"));
    assert_eq!(out.matches("function createMockI18nService()").count(), 1);
}

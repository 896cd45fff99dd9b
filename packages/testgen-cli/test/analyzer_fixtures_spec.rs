// Analyzer fixture tests
//
// Analyze the sources under test/fixtures and run them through the
// generator, checking the parts of the description and the spec text the
// driver relies on.

use std::path::PathBuf;

use ng_testgen::{ClassKind, ReactiveKind, TestGenerator};
use ng_testgen_cli::analyzer::{analyze_file, AnalyzeError};
use ng_testgen_cli::logging::NullLogger;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test")
        .join("fixtures")
        .join(name)
}

fn generate(name: &str) -> String {
    let desc = analyze_file(&fixture(name), &NullLogger).unwrap();
    TestGenerator::default().generate(&desc).unwrap()
}

mod component_fixtures {
    use super::*;

    #[test]
    fn should_describe_a_simple_component() {
        let desc = analyze_file(&fixture("simple-example.ts"), &NullLogger).unwrap();

        assert_eq!(desc.class_name, "SimpleComponent");
        assert_eq!(desc.kind, ClassKind::Component);
        assert_eq!(desc.metadata("selector"), Some("app-simple"));
        assert_eq!(desc.interfaces, vec!["OnInit"]);

        let methods: Vec<(&str, &str)> = desc
            .methods
            .iter()
            .map(|m| (m.name.as_str(), m.return_type.as_str()))
            .collect();
        assert_eq!(
            methods,
            vec![("ngOnInit", "void"), ("increment", "number"), ("reset", "void")]
        );
        assert!(desc.methods[1].has_return_statement);
        assert_eq!(desc.methods[1].complexity, 1);
    }

    #[test]
    fn should_generate_a_component_spec() {
        let out = generate("simple-example.ts");

        assert!(out.starts_with("/**\n * Auto-generated test file"));
        assert!(out.contains("import { SimpleComponent } from './simple-example';"));
        assert!(out.contains("describe('SimpleComponent', () => {"));
        assert!(out.contains("imports: [SimpleComponent],"));
        assert!(out.contains("it('should run ngOnInit', () => {"));
        assert!(out.contains("it('should run increment()', () => {"));
        assert!(out.contains("const result = component.reset();"));
        assert!(out.contains("expect(result).toBeUndefined();"));
    }

    #[test]
    fn should_describe_signal_apis() {
        let desc = analyze_file(&fixture("angular17-example.ts"), &NullLogger).unwrap();

        assert_eq!(desc.class_name, "UserProfileComponent");
        assert_eq!(desc.field_injections.len(), 1);
        assert_eq!(desc.field_injections[0].type_name, "UserService");

        assert_eq!(desc.inputs.len(), 2);
        assert!(desc.inputs[0].required && desc.inputs[0].signal);
        assert_eq!(desc.inputs[0].type_name, "number");
        assert_eq!(desc.inputs[1].binding_name(), "isCompact");
        assert_eq!(desc.outputs[0].type_name, "OutputEmitterRef<User>");

        let loading = desc.properties.iter().find(|p| p.name == "loading").unwrap();
        assert_eq!(loading.reactive, Some(ReactiveKind::Signal));
        assert_eq!(loading.type_name, "WritableSignal<boolean>");

        assert_eq!(desc.methods[0].calls, vec!["set", "getUser", "userId"]);
    }

    #[test]
    fn should_set_required_signal_inputs_before_the_first_change_detection() {
        let out = generate("angular17-example.ts");

        let set_input = out.find("fixture.componentRef.setInput('userId', 1);").unwrap();
        let detect = out.find("fixture.detectChanges();").unwrap();
        assert!(set_input < detect);
        assert!(out.contains("{ provide: UserService, useValue: createMockUserService() },"));
        assert!(out.contains("import { UserService } from './user.service';"));
        assert!(out.contains("function createMockUserService(): jest.Mocked<UserService> {"));
    }
}

mod service_fixtures {
    use super::*;

    #[test]
    fn should_report_the_constructor_dependency() {
        let desc = analyze_file(&fixture("foo.service.ts"), &NullLogger).unwrap();

        assert_eq!(desc.kind, ClassKind::Service);
        assert_eq!(desc.dependencies.len(), 1);
        assert_eq!(desc.dependencies[0].type_name, "Foo");
        assert_eq!(desc.metadata("providedIn"), Some("root"));
    }

    #[test]
    fn should_provide_a_mock_for_the_dependency() {
        let out = generate("foo.service.ts");

        assert!(out.contains("FooService,"));
        assert!(out.contains("{ provide: Foo, useValue: createMockFoo() },"));
        assert!(out.contains("service = TestBed.inject(FooService);"));
        assert!(out.contains("it('should be provided in \"root\"', () => {"));
        assert!(out.contains("it('should inject Foo', () => {"));
    }
}

mod pipe_fixtures {
    use super::*;

    #[test]
    fn should_generate_transform_tests() {
        let out = generate("upper.pipe.ts");

        assert!(out.contains("describe('UpperPipe', () => {"));
        assert!(out.contains("pipe = new UpperPipe();"));
        assert!(out.contains("it('should create', () => {"));
        assert!(out.contains("it('should transform a value', () => {"));
        assert!(out.contains("it('should handle null and undefined', () => {"));
        assert!(out.contains("describe('performance', () => {"));
        assert!(out.contains("const iterations = 1000;"));
        assert!(!out.contains("it('should run transform()'"));
    }
}

mod directive_fixtures {
    use super::*;

    #[test]
    fn should_host_the_directive_in_a_test_component() {
        let desc = analyze_file(&fixture("highlight.directive.ts"), &NullLogger).unwrap();
        assert_eq!(desc.kind, ClassKind::Directive);
        assert_eq!(desc.host_bindings[0].binding.as_deref(), Some("style.backgroundColor"));
        assert_eq!(desc.methods[0].decorators, vec!["HostListener"]);

        let out = TestGenerator::default().generate(&desc).unwrap();
        assert!(out.contains("<div appHighlight>First host</div>"));
        assert!(out.contains("By.directive(HighlightDirective)"));
        assert!(!out.contains("provide: ElementRef"));
    }
}

mod unsupported_sources {
    use super::*;

    #[test]
    fn should_fail_when_there_is_no_class() {
        let result = analyze_file(&fixture("no-class.ts"), &NullLogger);
        assert!(matches!(result, Err(AnalyzeError::NoClassFound { .. })));
    }

    #[test]
    fn should_classify_undecorated_classes_as_unknown() {
        let desc = analyze_file(&fixture("plain.ts"), &NullLogger).unwrap();
        assert_eq!(desc.kind, ClassKind::Unknown);
        assert!(TestGenerator::default().generate(&desc).is_err());
    }

    #[test]
    fn should_report_missing_files_as_io_errors() {
        let result = analyze_file(&fixture("missing.ts"), &NullLogger);
        assert!(matches!(result, Err(AnalyzeError::Io { .. })));
    }
}

//! Mock providers for TestBed
//!
//! Every injected dependency becomes one provider entry. A few framework
//! services have dedicated testing providers; every other class type is
//! replaced by a `jest.Mocked` object built by a `createMockX()` factory
//! emitted at the end of the spec.

use crate::class_description::{ClassDescription, Dependency};
use crate::emitter::SpecEmitter;
use crate::import_set::ImportSet;
use crate::mock_values;
use crate::type_names;

const ANGULAR_CORE: &str = "@angular/core";
const ANGULAR_HTTP: &str = "@angular/common/http";
const ANGULAR_HTTP_TESTING: &str = "@angular/common/http/testing";
const ANGULAR_ROUTER: &str = "@angular/router";

/// Types the TestBed provides by itself for components and directives.
const FRAMEWORK_PROVIDED: &[&str] = &[
    "ElementRef",
    "Renderer2",
    "ViewContainerRef",
    "TemplateRef",
    "ChangeDetectorRef",
    "Injector",
    "NgZone",
    "DestroyRef",
];

const HTTP_TYPES: &[&str] = &["HttpClient", "HttpBackend", "HttpHandler"];

const PRIMITIVE_TYPES: &[&str] = &["string", "number", "boolean", "any", "unknown", "object"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `provideHttpClient()` with the testing backend
    HttpTesting,
    /// `provideRouter([])`
    Router,
    /// Stub route with empty snapshot and observables
    ActivatedRoute,
    /// Nothing to provide
    Framework,
    /// Token bound to a literal value
    Value,
    /// Token bound to a `createMockX()` object
    Mocked,
}

impl ProviderKind {
    pub fn of(dependency: &Dependency) -> Self {
        let base = type_names::base_type_name(type_names::primary_type(&dependency.type_name));
        if dependency.inject_token.is_none() && HTTP_TYPES.contains(&base) {
            ProviderKind::HttpTesting
        } else if base == "Router" {
            ProviderKind::Router
        } else if base == "ActivatedRoute" {
            ProviderKind::ActivatedRoute
        } else if dependency.inject_token.is_none() && FRAMEWORK_PROVIDED.contains(&base) {
            ProviderKind::Framework
        } else if PRIMITIVE_TYPES.contains(&base) || base.is_empty() {
            ProviderKind::Value
        } else {
            ProviderKind::Mocked
        }
    }

    /// Whether the spec keeps a typed handle on the injected instance.
    pub fn has_handle(self) -> bool {
        !matches!(self, ProviderKind::Framework | ProviderKind::Value)
    }
}

/// A `let mockX: jest.Mocked<X>` handle resolved through `TestBed.inject`.
#[derive(Debug, Clone, PartialEq)]
pub struct MockHandle {
    pub identifier: String,
    pub type_name: String,
    pub token: String,
    pub dependency_name: String,
}

#[derive(Debug, Default, Clone)]
pub struct MockPlan {
    pub providers: Vec<String>,
    pub handles: Vec<MockHandle>,
    /// Types that need a `createMockX()` factory.
    pub factories: Vec<String>,
}

impl MockPlan {
    /// Plan providers for every injection of `desc`, registering imports.
    pub fn build(desc: &ClassDescription, imports: &mut ImportSet) -> Self {
        let mut plan = MockPlan::default();
        let mut http_registered = false;

        for dependency in desc.injections() {
            let kind = ProviderKind::of(dependency);
            let type_name = type_names::primary_type(&dependency.type_name).to_string();
            let token = dependency.provider_token().to_string();

            match kind {
                ProviderKind::HttpTesting => {
                    if !http_registered {
                        imports.add("provideHttpClient", ANGULAR_HTTP);
                        imports.add("provideHttpClientTesting", ANGULAR_HTTP_TESTING);
                        plan.providers.push("provideHttpClient()".to_string());
                        plan.providers.push("provideHttpClientTesting()".to_string());
                        http_registered = true;
                    }
                    import_symbol(desc, imports, &type_name, Some(ANGULAR_HTTP));
                }
                ProviderKind::Router => {
                    imports.add("provideRouter", ANGULAR_ROUTER);
                    import_symbol(desc, imports, "Router", Some(ANGULAR_ROUTER));
                    plan.providers.push("provideRouter([])".to_string());
                }
                ProviderKind::ActivatedRoute => {
                    import_symbol(desc, imports, "ActivatedRoute", Some(ANGULAR_ROUTER));
                    imports.add("of", "rxjs");
                    plan.providers.push(activated_route_provider(&token));
                }
                ProviderKind::Framework => continue,
                ProviderKind::Value => {
                    import_type(desc, imports, &token);
                    let value = mock_values::mock_value(&type_name, Some(&dependency.name));
                    if mock_values::needs_rxjs(value) {
                        imports.add("of", "rxjs");
                    }
                    plan.providers
                        .push(format!("{{ provide: {}, useValue: {} }}", token, value));
                }
                ProviderKind::Mocked => {
                    import_type(desc, imports, &type_name);
                    import_type(desc, imports, &token);
                    let factory = type_names::mock_factory_name(&type_name);
                    plan.providers
                        .push(format!("{{ provide: {}, useValue: {}() }}", token, factory));
                    if !plan.factories.contains(&type_name) {
                        plan.factories.push(type_name.clone());
                    }
                }
            }

            if kind.has_handle() {
                let identifier = plan.unique_identifier(type_names::mock_identifier(&type_name));
                plan.handles.push(MockHandle {
                    identifier,
                    type_name,
                    token,
                    dependency_name: dependency.name.clone(),
                });
            }
        }

        plan
    }

    pub fn handle_for(&self, dependency: &Dependency) -> Option<&MockHandle> {
        self.handles
            .iter()
            .find(|handle| handle.dependency_name == dependency.name)
    }

    fn unique_identifier(&self, base: String) -> String {
        let taken = |candidate: &str| self.handles.iter().any(|h| h.identifier == candidate);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// `providers: [...]` entries, one per line, with `leading` entries first.
    pub fn emit_providers(&self, emitter: &mut SpecEmitter, leading: &[String]) {
        let entries: Vec<&String> = leading.iter().chain(&self.providers).collect();
        if entries.is_empty() {
            return;
        }
        emitter.block("providers: [", "],", |e| {
            for entry in entries {
                e.println_all(&format!("{},", entry));
            }
        });
    }

    pub fn emit_handle_declarations(&self, emitter: &mut SpecEmitter) {
        for handle in &self.handles {
            emitter.println(format!(
                "let {}: jest.Mocked<{}>;",
                handle.identifier, handle.type_name
            ));
        }
    }

    pub fn emit_handle_initialization(&self, emitter: &mut SpecEmitter) {
        for handle in &self.handles {
            emitter.println(format!(
                "{} = TestBed.inject({}) as jest.Mocked<{}>;",
                handle.identifier, handle.token, handle.type_name
            ));
        }
    }

    pub fn emit_factories(&self, emitter: &mut SpecEmitter) {
        for type_name in &self.factories {
            emitter.blank_line();
            emitter.block(
                format!(
                    "function {}(): jest.Mocked<{}> {{",
                    type_names::mock_factory_name(type_name),
                    type_name
                ),
                "}",
                |e| {
                    e.block("return {", &format!("}} as unknown as jest.Mocked<{}>;", type_name), |e| {
                        e.println("// TODO: stub the members the class under test relies on");
                    });
                },
            );
        }
    }
}

fn activated_route_provider(token: &str) -> String {
    [
        "{".to_string(),
        format!("  provide: {},", token),
        "  useValue: {".to_string(),
        "    snapshot: { params: {}, queryParams: {}, data: {} },".to_string(),
        "    params: of({}),".to_string(),
        "    queryParams: of({}),".to_string(),
        "    data: of({}),".to_string(),
        "  },".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

/// Import a symbol from wherever the analyzed file imported it, or `fallback`.
pub fn import_symbol(
    desc: &ClassDescription,
    imports: &mut ImportSet,
    symbol: &str,
    fallback: Option<&str>,
) {
    let base = type_names::base_type_name(symbol);
    if let Some(from) = desc.import_source_of(base).or(fallback) {
        imports.add(base, from);
    }
}

/// Import every identifier of a type string the analyzed file imported.
pub fn import_type(desc: &ClassDescription, imports: &mut ImportSet, type_name: &str) {
    for ident in type_names::referenced_identifiers(type_name) {
        if let Some(from) = desc.import_source_of(ident) {
            imports.add(ident, from);
        }
    }
}

/// `@angular/core` symbols used by generated host components.
pub fn import_core(imports: &mut ImportSet, symbol: &str) {
    imports.add(symbol, ANGULAR_CORE);
}

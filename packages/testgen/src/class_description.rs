//! Class description model
//!
//! The flat record extracted from one source file. It is built once by the
//! analyzer and only read afterwards; every consumer receives it by shared
//! reference.

use indexmap::IndexMap;
use serde::Serialize;

use crate::kind::ClassKind;
use crate::type_names;

/// Angular lifecycle interfaces and the hook method each one declares.
pub const LIFECYCLE_HOOKS: &[(&str, &str)] = &[
    ("OnChanges", "ngOnChanges"),
    ("OnInit", "ngOnInit"),
    ("DoCheck", "ngDoCheck"),
    ("AfterContentInit", "ngAfterContentInit"),
    ("AfterContentChecked", "ngAfterContentChecked"),
    ("AfterViewInit", "ngAfterViewInit"),
    ("AfterViewChecked", "ngAfterViewChecked"),
    ("OnDestroy", "ngOnDestroy"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A constructor parameter or an `inject()` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    pub readonly: bool,
    pub optional: bool,
    /// Token passed to `@Inject(...)` or `inject(...)` when it differs from the type.
    pub inject_token: Option<String>,
    /// Whether the dependency is reachable as `this.<name>`.
    pub is_field: bool,
}

impl Dependency {
    /// Token the dependency is resolved with: the `@Inject` token, or the
    /// type without its generic arguments.
    pub fn provider_token(&self) -> &str {
        match &self.inject_token {
            Some(token) => token,
            None => type_names::base_type_name(type_names::primary_type(&self.type_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
    pub default_value: Option<String>,
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub name: String,
    pub return_type: String,
    pub visibility: Visibility,
    pub params: Vec<ParameterInfo>,
    pub is_async: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub decorators: Vec<String>,
    pub complexity: u32,
    pub has_return_statement: bool,
    /// Distinct names of `obj.name(...)` calls in the body.
    pub calls: Vec<String>,
}

/// Angular API a property is initialised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactiveKind {
    Signal,
    Computed,
    Input,
    Model,
    Output,
    EventEmitter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub readonly: bool,
    pub optional: bool,
    pub initializer: Option<String>,
    pub reactive: Option<ReactiveKind>,
    pub decorators: Vec<String>,
}

impl PropertyInfo {
    /// A plain field a test may assign to.
    pub fn is_writable(&self) -> bool {
        !self.readonly && !self.is_static && self.reactive.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBinding {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub alias: Option<String>,
    /// Angular-required: `input.required()` or `@Input({ required: true })`.
    pub required: bool,
    pub signal: bool,
}

impl InputBinding {
    pub fn binding_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputBinding {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub alias: Option<String>,
    pub signal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewChildQuery {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub selector: Option<String>,
    pub decorator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostBindingInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub binding: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Named,
    Default,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    pub kind: ImportKind,
    /// Local names brought into scope.
    pub names: Vec<String>,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterInfo {
    pub name: String,
    pub constraint: Option<String>,
    pub default: Option<String>,
}

/// Everything the templates know about the class under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescription {
    pub class_name: String,
    pub file_name: String,
    pub kind: ClassKind,
    pub decorators: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub field_injections: Vec<Dependency>,
    pub methods: Vec<MethodInfo>,
    pub properties: Vec<PropertyInfo>,
    pub decorator_metadata: IndexMap<String, String>,
    pub interfaces: Vec<String>,
    pub inputs: Vec<InputBinding>,
    pub outputs: Vec<OutputBinding>,
    pub view_children: Vec<ViewChildQuery>,
    pub host_bindings: Vec<HostBindingInfo>,
    pub imports: Vec<ImportInfo>,
    pub type_parameters: Vec<TypeParameterInfo>,
}

impl ClassDescription {
    /// An empty description, mostly useful as a base for tests.
    pub fn new(class_name: impl Into<String>, file_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            class_name: class_name.into(),
            file_name: file_name.into(),
            kind,
            decorators: kind.decorator_name().map(String::from).into_iter().collect(),
            dependencies: Vec::new(),
            field_injections: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            decorator_metadata: IndexMap::new(),
            interfaces: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            view_children: Vec::new(),
            host_bindings: Vec::new(),
            imports: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces
            .iter()
            .any(|name| type_names::base_type_name(name) == interface)
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.decorator_metadata.get(key).map(String::as_str)
    }

    /// Relative specifier of the analyzed file, as seen from its spec file.
    pub fn module_specifier(&self) -> String {
        let stem = ["ts", "tsx", "mts", "cts"]
            .iter()
            .find_map(|ext| {
                self.file_name
                    .strip_suffix(ext)
                    .and_then(|rest| rest.strip_suffix('.'))
            })
            .unwrap_or(&self.file_name);
        format!("./{}", stem)
    }

    /// Class name usable in a type position: generic classes get `any` arguments.
    pub fn type_reference(&self) -> String {
        if self.type_parameters.is_empty() {
            self.class_name.clone()
        } else {
            let args = vec!["any"; self.type_parameters.len()].join(", ");
            format!("{}<{}>", self.class_name, args)
        }
    }

    /// Lifecycle hooks the class declares through `implements`, in call order.
    pub fn lifecycle_hooks(&self) -> Vec<&'static str> {
        LIFECYCLE_HOOKS
            .iter()
            .filter(|(interface, _)| self.implements(interface))
            .map(|(_, hook)| *hook)
            .collect()
    }

    /// Public instance and static methods that deserve a dedicated test.
    pub fn testable_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter().filter(|method| {
            method.visibility == Visibility::Public
                && !method.is_abstract
                && !is_lifecycle_hook(&method.name)
        })
    }

    /// Constructor dependencies followed by `inject()` fields, one per token.
    pub fn injections(&self) -> Vec<&Dependency> {
        let mut seen: Vec<&str> = Vec::new();
        let mut injections = Vec::new();
        for dependency in self.dependencies.iter().chain(&self.field_injections) {
            let token = dependency.provider_token();
            if !seen.contains(&token) {
                seen.push(token);
                injections.push(dependency);
            }
        }
        injections
    }

    /// Module a symbol was imported from in the analyzed file.
    pub fn import_source_of(&self, symbol: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|import| import.names.iter().any(|name| name == symbol))
            .map(|import| import.from.as_str())
    }

    pub fn is_binding(&self, property: &str) -> bool {
        self.inputs.iter().any(|input| input.name == property)
            || self.outputs.iter().any(|output| output.name == property)
            || self.view_children.iter().any(|query| query.name == property)
            || self.host_bindings.iter().any(|binding| binding.name == property)
    }
}

pub fn is_lifecycle_hook(method_name: &str) -> bool {
    LIFECYCLE_HOOKS.iter().any(|(_, hook)| *hook == method_name)
}

//! Class analysis
//!
//! Parses one TypeScript file with oxc and reduces its main class to a
//! [`ClassDescription`]. Everything is read off the syntax tree of that one
//! file: no imports are followed and no types are checked.

use std::fs;
use std::path::Path;

use ng_testgen::type_names;
use ng_testgen::{
    ClassDescription, ClassKind, Dependency, HostBindingInfo, ImportInfo, ImportKind,
    InputBinding, MethodInfo, OutputBinding, ParameterInfo, PropertyInfo, TypeParameterInfo,
    ViewChildQuery, Visibility,
};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, CallExpression, Class, ClassElement, Declaration,
    Decorator, ExportDefaultDeclarationKind, Expression, FormalParameters,
    ImportDeclarationSpecifier, MethodDefinition, MethodDefinitionKind, MethodDefinitionType,
    ModuleExportName, ObjectPropertyKind, Program, PropertyDefinition, Statement,
};
use oxc_parser::Parser;
use oxc_span::GetSpan;

use super::body::{scan_body, BodySummary};
use super::error::AnalyzeError;
use super::host::{
    annotation_text, call_target, decorator_arguments, decorator_name, decorator_names,
    find_decorator, first_argument, is_true, object_property, property_key_name, source_text,
    string_value, unquote, visibility,
};
use super::types::{
    fallback_return_type, infer_call_type, infer_expression_type, injected_type, reactive_kind,
    signal_value_type, UNKNOWN_TYPE,
};
use crate::config::{ParserSettings, ProjectConfig};
use crate::logging::Logger;

/// Name given to `export default class { ... }`.
pub const ANONYMOUS_CLASS: &str = "UnknownClass";

const QUERY_DECORATORS: &[&str] = &["ViewChild", "ViewChildren", "ContentChild", "ContentChildren"];
const QUERY_FUNCTIONS: &[&str] = &["viewChild", "viewChildren", "contentChild", "contentChildren"];

/// Read `path`, pick up the nearest tsconfig and analyze the source.
pub fn analyze_file(path: &Path, logger: &dyn Logger) -> Result<ClassDescription, AnalyzeError> {
    let source = fs::read_to_string(path).map_err(|source| AnalyzeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = ProjectConfig::discover(path, logger);
    let settings = ParserSettings::for_file(path, config.as_ref().map(|(_, config)| config));
    if let Some((config_path, _)) = config.as_ref().filter(|_| settings.decorators_disabled()) {
        logger.warn(&format!(
            "{} sets experimentalDecorators to false; Angular decorators may not be recognised",
            config_path.display()
        ));
    }

    analyze_source(&source, path, &settings, logger)
}

pub fn analyze_source(
    source: &str,
    path: &Path,
    settings: &ParserSettings,
    logger: &dyn Logger,
) -> Result<ClassDescription, AnalyzeError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, settings.source_type).parse();

    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map(|error| error.to_string())
            .unwrap_or_else(|| "unrecoverable syntax error".to_string());
        return Err(AnalyzeError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }
    for error in &ret.errors {
        logger.warn(&format!("{}: {}", path.display(), error));
    }

    let program = ret.program;
    let class = select_class(&program).ok_or_else(|| AnalyzeError::NoClassFound {
        path: path.to_path_buf(),
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut desc = ClassAnalyzer { source }.describe(class, file_name);
    desc.imports = collect_imports(&program);

    logger.debug(&format!(
        "{}: {} {} ({} methods, {} properties, {} dependencies)",
        path.display(),
        desc.kind,
        desc.class_name,
        desc.methods.len(),
        desc.properties.len(),
        desc.dependencies.len() + desc.field_injections.len()
    ));
    Ok(desc)
}

/// The first exported class, else the first class declared. A class counts
/// as exported when declared with `export` or named by a local
/// `export { Foo }` / `export default Foo`.
fn select_class<'p, 'a>(program: &'p Program<'a>) -> Option<&'p Class<'a>> {
    let exported_names = local_export_names(program);
    let is_exported = |class: &Class<'_>| {
        class
            .id
            .as_ref()
            .is_some_and(|id| exported_names.contains(&id.name.as_str()))
    };

    let exported = program.body.iter().find_map(|statement| match statement {
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::ClassDeclaration(class)) => Some(&**class),
            _ => None,
        },
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(&**class),
            _ => None,
        },
        Statement::ClassDeclaration(class) if is_exported(class) => Some(&**class),
        _ => None,
    });

    exported.or_else(|| {
        program.body.iter().find_map(|statement| match statement {
            Statement::ClassDeclaration(class) => Some(&**class),
            _ => None,
        })
    })
}

/// Local names exported without a declaration of their own.
fn local_export_names<'p>(program: &'p Program<'_>) -> Vec<&'p str> {
    let mut names = Vec::new();
    for statement in &program.body {
        match statement {
            Statement::ExportNamedDeclaration(export) if export.source.is_none() => {
                for specifier in &export.specifiers {
                    match &specifier.local {
                        ModuleExportName::IdentifierReference(id) => names.push(id.name.as_str()),
                        ModuleExportName::IdentifierName(id) => names.push(id.name.as_str()),
                        ModuleExportName::StringLiteral(_) => {}
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                if let ExportDefaultDeclarationKind::Identifier(id) = &export.declaration {
                    names.push(id.name.as_str());
                }
            }
            _ => {}
        }
    }
    names
}

fn collect_imports(program: &Program<'_>) -> Vec<ImportInfo> {
    let mut imports = Vec::new();
    for statement in &program.body {
        let Statement::ImportDeclaration(import) = statement else {
            continue;
        };
        if import.import_kind.is_type() {
            continue;
        }
        let Some(specifiers) = &import.specifiers else {
            continue;
        };
        let from = import.source.value.to_string();
        let mut named = Vec::new();
        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    if !s.import_kind.is_type() {
                        named.push(s.local.name.to_string());
                    }
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => imports.push(ImportInfo {
                    kind: ImportKind::Default,
                    names: vec![s.local.name.to_string()],
                    from: from.clone(),
                }),
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => imports.push(ImportInfo {
                    kind: ImportKind::Namespace,
                    names: vec![s.local.name.to_string()],
                    from: from.clone(),
                }),
            }
        }
        if !named.is_empty() {
            imports.push(ImportInfo {
                kind: ImportKind::Named,
                names: named,
                from,
            });
        }
    }
    imports
}

/// Pieces of a parameter pattern.
struct PatternParts {
    name: String,
    type_name: String,
    optional: bool,
    default_value: Option<String>,
}

struct ClassAnalyzer<'s> {
    source: &'s str,
}

impl<'s> ClassAnalyzer<'s> {
    fn text(&self, span: oxc_span::Span) -> &'s str {
        source_text(self.source, span)
    }

    fn describe(&self, class: &Class<'_>, file_name: String) -> ClassDescription {
        let class_name = class
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_else(|| ANONYMOUS_CLASS.to_string());
        let decorators = decorator_names(&class.decorators);
        let kind = ClassKind::classify(decorators.iter().map(String::as_str));

        let mut desc = ClassDescription::new(class_name, file_name, kind);
        desc.decorators = decorators;

        if let Some(decorator) = kind
            .decorator_name()
            .and_then(|marker| find_decorator(&class.decorators, marker))
        {
            self.collect_metadata(&mut desc, decorator);
        }

        desc.interfaces = class
            .implements
            .iter()
            .map(|implemented| type_names::clean_type_name(self.text(implemented.expression.span())))
            .collect();

        if let Some(parameters) = &class.type_parameters {
            desc.type_parameters = parameters
                .params
                .iter()
                .map(|param| TypeParameterInfo {
                    name: param.name.name.to_string(),
                    constraint: param
                        .constraint
                        .as_ref()
                        .map(|constraint| type_names::clean_type_name(self.text(constraint.span()))),
                    default: param
                        .default
                        .as_ref()
                        .map(|default| type_names::clean_type_name(self.text(default.span()))),
                })
                .collect();
        }

        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method) => self.visit_method(&mut desc, method),
                ClassElement::PropertyDefinition(prop) => self.visit_property(&mut desc, prop),
                _ => {}
            }
        }
        desc
    }

    /// Flat key/value view of the class decorator's options object.
    fn collect_metadata(&self, desc: &mut ClassDescription, decorator: &Decorator<'_>) {
        let Some(Expression::ObjectExpression(options)) = first_argument(decorator_arguments(decorator)) else {
            return;
        };
        for property in &options.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = property else {
                continue;
            };
            let Some((key, _)) = property_key_name(&prop.key) else {
                continue;
            };
            let value = string_value(&prop.value)
                .unwrap_or_else(|| unquote(self.text(prop.value.span())).to_string());
            desc.decorator_metadata.insert(key, value);
        }
    }

    fn visit_method(&self, desc: &mut ClassDescription, method: &MethodDefinition<'_>) {
        let function = &method.value;
        match method.kind {
            MethodDefinitionKind::Constructor => {
                // overload signatures have no body
                if function.body.is_some() {
                    desc.dependencies = self.constructor_dependencies(&function.params);
                }
                return;
            }
            MethodDefinitionKind::Get | MethodDefinitionKind::Set => {
                self.visit_accessor(desc, method);
                return;
            }
            MethodDefinitionKind::Method => {}
        }

        let Some((name, private_name)) = property_key_name(&method.key) else {
            return;
        };
        let is_abstract = matches!(method.r#type, MethodDefinitionType::TSAbstractMethodDefinition);
        if function.body.is_none() && !is_abstract {
            return;
        }

        let summary = function
            .body
            .as_ref()
            .map(|body| scan_body(body))
            .unwrap_or_else(BodySummary::empty);
        let return_type = annotation_text(self.source, function.return_type.as_deref())
            .unwrap_or_else(|| fallback_return_type(function.r#async, summary.returns_value));

        desc.methods.push(MethodInfo {
            name,
            return_type,
            visibility: visibility(method.accessibility, private_name),
            params: self.parameters(&function.params),
            is_async: function.r#async,
            is_static: method.r#static,
            is_abstract,
            decorators: decorator_names(&method.decorators),
            complexity: summary.complexity,
            has_return_statement: summary.has_return_statement,
            calls: summary.calls,
        });
    }

    /// Accessors only matter when they carry a binding decorator.
    fn visit_accessor(&self, desc: &mut ClassDescription, method: &MethodDefinition<'_>) {
        if method.decorators.is_empty() {
            return;
        }
        let Some((name, _)) = property_key_name(&method.key) else {
            return;
        };
        let annotation = match method.kind {
            MethodDefinitionKind::Set => method
                .value
                .params
                .items
                .first()
                .and_then(|param| param.pattern.type_annotation.as_deref()),
            _ => method.value.return_type.as_deref(),
        };
        let type_name =
            annotation_text(self.source, annotation).unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        self.collect_decorated_bindings(desc, &name, &type_name, &method.decorators);
    }

    fn visit_property(&self, desc: &mut ClassDescription, prop: &PropertyDefinition<'_>) {
        let Some((name, private_name)) = property_key_name(&prop.key) else {
            return;
        };
        let annotated = annotation_text(self.source, prop.type_annotation.as_deref());
        let value = prop.value.as_ref();
        let type_name = annotated
            .clone()
            .or_else(|| value.map(|value| infer_expression_type(self.source, value)))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        let member_visibility = visibility(prop.accessibility, private_name);

        desc.properties.push(PropertyInfo {
            name: name.clone(),
            type_name: type_name.clone(),
            visibility: member_visibility,
            is_static: prop.r#static,
            readonly: prop.readonly,
            optional: prop.optional,
            initializer: value.map(|value| self.text(value.span()).to_string()),
            reactive: value.and_then(reactive_kind),
            decorators: decorator_names(&prop.decorators),
        });

        self.collect_decorated_bindings(desc, &name, &type_name, &prop.decorators);

        if let Some(Expression::CallExpression(call)) = value {
            self.collect_signal_bindings(desc, &name, annotated.as_deref(), call);
            if call_target(call) == Some(("inject", None)) {
                self.collect_field_injection(desc, &name, annotated, member_visibility, prop.readonly, call);
            }
        }
    }

    fn collect_decorated_bindings(
        &self,
        desc: &mut ClassDescription,
        name: &str,
        type_name: &str,
        decorators: &[Decorator<'_>],
    ) {
        for decorator in decorators {
            let Some(decorator_kind) = decorator_name(decorator) else {
                continue;
            };
            let argument = first_argument(decorator_arguments(decorator));
            match decorator_kind.as_str() {
                "Input" => {
                    let (alias, required) = match argument {
                        Some(Expression::ObjectExpression(options)) => (
                            object_property(options, "alias").and_then(string_value),
                            is_true(object_property(options, "required")),
                        ),
                        Some(other) => (string_value(other), false),
                        None => (None, false),
                    };
                    desc.inputs.push(InputBinding {
                        name: name.to_string(),
                        type_name: type_name.to_string(),
                        alias,
                        required,
                        signal: false,
                    });
                }
                "Output" => desc.outputs.push(OutputBinding {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                    alias: argument.and_then(string_value),
                    signal: false,
                }),
                "HostBinding" => desc.host_bindings.push(HostBindingInfo {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                    binding: argument.and_then(string_value),
                }),
                query if QUERY_DECORATORS.contains(&query) => desc.view_children.push(ViewChildQuery {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                    selector: argument.map(|selector| self.text(selector.span()).to_string()),
                    decorator: query.to_string(),
                }),
                _ => {}
            }
        }
    }

    /// `input()`, `model()`, `output()` and the signal query functions.
    fn collect_signal_bindings(
        &self,
        desc: &mut ClassDescription,
        name: &str,
        annotated: Option<&str>,
        call: &CallExpression<'_>,
    ) {
        let value_type = || {
            annotated
                .and_then(type_names::generic_argument)
                .map(String::from)
                .unwrap_or_else(|| signal_value_type(self.source, call))
        };
        let alias_at = |index: usize| {
            call.arguments
                .get(index)
                .and_then(|arg| arg.as_expression())
                .and_then(|options| match options {
                    Expression::ObjectExpression(options) => {
                        object_property(options, "alias").and_then(string_value)
                    }
                    _ => None,
                })
        };

        match call_target(call) {
            Some(("input", member)) | Some(("model", member)) => {
                // the initial value comes first unless the input is required
                let options_index = if member.is_some() { 0 } else { 1 };
                desc.inputs.push(InputBinding {
                    name: name.to_string(),
                    type_name: value_type(),
                    alias: alias_at(options_index),
                    required: member == Some("required"),
                    signal: true,
                });
            }
            Some(("output", None)) | Some(("outputFromObservable", None)) => {
                let options_index = if matches!(call_target(call), Some(("output", _))) { 0 } else { 1 };
                desc.outputs.push(OutputBinding {
                    name: name.to_string(),
                    type_name: annotated
                        .map(String::from)
                        .unwrap_or_else(|| infer_call_type(self.source, call)),
                    alias: alias_at(options_index),
                    signal: true,
                });
            }
            Some((query, member)) if QUERY_FUNCTIONS.contains(&query) => {
                desc.view_children.push(ViewChildQuery {
                    name: name.to_string(),
                    type_name: value_type(),
                    selector: first_argument(&call.arguments)
                        .map(|selector| self.text(selector.span()).to_string()),
                    decorator: match member {
                        Some(member) => format!("{}.{}", query, member),
                        None => query.to_string(),
                    },
                });
            }
            _ => {}
        }
    }

    fn collect_field_injection(
        &self,
        desc: &mut ClassDescription,
        name: &str,
        annotated: Option<String>,
        member_visibility: Visibility,
        readonly: bool,
        call: &CallExpression<'_>,
    ) {
        let Some(token) = injected_type(self.source, call) else {
            return;
        };
        let optional = matches!(
            first_argument(call.arguments.get(1..).unwrap_or_default()),
            Some(Expression::ObjectExpression(options)) if is_true(object_property(options, "optional"))
        );
        let type_name = annotated.unwrap_or_else(|| token.clone());
        let inject_token =
            (type_names::base_type_name(type_names::primary_type(&type_name)) != token).then_some(token);

        desc.field_injections.push(Dependency {
            name: name.to_string(),
            type_name,
            visibility: member_visibility,
            readonly,
            optional,
            inject_token,
            is_field: true,
        });
    }

    fn constructor_dependencies(&self, params: &FormalParameters<'_>) -> Vec<Dependency> {
        params
            .items
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let parts = self.pattern_parts(&param.pattern, index);
                let inject_token = find_decorator(&param.decorators, "Inject")
                    .and_then(|decorator| first_argument(decorator_arguments(decorator)))
                    .map(|token| type_names::clean_type_name(self.text(token.span())));
                Dependency {
                    name: parts.name,
                    type_name: parts.type_name,
                    visibility: visibility(param.accessibility, false),
                    readonly: param.readonly,
                    optional: parts.optional || find_decorator(&param.decorators, "Optional").is_some(),
                    inject_token,
                    is_field: param.accessibility.is_some() || param.readonly,
                }
            })
            .collect()
    }

    fn parameters(&self, params: &FormalParameters<'_>) -> Vec<ParameterInfo> {
        let mut parameters: Vec<ParameterInfo> = params
            .items
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let parts = self.pattern_parts(&param.pattern, index);
                ParameterInfo {
                    name: parts.name,
                    type_name: parts.type_name,
                    optional: parts.optional,
                    default_value: parts.default_value,
                    rest: false,
                }
            })
            .collect();

        if let Some(rest) = &params.rest {
            let parts = self.pattern_parts(&rest.argument, parameters.len());
            parameters.push(ParameterInfo {
                name: parts.name,
                type_name: if parts.type_name == UNKNOWN_TYPE {
                    "any[]".to_string()
                } else {
                    parts.type_name
                },
                optional: false,
                default_value: None,
                rest: true,
            });
        }
        parameters
    }

    fn pattern_parts(&self, pattern: &BindingPattern<'_>, index: usize) -> PatternParts {
        let (target, default) = match &pattern.kind {
            BindingPatternKind::AssignmentPattern(assign) => (&assign.left, Some(&assign.right)),
            _ => (pattern, None),
        };
        let name = match &target.kind {
            BindingPatternKind::BindingIdentifier(id) => id.name.to_string(),
            // destructured parameters get a positional name
            _ => format!("param{}", index),
        };
        let annotation = pattern
            .type_annotation
            .as_deref()
            .or(target.type_annotation.as_deref());
        let type_name = annotation_text(self.source, annotation)
            .or_else(|| default.map(|value| infer_expression_type(self.source, value)))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

        PatternParts {
            name,
            type_name,
            optional: pattern.optional || target.optional,
            default_value: default.map(|value| self.text(value.span()).to_string()),
        }
    }
}

use oxc_allocator::Allocator;
use oxc_ast::ast::{ClassElement, Declaration, Statement};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::analyzer::src::body::{scan_body, BodySummary};

/// Scan the body of the first method of the exported class in `source`.
fn scan_first_method(source: &str) -> BodySummary {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_typescript(true).with_module(true);
    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "Parse errors: {:?}", ret.errors);

    for stmt in &ret.program.body {
        if let Statement::ExportNamedDeclaration(export) = stmt {
            if let Some(Declaration::ClassDeclaration(class)) = &export.declaration {
                for element in &class.body.body {
                    if let ClassElement::MethodDefinition(method) = element {
                        if let Some(body) = &method.value.body {
                            return scan_body(body);
                        }
                    }
                }
            }
        }
    }
    panic!("no method body found");
}

#[test]
fn should_start_complexity_at_one() {
    let summary = scan_first_method("export class A { run() { const a = 1; } }");
    assert_eq!(summary.complexity, 1);
}

#[test]
fn should_count_top_level_branches_only() {
    let summary = scan_first_method(
        r#"
export class A {
  run(value: number) {
    if (value > 1) {
      if (value > 2) {
        return;
      }
    }
    for (const item of [1, 2]) {}
    while (value < 0) { value++; }
    switch (value) {
      case 1:
        break;
      case 2:
        break;
      default:
        break;
    }
    try {
      this.save();
    } catch (e) {
      this.log(e);
    }
    value > 3 ? this.save() : this.log(value);
  }
}
"#,
    );
    // if, for-of, while, two cases, catch, conditional statement
    assert_eq!(summary.complexity, 8);
}

#[test]
fn should_collect_member_calls_in_first_seen_order() {
    let summary = scan_first_method(
        r#"
export class A {
  run() {
    this.load(this.parse());
    this.store.save();
    this.load();
    helper();
    this.#track();
  }

  #track() {}
}
"#,
    );
    assert_eq!(summary.calls, vec!["load", "parse", "save", "track"]);
}

#[test]
fn should_see_returns_inside_callbacks_without_treating_them_as_values() {
    let summary = scan_first_method(
        r#"
export class A {
  run(items: number[]) {
    items.forEach((item) => {
      return item;
    });
  }
}
"#,
    );
    assert!(summary.has_return_statement);
    assert!(!summary.returns_value);
}

#[test]
fn should_not_treat_returns_in_nested_functions_as_values() {
    let summary = scan_first_method(
        r#"
export class A {
  run(items: number[]) {
    items.forEach(function (item) {
      return item;
    });
    const handler = {
      pick() {
        return 1;
      },
    };
    class Local {
      value() {
        return 2;
      }
    }
  }
}
"#,
    );
    assert!(summary.has_return_statement);
    assert!(!summary.returns_value);
}

#[test]
fn should_flag_value_returns() {
    let summary = scan_first_method("export class A { run() { return 42; } }");
    assert!(summary.has_return_statement);
    assert!(summary.returns_value);
}

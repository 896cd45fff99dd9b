//! Method body scanning: complexity, called members and return statements.

use oxc_ast::ast::{
    ArrowFunctionExpression, CallExpression, Expression, Function, FunctionBody, ReturnStatement,
    Statement,
};
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::ScopeFlags;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BodySummary {
    pub complexity: u32,
    /// Member names called as `obj.name(...)` or `obj.#name(...)`, first seen first.
    pub calls: Vec<String>,
    pub has_return_statement: bool,
    /// A `return <value>` outside nested functions and arrow functions.
    pub returns_value: bool,
}

impl BodySummary {
    /// Summary for a method without a body.
    pub fn empty() -> Self {
        Self {
            complexity: 1,
            ..Self::default()
        }
    }
}

pub fn scan_body(body: &FunctionBody<'_>) -> BodySummary {
    let mut scanner = BodyScanner::default();
    scanner.visit_function_body(body);
    BodySummary {
        complexity: complexity(&body.statements),
        calls: scanner.calls,
        has_return_statement: scanner.has_return,
        returns_value: scanner.returns_value,
    }
}

/// `1 +` one per branching statement at the top level of the body.
pub fn complexity(statements: &[Statement<'_>]) -> u32 {
    let branches: usize = statements
        .iter()
        .map(|statement| match statement {
            Statement::IfStatement(_)
            | Statement::ForStatement(_)
            | Statement::ForInStatement(_)
            | Statement::ForOfStatement(_)
            | Statement::WhileStatement(_)
            | Statement::DoWhileStatement(_) => 1,
            Statement::ExpressionStatement(s) => {
                usize::from(matches!(s.expression, Expression::ConditionalExpression(_)))
            }
            Statement::SwitchStatement(s) => s.cases.iter().filter(|case| case.test.is_some()).count(),
            Statement::TryStatement(s) => usize::from(s.handler.is_some()),
            _ => 0,
        })
        .sum();
    1 + branches as u32
}

#[derive(Default)]
struct BodyScanner {
    calls: Vec<String>,
    has_return: bool,
    returns_value: bool,
    function_depth: u32,
}

impl BodyScanner {
    fn record_call(&mut self, name: &str) {
        if !self.calls.iter().any(|seen| seen == name) {
            self.calls.push(name.to_string());
        }
    }
}

impl<'a> Visit<'a> for BodyScanner {
    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        match &it.callee {
            Expression::StaticMemberExpression(member) => self.record_call(member.property.name.as_str()),
            Expression::PrivateFieldExpression(field) => self.record_call(field.field.name.as_str()),
            _ => {}
        }
        walk::walk_call_expression(self, it);
    }

    fn visit_return_statement(&mut self, it: &ReturnStatement<'a>) {
        self.has_return = true;
        if self.function_depth == 0 && it.argument.is_some() {
            self.returns_value = true;
        }
        walk::walk_return_statement(self, it);
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        self.function_depth += 1;
        walk::walk_arrow_function_expression(self, it);
        self.function_depth -= 1;
    }

    // function expressions, object-literal methods and nested class methods
    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        self.function_depth += 1;
        walk::walk_function(self, it, flags);
        self.function_depth -= 1;
    }
}

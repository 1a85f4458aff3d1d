//! Static/dynamic value analysis.
//!
//! Decides whether a value handed to a component must become a getter so
//! the runtime can re-read it, or may be passed as a plain value. Markup
//! template holes never go through here; the renderer re-evaluates those
//! on its own.

use crate::attributes::AttributeKind;
use crate::ir::{AttributeValue, MarkupLowerer, MarkupNode, NamedAttribute, SpreadAttribute};
use crate::visitor::{walk_attribute, walk_node, MarkupVisitor};
use oxc_ast::ast::{
    ArrayExpressionElement, ArrowFunctionExpression, CallExpression, ChainElement,
    ComputedMemberExpression, Expression, Function, JSXElement, JSXFragment, MemberExpression,
    PrivateFieldExpression, StaticMemberExpression,
};
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::ScopeFlags;

/// Coarse expression shape, shared by every heuristic that sniffs values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprShape {
    StringLiteral,
    Literal,
    Identifier,
    Object,
    Array,
    Member,
    Call,
    Conditional,
    Logical,
    Function,
    Markup,
    Other,
}

impl ExprShape {
    /// Shapes `style` and `classMap` route through their helpers.
    pub fn is_helper_wrappable(self) -> bool {
        matches!(
            self,
            ExprShape::Object
                | ExprShape::Identifier
                | ExprShape::Member
                | ExprShape::Call
                | ExprShape::Conditional
                | ExprShape::Logical
        )
    }

    /// Elements that keep an array literal static.
    fn is_inert_array_element(self) -> bool {
        matches!(
            self,
            ExprShape::StringLiteral | ExprShape::Literal | ExprShape::Identifier | ExprShape::Function
        )
    }
}

pub fn classify_shape(expr: &Expression<'_>) -> ExprShape {
    match expr {
        Expression::ParenthesizedExpression(paren) => classify_shape(&paren.expression),
        Expression::StringLiteral(_) => ExprShape::StringLiteral,
        Expression::NumericLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegExpLiteral(_)
        | Expression::TemplateLiteral(_) => ExprShape::Literal,
        Expression::Identifier(_) => ExprShape::Identifier,
        Expression::ObjectExpression(_) => ExprShape::Object,
        Expression::ArrayExpression(_) => ExprShape::Array,
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => ExprShape::Member,
        Expression::CallExpression(_) => ExprShape::Call,
        Expression::ChainExpression(chain) => match &chain.expression {
            ChainElement::CallExpression(_) => ExprShape::Call,
            ChainElement::TSNonNullExpression(_) => ExprShape::Other,
            _ => ExprShape::Member,
        },
        Expression::ConditionalExpression(_) => ExprShape::Conditional,
        Expression::LogicalExpression(_) => ExprShape::Logical,
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => {
            ExprShape::Function
        }
        Expression::JSXElement(_) | Expression::JSXFragment(_) => ExprShape::Markup,
        _ => ExprShape::Other,
    }
}

/// Whether a prop value must be emitted as `get key() { return value; }`.
pub fn needs_getter_wrapping(source: &str, expr: &Expression<'_>) -> bool {
    match classify_shape(expr) {
        ExprShape::Function => false,
        ExprShape::Array if is_inert_array(expr) => false,
        _ => reads_reactively(source, expr),
    }
}

fn is_inert_array(expr: &Expression<'_>) -> bool {
    let Expression::ArrayExpression(array) = expr.without_parentheses() else {
        return false;
    };
    array.elements.iter().all(|element| match element {
        ArrayExpressionElement::SpreadElement(_) => false,
        ArrayExpressionElement::Elision(_) => true,
        _ => element
            .as_expression()
            .is_some_and(|e| classify_shape(e).is_inert_array_element()),
    })
}

/// Depth-first search for a member access or call outside nested function
/// bodies. Markup found along the way is judged by [`markup_reads_reactively`].
pub fn reads_reactively(source: &str, expr: &Expression<'_>) -> bool {
    let mut finder = ReactiveReadFinder {
        source,
        found: false,
    };
    finder.visit_expression(expr);
    finder.found
}

struct ReactiveReadFinder<'s> {
    source: &'s str,
    found: bool,
}

impl<'a> Visit<'a> for ReactiveReadFinder<'_> {
    fn visit_expression(&mut self, expr: &Expression<'a>) {
        if !self.found {
            walk::walk_expression(self, expr);
        }
    }

    fn visit_call_expression(&mut self, _call: &CallExpression<'a>) {
        self.found = true;
    }

    fn visit_member_expression(&mut self, _member: &MemberExpression<'a>) {
        self.found = true;
    }

    fn visit_static_member_expression(&mut self, _member: &StaticMemberExpression<'a>) {
        self.found = true;
    }

    fn visit_computed_member_expression(&mut self, _member: &ComputedMemberExpression<'a>) {
        self.found = true;
    }

    fn visit_private_field_expression(&mut self, _member: &PrivateFieldExpression<'a>) {
        self.found = true;
    }

    // Function bodies run later, outside of this read.
    fn visit_arrow_function_expression(&mut self, _func: &ArrowFunctionExpression<'a>) {}

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_jsx_element(&mut self, element: &JSXElement<'a>) {
        let node = MarkupLowerer::new(self.source).lower_element(element);
        if markup_reads_reactively(self.source, &node) {
            self.found = true;
        }
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) {
        let node = MarkupLowerer::new(self.source).lower_fragment(fragment);
        if markup_reads_reactively(self.source, &node) {
            self.found = true;
        }
    }
}

/// Compiled markup counts as dynamic when building it runs user code:
/// component calls, directive helpers, or holes that read reactively.
pub fn markup_reads_reactively(source: &str, node: &MarkupNode<'_, '_>) -> bool {
    let mut check = ReactiveMarkupCheck {
        source,
        found: false,
    };
    check.visit_node(node);
    check.found
}

struct ReactiveMarkupCheck<'s> {
    source: &'s str,
    found: bool,
}

impl<'n, 'a> MarkupVisitor<'n, 'a> for ReactiveMarkupCheck<'_> {
    fn visit_node(&mut self, node: &MarkupNode<'n, 'a>) {
        if !self.found {
            walk_node(self, node);
        }
    }

    fn visit_component(&mut self, _component: &crate::ir::ComponentNode<'n, 'a>) {
        self.found = true;
    }

    fn visit_expression(&mut self, expression: &crate::ir::ExpressionNode<'n, 'a>) {
        if reads_reactively(self.source, expression.expression) {
            self.found = true;
        }
    }

    fn visit_spread(&mut self, _spread: &SpreadAttribute<'n, 'a>) {
        self.found = true;
    }

    fn visit_attribute(&mut self, attribute: &NamedAttribute<'n, 'a>) {
        if self.found {
            return;
        }
        let value = match &attribute.value {
            AttributeValue::Expression(expr) => Some(*expr),
            _ => None,
        };
        match AttributeKind::of(&attribute.name) {
            AttributeKind::Ref => self.found = true,
            AttributeKind::Style | AttributeKind::ClassMap
                if value.is_some_and(|e| classify_shape(e).is_helper_wrappable()) =>
            {
                self.found = true
            }
            _ => {
                if value.is_some_and(|e| reads_reactively(self.source, e)) {
                    self.found = true;
                } else {
                    walk_attribute(self, attribute);
                }
            }
        }
    }
}

/// Getter decision for a single node used as a component's `children`.
pub fn node_needs_getter(source: &str, node: &MarkupNode<'_, '_>) -> bool {
    match node {
        MarkupNode::Text(_) => false,
        MarkupNode::Expression(e) => needs_getter_wrapping(source, e.expression),
        _ => markup_reads_reactively(source, node),
    }
}

/// Getter decision for a children value built from `nodes`: the node itself
/// when there is one, an array literal otherwise.
pub fn children_need_getter(source: &str, nodes: &[&MarkupNode<'_, '_>]) -> bool {
    if let [only] = nodes {
        return node_needs_getter(source, only);
    }
    let inert = nodes.iter().all(|node| match node {
        MarkupNode::Text(_) => true,
        MarkupNode::Expression(e) => classify_shape(e.expression).is_inert_array_element(),
        _ => false,
    });
    if inert {
        return false;
    }
    nodes.iter().any(|node| match node {
        MarkupNode::Text(_) => false,
        MarkupNode::Expression(e) => reads_reactively(source, e.expression),
        _ => markup_reads_reactively(source, node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_expr<R>(code: &str, f: impl FnOnce(&str, &Expression<'_>) -> R) -> R {
        let allocator = Allocator::default();
        let source_type = SourceType::default()
            .with_typescript(true)
            .with_module(true)
            .with_jsx(true);
        let expr = Parser::new(&allocator, code, source_type)
            .parse_expression()
            .expect("expression should parse");
        f(code, &expr)
    }

    fn getter(code: &str) -> bool {
        with_expr(code, needs_getter_wrapping)
    }

    #[test]
    fn test_shapes() {
        let cases = [
            ("'a'", ExprShape::StringLiteral),
            ("42", ExprShape::Literal),
            ("styles", ExprShape::Identifier),
            ("({ color: 'red' })", ExprShape::Object),
            ("theme.styles", ExprShape::Member),
            ("a?.b", ExprShape::Member),
            ("a?.()", ExprShape::Call),
            ("getStyles()", ExprShape::Call),
            ("ok ? a : b", ExprShape::Conditional),
            ("a || b", ExprShape::Logical),
            ("() => 1", ExprShape::Function),
            ("<div />", ExprShape::Markup),
            ("a + b", ExprShape::Other),
        ];
        for (code, expected) in cases {
            assert_eq!(with_expr(code, |_, e| classify_shape(e)), expected, "{}", code);
        }
    }

    #[test]
    fn test_functions_are_never_wrapped() {
        assert!(!getter("() => state.count"));
        assert!(!getter("function handler() { return load(); }"));
        assert!(!getter("(e) => setValue(e.target.value)"));
    }

    #[test]
    fn test_member_and_call_are_wrapped() {
        assert!(getter("state.count"));
        assert!(getter("getData()"));
        assert!(getter("items?.length"));
        assert!(getter("`${user.name}!`"));
        assert!(getter("count + props.step"));
    }

    #[test]
    fn test_plain_values_are_not_wrapped() {
        assert!(!getter("count"));
        assert!(!getter("'label'"));
        assert!(!getter("a + b"));
        assert!(!getter("({ size: 2 })"));
    }

    #[test]
    fn test_conditional_and_logical_branches_are_searched() {
        assert!(getter("ok ? 'a' : theme.b"));
        assert!(getter("ready && load()"));
        assert!(!getter("ok ? 'a' : 'b'"));
    }

    #[test]
    fn test_inert_array_literals() {
        assert!(!getter("[1, 'two', three, () => four.five]"));
        assert!(getter("[item.a, 2]"));
    }

    #[test]
    fn test_markup_values() {
        assert!(!getter("<div class=\"a\">text</div>"));
        assert!(getter("<div>{user.name}</div>"));
        assert!(getter("<Card />"));
        assert!(getter("<div ref={el} />"));
        assert!(getter("<div style={styles} />"));
        assert!(!getter("<div style=\"color: red\" onClick={() => go.now()} />"));
    }
}

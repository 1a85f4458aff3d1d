//! JSX lowering.
//!
//! Finds every outermost JSX element or fragment, compiles it, and records a
//! span replacement. Nested JSX is never visited here directly: it is reached
//! through the compilers, which call back into [`emit_expression`] for every
//! expression they copy out of the source.

use crate::children::compile_fragment;
use crate::codegen::{splice, Replacement};
use crate::component::compile_component;
use crate::element::compile_element;
use crate::imports::SupportSymbol;
use crate::ir::{AttributeValue, MarkupLowerer, MarkupNode};
use crate::template::{decode_entities, TemplateBuilder};
use crate::transform::TransformContext;
use oxc_ast::ast::{Expression, JSXElement, JSXFragment};
use oxc_ast_visit::Visit;
use oxc_span::GetSpan;

// ═══════════════════════════════════════════════════════════════════════════════
// JSX LOWERER
// Replaces markup with html`...` templates and component(...) calls
// ═══════════════════════════════════════════════════════════════════════════════

pub struct JsxLowerer<'c, 's> {
    ctx: &'c mut TransformContext<'s>,
    pub replacements: Vec<Replacement>,
}

impl<'c, 's> JsxLowerer<'c, 's> {
    pub fn new(ctx: &'c mut TransformContext<'s>) -> Self {
        Self {
            ctx,
            replacements: Vec::new(),
        }
    }
}

impl<'a> Visit<'a> for JsxLowerer<'_, '_> {
    fn visit_jsx_element(&mut self, element: &JSXElement<'a>) {
        let node = MarkupLowerer::new(self.ctx.source).lower_element(element);
        let code = compile_markup_value(self.ctx, &node);
        self.ctx.compiled_nodes += 1;
        self.replacements.push(Replacement::new(element.span, code));
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) {
        let node = MarkupLowerer::new(self.ctx.source).lower_fragment(fragment);
        let code = compile_markup_value(self.ctx, &node);
        self.ctx.compiled_nodes += 1;
        self.replacements.push(Replacement::new(fragment.span, code));
    }
}

/// Source text of `expr` with any markup inside it compiled.
pub fn emit_expression(ctx: &mut TransformContext<'_>, expr: &Expression<'_>) -> String {
    let span = expr.span();
    let mut lowerer = JsxLowerer::new(ctx);
    lowerer.visit_expression(expr);
    let replacements = lowerer.replacements;
    splice(ctx.source, span, replacements)
}

/// [`emit_expression`] for a slot inside an argument list, array or object
/// literal, where an unparenthesized comma would split the value.
pub fn emit_operand(ctx: &mut TransformContext<'_>, expr: &Expression<'_>) -> String {
    let code = emit_expression(ctx, expr);
    if matches!(expr, Expression::SequenceExpression(_)) {
        format!("({})", code)
    } else {
        code
    }
}

/// Compiles markup standing where a value is expected: the whole JSX
/// expression, an attribute value, or a lone `children` value.
pub fn compile_markup_value(ctx: &mut TransformContext<'_>, node: &MarkupNode<'_, '_>) -> String {
    match node {
        MarkupNode::Element(el) => compile_element(ctx, el),
        MarkupNode::Component(c) => {
            let call = compile_component(ctx, c);
            wrap_in_template(ctx, call)
        }
        MarkupNode::Fragment(f) => compile_fragment(ctx, f),
        MarkupNode::Text(t) => string_literal(&decode_entities(t.raw)),
        MarkupNode::Expression(e) => emit_expression(ctx, e.expression),
    }
}

/// `html`${code}``
pub fn wrap_in_template(ctx: &mut TransformContext<'_>, code: String) -> String {
    let tag = ctx.symbol(SupportSymbol::Html);
    let mut builder = TemplateBuilder::new();
    builder.add_hole(code);
    builder.build_tagged(&tag)
}

pub fn compile_attribute_value(
    ctx: &mut TransformContext<'_>,
    value: &AttributeValue<'_, '_>,
) -> String {
    match value {
        AttributeValue::Literal(text) => string_literal(&decode_entities(text)),
        AttributeValue::True => "true".to_string(),
        AttributeValue::Expression(expr) => emit_operand(ctx, expr),
        AttributeValue::Markup(node) => compile_markup_value(ctx, node),
    }
}

/// A JS string literal for `text`.
pub fn string_literal(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

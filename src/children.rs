//! Children aggregation.
//!
//! Children are consumed in two shapes. Inside a markup element they become
//! pieces of the open template (text, holes, inlined elements). Everywhere
//! else (component `children`, fragments) they become a list of compiled
//! expressions, with fragments spliced flat.

use crate::component::compile_component;
use crate::element::{compile_element, is_statically_inlineable, push_element, render_static_element};
use crate::imports::SupportSymbol;
use crate::ir::{FragmentNode, MarkupNode};
use crate::jsx_lowerer::{emit_expression, emit_operand, string_literal, wrap_in_template};
use crate::options::CompileOptions;
use crate::template::{decode_entities, TemplateBuilder};
use crate::transform::TransformContext;

/// Whitespace policy for text inside a markup template.
pub fn keep_template_text(options: &CompileOptions, raw: &str) -> bool {
    if !raw.trim().is_empty() {
        return true;
    }
    if raw.contains('\n') {
        return false;
    }
    options.preserve_inline_whitespace
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEMPLATE MODE
// ═══════════════════════════════════════════════════════════════════════════════

pub fn push_template_children(
    ctx: &mut TransformContext<'_>,
    children: &[MarkupNode<'_, '_>],
    builder: &mut TemplateBuilder,
) {
    for child in children {
        match child {
            MarkupNode::Text(text) => {
                if keep_template_text(ctx.options, text.raw) {
                    builder.add_static(text.raw);
                }
            }
            MarkupNode::Expression(expr) => {
                let code = emit_expression(ctx, expr.expression);
                builder.add_hole(code);
            }
            MarkupNode::Element(el) => {
                if is_statically_inlineable(el) {
                    let html = render_static_element(ctx, el);
                    builder.add_static(&html);
                } else {
                    push_element(ctx, el, builder);
                }
            }
            MarkupNode::Component(c) => {
                let call = compile_component(ctx, c);
                builder.add_hole(call);
            }
            MarkupNode::Fragment(f) => push_template_children(ctx, &f.children, builder),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPRESSION-LIST MODE
// ═══════════════════════════════════════════════════════════════════════════════

/// Children that produce a value: blank text dropped, fragments spliced.
pub fn flatten_children<'r, 'n, 'a>(
    children: &'r [MarkupNode<'n, 'a>],
) -> Vec<&'r MarkupNode<'n, 'a>> {
    let mut flat = Vec::with_capacity(children.len());
    collect_flat(children, &mut flat);
    flat
}

fn collect_flat<'r, 'n, 'a>(
    children: &'r [MarkupNode<'n, 'a>],
    flat: &mut Vec<&'r MarkupNode<'n, 'a>>,
) {
    for child in children {
        match child {
            MarkupNode::Text(text) if text.raw.trim().is_empty() => {}
            MarkupNode::Fragment(f) => collect_flat(&f.children, flat),
            _ => flat.push(child),
        }
    }
}

/// One entry of an expression list. Component calls stay bare; the list's
/// consumer decides whether a template wraps them. A spread child becomes
/// `...items`, so it is only valid inside an array literal.
pub fn compile_list_item(ctx: &mut TransformContext<'_>, node: &MarkupNode<'_, '_>) -> String {
    match node {
        MarkupNode::Text(text) => string_literal(&decode_entities(text.raw.trim())),
        MarkupNode::Expression(expr) if expr.spread => {
            format!("...{}", emit_operand(ctx, expr.expression))
        }
        MarkupNode::Expression(expr) => emit_operand(ctx, expr.expression),
        MarkupNode::Element(el) => compile_element(ctx, el),
        MarkupNode::Component(c) => compile_component(ctx, c),
        MarkupNode::Fragment(f) => compile_fragment(ctx, f),
    }
}

pub fn aggregate_expressions(
    ctx: &mut TransformContext<'_>,
    nodes: &[&MarkupNode<'_, '_>],
) -> Vec<String> {
    nodes.iter().map(|node| compile_list_item(ctx, node)).collect()
}

/// Empty template, single-hole template, or array, by child count.
pub fn compile_fragment(ctx: &mut TransformContext<'_>, fragment: &FragmentNode<'_, '_>) -> String {
    let nodes = flatten_children(&fragment.children);
    let mut items = aggregate_expressions(ctx, &nodes);
    match items.len() {
        0 => {
            let tag = ctx.symbol(SupportSymbol::Html);
            TemplateBuilder::new().build_tagged(&tag)
        }
        1 if is_spread_child(nodes[0]) => {
            let item = format!("[{}]", items.remove(0));
            wrap_in_template(ctx, item)
        }
        1 => {
            let item = items.remove(0);
            wrap_in_template(ctx, item)
        }
        _ => format!("[{}]", items.join(", ")),
    }
}

fn is_spread_child(node: &MarkupNode<'_, '_>) -> bool {
    matches!(node, MarkupNode::Expression(expr) if expr.spread)
}

/// The `children` value handed to a component, if there is any content.
pub fn compile_children_value(
    ctx: &mut TransformContext<'_>,
    nodes: &[&MarkupNode<'_, '_>],
) -> Option<String> {
    match nodes {
        [] => None,
        [MarkupNode::Component(c)] => {
            let call = compile_component(ctx, c);
            Some(wrap_in_template(ctx, call))
        }
        [only] if is_spread_child(only) => Some(format!("[{}]", compile_list_item(ctx, only))),
        [only] => Some(compile_list_item(ctx, only)),
        _ => Some(format!("[{}]", aggregate_expressions(ctx, nodes).join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_whitespace_policy() {
        let options = CompileOptions::default();
        assert!(keep_template_text(&options, "  Hello  "));
        assert!(keep_template_text(&options, " "));
        assert!(!keep_template_text(&options, "\n    "));
        assert!(keep_template_text(&options, "\n  text\n"));

        let strict = CompileOptions {
            preserve_inline_whitespace: false,
            ..CompileOptions::default()
        };
        assert!(!keep_template_text(&strict, " "));
        assert!(keep_template_text(&strict, " a "));
    }
}

//! Component calls: `component(Name, props)`.
//!
//! Props are one of: an object literal (values, or getters when the value
//! reads reactively), the single spread source passed straight through, or
//! a `mergeProps(...)` call over literals and spread sources in source
//! order.

use crate::analysis::{children_need_getter, markup_reads_reactively, needs_getter_wrapping};
use crate::attributes::warn_on_class_conflict;
use crate::children::{compile_children_value, flatten_children};
use crate::diagnostics::WARN_CHILDREN_CONFLICT;
use crate::imports::SupportSymbol;
use crate::ir::{AttributeNode, AttributeValue, ComponentNode, MarkupNode, NamedAttribute};
use crate::jsx_lowerer::{compile_markup_value, emit_expression, emit_operand, string_literal};
use crate::template::decode_entities;
use crate::transform::TransformContext;
use oxc_syntax::identifier::is_identifier_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropEntry {
    Value { key: String, value: String },
    Getter { key: String, value: String },
}

impl PropEntry {
    fn render(&self) -> String {
        match self {
            PropEntry::Value { key, value } => format!("{}: {}", property_key(key), value),
            PropEntry::Getter { key, value } => {
                format!("get {}() {{ return {}; }}", property_key(key), value)
            }
        }
    }
}

/// Object literal under construction.
#[derive(Debug, Default)]
pub struct PropsObject {
    entries: Vec<PropEntry>,
}

impl PropsObject {
    pub fn push(&mut self, entry: PropEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "{}".to_string();
        }
        let body: Vec<String> = self.entries.iter().map(PropEntry::render).collect();
        format!("{{ {} }}", body.join(", "))
    }
}

/// Bare identifier when legal, string-literal key otherwise.
pub fn property_key(name: &str) -> String {
    if is_identifier_name(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

pub fn compile_component(ctx: &mut TransformContext<'_>, component: &ComponentNode<'_, '_>) -> String {
    warn_on_class_conflict(ctx, &component.name, &component.attributes, component.span);

    let children = flatten_children(&component.children);
    let has_content = !children.is_empty();
    let has_children_attr = component
        .attributes
        .iter()
        .any(|attr| matches!(attr, AttributeNode::Named(named) if named.name == "children"));
    if has_content && has_children_attr {
        ctx.warn(
            WARN_CHILDREN_CONFLICT,
            format!(
                "<{}> has both 'children' prop and children content; the content takes priority",
                component.name
            ),
            component.span,
        );
    }

    let props = compile_props(ctx, component, &children);
    let helper = ctx.symbol(SupportSymbol::Component);
    format!("{}({}, {})", helper, component.name, props)
}

fn compile_props(
    ctx: &mut TransformContext<'_>,
    component: &ComponentNode<'_, '_>,
    children: &[&MarkupNode<'_, '_>],
) -> String {
    let has_content = !children.is_empty();
    let spread_count = component
        .attributes
        .iter()
        .filter(|attr| matches!(attr, AttributeNode::Spread(_)))
        .count();

    if spread_count == 0 {
        let mut object = PropsObject::default();
        for attr in &component.attributes {
            if let AttributeNode::Named(named) = attr {
                if has_content && named.name == "children" {
                    continue;
                }
                object.push(prop_entry(ctx, named));
            }
        }
        if let Some(entry) = children_entry(ctx, children) {
            object.push(entry);
        }
        return object.render();
    }

    if let [AttributeNode::Spread(spread)] = component.attributes.as_slice() {
        if !has_content {
            return emit_expression(ctx, spread.argument);
        }
    }

    let mut sources = Vec::new();
    let mut pending = PropsObject::default();
    for attr in &component.attributes {
        match attr {
            AttributeNode::Spread(spread) => {
                if !pending.is_empty() {
                    sources.push(std::mem::take(&mut pending).render());
                }
                sources.push(emit_expression(ctx, spread.argument));
            }
            AttributeNode::Named(named) => {
                if has_content && named.name == "children" {
                    continue;
                }
                pending.push(prop_entry(ctx, named));
            }
        }
    }
    if let Some(entry) = children_entry(ctx, children) {
        pending.push(entry);
    }
    if !pending.is_empty() {
        sources.push(pending.render());
    }

    let helper = ctx.symbol(SupportSymbol::MergeProps);
    format!("{}({})", helper, sources.join(", "))
}

fn prop_entry(ctx: &mut TransformContext<'_>, attr: &NamedAttribute<'_, '_>) -> PropEntry {
    let key = attr.name.clone();
    match &attr.value {
        AttributeValue::Literal(text) => PropEntry::Value {
            key,
            value: string_literal(&decode_entities(text)),
        },
        AttributeValue::True => PropEntry::Value {
            key,
            value: "true".to_string(),
        },
        AttributeValue::Expression(expr) => {
            let getter = needs_getter_wrapping(ctx.source, expr);
            let value = emit_operand(ctx, expr);
            if getter {
                PropEntry::Getter { key, value }
            } else {
                PropEntry::Value { key, value }
            }
        }
        AttributeValue::Markup(node) => {
            let getter = markup_reads_reactively(ctx.source, node);
            let value = compile_markup_value(ctx, node);
            if getter {
                PropEntry::Getter { key, value }
            } else {
                PropEntry::Value { key, value }
            }
        }
    }
}

fn children_entry(
    ctx: &mut TransformContext<'_>,
    children: &[&MarkupNode<'_, '_>],
) -> Option<PropEntry> {
    let getter = children_need_getter(ctx.source, children);
    let value = compile_children_value(ctx, children)?;
    let key = "children".to_string();
    Some(if getter {
        PropEntry::Getter { key, value }
    } else {
        PropEntry::Value { key, value }
    })
}

//! Attribute routing for markup templates.
//!
//! Each attribute lands in one of three forms: static markup text, a
//! `name=${value}` binding whose prefix selects the renderer's wire
//! protocol (`@event`, `.property`, `?boolean`), or a bare directive hole.

use crate::analysis::classify_shape;
use crate::diagnostics::WARN_CLASS_CONFLICT;
use crate::imports::SupportSymbol;
use crate::ir::{AttributeNode, AttributeValue, NamedAttribute, SpreadAttribute};
use crate::jsx_lowerer::{compile_attribute_value, emit_expression};
use crate::template::{escape_attribute_value, TemplateBuilder};
use crate::transform::TransformContext;
use oxc_span::Span;

/// Wire category decided from the attribute name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Ref,
    Style,
    ClassMap,
    /// Lower-cased event name, `on` stripped.
    Event(String),
    Property(String),
    Boolean(String),
    /// Any other `ns:name`, kept whole.
    Namespaced(String),
    /// Normalized plain name (`className` becomes `class`).
    Plain(String),
}

impl AttributeKind {
    pub fn of(name: &str) -> Self {
        match name {
            "ref" => return AttributeKind::Ref,
            "style" => return AttributeKind::Style,
            "classMap" => return AttributeKind::ClassMap,
            _ => {}
        }
        if let Some(event) = name.strip_prefix("on") {
            if !event.is_empty() {
                return AttributeKind::Event(event.to_lowercase());
            }
        }
        if let Some((namespace, local)) = name.split_once(':') {
            return match namespace {
                "prop" => AttributeKind::Property(local.to_string()),
                "bool" => AttributeKind::Boolean(local.to_string()),
                _ => AttributeKind::Namespaced(name.to_string()),
            };
        }
        AttributeKind::Plain(normalize_attribute_name(name).to_string())
    }
}

pub fn normalize_attribute_name(name: &str) -> &str {
    if name == "className" {
        "class"
    } else {
        name
    }
}

pub fn is_class_name(name: &str) -> bool {
    name == "class" || name == "className"
}

/// Records a warning when `class`/`className` and `classMap` meet on one tag.
pub fn warn_on_class_conflict(
    ctx: &mut TransformContext<'_>,
    tag: &str,
    attributes: &[AttributeNode<'_, '_>],
    span: Span,
) {
    let named = || {
        attributes.iter().filter_map(|attribute| match attribute {
            AttributeNode::Named(named) => Some(named.name.as_str()),
            AttributeNode::Spread(_) => None,
        })
    };
    if named().any(is_class_name) && named().any(|name| name == "classMap") {
        ctx.warn(
            WARN_CLASS_CONFLICT,
            format!(
                "<{}> has both 'class' and 'classMap' attributes; they may override each other at runtime",
                tag
            ),
            span,
        );
    }
}

/// One attribute's contribution to an element's opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedAttribute {
    /// ` name="value"`, emitted as markup text.
    Static(String),
    /// ` name=` followed by a hole.
    Dynamic { prefix: String, value: String },
    /// A hole with no attribute text around it.
    Directive(String),
}

impl ClassifiedAttribute {
    pub fn push_into(self, builder: &mut TemplateBuilder) {
        match self {
            ClassifiedAttribute::Static(text) => {
                builder.add_static(&text);
            }
            ClassifiedAttribute::Dynamic { prefix, value } => {
                builder.add_static(&format!(" {}=", prefix)).add_hole(value);
            }
            ClassifiedAttribute::Directive(value) => {
                builder.add_static(" ").add_hole(value);
            }
        }
    }
}

pub fn classify_attribute(
    ctx: &mut TransformContext<'_>,
    attribute: &NamedAttribute<'_, '_>,
) -> ClassifiedAttribute {
    let kind = AttributeKind::of(&attribute.name);

    if kind == AttributeKind::Ref {
        let value = compile_attribute_value(ctx, &attribute.value);
        let helper = ctx.symbol(SupportSymbol::Ref);
        return ClassifiedAttribute::Directive(format!("{}({})", helper, value));
    }

    if matches!(kind, AttributeKind::Style | AttributeKind::ClassMap) {
        if let AttributeValue::Expression(expr) = &attribute.value {
            if classify_shape(expr).is_helper_wrappable() {
                let (symbol, name) = if kind == AttributeKind::Style {
                    (SupportSymbol::StyleMap, "style")
                } else {
                    (SupportSymbol::ClassMap, "class")
                };
                let value = emit_expression(ctx, expr);
                let helper = ctx.symbol(symbol);
                return ClassifiedAttribute::Dynamic {
                    prefix: name.to_string(),
                    value: format!("{}({})", helper, value),
                };
            }
        }
    }

    let prefix = match &kind {
        AttributeKind::Event(event) => Some(format!("@{}", event)),
        AttributeKind::Property(name) => Some(format!(".{}", name)),
        AttributeKind::Boolean(name) => Some(format!("?{}", name)),
        AttributeKind::Namespaced(name) => Some(name.clone()),
        _ => None,
    };
    if let Some(prefix) = prefix {
        let value = compile_attribute_value(ctx, &attribute.value);
        return ClassifiedAttribute::Dynamic { prefix, value };
    }

    let name = match kind {
        AttributeKind::Style => "style".to_string(),
        AttributeKind::ClassMap => "class".to_string(),
        AttributeKind::Plain(name) => name,
        _ => attribute.name.clone(),
    };
    if let AttributeValue::Literal(text) = &attribute.value {
        return ClassifiedAttribute::Static(format!(
            " {}=\"{}\"",
            name,
            escape_attribute_value(text)
        ));
    }
    ClassifiedAttribute::Dynamic {
        prefix: name,
        value: compile_attribute_value(ctx, &attribute.value),
    }
}

/// `{...bag}` on a markup element.
pub fn classify_spread(
    ctx: &mut TransformContext<'_>,
    spread: &SpreadAttribute<'_, '_>,
) -> ClassifiedAttribute {
    let value = emit_expression(ctx, spread.argument);
    let helper = ctx.symbol(SupportSymbol::Spread);
    ClassifiedAttribute::Directive(format!("{}({})", helper, value))
}

use crate::attributes::{
    classify_attribute, classify_spread, normalize_attribute_name, warn_on_class_conflict,
    AttributeKind,
};
use crate::children::{keep_template_text, push_template_children};
use crate::imports::SupportSymbol;
use crate::ir::{
    AttributeNode, AttributeValue, ComponentNode, ElementNode, ExpressionNode, FragmentNode,
    MarkupNode, NamedAttribute, SpreadAttribute,
};
use crate::template::{escape_attribute_value, TemplateBuilder};
use crate::transform::TransformContext;
use crate::visitor::{walk_element, MarkupVisitor};

lazy_static::lazy_static! {
    pub static ref VOID_TAGS: std::collections::HashSet<&'static str> = {
        let mut s = std::collections::HashSet::new();
        s.insert("area");
        s.insert("base");
        s.insert("br");
        s.insert("col");
        s.insert("embed");
        s.insert("hr");
        s.insert("img");
        s.insert("input");
        s.insert("link");
        s.insert("meta");
        s.insert("param");
        s.insert("source");
        s.insert("track");
        s.insert("wbr");
        s
    };
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag.to_ascii_lowercase().as_str())
}

/// `html`<tag ...>...</tag>`` for a markup element in value position.
pub fn compile_element(ctx: &mut TransformContext<'_>, element: &ElementNode<'_, '_>) -> String {
    let mut builder = TemplateBuilder::new();
    push_element(ctx, element, &mut builder);
    let tag = ctx.symbol(SupportSymbol::Html);
    builder.build_tagged(&tag)
}

/// Writes `element` into an already open template.
pub fn push_element(
    ctx: &mut TransformContext<'_>,
    element: &ElementNode<'_, '_>,
    builder: &mut TemplateBuilder,
) {
    warn_on_class_conflict(ctx, &element.tag, &element.attributes, element.span);

    builder.add_static(&format!("<{}", element.tag));
    for attribute in &element.attributes {
        let classified = match attribute {
            AttributeNode::Named(named) => classify_attribute(ctx, named),
            AttributeNode::Spread(spread) => classify_spread(ctx, spread),
        };
        classified.push_into(builder);
    }

    if is_void_tag(&element.tag) {
        builder.add_static(" />");
        return;
    }
    builder.add_static(">");
    push_template_children(ctx, &element.children, builder);
    builder.add_static(&format!("</{}>", element.tag));
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATIC INLINING
// ═══════════════════════════════════════════════════════════════════════════════

/// True when `element` and everything under it would compile to markup
/// text only, so it can be written out as plain HTML.
pub fn is_statically_inlineable(element: &ElementNode<'_, '_>) -> bool {
    let mut check = StaticInlineCheck { inlineable: true };
    check.visit_element(element);
    check.inlineable
}

struct StaticInlineCheck {
    inlineable: bool,
}

impl<'n, 'a> MarkupVisitor<'n, 'a> for StaticInlineCheck {
    fn visit_element(&mut self, element: &ElementNode<'n, 'a>) {
        if self.inlineable {
            walk_element(self, element);
        }
    }

    fn visit_component(&mut self, _component: &ComponentNode<'n, 'a>) {
        self.inlineable = false;
    }

    fn visit_fragment(&mut self, _fragment: &FragmentNode<'n, 'a>) {
        self.inlineable = false;
    }

    fn visit_expression(&mut self, _expression: &ExpressionNode<'n, 'a>) {
        self.inlineable = false;
    }

    fn visit_spread(&mut self, _spread: &SpreadAttribute<'n, 'a>) {
        self.inlineable = false;
    }

    fn visit_attribute(&mut self, attribute: &NamedAttribute<'n, 'a>) {
        let static_route = matches!(
            AttributeKind::of(&attribute.name),
            AttributeKind::Plain(_) | AttributeKind::Style | AttributeKind::ClassMap
        );
        if !static_route || !attribute.is_literal() {
            self.inlineable = false;
        }
    }
}

/// Plain HTML for a statically inlineable element.
pub fn render_static_element(ctx: &mut TransformContext<'_>, element: &ElementNode<'_, '_>) -> String {
    warn_on_class_conflict(ctx, &element.tag, &element.attributes, element.span);

    let mut html = format!("<{}", element.tag);
    for attribute in &element.attributes {
        let AttributeNode::Named(named) = attribute else {
            continue;
        };
        let name = if named.name == "classMap" {
            "class"
        } else {
            normalize_attribute_name(&named.name)
        };
        match &named.value {
            AttributeValue::Literal(text) => {
                html.push_str(&format!(" {}=\"{}\"", name, escape_attribute_value(text)));
            }
            AttributeValue::True => html.push_str(&format!(" {}", name)),
            _ => {}
        }
    }

    if is_void_tag(&element.tag) {
        html.push_str(" />");
        return html;
    }
    html.push('>');
    for child in &element.children {
        match child {
            MarkupNode::Text(text) if keep_template_text(ctx.options, text.raw) => {
                html.push_str(text.raw);
            }
            MarkupNode::Element(el) => html.push_str(&render_static_element(ctx, el)),
            _ => {}
        }
    }
    html.push_str(&format!("</{}>", element.tag));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tags() {
        for tag in ["br", "img", "input", "wbr", "IMG"] {
            assert!(is_void_tag(tag), "{}", tag);
        }
        for tag in ["div", "span", "svg", "template"] {
            assert!(!is_void_tag(tag), "{}", tag);
        }
    }
}

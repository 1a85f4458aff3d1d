use crate::ir::{
    AttributeNode, AttributeValue, ComponentNode, ElementNode, ExpressionNode, FragmentNode,
    MarkupNode, NamedAttribute, SpreadAttribute, TextNode,
};

/// Read-only traversal over the markup IR.
///
/// Implementers override `visit_*` and call the matching `walk_*` to keep
/// descending; not calling it prunes the subtree.
pub trait MarkupVisitor<'n, 'a> {
    fn visit_node(&mut self, node: &MarkupNode<'n, 'a>) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &ElementNode<'n, 'a>) {
        walk_element(self, element);
    }

    fn visit_component(&mut self, component: &ComponentNode<'n, 'a>) {
        walk_component(self, component);
    }

    fn visit_fragment(&mut self, fragment: &FragmentNode<'n, 'a>) {
        walk_children(self, &fragment.children);
    }

    fn visit_text(&mut self, _text: &TextNode<'n>) {}

    fn visit_expression(&mut self, _expression: &ExpressionNode<'n, 'a>) {}

    fn visit_attribute(&mut self, attribute: &NamedAttribute<'n, 'a>) {
        walk_attribute(self, attribute);
    }

    fn visit_spread(&mut self, _spread: &SpreadAttribute<'n, 'a>) {}
}

pub fn walk_node<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    node: &MarkupNode<'n, 'a>,
) {
    match node {
        MarkupNode::Element(el) => visitor.visit_element(el),
        MarkupNode::Component(c) => visitor.visit_component(c),
        MarkupNode::Fragment(f) => visitor.visit_fragment(f),
        MarkupNode::Text(t) => visitor.visit_text(t),
        MarkupNode::Expression(e) => visitor.visit_expression(e),
    }
}

pub fn walk_children<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    children: &[MarkupNode<'n, 'a>],
) {
    for child in children {
        visitor.visit_node(child);
    }
}

pub fn walk_attributes<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    attributes: &[AttributeNode<'n, 'a>],
) {
    for attribute in attributes {
        match attribute {
            AttributeNode::Named(named) => visitor.visit_attribute(named),
            AttributeNode::Spread(spread) => visitor.visit_spread(spread),
        }
    }
}

pub fn walk_attribute<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    attribute: &NamedAttribute<'n, 'a>,
) {
    if let AttributeValue::Markup(node) = &attribute.value {
        visitor.visit_node(node);
    }
}

pub fn walk_element<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    element: &ElementNode<'n, 'a>,
) {
    walk_attributes(visitor, &element.attributes);
    walk_children(visitor, &element.children);
}

pub fn walk_component<'n, 'a, V: MarkupVisitor<'n, 'a> + ?Sized>(
    visitor: &mut V,
    component: &ComponentNode<'n, 'a>,
) {
    walk_attributes(visitor, &component.attributes);
    walk_children(visitor, &component.children);
}

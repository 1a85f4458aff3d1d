//! Markup IR.
//!
//! oxc JSX nodes are lowered into a small tagged union before compilation:
//! markup elements and components are told apart once, here, by tag name,
//! and empty child containers (`{}`, `{/* note */}`) disappear. Holes keep
//! borrowing the original oxc expressions, so nothing is cloned.

use oxc_ast::ast::{
    Expression, JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement,
    JSXElementName, JSXFragment, JSXMemberExpression, JSXMemberExpressionObject,
};
use oxc_span::Span;

pub enum MarkupNode<'n, 'a> {
    Element(ElementNode<'n, 'a>),
    Component(ComponentNode<'n, 'a>),
    Fragment(FragmentNode<'n, 'a>),
    Text(TextNode<'n>),
    Expression(ExpressionNode<'n, 'a>),
}

/// Literal markup tag, e.g. `div`, `svg:rect`.
pub struct ElementNode<'n, 'a> {
    pub tag: String,
    pub attributes: Vec<AttributeNode<'n, 'a>>,
    pub children: Vec<MarkupNode<'n, 'a>>,
    pub span: Span,
}

/// Capitalized, member-expression or `this` tag, resolved at runtime.
pub struct ComponentNode<'n, 'a> {
    pub name: String,
    pub attributes: Vec<AttributeNode<'n, 'a>>,
    pub children: Vec<MarkupNode<'n, 'a>>,
    pub span: Span,
}

pub struct FragmentNode<'n, 'a> {
    pub children: Vec<MarkupNode<'n, 'a>>,
}

/// Text exactly as written in the source; entities are left encoded.
pub struct TextNode<'n> {
    pub raw: &'n str,
}

pub struct ExpressionNode<'n, 'a> {
    pub expression: &'n Expression<'a>,
    /// `{...items}` child.
    pub spread: bool,
}

pub enum AttributeNode<'n, 'a> {
    Named(NamedAttribute<'n, 'a>),
    Spread(SpreadAttribute<'n, 'a>),
}

pub struct NamedAttribute<'n, 'a> {
    /// `name` or `namespace:name`.
    pub name: String,
    pub value: AttributeValue<'n, 'a>,
}

pub struct SpreadAttribute<'n, 'a> {
    pub argument: &'n Expression<'a>,
}

pub enum AttributeValue<'n, 'a> {
    /// `name="..."`, holding the unquoted value.
    Literal(&'n str),
    /// Bare `name`.
    True,
    Expression(&'n Expression<'a>),
    /// `name=<div />` or `name=<>...</>`.
    Markup(Box<MarkupNode<'n, 'a>>),
}

impl<'n, 'a> NamedAttribute<'n, 'a> {
    pub fn is_literal(&self) -> bool {
        matches!(self.value, AttributeValue::Literal(_) | AttributeValue::True)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOWERING
// ═══════════════════════════════════════════════════════════════════════════════

/// Lowers JSX nodes, slicing text out of `source`.
pub struct MarkupLowerer<'n> {
    source: &'n str,
}

impl<'n> MarkupLowerer<'n> {
    pub fn new(source: &'n str) -> Self {
        Self { source }
    }

    pub fn lower_element<'a>(&self, element: &'n JSXElement<'a>) -> MarkupNode<'n, 'a> {
        let opening = &element.opening_element;
        let attributes = self.lower_attributes(&opening.attributes);
        let children = self.lower_children(&element.children);
        let span = element.span;

        match classify_tag(&opening.name) {
            TagKind::Markup(tag) => MarkupNode::Element(ElementNode {
                tag,
                attributes,
                children,
                span,
            }),
            TagKind::Component(name) => MarkupNode::Component(ComponentNode {
                name,
                attributes,
                children,
                span,
            }),
        }
    }

    pub fn lower_fragment<'a>(&self, fragment: &'n JSXFragment<'a>) -> MarkupNode<'n, 'a> {
        MarkupNode::Fragment(FragmentNode {
            children: self.lower_children(&fragment.children),
        })
    }

    fn lower_attributes<'a>(
        &self,
        items: &'n [JSXAttributeItem<'a>],
    ) -> Vec<AttributeNode<'n, 'a>> {
        let mut attributes = Vec::with_capacity(items.len());
        for item in items {
            match item {
                JSXAttributeItem::SpreadAttribute(spread) => {
                    attributes.push(AttributeNode::Spread(SpreadAttribute {
                        argument: &spread.argument,
                    }));
                }
                JSXAttributeItem::Attribute(attr) => {
                    let name = match &attr.name {
                        JSXAttributeName::Identifier(id) => id.name.to_string(),
                        JSXAttributeName::NamespacedName(ns) => {
                            format!("{}:{}", ns.namespace.name, ns.name.name)
                        }
                    };
                    let value = match &attr.value {
                        None => AttributeValue::True,
                        Some(JSXAttributeValue::StringLiteral(s)) => {
                            AttributeValue::Literal(s.value.as_str())
                        }
                        Some(JSXAttributeValue::ExpressionContainer(container)) => {
                            // The parser rejects `attr={}`; an empty container
                            // only appears in hand-built trees.
                            match container.expression.as_expression() {
                                Some(expr) => AttributeValue::Expression(expr),
                                None => continue,
                            }
                        }
                        Some(JSXAttributeValue::Element(el)) => {
                            AttributeValue::Markup(Box::new(self.lower_element(el)))
                        }
                        Some(JSXAttributeValue::Fragment(frag)) => {
                            AttributeValue::Markup(Box::new(self.lower_fragment(frag)))
                        }
                    };
                    attributes.push(AttributeNode::Named(NamedAttribute {
                        name,
                        value,
                    }));
                }
            }
        }
        attributes
    }

    fn lower_children<'a>(&self, children: &'n [JSXChild<'a>]) -> Vec<MarkupNode<'n, 'a>> {
        let source = self.source;
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            match child {
                JSXChild::Text(text) => {
                    let raw = &source[text.span.start as usize..text.span.end as usize];
                    if !raw.is_empty() {
                        nodes.push(MarkupNode::Text(TextNode { raw }));
                    }
                }
                JSXChild::Element(el) => nodes.push(self.lower_element(el)),
                JSXChild::Fragment(frag) => nodes.push(self.lower_fragment(frag)),
                JSXChild::ExpressionContainer(container) => {
                    if let Some(expr) = container.expression.as_expression() {
                        nodes.push(MarkupNode::Expression(ExpressionNode {
                            expression: expr,
                            spread: false,
                        }));
                    }
                }
                JSXChild::Spread(spread) => {
                    nodes.push(MarkupNode::Expression(ExpressionNode {
                        expression: &spread.expression,
                        spread: true,
                    }));
                }
            }
        }
        nodes
    }
}

pub enum TagKind {
    Markup(String),
    Component(String),
}

pub fn classify_tag(name: &JSXElementName<'_>) -> TagKind {
    match name {
        JSXElementName::Identifier(id) => tag_kind_for(id.name.to_string()),
        JSXElementName::IdentifierReference(id) => tag_kind_for(id.name.to_string()),
        JSXElementName::NamespacedName(ns) => {
            TagKind::Markup(format!("{}:{}", ns.namespace.name, ns.name.name))
        }
        JSXElementName::MemberExpression(me) => TagKind::Component(member_name(me)),
        JSXElementName::ThisExpression(_) => TagKind::Component("this".to_string()),
    }
}

fn tag_kind_for(name: String) -> TagKind {
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        TagKind::Component(name)
    } else {
        TagKind::Markup(name)
    }
}

fn member_name(me: &JSXMemberExpression<'_>) -> String {
    let object = match &me.object {
        JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => member_name(inner),
        JSXMemberExpressionObject::ThisExpression(_) => "this".to_string(),
    };
    format!("{}.{}", object, me.property.name)
}

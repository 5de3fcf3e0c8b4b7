//! AST types for parsed templates.

use crate::js_ast::JsNode;
use smol_str::SmolStr;
use source_span::Span;

/// A node in the template AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateNode {
    /// The synthetic root of a parsed template.
    Root(RootNode),
    /// An element.
    Element(ElementNode),
    /// A text run.
    Text(TextNode),
}

impl TemplateNode {
    /// Get the span of this node.
    pub fn span(&self) -> Span {
        match self {
            Self::Root(n) => n.span,
            Self::Element(n) => n.span,
            Self::Text(n) => n.span,
        }
    }

    /// Get the code-AST node attached by the transformer, if any.
    pub fn code_node(&self) -> Option<&JsNode> {
        match self {
            Self::Root(n) => n.code_node.as_ref(),
            Self::Element(n) => n.code_node.as_ref(),
            Self::Text(n) => n.code_node.as_ref(),
        }
    }

    /// Get the node's children, if it can have any.
    pub fn children(&self) -> Option<&[TemplateNode]> {
        match self {
            Self::Root(n) => Some(&n.children),
            Self::Element(n) => Some(&n.children),
            Self::Text(_) => None,
        }
    }

    /// Mutable access to the node's children, if it can have any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<TemplateNode>> {
        match self {
            Self::Root(n) => Some(&mut n.children),
            Self::Element(n) => Some(&mut n.children),
            Self::Text(_) => None,
        }
    }
}

/// The synthetic root node.
///
/// [`parse`](crate::parser::parse) returns exactly one of these, wrapped in
/// [`TemplateNode::Root`] so transforms can visit the root like any other
/// node.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootNode {
    /// Top-level children of the template.
    pub children: Vec<TemplateNode>,
    /// The generated `render` function declaration, set by the transformer.
    pub code_node: Option<JsNode>,
    /// Span of the entire template.
    pub span: Span,
}

/// An element node.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    /// The tag name.
    pub tag: SmolStr,
    /// Child nodes, in source order.
    pub children: Vec<TemplateNode>,
    /// The `h(tag, children)` call expression, set by the transformer.
    pub code_node: Option<JsNode>,
    /// Span of the element from its opening tag through its closing tag,
    /// where one was found.
    pub span: Span,
    /// Span of the opening tag.
    pub tag_span: Span,
}

/// A text node.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    /// The text content.
    pub content: String,
    /// The string literal for this run, set by the transformer.
    pub code_node: Option<JsNode>,
    /// Span of the text run.
    pub span: Span,
}

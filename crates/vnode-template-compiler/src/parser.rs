//! Parser for template strings.

use crate::ast::{ElementNode, RootNode, TemplateNode, TextNode};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize, Token, TokenKind};
use source_span::Span;

/// Parse a template into its AST.
///
/// The returned node is always the [`TemplateNode::Root`] variant.
pub fn parse(source: &str) -> ParseResult<TemplateNode> {
    let tokens = tokenize(source)?;
    build_tree(tokens, source.len())
}

/// Build the template tree from the token stream.
///
/// Open elements live on an explicit stack; the synthetic root's child list
/// sits below the stack bottom and is never popped. Elements still open when
/// the tokens run out are attached to their parents unchanged.
fn build_tree(tokens: Vec<Token>, source_len: usize) -> ParseResult<TemplateNode> {
    let mut root_children: Vec<TemplateNode> = Vec::new();
    let mut stack: Vec<ElementNode> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::TagOpen { name } => {
                stack.push(ElementNode {
                    tag: name,
                    children: Vec::new(),
                    code_node: None,
                    span: token.span,
                    tag_span: token.span,
                });
            }
            TokenKind::Text { content } => {
                let node = TemplateNode::Text(TextNode {
                    content,
                    code_node: None,
                    span: token.span,
                });
                append_child(&mut stack, &mut root_children, node);
            }
            TokenKind::TagClose { name } => {
                let Some(mut element) = stack.pop() else {
                    return Err(ParseError::unbalanced_close(&name, token.span));
                };
                if element.tag != name {
                    return Err(ParseError::mismatched_close(
                        &element.tag,
                        &name,
                        token.span,
                    ));
                }
                element.span = element.span.merge(token.span);
                append_child(&mut stack, &mut root_children, TemplateNode::Element(element));
            }
        }
    }

    // Unclosed elements keep the descendants they accumulated.
    while let Some(element) = stack.pop() {
        append_child(&mut stack, &mut root_children, TemplateNode::Element(element));
    }

    Ok(TemplateNode::Root(RootNode {
        children: root_children,
        code_node: None,
        span: Span::new(0, source_len as u32),
    }))
}

/// Append a node to the innermost open element, or to the root.
fn append_child(
    stack: &mut [ElementNode],
    root_children: &mut Vec<TemplateNode>,
    node: TemplateNode,
) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root_children.push(node),
    }
}

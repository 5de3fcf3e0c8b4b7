//! Template compiler front and middle end.
//!
//! This crate turns a markup-style template string into a template AST and
//! transforms that AST into the code-generation AST consumed by
//! `vnode-codegen`. The pipeline is strictly sequential and pure: a
//! finite-state-machine lexer, a stack-based parser, and a depth-first
//! enter/exit transform traversal.

pub mod ast;
pub mod context;
pub mod error;
pub mod js_ast;
pub mod lexer;
pub mod parser;
pub mod transforms;

pub use ast::*;
pub use context::{NodeEdit, TransformContext};
pub use error::{
    ParseError, ParseErrorCode, ParseResult, TransformError, TransformErrorCode, TransformResult,
};
pub use js_ast::*;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;
pub use transforms::{
    transform, transform_with, ExitPhase, NodeTransform, TransformElement, TransformRoot,
    TransformText,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_then_transform() {
        let mut ast = parse("<div><p>Vue</p><p>Template</p></div>").unwrap();
        transform(&mut ast).unwrap();
        assert!(ast.code_node().is_some());
    }

    #[test]
    fn test_every_node_carries_a_code_node() {
        fn check(node: &TemplateNode) {
            assert!(node.code_node().is_some());
            for child in node.children().unwrap_or_default() {
                check(child);
            }
        }

        let mut ast = parse("<div><p>Vue</p><p>Template</p></div>").unwrap();
        transform(&mut ast).unwrap();
        check(&ast);
    }
}

//! Template-to-render-function compiler.
//!
//! Composes the pipeline: parse → transform → generate. The produced code
//! defines a `render` function whose body builds a virtual node tree through
//! the host-supplied `h(tag, children)` primitive; this crate never executes
//! it.
//!
//! ```
//! let code = vnode_compiler::compile("<div><p>Vue</p></div>").unwrap();
//! assert_eq!(code, "function render () {\n  return h('div', h('p', 'Vue'))\n}");
//! ```

pub use source_span::{LineCol, LineIndex, Span};
pub use vnode_codegen::generate;
pub use vnode_template_compiler::{
    parse, tokenize, transform, transform_with, ExitPhase, JsNode, NodeEdit, NodeTransform,
    ParseError, ParseErrorCode, TemplateNode, Token, TokenKind, TransformContext, TransformElement,
    TransformError, TransformErrorCode, TransformRoot, TransformText,
};

use thiserror::Error;

/// An error from any stage of the compile pipeline.
///
/// Every failure is final for the current call: the pipeline is
/// deterministic and pure, so there is no partial result and nothing to
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Tokenizing or parsing the template failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Transforming the template AST failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl CompileError {
    /// The source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::Parse(e) => e.span,
            Self::Transform(e) => e.span,
        }
    }

    /// The stage error code as a kebab-case string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.code.as_str(),
            Self::Transform(e) => e.code.as_str(),
        }
    }
}

/// Compile a template string into render-function source code.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let mut ast = parse(source)?;
    transform(&mut ast)?;
    let code_node = ast
        .code_node()
        .ok_or_else(|| TransformError::missing_code_node(ast.span()))?;
    Ok(generate(code_node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_two_children() {
        let code = compile("<div><p>Vue</p><p>Template</p></div>").unwrap();
        assert_eq!(
            code,
            "function render () {\n  return h('div', [h('p', 'Vue'), h('p', 'Template')])\n}"
        );
    }

    #[test]
    fn test_compile_single_child_is_not_wrapped() {
        let code = compile("<div><p>Vue</p></div>").unwrap();
        assert_eq!(
            code,
            "function render () {\n  return h('div', h('p', 'Vue'))\n}"
        );
    }

    #[test]
    fn test_compile_childless_root() {
        let code = compile("<div></div>").unwrap();
        assert_eq!(code, "function render () {\n  return h('div')\n}");
    }

    #[test]
    fn test_compile_deep_nesting() {
        let code = compile("<a><b><c>x</c></b></a>").unwrap();
        assert_eq!(
            code,
            "function render () {\n  return h('a', h('b', h('c', 'x')))\n}"
        );
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = compile("<div").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
        assert_eq!(err.code(), "malformed-tag");
        assert_eq!(err.span(), Span::new(0, 4));
    }

    #[test]
    fn test_transform_error_surfaces() {
        let err = compile("").unwrap_err();
        assert!(matches!(err, CompileError::Transform(_)));
        assert_eq!(err.code(), "empty-template");
    }

    #[test]
    fn test_multiple_roots_error_points_at_second_root() {
        let err = compile("<div></div><p></p>").unwrap_err();
        assert_eq!(err.code(), "multiple-roots");
        assert_eq!(err.span(), Span::new(11, 18));
    }

    #[test]
    fn test_error_display_and_position() {
        let source = "<div>\u{0021}</div>";
        let err = compile(source).unwrap_err();
        assert_eq!(err.code(), "invalid-character");

        let index = LineIndex::new(source);
        let pos = index.line_col(err.span().start);
        assert_eq!(pos.to_display(), (1, 6));
        assert_eq!(err.to_string(), "Invalid character: '!'");
    }
}

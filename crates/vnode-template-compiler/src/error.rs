//! Error types for template compilation.

use source_span::Span;
use std::fmt;

/// Result type for lexing and parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// An error that occurred while tokenizing or parsing a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The span where the error occurred.
    pub span: Span,
    /// The error code.
    pub code: ParseErrorCode,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span, code: ParseErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }

    /// Create an invalid character error.
    pub fn invalid_character(c: char, span: Span) -> Self {
        Self::new(
            format!("Invalid character: {:?}", c),
            span,
            ParseErrorCode::InvalidCharacter,
        )
    }

    /// Create a malformed tag error.
    pub fn malformed_tag(span: Span) -> Self {
        Self::new(
            "Unterminated tag at end of input",
            span,
            ParseErrorCode::MalformedTag,
        )
    }

    /// Create an unbalanced close error.
    pub fn unbalanced_close(tag: &str, span: Span) -> Self {
        Self::new(
            format!("Closing tag </{}> has no matching open tag", tag),
            span,
            ParseErrorCode::UnbalancedClose,
        )
    }

    /// Create a mismatched close error.
    pub fn mismatched_close(expected: &str, found: &str, span: Span) -> Self {
        Self::new(
            format!("Expected </{}>, found </{}>", expected, found),
            span,
            ParseErrorCode::MismatchedClose,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    /// A character outside the template grammar.
    InvalidCharacter,
    /// Input ended in the middle of a tag.
    MalformedTag,
    /// A closing tag with no open element left to close.
    UnbalancedClose,
    /// A closing tag that does not match the open element.
    MismatchedClose,
}

impl ParseErrorCode {
    /// Get the error code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorCode::InvalidCharacter => "invalid-character",
            ParseErrorCode::MalformedTag => "malformed-tag",
            ParseErrorCode::UnbalancedClose => "unbalanced-close",
            ParseErrorCode::MismatchedClose => "mismatched-close",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while transforming a template AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformError {
    /// The error message.
    pub message: String,
    /// The span where the error occurred.
    pub span: Span,
    /// The error code.
    pub code: TransformErrorCode,
}

impl TransformError {
    /// Create a new transform error.
    pub fn new(message: impl Into<String>, span: Span, code: TransformErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }

    /// Create an empty template error.
    pub fn empty_template(span: Span) -> Self {
        Self::new(
            "Template has no root element",
            span,
            TransformErrorCode::EmptyTemplate,
        )
    }

    /// Create a multiple roots error.
    pub fn multiple_roots(span: Span) -> Self {
        Self::new(
            "Template has more than one root element",
            span,
            TransformErrorCode::MultipleRoots,
        )
    }

    /// Create a missing code node error.
    pub fn missing_code_node(span: Span) -> Self {
        Self::new(
            "Node has no code node attached",
            span,
            TransformErrorCode::MissingCodeNode,
        )
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransformError {}

/// Error codes for categorizing transform errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformErrorCode {
    /// The root has no children to compile.
    EmptyTemplate,
    /// The root has more than one child.
    MultipleRoots,
    /// A node that should carry a code node does not.
    MissingCodeNode,
}

impl TransformErrorCode {
    /// Get the error code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformErrorCode::EmptyTemplate => "empty-template",
            TransformErrorCode::MultipleRoots => "multiple-roots",
            TransformErrorCode::MissingCodeNode => "missing-code-node",
        }
    }
}

impl fmt::Display for TransformErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

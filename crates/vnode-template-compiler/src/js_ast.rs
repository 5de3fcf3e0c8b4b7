//! Code-generation AST.
//!
//! A minimal JavaScript-flavored expression/statement tree. The transformer
//! builds it bottom-up during the exit phase of the traversal; it is never
//! mutated afterward.

use smol_str::SmolStr;

/// A node in the code-generation AST.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsNode {
    /// A string literal.
    StringLiteral(StringLiteral),
    /// An identifier.
    Identifier(Identifier),
    /// An array expression.
    ArrayExpression(ArrayExpression),
    /// A function call.
    CallExpression(CallExpression),
    /// A function declaration.
    FunctionDecl(FunctionDecl),
    /// A return statement.
    ReturnStatement(ReturnStatement),
}

impl JsNode {
    /// Shorthand for a string literal node.
    pub fn string_literal(value: impl Into<String>) -> Self {
        Self::StringLiteral(StringLiteral::new(value))
    }

    /// Shorthand for an identifier node.
    pub fn identifier(name: impl Into<SmolStr>) -> Self {
        Self::Identifier(Identifier::new(name))
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringLiteral {
    /// The literal value, unescaped.
    pub value: String,
}

impl StringLiteral {
    /// Create a new string literal.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    /// The identifier name.
    pub name: SmolStr,
}

impl Identifier {
    /// Create a new identifier.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }
}

/// An array expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayExpression {
    /// The array elements, in order.
    pub elements: Vec<JsNode>,
}

impl ArrayExpression {
    /// Create a new array expression.
    pub fn new(elements: Vec<JsNode>) -> Self {
        Self { elements }
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression {
    /// The called function.
    pub callee: Identifier,
    /// Call arguments, in order.
    pub arguments: Vec<JsNode>,
}

impl CallExpression {
    /// Create a new call expression.
    pub fn new(callee: impl Into<SmolStr>, arguments: Vec<JsNode>) -> Self {
        Self {
            callee: Identifier::new(callee),
            arguments,
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    /// The function name.
    pub id: Identifier,
    /// Parameters, in order.
    pub params: Vec<JsNode>,
    /// Body statements, in order.
    pub body: Vec<JsNode>,
}

/// A return statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnStatement {
    /// The returned expression.
    pub value: Box<JsNode>,
}

impl ReturnStatement {
    /// Create a new return statement.
    pub fn new(value: JsNode) -> Self {
        Self {
            value: Box::new(value),
        }
    }
}

//! Render-function source generation.
//!
//! Walks the code-generation AST attached to a transformed template and
//! emits formatted source text defining the `render` function. Every node
//! kind has exactly one render rule; the match is exhaustive, so adding a
//! node kind forces a rule here.

pub mod context;

pub use context::CodegenContext;

use vnode_template_compiler::js_ast::{
    ArrayExpression, CallExpression, FunctionDecl, JsNode, ReturnStatement, StringLiteral,
};

/// Generate source text for a code-AST node.
pub fn generate(node: &JsNode) -> String {
    let mut cx = CodegenContext::new();
    gen_node(node, &mut cx);
    cx.finish()
}

/// Generate code for a single node.
fn gen_node(node: &JsNode, cx: &mut CodegenContext) {
    match node {
        JsNode::FunctionDecl(n) => gen_function_decl(n, cx),
        JsNode::ReturnStatement(n) => gen_return_statement(n, cx),
        JsNode::CallExpression(n) => gen_call_expression(n, cx),
        JsNode::ArrayExpression(n) => gen_array_expression(n, cx),
        JsNode::StringLiteral(n) => gen_string_literal(n, cx),
        JsNode::Identifier(n) => cx.push(&n.name),
    }
}

fn gen_function_decl(node: &FunctionDecl, cx: &mut CodegenContext) {
    cx.push("function ");
    cx.push(&node.id.name);
    cx.push(" (");
    gen_node_list(&node.params, cx);
    cx.push(") {");
    cx.indent();
    for (i, statement) in node.body.iter().enumerate() {
        if i > 0 {
            cx.newline();
        }
        gen_node(statement, cx);
    }
    cx.deindent();
    cx.push("}");
}

fn gen_return_statement(node: &ReturnStatement, cx: &mut CodegenContext) {
    cx.push("return ");
    gen_node(&node.value, cx);
}

fn gen_call_expression(node: &CallExpression, cx: &mut CodegenContext) {
    cx.push(&node.callee.name);
    cx.push("(");
    gen_node_list(&node.arguments, cx);
    cx.push(")");
}

fn gen_array_expression(node: &ArrayExpression, cx: &mut CodegenContext) {
    cx.push("[");
    gen_node_list(&node.elements, cx);
    cx.push("]");
}

/// String literals are emitted in single quotes, unescaped. The values come
/// from the template author, who is trusted.
fn gen_string_literal(node: &StringLiteral, cx: &mut CodegenContext) {
    cx.push("'");
    cx.push(&node.value);
    cx.push("'");
}

/// Comma-join a node list, without a trailing comma or line breaks.
fn gen_node_list(nodes: &[JsNode], cx: &mut CodegenContext) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            cx.push(", ");
        }
        gen_node(node, cx);
    }
}

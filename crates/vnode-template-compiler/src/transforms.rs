//! Template-to-code transforms.
//!
//! A single depth-first traversal runs an ordered table of node transforms
//! over the template AST. Each transform has an explicit pre-order `enter`
//! hook and may request a post-order `exit` hook; exits run after the
//! node's children, in reverse registration order, so a late-registered
//! generic transform still sees fully processed children before an earlier,
//! more specific transform finishes the parent.

use crate::ast::{TemplateNode, TextNode};
use crate::context::{NodeEdit, TransformContext};
use crate::error::{TransformError, TransformResult};
use crate::js_ast::{
    ArrayExpression, CallExpression, FunctionDecl, Identifier, JsNode, ReturnStatement,
};

/// Whether a transform wants its exit hook run once the current node's
/// children have been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPhase {
    /// No exit-phase work for this node.
    Skip,
    /// Run [`NodeTransform::exit`] after the children.
    Run,
}

/// A node transform with explicit enter and exit hooks.
///
/// `enter` runs pre-order, in registration order, and may mutate the node,
/// replace or remove it through the context, or schedule `exit`. `exit`
/// runs post-order once every descendant has been processed.
pub trait NodeTransform {
    /// Visit a node before its children.
    fn enter(
        &self,
        node: &mut TemplateNode,
        cx: &mut TransformContext,
    ) -> TransformResult<ExitPhase>;

    /// Visit a node after its children, if requested by `enter`.
    fn exit(
        &self,
        _node: &mut TemplateNode,
        _cx: &mut TransformContext,
    ) -> TransformResult<()> {
        Ok(())
    }
}

/// Run the built-in transform table over a parsed template, attaching a
/// code node to every template node and a `render` function declaration to
/// the root.
pub fn transform(root: &mut TemplateNode) -> TransformResult<()> {
    let transforms: [&dyn NodeTransform; 3] = [&TransformElement, &TransformText, &TransformRoot];
    transform_with(root, &transforms)?;
    if root.code_node().is_none() {
        return Err(TransformError::missing_code_node(root.span()));
    }
    Ok(())
}

/// Run a caller-supplied transform table over a parsed template.
///
/// This is the extensibility surface: callers may interleave their own
/// transforms with the built-ins, in any order.
pub fn transform_with(
    root: &mut TemplateNode,
    transforms: &[&dyn NodeTransform],
) -> TransformResult<()> {
    let mut cx = TransformContext::new();
    traverse_node(root, transforms, &mut cx)?;
    Ok(())
}

/// Outcome of visiting one node, reported to the parent's child loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    Kept,
    Removed,
}

/// Visit one node: enters, children, exits.
fn traverse_node(
    node: &mut TemplateNode,
    transforms: &[&dyn NodeTransform],
    cx: &mut TransformContext,
) -> TransformResult<Traversal> {
    // Indices into the table whose exit hooks were requested.
    let mut exits: Vec<usize> = Vec::new();

    for (i, t) in transforms.iter().enumerate() {
        if t.enter(node, cx)? == ExitPhase::Run {
            exits.push(i);
        }
        match cx.take_edit() {
            NodeEdit::Keep => {}
            NodeEdit::Replace(new) => *node = new,
            NodeEdit::Remove => return Ok(Traversal::Removed),
        }
    }

    if let Some(children) = node.children_mut() {
        let saved = cx.child_index;
        let mut i = 0;
        while i < children.len() {
            cx.child_index = Some(i);
            match traverse_node(&mut children[i], transforms, cx)? {
                Traversal::Kept => i += 1,
                Traversal::Removed => {
                    children.remove(i);
                }
            }
        }
        cx.child_index = saved;
    }

    for &i in exits.iter().rev() {
        transforms[i].exit(node, cx)?;
        match cx.take_edit() {
            NodeEdit::Keep => {}
            NodeEdit::Replace(new) => *node = new,
            NodeEdit::Remove => return Ok(Traversal::Removed),
        }
    }

    Ok(Traversal::Kept)
}

/// Clone a child's attached code node, or fail if no earlier transform
/// produced one.
fn child_code(child: &TemplateNode) -> TransformResult<JsNode> {
    child
        .code_node()
        .cloned()
        .ok_or_else(|| TransformError::missing_code_node(child.span()))
}

/// Attaches an `h(tag, children)` call expression to every element once its
/// children carry their own code nodes.
pub struct TransformElement;

impl NodeTransform for TransformElement {
    fn enter(
        &self,
        node: &mut TemplateNode,
        _cx: &mut TransformContext,
    ) -> TransformResult<ExitPhase> {
        Ok(match node {
            TemplateNode::Element(_) => ExitPhase::Run,
            _ => ExitPhase::Skip,
        })
    }

    fn exit(&self, node: &mut TemplateNode, _cx: &mut TransformContext) -> TransformResult<()> {
        let TemplateNode::Element(el) = node else {
            return Ok(());
        };

        let mut call = CallExpression::new("h", vec![JsNode::string_literal(el.tag.as_str())]);
        match el.children.as_slice() {
            [] => {}
            // A sole child is passed through directly, never wrapped.
            [child] => call.arguments.push(child_code(child)?),
            children => {
                let elements = children
                    .iter()
                    .map(child_code)
                    .collect::<TransformResult<Vec<_>>>()?;
                call.arguments
                    .push(JsNode::ArrayExpression(ArrayExpression::new(elements)));
            }
        }
        el.code_node = Some(JsNode::CallExpression(call));
        Ok(())
    }
}

/// Attaches a string literal to every text node. Runs entirely pre-order.
pub struct TransformText;

impl NodeTransform for TransformText {
    fn enter(
        &self,
        node: &mut TemplateNode,
        _cx: &mut TransformContext,
    ) -> TransformResult<ExitPhase> {
        if let TemplateNode::Text(text) = node {
            text.code_node = Some(JsNode::string_literal(text.content.as_str()));
        }
        Ok(ExitPhase::Skip)
    }
}

/// Wraps the root's sole child in a `render` function declaration.
pub struct TransformRoot;

impl NodeTransform for TransformRoot {
    fn enter(
        &self,
        node: &mut TemplateNode,
        _cx: &mut TransformContext,
    ) -> TransformResult<ExitPhase> {
        Ok(match node {
            TemplateNode::Root(_) => ExitPhase::Run,
            _ => ExitPhase::Skip,
        })
    }

    fn exit(&self, node: &mut TemplateNode, _cx: &mut TransformContext) -> TransformResult<()> {
        let TemplateNode::Root(root) = node else {
            return Ok(());
        };

        let child = match root.children.as_slice() {
            [] => return Err(TransformError::empty_template(root.span)),
            [child] => child,
            [_, second, ..] => return Err(TransformError::multiple_roots(second.span())),
        };

        let value = child_code(child)?;
        root.code_node = Some(JsNode::FunctionDecl(FunctionDecl {
            id: Identifier::new("render"),
            params: Vec::new(),
            body: vec![JsNode::ReturnStatement(ReturnStatement::new(value))],
        }));
        Ok(())
    }
}

/// Make a detached text node, for transforms that synthesize replacements.
pub fn text_node(content: impl Into<String>) -> TemplateNode {
    TemplateNode::Text(TextNode {
        content: content.into(),
        code_node: None,
        span: source_span::Span::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformErrorCode;
    use crate::parser::parse;
    use std::cell::RefCell;

    #[test]
    fn test_text_gets_string_literal() {
        let mut ast = parse("<p>Vue</p>").unwrap();
        transform(&mut ast).unwrap();

        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        let TemplateNode::Element(p) = &root.children[0] else {
            panic!("Expected element");
        };
        let Some(JsNode::StringLiteral(lit)) = p.children[0].code_node() else {
            panic!("Expected string literal");
        };
        assert_eq!(lit.value, "Vue");
    }

    #[test]
    fn test_single_child_is_not_wrapped() {
        let mut ast = parse("<div><p>Vue</p></div>").unwrap();
        transform(&mut ast).unwrap();

        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        let Some(JsNode::CallExpression(call)) = root.children[0].code_node() else {
            panic!("Expected call expression");
        };
        assert_eq!(call.callee.name, "h");
        assert_eq!(call.arguments.len(), 2);
        assert!(matches!(call.arguments[1], JsNode::CallExpression(_)));
    }

    #[test]
    fn test_multiple_children_are_wrapped_in_array() {
        let mut ast = parse("<div><p>Vue</p><p>Template</p></div>").unwrap();
        transform(&mut ast).unwrap();

        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        let Some(JsNode::CallExpression(call)) = root.children[0].code_node() else {
            panic!("Expected call expression");
        };
        let JsNode::ArrayExpression(array) = &call.arguments[1] else {
            panic!("Expected array expression");
        };
        assert_eq!(array.elements.len(), 2);
    }

    #[test]
    fn test_childless_element_call_has_tag_only() {
        let mut ast = parse("<br></br>").unwrap();
        transform(&mut ast).unwrap();

        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        let Some(JsNode::CallExpression(call)) = root.children[0].code_node() else {
            panic!("Expected call expression");
        };
        assert_eq!(call.arguments.len(), 1);
    }

    #[test]
    fn test_root_gets_render_function() {
        let mut ast = parse("<div>Vue</div>").unwrap();
        transform(&mut ast).unwrap();

        let Some(JsNode::FunctionDecl(decl)) = ast.code_node() else {
            panic!("Expected function declaration");
        };
        assert_eq!(decl.id.name, "render");
        assert!(decl.params.is_empty());
        assert_eq!(decl.body.len(), 1);
        assert!(matches!(decl.body[0], JsNode::ReturnStatement(_)));
    }

    #[test]
    fn test_empty_template_is_rejected() {
        let mut ast = parse("").unwrap();
        let err = transform(&mut ast).unwrap_err();
        assert_eq!(err.code, TransformErrorCode::EmptyTemplate);
    }

    #[test]
    fn test_multiple_roots_are_rejected() {
        let mut ast = parse("<div></div><p></p>").unwrap();
        let err = transform(&mut ast).unwrap_err();
        assert_eq!(err.code, TransformErrorCode::MultipleRoots);
    }

    /// Records every node it enters, and optionally removes matching tags.
    struct Recorder {
        label: &'static str,
        log: RefCell<Vec<String>>,
        remove_tag: Option<&'static str>,
    }

    impl Recorder {
        fn new(label: &'static str) -> Self {
            Self {
                label,
                log: RefCell::new(Vec::new()),
                remove_tag: None,
            }
        }

        fn removing(label: &'static str, tag: &'static str) -> Self {
            Self {
                remove_tag: Some(tag),
                ..Self::new(label)
            }
        }
    }

    impl NodeTransform for Recorder {
        fn enter(
            &self,
            node: &mut TemplateNode,
            cx: &mut TransformContext,
        ) -> TransformResult<ExitPhase> {
            let name = match node {
                TemplateNode::Root(_) => "Root".to_string(),
                TemplateNode::Element(el) => el.tag.to_string(),
                TemplateNode::Text(text) => format!("#{}", text.content),
            };
            self.log.borrow_mut().push(format!("enter:{}:{}", self.label, name));

            if let TemplateNode::Element(el) = node {
                if self.remove_tag == Some(el.tag.as_str()) {
                    cx.remove_node();
                }
            }
            Ok(ExitPhase::Run)
        }

        fn exit(
            &self,
            node: &mut TemplateNode,
            _cx: &mut TransformContext,
        ) -> TransformResult<()> {
            let name = match node {
                TemplateNode::Root(_) => "Root".to_string(),
                TemplateNode::Element(el) => el.tag.to_string(),
                TemplateNode::Text(text) => format!("#{}", text.content),
            };
            self.log.borrow_mut().push(format!("exit:{}:{}", self.label, name));
            Ok(())
        }
    }

    #[test]
    fn test_exits_run_in_reverse_registration_order() {
        let a = Recorder::new("a");
        let b = Recorder::new("b");
        let shared = RefCell::new(Vec::new());

        // Merge both logs through one shared buffer to observe interleaving.
        struct Tee<'a>(&'a Recorder, &'a RefCell<Vec<String>>);
        impl NodeTransform for Tee<'_> {
            fn enter(
                &self,
                node: &mut TemplateNode,
                cx: &mut TransformContext,
            ) -> TransformResult<ExitPhase> {
                let phase = self.0.enter(node, cx)?;
                self.1
                    .borrow_mut()
                    .push(self.0.log.borrow().last().cloned().unwrap_or_default());
                Ok(phase)
            }
            fn exit(
                &self,
                node: &mut TemplateNode,
                cx: &mut TransformContext,
            ) -> TransformResult<()> {
                self.0.exit(node, cx)?;
                self.1
                    .borrow_mut()
                    .push(self.0.log.borrow().last().cloned().unwrap_or_default());
                Ok(())
            }
        }

        let ta = Tee(&a, &shared);
        let tb = Tee(&b, &shared);
        let mut ast = parse("<p>Vue</p>").unwrap();
        transform_with(&mut ast, &[&ta, &tb]).unwrap();

        let log = shared.borrow();
        let expected = vec![
            "enter:a:Root",
            "enter:b:Root",
            "enter:a:p",
            "enter:b:p",
            "enter:a:#Vue",
            "enter:b:#Vue",
            "exit:b:#Vue",
            "exit:a:#Vue",
            "exit:b:p",
            "exit:a:p",
            "exit:b:Root",
            "exit:a:Root",
        ];
        assert_eq!(log.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_remove_node_prevents_descent() {
        let remover = Recorder::removing("r", "div");
        let witness = Recorder::new("w");
        let mut ast = parse("<div><p>Vue</p></div>").unwrap();
        transform_with(&mut ast, &[&remover, &witness]).unwrap();

        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        assert!(root.children.is_empty());

        // Neither transform descended into the removed element's children,
        // and the witness never even entered the removed element.
        let log = witness.log.borrow();
        assert_eq!(log.as_slice(), ["enter:w:Root", "exit:w:Root"]);
        let log = remover.log.borrow();
        assert!(!log.iter().any(|entry| entry.contains(":p")));
        assert!(!log.iter().any(|entry| entry.contains("#Vue")));
    }

    #[test]
    fn test_remove_node_at_root_is_a_no_op() {
        struct RemoveEverything;
        impl NodeTransform for RemoveEverything {
            fn enter(
                &self,
                _node: &mut TemplateNode,
                cx: &mut TransformContext,
            ) -> TransformResult<ExitPhase> {
                cx.remove_node();
                cx.remove_node();
                Ok(ExitPhase::Skip)
            }
        }

        let mut ast = parse("<div>Vue</div>").unwrap();
        transform_with(&mut ast, &[&RemoveEverything]).unwrap();

        // The root survives; its children were removed.
        let TemplateNode::Root(root) = &ast else {
            panic!("Expected root");
        };
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_replace_node_is_seen_by_later_transforms() {
        struct Reword;
        impl NodeTransform for Reword {
            fn enter(
                &self,
                node: &mut TemplateNode,
                cx: &mut TransformContext,
            ) -> TransformResult<ExitPhase> {
                if let TemplateNode::Text(text) = node {
                    if text.content == "Vue" {
                        cx.replace_node(text_node("World"));
                    }
                }
                Ok(ExitPhase::Skip)
            }
        }

        let mut ast = parse("<p>Vue</p>").unwrap();
        transform_with(
            &mut ast,
            &[&Reword, &TransformElement, &TransformText, &TransformRoot],
        )
        .unwrap();

        let Some(JsNode::FunctionDecl(decl)) = ast.code_node() else {
            panic!("Expected function declaration");
        };
        let JsNode::ReturnStatement(ret) = &decl.body[0] else {
            panic!("Expected return statement");
        };
        let JsNode::CallExpression(call) = ret.value.as_ref() else {
            panic!("Expected call expression");
        };
        let JsNode::StringLiteral(lit) = &call.arguments[1] else {
            panic!("Expected string literal");
        };
        assert_eq!(lit.value, "World");
    }

    #[test]
    fn test_missing_code_node_under_custom_table() {
        // Without TransformText, the element's sole child has no code node.
        let mut ast = parse("<p>Vue</p>").unwrap();
        let err = transform_with(&mut ast, &[&TransformElement, &TransformRoot]).unwrap_err();
        assert_eq!(err.code, TransformErrorCode::MissingCodeNode);
    }
}

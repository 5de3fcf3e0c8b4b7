//! Transform traversal context.

use crate::ast::TemplateNode;

/// A pending structural edit recorded by a transform against the current
/// node, applied by the traversal once the hook returns.
#[derive(Debug, Default)]
pub enum NodeEdit {
    /// Leave the node where it is.
    #[default]
    Keep,
    /// Overwrite the node in its parent's child list.
    Replace(TemplateNode),
    /// Splice the node out of its parent's child list.
    Remove,
}

/// Mutable cursor threaded through the transform traversal.
///
/// The current node itself is the `&mut TemplateNode` passed to each hook;
/// it borrows the slot in the parent's child list directly, so the parent's
/// child at [`child_index`](Self::child_index) and the current node are one
/// and the same.
#[derive(Debug, Default)]
pub struct TransformContext {
    /// Position of the current node in its parent's child list.
    /// `None` while the root is current. Maintained by the traversal.
    pub child_index: Option<usize>,
    /// Edit requested by the most recent hook.
    edit: NodeEdit,
}

impl TransformContext {
    /// Create a new context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current node with another.
    ///
    /// Later transforms and the descent into children see the replacement.
    /// No-op at the root, which has no parent slot to overwrite.
    pub fn replace_node(&mut self, node: TemplateNode) {
        if self.child_index.is_some() {
            self.edit = NodeEdit::Replace(node);
        }
    }

    /// Remove the current node from its parent.
    ///
    /// Aborts the remaining transforms for this node and the descent into
    /// its children. Idempotent no-op at the root.
    pub fn remove_node(&mut self) {
        if self.child_index.is_some() {
            self.edit = NodeEdit::Remove;
        }
    }

    /// Take the pending edit, leaving `Keep` behind.
    pub(crate) fn take_edit(&mut self) -> NodeEdit {
        std::mem::take(&mut self.edit)
    }
}

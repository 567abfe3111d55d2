//! Undo scope discovery across owning objects

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::history::HistoryManager;

/// Capability interface for objects that can participate in an undo scope
///
/// Containers that own a [`ContextStack`] implement [`own_context`]; leaf
/// objects that delegate to an owning parent implement [`parent_context`].
/// Both default to `None`, so absence of either capability reads as "no
/// context found" rather than an error.
///
/// [`own_context`]: UndoScope::own_context
/// [`parent_context`]: UndoScope::parent_context
pub trait UndoScope {
    /// The innermost context pushed directly on this object, if any
    fn own_context(&self) -> Option<Rc<HistoryManager>> {
        None
    }

    /// The innermost context of the owning parent, if any
    ///
    /// Implementors holding a `Weak` parent reference should treat a failed
    /// upgrade as `None`.
    fn parent_context(&self) -> Option<Rc<HistoryManager>> {
        None
    }
}

/// Find the active undo context reachable from `obj`
///
/// The object's own innermost context wins over the parent's; with neither
/// present the result is `None`. This lookup never fails.
pub fn active_context<T: UndoScope + ?Sized>(obj: &T) -> Option<Rc<HistoryManager>> {
    obj.own_context().or_else(|| obj.parent_context())
}

/// Ordered collection of nested undo contexts, innermost last
///
/// Containers embed one and push a context per editing scope; only the
/// most recently pushed context is active. Interior mutability lets the
/// stack be manipulated through a shared borrow of the owner.
#[derive(Default)]
pub struct ContextStack {
    contexts: RefCell<Vec<Rc<HistoryManager>>>,
}

impl ContextStack {
    /// Create a new, empty context stack
    pub fn new() -> Self {
        ContextStack {
            contexts: RefCell::new(Vec::new()),
        }
    }

    /// Push a context, making it the active one
    pub fn push(&self, context: Rc<HistoryManager>) {
        let mut contexts = self.contexts.borrow_mut();
        contexts.push(context);
        trace!(depth = contexts.len(), "entered undo scope");
    }

    /// Pop the innermost context, if any
    ///
    /// Popping does not drain the context; the caller decides whether to
    /// call [`HistoryManager::reset`] on it.
    pub fn pop(&self) -> Option<Rc<HistoryManager>> {
        let context = self.contexts.borrow_mut().pop();
        if context.is_some() {
            trace!(depth = self.contexts.borrow().len(), "left undo scope");
        }
        context
    }

    /// The innermost (most recently pushed) context, if any
    pub fn active(&self) -> Option<Rc<HistoryManager>> {
        self.contexts.borrow().last().cloned()
    }

    /// Number of nested contexts
    pub fn len(&self) -> usize {
        self.contexts.borrow().len()
    }

    /// Check whether no context is active
    pub fn is_empty(&self) -> bool {
        self.contexts.borrow().is_empty()
    }
}

impl fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextStack")
            .field("depth", &self.len())
            .finish()
    }
}

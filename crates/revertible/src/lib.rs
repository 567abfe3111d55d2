#![warn(missing_docs)]

//! Scoped undo contexts for reversible attribute mutation
//!
//! Attribute setters register an inverse operation on the active undo
//! context before applying a change; draining the context rolls every
//! change back in reverse order. Three pieces cooperate:
//!
//! - [`HistoryManager`] — a stack of deferred inverse operations, drained
//!   LIFO by [`reset`](HistoryManager::reset).
//! - [`UndoScope`] / [`active_context`] — discovery of the innermost
//!   context reachable from an object, either its own or its owning
//!   parent's. Absence is `None`, never an error.
//! - [`UndoableAttr`] — a `{name, getter, setter}` descriptor whose
//!   [`assign`](UndoableAttr::assign) makes every attribute change
//!   undoable while a context is active, skipping no-op assignments
//!   entirely.
//!
//! The crate is single-threaded by design: contexts are shared through
//! `Rc` and targets through `Rc<RefCell<_>>`, so none of the types are
//! `Send` or `Sync`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use revertible::{ContextStack, HistoryManager, UndoScope, UndoableAttr};
//!
//! struct Session {
//!     volume: u32,
//!     contexts: ContextStack,
//! }
//!
//! impl UndoScope for Session {
//!     fn own_context(&self) -> Option<Rc<HistoryManager>> {
//!         self.contexts.active()
//!     }
//! }
//!
//! const VOLUME: UndoableAttr<Session, u32> =
//!     UndoableAttr::new("volume", |s: &Session| s.volume, |s: &mut Session, v| s.volume = v);
//!
//! let session = Rc::new(RefCell::new(Session {
//!     volume: 3,
//!     contexts: ContextStack::new(),
//! }));
//!
//! let ctx = Rc::new(HistoryManager::new());
//! session.borrow().contexts.push(Rc::clone(&ctx));
//!
//! VOLUME.assign(&session, 11);
//! assert_eq!(session.borrow().volume, 11);
//!
//! ctx.reset().unwrap();
//! assert_eq!(session.borrow().volume, 3);
//! ```

pub mod attr;
pub mod error;
pub mod history;
pub mod scope;

// Re-export public API
pub use attr::{RestoreAttr, UndoableAttr};
pub use error::HistoryError;
pub use history::{HistoryManager, UndoOp};
pub use scope::{active_context, ContextStack, UndoScope};

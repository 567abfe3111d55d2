//! Undo context recording and LIFO rollback

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace};

use crate::error::HistoryError;

/// A deferred inverse operation held by a [`HistoryManager`]
///
/// Implementors capture everything needed to reverse one prior mutation.
/// The operation is consumed when invoked.
pub trait UndoOp {
    /// Apply the inverse mutation
    fn invoke(self: Box<Self>) -> Result<(), HistoryError>;

    /// Short label for logs and inspection
    fn label(&self) -> &str {
        "deferred operation"
    }
}

/// Adapter so plain closures can be recorded without a command type
struct FnOp<F>(F);

impl<F> UndoOp for FnOp<F>
where
    F: FnOnce() -> Result<(), HistoryError>,
{
    fn invoke(self: Box<Self>) -> Result<(), HistoryError> {
        (self.0)()
    }
}

/// An ordered stack of deferred inverse operations, drained LIFO
///
/// Interior mutability lets a shared `Rc<HistoryManager>` handle record
/// further operations while `reset` is draining. Single-threaded by
/// construction; the type is neither `Send` nor `Sync`.
pub struct HistoryManager {
    ops: RefCell<Vec<Box<dyn UndoOp>>>,
}

impl HistoryManager {
    /// Create a new, empty undo context
    pub fn new() -> Self {
        HistoryManager {
            ops: RefCell::new(Vec::new()),
        }
    }

    /// Record a deferred operation
    ///
    /// Operations are appended in call order and undone in reverse. The
    /// operation's behavior is not validated; that is the caller's
    /// responsibility.
    pub fn record(&self, op: impl UndoOp + 'static) {
        let mut ops = self.ops.borrow_mut();
        trace!(op = op.label(), depth = ops.len() + 1, "recorded undo operation");
        ops.push(Box::new(op));
    }

    /// Record a closure as a deferred operation
    pub fn record_fn(&self, f: impl FnOnce() -> Result<(), HistoryError> + 'static) {
        self.record(FnOp(f));
    }

    /// Execute all recorded operations in reverse registration order
    ///
    /// Draining re-checks emptiness each iteration, so operations recorded
    /// during the drain are also executed before this returns. Calling
    /// `reset` on an empty context is a no-op.
    ///
    /// # Errors
    ///
    /// The first operation failure is returned immediately, aborting the
    /// remaining drain. The failed operation is consumed; operations
    /// recorded before it stay on the stack, and a later `reset` resumes
    /// from there.
    pub fn reset(&self) -> Result<(), HistoryError> {
        let mut undone = 0usize;
        loop {
            // The borrow must not be held across the invoke: the operation
            // may re-enter `record` on this same manager.
            let op = self.ops.borrow_mut().pop();
            let Some(op) = op else { break };
            op.invoke()?;
            undone += 1;
        }
        debug!(undone, "undo context reset");
        Ok(())
    }

    /// Number of operations currently recorded
    pub fn len(&self) -> usize {
        self.ops.borrow().len()
    }

    /// Check whether no operations are recorded
    pub fn is_empty(&self) -> bool {
        self.ops.borrow().is_empty()
    }

    /// Labels of all recorded operations, in registration order
    pub fn labels(&self) -> Vec<String> {
        self.ops.borrow().iter().map(|op| op.label().to_owned()).collect()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("ops", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_history_manager_resets_in_reverse_order() {
        let manager = HistoryManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..4 {
            let log = Rc::clone(&log);
            manager.record_fn(move || {
                log.borrow_mut().push(i);
                Ok(())
            });
        }
        assert_eq!(manager.len(), 4);

        manager.reset().unwrap();
        assert_eq!(*log.borrow(), vec![3, 2, 1, 0]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_history_manager_reset_empty_is_noop() {
        let manager = HistoryManager::new();
        assert!(manager.reset().is_ok());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_history_manager_reset_drains_reentrant_records() {
        let manager = Rc::new(HistoryManager::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = Rc::clone(&manager);
        let outer_log = Rc::clone(&log);
        manager.record_fn(move || {
            outer_log.borrow_mut().push("outer");
            let inner_log = Rc::clone(&outer_log);
            handle.record_fn(move || {
                inner_log.borrow_mut().push("follow-up");
                Ok(())
            });
            Ok(())
        });

        manager.reset().unwrap();
        assert_eq!(*log.borrow(), vec!["outer", "follow-up"]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_history_manager_failure_aborts_remaining_drain() {
        let manager = HistoryManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        {
            let log = Rc::clone(&log);
            manager.record_fn(move || {
                log.borrow_mut().push("first");
                Ok(())
            });
        }
        manager.record_fn(|| Err(HistoryError::operation_failed("boom")));

        let result = manager.reset();
        assert!(matches!(result, Err(HistoryError::OperationFailed(_))));
        // The failing operation was consumed; the earlier one is untouched.
        assert!(log.borrow().is_empty());
        assert_eq!(manager.len(), 1);

        // A retry resumes the drain.
        manager.reset().unwrap();
        assert_eq!(*log.borrow(), vec!["first"]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_history_manager_labels_report_registration_order() {
        struct Named(&'static str);
        impl UndoOp for Named {
            fn invoke(self: Box<Self>) -> Result<(), HistoryError> {
                Ok(())
            }
            fn label(&self) -> &str {
                self.0
            }
        }

        let manager = HistoryManager::new();
        manager.record(Named("alpha"));
        manager.record(Named("beta"));
        manager.record_fn(|| Ok(()));

        assert_eq!(
            manager.labels(),
            vec!["alpha", "beta", "deferred operation"]
        );
    }
}

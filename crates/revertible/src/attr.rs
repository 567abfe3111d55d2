//! Undoable attribute assignment

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::HistoryError;
use crate::history::UndoOp;
use crate::scope::{active_context, UndoScope};

/// Descriptor binding an attribute name to its getter and raw setter
///
/// Declared once per attribute, typically as a `const` item next to the
/// type, and used in place of the raw setter wherever assignments should
/// be undoable:
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use revertible::{ContextStack, HistoryManager, UndoScope, UndoableAttr};
///
/// struct Mixer {
///     gain: i32,
///     contexts: ContextStack,
/// }
///
/// impl UndoScope for Mixer {
///     fn own_context(&self) -> Option<Rc<HistoryManager>> {
///         self.contexts.active()
///     }
/// }
///
/// const GAIN: UndoableAttr<Mixer, i32> =
///     UndoableAttr::new("gain", |m: &Mixer| m.gain, |m: &mut Mixer, v| m.gain = v);
///
/// let mixer = Rc::new(RefCell::new(Mixer { gain: 0, contexts: ContextStack::new() }));
/// let ctx = Rc::new(HistoryManager::new());
/// mixer.borrow().contexts.push(Rc::clone(&ctx));
///
/// GAIN.assign(&mixer, 6);
/// assert_eq!(mixer.borrow().gain, 6);
///
/// ctx.reset().unwrap();
/// assert_eq!(mixer.borrow().gain, 0);
/// ```
pub struct UndoableAttr<O, V> {
    name: &'static str,
    get: fn(&O) -> V,
    set: fn(&mut O, V),
}

impl<O, V> UndoableAttr<O, V>
where
    O: UndoScope + 'static,
    V: PartialEq + 'static,
{
    /// Create a descriptor from an attribute name and its accessor pair
    pub const fn new(name: &'static str, get: fn(&O) -> V, set: fn(&mut O, V)) -> Self {
        UndoableAttr { name, get, set }
    }

    /// The attribute identifier this descriptor covers
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Assign `new_value`, registering a restore first when a context is active
    ///
    /// With an active context, assigning a value equal to the current one
    /// is a complete no-op: nothing is recorded and the raw setter is not
    /// called, so side effects of the setter are skipped as well. Otherwise
    /// a [`RestoreAttr`] command holding the prior value is recorded before
    /// the raw setter runs. Without a context the setter always runs and
    /// nothing is recorded.
    pub fn assign(&self, target: &Rc<RefCell<O>>, new_value: V) {
        let context = active_context(&*target.borrow());
        if let Some(context) = context {
            let old_value = (self.get)(&target.borrow());
            if old_value == new_value {
                trace!(attr = self.name, "skipped assignment of unchanged value");
                return;
            }
            context.record(RestoreAttr {
                name: self.name,
                target: Rc::downgrade(target),
                set: self.set,
                value: old_value,
            });
        }
        (self.set)(&mut target.borrow_mut(), new_value);
    }
}

/// Command restoring an attribute's prior value through its raw setter
///
/// Holds the target reference, the value to restore, and the setter, so
/// the contents of an undo context stay inspectable. Restoring goes
/// through the same setter logic as a forward assignment, side effects
/// included.
pub struct RestoreAttr<O, V> {
    name: &'static str,
    target: Weak<RefCell<O>>,
    set: fn(&mut O, V),
    value: V,
}

impl<O, V> RestoreAttr<O, V> {
    /// The value this command would restore
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<O: 'static, V: 'static> UndoOp for RestoreAttr<O, V> {
    fn invoke(self: Box<Self>) -> Result<(), HistoryError> {
        let target = self
            .target
            .upgrade()
            .ok_or_else(|| HistoryError::target_dropped(self.name))?;
        (self.set)(&mut target.borrow_mut(), self.value);
        Ok(())
    }

    fn label(&self) -> &str {
        self.name
    }
}

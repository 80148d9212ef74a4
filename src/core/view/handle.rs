//=========================================================================
// View Handle
//=========================================================================
//
// Shared, identity-comparable reference to a registered view.
//
// The host keeps its own typed `Rc<RefCell<V>>`; the navigator stores the
// type-erased handle. Identity is pointer identity, never key equality.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{View, ViewKey, ViewKind};

//=== View Handle =========================================================

/// Reference-counted handle to a view object.
pub struct ViewHandle<K: ViewKind> {
    inner: Rc<RefCell<dyn View<K>>>,
}

impl<K: ViewKind> ViewHandle<K> {
    /// Wraps a view the caller does not need typed access to.
    pub fn new<V: View<K> + 'static>(view: V) -> Self {
        Self {
            inner: Rc::new(RefCell::new(view)),
        }
    }

    /// Wraps a view the caller keeps a typed handle to.
    pub fn from_shared<V: View<K> + 'static>(view: &Rc<RefCell<V>>) -> Self {
        let inner: Rc<RefCell<dyn View<K>>> = view.clone();
        Self { inner }
    }

    /// Registry key of the view.
    pub fn key(&self) -> ViewKey<K> {
        self.inner.borrow().key()
    }

    /// True while the underlying object has not been destroyed.
    ///
    /// A handle that is mutably borrowed elsewhere is reported alive.
    pub fn is_alive(&self) -> bool {
        self.inner.try_borrow().map(|v| v.is_alive()).unwrap_or(true)
    }

    /// True only when the view is fully shown.
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().is_visible()
    }

    /// Same view object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn borrow(&self) -> Ref<'_, dyn View<K>> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn View<K>> {
        self.inner.borrow_mut()
    }
}

impl<K: ViewKind> Clone for ViewHandle<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: ViewKind> fmt::Debug for ViewHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(view) => f
                .debug_struct("ViewHandle")
                .field("key", &view.key())
                .field("visible", &view.is_visible())
                .field("alive", &view.is_alive())
                .finish(),
            Err(_) => f.write_str("ViewHandle(<borrowed>)"),
        }
    }
}

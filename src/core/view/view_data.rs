//=========================================================================
// View Data
//=========================================================================
//
// Opaque payload handed to a view when it is shown.
//
// One payload per show call. The carrier is reference counted so views can
// cache the last payload and instant-show paths can reuse it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;
use std::rc::Rc;

//=== View Data ===========================================================

/// Type-erased show payload with a typed getter.
#[derive(Clone)]
pub struct ViewData {
    value: Rc<dyn Any>,
}

impl ViewData {
    /// Wraps any value as a payload.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Rc::new(value),
        }
    }

    /// Returns the payload as `T`, or `None` if it holds another type.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns true if the payload holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl fmt::Debug for ViewData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewData").finish_non_exhaustive()
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Navigation Errors
//=========================================================================
//
// Failure taxonomy of the registry and navigator.
//
// None of these are fatal: the navigator logs them and carries on.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::view::{InstanceId, ViewKey, ViewKind};

//=== NavigationError =====================================================

/// Registry and navigation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError<K: ViewKind> {
    /// No view is registered under the requested key.
    NotRegistered(ViewKey<K>),

    /// A multi-instance kind was resolved without an instance id.
    MissingInstanceId(K),

    /// Another view already holds this key; the first registration wins.
    DuplicateRegistration(ViewKey<K>),

    /// The view's instance id capability disagrees with its kind.
    InstanceMismatch(ViewKey<K>),
}

//--- Trait Implementations -----------------------------------------------

impl<K: ViewKind> std::fmt::Display for NavigationError<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered(key) => {
                write!(f, "View {:?} is not registered (instance: {})", key.kind, instance_label(key.instance))
            }
            Self::MissingInstanceId(kind) => {
                write!(f, "View {:?} allows multiple instances but no instance id was supplied", kind)
            }
            Self::DuplicateRegistration(key) => {
                write!(f, "View {:?} is already registered (instance: {})", key.kind, instance_label(key.instance))
            }
            Self::InstanceMismatch(key) => write!(
                f,
                "View {:?} reports instance {} which does not match its kind's multiplicity",
                key.kind,
                instance_label(key.instance)
            ),
        }
    }
}

impl<K: ViewKind> std::error::Error for NavigationError<K> {}

fn instance_label(instance: Option<InstanceId>) -> String {
    instance.map_or_else(|| "none".to_string(), |id| id.to_string())
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_navigation::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Navigator
pub use crate::builder::NavigatorBuilder;
pub use crate::core::navigation::{
    GateOpen, NavigationContext, Navigator, ShowRequest, StallPolicy, VisibilityChanged,
};

// Layers
pub use crate::core::layers::Layer;

// View contract
pub use crate::core::view::{
    Callback, InstanceId, InstantPresenter, KindOf, Phase, PresentedView, Presenter, Progress, TimedPresenter,
    View, ViewData, ViewHandle, ViewKey, ViewKind, VisibilityMode,
};

// Errors
pub use crate::core::error::NavigationError;

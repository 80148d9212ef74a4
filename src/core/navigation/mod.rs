//=========================================================================
// Navigation
//=========================================================================
//
// Navigator, its requests, and the context handle views talk back through.
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod gate;
mod navigator;
mod request;
mod request_queue;
mod signal;

//=== Public API ==========================================================

pub use context::NavigationContext;
pub use gate::{Gate, GateOpen};
pub use navigator::{Navigator, StallPolicy, VisibilityChanged};
pub use request::ShowRequest;

pub(crate) use navigator::{NavigatorConfig, DEFAULT_MAX_SIGNALS_PER_UPDATE};

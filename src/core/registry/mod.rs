//=========================================================================
// Registry
//=========================================================================
//
// Key-based lookup of every view the navigator knows about.
//
// Side effects are confined to the registry maps; no layer or transition
// state is touched here.
//
//=========================================================================

//=== Module Declarations =================================================

mod view_registry;

//=== Public API ==========================================================

pub use view_registry::ViewRegistry;

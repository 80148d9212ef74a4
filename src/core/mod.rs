//=========================================================================
// Core
//
// Navigation subsystems, in dependency order:
//
//   view → registry → layers → navigation
//
// Notes:
// Everything runs on the host's frame thread. Views are shared through
// `Rc<RefCell<_>>` handles and report back to the navigator over a
// crossbeam channel drained once per update.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod error;
pub mod layers;
pub mod navigation;
pub mod registry;
pub mod view;

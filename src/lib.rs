//=========================================================================
// Aetheric Navigation Library Root
//
// Layered view navigation for game UIs.
//
// Responsibilities:
// - Track registered views across ordered layers (main, popups, overlays)
// - Run show/hide transitions, animated or instant, one at a time
// - Hand views a context to report visibility and request navigation
//
// Typical usage:
// ```no_run
// use aetheric_navigation::prelude::*;
//
// let mut navigator = NavigatorBuilder::new().with_start_view(Screen::Menu).build();
// navigator.register_view(menu_handle)?;
// navigator.start();
//
// loop {
//     navigator.update(frame_time);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the view contract, registry, layer table and navigator.
// `prelude` re-exports what applications normally need.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod builder;

//--- Public Exports ------------------------------------------------------

pub use builder::NavigatorBuilder;
pub use core::navigation::Navigator;

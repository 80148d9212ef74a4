//=========================================================================
// View Contract
//=========================================================================
//
// Lifecycle contract every navigable view implements.
//
// Phases:
//   Hidden ──show()──> Showing ──(animation done)──> Visible
//   Visible ──hide()──> Hiding ──(animation done)──> Hidden
//   any ──show_instant()──> Visible
//   any ──hide_instant()──> Hidden
//
// The navigator never constructs or destroys views. It only tracks them
// through `ViewHandle`s and drives them through this trait.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::navigation::NavigationContext;

//=== Module Declarations =================================================

mod handle;
mod presented;
mod presenters;
mod view_data;

//=== Public API ==========================================================

pub use handle::ViewHandle;
pub use presented::{PresentedView, Presenter, Progress};
pub use presenters::{InstantPresenter, TimedPresenter};
pub use view_data::ViewData;

/// One-shot completion callback handed to views.
pub type Callback = Box<dyn FnOnce()>;

/// Identifier distinguishing instances of a multi-instance view kind.
pub type InstanceId = u32;

//=== View Kind Trait =====================================================

/// Marker trait for view identifiers.
///
/// Typically implemented by a game-specific enum. A kind whose views can
/// exist several times at once overrides [`ViewKind::is_multi_instance`];
/// its views must then report an [`InstanceId`].
///
/// ```rust
/// # use aetheric_navigation::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { MainMenu, Settings, Inventory }
///
/// impl ViewKind for Screen {
///     fn is_multi_instance(&self) -> bool {
///         matches!(self, Screen::Inventory)
///     }
/// }
/// ```
pub trait ViewKind: Clone + Copy + Eq + Hash + Debug + 'static {
    /// Whether views of this kind are disambiguated by an instance id.
    fn is_multi_instance(&self) -> bool {
        false
    }
}

/// Associates a concrete view type with its kind tag.
///
/// Lets callers write `navigator.show_view_of::<SettingsView>()` instead of
/// naming the kind explicitly.
pub trait KindOf<K: ViewKind> {
    /// Kind tag of every view of this type.
    const KIND: K;
}

//=== View Key ============================================================

/// Registry key of a view: its kind plus an instance id for multi-instance kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey<K: ViewKind> {
    pub kind: K,
    pub instance: Option<InstanceId>,
}

impl<K: ViewKind> ViewKey<K> {
    /// Key of a single-instance view.
    pub fn single(kind: K) -> Self {
        Self { kind, instance: None }
    }

    /// Key of one instance of a multi-instance view.
    pub fn instance(kind: K, instance: InstanceId) -> Self {
        Self {
            kind,
            instance: Some(instance),
        }
    }
}

//=== Visibility Mode =====================================================

/// How a show or hide step is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityMode {
    /// Runs the view's own animation and waits for its completion.
    #[default]
    Regular,

    /// Switches state synchronously.
    Instant,
}

//=== Phase ===============================================================

/// Visibility phase of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

//=== View Trait ==========================================================

/// Lifecycle contract consumed by the navigator.
///
/// Implementations must emit a visibility notification through the
/// attached [`NavigationContext`] whenever they settle into `Visible` or
/// `Hidden`. [`PresentedView`] implements all of the bookkeeping and only
/// asks for a [`Presenter`].
pub trait View<K: ViewKind> {
    /// Kind tag of this view.
    fn kind(&self) -> K;

    /// Instance id for multi-instance views, `None` for single-instance ones.
    fn instance_id(&self) -> Option<InstanceId> {
        None
    }

    /// Registry key derived from kind and instance id.
    fn key(&self) -> ViewKey<K> {
        ViewKey {
            kind: self.kind(),
            instance: self.instance_id(),
        }
    }

    /// Called once by the navigator when the view is registered.
    ///
    /// `in_hierarchy` is true when the view was registered before the
    /// navigator started, i.e. it belongs to the navigation root.
    fn attach(&mut self, _context: NavigationContext<K>, _in_hierarchy: bool) {}

    /// Starts the animated show.
    ///
    /// `on_complete` fires once the view is fully visible. `on_hide` fires
    /// once, the next time an animated hide completes.
    fn show(&mut self, on_complete: Option<Callback>, on_hide: Option<Callback>, data: Option<ViewData>);

    /// Starts the animated hide. `on_complete` fires once fully hidden.
    fn hide(&mut self, on_complete: Option<Callback>);

    /// Becomes visible synchronously.
    fn show_instant(&mut self, data: Option<ViewData>);

    /// Becomes hidden synchronously.
    fn hide_instant(&mut self);

    /// True only once fully shown, never while an animation is running.
    fn is_visible(&self) -> bool;

    /// False once the underlying object has been destroyed.
    fn is_alive(&self) -> bool {
        true
    }

    /// Whether the view was registered as part of the navigation root.
    fn is_in_hierarchy(&self) -> bool {
        true
    }

    /// Per-frame tick; drives show/hide animations.
    fn update(&mut self, _dt: Duration) {}
}

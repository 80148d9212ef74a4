//=========================================================================
// Presented View
//=========================================================================
//
// Reusable implementation of the view contract.
//
// Architecture:
//   PresentedView (bookkeeping)
//     ├─ phase, stored callbacks, payload + cached payload
//     ├─ NavigationContext (notifications)
//     └─ Presenter (visual collaborator: fades, animators, tweens)
//
// Completion ordering on a finished animated hide:
//   on_complete → stored on_hide → Presenter::on_hidden → visibility(false)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Callback, InstanceId, Phase, View, ViewData, ViewKind};
use crate::core::navigation::NavigationContext;

//=== Progress ============================================================

/// Outcome of starting or advancing a presenter animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Done,
}

//=== Presenter Trait =====================================================

/// Visual collaborator of a [`PresentedView`].
///
/// Only the animation mechanics live here. Hooks default to no-ops.
pub trait Presenter {
    /// Starts the show animation.
    fn begin_show(&mut self) -> Progress;

    /// Starts the hide animation.
    fn begin_hide(&mut self) -> Progress;

    /// Advances the running animation by `dt`.
    fn advance(&mut self, dt: Duration) -> Progress;

    /// Jumps straight to the fully shown state.
    fn show_instant(&mut self);

    /// Jumps straight to the fully hidden state.
    fn hide_instant(&mut self);

    fn on_show_start(&mut self) {}

    fn on_shown(&mut self) {}

    fn on_hide_start(&mut self) {}

    fn on_hidden(&mut self) {}
}

//=== Presented View ======================================================

/// View contract bookkeeping around a [`Presenter`].
///
/// Instant operations cancel any running animation; the completion
/// callback of the cancelled animation is dropped.
pub struct PresentedView<K: ViewKind, P: Presenter> {
    kind: K,
    instance: Option<InstanceId>,
    presenter: P,
    phase: Phase,
    pending: Option<Callback>,
    on_hide: Option<Callback>,
    data: Option<ViewData>,
    cached_data: Option<ViewData>,
    context: Option<NavigationContext<K>>,
    in_hierarchy: bool,
    alive: bool,
}

impl<K: ViewKind, P: Presenter> PresentedView<K, P> {
    //--- Construction -----------------------------------------------------

    /// Creates a single-instance view, initially hidden.
    pub fn new(kind: K, presenter: P) -> Self {
        Self {
            kind,
            instance: None,
            presenter,
            phase: Phase::Hidden,
            pending: None,
            on_hide: None,
            data: None,
            cached_data: None,
            context: None,
            in_hierarchy: false,
            alive: true,
        }
    }

    /// Creates one instance of a multi-instance view, initially hidden.
    pub fn with_instance(kind: K, instance: InstanceId, presenter: P) -> Self {
        Self {
            instance: Some(instance),
            ..Self::new(kind, presenter)
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Context handed over at registration, if registered.
    pub fn context(&self) -> Option<&NavigationContext<K>> {
        self.context.as_ref()
    }

    /// Payload of the current show as `T`.
    ///
    /// When the current show carried no payload and `use_cached` is set,
    /// falls back to the last payload this view received.
    pub fn view_data<T: Any>(&self, use_cached: bool) -> Option<&T> {
        if let Some(data) = &self.data {
            return data.get::<T>();
        }

        if use_cached {
            return self.cached_data.as_ref().and_then(|d| d.get::<T>());
        }

        None
    }

    //--- Destruction ------------------------------------------------------

    /// Marks the view as destroyed and reports it to the navigator.
    ///
    /// Stored callbacks are dropped. The navigator unregisters the view on
    /// its next update and treats it as absent from any layer slot.
    pub fn destroy(&mut self) {
        if !self.alive {
            return;
        }

        debug!("View {:?} destroyed", self.key());
        self.alive = false;
        self.pending = None;
        self.on_hide = None;

        if let Some(context) = &self.context {
            context.notify_destroyed(self.key());
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn store_data(&mut self, data: Option<ViewData>) {
        if let Some(data) = &data {
            self.cached_data = Some(data.clone());
        }
        self.data = data;
    }

    fn settle_shown(&mut self) {
        self.phase = Phase::Visible;
        if let Some(on_complete) = self.pending.take() {
            on_complete();
        }
        self.presenter.on_shown();
        self.notify(true);
    }

    fn settle_hidden(&mut self) {
        self.phase = Phase::Hidden;
        if let Some(on_complete) = self.pending.take() {
            on_complete();
        }
        if let Some(on_hide) = self.on_hide.take() {
            on_hide();
        }
        self.presenter.on_hidden();
        self.notify(false);
    }

    fn cancel_animation(&mut self) {
        if self.pending.take().is_some() {
            trace!("View {:?} dropped an animation completion", self.key());
        }
    }

    fn notify(&self, visible: bool) {
        if let Some(context) = &self.context {
            context.notify_visibility(self.key(), visible);
        }
    }
}

//=== View Implementation =================================================

impl<K: ViewKind, P: Presenter> View<K> for PresentedView<K, P> {
    fn kind(&self) -> K {
        self.kind
    }

    fn instance_id(&self) -> Option<InstanceId> {
        self.instance
    }

    fn attach(&mut self, context: NavigationContext<K>, in_hierarchy: bool) {
        self.context = Some(context);
        self.in_hierarchy = in_hierarchy;
    }

    fn show(&mut self, on_complete: Option<Callback>, on_hide: Option<Callback>, data: Option<ViewData>) {
        self.store_data(data);
        self.presenter.on_show_start();
        self.on_hide = on_hide;
        self.pending = on_complete;
        self.phase = Phase::Showing;

        if self.presenter.begin_show() == Progress::Done {
            self.settle_shown();
        }
    }

    fn hide(&mut self, on_complete: Option<Callback>) {
        self.presenter.on_hide_start();
        self.pending = on_complete;

        // Nothing to animate; complete right away so callers never wait forever.
        if self.phase == Phase::Hidden {
            self.settle_hidden();
            return;
        }

        self.phase = Phase::Hiding;
        if self.presenter.begin_hide() == Progress::Done {
            self.settle_hidden();
        }
    }

    fn show_instant(&mut self, data: Option<ViewData>) {
        self.cancel_animation();
        self.store_data(data);
        self.presenter.on_show_start();
        self.presenter.show_instant();
        self.phase = Phase::Visible;
        self.presenter.on_shown();
        self.notify(true);
    }

    fn hide_instant(&mut self) {
        self.cancel_animation();
        self.presenter.on_hide_start();
        self.presenter.hide_instant();
        self.phase = Phase::Hidden;
        self.presenter.on_hidden();
        self.notify(false);
    }

    fn is_visible(&self) -> bool {
        self.phase == Phase::Visible
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_in_hierarchy(&self) -> bool {
        self.in_hierarchy
    }

    fn update(&mut self, dt: Duration) {
        if !self.alive {
            return;
        }

        match self.phase {
            Phase::Showing => {
                if self.presenter.advance(dt) == Progress::Done {
                    self.settle_shown();
                }
            }
            Phase::Hiding => {
                if self.presenter.advance(dt) == Progress::Done {
                    self.settle_hidden();
                }
            }
            Phase::Hidden | Phase::Visible => {}
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

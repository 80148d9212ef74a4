//=========================================================================
// Navigator
//=========================================================================
//
// Registry + layer table + transition state machine + transition gate.
//
// Transition flow (one at a time, gated):
//   show_view() → resolve target → RequestQueue
//                                      ↓ (gate open)
//   begin: close gate → cascade-hide layers above → hide occupant
//                                      ↓ (hide done, or instant)
//   occupy slot → watch target → show target
//                                      ↓ (show done, or instant)
//   reopen gate → on_new_shown → next queued request
//
// View completions never call back into the navigator directly. They
// send signals that `pump()` drains on the next `update()` (or right
// away when a request is issued).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use log::{debug, error, trace, warn};

//=== Internal Dependencies ===============================================

use super::context::NavigationContext;
use super::gate::{Gate, GateOpen};
use super::request_queue::{PendingRequest, RequestQueue};
use super::signal::{
    signal_channel, Envelope, NavigationCommand, Signal, SignalCollector, SignalSender, Step, TransitionId,
};
use super::ShowRequest;
use crate::core::error::NavigationError;
use crate::core::layers::{Layer, LayerTable};
use crate::core::registry::ViewRegistry;
use crate::core::view::{Callback, InstanceId, KindOf, ViewData, ViewHandle, ViewKey, ViewKind, VisibilityMode};

//=== Configuration =======================================================

pub(crate) const DEFAULT_MAX_SIGNALS_PER_UPDATE: usize = 100;

/// What to do when a layer above the target holds a view that is alive
/// but not fully visible (still animating in or out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StallPolicy {
    /// Abort the transition and keep the gate closed.
    ///
    /// The navigator reports [`Navigator::is_stalled`] until
    /// [`Navigator::recover_from_stall`] is called.
    #[default]
    Stall,

    /// Hide the animating view instantly and carry on.
    ForceInstant,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NavigatorConfig<K: ViewKind> {
    pub(crate) start_view: Option<K>,
    pub(crate) stall_policy: StallPolicy,
    pub(crate) max_signals_per_update: usize,
}

impl<K: ViewKind> Default for NavigatorConfig<K> {
    fn default() -> Self {
        Self {
            start_view: None,
            stall_policy: StallPolicy::default(),
            max_signals_per_update: DEFAULT_MAX_SIGNALS_PER_UPDATE,
        }
    }
}

//=== Visibility Events ===================================================

/// Visibility notification re-published to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChanged<K: ViewKind> {
    pub key: ViewKey<K>,
    pub visible: bool,
}

//=== Transition State ====================================================

/// Action waiting for the gate to open.
type DeferredAction<K> = Box<dyn FnOnce(&mut Navigator<K>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    HidingOutgoing,
    ShowingTarget,
}

struct ActiveTransition<K: ViewKind> {
    id: TransitionId,
    layer: Layer,
    target: ViewHandle<K>,
    outgoing: Option<ViewHandle<K>>,
    show_mode: VisibilityMode,
    data: Option<ViewData>,
    on_active_hidden: Option<Callback>,
    on_new_shown: Option<Callback>,
    stage: Stage,
}

/// Occupant watched for hides the navigator did not initiate.
struct Watch<K: ViewKind> {
    view: ViewHandle<K>,
    since: u64,
}

//=== Navigator ===========================================================

/// Layered view navigation manager.
///
/// Owns the registry and the layer table, and runs at most one show
/// transition at a time. Drive it from the frame loop with
/// [`Navigator::update`].
///
/// ```rust
/// # use aetheric_navigation::prelude::*;
/// # use std::time::Duration;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Menu, Settings }
/// impl ViewKind for Screen {}
///
/// let mut navigator = NavigatorBuilder::new().with_start_view(Screen::Menu).build();
/// navigator.register_view(ViewHandle::new(PresentedView::new(Screen::Menu, InstantPresenter::new()))).unwrap();
/// navigator.register_view(ViewHandle::new(PresentedView::new(Screen::Settings, InstantPresenter::new()))).unwrap();
/// navigator.start();
///
/// navigator.show(Screen::Settings).unwrap();
/// navigator.update(Duration::from_millis(16));
/// assert_eq!(navigator.occupant(Layer::Main).map(|v| v.key().kind), Some(Screen::Settings));
/// ```
pub struct Navigator<K: ViewKind> {
    registry: ViewRegistry<K>,
    layers: LayerTable<K>,
    queue: RequestQueue<K>,
    active: Option<ActiveTransition<K>>,
    gate: Gate,
    signals: SignalSender<K>,
    collector: SignalCollector<K>,
    watched: HashMap<ViewKey<K>, Watch<K>>,
    previous: HashMap<Layer, ViewHandle<K>>,
    deferred: VecDeque<DeferredAction<K>>,
    visibility_events: Vec<VisibilityChanged<K>>,
    config: NavigatorConfig<K>,
    next_transition: u64,
    started: bool,
    stalled: bool,
    pumping: bool,
}

impl<K: ViewKind> Navigator<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a navigator with default settings and no start view.
    pub fn new() -> Self {
        Self::with_config(NavigatorConfig::default())
    }

    pub(crate) fn with_config(config: NavigatorConfig<K>) -> Self {
        let (signals, collector) = signal_channel(config.max_signals_per_update);

        Self {
            registry: ViewRegistry::new(),
            layers: LayerTable::new(),
            queue: RequestQueue::new(),
            active: None,
            gate: Gate::new(),
            signals,
            collector,
            watched: HashMap::new(),
            previous: HashMap::new(),
            deferred: VecDeque::new(),
            visibility_events: Vec::new(),
            config,
            next_transition: 0,
            started: false,
            stalled: false,
            pumping: false,
        }
    }

    /// New context handle linked to this navigator.
    pub fn context(&self) -> NavigationContext<K> {
        NavigationContext::new(self.signals.clone(), self.gate.clone())
    }

    //--- Registration -----------------------------------------------------

    /// Registers a view and hands it a [`NavigationContext`].
    ///
    /// Views registered before [`Navigator::start`] are part of the
    /// navigation root; later ones are flagged as not in hierarchy.
    pub fn register_view(&mut self, view: ViewHandle<K>) -> Result<ViewKey<K>, NavigationError<K>> {
        let key = self.registry.register(view.clone()).map_err(|err| {
            error!("Failed to register view: {}", err);
            err
        })?;

        view.borrow_mut().attach(self.context(), !self.started);
        Ok(key)
    }

    /// Removes this exact view object from the registry.
    pub fn unregister_view(&mut self, view: &ViewHandle<K>) -> Result<ViewKey<K>, NavigationError<K>> {
        let key = self.registry.unregister(view).map_err(|err| {
            error!("Failed to unregister view: {}", err);
            err
        })?;

        self.unwatch(view);
        Ok(key)
    }

    /// Looks up a registered view.
    pub fn get_view(&self, kind: K, instance: Option<InstanceId>) -> Option<ViewHandle<K>> {
        match self.registry.resolve(kind, instance) {
            Ok(view) => view.cloned(),
            Err(err) => {
                error!("{}", err);
                None
            }
        }
    }

    pub fn registry(&self) -> &ViewRegistry<K> {
        &self.registry
    }

    /// Human-readable dump of every registered view.
    pub fn summary(&self) -> String {
        self.registry.summary()
    }

    //--- Startup ----------------------------------------------------------

    /// Shows the start view instantly on the main layer and hides every
    /// other registered view.
    pub fn start(&mut self) {
        if self.started {
            warn!("Navigator already started");
            return;
        }
        self.started = true;

        let start_view = self.config.start_view;
        let views: Vec<ViewHandle<K>> = self.registry.iter().cloned().collect();

        for view in views.iter().filter(|v| Some(v.key().kind) != start_view) {
            view.borrow_mut().hide_instant();
        }

        if let Some(kind) = start_view {
            match self.registry.resolve(kind, None) {
                Ok(Some(view)) => {
                    let view = view.clone();
                    view.borrow_mut().show_instant(None);
                    self.layers.occupy(Layer::Main, view.clone());
                    self.watch(&view);
                    debug!("Started with {:?} on {:?}", kind, Layer::Main);
                }
                Ok(None) => error!("Start view {:?} is not registered", kind),
                Err(err) => error!("Cannot use {:?} as start view: {}", kind, err),
            }
        }

        self.pump();
    }

    //--- Navigation -------------------------------------------------------

    /// Queues a show request.
    ///
    /// Fails without touching any state when the target cannot be
    /// resolved; the request's `on_error` callback fires in that case.
    pub fn show_view(&mut self, mut request: ShowRequest<K>) -> Result<(), NavigationError<K>> {
        let resolved = match self.registry.resolve(request.kind, request.instance) {
            Ok(Some(view)) => Ok(view.clone()),
            Ok(None) => Err(NavigationError::NotRegistered(ViewKey {
                kind: request.kind,
                instance: request.instance,
            })),
            Err(err) => Err(err),
        };

        let target = match resolved {
            Ok(target) => target,
            Err(err) => {
                error!("Cannot show view: {}", err);
                if let Some(on_error) = request.on_error.take() {
                    on_error();
                }
                return Err(err);
            }
        };

        debug!("Queued {:?} on {:?}", target.key(), request.layer);
        self.queue.push(PendingRequest { request, target });
        self.pump();
        Ok(())
    }

    /// Shows `kind` on the main layer with regular transitions.
    pub fn show(&mut self, kind: K) -> Result<(), NavigationError<K>> {
        self.show_view(ShowRequest::new(kind))
    }

    /// Shows the view whose type carries the kind tag.
    pub fn show_view_of<V: KindOf<K>>(&mut self) -> Result<(), NavigationError<K>> {
        self.show_view(ShowRequest::new(V::KIND))
    }

    /// Shows `kind` on the popup layer.
    pub fn show_popup(&mut self, kind: K) -> Result<(), NavigationError<K>> {
        self.show_view(ShowRequest::popup(kind))
    }

    /// Re-shows the view last displaced from `layer`.
    ///
    /// Returns false when there is nothing alive to go back to.
    pub fn go_back(&mut self, layer: Layer) -> bool {
        let Some(previous) = self.previous.get(&layer).filter(|v| v.is_alive()) else {
            debug!("Nothing to go back to on {:?}", layer);
            return false;
        };

        let key = previous.key();
        let mut request = ShowRequest::new(key.kind).on_layer(layer);
        if let Some(instance) = key.instance {
            request = request.instance(instance);
        }

        self.show_view(request).is_ok()
    }

    //--- Gate -------------------------------------------------------------

    /// True when no transition is in flight.
    pub fn can_be_shown(&self) -> bool {
        self.gate.is_open()
    }

    /// Future resolving once no transition is in flight.
    pub fn wait_until_can_be_shown(&self) -> GateOpen {
        self.gate.wait()
    }

    /// Runs `action` now if the gate is open, otherwise once it reopens.
    ///
    /// Deferred actions run in submission order, each only while the gate
    /// is open.
    pub fn execute_when_can_be_shown(&mut self, action: impl FnOnce(&mut Navigator<K>) + 'static) {
        if self.gate.is_open() && self.deferred.is_empty() {
            action(self);
            return;
        }

        self.deferred.push_back(Box::new(action));
    }

    /// True after a transition aborted on an animating view above its layer.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Clears a stall, reopening the gate and resuming queued requests.
    pub fn recover_from_stall(&mut self) {
        if !self.stalled {
            return;
        }

        warn!("Recovering from stalled transition");
        self.stalled = false;
        self.gate.open();
        self.pump();
    }

    /// Drops every queued request that has not begun yet.
    pub fn cancel_pending(&mut self) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        let dropped = self.queue.clear();
        debug!("Cancelled {} pending show requests", dropped);
        dropped
    }

    //--- Queries ----------------------------------------------------------

    /// Live occupant of `layer`.
    pub fn occupant(&self, layer: Layer) -> Option<ViewHandle<K>> {
        self.layers.live_occupant(layer).cloned()
    }

    /// Last view displaced from `layer` by a completed transition.
    pub fn previous_view(&self, layer: Layer) -> Option<ViewHandle<K>> {
        self.previous.get(&layer).cloned()
    }

    /// Number of requests waiting for the gate.
    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    /// True while a transition is in flight or stalled.
    pub fn is_transitioning(&self) -> bool {
        self.active.is_some() || self.stalled
    }

    /// Takes the visibility notifications received since the last call.
    pub fn take_visibility_events(&mut self) -> Vec<VisibilityChanged<K>> {
        std::mem::take(&mut self.visibility_events)
    }

    //--- Frame Update -----------------------------------------------------

    /// Ticks every live registered view, then processes signals and
    /// queued requests.
    pub fn update(&mut self, dt: Duration) {
        let views: Vec<ViewHandle<K>> = self.registry.iter().filter(|v| v.is_alive()).cloned().collect();
        for view in views {
            view.borrow_mut().update(dt);
        }

        self.pump();
    }

    /// Processes pending signals, queued requests and deferred actions.
    ///
    /// Re-entrant calls (from a deferred action or a view command) return
    /// immediately; the outer pump picks up their work.
    pub fn pump(&mut self) {
        if self.pumping {
            return;
        }
        self.pumping = true;

        let mut drained = 0;
        loop {
            while drained < self.collector.max_per_update() {
                let Some(envelope) = self.collector.next() else { break };
                self.handle_signal(envelope);
                drained += 1;
            }

            if self.gate.is_open() {
                if let Some(pending) = self.queue.pop() {
                    self.begin(pending);
                    continue;
                }

                if let Some(action) = self.deferred.pop_front() {
                    action(self);
                    continue;
                }
            }

            break;
        }

        if drained >= self.collector.max_per_update() && self.collector.pending() > 0 {
            warn!(
                "Signal backlog: handled {} signals this update, {} left",
                drained,
                self.collector.pending()
            );
        }

        self.pumping = false;
    }

    //--- Transition State Machine -----------------------------------------

    fn begin(&mut self, pending: PendingRequest<K>) {
        let PendingRequest { mut request, target } = pending;

        if !target.is_alive() {
            warn!("Dropping request for destroyed view {:?}", target.key());
            if let Some(on_error) = request.on_error.take() {
                on_error();
            }
            return;
        }

        self.gate.close();
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        let layer = request.layer;

        debug!("Transition #{} begins: {:?} on {:?}", id.0, target.key(), layer);

        let mut transition = ActiveTransition {
            id,
            layer,
            target,
            outgoing: None,
            show_mode: request.show_mode,
            data: request.data.take(),
            on_active_hidden: request.on_active_hidden.take(),
            on_new_shown: request.on_new_shown.take(),
            stage: Stage::ShowingTarget,
        };

        let Some(occupant) = self.layers.live_occupant(layer).cloned() else {
            if layer == Layer::Main && self.layers.occupant(layer).is_some() {
                warn!("Main layer occupant was destroyed; replacing it without a hide");
            }
            self.show_target(transition);
            return;
        };

        if !self.cascade_hide(layer, request.hide_mode) {
            return;
        }

        self.unwatch(&occupant);
        transition.outgoing = Some(occupant.clone());

        match request.hide_mode {
            VisibilityMode::Regular => {
                transition.stage = Stage::HidingOutgoing;
                self.active = Some(transition);
                let on_hidden = self.step_callback(id, Step::Hidden);
                occupant.borrow_mut().hide(Some(on_hidden));
            }
            VisibilityMode::Instant => {
                occupant.borrow_mut().hide_instant();
                self.outgoing_hidden(transition);
            }
        }
    }

    /// Hides every occupied layer above `layer`. Returns false on a stall.
    fn cascade_hide(&mut self, layer: Layer, hide_mode: VisibilityMode) -> bool {
        for above in layer.above() {
            let Some(view) = self.layers.live_occupant(above).cloned() else {
                continue;
            };

            self.unwatch(&view);

            if !view.is_visible() {
                match self.config.stall_policy {
                    StallPolicy::Stall => {
                        error!(
                            "View {:?} on {:?} is mid-transition; navigation stalled",
                            view.key(),
                            above
                        );
                        self.watch(&view);
                        self.stalled = true;
                        return false;
                    }
                    StallPolicy::ForceInstant => {
                        warn!("View {:?} on {:?} is mid-transition; hiding it instantly", view.key(), above);
                        view.borrow_mut().hide_instant();
                        self.layers.clear(above);
                        continue;
                    }
                }
            }

            debug!("Closing {:?} on {:?}", view.key(), above);
            match hide_mode {
                VisibilityMode::Regular => view.borrow_mut().hide(None),
                VisibilityMode::Instant => view.borrow_mut().hide_instant(),
            }
            self.layers.clear(above);
        }

        true
    }

    fn outgoing_hidden(&mut self, mut transition: ActiveTransition<K>) {
        if let Some(on_active_hidden) = transition.on_active_hidden.take() {
            on_active_hidden();
        }

        if let Some(outgoing) = transition.outgoing.take() {
            if !outgoing.ptr_eq(&transition.target) {
                self.previous.insert(transition.layer, outgoing);
            }
        }

        self.show_target(transition);
    }

    fn show_target(&mut self, mut transition: ActiveTransition<K>) {
        if !transition.target.is_alive() {
            warn!(
                "Transition #{} abandoned: target {:?} was destroyed",
                transition.id.0,
                transition.target.key()
            );
            self.active = None;
            self.gate.open();
            return;
        }

        let target = transition.target.clone();
        self.layers.occupy(transition.layer, target.clone());
        self.watch(&target);

        let data = transition.data.take();
        match transition.show_mode {
            VisibilityMode::Instant => {
                target.borrow_mut().show_instant(data);
                self.complete(transition);
            }
            VisibilityMode::Regular => {
                let on_shown = self.step_callback(transition.id, Step::Shown);
                transition.stage = Stage::ShowingTarget;
                self.active = Some(transition);
                target.borrow_mut().show(Some(on_shown), None, data);
            }
        }
    }

    fn complete(&mut self, mut transition: ActiveTransition<K>) {
        debug!("Transition #{} complete", transition.id.0);
        self.active = None;
        self.gate.open();

        if let Some(on_new_shown) = transition.on_new_shown.take() {
            on_new_shown();
        }
    }

    /// Ends the active transition without firing `on_new_shown`.
    fn abandon(&mut self) {
        if let Some(transition) = self.active.take() {
            warn!("Transition #{} abandoned", transition.id.0);
            self.gate.open();
        }
    }

    fn step_callback(&self, transition: TransitionId, step: Step) -> Callback {
        let signals = self.signals.clone();
        Box::new(move || signals.send(Signal::StepFinished { transition, step }))
    }

    //--- Signal Handling --------------------------------------------------

    fn handle_signal(&mut self, envelope: Envelope<K>) {
        let Envelope { seq, signal } = envelope;

        match signal {
            Signal::StepFinished { transition, step } => self.step_finished(transition, step),
            Signal::Visibility { key, visible } => {
                self.visibility_events.push(VisibilityChanged { key, visible });
                if !visible {
                    self.hidden_externally(key, seq);
                }
            }
            Signal::Destroyed { key } => self.destroyed(key),
            Signal::Command(NavigationCommand::Show(request)) => {
                if let Err(err) = self.show_view(request) {
                    trace!("Dropped show command from a view: {}", err);
                }
            }
            Signal::Command(NavigationCommand::GoBack(layer)) => {
                self.go_back(layer);
            }
        }
    }

    fn step_finished(&mut self, id: TransitionId, step: Step) {
        let matches = self.active.as_ref().is_some_and(|t| {
            t.id == id
                && matches!(
                    (t.stage, step),
                    (Stage::HidingOutgoing, Step::Hidden) | (Stage::ShowingTarget, Step::Shown)
                )
        });

        if !matches {
            trace!("Ignoring stale {:?} of transition #{}", step, id.0);
            return;
        }

        let Some(transition) = self.active.take() else { return };
        match step {
            Step::Hidden => self.outgoing_hidden(transition),
            Step::Shown => self.complete(transition),
        }
    }

    /// Clears a watched view from its slot when it reports hidden.
    fn hidden_externally(&mut self, key: ViewKey<K>, seq: u64) {
        let Some(watch) = self.watched.get(&key) else { return };
        if seq < watch.since {
            trace!("Ignoring visibility signal #{} for {:?} sent before the watch", seq, key);
            return;
        }

        let view = watch.view.clone();
        self.watched.remove(&key);

        if let Some(layer) = self.layers.clear_view(&view) {
            debug!("View {:?} was hidden externally; cleared from {:?}", key, layer);
        }

        let interrupted = self
            .active
            .as_ref()
            .is_some_and(|t| t.stage == Stage::ShowingTarget && t.target.ptr_eq(&view));
        if interrupted {
            warn!("View {:?} was hidden before its show completed", key);
            self.abandon();
        }
    }

    /// Unregisters a destroyed view and unblocks any transition waiting on it.
    fn destroyed(&mut self, key: ViewKey<K>) {
        let dead = match self.registry.resolve(key.kind, key.instance) {
            Ok(Some(view)) if !view.is_alive() => Some(view.clone()),
            _ => None,
        };

        let Some(view) = dead else {
            trace!("Destroyed view {:?} is not registered", key);
            return;
        };

        self.registry.remove_key(key);
        self.unwatch(&view);
        match self.layers.layer_of(&view) {
            Some(layer) => debug!("Unregistered destroyed view {:?}; {:?} slot now empty", key, layer),
            None => debug!("Unregistered destroyed view {:?}", key),
        }

        let Some(stage) = self.active.as_ref().map(|t| t.stage) else { return };
        match stage {
            Stage::HidingOutgoing => {
                let is_target = self.active.as_ref().is_some_and(|t| t.target.ptr_eq(&view));
                if is_target {
                    warn!("Target view {:?} destroyed before its show began", key);
                    self.abandon();
                    return;
                }

                let is_outgoing = self
                    .active
                    .as_ref()
                    .and_then(|t| t.outgoing.as_ref())
                    .is_some_and(|o| o.ptr_eq(&view));
                if is_outgoing {
                    warn!("Outgoing view {:?} destroyed mid-hide; continuing", key);
                    if let Some(transition) = self.active.take() {
                        self.outgoing_hidden(transition);
                    }
                }
            }
            Stage::ShowingTarget => {
                let is_target = self.active.as_ref().is_some_and(|t| t.target.ptr_eq(&view));
                if is_target {
                    warn!("Target view {:?} destroyed mid-show", key);
                    self.abandon();
                }
            }
        }
    }

    //--- Watch Set --------------------------------------------------------

    fn watch(&mut self, view: &ViewHandle<K>) {
        let since = self.signals.next_seq();
        self.watched.insert(
            view.key(),
            Watch {
                view: view.clone(),
                since,
            },
        );
    }

    fn unwatch(&mut self, view: &ViewHandle<K>) {
        self.watched.retain(|_, watch| !watch.view.ptr_eq(view));
    }
}

impl<K: ViewKind> Default for Navigator<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

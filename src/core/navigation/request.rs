//=========================================================================
// Show Request
//=========================================================================
//
// Everything a single `show_view` call carries: target, layer, hide/show
// modes, payload and the caller's callbacks.
//
// Defaults: layer Main, hide Regular, show Regular, no payload.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::layers::Layer;
use crate::core::view::{Callback, InstanceId, ViewData, ViewKind, VisibilityMode};

//=== ShowRequest =========================================================

/// Request to show a view on a layer.
///
/// ```rust
/// # use aetheric_navigation::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Shop }
/// # impl ViewKind for Screen {}
/// let request = ShowRequest::new(Screen::Shop)
///     .on_layer(Layer::Popups)
///     .hide_mode(VisibilityMode::Instant)
///     .with_data(42_u32)
///     .on_shown(|| println!("shop open"));
/// assert_eq!(request.layer(), Layer::Popups);
/// ```
pub struct ShowRequest<K: ViewKind> {
    pub(crate) kind: K,
    pub(crate) layer: Layer,
    pub(crate) hide_mode: VisibilityMode,
    pub(crate) show_mode: VisibilityMode,
    pub(crate) instance: Option<InstanceId>,
    pub(crate) data: Option<ViewData>,
    pub(crate) on_active_hidden: Option<Callback>,
    pub(crate) on_new_shown: Option<Callback>,
    pub(crate) on_error: Option<Callback>,
}

impl<K: ViewKind> ShowRequest<K> {
    //--- Construction -----------------------------------------------------

    /// Request for `kind` on the main layer with regular transitions.
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            layer: Layer::Main,
            hide_mode: VisibilityMode::Regular,
            show_mode: VisibilityMode::Regular,
            instance: None,
            data: None,
            on_active_hidden: None,
            on_new_shown: None,
            on_error: None,
        }
    }

    /// Request for `kind` on the popup layer.
    pub fn popup(kind: K) -> Self {
        Self::new(kind).on_layer(Layer::Popups)
    }

    //--- Builder Methods --------------------------------------------------

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// How the current occupant (and any layer above) is hidden.
    pub fn hide_mode(mut self, mode: VisibilityMode) -> Self {
        self.hide_mode = mode;
        self
    }

    /// How the new view is shown.
    pub fn show_mode(mut self, mode: VisibilityMode) -> Self {
        self.show_mode = mode;
        self
    }

    /// Instant hide and instant show.
    pub fn instant(self) -> Self {
        self.hide_mode(VisibilityMode::Instant)
            .show_mode(VisibilityMode::Instant)
    }

    /// Selects one instance of a multi-instance kind.
    pub fn instance(mut self, instance: InstanceId) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Payload handed to the view when it is shown.
    pub fn with_data<T: Any>(mut self, value: T) -> Self {
        self.data = Some(ViewData::new(value));
        self
    }

    /// Payload that is already wrapped.
    pub fn data(mut self, data: ViewData) -> Self {
        self.data = Some(data);
        self
    }

    /// Fires once the displaced occupant is hidden.
    pub fn on_active_hidden(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_active_hidden = Some(Box::new(callback));
        self
    }

    /// Fires once the new view is fully shown.
    pub fn on_shown(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_new_shown = Some(Box::new(callback));
        self
    }

    /// Fires if the target view cannot be resolved.
    pub fn on_error(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn instance_id(&self) -> Option<InstanceId> {
        self.instance
    }
}

impl<K: ViewKind> fmt::Debug for ShowRequest<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRequest")
            .field("kind", &self.kind)
            .field("layer", &self.layer)
            .field("hide_mode", &self.hide_mode)
            .field("show_mode", &self.show_mode)
            .field("instance", &self.instance)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================

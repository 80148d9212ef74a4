//=========================================================================
// Layers
//=========================================================================
//
// Ordered visual layers and the slot table tracking their occupants.
//
// Rank order (background → foreground):
//   Main(0) < Custom1(1) < Custom2(2) < Popups(3) < Custom3(4) < Custom4(5)
//
// Showing a view on a layer forces every occupied layer above it closed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::view::{ViewHandle, ViewKind};

//=== Layer ===============================================================

const LAYER_COUNT: usize = 6;

/// Visual layer a view is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Layer {
    #[default]
    Main,
    Custom1,
    Custom2,
    Popups,
    Custom3,
    Custom4,
}

impl Layer {
    /// Every layer in ascending rank.
    pub const ALL: [Layer; LAYER_COUNT] = [
        Layer::Main,
        Layer::Custom1,
        Layer::Custom2,
        Layer::Popups,
        Layer::Custom3,
        Layer::Custom4,
    ];

    /// Integer rank; lower is further in the background.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Layers strictly above this one, in ascending rank.
    pub fn above(self) -> impl Iterator<Item = Layer> {
        Self::ALL.into_iter().skip(self.rank() + 1)
    }
}

//=== Layer Table =========================================================

/// One slot per layer holding its current occupant.
///
/// Occupants are validated on read: a destroyed view is reported as absent
/// by [`LayerTable::live_occupant`].
pub struct LayerTable<K: ViewKind> {
    slots: [Option<ViewHandle<K>>; LAYER_COUNT],
}

impl<K: ViewKind> LayerTable<K> {
    /// Creates a table with every layer empty.
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// Raw occupant of `layer`, alive or not.
    pub fn occupant(&self, layer: Layer) -> Option<&ViewHandle<K>> {
        self.slots[layer.rank()].as_ref()
    }

    /// Occupant of `layer` if it is still alive.
    pub fn live_occupant(&self, layer: Layer) -> Option<&ViewHandle<K>> {
        self.occupant(layer).filter(|view| view.is_alive())
    }

    /// Places `view` on `layer`, returning the previous occupant.
    pub fn occupy(&mut self, layer: Layer, view: ViewHandle<K>) -> Option<ViewHandle<K>> {
        self.slots[layer.rank()].replace(view)
    }

    /// Empties `layer`, returning the previous occupant.
    pub fn clear(&mut self, layer: Layer) -> Option<ViewHandle<K>> {
        self.slots[layer.rank()].take()
    }

    /// Empties every slot holding `view`; returns the first cleared layer.
    pub fn clear_view(&mut self, view: &ViewHandle<K>) -> Option<Layer> {
        let mut cleared = None;

        for layer in Layer::ALL {
            let holds_view = self.slots[layer.rank()]
                .as_ref()
                .is_some_and(|occupant| occupant.ptr_eq(view));

            if holds_view {
                self.slots[layer.rank()] = None;
                cleared.get_or_insert(layer);
            }
        }

        cleared
    }

    /// Layer currently holding `view`, if any.
    pub fn layer_of(&self, view: &ViewHandle<K>) -> Option<Layer> {
        Layer::ALL.into_iter().find(|&layer| {
            self.occupant(layer)
                .is_some_and(|occupant| occupant.ptr_eq(view))
        })
    }
}

impl<K: ViewKind> Default for LayerTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

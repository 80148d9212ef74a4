//=========================================================================
// View Registry
//=========================================================================
//
// Tracks every registered view by key.
//
// Views are stored in one of two maps depending on their kind:
//   single: HashMap<K, ViewHandle>
//   multi:  HashMap<K, HashMap<InstanceId, ViewHandle>>
//
// A view object appears in exactly one map, at most once. The first
// registration of a key wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Write;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::NavigationError;
use crate::core::view::{InstanceId, ViewHandle, ViewKey, ViewKind};

//=== View Registry =======================================================

/// Key → view mappings for single- and multi-instance views.
pub struct ViewRegistry<K: ViewKind> {
    single: HashMap<K, ViewHandle<K>>,
    multi: HashMap<K, HashMap<InstanceId, ViewHandle<K>>>,
}

impl<K: ViewKind> ViewRegistry<K> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            single: HashMap::new(),
            multi: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a view under its key.
    ///
    /// Fails without touching the maps when the key is already taken or
    /// when the view's instance id disagrees with its kind.
    pub fn register(&mut self, view: ViewHandle<K>) -> Result<ViewKey<K>, NavigationError<K>> {
        let key = view.key();

        match (key.kind.is_multi_instance(), key.instance) {
            (true, Some(instance)) => {
                let instances = self.multi.entry(key.kind).or_default();
                if instances.contains_key(&instance) {
                    return Err(NavigationError::DuplicateRegistration(key));
                }
                instances.insert(instance, view);
            }
            (false, None) => {
                if self.single.contains_key(&key.kind) {
                    return Err(NavigationError::DuplicateRegistration(key));
                }
                self.single.insert(key.kind, view);
            }
            _ => return Err(NavigationError::InstanceMismatch(key)),
        }

        debug!("Registered view {:?}", key);
        Ok(key)
    }

    /// Removes the entry holding this exact view object.
    pub fn unregister(&mut self, view: &ViewHandle<K>) -> Result<ViewKey<K>, NavigationError<K>> {
        let key = view.key();

        let removed = match key.instance {
            Some(instance) => self
                .multi
                .get_mut(&key.kind)
                .filter(|instances| instances.get(&instance).is_some_and(|v| v.ptr_eq(view)))
                .and_then(|instances| instances.remove(&instance)),
            None => {
                if self.single.get(&key.kind).is_some_and(|v| v.ptr_eq(view)) {
                    self.single.remove(&key.kind)
                } else {
                    None
                }
            }
        };

        match removed {
            Some(_) => {
                debug!("Unregistered view {:?}", key);
                Ok(key)
            }
            None => Err(NavigationError::NotRegistered(key)),
        }
    }

    /// Removes whatever view is registered under `key`.
    pub fn remove_key(&mut self, key: ViewKey<K>) -> Option<ViewHandle<K>> {
        match key.instance {
            Some(instance) => self.multi.get_mut(&key.kind)?.remove(&instance),
            None => self.single.remove(&key.kind),
        }
    }

    //--- Resolution -------------------------------------------------------

    /// Looks up the view for `kind` (and `instance` for multi-instance kinds).
    ///
    /// Returns `Ok(None)` when nothing matches and `Err` when a
    /// multi-instance kind is resolved without an instance id.
    pub fn resolve(
        &self,
        kind: K,
        instance: Option<InstanceId>,
    ) -> Result<Option<&ViewHandle<K>>, NavigationError<K>> {
        if !kind.is_multi_instance() {
            return Ok(self.single.get(&kind));
        }

        let Some(instance) = instance else {
            return Err(NavigationError::MissingInstanceId(kind));
        };

        Ok(self.multi.get(&kind).and_then(|instances| instances.get(&instance)))
    }

    //--- Queries ----------------------------------------------------------

    /// Iterates over all registered views.
    pub fn iter(&self) -> impl Iterator<Item = &ViewHandle<K>> {
        self.single
            .values()
            .chain(self.multi.values().flat_map(|instances| instances.values()))
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.single.len() + self.multi.values().map(HashMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable listing of every registered view.
    pub fn summary(&self) -> String {
        let mut out = String::from("All registered views:\n");

        out.push_str("= Single instance views:\n");
        for (kind, view) in &self.single {
            let _ = writeln!(out, "=== {:?}. Is in hierarchy: {}", kind, view.borrow().is_in_hierarchy());
        }

        out.push_str("= Multiple instance views:\n");
        for (kind, instances) in &self.multi {
            let _ = writeln!(out, "=== Views of kind {:?}", kind);
            let mut ids: Vec<_> = instances.keys().copied().collect();
            ids.sort_unstable();
            for id in ids {
                let in_hierarchy = instances[&id].borrow().is_in_hierarchy();
                let _ = writeln!(out, "+++++ id: {}. Is in hierarchy: {}", id, in_hierarchy);
            }
        }

        out
    }
}

impl<K: ViewKind> Default for ViewRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{InstantPresenter, PresentedView};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestView {
        Menu,
        Settings,
        Slot,
    }

    impl ViewKind for TestView {
        fn is_multi_instance(&self) -> bool {
            matches!(self, TestView::Slot)
        }
    }

    //--- Test Helpers -----------------------------------------------------

    fn single(kind: TestView) -> ViewHandle<TestView> {
        ViewHandle::new(PresentedView::new(kind, InstantPresenter::new()))
    }

    fn slot(id: InstanceId) -> ViewHandle<TestView> {
        ViewHandle::new(PresentedView::with_instance(TestView::Slot, id, InstantPresenter::new()))
    }

    //--- Registration Tests -----------------------------------------------

    #[test]
    fn register_and_resolve_single() {
        let mut registry = ViewRegistry::new();
        let menu = single(TestView::Menu);

        assert_eq!(registry.register(menu.clone()), Ok(ViewKey::single(TestView::Menu)));

        let resolved = registry.resolve(TestView::Menu, None).unwrap();
        assert!(resolved.is_some_and(|v| v.ptr_eq(&menu)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn first_single_registration_wins() {
        let mut registry = ViewRegistry::new();
        let first = single(TestView::Menu);
        let second = single(TestView::Menu);

        registry.register(first.clone()).unwrap();
        assert_eq!(
            registry.register(second),
            Err(NavigationError::DuplicateRegistration(ViewKey::single(TestView::Menu)))
        );

        let resolved = registry.resolve(TestView::Menu, None).unwrap();
        assert!(resolved.is_some_and(|v| v.ptr_eq(&first)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_object_cannot_register_twice() {
        let mut registry = ViewRegistry::new();
        let menu = single(TestView::Menu);

        registry.register(menu.clone()).unwrap();
        assert!(registry.register(menu).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn multi_instance_duplicates_rejected_per_id() {
        let mut registry = ViewRegistry::new();

        registry.register(slot(1)).unwrap();
        registry.register(slot(2)).unwrap();
        assert_eq!(
            registry.register(slot(1)),
            Err(NavigationError::DuplicateRegistration(ViewKey::instance(TestView::Slot, 1)))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn instance_mismatch_rejected() {
        let mut registry = ViewRegistry::new();
        let bogus = ViewHandle::new(PresentedView::with_instance(
            TestView::Menu,
            3,
            InstantPresenter::new(),
        ));
        let missing_id = single(TestView::Slot);

        assert!(matches!(registry.register(bogus), Err(NavigationError::InstanceMismatch(_))));
        assert!(matches!(registry.register(missing_id), Err(NavigationError::InstanceMismatch(_))));
        assert!(registry.is_empty());
    }

    //--- Unregistration Tests ---------------------------------------------

    #[test]
    fn unregister_removes_matching_entry() {
        let mut registry = ViewRegistry::new();
        let menu = single(TestView::Menu);
        let five = slot(5);

        registry.register(menu.clone()).unwrap();
        registry.register(five.clone()).unwrap();

        assert!(registry.unregister(&menu).is_ok());
        assert!(registry.unregister(&five).is_ok());
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_unknown_is_error() {
        let mut registry = ViewRegistry::new();
        assert_eq!(
            registry.unregister(&single(TestView::Settings)),
            Err(NavigationError::NotRegistered(ViewKey::single(TestView::Settings)))
        );
    }

    #[test]
    fn unregister_of_dropped_duplicate_keeps_winner() {
        let mut registry = ViewRegistry::new();
        let winner = single(TestView::Menu);
        let loser = single(TestView::Menu);

        registry.register(winner.clone()).unwrap();
        let _ = registry.register(loser.clone());

        assert!(registry.unregister(&loser).is_err());
        let registered = registry.resolve(TestView::Menu, None).unwrap();
        assert!(registered.is_some_and(|view| view.ptr_eq(&winner)));
    }

    #[test]
    fn remove_key_drops_entry() {
        let mut registry = ViewRegistry::new();
        registry.register(slot(4)).unwrap();

        assert!(registry.remove_key(ViewKey::instance(TestView::Slot, 4)).is_some());
        assert!(registry.remove_key(ViewKey::instance(TestView::Slot, 4)).is_none());
    }

    //--- Resolution Tests -------------------------------------------------

    #[test]
    fn multi_instance_lookup() {
        let mut registry = ViewRegistry::new();
        registry.register(slot(5)).unwrap();

        assert!(registry.resolve(TestView::Slot, Some(5)).unwrap().is_some());
        assert!(registry.resolve(TestView::Slot, Some(7)).unwrap().is_none());
        assert_eq!(
            registry.resolve(TestView::Slot, None).err(),
            Some(NavigationError::MissingInstanceId(TestView::Slot))
        );
    }

    #[test]
    fn single_lookup_ignores_instance_id() {
        let mut registry = ViewRegistry::new();
        registry.register(single(TestView::Menu)).unwrap();
        assert!(registry.resolve(TestView::Menu, Some(9)).unwrap().is_some());
    }

    #[test]
    fn uniqueness_holds_over_register_unregister_sequences() {
        let mut registry = ViewRegistry::new();
        let views: Vec<_> = (0..4).map(|_| single(TestView::Menu)).collect();
        let slots: Vec<_> = (0..4).map(|i| slot(i % 2)).collect();

        for round in 0..3 {
            for (i, view) in views.iter().chain(slots.iter()).enumerate() {
                if (i + round) % 3 == 0 {
                    let _ = registry.unregister(view);
                } else {
                    let _ = registry.register(view.clone());
                }

                let menus = registry.iter().filter(|v| v.key().kind == TestView::Menu).count();
                assert!(menus <= 1);
                for id in 0..2 {
                    let count = registry
                        .iter()
                        .filter(|v| v.key() == ViewKey::instance(TestView::Slot, id))
                        .count();
                    assert!(count <= 1);
                }
            }
        }
    }

    #[test]
    fn summary_lists_views() {
        let mut registry = ViewRegistry::new();
        registry.register(single(TestView::Menu)).unwrap();
        registry.register(slot(2)).unwrap();

        let summary = registry.summary();
        assert!(summary.contains("Menu"));
        assert!(summary.contains("Views of kind Slot"));
        assert!(summary.contains("id: 2"));
    }
}

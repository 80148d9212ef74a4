//=========================================================================
// Navigator Builder
//=========================================================================
//
// Fluent configuration for `Navigator`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::navigation::{Navigator, NavigatorConfig, StallPolicy, DEFAULT_MAX_SIGNALS_PER_UPDATE};
use crate::core::view::ViewKind;

//=== Navigator Builder ===================================================

/// Builder for configuring and creating a [`Navigator`].
///
/// # Examples
///
/// ```rust
/// # use aetheric_navigation::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { MainMenu }
/// # impl ViewKind for Screen {}
/// let navigator = NavigatorBuilder::new()
///     .with_start_view(Screen::MainMenu)
///     .with_stall_policy(StallPolicy::ForceInstant)
///     .with_max_signals_per_update(64)
///     .build();
/// assert!(navigator.can_be_shown());
/// ```
pub struct NavigatorBuilder<K: ViewKind> {
    start_view: Option<K>,
    stall_policy: StallPolicy,
    max_signals_per_update: usize,
}

impl<K: ViewKind> NavigatorBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            start_view: None,
            stall_policy: StallPolicy::default(),
            max_signals_per_update: DEFAULT_MAX_SIGNALS_PER_UPDATE,
        }
    }

    /// Sets the view shown on the main layer by [`Navigator::start`].
    ///
    /// The kind must be single-instance.
    pub fn with_start_view(mut self, kind: K) -> Self {
        self.start_view = Some(kind);
        self
    }

    /// Sets how a transition treats an animating view above its layer.
    ///
    /// Default: [`StallPolicy::Stall`]
    pub fn with_stall_policy(mut self, policy: StallPolicy) -> Self {
        self.stall_policy = policy;
        self
    }

    /// Sets how many signals one update handles before deferring the rest.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_signals_per_update(mut self, max: usize) -> Self {
        assert!(max > 0, "Signal budget per update must be positive");
        self.max_signals_per_update = max;
        self
    }

    /// Builds the navigator.
    pub fn build(self) -> Navigator<K> {
        info!(
            "Building navigator (start view: {:?}, stall policy: {:?}, signals/update: {})",
            self.start_view, self.stall_policy, self.max_signals_per_update
        );

        Navigator::with_config(NavigatorConfig {
            start_view: self.start_view,
            stall_policy: self.stall_policy,
            max_signals_per_update: self.max_signals_per_update,
        })
    }
}

impl<K: ViewKind> Default for NavigatorBuilder<K> {
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

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestView {
        Menu,
    }

    impl ViewKind for TestView {}

    #[test]
    fn defaults() {
        let builder = NavigatorBuilder::<TestView>::new();
        assert_eq!(builder.start_view, None);
        assert_eq!(builder.stall_policy, StallPolicy::Stall);
        assert_eq!(builder.max_signals_per_update, DEFAULT_MAX_SIGNALS_PER_UPDATE);
    }

    #[test]
    fn settings_are_applied() {
        let builder = NavigatorBuilder::new()
            .with_start_view(TestView::Menu)
            .with_stall_policy(StallPolicy::ForceInstant)
            .with_max_signals_per_update(8);

        assert_eq!(builder.start_view, Some(TestView::Menu));
        assert_eq!(builder.stall_policy, StallPolicy::ForceInstant);
        assert_eq!(builder.max_signals_per_update, 8);

        let navigator = builder.build();
        assert!(navigator.can_be_shown());
        assert!(!navigator.is_stalled());
    }

    #[test]
    #[should_panic(expected = "Signal budget per update must be positive")]
    fn zero_signal_budget_panics() {
        let _ = NavigatorBuilder::<TestView>::new().with_max_signals_per_update(0);
    }
}

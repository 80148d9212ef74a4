//=========================================================================
// Presenters
//=========================================================================
//
// Stock visual collaborators for `PresentedView`.
//
// - InstantPresenter: no animation, every transition completes at once
// - TimedPresenter: fixed-duration fade driven by `advance(dt)`
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::presented::{Presenter, Progress};

//=== InstantPresenter ====================================================

/// Presenter whose animated transitions finish immediately.
#[derive(Debug, Clone, Default)]
pub struct InstantPresenter {
    active: bool,
}

impl InstantPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the presented content is currently switched on.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Presenter for InstantPresenter {
    fn begin_show(&mut self) -> Progress {
        self.active = true;
        Progress::Done
    }

    fn begin_hide(&mut self) -> Progress {
        self.active = false;
        Progress::Done
    }

    fn advance(&mut self, _dt: Duration) -> Progress {
        Progress::Done
    }

    fn show_instant(&mut self) {
        self.active = true;
    }

    fn hide_instant(&mut self) {
        self.active = false;
    }
}

//=== TimedPresenter ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fade {
    Idle,
    In,
    Out,
}

/// Linear fade over a fixed duration.
///
/// `opacity()` runs from 0.0 (hidden) to 1.0 (shown). A reversed fade
/// starts from the current opacity, so interrupting a fade-in with a
/// fade-out takes only as long as the part already shown.
#[derive(Debug, Clone)]
pub struct TimedPresenter {
    duration: Duration,
    elapsed: Duration,
    opacity: f32,
    fade: Fade,
}

impl TimedPresenter {
    /// Creates a presenter with the given fade duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            opacity: 0.0,
            fade: Fade::Idle,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current opacity in `[0.0, 1.0]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True while a fade is running.
    pub fn is_animating(&self) -> bool {
        self.fade != Fade::Idle
    }

    fn start(&mut self, fade: Fade) -> Progress {
        if self.duration.is_zero() {
            match fade {
                Fade::In => self.show_instant(),
                _ => self.hide_instant(),
            }
            return Progress::Done;
        }

        self.fade = fade;
        Progress::Running
    }
}

impl Presenter for TimedPresenter {
    fn begin_show(&mut self) -> Progress {
        self.start(Fade::In)
    }

    fn begin_hide(&mut self) -> Progress {
        self.start(Fade::Out)
    }

    fn advance(&mut self, dt: Duration) -> Progress {
        let finished = match self.fade {
            Fade::Idle => return Progress::Done,
            Fade::In => {
                self.elapsed = (self.elapsed + dt).min(self.duration);
                self.elapsed == self.duration
            }
            Fade::Out => {
                self.elapsed = self.elapsed.saturating_sub(dt);
                self.elapsed.is_zero()
            }
        };
        self.opacity = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();

        if finished {
            self.fade = Fade::Idle;
            Progress::Done
        } else {
            Progress::Running
        }
    }

    fn show_instant(&mut self) {
        self.elapsed = self.duration;
        self.opacity = 1.0;
        self.fade = Fade::Idle;
    }

    fn hide_instant(&mut self) {
        self.elapsed = Duration::ZERO;
        self.opacity = 0.0;
        self.fade = Fade::Idle;
    }
}

//=========================================================================
// Tests
//=========================================================================

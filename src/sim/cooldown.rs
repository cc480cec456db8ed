//! Timed lockout for repeatable actions (shooting, planting, cabbage fire)

/// Cooldown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// Action may trigger
    Ready,
    /// Locked out; `elapsed` ms accumulated since the trigger
    Cooling { elapsed: u32 },
}

/// Two-state cooldown timer
///
/// `Ready -> Cooling` on [`Cooldown::trigger`]. `Cooling -> Ready` once the
/// accumulated time reaches the threshold, or as soon as the triggering input
/// is reported released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    threshold_ms: u32,
    state: CooldownState,
}

impl Cooldown {
    /// A ready cooldown with the given threshold
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            threshold_ms,
            state: CooldownState::Ready,
        }
    }

    /// A cooldown that starts locked out (elapsed = 0)
    pub fn cooling(threshold_ms: u32) -> Self {
        Self {
            threshold_ms,
            state: CooldownState::Cooling { elapsed: 0 },
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == CooldownState::Ready
    }

    #[inline]
    pub fn state(&self) -> CooldownState {
        self.state
    }

    #[inline]
    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }

    /// Start cooling. Returns false (and changes nothing) if not ready.
    pub fn trigger(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.state = CooldownState::Cooling { elapsed: 0 };
        true
    }

    /// Start cooling with a new threshold (cabbage fire re-rolls its delay)
    pub fn trigger_with(&mut self, threshold_ms: u32) -> bool {
        if !self.trigger() {
            return false;
        }
        self.threshold_ms = threshold_ms;
        true
    }

    /// Advance by `dt_ms`; `released` short-circuits straight to ready
    pub fn advance(&mut self, dt_ms: u32, released: bool) {
        if let CooldownState::Cooling { elapsed } = self.state {
            let elapsed = elapsed.saturating_add(dt_ms);
            self.state = if released || elapsed >= self.threshold_ms {
                CooldownState::Ready
            } else {
                CooldownState::Cooling { elapsed }
            };
        }
    }
}

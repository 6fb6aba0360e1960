//! Polling Resources
//!
//! Interval refresh tied to the lifetime of the component that starts it,
//! and an in-flight guard that pauses polling during user actions and
//! discards poll results that an action overtook.

use std::time::Duration;

use leptos::logging::error;
use leptos::prelude::*;

pub const DASHBOARD_INTERVAL: Duration = Duration::from_secs(5);
pub const LOGS_INTERVAL: Duration = Duration::from_secs(1);

/// In-flight flag for user-triggered actions.
///
/// While set, scheduled poll ticks are skipped so a refresh cannot overwrite
/// the state the action is about to produce.
#[derive(Debug, Clone, Copy)]
pub struct ActionGuard {
    busy: RwSignal<bool>,
    /// A background refresh is awaiting its result
    refreshing: RwSignal<bool>,
    /// Actions started so far
    actions: RwSignal<u64>,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self {
            busy: RwSignal::new(false),
            refreshing: RwSignal::new(false),
            actions: RwSignal::new(0),
        }
    }

    /// Mark an action as started. `false` if one is already running.
    pub fn try_begin(&self) -> bool {
        if self.busy.try_get_untracked().unwrap_or(true) {
            return false;
        }
        self.busy.set(true);
        self.actions.update(|n| *n += 1);
        true
    }

    /// Start a background refresh. `None` while an action or an earlier refresh is in flight.
    pub fn begin_refresh(&self) -> Option<RefreshTicket> {
        if self.is_busy() || self.refreshing.try_get_untracked().unwrap_or(true) {
            return None;
        }
        self.refreshing.set(true);
        Some(RefreshTicket {
            guard: *self,
            actions: self.actions.get_untracked(),
        })
    }

    /// Begin an action that ends when the returned token drops
    pub fn hold(&self) -> Option<GuardToken> {
        self.try_begin().then_some(GuardToken { guard: *self })
    }

    /// Mark the action finished. Safe to call after the owner is disposed.
    pub fn end(&self) {
        let _ = self.busy.try_set(false);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.try_get_untracked().unwrap_or(false)
    }

    /// Reactive view of the flag, for disabling controls
    pub fn busy(&self) -> Signal<bool> {
        self.busy.into()
    }

    /// Run `f` only when no action is in flight
    pub fn run_if_idle(&self, f: impl FnOnce()) -> bool {
        if self.is_busy() {
            return false;
        }
        f();
        true
    }
}

/// Scoped in-flight marker returned by [`ActionGuard::hold`]
#[must_use = "the guard is released as soon as the token drops"]
pub struct GuardToken {
    guard: ActionGuard,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.guard.end();
    }
}

/// One background refresh, from [`ActionGuard::begin_refresh`] until drop
#[must_use = "the refresh ends as soon as the ticket drops"]
pub struct RefreshTicket {
    guard: ActionGuard,
    actions: u64,
}

impl RefreshTicket {
    /// No action started or is running since the refresh began
    pub fn is_current(&self) -> bool {
        !self.guard.is_busy() && self.guard.actions.try_get_untracked() == Some(self.actions)
    }
}

impl Drop for RefreshTicket {
    fn drop(&mut self) {
        let _ = self.guard.refreshing.try_set(false);
    }
}

impl Default for ActionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Call `tick` every `period`, skipping ticks while `guard` is busy.
///
/// The interval is cleared when the owning component unmounts.
pub fn poll(period: Duration, guard: ActionGuard, tick: impl Fn() + 'static) {
    let gated = move || {
        guard.run_if_idle(&tick);
    };
    match set_interval_with_handle(gated, period) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => error!("[Poller] failed to start interval: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_skips_work_while_busy() {
        let guard = ActionGuard::new();
        let mut ran = 0;

        assert!(guard.run_if_idle(|| ran += 1));
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert!(!guard.run_if_idle(|| ran += 1));

        guard.end();
        assert!(guard.run_if_idle(|| ran += 1));
        assert_eq!(ran, 2);
    }

    #[test]
    fn test_refresh_overtaken_by_action_is_stale() {
        let guard = ActionGuard::new();

        let ticket = guard.begin_refresh().unwrap();
        assert!(ticket.is_current());
        drop(guard.hold());
        assert!(!guard.is_busy());
        assert!(!ticket.is_current());
        drop(ticket);

        let ticket = guard.begin_refresh().unwrap();
        let token = guard.hold();
        assert!(!ticket.is_current());
        drop(token);
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_one_refresh_at_a_time() {
        let guard = ActionGuard::new();
        let first = guard.begin_refresh();
        assert!(first.is_some());
        assert!(guard.begin_refresh().is_none());
        drop(first);
        assert!(guard.begin_refresh().is_some());

        let _token = guard.hold();
        assert!(guard.begin_refresh().is_none());
    }

    #[test]
    fn test_token_releases_on_drop() {
        let guard = ActionGuard::new();
        {
            let token = guard.hold();
            assert!(token.is_some());
            assert!(guard.is_busy());
            assert!(guard.hold().is_none());
        }
        assert!(!guard.is_busy());
    }
}

//! Destructive Action Flow
//!
//! `Idle -> Confirming -> (Idle | InFlight -> Idle)`. A call is only issued
//! after an explicit confirm, and the trigger stays disabled while in flight.

/// State of one delete / delete-all control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destructive<T> {
    Idle,
    /// Waiting for the user to confirm deleting `T`
    Confirming(T),
    /// Confirmed; the backend call for `T` is pending
    InFlight(T),
}

impl<T> Default for Destructive<T> {
    fn default() -> Self {
        Destructive::Idle
    }
}

impl<T: Clone> Destructive<T> {
    /// Ask for confirmation. Ignored unless idle.
    pub fn request(&mut self, target: T) -> bool {
        if matches!(self, Destructive::Idle) {
            *self = Destructive::Confirming(target);
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        if matches!(self, Destructive::Confirming(_)) {
            *self = Destructive::Idle;
        }
    }

    /// Move to in-flight and hand back the target to act on.
    /// `None` unless confirmation was pending, so a double click cannot submit twice.
    pub fn confirm(&mut self) -> Option<T> {
        match self {
            Destructive::Confirming(target) => {
                let target = target.clone();
                *self = Destructive::InFlight(target.clone());
                Some(target)
            }
            _ => None,
        }
    }

    /// The backend call returned, successfully or not
    pub fn finish(&mut self) {
        if matches!(self, Destructive::InFlight(_)) {
            *self = Destructive::Idle;
        }
    }

    pub fn pending(&self) -> Option<&T> {
        match self {
            Destructive::Confirming(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, Destructive::Confirming(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Destructive::InFlight(_))
    }

    /// True when the triggering control should be disabled
    pub fn is_busy(&self) -> bool {
        !matches!(self, Destructive::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_returns_to_idle_without_target() {
        let mut flow = Destructive::default();
        assert!(flow.request("left-pad"));
        assert_eq!(flow.pending(), Some(&"left-pad"));
        flow.cancel();
        assert_eq!(flow, Destructive::Idle);
        assert_eq!(flow.confirm(), None);
    }

    #[test]
    fn test_confirm_once_then_in_flight() {
        let mut flow = Destructive::default();
        flow.request("react".to_string());
        assert_eq!(flow.confirm(), Some("react".to_string()));
        assert!(flow.is_in_flight());
        assert!(flow.is_busy());
        // Second confirm while the first call is pending does nothing
        assert_eq!(flow.confirm(), None);
        assert!(!flow.request("vue".to_string()));

        flow.finish();
        assert_eq!(flow, Destructive::Idle);
        assert!(!flow.is_busy());
    }

    #[test]
    fn test_finish_does_not_skip_confirmation() {
        let mut flow = Destructive::default();
        flow.request(1);
        flow.finish();
        assert!(flow.is_confirming());
    }
}

//! Grounded/airborne jump gate.
//!
//! Contact notifications mark the avatar grounded; spending a jump marks it
//! airborne. Losing contact does not clear the flag: a body that rolls off a
//! ledge keeps one jump until it lands or uses it.

/// Jump eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundedState {
    #[default]
    Airborne,
    Grounded,
}

/// Per-avatar jump gate.
#[derive(Debug, Clone, Default)]
pub struct GroundedStateMachine {
    state: GroundedState,
}

impl GroundedStateMachine {
    /// Starts airborne.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GroundedState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state == GroundedState::Grounded
    }

    /// A collision involving the controlled body was reported.
    pub fn on_contact(&mut self) {
        self.state = GroundedState::Grounded;
    }

    /// Spends the jump if grounded. Returns whether a jump may be applied.
    ///
    /// Read and clear happen together: at most one `true` per grounded
    /// period.
    pub fn try_consume_jump(&mut self) -> bool {
        let grounded = self.is_grounded();
        self.state = GroundedState::Airborne;
        grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_airborne() {
        let gate = GroundedStateMachine::new();
        assert_eq!(gate.state(), GroundedState::Airborne);
    }

    #[test]
    fn contact_grounds_idempotently() {
        let mut gate = GroundedStateMachine::new();
        gate.on_contact();
        gate.on_contact();
        assert_eq!(gate.state(), GroundedState::Grounded);
    }

    #[test]
    fn one_jump_per_grounded_period() {
        let mut gate = GroundedStateMachine::new();
        gate.on_contact();
        assert!(gate.try_consume_jump());
        assert_eq!(gate.state(), GroundedState::Airborne);
        assert!(!gate.try_consume_jump());

        gate.on_contact();
        assert!(gate.try_consume_jump());
    }

    #[test]
    fn airborne_jump_is_ignored() {
        let mut gate = GroundedStateMachine::new();
        assert!(!gate.try_consume_jump());
        assert_eq!(gate.state(), GroundedState::Airborne);
    }
}

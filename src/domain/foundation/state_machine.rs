//! Transition lattice for lifecycle statuses.

/// A status enum whose values form a transition lattice.
///
/// Notification handling uses the lattice to flag suspicious transitions
/// (a settled order moving back to pending, say) without rejecting them.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Whether moving from `self` to `target` is an expected transition.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Statuses reachable from `self`, excluding `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// A settled status: nothing further is expected.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

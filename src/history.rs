//! Undo support for a hand being recorded action by action.

use crate::error::{EngineError, Result};
use crate::script::Command;
use crate::state::{ActionRecord, HandState, Street};
use crate::utilities::Chips;
use strum::IntoEnumIterator;

/// Owns the live hand and a snapshot taken before every applied action.
#[derive(Debug, Clone)]
pub struct Recorder {
    state: HandState,
    snapshots: Vec<HandState>,
}

impl Recorder {
    pub fn new(state: HandState) -> Self {
        Self { state, snapshots: Vec::new() }
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    /// Number of actions that can be undone.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Applies `command` to a copy of the live state. The copy replaces the
    /// live state only if the action is accepted.
    pub fn apply(&mut self, command: Command) -> Result<ActionRecord> {
        let mut next = self.state.clone();
        let record = next.apply(command)?;
        self.snapshots.push(std::mem::replace(&mut self.state, next));
        Ok(record)
    }

    pub fn fold(&mut self) -> Result<ActionRecord> { self.apply(Command::Fold) }
    pub fn check(&mut self) -> Result<ActionRecord> { self.apply(Command::Check) }
    pub fn call(&mut self) -> Result<ActionRecord> { self.apply(Command::Call) }
    pub fn bet_or_raise_to(&mut self, target: Chips) -> Result<ActionRecord> { self.apply(Command::To(target)) }

    /// Restores the state from before the most recent action.
    pub fn undo(&mut self) -> Result<&HandState> {
        let previous = self.snapshots.pop().ok_or(EngineError::NothingToUndo)?;
        self.state = previous;
        log::debug!("undo, {} snapshots left", self.snapshots.len());
        Ok(&self.state)
    }

    /// Drops the hand and starts over from `state`.
    pub fn reset(&mut self, state: HandState) {
        self.state = state;
        self.snapshots.clear();
    }

    /// Every street's action line, prefixed with the street name.
    pub fn transcript(&self) -> Vec<String> {
        Street::iter()
            .map(|street| format!("{}: {}", street, self.state.line(street)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::initial_state;
    use rust_decimal_macros::dec;

    fn recorder() -> Recorder {
        Recorder::new(initial_state(6, "BTN", dec!(100)).unwrap())
    }

    #[test]
    fn undo_restores_previous_state() {
        let mut recorder = recorder();
        recorder.bet_or_raise_to(dec!(3)).unwrap();
        recorder.call().unwrap();
        assert_eq!(recorder.depth(), 2);

        let state = recorder.undo().unwrap();
        assert_eq!(state.current_bet, dec!(3));
        assert_eq!(state.actor, Some(1));
        assert_eq!(state.actions_on(Street::Pre).len(), 1);

        let state = recorder.undo().unwrap();
        assert_eq!(state.current_bet, dec!(1));
        assert_eq!(state.actor, Some(0));
        assert_eq!(recorder.undo().unwrap_err(), EngineError::NothingToUndo);
    }

    #[test]
    fn refused_actions_leave_no_snapshot() {
        let mut recorder = recorder();
        assert!(recorder.check().is_err());
        assert_eq!(recorder.depth(), 0);
        assert!(recorder.state().actions_on(Street::Pre).is_empty());
    }

    #[test]
    fn undo_across_a_street() {
        let mut recorder = Recorder::new(initial_state(2, "BB", dec!(100)).unwrap());
        recorder.call().unwrap();
        recorder.check().unwrap();
        assert_eq!(recorder.state().street, Street::Flop);
        recorder.undo().unwrap();
        assert_eq!(recorder.state().street, Street::Pre);
        assert_eq!(recorder.state().pot, dec!(0));
        assert_eq!(recorder.state().total_pot(), dec!(2));
    }

    #[test]
    fn transcript_lists_every_street() {
        let mut recorder = recorder();
        recorder.fold().unwrap();
        recorder.reset(initial_state(2, "BTN", dec!(50)).unwrap());
        assert_eq!(recorder.depth(), 0);
        recorder.call().unwrap();
        assert_eq!(
            recorder.transcript(),
            vec!["PRE: BTN Call 0.5BB", "FLOP: ", "TURN: ", "RIVER: "]
        );
    }
}

//! Read-only helpers for the recording surface: which controls are legal,
//! and which bet sizes to offer as quick picks.

use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::state::{HandState, Street, BIG_BLIND};
use crate::utilities::{fmt_bb, round_chips, Chips};

const OPEN_MULTIPLES: [Decimal; 5] = [dec!(2), dec!(2.5), dec!(3), dec!(4), dec!(5)];
const POT_FRACTIONS: [Decimal; 7] = [
    dec!(0.25),
    dec!(0.33),
    dec!(0.5),
    dec!(0.66),
    dec!(0.75),
    dec!(1.0),
    dec!(1.25),
];

/// Which action controls the current actor may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Legal {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub bet: bool,
    pub raise: bool,
}

/// Bet and raise need chips beyond the call, the same rule
/// [`HandState::bet_or_raise_to`] enforces.
pub fn legal(state: &HandState) -> Legal {
    let Some(actor) = state.actor else {
        return Legal::default();
    };
    let committed = state.committed[actor];
    let can_raise = state.stacks[actor] > state.to_call_for(actor);
    Legal {
        fold: !state.folded[actor],
        check: state.current_bet == committed,
        call: state.current_bet > committed,
        bet: state.current_bet == Decimal::ZERO && can_raise,
        raise: state.current_bet > Decimal::ZERO && can_raise,
    }
}

/// A suggested absolute bet or raise target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub label: String,
    pub to: Chips,
}

/// Suggested targets for the current actor.
///
/// Pre-flop offers multiples of the current bet level, post-flop offers pot
/// fractions. Every target is lifted to the minimum raise, so none is smaller
/// than what [`HandState::bet_or_raise_to`] would accept. Empty when the
/// actor may not bet or raise.
pub fn presets(state: &HandState) -> Vec<Preset> {
    let flags = legal(state);
    let Some(actor) = state.actor.filter(|_| flags.bet || flags.raise) else {
        return Vec::new();
    };
    let min_to = state.min_raise_to();
    let lift = |to: Chips| round_chips(min_to.map_or(to, |m| to.max(m)));

    let presets: Vec<Preset> = if state.street == Street::Pre {
        let base = if state.last_bet_to > Decimal::ZERO { state.last_bet_to } else { BIG_BLIND };
        OPEN_MULTIPLES
            .iter()
            .map(|&k| {
                let to = lift(base * k);
                Preset { label: format!("{}x ({})", k.normalize(), fmt_bb(to)), to }
            })
            .collect()
    } else {
        POT_FRACTIONS
            .iter()
            .map(|&fraction| {
                let to = lift(fraction_to(state, actor, fraction));
                let percent = (fraction * dec!(100)).round();
                Preset { label: format!("{}% ({})", percent, fmt_bb(to)), to }
            })
            .collect()
    };

    presets.into_iter().dedup_by(|a, b| a.to == b.to).collect()
}

fn fraction_to(state: &HandState, actor: usize, fraction: Decimal) -> Chips {
    round_chips(state.committed[actor] + round_chips(state.total_pot() * fraction))
}

/// Target that puts `fraction` of the whole pot (live bets included) on top
/// of what the actor has already committed.
pub fn pot_fraction_to(state: &HandState, fraction: Decimal) -> Option<Chips> {
    state.actor.map(|actor| fraction_to(state, actor, fraction))
}

/// Slider bounds `(min_to, max_to)` for the current actor. `max_to` is
/// all-in; `min_to` never exceeds it. `None` when raising is refused.
pub fn raise_range(state: &HandState) -> Option<(Chips, Chips)> {
    let flags = legal(state);
    let actor = state.actor.filter(|_| flags.bet || flags.raise)?;
    let max_to = round_chips(state.committed[actor] + state.stacks[actor]);
    let min_to = state.min_raise_to().unwrap_or(if state.street == Street::Pre {
        BIG_BLIND * dec!(2)
    } else {
        BIG_BLIND
    });
    Some((min_to.min(max_to), max_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::initial_state;

    #[test]
    fn facing_the_big_blind() {
        let state = initial_state(6, "UTG", dec!(100)).unwrap();
        assert_eq!(
            legal(&state),
            Legal { fold: true, check: false, call: true, bet: false, raise: true }
        );
    }

    #[test]
    fn nothing_is_legal_after_the_hand() {
        let mut state = initial_state(2, "BTN", dec!(100)).unwrap();
        state.fold().unwrap();
        assert!(state.is_complete());
        assert_eq!(legal(&state), Legal::default());
        assert!(presets(&state).is_empty());
        assert_eq!(raise_range(&state), None);
        assert_eq!(pot_fraction_to(&state, dec!(0.5)), None);
    }

    #[test]
    fn unopened_flop_allows_check_and_bet() {
        let mut state = initial_state(2, "BTN", dec!(100)).unwrap();
        state.play("c x").unwrap();
        let flags = legal(&state);
        assert!(flags.check && flags.bet);
        assert!(!flags.call && !flags.raise);
    }

    #[test]
    fn pre_flop_multiples() {
        let state = initial_state(6, "UTG", dec!(100)).unwrap();
        let tos: Vec<Chips> = presets(&state).iter().map(|p| p.to).collect();
        assert_eq!(tos, vec![dec!(2), dec!(2.5), dec!(3), dec!(4), dec!(5)]);
        assert_eq!(presets(&state)[1].label, "2.5x (2.5BB)");
    }

    #[test]
    fn pre_flop_multiples_respect_the_minimum_raise() {
        let mut state = initial_state(6, "UTG", dec!(100)).unwrap();
        state.bet_or_raise_to(dec!(4)).unwrap();
        // last raise was 3, so the floor is 7
        let presets = presets(&state);
        assert_eq!(presets[0].to, dec!(8));
        assert!(presets.iter().all(|p| p.to >= dec!(7)));
    }

    #[test]
    fn post_flop_pot_fractions() {
        let mut state = initial_state(2, "BTN", dec!(100)).unwrap();
        state.play("c x").unwrap();
        let presets = presets(&state);
        assert_eq!(presets.len(), 7);
        assert_eq!(presets[0].to, dec!(0.5));
        assert_eq!(presets[2].label, "50% (1BB)");
        assert_eq!(presets[6].to, dec!(2.5));
    }

    #[test]
    fn facing_a_bet_collapses_small_fractions() {
        let mut state = initial_state(2, "BTN", dec!(100)).unwrap();
        state.play("c x b1").unwrap();
        // pot 2 + bet 1; floor is 1 + 1 = 2
        let presets = presets(&state);
        let smallest = state.min_raise_to().unwrap();
        assert_eq!(smallest, dec!(2));
        assert!(presets.iter().all(|p| p.to >= smallest));
        assert!(presets.iter().tuple_windows().all(|(a, b)| a.to != b.to));
    }

    #[test]
    fn pot_fraction_includes_live_bets() {
        let state = initial_state(6, "SB", dec!(100)).unwrap();
        assert_eq!(pot_fraction_to(&state, dec!(1)), Some(dec!(1.5)));
    }

    #[test]
    fn slider_bounds() {
        let state = initial_state(6, "UTG", dec!(100)).unwrap();
        assert_eq!(raise_range(&state), Some((dec!(2), dec!(100))));

        let mut short = initial_state(2, "BTN", dec!(1.5)).unwrap();
        assert_eq!(raise_range(&short), Some((dec!(1.5), dec!(1.5))));
        short.call().unwrap();
        assert_eq!(short.actor, Some(1));
        assert_eq!(raise_range(&short), Some((dec!(1.5), dec!(1.5))));
    }

    #[test]
    fn short_stack_facing_a_raise_can_only_call_or_fold() {
        let mut state = initial_state(6, "HJ", dec!(100)).unwrap();
        state.bet_or_raise_to(dec!(10)).unwrap();
        state.set_stack(1, dec!(4)).unwrap();
        assert_eq!(state.actor, Some(1));

        let flags = legal(&state);
        assert_eq!(
            flags,
            Legal { fold: true, check: false, call: true, bet: false, raise: false }
        );
        assert!(presets(&state).is_empty());
        assert_eq!(raise_range(&state), None);
        assert!(state.bet_or_raise_to(dec!(30)).is_err());

        state.set_stack(1, dec!(10.5)).unwrap();
        assert!(legal(&state).raise);
        assert!(!presets(&state).is_empty());
    }
}

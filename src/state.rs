// Implements the betting-round state machine and its action records.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{EngineError, Result};
use crate::script::{self, Command};
use crate::seats::{index_of, seats_for, Position};
use crate::utilities::{clamp_chips, fmt_bb, round_chips, sum_chips, Card, Chips};

pub const SMALL_BLIND: Chips = dec!(0.5);
pub const BIG_BLIND: Chips = dec!(1.0);
pub const DEFAULT_STARTING_STACK: Chips = dec!(100);

/// A betting round. Streets only ever advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, EnumIter)]
pub enum Street {
    #[strum(serialize = "PRE")]
    Pre,
    #[strum(serialize = "FLOP")]
    Flop,
    #[strum(serialize = "TURN")]
    Turn,
    #[strum(serialize = "RIVER")]
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Pre => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Community cards revealed when this street begins.
    pub fn board_count(self) -> usize {
        match self {
            Street::Pre => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum ActionKind {
    #[strum(serialize = "FOLD")]
    Fold,
    #[strum(serialize = "CHECK")]
    Check,
    #[strum(serialize = "CALL")]
    Call,
    #[strum(serialize = "BET")]
    Bet,
    #[strum(serialize = "RAISE")]
    Raise,
}

/// One entry of a street's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub seat: usize,
    pub actor: Position,
    pub kind: ActionKind,
    /// Chips moved from the stack by this action.
    pub put: Option<Chips>,
    /// Commitment level reached by a bet or raise.
    pub to: Option<Chips>,
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zero = Decimal::ZERO;
        match self.kind {
            ActionKind::Fold => write!(f, "{} Fold", self.actor),
            ActionKind::Check => write!(f, "{} Check", self.actor),
            ActionKind::Call => write!(f, "{} Call {}", self.actor, fmt_bb(self.put.unwrap_or(zero))),
            ActionKind::Bet => write!(f, "{} Bet {}", self.actor, fmt_bb(self.put.unwrap_or(zero))),
            ActionKind::Raise => write!(f, "{} Raise {}", self.actor, fmt_bb(self.to.unwrap_or(zero))),
        }
    }
}

/// The full state of one recorded hand.
///
/// The state is a plain value: cloning it is the snapshot mechanism used for
/// undo.
#[derive(Debug, Clone)]
pub struct HandState {
    pub seats: Vec<Position>,
    pub hero: Option<usize>,
    pub street: Street,
    /// Chips settled from completed streets.
    pub pot: Chips,
    pub starting_stacks: Vec<Chips>,
    pub stacks: Vec<Chips>,
    pub bets: Vec<Chips>,
    pub committed: Vec<Chips>,
    pub folded: Vec<bool>,
    pub current_bet: Chips,
    pub acted: HashSet<usize>,
    pub last_bet_to: Chips,
    pub last_raise_size: Chips,
    pub aggressor: Option<usize>,
    pub actor: Option<usize>,
    pub actions: Vec<Vec<ActionRecord>>,
    pub board: Vec<Vec<Card>>,
}

pub struct HandBuilder {
    player_count: usize,
    hero: Option<String>,
    starting_stack: Chips,
    raw_starting_stacks: BTreeMap<usize, Chips>,
}

impl HandBuilder {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            hero: None,
            starting_stack: DEFAULT_STARTING_STACK,
            raw_starting_stacks: BTreeMap::new(),
        }
    }

    pub fn hero(mut self, label: &str) -> Self { self.hero = Some(label.to_string()); self }
    pub fn starting_stack(mut self, starting_stack: Chips) -> Self { self.starting_stack = starting_stack; self }
    pub fn raw_starting_stacks(mut self, raw_starting_stacks: BTreeMap<usize, Chips>) -> Self { self.raw_starting_stacks = raw_starting_stacks; self }

    pub fn build(self) -> Result<HandState> {
        let seats = seats_for(self.player_count).ok_or(EngineError::PlayerCount(self.player_count))?;
        let player_count = seats.len();

        let starting_stack = if self.starting_stack > Decimal::ZERO {
            round_chips(self.starting_stack)
        } else {
            log::warn!(
                "starting stack {} is not positive, using {}",
                self.starting_stack,
                DEFAULT_STARTING_STACK
            );
            DEFAULT_STARTING_STACK
        };
        let mut starting_stacks = vec![starting_stack; player_count];
        for (&i, &stack) in &self.raw_starting_stacks {
            if i < player_count {
                starting_stacks[i] = clamp_chips(stack);
            }
        }

        let hero = self
            .hero
            .as_deref()
            .and_then(|label| Position::from_str(label).ok())
            .and_then(|position| index_of(&seats, position));

        let mut state = HandState {
            seats,
            hero,
            street: Street::Pre,
            pot: Decimal::ZERO,
            stacks: starting_stacks.clone(),
            starting_stacks,
            bets: vec![Decimal::ZERO; player_count],
            committed: vec![Decimal::ZERO; player_count],
            folded: vec![false; player_count],
            current_bet: Decimal::ZERO,
            acted: HashSet::new(),
            last_bet_to: Decimal::ZERO,
            last_raise_size: BIG_BLIND,
            aggressor: None,
            actor: None,
            actions: vec![Vec::new(); 4],
            board: vec![Vec::new(); 4],
        };

        state.begin();
        Ok(state)
    }
}

/// Creates a hand with one shared starting stack and the blinds posted.
pub fn initial_state(player_count: usize, hero: &str, starting_stack: Chips) -> Result<HandState> {
    HandBuilder::new(player_count)
        .hero(hero)
        .starting_stack(starting_stack)
        .build()
}

impl HandState {
    fn begin(&mut self) {
        let bb = index_of(&self.seats, Position::Bb);
        let sb = if self.seats.len() == 2 {
            index_of(&self.seats, Position::Btn)
        } else {
            index_of(&self.seats, Position::Sb)
        };

        for (seat, blind) in [(sb, SMALL_BLIND), (bb, BIG_BLIND)] {
            if let Some(i) = seat {
                self.commit(i, blind);
            }
        }

        self.current_bet = self.committed.iter().copied().max().unwrap_or(Decimal::ZERO);
        self.last_bet_to = self.current_bet;
        self.last_raise_size = BIG_BLIND;
        self.aggressor = bb;

        if self.active_seats().len() <= 1 {
            self.end_hand();
            return;
        }
        self.actor = bb.and_then(|i| self.next_active(i));
        log::debug!(
            "{}-handed hand begins, {} to act",
            self.seats.len(),
            self.actor_position().map_or("nobody".to_string(), |p| p.to_string())
        );
    }

    // Moves up to `amount` from the stack into the street's bets.
    fn commit(&mut self, player_index: usize, amount: Chips) -> Chips {
        let put = clamp_chips(amount).min(self.stacks[player_index]);
        self.stacks[player_index] = clamp_chips(self.stacks[player_index] - put);
        self.bets[player_index] = round_chips(self.bets[player_index] + put);
        self.committed[player_index] = round_chips(self.committed[player_index] + put);
        put
    }

    fn record(&mut self, player_index: usize, kind: ActionKind, put: Option<Chips>, to: Option<Chips>) -> ActionRecord {
        let record = ActionRecord { seat: player_index, actor: self.seats[player_index], kind, put, to };
        log::debug!("{} {}", self.street, record);
        self.actions[self.street.index()].push(record.clone());
        record
    }

    fn actor_index(&self) -> Result<usize> {
        self.actor.ok_or(EngineError::HandComplete)
    }

    /// Seats still holding cards and chips behind.
    pub fn active_seats(&self) -> Vec<usize> {
        (0..self.seats.len())
            .filter(|&i| !self.folded[i] && self.stacks[i] > Decimal::ZERO)
            .collect()
    }

    /// First seat after `player_index`, in seating order, that can still act.
    fn next_active(&self, player_index: usize) -> Option<usize> {
        let count = self.seats.len();
        (1..=count)
            .map(|offset| (player_index + offset) % count)
            .find(|&i| !self.folded[i] && self.stacks[i] > Decimal::ZERO)
    }

    pub fn to_call_for(&self, player_index: usize) -> Chips {
        clamp_chips(self.current_bet - self.committed[player_index])
    }

    /// Chips the current actor owes, or zero once the hand is over.
    pub fn to_call(&self) -> Chips {
        self.actor.map_or(Decimal::ZERO, |i| self.to_call_for(i))
    }

    /// Smallest legal raise increment on this street.
    pub fn min_raise_increment(&self) -> Chips {
        if self.current_bet == Decimal::ZERO {
            BIG_BLIND
        } else {
            self.last_raise_size.max(BIG_BLIND)
        }
    }

    /// Smallest legal raise target, or `None` when the street is unopened
    /// and any bet size is accepted.
    pub fn min_raise_to(&self) -> Option<Chips> {
        if self.current_bet == Decimal::ZERO {
            None
        } else {
            Some(round_chips(self.last_bet_to + self.min_raise_increment()))
        }
    }

    // Public API for actions

    pub fn fold(&mut self) -> Result<ActionRecord> {
        let player_index = self.actor_index()?;
        self.folded[player_index] = true;
        let record = self.record(player_index, ActionKind::Fold, None, None);
        self.acted.insert(player_index);
        self.advance();
        Ok(record)
    }

    pub fn check(&mut self) -> Result<ActionRecord> {
        let player_index = self.actor_index()?;
        if self.committed[player_index] != self.current_bet {
            return Err(EngineError::CannotCheck { owed: self.to_call_for(player_index) });
        }
        let record = self.record(player_index, ActionKind::Check, None, None);
        self.acted.insert(player_index);
        self.advance();
        Ok(record)
    }

    /// Matches the current bet, or goes all-in for less.
    pub fn call(&mut self) -> Result<ActionRecord> {
        let player_index = self.actor_index()?;
        let need = self.to_call_for(player_index);
        if need == Decimal::ZERO {
            return Err(EngineError::NothingToCall);
        }
        let put = self.commit(player_index, need);
        let record = self.record(player_index, ActionKind::Call, Some(put), None);
        self.acted.insert(player_index);
        self.advance();
        Ok(record)
    }

    /// Bets or raises to an absolute commitment level.
    ///
    /// Targets below the minimum raise are lifted to it, and a target above
    /// the actor's stack puts the whole stack in. An unopened street accepts
    /// any positive target as the opening bet.
    pub fn bet_or_raise_to(&mut self, target: Chips) -> Result<ActionRecord> {
        let player_index = self.actor_index()?;
        let owed = self.to_call_for(player_index);
        if self.current_bet > Decimal::ZERO && self.stacks[player_index] <= owed {
            return Err(EngineError::CannotRaise { stack: self.stacks[player_index], owed });
        }

        let to = round_chips(match self.min_raise_to() {
            Some(min_to) => target.max(min_to),
            None => target,
        });
        let committed = self.committed[player_index];
        let need = to - committed;
        if need <= Decimal::ZERO {
            return Err(EngineError::EmptyRaise { to, committed });
        }

        let previous_bet = self.current_bet;
        let put = self.commit(player_index, need);
        let to = self.committed[player_index];
        let kind = if previous_bet == Decimal::ZERO { ActionKind::Bet } else { ActionKind::Raise };
        let record = self.record(player_index, kind, Some(put), Some(to));

        self.last_raise_size = round_chips(to - previous_bet).max(BIG_BLIND);
        self.last_bet_to = to;
        self.current_bet = to;
        self.aggressor = Some(player_index);

        // Action re-opens for every other seat.
        self.acted.clear();
        self.acted.insert(player_index);
        self.advance();
        Ok(record)
    }

    pub fn apply(&mut self, command: Command) -> Result<ActionRecord> {
        match command {
            Command::Fold => self.fold(),
            Command::Check => self.check(),
            Command::Call => self.call(),
            Command::To(target) => self.bet_or_raise_to(target),
        }
    }

    /// Parses and applies an action script such as `"f f r3 c c / x b2 c"`.
    pub fn play(&mut self, script: &str) -> Result<Vec<ActionRecord>> {
        script::parse(script)?
            .into_iter()
            .map(|command| self.apply(command))
            .collect()
    }

    // Round progression

    fn advance(&mut self) {
        let active = self.active_seats();
        if active.len() <= 1 {
            self.end_hand();
            return;
        }

        // Matching the bet and having acted at this level are separate
        // conditions; the big blind's pre-flop option depends on both.
        let pending = active
            .iter()
            .any(|i| self.committed[*i] != self.current_bet || !self.acted.contains(i));

        if pending {
            self.actor = self.actor.and_then(|i| self.next_active(i));
            return;
        }

        match self.street.next() {
            None => self.end_hand(),
            Some(next) => {
                self.street = next;
                self.collect_bets();
                self.actor = index_of(&self.seats, Position::Btn).and_then(|i| self.next_active(i));
                log::info!("{} begins with {} in the pot", self.street, fmt_bb(self.pot));
            }
        }
    }

    fn end_hand(&mut self) {
        self.collect_bets();
        self.actor = None;
        log::info!("hand complete on the {} with {} in the pot", self.street, fmt_bb(self.pot));
    }

    // Settles the street's bets into the pot and resets per-street fields.
    fn collect_bets(&mut self) {
        self.pot = round_chips(self.pot + sum_chips(&self.bets));
        self.bets.iter_mut().for_each(|b| *b = Decimal::ZERO);
        self.committed.iter_mut().for_each(|c| *c = Decimal::ZERO);
        self.current_bet = Decimal::ZERO;
        self.acted.clear();
        self.aggressor = None;
        self.last_bet_to = Decimal::ZERO;
        self.last_raise_size = BIG_BLIND;
    }

    // Board and stack edits made by the recording surface

    /// Records the community cards revealed on `street`.
    pub fn set_board(&mut self, street: Street, cards: &str) -> Result<()> {
        let expected = street.board_count();
        if expected == 0 {
            return Err(EngineError::Board(format!("no community cards on {}", street)));
        }
        let cards = Card::parse_cards(cards).map_err(EngineError::Board)?;
        if cards.len() != expected {
            return Err(EngineError::Board(format!(
                "{} takes {} cards, got {}",
                street,
                expected,
                cards.len()
            )));
        }
        let others = self
            .board
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != street.index())
            .flat_map(|(_, cards)| cards.iter());
        if !cards.iter().chain(others).all_unique() {
            return Err(EngineError::Board("duplicate card".to_string()));
        }
        self.board[street.index()] = cards;
        Ok(())
    }

    pub fn board_on(&self, street: Street) -> &[Card] {
        &self.board[street.index()]
    }

    /// Replaces a seat's stack. The seat's starting stack moves by the same
    /// amount so the hand's chip total stays balanced.
    ///
    /// An actor left with no chips passes the action on, and the hand ends if
    /// at most one seat can still act. A seat lifted off zero rejoins the
    /// rotation and acts when the order reaches it.
    pub fn set_stack(&mut self, player_index: usize, amount: Chips) -> Result<()> {
        if player_index >= self.seats.len() {
            return Err(EngineError::SeatIndex(player_index));
        }
        let amount = clamp_chips(amount);
        let delta = amount - self.stacks[player_index];
        self.stacks[player_index] = amount;
        self.starting_stacks[player_index] = clamp_chips(self.starting_stacks[player_index] + delta);

        if let Some(actor) = self.actor {
            if self.active_seats().len() <= 1 {
                self.end_hand();
            } else if self.stacks[actor] == Decimal::ZERO {
                log::debug!("{} has no chips left, passing the action", self.seats[actor]);
                self.advance();
            }
        }
        Ok(())
    }

    // Read-side helpers

    pub fn is_complete(&self) -> bool {
        self.actor.is_none()
    }

    pub fn actor_position(&self) -> Option<Position> {
        self.actor.map(|i| self.seats[i])
    }

    pub fn hero_position(&self) -> Option<Position> {
        self.hero.map(|i| self.seats[i])
    }

    /// Settled pot plus the bets still live on this street.
    pub fn total_pot(&self) -> Chips {
        round_chips(self.pot + sum_chips(&self.bets))
    }

    /// Chips currently accounted for: pot, stacks and street commitments.
    pub fn total_chips(&self) -> Chips {
        round_chips(self.pot + sum_chips(&self.stacks) + sum_chips(&self.committed))
    }

    pub fn starting_total(&self) -> Chips {
        sum_chips(&self.starting_stacks)
    }

    pub fn actions_on(&self, street: Street) -> &[ActionRecord] {
        &self.actions[street.index()]
    }

    /// A street's actions rendered as one line, e.g. `UTG Fold HJ Raise 2.5BB`.
    pub fn line(&self, street: Street) -> String {
        self.actions_on(street).iter().join(" ")
    }
}

//! `betkit` records a no-limit hold'em hand one action at a time.
//!
//! A [`HandState`] is created with the blinds posted and is advanced by fold,
//! check, call and bet-or-raise-to actions. After every action the state
//! names the next seat to act, settles finished streets into the pot, and
//! ends the hand once betting can no longer continue. Amounts are
//! [`rust_decimal::Decimal`] values in big blinds.

pub mod error;
pub mod history;
pub mod presets;
pub mod script;
pub mod seats;
pub mod state;
pub mod utilities;

pub use error::{EngineError, Result};
pub use history::Recorder;
pub use presets::{legal, pot_fraction_to, presets, raise_range, Legal, Preset};
pub use script::Command;
pub use seats::{seats_for, Position};
pub use state::{initial_state, ActionKind, ActionRecord, HandBuilder, HandState, Street};
pub use utilities::Chips;

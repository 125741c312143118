//! Seat labels and acting order for each supported table size.

use strum_macros::{AsRefStr, Display, EnumString};

/// A named table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
pub enum Position {
    #[strum(serialize = "UTG")]
    Utg,
    #[strum(serialize = "UTG+1")]
    Utg1,
    #[strum(serialize = "UTG+2")]
    Utg2,
    #[strum(serialize = "UTG+3")]
    Utg3,
    #[strum(serialize = "LJ")]
    Lj,
    #[strum(serialize = "HJ")]
    Hj,
    #[strum(serialize = "CO")]
    Co,
    #[strum(serialize = "BTN")]
    Btn,
    #[strum(serialize = "SB")]
    Sb,
    #[strum(serialize = "BB")]
    Bb,
}

// Generated by build.rs
include!(concat!(env!("OUT_DIR"), "/seat_rings.rs"));

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Returns the seating order for `player_count` players, or `None` when the
/// count is outside the supported range.
///
/// Sizes without a dedicated ring reuse the 10-max ring with its earliest
/// positions dropped, so the button and blinds are always present.
pub fn seats_for(player_count: usize) -> Option<Vec<Position>> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return None;
    }
    if let Some(ring) = SEAT_RINGS.get(&(player_count as u8)) {
        return Some(ring.to_vec());
    }
    let full = SEAT_RINGS.get(&(MAX_PLAYERS as u8))?;
    log::warn!(
        "no seat ring for {} players, trimming the {}-max ring",
        player_count,
        MAX_PLAYERS
    );
    Some(full[full.len() - player_count..].to_vec())
}

/// Index of `position` within `seats`.
pub fn index_of(seats: &[Position], position: Position) -> Option<usize> {
    seats.iter().position(|&p| p == position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use std::str::FromStr;

    #[test]
    fn six_max_ring() {
        let seats = seats_for(6).unwrap();
        let labels = seats.iter().map(|p| p.to_string()).join(" ");
        assert_eq!(labels, "UTG HJ CO BTN SB BB");
    }

    #[test]
    fn heads_up_has_no_small_blind_seat() {
        assert_eq!(seats_for(2).unwrap(), vec![Position::Btn, Position::Bb]);
    }

    #[test]
    fn every_size_is_unique_and_has_blinds() {
        for n in MIN_PLAYERS..=MAX_PLAYERS {
            let seats = seats_for(n).unwrap();
            assert_eq!(seats.len(), n);
            assert_eq!(seats.iter().unique().count(), n);
            assert!(seats.contains(&Position::Btn));
            assert!(seats.contains(&Position::Bb));
            if n >= 3 {
                assert!(seats.contains(&Position::Sb));
            }
        }
    }

    #[test]
    fn five_max_trims_ten_max() {
        let labels = seats_for(5).unwrap().iter().map(|p| p.to_string()).join(" ");
        assert_eq!(labels, "HJ CO BTN SB BB");
    }

    #[test]
    fn out_of_range_sizes() {
        assert!(seats_for(0).is_none());
        assert!(seats_for(1).is_none());
        assert!(seats_for(11).is_none());
    }

    #[test]
    fn labels_parse() {
        assert_eq!(Position::from_str("UTG+2").unwrap(), Position::Utg2);
        assert_eq!(Position::from_str("BTN").unwrap(), Position::Btn);
        assert!(Position::from_str("Seat9").is_err());
    }
}

//! Chip arithmetic and card notation shared across the crate.
//!
//! Every chip amount is a [`Decimal`] denominated in big blinds. Amounts are
//! rounded to two decimal places whenever they cross a mutation boundary, and
//! never allowed to go negative.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use strum_macros::{Display, EnumString};

/// A chip amount in big-blind units.
pub type Chips = Decimal;

/// Decimal places kept on every stored amount.
pub const CHIP_SCALE: u32 = 2;

/// Rounds to [`CHIP_SCALE`] places, halves away from zero.
pub fn round_chips(amount: Chips) -> Chips {
    amount.round_dp_with_strategy(CHIP_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds and clamps at zero.
pub fn clamp_chips(amount: Chips) -> Chips {
    round_chips(amount.max(Decimal::ZERO))
}

pub fn sum_chips<'a>(amounts: impl IntoIterator<Item = &'a Chips>) -> Chips {
    round_chips(amounts.into_iter().copied().sum())
}

/// Formats an amount as `3BB` / `6.5BB` / `0.25BB`.
pub fn fmt_bb(amount: Chips) -> String {
    format!("{}BB", round_chips(amount).normalize())
}

/// Card rank, parsed from the single-character board notation.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumString, Display)]
pub enum Rank {
    #[strum(serialize = "A")]
    Ace,
    #[strum(serialize = "2")]
    Deuce,
    #[strum(serialize = "3")]
    Trey,
    #[strum(serialize = "4")]
    Four,
    #[strum(serialize = "5")]
    Five,
    #[strum(serialize = "6")]
    Six,
    #[strum(serialize = "7")]
    Seven,
    #[strum(serialize = "8")]
    Eight,
    #[strum(serialize = "9")]
    Nine,
    #[strum(serialize = "T")]
    Ten,
    #[strum(serialize = "J")]
    Jack,
    #[strum(serialize = "Q")]
    Queen,
    #[strum(serialize = "K")]
    King,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumString, Display)]
pub enum Suit {
    #[strum(serialize = "c")]
    Club,
    #[strum(serialize = "d")]
    Diamond,
    #[strum(serialize = "h")]
    Heart,
    #[strum(serialize = "s")]
    Spade,
}

/// A community card recorded on the board.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Reads board cards written as `"Ah Kd 10c"`, `"Ah,Kd"` or `"AhKd7s"`.
    pub fn parse_cards(notation: &str) -> Result<Vec<Card>, String> {
        let notation = notation.replace("10", "T");
        let symbols: Vec<char> = notation
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        if symbols.len() % 2 != 0 {
            return Err(format!("incomplete card in '{}'", notation.trim()));
        }
        symbols
            .chunks(2)
            .map(|pair| {
                let rank = Rank::from_str(&pair[0].to_ascii_uppercase().to_string())
                    .map_err(|_| format!("unknown rank '{}'", pair[0]))?;
                let suit = Suit::from_str(&pair[1].to_ascii_lowercase().to_string())
                    .map_err(|_| format!("unknown suit '{}'", pair[1]))?;
                Ok(Card::new(rank, suit))
            })
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_chips(dec!(0.125)), dec!(0.13));
        assert_eq!(round_chips(dec!(2.675)), dec!(2.68));
        assert_eq!(round_chips(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn clamping_never_goes_negative() {
        assert_eq!(clamp_chips(dec!(-3.5)), Decimal::ZERO);
        assert_eq!(clamp_chips(dec!(4.333)), dec!(4.33));
    }

    #[test]
    fn bb_formatting_trims_zeros() {
        assert_eq!(fmt_bb(dec!(3.00)), "3BB");
        assert_eq!(fmt_bb(dec!(6.50)), "6.5BB");
        assert_eq!(fmt_bb(dec!(0.25)), "0.25BB");
        assert_eq!(fmt_bb(Decimal::ZERO), "0BB");
    }

    #[test]
    fn parses_board_notation() {
        let cards = Card::parse_cards("Ah kd, 10c").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Ace, Suit::Heart),
                Card::new(Rank::King, Suit::Diamond),
                Card::new(Rank::Ten, Suit::Club),
            ]
        );
        assert_eq!(Card::parse_cards("AhKd").unwrap().len(), 2);
        assert!(Card::parse_cards("Ah K").is_err());
        assert!(Card::parse_cards("Zh").is_err());
        assert_eq!(Card::parse_cards("ts").unwrap()[0].to_string(), "Ts");
    }
}

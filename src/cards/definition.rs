//! Card faces - suit, rank, and the fixed power-card effect table.
//!
//! A face is the immutable part of a card. The mutable part (face-up flag)
//! and the per-instance identity live in `Card`.

use serde::{Deserialize, Serialize};

/// One of the four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
}

impl Suit {
    /// All suits in deck-construction order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    /// Unicode symbol used in log lines.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank, Ace through King.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in deck-construction order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Penalty points this rank adds to a hand at the end of the game.
    ///
    /// Number cards count their face value, Jack and Queen count 10,
    /// the Ace counts 1 and the King counts -1.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack | Rank::Queen => 10,
            Rank::King => -1,
        }
    }

    /// The one-shot effect this rank triggers when played, if any.
    #[must_use]
    pub const fn power_effect(self) -> Option<PowerEffect> {
        match self {
            Rank::Seven | Rank::Eight => Some(PowerEffect::PeekOwn),
            Rank::Nine | Rank::Ten => Some(PowerEffect::PeekOpponent),
            Rank::Jack => Some(PowerEffect::BlindSwap),
            Rank::Queen => Some(PowerEffect::PeekAndSwap),
            Rank::Ace
            | Rank::Two
            | Rank::Three
            | Rank::Four
            | Rank::Five
            | Rank::Six
            | Rank::King => None,
        }
    }

    /// Whether this rank is a power card (7, 8, 9, 10, J, Q).
    #[must_use]
    pub const fn is_power(self) -> bool {
        self.power_effect().is_some()
    }

    /// Short label ("A", "2".."10", "J", "Q", "K").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Effects a power card can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerEffect {
    /// 7 or 8: look at one of your own cards.
    PeekOwn,
    /// 9 or 10: look at one of the opponent's cards.
    PeekOpponent,
    /// Jack: swap one own card with one opponent card without looking.
    BlindSwap,
    /// Queen: look at one own and one opponent card, then optionally swap them.
    PeekAndSwap,
}

impl PowerEffect {
    /// Human-readable description used in the game log.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            PowerEffect::PeekOwn => "may look at one of their own cards",
            PowerEffect::PeekOpponent => "may look at one of the opponent's cards",
            PowerEffect::BlindSwap => "must blindly swap a card with the opponent",
            PowerEffect::PeekAndSwap => "may look at two cards and swap them",
        }
    }
}

//! Standard 52-card deck construction.

use super::definition::{Rank, Suit};
use super::instance::{Card, CardId};

/// Number of cards in a game.
pub const DECK_SIZE: usize = 52;

/// Build the full deck, one instance per (suit, rank), ids assigned in order.
///
/// ```
/// use kaboo_engine::cards::{standard_deck, DECK_SIZE};
///
/// let deck = standard_deck();
/// assert_eq!(deck.len(), DECK_SIZE);
/// assert_eq!(deck.iter().filter(|c| c.is_power_card()).count(), 24);
/// ```
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (suit, rank)))
        .enumerate()
        .map(|(i, (suit, rank))| Card::new(CardId::new(i as u8), suit, rank))
        .collect()
}

/// The id `standard_deck` assigns to a face.
///
/// ```
/// use kaboo_engine::cards::{card_id_of, standard_deck, Rank, Suit};
///
/// let id = card_id_of(Suit::Hearts, Rank::Queen);
/// let card = &standard_deck()[id.raw() as usize];
/// assert_eq!((card.suit, card.rank), (Suit::Hearts, Rank::Queen));
/// ```
#[must_use]
pub fn card_id_of(suit: Suit, rank: Rank) -> CardId {
    let suit_index = Suit::ALL.iter().position(|&s| s == suit).unwrap_or(0);
    let rank_index = Rank::ALL.iter().position(|&r| r == rank).unwrap_or(0);
    CardId::new((suit_index * Rank::ALL.len() + rank_index) as u8)
}

//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Kaboo is strictly two-player: `PlayerId(0)` and `PlayerId(1)`.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexable by `PlayerId`.
//!
//! ## Player
//!
//! Name, 2×2 grid, drawn-card slot, and the cards seen during the opening peek.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::cards::CardId;
use crate::zones::HandPosition;

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    ///
    /// ```
    /// use kaboo_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage, one slot per seat.
///
/// ## Example
///
/// ```
/// use kaboo_engine::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i32> = PlayerMap::with_value(0);
/// scores[PlayerId::new(1)] = 14;
/// assert_eq!(scores[PlayerId::new(0)], 0);
/// assert_eq!(scores[PlayerId::new(1)], 14);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to both entries at once, `player` first.
    pub fn both_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let (first, second) = self.data.split_at_mut(1);
        if player.index() == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A seat at the table.
///
/// Grid slots are `None` only before dealing; after setup every slot holds a
/// card and swaps replace cards in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    hand: [[Option<CardId>; 2]; 2],

    /// Card held between drawing and resolving it.
    pub drawn_card: Option<CardId>,

    /// The two bottom-row cards seen during the opening peek.
    pub starting_cards: SmallVec<[CardId; 2]>,
}

impl Player {
    /// Create a player with an empty grid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Card in a grid slot.
    #[must_use]
    pub fn card_at(&self, position: HandPosition) -> Option<CardId> {
        self.hand[position.row][position.col]
    }

    /// Put a card into a grid slot, returning the card it displaced.
    pub fn set_card(&mut self, position: HandPosition, card: CardId) -> Option<CardId> {
        self.hand[position.row][position.col].replace(card)
    }

    /// Linear scan of the grid for a card instance.
    #[must_use]
    pub fn position_of(&self, card: CardId) -> Option<HandPosition> {
        HandPosition::ALL
            .into_iter()
            .find(|&pos| self.card_at(pos) == Some(card))
    }

    /// Whether the card is in this player's grid.
    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.position_of(card).is_some()
    }

    /// Cards in the grid, row-major.
    pub fn hand_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        HandPosition::ALL.into_iter().filter_map(|pos| self.card_at(pos))
    }

    /// The raw 2×2 grid.
    #[must_use]
    pub fn grid(&self) -> &[[Option<CardId>; 2]; 2] {
        &self.hand
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} cards in hand", self.name, self.hand_cards().count())
    }
}

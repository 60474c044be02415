//! Deck construction, shuffling, and dealing without replacement.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const DECK_SIZE: usize = 52;

/// An ordered sequence of unique cards. One deck is owned per hand;
/// dealing removes cards from the front and they are never re-dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 unique (suit, rank) pairs in canonical order (pre-shuffle
    /// order is unspecified by callers and never dealt from directly).
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card { suit, rank });
            }
        }
        Self { cards }
    }

    /// A fresh deck under a uniform Fisher-Yates permutation seeded from
    /// OS entropy.
    pub fn shuffled() -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(&mut rand::rng());
        deck
    }

    /// Deterministic shuffle for reproducible deals (tests, replays).
    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut deck = Self::standard();
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        deck.cards.shuffle(&mut rng);
        deck
    }

    /// Deal `n` cards from the front, mutating the remaining deck.
    ///
    /// Underflow means the engine tried to deal more cards than a hand
    /// can ever need, which is a bug rather than a user error.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DomainError> {
        if n > self.cards.len() {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("deck underflow: requested {n}, remaining {}", self.cards.len()),
            ));
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

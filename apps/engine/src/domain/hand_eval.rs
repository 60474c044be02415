//! Seven-card hand evaluation.
//!
//! Enumerates every 5-card combination of hole + community cards and keeps
//! the strongest. Each 5-card hand is reduced to a single `u32` strength
//! value: the category occupies the millions band and the tie-break ranks
//! occupy descending base-15 digits below it, so any hand of a higher
//! category outranks any hand of a lower one regardless of kickers, and
//! equal values are an exact tie.

use serde::{Deserialize, Serialize};

use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Base-15 positional weighting for tie-break ranks. The radix must
/// exceed the 13 distinct ranks so no kicker digit can carry into the
/// next position.
const KICKER_RADIX: u32 = 15;

/// Category band width. Strictly greater than the maximum kicker
/// contribution 14*(15^4+15^3+15^2+15+1) = 759_374.
const CATEGORY_MULTIPLIER: u32 = 1_000_000;

/// The ten hand categories in strictly ascending strength order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }

    fn base(self) -> u32 {
        (self as u32 + 1) * CATEGORY_MULTIPLIER
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The best 5-card hand found for a player, with its totally-ordered
/// strength value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: HandCategory,
    pub value: u32,
    pub cards: [Card; 5],
}

impl HandResult {
    /// Short human description persisted for UI display, e.g.
    /// "Straight, Five high" or "Full House, Queens over Tens".
    pub fn describe(&self) -> String {
        let values = ranks_desc(&self.cards);
        let mut counts: Vec<(u32, u32)> = Vec::new();
        for v in values {
            match counts.iter_mut().find(|(_, rank)| *rank == v) {
                Some((count, _)) => *count += 1,
                None => counts.push((1, v)),
            }
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));

        match self.category {
            HandCategory::RoyalFlush => self.category.label().to_string(),
            HandCategory::Straight | HandCategory::StraightFlush => {
                // The wheel plays ace-low; report the five as the high card.
                let top = straight_high(&values).unwrap_or(values[0]);
                format!("{}, {} high", self.category.label(), value_name(top))
            }
            HandCategory::Flush | HandCategory::HighCard => {
                format!("{}, {} high", self.category.label(), value_name(values[0]))
            }
            HandCategory::FullHouse => format!(
                "{}, {}s over {}s",
                self.category.label(),
                value_name(counts[0].1),
                value_name(counts[1].1)
            ),
            HandCategory::TwoPair => format!(
                "{}, {}s and {}s",
                self.category.label(),
                value_name(counts[0].1),
                value_name(counts[1].1)
            ),
            _ => format!("{}, {}s", self.category.label(), value_name(counts[0].1)),
        }
    }
}

fn value_name(value: u32) -> &'static str {
    match value {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        14 => "Ace",
        _ => "Unknown",
    }
}

/// Find the best 5-card hand from 2 hole cards plus the community board.
///
/// Requires at least 5 cards total; calling earlier in the hand is an
/// engine bug, not a user error.
pub fn evaluate_best(hole: &[Card], community: &[Card]) -> Result<HandResult, DomainError> {
    let all: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    if all.len() < 5 {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("hand evaluation needs at least 5 cards, got {}", all.len()),
        ));
    }
    let best = combinations_of_five(&all)
        .into_iter()
        .map(evaluate_five)
        .max_by_key(|h| h.value)
        .expect("at least one combination");
    Ok(best)
}

fn combinations_of_five(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut combos = Vec::new();
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        combos.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    combos
}

fn ranks_desc(cards: &[Card; 5]) -> [u32; 5] {
    let mut values = [0u32; 5];
    for (slot, card) in values.iter_mut().zip(cards.iter()) {
        *slot = card.rank.value();
    }
    values.sort_unstable_by(|a, b| b.cmp(a));
    values
}

/// High card of a straight, if these (descending) values form one.
/// The wheel A-2-3-4-5 counts with the ace playing low, reported as 5.
fn straight_high(values: &[u32; 5]) -> Option<u32> {
    if values.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(values[0]);
    }
    if *values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Evaluate exactly five cards.
///
/// Categories are checked in descending strength order so a hand that
/// matches several patterns reports the strongest one.
pub fn evaluate_five(cards: [Card; 5]) -> HandResult {
    let values = ranks_desc(&cards);
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&values);

    // Rank groups ordered count-major: pair/trip/quad ranks come before
    // loose kickers, then by rank within equal counts.
    let mut counts: Vec<(u32, u32)> = Vec::new(); // (count, rank value)
    for v in values {
        match counts.iter_mut().find(|(_, rank)| *rank == v) {
            Some((count, _)) => *count += 1,
            None => counts.push((1, v)),
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let (category, kickers): (HandCategory, Vec<u32>) = if let Some(high) = straight {
        if is_flush && high == 14 {
            (HandCategory::RoyalFlush, vec![high])
        } else if is_flush {
            (HandCategory::StraightFlush, vec![high])
        } else {
            (HandCategory::Straight, vec![high])
        }
    } else if counts[0].0 == 4 {
        (HandCategory::FourOfAKind, group_ranks(&counts))
    } else if counts[0].0 == 3 && counts[1].0 == 2 {
        (HandCategory::FullHouse, group_ranks(&counts))
    } else if is_flush {
        (HandCategory::Flush, values.to_vec())
    } else if counts[0].0 == 3 {
        (HandCategory::ThreeOfAKind, group_ranks(&counts))
    } else if counts[0].0 == 2 && counts[1].0 == 2 {
        (HandCategory::TwoPair, group_ranks(&counts))
    } else if counts[0].0 == 2 {
        (HandCategory::OnePair, group_ranks(&counts))
    } else {
        (HandCategory::HighCard, values.to_vec())
    };

    let mut value = category.base();
    for (i, kicker) in kickers.iter().enumerate() {
        value += kicker * KICKER_RADIX.pow(4 - i as u32);
    }

    HandResult {
        category,
        value,
        cards,
    }
}

fn group_ranks(counts: &[(u32, u32)]) -> Vec<u32> {
    counts.iter().map(|(_, rank)| *rank).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;

    fn eval(tokens: &[&str]) -> HandResult {
        let cards = parse_cards(tokens);
        evaluate_best(&cards[..2], &cards[2..]).unwrap()
    }

    #[test]
    fn wheel_is_a_straight_below_all_others() {
        // Scenario: hole A♠2♠ + board 3♠4♠5♦ must be the wheel.
        let wheel = eval(&["AS", "2S", "3S", "4S", "5D"]);
        assert_eq!(wheel.category, HandCategory::Straight);

        let six_high = eval(&["2C", "3D", "4H", "5S", "6C"]);
        assert_eq!(six_high.category, HandCategory::Straight);
        assert!(wheel.value < six_high.value, "wheel must rank lowest");

        let two_pair = eval(&["AC", "AD", "KC", "KD", "2H"]);
        assert!(wheel.value > two_pair.value);

        let flush = eval(&["2H", "5H", "7H", "9H", "JH"]);
        assert!(wheel.value < flush.value);
    }

    #[test]
    fn royal_flush_outranks_everything() {
        let royal = eval(&["AS", "KS", "QS", "JS", "TS"]);
        assert_eq!(royal.category, HandCategory::RoyalFlush);

        let straight_flush = eval(&["9S", "KS", "QS", "JS", "TS"]);
        assert_eq!(straight_flush.category, HandCategory::StraightFlush);
        assert!(royal.value > straight_flush.value);
    }

    #[test]
    fn category_precedence_reports_the_strongest_pattern() {
        // Flush that also contains a pair must report the flush.
        let hand = eval(&["2H", "2C", "5H", "7H", "9H", "JH", "3D"]);
        assert_eq!(hand.category, HandCategory::Flush);

        // Full house, not trips or a pair.
        let hand = eval(&["QH", "QC", "QD", "TH", "TC"]);
        assert_eq!(hand.category, HandCategory::FullHouse);
    }

    #[test]
    fn kicker_ordering_is_count_major() {
        // Pair of threes must beat pair of twos with an ace kicker.
        let low_pair_big_kicker = eval(&["2H", "2C", "AH", "KD", "QS"]);
        let bigger_pair = eval(&["3H", "3C", "7H", "5D", "4S"]);
        assert!(bigger_pair.value > low_pair_big_kicker.value);

        // Same pair: kicker decides.
        let ace_kicker = eval(&["8H", "8C", "AH", "5D", "4S"]);
        let king_kicker = eval(&["8S", "8D", "KH", "5C", "4C"]);
        assert!(ace_kicker.value > king_kicker.value);
    }

    #[test]
    fn two_pair_orders_high_pair_first() {
        let aces_and_twos = eval(&["AH", "AC", "2H", "2C", "5D"]);
        let kings_and_queens = eval(&["KH", "KC", "QH", "QC", "JD"]);
        assert!(aces_and_twos.value > kings_and_queens.value);
    }

    #[test]
    fn seven_card_search_finds_the_best_combination() {
        // Board makes a flush; hole cards alone only make a pair.
        let hand = eval(&["AH", "AD", "2C", "6C", "9C", "JC", "QC"]);
        assert_eq!(hand.category, HandCategory::Flush);

        // Straight hiding across hole + board.
        let hand = eval(&["9H", "TD", "JC", "QC", "KS", "2H", "2D"]);
        assert_eq!(hand.category, HandCategory::Straight);
    }

    #[test]
    fn equal_hands_tie_exactly() {
        let a = eval(&["AH", "KD", "QC", "JS", "9H"]);
        let b = eval(&["AD", "KH", "QS", "JC", "9D"]);
        assert_eq!(a.value, b.value);
    }

    #[test]
    fn category_bands_never_overlap() {
        // Max kicker load on a category stays below the next band.
        let max_kickers: u32 = (0..5).map(|i| 14 * KICKER_RADIX.pow(i)).sum();
        assert!(max_kickers < CATEGORY_MULTIPLIER);
    }

    #[test]
    fn too_few_cards_is_an_integrity_error() {
        let cards = parse_cards(&["AH", "KD"]);
        assert!(evaluate_best(&cards, &[]).is_err());
    }

    #[test]
    fn describe_reports_wheel_as_five_high() {
        let wheel = eval(&["AS", "2S", "3S", "4S", "5D"]);
        assert_eq!(wheel.describe(), "Straight, Five high");
    }
}

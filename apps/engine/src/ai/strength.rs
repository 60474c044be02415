//! Heuristic hand-strength estimate on a 0..=1 scale.
//!
//! This is intentionally coarser than `domain::hand_eval`: bots want a
//! cheap "how good is this, roughly" signal that also scores draws and
//! preflop shapes, not an exact showdown ordering.

use std::collections::HashMap;

use crate::domain::{Card, Suit};

/// Estimate hand strength from the cards a seat can see.
///
/// Preflop (no community cards) scores hole-card shape: pairs, suitedness,
/// high cards. Later streets score the made hand plus flush/straight
/// potential by suit and rank counting.
pub fn hand_strength(hole: &[Card], community: &[Card]) -> f64 {
    if hole.len() < 2 {
        return 0.3;
    }
    if community.is_empty() {
        return preflop_strength(hole);
    }

    let all: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();

    let mut rank_counts: HashMap<u32, u32> = HashMap::new();
    let mut suit_counts: HashMap<Suit, u32> = HashMap::new();
    for card in &all {
        *rank_counts.entry(card.rank.value()).or_insert(0) += 1;
        *suit_counts.entry(card.suit).or_insert(0) += 1;
    }

    let mut counts: Vec<u32> = rank_counts.values().copied().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let max_suit_count = suit_counts.values().copied().max().unwrap_or(0);

    // Made hands, strongest first.
    if counts[0] == 4 {
        return 0.95;
    }
    if counts[0] == 3 && counts.get(1).copied().unwrap_or(0) >= 2 {
        return 0.90;
    }
    if max_suit_count >= 5 {
        return 0.85;
    }

    let mut unique_ranks: Vec<u32> = rank_counts.keys().copied().collect();
    unique_ranks.sort_unstable();
    let run = longest_rank_run(&unique_ranks);
    if run >= 5 {
        return 0.80;
    }

    if counts[0] == 3 {
        return 0.75;
    }
    if counts[0] == 2 && counts.get(1).copied().unwrap_or(0) == 2 {
        return 0.65;
    }
    if run == 4 {
        return 0.55;
    }
    if counts[0] == 2 {
        return 0.50;
    }

    let high_card = unique_ranks.last().copied().unwrap_or(2);
    let high_card_strength = (high_card as f64 - 2.0) / 12.0;
    0.30 + high_card_strength * 0.2
}

fn preflop_strength(hole: &[Card]) -> f64 {
    let mut ranks = [hole[0].rank.value(), hole[1].rank.value()];
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let is_pair = ranks[0] == ranks[1];
    let is_suited = hole[0].suit == hole[1].suit;
    let is_high_cards = ranks[0] >= 11 && ranks[1] >= 11;
    let high_card_strength = (ranks[0] as f64 - 2.0) / 12.0;

    if is_pair && ranks[0] >= 10 {
        return 0.85;
    }
    if is_pair {
        return 0.60 + (ranks[0] as f64 / 14.0) * 0.2;
    }
    if is_high_cards && is_suited {
        return 0.70;
    }
    if is_high_cards {
        return 0.60;
    }
    if is_suited {
        return 0.45 + high_card_strength * 0.15;
    }
    0.30 + high_card_strength * 0.15
}

fn longest_rank_run(sorted_unique: &[u32]) -> usize {
    let mut longest = usize::from(!sorted_unique.is_empty());
    let mut current = longest;
    for pair in sorted_unique.windows(2) {
        if pair[1] == pair[0] + 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;

    fn strength(hole: &[&str], community: &[&str]) -> f64 {
        hand_strength(&parse_cards(hole), &parse_cards(community))
    }

    #[test]
    fn preflop_shapes_are_ordered() {
        let aces = strength(&["AH", "AD"], &[]);
        let low_pair = strength(&["4H", "4D"], &[]);
        let suited_broadway = strength(&["AH", "KH"], &[]);
        let offsuit_broadway = strength(&["AH", "KD"], &[]);
        let junk = strength(&["7H", "2D"], &[]);

        assert!(aces > suited_broadway);
        assert!(suited_broadway > offsuit_broadway);
        assert!(low_pair > junk);
        assert!(offsuit_broadway > junk);
        assert!(junk >= 0.3 && junk < 0.45);
    }

    #[test]
    fn made_hands_dominate_draws() {
        let quads = strength(&["AH", "AD"], &["AC", "AS", "2D"]);
        let full_house = strength(&["AH", "AD"], &["AC", "KS", "KD"]);
        let flush = strength(&["AH", "KH"], &["2H", "7H", "9H"]);
        let straight = strength(&["9H", "TD"], &["JC", "QC", "KS"]);
        let trips = strength(&["AH", "AD"], &["AC", "7S", "2D"]);
        let pair = strength(&["AH", "AD"], &["3C", "7S", "9D"]);

        assert_eq!(quads, 0.95);
        assert_eq!(full_house, 0.90);
        assert_eq!(flush, 0.85);
        assert_eq!(straight, 0.80);
        assert_eq!(trips, 0.75);
        assert_eq!(pair, 0.50);
    }

    #[test]
    fn open_ended_draw_scores_above_bare_high_card() {
        let draw = strength(&["9H", "TD"], &["JC", "QC", "2S"]);
        let nothing = strength(&["3H", "8D"], &["JC", "QC", "2S"]);
        assert_eq!(draw, 0.55);
        assert!(nothing < draw);
    }

    #[test]
    fn strength_stays_in_unit_interval() {
        let hands: [(&[&str], &[&str]); 4] = [
            (&["AH", "AD"], &[]),
            (&["2C", "7D"], &[]),
            (&["AH", "KH"], &["QH", "JH", "TH"]),
            (&["2C", "7D"], &["9H", "JS", "QD", "KC", "3S"]),
        ];
        for (hole, community) in hands {
            let s = strength(hole, community);
            assert!((0.0..=1.0).contains(&s), "strength {s} out of range");
        }
    }
}

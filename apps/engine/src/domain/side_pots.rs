//! Side-pot partitioning for hands with unequal all-in contributions.
//!
//! Eligibility is strictly bet-level-based: a player is eligible for every
//! tier whose bet level does not exceed what they contributed, regardless
//! of all-in status. Folded players are never eligible, but their chips
//! stay in the pot: each tier absorbs every contributor's share between
//! the previous level and its own, so the tiers always sum to the total
//! contributed this hand.

use serde::{Deserialize, Serialize};

use crate::domain::state::{Chips, PlayerId, PlayerStatus};

/// One player's total commitment for the hand, as seen by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub player_id: PlayerId,
    pub committed: Chips,
    pub status: PlayerStatus,
}

impl Contribution {
    fn folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }
}

/// A pot tier and the players who can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotTier {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
}

/// Partition contributions into ordered tiers (main pot first).
///
/// Walks the distinct non-folded contribution levels ascending. At each
/// level the tier amount is the sum over all contributors of the slice of
/// their commitment between the previous level and this one; eligibility
/// is recomputed fresh at each level from total contributions, never by
/// eliminating players as lower all-ins are passed.
pub fn calculate_pots(contributions: &[Contribution]) -> Vec<PotTier> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| !c.folded() && c.committed > 0)
        .map(|c| c.committed)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut tiers: Vec<PotTier> = Vec::new();
    let mut previous_level: Chips = 0;

    for level in levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.committed.min(level) - c.committed.min(previous_level))
            .sum();
        let eligible: Vec<PlayerId> = contributions
            .iter()
            .filter(|c| !c.folded() && c.committed >= level)
            .map(|c| c.player_id)
            .collect();
        if amount > 0 {
            tiers.push(PotTier { amount, eligible });
        }
        previous_level = level;
    }

    // A folded seat can have committed past the deepest non-folded level
    // (raised, then folded to a shove). Those chips belong to the last
    // contested tier.
    let folded_excess: Chips = contributions
        .iter()
        .filter(|c| c.folded())
        .map(|c| c.committed.saturating_sub(previous_level))
        .sum();
    if folded_excess > 0 {
        if let Some(last) = tiers.last_mut() {
            last.amount += folded_excess;
        }
    }

    tiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player_id: PlayerId, committed: Chips, status: PlayerStatus) -> Contribution {
        Contribution {
            player_id,
            committed,
            status,
        }
    }

    #[test]
    fn three_way_all_in_cascade() {
        let pots = calculate_pots(&[
            entry(1, 100, PlayerStatus::AllIn),
            entry(2, 200, PlayerStatus::AllIn),
            entry(3, 300, PlayerStatus::Active),
        ]);
        assert_eq!(
            pots,
            vec![
                PotTier {
                    amount: 300,
                    eligible: vec![1, 2, 3]
                },
                PotTier {
                    amount: 200,
                    eligible: vec![2, 3]
                },
                PotTier {
                    amount: 100,
                    eligible: vec![3]
                },
            ]
        );
    }

    #[test]
    fn equal_bets_make_a_single_pot() {
        let pots = calculate_pots(&[
            entry(1, 80, PlayerStatus::Active),
            entry(2, 80, PlayerStatus::Active),
            entry(3, 80, PlayerStatus::Active),
        ]);
        assert_eq!(
            pots,
            vec![PotTier {
                amount: 240,
                eligible: vec![1, 2, 3]
            }]
        );
    }

    #[test]
    fn short_all_in_against_one_large_bet() {
        let pots = calculate_pots(&[
            entry(1, 80, PlayerStatus::AllIn),
            entry(2, 80, PlayerStatus::AllIn),
            entry(3, 980, PlayerStatus::Active),
        ]);
        assert_eq!(
            pots,
            vec![
                PotTier {
                    amount: 240,
                    eligible: vec![1, 2, 3]
                },
                PotTier {
                    amount: 900,
                    eligible: vec![3]
                },
            ]
        );
    }

    #[test]
    fn folded_chips_stay_in_the_pot_but_never_earn_eligibility() {
        // Seat 1 called 20 preflop then folded on the flop.
        let pots = calculate_pots(&[
            entry(1, 20, PlayerStatus::Folded),
            entry(2, 120, PlayerStatus::Active),
            entry(3, 120, PlayerStatus::Active),
        ]);
        assert_eq!(
            pots,
            vec![
                PotTier {
                    amount: 60,
                    eligible: vec![2, 3]
                },
                PotTier {
                    amount: 200,
                    eligible: vec![2, 3]
                },
            ]
        );
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 260);
    }

    #[test]
    fn folded_overcommitment_lands_in_the_last_tier() {
        // Seat 1 raised to 700 and folded to a shove settled at 600.
        let pots = calculate_pots(&[
            entry(1, 700, PlayerStatus::Folded),
            entry(2, 600, PlayerStatus::AllIn),
            entry(3, 300, PlayerStatus::AllIn),
        ]);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 900);
        assert_eq!(pots[0].eligible, vec![2, 3]);
        assert_eq!(pots[1].amount, 700);
        assert_eq!(pots[1].eligible, vec![2]);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 700 + 600 + 300);
    }

    #[test]
    fn eligibility_is_monotonic_across_tiers() {
        let pots = calculate_pots(&[
            entry(1, 50, PlayerStatus::AllIn),
            entry(2, 150, PlayerStatus::AllIn),
            entry(3, 400, PlayerStatus::Active),
            entry(4, 400, PlayerStatus::Active),
        ]);
        for pair in pots.windows(2) {
            for id in &pair[1].eligible {
                assert!(pair[0].eligible.contains(id));
            }
        }
    }

    #[test]
    fn everyone_folded_or_zero_yields_no_tiers() {
        assert!(calculate_pots(&[]).is_empty());
        assert!(calculate_pots(&[entry(1, 0, PlayerStatus::Active)]).is_empty());
    }
}

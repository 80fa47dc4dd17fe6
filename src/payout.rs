//! Showdown ranking and side-pot settlement.
//!
//! The round hands this module the per-seat stakes and the ranked payout
//! tiers; the arithmetic here decides who takes which chips. A tier is one
//! group of equally strong hands, tiers ordered best-first.

/// Group scored seats into payout tiers, best score first.
///
/// The sort is stable, so seats with equal scores keep their input order
/// inside a tier; that order also decides who takes an odd chip.
pub fn rank_tiers(scored: &[(usize, u64)]) -> Vec<Vec<usize>> {
    let mut ordered = scored.to_vec();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let mut tiers: Vec<Vec<usize>> = Vec::new();
    let mut last_score = None;
    for (seat, score) in ordered {
        match last_score {
            Some(prev) if prev == score => {
                if let Some(tier) = tiers.last_mut() {
                    tier.push(seat);
                }
            }
            _ => tiers.push(vec![seat]),
        }
        last_score = Some(score);
    }
    tiers
}

/// Distribute every staked chip across the ranked tiers.
///
/// Tier by tier, each member collects from every seat's remaining stake at
/// most its own remaining stake, so a short-stacked winner is capped at what
/// each opponent actually matched and the excess rolls to the next tier.
/// Within a tier the collected chips split equally level by level, odd chips
/// going to the earliest-ranked member. Chips no tier can claim return to
/// their contributor as an uncalled refund.
///
/// `stakes` covers every seat, folded seats included (their chips are dead
/// money the winners collect). Returns the gain per seat, refunds included;
/// the gains always sum to the stakes.
pub fn distribute(stakes: &[u64], tiers: &[Vec<usize>]) -> Vec<u64> {
    let mut remaining = stakes.to_vec();
    let mut gains = vec![0u64; stakes.len()];

    for tier in tiers {
        let frozen = remaining.clone();

        // Contribution levels are the tier members' own caps.
        let mut levels: Vec<u64> =
            tier.iter().map(|&seat| frozen[seat]).filter(|&cap| cap > 0).collect();
        levels.sort_unstable();
        levels.dedup();
        if levels.is_empty() {
            continue;
        }

        let mut prev = 0u64;
        for &level in &levels {
            // Members whose own stake reaches this level share its slice.
            let eligible: Vec<usize> =
                tier.iter().copied().filter(|&seat| frozen[seat] >= level).collect();
            let amount: u64 =
                frozen.iter().map(|&stake| stake.min(level) - stake.min(prev)).sum();
            prev = level;
            if amount == 0 || eligible.is_empty() {
                continue;
            }
            let share = amount / eligible.len() as u64;
            let mut odd = (amount % eligible.len() as u64) as usize;
            for &seat in &eligible {
                let mut won = share;
                if odd > 0 {
                    won += 1;
                    odd -= 1;
                }
                gains[seat] += won;
            }
        }

        // Everything up to the tier's highest cap has been claimed.
        let cap = levels[levels.len() - 1];
        for (seat, rem) in remaining.iter_mut().enumerate() {
            *rem -= frozen[seat].min(cap);
        }
    }

    // Uncalled surplus goes back to whoever staked it.
    for (seat, rem) in remaining.iter().enumerate() {
        if *rem > 0 {
            log::debug!("refunding {rem} uncalled chips to seat {seat}");
            gains[seat] += rem;
        }
    }
    gains
}

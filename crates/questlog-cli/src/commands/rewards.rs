use std::collections::BTreeSet;

use questlog_core::gamify::{RewardPools, RewardTier};

use super::{open_store, CliResult};

pub fn run() -> CliResult {
    let db = open_store()?;
    let pools = RewardPools::default();

    // Unlocks live on the units that earned them; merge them for display.
    let mut unlocked: BTreeSet<String> = BTreeSet::new();
    for skill in db.list_skills()? {
        unlocked.extend(skill.progress.rewards_unlocked);
    }
    if let Some(diss) = db.get_dissertation()? {
        unlocked.extend(diss.progress.rewards_unlocked);
    }

    for tier in RewardTier::ALL {
        let label = match tier {
            RewardTier::Small => "Small (level 3+)",
            RewardTier::Medium => "Medium (level 5+)",
            RewardTier::Large => "Large (level 10+)",
        };
        println!("{label}");
        for reward in pools.tier(tier) {
            let mark = if unlocked.contains(reward) { "x" } else { " " };
            println!("  [{mark}] {reward}");
        }
    }
    Ok(())
}

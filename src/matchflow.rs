use crate::config::{RankingConfig, Sizing};
use crate::pool::Pool;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle, then stable-sort by view count so least-viewed items come first
/// and items with equal counts stay in random order.
pub fn shuffle_by_views<R: Rng + ?Sized>(pool: &Pool, indices: &mut [usize], rng: &mut R) {
    indices.shuffle(rng);
    indices.sort_by_key(|&index| pool.viewed(index));
}

/// Order for a new sweep over every unranked item.
pub fn new_sweep<R: Rng + ?Sized>(pool: &Pool, rng: &mut R) -> Vec<usize> {
    let mut sweep = pool.unranked();
    shuffle_by_views(pool, &mut sweep, rng);
    sweep
}

/// Take up to `display` unranked items off the front of `remaining`.
///
/// Returns fewer than `display` items when the sweep runs out.
pub fn deal_sweep_batch(pool: &Pool, remaining: &mut Vec<usize>, display: usize) -> Vec<usize> {
    remaining.retain(|&index| !pool.is_ranked(index));
    let take = display.min(remaining.len());
    remaining.drain(..take).collect()
}

/// Draw a qualification batch from items that already hold picks.
///
/// `None` when no item qualifies.
pub fn deal_qualification_batch<R: Rng + ?Sized>(
    pool: &Pool,
    config: &RankingConfig,
    rng: &mut R,
) -> Option<Vec<usize>> {
    let mut qualified = pool.qualified();
    if qualified.is_empty() {
        return None;
    }
    shuffle_by_views(pool, &mut qualified, rng);

    let upper = config.qualification_max_batch.min(qualified.len());
    let size = if upper < config.qualification_min_batch {
        upper
    } else {
        rng.gen_range(config.qualification_min_batch..=upper)
    };

    qualified.truncate(size);
    Some(qualified)
}

/// How many of `batch_len` displayed items may be picked.
pub fn selectable_for(qualification: bool, sizing: Sizing, batch_len: usize) -> usize {
    let leave_one = batch_len.saturating_sub(1).max(1);
    if qualification {
        leave_one
    } else {
        sizing.selectable.min(leave_one).max(1)
    }
}

pub fn mark_displayed(pool: &mut Pool, batch: &[usize]) {
    for &index in batch {
        pool.mark_viewed(index);
    }
}

use crate::pool::Pool;

/// Add one point to each picked item and promote the ones reaching
/// `threshold`.
///
/// `selected` must be a subset of `displayed`; picks of items that are already
/// promoted are ignored. Newly promoted items join the ranked list after the
/// existing entries in `displayed` order, and the whole list is renumbered so
/// the negative scores stay `-1..=-k`. Returns the newly promoted indices.
pub fn apply_selection(
    pool: &mut Pool,
    displayed: &[usize],
    selected: &[usize],
    threshold: i32,
) -> Vec<usize> {
    let mut promoted = Vec::new();

    for &index in displayed {
        if !selected.contains(&index) {
            continue;
        }
        let Some(item) = pool.get_mut(index) else {
            continue;
        };
        if item.score < 0 {
            continue;
        }
        item.score += 1;
        if item.score >= threshold {
            promoted.push(index);
        }
    }

    if !promoted.is_empty() {
        let mut ranked = pool.ranked();
        ranked.extend(promoted.iter().copied());
        for (position, &index) in ranked.iter().enumerate() {
            if let Some(item) = pool.get_mut(index) {
                item.score = -(position as i32 + 1);
            }
        }
    }

    promoted
}

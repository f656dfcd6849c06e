use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One image of the album being ranked.
///
/// `score` is `0` while untouched, `1..threshold` while collecting picks, and
/// `-rank` once promoted (rank 1 is the best).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub display_ref: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub viewed: u32,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            display_ref: display_ref.into(),
            description: None,
            score: 0,
            viewed: 0,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.score < 0
    }

    /// Position in the final ranking, 1-based.
    pub fn rank(&self) -> Option<u32> {
        if self.score < 0 {
            Some(self.score.unsigned_abs())
        } else {
            None
        }
    }
}

/// Every item of a session, stored once. Other components refer to items by
/// their index in this arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Pool {
    pub fn new(items: Vec<Item>) -> Self {
        let mut pool = Self::default();
        for item in items {
            if pool.index.contains_key(&item.id) {
                warn!("Dropping duplicate pool item {}", item.id);
                continue;
            }
            pool.index.insert(item.id.clone(), pool.items.len());
            pool.items.push(item);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn score(&self, index: usize) -> i32 {
        self.items.get(index).map_or(0, |item| item.score)
    }

    pub fn viewed(&self, index: usize) -> u32 {
        self.items.get(index).map_or(0, |item| item.viewed)
    }

    pub fn is_ranked(&self, index: usize) -> bool {
        self.score(index) < 0
    }

    /// Promoted items, best first.
    pub fn ranked(&self) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].score < 0)
            .collect();
        ranked.sort_by_key(|&i| std::cmp::Reverse(self.items[i].score));
        ranked
    }

    pub fn unranked(&self) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&i| self.items[i].score >= 0)
            .collect()
    }

    /// Items with at least one pick that are not promoted yet.
    pub fn qualified(&self) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&i| self.items[i].score > 0)
            .collect()
    }

    pub fn ranked_count(&self) -> usize {
        self.items.iter().filter(|item| item.score < 0).count()
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(Item::is_ranked)
    }

    pub fn mark_viewed(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.viewed = item.viewed.saturating_add(1);
        }
    }

    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.score = 0;
            item.viewed = 0;
        }
    }

    /// True when the negative scores are exactly `-1..=-k`.
    pub fn ranks_are_contiguous(&self) -> bool {
        let mut ranks: Vec<u32> = self.items.iter().filter_map(Item::rank).collect();
        ranks.sort_unstable();
        ranks
            .iter()
            .enumerate()
            .all(|(position, &rank)| rank as usize == position + 1)
    }

    /// Renumber promoted items `-1..=-k` keeping their current order.
    pub fn compact_ranks(&mut self) {
        let ranked = self.ranked();
        for (position, index) in ranked.into_iter().enumerate() {
            self.items[index].score = -(position as i32 + 1);
        }
    }
}

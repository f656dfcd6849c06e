use crate::config::{ConfigError, RankingConfig, Sizing};
use crate::matchflow::{
    deal_qualification_batch, deal_sweep_batch, mark_displayed, new_sweep, selectable_for,
};
use crate::pool::{Item, ItemId, Pool};
use crate::ranking::apply_selection;
use crate::storage::{SessionSnapshot, SnapshotError, SNAPSHOT_VERSION};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

const SNAPSHOT_KEY_PREFIX: &str = "ranking-session:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InitialSweep,
    Qualification,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionMeta {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub album_id: String,
    pub ranking_id: Option<String>,
}

impl SessionMeta {
    pub fn for_album(album_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            album_id: album_id.into(),
            ..Self::default()
        }
    }
}

/// What the editor was opened on: a fresh album or a previously saved ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionTarget {
    Album(String),
    Ranking(String),
}

impl SessionTarget {
    pub fn id(&self) -> &str {
        match self {
            Self::Album(id) | Self::Ranking(id) => id,
        }
    }

    pub fn snapshot_key(&self) -> String {
        format!("{}{}", SNAPSHOT_KEY_PREFIX, self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(Vec<ItemId>),
    /// Move on without picking anything.
    Pass,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Snapshot,
    ClearSnapshot,
    Promoted(Vec<ItemId>),
    Completed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("pick at least one image")]
    Empty,
    #[error("{picked} images picked but only {allowed} allowed this round")]
    TooMany { picked: usize, allowed: usize },
    #[error("image {0} is not part of the current round")]
    NotDisplayed(ItemId),
    #[error("every image is already ranked")]
    Finished,
}

/// One ranking run over an album.
///
/// Items live once in the pool; the current round and the rest of the sweep
/// are index lists into it, and the ranked list is read off the scores.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSession {
    meta: SessionMeta,
    config: RankingConfig,
    pool: Pool,
    displayed: Vec<usize>,
    remaining: Vec<usize>,
    round: u32,
    sizing: Sizing,
    max_selectable: usize,
    phase: Phase,
}

impl RankingSession {
    /// Start ranking `items`. Items may already carry progress (scores and
    /// view counts from a saved ranking); gaps in their ranks are closed.
    pub fn new<R: Rng + ?Sized>(
        meta: SessionMeta,
        items: Vec<Item>,
        config: RankingConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut pool = Pool::new(items);
        pool.compact_ranks();
        let sizing = config.sizing_for(pool.len());
        let remaining = new_sweep(&pool, rng);

        let mut session = Self {
            meta,
            config,
            pool,
            displayed: Vec::new(),
            remaining,
            round: 0,
            sizing,
            max_selectable: 0,
            phase: Phase::InitialSweep,
        };
        session.deal_next(rng);
        Ok(session)
    }

    /// Rebuild a session from a local snapshot. Derived fields are recomputed
    /// from the items; the stored round is shown again as-is.
    pub fn from_snapshot<R: Rng + ?Sized>(
        snapshot: SessionSnapshot,
        config: RankingConfig,
        rng: &mut R,
    ) -> Result<Self, SnapshotError> {
        config.validate()?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(snapshot.version));
        }
        if snapshot.items.is_empty() {
            return Err(SnapshotError::Empty);
        }
        let pool = Pool::new(snapshot.items);
        if !pool.ranks_are_contiguous() {
            return Err(SnapshotError::Ranks);
        }

        let mut seen = HashSet::new();
        let mut resolve = |ids: &[ItemId]| -> Vec<usize> {
            ids.iter()
                .filter_map(|id| pool.position(id))
                .filter(|&index| !pool.is_ranked(index) && seen.insert(index))
                .collect()
        };
        let displayed = resolve(&snapshot.displayed);
        let remaining = resolve(&snapshot.remaining);

        let phase = if pool.is_complete() {
            Phase::Complete
        } else if snapshot.is_qualification_phase {
            Phase::Qualification
        } else {
            Phase::InitialSweep
        };
        let sizing = config.sizing_for(pool.len());

        let mut session = Self {
            meta: snapshot.meta,
            config,
            pool,
            displayed,
            remaining,
            round: snapshot.round,
            sizing,
            max_selectable: 0,
            phase,
        };

        if session.phase == Phase::Complete {
            session.displayed.clear();
            session.remaining.clear();
        } else if session.displayed.is_empty() {
            session.deal_next(rng);
        } else {
            session.max_selectable = selectable_for(
                session.phase == Phase::Qualification,
                session.sizing,
                session.displayed.len(),
            );
        }
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let ids = |indices: &[usize]| -> Vec<ItemId> {
            indices
                .iter()
                .filter_map(|&index| self.pool.get(index))
                .map(|item| item.id.clone())
                .collect()
        };
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            meta: self.meta.clone(),
            items: self.pool.items().to_vec(),
            displayed: ids(&self.displayed),
            remaining: ids(&self.remaining),
            round: self.round,
            is_qualification_phase: self.is_qualification_phase(),
            max_selectable: self.max_selectable,
            initial_display_count: self.sizing.display,
        }
    }

    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: Event,
        rng: &mut R,
    ) -> Result<Vec<Effect>, SelectionError> {
        match event {
            Event::Select(ids) => self.select(ids, rng),
            Event::Pass => {
                if self.phase == Phase::Complete {
                    return Err(SelectionError::Finished);
                }
                self.deal_next(rng);
                Ok(self.closing_effects(Vec::new()))
            }
            Event::Reset => {
                self.pool.reset();
                self.phase = Phase::InitialSweep;
                self.round = 0;
                self.displayed.clear();
                self.remaining = new_sweep(&self.pool, rng);
                self.deal_next(rng);
                Ok(vec![Effect::ClearSnapshot])
            }
        }
    }

    fn select<R: Rng + ?Sized>(
        &mut self,
        ids: Vec<ItemId>,
        rng: &mut R,
    ) -> Result<Vec<Effect>, SelectionError> {
        if self.phase == Phase::Complete {
            return Err(SelectionError::Finished);
        }

        let mut picked = Vec::with_capacity(ids.len());
        for id in ids {
            let index = self
                .pool
                .position(&id)
                .filter(|index| self.displayed.contains(index))
                .ok_or_else(|| SelectionError::NotDisplayed(id.clone()))?;
            if !picked.contains(&index) {
                picked.push(index);
            }
        }
        if picked.is_empty() {
            return Err(SelectionError::Empty);
        }
        if picked.len() > self.max_selectable {
            return Err(SelectionError::TooMany {
                picked: picked.len(),
                allowed: self.max_selectable,
            });
        }

        let promoted = apply_selection(
            &mut self.pool,
            &self.displayed,
            &picked,
            self.config.promote_threshold,
        );

        let mut effects = Vec::new();
        if !promoted.is_empty() {
            let ids = promoted
                .iter()
                .filter_map(|&index| self.pool.get(index))
                .map(|item| item.id.clone())
                .collect();
            effects.push(Effect::Promoted(ids));
        }

        self.deal_next(rng);
        Ok(self.closing_effects(effects))
    }

    fn closing_effects(&self, mut effects: Vec<Effect>) -> Vec<Effect> {
        effects.push(Effect::Snapshot);
        if self.phase == Phase::Complete {
            effects.push(Effect::Completed);
        }
        effects
    }

    fn deal_next<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.displayed.clear();

        loop {
            if self.pool.is_complete() {
                self.phase = Phase::Complete;
                self.remaining.clear();
                self.max_selectable = 0;
                return;
            }

            if self.phase == Phase::Qualification {
                if let Some(batch) = deal_qualification_batch(&self.pool, &self.config, rng) {
                    self.show(batch);
                    return;
                }
                debug!("No qualified images left, sweeping unranked images again");
                self.phase = Phase::InitialSweep;
                self.round = 1;
                self.remaining = new_sweep(&self.pool, rng);
            }

            let batch = deal_sweep_batch(&self.pool, &mut self.remaining, self.sizing.display);
            if !batch.is_empty() {
                self.show(batch);
                return;
            }

            self.round += 1;
            if self.ready_for_qualification() {
                debug!("Entering qualification after {} sweeps", self.round);
                self.phase = Phase::Qualification;
                continue;
            }
            self.remaining = new_sweep(&self.pool, rng);
        }
    }

    fn ready_for_qualification(&self) -> bool {
        self.round >= self.config.required_sweeps
            && self
                .pool
                .unranked()
                .into_iter()
                .all(|index| self.pool.viewed(index) >= self.config.qualification_min_views)
    }

    fn show(&mut self, batch: Vec<usize>) {
        mark_displayed(&mut self.pool, &batch);
        self.max_selectable =
            selectable_for(self.phase == Phase::Qualification, self.sizing, batch.len());
        self.displayed = batch;
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut SessionMeta {
        &mut self.meta
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn items(&self) -> &[Item] {
        self.pool.items()
    }

    pub fn displayed_items(&self) -> Vec<&Item> {
        self.collect(&self.displayed)
    }

    pub fn remaining_items(&self) -> Vec<&Item> {
        self.collect(&self.remaining)
    }

    /// Promoted items, best first.
    pub fn ranked_items(&self) -> Vec<&Item> {
        self.collect(&self.pool.ranked())
    }

    fn collect(&self, indices: &[usize]) -> Vec<&Item> {
        indices
            .iter()
            .filter_map(|&index| self.pool.get(index))
            .collect()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_selectable(&self) -> usize {
        self.max_selectable
    }

    pub fn display_count(&self) -> usize {
        self.sizing.display
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_qualification_phase(&self) -> bool {
        self.phase == Phase::Qualification
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// `(ranked, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.pool.ranked_count(), self.pool.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                Item::new(format!("img-{i}"), format!("Image {i}"), format!("/uploads/{i}.png"))
            })
            .collect()
    }

    fn session(count: usize, seed: u64) -> (RankingSession, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let session = RankingSession::new(
            SessionMeta::for_album("album-1", "Test album"),
            items(count),
            RankingConfig::default(),
            &mut rng,
        )
        .unwrap();
        (session, rng)
    }

    fn displayed_ids(session: &RankingSession) -> Vec<ItemId> {
        session
            .displayed_items()
            .into_iter()
            .map(|item| item.id.clone())
            .collect()
    }

    fn random_pick(session: &RankingSession, rng: &mut StdRng) -> Vec<ItemId> {
        let mut ids = displayed_ids(session);
        ids.shuffle(rng);
        let count = rng.gen_range(1..=session.max_selectable());
        ids.truncate(count);
        ids
    }

    #[test]
    fn first_round_uses_sizing_table() {
        let (small, _) = session(20, 1);
        assert_eq!(small.display_count(), 2);
        assert_eq!(small.displayed_items().len(), 2);
        assert_eq!(small.max_selectable(), 1);

        let (medium, _) = session(21, 1);
        assert_eq!(medium.display_count(), 6);
        assert_eq!(medium.displayed_items().len(), 6);
        assert_eq!(medium.max_selectable(), 5);
        assert_eq!(medium.remaining_items().len(), 15);
        assert_eq!(medium.phase(), Phase::InitialSweep);
        assert_eq!(medium.round(), 0);
    }

    #[test]
    fn displayed_items_are_counted_at_display_time() {
        let (session, _) = session(5, 3);
        for item in session.items() {
            let shown = session.displayed_items().iter().any(|d| d.id == item.id);
            assert_eq!(item.viewed, u32::from(shown));
        }
    }

    #[test]
    fn selection_is_validated() {
        let (mut session, mut rng) = session(20, 4);
        assert_eq!(
            session.apply(Event::Select(vec![]), &mut rng),
            Err(SelectionError::Empty)
        );

        let shown = displayed_ids(&session);
        assert_eq!(
            session.apply(Event::Select(shown.clone()), &mut rng),
            Err(SelectionError::TooMany {
                picked: 2,
                allowed: 1
            })
        );

        let hidden = session
            .items()
            .iter()
            .find(|item| !shown.contains(&item.id))
            .map(|item| item.id.clone())
            .unwrap();
        assert_eq!(
            session.apply(Event::Select(vec![hidden.clone()]), &mut rng),
            Err(SelectionError::NotDisplayed(hidden))
        );

        let twice = vec![shown[0].clone(), shown[0].clone()];
        let effects = session.apply(Event::Select(twice), &mut rng).unwrap();
        assert_eq!(effects, vec![Effect::Snapshot]);
    }

    #[test]
    fn small_pool_promotes_favourite_first() {
        let (mut session, mut rng) = session(20, 11);
        let favourite = ItemId::new("img-7");
        let mut promoted_at = None;

        for step in 0..500 {
            if session.pool().is_ranked(session.pool().position(&favourite).unwrap()) {
                promoted_at = Some(step);
                break;
            }
            let event = if displayed_ids(&session).contains(&favourite) {
                Event::Select(vec![favourite.clone()])
            } else {
                Event::Pass
            };
            session.apply(event, &mut rng).unwrap();
        }

        assert!(promoted_at.is_some());
        let item = &session.items()[session.pool().position(&favourite).unwrap()];
        assert_eq!(item.score, -1);
        assert_eq!(session.ranked_items()[0].id, favourite);

        for _ in 0..100 {
            assert!(!displayed_ids(&session).contains(&favourite));
            session.apply(Event::Pass, &mut rng).unwrap();
        }
    }

    #[test]
    fn passing_forever_never_deadlocks() {
        let (mut session, mut rng) = session(20, 5);
        for _ in 0..300 {
            let effects = session.apply(Event::Pass, &mut rng).unwrap();
            assert_eq!(effects, vec![Effect::Snapshot]);
            assert_eq!(session.displayed_items().len(), 2);
            assert_eq!(session.phase(), Phase::InitialSweep);
            // Reaching the second sweep falls straight back to round 1.
            assert!(session.round() <= 1);
        }
        assert!(session.items().iter().all(|item| item.score == 0));
        let views: u32 = session.items().iter().map(|item| item.viewed).sum();
        assert_eq!(views, 301 * 2);
    }

    #[test]
    fn qualification_follows_two_sweeps() {
        let (mut session, mut rng) = session(6, 8);
        // 3 pairs per sweep; picking keeps positives around for qualification.
        for _ in 0..6 {
            let pick = displayed_ids(&session)[0].clone();
            session.apply(Event::Select(vec![pick]), &mut rng).unwrap();
        }
        assert_eq!(session.phase(), Phase::Qualification);
        assert_eq!(session.round(), 2);
        let shown = session.displayed_items();
        assert!(shown.iter().all(|item| item.score > 0));
        assert!((2..=4).contains(&shown.len()));
        assert_eq!(session.max_selectable(), shown.len() - 1);
    }

    #[test]
    fn drained_qualification_sweeps_again() {
        let (session, mut rng) = session(6, 30);
        let mut snapshot = session.snapshot();
        for (i, item) in snapshot.items.iter_mut().enumerate() {
            item.score = if i < 2 { 4 } else { 0 };
            item.viewed = 2;
        }
        snapshot.displayed.clear();
        snapshot.round = 2;
        snapshot.is_qualification_phase = true;
        let mut session =
            RankingSession::from_snapshot(snapshot, RankingConfig::default(), &mut rng).unwrap();
        assert_eq!(session.phase(), Phase::Qualification);
        assert_eq!(session.displayed_items().len(), 2);

        let first = displayed_ids(&session)[0].clone();
        let effects = session.apply(Event::Select(vec![first.clone()]), &mut rng).unwrap();
        assert_eq!(effects, vec![Effect::Promoted(vec![first]), Effect::Snapshot]);
        assert_eq!(session.phase(), Phase::Qualification);
        assert_eq!(session.displayed_items().len(), 1);
        assert_eq!(session.max_selectable(), 1);

        let last = displayed_ids(&session)[0].clone();
        session.apply(Event::Select(vec![last]), &mut rng).unwrap();
        assert_eq!(session.phase(), Phase::InitialSweep);
        assert_eq!(session.round(), 1);
        assert_eq!(session.progress(), (2, 6));
        assert_eq!(session.displayed_items().len(), 2);
        assert!(session.displayed_items().iter().all(|item| item.score == 0));

        // One more finished sweep qualifies the new favourite.
        let favourite = displayed_ids(&session)[0].clone();
        session.apply(Event::Select(vec![favourite.clone()]), &mut rng).unwrap();
        assert_eq!(session.phase(), Phase::InitialSweep);
        session.apply(Event::Pass, &mut rng).unwrap();
        assert_eq!(session.phase(), Phase::Qualification);
        assert_eq!(session.round(), 2);
        assert_eq!(displayed_ids(&session), vec![favourite]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut config = RankingConfig::default();
        config.brackets[0].display = 0;
        assert_eq!(
            RankingSession::new(SessionMeta::default(), items(4), config.clone(), &mut rng)
                .map(|_| ()),
            Err(ConfigError::BadBracket(0))
        );

        let (session, _) = session(4, 2);
        assert_eq!(
            RankingSession::from_snapshot(session.snapshot(), config, &mut rng).map(|_| ()),
            Err(SnapshotError::Config(ConfigError::BadBracket(0)))
        );
    }

    #[test]
    fn random_play_keeps_invariants_and_completes() {
        for (count, seed) in [(13usize, 21u64), (30, 22), (2, 23), (1, 24)] {
            let (mut session, mut rng) = session(count, seed);
            let mut steps = 0;

            while !session.is_complete() {
                steps += 1;
                assert!(steps < 20_000, "pool of {count} did not finish");

                let before: Vec<Item> = session.items().to_vec();
                let pick = random_pick(&session, &mut rng);
                session.apply(Event::Select(pick), &mut rng).unwrap();

                assert!(session.pool().ranks_are_contiguous());
                let shown = displayed_ids(&session);
                for (old, new) in before.iter().zip(session.items()) {
                    let expected = u32::from(shown.contains(&new.id));
                    assert_eq!(new.viewed, old.viewed + expected);
                    if old.score < 0 {
                        assert_eq!(new.score, old.score);
                    } else {
                        let step = new.score - old.score;
                        assert!(new.score < 0 || step == 0 || step == 1);
                    }
                }
                assert_eq!(session.is_complete(), session.pool().is_complete());
            }

            assert!(session.items().iter().all(|item| item.score < 0));
            assert_eq!(session.ranked_items().len(), count);
            assert!(session.displayed_items().is_empty());
            assert_eq!(
                session.apply(Event::Pass, &mut rng),
                Err(SelectionError::Finished)
            );
        }
    }

    #[test]
    fn completion_is_reported_once_reached() {
        let (mut session, mut rng) = session(1, 2);
        let only = displayed_ids(&session);
        for _ in 0..4 {
            session
                .apply(Event::Select(only.clone()), &mut rng)
                .unwrap();
        }
        let effects = session.apply(Event::Select(only.clone()), &mut rng).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::Promoted(only.clone()),
                Effect::Snapshot,
                Effect::Completed
            ]
        );
        assert_eq!(session.progress(), (1, 1));
    }

    #[test]
    fn reset_clears_progress() {
        let (mut session, mut rng) = session(4, 9);
        for _ in 0..10 {
            let pick = displayed_ids(&session)[0].clone();
            session.apply(Event::Select(vec![pick]), &mut rng).unwrap();
        }
        let effects = session.apply(Event::Reset, &mut rng).unwrap();
        assert_eq!(effects, vec![Effect::ClearSnapshot]);
        assert_eq!(session.round(), 0);
        assert_eq!(session.phase(), Phase::InitialSweep);
        assert!(session.items().iter().all(|item| item.score == 0));
        assert_eq!(
            session.items().iter().map(|item| item.viewed).sum::<u32>(),
            2
        );
    }

    #[test]
    fn saved_progress_is_compacted() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut saved = items(3);
        saved[0].score = -4;
        saved[1].score = 2;
        saved[2].score = -7;
        let session = RankingSession::new(
            SessionMeta::default(),
            saved,
            RankingConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.items()[0].score, -1);
        assert_eq!(session.items()[2].score, -2);
        assert_eq!(session.displayed_items().len(), 1);
        assert_eq!(session.displayed_items()[0].id, ItemId::new("img-1"));
    }

    #[test]
    fn snapshot_round_trip_keeps_behaviour() {
        let (mut session, mut rng) = session(21, 12);
        for _ in 0..7 {
            let pick = random_pick(&session, &mut rng);
            session.apply(Event::Select(pick), &mut rng).unwrap();
        }

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let snapshot: SessionSnapshot = serde_json::from_str(&json).unwrap();
        let restored =
            RankingSession::from_snapshot(snapshot, RankingConfig::default(), &mut rng).unwrap();

        assert_eq!(restored.items(), session.items());
        assert_eq!(displayed_ids(&restored), displayed_ids(&session));
        assert_eq!(restored.remaining_items(), session.remaining_items());
        assert_eq!(restored.phase(), session.phase());
        assert_eq!(restored.round(), session.round());
        assert_eq!(restored.max_selectable(), session.max_selectable());

        let mut original_rng = StdRng::seed_from_u64(99);
        let mut restored_rng = StdRng::seed_from_u64(99);
        let mut original = session;
        let mut copy = restored;
        for _ in 0..5 {
            let pick = vec![displayed_ids(&original)[0].clone()];
            original
                .apply(Event::Select(pick.clone()), &mut original_rng)
                .unwrap();
            copy.apply(Event::Select(pick), &mut restored_rng).unwrap();
            assert_eq!(original.items(), copy.items());
        }
    }

    #[test]
    fn snapshot_with_broken_ranks_is_rejected() {
        let (session, mut rng) = session(3, 1);
        let mut snapshot = session.snapshot();
        snapshot.items[0].score = -2;
        assert_eq!(
            RankingSession::from_snapshot(snapshot, RankingConfig::default(), &mut rng),
            Err(SnapshotError::Ranks)
        );

        let mut stale = session.snapshot();
        stale.version = 0;
        assert_eq!(
            RankingSession::from_snapshot(stale, RankingConfig::default(), &mut rng),
            Err(SnapshotError::Version(0))
        );
    }

    #[test]
    fn snapshot_without_round_deals_one() {
        let (session, mut rng) = session(4, 6);
        let mut snapshot = session.snapshot();
        snapshot.displayed.clear();
        snapshot.max_selectable = 40;
        let restored =
            RankingSession::from_snapshot(snapshot, RankingConfig::default(), &mut rng).unwrap();
        assert_eq!(restored.displayed_items().len(), 2);
        assert_eq!(restored.max_selectable(), 1);
    }

    #[test]
    fn snapshot_keys() {
        assert_eq!(
            SessionTarget::Album("42".into()).snapshot_key(),
            "ranking-session:42"
        );
        assert_eq!(
            SessionTarget::Ranking("r-9".into()).snapshot_key(),
            "ranking-session:r-9"
        );
    }
}

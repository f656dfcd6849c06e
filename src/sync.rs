use crate::data::{DataError, RankingBackend, RankingMetadata, RankingPayload, SavedRankingItem};
use crate::session::{RankingSession, SessionTarget};
use crate::storage::{clear, SnapshotStore};
use log::{info, warn};

/// Commit body for `session`: metadata plus every image with a nonzero score.
/// Images that were shown but never picked are left out.
pub fn build_payload(session: &RankingSession) -> RankingPayload {
    let meta = session.meta();
    RankingPayload {
        metadata: RankingMetadata {
            name: meta.name.clone(),
            description: meta.description.clone(),
            is_public: meta.is_public,
            album_id: meta.album_id.clone(),
        },
        items: session
            .items()
            .iter()
            .filter(|item| item.score != 0)
            .map(|item| SavedRankingItem {
                item_id: item.id.to_string(),
                points: item.score,
                viewed: item.viewed,
            })
            .collect(),
    }
}

/// Push the session to the backend. On success the local snapshot is dropped
/// and later commits update the same ranking; on failure nothing local changes.
pub async fn commit<B, S>(
    backend: &B,
    store: &S,
    target: &SessionTarget,
    session: &mut RankingSession,
) -> Result<String, DataError>
where
    B: RankingBackend + ?Sized,
    S: SnapshotStore + ?Sized,
{
    let payload = build_payload(session);
    let existing = session.meta().ranking_id.clone();

    match backend.save_ranking(existing.as_deref(), &payload).await {
        Ok(ranking_id) => {
            info!(
                "Saved ranking {} ({} images)",
                ranking_id,
                payload.items.len()
            );
            clear(store, target);
            session.meta_mut().ranking_id = Some(ranking_id.clone());
            Ok(ranking_id)
        }
        Err(err) => {
            warn!("Failed to save ranking: {}", err);
            Err(err)
        }
    }
}

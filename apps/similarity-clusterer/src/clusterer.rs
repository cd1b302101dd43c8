// [apps/similarity-clusterer/src/clusterer.rs]
/*!
 * =================================================================
 * APARATO: SIMILARITY CLUSTERER CORE (V1.0)
 * CLASIFICACIÓN: APPLICATION ORCHESTRATOR (ESTRATO L5)
 * RESPONSABILIDAD: CLUSTERING DE CUASI-DUPLICADOS POR UNION-FIND
 *
 * Dos pasadas independientes (texto, imagen), cada una: unión directa por
 * fingerprint compartido, luego unión aproximada via índice de banda
 * (SimHash) o BK-tree (imagen), numeración de componentes, y upsert.
 * Una pasada nunca bloquea a la otra: el texto se escribe antes de que
 * la imagen empiece a leerse.
 * =================================================================
 */

use std::collections::{HashMap, HashSet};

use adlens_db::{BatchLeaseClient, DbError};
use adlens_domain_models::{ArchiveId, ClusterAssignment, Modality};
use adlens_similarity::{BkTree, SimHashIndex, UnionFind};
use tracing::info;

/// Near-duplicate threshold shared by both passes, per `spec.md` §4.6.
const NEAR_DUPLICATE_K: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ClustererError {
    #[error("database failure: {0}")]
    Db(#[from] DbError),
    #[error("clustering task panicked")]
    TaskPanicked,
}

/// Count of clusters written per modality. Resolves the undefined
/// `components` reference the historic core left dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusteringReport {
    pub text_clusters: usize,
    pub image_clusters: usize,
}

/// Local seam over `SimHashIndex`/`BkTree` so one clustering routine drives
/// both near-neighbor structures without duplicating the union-find logic.
trait NearDuplicateIndex {
    fn insert(&mut self, hash: u64, payload: i64);
    fn query(&self, hash: u64) -> Vec<i64>;
}

impl NearDuplicateIndex for SimHashIndex {
    fn insert(&mut self, hash: u64, payload: i64) {
        SimHashIndex::insert(self, hash, payload)
    }

    fn query(&self, hash: u64) -> Vec<i64> {
        SimHashIndex::query(self, hash).into_iter().collect()
    }
}

struct BkTreeIndex {
    tree: BkTree,
    k: u32,
}

impl NearDuplicateIndex for BkTreeIndex {
    fn insert(&mut self, hash: u64, payload: i64) {
        self.tree.insert(hash, payload);
    }

    fn query(&self, hash: u64) -> Vec<i64> {
        self.tree.find_within(hash, self.k)
    }
}

/// Reads both fingerprint spaces, clusters each independently, and upserts
/// assignments as soon as its own pass completes — a failure in the image
/// pass must never roll back an already-written text pass.
pub async fn run_clustering(db: &dyn BatchLeaseClient) -> Result<ClusteringReport, ClustererError> {
    let text_fingerprints = db.read_all_text_fingerprints().await?;
    let text_components = tokio::task::spawn_blocking(move || {
        cluster_fingerprints(text_fingerprints, SimHashIndex::new(NEAR_DUPLICATE_K))
    })
    .await
    .map_err(|_| ClustererError::TaskPanicked)?;
    let text_clusters = text_components.len();
    let text_assignments = compute_assignments(text_components, Modality::Text);
    db.upsert_text_cluster_assignments(&text_assignments).await?;
    info!("📝 [CLUSTERER]: Text pass complete -> {} cluster(s).", text_clusters);

    let image_fingerprints = db.read_all_image_fingerprints().await?;
    let image_components = tokio::task::spawn_blocking(move || {
        cluster_fingerprints(
            image_fingerprints,
            BkTreeIndex {
                tree: BkTree::new(),
                k: NEAR_DUPLICATE_K,
            },
        )
    })
    .await
    .map_err(|_| ClustererError::TaskPanicked)?;
    let image_clusters = image_components.len();
    let image_assignments = compute_assignments(image_components, Modality::Image);
    db.upsert_image_cluster_assignments(&image_assignments).await?;
    info!("🖼️ [CLUSTERER]: Image pass complete -> {} cluster(s).", image_clusters);

    Ok(ClusteringReport {
        text_clusters,
        image_clusters,
    })
}

/// One modality's full pass: direct union over shared fingerprints, then
/// approximate union over near-duplicate fingerprints via `index`.
/// Pure and CPU-bound — runs inside `spawn_blocking` in `run_clustering`.
fn cluster_fingerprints(
    fingerprints: HashMap<i64, HashSet<ArchiveId>>,
    mut index: impl NearDuplicateIndex,
) -> Vec<Vec<i64>> {
    let mut union_find = UnionFind::new();
    let mut representative_of_hash: HashMap<i64, i64> = HashMap::new();

    for (&sim_hash, archive_ids) in &fingerprints {
        let mut ids = archive_ids.iter().map(|id| id.get());
        let Some(first) = ids.next() else { continue };
        union_find.make_set(first);
        let mut representative = first;
        for other in ids {
            union_find.make_set(other);
            union_find.union(first, other);
            representative = representative.min(other);
        }
        representative_of_hash.insert(sim_hash, representative);
        index.insert(sim_hash as u64, representative);
    }

    for (&sim_hash, &representative) in &representative_of_hash {
        let mut matches = index.query(sim_hash as u64).into_iter();
        if let Some(first_match) = matches.next() {
            union_find.union(representative, first_match);
            for other_match in matches {
                union_find.union(first_match, other_match);
            }
        }
    }

    union_find.components()
}

/// Numbers components `0..C-1` in the iteration order of `components()` and
/// emits one `ClusterAssignment` row per archive id.
fn compute_assignments(components: Vec<Vec<i64>>, modality: Modality) -> Vec<ClusterAssignment> {
    components
        .into_iter()
        .enumerate()
        .flat_map(|(cluster_id, archive_ids)| {
            archive_ids.into_iter().map(move |id| ClusterAssignment {
                archive_id: ArchiveId(id),
                cluster_id: cluster_id as i64,
                modality,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(pairs: &[(i64, &[i64])]) -> HashMap<i64, HashSet<ArchiveId>> {
        pairs
            .iter()
            .map(|(hash, ids)| (*hash, ids.iter().copied().map(ArchiveId).collect()))
            .collect()
    }

    #[test]
    fn archive_ids_sharing_one_fingerprint_land_in_one_cluster() {
        let fingerprints = fp(&[(100, &[1, 2, 3])]);
        let components = cluster_fingerprints(fingerprints, SimHashIndex::new(NEAR_DUPLICATE_K));
        assert_eq!(components.len(), 1);
        let mut only = components[0].clone();
        only.sort();
        assert_eq!(only, vec![1, 2, 3]);
    }

    #[test]
    fn unrelated_fingerprints_stay_in_separate_clusters() {
        let fingerprints = fp(&[(0x0000_0000_0000_0000, &[1]), (0xFFFF_FFFF_FFFF_FFFF, &[2])]);
        let components = cluster_fingerprints(fingerprints, SimHashIndex::new(NEAR_DUPLICATE_K));
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn near_duplicate_fingerprints_transitively_merge() {
        // Two distinct fingerprints one Hamming bit apart, each held by a
        // different archive id — the approximate pass must merge them.
        let fingerprints = fp(&[(0x0000_0000_0000_0000, &[1]), (0x0000_0000_0000_0001, &[2])]);
        let components = cluster_fingerprints(fingerprints, SimHashIndex::new(NEAR_DUPLICATE_K));
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn image_pass_uses_the_bk_tree_index_identically() {
        let fingerprints = fp(&[(0x1234, &[10]), (0x1235, &[20])]);
        let components = cluster_fingerprints(
            fingerprints,
            BkTreeIndex {
                tree: BkTree::new(),
                k: NEAR_DUPLICATE_K,
            },
        );
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn compute_assignments_numbers_clusters_from_zero() {
        let components = vec![vec![1, 2], vec![3]];
        let mut assignments = compute_assignments(components, Modality::Text);
        assignments.sort_by_key(|a| a.archive_id.get());
        assert_eq!(assignments[0].archive_id, ArchiveId(1));
        assert_eq!(assignments[2].archive_id, ArchiveId(3));
        assert_ne!(assignments[0].cluster_id, assignments[2].cluster_id);
        assert_eq!(assignments[0].cluster_id, assignments[1].cluster_id);
    }

    #[test]
    fn rerunning_on_an_unchanged_snapshot_preserves_the_partition() {
        let fingerprints = || fp(&[(100, &[1, 2]), (200, &[3])]);
        let mut first = cluster_fingerprints(fingerprints(), SimHashIndex::new(NEAR_DUPLICATE_K));
        let mut second = cluster_fingerprints(fingerprints(), SimHashIndex::new(NEAR_DUPLICATE_K));
        for component in first.iter_mut().chain(second.iter_mut()) {
            component.sort();
        }
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }
}

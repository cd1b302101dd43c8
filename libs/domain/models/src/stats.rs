// [libs/domain/models/src/stats.rs]
use std::time::Duration;

/// Observability counters for one creative-retrieval-pipeline run. Touched
/// only by the single pipeline thread — no interior mutability required.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub snapshots_processed: u64,
    pub fetch_failures: u64,
    pub creatives_found: u64,
    pub snapshots_without_creatives: u64,
    pub image_download_successes: u64,
    pub image_download_failures: u64,
    pub video_download_successes: u64,
    pub video_download_failures: u64,
    pub image_uploads: u64,
    pub video_uploads: u64,
    current_batch_id: Option<i64>,
    total_creative_processing_time: Duration,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_batch(&mut self, batch_id: i64) {
        self.current_batch_id = Some(batch_id);
    }

    pub fn current_batch_id(&self) -> Option<i64> {
        self.current_batch_id
    }

    pub fn record_creative_processed(&mut self, elapsed: Duration) {
        self.creatives_found += 1;
        self.total_creative_processing_time += elapsed;
    }

    /// Mean wall-clock time per creative processed so far, or zero before
    /// any creative has been recorded.
    pub fn average_seconds_per_creative(&self) -> f64 {
        if self.creatives_found == 0 {
            return 0.0;
        }
        self.total_creative_processing_time.as_secs_f64() / self.creatives_found as f64
    }

    /// One-line summary for the periodic observability log.
    pub fn render(&self) -> String {
        format!(
            "batch={} snapshots={} fetch_failures={} creatives={} empty_snapshots={} \
             image_ok={} image_fail={} video_ok={} video_fail={} image_uploads={} video_uploads={} \
             avg_secs_per_creative={:.3}",
            self.current_batch_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string()),
            self.snapshots_processed,
            self.fetch_failures,
            self.creatives_found,
            self.snapshots_without_creatives,
            self.image_download_successes,
            self.image_download_failures,
            self.video_download_successes,
            self.video_download_failures,
            self.image_uploads,
            self.video_uploads,
            self.average_seconds_per_creative(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_zero_before_any_creative_is_recorded() {
        let stats = PipelineStats::new();
        assert_eq!(stats.average_seconds_per_creative(), 0.0);
    }

    #[test]
    fn average_divides_total_time_by_creative_count() {
        let mut stats = PipelineStats::new();
        stats.record_creative_processed(Duration::from_secs(2));
        stats.record_creative_processed(Duration::from_secs(4));
        assert_eq!(stats.average_seconds_per_creative(), 3.0);
    }

    #[test]
    fn start_batch_updates_the_current_batch_id() {
        let mut stats = PipelineStats::new();
        assert_eq!(stats.current_batch_id(), None);
        stats.start_batch(7);
        assert_eq!(stats.current_batch_id(), Some(7));
    }

    #[test]
    fn render_includes_the_batch_id_and_counters() {
        let mut stats = PipelineStats::new();
        stats.start_batch(3);
        stats.snapshots_processed = 5;
        let line = stats.render();
        assert!(line.contains("batch=3"));
        assert!(line.contains("snapshots=5"));
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use tracker_domain::ErrorKind;

#[derive(Debug, Default)]
pub struct Metrics {
    anomalies_created: AtomicU64,
    anomalies_updated: AtomicU64,
    anomalies_deleted: AtomicU64,
    listings: AtomicU64,
    rejected_requests: AtomicU64,
    auth_failures: AtomicU64,
    store_failures: AtomicU64,
}

impl Metrics {
    pub fn record_created(&self) {
        self.anomalies_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.anomalies_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deleted(&self, count: u64) {
        self.anomalies_deleted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_listing(&self) {
        self.listings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: ErrorKind) {
        let counter = match kind {
            ErrorKind::Auth => &self.auth_failures,
            ErrorKind::Store => &self.store_failures,
            _ => &self.rejected_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self, skipped_rows: u64) -> String {
        let created = self.anomalies_created.load(Ordering::Relaxed);
        let updated = self.anomalies_updated.load(Ordering::Relaxed);
        let deleted = self.anomalies_deleted.load(Ordering::Relaxed);
        let listings = self.listings.load(Ordering::Relaxed);
        let rejected = self.rejected_requests.load(Ordering::Relaxed);
        let auth = self.auth_failures.load(Ordering::Relaxed);
        let store = self.store_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE anomaly_tracker_anomalies_created_total counter\n\
anomaly_tracker_anomalies_created_total {}\n\
# TYPE anomaly_tracker_anomalies_updated_total counter\n\
anomaly_tracker_anomalies_updated_total {}\n\
# TYPE anomaly_tracker_anomalies_deleted_total counter\n\
anomaly_tracker_anomalies_deleted_total {}\n\
# TYPE anomaly_tracker_listings_total counter\n\
anomaly_tracker_listings_total {}\n\
# TYPE anomaly_tracker_rejected_requests_total counter\n\
anomaly_tracker_rejected_requests_total {}\n\
# TYPE anomaly_tracker_auth_failures_total counter\n\
anomaly_tracker_auth_failures_total {}\n\
# TYPE anomaly_tracker_store_failures_total counter\n\
anomaly_tracker_store_failures_total {}\n\
# TYPE anomaly_tracker_skipped_rows_total counter\n\
anomaly_tracker_skipped_rows_total {}\n",
            created, updated, deleted, listings, rejected, auth, store, skipped_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_land_in_their_bucket() {
        let metrics = Metrics::default();
        metrics.record_failure(ErrorKind::Auth);
        metrics.record_failure(ErrorKind::Conflict);
        metrics.record_failure(ErrorKind::Validation);
        metrics.record_failure(ErrorKind::Store);

        let text = metrics.render_prometheus(0);
        assert!(text.contains("anomaly_tracker_auth_failures_total 1\n"));
        assert!(text.contains("anomaly_tracker_rejected_requests_total 2\n"));
        assert!(text.contains("anomaly_tracker_store_failures_total 1\n"));
    }

    #[test]
    fn render_includes_store_skipped_rows() {
        let metrics = Metrics::default();
        metrics.record_created();
        metrics.record_deleted(1);
        let text = metrics.render_prometheus(4);
        assert!(text.contains("anomaly_tracker_anomalies_created_total 1\n"));
        assert!(text.contains("anomaly_tracker_anomalies_deleted_total 1\n"));
        assert!(text.contains("anomaly_tracker_skipped_rows_total 4\n"));
    }
}

//! Admin dashboard figures.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use jurist_core::config::RequestsConfig;
use jurist_core::result::AppResult;
use jurist_core::traits::Clock;
use jurist_database::store::{LawyerStore, RequestStore};
use jurist_entity::request::{RequestStatus, local_midnight};

/// Request figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    /// All requests.
    pub total: u64,
    /// Submitted since local midnight.
    pub today: u64,
    /// Submitted in the trailing seven days.
    pub this_week: u64,
    /// Count per status, every status present.
    pub by_status: BTreeMap<String, u64>,
}

/// Lawyer figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LawyerStats {
    /// All profiles.
    pub total: u64,
    /// Awaiting moderation.
    pub pending: u64,
    /// Approved.
    pub approved: u64,
    /// Rejected.
    pub rejected: u64,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Request figures.
    pub requests: RequestStats,
    /// Lawyer figures.
    pub lawyers: LawyerStats,
}

/// Computes dashboard figures.
#[derive(Clone)]
pub struct StatsService {
    requests: Arc<dyn RequestStore>,
    lawyers: Arc<dyn LawyerStore>,
    clock: Arc<dyn Clock>,
    config: RequestsConfig,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService").finish_non_exhaustive()
    }
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(
        requests: Arc<dyn RequestStore>,
        lawyers: Arc<dyn LawyerStore>,
        clock: Arc<dyn Clock>,
        config: RequestsConfig,
    ) -> Self {
        Self {
            requests,
            lawyers,
            clock,
            config,
        }
    }

    /// Current dashboard figures.
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let now = self.clock.now();
        let today_start = local_midnight(now, self.config.local_offset());
        let week_start = now - Duration::days(7);

        let requests = self.requests.counts(today_start, week_start).await?;
        let lawyers = self.lawyers.counts().await?;

        let mut by_status: BTreeMap<String, u64> = RequestStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for (status, count) in requests.by_status {
            by_status.insert(status.as_str().to_string(), count);
        }

        Ok(DashboardStats {
            requests: RequestStats {
                total: requests.total,
                today: requests.today,
                this_week: requests.this_week,
                by_status,
            },
            lawyers: LawyerStats {
                total: lawyers.total,
                pending: lawyers.pending,
                approved: lawyers.approved,
                rejected: lawyers.rejected,
            },
        })
    }
}

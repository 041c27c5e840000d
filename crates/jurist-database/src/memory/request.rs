//! In-memory request store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::{LawyerId, PageRequest, PageResponse, RequestId};
use jurist_entity::request::{NewRequest, Request, RequestNumber, RequestStatus};

use super::paginate;
use crate::store::{RequestCounts, RequestStore, SubmissionQuota};

#[derive(Debug, Default)]
struct InnerState {
    requests: HashMap<RequestId, Request>,
    counters: HashMap<NaiveDate, u32>,
}

impl InnerState {
    /// Matching requests ordered by `key`, largest first.
    fn sorted_by<K: Ord>(
        &self,
        filter: impl Fn(&Request) -> bool,
        key: impl Fn(&Request) -> K,
    ) -> Vec<Request> {
        let mut items: Vec<Request> = self
            .requests
            .values()
            .filter(|r| filter(r))
            .cloned()
            .collect();
        items.sort_by(|a, b| key(b).cmp(&key(a)).then(b.id.0.cmp(&a.id.0)));
        items
    }
}

/// Request store backed by a mutex-guarded map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequestStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryRequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn insert_throttled(
        &self,
        data: &NewRequest,
        quota: SubmissionQuota,
    ) -> AppResult<Request> {
        let mut state = self.state.lock().await;

        let recent = state
            .requests
            .values()
            .filter(|r| r.ip_address == data.ip_address && r.created_at > quota.window_start)
            .count();
        if recent >= quota.max_in_window as usize {
            return Err(AppError::rate_limited(
                "Too many requests. Please try again later.",
            ));
        }

        let seq = {
            let counter = state.counters.entry(quota.day).or_insert(0);
            *counter += 1;
            *counter
        };

        let request = Request {
            id: RequestId::new(),
            request_number: RequestNumber::new(quota.day, seq).to_string(),
            description: data.description.clone(),
            budget: data.budget,
            currency: data.currency,
            contact_name: data.contact_name.clone(),
            phone: data.phone.clone(),
            email: data.email.clone(),
            preferred_contact: data.preferred_contact,
            status: RequestStatus::New,
            assigned_lawyer_id: None,
            assigned_at: None,
            ip_address: data.ip_address.clone(),
            created_at: quota.now,
            updated_at: quota.now,
        };
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<Request>> {
        Ok(self.state.lock().await.requests.get(&id).cloned())
    }

    async fn list_unassigned(
        &self,
        status: RequestStatus,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let state = self.state.lock().await;
        let items = state.sorted_by(
            |r| r.status == status && r.assigned_lawyer_id.is_none(),
            |r| r.created_at,
        );
        Ok(paginate(&items, page))
    }

    async fn list_assigned_to(
        &self,
        lawyer_id: LawyerId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let state = self.state.lock().await;
        let items = state.sorted_by(|r| r.is_assigned_to(lawyer_id), |r| r.assigned_at);
        Ok(paginate(&items, page))
    }

    async fn list_all(
        &self,
        status: Option<RequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let state = self.state.lock().await;
        let items = state.sorted_by(
            |r| status.is_none_or(|s| r.status == s),
            |r| r.created_at,
        );
        Ok(paginate(&items, page))
    }

    async fn try_claim(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        let mut state = self.state.lock().await;
        let Some(request) = state.requests.get_mut(&id) else {
            return Ok(None);
        };
        if !request.is_claimable() {
            return Ok(None);
        }
        request.status = RequestStatus::InProgress;
        request.assigned_lawyer_id = Some(lawyer_id);
        request.assigned_at = Some(now);
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn try_release(
        &self,
        id: RequestId,
        lawyer_id: LawyerId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        let mut state = self.state.lock().await;
        let Some(request) = state.requests.get_mut(&id) else {
            return Ok(None);
        };
        if !request.is_assigned_to(lawyer_id) {
            return Ok(None);
        }
        request.status = RequestStatus::New;
        request.assigned_lawyer_id = None;
        request.assigned_at = None;
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn override_status(
        &self,
        id: RequestId,
        status: RequestStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Request>> {
        let mut state = self.state.lock().await;
        let Some(request) = state.requests.get_mut(&id) else {
            return Ok(None);
        };
        if status.requires_assignee() {
            if request.assigned_lawyer_id.is_none() {
                return Ok(None);
            }
        } else {
            request.assigned_lawyer_id = None;
            request.assigned_at = None;
        }
        request.status = status;
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn delete(&self, id: RequestId) -> AppResult<bool> {
        Ok(self.state.lock().await.requests.remove(&id).is_some())
    }

    async fn counts(
        &self,
        today_start: DateTime<Utc>,
        week_start: DateTime<Utc>,
    ) -> AppResult<RequestCounts> {
        let state = self.state.lock().await;
        let since = |start: DateTime<Utc>| {
            state.requests.values().filter(|r| r.created_at >= start).count() as u64
        };
        let by_status = RequestStatus::ALL
            .into_iter()
            .map(|s| (s, state.requests.values().filter(|r| r.status == s).count() as u64))
            .filter(|(_, n)| *n > 0)
            .collect();

        Ok(RequestCounts {
            total: state.requests.len() as u64,
            today: since(today_start),
            this_week: since(week_start),
            by_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use jurist_entity::request::{Currency, PreferredContact};

    fn new_request(ip: &str) -> NewRequest {
        NewRequest {
            description: "x".repeat(60),
            budget: 150_000,
            currency: Currency::Kzt,
            contact_name: "Aidos".into(),
            phone: "+77011234567".into(),
            email: None,
            preferred_contact: PreferredContact::Any,
            ip_address: ip.into(),
        }
    }

    fn quota(now: DateTime<Utc>) -> SubmissionQuota {
        SubmissionQuota {
            window_start: now - Duration::minutes(60),
            max_in_window: 10,
            day: now.date_naive(),
            now,
        }
    }

    #[tokio::test]
    async fn test_numbers_increment_per_day() {
        let store = MemoryRequestStore::new();
        let day1 = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let a = store.insert_throttled(&new_request("1.1.1.1"), quota(day1)).await.unwrap();
        let b = store.insert_throttled(&new_request("2.2.2.2"), quota(day1)).await.unwrap();
        assert_eq!(a.request_number, "REQ-20250501-0001");
        assert_eq!(b.request_number, "REQ-20250501-0002");

        let day2 = day1 + Duration::days(1);
        let c = store.insert_throttled(&new_request("1.1.1.1"), quota(day2)).await.unwrap();
        assert_eq!(c.request_number, "REQ-20250502-0001");
    }

    #[tokio::test]
    async fn test_claim_then_release_restores_pool_entry() {
        let store = MemoryRequestStore::new();
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let request = store.insert_throttled(&new_request("1.1.1.1"), quota(now)).await.unwrap();
        let lawyer = LawyerId::new();

        let claimed = store.try_claim(request.id, lawyer, now).await.unwrap().unwrap();
        assert_eq!(claimed.status, RequestStatus::InProgress);
        assert!(store.try_claim(request.id, LawyerId::new(), now).await.unwrap().is_none());
        assert!(store.try_release(request.id, LawyerId::new(), now).await.unwrap().is_none());

        let released = store.try_release(request.id, lawyer, now).await.unwrap().unwrap();
        assert_eq!(released.status, RequestStatus::New);
        assert_eq!(released.assigned_lawyer_id, None);
        assert_eq!(released.created_at, request.created_at);
    }

    #[tokio::test]
    async fn test_override_keeps_assignment_invariant() {
        let store = MemoryRequestStore::new();
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let request = store.insert_throttled(&new_request("1.1.1.1"), quota(now)).await.unwrap();

        assert!(
            store
                .override_status(request.id, RequestStatus::InProgress, now)
                .await
                .unwrap()
                .is_none()
        );

        store.try_claim(request.id, LawyerId::new(), now).await.unwrap();
        let closed = store
            .override_status(request.id, RequestStatus::Closed, now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.assigned_lawyer_id, None);
        assert_eq!(closed.assigned_at, None);
    }
}

//! In-memory administrator store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use jurist_core::error::AppError;
use jurist_core::result::AppResult;
use jurist_core::types::AdminId;
use jurist_entity::admin::{AdminUser, NewAdminUser};

use crate::store::AdminStore;

/// Administrator store backed by a mutex-guarded map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdminStore {
    admins: Arc<Mutex<HashMap<AdminId, AdminUser>>>,
}

impl MemoryAdminStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an administrator's active flag.
    pub async fn set_active(&self, id: AdminId, active: bool) {
        if let Some(admin) = self.admins.lock().await.get_mut(&id) {
            admin.is_active = active;
        }
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn insert(&self, data: &NewAdminUser, now: DateTime<Utc>) -> AppResult<AdminUser> {
        let mut admins = self.admins.lock().await;
        if admins.values().any(|a| a.external_ref == data.external_ref) {
            return Err(AppError::conflict("Account is already an administrator"));
        }
        let admin = AdminUser {
            id: AdminId::new(),
            external_ref: data.external_ref.clone(),
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            role: data.role,
            is_active: true,
            created_at: now,
        };
        admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn find_by_id(&self, id: AdminId) -> AppResult<Option<AdminUser>> {
        Ok(self.admins.lock().await.get(&id).cloned())
    }

    async fn find_by_external_ref(&self, external_ref: &str) -> AppResult<Option<AdminUser>> {
        Ok(self
            .admins
            .lock()
            .await
            .values()
            .find(|a| a.external_ref == external_ref)
            .cloned())
    }
}

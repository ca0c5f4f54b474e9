//! Asynchronous audit trail.
//!
//! Writes go through a bounded queue drained by a single background
//! worker, so request handlers never wait on the audit insert. A failed
//! insert is logged and dropped; the audit trail is best-effort and must
//! not take the serving path down with it.

use crate::database::{AuditLog, AuditLogFilter, Repository};
use crate::utils::{ApiError, Paginated, PaginationParams};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub tenant_id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub changes: Value,
}

impl AuditEvent {
    pub fn new(
        tenant_id: Uuid,
        actor_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        changes: Value,
    ) -> Self {
        Self {
            tenant_id,
            actor_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            changes,
        }
    }
}

pub struct AuditService {
    repository: Arc<Repository>,
    sender: flume::Sender<AuditEvent>,
}

impl AuditService {
    /// Spawns the consumer worker. The worker exits when the last sender
    /// is dropped, which happens at shutdown when the service is dropped.
    pub fn new(repository: Arc<Repository>, queue_capacity: usize) -> Self {
        let (sender, receiver) = flume::bounded::<AuditEvent>(queue_capacity);

        let worker_repo = repository.clone();
        tokio::spawn(async move {
            while let Ok(event) = receiver.recv_async().await {
                if let Err(e) = worker_repo
                    .insert_audit_log(
                        event.tenant_id,
                        event.actor_id,
                        &event.action,
                        &event.entity_type,
                        event.entity_id,
                        &event.changes,
                    )
                    .await
                {
                    warn!(
                        "Failed to persist audit event {} on {}: {}",
                        event.action, event.entity_type, e
                    );
                }
            }
            info!("Audit queue closed, worker exiting");
        });

        Self { repository, sender }
    }

    /// Enqueue an event. Blocks only when the queue is full, applying
    /// backpressure instead of silently dropping events.
    pub async fn log(&self, event: AuditEvent) {
        if let Err(e) = self.sender.send_async(event).await {
            warn!("Audit queue unavailable, event dropped: {}", e);
        }
    }

    pub async fn list_logs(
        &self,
        tenant_id: Uuid,
        filter: &AuditLogFilter,
        params: &PaginationParams,
    ) -> Result<Paginated<AuditLog>, ApiError> {
        let params = params.normalized();
        let total = self.repository.count_audit_logs(tenant_id, filter).await?;
        let logs = self
            .repository
            .list_audit_logs(tenant_id, filter, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(logs, &params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbPool;
    use serde_json::json;
    use std::time::Duration;

    fn offline_service(capacity: usize) -> AuditService {
        let pool = DbPool::lazy("postgres://localhost:1/void").unwrap();
        AuditService::new(Arc::new(Repository::new(pool)), capacity)
    }

    fn sample_event() -> AuditEvent {
        AuditEvent::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "ONBOARD",
            "Users",
            Uuid::new_v4(),
            json!({ "employeeNo": "E-1001" }),
        )
    }

    #[tokio::test]
    async fn log_returns_without_waiting_for_persistence() {
        let service = offline_service(16);
        // The insert itself can never succeed against the lazy pool; the
        // producer side must still return promptly.
        let result =
            tokio::time::timeout(Duration::from_millis(500), service.log(sample_event())).await;
        assert!(result.is_ok());
    }

    #[test]
    fn event_constructor_copies_fields() {
        let tenant_id = Uuid::new_v4();
        let entity_id = Uuid::new_v4();
        let event = AuditEvent::new(
            tenant_id,
            Uuid::new_v4(),
            "CREATE",
            "Employees",
            entity_id,
            json!({}),
        );
        assert_eq!(event.tenant_id, tenant_id);
        assert_eq!(event.entity_id, entity_id);
        assert_eq!(event.action, "CREATE");
        assert_eq!(event.entity_type, "Employees");
    }
}

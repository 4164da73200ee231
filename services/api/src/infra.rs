use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use vise_cards::cards::{ClientId, ClientRecord, ClientRepository, PurchaseRecord, RepositoryError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local client store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryClientRepository {
    clients: Arc<Mutex<HashMap<ClientId, ClientRecord>>>,
    purchases: Arc<Mutex<Vec<PurchaseRecord>>>,
}

impl ClientRepository for InMemoryClientRepository {
    fn insert_client(&self, record: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        let mut guard = self
            .clients
            .lock()
            .map_err(|_| RepositoryError::Unavailable("client store poisoned".to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_client(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        let guard = self
            .clients
            .lock()
            .map_err(|_| RepositoryError::Unavailable("client store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn insert_purchase(&self, record: PurchaseRecord) -> Result<PurchaseRecord, RepositoryError> {
        let mut guard = self
            .purchases
            .lock()
            .map_err(|_| RepositoryError::Unavailable("purchase store poisoned".to_string()))?;
        guard.push(record.clone());
        Ok(record)
    }

    fn purchases_for(&self, id: &ClientId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        let guard = self
            .purchases
            .lock()
            .map_err(|_| RepositoryError::Unavailable("purchase store poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|record| record.client_id == *id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vise_cards::cards::CardTier;

    fn client(id: u64) -> ClientRecord {
        ClientRecord {
            id: ClientId(id),
            name: "Carol Gold".to_string(),
            country: "USA".to_string(),
            monthly_income: 700.into(),
            is_member: false,
            tier: CardTier::Gold,
        }
    }

    #[test]
    fn duplicate_ids_conflict() {
        let repository = InMemoryClientRepository::default();
        repository.insert_client(client(7)).expect("first insert");
        assert!(matches!(
            repository.insert_client(client(7)),
            Err(RepositoryError::Conflict)
        ));
        assert_eq!(
            repository
                .fetch_client(&ClientId(7))
                .expect("fetch succeeds")
                .map(|record| record.name),
            Some("Carol Gold".to_string())
        );
    }
}

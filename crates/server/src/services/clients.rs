//! Client registration and management.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use orderdesk_core::{ClientId, Email};

use super::{ServiceError, today};
use crate::db::{ClientRepository, RepositoryError};
use crate::models::{Client, ClientName};

/// Validates and persists client records.
#[derive(Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Create a new client service.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Register a new client dated today.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if any field is blank or malformed
    /// - `ServiceError::DuplicateId` if the ID or email is already registered
    /// - `ServiceError::Repository` if storage fails
    #[instrument(skip(self, name, email))]
    pub async fn register_client(
        &self,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<Client, ServiceError> {
        info!("Registering client");

        let (id, name, email) = parse_client_fields(id, name, email).inspect_err(|e| {
            error!(error = %e, "Rejected client registration");
        })?;

        if self.repository.exists_by_id(&id).await?
            || self.repository.find_by_email(&email).await?.is_some()
        {
            warn!(client_id = %id, email = %email, "Duplicate client registration");
            return Err(duplicate_client(&id, &email));
        }

        let client = Client {
            id,
            name,
            email,
            registration_date: today(),
        };

        let saved = self.repository.insert(&client).await.map_err(|e| match e {
            // Lost a race with a concurrent registration
            RepositoryError::Conflict(_) => {
                warn!(client_id = %client.id, "Client registered concurrently");
                duplicate_client(&client.id, &client.email)
            }
            other => other.into(),
        })?;

        info!(client_id = %saved.id, name = %saved.name, "Client registered");
        Ok(saved)
    }

    /// Look up a client by ID.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if the ID is blank
    /// - `ServiceError::ClientNotFound` if no client has this ID
    #[instrument(skip(self))]
    pub async fn search_client(&self, id: &str) -> Result<Client, ServiceError> {
        let id = parse_id(id)?;
        let client = self.find_existing(&id).await?;
        info!(client_id = %id, "Client found");
        Ok(client)
    }

    /// All clients in storage order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if storage fails.
    #[instrument(skip(self))]
    pub async fn list_all_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let clients = self.repository.find_all().await?;
        info!(count = clients.len(), "Listed clients");
        Ok(clients)
    }

    /// Replace a client's name and email. ID and registration date never change.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if any field is blank or malformed
    /// - `ServiceError::ClientNotFound` if no client has this ID
    /// - `ServiceError::DuplicateId` if the email belongs to another client
    #[instrument(skip(self, name, email))]
    pub async fn update_client(
        &self,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<Client, ServiceError> {
        info!("Updating client");

        let (id, name, email) = parse_client_fields(id, name, email).inspect_err(|e| {
            error!(error = %e, "Rejected client update");
        })?;

        let mut client = self.find_existing(&id).await?;

        if let Some(owner) = self.repository.find_by_email(&email).await?
            && owner.id != id
        {
            warn!(client_id = %id, email = %email, owner = %owner.id, "Email already in use");
            return Err(ServiceError::DuplicateId(format!(
                "email {email} is already registered to another client"
            )));
        }

        client.name = name;
        client.email = email;

        let updated = self
            .repository
            .update(&client)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ServiceError::DuplicateId(format!(
                    "email {} is already registered to another client",
                    client.email
                )),
                other => other.into(),
            })?
            // Deleted since the lookup above
            .ok_or_else(|| ServiceError::client_not_found(&client.id))?;

        info!(client_id = %updated.id, "Client updated");
        Ok(updated)
    }

    /// Delete a client together with its orders, returning the deleted client.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if the ID is blank
    /// - `ServiceError::ClientNotFound` if no client has this ID
    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: &str) -> Result<Client, ServiceError> {
        let id = parse_id(id)?;

        let Some(deleted) = self.repository.delete_by_id(&id).await? else {
            warn!(client_id = %id, "Client not found for deletion");
            return Err(ServiceError::client_not_found(&id));
        };

        info!(client_id = %id, "Client deleted");
        Ok(deleted)
    }

    /// Fetch a client that must exist.
    pub(crate) async fn find_existing(&self, id: &ClientId) -> Result<Client, ServiceError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(client_id = %id, "Client not found");
            ServiceError::client_not_found(id)
        })
    }
}

fn parse_id(id: &str) -> Result<ClientId, ServiceError> {
    ClientId::parse(id).map_err(|e| {
        error!(error = %e, "Invalid client id");
        ServiceError::InvalidData(format!("invalid client id: {e}"))
    })
}

fn parse_client_fields(
    id: &str,
    name: &str,
    email: &str,
) -> Result<(ClientId, ClientName, Email), ServiceError> {
    let id = ClientId::parse(id)
        .map_err(|e| ServiceError::InvalidData(format!("invalid client data: {e}")))?;
    let name = ClientName::parse(name)
        .map_err(|e| ServiceError::InvalidData(format!("invalid client data: {e}")))?;
    let email = Email::parse(email)
        .map_err(|e| ServiceError::InvalidData(format!("invalid client data: {e}")))?;
    Ok((id, name, email))
}

fn duplicate_client(id: &ClientId, email: &Email) -> ServiceError {
    ServiceError::DuplicateId(format!(
        "client with id {id} or email {email} already exists"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::db::MemoryStore;

    fn service() -> ClientService {
        ClientService::new(Arc::new(MemoryStore::new()))
    }

    /// Holds every email lookup at two barriers, between the uniqueness
    /// check and the write that follows it.
    struct GatedRepository {
        inner: Arc<MemoryStore>,
        paused: Barrier,
        resume: Barrier,
    }

    impl GatedRepository {
        fn new(inner: Arc<MemoryStore>) -> Self {
            Self {
                inner,
                paused: Barrier::new(2),
                resume: Barrier::new(2),
            }
        }
    }

    #[async_trait]
    impl ClientRepository for GatedRepository {
        async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
            ClientRepository::find_by_id(&*self.inner, id).await
        }

        async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError> {
            let found = self.inner.find_by_email(email).await;
            self.paused.wait().await;
            self.resume.wait().await;
            found
        }

        async fn exists_by_id(&self, id: &ClientId) -> Result<bool, RepositoryError> {
            self.inner.exists_by_id(id).await
        }

        async fn insert(&self, client: &Client) -> Result<Client, RepositoryError> {
            self.inner.insert(client).await
        }

        async fn update(&self, client: &Client) -> Result<Option<Client>, RepositoryError> {
            self.inner.update(client).await
        }

        async fn delete_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
            self.inner.delete_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
            ClientRepository::find_all(&*self.inner).await
        }
    }

    fn one_winner<T: std::fmt::Debug>(
        first: Result<T, ServiceError>,
        second: Result<T, ServiceError>,
    ) -> (T, ServiceError) {
        match (first, second) {
            (Ok(winner), Err(loser)) | (Err(loser), Ok(winner)) => (winner, loser),
            other => panic!("expected exactly one success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_and_search() {
        let service = service();
        let client = service
            .register_client("J001", "Jose Salazar", "jose.98@gmail.com")
            .await
            .unwrap();

        assert_eq!(client.id.as_str(), "J001");
        assert_eq!(client.registration_date, today());

        let found = service.search_client("J001").await.unwrap();
        assert_eq!(found, client);
    }

    #[tokio::test]
    async fn test_register_duplicate_id_keeps_original() {
        let service = service();
        service
            .register_client("J001", "Jose Salazar", "jose.98@gmail.com")
            .await
            .unwrap();

        let err = service
            .register_client("J001", "Someone Else", "other@gmail.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateId(_)));

        let original = service.search_client("J001").await.unwrap();
        assert_eq!(original.name.as_str(), "Jose Salazar");
        assert_eq!(original.email.as_str(), "jose.98@gmail.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service
            .register_client("J001", "Jose Salazar", "jose.98@gmail.com")
            .await
            .unwrap();

        let err = service
            .register_client("J002", "Jose Clone", "jose.98@gmail.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateId(_)));
        assert!(matches!(
            service.search_client("J002").await,
            Err(ServiceError::ClientNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_register_blank_fields_persist_nothing() {
        let service = service();
        for (id, name, email) in [
            ("", "Jose", "jose@gmail.com"),
            ("J001", "   ", "jose@gmail.com"),
            ("J001", "Jose", ""),
            ("J001", "Jose", "not-an-email"),
        ] {
            let err = service.register_client(id, name, email).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidData(_)), "{id:?} {name:?} {email:?}");
        }
        assert!(service.list_all_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_errors() {
        let service = service();
        assert!(matches!(
            service.search_client("  ").await,
            Err(ServiceError::InvalidData(_))
        ));
        assert!(matches!(
            service.search_client("MISSING").await,
            Err(ServiceError::ClientNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_all_clients() {
        let service = service();
        service.register_client("A", "Ana", "ana@x.com").await.unwrap();
        service.register_client("B", "Beto", "beto@x.com").await.unwrap();

        let ids: Vec<String> = service
            .list_all_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_update_client() {
        let service = service();
        let original = service
            .register_client("J001", "Jose Salazar", "jose.98@gmail.com")
            .await
            .unwrap();

        let updated = service
            .update_client("J001", "Jose S.", "jose.new@gmail.com")
            .await
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.registration_date, original.registration_date);
        assert_eq!(updated.name.as_str(), "Jose S.");
        assert_eq!(updated.email.as_str(), "jose.new@gmail.com");

        // Keeping one's own email is not a duplicate
        service
            .update_client("J001", "Jose Salazar", "jose.new@gmail.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_client_errors() {
        let service = service();
        service.register_client("A", "Ana", "ana@x.com").await.unwrap();
        service.register_client("B", "Beto", "beto@x.com").await.unwrap();

        assert!(matches!(
            service.update_client("MISSING", "Name", "n@x.com").await,
            Err(ServiceError::ClientNotFound(_))
        ));
        assert!(matches!(
            service.update_client("A", "", "ana@x.com").await,
            Err(ServiceError::InvalidData(_))
        ));
        assert!(matches!(
            service.update_client("A", "Ana", "beto@x.com").await,
            Err(ServiceError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_client() {
        let service = service();
        let client = service.register_client("A", "Ana", "ana@x.com").await.unwrap();

        let deleted = service.delete_client("A").await.unwrap();
        assert_eq!(deleted, client);

        assert!(matches!(
            service.delete_client("A").await,
            Err(ServiceError::ClientNotFound(_))
        ));
        assert!(matches!(
            service.delete_client("").await,
            Err(ServiceError::InvalidData(_))
        ));

        // The email is free again
        service.register_client("A2", "Ana", "ana@x.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_registration_of_same_id() {
        let store = Arc::new(MemoryStore::new());
        let service = ClientService::new(Arc::new(GatedRepository::new(store.clone())));

        let (first, second) = tokio::join!(
            service.register_client("J001", "Jose Salazar", "jose.98@gmail.com"),
            service.register_client("J001", "Other Person", "other@gmail.com"),
        );

        let (winner, loser) = one_winner(first, second);
        assert!(matches!(loser, ServiceError::DuplicateId(_)));

        let stored = ClientService::new(store).search_client("J001").await.unwrap();
        assert_eq!(stored, winner);
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_same_email() {
        let store = Arc::new(MemoryStore::new());
        let plain = ClientService::new(store.clone());
        plain.register_client("A", "Ana", "ana@x.com").await.unwrap();
        plain.register_client("B", "Beto", "beto@x.com").await.unwrap();

        let service = ClientService::new(Arc::new(GatedRepository::new(store)));
        let (first, second) = tokio::join!(
            service.update_client("A", "Ana", "shared@x.com"),
            service.update_client("B", "Beto", "shared@x.com"),
        );

        let (winner, loser) = one_winner(first, second);
        assert!(matches!(loser, ServiceError::DuplicateId(_)));

        let owners: Vec<String> = plain
            .list_all_clients()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.email.as_str() == "shared@x.com")
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(owners, [winner.id.to_string()]);
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_client() {
        let store = Arc::new(MemoryStore::new());
        let plain = ClientService::new(store.clone());
        plain.register_client("A", "Ana", "ana@x.com").await.unwrap();

        let repository = Arc::new(GatedRepository::new(store));
        let service = ClientService::new(repository.clone());

        let (updated, ()) = tokio::join!(
            service.update_client("A", "Ana", "ana.new@x.com"),
            async {
                repository.paused.wait().await;
                plain.delete_client("A").await.unwrap();
                repository.resume.wait().await;
            }
        );

        assert!(matches!(updated, Err(ServiceError::ClientNotFound(_))));
        assert!(plain.list_all_clients().await.unwrap().is_empty());
    }
}

// src/services/client_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::ClientRepository, models::clients::Client};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn create_client(
        &self,
        company_id: Uuid,
        name: &str,
        phone: &str,
        email: Option<&str>,
        address: Option<&str>,
        cpf_cnpj: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .create(company_id, name, phone, email, address, cpf_cnpj)
            .await
    }

    pub async fn list_clients(&self, company_id: Uuid) -> Result<Vec<Client>, AppError> {
        self.repo.list(company_id).await
    }

    pub async fn update_client(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
        cpf_cnpj: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .update(company_id, id, name, phone, email, address, cpf_cnpj)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    pub async fn delete_client(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(company_id, id).await?;
        if deleted == 0 {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }
}

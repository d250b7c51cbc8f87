// src/services/catalog_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{MeasurementUnit, Product, Service},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    // --- PRODUTOS ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        company_id: Uuid,
        name: &str,
        category: &str,
        price: Decimal,
        measurement_unit: MeasurementUnit,
        image_url: Option<&str>,
        description: Option<&str>,
    ) -> Result<Product, AppError> {
        if price < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O preço não pode ser negativo.".to_string(),
            ));
        }
        self.repo
            .create_product(company_id, name, category, price, measurement_unit, image_url, description)
            .await
    }

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.repo.list_products(company_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        category: Option<&str>,
        price: Option<Decimal>,
        measurement_unit: Option<MeasurementUnit>,
        image_url: Option<&str>,
        description: Option<&str>,
    ) -> Result<Product, AppError> {
        if let Some(price) = price {
            if price < Decimal::ZERO {
                return Err(AppError::InvalidAmount(
                    "O preço não pode ser negativo.".to_string(),
                ));
            }
        }
        self.repo
            .update_product(company_id, id, name, category, price, measurement_unit, image_url, description)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_product(company_id, id).await?;
        if deleted == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    // --- SERVIÇOS ---

    pub async fn create_service(
        &self,
        company_id: Uuid,
        name: &str,
        price: Decimal,
        duration: Option<&str>,
        description: Option<&str>,
    ) -> Result<Service, AppError> {
        if price < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O preço não pode ser negativo.".to_string(),
            ));
        }
        self.repo
            .create_service(company_id, name, price, duration, description)
            .await
    }

    pub async fn list_services(&self, company_id: Uuid) -> Result<Vec<Service>, AppError> {
        self.repo.list_services(company_id).await
    }

    pub async fn update_service(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        price: Option<Decimal>,
        duration: Option<&str>,
        description: Option<&str>,
    ) -> Result<Service, AppError> {
        if let Some(price) = price {
            if price < Decimal::ZERO {
                return Err(AppError::InvalidAmount(
                    "O preço não pode ser negativo.".to_string(),
                ));
            }
        }
        self.repo
            .update_service(company_id, id, name, price, duration, description)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn delete_service(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_service(company_id, id).await?;
        if deleted == 0 {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }
}

// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{MeasurementUnit, Product, Service},
};

// Catálogo: produtos e serviços que alimentam os itens de orçamento/venda
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

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
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (company_id, name, category, price, measurement_unit, image_url, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(measurement_unit)
        .bind(image_url)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

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
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name             = COALESCE($3, name),
                category         = COALESCE($4, category),
                price            = COALESCE($5, price),
                measurement_unit = COALESCE($6, measurement_unit),
                image_url        = COALESCE($7, image_url),
                description      = COALESCE($8, description)
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(measurement_unit)
        .bind(image_url)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn delete_product(&self, company_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  SERVIÇOS
    // =========================================================================

    pub async fn create_service(
        &self,
        company_id: Uuid,
        name: &str,
        price: Decimal,
        duration: Option<&str>,
        description: Option<&str>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (company_id, name, price, duration, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(price)
        .bind(duration)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list_services(&self, company_id: Uuid) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_service(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn update_service(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        price: Option<Decimal>,
        duration: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                name        = COALESCE($3, name),
                price       = COALESCE($4, price),
                duration    = COALESCE($5, duration),
                description = COALESCE($6, description)
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(duration)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn delete_service(&self, company_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

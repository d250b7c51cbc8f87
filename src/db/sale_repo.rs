// src/db/sale_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        quotes::{ItemSnapshot, PaymentMethod, ProductionStatus},
        sales::{Sale, SaleItem, SaleStatus},
    },
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        client_id: Uuid,
        client_name: &str,
        client_phone: Option<&str>,
        quote_id: Option<Uuid>,
        total: Decimal,
        payment_method: PaymentMethod,
        status: SaleStatus,
        production_status: Option<ProductionStatus>,
        delivery_date: Option<NaiveDate>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (company_id, client_id, client_name, client_phone, quote_id, total, payment_method, status, production_status, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(client_id)
        .bind(client_name)
        .bind(client_phone)
        .bind(quote_id)
        .bind(total)
        .bind(payment_method)
        .bind(status)
        .bind(production_status)
        .bind(delivery_date)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        item: &ItemSnapshot,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (sale_id, product_id, service_id, name, quantity, width, height, unit_price, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(item.product_id)
        .bind(item.service_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.width)
        .bind(item.height)
        .bind(item.unit_price)
        .bind(item.total)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn list_headers(&self, company_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find_scoped(&self, company_id: Uuid, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    pub async fn find_scoped_for_update<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE company_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(sale)
    }

    pub async fn items_for<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    pub async fn items_for_company(&self, company_id: Uuid) -> Result<Vec<SaleItem>, AppError> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT si.* FROM sale_items si
            JOIN sales s ON s.id = si.sale_id
            WHERE s.company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // Patch explícito do cabeçalho (marcar como paga é o caso comum)
    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        status: Option<SaleStatus>,
        payment_method: Option<PaymentMethod>,
        delivery_date: Option<NaiveDate>,
    ) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                status         = COALESCE($3, status),
                payment_method = COALESCE($4, payment_method),
                delivery_date  = COALESCE($5, delivery_date)
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(status)
        .bind(payment_method)
        .bind(delivery_date)
        .fetch_optional(executor)
        .await?;

        Ok(sale)
    }

    pub async fn update_production_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ProductionStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE sales SET production_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Espelha o status de produção nas vendas que nasceram do orçamento
    pub async fn update_production_status_by_quote<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
        status: ProductionStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE sales SET production_status = $2 WHERE quote_id = $1")
            .bind(quote_id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        // itens caem junto via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM sales WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

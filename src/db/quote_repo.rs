// src/db/quote_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::quotes::{ItemSnapshot, Payment, PaymentMethod, ProductionStatus, Quote, QuoteItem, QuoteStatus},
};

#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    // =========================================================================
    //  CABEÇALHO
    // =========================================================================

    pub async fn insert_quote<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        client_id: Uuid,
        client_name: &str,
        client_phone: Option<&str>,
        total: Decimal,
        valid_until: DateTime<Utc>,
        delivery_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // status e status de produção nascem nos defaults do schema
        // (pending / waiting_approval)
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (company_id, client_id, client_name, client_phone, total, valid_until, delivery_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(client_id)
        .bind(client_name)
        .bind(client_phone)
        .bind(total)
        .bind(valid_until)
        .bind(delivery_date)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(quote)
    }

    pub async fn list_headers(&self, company_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    pub async fn find_scoped(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    // Versão para dentro de transações que vão mutar o orçamento:
    // trava a linha para dois converts concorrentes não passarem juntos.
    pub async fn find_scoped_for_update<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE company_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(quote)
    }

    // Consulta pública da página de acompanhamento: sem filtro de empresa
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quote)
    }

    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        client_id: Option<Uuid>,
        client_name: Option<&str>,
        client_phone: Option<&str>,
        valid_until: Option<DateTime<Utc>>,
        delivery_date: Option<NaiveDate>,
        notes: Option<&str>,
        status: Option<QuoteStatus>,
    ) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET
                client_id     = COALESCE($3, client_id),
                client_name   = COALESCE($4, client_name),
                client_phone  = COALESCE($5, client_phone),
                valid_until   = COALESCE($6, valid_until),
                delivery_date = COALESCE($7, delivery_date),
                notes         = COALESCE($8, notes),
                status        = COALESCE($9, status)
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(client_id)
        .bind(client_name)
        .bind(client_phone)
        .bind(valid_until)
        .bind(delivery_date)
        .bind(notes)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(quote)
    }

    pub async fn update_total<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        total: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE quotes SET total = $2 WHERE id = $1")
            .bind(id)
            .bind(total)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: QuoteStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE quotes SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
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
        sqlx::query("UPDATE quotes SET production_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        // itens e pagamentos caem junto via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM quotes WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
        item: &ItemSnapshot,
    ) -> Result<QuoteItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, QuoteItem>(
            r#"
            INSERT INTO quote_items (quote_id, product_id, service_id, name, quantity, width, height, unit_price, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(quote_id)
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

    pub async fn items_for<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
    ) -> Result<Vec<QuoteItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, QuoteItem>(
            "SELECT * FROM quote_items WHERE quote_id = $1 ORDER BY id",
        )
        .bind(quote_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    // Todos os itens da empresa de uma vez (evita uma query por orçamento
    // na listagem)
    pub async fn items_for_company(&self, company_id: Uuid) -> Result<Vec<QuoteItem>, AppError> {
        let items = sqlx::query_as::<_, QuoteItem>(
            r#"
            SELECT qi.* FROM quote_items qi
            JOIN quotes q ON q.id = qi.quote_id
            WHERE q.company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn delete_items<'e, E>(&self, executor: E, quote_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM quote_items WHERE quote_id = $1")
            .bind(quote_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    pub async fn insert_payment<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO quote_payments (quote_id, amount, method)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(quote_id)
        .bind(amount)
        .bind(method)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }

    pub async fn payments_for<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
    ) -> Result<Vec<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM quote_payments WHERE quote_id = $1 ORDER BY created_at ASC",
        )
        .bind(quote_id)
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }

    pub async fn payments_for_company(&self, company_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT qp.* FROM quote_payments qp
            JOIN quotes q ON q.id = qp.quote_id
            WHERE q.company_id = $1
            ORDER BY qp.created_at ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn delete_payment<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
        payment_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM quote_payments WHERE quote_id = $1 AND id = $2",
        )
        .bind(quote_id)
        .bind(payment_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // Soma do que já foi pago (a fonte da verdade do status de pagamento)
    pub async fn sum_payments<'e, E>(
        &self,
        executor: E,
        quote_id: Uuid,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM quote_payments WHERE quote_id = $1",
        )
        .bind(quote_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}

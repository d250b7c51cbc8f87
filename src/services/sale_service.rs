// src/services/sale_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ClientRepository, QuoteRepository, SaleRepository},
    models::{
        quotes::{PaymentMethod, ProductionStatus},
        sales::{Sale, SaleDetail, SaleItem, SaleStatus},
    },
    services::{
        items::{NewItemPayload, resolve_items},
        notification,
        quote_service::ProductionStatusChange,
    },
};

#[derive(Clone)]
pub struct SaleService {
    repo: SaleRepository,
    quote_repo: QuoteRepository,
    client_repo: ClientRepository,
    catalog_repo: CatalogRepository,
    public_base_url: String,
}

impl SaleService {
    pub fn new(
        repo: SaleRepository,
        quote_repo: QuoteRepository,
        client_repo: ClientRepository,
        catalog_repo: CatalogRepository,
        public_base_url: String,
    ) -> Self {
        Self {
            repo,
            quote_repo,
            client_repo,
            catalog_repo,
            public_base_url,
        }
    }

    pub async fn list_sales(&self, company_id: Uuid) -> Result<Vec<SaleDetail>, AppError> {
        let sales = self.repo.list_headers(company_id).await?;
        let mut items_by_sale: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
        for item in self.repo.items_for_company(company_id).await? {
            items_by_sale.entry(item.sale_id).or_default().push(item);
        }

        Ok(sales
            .into_iter()
            .map(|sale| {
                let items = items_by_sale.remove(&sale.id).unwrap_or_default();
                SaleDetail { sale, items }
            })
            .collect())
    }

    pub async fn get_sale(&self, company_id: Uuid, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .repo
            .find_scoped(company_id, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        self.load_detail(sale).await
    }

    // Venda direta, sem passar por orçamento
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        client_id: Uuid,
        items: &[NewItemPayload],
        payment_method: PaymentMethod,
        delivery_date: Option<NaiveDate>,
    ) -> Result<SaleDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let client = self
            .client_repo
            .find(company_id, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let snapshots = resolve_items(&self.catalog_repo, company_id, items).await?;
        let total: Decimal = snapshots.iter().map(|s| s.total).sum();

        let mut tx = executor.begin().await?;

        let sale = self
            .repo
            .insert_sale(
                &mut *tx,
                company_id,
                client.id,
                &client.name,
                Some(&client.phone),
                None,
                total,
                payment_method,
                SaleStatus::Pending,
                None,
                delivery_date,
            )
            .await?;

        let mut inserted = Vec::with_capacity(snapshots.len());
        for snapshot in &snapshots {
            inserted.push(self.repo.insert_item(&mut *tx, sale.id, snapshot).await?);
        }

        tx.commit().await?;

        Ok(SaleDetail {
            sale,
            items: inserted,
        })
    }

    // Patch explícito: marcar como paga/cancelada, trocar forma de
    // pagamento ou data de entrega
    pub async fn update_sale<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        status: Option<SaleStatus>,
        payment_method: Option<PaymentMethod>,
        delivery_date: Option<NaiveDate>,
    ) -> Result<SaleDetail, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = self
            .repo
            .update_header(
                executor,
                company_id,
                id,
                status,
                payment_method,
                delivery_date,
            )
            .await?
            .ok_or(AppError::SaleNotFound)?;

        self.load_detail(sale).await
    }

    pub async fn delete_sale(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(company_id, id).await?;
        if deleted == 0 {
            return Err(AppError::SaleNotFound);
        }
        Ok(())
    }

    // O espelho do lado da venda: mudou aqui, o orçamento de origem
    // (quando existe) muda junto, na mesma transação.
    pub async fn update_production_status<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        sale_id: Uuid,
        new_status: ProductionStatus,
    ) -> Result<ProductionStatusChange, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let sale = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, sale_id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        self.repo
            .update_production_status(&mut *tx, sale_id, new_status)
            .await?;

        if let Some(quote_id) = sale.quote_id {
            self.quote_repo
                .update_production_status(&mut *tx, quote_id, new_status)
                .await?;
        }

        tx.commit().await?;

        let whatsapp_link = if new_status.notifies_client() {
            // O link público de acompanhamento é sempre o do orçamento de
            // origem quando há um; venda direta usa o próprio id.
            let tracking_id = sale.quote_id.unwrap_or(sale.id);
            notification::production_update_link(
                &sale.client_name,
                sale.client_phone.as_deref(),
                tracking_id,
                new_status,
                &self.public_base_url,
            )
        } else {
            None
        };

        Ok(ProductionStatusChange {
            production_status: new_status,
            whatsapp_link,
        })
    }

    async fn load_detail(&self, sale: Sale) -> Result<SaleDetail, AppError> {
        let items = self.repo.items_for(self.repo.pool(), sale.id).await?;
        Ok(SaleDetail { sale, items })
    }
}

// src/services/quote_service.rs

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ClientRepository, QuoteRepository, SaleRepository},
    models::{
        quotes::{
            ItemSnapshot, PaymentMethod, ProductionStatus, Quote, QuoteDetail, QuoteItem,
            QuoteStatus,
        },
        sales::{SaleDetail, SaleStatus},
    },
    services::{
        items::{NewItemPayload, resolve_items},
        notification,
    },
};

#[derive(Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
    sale_repo: SaleRepository,
    client_repo: ClientRepository,
    catalog_repo: CatalogRepository,
    public_base_url: String,
}

// Resultado de uma mudança de status de produção: o link de WhatsApp só
// vem preenchido quando a etapa avisa o cliente (pronto / entregue).
#[derive(Debug)]
pub struct ProductionStatusChange {
    pub production_status: ProductionStatus,
    pub whatsapp_link: Option<String>,
}

impl QuoteService {
    pub fn new(
        repo: QuoteRepository,
        sale_repo: SaleRepository,
        client_repo: ClientRepository,
        catalog_repo: CatalogRepository,
        public_base_url: String,
    ) -> Self {
        Self {
            repo,
            sale_repo,
            client_repo,
            catalog_repo,
            public_base_url,
        }
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    pub async fn list_quotes(&self, company_id: Uuid) -> Result<Vec<QuoteDetail>, AppError> {
        let quotes = self.repo.list_headers(company_id).await?;
        let mut items_by_quote: HashMap<Uuid, Vec<QuoteItem>> = HashMap::new();
        for item in self.repo.items_for_company(company_id).await? {
            items_by_quote.entry(item.quote_id).or_default().push(item);
        }
        let mut payments_by_quote: HashMap<Uuid, Vec<_>> = HashMap::new();
        for payment in self.repo.payments_for_company(company_id).await? {
            payments_by_quote
                .entry(payment.quote_id)
                .or_default()
                .push(payment);
        }

        Ok(quotes
            .into_iter()
            .map(|quote| {
                let items = items_by_quote.remove(&quote.id).unwrap_or_default();
                let payments = payments_by_quote.remove(&quote.id).unwrap_or_default();
                QuoteDetail {
                    quote,
                    items,
                    payments,
                }
            })
            .collect())
    }

    pub async fn get_quote(&self, company_id: Uuid, id: Uuid) -> Result<QuoteDetail, AppError> {
        let quote = self
            .repo
            .find_scoped(company_id, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        self.load_detail(quote).await
    }

    pub async fn create_quote<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        client_id: Uuid,
        items: &[NewItemPayload],
        valid_days: i64,
        delivery_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<QuoteDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Snapshot do cliente no momento da criação
        let client = self
            .client_repo
            .find(company_id, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        // Resolve itens contra o catálogo antes de abrir a transação
        let snapshots = resolve_items(&self.catalog_repo, company_id, items).await?;
        let total: Decimal = snapshots.iter().map(|s| s.total).sum();
        let valid_until = Utc::now() + Duration::days(valid_days.max(1));

        let mut tx = executor.begin().await?;

        let quote = self
            .repo
            .insert_quote(
                &mut *tx,
                company_id,
                client.id,
                &client.name,
                Some(&client.phone),
                total,
                valid_until,
                delivery_date,
                notes,
            )
            .await?;

        let mut inserted = Vec::with_capacity(snapshots.len());
        for snapshot in &snapshots {
            inserted.push(self.repo.insert_item(&mut *tx, quote.id, snapshot).await?);
        }

        tx.commit().await?;

        Ok(QuoteDetail {
            quote,
            items: inserted,
            payments: Vec::new(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_quote<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        client_id: Option<Uuid>,
        items: Option<&[NewItemPayload]>,
        valid_days: Option<i64>,
        delivery_date: Option<NaiveDate>,
        notes: Option<&str>,
        status: Option<QuoteStatus>,
    ) -> Result<QuoteDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Só aprovação/rejeição são mudanças manuais de status; o restante
        // é derivado (pagamentos) ou fruto da conversão.
        if let Some(status) = status {
            if !matches!(
                status,
                QuoteStatus::Pending | QuoteStatus::Approved | QuoteStatus::Rejected
            ) {
                return Err(AppError::InvalidStatusChange(
                    "Este status é controlado pelos pagamentos ou pela conversão.".to_string(),
                ));
            }
        }

        // Novo cliente selecionado: refaz o snapshot de nome/telefone
        let client = match client_id {
            Some(client_id) => Some(
                self.client_repo
                    .find(company_id, client_id)
                    .await?
                    .ok_or(AppError::ClientNotFound)?,
            ),
            None => None,
        };

        let snapshots = match items {
            Some(items) => Some(resolve_items(&self.catalog_repo, company_id, items).await?),
            None => None,
        };

        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        if current.status == QuoteStatus::Converted {
            return Err(AppError::QuoteAlreadyConverted);
        }

        // A validade conta a partir da criação, não da edição
        let valid_until = valid_days.map(|days| current.created_at + Duration::days(days.max(1)));

        let quote = self
            .repo
            .update_header(
                &mut *tx,
                company_id,
                id,
                client.as_ref().map(|c| c.id),
                client.as_ref().map(|c| c.name.as_str()),
                client.as_ref().map(|c| c.phone.as_str()),
                valid_until,
                delivery_date,
                notes,
                status,
            )
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        // Itens trocados em bloco: apaga e reinsere, recalculando o total
        let quote = if let Some(snapshots) = snapshots {
            self.repo.delete_items(&mut *tx, id).await?;
            for snapshot in &snapshots {
                self.repo.insert_item(&mut *tx, id, snapshot).await?;
            }
            let total: Decimal = snapshots.iter().map(|s| s.total).sum();
            self.repo.update_total(&mut *tx, id, total).await?;
            Quote { total, ..quote }
        } else {
            quote
        };

        tx.commit().await?;

        self.load_detail(quote).await
    }

    pub async fn delete_quote(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(company_id, id).await?;
        if deleted == 0 {
            return Err(AppError::QuoteNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    pub async fn add_payment<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        quote_id: Uuid,
        raw_amount: &str,
        method: PaymentMethod,
    ) -> Result<QuoteDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let amount = crate::common::money::parse_positive_amount(raw_amount)?;

        let mut tx = executor.begin().await?;

        let quote = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        if quote.status == QuoteStatus::Converted {
            return Err(AppError::QuoteAlreadyConverted);
        }

        self.repo
            .insert_payment(&mut *tx, quote_id, amount, method)
            .await?;

        // Recalcula o status a partir do somatório, nunca incrementalmente
        let paid = self.repo.sum_payments(&mut *tx, quote_id).await?;
        let new_status = status_for_ledger(paid, quote.total);
        if new_status != quote.status {
            self.repo.update_status(&mut *tx, quote_id, new_status).await?;
        }

        tx.commit().await?;

        self.get_quote(company_id, quote_id).await
    }

    pub async fn remove_payment<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        quote_id: Uuid,
        payment_id: Uuid,
    ) -> Result<QuoteDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let quote = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        if quote.status == QuoteStatus::Converted {
            return Err(AppError::QuoteAlreadyConverted);
        }

        let deleted = self
            .repo
            .delete_payment(&mut *tx, quote_id, payment_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::PaymentNotFound);
        }

        // Removeu pagamento, o status acompanha o que sobrou no livro,
        // inclusive para baixo (sem pagamentos volta a pendente).
        let paid = self.repo.sum_payments(&mut *tx, quote_id).await?;
        let new_status = status_for_ledger(paid, quote.total);
        if new_status != quote.status {
            self.repo.update_status(&mut *tx, quote_id, new_status).await?;
        }

        tx.commit().await?;

        self.get_quote(company_id, quote_id).await
    }

    // =========================================================================
    //  CONVERSÃO EM VENDA
    // =========================================================================

    // Caminho só de ida: o orçamento vira 'converted' e a venda nasce na
    // mesma transação (ou nada acontece).
    pub async fn convert_to_sale<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        quote_id: Uuid,
        payment_method: PaymentMethod,
    ) -> Result<SaleDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let quote = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        if quote.status == QuoteStatus::Converted {
            return Err(AppError::QuoteAlreadyConverted);
        }

        let quote_items = self.repo.items_for(&mut *tx, quote_id).await?;

        let sale = self
            .sale_repo
            .insert_sale(
                &mut *tx,
                company_id,
                quote.client_id,
                &quote.client_name,
                quote.client_phone.as_deref(),
                Some(quote.id),
                quote.total,
                payment_method,
                sale_status_for(quote.status),
                Some(quote.production_status),
                quote.delivery_date,
            )
            .await?;

        // Itens copiados por valor: ids novos, mesmos números
        let mut sale_items = Vec::with_capacity(quote_items.len());
        for item in &quote_items {
            let snapshot = snapshot_of(item);
            sale_items.push(self.sale_repo.insert_item(&mut *tx, sale.id, &snapshot).await?);
        }

        self.repo
            .update_status(&mut *tx, quote_id, QuoteStatus::Converted)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🔁 Orçamento {} convertido na venda {}",
            notification::short_order_number(quote_id),
            notification::short_order_number(sale.id)
        );

        Ok(SaleDetail {
            sale,
            items: sale_items,
        })
    }

    // =========================================================================
    //  PRODUÇÃO
    // =========================================================================

    // Transições livres (qualquer etapa para qualquer etapa): a operação
    // usa o campo também para corrigir erro de apontamento.
    pub async fn update_production_status<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        quote_id: Uuid,
        new_status: ProductionStatus,
    ) -> Result<ProductionStatusChange, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let quote = self
            .repo
            .find_scoped_for_update(&mut *tx, company_id, quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        self.repo
            .update_production_status(&mut *tx, quote_id, new_status)
            .await?;

        // Propaga para a venda vinculada na mesma transação
        let mirrored = self
            .sale_repo
            .update_production_status_by_quote(&mut *tx, quote_id, new_status)
            .await?;

        tx.commit().await?;

        if mirrored > 0 {
            tracing::info!(
                "🔗 Status de produção espelhado em {} venda(s) do orçamento {}",
                mirrored,
                notification::short_order_number(quote_id)
            );
        }

        let whatsapp_link = if new_status.notifies_client() {
            notification::production_update_link(
                &quote.client_name,
                quote.client_phone.as_deref(),
                quote.id,
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

    // Projeção pública da página /acompanhar/:id: sem autenticação e sem
    // filtro de empresa, só a visão que o cliente final pode ter.
    pub async fn tracking_view(
        &self,
        quote_id: Uuid,
    ) -> Result<crate::models::tracking::TrackingView, AppError> {
        let quote = self
            .repo
            .find_by_id(quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        let detail = self.load_detail(quote).await?;
        Ok(crate::services::tracking::build_tracking_view(&detail))
    }

    // Link de WhatsApp com o orçamento completo (botão "enviar por WhatsApp")
    pub async fn announcement_link(
        &self,
        company_id: Uuid,
        quote_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let detail = self.get_quote(company_id, quote_id).await?;
        Ok(notification::quote_announcement_link(
            &detail,
            &self.public_base_url,
        ))
    }

    async fn load_detail(&self, quote: Quote) -> Result<QuoteDetail, AppError> {
        let items = self.repo.items_for(self.repo_pool(), quote.id).await?;
        let payments = self.repo.payments_for(self.repo_pool(), quote.id).await?;
        Ok(QuoteDetail {
            quote,
            items,
            payments,
        })
    }

    fn repo_pool(&self) -> &sqlx::PgPool {
        self.repo.pool()
    }
}

// Status derivado do livro de pagamentos. O pagamento que cruza o total
// leva a fully_paid; remoções podem trazer de volta até pending.
pub fn status_for_ledger(paid: Decimal, total: Decimal) -> QuoteStatus {
    if paid <= Decimal::ZERO {
        QuoteStatus::Pending
    } else if paid >= total {
        QuoteStatus::FullyPaid
    } else {
        QuoteStatus::PartiallyPaid
    }
}

// Venda nascida de conversão: já nasce paga se o orçamento estava quitado
pub fn sale_status_for(quote_status: QuoteStatus) -> SaleStatus {
    if quote_status == QuoteStatus::FullyPaid {
        SaleStatus::Paid
    } else {
        SaleStatus::Pending
    }
}

fn snapshot_of(item: &QuoteItem) -> ItemSnapshot {
    ItemSnapshot {
        product_id: item.product_id,
        service_id: item.service_id,
        name: item.name.clone(),
        quantity: item.quantity,
        width: item.width,
        height: item.height,
        unit_price: item.unit_price,
        total: item.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pagamento_parcial_depois_quitacao() {
        // Orçamento de 150: paga 100, fica parcial; paga os 50, quita.
        let total = dec!(150.00);

        let paid = dec!(100.00);
        assert_eq!(status_for_ledger(paid, total), QuoteStatus::PartiallyPaid);
        assert_eq!((total - paid).max(Decimal::ZERO), dec!(50.00));

        let paid = paid + dec!(50.00);
        assert_eq!(status_for_ledger(paid, total), QuoteStatus::FullyPaid);
        assert_eq!((total - paid).max(Decimal::ZERO), dec!(0.00));
    }

    #[test]
    fn pagamento_acima_do_total_quita() {
        assert_eq!(
            status_for_ledger(dec!(200), dec!(150)),
            QuoteStatus::FullyPaid
        );
    }

    #[test]
    fn livro_zerado_volta_a_pendente() {
        assert_eq!(status_for_ledger(dec!(0), dec!(150)), QuoteStatus::Pending);
        assert_eq!(status_for_ledger(dec!(-1), dec!(150)), QuoteStatus::Pending);
    }

    #[test]
    fn venda_de_orcamento_quitado_nasce_paga() {
        assert_eq!(sale_status_for(QuoteStatus::FullyPaid), SaleStatus::Paid);
        assert_eq!(sale_status_for(QuoteStatus::PartiallyPaid), SaleStatus::Pending);
        assert_eq!(sale_status_for(QuoteStatus::Approved), SaleStatus::Pending);
    }

    #[test]
    fn snapshot_copia_valores_do_item() {
        let item = QuoteItem {
            id: Uuid::new_v4(),
            quote_id: Uuid::new_v4(),
            product_id: Some(Uuid::new_v4()),
            service_id: None,
            name: "Lona 440g".to_string(),
            quantity: dec!(3.0),
            width: Some(dec!(2.5)),
            height: Some(dec!(1.2)),
            unit_price: dec!(50.00),
            total: dec!(150.00),
        };

        let snapshot = snapshot_of(&item);
        assert_eq!(snapshot.name, item.name);
        assert_eq!(snapshot.quantity, item.quantity);
        assert_eq!(snapshot.unit_price, item.unit_price);
        assert_eq!(snapshot.total, item.total);
        assert_eq!(snapshot.product_id, item.product_id);
    }
}

// src/services/tracking.rs

use rust_decimal::Decimal;

use crate::{
    models::{
        quotes::{ProductionStatus, QuoteDetail},
        tracking::{TimelineStep, TrackingItem, TrackingPayment, TrackingView},
    },
    services::notification::short_order_number,
};

// Monta a projeção pública de acompanhamento a partir do orçamento
// completo. Puro: a página /acompanhar/:id é só esta função + um lookup.
pub fn build_tracking_view(detail: &QuoteDetail) -> TrackingView {
    let current_index = detail.quote.production_status.step_index();

    let timeline = ProductionStatus::STEPS
        .iter()
        .enumerate()
        .map(|(index, status)| TimelineStep {
            status: *status,
            label: status.label().to_string(),
            completed: index <= current_index,
            current: index == current_index,
        })
        .collect();

    let paid_amount = detail.paid_amount();
    let surplus = paid_amount - detail.quote.total;

    TrackingView {
        order_number: short_order_number(detail.quote.id),
        client_name: detail.quote.client_name.clone(),
        created_at: detail.quote.created_at,
        delivery_date: detail.quote.delivery_date,
        total: detail.quote.total,
        production_status: detail.quote.production_status,
        timeline,
        items: detail
            .items
            .iter()
            .map(|item| TrackingItem {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total,
            })
            .collect(),
        payments: detail
            .payments
            .iter()
            .map(|payment| TrackingPayment {
                amount: payment.amount,
                method: payment.method.label().to_string(),
                created_at: payment.created_at,
            })
            .collect(),
        paid_amount,
        remaining_amount: detail.remaining_amount(),
        surplus_amount: (surplus > Decimal::ZERO).then_some(surplus),
        notes: detail.quote.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::models::quotes::{Payment, PaymentMethod, Quote, QuoteItem, QuoteStatus};

    fn detail(status: ProductionStatus, total: Decimal, payments: Vec<Decimal>) -> QuoteDetail {
        let quote_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let created_at = Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap();

        QuoteDetail {
            quote: Quote {
                id: quote_id,
                company_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                client_name: "Maria da Silva".to_string(),
                client_phone: Some("(71) 99999-0000".to_string()),
                total,
                status: QuoteStatus::Pending,
                production_status: status,
                valid_until: created_at,
                delivery_date: None,
                notes: None,
                created_at,
            },
            items: vec![QuoteItem {
                id: Uuid::new_v4(),
                quote_id,
                product_id: None,
                service_id: None,
                name: "Lona 440g".to_string(),
                quantity: dec!(3.0),
                width: Some(dec!(2.5)),
                height: Some(dec!(1.2)),
                unit_price: dec!(50.00),
                total: dec!(150.00),
            }],
            payments: payments
                .into_iter()
                .map(|amount| Payment {
                    id: Uuid::new_v4(),
                    quote_id,
                    amount,
                    method: PaymentMethod::Pix,
                    created_at,
                })
                .collect(),
        }
    }

    #[test]
    fn linha_do_tempo_marca_etapas_ate_a_atual() {
        let view = build_tracking_view(&detail(ProductionStatus::InProduction, dec!(150), vec![]));

        assert_eq!(view.timeline.len(), 6);
        let completed: Vec<bool> = view.timeline.iter().map(|s| s.completed).collect();
        assert_eq!(completed, vec![true, true, true, false, false, false]);
        assert!(view.timeline[2].current);
        assert_eq!(view.timeline[2].label, "Em Produção");
    }

    #[test]
    fn numero_do_pedido_e_totais() {
        let view = build_tracking_view(&detail(
            ProductionStatus::WaitingApproval,
            dec!(150),
            vec![dec!(100)],
        ));

        assert_eq!(view.order_number, "550E8400");
        assert_eq!(view.paid_amount, dec!(100));
        assert_eq!(view.remaining_amount, dec!(50));
        assert_eq!(view.surplus_amount, None);
    }

    #[test]
    fn excedente_aparece_quando_pagou_a_mais() {
        let view = build_tracking_view(&detail(
            ProductionStatus::Delivered,
            dec!(150),
            vec![dec!(100), dec!(80)],
        ));

        assert_eq!(view.remaining_amount, dec!(0));
        assert_eq!(view.surplus_amount, Some(dec!(30)));
        assert!(view.timeline.iter().all(|s| s.completed));
    }
}

// src/services/items.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::{catalog::MeasurementUnit, quotes::ItemSnapshot},
};

// Uma linha de item como chega do front. Três formas válidas:
// - productId: nome/preço vêm do produto; se o produto é m², manda
//   largura e altura em vez de quantidade
// - serviceId: nome/preço vêm do serviço
// - avulso: nome e unitPrice na mão
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewItemPayload {
    pub product_id: Option<Uuid>,
    pub service_id: Option<Uuid>,

    #[schema(example = "Arte personalizada")]
    pub name: Option<String>,
    #[schema(example = "80.00")]
    pub unit_price: Option<Decimal>,

    #[schema(example = "2.0")]
    pub quantity: Option<Decimal>,
    #[schema(example = "2.5")]
    pub width: Option<Decimal>,
    #[schema(example = "1.2")]
    pub height: Option<Decimal>,
}

// Resolve os payloads contra o catálogo e devolve os snapshots prontos
// para inserção. Tudo que pode falhar de validação falha aqui, antes de
// qualquer escrita.
pub async fn resolve_items(
    catalog: &CatalogRepository,
    company_id: Uuid,
    payloads: &[NewItemPayload],
) -> Result<Vec<ItemSnapshot>, AppError> {
    if payloads.is_empty() {
        return Err(AppError::InvalidItem(
            "Adicione pelo menos um item.".to_string(),
        ));
    }

    let mut snapshots = Vec::with_capacity(payloads.len());

    for payload in payloads {
        let snapshot = if let Some(product_id) = payload.product_id {
            let product = catalog
                .find_product(company_id, product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;

            build_snapshot(
                Some(product.id),
                None,
                product.name,
                product.price,
                Some(product.measurement_unit),
                payload,
            )?
        } else if let Some(service_id) = payload.service_id {
            let service = catalog
                .find_service(company_id, service_id)
                .await?
                .ok_or(AppError::ServiceNotFound)?;

            build_snapshot(None, Some(service.id), service.name, service.price, None, payload)?
        } else {
            // Item avulso: precisa trazer nome e preço
            let name = payload
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| {
                    AppError::InvalidItem("Informe o nome do item avulso.".to_string())
                })?;
            let unit_price = payload.unit_price.ok_or_else(|| {
                AppError::InvalidItem("Informe o preço unitário do item avulso.".to_string())
            })?;

            // Sem produto por trás, largura x altura ainda vale como m²
            let unit = if payload.width.is_some() || payload.height.is_some() {
                Some(MeasurementUnit::M2)
            } else {
                None
            };
            build_snapshot(None, None, name, unit_price, unit, payload)?
        };

        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

// Parte pura: calcula quantidade e total a partir da unidade de medida
fn build_snapshot(
    product_id: Option<Uuid>,
    service_id: Option<Uuid>,
    name: String,
    unit_price: Decimal,
    measurement_unit: Option<MeasurementUnit>,
    payload: &NewItemPayload,
) -> Result<ItemSnapshot, AppError> {
    let (quantity, width, height) = match measurement_unit {
        Some(MeasurementUnit::M2) => {
            let width = payload.width.filter(|w| *w > Decimal::ZERO);
            let height = payload.height.filter(|h| *h > Decimal::ZERO);
            match (width, height) {
                (Some(w), Some(h)) => (w * h, Some(w), Some(h)),
                _ => {
                    return Err(AppError::InvalidItem(
                        "Largura e Altura inválidas.".to_string(),
                    ));
                }
            }
        }
        _ => {
            let quantity = payload
                .quantity
                .filter(|q| *q > Decimal::ZERO)
                .ok_or_else(|| AppError::InvalidItem("Quantidade inválida.".to_string()))?;
            (quantity, None, None)
        }
    };

    Ok(ItemSnapshot {
        product_id,
        service_id,
        total: quantity * unit_price,
        name,
        quantity,
        width,
        height,
        unit_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload() -> NewItemPayload {
        NewItemPayload {
            product_id: None,
            service_id: None,
            name: None,
            unit_price: None,
            quantity: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn item_m2_calcula_quantidade_pela_area() {
        let p = NewItemPayload {
            width: Some(dec!(2.5)),
            height: Some(dec!(1.2)),
            ..payload()
        };
        let snapshot = build_snapshot(
            None,
            None,
            "Lona".to_string(),
            dec!(50),
            Some(MeasurementUnit::M2),
            &p,
        )
        .unwrap();

        assert_eq!(snapshot.quantity, dec!(3.0));
        assert_eq!(snapshot.total, dec!(150.0));
        assert_eq!(snapshot.width, Some(dec!(2.5)));
        assert_eq!(snapshot.height, Some(dec!(1.2)));
    }

    #[test]
    fn item_m2_sem_medidas_falha() {
        let p = NewItemPayload {
            width: Some(dec!(2.5)),
            ..payload()
        };
        let result = build_snapshot(
            None,
            None,
            "Lona".to_string(),
            dec!(50),
            Some(MeasurementUnit::M2),
            &p,
        );
        assert!(result.is_err());
    }

    #[test]
    fn item_por_unidade_usa_quantidade() {
        let p = NewItemPayload {
            quantity: Some(dec!(100)),
            ..payload()
        };
        let snapshot = build_snapshot(
            None,
            None,
            "Cartão de visita".to_string(),
            dec!(0.35),
            Some(MeasurementUnit::Unit),
            &p,
        )
        .unwrap();

        assert_eq!(snapshot.quantity, dec!(100));
        assert_eq!(snapshot.total, dec!(35.00));
        assert_eq!(snapshot.width, None);
    }

    #[test]
    fn quantidade_zero_ou_negativa_falha() {
        let p = NewItemPayload {
            quantity: Some(dec!(0)),
            ..payload()
        };
        assert!(build_snapshot(None, None, "x".into(), dec!(1), None, &p).is_err());

        let p = NewItemPayload {
            quantity: Some(dec!(-2)),
            ..payload()
        };
        assert!(build_snapshot(None, None, "x".into(), dec!(1), None, &p).is_err());
    }
}

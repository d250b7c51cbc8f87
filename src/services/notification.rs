// src/services/notification.rs

// Aviso ao cliente via WhatsApp. Não há envio programático: o sistema
// só monta o link click-to-chat (wa.me) com a mensagem pré-preenchida,
// e quem clica é o operador.

use uuid::Uuid;

use crate::{
    common::money::format_brl,
    models::quotes::{ProductionStatus, QuoteDetail},
};

// "Número" curto do pedido: primeiros 8 caracteres do UUID, maiúsculos
pub fn short_order_number(id: Uuid) -> String {
    id.to_string()[..8].to_uppercase()
}

pub fn tracking_url(base_url: &str, id: Uuid) -> String {
    format!("{}/acompanhar/{}", base_url.trim_end_matches('/'), id)
}

// Mensagem completa de orçamento pronto, com itens e link de
// acompanhamento. None quando o cliente não tem telefone utilizável.
pub fn quote_announcement_link(detail: &QuoteDetail, base_url: &str) -> Option<String> {
    let phone = digits(detail.quote.client_phone.as_deref()?);
    if phone.is_empty() {
        return None;
    }

    let mut message = format!(
        "Olá {}! 🖨️\n\nSeu orçamento *#{}* está pronto!\n\n*Valor Total:* R$ {}\n\n📋 *Itens:*\n",
        detail.quote.client_name,
        short_order_number(detail.quote.id),
        format_brl(detail.quote.total),
    );

    for item in &detail.items {
        message.push_str(&format!(
            "• {} ({}x) - R$ {}\n",
            item.name,
            item.quantity.normalize(),
            format_brl(item.total),
        ));
    }

    message.push_str(&format!(
        "\n🔗 *Acompanhe seu pedido:*\n{}\n\nObrigado pela preferência!",
        tracking_url(base_url, detail.quote.id),
    ));

    Some(click_to_chat(&phone, &message))
}

// Aviso curto de mudança de status (pronto / entregue)
pub fn production_update_link(
    client_name: &str,
    client_phone: Option<&str>,
    order_id: Uuid,
    status: ProductionStatus,
    base_url: &str,
) -> Option<String> {
    let phone = digits(client_phone?);
    if phone.is_empty() {
        return None;
    }

    let message = format!(
        "Olá {}!\n\nO status do seu pedido #{} foi atualizado para: {}\n\nAcompanhe: {}",
        client_name,
        short_order_number(order_id),
        status.label(),
        tracking_url(base_url, order_id),
    );

    Some(click_to_chat(&phone, &message))
}

fn click_to_chat(phone_digits: &str, message: &str) -> String {
    format!(
        "https://wa.me/55{}?text={}",
        phone_digits,
        encode_uri_component(message)
    )
}

fn digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Mesmo conjunto de caracteres livres do encodeURIComponent do JS
fn encode_uri_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for byte in text.as_bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(*byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    #[test]
    fn numero_curto_do_pedido() {
        assert_eq!(short_order_number(id()), "550E8400");
    }

    #[test]
    fn url_de_acompanhamento() {
        assert_eq!(
            tracking_url("https://graficaexpress.com.br/", id()),
            "https://graficaexpress.com.br/acompanhar/550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn telefone_vira_so_digitos() {
        assert_eq!(digits("(71) 99999-0000"), "71999990000");
    }

    #[test]
    fn encode_igual_ao_encodeuricomponent() {
        assert_eq!(encode_uri_component("Olá mundo"), "Ol%C3%A1%20mundo");
        assert_eq!(encode_uri_component("a\nb"), "a%0Ab");
        assert_eq!(encode_uri_component("100% (ok)!"), "100%25%20(ok)!");
    }

    #[test]
    fn link_de_status_montado() {
        let link = production_update_link(
            "Maria",
            Some("(71) 98888-7777"),
            id(),
            ProductionStatus::Ready,
            "https://graficaexpress.com.br",
        )
        .unwrap();

        assert!(link.starts_with("https://wa.me/5571988887777?text="));
        assert!(link.contains("550E8400"));
        // "Pronto para Retirada" URL-encodado
        assert!(link.contains("Pronto%20para%20Retirada"));
    }

    #[test]
    fn sem_telefone_nao_ha_link() {
        assert!(production_update_link("Maria", None, id(), ProductionStatus::Ready, "x").is_none());
        assert!(
            production_update_link("Maria", Some("abc"), id(), ProductionStatus::Ready, "x")
                .is_none()
        );
    }
}

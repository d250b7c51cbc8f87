// src/common/money.rs

use rust_decimal::Decimal;

use crate::common::error::AppError;

// Valores monetários chegam do front de dois jeitos: "cru" ("1500.50")
// ou formatado em pt-BR ("1.500,50", às vezes com "R$" na frente).
// A vírgula decide: se ela aparece, o ponto é separador de milhar.
pub fn parse_amount(input: &str) -> Result<Decimal, AppError> {
    let cleaned = input.trim().trim_start_matches("R$").trim();

    if cleaned.is_empty() {
        return Err(AppError::InvalidAmount(
            "Informe o valor do pagamento.".to_string(),
        ));
    }

    let normalized = if cleaned.contains(',') {
        // Formato brasileiro: 1.500,50
        cleaned.replace('.', "").replace(',', ".")
    } else if is_grouped_integer(cleaned) {
        // "1.500" sem vírgula: agrupamento de milhar, não decimal
        cleaned.replace('.', "")
    } else {
        cleaned.to_string()
    };

    normalized
        .parse::<Decimal>()
        .map_err(|_| AppError::InvalidAmount(format!("Valor monetário inválido: {input}")))
}

// Igual ao parse_amount, mas exige valor estritamente positivo
// (regra dos pagamentos de orçamento).
pub fn parse_positive_amount(input: &str) -> Result<Decimal, AppError> {
    let amount = parse_amount(input)?;
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidAmount(
            "O valor do pagamento deve ser maior que zero.".to_string(),
        ));
    }
    Ok(amount)
}

// "1.234,56", como aparece nas mensagens de WhatsApp
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("{}{},{}", if negative { "-" } else { "" }, int_grouped, frac_part)
}

// Detecta "1.500" / "12.345.678": só dígitos, grupos de 3 após o primeiro
fn is_grouped_integer(s: &str) -> bool {
    let mut parts = s.split('.');
    let Some(first) = parts.next() else {
        return false;
    };
    if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut seen_group = false;
    for part in parts {
        if part.len() != 3 || !part.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        seen_group = true;
    }
    seen_group
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn aceita_formato_brasileiro() {
        assert_eq!(parse_amount("1.500,50").unwrap(), dec!(1500.50));
        assert_eq!(parse_amount("R$ 150,00").unwrap(), dec!(150.00));
        assert_eq!(parse_amount("0,99").unwrap(), dec!(0.99));
    }

    #[test]
    fn aceita_formato_cru() {
        assert_eq!(parse_amount("1500.50").unwrap(), dec!(1500.50));
        assert_eq!(parse_amount("2.5").unwrap(), dec!(2.5));
        assert_eq!(parse_amount("100").unwrap(), dec!(100));
    }

    #[test]
    fn ponto_sem_virgula_em_grupos_de_tres_eh_milhar() {
        assert_eq!(parse_amount("1.500").unwrap(), dec!(1500));
        assert_eq!(parse_amount("12.345.678").unwrap(), dec!(12345678));
    }

    #[test]
    fn rejeita_lixo() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("R$").is_err());
    }

    #[test]
    fn pagamento_exige_valor_positivo() {
        assert!(parse_positive_amount("0,00").is_err());
        assert!(parse_positive_amount("-10").is_err());
        assert_eq!(parse_positive_amount("50,00").unwrap(), dec!(50));
    }

    #[test]
    fn formata_em_reais() {
        assert_eq!(format_brl(dec!(1234.56)), "1.234,56");
        assert_eq!(format_brl(dec!(0.5)), "0,50");
        assert_eq!(format_brl(dec!(1500)), "1.500,00");
        assert_eq!(format_brl(dec!(150.00)), "150,00");
    }
}

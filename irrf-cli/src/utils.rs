use irrf_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

const CURRENCY_PREFIX: &str = "R$";

#[derive(Debug, Error)]
#[error("'{input}' is not an amount: {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// `value_parser` for amount flags.
///
/// Accepts what [`format_brl`] prints, so `R$ 4,161.00`, `4,161.00` and
/// `4161` all parse to the same value. A blank value means zero.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let unprefixed = s.trim().strip_prefix(CURRENCY_PREFIX).unwrap_or(s.trim());
    let digits: String = unprefixed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str_exact(&digits).map_err(|source| ParseDecimalError {
        input: s.to_string(),
        source,
    })
}

/// Formats an amount as Brazilian reais, rounded to the cent, with `,`
/// thousands separators: `R$ 4,161.00`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("R$ {sign}{grouped}.{frac_part}")
}

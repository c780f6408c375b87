//! Core cost calculation functions.
//!
//! Pure functions for the money math - no network or session access.

use rust_decimal::Decimal;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
/// It is the single rounding rule used for every derived amount in the crate.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use autocusto_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, rust_decimal::RoundingStrategy::MidpointNearestEven)
}

/// Parse a localized FIPE price string (`R$ 45.678,90`) into a decimal amount.
///
/// Strips the currency prefix and thousands separators and converts the
/// decimal comma. Unparseable input yields `Decimal::ZERO`: a garbled price
/// produces a zero tax estimate rather than a failed request.
pub fn parse_currency(display: &str) -> Decimal {
    let normalized: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    normalized.parse().unwrap_or(Decimal::ZERO)
}

/// Estimated annual vehicle tax: the parsed reference price times the
/// regional rate, rounded to two places.
pub fn estimated_tax(price_display: &str, rate: Decimal) -> Decimal {
    round_money(parse_currency(price_display) * rate, 2)
}

/// The recurring-expense form. The tax field is derived from the priced
/// vehicle and region; the optional fields are user-owned and absent fields
/// count as zero.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub estimated_tax: Decimal,
    pub fuel_monthly: Option<Decimal>,
    pub insurance_annual: Option<Decimal>,
    pub maintenance_annual: Option<Decimal>,
    pub wash_monthly: Option<Decimal>,
    pub parking_monthly: Option<Decimal>,
    pub toll_monthly: Option<Decimal>,
    pub other_annual: Option<Decimal>,
}

/// Total annual ownership cost: estimated tax plus every expense field,
/// with monthly fields annualized (x12). Always computed from the full form,
/// never patched incrementally.
pub fn total_annual_cost(form: &ExpenseForm) -> Decimal {
    let monthly = form.fuel_monthly.unwrap_or_default()
        + form.wash_monthly.unwrap_or_default()
        + form.parking_monthly.unwrap_or_default()
        + form.toll_monthly.unwrap_or_default();
    let annual = form.insurance_annual.unwrap_or_default()
        + form.maintenance_annual.unwrap_or_default()
        + form.other_annual.unwrap_or_default();

    round_money(form.estimated_tax + monthly * Decimal::from(12) + annual, 2)
}

/// The monthly equivalent of an annual total.
pub fn monthly_equivalent(total_annual: Decimal) -> Decimal {
    round_money(total_annual / Decimal::from(12), 2)
}

/// Render an amount the way the form displays money: `R$ 1.827,16`
/// (pt-BR digit grouping, decimal comma).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_money(amount, 2);
    let negative = rounded.is_sign_negative();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{frac_part}")
}

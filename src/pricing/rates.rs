//! Static IPVA rate table.
//!
//! One entry per Brazilian state (26 states plus the Distrito Federal), each
//! carrying a rate per vehicle category. Reference data only: built once
//! into process-wide immutable state and never mutated during a session.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fipe::VehicleCategory;

/// A state (UF) and its per-category IPVA rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub uf: &'static str,
    pub name: &'static str,
    car: Decimal,
    motorcycle: Decimal,
    truck: Decimal,
}

impl Region {
    /// The tax rate for a vehicle category, as a fraction in `[0, 1)`.
    pub fn rate(&self, category: VehicleCategory) -> Decimal {
        match category {
            VehicleCategory::Car => self.car,
            VehicleCategory::Motorcycle => self.motorcycle,
            VehicleCategory::Truck => self.truck,
        }
    }
}

/// The full rate table, in display order.
pub fn regions() -> &'static [Region] {
    static TABLE: OnceLock<Vec<Region>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Look up a region by its UF code. `None` for codes outside the table.
pub fn region(uf: &str) -> Option<&'static Region> {
    regions().iter().find(|r| r.uf == uf)
}

fn entry(
    uf: &'static str,
    name: &'static str,
    car: Decimal,
    motorcycle: Decimal,
    truck: Decimal,
) -> Region {
    Region {
        uf,
        name,
        car,
        motorcycle,
        truck,
    }
}

fn build_table() -> Vec<Region> {
    vec![
        entry("AC", "Acre", dec!(0.02), dec!(0.01), dec!(0.01)),
        entry("AL", "Alagoas", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("AP", "Amapá", dec!(0.03), dec!(0.015), dec!(0.01)),
        entry("AM", "Amazonas", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("BA", "Bahia", dec!(0.025), dec!(0.025), dec!(0.01)),
        entry("CE", "Ceará", dec!(0.035), dec!(0.025), dec!(0.01)),
        entry("DF", "Distrito Federal", dec!(0.035), dec!(0.02), dec!(0.01)),
        entry("ES", "Espírito Santo", dec!(0.02), dec!(0.01), dec!(0.01)),
        entry("GO", "Goiás", dec!(0.0375), dec!(0.03), dec!(0.0125)),
        entry("MA", "Maranhão", dec!(0.025), dec!(0.01), dec!(0.01)),
        entry("MT", "Mato Grosso", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("MS", "Mato Grosso do Sul", dec!(0.035), dec!(0.02), dec!(0.015)),
        entry("MG", "Minas Gerais", dec!(0.04), dec!(0.02), dec!(0.01)),
        entry("PA", "Pará", dec!(0.025), dec!(0.01), dec!(0.01)),
        entry("PB", "Paraíba", dec!(0.025), dec!(0.02), dec!(0.01)),
        entry("PR", "Paraná", dec!(0.035), dec!(0.035), dec!(0.01)),
        entry("PE", "Pernambuco", dec!(0.03), dec!(0.025), dec!(0.01)),
        entry("PI", "Piauí", dec!(0.025), dec!(0.02), dec!(0.01)),
        entry("RJ", "Rio de Janeiro", dec!(0.04), dec!(0.02), dec!(0.01)),
        entry("RN", "Rio Grande do Norte", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("RS", "Rio Grande do Sul", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("RO", "Rondônia", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("RR", "Roraima", dec!(0.03), dec!(0.02), dec!(0.01)),
        entry("SC", "Santa Catarina", dec!(0.02), dec!(0.01), dec!(0.01)),
        entry("SP", "São Paulo", dec!(0.04), dec!(0.02), dec!(0.015)),
        entry("SE", "Sergipe", dec!(0.025), dec!(0.02), dec!(0.01)),
        entry("TO", "Tocantins", dec!(0.02), dec!(0.02), dec!(0.01)),
    ]
}

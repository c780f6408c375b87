//! Response DTOs for the calculator API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::fipe::{PricedVehicle, SelectionOption};
use crate::pricing::calculators;

/// Money value for JSON responses: the decimal amount plus its localized
/// rendering for direct display.
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub display: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal) -> Self {
        Self {
            display: calculators::format_currency(amount),
            amount,
        }
    }
}

/// Response for session creation.
#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// Response for a cascade-stage selection: the refreshed option list for the
/// next stage. `stale` marks a lookup that lost to a newer selection; the
/// options then reflect the winning selection.
#[derive(Debug, Serialize)]
pub struct StageOptionsResponse {
    pub stale: bool,
    pub options: Vec<SelectionOption>,
}

/// The priced vehicle as shown on the page.
#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub marca: String,
    pub modelo: String,
    pub ano_modelo: i32,
    pub combustivel: String,
    pub codigo_fipe: String,
    pub mes_referencia: String,
    pub valor: String,
}

impl From<&PricedVehicle> for VehicleSummary {
    fn from(vehicle: &PricedVehicle) -> Self {
        Self {
            marca: vehicle.marca.clone(),
            modelo: vehicle.modelo.clone(),
            ano_modelo: vehicle.ano_modelo,
            combustivel: vehicle.combustivel.clone(),
            codigo_fipe: vehicle.codigo_fipe.clone(),
            mes_referencia: vehicle.mes_referencia.clone(),
            valor: vehicle.valor.clone(),
        }
    }
}

/// Response for a model-year selection: the resolved vehicle, plus the tax
/// estimate when a region is already chosen.
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub stale: bool,
    pub vehicle: Option<VehicleSummary>,
    pub estimated_tax: Option<MoneyResponse>,
}

/// Response for a region selection: the recomputed tax estimate, when a
/// vehicle is already resolved.
#[derive(Debug, Serialize)]
pub struct TaxUpdateResponse {
    pub estimated_tax: Option<MoneyResponse>,
}

/// Response for the cost estimate: the derived tax plus the aggregated
/// annual and monthly totals.
#[derive(Debug, Serialize)]
pub struct CostSummaryResponse {
    pub estimated_tax: MoneyResponse,
    pub total_annual: MoneyResponse,
    pub total_monthly: MoneyResponse,
}

//! Request DTOs for the calculator API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::fipe::VehicleCategory;

/// Request to choose the vehicle category.
#[derive(Debug, Deserialize)]
pub struct SelectCategoryRequest {
    pub category: VehicleCategory,
}

/// Request to choose (or clear) a cascade stage by its FIPE code.
#[derive(Debug, Deserialize)]
pub struct SelectCodeRequest {
    #[serde(default)]
    pub codigo: Option<String>,
}

/// Request to choose (or clear) the state used for the tax rate.
#[derive(Debug, Deserialize)]
pub struct SelectRegionRequest {
    #[serde(default)]
    pub uf: Option<String>,
}

/// The user-owned expense fields. Absent fields count as zero.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub fuel_monthly: Option<Decimal>,
    #[serde(default)]
    pub insurance_annual: Option<Decimal>,
    #[serde(default)]
    pub maintenance_annual: Option<Decimal>,
    #[serde(default)]
    pub wash_monthly: Option<Decimal>,
    #[serde(default)]
    pub parking_monthly: Option<Decimal>,
    #[serde(default)]
    pub toll_monthly: Option<Decimal>,
    #[serde(default)]
    pub other_annual: Option<Decimal>,
}

//! Domain records returned by the FIPE reference service.

use serde::{Deserialize, Deserializer, Serialize};

/// Vehicle category, which scopes every FIPE lookup and selects the
/// applicable tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Car,
    Motorcycle,
    Truck,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 3] = [Self::Car, Self::Motorcycle, Self::Truck];

    /// Pluralized path segment used by the FIPE API.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Car => "carros",
            Self::Motorcycle => "motos",
            Self::Truck => "caminhoes",
        }
    }

    /// Stable identifier used in the JSON API and form values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Truck => "truck",
        }
    }

    /// Display label for the calculator page.
    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "Carro",
            Self::Motorcycle => "Moto",
            Self::Truck => "Caminhão",
        }
    }
}

/// One entry of a cascade stage: a selectable code plus its display label.
///
/// FIPE serves `codigo` as a string on some endpoints and as a number on
/// others (model codes); both normalize to a string here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    #[serde(deserialize_with = "code_as_string")]
    pub codigo: String,
    pub nome: String,
}

fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    })
}

/// The resolved reference-pricing record for one manufacturer/model/model-year.
///
/// `valor` is a localized currency string (e.g. `R$ 45.678,90`) exactly as
/// FIPE serves it; parsing happens in the cost aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PricedVehicle {
    pub tipo_veiculo: i32,
    pub valor: String,
    pub marca: String,
    pub modelo: String,
    pub ano_modelo: i32,
    pub combustivel: String,
    pub codigo_fipe: String,
    pub mes_referencia: String,
    pub sigla_combustivel: String,
}

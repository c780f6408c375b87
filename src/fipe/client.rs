//! HTTP client for the FIPE reference service.
//!
//! Four dependent lookups, each scoped by vehicle category. An operation
//! whose upstream code is absent short-circuits without touching the network.
//! Failures surface to the caller; no retry is attempted.

use serde::Deserialize;

use super::models::{PricedVehicle, SelectionOption, VehicleCategory};

/// Lookup error taxonomy: transport failure, upstream rejection, or a
/// response body that does not match the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("FIPE request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("FIPE returned status {status}")]
    UpstreamStatus { status: reqwest::StatusCode },

    #[error("Unexpected FIPE response shape: {0}")]
    Shape(String),
}

/// The models endpoint nests its list under a `modelos` field.
#[derive(Debug, Deserialize)]
struct ModelsEnvelope {
    modelos: Vec<SelectionOption>,
}

/// Typed client for the FIPE reference service.
#[derive(Debug, Clone)]
pub struct FipeClient {
    http: reqwest::Client,
    base_url: String,
}

impl FipeClient {
    /// Create a client against the given API root
    /// (e.g. `https://parallelum.com.br/fipe/api/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// List every manufacturer for the category, in FIPE's order.
    pub async fn list_manufacturers(
        &self,
        category: VehicleCategory,
    ) -> Result<Vec<SelectionOption>, LookupError> {
        let url = format!("{}/{}/marcas", self.base_url, category.path_segment());
        self.get_json(&url).await
    }

    /// List the models of a manufacturer. Resolves to an empty list without
    /// a network call when no manufacturer is selected.
    pub async fn list_models(
        &self,
        category: VehicleCategory,
        manufacturer: Option<&str>,
    ) -> Result<Vec<SelectionOption>, LookupError> {
        let Some(manufacturer) = manufacturer else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/{}/marcas/{}/modelos",
            self.base_url,
            category.path_segment(),
            manufacturer
        );
        let envelope: ModelsEnvelope = self.get_json(&url).await?;
        Ok(envelope.modelos)
    }

    /// List the model-years of a model. Resolves to an empty list without a
    /// network call when the upstream chain is incomplete.
    pub async fn list_model_years(
        &self,
        category: VehicleCategory,
        manufacturer: Option<&str>,
        model: Option<&str>,
    ) -> Result<Vec<SelectionOption>, LookupError> {
        let (Some(manufacturer), Some(model)) = (manufacturer, model) else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/{}/marcas/{}/modelos/{}/anos",
            self.base_url,
            category.path_segment(),
            manufacturer,
            model
        );
        self.get_json(&url).await
    }

    /// Fetch the priced vehicle record for a complete selection. Resolves to
    /// `None` without a network call when the upstream chain is incomplete.
    pub async fn get_priced_vehicle(
        &self,
        category: VehicleCategory,
        manufacturer: Option<&str>,
        model: Option<&str>,
        model_year: Option<&str>,
    ) -> Result<Option<PricedVehicle>, LookupError> {
        let (Some(manufacturer), Some(model), Some(model_year)) = (manufacturer, model, model_year)
        else {
            return Ok(None);
        };

        let url = format!(
            "{}/{}/marcas/{}/modelos/{}/anos/{}",
            self.base_url,
            category.path_segment(),
            manufacturer,
            model,
            model_year
        );
        let vehicle: PricedVehicle = self.get_json(&url).await?;
        Ok(Some(vehicle))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UpstreamStatus { status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LookupError::Shape(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_manufacturers_preserves_order() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/carros/marcas");
                then.status(200).json_body(json!([
                    {"codigo": "59", "nome": "VW - VolksWagen"},
                    {"codigo": "21", "nome": "Fiat"},
                    {"codigo": "23", "nome": "GM - Chevrolet"}
                ]));
            })
            .await;

        let client = FipeClient::new(server.base_url());
        let options = client
            .list_manufacturers(VehicleCategory::Car)
            .await
            .unwrap();

        mock.assert_async().await;
        let codes: Vec<&str> = options.iter().map(|o| o.codigo.as_str()).collect();
        assert_eq!(codes, vec!["59", "21", "23"]);
    }

    #[tokio::test]
    async fn test_list_models_unwraps_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/motos/marcas/77/modelos");
                then.status(200).json_body(json!({
                    "modelos": [
                        {"codigo": 4440, "nome": "CG 160 Fan"},
                        {"codigo": 4441, "nome": "CG 160 Start"}
                    ],
                    "anos": []
                }));
            })
            .await;

        let client = FipeClient::new(server.base_url());
        let options = client
            .list_models(VehicleCategory::Motorcycle, Some("77"))
            .await
            .unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].codigo, "4440");
        assert_eq!(options[0].nome, "CG 160 Fan");
    }

    #[tokio::test]
    async fn test_list_models_missing_field_is_shape_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/carros/marcas/59/modelos");
                then.status(200).json_body(json!({"anos": []}));
            })
            .await;

        let client = FipeClient::new(server.base_url());
        let result = client.list_models(VehicleCategory::Car, Some("59")).await;

        assert!(matches!(result, Err(LookupError::Shape(_))));
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/caminhoes/marcas");
                then.status(503);
            })
            .await;

        let client = FipeClient::new(server.base_url());
        let result = client.list_manufacturers(VehicleCategory::Truck).await;

        match result {
            Err(LookupError::UpstreamStatus { status }) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected upstream status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_absent_upstream_code_short_circuits() {
        let server = MockServer::start_async().await;
        let catch_all = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = FipeClient::new(server.base_url());

        let models = client.list_models(VehicleCategory::Car, None).await.unwrap();
        assert!(models.is_empty());

        let years = client
            .list_model_years(VehicleCategory::Car, Some("59"), None)
            .await
            .unwrap();
        assert!(years.is_empty());

        let vehicle = client
            .get_priced_vehicle(VehicleCategory::Car, Some("59"), Some("5940"), None)
            .await
            .unwrap();
        assert!(vehicle.is_none());

        assert_eq!(catch_all.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_get_priced_vehicle() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/carros/marcas/59/modelos/5940/anos/2020-1");
                then.status(200).json_body(json!({
                    "TipoVeiculo": 1,
                    "Valor": "R$ 45.678,90",
                    "Marca": "VW - VolksWagen",
                    "Modelo": "Gol 1.0 Flex 12V 5p",
                    "AnoModelo": 2020,
                    "Combustivel": "Gasolina",
                    "CodigoFipe": "005340-6",
                    "MesReferencia": "julho de 2025",
                    "SiglaCombustivel": "G"
                }));
            })
            .await;

        let client = FipeClient::new(server.base_url());
        let vehicle = client
            .get_priced_vehicle(VehicleCategory::Car, Some("59"), Some("5940"), Some("2020-1"))
            .await
            .unwrap()
            .expect("complete selection resolves a vehicle");

        assert_eq!(vehicle.marca, "VW - VolksWagen");
        assert_eq!(vehicle.valor, "R$ 45.678,90");
    }
}

//! JSON API handlers for the calculator session flow.
//!
//! Each cascade handler runs one state-machine transition: take the fetch
//! ticket under the session lock, release the lock for the FIPE round-trip,
//! then re-acquire it and apply the result under the ticket's generation
//! guard. Overlapping requests for the same session may interleave at the
//! network await; the guard ensures only the lookup matching the most recent
//! selection lands (last selection wins).

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::calculators::{self, ExpenseForm};
use crate::pricing::rates;
use crate::pricing::requests::{
    EstimateRequest, SelectCategoryRequest, SelectCodeRequest, SelectRegionRequest,
};
use crate::pricing::responses::{
    CostSummaryResponse, MoneyResponse, SessionCreatedResponse, StageOptionsResponse,
    TaxUpdateResponse, VehicleResponse, VehicleSummary,
};
use crate::selection::SelectionState;
use crate::AppState;

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Open a fresh calculator session
pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let session_id = state.sessions.create().await;
    tracing::debug!(%session_id, "Session created");
    Json(SessionCreatedResponse { session_id })
}

/// Choose the vehicle category and repopulate the manufacturer stage.
pub async fn select_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectCategoryRequest>,
) -> Result<Json<StageOptionsResponse>> {
    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let ticket = session.lock().await.select_category(request.category);

    let options = state
        .fipe
        .list_manufacturers(ticket.category)
        .await
        .map_err(|source| AppError::Lookup {
            stage: "manufacturers",
            source,
        })?;

    let mut selection = session.lock().await;
    let applied = selection.apply_manufacturers(ticket.generation, options);
    Ok(Json(StageOptionsResponse {
        stale: !applied,
        options: selection.manufacturer_options().to_vec(),
    }))
}

/// Choose (or clear) the manufacturer and repopulate the model stage.
pub async fn select_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectCodeRequest>,
) -> Result<Json<StageOptionsResponse>> {
    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let ticket = session.lock().await.select_manufacturer(request.codigo);
    let Some(ticket) = ticket else {
        return Ok(Json(StageOptionsResponse {
            stale: false,
            options: Vec::new(),
        }));
    };

    let options = state
        .fipe
        .list_models(ticket.category, ticket.manufacturer.as_deref())
        .await
        .map_err(|source| AppError::Lookup {
            stage: "models",
            source,
        })?;

    let mut selection = session.lock().await;
    let applied = selection.apply_models(ticket.generation, options);
    Ok(Json(StageOptionsResponse {
        stale: !applied,
        options: selection.model_options().to_vec(),
    }))
}

/// Choose (or clear) the model and repopulate the model-year stage.
pub async fn select_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectCodeRequest>,
) -> Result<Json<StageOptionsResponse>> {
    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let ticket = session.lock().await.select_model(request.codigo);
    let Some(ticket) = ticket else {
        return Ok(Json(StageOptionsResponse {
            stale: false,
            options: Vec::new(),
        }));
    };

    let options = state
        .fipe
        .list_model_years(
            ticket.category,
            ticket.manufacturer.as_deref(),
            ticket.model.as_deref(),
        )
        .await
        .map_err(|source| AppError::Lookup {
            stage: "model-years",
            source,
        })?;

    let mut selection = session.lock().await;
    let applied = selection.apply_model_years(ticket.generation, options);
    Ok(Json(StageOptionsResponse {
        stale: !applied,
        options: selection.model_year_options().to_vec(),
    }))
}

/// Choose (or clear) the model-year and resolve the priced vehicle.
pub async fn select_model_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectCodeRequest>,
) -> Result<Json<VehicleResponse>> {
    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let ticket = session.lock().await.select_model_year(request.codigo);
    let Some(ticket) = ticket else {
        return Ok(Json(VehicleResponse {
            stale: false,
            vehicle: None,
            estimated_tax: None,
        }));
    };

    let fetched = state
        .fipe
        .get_priced_vehicle(
            ticket.category,
            ticket.manufacturer.as_deref(),
            ticket.model.as_deref(),
            ticket.model_year.as_deref(),
        )
        .await;

    let mut selection = session.lock().await;
    match fetched {
        Ok(vehicle) => {
            let applied = selection.apply_vehicle(ticket.generation, vehicle);
            Ok(Json(VehicleResponse {
                stale: !applied,
                vehicle: selection.vehicle().map(VehicleSummary::from),
                estimated_tax: current_tax(&selection).map(MoneyResponse::new),
            }))
        }
        Err(source) => {
            // Roll the cascade back to its model choice; a superseded
            // lookup's failure is ignored by the generation guard.
            selection.fail_vehicle(ticket.generation);
            Err(AppError::Lookup {
                stage: "vehicle",
                source,
            })
        }
    }
}

/// Choose (or clear) the state. Recomputes the tax estimate from the
/// already-resolved vehicle without another FIPE round-trip.
pub async fn select_region(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRegionRequest>,
) -> Result<Json<TaxUpdateResponse>> {
    if let Some(uf) = &request.uf {
        if rates::region(uf).is_none() {
            return Err(AppError::UnknownRegion(uf.clone()));
        }
    }

    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let mut selection = session.lock().await;
    selection.select_region(request.uf);
    Ok(Json(TaxUpdateResponse {
        estimated_tax: current_tax(&selection).map(MoneyResponse::new),
    }))
}

/// Aggregate the expense form into annual and monthly totals.
pub async fn estimate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<CostSummaryResponse>> {
    let session = state.sessions.get(id).await.ok_or(AppError::SessionNotFound)?;

    let estimated_tax = {
        let selection = session.lock().await;
        current_tax(&selection).unwrap_or(Decimal::ZERO)
    };

    let form = ExpenseForm {
        estimated_tax,
        fuel_monthly: request.fuel_monthly,
        insurance_annual: request.insurance_annual,
        maintenance_annual: request.maintenance_annual,
        wash_monthly: request.wash_monthly,
        parking_monthly: request.parking_monthly,
        toll_monthly: request.toll_monthly,
        other_annual: request.other_annual,
    };

    let total_annual = calculators::total_annual_cost(&form);
    let total_monthly = calculators::monthly_equivalent(total_annual);

    Ok(Json(CostSummaryResponse {
        estimated_tax: MoneyResponse::new(estimated_tax),
        total_annual: MoneyResponse::new(total_annual),
        total_monthly: MoneyResponse::new(total_monthly),
    }))
}

/// The current tax estimate, present once a vehicle is resolved and a
/// region is chosen.
fn current_tax(selection: &SelectionState) -> Option<Decimal> {
    let vehicle = selection.vehicle()?;
    let category = selection.category()?;
    let region = rates::region(selection.region()?)?;
    Some(calculators::estimated_tax(
        &vehicle.valor,
        region.rate(category),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::fipe::FipeClient;
    use crate::{routes, AppState};

    fn app(fipe_base_url: &str) -> Router {
        let state = AppState::new(FipeClient::new(fipe_base_url));
        routes::router().with_state(state)
    }

    async fn request(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn open_session(app: &Router) -> String {
        let (status, body) = request(app, "POST", "/api/sessions", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn mock_cascade(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/carros/marcas");
                then.status(200)
                    .json_body(json!([{"codigo": "59", "nome": "VW - VolksWagen"}]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/carros/marcas/59/modelos");
                then.status(200).json_body(json!({
                    "modelos": [{"codigo": 5940, "nome": "Gol 1.0 Flex 12V 5p"}],
                    "anos": []
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/carros/marcas/59/modelos/5940/anos");
                then.status(200)
                    .json_body(json!([{"codigo": "2020-1", "nome": "2020 Gasolina"}]));
            })
            .await;
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
    }

    #[tokio::test]
    async fn test_health() {
        let app = app("http://unused.invalid");
        let (status, body) = request(&app, "GET", "/api/health", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let server = MockServer::start_async().await;
        mock_cascade(&server).await;
        let app = app(&server.base_url());
        let id = open_session(&app).await;

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/category"),
            json!({"category": "car"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stale"], false);
        assert_eq!(body["options"][0]["codigo"], "59");

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/manufacturer"),
            json!({"codigo": "59"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"][0]["codigo"], "5940");

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/model"),
            json!({"codigo": "5940"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"][0]["codigo"], "2020-1");

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/model-year"),
            json!({"codigo": "2020-1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vehicle"]["codigo_fipe"], "005340-6");
        // No region chosen yet, so no tax estimate.
        assert_eq!(body["estimated_tax"], Value::Null);

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/region"),
            json!({"uf": "SP"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimated_tax"]["amount"], "1827.16");
        assert_eq!(body["estimated_tax"]["display"], "R$ 1.827,16");

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/estimate"),
            json!({"fuel_monthly": 300, "insurance_annual": 1200}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_annual"]["amount"], "6627.16");
        assert_eq!(body["total_monthly"]["amount"], "552.26");
        assert_eq!(body["total_annual"]["display"], "R$ 6.627,16");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = app("http://unused.invalid");
        let (status, body) = request(
            &app,
            "POST",
            "/api/sessions/00000000-0000-0000-0000-000000000000/category",
            json!({"category": "car"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");
    }

    #[tokio::test]
    async fn test_lookup_failure_names_the_stage() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/carros/marcas");
            then.status(500);
        });
        let app = app(&server.base_url());
        let id = open_session(&app).await;

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/category"),
            json!({"category": "car"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["stage"], "manufacturers");
    }

    #[tokio::test]
    async fn test_unknown_region_is_rejected() {
        let app = app("http://unused.invalid");
        let id = open_session(&app).await;

        let (status, _) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/region"),
            json!({"uf": "XX"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_estimate_without_vehicle_uses_zero_tax() {
        let app = app("http://unused.invalid");
        let id = open_session(&app).await;

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/estimate"),
            json!({"fuel_monthly": 100}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimated_tax"]["amount"], "0");
        assert_eq!(body["total_annual"]["amount"], "1200");
    }

    #[tokio::test]
    async fn test_clearing_manufacturer_returns_empty_options() {
        let server = MockServer::start_async().await;
        mock_cascade(&server).await;
        let app = app(&server.base_url());
        let id = open_session(&app).await;

        request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/category"),
            json!({"category": "car"}),
        )
        .await;

        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/sessions/{id}/manufacturer"),
            json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stale"], false);
        assert_eq!(body["options"].as_array().unwrap().len(), 0);
    }
}

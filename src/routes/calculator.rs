//! Calculator page handler

use askama::Template;
use axum::response::Html;

use crate::error::Result;
use crate::fipe::VehicleCategory;
use crate::pricing::rates::{self, Region};

/// Calculator page template
#[derive(Template)]
#[template(path = "calculator.html")]
struct CalculatorTemplate {
    categories: Vec<CategoryOption>,
    regions: &'static [Region],
}

struct CategoryOption {
    value: &'static str,
    label: &'static str,
}

/// The single calculator page. Categories and states are reference data
/// rendered server-side; the cascade itself runs against the JSON API.
pub async fn page() -> Result<Html<String>> {
    let categories = VehicleCategory::ALL
        .iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            label: c.label(),
        })
        .collect();

    let template = CalculatorTemplate {
        categories,
        regions: rates::regions(),
    };

    Ok(Html(template.render()?))
}

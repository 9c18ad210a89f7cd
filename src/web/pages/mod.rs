pub mod areas;
pub mod assets;
pub mod auth;
pub mod employees;
pub mod lands;
pub mod owners;
pub mod regions;
pub mod tasks;

use crate::api::{ApiClient, ApiProvider};
use crate::error::FormError;
use crate::map::status_color;
use crate::web::core::PageResult;
use crate::web::templates::base::base_template;
use crate::web::templates::components::header_section;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use maud::{html, Markup};

const LAND_MAP_ID: &str = "land-map";
const AREA_MAP_ID: &str = "area-map";

fn page(title: &str, content: Markup) -> Markup {
    base_template(title, true, &content)
}

fn status_badge(status: &str) -> Markup {
    html! {
        span.status style=(format!("background-color: {}", status_color(status))) { (status) }
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// A form page sent back with its validation message.
fn rejected(e: &FormError, render: impl FnOnce(&str) -> Markup) -> Response {
    let notice = e.to_string();
    (StatusCode::UNPROCESSABLE_ENTITY, render(&notice)).into_response()
}

fn options<I, V, L>(items: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (V, L)>,
    V: ToString,
    L: ToString,
{
    items
        .into_iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

pub async fn dashboard<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let (regions, lands) = (api.regions(), api.lands());
    let (regions, lands) = futures::try_join!(regions.list(), lands.list())?;
    let areas: usize = lands.iter().map(|l| l.area_count as usize).sum();

    Ok(page(
        "Dashboard",
        html! {
            (header_section("Dashboard", Some("Regions, lands and the areas inside them")))
            ul {
                li { a href="/regions" { (regions.len()) " regions" } }
                li { a href="/lands" { (lands.len()) " lands" } }
                li { (areas) " areas" }
            }
        },
    )
    .into_response())
}


#[cfg(test)]
mod tests {
    use super::testing::{body, signed_in};
    use super::*;
    use crate::api::mock::MockApiProvider;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboard_counts() {
        let provider = MockApiProvider::new()
            .with_response(Method::Get, "/region", json!([{"id": 1, "name": "Delta"}]))
            .with_response(
                Method::Get,
                "/land",
                json!([{"id": 2, "areaCount": 3}, {"id": 4, "areaCount": 1}]),
            );
        let api = signed_in(provider);

        let html = body(dashboard(api.clone()).await.unwrap()).await;
        assert!(html.contains("1 regions"));
        assert!(html.contains("2 lands"));
        assert!(html.contains("4 areas"));
        assert!(api
            .provider
            .requests()
            .await
            .iter()
            .all(|r| r.token.as_deref() == Some("jwt")));
    }
}

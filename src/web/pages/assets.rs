use super::{page, rejected, status_badge, text};
use crate::api::{ApiClient, ApiProvider};
use crate::web::core::PageResult;
use crate::web::forms::AssetForm;
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, select_field, table_section,
};
use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn assets<T>(
    Extension(api): Extension<ApiClient<T>>,
    Query(query): Query<AssetQuery>,
) -> PageResult
where
    T: ApiProvider,
{
    let category = query.category.filter(|c| !c.trim().is_empty());
    let assets = match &category {
        Some(category) => api.assets().by_category(category).await?,
        None => api.assets().list().await?,
    };
    let rows = assets
        .iter()
        .map(|asset| {
            vec![
                html! { (asset.name) },
                html! { (asset.r#type) },
                html! { (status_badge(&asset.status)) },
                html! { (asset.category) },
                html! { (asset.quantity) },
                html! { (text(&asset.location)) },
                html! { (text(&asset.area_name)) },
                html! { a href=(format!("/assets/{}/edit", asset.id)) { "Edit" } },
                delete_button(&format!("/assets/{}/delete", asset.id), None),
            ]
        })
        .collect();

    Ok(page(
        "Assets",
        html! {
            (header_section("Assets", category.as_deref()))
            a href="/assets/new" { "Add asset" }
            form method="get" action="/assets" {
                input type="text" name="category" placeholder="Category" value=(category.as_deref().unwrap_or_default());
                button type="submit" { "Filter" }
            }
            (table_section(
                &["Name", "Type", "Status", "Category", "Quantity", "Location", "Area", "", ""],
                rows,
            ))
        },
    )
    .into_response())
}

fn frequencies() -> Vec<(String, String)> {
    ["daily", "weekly", "monthly"]
        .into_iter()
        .map(|f| (f.to_string(), f.to_string()))
        .collect()
}

/// Age and watering fields only apply when the type is "plant".
fn asset_form_markup(title: &str, action: &str, form: &AssetForm, notice: Option<&str>) -> Markup {
    page(
        title,
        html! {
            (header_section(title, None))
            (notice_section(notice))
            form.stacked method="post" action=(action) {
                (input_field("Name", "text", "name", &form.name, true))
                (input_field("Description", "text", "description", &form.description, false))
                (input_field("Type", "text", "type", &form.r#type, false))
                (input_field("Status", "text", "status", &form.status, false))
                (input_field("Category", "text", "category", &form.category, false))
                (input_field("Quantity", "number", "quantity", &form.quantity, false))
                (input_field("Value", "number", "value", &form.value, false))
                (input_field("Location", "text", "location", &form.location, false))
                (input_field("Purchased", "date", "purchase_date", &form.purchase_date, false))
                (input_field("Area id", "number", "area_id", &form.area_id, false))
                fieldset {
                    legend { "Plant" }
                    (input_field("Age (years)", "number", "age", &form.age, false))
                    (select_field("Watering", "watering_frequency", &frequencies(), &form.watering_frequency, false))
                    (input_field("Amount (l)", "number", "watering_amount", &form.watering_amount, false))
                    (input_field("Watering notes", "text", "watering_description", &form.watering_description, false))
                }
                button type="submit" { "Save asset" }
            }
        },
    )
}

pub async fn new_asset() -> Markup {
    asset_form_markup("New asset", "/assets/new", &AssetForm::default(), None)
}

pub async fn create_asset<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<AssetForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.assets().create(payload).await?;
            Ok(Redirect::to("/assets").into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| {
            asset_form_markup("New asset", "/assets/new", &form, Some(notice))
        })),
    }
}

pub async fn edit_asset<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let asset = api.assets().get(id).await?;
    let action = format!("/assets/{id}/edit");
    Ok(asset_form_markup("Edit asset", &action, &AssetForm::from_asset(&asset), None).into_response())
}

pub async fn update_asset<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<AssetForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.assets().update(id, &payload.with_defaults()).await?;
            Ok(Redirect::to("/assets").into_response())
        }
        Err(e) => {
            let action = format!("/assets/{id}/edit");
            Ok(rejected(&e, |notice| {
                asset_form_markup("Edit asset", &action, &form, Some(notice))
            }))
        }
    }
}

pub async fn delete_asset<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.assets().delete(id).await?;
    Ok(Redirect::to("/assets").into_response())
}

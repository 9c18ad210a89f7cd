use super::{page, rejected};
use crate::api::{ApiClient, ApiProvider};
use crate::models::region::Region;
use crate::web::core::PageResult;
use crate::web::forms::RegionForm;
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, table_section,
};
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};

fn region_fields(form: &RegionForm) -> Markup {
    html! {
        (input_field("Name", "text", "name", &form.name, true))
        (input_field("Description", "text", "description", &form.description, true))
    }
}

pub async fn regions<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let regions = api.regions().list().await?;
    Ok(regions_markup(&regions, &RegionForm::default(), None).into_response())
}

fn regions_markup(
    regions: &[Region],
    form: &RegionForm,
    notice: Option<&str>,
) -> Markup {
    let rows = regions
        .iter()
        .map(|region| {
            vec![
                html! { (region.name) },
                html! { (region.description) },
                html! {
                    @for (i, land) in region.lands.iter().enumerate() {
                        @if i > 0 { ", " }
                        a href=(format!("/lands/{}", land.id)) { (land.name) }
                    }
                },
                html! { a href=(format!("/regions/{}/edit", region.id)) { "Edit" } },
                delete_button(&format!("/regions/{}/delete", region.id), None),
            ]
        })
        .collect();

    page(
        "Regions",
        html! {
            (header_section("Regions", None))
            (notice_section(notice))
            (table_section(&["Name", "Description", "Lands", "", ""], rows))
            span.subheading { "Add region" }
            form.stacked method="post" action="/regions" {
                (region_fields(form))
                button type="submit" { "Create region" }
            }
        },
    )
}

pub async fn create_region<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<RegionForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.regions().create(&payload).await?;
            Ok(Redirect::to("/regions").into_response())
        }
        Err(e) => {
            let regions = api.regions().list().await?;
            Ok(rejected(&e, |notice| regions_markup(&regions, &form, Some(notice))))
        }
    }
}

fn edit_markup(id: i64, form: &RegionForm, notice: Option<&str>) -> Markup {
    page(
        "Edit region",
        html! {
            (header_section("Edit region", Some(form.name.as_str())))
            (notice_section(notice))
            form.stacked method="post" action=(format!("/regions/{id}/edit")) {
                (region_fields(form))
                button type="submit" { "Save" }
            }
        },
    )
}

pub async fn edit_region<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let region = api.regions().get(id).await?;
    Ok(edit_markup(id, &RegionForm::from_region(&region), None).into_response())
}

pub async fn update_region<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<RegionForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.regions().update(id, &payload).await?;
            Ok(Redirect::to("/regions").into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| edit_markup(id, &form, Some(notice)))),
    }
}

pub async fn delete_region<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.regions().delete(id).await?;
    Ok(Redirect::to("/regions").into_response())
}

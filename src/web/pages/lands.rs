use super::{page, rejected, status_badge, LAND_MAP_ID};
use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::map::drawing;
use crate::models::land::Land;
use crate::models::owner::Owner;
use crate::models::region::Region;
use crate::utils::coordinates::ViewState;
use crate::web::core::PageResult;
use crate::web::forms::LandForm;
use crate::web::templates::components::{
    delete_button, header_section, notice_section, table_section,
};
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};

pub async fn lands<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let lands = api.lands().list().await?;
    let rows = lands
        .iter()
        .map(|land| {
            vec![
                html! { a href=(format!("/lands/{}", land.id)) { (land.name) } },
                html! { (land.address) },
                html! { (land.area) " m²" },
                html! { (land.price) },
                html! { (land.region.name) },
                html! { (land.owner.name) },
                html! { (land.area_count) },
            ]
        })
        .collect();

    Ok(page(
        "Lands",
        html! {
            (header_section("Lands", None))
            a href="/lands/new" { "Add land" }
            (table_section(
                &["Name", "Address", "Area", "Price", "Region", "Owner", "Areas"],
                rows,
            ))
        },
    )
    .into_response())
}

/// Where a land form posts and how it is labelled.
struct LandFormTarget {
    title: &'static str,
    action: String,
    submit: &'static str,
}

impl LandFormTarget {
    fn create() -> Self {
        Self {
            title: "New land",
            action: "/lands/new".to_string(),
            submit: "Create land",
        }
    }

    fn edit(id: i64) -> Self {
        Self {
            title: "Edit land",
            action: format!("/lands/{id}/edit"),
            submit: "Save land",
        }
    }
}

fn land_form_markup(
    target: &LandFormTarget,
    owners: &[Owner],
    regions: &[Region],
    form: &LandForm,
    view_state: &ViewState,
    notice: Option<&str>,
) -> Markup {
    page(
        target.title,
        html! {
            (header_section(target.title, Some("Draw the boundary on the map")))
            (notice_section(notice))
            form.stacked method="post" action=(target.action) {
                label { "Name" input type="text" name="name" value=(form.name) required; }
                label { "Address" input type="text" name="address" value=(form.address) required; }
                label { "Area (m²)" input type="number" step="any" min="0" name="area" value=(form.area) required; }
                label { "Price" input type="number" step="any" min="0" name="price" value=(form.price) required; }
                label { "Location" input type="text" name="location" value=(form.location); }
                label {
                    "Owner"
                    select name="owner_id" required {
                        option value="" { "Choose an owner" }
                        @for owner in owners {
                            option value=(owner.id) selected[form.owner_id == owner.id.to_string()] { (owner.name) }
                        }
                    }
                }
                label {
                    "Region"
                    select name="region_id" required {
                        option value="" { "Choose a region" }
                        @for region in regions {
                            option value=(region.id) selected[form.region_id == region.id.to_string()] { (region.name) }
                        }
                    }
                }
                (drawing::render(LAND_MAP_ID, view_state))
                button type="submit" { (target.submit) }
            }
        },
    )
}

/// Owners and regions feed the land form's selects.
async fn choices<T>(api: &ApiClient<T>) -> Result<(Vec<Owner>, Vec<Region>), ApiError>
where
    T: ApiProvider,
{
    let (owners, regions) = (api.owners(), api.regions());
    futures::try_join!(owners.list(), regions.list())
}

pub async fn new_land<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let (owners, regions) = choices(&api).await?;
    Ok(land_form_markup(
        &LandFormTarget::create(),
        &owners,
        &regions,
        &LandForm::default(),
        &ViewState::default(),
        None,
    )
    .into_response())
}

pub async fn create_land<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<LandForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            let land = api.lands().create(&payload).await?;
            Ok(Redirect::to(&format!("/lands/{}", land.id)).into_response())
        }
        Err(e) => {
            let (owners, regions) = choices(&api).await?;
            let view_state = form.map.view_state().unwrap_or_default();
            Ok(rejected(&e, |notice| {
                land_form_markup(
                    &LandFormTarget::create(),
                    &owners,
                    &regions,
                    &form,
                    &view_state,
                    Some(notice),
                )
            }))
        }
    }
}

fn coordinate_notice(land: &Land) -> Option<&'static str> {
    (!land.coordinate.is_fully_parsed())
        .then_some("Some stored coordinates could not be read; defaults are shown instead.")
}

pub async fn land_detail<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let (lands, areas) = (api.lands(), api.areas());
    let (mut land, areas) = futures::try_join!(lands.get(id), areas.by_land(id))?;
    if !areas.is_empty() {
        land.areas = areas;
    }
    let map = land.map();

    let rows = land
        .areas
        .iter()
        .map(|area| {
            vec![
                html! { a href=(format!("/areas/{}", area.id)) { (area.name) } },
                html! { (status_badge(&area.status)) },
                html! { (area.area) " m²" },
                html! { (area.usage) },
                html! { (area.classification.as_str()) },
                html! {
                    @for (i, employee) in area.employees.iter().enumerate() {
                        @if i > 0 { ", " }
                        (employee.name)
                    }
                },
                delete_button(
                    &format!("/areas/{}/delete", area.id),
                    Some(("land_id", land.id.to_string())),
                ),
            ]
        })
        .collect();

    Ok(page(
        &land.name,
        html! {
            (header_section(&land.name, Some(land.address.as_str())))
            (notice_section(coordinate_notice(&land)))
            a href=(format!("/lands/{}/edit", land.id)) { "Edit land" }
            dl {
                dt { "Region" } dd { (land.region.name) }
                dt { "Owner" } dd { a href=(format!("/owners/{}", land.owner.id)) { (land.owner.name) } " " (land.owner.phone) }
                dt { "Area" } dd { (land.area) " m²" }
                dt { "Price" } dd { (land.price) }
                dt { "Location" } dd { (land.location) }
                @for property in &land.properties {
                    dt { (property.key) } dd { (property.value.to_string()) }
                }
                @if let Some(url) = &land.planning_map_url {
                    dt { "Planning map" } dd { a href=(url) target="_blank" { (url) } }
                }
            }
            (map.render(LAND_MAP_ID))
            span.subheading { "Areas" }
            a href=(format!("/areas/new?land_id={}", land.id)) { "Add area" }
            (table_section(
                &["Name", "Status", "Size", "Usage", "Classification", "Employees", ""],
                rows,
            ))
            (delete_button(&format!("/lands/{}/delete", land.id), None))
        },
    )
    .into_response())
}

pub async fn edit_land<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let lands = api.lands();
    let (land, (owners, regions)) = futures::try_join!(lands.get(id), choices(&api))?;
    let form = LandForm::from_land(&land);
    Ok(land_form_markup(
        &LandFormTarget::edit(id),
        &owners,
        &regions,
        &form,
        &land.view_state(),
        coordinate_notice(&land),
    )
    .into_response())
}

/// Attributes go to the land record; the boundary goes to the land's
/// coordinate endpoint.
pub async fn update_land<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<LandForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate_update() {
        Ok((update, view_state)) => {
            api.lands().update(id, &update).await?;
            api.land_coordinates().put(id, &view_state).await?;
            Ok(Redirect::to(&format!("/lands/{id}")).into_response())
        }
        Err(e) => {
            let (owners, regions) = choices(&api).await?;
            let view_state = form.map.view_state().unwrap_or_default();
            Ok(rejected(&e, |notice| {
                land_form_markup(
                    &LandFormTarget::edit(id),
                    &owners,
                    &regions,
                    &form,
                    &view_state,
                    Some(notice),
                )
            }))
        }
    }
}

pub async fn delete_land<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.lands().delete(id).await?;
    Ok(Redirect::to("/lands").into_response())
}

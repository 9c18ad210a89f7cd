use super::{page, rejected, text};
use crate::api::{ApiClient, ApiProvider};
use crate::web::core::PageResult;
use crate::web::forms::OwnerForm;
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, table_section,
};
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};

pub async fn owners<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let owners = api.owners().list().await?;
    let rows = owners
        .iter()
        .map(|owner| {
            vec![
                html! { a href=(format!("/owners/{}", owner.id)) { (owner.name) } },
                html! { (owner.phone) },
                html! { (owner.address) },
                html! { (text(&owner.email)) },
                html! { (owner.land_count) },
            ]
        })
        .collect();

    Ok(page(
        "Owners",
        html! {
            (header_section("Owners", None))
            a href="/owners/new" { "Add owner" }
            (table_section(&["Name", "Phone", "Address", "Email", "Lands"], rows))
        },
    )
    .into_response())
}

fn owner_form_markup(title: &str, action: &str, form: &OwnerForm, notice: Option<&str>) -> Markup {
    page(
        title,
        html! {
            (header_section(title, None))
            (notice_section(notice))
            form.stacked method="post" action=(action) {
                (input_field("Name", "text", "name", &form.name, true))
                (input_field("Phone", "tel", "phone", &form.phone, true))
                (input_field("Address", "text", "address", &form.address, true))
                (input_field("Email", "email", "email", &form.email, true))
                (input_field("Identity number", "text", "identity_number", &form.identity_number, false))
                (input_field("Description", "text", "description", &form.description, false))
                button type="submit" { "Save owner" }
            }
        },
    )
}

pub async fn new_owner() -> Markup {
    owner_form_markup("New owner", "/owners/new", &OwnerForm::default(), None)
}

pub async fn create_owner<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<OwnerForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            let owner = api.owners().create(&payload).await?;
            Ok(Redirect::to(&format!("/owners/{}", owner.id)).into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| {
            owner_form_markup("New owner", "/owners/new", &form, Some(notice))
        })),
    }
}

pub async fn owner_detail<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let owners = api.owners();
    let (owner, lands) = futures::try_join!(owners.get(id), owners.lands(id))?;
    let rows = lands
        .iter()
        .map(|land| {
            vec![
                html! { a href=(format!("/lands/{}", land.id)) { (land.name) } },
                html! { (land.address) },
                html! { (land.area) " m²" },
                html! { (land.region.name) },
            ]
        })
        .collect();

    Ok(page(
        &owner.name,
        html! {
            (header_section(&owner.name, Some(owner.address.as_str())))
            a href=(format!("/owners/{id}/edit")) { "Edit owner" }
            dl {
                dt { "Phone" } dd { (owner.phone) }
                dt { "Email" } dd { (text(&owner.email)) }
                dt { "Identity number" } dd { (text(&owner.identity_number)) }
                dt { "Description" } dd { (text(&owner.description)) }
            }
            span.subheading { "Lands" }
            (table_section(&["Name", "Address", "Area", "Region"], rows))
            (delete_button(&format!("/owners/{id}/delete"), None))
        },
    )
    .into_response())
}

pub async fn edit_owner<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let owner = api.owners().get(id).await?;
    let action = format!("/owners/{id}/edit");
    Ok(owner_form_markup("Edit owner", &action, &OwnerForm::from_owner(&owner), None).into_response())
}

pub async fn update_owner<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<OwnerForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.owners().update(id, &payload).await?;
            Ok(Redirect::to(&format!("/owners/{id}")).into_response())
        }
        Err(e) => {
            let action = format!("/owners/{id}/edit");
            Ok(rejected(&e, |notice| {
                owner_form_markup("Edit owner", &action, &form, Some(notice))
            }))
        }
    }
}

pub async fn delete_owner<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.owners().delete(id).await?;
    Ok(Redirect::to("/owners").into_response())
}

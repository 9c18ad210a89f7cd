use super::{options, page, rejected, text};
use crate::api::{ApiClient, ApiProvider};
use crate::web::core::{PageError, PageResult};
use crate::web::forms::{EmployeeForm, EMPLOYEE_ROLES};
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, select_field, table_section,
};
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};

pub async fn employees<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    let employees = api.employees().list().await?;
    let rows = employees
        .iter()
        .map(|employee| {
            vec![
                html! { (employee.name) },
                html! { (text(&employee.position)) },
                html! { (text(&employee.phone)) },
                html! { (text(&employee.email)) },
                html! { (text(&employee.department)) },
                html! { a href=(format!("/employees/{}/edit", employee.id)) { "Edit" } },
                delete_button(&format!("/employees/{}/delete", employee.id), None),
            ]
        })
        .collect();

    Ok(page(
        "Employees",
        html! {
            (header_section("Employees", None))
            a href="/employees/new" { "Add employee" }
            (table_section(&["Name", "Position", "Phone", "Email", "Department", "", ""], rows))
        },
    )
    .into_response())
}

/// Account fields are only shown when the employee is being created.
fn employee_form_markup(
    title: &str,
    action: &str,
    form: &EmployeeForm,
    with_account: bool,
    notice: Option<&str>,
) -> Markup {
    page(
        title,
        html! {
            (header_section(title, None))
            (notice_section(notice))
            form.stacked method="post" action=(action) {
                (input_field("Name", "text", "name", &form.name, true))
                (input_field("Position", "text", "position", &form.position, true))
                (input_field("Phone", "tel", "phone", &form.phone, false))
                (input_field("Email", "email", "email", &form.email, false))
                (input_field("Area id", "number", "area_id", &form.area_id, false))
                @if with_account {
                    (input_field("Username", "text", "username", &form.username, false))
                    (input_field("Password", "password", "password", "", true))
                    (select_field("Role", "role_id", &options(EMPLOYEE_ROLES), &form.role_id, true))
                }
                button type="submit" { "Save employee" }
            }
        },
    )
}

pub async fn new_employee() -> Markup {
    employee_form_markup(
        "New employee",
        "/employees/new",
        &EmployeeForm::default(),
        true,
        None,
    )
}

pub async fn create_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<EmployeeForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate_new() {
        Ok(payload) => {
            api.employees().create(&payload).await?;
            Ok(Redirect::to("/employees").into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| {
            employee_form_markup("New employee", "/employees/new", &form, true, Some(notice))
        })),
    }
}

/// The backend has no single-employee read, so the record is picked from
/// the list.
pub async fn edit_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let employee = api
        .employees()
        .list()
        .await?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or(PageError::NotFound("employee"))?;
    let action = format!("/employees/{id}/edit");
    let form = EmployeeForm::from_employee(&employee);
    Ok(employee_form_markup("Edit employee", &action, &form, false, None).into_response())
}

pub async fn update_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.details() {
        Ok(details) => {
            api.employees().update(id, &details).await?;
            Ok(Redirect::to("/employees").into_response())
        }
        Err(e) => {
            let action = format!("/employees/{id}/edit");
            Ok(rejected(&e, |notice| {
                employee_form_markup("Edit employee", &action, &form, false, Some(notice))
            }))
        }
    }
}

pub async fn delete_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.employees().delete(id).await?;
    Ok(Redirect::to("/employees").into_response())
}

use super::{options, page, rejected, status_badge, text, AREA_MAP_ID, LAND_MAP_ID};
use crate::api::{ApiClient, ApiProvider};
use crate::map::{drawing, ReadOnlyMap};
use crate::models::area::{Area, AreaClassification, AreaStatus};
use crate::models::employee::Employee;
use crate::models::land::Land;
use crate::models::task::Task;
use crate::utils::coordinates::{Polygon, ViewState};
use crate::web::core::{PageError, PageResult};
use crate::web::forms::{AreaForm, AssignEmployeeForm, TaskForm, TASK_STATUSES};
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, select_field, table_section,
};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use maud::{html, Markup};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewAreaQuery {
    pub land_id: i64,
}

/// Where an area form posts and how it is labelled.
struct AreaFormTarget {
    title: &'static str,
    action: String,
    submit: &'static str,
}

fn area_form_markup(
    target: &AreaFormTarget,
    land: &Land,
    form: &AreaForm,
    view_state: &ViewState,
    notice: Option<&str>,
) -> Markup {
    let subheading = format!("Inside {}", land.name);
    page(
        target.title,
        html! {
            (header_section(target.title, Some(subheading.as_str())))
            (notice_section(notice))
            form.stacked method="post" action=(target.action) {
                input type="hidden" name="land_id" value=(land.id);
                label { "Name" input type="text" name="name" value=(form.name) required; }
                label { "Area name" input type="text" name="area_name" value=(form.area_name); }
                label { "Land plot" input type="text" name="land_plot" value=(form.land_plot); }
                label {
                    "Status"
                    select name="status" required {
                        @for status in AreaStatus::ALL {
                            option value=(status.as_str()) selected[form.status == status.as_str()] { (status.as_str()) }
                        }
                    }
                }
                label { "Size (m²)" input type="number" step="any" min="0" name="area" value=(form.area) required; }
                label { "Usage" input type="text" name="usage" value=(form.usage); }
                label {
                    "Classification"
                    select name="classification" {
                        @for classification in [AreaClassification::Plant, AreaClassification::Other] {
                            option value=(classification.as_str()) selected[form.classification == classification.as_str()] { (classification.as_str()) }
                        }
                    }
                }
                (drawing::render(AREA_MAP_ID, view_state))
                button type="submit" { (target.submit) }
            }
        },
    )
}

/// New areas start from the land's camera with nothing drawn.
fn area_start(land: &Land) -> ViewState {
    ViewState {
        polygon: Polygon::default(),
        ..land.view_state()
    }
}

pub async fn new_area<T>(
    Extension(api): Extension<ApiClient<T>>,
    Query(query): Query<NewAreaQuery>,
) -> PageResult
where
    T: ApiProvider,
{
    let land = api.lands().get(query.land_id).await?;
    let target = AreaFormTarget {
        title: "New area",
        action: "/areas/new".to_string(),
        submit: "Create area",
    };
    Ok(area_form_markup(&target, &land, &AreaForm::default(), &area_start(&land), None).into_response())
}

fn submitted_land_id(form: &AreaForm) -> Option<i64> {
    form.land_id.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub async fn create_area<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<AreaForm>,
) -> PageResult
where
    T: ApiProvider,
{
    let land_id = match submitted_land_id(&form) {
        Some(id) => id,
        None => return Ok(Redirect::to("/lands").into_response()),
    };
    match form.validate() {
        Ok(payload) => {
            api.areas().create(&payload).await?;
            Ok(Redirect::to(&format!("/lands/{land_id}")).into_response())
        }
        Err(e) => {
            let land = api.lands().get(land_id).await?;
            let view_state = form.map.view_state().unwrap_or_else(|_| area_start(&land));
            let target = AreaFormTarget {
                title: "New area",
                action: "/areas/new".to_string(),
                submit: "Create area",
            };
            Ok(rejected(&e, |notice| {
                area_form_markup(&target, &land, &form, &view_state, Some(notice))
            }))
        }
    }
}

/// The parent land with this area highlighted, or the area alone when it
/// has no land.
fn area_map(area: &Area, land: Option<&Land>) -> ReadOnlyMap {
    let mut map = match land {
        Some(land) => {
            let mut overlays: Vec<_> = land
                .areas
                .iter()
                .filter(|other| other.id != area.id)
                .map(Area::overlay)
                .collect();
            overlays.push(area.overlay());
            ReadOnlyMap::new(land.view_state(), overlays)
        }
        None => ReadOnlyMap::new(area.view_state(), vec![area.overlay()]),
    };
    map.hover(area.id);
    map
}

fn area_detail_markup(
    area: &Area,
    land: Option<&Land>,
    staff: &[Employee],
    task_form: &TaskForm,
    notice: Option<&str>,
) -> Markup {
    let map = area_map(area, land);
    let employee_rows = area
        .employees
        .iter()
        .map(|employee| {
            vec![
                html! { (employee.name) },
                delete_button(
                    &format!("/areas/{}/employees/{}/delete", area.id, employee.id),
                    None,
                ),
            ]
        })
        .collect();
    let task_rows = area
        .tasks
        .iter()
        .map(|task| {
            vec![
                html! { (task.title) },
                html! { (text(&task.status)) },
                html! {
                    @if let Some(task_id) = task.id {
                        (delete_button(&format!("/areas/{}/tasks/{task_id}/delete", area.id), None))
                    }
                },
            ]
        })
        .collect();
    let unassigned = options(
        staff
            .iter()
            .filter(|e| !area.employees.iter().any(|assigned| assigned.id == e.id))
            .map(|e| (e.id, e.name.as_str())),
    );

    page(
        &area.name,
        html! {
            (header_section(&area.name, Some(area.area_name.as_str())))
            (notice_section(notice))
            @if let Some(land) = land {
                p {
                    "Inside " a href=(format!("/lands/{}", land.id)) { (land.name) }
                    " · " a href=(format!("/lands/{}/edit", land.id)) { "Edit land" }
                }
            }
            a href=(format!("/areas/{}/edit", area.id)) { "Edit area" }
            dl {
                dt { "Status" } dd { (status_badge(&area.status)) }
                dt { "Size" } dd { (area.area) " m²" }
                dt { "Usage" } dd { (area.usage) }
                dt { "Land plot" } dd { (area.land_plot) }
                dt { "Classification" } dd { (area.classification.as_str()) }
            }
            (map.render(LAND_MAP_ID))
            span.subheading { "Employees" }
            (table_section(&["Name", ""], employee_rows))
            form.inline method="post" action=(format!("/areas/{}/employees", area.id)) {
                (select_field("Employee", "employee_id", &unassigned, "", true))
                button type="submit" { "Assign" }
            }
            span.subheading { "Tasks" }
            (table_section(&["Title", "Status", ""], task_rows))
            form.stacked method="post" action=(format!("/areas/{}/tasks", area.id)) {
                (input_field("Title", "text", "title", &task_form.title, true))
                (input_field("Description", "text", "description", &task_form.description, false))
                (select_field("Status", "status", &options(TASK_STATUSES), &task_form.status, true))
                (input_field("Due", "date", "end_date", &task_form.end_date, false))
                button type="submit" { "Add task" }
            }
            @if let Some(land) = land {
                (delete_button(&format!("/areas/{}/delete", area.id), Some(("land_id", land.id.to_string()))))
            }
        },
    )
}

/// Loads everything the area page shows and renders it with `status`.
async fn area_page<T>(
    api: &ApiClient<T>,
    id: i64,
    task_form: &TaskForm,
    notice: Option<&str>,
    status: StatusCode,
) -> PageResult
where
    T: ApiProvider,
{
    let area = api.areas().get(id).await?;
    let employees = api.employees();
    let (land, staff) = match &area.land {
        Some(parent) => {
            let lands = api.lands();
            let (land, staff) = futures::try_join!(lands.get(parent.id), employees.list())?;
            (Some(land), staff)
        }
        None => (None, employees.list().await?),
    };
    let markup = area_detail_markup(&area, land.as_ref(), &staff, task_form, notice);
    Ok((status, markup).into_response())
}

pub async fn area_detail<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    area_page(&api, id, &TaskForm::default(), None, StatusCode::OK).await
}

async fn edit_target<T>(api: &ApiClient<T>, area: &Area) -> Result<Land, PageError>
where
    T: ApiProvider,
{
    let parent = area.land.as_ref().ok_or(PageError::NotFound("land"))?;
    Ok(api.lands().get(parent.id).await?)
}

fn edit_form_target(id: i64) -> AreaFormTarget {
    AreaFormTarget {
        title: "Edit area",
        action: format!("/areas/{id}/edit"),
        submit: "Save area",
    }
}

pub async fn edit_area<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let area = api.areas().get(id).await?;
    let land = edit_target(&api, &area).await?;
    let form = AreaForm::from_area(&area, land.id);
    Ok(area_form_markup(&edit_form_target(id), &land, &form, &area.view_state(), None).into_response())
}

pub async fn update_area<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<AreaForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate_update() {
        Ok(update) => {
            api.areas().update(id, &update).await?;
            Ok(Redirect::to(&format!("/areas/{id}")).into_response())
        }
        Err(e) => {
            let area = api.areas().get(id).await?;
            let land = edit_target(&api, &area).await?;
            let view_state = form.map.view_state().unwrap_or_else(|_| area.view_state());
            Ok(rejected(&e, |notice| {
                area_form_markup(&edit_form_target(id), &land, &form, &view_state, Some(notice))
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteAreaForm {
    pub land_id: i64,
}

pub async fn delete_area<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteAreaForm>,
) -> PageResult
where
    T: ApiProvider,
{
    api.areas().delete(id).await?;
    Ok(Redirect::to(&format!("/lands/{}", form.land_id)).into_response())
}

fn back_to_area(id: i64) -> Response {
    Redirect::to(&format!("/areas/{id}")).into_response()
}

pub async fn assign_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<AssignEmployeeForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(employee_id) => {
            api.areas().assign_employee(id, employee_id).await?;
            Ok(back_to_area(id))
        }
        Err(e) => {
            let notice = e.to_string();
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            area_page(&api, id, &TaskForm::default(), Some(&notice), status).await
        }
    }
}

pub async fn remove_employee<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> PageResult
where
    T: ApiProvider,
{
    api.areas().remove_employee(id, employee_id).await?;
    Ok(back_to_area(id))
}

pub async fn add_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> PageResult
where
    T: ApiProvider,
{
    let task = form.validate().map(|task| Task {
        area_id: Some(id),
        ..task
    });
    match task {
        Ok(task) => {
            api.areas().add_task(id, &task).await?;
            Ok(back_to_area(id))
        }
        Err(e) => {
            let notice = e.to_string();
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            area_page(&api, id, &form, Some(&notice), status).await
        }
    }
}

pub async fn remove_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path((id, task_id)): Path<(i64, i64)>,
) -> PageResult
where
    T: ApiProvider,
{
    api.areas().remove_task(id, task_id).await?;
    Ok(back_to_area(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApiProvider;
    use crate::api::Method;
    use crate::web::forms::MapFields;
    use crate::web::pages::testing::{body, location, signed_in};
    use serde_json::json;

    fn land_json() -> serde_json::Value {
        json!({
            "id": 9,
            "name": "Riverside",
            "coordinate": {"polygon": "[[0,0],[0,4],[4,4],[4,0]]", "center": "{\"lat\":2,\"lng\":2}", "zoom": 16}
        })
    }

    fn area_json() -> serde_json::Value {
        json!({
            "id": 4,
            "name": "North",
            "status": "in-use",
            "area": 120,
            "coordinates": {"polygon": "[[1,1],[1,2],[2,2]]", "center": "{\"lat\":1.5,\"lng\":1.5}", "zoom": 17},
            "employees": [{"id": 7, "name": "Lan"}],
            "tasks": [{"id": 30, "title": "Prune", "status": "TODO"}],
            "land": {"id": 9, "name": "Riverside"}
        })
    }

    fn area_backend() -> MockApiProvider {
        MockApiProvider::new()
            .with_response(Method::Get, "/areas/4", area_json())
            .with_response(Method::Get, "/land/9", land_json())
            .with_response(
                Method::Get,
                "/employee/employees",
                json!([{"id": 7, "name": "Lan"}, {"id": 8, "name": "Minh"}]),
            )
    }

    fn area_form() -> AreaForm {
        AreaForm {
            land_id: "9".to_string(),
            name: "North".to_string(),
            status: "available".to_string(),
            area: "150".to_string(),
            map: MapFields {
                polygon: "[[1,1],[1,3],[3,3]]".to_string(),
                center: String::new(),
                zoom: "17".to_string(),
            },
            ..AreaForm::default()
        }
    }

    #[tokio::test]
    async fn test_new_area_starts_at_land_camera() {
        let provider = MockApiProvider::new().with_response(Method::Get, "/land/9", land_json());

        let response = new_area(signed_in(provider), Query(NewAreaQuery { land_id: 9 }))
            .await
            .unwrap();
        let html = body(response).await;
        assert!(html.contains(r#"name="polygon" value="[]""#));
        assert!(html.contains(r#"value="2,2""#));
        assert!(html.contains("LandConsole.drawMap"));
    }

    #[tokio::test]
    async fn test_create_area_without_land_goes_back_to_lands() {
        let api = signed_in(MockApiProvider::new());
        let response = create_area(api.clone(), Form(AreaForm::default())).await.unwrap();
        assert_eq!(location(&response), "/lands");
        assert!(api.provider.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_area_detail_highlights_area_on_land() {
        let response = area_detail(signed_in(area_backend()), Path(4)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body(response).await;

        assert!(html.contains(r#"href="/lands/9/edit""#));
        assert!(html.contains(r#"href="/areas/4/edit""#));
        assert!(html.contains(r#"action="/areas/4/employees/7/delete""#));
        assert!(html.contains(r#"action="/areas/4/tasks/30/delete""#));
        assert!(html.contains(r#"<option value="8">Minh</option>"#));
        assert!(!html.contains(r#"<option value="7">Lan</option>"#));
        assert_eq!(html.matches(r#""tooltipPermanent":true"#).count(), 2);
    }

    #[tokio::test]
    async fn test_assign_and_remove_employee() {
        let provider = MockApiProvider::new()
            .with_response(Method::Post, "/areas/4/employees/8", json!({"ok": true}))
            .with_response(Method::Delete, "/areas/4/employees/7", json!(null));
        let api = signed_in(provider);

        let form = AssignEmployeeForm {
            employee_id: "8".to_string(),
        };
        let response = assign_employee(api.clone(), Path(4), Form(form)).await.unwrap();
        assert_eq!(location(&response), "/areas/4");

        let response = remove_employee(api.clone(), Path((4, 7))).await.unwrap();
        assert_eq!(location(&response), "/areas/4");

        let paths: Vec<_> = api.provider.requests().await.into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/areas/4/employees/8", "/areas/4/employees/7"]);
    }

    #[tokio::test]
    async fn test_assign_without_choice_rerenders_page() {
        let api = signed_in(area_backend());
        let response = assign_employee(api.clone(), Path(4), Form(AssignEmployeeForm::default()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body(response).await.contains("employee is required"));
        assert!(api.provider.requests().await.iter().all(|r| r.method == Method::Get));
    }

    #[tokio::test]
    async fn test_add_and_remove_task() {
        let provider = MockApiProvider::new()
            .with_response(Method::Post, "/areas/4/tasks", json!({"id": 31, "title": "Water"}))
            .with_response(Method::Delete, "/areas/4/tasks/30", json!(null));
        let api = signed_in(provider);

        let form = TaskForm {
            title: "Water".to_string(),
            status: "TODO".to_string(),
            ..TaskForm::default()
        };
        let response = add_task(api.clone(), Path(4), Form(form)).await.unwrap();
        assert_eq!(location(&response), "/areas/4");

        let response = remove_task(api.clone(), Path((4, 30))).await.unwrap();
        assert_eq!(location(&response), "/areas/4");

        let sent = api.provider.requests().await;
        let task = sent[0].body.as_ref().unwrap();
        assert_eq!(task["title"], "Water");
        assert_eq!(task["areaId"], 4);
        assert_eq!(sent[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_edit_area_prefills_form() {
        let html = body(edit_area(signed_in(area_backend()), Path(4)).await.unwrap()).await;
        assert!(html.contains(r#"action="/areas/4/edit""#));
        assert!(html.contains(r#"<option value="in-use" selected>in-use</option>"#));
        assert!(html.contains(r#"name="land_id" value="9""#));
        assert!(html.contains("Inside Riverside"));
    }

    #[tokio::test]
    async fn test_update_area_sends_wire_coordinates() {
        let provider =
            MockApiProvider::new().with_response(Method::Put, "/areas/4", area_json());
        let api = signed_in(provider);

        let response = update_area(api.clone(), Path(4), Form(area_form())).await.unwrap();
        assert_eq!(location(&response), "/areas/4");

        let sent = api.provider.requests().await;
        let update = sent[0].body.as_ref().unwrap();
        assert_eq!(update["status"], "available");
        assert_eq!(update["coordinates"]["polygon"], "[[1.0,1.0],[1.0,3.0],[3.0,3.0]]");
        assert_eq!(update["coordinates"]["zoom"], 17);
        assert!(update.get("landId").is_none());
    }

    #[tokio::test]
    async fn test_update_area_rejects_bad_status() {
        let api = signed_in(area_backend());
        let form = AreaForm {
            status: "sold".to_string(),
            ..area_form()
        };

        let response = update_area(api.clone(), Path(4), Form(form)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body(response).await.contains("status is not valid"));
    }

    #[tokio::test]
    async fn test_delete_area_redirects_to_land() {
        let provider =
            MockApiProvider::new().with_response(Method::Delete, "/areas/4", json!(null));

        let response = delete_area(signed_in(provider), Path(4), Form(DeleteAreaForm { land_id: 9 }))
            .await
            .unwrap();
        assert_eq!(location(&response), "/lands/9");
    }
}

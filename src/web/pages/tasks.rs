use super::{options, page, rejected, text};
use crate::api::{ApiClient, ApiProvider};
use crate::error::FormError;
use crate::web::core::{PageError, PageResult};
use crate::web::forms::{DocumentForm, TaskForm, UploadFields, TASK_STATUSES};
use crate::web::templates::components::{
    delete_button, header_section, input_field, notice_section, select_field, table_section,
};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use maud::{html, Markup};

/// Tasks, their documents and the upload form, rendered with `status`.
async fn tasks_page<T>(api: &ApiClient<T>, notice: Option<&str>, status: StatusCode) -> PageResult
where
    T: ApiProvider,
{
    let (tasks, documents) = (api.tasks(), api.task_documents());
    let (tasks, documents) = futures::try_join!(tasks.list(), documents.list())?;

    let task_rows = tasks
        .iter()
        .map(|task| {
            vec![
                html! { (task.title) },
                html! { (text(&task.description)) },
                html! { (text(&task.status)) },
                html! { @if task.is_recurring { (text(&task.recurrence_pattern)) } @else { "-" } },
                html! { (text(&task.end_date)) },
                html! {
                    @if let Some(attachment) = &task.attachment {
                        (attachment.file_name)
                    }
                },
                html! {
                    @if let Some(id) = task.id {
                        a href=(format!("/tasks/{id}/edit")) { "Edit" }
                        (delete_button(&format!("/tasks/{id}/delete"), None))
                    }
                },
            ]
        })
        .collect();
    let document_rows = documents
        .iter()
        .map(|document| {
            vec![
                html! { (document.file_name) },
                html! { (text(&document.description)) },
                html! { (document.task_id) },
                html! { (text(&document.created_at)) },
                html! {
                    a href=(format!("/documents/{}/edit", document.id)) { "Edit" }
                    (delete_button(&format!("/documents/{}/delete", document.id), None))
                },
            ]
        })
        .collect();
    let task_choices = options(
        tasks
            .iter()
            .filter_map(|task| task.id.map(|id| (id, task.title.as_str()))),
    );

    let markup = page(
        "Tasks",
        html! {
            (header_section("Tasks", None))
            (notice_section(notice))
            a href="/tasks/new" { "Add task" }
            (table_section(&["Title", "Description", "Status", "Recurs", "Due", "Attachment", ""], task_rows))
            span.subheading { "Documents" }
            (table_section(&["File", "Description", "Task", "Uploaded", ""], document_rows))
            form.stacked method="post" action="/documents" enctype="multipart/form-data" {
                (select_field("Task", "task_id", &task_choices, "", true))
                label { "File" input type="file" name="file" required; }
                (input_field("Description", "text", "description", "", false))
                button type="submit" { "Upload" }
            }
        },
    );
    Ok((status, markup).into_response())
}

pub async fn tasks<T>(Extension(api): Extension<ApiClient<T>>) -> PageResult
where
    T: ApiProvider,
{
    tasks_page(&api, None, StatusCode::OK).await
}

fn task_form_markup(title: &str, action: &str, form: &TaskForm, notice: Option<&str>) -> Markup {
    page(
        title,
        html! {
            (header_section(title, None))
            (notice_section(notice))
            form.stacked method="post" action=(action) {
                (input_field("Title", "text", "title", &form.title, true))
                (input_field("Description", "text", "description", &form.description, false))
                (select_field("Status", "status", &options(TASK_STATUSES), &form.status, true))
                (input_field("Area id", "number", "area_id", &form.area_id, false))
                (input_field("Assignee id", "number", "assignee_id", &form.assignee_id, false))
                (input_field("Approver id", "number", "approver_id", &form.approver_id, false))
                label {
                    "Recurring"
                    input type="checkbox" name="is_recurring" checked[form.is_recurring.is_some()];
                }
                (input_field("Recurrence", "text", "recurrence_pattern", &form.recurrence_pattern, false))
                (input_field("Cost", "number", "cost", &form.cost, false))
                (input_field("Actual cost", "number", "actual_cost", &form.actual_cost, false))
                (input_field("Due", "date", "end_date", &form.end_date, false))
                button type="submit" { "Save task" }
            }
        },
    )
}

pub async fn new_task() -> Markup {
    task_form_markup("New task", "/tasks/new", &TaskForm::default(), None)
}

pub async fn create_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Form(form): Form<TaskForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(task) => {
            api.tasks().create(&task).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| {
            task_form_markup("New task", "/tasks/new", &form, Some(notice))
        })),
    }
}

/// Tasks have no single-record read, so the task is picked from the list.
pub async fn edit_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let task = api
        .tasks()
        .list()
        .await?
        .into_iter()
        .find(|task| task.id == Some(id))
        .ok_or(PageError::NotFound("task"))?;
    let action = format!("/tasks/{id}/edit");
    Ok(task_form_markup("Edit task", &action, &TaskForm::from_task(&task), None).into_response())
}

pub async fn update_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(task) => {
            api.tasks().update(id, &task).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(e) => {
            let action = format!("/tasks/{id}/edit");
            Ok(rejected(&e, |notice| {
                task_form_markup("Edit task", &action, &form, Some(notice))
            }))
        }
    }
}

pub async fn delete_task<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.tasks().delete(id).await?;
    Ok(Redirect::to("/tasks").into_response())
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadFields, MultipartError> {
    let mut fields = UploadFields::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                fields.file_name = field.file_name().unwrap_or_default().to_string();
                fields.data = field.bytes().await?.to_vec();
            }
            "task_id" => fields.task_id = field.text().await?,
            "description" => fields.description = field.text().await?,
            _ => {}
        }
    }
    Ok(fields)
}

pub async fn upload_document<T>(
    Extension(api): Extension<ApiClient<T>>,
    multipart: Multipart,
) -> PageResult
where
    T: ApiProvider,
{
    let upload = read_upload(multipart)
        .await
        .map_err(|e| FormError::Invalid {
            field: "upload",
            reason: e.body_text(),
        })
        .and_then(UploadFields::validate);

    match upload {
        Ok(upload) => {
            api.task_documents().upload(upload).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(e) => {
            let notice = e.to_string();
            tasks_page(&api, Some(&notice), StatusCode::UNPROCESSABLE_ENTITY).await
        }
    }
}

fn document_form_markup(id: i64, form: &DocumentForm, notice: Option<&str>) -> Markup {
    page(
        "Edit document",
        html! {
            (header_section("Edit document", None))
            (notice_section(notice))
            form.stacked method="post" action=(format!("/documents/{id}/edit")) {
                (input_field("File name", "text", "file_name", &form.file_name, true))
                (input_field("Description", "text", "description", &form.description, false))
                button type="submit" { "Save document" }
            }
        },
    )
}

pub async fn edit_document<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    let document = api.task_documents().get(id).await?;
    Ok(document_form_markup(id, &DocumentForm::from_document(&document), None).into_response())
}

pub async fn update_document<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
    Form(form): Form<DocumentForm>,
) -> PageResult
where
    T: ApiProvider,
{
    match form.validate() {
        Ok(payload) => {
            api.task_documents().update(id, &payload).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(e) => Ok(rejected(&e, |notice| document_form_markup(id, &form, Some(notice)))),
    }
}

pub async fn delete_document<T>(
    Extension(api): Extension<ApiClient<T>>,
    Path(id): Path<i64>,
) -> PageResult
where
    T: ApiProvider,
{
    api.task_documents().delete(id).await?;
    Ok(Redirect::to("/tasks").into_response())
}

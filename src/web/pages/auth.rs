use crate::api::ApiProvider;
use crate::error::ApiError;
use crate::session;
use crate::web::core::{PageResult, SharedState};
use crate::web::forms::LoginForm;
use crate::web::templates::base::base_template;
use crate::web::templates::components::{header_section, notice_section};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Form;
use maud::{html, Markup};
use tower_sessions::Session;

fn login_markup(notice: Option<&str>, username: &str) -> Markup {
    base_template(
        "Log in",
        false,
        &html! {
            (header_section("Land console", Some("Log in to continue")))
            (notice_section(notice))
            form.stacked method="post" action="/login" {
                label { "Username" input type="text" name="username" value=(username) autofocus; }
                label { "Password" input type="password" name="password"; }
                button type="submit" { "Log in" }
            }
        },
    )
}

pub async fn login_page() -> Markup {
    login_markup(None, "")
}

/// A rejected login leaves every session, including this browser's, as it was.
pub async fn login<T>(
    State(state): State<SharedState<T>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> PageResult
where
    T: ApiProvider,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            let notice = e.to_string();
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                login_markup(Some(&notice), &form.username),
            )
                .into_response());
        }
    };

    match state.api.auth().login(&request).await {
        Ok(token) => {
            session::begin(&session, token).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(ApiError::Unauthorized) => Ok((
            StatusCode::UNAUTHORIZED,
            login_markup(Some("Wrong username or password."), &form.username),
        )
            .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Ok((
                StatusCode::BAD_GATEWAY,
                login_markup(Some(e.notice()), &form.username),
            )
                .into_response())
        }
    }
}

pub async fn logout(session: Session) -> PageResult {
    session::end(&session).await?;
    Ok(Redirect::to("/login").into_response())
}

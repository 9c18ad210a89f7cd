use crate::api::{ApiClient, ApiProvider};
use crate::config::Config;
use crate::error::ApiError;
use crate::session::{self, SessionExpired};
use crate::web::draw::draw;
use crate::web::pages::{self, areas, assets, auth, employees, lands, owners, regions, tasks};
use crate::web::templates::base::base_template;
use crate::web::templates::components::notice_section;
use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use maud::html;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

/// Shared by every request. `api` carries no token; the session guard hands
/// each request a copy authorized for its own browser.
pub struct AppState<T>
where
    T: ApiProvider,
{
    pub api: ApiClient<T>,
}

pub type SharedState<T> = Arc<AppState<T>>;

impl<T> AppState<T>
where
    T: ApiProvider,
{
    pub fn new(provider: T) -> SharedState<T> {
        Arc::new(Self {
            api: ApiClient::new(provider),
        })
    }
}

/// What a page handler can fail with.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session store failed: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
}

fn error_page(status: StatusCode, notice: &str) -> Response {
    let page = base_template(
        "Error",
        true,
        &html! {
            (notice_section(Some(notice)))
            a href="/" { "Back to the dashboard" }
        },
    );
    (status, page).into_response()
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Api(ApiError::Unauthorized) => {
                let mut response = Redirect::to("/login").into_response();
                response.extensions_mut().insert(SessionExpired);
                response
            }
            PageError::NotFound(what) => {
                let notice = format!("That {what} does not exist.");
                error_page(StatusCode::NOT_FOUND, &notice)
            }
            PageError::Api(e) => {
                tracing::error!(error = %e, "backend call failed");
                error_page(StatusCode::BAD_GATEWAY, e.notice())
            }
            PageError::Session(e) => {
                tracing::error!(error = %e, "session store failed");
                error_page(
                    StatusCode::BAD_GATEWAY,
                    "The request to the server failed. Please try again.",
                )
            }
        }
    }
}

pub type PageResult = Result<Response, PageError>;

/// Lets a request through only when its browser session holds a token, and
/// gives the handler a client authorized with that token. A backend 401 ends
/// this browser's session and no other.
async fn require_session<T>(
    State(state): State<SharedState<T>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response
where
    T: ApiProvider + 'static,
{
    let token = match session::token(&session).await {
        Ok(Some(token)) => token,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "could not read session");
            return Redirect::to("/login").into_response();
        }
    };

    request.extensions_mut().insert(state.api.authorized(token));
    let response = next.run(request).await;

    if response.extensions().get::<SessionExpired>().is_some() {
        if let Err(e) = session::end(&session).await {
            tracing::error!(error = %e, "could not end expired session");
        }
    }
    response
}

pub fn router<T>(state: SharedState<T>) -> Router
where
    T: ApiProvider + 'static,
{
    let console = Router::new()
        .route("/", get(pages::dashboard::<T>))
        .route(
            "/regions",
            get(regions::regions::<T>).post(regions::create_region::<T>),
        )
        .route(
            "/regions/:id/edit",
            get(regions::edit_region::<T>).post(regions::update_region::<T>),
        )
        .route("/regions/:id/delete", post(regions::delete_region::<T>))
        .route("/lands", get(lands::lands::<T>))
        .route(
            "/lands/new",
            get(lands::new_land::<T>).post(lands::create_land::<T>),
        )
        .route("/lands/:id", get(lands::land_detail::<T>))
        .route(
            "/lands/:id/edit",
            get(lands::edit_land::<T>).post(lands::update_land::<T>),
        )
        .route("/lands/:id/delete", post(lands::delete_land::<T>))
        .route(
            "/areas/new",
            get(areas::new_area::<T>).post(areas::create_area::<T>),
        )
        .route("/areas/:id", get(areas::area_detail::<T>))
        .route(
            "/areas/:id/edit",
            get(areas::edit_area::<T>).post(areas::update_area::<T>),
        )
        .route("/areas/:id/delete", post(areas::delete_area::<T>))
        .route("/areas/:id/employees", post(areas::assign_employee::<T>))
        .route(
            "/areas/:id/employees/:employee_id/delete",
            post(areas::remove_employee::<T>),
        )
        .route("/areas/:id/tasks", post(areas::add_task::<T>))
        .route(
            "/areas/:id/tasks/:task_id/delete",
            post(areas::remove_task::<T>),
        )
        .route("/owners", get(owners::owners::<T>))
        .route(
            "/owners/new",
            get(owners::new_owner).post(owners::create_owner::<T>),
        )
        .route("/owners/:id", get(owners::owner_detail::<T>))
        .route(
            "/owners/:id/edit",
            get(owners::edit_owner::<T>).post(owners::update_owner::<T>),
        )
        .route("/owners/:id/delete", post(owners::delete_owner::<T>))
        .route("/employees", get(employees::employees::<T>))
        .route(
            "/employees/new",
            get(employees::new_employee).post(employees::create_employee::<T>),
        )
        .route(
            "/employees/:id/edit",
            get(employees::edit_employee::<T>).post(employees::update_employee::<T>),
        )
        .route(
            "/employees/:id/delete",
            post(employees::delete_employee::<T>),
        )
        .route("/tasks", get(tasks::tasks::<T>))
        .route(
            "/tasks/new",
            get(tasks::new_task).post(tasks::create_task::<T>),
        )
        .route(
            "/tasks/:id/edit",
            get(tasks::edit_task::<T>).post(tasks::update_task::<T>),
        )
        .route("/tasks/:id/delete", post(tasks::delete_task::<T>))
        .route("/documents", post(tasks::upload_document::<T>))
        .route(
            "/documents/:id/edit",
            get(tasks::edit_document::<T>).post(tasks::update_document::<T>),
        )
        .route("/documents/:id/delete", post(tasks::delete_document::<T>))
        .route("/assets", get(assets::assets::<T>))
        .route(
            "/assets/new",
            get(assets::new_asset).post(assets::create_asset::<T>),
        )
        .route(
            "/assets/:id/edit",
            get(assets::edit_asset::<T>).post(assets::update_asset::<T>),
        )
        .route("/assets/:id/delete", post(assets::delete_asset::<T>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<T>,
        ));

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax);

    Router::new()
        .route("/login", get(auth::login_page).post(auth::login::<T>))
        .route("/logout", post(auth::logout))
        .route("/map/draw", post(draw))
        .merge(console)
        .layer(sessions)
        .with_state(state)
}

pub async fn start_server<T>(config: &Config, state: SharedState<T>) -> Result<()>
where
    T: ApiProvider + 'static,
{
    let app = router(state);
    let address = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("could not bind {address}"))?;
    tracing::info!(%address, backend = %config.api_base_url, "console listening");

    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApiProvider, MockResponse};
    use crate::api::Method;
    use reqwest::redirect::Policy;
    use serde_json::json;

    async fn serve(state: SharedState<MockApiProvider>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// One browser: keeps its own cookies and does not follow redirects.
    fn browser() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    fn backend() -> MockApiProvider {
        MockApiProvider::new()
            .with_body_response(
                Method::Post,
                "/auth/login",
                json!({"username": "operator", "password": "pw"}),
                MockResponse::Json(json!({"access_token": "jwt"})),
            )
            .with(Method::Post, "/auth/login", MockResponse::Unauthorized)
            .with_response(Method::Get, "/region", json!([]))
            .with(Method::Get, "/owner", MockResponse::Unauthorized)
    }

    async fn log_in(browser: &reqwest::Client, base: &str, password: &str) -> reqwest::Response {
        browser
            .post(format!("{base}/login"))
            .form(&[("username", "operator"), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    async fn visit(browser: &reqwest::Client, url: String) -> reqwest::Response {
        browser.get(url).send().await.unwrap()
    }

    #[tokio::test]
    async fn test_console_requires_session() {
        let state = AppState::new(backend());
        let base = serve(state.clone()).await;
        let operator = browser();

        let response = visit(&operator, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");

        let response = log_in(&operator, &base, "pw").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");

        let response = visit(&operator, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let sent = state.api.provider.requests().await;
        let listing = sent.iter().find(|r| r.path == "/region").unwrap();
        assert_eq!(listing.token.as_deref(), Some("jwt"));

        let response = operator.post(format!("{base}/logout")).send().await.unwrap();
        assert_eq!(response.headers()["location"], "/login");
        let response = visit(&operator, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_browsers_have_separate_sessions() {
        let base = serve(AppState::new(backend())).await;
        let operator = browser();
        let visitor = browser();
        log_in(&operator, &base, "pw").await;

        let response = visit(&visitor, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = log_in(&visitor, &base, "wrong").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = visit(&operator, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_backend_401_ends_only_that_session() {
        let base = serve(AppState::new(backend())).await;
        let operator = browser();
        let colleague = browser();
        log_in(&operator, &base, "pw").await;
        log_in(&colleague, &base, "pw").await;

        let response = visit(&operator, format!("{base}/owners")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");

        let response = visit(&operator, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = visit(&colleague, format!("{base}/regions")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let response = PageError::NotFound("employee").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<SessionExpired>().is_none());

        let response = PageError::Api(ApiError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.extensions().get::<SessionExpired>().is_some());
    }

    #[tokio::test]
    async fn test_draw_endpoint_is_public() {
        let base = serve(AppState::new(MockApiProvider::new())).await;

        let response = browser()
            .post(format!("{base}/map/draw"))
            .json(&json!({
                "view_state": {"polygon": [], "center": {"lat": 1.0, "lng": 1.0}, "zoom": 15},
                "events": [{"kind": "created", "points": [[0.0, 0.0], [0.0, 2.0], [2.0, 2.0]]}]
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["wire"]["polygon"], "[[0.0,0.0],[0.0,2.0],[2.0,2.0]]");
        assert_eq!(body["view_state"]["center"]["lat"], 2.0 / 3.0);
    }
}

//! Web front end for recipebox.
//!
//! Three server-rendered endpoints over a shared [`RecipeController`]:
//!
//! - `GET /` lists recipes and the activity chart.
//! - `POST /add` adds a recipe from form fields and re-renders the list.
//! - `GET /random?tag=` picks a random recipe, optionally filtered by tag.
//!
//! Domain errors from the controller are logged and shown as a notice; the
//! page still renders.

pub mod templates;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::controller::RecipeController;
use crate::error::{Error, Result};
use crate::recipe::Recipe;

use self::templates::{activity_bars, render_index, IndexPage};

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    controller: Arc<Mutex<RecipeController>>,
    list_limit: Option<usize>,
}

impl AppState {
    /// Wrap a controller for use by the router.
    #[must_use]
    pub fn new(controller: RecipeController, list_limit: Option<usize>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            list_limit,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecipeController>> {
        self.controller
            .lock()
            .map_err(|_| Error::server("recipe controller lock poisoned"))
    }
}

/// Form fields posted to `/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddForm {
    /// Recipe title.
    pub title: String,
    /// Ingredients text.
    pub ingredients: String,
    /// Steps text.
    pub steps: String,
    /// Comma-separated tags.
    pub tags: String,
}

/// Query string accepted by `/random`.
#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    /// Optional tag filter.
    pub tag: Option<String>,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_recipe))
        .route("/random", get(random_recipe))
        .with_state(state)
}

/// Serve the web front end until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("failed to bind {addr}: {e}")))?;
    info!("Serving recipes on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::server(e.to_string()))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    render_page(&state, None, None, None)
}

/// `POST /add`
pub async fn add_recipe(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Html<String>> {
    let outcome = state
        .lock()?
        .add_recipe(&form.title, &form.ingredients, &form.steps, &form.tags);

    let notice = match outcome {
        Ok(_) => None,
        Err(err) if err.is_domain() => {
            warn!("Failed to add recipe: {err}");
            Some(err.to_string())
        }
        Err(err) => return Err(err),
    };
    render_page(&state, None, None, notice)
}

/// `GET /random?tag=`
pub async fn random_recipe(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> Result<Html<String>> {
    let tag = query.tag.as_deref().map(str::trim);
    let outcome = state.lock()?.random_recipe(tag);

    let (picked, notice) = match outcome {
        Ok(recipe) => (Some(recipe), None),
        Err(err) if err.is_domain() => {
            warn!("Failed to pick a random recipe: {err}");
            (None, Some(err.to_string()))
        }
        Err(err) => return Err(err),
    };
    render_page(&state, picked.as_ref(), tag, notice)
}

fn render_page(
    state: &AppState,
    random_recipe: Option<&Recipe>,
    tag: Option<&str>,
    notice: Option<String>,
) -> Result<Html<String>> {
    let (recipes, stats) = {
        let controller = state.lock()?;
        (
            controller.list_recipes(state.list_limit)?,
            controller.activity_stats()?,
        )
    };

    let page = IndexPage {
        recipes: &recipes,
        random_recipe,
        tag,
        bars: activity_bars(&stats),
        stats_json: serde_json::to_string(&stats)?,
        notice,
    };
    Ok(Html(render_index(&page)?))
}

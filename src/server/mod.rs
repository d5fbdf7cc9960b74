//! Blog server - serves the home, detail, and archive views
//!
//! Every request reads the content store fresh and recomputes the derived
//! view; there is no cache to invalidate. A slow or failing read fails the
//! whole request, which is the accepted fail-fast policy of this design.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::aggregate::{build_archive, compute_stats, find_related};
use crate::view::{render, ArchiveState, ListState, SortOrder, ThemeContext};
use crate::{Blog, Error};

/// Shared request state
struct AppState {
    blog: Blog,
    theme: ThemeContext,
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        blog: blog.clone(),
        theme: ThemeContext::new(blog.config.theme),
    });

    let app = Router::new()
        .route("/", get(home))
        .route("/posts/:id", get(post_detail))
        .route("/archive", get(archive))
        .route("/theme/toggle", post(toggle_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pipeline errors mapped onto HTTP responses
struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::PostNotFound(id) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>404</h1><p>No post named {}</p>", id)),
            )
                .into_response(),
            err => {
                tracing::error!("request failed: {:#}", anyhow::Error::from(err));
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

/// Home listing query parameters, all optional
#[derive(Debug, Default, Deserialize)]
struct HomeQuery {
    q: Option<String>,
    /// Comma-separated selected tags
    tags: Option<String>,
    sort: Option<SortOrder>,
    page: Option<usize>,
    per_page: Option<usize>,
}

impl HomeQuery {
    fn into_state(self) -> ListState {
        let mut state = ListState::new();
        if let Some(q) = self.q {
            state.set_search(q);
        }
        if let Some(tags) = self.tags {
            for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                state.toggle_tag(tag);
            }
        }
        if let Some(sort) = self.sort {
            state.set_sort(sort);
        }
        if let Some(per_page) = self.per_page {
            state.set_per_page(per_page);
        }
        if let Some(page) = self.page {
            state.set_page(page);
        }
        state
    }
}

async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, AppError> {
    let posts = state.blog.loader().load_all()?;
    let stats = compute_stats(&posts);

    let list = query.into_state();
    let page = list.select(&posts);

    Ok(Html(render::home_page(
        &state.blog.config,
        state.theme.current(),
        &list,
        &page,
        &stats,
    )))
}

async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let loader = state.blog.loader();
    let post = loader.render(&id)?;

    let posts = loader.load_all()?;
    let related = find_related(&post.id, &post.tags, &posts);

    Ok(Html(render::post_page(
        &state.blog.config,
        state.theme.current(),
        &post,
        &related,
    )))
}

#[derive(Debug, Default, Deserialize)]
struct ArchiveQuery {
    /// Comma-separated expanded years
    open: Option<String>,
}

async fn archive(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArchiveQuery>,
) -> Result<Html<String>, AppError> {
    let posts = state.blog.loader().load_all()?;
    let archive = build_archive(&posts);

    let open = query.open.unwrap_or_default();
    let expanded =
        ArchiveState::from_years(open.split(',').map(str::trim).filter(|y| !y.is_empty()));

    Ok(Html(render::archive_page(
        &state.blog.config,
        state.theme.current(),
        &archive,
        &expanded,
    )))
}

async fn toggle_theme(State(state): State<Arc<AppState>>) -> Redirect {
    let next = state.theme.toggle();
    tracing::debug!("theme switched to {:?}", next);
    Redirect::to("/")
}

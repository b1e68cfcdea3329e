//! HTTP server: homepage, post pages and the RSS feed

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentError, ContentStore, MarkdownRenderer, PostLister, PostResolver};
use crate::feed;
use crate::templates::{PostData, SiteData, TemplateRenderer};
use crate::theme::ColorMode;
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    resolver: PostResolver,
    lister: PostLister,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl ServerState {
    fn color_mode(&self, headers: &HeaderMap) -> ColorMode {
        let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
        ColorMode::from_cookie_header(cookie, &self.blog.config.color_theme_cookie)
            .unwrap_or(self.blog.config.default_color_mode)
    }

    fn site(&self, headers: &HeaderMap) -> SiteData {
        SiteData::new(&self.blog.config, self.color_mode(headers))
    }
}

/// Build the router over `store`
pub fn router(blog: &Blog, store: Arc<dyn ContentStore>) -> Result<Router> {
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        resolver: blog.resolver_for(store.clone()),
        lister: blog.lister_for(store),
        markdown: blog.markdown_renderer(),
        templates: TemplateRenderer::new()?,
    });

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/rss.xml", get(rss_handler))
        .route("/:slug", get(post_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog, blog.store())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let site = state.site(&headers);

    let summaries = match state.lister.list().await {
        Ok(summaries) => summaries,
        Err(e) => return content_error(&state, &site, e),
    };

    html_or_500(state.templates.render_index(&site, &summaries))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let site = state.site(&headers);

    let post = match state.resolver.resolve(&slug).await {
        Ok(post) => post,
        Err(e) => return content_error(&state, &site, e),
    };

    let content = match state.markdown.render(&post.body) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to render {:?}: {}", slug, e);
            return internal_error();
        }
    };

    html_or_500(state.templates.render_post(&site, &PostData::new(&post, content)))
}

async fn rss_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.lister.list().await {
        Ok(summaries) => (
            [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            feed::rss(&state.blog.config, &summaries),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to build feed: {}", e);
            internal_error()
        }
    }
}

async fn not_found_handler(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    not_found(&state, &state.site(&headers))
}

/// NotFound becomes a 404 page; anything else is logged and becomes a 500
fn content_error(state: &ServerState, site: &SiteData, err: ContentError) -> Response {
    if err.is_not_found() {
        tracing::debug!("{}", err);
        return not_found(state, site);
    }
    tracing::error!("{}", err);
    internal_error()
}

fn not_found(state: &ServerState, site: &SiteData) -> Response {
    match state.templates.render_not_found(site) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn html_or_500(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

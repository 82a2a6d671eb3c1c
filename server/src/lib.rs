use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use delve_core::config::DEFAULT_TOP_K;
use delve_core::{synthesize, DirectoryCorpus, DocMatch, DocSearch, ExternalResults, Report, Summarizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<DocMatch>,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_sentences: Option<usize>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Deserialize)]
pub struct KeyPointsRequest {
    pub text: String,
    pub num_points: Option<usize>,
}

#[derive(Serialize)]
pub struct KeyPointsResponse {
    pub points: Vec<String>,
}

#[derive(Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub id: String,
    pub text: String,
}

#[derive(Clone)]
pub struct AppState {
    pub docs: Arc<DocSearch>,
}

/// Serve the text files under `corpus_dir`, indexed before the router is returned.
pub fn build_app(corpus_dir: &str, exclude: Vec<String>) -> Result<Router> {
    Ok(build_app_with(load_docs(corpus_dir, exclude)?))
}

/// Scan and index `corpus_dir` up front so no request pays for the first build.
pub fn load_docs(corpus_dir: &str, exclude: Vec<String>) -> Result<DocSearch> {
    let corpus = DirectoryCorpus::new(corpus_dir).exclude(exclude);
    if !corpus.root().is_dir() {
        anyhow::bail!("corpus directory {corpus_dir} does not exist");
    }
    let docs = DocSearch::new(corpus);
    tracing::info!(corpus = corpus_dir, documents = docs.document_count(), "index loaded");
    Ok(docs)
}

pub fn build_app_with(docs: DocSearch) -> Router {
    let app_state = AppState { docs: Arc::new(docs) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/documents", get(documents_handler))
        .route("/doc/*id", get(doc_handler))
        .route("/summarize", post(summarize_handler))
        .route("/key-points", post(key_points_handler))
        .route("/research", post(research_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, MAX_K);
    let results = state.docs.search(&params.q, k);
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), ?elapsed, "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results })
}

pub async fn documents_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.docs.list_documents())
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocResponse>, (StatusCode, String)> {
    match state.docs.get_document(&id) {
        Some(text) => Ok(Json(DocResponse { id, text })),
        None => Err((StatusCode::NOT_FOUND, format!("document {id} not found"))),
    }
}

pub async fn summarize_handler(Json(req): Json<SummarizeRequest>) -> Json<SummarizeResponse> {
    let summarizer = Summarizer::default().with_sentences(req.max_sentences);
    Json(SummarizeResponse { summary: summarizer.summarize(&req.text) })
}

pub async fn key_points_handler(Json(req): Json<KeyPointsRequest>) -> Json<KeyPointsResponse> {
    let summarizer = Summarizer::default().with_points(req.num_points);
    Json(KeyPointsResponse { points: summarizer.extract_key_points(&req.text) })
}

/// Local-only research report; web and news are not consulted from the API.
pub async fn research_handler(State(state): State<AppState>, Json(req): Json<ResearchRequest>) -> Json<Report> {
    let local = state.docs.search(&req.query, DEFAULT_TOP_K);
    let none = ExternalResults::skipped();
    Json(synthesize(&req.query, &local, &none, &none))
}

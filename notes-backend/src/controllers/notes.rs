//! Notes REST API — CRUD over the note service.
//!
//! Request bodies are validated here, before anything reaches the service:
//! create needs a non-empty title or content, update needs any provided
//! field to be a string. Both trim string inputs.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::{Map, Value};
use std::fmt::Display;

use notes_types::ApiResponse;

use crate::notes::{ListQuery, NoteChanges, NoteError, RawListQuery};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}

// --- Boundary validation ---

const CREATE_RULE: &str = r#"provide a non-empty "title" or "content"."#;
const UPDATE_RULE: &str = r#""title" and "content" must be strings if provided."#;

/// Parse a JSON body into its top-level fields. An empty or non-object body
/// counts as `{}`.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, NoteError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(_) => Err(NoteError::Validation("request body must be valid JSON.".to_string())),
    }
}

/// Non-string values are treated as empty
fn create_input(fields: &Map<String, Value>) -> Result<(String, String), NoteError> {
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let title = text("title");
    let content = text("content");

    if title.is_empty() && content.is_empty() {
        return Err(NoteError::Validation(CREATE_RULE.to_string()));
    }
    Ok((title, content))
}

/// Absent fields stay `None`; present non-strings (including `null`) are rejected
fn update_input(fields: &Map<String, Value>) -> Result<NoteChanges, NoteError> {
    let text = |key: &str| match fields.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(NoteError::Validation(UPDATE_RULE.to_string())),
    };
    Ok(NoteChanges {
        title: text("title")?,
        content: text("content")?,
    })
}

// --- Responses ---

fn client_error(err: &NoteError) -> HttpResponse {
    let body = ApiResponse::<()>::fail(err.client_message());
    match err {
        NoteError::Validation(_) => HttpResponse::BadRequest().json(body),
        NoteError::NotFound(_) => HttpResponse::NotFound().json(body),
    }
}

fn server_error(message: &str, err: impl Display) -> HttpResponse {
    log::error!("[HTTP] {}: {}", message, err);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error(message))
}

// --- Handlers ---

/// List notes with optional `q`, `limit` and `offset`. The query string is
/// decoded into pairs so that a repeated key falls back to its default instead
/// of rejecting the request.
async fn list_notes(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let query = ListQuery::from_raw(&RawListQuery::from_pairs(&pairs));
    let page = data.notes.list(&query);
    HttpResponse::Ok().json(ApiResponse::page(page.notes, page.pagination))
}

async fn create_note(data: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let (title, content) = match parse_body(&body).and_then(|fields| create_input(&fields)) {
        Ok(input) => input,
        Err(e) => return client_error(&e),
    };

    // Mutations write the persistence file, keep them off the async workers
    let state = data.clone();
    match web::block(move || state.notes.create(title, content)).await {
        Ok(note) => HttpResponse::Created().json(ApiResponse::ok(note)),
        Err(e) => server_error("Failed to create note", e),
    }
}

async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.notes.get(&path) {
        Ok(note) => HttpResponse::Ok().json(ApiResponse::ok(note)),
        Err(e) => client_error(&e),
    }
}

/// Full or partial update of title and/or content
async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let changes = match parse_body(&body).and_then(|fields| update_input(&fields)) {
        Ok(changes) => changes,
        Err(e) => return client_error(&e),
    };

    let id = path.into_inner();
    let state = data.clone();
    match web::block(move || state.notes.update(&id, changes)).await {
        Ok(Ok(note)) => HttpResponse::Ok().json(ApiResponse::ok(note)),
        Ok(Err(e)) => client_error(&e),
        Err(e) => server_error("Failed to update note", e),
    }
}

async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let state = data.clone();
    match web::block(move || state.notes.remove(&id)).await {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        Ok(Err(e)) => client_error(&e),
        Err(e) => server_error("Failed to delete note", e),
    }
}

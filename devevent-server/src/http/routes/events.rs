//! Event endpoints

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use devevent_core::{normalize_event, Event, EventDraft};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::EventSlug;
use crate::http::server::AppState;
use crate::media::ImageUpload;

/// Upper bound for a publish request, image included
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Stands in for the image URL while the rest of the form is validated
const PENDING_IMAGE: &str = "pending-upload";

#[derive(Serialize)]
pub struct EventListResponse {
    pub message: &'static str,
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub message: &'static str,
    pub event: Event,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub message: &'static str,
    pub event: Event,
    pub booking_count: i64,
}

/// GET /api/events - all events, newest first
async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventListResponse>, ApiError> {
    let events = state.events.list_events().await?;
    Ok(Json(EventListResponse {
        message: "Events fetched successfully",
        events,
    }))
}

/// POST /api/events - publish an event from a multipart form
async fn create_event(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let form = EventForm::read(multipart).await?;
    let image = form.image.ok_or_else(|| ApiError::BadRequest {
        message: "image file is required".into(),
    })?;

    // Reject a bad form or a taken slug before anything is uploaded.
    let mut draft = form.draft;
    draft.image = PENDING_IMAGE.into();
    let checked = normalize_event(draft.clone(), None)?;
    if state.events.find_event_by_slug(&checked.slug).await?.is_some() {
        return Err(ApiError::Conflict {
            message: "an event with this slug already exists".into(),
        });
    }

    draft.image = state.media.upload_image(image).await?;
    let event = state.events.create_event(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created successfully",
            event,
        }),
    ))
}

/// GET /api/events/{slug} - event detail
async fn get_event(
    State(state): State<Arc<AppState>>,
    EventSlug(slug): EventSlug,
) -> Result<Json<EventDetailResponse>, ApiError> {
    let event = state
        .events
        .find_event_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "event",
            id: slug.clone(),
        })?;

    let booking_count = state.bookings.count_bookings_for_event(event.id).await?;

    Ok(Json(EventDetailResponse {
        message: "Event fetched successfully",
        event,
        booking_count,
    }))
}

/// Event routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{slug}", get(get_event))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Publish form after multipart decoding
struct EventForm {
    draft: EventDraft,
    image: Option<ImageUpload>,
}

impl EventForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut text: HashMap<String, String> = HashMap::new();
        let mut agenda = Vec::new();
        let mut tags = Vec::new();
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "image" => image = read_image(field).await?,
                "agenda" => agenda.extend(split_list(&field.text().await.map_err(bad_form)?, false)),
                "tags" => tags.extend(split_list(&field.text().await.map_err(bad_form)?, true)),
                _ => {
                    let value = field.text().await.map_err(bad_form)?;
                    text.insert(name, value);
                }
            }
        }

        let mut take = |key: &str| text.remove(key).unwrap_or_default();
        let draft = EventDraft {
            title: take("title"),
            description: take("description"),
            overview: take("overview"),
            image: String::new(),
            venue: take("venue"),
            location: take("location"),
            date: take("date"),
            time: take("time"),
            mode: take("mode"),
            audience: take("audience"),
            agenda,
            organizer: take("organizer"),
            tags,
        };

        Ok(Self { draft, image })
    }
}

async fn read_image(field: Field<'_>) -> Result<Option<ImageUpload>, ApiError> {
    let file_name = field.file_name().unwrap_or("upload").to_owned();
    let content_type = field.content_type().map(str::to_owned);
    let bytes = field.bytes().await.map_err(bad_form)?;

    // Browsers send an empty part when no file was picked.
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn bad_form(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest {
        message: format!("invalid multipart form: {e}"),
    }
}

/// A list field arrives as a JSON array string or as comma-separated text.
/// Blank entries are left for the normalizer to drop.
fn split_list(raw: &str, strip_quotes: bool) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items;
        }
    }

    trimmed
        .split(',')
        .map(|item| {
            if strip_quotes {
                item.trim().trim_matches(|c| c == '"' || c == '\'').to_owned()
            } else {
                item.trim().to_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_list() {
        assert_eq!(
            split_list(r#"["Opening", "Workshops, part 1"]"#, false),
            vec!["Opening", "Workshops, part 1"]
        );
    }

    #[test]
    fn comma_separated_list() {
        assert_eq!(split_list("rust, wasm ,", false), vec!["rust", "wasm", ""]);
    }

    #[test]
    fn tag_quotes_stripped() {
        assert_eq!(split_list(r#""rust", 'async'"#, true), vec!["rust", "async"]);
    }

    #[test]
    fn malformed_json_falls_back_to_commas() {
        assert_eq!(split_list("[rust, wasm", true), vec!["[rust", "wasm"]);
    }
}

//! Event normalization pipeline
//!
//! Every event write goes through [`normalize_event`] before storage. The
//! derived fields (slug, date, time) are recomputed only when their source
//! field differs from the previously stored event, or when there is no
//! previous event. Re-saving an unchanged event never re-derives them.

mod date;
mod slug;
mod time;

pub use date::normalize_date;
pub use slug::derive_slug;
pub use time::normalize_time;

use crate::models::event::{MAX_DESCRIPTION_LEN, MAX_OVERVIEW_LEN, MAX_TITLE_LEN};
use crate::models::{Event, EventDraft, EventMode, NewEvent, ValidationError};

/// Validate a draft and canonicalize its derived fields.
///
/// `previous` is the stored event when this is an edit, `None` on create.
pub fn normalize_event(
    draft: EventDraft,
    previous: Option<&Event>,
) -> Result<NewEvent, ValidationError> {
    let title = required("title", &draft.title, Some(MAX_TITLE_LEN))?;
    let description = required("description", &draft.description, Some(MAX_DESCRIPTION_LEN))?;
    let overview = required("overview", &draft.overview, Some(MAX_OVERVIEW_LEN))?;
    let image = required("image", &draft.image, None)?;
    let venue = required("venue", &draft.venue, None)?;
    let location = required("location", &draft.location, None)?;
    let audience = required("audience", &draft.audience, None)?;
    let organizer = required("organizer", &draft.organizer, None)?;
    let mode: EventMode = draft.mode.parse()?;
    let agenda = non_empty_list("agenda", draft.agenda)?;
    let tags = non_empty_list("tags", draft.tags)?;

    let slug = match previous {
        Some(prev) if !changed(&prev.title, &title) => prev.slug.clone(),
        _ => {
            let slug = derive_slug(&title);
            if slug.is_empty() {
                return Err(ValidationError::InvalidFormat {
                    field: "title",
                    reason: "must contain at least one letter or digit",
                });
            }
            slug
        }
    };

    let date = match previous {
        Some(prev) if !changed(&prev.date, &draft.date) => prev.date.clone(),
        _ => normalize_date(&draft.date)?,
    };

    let time = match previous {
        Some(prev) if !changed(&prev.time, &draft.time) => prev.time.clone(),
        _ => normalize_time(&draft.time)?,
    };

    Ok(NewEvent {
        title,
        slug,
        description,
        overview,
        image,
        venue,
        location,
        date,
        time,
        mode,
        audience,
        agenda,
        organizer,
        tags,
    })
}

fn changed(stored: &str, incoming: &str) -> bool {
    stored != incoming
}

/// Trim a required text field and enforce its length limit (in characters).
fn required(field: &'static str, value: &str, max: Option<usize>) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if let Some(max) = max {
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }

    Ok(trimmed.to_owned())
}

fn non_empty_list(field: &'static str, items: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::EmptyList { field });
    }

    Ok(cleaned)
}

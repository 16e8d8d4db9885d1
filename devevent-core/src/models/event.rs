//! Event records, drafts and patches

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for event titles
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length for event descriptions
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Maximum length for event overviews
pub const MAX_OVERVIEW_LEN: usize = 500;

/// How attendees take part in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for EventMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            "" => Err(ValidationError::Empty { field: "mode" }),
            _ => Err(ValidationError::InvalidVariant {
                field: "mode",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored event with canonical slug, date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publish request as submitted, before validation.
///
/// Every field is raw text; `normalize_event` turns it into a [`NewEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            overview: event.overview.clone(),
            image: event.image.clone(),
            venue: event.venue.clone(),
            location: event.location.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            mode: event.mode.as_str().to_owned(),
            audience: event.audience.clone(),
            agenda: event.agenda.clone(),
            organizer: event.organizer.clone(),
            tags: event.tags.clone(),
        }
    }
}

/// Partial edit of a stored event. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub image: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub mode: Option<String>,
    pub audience: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// Overlay this patch on the stored event, producing a full draft.
    ///
    /// Untouched fields carry the stored (already canonical) values, so the
    /// normalizer sees them as unchanged.
    pub fn apply_to(self, event: &Event) -> EventDraft {
        let base = EventDraft::from(event);
        EventDraft {
            title: self.title.unwrap_or(base.title),
            description: self.description.unwrap_or(base.description),
            overview: self.overview.unwrap_or(base.overview),
            image: self.image.unwrap_or(base.image),
            venue: self.venue.unwrap_or(base.venue),
            location: self.location.unwrap_or(base.location),
            date: self.date.unwrap_or(base.date),
            time: self.time.unwrap_or(base.time),
            mode: self.mode.unwrap_or(base.mode),
            audience: self.audience.unwrap_or(base.audience),
            agenda: self.agenda.unwrap_or(base.agenda),
            organizer: self.organizer.unwrap_or(base.organizer),
            tags: self.tags.unwrap_or(base.tags),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated, canonical event fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

impl NewEvent {
    /// Combine with storage-assigned identity and timestamps.
    pub fn into_event(self, id: Uuid, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            overview: self.overview,
            image: self.image,
            venue: self.venue,
            location: self.location,
            date: self.date,
            time: self.time,
            mode: self.mode,
            audience: self.audience,
            agenda: self.agenda,
            organizer: self.organizer,
            tags: self.tags,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "RustConf".into(),
            slug: "rustconf".into(),
            description: "Talks".into(),
            overview: "Rust".into(),
            image: "https://img.example.com/a.png".into(),
            venue: "Hall A".into(),
            location: "Montreal".into(),
            date: "2025-09-02".into(),
            time: "09:00".into(),
            mode: EventMode::Hybrid,
            audience: "Developers".into(),
            agenda: vec!["Keynote".into()],
            organizer: "Rust Foundation".into(),
            tags: vec!["rust".into()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Online".parse::<EventMode>().unwrap(), EventMode::Online);
        assert_eq!(" HYBRID ".parse::<EventMode>().unwrap(), EventMode::Hybrid);
        assert_eq!("offline".parse::<EventMode>().unwrap(), EventMode::Offline);
    }

    #[test]
    fn mode_rejects_unknown() {
        let err = "in-person".parse::<EventMode>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "mode", .. }));
        assert!(matches!(
            "".parse::<EventMode>().unwrap_err(),
            ValidationError::Empty { field: "mode" }
        ));
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let event = stored();
        let draft = EventPatch {
            description: Some("Updated".into()),
            ..Default::default()
        }
        .apply_to(&event);

        assert_eq!(draft.description, "Updated");
        assert_eq!(draft.title, event.title);
        assert_eq!(draft.date, event.date);
        assert_eq!(draft.mode, "hybrid");
    }

    #[test]
    fn event_serializes_camel_case() {
        let json = serde_json::to_value(stored()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["mode"], "hybrid");
    }
}

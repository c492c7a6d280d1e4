//! Sound therapy tracks.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::SoundTrackId;
use crate::validation::Schema;

/// An audio track in the sound library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundTrack {
    pub id: SoundTrackId,
    pub title: String,
    pub description: Option<String>,
    /// Length in seconds.
    pub duration: Option<i32>,
    /// Free-text tag such as `rain` or `ocean`.
    pub category: String,
    pub audio_url: Option<String>,
}

/// Insert schema for [`SoundTrack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSoundTrack {
    #[validate(length(min = 1, code = "too_small", message = "Title cannot be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0, code = "too_small", message = "Duration cannot be negative"))]
    #[serde(default)]
    pub duration: Option<i32>,
    #[validate(length(min = 1, code = "too_small", message = "Category cannot be empty"))]
    pub category: String,
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl NewSoundTrack {
    /// Build the stored record.
    #[must_use]
    pub fn into_sound_track(self, id: SoundTrackId) -> SoundTrack {
        SoundTrack {
            id,
            title: self.title,
            description: self.description,
            duration: self.duration,
            category: self.category,
            audio_url: self.audio_url,
        }
    }
}

impl Schema for NewSoundTrack {
    const NAME: &'static str = "sound track";
    const REQUIRED: &'static [&'static str] = &["title", "category"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::parse;

    #[test]
    fn test_optional_fields_default_to_none() {
        let new: NewSoundTrack = parse(json!({ "title": "Rain", "category": "rain" })).unwrap();
        let track = new.into_sound_track(SoundTrackId::new(1));

        assert_eq!(track.description, None);
        assert_eq!(track.duration, None);
        assert_eq!(track.audio_url, None);
    }

    #[test]
    fn test_title_and_category_required() {
        let issues = parse::<NewSoundTrack>(json!({ "duration": 30 })).unwrap_err();
        let paths: Vec<_> = issues.iter().map(|i| i.path.join(".")).collect();
        assert_eq!(paths, vec!["title", "category"]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::entity::{submission, submission_image};

/// Keep the first occurrence of a field that was sent more than once.
fn first_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<String>::deserialize(deserializer)?.into_iter().next())
}

/// Raw `/submit` form body. `image_data_url` may repeat; for every other
/// field only the first value counts.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default, deserialize_with = "first_value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub workshop: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_data_url: Vec<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub csrf_token: Option<String>,
}

/// Raw `/delete` form body. `id` stays a string so bad input can be ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default, deserialize_with = "first_value")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub workshop: Option<String>,
    #[serde(default, deserialize_with = "first_value")]
    pub csrf_token: Option<String>,
}

/// Query parameters for the feed.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default, deserialize_with = "first_value")]
    pub w: Option<String>,
}

/// Fields of a submission row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub prompt: String,
    pub result: String,
    pub workshop: Option<String>,
}

/// Where an attached image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A `data:image/...` payload stored in the row.
    Inline(String),
    /// A link to an externally hosted image.
    Remote(String),
}

/// An image as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub data_url: Option<String>,
    pub url: Option<String>,
}

impl ImageAttachment {
    /// The value for an `<img src>`. Inline data wins over a remote link.
    pub fn src(&self) -> Option<&str> {
        self.data_url
            .as_deref()
            .or(self.url.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn is_inline(&self) -> bool {
        self.data_url.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl From<submission_image::Model> for ImageAttachment {
    fn from(model: submission_image::Model) -> Self {
        Self {
            data_url: model.image_data_url,
            url: model.image_url,
        }
    }
}

/// A submission with its images, newest-first in feed listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: i32,
    pub name: String,
    pub prompt: String,
    pub result: String,
    pub workshop: Option<String>,
    pub created_at: DateTime<Utc>,
    pub images: Vec<ImageAttachment>,
}

impl SubmissionRecord {
    pub fn from_model(model: submission::Model, images: Vec<ImageAttachment>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            prompt: model.prompt,
            result: model.result,
            workshop: model.workshop,
            created_at: model.created_at,
            images,
        }
    }

    /// Creation time in the fixed feed display format, UTC.
    pub fn display_time(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

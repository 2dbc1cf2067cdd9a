use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ImageRef, ItemId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizItemError {
    #[error("item id cannot be empty")]
    EmptyId,

    #[error("item {id} has an empty display name")]
    EmptyName { id: ItemId },

    #[error("item {id} has an empty description")]
    EmptyDescription { id: ItemId },

    #[error("item {id} has an empty image reference")]
    EmptyImageRef { id: ItemId },
}

//
// ─── DRAFT (unvalidated input) ─────────────────────────────────────────────────
//

/// Raw item content, as written in a catalog or loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuizItemDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Defaults to the item id when absent.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuizItemDraft {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fun_fact(mut self, fact: impl Into<String>) -> Self {
        self.fun_fact = Some(fact.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Trim and validate the draft into an immutable [`QuizItem`].
    ///
    /// Blank optional fields are dropped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuizItemError` when the id, name, description, or an explicit
    /// image reference is blank.
    pub fn validate(self) -> Result<QuizItem, QuizItemError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(QuizItemError::EmptyId);
        }
        let id = ItemId::new(id);

        let display_name = self.name.trim().to_string();
        if display_name.is_empty() {
            return Err(QuizItemError::EmptyName { id });
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(QuizItemError::EmptyDescription { id });
        }

        let image_ref = match self.image {
            Some(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(QuizItemError::EmptyImageRef { id });
                }
                ImageRef::new(raw)
            }
            None => ImageRef::new(id.as_str()),
        };

        Ok(QuizItem {
            id,
            display_name,
            description,
            image_ref,
            fun_fact: normalize_optional(self.fun_fact),
            location: normalize_optional(self.location),
            prompt: normalize_optional(self.prompt),
            explanation: normalize_optional(self.explanation),
        })
    }
}

//
// ─── VALIDATED ITEM ────────────────────────────────────────────────────────────
//

/// One anatomical entity (bone or suture) presentable as a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    id: ItemId,
    display_name: String,
    description: String,
    image_ref: ImageRef,
    fun_fact: Option<String>,
    location: Option<String>,
    prompt: Option<String>,
    explanation: Option<String>,
}

impl QuizItem {
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image_ref(&self) -> &ImageRef {
        &self.image_ref
    }

    #[must_use]
    pub fn fun_fact(&self) -> Option<&str> {
        self.fun_fact.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Question text shown while the item is being asked.
    ///
    /// Items without a dedicated prompt are asked by their description.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(&self.description)
    }

    #[must_use]
    pub fn has_custom_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

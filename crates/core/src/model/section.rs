use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Content area of the skull a quiz covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Neurocranium,
    Viscerocranium,
    Sutures,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown section: {raw} (expected neurocranium, sutures or viscerocranium)")]
pub struct UnknownSection {
    pub raw: String,
}

impl Section {
    /// Menu order.
    pub const ALL: [Section; 3] = [
        Section::Neurocranium,
        Section::Sutures,
        Section::Viscerocranium,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Section::Neurocranium => "neurocranium",
            Section::Viscerocranium => "viscerocranium",
            Section::Sutures => "sutures",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::Neurocranium => "Neurocranium",
            Section::Viscerocranium => "Viscerocranium",
            Section::Sutures => "Sutures",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Section::Neurocranium => "Learn about the bones that form the cranial cavity",
            Section::Viscerocranium => "Explore the facial skeleton and its functions",
            Section::Sutures => "Study the connections between cranial bones",
        }
    }

    /// Singular noun for one item of the section ("Bone", "Suture").
    #[must_use]
    pub fn item_noun(self) -> &'static str {
        match self {
            Section::Neurocranium | Section::Viscerocranium => "Bone",
            Section::Sutures => "Suture",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.slug() == needle)
            .ok_or_else(|| UnknownSection { raw: s.to_string() })
    }
}

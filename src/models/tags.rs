use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical topic tags.
pub const TOPICS: &[&str] = &[
    "Languages",
    "Coding",
    "STEM",
    "Writing",
    "History",
    "Accessibility",
];

/// Canonical form-factor tags.
pub const FORMS: &[&str] = &[
    "Web App",
    "Mobile App",
    "Physical Device",
    "API Integration",
];

/// Canonical audience tags.
pub const AUDIENCES: &[&str] = &[
    "K-12 Students",
    "K-12 Educators",
    "College Students",
    "University Professors",
];

/// A classification axis for projects.
///
/// Each category has a closed vocabulary; tag strings outside it are rejected
/// wherever tags enter the system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Topic,
    Form,
    Audience,
}

impl TagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Form => "form",
            Self::Audience => "audience",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "topic" => Some(Self::Topic),
            "form" => Some(Self::Form),
            "audience" => Some(Self::Audience),
            _ => None,
        }
    }

    /// All categories, in display order.
    pub fn all() -> [TagCategory; 3] {
        [Self::Topic, Self::Form, Self::Audience]
    }

    /// The project field (and service column) holding this category's tags.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Topic => "topics",
            Self::Form => "forms",
            Self::Audience => "audiences",
        }
    }

    /// Closed vocabulary for this category.
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Self::Topic => TOPICS,
            Self::Form => FORMS,
            Self::Audience => AUDIENCES,
        }
    }

    /// Whether `tag` belongs to this category's vocabulary.
    pub fn allows(&self, tag: &str) -> bool {
        self.vocabulary().contains(&tag)
    }
}

/// A tag outside its category's vocabulary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {} tag: {}", .category.as_str(), .tag)]
pub struct UnknownTag {
    pub category: TagCategory,
    pub tag: String,
}

/// Selected tags per category.
///
/// Transient working state of the filter sidebar and the submission form;
/// cleared only by an explicit action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSelection {
    pub topics: BTreeSet<String>,
    pub forms: BTreeSet<String>,
    pub audiences: BTreeSet<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected set for one category.
    pub fn set(&self, category: TagCategory) -> &BTreeSet<String> {
        match category {
            TagCategory::Topic => &self.topics,
            TagCategory::Form => &self.forms,
            TagCategory::Audience => &self.audiences,
        }
    }

    fn set_mut(&mut self, category: TagCategory) -> &mut BTreeSet<String> {
        match category {
            TagCategory::Topic => &mut self.topics,
            TagCategory::Form => &mut self.forms,
            TagCategory::Audience => &mut self.audiences,
        }
    }

    /// Idempotent toggle: adds `tag` if absent, removes it if present.
    ///
    /// Returns whether the tag is selected afterwards. Tags outside the
    /// category's vocabulary are rejected without touching the selection.
    pub fn toggle(&mut self, category: TagCategory, tag: &str) -> Result<bool, UnknownTag> {
        if !category.allows(tag) {
            return Err(UnknownTag {
                category,
                tag: tag.to_string(),
            });
        }
        let set = self.set_mut(category);
        if set.remove(tag) {
            Ok(false)
        } else {
            set.insert(tag.to_string());
            Ok(true)
        }
    }

    pub fn contains(&self, category: TagCategory, tag: &str) -> bool {
        self.set(category).contains(tag)
    }

    /// Empty every category. The caller's search text is unaffected.
    pub fn clear(&mut self) {
        self.topics.clear();
        self.forms.clear();
        self.audiences.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.forms.is_empty() && self.audiences.is_empty()
    }
}

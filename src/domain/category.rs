use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::translation::Aggregate;
use crate::domain::types::{CategoryId, CategoryTitle};

/// Canonical category record without its translations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub is_active: bool,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub is_active: bool,
}

/// Partial update of a [`Category`]; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryChanges {
    pub is_active: Option<bool>,
}

/// Per-language text of a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryText {
    pub title: CategoryTitle,
}

impl Aggregate for Category {
    type Id = CategoryId;
    type New = NewCategory;
    type Changes = CategoryChanges;
    type Fields = CategoryText;

    const NAME: &'static str = "category";

    fn id(&self) -> CategoryId {
        self.id
    }
}

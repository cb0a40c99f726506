use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::translation::Aggregate;
use crate::domain::types::{TagId, TagName};

/// Tag that can be attached to posts. All of its text lives in translations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Data required to insert a new [`Tag`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewTag;

/// Tags have no mutable columns; an update only restamps `updated_on`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TagChanges;

/// Per-language text of a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagText {
    pub name: TagName,
}

impl Aggregate for Tag {
    type Id = TagId;
    type New = NewTag;
    type Changes = TagChanges;
    type Fields = TagText;

    const NAME: &'static str = "tag";

    fn id(&self) -> TagId {
        self.id
    }
}

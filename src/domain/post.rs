use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::translation::Aggregate;
use crate::domain::types::{CategoryId, PostId, PostStatusId, PostStatusName, PostTitle, TagId};

/// Blog post belonging to a category, without its translations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub category_id: CategoryId,
    pub post_status_id: PostStatusId,
    /// Associated tags, ascending.
    pub tag_ids: Vec<TagId>,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Data required to insert a new [`Post`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub category_id: CategoryId,
    pub post_status_id: PostStatusId,
    pub tag_ids: Vec<TagId>,
}

/// Partial update of a [`Post`]; `None` keeps the stored value.
///
/// `tag_ids: Some(vec![])` detaches every tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostChanges {
    pub category_id: Option<CategoryId>,
    pub post_status_id: Option<PostStatusId>,
    pub tag_ids: Option<Vec<TagId>>,
}

/// Per-language text of a post. The body may be empty for drafts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostText {
    pub title: PostTitle,
    pub body: String,
}

/// Entry of the post status catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostStatus {
    pub id: PostStatusId,
    pub name: PostStatusName,
}

impl Aggregate for Post {
    type Id = PostId;
    type New = NewPost;
    type Changes = PostChanges;
    type Fields = PostText;

    const NAME: &'static str = "post";

    fn id(&self) -> PostId {
        self.id
    }
}

use crate::domain::post::Post;
use crate::domain::types::PostId;
use crate::dto::posts::PostDto;
use crate::forms::posts::{CreatePostPayload, UpdatePostPayload};
use crate::repository::{EntityStore, LanguageReader, TranslationStore, UnitOfWork};
use crate::services::aggregate;
use crate::services::{Envelope, ServiceResult};

pub fn list_posts<R>(repo: &R) -> ServiceResult<Vec<PostDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Post> + TranslationStore<Post>,
{
    let posts = aggregate::get_all::<Post, R>(repo)?;
    Ok(posts.into_iter().map(PostDto::from).collect())
}

pub fn show_post<R>(post_id: PostId, repo: &R) -> ServiceResult<Option<PostDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Post> + TranslationStore<Post>,
{
    let post = aggregate::get_one::<Post, R>(repo, post_id)?;
    Ok(post.map(PostDto::from))
}

pub fn create_post<R>(payload: CreatePostPayload, repo: &R) -> ServiceResult<Envelope<PostId>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Post> + TranslationStore<Post> + LanguageReader,
{
    aggregate::create::<Post, R>(repo, payload.post, payload.translations)
}

pub fn update_post<R>(
    post_id: PostId,
    payload: UpdatePostPayload,
    repo: &R,
) -> ServiceResult<Envelope<PostDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Post> + TranslationStore<Post> + LanguageReader,
{
    let updated =
        aggregate::update::<Post, R>(repo, post_id, payload.changes, payload.translations)?;
    Ok(updated.map(PostDto::from))
}

pub fn delete_post<R>(post_id: PostId, repo: &R) -> ServiceResult<Envelope<()>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Post> + TranslationStore<Post> + LanguageReader,
{
    aggregate::delete::<Post, R>(repo, post_id)
}

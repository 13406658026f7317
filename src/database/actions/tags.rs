use sqlx::{Pool, Postgres};

use crate::{
    error::{Error, QueryError},
    schema::{Tag, Uuid},
};

pub async fn create_tag(user_id: Uuid, name: &str, pool: &Pool<Postgres>) -> Result<Tag, Error> {
    let tag: Tag = sqlx::query_as("INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING *")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(tag)
}

pub async fn get_tag(id: Uuid, pool: &Pool<Postgres>) -> Result<Option<Tag>, Error> {
    let tag: Option<Tag> = sqlx::query_as("SELECT * FROM tags WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(tag)
}

pub async fn find_tag(
    user_id: Uuid,
    name: &str,
    pool: &Pool<Postgres>,
) -> Result<Option<Tag>, Error> {
    let tag: Option<Tag> = sqlx::query_as("SELECT * FROM tags WHERE user_id = $1 AND name = $2")
        .bind(user_id)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(tag)
}

pub async fn list_tags(user_id: Uuid, pool: &Pool<Postgres>) -> Result<Vec<Tag>, Error> {
    let list: Vec<Tag> = sqlx::query_as("SELECT * FROM tags WHERE user_id = $1 ORDER BY name")
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(list)
}

pub async fn save_tag(tag: &Tag, pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query("UPDATE tags SET name = $1 WHERE id = $2")
        .bind(&tag.name)
        .bind(tag.id)
        .execute(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(())
}

/// Lookup a tag by owner and name, inserting it when absent. Concurrent
/// inserts of the same name are resolved by the (user_id, name) unique
/// index; the losing insert falls through to a second lookup.
pub async fn get_or_create_tag(
    user_id: Uuid,
    name: &str,
    pool: &Pool<Postgres>,
) -> Result<Tag, Error> {
    if let Some(tag) = find_tag(user_id, name, pool).await? {
        return Ok(tag);
    }

    let inserted: Option<Tag> = sqlx::query_as(
        "INSERT INTO tags (user_id, name) VALUES ($1, $2) ON CONFLICT (user_id, name) DO NOTHING RETURNING *",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(QueryError::from)?;

    match inserted {
        Some(tag) => {
            log::trace!("> Created tag {:?} for user {}", tag.name, user_id);
            Ok(tag)
        }
        None => find_tag(user_id, name, pool)
            .await?
            .ok_or_else(|| QueryError::new(format!("Lost tag {name} during get-or-create")).into()),
    }
}

pub async fn list_recipe_tags(recipe_id: Uuid, pool: &Pool<Postgres>) -> Result<Vec<Tag>, Error> {
    let list: Vec<Tag> = sqlx::query_as(
        "
        SELECT t.id AS id, t.user_id AS user_id, t.name AS name
        FROM recipe_tags_map m
        INNER JOIN tags t ON t.id = m.tag_id
        WHERE m.recipe_id = $1
        ORDER BY m.id
    ",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(list)
}

pub async fn add_tag_to_recipe(
    recipe_id: Uuid,
    tag_id: Uuid,
    pool: &Pool<Postgres>,
) -> Result<(), Error> {
    sqlx::query(
        "INSERT INTO recipe_tags_map (recipe_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(recipe_id)
    .bind(tag_id)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(())
}

pub async fn clear_recipe_tags(recipe_id: Uuid, pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query("DELETE FROM recipe_tags_map WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(())
}

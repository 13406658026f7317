use sqlx::{Pool, Postgres};

use crate::{
    error::{Error, QueryError},
    schema::{Ingredient, Uuid},
};

pub async fn create_ingredient(
    user_id: Uuid,
    name: &str,
    pool: &Pool<Postgres>,
) -> Result<Ingredient, Error> {
    let ingredient: Ingredient =
        sqlx::query_as("INSERT INTO ingredients (user_id, name) VALUES ($1, $2) RETURNING *")
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
            .map_err(QueryError::from)?;

    Ok(ingredient)
}

pub async fn get_ingredient(id: Uuid, pool: &Pool<Postgres>) -> Result<Option<Ingredient>, Error> {
    let ingredient: Option<Ingredient> = sqlx::query_as("SELECT * FROM ingredients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(ingredient)
}

pub async fn find_ingredient(
    user_id: Uuid,
    name: &str,
    pool: &Pool<Postgres>,
) -> Result<Option<Ingredient>, Error> {
    let ingredient: Option<Ingredient> =
        sqlx::query_as("SELECT * FROM ingredients WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(QueryError::from)?;

    Ok(ingredient)
}

pub async fn list_ingredients(
    user_id: Uuid,
    pool: &Pool<Postgres>,
) -> Result<Vec<Ingredient>, Error> {
    let list: Vec<Ingredient> =
        sqlx::query_as("SELECT * FROM ingredients WHERE user_id = $1 ORDER BY name")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(QueryError::from)?;

    Ok(list)
}

pub async fn save_ingredient(ingredient: &Ingredient, pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query("UPDATE ingredients SET name = $1 WHERE id = $2")
        .bind(&ingredient.name)
        .bind(ingredient.id)
        .execute(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(())
}

/// Same contract as tags::get_or_create_tag, over the ingredients table.
pub async fn get_or_create_ingredient(
    user_id: Uuid,
    name: &str,
    pool: &Pool<Postgres>,
) -> Result<Ingredient, Error> {
    if let Some(ingredient) = find_ingredient(user_id, name, pool).await? {
        return Ok(ingredient);
    }

    let inserted: Option<Ingredient> = sqlx::query_as(
        "INSERT INTO ingredients (user_id, name) VALUES ($1, $2) ON CONFLICT (user_id, name) DO NOTHING RETURNING *",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(QueryError::from)?;

    match inserted {
        Some(ingredient) => {
            log::trace!(
                "> Created ingredient {:?} for user {}",
                ingredient.name,
                user_id
            );
            Ok(ingredient)
        }
        None => find_ingredient(user_id, name, pool).await?.ok_or_else(|| {
            QueryError::new(format!("Lost ingredient {name} during get-or-create")).into()
        }),
    }
}

pub async fn list_recipe_ingredients(
    recipe_id: Uuid,
    pool: &Pool<Postgres>,
) -> Result<Vec<Ingredient>, Error> {
    let list: Vec<Ingredient> = sqlx::query_as(
        "
        SELECT i.id AS id, i.user_id AS user_id, i.name AS name
        FROM recipe_ingredients_map m
        INNER JOIN ingredients i ON i.id = m.ingredient_id
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

pub async fn add_ingredient_to_recipe(
    recipe_id: Uuid,
    ingredient_id: Uuid,
    pool: &Pool<Postgres>,
) -> Result<(), Error> {
    sqlx::query(
        "INSERT INTO recipe_ingredients_map (recipe_id, ingredient_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(recipe_id)
    .bind(ingredient_id)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(())
}

pub async fn clear_recipe_ingredients(recipe_id: Uuid, pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query("DELETE FROM recipe_ingredients_map WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(())
}

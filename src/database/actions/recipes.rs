use sqlx::{Pool, Postgres};

use crate::{
    error::{Error, QueryError},
    schema::{NewRecipe, Recipe, Uuid},
};

pub async fn create_recipe(
    user_id: Uuid,
    recipe: NewRecipe,
    pool: &Pool<Postgres>,
) -> Result<Recipe, Error> {
    let row: Recipe = sqlx::query_as(
        "
        INSERT INTO recipes (user_id, title, time_minutes, price, link, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
    ",
    )
    .bind(user_id)
    .bind(recipe.title)
    .bind(recipe.time_minutes)
    .bind(recipe.price)
    .bind(recipe.link)
    .bind(recipe.description)
    .fetch_one(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(row)
}

pub async fn get_recipe(id: Uuid, pool: &Pool<Postgres>) -> Result<Option<Recipe>, Error> {
    let row: Option<Recipe> = sqlx::query_as("SELECT * FROM recipes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(row)
}

pub async fn list_recipes(user_id: Uuid, pool: &Pool<Postgres>) -> Result<Vec<Recipe>, Error> {
    let rows: Vec<Recipe> = sqlx::query_as("SELECT * FROM recipes WHERE user_id = $1 ORDER BY id DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(rows)
}

/* Writes every scalar column back, including the image reference. */
pub async fn save_recipe(recipe: &Recipe, pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query(
        "
        UPDATE recipes
        SET title = $1, time_minutes = $2, price = $3, link = $4, description = $5, image = $6
        WHERE id = $7
    ",
    )
    .bind(&recipe.title)
    .bind(recipe.time_minutes)
    .bind(recipe.price)
    .bind(&recipe.link)
    .bind(&recipe.description)
    .bind(&recipe.image)
    .bind(recipe.id)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(())
}

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    actions::{ingredients, recipes, tags},
    error::Error,
    schema::{Ingredient, NewRecipe, Recipe, Tag, Uuid},
};

/// Storage seam consumed by the serializers. Associations are keyed by
/// record ids; get-or-create lookups are always scoped to an owning user.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_recipe(&self, user_id: Uuid, recipe: NewRecipe) -> Result<Recipe, Error>;
    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, Error>;
    async fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, Error>;
    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), Error>;

    async fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error>;
    async fn get_tag(&self, id: Uuid) -> Result<Option<Tag>, Error>;
    async fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>, Error>;
    async fn save_tag(&self, tag: &Tag) -> Result<(), Error>;
    async fn get_or_create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error>;
    async fn list_recipe_tags(&self, recipe_id: Uuid) -> Result<Vec<Tag>, Error>;
    async fn add_tag_to_recipe(&self, recipe_id: Uuid, tag_id: Uuid) -> Result<(), Error>;
    async fn clear_recipe_tags(&self, recipe_id: Uuid) -> Result<(), Error>;

    async fn create_ingredient(&self, user_id: Uuid, name: &str) -> Result<Ingredient, Error>;
    async fn get_ingredient(&self, id: Uuid) -> Result<Option<Ingredient>, Error>;
    async fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>, Error>;
    async fn save_ingredient(&self, ingredient: &Ingredient) -> Result<(), Error>;
    async fn get_or_create_ingredient(&self, user_id: Uuid, name: &str)
        -> Result<Ingredient, Error>;
    async fn list_recipe_ingredients(&self, recipe_id: Uuid) -> Result<Vec<Ingredient>, Error>;
    async fn add_ingredient_to_recipe(
        &self,
        recipe_id: Uuid,
        ingredient_id: Uuid,
    ) -> Result<(), Error>;
    async fn clear_recipe_ingredients(&self, recipe_id: Uuid) -> Result<(), Error>;
}

/// Postgres-backed store, delegating to the action functions.
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn create_recipe(&self, user_id: Uuid, recipe: NewRecipe) -> Result<Recipe, Error> {
        recipes::create_recipe(user_id, recipe, &self.pool).await
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, Error> {
        recipes::get_recipe(id, &self.pool).await
    }

    async fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, Error> {
        recipes::list_recipes(user_id, &self.pool).await
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), Error> {
        recipes::save_recipe(recipe, &self.pool).await
    }

    async fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error> {
        tags::create_tag(user_id, name, &self.pool).await
    }

    async fn get_tag(&self, id: Uuid) -> Result<Option<Tag>, Error> {
        tags::get_tag(id, &self.pool).await
    }

    async fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>, Error> {
        tags::list_tags(user_id, &self.pool).await
    }

    async fn save_tag(&self, tag: &Tag) -> Result<(), Error> {
        tags::save_tag(tag, &self.pool).await
    }

    async fn get_or_create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error> {
        tags::get_or_create_tag(user_id, name, &self.pool).await
    }

    async fn list_recipe_tags(&self, recipe_id: Uuid) -> Result<Vec<Tag>, Error> {
        tags::list_recipe_tags(recipe_id, &self.pool).await
    }

    async fn add_tag_to_recipe(&self, recipe_id: Uuid, tag_id: Uuid) -> Result<(), Error> {
        tags::add_tag_to_recipe(recipe_id, tag_id, &self.pool).await
    }

    async fn clear_recipe_tags(&self, recipe_id: Uuid) -> Result<(), Error> {
        tags::clear_recipe_tags(recipe_id, &self.pool).await
    }

    async fn create_ingredient(&self, user_id: Uuid, name: &str) -> Result<Ingredient, Error> {
        ingredients::create_ingredient(user_id, name, &self.pool).await
    }

    async fn get_ingredient(&self, id: Uuid) -> Result<Option<Ingredient>, Error> {
        ingredients::get_ingredient(id, &self.pool).await
    }

    async fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>, Error> {
        ingredients::list_ingredients(user_id, &self.pool).await
    }

    async fn save_ingredient(&self, ingredient: &Ingredient) -> Result<(), Error> {
        ingredients::save_ingredient(ingredient, &self.pool).await
    }

    async fn get_or_create_ingredient(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Ingredient, Error> {
        ingredients::get_or_create_ingredient(user_id, name, &self.pool).await
    }

    async fn list_recipe_ingredients(&self, recipe_id: Uuid) -> Result<Vec<Ingredient>, Error> {
        ingredients::list_recipe_ingredients(recipe_id, &self.pool).await
    }

    async fn add_ingredient_to_recipe(
        &self,
        recipe_id: Uuid,
        ingredient_id: Uuid,
    ) -> Result<(), Error> {
        ingredients::add_ingredient_to_recipe(recipe_id, ingredient_id, &self.pool).await
    }

    async fn clear_recipe_ingredients(&self, recipe_id: Uuid) -> Result<(), Error> {
        ingredients::clear_recipe_ingredients(recipe_id, &self.pool).await
    }
}

/// Fetch a recipe for mutation on behalf of a user. Missing ids map to
/// NotFound, foreign ownership to Unauthorized.
pub async fn get_recipe_mut(
    store: &dyn RecipeStore,
    user_id: Uuid,
    id: Uuid,
) -> Result<Recipe, Error> {
    match store.get_recipe(id).await? {
        Some(recipe) => {
            if recipe.user_id != user_id {
                Err(Error::Unauthorized)
            } else {
                Ok(recipe)
            }
        }
        None => Err(Error::NotFound(format!("No recipe exists with id {id}"))),
    }
}

pub async fn get_tag_mut(store: &dyn RecipeStore, user_id: Uuid, id: Uuid) -> Result<Tag, Error> {
    match store.get_tag(id).await? {
        Some(tag) => {
            if tag.user_id != user_id {
                Err(Error::Unauthorized)
            } else {
                Ok(tag)
            }
        }
        None => Err(Error::NotFound(format!("No tag exists with id {id}"))),
    }
}

pub async fn get_ingredient_mut(
    store: &dyn RecipeStore,
    user_id: Uuid,
    id: Uuid,
) -> Result<Ingredient, Error> {
    match store.get_ingredient(id).await? {
        Some(ingredient) => {
            if ingredient.user_id != user_id {
                Err(Error::Unauthorized)
            } else {
                Ok(ingredient)
            }
        }
        None => Err(Error::NotFound(format!("No ingredient exists with id {id}"))),
    }
}

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use recipebook_sdk::error::Error;
use recipebook_sdk::schema::{Ingredient, NewRecipe, Recipe, Tag, Uuid};
use recipebook_sdk::store::RecipeStore;

#[derive(Default)]
struct Inner {
    recipes: Vec<Recipe>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipe_tags: Vec<(Uuid, Uuid)>,
    recipe_ingredients: Vec<(Uuid, Uuid)>,
    next_id: Uuid,
}

impl Inner {
    fn next_id(&mut self) -> Uuid {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory RecipeStore with the same contract as PgStore: association
/// inserts are idempotent and reads preserve insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipe_count(&self) -> usize {
        self.inner.lock().unwrap().recipes.len()
    }

    pub fn tag_count(&self) -> usize {
        self.inner.lock().unwrap().tags.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.inner.lock().unwrap().ingredients.len()
    }

    pub fn tag_association_count(&self) -> usize {
        self.inner.lock().unwrap().recipe_tags.len()
    }

    pub fn ingredient_association_count(&self) -> usize {
        self.inner.lock().unwrap().recipe_ingredients.len()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn create_recipe(&self, user_id: Uuid, recipe: NewRecipe) -> Result<Recipe, Error> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let recipe = Recipe {
            id,
            user_id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            description: recipe.description,
            image: None,
        };
        inner.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, Error> {
        let inner = self.inner.lock().unwrap();
        let mut recipes: Vec<Recipe> = inner
            .recipes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(recipes)
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner.recipes.iter_mut().find(|r| r.id == recipe.id) {
            *slot = recipe.clone();
        }
        Ok(())
    }

    async fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let tag = Tag {
            id,
            user_id,
            name: name.to_string(),
        };
        inner.tags.push(tag.clone());
        Ok(tag)
    }

    async fn get_tag(&self, id: Uuid) -> Result<Option<Tag>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tags(&self, user_id: Uuid) -> Result<Vec<Tag>, Error> {
        let inner = self.inner.lock().unwrap();
        let mut tags: Vec<Tag> = inner
            .tags
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn save_tag(&self, tag: &Tag) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner.tags.iter_mut().find(|t| t.id == tag.id) {
            *slot = tag.clone();
        }
        Ok(())
    }

    async fn get_or_create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag, Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(tag) = inner
            .tags
            .iter()
            .find(|t| t.user_id == user_id && t.name == name)
        {
            return Ok(tag.clone());
        }
        let id = inner.next_id();
        let tag = Tag {
            id,
            user_id,
            name: name.to_string(),
        };
        inner.tags.push(tag.clone());
        Ok(tag)
    }

    async fn list_recipe_tags(&self, recipe_id: Uuid) -> Result<Vec<Tag>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .recipe_tags
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, tag_id)| inner.tags.iter().find(|t| t.id == *tag_id).cloned())
            .collect())
    }

    async fn add_tag_to_recipe(&self, recipe_id: Uuid, tag_id: Uuid) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.recipe_tags.contains(&(recipe_id, tag_id)) {
            inner.recipe_tags.push((recipe_id, tag_id));
        }
        Ok(())
    }

    async fn clear_recipe_tags(&self, recipe_id: Uuid) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.recipe_tags.retain(|(r, _)| *r != recipe_id);
        Ok(())
    }

    async fn create_ingredient(&self, user_id: Uuid, name: &str) -> Result<Ingredient, Error> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let ingredient = Ingredient {
            id,
            user_id,
            name: name.to_string(),
        };
        inner.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn get_ingredient(&self, id: Uuid) -> Result<Option<Ingredient>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>, Error> {
        let inner = self.inner.lock().unwrap();
        let mut ingredients: Vec<Ingredient> = inner
            .ingredients
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ingredients)
    }

    async fn save_ingredient(&self, ingredient: &Ingredient) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner.ingredients.iter_mut().find(|i| i.id == ingredient.id) {
            *slot = ingredient.clone();
        }
        Ok(())
    }

    async fn get_or_create_ingredient(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Ingredient, Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(ingredient) = inner
            .ingredients
            .iter()
            .find(|i| i.user_id == user_id && i.name == name)
        {
            return Ok(ingredient.clone());
        }
        let id = inner.next_id();
        let ingredient = Ingredient {
            id,
            user_id,
            name: name.to_string(),
        };
        inner.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn list_recipe_ingredients(&self, recipe_id: Uuid) -> Result<Vec<Ingredient>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .recipe_ingredients
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, ingredient_id)| {
                inner
                    .ingredients
                    .iter()
                    .find(|i| i.id == *ingredient_id)
                    .cloned()
            })
            .collect())
    }

    async fn add_ingredient_to_recipe(
        &self,
        recipe_id: Uuid,
        ingredient_id: Uuid,
    ) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.recipe_ingredients.contains(&(recipe_id, ingredient_id)) {
            inner.recipe_ingredients.push((recipe_id, ingredient_id));
        }
        Ok(())
    }

    async fn clear_recipe_ingredients(&self, recipe_id: Uuid) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.recipe_ingredients.retain(|(r, _)| *r != recipe_id);
        Ok(())
    }
}

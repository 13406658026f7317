use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::{
    constants::{RECIPE_FIELDS, RECIPE_IMAGE_FIELDS},
    error::{Error, ValidationError},
    schema::{Ingredient, NewRecipe, Recipe, Tag, Uuid},
    serializers::fields::{
        as_object, decimal_field, format_price, integer_field, name_list_field, string_field,
    },
    serializers::ingredients::IngredientSerializer,
    serializers::tags::TagSerializer,
    store::RecipeStore,
};

/// Validated recipe write payload. Scalars are optional so the same type
/// serves full creates and partial updates; `tags`/`ingredients` keep the
/// absent / present-but-empty distinction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeInput {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

fn validate_payload(
    value: &Value,
    partial: bool,
    with_description: bool,
) -> Result<RecipeInput, ValidationError> {
    let map = as_object(value)?;
    let mut errors = ValidationError::new();

    let required = !partial;
    let title = string_field(map, "title", required, false, &mut errors);
    let time_minutes = integer_field(map, "time_minutes", required, &mut errors);
    let price = decimal_field(map, "price", required, &mut errors);
    let link = string_field(map, "link", false, true, &mut errors);
    // Only the detail converter declares `description`; the base converter
    // treats it like any other undeclared key.
    let description = match with_description {
        true => string_field(map, "description", false, true, &mut errors),
        false => None,
    };
    let tags = name_list_field(map, "tags", &mut errors);
    let ingredients = name_list_field(map, "ingredients", &mut errors);

    errors.into_result()?;
    Ok(RecipeInput {
        title,
        time_minutes,
        price,
        link,
        description,
        tags,
        ingredients,
    })
}

async fn attach_tags(
    store: &dyn RecipeStore,
    user_id: Uuid,
    recipe_id: Uuid,
    names: &[String],
) -> Result<(), Error> {
    for name in names {
        let tag = store.get_or_create_tag(user_id, name).await?;
        store.add_tag_to_recipe(recipe_id, tag.id).await?;
    }

    Ok(())
}

async fn attach_ingredients(
    store: &dyn RecipeStore,
    user_id: Uuid,
    recipe_id: Uuid,
    names: &[String],
) -> Result<(), Error> {
    for name in names {
        let ingredient = store.get_or_create_ingredient(user_id, name).await?;
        store
            .add_ingredient_to_recipe(recipe_id, ingredient.id)
            .await?;
    }

    Ok(())
}

/* Shared by the base and detail converters. Validation has already run;
nothing here can fail before the first store call. */
async fn create_recipe(
    store: &dyn RecipeStore,
    user_id: Uuid,
    input: RecipeInput,
) -> Result<Recipe, Error> {
    let tags = input.tags.unwrap_or_default();
    let ingredients = input.ingredients.unwrap_or_default();

    let recipe = store
        .create_recipe(
            user_id,
            NewRecipe {
                title: input.title.unwrap_or_default(),
                time_minutes: input.time_minutes.unwrap_or_default(),
                price: input.price.unwrap_or_default(),
                link: input.link.unwrap_or_default(),
                description: input.description.unwrap_or_default(),
            },
        )
        .await?;

    attach_tags(store, user_id, recipe.id, &tags).await?;
    attach_ingredients(store, user_id, recipe.id, &ingredients).await?;
    log::debug!("> Created recipe {} for user {}", recipe.id, user_id);

    Ok(recipe)
}

/* An absent relation list leaves the existing associations untouched; a
present list, empty included, replaces them wholesale. */
async fn update_recipe(
    store: &dyn RecipeStore,
    mut recipe: Recipe,
    input: RecipeInput,
) -> Result<Recipe, Error> {
    let user_id = recipe.user_id;

    if let Some(tags) = input.tags {
        store.clear_recipe_tags(recipe.id).await?;
        attach_tags(store, user_id, recipe.id, &tags).await?;
    }
    if let Some(ingredients) = input.ingredients {
        store.clear_recipe_ingredients(recipe.id).await?;
        attach_ingredients(store, user_id, recipe.id, &ingredients).await?;
    }

    if let Some(title) = input.title {
        recipe.title = title;
    }
    if let Some(time_minutes) = input.time_minutes {
        recipe.time_minutes = time_minutes;
    }
    if let Some(price) = input.price {
        recipe.price = price;
    }
    if let Some(link) = input.link {
        recipe.link = link;
    }
    if let Some(description) = input.description {
        recipe.description = description;
    }

    store.save_recipe(&recipe).await?;
    Ok(recipe)
}

/// Composite converter: renders `tags` and `ingredients` as nested
/// `{id, name}` arrays and resolves them through get-or-create on write.
pub struct RecipeSerializer;

impl RecipeSerializer {
    pub fn fields() -> &'static [&'static str] {
        RECIPE_FIELDS
    }

    pub fn validate(value: &Value, partial: bool) -> Result<RecipeInput, ValidationError> {
        validate_payload(value, partial, false)
    }

    pub fn to_value(recipe: &Recipe, tags: &[Tag], ingredients: &[Ingredient]) -> Value {
        json!({
            "id": recipe.id,
            "title": recipe.title,
            "time_minutes": recipe.time_minutes,
            "price": format_price(&recipe.price),
            "link": recipe.link,
            "tags": TagSerializer::to_value_many(tags),
            "ingredients": IngredientSerializer::to_value_many(ingredients),
        })
    }

    pub async fn serialize(store: &dyn RecipeStore, recipe: &Recipe) -> Result<Value, Error> {
        let tags = store.list_recipe_tags(recipe.id).await?;
        let ingredients = store.list_recipe_ingredients(recipe.id).await?;
        Ok(Self::to_value(recipe, &tags, &ingredients))
    }

    pub async fn create(
        store: &dyn RecipeStore,
        user_id: Uuid,
        input: RecipeInput,
    ) -> Result<Recipe, Error> {
        create_recipe(store, user_id, input).await
    }

    pub async fn update(
        store: &dyn RecipeStore,
        recipe: Recipe,
        input: RecipeInput,
    ) -> Result<Recipe, Error> {
        update_recipe(store, recipe, input).await
    }
}

/// Base field set plus `description`. Same create/update path as the base
/// converter.
pub struct RecipeDetailSerializer;

impl RecipeDetailSerializer {
    pub fn fields() -> Vec<&'static str> {
        RECIPE_FIELDS
            .iter()
            .copied()
            .chain(std::iter::once("description"))
            .collect()
    }

    pub fn validate(value: &Value, partial: bool) -> Result<RecipeInput, ValidationError> {
        validate_payload(value, partial, true)
    }

    pub fn to_value(recipe: &Recipe, tags: &[Tag], ingredients: &[Ingredient]) -> Value {
        let mut value = RecipeSerializer::to_value(recipe, tags, ingredients);
        if let Value::Object(map) = &mut value {
            map.insert("description".to_string(), json!(recipe.description));
        }
        value
    }

    pub async fn serialize(store: &dyn RecipeStore, recipe: &Recipe) -> Result<Value, Error> {
        let tags = store.list_recipe_tags(recipe.id).await?;
        let ingredients = store.list_recipe_ingredients(recipe.id).await?;
        Ok(Self::to_value(recipe, &tags, &ingredients))
    }

    pub async fn create(
        store: &dyn RecipeStore,
        user_id: Uuid,
        input: RecipeInput,
    ) -> Result<Recipe, Error> {
        create_recipe(store, user_id, input).await
    }

    pub async fn update(
        store: &dyn RecipeStore,
        recipe: Recipe,
        input: RecipeInput,
    ) -> Result<Recipe, Error> {
        update_recipe(store, recipe, input).await
    }
}

/// Image uploads only: `id` plus a required `image` reference. No relation
/// handling.
pub struct RecipeImageSerializer;

impl RecipeImageSerializer {
    pub fn fields() -> &'static [&'static str] {
        RECIPE_IMAGE_FIELDS
    }

    pub fn to_value(recipe: &Recipe) -> Value {
        json!({
            "id": recipe.id,
            "image": recipe.image,
        })
    }

    pub fn validate(value: &Value) -> Result<String, ValidationError> {
        let map = as_object(value)?;
        let mut errors = ValidationError::new();

        let image = match map.get("image") {
            Some(Value::String(image)) if !image.is_empty() => Some(image.clone()),
            Some(Value::String(_)) => {
                errors.add("image", "The submitted file is empty.");
                None
            }
            Some(Value::Null) | None => {
                errors.add("image", "No file was submitted.");
                None
            }
            Some(_) => {
                errors.add("image", "Not a valid string.");
                None
            }
        };

        errors.into_result()?;
        Ok(image.unwrap_or_default())
    }

    pub async fn update(
        store: &dyn RecipeStore,
        mut recipe: Recipe,
        image: String,
    ) -> Result<Recipe, Error> {
        recipe.image = Some(image);
        store.save_recipe(&recipe).await?;
        Ok(recipe)
    }
}

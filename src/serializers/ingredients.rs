use serde_json::{json, Value};

use crate::{
    constants::INGREDIENT_FIELDS,
    error::{Error, ValidationError},
    schema::{Ingredient, Uuid},
    serializers::fields::{as_object, string_field},
    store::RecipeStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientInput {
    pub name: String,
}

/// Same contract as TagSerializer, over the ingredients table.
pub struct IngredientSerializer;

impl IngredientSerializer {
    pub fn fields() -> &'static [&'static str] {
        INGREDIENT_FIELDS
    }

    pub fn to_value(ingredient: &Ingredient) -> Value {
        json!({
            "id": ingredient.id,
            "name": ingredient.name,
        })
    }

    pub fn to_value_many(ingredients: &[Ingredient]) -> Value {
        Value::Array(ingredients.iter().map(Self::to_value).collect())
    }

    pub fn validate(value: &Value) -> Result<IngredientInput, ValidationError> {
        let map = as_object(value)?;
        let mut errors = ValidationError::new();
        let name = string_field(map, "name", true, false, &mut errors);

        errors.into_result()?;
        Ok(IngredientInput {
            name: name.unwrap_or_default(),
        })
    }

    pub async fn create(
        store: &dyn RecipeStore,
        user_id: Uuid,
        input: IngredientInput,
    ) -> Result<Ingredient, Error> {
        store.create_ingredient(user_id, &input.name).await
    }

    pub async fn update(
        store: &dyn RecipeStore,
        mut ingredient: Ingredient,
        input: IngredientInput,
    ) -> Result<Ingredient, Error> {
        ingredient.name = input.name;
        store.save_ingredient(&ingredient).await?;
        Ok(ingredient)
    }
}

use serde_json::{json, Value};

use crate::{
    constants::TAG_FIELDS,
    error::{Error, ValidationError},
    schema::{Tag, Uuid},
    serializers::fields::{as_object, string_field},
    store::RecipeStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInput {
    pub name: String,
}

/// Flat converter between a tag row and its `{id, name}` representation.
/// `id` is read-only; a supplied `id` is ignored on write.
pub struct TagSerializer;

impl TagSerializer {
    pub fn fields() -> &'static [&'static str] {
        TAG_FIELDS
    }

    pub fn to_value(tag: &Tag) -> Value {
        json!({
            "id": tag.id,
            "name": tag.name,
        })
    }

    pub fn to_value_many(tags: &[Tag]) -> Value {
        Value::Array(tags.iter().map(Self::to_value).collect())
    }

    pub fn validate(value: &Value) -> Result<TagInput, ValidationError> {
        let map = as_object(value)?;
        let mut errors = ValidationError::new();
        let name = string_field(map, "name", true, false, &mut errors);

        errors.into_result()?;
        Ok(TagInput {
            name: name.unwrap_or_default(),
        })
    }

    pub async fn create(
        store: &dyn RecipeStore,
        user_id: Uuid,
        input: TagInput,
    ) -> Result<Tag, Error> {
        store.create_tag(user_id, &input.name).await
    }

    pub async fn update(
        store: &dyn RecipeStore,
        mut tag: Tag,
        input: TagInput,
    ) -> Result<Tag, Error> {
        tag.name = input.name;
        store.save_tag(&tag).await?;
        Ok(tag)
    }
}

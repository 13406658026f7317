pub const MAX_CHAR_FIELD_LENGTH: usize = 255;

pub const PRICE_MAX_DIGITS: u32 = 5;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

pub const RECIPE_FIELDS: &[&str] = &[
    "id",
    "title",
    "time_minutes",
    "price",
    "link",
    "tags",
    "ingredients",
];

pub const RECIPE_IMAGE_FIELDS: &[&str] = &["id", "image"];

pub const TAG_FIELDS: &[&str] = &["id", "name"];
pub const INGREDIENT_FIELDS: &[&str] = &["id", "name"];

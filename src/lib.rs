mod database {
    pub mod actions;
    pub mod error;
    pub mod schema;
    pub mod store;
}
mod serializers {
    pub mod fields;
    pub mod ingredients;
    pub mod recipes;
    pub mod tags;
}
mod constants;

pub use constants::*;
pub use database::*;
pub use serializers::fields::*;
pub use serializers::ingredients::*;
pub use serializers::recipes::*;
pub use serializers::tags::*;

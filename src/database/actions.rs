pub mod ingredients;
pub mod recipes;
pub mod tags;

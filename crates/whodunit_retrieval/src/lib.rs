//! Retrieval collaborators for whodunit.
//!
//! - [`KeywordRetriever`] ranks an in-memory corpus of background documents
//!   by shared words with the query.
//! - [`load_all_recipes`] reads the regional recipe tables.
//! - [`menu_for_location`] and [`menu_by_ingredients`] pick a three-course
//!   dinner from those recipes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod keyword;
mod menu;
mod recipes;

pub use keyword::KeywordRetriever;
pub use menu::{menu_by_ingredients, menu_for_location};
pub use recipes::{RECIPE_FILES, load_all_recipes, load_recipe_file};

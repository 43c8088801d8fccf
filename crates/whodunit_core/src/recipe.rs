//! Recipe and menu types.

use serde::{Deserialize, Serialize};

/// Which course a recipe belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseType {
    /// Appetizer
    Starter,
    /// Main course
    Main,
    /// Dessert
    Dessert,
}

impl CourseType {
    /// Heading used on printed menus.
    pub fn label(&self) -> &'static str {
        match self {
            CourseType::Starter => "Starter",
            CourseType::Main => "Main Course",
            CourseType::Dessert => "Dessert",
        }
    }
}

/// A regional recipe row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    /// City or region the dish comes from
    pub city: String,
    /// Dish name
    pub name: String,
    /// Ingredient list as written in the source
    pub ingredients: String,
    /// Preparation steps
    pub preparation: String,
    /// Where the recipe was taken from
    pub source: String,
    /// Course this recipe is served as
    pub course_type: CourseType,
}

/// A three-course dinner; any course may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Appetizer
    pub starter: Option<Recipe>,
    /// Main course
    pub main: Option<Recipe>,
    /// Dessert
    pub dessert: Option<Recipe>,
}

impl Menu {
    /// The recipe served for a course.
    pub fn course(&self, course: CourseType) -> Option<&Recipe> {
        match course {
            CourseType::Starter => self.starter.as_ref(),
            CourseType::Main => self.main.as_ref(),
            CourseType::Dessert => self.dessert.as_ref(),
        }
    }

    /// Dish names only, the form prompts embed.
    pub fn names(&self) -> MenuNames {
        MenuNames {
            starter: self.starter.as_ref().map(|r| r.name.clone()),
            main: self.main.as_ref().map(|r| r.name.clone()),
            dessert: self.dessert.as_ref().map(|r| r.name.clone()),
        }
    }
}

/// Dish names of a menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuNames {
    /// Appetizer name
    pub starter: Option<String>,
    /// Main course name
    pub main: Option<String>,
    /// Dessert name
    pub dessert: Option<String>,
}

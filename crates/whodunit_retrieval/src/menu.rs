//! Three-course menu selection.

use tracing::{debug, instrument};
use whodunit_core::{CourseType, Menu, Recipe};

fn pick<'a>(pool: &[&'a Recipe], course: CourseType) -> Option<&'a Recipe> {
    pool.iter().copied().find(|r| r.course_type == course)
}

fn location_pool<'a>(location: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let needle = location.trim().to_lowercase();
    let filtered: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| {
            r.city.to_lowercase().contains(&needle) || r.name.to_lowercase().contains(&needle)
        })
        .collect();

    if filtered.is_empty() {
        debug!(location, "No recipe matches location, using all recipes");
        recipes.iter().collect()
    } else {
        filtered
    }
}

/// Pick the first starter, main and dessert associated with `location`.
///
/// A recipe matches when the location is a case-insensitive substring of its
/// city or name. Without any match the whole recipe list is used.
#[instrument(skip(recipes), fields(recipes = recipes.len()))]
pub fn menu_for_location(location: &str, recipes: &[Recipe]) -> Menu {
    let pool = location_pool(location, recipes);
    Menu {
        starter: pick(&pool, CourseType::Starter).cloned(),
        main: pick(&pool, CourseType::Main).cloned(),
        dessert: pick(&pool, CourseType::Dessert).cloned(),
    }
}

/// Pick each course by an ingredient search term.
///
/// For each course the first recipe whose ingredients or name contain the
/// term wins. An empty term, or a term nothing matches, falls back to the
/// location pick for that course.
#[instrument(skip(recipes), fields(recipes = recipes.len()))]
pub fn menu_by_ingredients(
    starter_term: &str,
    main_term: &str,
    dessert_term: &str,
    recipes: &[Recipe],
    location: &str,
) -> Menu {
    let fallback = menu_for_location(location, recipes);

    let search = |term: &str, course: CourseType| -> Option<Recipe> {
        let term = term.trim().to_lowercase();
        let found = if term.is_empty() {
            None
        } else {
            recipes.iter().find(|r| {
                r.course_type == course
                    && (r.ingredients.to_lowercase().contains(&term)
                        || r.name.to_lowercase().contains(&term))
            })
        };
        match found {
            Some(recipe) => Some(recipe.clone()),
            None => fallback.course(course).cloned(),
        }
    };

    Menu {
        starter: search(starter_term, CourseType::Starter),
        main: search(main_term, CourseType::Main),
        dessert: search(dessert_term, CourseType::Dessert),
    }
}

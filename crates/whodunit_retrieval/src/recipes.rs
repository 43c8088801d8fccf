//! Regional recipe tables.
//!
//! Each course lives in its own `;`-separated, Latin-1 encoded CSV file with
//! at least `city` and `name` columns and optional `ingredients`,
//! `preparation` and `source` columns.

use std::path::Path;
use tracing::{debug, instrument, warn};
use whodunit_core::{CourseType, Recipe};
use whodunit_error::{RecipeError, RecipeErrorKind, WhodunitResult};

/// File name of each course table.
pub const RECIPE_FILES: [(&str, CourseType); 3] = [
    ("appetizers.csv", CourseType::Starter),
    ("main_courses.csv", CourseType::Main),
    ("desserts.csv", CourseType::Dessert),
];

/// Load every course table found in `dir`.
///
/// Missing tables are skipped with a warning; the result may be empty.
#[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn load_all_recipes(dir: impl AsRef<Path>) -> WhodunitResult<Vec<Recipe>> {
    let dir = dir.as_ref();
    let mut recipes = Vec::new();

    for (file_name, course_type) in RECIPE_FILES {
        let path = dir.join(file_name);
        if !path.is_file() {
            warn!(path = %path.display(), "Recipe table missing, skipping");
            continue;
        }
        recipes.extend(load_recipe_file(&path, course_type)?);
    }

    debug!(recipes = recipes.len(), "Loaded recipes");
    Ok(recipes)
}

/// Load one course table.
///
/// Rows that cannot be parsed or lack a name are skipped.
pub fn load_recipe_file(path: &Path, course_type: CourseType) -> WhodunitResult<Vec<Recipe>> {
    let path_display = path.display().to_string();
    let bytes = std::fs::read(path)
        .map_err(|e| RecipeError::new(RecipeErrorKind::FileRead(format!("{}: {}", path_display, e))))?;
    let text = decode_latin1(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| {
            RecipeError::new(RecipeErrorKind::Header {
                path: path_display.clone(),
                message: e.to_string(),
            })
        })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect::<Vec<_>>();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| {
        column(name).ok_or_else(|| {
            RecipeError::new(RecipeErrorKind::MissingColumn {
                path: path_display.clone(),
                column: name.to_string(),
            })
        })
    };

    let city = required("city")?;
    let name = required("name")?;
    let ingredients = column("ingredients");
    let preparation = column("preparation");
    let source = column("source");

    let mut recipes = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "Skipping malformed recipe row");
                skipped += 1;
                continue;
            }
        };

        let field = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let recipe = Recipe {
            city: field(Some(city)),
            name: field(Some(name)),
            ingredients: field(ingredients),
            preparation: field(preparation),
            source: field(source),
            course_type,
        };

        if recipe.name.is_empty() {
            skipped += 1;
            continue;
        }
        recipes.push(recipe);
    }

    if skipped > 0 {
        warn!(path = %path_display, skipped, "Skipped malformed recipe rows");
    }
    Ok(recipes)
}

/// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_bytes_decode_to_umlauts() {
        assert_eq!(decode_latin1(b"Rote Gr\xfctze"), "Rote Grütze");
    }
}

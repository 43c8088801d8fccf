//! HTML pages served by the web front end.

use v_htmlescape::escape;
use whodunit_core::{CourseType, MysteryKit};

/// Location suggested by the form.
pub const DEFAULT_LOCATION: &str = "Hamburg";

/// Theme suggested by the form.
pub const DEFAULT_THEME: &str = "A small coastal town with a controversial political scandal";

/// Portrait shown for every character.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.png";

const STYLE: &str = "  <style>\n    body { font-family: Georgia, 'Times New Roman', serif; margin: 24px auto; max-width: 960px; background: #15131a; color: #ece6da; }\n    h1, h2, h3 { color: #e0b062; }\n    section { border: 1px solid #3a3442; border-radius: 10px; padding: 14px 18px; margin-bottom: 18px; background: #1d1a23; }\n    .character { display: grid; grid-template-columns: 120px 1fr; gap: 14px; margin-bottom: 12px; }\n    .character img { width: 120px; border-radius: 8px; }\n    .murderer { border-left: 4px solid #b3303b; padding-left: 10px; }\n    .suspicious { color: #e07a62; }\n    label { display: block; margin-top: 10px; }\n    input, textarea { width: 100%; padding: 6px; background: #0f0e12; color: #ece6da; border: 1px solid #3a3442; }\n    button, .button { margin-top: 14px; padding: 8px 16px; background: #e0b062; color: #15131a; border: none; border-radius: 6px; text-decoration: none; display: inline-block; }\n  </style>\n";

fn head(title: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>{}</title>\n{}</head>\n<body>\n",
        escape(title),
        STYLE
    )
}

const FOOT: &str = "</body>\n</html>\n";

/// The generation form with the default location and theme as placeholders.
pub fn render_index_page() -> String {
    render_index_page_with(DEFAULT_LOCATION, DEFAULT_THEME)
}

/// The generation form with custom placeholders.
pub fn render_index_page_with(location: &str, theme: &str) -> String {
    let mut html = head("Murder Mystery Generator");
    html.push_str("<h1>Murder Mystery Dinner Generator</h1>\n");
    html.push_str("<section>\n<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "  <label for=\"location\">Location</label>\n  <input id=\"location\" name=\"location\" placeholder=\"{}\">\n",
        escape(location)
    ));
    html.push_str(&format!(
        "  <label for=\"theme\">Setting or theme</label>\n  <textarea id=\"theme\" name=\"theme\" rows=\"3\" placeholder=\"{}\"></textarea>\n",
        escape(theme)
    ));
    for (field, label) in [
        ("starter_ingredient", "Starter ingredient (optional)"),
        ("main_ingredient", "Main course ingredient (optional)"),
        ("dessert_ingredient", "Dessert ingredient (optional)"),
    ] {
        html.push_str(&format!(
            "  <label for=\"{field}\">{label}</label>\n  <input id=\"{field}\" name=\"{field}\">\n"
        ));
    }
    html.push_str("  <button type=\"submit\">Generate mystery</button>\n</form>\n</section>\n");
    html.push_str(FOOT);
    html
}

fn field(html: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            escape(label),
            escape(value)
        ));
    }
}

/// The results page for one generated kit.
pub fn render_results_page(kit: &MysteryKit, location: &str) -> String {
    let mut html = head(&format!("Murder Mystery in {}", location));
    html.push_str(&format!("<h1>Murder Mystery in {}</h1>\n", escape(location)));
    html.push_str("<p><a class=\"button\" href=\"/export\">Download printable kit</a></p>\n");

    html.push_str("<section id=\"menu\">\n<h2>Dinner Menu</h2>\n");
    for course in [CourseType::Starter, CourseType::Main, CourseType::Dessert] {
        html.push_str(&format!("<h3>{}</h3>\n", course.label()));
        match kit.menu.course(course) {
            Some(recipe) => {
                html.push_str(&format!(
                    "<p>{} ({})</p>\n",
                    escape(&recipe.name),
                    escape(&recipe.city)
                ));
                field(&mut html, "Ingredients", &recipe.ingredients);
                field(&mut html, "Preparation", &recipe.preparation);
            }
            None => html.push_str("<p>None found for this location.</p>\n"),
        }
    }
    html.push_str("</section>\n");

    let case = &kit.case_data;
    html.push_str("<section id=\"case\">\n<h2>The Case</h2>\n");
    field(&mut html, "Victim", &case.victim_name);
    field(&mut html, "Description", &case.victim_description);
    field(&mut html, "Theme", &case.controversial_theme);
    field(&mut html, "Location", &case.location);
    field(&mut html, "Summary", &case.summary);
    field(&mut html, "Timeline", &case.timeline);
    html.push_str("</section>\n");

    html.push_str("<section id=\"characters\">\n<h2>Characters</h2>\n");
    for character in &kit.characters {
        let class = if character.murderer_label {
            "character murderer"
        } else {
            "character"
        };
        html.push_str(&format!(
            "<div class=\"{}\">\n<img src=\"{}\" alt=\"{}\">\n<div>\n<h3>{}</h3>\n",
            class,
            PLACEHOLDER_IMAGE,
            escape(&character.name),
            escape(&character.name)
        ));
        field(&mut html, "Occupation", &character.occupation);
        field(&mut html, "Relation to victim", &character.relation_to_victim);
        field(&mut html, "Appearance", &character.appearance);
        field(&mut html, "Background", &character.background);
        field(&mut html, "Secret", &character.secret);
        field(&mut html, "Personality", &character.personality_traits.join(", "));
        if !character.hint_about_other.hint.is_empty() {
            field(
                &mut html,
                &format!("Hint about {}", character.hint_about_other.target),
                &character.hint_about_other.hint,
            );
        }
        if character.murderer_label {
            html.push_str("<p><strong>Murderer</strong></p>\n");
        }
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</section>\n");

    let last_day = &kit.last_day_data;
    html.push_str("<section id=\"last-day\">\n<h2>The Victim's Last Day</h2>\n");
    html.push_str(&format!("<p>{}</p>\n<ul>\n", escape(&last_day.overview)));
    for event in &last_day.timeline {
        let class = if event.suspicious { " class=\"suspicious\"" } else { "" };
        html.push_str(&format!(
            "<li{}><strong>{} @ {}</strong>: {} <em>({})</em></li>\n",
            class,
            escape(&event.time),
            escape(&event.location),
            escape(&event.description),
            escape(&event.participants.join(", "))
        ));
    }
    html.push_str("</ul>\n</section>\n");

    html.push_str("<section id=\"clues\">\n<h2>Clues</h2>\n");
    for entry in &kit.clues {
        html.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape(&entry.character)));
        for clue in &entry.clues {
            html.push_str(&format!(
                "<li><strong>About {}:</strong> {}</li>\n",
                escape(&clue.target),
                escape(&clue.clue)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    let solution = &kit.solution;
    html.push_str("<section id=\"solution\">\n<h2>Solution</h2>\n");
    field(&mut html, "Killer", &solution.killer_name);
    field(&mut html, "Motive", &solution.motive);
    field(&mut html, "Method", &solution.method);
    field(&mut html, "Opportunity", &solution.opportunity);
    if !solution.clue_alignment.is_empty() {
        html.push_str("<h3>How the clues fit together</h3>\n<ul>\n");
        for item in &solution.clue_alignment {
            html.push_str(&format!(
                "<li>{}'s clue about {} ({}): {}</li>\n",
                escape(&item.character),
                escape(&item.about),
                escape(&item.clue_role),
                escape(&item.explanation)
            ));
        }
        html.push_str("</ul>\n");
    }
    if !solution.alternative_suspects.is_empty() {
        html.push_str("<h3>Alternative suspects</h3>\n<ul>\n");
        for alt in &solution.alternative_suspects {
            html.push_str(&format!(
                "<li>{}: {}</li>\n",
                escape(&alt.name),
                escape(&alt.why_they_looked_suspicious)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(&format!(
        "<h3>Final reveal</h3>\n<blockquote>{}</blockquote>\n</section>\n",
        escape(&solution.final_reveal_monologue)
    ));

    html.push_str(FOOT);
    html
}

/// A small error page with a link back to the form.
pub fn render_error_page(title: &str, message: &str) -> String {
    let mut html = head(title);
    html.push_str(&format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p>Please <a href=\"/\">generate a mystery</a> first, or try again.</p>\n",
        escape(title),
        escape(message)
    ));
    html.push_str(FOOT);
    html
}

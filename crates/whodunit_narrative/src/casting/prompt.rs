//! Cast prompt construction.

use whodunit_core::{CaseContext, MenuNames, RetrievedDocument};

const SYSTEM_INSTRUCTION: &str = "You are a writer of interactive murder mysteries. \
You always answer with VALID JSON arrays of character objects.";

/// The instruction pair sent for the cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastPrompt {
    /// System instruction
    pub system: String,
    /// User instruction
    pub user: String,
}

/// Query used to retrieve background documents for the cast.
pub fn retrieval_query(context: &CaseContext) -> String {
    let location = if context.case.location.trim().is_empty() {
        &context.location
    } else {
        &context.case.location
    };
    format!(
        "{} {} typical people occupations social environment",
        location,
        context.theme_for_retrieval()
    )
}

fn menu_line(label: &str, dish: &Option<String>) -> String {
    format!("- {}: {}", label, dish.as_deref().unwrap_or("none"))
}

fn render_menu(menu: &MenuNames) -> String {
    [
        menu_line("starter", &menu.starter),
        menu_line("main_course", &menu.main),
        menu_line("dessert", &menu.dessert),
    ]
    .join("\n")
}

fn render_documents(documents: &[RetrievedDocument]) -> String {
    if documents.is_empty() {
        return "(no background documents)".to_string();
    }
    documents
        .iter()
        .map(|d| format!("[{}] {}", d.id, d.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_whitelist(documents: &[RetrievedDocument]) -> String {
    let ids: Vec<String> = documents.iter().map(|d| format!("\"{}\"", d.id)).collect();
    format!("[{}]", ids.join(", "))
}

/// Build the cast instruction pair.
///
/// Pure formatting: the user instruction embeds the case, every document as
/// `[id] text`, the required count, the record schema and the allowed
/// reference ids.
///
/// # Examples
///
/// ```
/// use whodunit_core::{CaseContext, RetrievedDocument};
/// use whodunit_narrative::build_cast_prompt;
///
/// let docs = vec![RetrievedDocument::new("doc1", "Harbour workers strike.")];
/// let prompt = build_cast_prompt(&CaseContext::default(), 7, &docs);
/// assert!(prompt.user.contains("[doc1] Harbour workers strike."));
/// assert!(prompt.user.contains("exactly 7 characters"));
/// ```
pub fn build_cast_prompt(
    context: &CaseContext,
    num_characters: usize,
    documents: &[RetrievedDocument],
) -> CastPrompt {
    let case_json =
        serde_json::to_string_pretty(&context.case).unwrap_or_else(|_| format!("{:?}", context.case));

    let user = format!(
        r#"You are given a murder-mystery case.

LOCATION:
{location}

THEME:
{theme}

MENU:
{menu}

CASE:
{case_json}

You also have some background reference material:

CONTEXT:
{documents}

TASK:
Create a cast of exactly {num_characters} characters: {innocents} suspects or close contacts of the victim and 1 murderer.

For each character, include:
- name: string, unique within the cast
- appearance: string, 1-2 sentences of visual details useful for an illustrator
- occupation: string, short
- relation_to_victim: string, short (friend, colleague, ex-partner, rival, etc.)
- background: string, 2-4 sentences (use CONTEXT to make it realistic)
- secret: string, 1-3 sentences describing a secret between this character and the victim
- personality_traits: list of 2-4 short adjectives
- hint_about_other: object with
    - target: string, the name of another character
    - hint: string, 1-2 sentences about that character's secret or suspicious behavior
- source_references: list of CONTEXT ids you used, chosen only from {whitelist}
- murderer_label: boolean, true for exactly one character

Return a JSON array of exactly {num_characters} character objects."#,
        location = context.location,
        theme = context.theme,
        menu = render_menu(&context.menu),
        documents = render_documents(documents),
        innocents = num_characters.saturating_sub(1),
        whitelist = render_whitelist(documents),
    );

    CastPrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whodunit_core::CaseData;

    fn context() -> CaseContext {
        CaseContext::new(
            "Hamburg",
            "harbour corruption",
            MenuNames {
                starter: Some("Krabbensuppe".to_string()),
                main: None,
                dessert: Some("Rote Grütze".to_string()),
            },
            CaseData {
                victim_name: "Lena Hartmann".to_string(),
                location: "Hamburg harbour".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn prompt_embeds_everything_needed() {
        let docs = vec![
            RetrievedDocument::new("doc1", "Dockers unionise."),
            RetrievedDocument::new("doc2", "The mayor owns a shipyard."),
        ];
        let prompt = build_cast_prompt(&context(), 5, &docs);

        assert!(prompt.system.contains("JSON"));
        assert!(prompt.user.contains("Lena Hartmann"));
        assert!(prompt.user.contains("harbour corruption"));
        assert!(prompt.user.contains("- main_course: none"));
        assert!(prompt.user.contains("- dessert: Rote Grütze"));
        assert!(prompt.user.contains("[doc1] Dockers unionise.\n[doc2] The mayor owns a shipyard."));
        assert!(prompt.user.contains("exactly 5 characters: 4 suspects"));
        assert!(prompt.user.contains(r#"["doc1", "doc2"]"#));
        for field in [
            "name",
            "appearance",
            "occupation",
            "relation_to_victim",
            "background",
            "secret",
            "personality_traits",
            "hint_about_other",
            "source_references",
            "murderer_label",
        ] {
            assert!(prompt.user.contains(&format!("- {field}:")), "schema lacks {field}");
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_cast_prompt(&context(), 7, &[]);
        let b = build_cast_prompt(&context(), 7, &[]);
        assert_eq!(a, b);
        assert!(a.user.contains("(no background documents)"));
        assert!(a.user.contains("chosen only from []"));
    }

    #[test]
    fn query_prefers_generated_case_details() {
        assert_eq!(
            retrieval_query(&context()),
            "Hamburg harbour harbour corruption typical people occupations social environment"
        );
    }
}

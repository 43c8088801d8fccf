//! Printable documents for the host and the players.
//!
//! One document for the dinner menu, one for the victim's last day, one with
//! every character's clues, the solution, and a sheet per character. Sheets
//! leave out what the character would rather keep quiet: secrets, hints
//! about others and source references.

use crate::clean_text;
use std::collections::HashSet;
use tracing::debug;
use whodunit_core::{CaseData, CharacterRecord, CourseType, MysteryKit};

/// One layout element of a document. Text is already cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Document title
    Title(String),
    /// Section heading
    Heading(String),
    /// Wrapped body text
    Paragraph(String),
    /// Bold label followed by a value
    Field {
        /// Label without the colon
        key: String,
        /// Value text
        value: String,
    },
    /// Vertical space
    Gap,
    /// Continue on a fresh page
    PageBreak,
}

/// A named printable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Base name without extension
    pub name: String,
    /// Layout, top to bottom
    pub blocks: Vec<Block>,
}

impl Document {
    /// A document with the given base name.
    pub fn new(name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }

    /// File name inside an export.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.name)
    }

    /// The document title, falling back to its name.
    pub fn title(&self) -> &str {
        self.blocks
            .iter()
            .find_map(|block| match block {
                Block::Title(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or(self.name.as_str())
    }

    /// Plain-text rendition, one block per line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Title(text) => {
                    out.push_str(&format!("{}\n{}\n\n", text, "=".repeat(text.chars().count())));
                }
                Block::Heading(text) => {
                    out.push_str(&format!("{}\n{}\n", text, "-".repeat(text.chars().count())));
                }
                Block::Paragraph(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Field { key, value } => out.push_str(&format!("{}:\n{}\n", key, value)),
                Block::Gap => out.push('\n'),
                Block::PageBreak => out.push_str("\n- - - - - - - - cut here - - - - - - - -\n\n"),
            }
        }
        format!("{}\n", out.trim_end())
    }
}

/// Accumulates blocks, cleaning every value.
#[derive(Debug, Default)]
struct Sheet {
    blocks: Vec<Block>,
}

impl Sheet {
    fn title(mut self, text: &str) -> Self {
        self.blocks.push(Block::Title(clean_text(text)));
        self
    }

    fn heading(&mut self, text: &str) {
        self.blocks.push(Block::Heading(clean_text(text)));
    }

    fn paragraph(&mut self, text: &str) {
        self.blocks.push(Block::Paragraph(clean_text(text)));
    }

    fn field(&mut self, key: &str, value: &str) {
        self.blocks.push(Block::Field {
            key: clean_text(key),
            value: clean_text(value),
        });
    }

    fn gap(&mut self) {
        self.blocks.push(Block::Gap);
    }

    fn page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    fn finish(mut self) -> Vec<Block> {
        while self.blocks.last() == Some(&Block::Gap) {
            self.blocks.pop();
        }
        self.blocks
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// `dinner_menu_and_recipes`
pub fn menu_document(kit: &MysteryKit) -> Document {
    let mut sheet = Sheet::default().title("Dinner Menu and Recipes");
    for course in [CourseType::Starter, CourseType::Main, CourseType::Dessert] {
        sheet.heading(course.label());
        match kit.menu.course(course) {
            Some(recipe) => {
                sheet.paragraph(&format!("{} ({})", recipe.name, recipe.city));
                sheet.field("Ingredients", &recipe.ingredients);
                sheet.field("Preparation", &recipe.preparation);
                if !recipe.source.is_empty() {
                    sheet.field("Source", &recipe.source);
                }
            }
            None => sheet.paragraph("None found for this location."),
        }
        sheet.gap();
    }
    Document::new("dinner_menu_and_recipes", sheet.finish())
}

/// `victims_last_day`
pub fn last_day_document(kit: &MysteryKit) -> Document {
    let last_day = &kit.last_day_data;
    let mut sheet = Sheet::default().title("Victim's Last Day");

    sheet.heading("Overview");
    sheet.paragraph(&last_day.overview);
    sheet.gap();

    sheet.heading("Timeline");
    if last_day.timeline.is_empty() {
        sheet.paragraph("No timeline entries available.");
    }
    for event in &last_day.timeline {
        let time = if event.time.is_empty() { "Unknown time" } else { &event.time };
        let location = if event.location.is_empty() {
            "Unknown location"
        } else {
            &event.location
        };
        sheet.paragraph(&format!("{} @ {}", time, location));
        sheet.paragraph(&event.description);
        sheet.paragraph(&format!("Participants: {}", event.participants.join(", ")));
        sheet.paragraph(&format!("Suspicious: {}", yes_no(event.suspicious)));
        sheet.gap();
    }
    Document::new("victims_last_day", sheet.finish())
}

/// `character_clues`, one cut-out section per character.
pub fn clues_document(kit: &MysteryKit) -> Document {
    let mut sheet = Sheet::default().title("Character Clues (Cutout Pages)");
    for (i, entry) in kit.clues.iter().enumerate() {
        if i > 0 {
            sheet.page_break();
        }
        sheet.heading(&entry.character);
        if entry.clues.is_empty() {
            sheet.paragraph("No clues available.");
        }
        for clue in &entry.clues {
            sheet.paragraph(&format!("About {}:", clue.target));
            sheet.paragraph(&clue.clue);
            sheet.gap();
        }
    }
    Document::new("character_clues", sheet.finish())
}

/// `final_solution`
pub fn solution_document(kit: &MysteryKit) -> Document {
    let solution = &kit.solution;
    let mut sheet = Sheet::default().title("Final Solution");

    sheet.field("Killer", &solution.killer_name);
    sheet.field("Motive", &solution.motive);
    sheet.field("Method", &solution.method);
    sheet.field("Opportunity", &solution.opportunity);
    sheet.gap();

    sheet.heading("Clue Alignment");
    if solution.clue_alignment.is_empty() {
        sheet.paragraph("No clue alignment details available.");
    }
    for item in &solution.clue_alignment {
        sheet.paragraph(&format!(
            "{} about {} ({})",
            item.character, item.about, item.clue_role
        ));
        sheet.paragraph(&item.explanation);
        sheet.gap();
    }
    sheet.gap();

    sheet.heading("Alternative Suspects");
    if solution.alternative_suspects.is_empty() {
        sheet.paragraph("No alternative suspects listed.");
    }
    for alt in &solution.alternative_suspects {
        sheet.paragraph(&format!("{}: {}", alt.name, alt.why_they_looked_suspicious));
    }
    sheet.gap();

    sheet.heading("Final Reveal Monologue");
    sheet.paragraph(&solution.final_reveal_monologue);
    Document::new("final_solution", sheet.finish())
}

fn case_section(sheet: &mut Sheet, case: &CaseData) {
    for (key, value) in [
        ("Location", &case.location),
        ("Victim Name", &case.victim_name),
        ("Victim Description", &case.victim_description),
        ("Summary", &case.summary),
        ("Timeline", &case.timeline),
    ] {
        if !value.is_empty() {
            sheet.field(key, value);
        }
    }
}

/// File-name-safe form of a character name.
pub fn safe_name(name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() { "Unnamed" } else { name };
    name.chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect()
}

/// `character_<Name>`, the sheet handed to one player.
pub fn character_document(character: &CharacterRecord, case: &CaseData) -> Document {
    let mut sheet = Sheet::default().title(&format!("Character Sheet: {}", character.name));
    sheet.paragraph("Image not available.");
    sheet.gap();

    sheet.heading("Case");
    case_section(&mut sheet, case);
    sheet.gap();

    sheet.heading("Character Details");
    sheet.field("Name", &character.name);
    sheet.field("Appearance", &character.appearance);
    sheet.field("Occupation", &character.occupation);
    sheet.field("Relation To Victim", &character.relation_to_victim);
    sheet.field("Background", &character.background);
    sheet.field("Personality Traits", &character.personality_traits.join(", "));
    sheet.field("Murderer", yes_no(character.murderer_label));

    Document::new(format!("character_{}", safe_name(&character.name)), sheet.finish())
}

/// Every printable document of a kit, in print order.
///
/// Names are unique ignoring case: a character sheet whose name is already
/// taken, by another sheet or by a fixed document, gets `_2`, `_3`, ...
/// appended.
pub fn printable_documents(kit: &MysteryKit) -> Vec<Document> {
    let mut documents = vec![
        menu_document(kit),
        last_day_document(kit),
        clues_document(kit),
        solution_document(kit),
    ];
    let mut taken: HashSet<String> = documents.iter().map(|d| d.name.to_lowercase()).collect();

    for character in &kit.characters {
        let mut document = character_document(character, &kit.case_data);
        if !taken.insert(document.name.to_lowercase()) {
            let base = document.name.clone();
            let mut k = 2;
            while !taken.insert(format!("{}_{}", base, k).to_lowercase()) {
                k += 1;
            }
            document.name = format!("{}_{}", base, k);
            debug!(from = %base, to = %document.name, "Renamed colliding document");
        }
        documents.push(document);
    }
    debug!(documents = documents.len(), "Rendered printable documents");
    documents
}

use std::io::Read;
use whodunit_core::{
    CaseData, CharacterClues, CharacterRecord, Clue, CourseType, HintAboutOther, LastDay, Menu,
    MysteryKit, Recipe, Solution, TimelineEvent,
};
use whodunit_render::{
    ARCHIVE_FILE_NAME, archive_download_name, package_archive, printable_documents,
    render_error_page, render_index_page, render_pdf, render_results_page, write_documents,
};

fn kit() -> MysteryKit {
    let mut jonas = CharacterRecord::named("Jonas Weber");
    jonas.secret = "Owed the victim money.".to_string();
    jonas.hint_about_other = HintAboutOther {
        target: "Mira <Lange>".to_string(),
        hint: "Saw her at the pier.".to_string(),
    };
    jonas.source_references = vec!["doc1".to_string()];
    jonas.background = "Dock worker.\nSource References:\n- doc1\n".to_string();
    let mut mira = CharacterRecord::named("Mira <Lange>");
    mira.murderer_label = true;

    MysteryKit {
        menu: Menu {
            starter: Some(Recipe {
                city: "Hamburg".to_string(),
                name: "Labskaus".to_string(),
                ingredients: "beef, beetroot".to_string(),
                preparation: "Mash everything.".to_string(),
                source: String::new(),
                course_type: CourseType::Starter,
            }),
            main: None,
            dessert: None,
        },
        case_data: CaseData {
            victim_name: "Klaus Brandt".to_string(),
            controversial_theme: "Bribes".to_string(),
            summary: "Found in the canal.".to_string(),
            ..CaseData::default()
        },
        characters: vec![jonas, mira],
        last_day_data: LastDay {
            overview: "A long day.".to_string(),
            timeline: vec![TimelineEvent {
                time: "21:00".to_string(),
                location: "Pier".to_string(),
                participants: vec!["Mira <Lange>".to_string()],
                description: "An argument.".to_string(),
                suspicious: true,
            }],
            raw_model_output: None,
        },
        clues: vec![CharacterClues {
            character: "Jonas Weber".to_string(),
            clues: vec![Clue {
                target: "Mira <Lange>".to_string(),
                clue: "Her coat was wet.".to_string(),
            }],
        }],
        solution: Solution {
            killer_name: "Mira <Lange>".to_string(),
            motive: "Revenge.".to_string(),
            final_reveal_monologue: "It was \u{201c}Mira\u{201d}.".to_string(),
            ..Solution::default()
        },
    }
}

#[test]
fn index_page_has_every_form_field() {
    let html = render_index_page();
    for name in [
        "location",
        "theme",
        "starter_ingredient",
        "main_ingredient",
        "dessert_ingredient",
    ] {
        assert!(html.contains(&format!("name=\"{}\"", name)), "missing {}", name);
    }
    assert!(html.contains("Hamburg"));
}

#[test]
fn results_page_escapes_model_text() {
    let html = render_results_page(&kit(), "Hamburg");
    assert!(html.contains("Mira &lt;Lange&gt;"));
    assert!(!html.contains("Mira <Lange>"));
    assert!(html.contains("href=\"/export\""));
    assert_eq!(html.matches("/static/placeholder.png").count(), 2);
    assert!(html.contains("Labskaus"));
}

#[test]
fn error_page_escapes_message() {
    let html = render_error_page("Error", "<script>");
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn one_document_per_character_plus_four() {
    let documents = printable_documents(&kit());
    let names: Vec<String> = documents.iter().map(|d| d.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "dinner_menu_and_recipes.pdf",
            "victims_last_day.pdf",
            "character_clues.pdf",
            "final_solution.pdf",
            "character_Jonas_Weber.pdf",
            "character_Mira_-Lange-.pdf",
        ]
    );
}

#[test]
fn character_sheets_hide_secrets() {
    let documents = printable_documents(&kit());
    let sheet = documents[4].text();
    assert!(sheet.contains("Character Sheet: Jonas Weber"));
    assert!(sheet.contains("Dock worker."));
    assert!(!sheet.contains("Owed the victim money."));
    assert!(!sheet.contains("Saw her at the pier."));
    assert!(!sheet.contains("doc1"));
    assert!(!sheet.contains("Bribes"));
    assert!(sheet.contains("Klaus Brandt"));
}

#[test]
fn solution_document_uses_plain_punctuation() {
    let documents = printable_documents(&kit());
    let solution = documents[3].text();
    assert!(solution.contains("It was \"Mira\"."));
    assert!(solution.contains("No clue alignment details available."));
}

#[test]
fn archive_contains_every_document() {
    let documents = printable_documents(&kit());
    let bytes = package_archive(&documents).unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), documents.len());

    let mut pdf = Vec::new();
    archive
        .by_name("final_solution.pdf")
        .unwrap()
        .read_to_end(&mut pdf)
        .unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn colliding_sheet_names_get_suffixes() {
    let mut kit = kit();
    kit.characters = ["Eva Maria", "Eva_Maria", "clues", "eva maria"]
        .into_iter()
        .map(CharacterRecord::named)
        .collect();

    let documents = printable_documents(&kit);
    let names: Vec<String> = documents[4..].iter().map(|d| d.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "character_Eva_Maria.pdf",
            "character_Eva_Maria_2.pdf",
            "character_clues_2.pdf",
            "character_eva_maria_3.pdf",
        ]
    );
    assert!(documents[5].text().contains("Character Sheet: Eva_Maria"));

    let bytes = package_archive(&documents).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), documents.len());
}

#[test]
fn documents_render_as_pdf() {
    for document in printable_documents(&kit()) {
        let bytes = render_pdf(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "{}", document.name);
    }
}

#[test]
fn export_is_written_to_timestamped_directory() {
    let dir = tempfile::tempdir().unwrap();
    let documents = printable_documents(&kit());
    let export = write_documents(dir.path(), &documents).unwrap();

    assert_eq!(export.parent(), Some(dir.path()));
    assert!(export.join("victims_last_day.pdf").is_file());
    assert!(export.join(ARCHIVE_FILE_NAME).is_file());
    assert_eq!(archive_download_name("20250101_120000"), "mystery_case_20250101_120000.zip");
}

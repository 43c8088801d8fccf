//! Generate command handler.

use crate::cli::GenerateArgs;
use std::fmt::Write;
use std::sync::Arc;
use whodunit::{
    CompletionDriver, MysteryKit, MysteryRequestBuilder, ServerClient, ServerConfig,
    WhodunitConfig, WhodunitResult, build_generator_with, evaluate, judge_narrative,
    printable_documents, write_documents,
};

/// Console rendering of a kit, stage by stage.
pub fn format_kit(kit: &MysteryKit) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== MENU ===");
    for (label, recipe) in [
        ("Starter", &kit.menu.starter),
        ("Main Course", &kit.menu.main),
        ("Dessert", &kit.menu.dessert),
    ] {
        match recipe {
            Some(r) => {
                let _ = writeln!(out, "{}: {} ({})", label, r.name, r.city);
            }
            None => {
                let _ = writeln!(out, "{}: none found", label);
            }
        }
    }

    let case = &kit.case_data;
    let _ = writeln!(out, "\n=== CASE ===");
    let _ = writeln!(out, "Victim: {} - {}", case.victim_name, case.victim_description);
    let _ = writeln!(out, "Theme: {}", case.controversial_theme);
    let _ = writeln!(out, "Location: {}", case.location);
    let _ = writeln!(out, "{}", case.summary);

    let _ = writeln!(out, "\n=== CHARACTERS ===");
    for c in &kit.characters {
        let _ = writeln!(out, "- {}: {} ({})", c.name, c.occupation, c.relation_to_victim);
        let _ = writeln!(out, "  Secret: {}", c.secret);
        let _ = writeln!(out, "  Appearance: {}", c.appearance);
        let _ = writeln!(out, "  Murderer: {}", if c.murderer_label { "Y" } else { "N" });
    }

    let _ = writeln!(out, "\n=== VICTIM'S LAST DAY ===");
    let _ = writeln!(out, "Overview: {}", kit.last_day_data.overview);
    for event in &kit.last_day_data.timeline {
        let _ = writeln!(out, "- {} @ {}: {}", event.time, event.location, event.description);
        let _ = writeln!(out, "  Participants: {}", event.participants.join(", "));
        let _ = writeln!(out, "  Suspicious: {}", event.suspicious);
    }

    let _ = writeln!(out, "\n=== CHARACTER CLUES ===");
    for entry in &kit.clues {
        let _ = writeln!(out, "{} has clues:", entry.character);
        for clue in &entry.clues {
            let _ = writeln!(out, "  -> About {}: {}", clue.target, clue.clue);
        }
    }

    let s = &kit.solution;
    let _ = writeln!(out, "\n=== FINAL SOLUTION ===");
    let _ = writeln!(out, "Killer: {}", s.killer_name);
    let _ = writeln!(out, "\nMotive:\n{}", s.motive);
    let _ = writeln!(out, "\nMethod:\n{}", s.method);
    let _ = writeln!(out, "\nOpportunity:\n{}", s.opportunity);
    let _ = writeln!(out, "\nHow the clues fit together:");
    for a in &s.clue_alignment {
        let _ = writeln!(
            out,
            " - {}'s clue about {} ({}): {}",
            a.character, a.about, a.clue_role, a.explanation
        );
    }
    let _ = writeln!(out, "\nAlternative suspects:");
    for alt in &s.alternative_suspects {
        let _ = writeln!(out, " - {}: {}", alt.name, alt.why_they_looked_suspicious);
    }
    let _ = writeln!(out, "\n=== FINAL REVEAL MONOLOGUE ===");
    let _ = writeln!(out, "{}", s.final_reveal_monologue);
    out
}

/// Handle the `generate` command
pub async fn handle_generate(config: &WhodunitConfig, args: GenerateArgs) -> WhodunitResult<()> {
    let driver: Arc<dyn CompletionDriver> =
        Arc::new(ServerClient::new(ServerConfig::from_settings(&config.server))?);

    let mut generator = build_generator_with(config, driver.clone())?;
    if let Some(seed) = args.seed {
        generator = generator.with_seed(seed);
    }

    let location = args
        .location
        .unwrap_or_else(|| config.web.default_location.clone());
    let theme = args
        .theme
        .unwrap_or_else(|| config.web.default_theme.clone());
    let request = MysteryRequestBuilder::default()
        .location(location)
        .theme(theme)
        .starter_ingredient(args.starter.unwrap_or_default())
        .main_ingredient(args.main.unwrap_or_default())
        .dessert_ingredient(args.dessert.unwrap_or_default())
        .build()
        .map_err(|e| whodunit::ConfigError::new(e.to_string()))?;

    let kit = generator.generate(&request).await;
    println!("{}", format_kit(&kit));

    if let Some(dir) = args.output {
        let export = write_documents(&dir, &printable_documents(&kit))?;
        println!("Documents written to {}", export.display());
    }

    if args.evaluate {
        let score = judge_narrative(driver.as_ref(), &kit).await;
        let report = evaluate(&kit).with_narrative_quality(score);
        println!("{}", report.summary());
        let path = report.save(&config.data.output_dir)?;
        println!("Evaluation report saved: {}", path.display());
    }

    Ok(())
}

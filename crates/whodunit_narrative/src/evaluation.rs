//! Quality metrics for a generated mystery.
//!
//! Four automated checks plus an optional judgement by the model itself.
//! Scores are on a 0-10 scale, except clue quantity which tops out at 7.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, error, info, instrument, warn};
use whodunit_core::{CourseType, GenerateRequest, Message, MysteryKit};
use whodunit_error::{StorageError, StorageErrorKind, WhodunitResult};
use whodunit_interface::CompletionDriver;

/// Judge score used when the model gives no number.
pub const DEFAULT_JUDGE_SCORE: f64 = 5.0;

/// Temperature of the judge request.
pub const JUDGE_TEMPERATURE: f32 = 0.3;

/// File name of the saved report.
pub const REPORT_FILE_NAME: &str = "evaluation_report.json";

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("Valid score regex"));

/// Scores per metric, each rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    /// Share of cast names mentioned in the solution
    pub character_consistency: f64,
    /// Timeline events against a target of five
    pub timeline_completeness: f64,
    /// Total clues against a target of seven, out of 7
    pub clue_quantity: f64,
    /// Dishes mentioned in the case text
    pub menu_integration: f64,
    /// The model's own rating, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_quality: Option<f64>,
}

impl QualityScores {
    /// Every score present, in report order.
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![
            self.character_consistency,
            self.timeline_completeness,
            self.clue_quantity,
            self.menu_integration,
        ];
        values.extend(self.narrative_quality);
        values
    }

    /// Mean of the present scores, rounded to one decimal.
    pub fn overall(&self) -> f64 {
        let values = self.values();
        round1(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Counts behind the scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDetails {
    /// Cast members named in the solution
    pub characters_mentioned: usize,
    /// Cast size
    pub characters_total: usize,
    /// Events in the victim's last day
    pub timeline_events: usize,
    /// Clues across all characters
    pub total_clues: usize,
    /// Courses whose dish shows up in the case
    pub menu_items_used: usize,
}

/// Scores, details and the overall mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Per-metric scores
    pub scores: QualityScores,
    /// Raw counts
    pub details: EvaluationDetails,
    /// Mean of the scores
    pub overall_score: f64,
}

impl EvaluationReport {
    fn from_parts(scores: QualityScores, details: EvaluationDetails) -> Self {
        Self {
            overall_score: scores.overall(),
            scores,
            details,
        }
    }

    /// Add the judge score and recompute the overall mean.
    pub fn with_narrative_quality(mut self, score: f64) -> Self {
        self.scores.narrative_quality = Some(score);
        self.overall_score = self.scores.overall();
        self
    }

    /// Console rendering with one bar per metric.
    pub fn summary(&self) -> String {
        let mut rows = vec![
            ("Character Consistency", self.scores.character_consistency),
            ("Timeline Completeness", self.scores.timeline_completeness),
            ("Clue Quantity", self.scores.clue_quantity),
            ("Menu Integration", self.scores.menu_integration),
        ];
        if let Some(score) = self.scores.narrative_quality {
            rows.push(("Narrative Quality", score));
        }

        let mut out = String::from("EVALUATION REPORT\n");
        for (name, score) in rows {
            let filled = (score.max(0.0) as usize).min(10);
            out.push_str(&format!(
                "{:.<40} {:>4.1}/10 {}{}\n",
                name,
                score,
                "█".repeat(filled),
                "░".repeat(10 - filled)
            ));
        }
        out.push_str(&format!("{:.<40} {:>4.1}/10\n", "OVERALL SCORE", self.overall_score));
        out.push_str(&format!(
            "Characters mentioned: {}/{}\nTimeline events: {}\nTotal clues: {}\nMenu items used: {}/3\n",
            self.details.characters_mentioned,
            self.details.characters_total,
            self.details.timeline_events,
            self.details.total_clues,
            self.details.menu_items_used,
        ));
        out
    }

    /// Write the report as pretty JSON into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    pub fn save(&self, dir: impl AsRef<Path>) -> WhodunitResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let path = dir.join(REPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;
        std::fs::write(&path, json).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;

        info!(path = %path.display(), "Evaluation report saved");
        Ok(path)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Run the automated checks.
#[instrument(skip(kit), fields(cast = kit.characters.len()))]
pub fn evaluate(kit: &MysteryKit) -> EvaluationReport {
    let solution_text = serde_json::to_string(&kit.solution)
        .unwrap_or_default()
        .to_lowercase();
    let characters_total = kit.characters.len();
    let characters_mentioned = kit
        .characters
        .iter()
        .filter(|c| solution_text.contains(&c.name.to_lowercase()))
        .count();
    let character_consistency = if characters_total == 0 {
        0.0
    } else {
        characters_mentioned as f64 / characters_total as f64 * 10.0
    };

    let timeline_events = kit.last_day_data.timeline.len();
    let timeline_completeness = (timeline_events as f64 / 5.0).min(1.0) * 10.0;

    let total_clues: usize = kit.clues.iter().map(|c| c.clues.len()).sum();
    let clue_quantity = (total_clues as f64 / 7.0).min(1.0) * 7.0;

    let case_text = serde_json::to_string(&kit.case_data)
        .unwrap_or_default()
        .to_lowercase();
    let menu_items_used = [CourseType::Starter, CourseType::Main, CourseType::Dessert]
        .into_iter()
        .filter_map(|course| kit.menu.course(course))
        .filter_map(|recipe| recipe.name.split_whitespace().next())
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() > 3 && case_text.contains(word.as_str()))
        .count();
    let menu_integration = menu_items_used as f64 / 3.0 * 10.0;

    let scores = QualityScores {
        character_consistency: round1(character_consistency),
        timeline_completeness: round1(timeline_completeness),
        clue_quantity: round1(clue_quantity),
        menu_integration: round1(menu_integration),
        narrative_quality: None,
    };
    debug!(?scores, "Automated checks done");

    EvaluationReport::from_parts(
        scores,
        EvaluationDetails {
            characters_mentioned,
            characters_total,
            timeline_events,
            total_clues,
            menu_items_used,
        },
    )
}

/// The rating prompt for the judge.
pub fn judge_prompt(kit: &MysteryKit) -> String {
    let summary: String = kit.case_data.summary.chars().take(200).collect();
    let motive: String = kit.solution.motive.chars().take(100).collect();
    let names: Vec<&str> = kit
        .characters
        .iter()
        .take(2)
        .map(|c| c.name.as_str())
        .collect();

    format!(
        "Rate this murder mystery on a scale of 0-10.\n\
Consider: creativity, coherence, and interest level.\n\n\
Case Summary: {}\n\
Characters: {}\n\
Killer: {}\n\
Motive: {}\n\n\
Respond with ONLY a number between 0 and 10.",
        summary,
        names.join(", "),
        kit.solution.killer_name,
        motive
    )
}

/// First number in a judge reply, clamped to 0-10.
pub fn parse_judge_score(reply: &str) -> Option<f64> {
    let score: f64 = NUMBER.captures(reply)?.get(1)?.as_str().parse().ok()?;
    Some(score.clamp(0.0, 10.0))
}

/// Ask the model to rate the narrative.
///
/// Returns [`DEFAULT_JUDGE_SCORE`] when the call fails or the reply has no
/// number.
#[instrument(skip(driver, kit), fields(provider = driver.provider_name()))]
pub async fn judge_narrative<D>(driver: &D, kit: &MysteryKit) -> f64
where
    D: CompletionDriver + ?Sized,
{
    let request = GenerateRequest::builder()
        .messages(vec![Message::user(judge_prompt(kit))])
        .temperature(JUDGE_TEMPERATURE)
        .build();

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to build judge request");
            return DEFAULT_JUDGE_SCORE;
        }
    };

    match driver.generate(&request).await {
        Ok(response) => {
            let text = response.text().unwrap_or_default();
            parse_judge_score(&text).unwrap_or_else(|| {
                warn!(reply = %text, "Judge reply has no number");
                DEFAULT_JUDGE_SCORE
            })
        }
        Err(e) => {
            error!(error = %e, "Judge request failed");
            DEFAULT_JUDGE_SCORE
        }
    }
}

//! Cast invariant enforcement: size, distinct names, one murderer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use whodunit_core::CharacterRecord;

/// Padding records are named `"{PLACEHOLDER_PREFIX} {k}"`.
pub const PLACEHOLDER_PREFIX: &str = "Suspect";

/// Make `records` exactly `n` long.
///
/// Longer input keeps its first `n` records. Shorter input is padded with
/// empty placeholder records named `Suspect 1`, `Suspect 2` and so on,
/// skipping numbers a real record already uses. Existing records are never
/// duplicated. Returns the number of placeholders added.
pub fn fix_cardinality(records: &mut Vec<CharacterRecord>, n: usize) -> usize {
    if records.len() >= n {
        if records.len() > n {
            debug!(from = records.len(), to = n, "Truncating cast");
        }
        records.truncate(n);
        return 0;
    }

    let taken: HashSet<String> = records.iter().map(|r| r.name.clone()).collect();
    let missing = n - records.len();
    let mut number = 0usize;

    for _ in 0..missing {
        let name = loop {
            number += 1;
            let candidate = format!("{} {}", PLACEHOLDER_PREFIX, number);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        records.push(CharacterRecord::named(name));
    }

    warn!(padded = missing, num_characters = n, "Padded cast with placeholders");
    missing
}

/// Rename repeated names so every name in the cast is distinct.
///
/// Scans in order. The first occurrence of a name is untouched; the k-th
/// occurrence becomes `"name (k)"`, counting from 2. If that spelling is
/// already in use the counter keeps climbing. Records are never reordered
/// or removed. Returns the number of renamed records.
pub fn enforce_unique_names(records: &mut [CharacterRecord]) -> usize {
    let mut used: HashSet<String> = HashSet::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut renamed = 0usize;

    for record in records.iter_mut() {
        let base = record.name.clone();
        let count = occurrences.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 && !used.contains(&base) {
            used.insert(base);
            continue;
        }

        let mut k = (*count).max(2);
        let mut candidate = format!("{} ({})", base, k);
        while used.contains(&candidate) {
            k += 1;
            candidate = format!("{} ({})", base, k);
        }
        *count = k;

        debug!(from = %base, to = %candidate, "Renaming duplicate character");
        used.insert(candidate.clone());
        record.name = candidate;
        renamed += 1;
    }

    renamed
}

/// How the murderer was settled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MurdererSource {
    /// The model flagged exactly one record
    Model,
    /// The model flagged several; the first was kept
    FirstOfMany,
    /// The model flagged none; one was drawn at random
    Random,
}

/// Which record is the murderer and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MurdererSelection {
    /// Index into the cast
    pub index: usize,
    /// How the index was chosen
    pub source: MurdererSource,
}

/// Leave exactly one record with `murderer_label == true`.
///
/// One flagged record is left alone. With several, the first in order stays
/// flagged and every other is cleared. With none, one index is drawn
/// uniformly from the whole cast, placeholders included. Returns `None` only
/// for an empty cast.
pub fn enforce_single_murderer<R>(
    records: &mut [CharacterRecord],
    rng: &mut R,
) -> Option<MurdererSelection>
where
    R: Rng + ?Sized,
{
    if records.is_empty() {
        return None;
    }

    let flagged: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.murderer_label)
        .map(|(i, _)| i)
        .collect();

    let selection = match flagged.as_slice() {
        [index] => MurdererSelection {
            index: *index,
            source: MurdererSource::Model,
        },
        [] => {
            let index = rng.gen_range(0..records.len());
            warn!(murderer_index = index, "No murderer flagged, picked one at random");
            MurdererSelection {
                index,
                source: MurdererSource::Random,
            }
        }
        [first, rest @ ..] => {
            warn!(
                murderer_index = *first,
                cleared = rest.len(),
                "Several murderers flagged, keeping the first"
            );
            MurdererSelection {
                index: *first,
                source: MurdererSource::FirstOfMany,
            }
        }
    };

    for (i, record) in records.iter_mut().enumerate() {
        record.murderer_label = i == selection.index;
    }

    Some(selection)
}

//! Word-overlap document retrieval.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, instrument, warn};
use whodunit_core::RetrievedDocument;
use whodunit_error::{StorageError, StorageErrorKind, WhodunitResult};
use whodunit_interface::Retriever;

/// In-memory corpus ranked by word overlap with the query.
///
/// Documents sharing more lowercase word tokens with the query rank higher;
/// ties are broken by id. Documents sharing no token are still returned
/// after the matching ones, so a corpus of at least `k` documents always
/// yields `k` results.
///
/// # Examples
///
/// ```
/// use whodunit_core::RetrievedDocument;
/// use whodunit_interface::Retriever;
/// use whodunit_retrieval::KeywordRetriever;
///
/// let retriever = KeywordRetriever::new(vec![
///     RetrievedDocument::new("fish", "Fishermen mend nets at the harbour."),
///     RetrievedDocument::new("council", "The town council meets on Mondays."),
/// ]);
/// let docs = retriever.retrieve("harbour fishermen", 1);
/// assert_eq!(docs[0].id, "fish");
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordRetriever {
    documents: Vec<RetrievedDocument>,
}

impl KeywordRetriever {
    /// Retriever over the given documents.
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { documents }
    }

    /// Retriever over every `.txt` and `.md` file in `dir`, id = file stem.
    ///
    /// A missing directory yields an empty corpus.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn from_dir(dir: impl AsRef<Path>) -> WhodunitResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!("Corpus directory not found, using built-in documents");
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let mut documents = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_text = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("txt") | Some("md")
            );
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_text || !path.is_file() {
                continue;
            }

            let text = std::fs::read_to_string(&path).map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            documents.push(RetrievedDocument::new(stem, text));
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(documents = documents.len(), "Loaded corpus");
        Ok(Self::new(documents))
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Documents served when the corpus is empty.
fn builtin_documents(query: &str) -> Vec<RetrievedDocument> {
    vec![
        RetrievedDocument::new("doc1", format!("Dummy context for query: {}", query)),
        RetrievedDocument::new("doc2", "Another dummy document about harbor life."),
    ]
}

fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl Retriever for KeywordRetriever {
    #[instrument(skip(self), fields(corpus = self.documents.len()))]
    fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedDocument> {
        if self.documents.is_empty() {
            let mut docs = builtin_documents(query);
            docs.truncate(k);
            return docs;
        }

        let query_tokens = tokens(query);
        let mut scored: Vec<(usize, &RetrievedDocument)> = self
            .documents
            .iter()
            .map(|doc| {
                let score = tokens(&doc.text)
                    .intersection(&query_tokens)
                    .count();
                (score, doc)
            })
            .collect();

        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.id.cmp(&b.id)));
        debug!(best = scored.first().map(|(s, _)| *s), "Ranked corpus");

        scored
            .into_iter()
            .take(k)
            .map(|(_, doc)| doc.clone())
            .collect()
    }
}

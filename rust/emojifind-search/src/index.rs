//! SearchIndex: the inverted index, its scorer and its snapshot format
//!
//! Terms live in a sorted dictionary so prefix expansion is a range scan.
//! Postings of a term are appended in document order, which keeps all
//! occurrences of one document contiguous.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::{FieldId, SearchConfig, F32, U32};
use crate::error::SearchError;
use crate::math::{calculate_idf, normalized_term_frequency, prefix_match_weight, saturate};
use crate::tokenize::tokenize;
use crate::types::{DocIdx, Document, Posting, SearchOptions, SearchResult, StoredDocument};

/// Snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

// =============================================================================
// Index
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    version: u32,
    config: SearchConfig,
    documents: Vec<StoredDocument>,
    /// Sum of field lengths over all documents, indexed by field id
    total_field_lengths: Vec<u64>,
    postings: BTreeMap<String, Vec<Posting>>,

    #[serde(skip)]
    id_lookup: HashMap<String, DocIdx>,
}

/// Accumulated score of one document during a search
struct Hit {
    score: F32,
    terms: BTreeSet<String>,
}

impl SearchIndex {
    /// Create an empty index
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let field_count = config.fields.len();
        Ok(Self {
            version: SNAPSHOT_VERSION,
            config,
            documents: Vec::new(),
            total_field_lengths: vec![0; field_count],
            postings: BTreeMap::new(),
            id_lookup: HashMap::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of distinct indexed terms
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_lookup.contains_key(id)
    }

    /// Average length in tokens of a field across the corpus
    pub fn average_field_length(&self, field: FieldId) -> F32 {
        if self.documents.is_empty() {
            return 0.0;
        }
        let total = self
            .total_field_lengths
            .get(field as usize)
            .copied()
            .unwrap_or(0);
        total as f32 / self.documents.len() as f32
    }

    // =========================================================================
    // Indexing
    // =========================================================================

    /// Tokenize and add a document. Fields the configuration does not name are
    /// ignored; configured fields missing from the document have length 0.
    pub fn add(&mut self, doc: &Document) -> Result<DocIdx, SearchError> {
        if self.id_lookup.contains_key(&doc.id) {
            return Err(SearchError::DuplicateId(doc.id.clone()));
        }

        let doc_idx = self.documents.len() as DocIdx;
        let mut field_lengths = Vec::with_capacity(self.config.fields.len());

        for (field_id, field) in self.config.fields.iter().enumerate() {
            let tokens = doc
                .fields
                .get(&field.name)
                .map(|text| tokenize(text))
                .unwrap_or_default();

            let length = tokens.len() as U32;
            field_lengths.push(length);
            self.total_field_lengths[field_id] += u64::from(length);

            let mut frequencies: BTreeMap<String, U32> = BTreeMap::new();
            for token in tokens {
                *frequencies.entry(token).or_insert(0) += 1;
            }

            for (term, tf) in frequencies {
                self.postings.entry(term).or_default().push(Posting {
                    doc: doc_idx,
                    field: field_id as FieldId,
                    tf,
                });
            }
        }

        let stored = self
            .config
            .store_fields
            .iter()
            .filter_map(|name| doc.stored.get(name).map(|v| (name.clone(), v.clone())))
            .collect();

        self.documents.push(StoredDocument {
            id: doc.id.clone(),
            field_lengths,
            stored,
        });
        self.id_lookup.insert(doc.id.clone(), doc_idx);

        Ok(doc_idx)
    }

    /// Add a batch of documents, returning how many were added
    pub fn add_all<'a, I>(&mut self, docs: I) -> Result<usize, SearchError>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut added = 0;
        for doc in docs {
            self.add(doc)?;
            added += 1;
        }
        tracing::debug!(added, terms = self.postings.len(), "indexed documents");
        Ok(added)
    }

    // =========================================================================
    // Searching
    // =========================================================================

    /// Run an OR query. Each query term hits exactly matching terms with full
    /// weight and, when prefix matching is on, every longer term it prefixes
    /// with a reduced weight. Results are ordered by descending score, ties by
    /// insertion order.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let mut query_terms = tokenize(query);
        dedup_in_order(&mut query_terms);
        if query_terms.is_empty() || self.documents.is_empty() {
            return Vec::new();
        }

        let prefix = options.prefix.unwrap_or(self.config.prefix);
        let mut hits: HashMap<DocIdx, Hit> = HashMap::new();

        for query_term in &query_terms {
            for (term, weight) in self.expand(query_term, prefix) {
                if let Some(postings) = self.postings.get(term) {
                    self.score_term(term, postings, weight, &mut hits);
                }
            }
        }

        let mut ranked: Vec<(DocIdx, Hit)> = hits.into_iter().collect();
        ranked.sort_by(|(a_idx, a), (b_idx, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a_idx.cmp(b_idx))
        });

        let limit = options.limit.unwrap_or(usize::MAX);
        ranked
            .into_iter()
            .take(limit)
            .map(|(idx, hit)| {
                let doc = &self.documents[idx as usize];
                SearchResult {
                    id: doc.id.clone(),
                    score: hit.score,
                    terms: hit.terms.into_iter().collect(),
                    stored: doc.stored.clone(),
                }
            })
            .collect()
    }

    /// Indexed terms a query term reaches, with their match weight
    fn expand<'a>(&'a self, query_term: &str, prefix: bool) -> Vec<(&'a str, F32)> {
        let mut expanded = Vec::new();

        if let Some((term, _)) = self.postings.get_key_value(query_term) {
            expanded.push((term.as_str(), 1.0));
        }

        if prefix {
            let query_len = query_term.chars().count();
            for (term, _) in self.postings.range::<str, _>((
                std::ops::Bound::Excluded(query_term),
                std::ops::Bound::Unbounded,
            )) {
                if !term.starts_with(query_term) {
                    break;
                }
                let weight = prefix_match_weight(
                    query_len,
                    term.chars().count(),
                    self.config.prefix_weight,
                );
                expanded.push((term.as_str(), weight));
            }
        }

        expanded
    }

    /// BM25F contribution of one indexed term to every document it occurs in
    fn score_term(
        &self,
        term: &str,
        postings: &[Posting],
        weight: F32,
        hits: &mut HashMap<DocIdx, Hit>,
    ) {
        if weight <= 0.0 {
            return;
        }

        let doc_frequency = count_documents(postings);
        let idf = calculate_idf(self.documents.len(), doc_frequency);

        for run in postings.chunk_by(|a, b| a.doc == b.doc) {
            let doc_idx = run[0].doc;
            let doc = &self.documents[doc_idx as usize];

            let mut aggregated = 0.0;
            for posting in run {
                let field = &self.config.fields[posting.field as usize];
                if field.boost == 0.0 {
                    continue;
                }
                let field_length = doc.field_lengths[posting.field as usize];
                let ntf = normalized_term_frequency(
                    posting.tf,
                    field_length,
                    self.average_field_length(posting.field),
                    field.b,
                );
                aggregated += field.boost * ntf;
            }

            let score = weight * idf * saturate(aggregated, self.config.k1);
            if score <= 0.0 {
                continue;
            }

            let hit = hits.entry(doc_idx).or_insert_with(|| Hit {
                score: 0.0,
                terms: BTreeSet::new(),
            });
            hit.score += score;
            hit.terms.insert(term.to_string());
        }
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Serialize the index for shipping
    pub fn to_json(&self) -> Result<String, SearchError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a snapshot produced by [`SearchIndex::to_json`]
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let mut index: SearchIndex = serde_json::from_str(json)?;
        if index.version != SNAPSHOT_VERSION {
            return Err(SearchError::UnsupportedVersion {
                found: index.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        index.config.validate()?;
        if index.total_field_lengths.len() != index.config.fields.len() {
            return Err(SearchError::InvalidConfig(
                "field statistics do not match configured fields".into(),
            ));
        }

        index.check_consistency()?;

        index.id_lookup = index
            .documents
            .iter()
            .enumerate()
            .map(|(idx, doc)| (doc.id.clone(), idx as DocIdx))
            .collect();
        Ok(index)
    }
}

impl SearchIndex {
    /// Every posting must point at an existing document and field
    fn check_consistency(&self) -> Result<(), SearchError> {
        let field_count = self.config.fields.len();
        if self
            .documents
            .iter()
            .any(|doc| doc.field_lengths.len() != field_count)
        {
            return Err(SearchError::InvalidConfig(
                "document field lengths do not match configured fields".into(),
            ));
        }

        let doc_count = self.documents.len();
        for (term, postings) in &self.postings {
            let dangling = postings
                .iter()
                .any(|p| p.doc as usize >= doc_count || p.field as usize >= field_count);
            if dangling {
                return Err(SearchError::InvalidConfig(format!(
                    "posting for {:?} points outside the index",
                    term
                )));
            }
        }
        Ok(())
    }
}

fn count_documents(postings: &[Posting]) -> usize {
    postings.chunk_by(|a, b| a.doc == b.doc).count()
}

fn dedup_in_order(terms: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    terms.retain(|t| seen.insert(t.clone()));
}

use std::collections::HashMap;

use super::text::tokenize;

/// One knowledge-base entry. Only `query` is indexed; `answer` is retrieved
/// verbatim, never searched.
#[derive(Debug, Clone)]
pub struct Document {
    pub query: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub score: f64,
    pub doc: usize,
}

/// Outcome of a top-1 lookup. `answer` is `None` when the corpus is empty or
/// the best score fell below the acceptance threshold; `matched_query` still
/// names the nearest entry in the below-threshold case so callers can log it.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub answer: Option<String>,
    pub score: f64,
    pub matched_query: Option<String>,
}

/// Norm floor for all-zero vectors.
const NORM_EPSILON: f64 = 1e-9;

/// TF-IDF index over the knowledge base, immutable after `build`.
pub struct TfidfIndex {
    docs: Vec<Document>,
    doc_terms: Vec<HashMap<String, u32>>,
    idf: HashMap<String, f64>,
}

impl TfidfIndex {
    pub fn build(docs: Vec<Document>) -> Self {
        let n = docs.len();
        let mut doc_terms = Vec::with_capacity(n);
        let mut df: HashMap<String, u32> = HashMap::new();

        for doc in &docs {
            let counts = term_counts(&tokenize(&doc.query));
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_terms.push(counts);
        }

        // Smoothed idf: always > 0, no division by zero for universal terms.
        let idf = df
            .into_iter()
            .map(|(term, dfv)| {
                let w = ((1 + n) as f64 / (1 + dfv) as f64).ln() + 1.0;
                (term, w)
            })
            .collect();

        Self {
            docs,
            doc_terms,
            idf,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Scores every document against `query` and returns the top `top_k`
    /// hits, highest first, ties kept in document order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<Hit> {
        let q_terms = term_counts(&tokenize(query));

        let mut hits: Vec<Hit> = self
            .doc_terms
            .iter()
            .enumerate()
            .map(|(doc, terms)| Hit {
                score: self.cosine(&q_terms, terms),
                doc,
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        hits
    }

    /// Top-1 lookup with an acceptance threshold.
    pub fn best_answer(&self, query: &str, min_score: f64) -> Retrieval {
        let Some(top) = self.search(query, 1).into_iter().next() else {
            return Retrieval {
                answer: None,
                score: 0.0,
                matched_query: None,
            };
        };
        let matched = &self.docs[top.doc];
        let answer = if top.score < min_score {
            None
        } else {
            Some(matched.answer.trim().to_string())
        };
        Retrieval {
            answer,
            score: top.score,
            matched_query: Some(matched.query.trim().to_string()),
        }
    }

    fn weight(&self, term: &str, tf: u32) -> f64 {
        tf as f64 * self.idf.get(term).copied().unwrap_or(0.0)
    }

    fn cosine(&self, query: &HashMap<String, u32>, doc: &HashMap<String, u32>) -> f64 {
        if query.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0;
        let mut q_sq = 0.0;
        for (term, &tf) in query {
            let wq = self.weight(term, tf);
            q_sq += wq * wq;
            if let Some(&dtf) = doc.get(term) {
                dot += wq * self.weight(term, dtf);
            }
        }

        let d_sq: f64 = doc
            .iter()
            .map(|(term, &tf)| {
                let w = self.weight(term, tf);
                w * w
            })
            .sum();

        dot / (q_sq.sqrt().max(NORM_EPSILON) * d_sq.sqrt().max(NORM_EPSILON))
    }
}

fn term_counts(tokens: &[String]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for t in tokens {
        *counts.entry(t.clone()).or_insert(0) += 1;
    }
    counts
}

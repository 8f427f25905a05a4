//! TF-IDF text vectorizer
//!
//! Tokens are runs of two or more word characters in lower-cased text.
//! N-grams join consecutive tokens with a single space. The vocabulary keeps
//! the `max_features` most frequent terms over the training corpus and is
//! indexed alphabetically.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use super::ClassifierError;

static TOKEN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Bag-of-n-grams vectorizer with smoothed IDF weighting and L2 rows
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    /// term -> column
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: usize::MAX,
            ngram_range: (1, 1),
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let min_n = min_n.max(1);
        self.ngram_range = (min_n, max_n.max(min_n));
        self
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Number of output columns
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Terms of one document in n-gram order: all unigrams, then bigrams, ...
    fn analyze(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// Learn vocabulary and IDF weights from `docs`
    pub fn fit<S: AsRef<str>>(&mut self, docs: &[S]) -> Result<(), ClassifierError> {
        if docs.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut term_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in docs {
            let terms = self.analyze(doc.as_ref());
            let unique: BTreeSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_counts.entry(term).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        // Most frequent first; BTreeMap iteration makes ties alphabetical
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let kept: BTreeSet<String> = ranked.into_iter().map(|(term, _)| term).collect();
        let n_docs = docs.len() as f64;

        self.vocabulary = kept
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(())
    }

    /// TF-IDF row for one document; unknown terms are ignored
    pub fn transform(&self, doc: &str) -> Result<Vec<f64>, ClassifierError> {
        if self.vocabulary.is_empty() {
            return Err(ClassifierError::NotFitted);
        }

        let mut row = vec![0.0; self.vocabulary.len()];
        for term in self.analyze(doc) {
            if let Some(&column) = self.vocabulary.get(&term) {
                row[column] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
        Ok(row)
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        docs: &[S],
    ) -> Result<Vec<Vec<f64>>, ClassifierError> {
        self.fit(docs)?;
        docs.iter().map(|doc| self.transform(doc.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_need_two_word_chars() {
        let v = TfidfVectorizer::new();
        assert_eq!(v.analyze("a = b + cc"), vec!["cc".to_string()]);
        assert_eq!(v.analyze("Foo_Bar(x1)"), vec!["foo_bar".to_string(), "x1".to_string()]);
    }

    #[test]
    fn test_bigrams_follow_unigrams() {
        let v = TfidfVectorizer::new().with_ngram_range(1, 2);
        assert_eq!(
            v.analyze("def calc(nums)"),
            vec!["def", "calc", "nums", "def calc", "calc nums"]
        );
    }

    #[test]
    fn test_vocabulary_is_sorted_and_limited() {
        let docs = ["zz zz zz yy", "yy xx", "ww"];
        let mut v = TfidfVectorizer::new().with_max_features(2);
        v.fit(&docs).unwrap();
        // zz (3) and yy (2) are the most frequent
        let terms: Vec<&str> = v.vocabulary().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["yy", "zz"]);
        assert_eq!(v.vocabulary()["yy"], 0);
    }

    #[test]
    fn test_frequency_ties_break_alphabetically() {
        let docs = ["cc bb aa"];
        let mut v = TfidfVectorizer::new().with_max_features(2);
        v.fit(&docs).unwrap();
        let terms: Vec<&str> = v.vocabulary().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["aa", "bb"]);
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let docs = ["alpha beta", "beta gamma", "gamma delta"];
        let mut v = TfidfVectorizer::new();
        let rows = v.fit_transform(&docs).unwrap();
        for row in &rows {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
        // A document without known terms stays all zeros
        let unknown = v.transform("zeta").unwrap();
        assert!(unknown.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_smooth_idf_weights() {
        let docs = ["common rare", "common"];
        let mut v = TfidfVectorizer::new();
        v.fit(&docs).unwrap();
        let common = v.idf[v.vocabulary()["common"]];
        let rare = v.idf[v.vocabulary()["rare"]];
        assert!((common - 1.0).abs() < 1e-12);
        assert!((rare - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(
            TfidfVectorizer::new().fit(&empty),
            Err(ClassifierError::EmptyTrainingSet)
        );
        assert_eq!(
            TfidfVectorizer::new().fit(&["a = 1"]),
            Err(ClassifierError::EmptyVocabulary)
        );
        assert_eq!(
            TfidfVectorizer::new().transform("anything"),
            Err(ClassifierError::NotFitted)
        );
    }
}

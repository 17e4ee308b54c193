//! BM25 keyword scoring over the string properties of stored objects
use ahash::AHashMap;

#[derive(Debug, Clone)]
pub struct Bm25Index {
    // term -> (object id -> term frequency)
    postings: AHashMap<String, AHashMap<String, u32>>,
    // object id -> token count
    doc_lengths: AHashMap<String, u32>,
    total_length: u64,
    k1: f32, // term frequency saturation
    b: f32,  // length normalization
}

impl Bm25Index {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            postings: AHashMap::new(),
            doc_lengths: AHashMap::new(),
            total_length: 0,
            k1: 1.2,
            b: 0.75,
        }
    }

    /// Lowercase, split on anything that is not alphanumeric
    #[inline]
    pub fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Index `text` under `doc_id`, replacing any previous entry
    pub fn insert_doc(&mut self, doc_id: &str, text: &str) {
        self.delete_doc(doc_id);

        let tokens = Self::tokenize(text);
        let mut term_freqs: AHashMap<String, u32> = AHashMap::new();
        for token in tokens.iter() {
            *term_freqs.entry(token.clone()).or_insert(0) += 1;
        }

        for (term, tf) in term_freqs {
            self.postings
                .entry(term)
                .or_default()
                .insert(doc_id.to_string(), tf);
        }

        let len = tokens.len() as u32;
        self.doc_lengths.insert(doc_id.to_string(), len);
        self.total_length += u64::from(len);
    }

    pub fn delete_doc(&mut self, doc_id: &str) {
        let Some(len) = self.doc_lengths.remove(doc_id) else {
            return;
        };
        self.total_length = self.total_length.saturating_sub(u64::from(len));
        self.postings.retain(|_, docs| {
            docs.remove(doc_id);
            !docs.is_empty()
        });
    }

    /// Score every document matching at least one query term
    pub fn score_all(&self, query: &str) -> AHashMap<String, f32> {
        let mut scores: AHashMap<String, f32> = AHashMap::new();
        let total_docs = self.doc_lengths.len() as f32;
        if total_docs == 0.0 {
            return scores;
        }
        let avgdl = (self.total_length as f32 / total_docs).max(1.0);

        for term in Self::tokenize(query) {
            let Some(docs) = self.postings.get(&term) else {
                continue;
            };
            let df = docs.len() as f32;
            // Lucene-style idf, always positive
            let idf = (1.0 + (total_docs - df + 0.5) / (df + 0.5)).ln();

            for (doc_id, &tf) in docs {
                let doc_len = self.doc_lengths.get(doc_id).copied().unwrap_or(0) as f32;
                let tf = tf as f32;
                let denom = tf + self.k1 * (1.0 - self.b + self.b * doc_len / avgdl);
                *scores.entry(doc_id.clone()).or_insert(0.0) += idf * tf * (self.k1 + 1.0) / denom;
            }
        }
        scores
    }
}

impl Default for Bm25Index {
    fn default() -> Self {
        Self::new()
    }
}

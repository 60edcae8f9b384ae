//! Embedding-ranked keyphrase extraction.
//!
//! Candidates are the unigrams and bigrams left after stop-word removal. Each
//! candidate is scored by cosine similarity between its embedding and the
//! embedding of the whole document.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::embeddings::EmbeddingsClient;
use crate::error::PipelineError;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// English stop words removed before candidates are built.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Unigram and bigram candidates for `text`, in first-occurrence order.
#[must_use]
pub fn candidate_phrases(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let unigrams = tokens.iter().map(|t| (*t).to_string());
    let bigrams = tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
    for phrase in unigrams.chain(bigrams) {
        if seen.insert(phrase.clone()) {
            candidates.push(phrase);
        }
    }
    candidates
}

/// Cosine similarity of two vectors; zero when either has no magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Pick the `top_n` candidates most similar to `doc`, best first.
///
/// Ties keep candidate order.
#[must_use]
pub fn rank_candidates(
    doc: &[f32],
    candidates: &[String],
    vectors: &[Vec<f32>],
    top_n: usize,
) -> Vec<String> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| (i, cosine_similarity(doc, v)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored
        .into_iter()
        .take(top_n)
        .filter_map(|(i, _)| candidates.get(i).cloned())
        .collect()
}

pub struct KeywordExtractor {
    embeddings: EmbeddingsClient,
}

impl KeywordExtractor {
    #[must_use]
    pub fn new(embeddings: EmbeddingsClient) -> Self {
        Self { embeddings }
    }

    /// Return up to `top_n` keyphrases of `text`, most relevant first.
    ///
    /// A text with no candidates yields an empty list without a service call.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Embeddings`] if the embedding service fails.
    pub async fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>, PipelineError> {
        let candidates = candidate_phrases(text);
        if candidates.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let mut inputs: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        inputs.push(text);
        inputs.extend(candidates.iter().map(String::as_str));

        let vectors = self.embeddings.embed(&inputs).await?;
        let Some((doc, rest)) = vectors.split_first() else {
            return Err(PipelineError::Embeddings(
                "no document embedding returned".to_string(),
            ));
        };

        Ok(rank_candidates(doc, &candidates, rest, top_n))
    }
}

//! Lexicon-based polarity scorer for news summaries.

use newsdigest_core::Sentiment;

/// Word valences on a -4.0..=4.0 scale.
///
/// Keys are lowercase single words. The compound score normalizes the summed
/// valence into `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("strong", 2.3),
    ("stronger", 2.0),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("gain", 2.4),
    ("gains", 1.8),
    ("growth", 1.6),
    ("growing", 1.3),
    ("grow", 1.3),
    ("profit", 1.9),
    ("profits", 1.9),
    ("profitable", 1.9),
    ("record", 1.0),
    ("beat", 1.2),
    ("beats", 1.2),
    ("surge", 1.6),
    ("surges", 1.6),
    ("soar", 2.0),
    ("soars", 2.0),
    ("rally", 1.6),
    ("rallies", 1.6),
    ("boost", 1.7),
    ("boosts", 1.7),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("innovative", 2.2),
    ("innovation", 1.8),
    ("launch", 0.9),
    ("launches", 0.9),
    ("expand", 1.3),
    ("expands", 1.3),
    ("expansion", 1.3),
    ("upgrade", 1.4),
    ("optimistic", 2.0),
    ("confident", 2.2),
    ("confidence", 2.3),
    ("positive", 2.6),
    ("best", 3.2),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("opportunity", 1.8),
    ("opportunities", 1.6),
    ("leading", 1.4),
    ("leader", 1.5),
    ("approve", 1.9),
    ("approved", 1.8),
    ("award", 2.5),
    ("partnership", 1.4),
    ("secure", 1.4),
    ("stable", 1.2),
    ("recovery", 1.4),
    ("recover", 1.2),
    ("happy", 2.7),
    ("love", 3.2),
    ("popular", 1.8),
    ("support", 1.7),
    // Negative signals
    ("bad", -2.5),
    ("poor", -2.1),
    ("weak", -1.9),
    ("weaker", -1.8),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.7),
    ("loses", -1.7),
    ("lost", -1.3),
    ("decline", -1.4),
    ("declines", -1.4),
    ("drop", -1.1),
    ("drops", -1.1),
    ("fall", -1.3),
    ("falls", -1.3),
    ("plunge", -2.1),
    ("plunges", -2.1),
    ("slump", -1.9),
    ("crash", -2.4),
    ("crisis", -3.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fraud", -2.9),
    ("scandal", -2.6),
    ("lawsuit", -1.6),
    ("sue", -1.8),
    ("sued", -1.8),
    ("fine", -0.8),
    ("fined", -1.6),
    ("penalty", -1.8),
    ("inquiry", -0.9),
    ("investigation", -1.0),
    ("recall", -1.6),
    ("recalls", -1.6),
    ("layoffs", -2.0),
    ("layoff", -2.0),
    ("cut", -1.1),
    ("cuts", -1.1),
    ("risk", -1.1),
    ("risks", -1.1),
    ("concern", -1.4),
    ("concerns", -1.4),
    ("warning", -1.4),
    ("warns", -1.4),
    ("threat", -2.4),
    ("debt", -1.5),
    ("bankruptcy", -2.8),
    ("downgrade", -1.6),
    ("delay", -1.3),
    ("delays", -1.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("worst", -3.1),
    ("worse", -2.1),
    ("negative", -2.7),
    ("controversy", -1.8),
    ("criticism", -1.9),
    ("protest", -1.0),
    ("strike", -1.0),
    ("ban", -2.6),
    ("banned", -2.0),
    ("halt", -1.2),
    ("shutdown", -2.1),
    ("volatile", -1.2),
    ("uncertainty", -1.4),
    ("accident", -2.1),
    ("death", -2.9),
    ("killed", -3.5),
];

/// Words that invert the polarity of a word within the next three tokens.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "cannot",
    "cant", "can't", "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't",
    "wasnt", "wasn't", "arent", "aren't", "wont", "won't", "hardly", "rarely",
];

/// Intensity modifiers; positive values amplify, negative values dampen.
const BOOSTERS: &[(&str, f32)] = &[
    ("very", 0.293),
    ("extremely", 0.293),
    ("highly", 0.293),
    ("hugely", 0.293),
    ("significantly", 0.293),
    ("substantially", 0.293),
    ("sharply", 0.293),
    ("massive", 0.293),
    ("really", 0.293),
    ("most", 0.293),
    ("more", 0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
    ("marginally", -0.293),
    ("barely", -0.293),
    ("less", -0.293),
];

const NEGATION_SCALAR: f32 = -0.74;
const NORMALIZATION_ALPHA: f32 = 15.0;
const POSITIVE_THRESHOLD: f32 = 0.05;
const NEGATIVE_THRESHOLD: f32 = -0.05;

fn valence(word: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, weight)| weight)
}

fn booster(word: &str) -> Option<f32> {
    BOOSTERS
        .iter()
        .find(|(b, _)| *b == word)
        .map(|&(_, weight)| weight)
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Compound polarity of a text in `[-1.0, 1.0]`.
///
/// Sums word valences with negation, booster, and "but" adjustments, then
/// normalizes with `s / sqrt(s² + 15)`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn compound_score(text: &str) -> f32 {
    let tokens = tokenize(text);
    let but_index = tokens.iter().position(|t| t == "but");

    let mut sum = 0.0_f32;
    for (i, token) in tokens.iter().enumerate() {
        let Some(mut v) = valence(token) else {
            continue;
        };

        let window = &tokens[i.saturating_sub(3)..i];
        for prev in window {
            if let Some(scalar) = booster(prev) {
                v += if v > 0.0 { scalar } else { -scalar };
            }
        }
        if window.iter().any(|prev| is_negator(prev)) {
            v *= NEGATION_SCALAR;
        }

        if let Some(b) = but_index {
            if i < b {
                v *= 0.5;
            } else if i > b {
                v *= 1.5;
            }
        }

        sum += v;
    }

    if sum.abs() < f32::EPSILON {
        return 0.0;
    }
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Map a compound score to a label: `>= 0.05` positive, `<= -0.05` negative.
#[must_use]
pub fn label_for(compound: f32) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Classify a text as Positive, Negative, or Neutral.
#[must_use]
pub fn analyze_sentiment(text: &str) -> Sentiment {
    label_for(compound_score(text))
}

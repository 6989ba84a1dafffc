//! # String Similarity Scorers
//!
//! The matcher only depends on the [`Similarity`] trait: a score in `[0, 100]`
//! for two normalized strings. The 90/75 acceptance thresholds are expressed on
//! that scale, so any scorer can be swapped in without retuning them.
//!
//! Two scorers ship with the crate:
//!
//! - [`WeightedRatio`] (default): token-order-insensitive weighted ratio. It
//!   combines a plain indel ratio, token-sort/token-set ratios and, for strings
//!   of very different lengths, partial (substring) ratios scaled down by a
//!   length penalty. Its constants are those of the widely used `WRatio`
//!   from rapidfuzz/fuzzywuzzy: token ratios scaled by 0.95, partial ratios
//!   by 0.9, or by 0.6 once the lengths differ by 8x or more, and the switch
//!   to partial ratios at a 1.5 length ratio. Scores therefore line up with
//!   that scale, which is where the 90/75 thresholds come from.
//! - [`JaroWinkler`]: Jaro-Winkler similarity scaled to `[0, 100]`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Scale applied to token-based ratios so that a reordered match never beats
/// an identical one
const UNBASE_SCALE: f64 = 0.95;

/// Scorer interface used by the matcher
pub trait Similarity: Send + Sync {
    /// Similarity of `a` and `b` in `[0, 100]`
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Available scorer implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    WeightedRatio,
    JaroWinkler,
}

impl ScorerKind {
    pub fn build(self) -> Box<dyn Similarity> {
        match self {
            ScorerKind::WeightedRatio => Box::new(WeightedRatio),
            ScorerKind::JaroWinkler => Box::new(JaroWinkler),
        }
    }
}

impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weighted_ratio" | "wratio" => Ok(ScorerKind::WeightedRatio),
            "jaro_winkler" => Ok(ScorerKind::JaroWinkler),
            other => Err(format!("unknown similarity scorer '{}'", other)),
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::WeightedRatio => f.write_str("weighted_ratio"),
            ScorerKind::JaroWinkler => f.write_str("jaro_winkler"),
        }
    }
}

/// Weighted ratio scorer (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl Similarity for WeightedRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        weighted_ratio(a, b)
    }

    fn name(&self) -> &'static str {
        "weighted_ratio"
    }
}

/// Jaro-Winkler scorer backed by `strsim`
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        strsim::jaro_winkler(a, b) * 100.0
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Length of the longest common subsequence of two char slices
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized indel similarity: `100 * 2 * lcs / (len_a + len_b)`
fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Plain indel ratio of two strings
///
/// ```
/// use dishcovery::similarity::ratio;
///
/// assert_eq!(ratio("tomato", "tomato"), 100.0);
/// assert!(ratio("tomatoe", "tomato") > 92.0);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best ratio of the shorter string against any same-length window of the
/// longer one, including windows clipped at either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let n = short.len();
    let m = long.len();
    let mut best: f64 = 0.0;

    for start in 0..=(m - n) {
        best = best.max(ratio_chars(&short, &long[start..start + n]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    for k in 1..n {
        best = best
            .max(ratio_chars(&short, &long[..k]))
            .max(ratio_chars(&short, &long[m - k..]));
    }

    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn join(tokens: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    tokens
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ratio after sorting the whitespace-separated tokens of both strings
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&join(sorted_tokens(a)), &join(sorted_tokens(b)))
}

/// Ratio comparing the shared tokens plus each side's leftovers.
///
/// One token set contained in the other scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = join(&intersection);
    let diff_ab_joined = join(&diff_ab);
    let diff_ba_joined = join(&diff_ba);

    let sect_ab = if sect.is_empty() {
        diff_ab_joined.clone()
    } else {
        format!("{} {}", sect, diff_ab_joined)
    };
    let sect_ba = if sect.is_empty() {
        diff_ba_joined.clone()
    } else {
        format!("{} {}", sect, diff_ba_joined)
    };

    let mut best = ratio(&sect_ab, &sect_ba);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &sect_ab)).max(ratio(&sect, &sect_ba));
    }
    best
}

/// Partial ratio over sorted tokens and over the non-shared tokens.
///
/// Any shared token scores 100.
fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let split_a: Vec<&str> = a.split_whitespace().collect();
    let split_b: Vec<&str> = b.split_whitespace().collect();
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();

    if !tokens_a.is_disjoint(&tokens_b) {
        return 100.0;
    }

    let result = partial_ratio(&join(sorted_tokens(a)), &join(sorted_tokens(b)));

    // Without duplicate tokens the set difference equals the token list.
    if split_a.len() == tokens_a.len() && split_b.len() == tokens_b.len() {
        return result;
    }

    result.max(partial_ratio(&join(&tokens_a), &join(&tokens_b)))
}

/// Weighted ratio in `[0, 100]`.
///
/// Strings of similar length (ratio < 1.5) use the best of the plain ratio and
/// the token ratios. Longer gaps switch to partial ratios, scaled by 0.9
/// (or 0.6 beyond an 8x length difference) so substring hits stay below an
/// exact match.
///
/// ```
/// use dishcovery::similarity::weighted_ratio;
///
/// assert!(weighted_ratio("soy sauce", "sauce soy") > 94.9);
/// assert!(weighted_ratio("xyzzyzzz", "tomato") < 75.0);
/// ```
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let base = ratio(a, b);

    if len_ratio < 1.5 {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return base.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let best = base.max(partial_ratio(a, b) * partial_scale);
    best.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

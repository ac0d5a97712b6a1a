//! Weighted-ratio fuzzy string similarity.
//!
//! All scores are on a 0-100 scale. The building block is the normalized
//! Indel similarity from `rapidfuzz`: `100 × (1 - d / (|a| + |b|))` where `d`
//! is the insert/delete edit distance. [`weighted_ratio`] combines it with
//! partial (substring) and token-based variants so that word order and
//! short-inside-long matches are tolerated.

use rapidfuzz::distance::indel;
use rapidfuzz::fuzz;
use std::collections::BTreeSet;

/// Scale applied to token-based ratios inside [`weighted_ratio`].
const UNBASE_SCALE: f64 = 0.95;

/// The best choice found by [`extract_one`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
  pub choice: &'a str,
  pub score: f64,
}

fn chars(s: &str) -> Vec<char> {
  s.chars().collect()
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
  indel::distance(a.iter().copied(), b.iter().copied())
}

fn norm_distance(distance: usize, lensum: usize) -> f64 {
  if lensum == 0 {
    return 100.0;
  }
  100.0 - 100.0 * distance as f64 / lensum as f64
}

fn indel_ratio(a: &[char], b: &[char]) -> f64 {
  norm_distance(indel_distance(a, b), a.len() + b.len())
}

/// Normalized Indel similarity of two strings. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
  if a.is_empty() && b.is_empty() {
    return 100.0;
  }
  fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Best [`ratio`] of `needle` against the windows of `haystack`.
///
/// Windows are every full-length slice plus the shorter prefixes and
/// suffixes, so a needle hanging over either end still aligns.
fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
  let n = needle.len();
  let m = haystack.len();

  let prefixes = (1..n).map(|len| &haystack[..len]);
  let full = (0..=m - n).map(|start| &haystack[start..start + n]);
  let suffixes = (m - n + 1..m).map(|start| &haystack[start..]);

  let mut best = 0.0;
  for window in prefixes.chain(full).chain(suffixes) {
    let score = indel_ratio(needle, window);
    if score > best {
      best = score;
      if best >= 100.0 {
        break;
      }
    }
  }

  best
}

/// Similarity of the shorter string to its best-aligned substring of the
/// longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
  let a = chars(a);
  let b = chars(b);
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
  let mut best = best_window_ratio(short, long);

  // Equal lengths: either side may be the better needle.
  if best < 100.0 && a.len() == b.len() {
    best = best.max(best_window_ratio(long, short));
  }

  best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
  let mut tokens: Vec<&str> = s.split_whitespace().collect();
  tokens.sort_unstable();
  tokens
}

/// [`ratio`] after sorting each string's words.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
  let tokens_a = sorted_tokens(a);
  let tokens_b = sorted_tokens(b);
  if tokens_a.is_empty() || tokens_b.is_empty() {
    return 0.0;
  }
  ratio(&tokens_a.join(" "), &tokens_b.join(" "))
}

/// Word-set similarity: shared words count fully, and the leftover words of
/// each side are compared against each other and against the shared core.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
  let set_a: BTreeSet<&str> = a.split_whitespace().collect();
  let set_b: BTreeSet<&str> = b.split_whitespace().collect();
  if set_a.is_empty() || set_b.is_empty() {
    return 0.0;
  }

  let intersect: Vec<&str> = set_a.intersection(&set_b).copied().collect();
  let diff_ab: Vec<&str> = set_a.difference(&set_b).copied().collect();
  let diff_ba: Vec<&str> = set_b.difference(&set_a).copied().collect();

  if !intersect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
    return 100.0;
  }

  let ab = chars(&diff_ab.join(" "));
  let ba = chars(&diff_ba.join(" "));
  let sect_len = intersect.join(" ").chars().count();

  let sep = usize::from(sect_len != 0);
  let sect_ab_len = sect_len + sep + ab.len();
  let sect_ba_len = sect_len + sep + ba.len();

  // "sect ab" against "sect ba" differs only in the leftovers.
  let distance = indel_distance(&ab, &ba);
  let result = norm_distance(distance, sect_ab_len + sect_ba_len);
  if sect_len == 0 {
    return result;
  }

  let sect_ab_ratio = norm_distance(sep + ab.len(), sect_len + sect_ab_len);
  let sect_ba_ratio = norm_distance(sep + ba.len(), sect_len + sect_ba_len);
  result.max(sect_ab_ratio).max(sect_ba_ratio)
}

fn token_ratio(a: &str, b: &str) -> f64 {
  token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// [`partial_ratio`] over sorted words; any shared word scores 100.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
  let tokens_a = sorted_tokens(a);
  let tokens_b = sorted_tokens(b);
  if tokens_a.is_empty() || tokens_b.is_empty() {
    return 0.0;
  }

  let set_a: BTreeSet<&str> = tokens_a.iter().copied().collect();
  let set_b: BTreeSet<&str> = tokens_b.iter().copied().collect();
  if set_a.intersection(&set_b).next().is_some() {
    return 100.0;
  }

  let result = partial_ratio(&tokens_a.join(" "), &tokens_b.join(" "));
  if tokens_a.len() == set_a.len() && tokens_b.len() == set_b.len() {
    return result;
  }

  let joined_a: Vec<&str> = set_a.into_iter().collect();
  let joined_b: Vec<&str> = set_b.into_iter().collect();
  result.max(partial_ratio(&joined_a.join(" "), &joined_b.join(" ")))
}

/// Weighted ratio of two strings, 0-100.
///
/// Strings of similar length (length ratio below 1.5) score the best of
/// [`ratio`] and the token ratios scaled by 0.95. Otherwise partial matching
/// is allowed, scaled by 0.9, or by 0.6 once one string is at least eight
/// times longer than the other. Either string being empty scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
  let len_a = a.chars().count();
  let len_b = b.chars().count();
  if len_a == 0 || len_b == 0 {
    return 0.0;
  }

  let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
  let end_ratio = ratio(a, b);

  if len_ratio < 1.5 {
    return end_ratio.max(token_ratio(a, b) * UNBASE_SCALE);
  }

  let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
  let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
  end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

/// Finds the choice with the highest [`weighted_ratio`] against `query`.
///
/// The first choice reaching the best score wins ties, and a perfect score
/// stops the scan. Returns `None` only when there are no choices.
pub fn extract_one<'a, I, S>(query: &str, choices: I) -> Option<FuzzyMatch<'a>>
where
  I: IntoIterator<Item = &'a S>,
  S: AsRef<str> + ?Sized + 'a,
{
  let mut best: Option<FuzzyMatch<'a>> = None;

  for choice in choices {
    let choice: &'a str = choice.as_ref();
    let score = weighted_ratio(query, choice);
    if best.map_or(true, |b| score > b.score) {
      best = Some(FuzzyMatch { choice, score });
      if score >= 100.0 {
        break;
      }
    }
  }

  best
}

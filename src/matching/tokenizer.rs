//! Text tokenization utilities.

use unicode_segmentation::UnicodeSegmentation;

/// Tokenize free text into lowercase ASCII words.
///
/// Every character outside `a-z` and whitespace becomes a space before the
/// text is split, so digits and punctuation act as word separators.
pub fn tokenize(text: &str) -> Vec<String> {
  let cleaned: String = text
    .to_lowercase()
    .chars()
    .map(|c| {
      if c.is_ascii_lowercase() || c.is_whitespace() {
        c
      } else {
        ' '
      }
    })
    .collect();

  cleaned
    .unicode_words()
    .map(|word| word.to_string())
    .collect()
}

/// Build every contiguous window of `n` words, joined by single spaces.
pub fn ngrams(words: &[String], n: usize) -> Vec<String> {
  if n == 0 || words.len() < n {
    return Vec::new();
  }

  words.windows(n).map(|window| window.join(" ")).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize() {
    let text = "Hello, World! I've had a 39C fever.";
    let tokens = tokenize(text);
    assert_eq!(tokens, vec!["hello", "world", "i", "ve", "had", "a", "c", "fever"]);
  }

  #[test]
  fn test_tokenize_drops_non_ascii_letters() {
    assert_eq!(tokenize("café au lait"), vec!["caf", "au", "lait"]);
    assert!(tokenize("  123 !! ").is_empty());
  }

  #[test]
  fn test_ngrams() {
    let words: Vec<String> = ["sore", "throat", "and", "cough"]
      .iter()
      .map(|w| w.to_string())
      .collect();
    assert_eq!(ngrams(&words, 3), vec!["sore throat and", "throat and cough"]);
    assert_eq!(ngrams(&words, 2).len(), 3);
    assert!(ngrams(&words[..1], 2).is_empty());
  }
}

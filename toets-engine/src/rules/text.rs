//! Shared text views and matching helpers for rule implementations.
//!
//! Tokenization happens once per validation; rules work on the
//! precomputed [`TextView`]. All matching is done on a lowercased copy
//! so diacritics and casing in the source text stay intact for
//! locations and messages.

use aho_corasick::AhoCorasick;

use toets_core::types::TextSpan;

/// A word with its byte span in the original text.
#[derive(Debug, Clone)]
pub struct Word {
    /// Lowercased word text.
    pub lower: String,
    pub start: usize,
    pub end: usize,
}

impl Word {
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.start, self.end)
    }
}

/// Precomputed views over one definition text.
#[derive(Debug, Clone)]
pub struct TextView {
    /// The (possibly normalized) text being validated.
    pub raw: String,
    /// Lowercased copy. Offsets into this buffer may differ from `raw`
    /// for rare casing edge cases; never slice `raw` with them.
    pub lower: String,
    pub words: Vec<Word>,
    /// Index into `words` of the first copula (`is` or `zijn`), if any.
    pub copula_index: Option<usize>,
}

impl TextView {
    pub fn build(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words = split_words(text);
        let copula_index = words
            .iter()
            .position(|w| w.lower == "is" || w.lower == "zijn");
        Self {
            raw: text.to_string(),
            lower,
            words,
            copula_index,
        }
    }

    /// The words of the definiens: everything after the first copula,
    /// or all words when there is no copula.
    pub fn definiens_words(&self) -> &[Word] {
        match self.copula_index {
            Some(i) => &self.words[i + 1..],
            None => &self.words,
        }
    }

    /// Byte offset where the definiens starts.
    pub fn definiens_start(&self) -> usize {
        match self.copula_index {
            Some(i) => self.words[i].end,
            None => 0,
        }
    }

    /// Number of sentence terminators (. ? !) followed by whitespace or
    /// end of text. An abbreviation dot mid-word does not count.
    pub fn sentence_terminators(&self) -> usize {
        let bytes = self.raw.as_bytes();
        let mut count = 0;
        for (i, b) in bytes.iter().enumerate() {
            if matches!(b, b'.' | b'?' | b'!') {
                let at_end = bytes[i + 1..]
                    .iter()
                    .all(|c| c.is_ascii_whitespace());
                let before_space = bytes.get(i + 1).is_some_and(|c| c.is_ascii_whitespace());
                let prev_alpha = i > 0 && self.raw[..i].chars().next_back().is_some_and(char::is_alphabetic);
                // "bijv. x" has a space after the dot too; require the
                // preceding token to be longer than 2 letters.
                let prev_word_len = self.words.iter().rev().find(|w| w.end <= i + 1).map(|w| w.lower.chars().count()).unwrap_or(0);
                if (at_end || before_space) && prev_alpha && prev_word_len > 2 {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Split text into alphabetic words with byte offsets. Apostrophes and
/// hyphens inside a word are kept ("'s-Gravenhage", "e-mail").
pub fn split_words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        let word_char = c.is_alphabetic() || (start.is_some() && matches!(c, '\'' | '-'));
        if word_char {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            push_word(&mut words, text, s, i);
        }
    }
    if let Some(s) = start {
        push_word(&mut words, text, s, text.len());
    }
    words
}

fn push_word(words: &mut Vec<Word>, text: &str, start: usize, end: usize) {
    let slice = &text[start..end];
    let trimmed = slice.trim_end_matches(['\'', '-']);
    if trimmed.is_empty() {
        return;
    }
    words.push(Word {
        lower: trimmed.to_lowercase(),
        start,
        end: start + trimmed.len(),
    });
}

/// Whether a lowercased word is a Dutch article.
pub fn is_article(word: &str) -> bool {
    matches!(word, "een" | "de" | "het")
}

/// Find the first whole-word occurrence of any phrase in `lower`.
/// Returns (start, end, phrase index). Boundaries are non-alphabetic.
pub fn find_phrase(lower: &str, ac: &AhoCorasick) -> Option<(usize, usize, usize)> {
    for m in ac.find_iter(lower) {
        let before_ok = lower[..m.start()]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphabetic());
        let after_ok = lower[m.end()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphabetic());
        if before_ok && after_ok {
            return Some((m.start(), m.end(), m.pattern().as_usize()));
        }
    }
    None
}

/// Build a phrase matcher. Phrases must be lowercase.
pub fn phrase_matcher(phrases: &[&str]) -> AhoCorasick {
    AhoCorasick::new(phrases).expect("static phrase list compiles")
}

/// Whether two lowercased words share a root, used by the circularity
/// check. Exact equality, or a common prefix of at least five
/// characters that covers most of the shorter word.
pub fn shares_root(word: &str, term_word: &str) -> bool {
    if word == term_word {
        return true;
    }
    let prefix = common_prefix_chars(word, term_word);
    let shorter = word.chars().count().min(term_word.chars().count());
    prefix >= 5 && prefix + 4 >= shorter
}

fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Content words of a term: words of at least four characters, so
/// articles and prepositions in multi-word terms don't trigger matches.
pub fn term_content_words(term: &str) -> Vec<String> {
    split_words(term)
        .into_iter()
        .map(|w| w.lower)
        .filter(|w| w.chars().count() >= 4)
        .collect()
}

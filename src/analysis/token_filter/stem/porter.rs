//! Porter stemming algorithm implementation.
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! The rules only make sense for English ASCII words; any other token is
//! lower-cased and returned as is.
//!
//! ```
//! use textcluster::analysis::token_filter::stem::Stemmer;
//! use textcluster::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

/// Suffix rewrites of step 2, longest suffix first where suffixes overlap.
const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Whether the byte at `pos` acts as a consonant.
    fn is_consonant(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => pos == 0 || !Self::is_consonant(word, pos - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `stem`.
    fn measure(stem: &[u8]) -> usize {
        let n = stem.len();
        let mut m = 0;
        let mut i = 0;

        while i < n && Self::is_consonant(stem, i) {
            i += 1;
        }
        while i < n {
            while i < n && !Self::is_consonant(stem, i) {
                i += 1;
            }
            if i >= n {
                break;
            }
            m += 1;
            while i < n && Self::is_consonant(stem, i) {
                i += 1;
            }
        }

        m
    }

    fn contains_vowel(stem: &[u8]) -> bool {
        (0..stem.len()).any(|i| !Self::is_consonant(stem, i))
    }

    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let n = word.len();
        n >= 2 && word[n - 1] == word[n - 2] && Self::is_consonant(word, n - 1)
    }

    /// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let n = word.len();
        n >= 3
            && Self::is_consonant(word, n - 3)
            && !Self::is_consonant(word, n - 2)
            && Self::is_consonant(word, n - 1)
            && !matches!(word[n - 1], b'w' | b'x' | b'y')
    }

    /// Replace `suffix` by `replacement` if the remaining stem has measure > `min_measure`.
    fn replace_if(word: &mut Vec<u8>, suffix: &str, replacement: &str, min_measure: usize) {
        let stem_len = word.len() - suffix.len();
        if Self::measure(&word[..stem_len]) > min_measure {
            word.truncate(stem_len);
            word.extend_from_slice(replacement.as_bytes());
        }
    }

    fn step1a(word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"s") && !word.ends_with(b"ss") {
            word.pop();
        }
    }

    fn step1b(word: &mut Vec<u8>) {
        if word.ends_with(b"eed") {
            Self::replace_if(word, "eed", "ee", 0);
            return;
        }

        let suffix_len = if word.ends_with(b"ed") {
            2
        } else if word.ends_with(b"ing") {
            3
        } else {
            return;
        };
        let stem_len = word.len() - suffix_len;
        if !Self::contains_vowel(&word[..stem_len]) {
            return;
        }
        word.truncate(stem_len);

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if Self::ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l' | b's' | b'z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push(b'e');
        }
    }

    fn step1c(word: &mut [u8]) {
        let n = word.len();
        if word.ends_with(b"y") && Self::contains_vowel(&word[..n - 1]) {
            word[n - 1] = b'i';
        }
    }

    fn apply_rules(word: &mut Vec<u8>, rules: &[(&str, &str)]) {
        if let Some((suffix, replacement)) = rules
            .iter()
            .find(|(suffix, _)| word.ends_with(suffix.as_bytes()))
        {
            Self::replace_if(word, suffix, replacement, 0);
        }
    }

    fn step4(word: &mut Vec<u8>) {
        let Some(suffix) = STEP4_SUFFIXES
            .iter()
            .filter(|suffix| word.ends_with(suffix.as_bytes()))
            .max_by_key(|suffix| suffix.len())
        else {
            return;
        };

        let stem_len = word.len() - suffix.len();
        let stem = &word[..stem_len];
        if Self::measure(stem) <= 1 {
            return;
        }
        if *suffix == "ion" && !matches!(stem.last(), Some(b's' | b't')) {
            return;
        }
        word.truncate(stem_len);
    }

    fn step5(word: &mut Vec<u8>) {
        if word.ends_with(b"e") {
            let stem = &word[..word.len() - 1];
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        if lowered.len() <= 2 || !lowered.bytes().all(|b| b.is_ascii_lowercase()) {
            return lowered;
        }

        let mut bytes = lowered.into_bytes();
        Self::step1a(&mut bytes);
        Self::step1b(&mut bytes);
        Self::step1c(&mut bytes);
        Self::apply_rules(&mut bytes, STEP2_RULES);
        Self::apply_rules(&mut bytes, STEP3_RULES);
        Self::step4(&mut bytes);
        Self::step5(&mut bytes);

        // Only ASCII letters were ever written into the buffer.
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

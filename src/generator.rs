use crate::session::SessionError;
use clap::ValueEnum;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Named character sets the target text can be drawn from
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlphabetPreset {
    #[default]
    Alphanumeric,
    Letters,
    Lowercase,
    Digits,
    Full,
}

impl AlphabetPreset {
    pub fn alphabet(&self) -> Alphabet {
        let chars: Vec<char> = match self {
            AlphabetPreset::Alphanumeric => ('A'..='Z').chain('a'..='z').chain('0'..='9').collect(),
            AlphabetPreset::Letters => ('A'..='Z').chain('a'..='z').collect(),
            AlphabetPreset::Lowercase => ('a'..='z').collect(),
            AlphabetPreset::Digits => ('0'..='9').collect(),
            AlphabetPreset::Full => ('A'..='Z')
                .chain('a'..='z')
                .chain('0'..='9')
                .chain([' ', ',', '.', '-', '+'])
                .collect(),
        };
        Alphabet { chars }
    }
}

/// Non-empty, de-duplicated set of characters in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Result<Self, SessionError> {
        let chars: Vec<char> = chars.into_iter().unique().collect();
        if chars.is_empty() {
            return Err(SessionError::InvalidConfig(
                "alphabet must contain at least one character".to_string(),
            ));
        }
        Ok(Self { chars })
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// Draw `length` characters uniformly and independently from `alphabet`.
///
/// The same rng stream always yields the same text.
pub fn generate<R: Rng + ?Sized>(
    length: usize,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Vec<char>, SessionError> {
    if length == 0 {
        return Err(SessionError::InvalidConfig(
            "length must be at least 1".to_string(),
        ));
    }
    if alphabet.is_empty() {
        return Err(SessionError::InvalidConfig(
            "alphabet must contain at least one character".to_string(),
        ));
    }

    Ok((0..length)
        .map(|_| alphabet.chars[rng.gen_range(0..alphabet.chars.len())])
        .collect())
}

/// Longest accepted chirp, in bytes of UTF-8 as received
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words replaced by [`REDACTION`] when they appear as a whole token
pub const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

pub const REDACTION: &str = "****";

/// Outcome of checking a chirp body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    TooLong,
    Cleaned(String),
}

/// Chirp body validation and profanity filtering
pub struct ChirpValidator;

impl ChirpValidator {
    /// Check the length limit, then redact profane words.
    ///
    /// Tokens are split on single ASCII spaces only, so runs of spaces and
    /// other whitespace survive untouched. A token matches only when the
    /// whole token equals a profane word ignoring case; `fornax!` is kept.
    pub fn validate(body: &str) -> Validation {
        if body.len() > MAX_CHIRP_LENGTH {
            return Validation::TooLong;
        }

        let cleaned = Self::clean(body);
        if cleaned != body {
            Validation::Cleaned(cleaned)
        } else {
            Validation::Valid
        }
    }

    /// Replace each whole-token profane word with [`REDACTION`]
    pub fn clean(body: &str) -> String {
        body.split(' ')
            .map(|word| {
                if Self::is_profane(word) {
                    REDACTION
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_profane(word: &str) -> bool {
        let lowered = word.to_lowercase();
        PROFANE_WORDS.contains(&lowered.as_str())
    }
}

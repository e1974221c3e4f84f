use std::collections::HashSet;

const SELLER_DENYLIST: &[&str] = &[
    "i am an ai",
    "i am a language model",
    "i cannot",
    "i'm sorry but",
    "as an ai",
    "i don't have access",
    "i can't browse",
    "i'm not able to",
    "my knowledge cutoff",
    "training data",
    "openai",
    "chatgpt",
];

const HELPER_DENYLIST: &[&str] = &[
    "i am an ai",
    "i'm an ai",
    "as an ai",
    "language model",
    "as a language model",
    "i cannot",
    "i don't have access",
    "i can't browse",
    "i'm not able to",
    "my knowledge cutoff",
    "training data",
    "openai",
    "chatgpt",
];

/// Repetition is only judged once a reply has more words than this.
const DIVERSITY_MIN_WORDS: usize = 3;

/// Why a cleaned reply was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    TooShort { chars: usize },
    Denylisted(&'static str),
    Repetitive { ratio: f32 },
}

/// Policy check on a cleaned reply. A rejected reply is replaced by the
/// fallback responder.
#[derive(Debug, Clone)]
pub struct ResponseValidator {
    min_chars: usize,
    denylist: &'static [&'static str],
    min_diversity: f32,
}

impl ResponseValidator {
    pub fn seller_chat() -> Self {
        Self {
            min_chars: 5,
            denylist: SELLER_DENYLIST,
            min_diversity: 0.6,
        }
    }

    pub fn website_helper() -> Self {
        Self {
            min_chars: 3,
            denylist: HELPER_DENYLIST,
            min_diversity: 0.5,
        }
    }

    pub fn is_valid(&self, response: &str) -> bool {
        self.check(response).is_ok()
    }

    pub fn check(&self, response: &str) -> Result<(), Rejection> {
        let chars = response.trim().chars().count();
        if chars < self.min_chars {
            return Err(Rejection::TooShort { chars });
        }

        let lower = response.to_lowercase();
        if let Some(phrase) = self.denylist.iter().copied().find(|phrase| lower.contains(*phrase)) {
            return Err(Rejection::Denylisted(phrase));
        }

        let words: Vec<&str> = lower.split_whitespace().collect();
        if words.len() > DIVERSITY_MIN_WORDS {
            let unique: HashSet<&str> = words.iter().copied().collect();
            let ratio = unique.len() as f32 / words.len() as f32;
            if ratio < self.min_diversity {
                return Err(Rejection::Repetitive { ratio });
            }
        }

        Ok(())
    }
}

//! Turns a raw model continuation into a short, bounded reply.
//!
//! Cleaning runs in three stages, each a small state machine over the text:
//! a line filter that drops role-prefixed lines and stops on leaked
//! dialogue, a sentence splitter that keeps at most `max_sentences`
//! sentences, and a character budget. The result is idempotent: cleaning an
//! already-clean reply returns it unchanged.

const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Limits and role vocabulary for one reply variant.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanerLimits {
    pub max_sentences: usize,
    pub max_chars: usize,
    /// A trailing fragment without terminal punctuation survives only when
    /// longer than this.
    pub min_fragment_chars: usize,
    /// Lines starting with one of these are dropped.
    pub role_markers: &'static [&'static str],
    /// A colon together with one of these words means the model started
    /// writing the other side of the conversation.
    pub role_words: &'static [&'static str],
}

impl CleanerLimits {
    pub const fn seller_chat() -> Self {
        Self {
            max_sentences: 2,
            max_chars: 200,
            min_fragment_chars: 10,
            role_markers: &["Customer:", "User:", "Human:"],
            role_words: &["customer", "user", "human", "assistant"],
        }
    }

    pub const fn website_helper() -> Self {
        Self {
            max_sentences: 1,
            max_chars: 150,
            min_fragment_chars: 10,
            role_markers: &["Customer:", "User:", "Human:", "Question:"],
            role_words: &["customer", "user", "human", "assistant", "question"],
        }
    }
}

/// Returns the text after the last occurrence of `cue`, or the text after the
/// echoed prompt when the cue is missing.
pub fn extract_continuation<'a>(raw: &'a str, cue: &str, prompt: &str) -> &'a str {
    let cue = cue.trim();
    if !cue.is_empty() {
        if let Some(idx) = raw.rfind(cue) {
            return raw[idx + cue.len()..].trim();
        }
    }

    raw.strip_prefix(prompt)
        .or_else(|| raw.get(prompt.len()..))
        .unwrap_or("")
        .trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Collecting,
    /// A line looked like another speaker's turn; nothing after it is kept.
    RoleLeak,
}

/// Collects reply lines until the model starts a new dialogue turn.
#[derive(Debug)]
pub struct LineFilter<'a> {
    limits: &'a CleanerLimits,
    state: LineState,
    kept: Vec<&'a str>,
    seen_colon: bool,
    seen_role_word: bool,
}

impl<'a> LineFilter<'a> {
    pub fn new(limits: &'a CleanerLimits) -> Self {
        Self {
            limits,
            state: LineState::Collecting,
            kept: Vec::new(),
            seen_colon: false,
            seen_role_word: false,
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn feed(&mut self, line: &'a str) -> LineState {
        if self.state == LineState::RoleLeak {
            return self.state;
        }

        let line = line.trim();
        if line.is_empty()
            || self
                .limits
                .role_markers
                .iter()
                .any(|marker| line.starts_with(marker))
        {
            return self.state;
        }

        // Checked against everything kept so far, not just this line, so the
        // joined output never trips the check on a second pass.
        let lower = line.to_lowercase();
        let colon = self.seen_colon || line.contains(':');
        let role_word =
            self.seen_role_word || self.limits.role_words.iter().any(|w| lower.contains(w));
        if colon && role_word {
            self.state = LineState::RoleLeak;
            return self.state;
        }

        self.seen_colon = colon;
        self.seen_role_word = role_word;
        self.kept.push(line);
        self.state
    }

    pub fn finish(self) -> String {
        self.kept.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceState {
    Scanning,
    LimitReached,
}

#[derive(Debug)]
pub struct SentenceSplitter {
    max_sentences: usize,
    state: SentenceState,
    sentences: Vec<String>,
    current: String,
}

impl SentenceSplitter {
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences,
            state: if max_sentences == 0 {
                SentenceState::LimitReached
            } else {
                SentenceState::Scanning
            },
            sentences: Vec::new(),
            current: String::new(),
        }
    }

    pub fn state(&self) -> SentenceState {
        self.state
    }

    pub fn push(&mut self, ch: char) -> SentenceState {
        if self.state == SentenceState::LimitReached {
            return self.state;
        }

        self.current.push(ch);
        if TERMINAL_PUNCTUATION.contains(&ch) {
            self.sentences.push(self.current.trim().to_string());
            self.current.clear();
            if self.sentences.len() >= self.max_sentences {
                self.state = SentenceState::LimitReached;
            }
        }
        self.state
    }

    /// Completed sentences, plus the unterminated tail when the limit was not
    /// reached and the tail is longer than `min_fragment_chars`.
    pub fn finish(mut self, min_fragment_chars: usize) -> Vec<String> {
        let fragment = self.current.trim();
        if self.state == SentenceState::Scanning && fragment.chars().count() > min_fragment_chars {
            self.sentences.push(format!("{}.", fragment));
        }
        self.sentences
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCleaner {
    limits: CleanerLimits,
}

impl ResponseCleaner {
    pub fn new(limits: CleanerLimits) -> Self {
        Self { limits }
    }

    pub fn seller_chat() -> Self {
        Self::new(CleanerLimits::seller_chat())
    }

    pub fn website_helper() -> Self {
        Self::new(CleanerLimits::website_helper())
    }

    pub fn limits(&self) -> &CleanerLimits {
        &self.limits
    }

    pub fn clean(&self, text: &str) -> String {
        let joined = self.collect_lines(text);
        if joined.is_empty() {
            return String::new();
        }

        let sentences = self.split_sentences(&joined);
        self.enforce_budget(sentences.join(" "))
    }

    pub fn collect_lines(&self, text: &str) -> String {
        let mut filter = LineFilter::new(&self.limits);
        for line in text.lines() {
            if filter.feed(line) == LineState::RoleLeak {
                break;
            }
        }
        filter.finish()
    }

    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut splitter = SentenceSplitter::new(self.limits.max_sentences);
        for ch in text.chars() {
            if splitter.push(ch) == SentenceState::LimitReached {
                break;
            }
        }
        splitter.finish(self.limits.min_fragment_chars)
    }

    /// Cuts over-long text at the last word boundary inside the budget and
    /// closes it with a period. The result never exceeds `max_chars`.
    pub fn enforce_budget(&self, text: String) -> String {
        let max_chars = self.limits.max_chars;
        if text.chars().count() <= max_chars {
            return text;
        }

        let window_end = byte_offset(&text, max_chars);
        let window = &text[..window_end];
        let cut = match window.rfind(' ') {
            Some(space) => &window[..space],
            None => &text[..byte_offset(&text, max_chars.saturating_sub(1))],
        };

        let mut response = cut
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-'))
            .to_string();
        if !response.ends_with(TERMINAL_PUNCTUATION) {
            response.push('.');
        }
        response
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

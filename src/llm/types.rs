use serde::{Deserialize, Serialize};

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
}

impl GenerationParams {
    /// Short, low-temperature continuations for the seller persona.
    pub fn seller_chat() -> Self {
        Self {
            max_new_tokens: 50,
            temperature: 0.3,
            top_p: 0.7,
            repetition_penalty: 1.3,
            no_repeat_ngram_size: 2,
        }
    }

    pub fn website_helper() -> Self {
        Self {
            max_new_tokens: 40,
            ..Self::seller_chat()
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::seller_chat()
    }
}

#[derive(Debug, Serialize)]
pub struct HfGenerateRequest<'a> {
    pub inputs: &'a str,
    pub parameters: HfParameters,
}

#[derive(Debug, Serialize)]
pub struct HfParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl From<&GenerationParams> for HfParameters {
    fn from(params: &GenerationParams) -> Self {
        Self {
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            repetition_penalty: params.repetition_penalty,
            no_repeat_ngram_size: params.no_repeat_ngram_size,
            do_sample: true,
            // The cleaner locates the continuation through the cue marker, so
            // the echoed prompt is expected in the output.
            return_full_text: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HfGeneratedText {
    pub generated_text: String,
}

/// Inference API returns a list, text-generation-inference a single object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HfGenerateResponse {
    Batch(Vec<HfGeneratedText>),
    Single(HfGeneratedText),
}

impl HfGenerateResponse {
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Batch(items) => items.into_iter().next().map(|item| item.generated_text),
            Self::Single(item) => Some(item.generated_text),
        }
    }
}

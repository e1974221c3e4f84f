use async_trait::async_trait;
use componentary_assistant::{
    Error, Result,
    llm::{GenerationParams, TextGenerator},
};
use std::sync::{Arc, Mutex};

/// What the mock generator does when asked for a continuation.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo the prompt followed by this continuation, like a causal LM.
    Echo(String),
    Error(String),
    Panic,
}

/// Mock text generator for testing
#[derive(Debug)]
pub struct MockGenerator {
    pub behavior: MockBehavior,
    pub load_error: Option<String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub params: Arc<Mutex<Vec<GenerationParams>>>,
}

impl MockGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            load_error: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
            params: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echoing(continuation: &str) -> Self {
        Self::new(MockBehavior::Echo(continuation.to_string()))
    }

    pub fn failing(error: &str) -> Self {
        Self::new(MockBehavior::Error(error.to_string()))
    }

    pub fn with_load_error(mut self, error: &str) -> Self {
        self.load_error = Some(error.to_string());
        self
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn load(&self) -> Result<()> {
        match self.load_error {
            Some(ref error) => Err(Error::llm(error.clone())),
            None => Ok(()),
        }
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push(params.clone());

        match self.behavior {
            MockBehavior::Echo(ref continuation) => Ok(format!("{}{}", prompt, continuation)),
            MockBehavior::Error(ref error) => Err(Error::llm(error.clone())),
            MockBehavior::Panic => panic!("mock generator exploded"),
        }
    }

    fn model_id(&self) -> String {
        "mock/SmolLM2-135M".to_string()
    }
}

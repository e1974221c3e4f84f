pub mod cleaner;
pub mod context;
pub mod fallback;
pub mod pipeline;
pub mod prompts;
pub mod validator;

pub use cleaner::{CleanerLimits, ResponseCleaner, extract_continuation};
pub use context::{PageContext, Price, ProductInfo};
pub use fallback::{SellerTopic, classify_seller_message, helper_fallback, seller_fallback};
pub use pipeline::{GenerationOutcome, Reply, ReplyPipeline, ReplySource};
pub use prompts::{Prompt, build_helper_prompt, build_seller_prompt};
pub use validator::{Rejection, ResponseValidator};

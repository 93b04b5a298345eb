use gummy_core::{Classification, CoreError};

pub mod classifier;
pub mod openai;
pub mod response;
pub mod rules;

pub use classifier::{ClassifierBackend, PostClassifier};
pub use openai::OpenAiProvider;
pub use response::parse_classification;

/// A remote model able to classify one post.
pub trait LlmProvider {
    fn name(&self) -> &str;

    async fn classify_post(&self, title: &str, body: &str) -> Result<Classification, CoreError>;
}

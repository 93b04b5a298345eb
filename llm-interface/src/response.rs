//! Validation of the model's JSON answer.

use gummy_core::{Category, Classification, ClassificationSource, LlmError, Sentiment};
use serde::Deserialize;

/// Answers with more insights than this are cut down.
pub const MAX_INSIGHTS: usize = 3;

/// The exact object the prompt asks for. Anything else is a failed answer.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelVerdict {
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "sentimento")]
    sentiment: String,
    #[serde(rename = "tópicos")]
    topics: Vec<String>,
    insights: Vec<String>,
}

/// Parses and validates the message content of a chat completion.
///
/// Labels outside the closed vocabularies, empty topic or insight lists and
/// any extra or missing key all fail; nothing is partially accepted.
pub fn parse_classification(provider: &str, content: &str) -> Result<Classification, LlmError> {
    let invalid = |details: String| LlmError::InvalidResponseFormat {
        provider: provider.to_string(),
        details,
    };

    let verdict: ModelVerdict =
        serde_json::from_str(content.trim()).map_err(|e| invalid(e.to_string()))?;

    let category = Category::from_label(&verdict.category)
        .ok_or_else(|| invalid(format!("unknown category '{}'", verdict.category)))?;
    let sentiment = Sentiment::from_label(&verdict.sentiment)
        .ok_or_else(|| invalid(format!("unknown sentiment '{}'", verdict.sentiment)))?;

    let topics = non_blank(verdict.topics);
    if topics.is_empty() {
        return Err(invalid("empty topic list".to_string()));
    }

    let mut insights = non_blank(verdict.insights);
    if insights.is_empty() {
        return Err(invalid("empty insight list".to_string()));
    }
    insights.truncate(MAX_INSIGHTS);

    Ok(Classification {
        category,
        sentiment,
        topics,
        insights,
        source: ClassificationSource::Model,
    })
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_answer() {
        let content = r#"{
            "categoria": "Pedido de Ajuda",
            "sentimento": "Negative",
            "tópicos": ["Programming", " Python "],
            "insights": ["Stuck on an import error.", "a", "b", "c"]
        }"#;
        let classification = parse_classification("openai", content).unwrap();

        assert_eq!(classification.category, Category::HelpRequest);
        assert_eq!(classification.sentiment, Sentiment::Negative);
        assert_eq!(classification.topics, vec!["Programming", "Python"]);
        assert_eq!(classification.insights.len(), MAX_INSIGHTS);
        assert_eq!(classification.source, ClassificationSource::Model);
    }

    #[test]
    fn test_rejects_non_json() {
        let result = parse_classification("openai", "Sure! Here is the analysis: Question");
        assert!(matches!(
            result,
            Err(LlmError::InvalidResponseFormat { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_and_missing_keys() {
        let extra = r#"{"categoria": "Question", "sentimento": "Neutral", "tópicos": ["x"], "insights": ["y"], "confidence": 0.9}"#;
        assert!(parse_classification("openai", extra).is_err());

        let missing = r#"{"categoria": "Question", "sentimento": "Neutral", "tópicos": ["x"]}"#;
        assert!(parse_classification("openai", missing).is_err());
    }

    #[test]
    fn test_rejects_out_of_vocabulary_labels() {
        let content = r#"{"categoria": "Rant", "sentimento": "Neutral", "tópicos": ["x"], "insights": ["y"]}"#;
        assert!(parse_classification("openai", content).is_err());

        let content = r#"{"categoria": "News", "sentimento": "Angry", "tópicos": ["x"], "insights": ["y"]}"#;
        assert!(parse_classification("openai", content).is_err());
    }

    #[test]
    fn test_rejects_blank_lists() {
        let content = r#"{"categoria": "News", "sentimento": "Mixed", "tópicos": ["  "], "insights": ["y"]}"#;
        assert!(parse_classification("openai", content).is_err());

        let content = r#"{"categoria": "News", "sentimento": "Mixed", "tópicos": ["x"], "insights": []}"#;
        assert!(parse_classification("openai", content).is_err());
    }
}

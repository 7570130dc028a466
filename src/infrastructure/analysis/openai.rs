use crate::domain::ports::analyzer::{Analysis, TextAnalyzer};
use crate::domain::values::sentiment::{score_in_range, SentimentLabel};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a financial analyst. Analyze the following text.";

pub struct OpenAiAnalyzer {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// The constrained three-key contract the model must return.
#[derive(Deserialize)]
struct AnalysisPayload {
    summary: String,
    sentiment: String,
    sentiment_score: f64,
}

impl OpenAiAnalyzer {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        }
    }

    fn prompt(text: &str) -> String {
        format!(
            "From the text below, provide these three things in a JSON format with keys \
             \"summary\", \"sentiment\", and \"sentiment_score\":\n\
             1. A concise one-sentence summary.\n\
             2. The overall sentiment (options: Positive, Negative, Neutral).\n\
             3. A sentiment score from -1.0 (very negative) to 1.0 (very positive).\n\n\
             Text: \"{text}\""
        )
    }

    /// Parse and validate the model output against the contract. Any missing
    /// key, unknown label, or out-of-range score fails the whole analysis.
    fn parse_content(content: &str) -> Result<Analysis, String> {
        let payload: AnalysisPayload =
            serde_json::from_str(content).map_err(|e| format!("malformed analysis JSON: {e}"))?;

        let sentiment: SentimentLabel = payload.sentiment.parse()?;
        if !score_in_range(payload.sentiment_score) {
            return Err(format!(
                "sentiment_score {} outside [-1.0, 1.0]",
                payload.sentiment_score
            ));
        }

        Ok(Analysis {
            summary: payload.summary,
            sentiment,
            sentiment_score: payload.sentiment_score,
        })
    }
}

#[async_trait::async_trait]
impl TextAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis, String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::prompt(text),
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: 0.2,
        };

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("OpenAI API error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("OpenAI API {status}: {body}"));
        }

        let result: ChatResponse = resp.json().await.map_err(|e| format!("Parse error: {e}"))?;
        let content = result
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| "empty choices in analysis response".to_string())?;

        Self::parse_content(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_parses() {
        let analysis = OpenAiAnalyzer::parse_content(
            r#"{"summary": "Revenue grew.", "sentiment": "Positive", "sentiment_score": 0.7}"#,
        )
        .unwrap();
        assert_eq!(analysis.summary, "Revenue grew.");
        assert_eq!(analysis.sentiment, SentimentLabel::Positive);
        assert_eq!(analysis.sentiment_score, 0.7);
    }

    #[test]
    fn missing_key_fails_whole_analysis() {
        assert!(OpenAiAnalyzer::parse_content(r#"{"summary": "x", "sentiment": "Neutral"}"#).is_err());
    }

    #[test]
    fn out_of_range_score_fails_whole_analysis() {
        assert!(OpenAiAnalyzer::parse_content(
            r#"{"summary": "x", "sentiment": "Neutral", "sentiment_score": 1.5}"#
        )
        .is_err());
    }

    #[test]
    fn unknown_label_fails_whole_analysis() {
        assert!(OpenAiAnalyzer::parse_content(
            r#"{"summary": "x", "sentiment": "bullish", "sentiment_score": 0.2}"#
        )
        .is_err());
    }

    #[test]
    fn non_json_content_fails() {
        assert!(OpenAiAnalyzer::parse_content("I think it's positive").is_err());
    }
}

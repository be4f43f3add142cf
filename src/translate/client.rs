use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::lang::Lang;

const API_BASE: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation API error: status {0}")]
    Status(u16),

    #[error("translation response not in expected shape: {0}")]
    Malformed(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over the machine-translation backend. Implemented by
/// `GoogleTranslate` for production; mock implementations used in tests.
pub trait Translator {
    async fn translate(
        &self,
        text: &str,
        source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError>;
}

/// Client for the public Google Translate `gtx` endpoint. No API key; the
/// endpoint answers a GET with nested JSON arrays of translated segments.
#[derive(Clone)]
pub struct GoogleTranslate {
    http: Client,
    base_url: String,
}

impl GoogleTranslate {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: format!("{base_url}/translate_a/single"),
        }
    }
}

impl Translator for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: Lang,
        target: Lang,
    ) -> Result<String, TranslateError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "translation API error");
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let translated = extract_segments(&body)?;
        debug!(
            from = source.code(),
            to = target.code(),
            chars = translated.len(),
            "translation complete"
        );
        Ok(translated)
    }
}

/// The gtx payload is `[[["seg out","seg in",...],...],...]`; the translation
/// is the concatenation of the first element of every segment.
fn extract_segments(body: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::Malformed(snippet(body)))?;

    let mut out = String::new();
    for seg in segments {
        if let Some(piece) = seg.get(0).and_then(|v| v.as_str()) {
            out.push_str(piece);
        }
    }

    if out.is_empty() {
        return Err(TranslateError::Malformed(snippet(body)));
    }
    Ok(out)
}

fn snippet(body: &serde_json::Value) -> String {
    let text = body.to_string();
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_concatenates_segments() {
        let body = serde_json::json!([
            [["Hello ", "హలో ", null], ["world", "ప్రపంచం", null]],
            null,
            "te"
        ]);
        assert_eq!(extract_segments(&body).unwrap(), "Hello world");
    }

    #[test]
    fn extract_rejects_non_array_payload() {
        let body = serde_json::json!({"error": "nope"});
        assert!(matches!(
            extract_segments(&body),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[test]
    fn extract_rejects_empty_translation() {
        let body = serde_json::json!([[], null, "te"]);
        assert!(matches!(
            extract_segments(&body),
            Err(TranslateError::Malformed(_))
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn translate_success_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("sl", "te"))
            .and(query_param("tl", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [["How to grow tomato", "టమోటా ఎలా పెంచాలి", null]],
                null,
                "te"
            ])))
            .mount(&server)
            .await;

        let client = GoogleTranslate::with_base_url(Client::new(), &server.uri());
        let out = client
            .translate("టమోటా ఎలా పెంచాలి", Lang::Te, Lang::En)
            .await
            .unwrap();
        assert_eq!(out, "How to grow tomato");
    }

    #[tokio::test]
    async fn translate_500_returns_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GoogleTranslate::with_base_url(Client::new(), &server.uri());
        let err = client.translate("text", Lang::En, Lang::Te).await.unwrap_err();
        assert!(matches!(err, TranslateError::Status(500)));
    }

    #[tokio::test]
    async fn translate_garbage_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"odd": true})),
            )
            .mount(&server)
            .await;

        let client = GoogleTranslate::with_base_url(Client::new(), &server.uri());
        let err = client.translate("text", Lang::En, Lang::Te).await.unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }
}

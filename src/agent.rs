use serde::Serialize;
use tracing::info;

use crate::kb::TfidfIndex;
use crate::lang::{self, Lang};
use crate::translate::{self, Translator};

pub const DEFAULT_MIN_SCORE: f64 = 0.12;

pub const FALLBACK_ANSWER: &str =
    "Sorry, I couldn't find a precise match. Please consult with a local agricultural officer.";

/// Full result of one query, for diagnostics; `answer_out` is what users see.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRecord {
    pub input_lang: Lang,
    pub output_lang: Lang,
    pub query_en: String,
    pub matched_query: Option<String>,
    pub score: f64,
    pub answer_en: String,
    pub answer_out: String,
}

/// Ties detection, translation, and retrieval into one `answer` call.
/// Stateless between calls; the index is read-only after construction.
pub struct Agent<T: Translator> {
    index: TfidfIndex,
    translator: T,
    min_score: f64,
}

impl<T: Translator> Agent<T> {
    pub fn new(index: TfidfIndex, translator: T, min_score: f64) -> Self {
        Self {
            index,
            translator,
            min_score,
        }
    }

    /// Answers one question: detect language, route to English, retrieve,
    /// route back. Never fails; a miss yields the fallback message.
    pub async fn answer(&self, user_text: &str) -> AnswerRecord {
        let input_lang = lang::detect(user_text);
        let output_lang = input_lang;

        let query_en = translate::to_english(&self.translator, user_text, input_lang)
            .await
            .text;

        let retrieval = self.index.best_answer(&query_en, self.min_score);
        let answer_en = retrieval
            .answer
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        let answer_out = translate::from_english(&self.translator, &answer_en, output_lang)
            .await
            .text;

        info!(
            lang = input_lang.code(),
            score = retrieval.score,
            matched = retrieval.matched_query.is_some(),
            "query answered"
        );

        AnswerRecord {
            input_lang,
            output_lang,
            query_en,
            matched_query: retrieval.matched_query,
            score: retrieval.score,
            answer_en,
            answer_out,
        }
    }
}

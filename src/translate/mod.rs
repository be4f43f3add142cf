//! Translation capability: the backend trait, the Google client, and the
//! identity-fallback policy the pipeline relies on.

mod client;

pub use client::{GoogleTranslate, TranslateError, Translator};

use tracing::warn;

use crate::lang::Lang;

/// Outcome of a pipeline translation. A backend failure never propagates:
/// the input text is passed through and `fell_back` records that the output
/// may be in the wrong language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub fell_back: bool,
}

async fn translate_or_identity(
    tx: &impl Translator,
    text: &str,
    source: Lang,
    target: Lang,
) -> Translation {
    if source == target {
        return Translation {
            text: text.to_string(),
            fell_back: false,
        };
    }
    match tx.translate(text, source, target).await {
        Ok(text) => Translation {
            text,
            fell_back: false,
        },
        Err(e) => {
            warn!(error = %e, from = source.code(), to = target.code(),
                "translation failed, passing text through");
            Translation {
                text: text.to_string(),
                fell_back: true,
            }
        }
    }
}

/// Normalizes a query into English, the corpus's indexing language.
pub async fn to_english(tx: &impl Translator, text: &str, source: Lang) -> Translation {
    translate_or_identity(tx, text, source, Lang::En).await
}

/// Translates an English answer back into the user's language.
pub async fn from_english(tx: &impl Translator, text: &str, target: Lang) -> Translation {
    translate_or_identity(tx, text, Lang::En, target).await
}

use serde::Serialize;
use tracing::debug;

/// Telugu block, U+0C00..=U+0C7F.
const TELUGU_SCRIPT: std::ops::RangeInclusive<char> = '\u{0C00}'..='\u{0C7F}';

/// Transliterated Telugu words common in romanized farming questions
/// ("ela cheyali" = how to do, "panta" = crop, ...). Closed heuristic list.
const ROMANIZED_TELUGU: &[&str] = &["ela", "cheyali", "panta", "vithanam", "raalu", "neellu"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Te,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Te => "te",
        }
    }
}

/// Classifies input as English or Telugu. Heuristic cascade, first hit wins:
/// native script, then trigram detection, then romanized keywords. Script is
/// the strongest signal so it overrides everything else.
pub fn detect(text: &str) -> Lang {
    if contains_telugu_script(text) {
        return Lang::Te;
    }

    // Soft stage: whatlang may see too little text to decide. Anything but a
    // confident Telugu verdict falls through.
    if let Some(info) = whatlang::detect(text)
        && info.lang() == whatlang::Lang::Tel
    {
        debug!(confidence = info.confidence(), "trigram detector: telugu");
        return Lang::Te;
    }

    let lowered = text.to_lowercase();
    if ROMANIZED_TELUGU.iter().any(|kw| lowered.contains(kw)) {
        return Lang::Te;
    }

    Lang::En
}

fn contains_telugu_script(text: &str) -> bool {
    text.chars().any(|c| TELUGU_SCRIPT.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telugu_script_detected() {
        assert_eq!(detect("టమోటా పంటకు ఏ నేల మంచిది"), Lang::Te);
    }

    #[test]
    fn single_telugu_char_is_enough() {
        assert_eq!(detect("best soil for టమోటా"), Lang::Te);
    }

    #[test]
    fn plain_english_detected() {
        assert_eq!(detect("What soil is best for tomato?"), Lang::En);
    }

    #[test]
    fn romanized_keyword_detected() {
        assert_eq!(detect("Tomato panta ela cheyali"), Lang::Te);
    }

    #[test]
    fn romanized_keyword_is_case_insensitive() {
        assert_eq!(detect("PANTA ROTATION"), Lang::Te);
    }

    #[test]
    fn empty_input_defaults_to_english() {
        assert_eq!(detect(""), Lang::En);
    }

    #[test]
    fn codes_match_iso() {
        assert_eq!(Lang::En.code(), "en");
        assert_eq!(Lang::Te.code(), "te");
    }
}

//! Batch verification prompt.
//!
//! The model is asked to return a JSON array aligned with the input entries.

use super::{PromptPair, Scenario};
use crate::model::QaEntry;

const QA_SYSTEM_PROMPT: &str = "You are a meticulous localization QA expert. \
Review the batch of translations in the target language and correct issues.

Return ONLY JSON with the corrected translations, preserving order. No explanations outside JSON.

QA Rules (apply in order):
1) Preserve placeholders/variables exactly ({name}, %d, %s, {{var}}).
2) Preserve numbers and their formatting exactly (1, 2, 3, 10).
3) Ensure consistent term translation across the batch ('photo' vs 'foto'):
   - If a term appears multiple times, pick the most appropriate consistent translation for the language and context, then apply consistently.
4) Fix grammar/pluralization per target language (e.g., Spanish: '1 foto', '2 fotos'; NOT '2 foto').
5) Preserve technical acronyms and file formats (AI, JPEG, MP4).
6) Maintain punctuation and capitalization style as appropriate for UI strings.
7) Do NOT add marketing phrases, emojis, hashtags, exclamations, or calls-to-action.
8) Keep tone concise and functional (UI/UX labels), avoid paraphrasing the meaning.
9) If the translation is much longer than the source (over ~1.5x words), compress while preserving meaning.
10) Keep conceptual safety: translate function, not problematic literal terms (e.g., 'AI Headshot' → 'AI Portrait').
11) Never modify the 'source' text.

Output format: A JSON array of objects with keys: source, translation, and optional notes.";

fn scenario_rules(scenario: Scenario) -> &'static [&'static str] {
    if scenario.is_marketing() {
        &["Marketing context: allow brief persuasive tone, but avoid emojis/hashtags unless absolutely standard."]
    } else {
        &[
            "Context is not marketing. Remove emojis, hashtags, and promotional language. Keep short UI-style phrases.",
            "Prefer literal, natural equivalents over creative synonyms.",
        ]
    }
}

pub(super) fn build(entries: &[QaEntry], lang: &str, scenario: Scenario) -> PromptPair {
    // QaEntry is two plain strings; serialization cannot fail.
    let entries_json = serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string());

    let user = format!(
        "Target language: {}\nScenario: {}\nSpecific rules: {}\n\n\
         Here is the batch to verify and correct. Return corrected JSON only.\n\
         Entries: {}",
        lang,
        scenario.id(),
        scenario_rules(scenario).join("\n"),
        entries_json
    );

    PromptPair {
        system: QA_SYSTEM_PROMPT.to_string(),
        user,
    }
}

//! Scenario-specific prompt selection.
//!
//! Each [`Scenario`] owns a hand-authored system prompt. Selection goes through
//! [`PROMPT_TABLE`]; an unrecognised scenario id resolves to
//! [`Scenario::General`] in [`Scenario::from_id`], never implicitly.
//!
//! - `app_store`: ASO rules and store character limits
//! - `marketing`: social and ad copy
//! - `website`: SEO and web content
//! - `software`: UI strings with safety workflow
//! - `general`: balanced bulk translation
//! - `qa`: batch verification prompt

mod app_store;
mod general;
mod marketing;
mod qa;
mod software;
mod website;

use crate::model::QaEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (system, user) prompt pair ready to send to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Named translation context selecting a specialised prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    AppStore,
    Marketing,
    Website,
    Software,
    #[default]
    General,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::AppStore,
        Scenario::Marketing,
        Scenario::Website,
        Scenario::Software,
        Scenario::General,
    ];

    /// Resolve a scenario id. Unknown or empty ids fall back to `General`.
    pub fn from_id(id: &str) -> Scenario {
        match id.trim() {
            "app-store" => Scenario::AppStore,
            "marketing" => Scenario::Marketing,
            "website" => Scenario::Website,
            "software" => Scenario::Software,
            "general" => Scenario::General,
            _ => Scenario::General,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Scenario::AppStore => "app-store",
            Scenario::Marketing => "marketing",
            Scenario::Website => "website",
            Scenario::Software => "software",
            Scenario::General => "general",
        }
    }

    /// Marketing is the only scenario that tolerates promotional tone in QA.
    pub fn is_marketing(&self) -> bool {
        matches!(self, Scenario::Marketing)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Builds a prompt pair for (text, target language, location hint).
pub type PromptBuilder = fn(&str, &str, &str) -> PromptPair;

/// Scenario to prompt-builder lookup table.
pub const PROMPT_TABLE: [(Scenario, PromptBuilder); 5] = [
    (Scenario::AppStore, app_store::build),
    (Scenario::Marketing, marketing::build),
    (Scenario::Website, website::build),
    (Scenario::Software, software::build),
    (Scenario::General, general::build),
];

fn builder_for(scenario: Scenario) -> PromptBuilder {
    PROMPT_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == scenario)
        .map(|(_, builder)| *builder)
        .unwrap_or(general::build)
}

/// Prompt pair for translating a single text into `target_language`.
///
/// `location` is a free-text hint ("Settings screen button"); empty means none.
pub fn select_prompt(
    scenario: Scenario,
    text: &str,
    target_language: &str,
    location: &str,
) -> PromptPair {
    builder_for(scenario)(text, target_language, location.trim())
}

/// Prompt pair for verifying a batch of translations in `target_language`.
///
/// `entries` are serialized in the given order; corrections are re-applied by
/// position, so callers must keep the same order when merging.
pub fn select_qa_prompt(entries: &[QaEntry], target_language: &str, scenario: Scenario) -> PromptPair {
    qa::build(entries, target_language, scenario)
}

/// Shared user-prompt shape: a short instruction, with the location hint on
/// its own line when present.
fn user_prompt(
    with_location: &str,
    location_label: &str,
    without_location: &str,
    text: &str,
    location: &str,
) -> String {
    if location.is_empty() {
        format!("{}: {}", without_location, text)
    } else {
        format!(
            "{}.\n{}: {}\nText: {}",
            with_location, location_label, location, text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ==================== Scenario Tests ====================

    #[test]
    fn test_scenario_ids_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_id(scenario.id()), scenario);
        }
    }

    #[test]
    fn test_unknown_scenario_falls_back_to_general() {
        assert_eq!(Scenario::from_id("podcast"), Scenario::General);
        assert_eq!(Scenario::from_id(""), Scenario::General);
        assert_eq!(Scenario::from_id("APP-STORE"), Scenario::General);
    }

    #[test]
    fn test_scenario_serde_uses_kebab_ids() {
        let json = serde_json::to_string(&Scenario::AppStore).expect("serialize");
        assert_eq!(json, "\"app-store\"");
    }

    // ==================== Prompt Table Tests ====================

    #[test]
    fn test_prompt_table_is_total() {
        let covered: HashSet<Scenario> = PROMPT_TABLE.iter().map(|(s, _)| *s).collect();
        for scenario in Scenario::ALL {
            assert!(covered.contains(&scenario), "{} missing", scenario);
        }
    }

    #[test]
    fn test_each_scenario_has_distinct_system_prompt() {
        let prompts: HashSet<String> = Scenario::ALL
            .iter()
            .map(|s| select_prompt(*s, "Save", "Spanish", "").system)
            .collect();
        assert_eq!(prompts.len(), Scenario::ALL.len());
    }

    #[test]
    fn test_selection_is_stable() {
        for scenario in Scenario::ALL {
            let first = select_prompt(scenario, "Save", "Spanish", "button");
            let second = select_prompt(scenario, "Save", "Spanish", "button");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_unknown_scenario_matches_general_prompt() {
        let fallback = select_prompt(Scenario::from_id("unknown"), "Save", "Spanish", "");
        let general = select_prompt(Scenario::General, "Save", "Spanish", "");
        assert_eq!(fallback, general);
    }

    // ==================== User Prompt Tests ====================

    #[test]
    fn test_user_prompt_embeds_text_and_language() {
        for scenario in Scenario::ALL {
            let pair = select_prompt(scenario, "Export MP4 Video", "German", "");
            assert!(pair.user.contains("Export MP4 Video"));
            assert!(pair.user.contains("German"));
        }
    }

    #[test]
    fn test_user_prompt_includes_location_hint() {
        for scenario in Scenario::ALL {
            let pair = select_prompt(scenario, "Save", "Spanish", "Editor toolbar");
            assert!(pair.user.contains("Editor toolbar"));
            assert!(pair.user.contains("Text: Save"));
        }
    }

    #[test]
    fn test_blank_location_is_ignored() {
        let pair = select_prompt(Scenario::Software, "Save", "Spanish", "   ");
        assert_eq!(pair.user, "Translate this UI text into Spanish: Save");
    }
}

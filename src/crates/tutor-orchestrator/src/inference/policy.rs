//! Context-driven defaults
//!
//! One place decides how mastery level and teaching style translate into
//! parameter values. The inference pass and the post-merge pass both ask
//! this policy, so they can never disagree.

use crate::context::{UserContext, MASTERY_LEVEL_SUMMARY, PREFERRED_TEACHING_STYLE};
use crate::schema::{CONCEPT_EXPLAINER, FLASHCARD_GENERATOR, NOTE_MAKER};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// Mastery level assumed when the profile has none
pub const DEFAULT_MASTERY_LEVEL: u32 = 4;

/// Flashcard count when none was requested
pub const DEFAULT_COUNT: i64 = 5;

/// Subject used when no topic candidate exists
pub const DEFAULT_SUBJECT: &str = "general";

/// Coarse grouping of mastery levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryTier {
    /// Level 3 and below
    Beginner,
    /// Levels 4 to 6
    Intermediate,
    /// Level 7 and above
    Advanced,
}

impl MasteryTier {
    pub fn from_level(level: u32) -> Self {
        if level <= 3 {
            MasteryTier::Beginner
        } else if level <= 6 {
            MasteryTier::Intermediate
        } else {
            MasteryTier::Advanced
        }
    }
}

/// Rules for filling parameters from the learner profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultingPolicy {
    pub default_mastery_level: u32,
    pub default_count: i64,
}

impl Default for DefaultingPolicy {
    fn default() -> Self {
        Self {
            default_mastery_level: DEFAULT_MASTERY_LEVEL,
            default_count: DEFAULT_COUNT,
        }
    }
}

impl DefaultingPolicy {
    /// First run of ASCII digits in the mastery summary
    pub fn mastery_level(&self, context: &UserContext) -> u32 {
        static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
        let digits = DIGITS.get_or_init(|| Regex::new(r"[0-9]+").ok());

        let summary = context.get_str(MASTERY_LEVEL_SUMMARY).unwrap_or_default();
        match digits.as_ref().and_then(|re| re.find(summary)) {
            // an ASCII digit run only fails to parse on overflow
            Some(m) => m.as_str().parse().unwrap_or(u32::MAX),
            None => self.default_mastery_level,
        }
    }

    pub fn tier(&self, context: &UserContext) -> MasteryTier {
        MasteryTier::from_level(self.mastery_level(context))
    }

    /// `difficulty` for flashcards
    pub fn difficulty_for(&self, context: &UserContext) -> &'static str {
        match self.tier(context) {
            MasteryTier::Beginner => "easy",
            MasteryTier::Intermediate => "medium",
            MasteryTier::Advanced => "hard",
        }
    }

    /// `desired_depth` for explanations
    pub fn depth_for(&self, context: &UserContext) -> &'static str {
        match self.tier(context) {
            MasteryTier::Beginner => "basic",
            MasteryTier::Intermediate => "intermediate",
            MasteryTier::Advanced => "advanced",
        }
    }

    pub fn is_visual_learner(&self, context: &UserContext) -> bool {
        context
            .get_str(PREFERRED_TEACHING_STYLE)
            .map_or(false, |style| style.trim().eq_ignore_ascii_case("visual"))
    }

    pub fn note_style_for(&self, context: &UserContext) -> &'static str {
        if self.is_visual_learner(context) {
            "structured"
        } else {
            "outline"
        }
    }

    pub fn analogies_for(&self, context: &UserContext) -> bool {
        self.is_visual_learner(context)
    }

    pub fn include_examples(&self) -> bool {
        true
    }

    /// Values the merge pass applies to absent fields of `tool`
    pub fn context_defaults(&self, tool: &str, context: &UserContext) -> Vec<(&'static str, Value)> {
        match tool {
            FLASHCARD_GENERATOR => vec![
                ("count", json!(self.default_count)),
                ("difficulty", json!(self.difficulty_for(context))),
            ],
            NOTE_MAKER => vec![
                ("note_taking_style", json!(self.note_style_for(context))),
                ("include_examples", json!(self.include_examples())),
                ("include_analogies", json!(self.analogies_for(context))),
            ],
            CONCEPT_EXPLAINER => vec![
                ("desired_depth", json!(self.depth_for(context))),
                ("include_examples", json!(self.include_examples())),
            ],
            _ => Vec::new(),
        }
    }
}

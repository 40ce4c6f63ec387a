//! Rule documents: the declarative configuration for one game variant.
//!
//! A document arrives as JSON and is decoded once, eagerly, into closed
//! tagged enums. Unknown `type` tags anywhere in the document are a
//! [`Configuration`](crate::EngineError::Configuration) error at load
//! time — nothing falls through silently at play time.

pub mod actions;
pub mod criteria;
pub mod document;
pub mod effects;
pub mod play;
pub mod scoring;

pub use actions::{CustomAction, Requirement, RequirementCheck};
pub use criteria::{Criteria, Criterion};
pub use document::{DeckConfig, RuleDocument, RulesData, Transformation};
pub use effects::{EffectKind, SpecialEffect, TargetSet};
pub use play::{CardPlayRules, Condition, CountOperator, PlayRule};
pub use scoring::{Scoring, WinCondition};

//! Special-effect declarations.
//!
//! On the wire an effect is `{type, criteria, data, message}` with the
//! payload adjacently tagged under `data`. A raw mirror struct decodes
//! that shape and `TryFrom` converts it to the closed [`EffectKind`],
//! rejecting unknown tags and malformed payloads at document load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::criteria::Criteria;

/// A rule-declared special effect with its trigger criteria.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpecialEffect")]
pub struct SpecialEffect {
    #[serde(flatten)]
    pub effect: EffectKind,
    #[serde(skip_serializing_if = "Criteria::is_empty")]
    pub criteria: Criteria,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The closed set of effect consequences.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EffectKind {
    /// Advance the turn one extra time, skipping the next player.
    SkipPlayer,
    /// Flip the direction flag in game state.
    ReverseDirection,
    /// Each resolved target draws up to `count` cards; stops silently
    /// when the deck empties.
    ForceDraw { target: TargetSet, count: u32 },
    /// Merge a state-change mapping into game state.
    CustomEffect { state_changes: Map<String, Value> },
}

/// Target sets for [`EffectKind::ForceDraw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSet {
    NextPlayer,
    AllOtherPlayers,
    AllPlayers,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum EffectTag {
    SkipPlayer,
    ReverseDirection,
    ForceDraw,
    CustomEffect,
}

fn default_draw_count() -> u32 {
    1
}

#[derive(Deserialize)]
struct ForceDrawData {
    target: TargetSet,
    #[serde(default = "default_draw_count")]
    count: u32,
}

#[derive(Deserialize)]
struct CustomEffectData {
    #[serde(default)]
    state_changes: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawSpecialEffect {
    #[serde(rename = "type")]
    tag: EffectTag,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    criteria: Criteria,
    #[serde(default)]
    message: Option<String>,
}

impl TryFrom<RawSpecialEffect> for SpecialEffect {
    type Error = String;

    fn try_from(raw: RawSpecialEffect) -> Result<Self, Self::Error> {
        let effect = match raw.tag {
            EffectTag::SkipPlayer => EffectKind::SkipPlayer,
            EffectTag::ReverseDirection => EffectKind::ReverseDirection,
            EffectTag::ForceDraw => {
                let data: ForceDrawData = serde_json::from_value(raw.data)
                    .map_err(|e| format!("force_draw effect: {e}"))?;
                EffectKind::ForceDraw { target: data.target, count: data.count }
            }
            EffectTag::CustomEffect => {
                let data: CustomEffectData = serde_json::from_value(raw.data)
                    .map_err(|e| format!("custom_effect effect: {e}"))?;
                EffectKind::CustomEffect { state_changes: data.state_changes }
            }
        };

        Ok(Self { effect, criteria: raw.criteria, message: raw.message })
    }
}

//! Expression channel vocabulary (emotions, visemes, blinks).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named expression channels a rig may expose. Weights are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    Neutral,
    Happy,
    Angry,
    Sad,
    Relaxed,
    Surprised,
    Aa,
    Ih,
    Ou,
    Ee,
    Oh,
    Blink,
    BlinkLeft,
    BlinkRight,
}

impl Expression {
    pub const ALL: [Expression; 14] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Angry,
        Expression::Sad,
        Expression::Relaxed,
        Expression::Surprised,
        Expression::Aa,
        Expression::Ih,
        Expression::Ou,
        Expression::Ee,
        Expression::Oh,
        Expression::Blink,
        Expression::BlinkLeft,
        Expression::BlinkRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Angry => "angry",
            Expression::Sad => "sad",
            Expression::Relaxed => "relaxed",
            Expression::Surprised => "surprised",
            Expression::Aa => "aa",
            Expression::Ih => "ih",
            Expression::Ou => "ou",
            Expression::Ee => "ee",
            Expression::Oh => "oh",
            Expression::Blink => "blink",
            Expression::BlinkLeft => "blinkLeft",
            Expression::BlinkRight => "blinkRight",
        }
    }

    /// Morph-target names commonly bound to this channel on rigs that expose
    /// raw morphs instead of expression channels, most likely first.
    pub fn morph_aliases(self) -> &'static [&'static str] {
        match self {
            Expression::Aa => &["aa", "a", "mouthOpen", "mouth_open", "MouthOpen", "vrc.v_aa"],
            Expression::Blink => &["blink", "Blink", "eyesClosed", "eyes_closed"],
            Expression::BlinkLeft => &["blinkLeft", "blink_l", "eyeBlinkLeft"],
            Expression::BlinkRight => &["blinkRight", "blink_r", "eyeBlinkRight"],
            _ => &[],
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized expression name: {0:?}")]
pub struct ParseExpressionError(pub String);

impl FromStr for Expression {
    type Err = ParseExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::ALL
            .iter()
            .copied()
            .find(|expression| expression.name() == s)
            .ok_or_else(|| ParseExpressionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should round-trip every channel through serde and FromStr
    #[test]
    fn name_round_trip() {
        for expression in Expression::ALL {
            let json = serde_json::to_string(&expression).unwrap();
            let back: Expression = serde_json::from_str(&json).unwrap();
            assert_eq!(back, expression);
            assert_eq!(expression.name().parse::<Expression>(), Ok(expression));
        }
    }

    /// it should keep mouth aliases ordered with the canonical name first
    #[test]
    fn mouth_aliases() {
        assert_eq!(Expression::Aa.morph_aliases()[0], "aa");
        assert!(Expression::Happy.morph_aliases().is_empty());
    }
}

// SPDX-License-Identifier: MIT

//! Pure derivations over a luck score: display label, CSS gradient, and the
//! special effect the frontend plays for meme numbers.
//!
//! Tiers and effect triggers live in lookup tables so adding one is a
//! single-table edit.

use serde::Serialize;

/// Luck label tiers, highest lower-bound first. Lower bounds are inclusive.
const LUCK_TIERS: &[(u8, &str)] = &[
    (90, "exceptional"),
    (70, "good"),
    (50, "neutral"),
    (30, "mediocre"),
    (0, "poor"),
];

/// Map a luck score to its display label.
pub fn luck_label(score: u8) -> &'static str {
    LUCK_TIERS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, label)| *label)
        .unwrap_or("poor")
}

/// Gradient used when a vibe has no colors at all.
const DEFAULT_GRADIENT: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";

/// Fixed gradient angle in degrees.
const GRADIENT_ANGLE: u32 = 135;

/// Build a CSS background from a vibe's color list.
///
/// Zero colors fall back to a fixed default, one color renders solid, and
/// N >= 2 colors become a linear gradient with evenly spaced stops.
pub fn gradient(colors: &[String]) -> String {
    match colors {
        [] => DEFAULT_GRADIENT.to_string(),
        [only] => only.clone(),
        _ => {
            let last = colors.len() - 1;
            let stops = colors
                .iter()
                .enumerate()
                .map(|(i, color)| {
                    let position = (i as f64 / last as f64) * 100.0;
                    format!("{} {}%", color, position.round() as u32)
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("linear-gradient({}deg, {})", GRADIENT_ANGLE, stops)
        }
    }
}

/// How long the frontend shows a special effect before auto-dismissing.
pub const EFFECT_DURATION_SECS: u64 = 5;

/// Named celebratory/ominous effects triggered by specific scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialEffect {
    /// 0 or 100: fireworks / rock bottom
    Extreme,
    /// 69
    MemeHot,
    /// 55: "555" laughter
    Laughing,
    /// 7 or 77: golden jackpot overlay
    GoldenLucky,
    /// 4 or 44: death-number skulls
    SkullUnlucky,
}

/// Effect trigger table: (scores, effect).
const EFFECT_TRIGGERS: &[(&[u8], SpecialEffect)] = &[
    (&[0, 100], SpecialEffect::Extreme),
    (&[69], SpecialEffect::MemeHot),
    (&[55], SpecialEffect::Laughing),
    (&[7, 77], SpecialEffect::GoldenLucky),
    (&[4, 44], SpecialEffect::SkullUnlucky),
];

/// Look up the special effect for a score, if any.
pub fn special_effect(score: u8) -> Option<SpecialEffect> {
    EFFECT_TRIGGERS
        .iter()
        .find(|(scores, _)| scores.contains(&score))
        .map(|(_, effect)| *effect)
}

// SPDX-License-Identifier: MIT

//! Vibe generation engine.
//!
//! The luck score is fixed first (locked score verbatim, otherwise uniform
//! random) and is never overwritten by either narrative path. The AI call
//! only supplies fortune text, colors, and a song; when it fails for any
//! reason the engine silently falls back to the static content pool.

use crate::content::ContentPool;
use crate::error::AppError;
use crate::models::VibeResult;
use crate::services::completion::CompletionClient;
use rand::Rng;

/// Maximum luck score (scores are 0..=MAX_LUCK_SCORE inclusive).
pub const MAX_LUCK_SCORE: u8 = 100;

/// Engine producing complete vibe results.
#[derive(Clone)]
pub struct VibeEngine {
    completion: CompletionClient,
    content: ContentPool,
}

impl VibeEngine {
    pub fn new(completion: CompletionClient, content: ContentPool) -> Self {
        Self {
            completion,
            content,
        }
    }

    /// Generate a vibe for a mood, honoring an optional locked score.
    ///
    /// AI failures are recovered locally and never surface to the caller;
    /// only an empty fallback pool propagates as an error.
    pub async fn generate(
        &self,
        mood: &str,
        locked_score: Option<u8>,
    ) -> Result<VibeResult, AppError> {
        let luck_score = match locked_score {
            Some(score) => score.min(MAX_LUCK_SCORE),
            None => rand::thread_rng().gen_range(0..=MAX_LUCK_SCORE),
        };

        match self.completion.complete(mood, luck_score).await {
            Ok(ai) => Ok(VibeResult {
                luck_score,
                fortune_text: ai.fortune_text,
                colors: ai.colors,
                song: ai.song,
            }),
            Err(err) => {
                tracing::warn!(error = %err, luck_score, "AI completion failed, using fallback");
                self.fallback(luck_score)
            }
        }
    }

    /// Local random generation with the pre-chosen score.
    fn fallback(&self, luck_score: u8) -> Result<VibeResult, AppError> {
        let mut rng = rand::thread_rng();

        let fortune = self
            .content
            .pick_fortune(&mut rng, luck_score)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        let song = self
            .content
            .pick_song(&mut rng)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        let colors = random_colors(&mut rng, 3);

        Ok(VibeResult {
            luck_score,
            fortune_text: fortune.text.to_string(),
            colors,
            song: song.to_string(),
        })
    }
}

/// Generate `count` pleasant HSL colors.
///
/// Hue spans the full wheel; saturation 60-90% and lightness 50-70% keep
/// the palette readable against white text.
fn random_colors<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let hue: u16 = rng.gen_range(0..360);
            let saturation: u8 = rng.gen_range(60..90);
            let lightness: u8 = rng.gen_range(50..70);
            format!("hsl({}, {}%, {}%)", hue, saturation, lightness)
        })
        .collect()
}

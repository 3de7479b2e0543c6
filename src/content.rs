// SPDX-License-Identifier: MIT

//! Static fortune and song pools used by the fallback generation path.

use rand::seq::SliceRandom;
use rand::Rng;

/// Sentiment tag on a fortune entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneTone {
    Good,
    Neutral,
    Bad,
    Funny,
}

/// One entry in the fortune pool.
#[derive(Debug, Clone, Copy)]
pub struct Fortune {
    pub text: &'static str,
    pub tone: FortuneTone,
}

const fn fortune(text: &'static str, tone: FortuneTone) -> Fortune {
    Fortune { text, tone }
}

/// Built-in fortune pool.
const FORTUNES: &[Fortune] = &[
    fortune(
        "The universe is lining things up for you. Say yes to the next invitation.",
        FortuneTone::Good,
    ),
    fortune(
        "Someone is about to tell you exactly what you needed to hear.",
        FortuneTone::Good,
    ),
    fortune(
        "Today your timing is impeccable. Buy the ticket, send the message.",
        FortuneTone::Good,
    ),
    fortune(
        "Good luck is hiding in your inbox. Open the one you've been avoiding.",
        FortuneTone::Good,
    ),
    fortune(
        "A small win this morning snowballs into a great evening.",
        FortuneTone::Good,
    ),
    fortune(
        "Nothing dramatic today. A quiet, steady day is still a good day.",
        FortuneTone::Neutral,
    ),
    fortune(
        "The stars are undecided about you. Make the decision for them.",
        FortuneTone::Neutral,
    ),
    fortune(
        "An ordinary day, unless you wear your lucky color. Then, who knows.",
        FortuneTone::Neutral,
    ),
    fortune(
        "Expect a coin-flip kind of day. Carry a coin just in case.",
        FortuneTone::Neutral,
    ),
    fortune(
        "Keep your coffee away from your keyboard. You know why.",
        FortuneTone::Bad,
    ),
    fortune(
        "Mercury isn't in retrograde, but your plans might be.",
        FortuneTone::Bad,
    ),
    fortune(
        "Double-check everything you send today. Especially that one.",
        FortuneTone::Bad,
    ),
    fortune(
        "Today is a good day to stay in bed. Unfortunately you already got up.",
        FortuneTone::Bad,
    ),
    fortune(
        "Your luck called in sick today. It left a funny voicemail though.",
        FortuneTone::Funny,
    ),
    fortune(
        "You will step on exactly one LEGO brick. Socks won't save you.",
        FortuneTone::Funny,
    ),
    fortune(
        "The vending machine will eat your coin but give you two snacks tomorrow.",
        FortuneTone::Funny,
    ),
    fortune(
        "Your horoscope and your Wi-Fi have the same energy today: one bar.",
        FortuneTone::Funny,
    ),
];

/// Built-in song pool.
const SONGS: &[&str] = &[
    "Mr. Blue Sky - Electric Light Orchestra",
    "Lovely Day - Bill Withers",
    "Here Comes the Sun - The Beatles",
    "Dreams - Fleetwood Mac",
    "Dancing Queen - ABBA",
    "Walking on Sunshine - Katrina and the Waves",
    "Three Little Birds - Bob Marley & The Wailers",
    "Don't Stop Me Now - Queen",
    "September - Earth, Wind & Fire",
    "Riptide - Vance Joy",
    "Everybody Wants to Rule the World - Tears for Fears",
    "Good as Hell - Lizzo",
];

/// Static content used by fallback generation.
#[derive(Clone)]
pub struct ContentPool {
    fortunes: &'static [Fortune],
    songs: &'static [&'static str],
}

impl Default for ContentPool {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ContentPool {
    /// Pool backed by the built-in lists.
    pub fn builtin() -> Self {
        Self {
            fortunes: FORTUNES,
            songs: SONGS,
        }
    }

    /// Verify every tone bucket the fallback can draw from is non-empty.
    ///
    /// Called once at startup; an empty bucket would make fallback
    /// generation impossible for some scores.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.songs.is_empty() {
            return Err(ContentError::EmptyPool("songs"));
        }
        let low: Vec<_> = self.fortunes_for_score(10).collect();
        let high: Vec<_> = self.fortunes_for_score(95).collect();
        if self.fortunes.is_empty() || low.is_empty() {
            return Err(ContentError::EmptyPool("low-score fortunes"));
        }
        if high.is_empty() {
            return Err(ContentError::EmptyPool("high-score fortunes"));
        }
        Ok(())
    }

    pub fn fortune_count(&self) -> usize {
        self.fortunes.len()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// The slice of fortunes eligible for a given score.
    ///
    /// Low scores draw from bad/funny entries, high scores from good ones,
    /// everything in between from the whole pool.
    fn fortunes_for_score(&self, score: u8) -> impl Iterator<Item = &Fortune> {
        self.fortunes.iter().filter(move |f| match score {
            s if s < 20 => matches!(f.tone, FortuneTone::Bad | FortuneTone::Funny),
            s if s > 80 => matches!(f.tone, FortuneTone::Good),
            _ => true,
        })
    }

    /// Pick a fortune uniformly from the score-filtered pool.
    pub fn pick_fortune<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        score: u8,
    ) -> Result<&Fortune, ContentError> {
        let eligible: Vec<&Fortune> = self.fortunes_for_score(score).collect();
        eligible
            .choose(rng)
            .copied()
            .ok_or(ContentError::EmptyPool("fortunes"))
    }

    /// Pick a song uniformly.
    pub fn pick_song<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'static str, ContentError> {
        self.songs
            .choose(rng)
            .copied()
            .ok_or(ContentError::EmptyPool("songs"))
    }
}

/// Errors from content selection.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content pool is empty: {0}")]
    EmptyPool(&'static str),
}

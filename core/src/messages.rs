use core::fmt;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Shown when a mission ends on a bomb, one picked at random per loss.
pub const BOMB_MESSAGES: [&str; 5] = [
    "💥 BOOM! The bomb exploded!",
    "💣 Oh no! You triggered a bomb!",
    "⚠️ Mission failed - bomb detected!",
    "🚫 Critical error: Bomb detonation!",
    "❌ Explosion detected - mission aborted!",
];

pub const WIN_MESSAGE: &str = "Mission Accomplished!";

/// One of [`BOMB_MESSAGES`], stored by index so sessions stay plain data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BombMessage(u8);

impl BombMessage {
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // five entries, always fits
        Self(rng.random_range(0..BOMB_MESSAGES.len()) as u8)
    }

    pub fn as_str(self) -> &'static str {
        BOMB_MESSAGES[usize::from(self.0)]
    }
}

impl TryFrom<u8> for BombMessage {
    type Error = &'static str;

    fn try_from(index: u8) -> core::result::Result<Self, Self::Error> {
        if usize::from(index) < BOMB_MESSAGES.len() {
            Ok(Self(index))
        } else {
            Err("bomb message index out of range")
        }
    }
}

impl From<BombMessage> for u8 {
    fn from(message: BombMessage) -> Self {
        message.0
    }
}

impl fmt::Display for BombMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Event-spec parsing.
//!
//! A handler map is keyed by event specs such as `"~!keydown"`: an event name
//! prefixed by any combination of modifier characters.
//!
//! | Prefix | Modifier              |
//! |--------|-----------------------|
//! | `!`    | [`Modifiers::CAPTURE`] |
//! | `~`    | [`Modifiers::ONCE`]    |
//! | `&`    | [`Modifiers::PASSIVE`] |
//!
//! Any other leading character ends the prefix and is kept as part of the
//! event name.

use bitflags::bitflags;
use std::{convert::Infallible, fmt, str::FromStr};

bitflags! {
    /// Set of modifiers attached to an event spec.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Listen during the capture phase (`!`).
        const CAPTURE = 1;
        /// Remove the listener after its first invocation (`~`).
        const ONCE = 1 << 1;
        /// Promise never to cancel the event (`&`).
        const PASSIVE = 1 << 2;
    }
}

impl Modifiers {
    /// Map a prefix character to its modifier.
    pub const fn from_prefix(c: char) -> Option<Self> {
        match c {
            '!' => Some(Self::CAPTURE),
            '~' => Some(Self::ONCE),
            '&' => Some(Self::PASSIVE),
            _ => None,
        }
    }
}

/// An event spec split into its event name and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedEvent {
    /// Event name handed to the target, modifiers stripped.
    pub name: String,
    /// Modifiers found in the prefix.
    pub modifiers: Modifiers,
}

impl ParsedEvent {
    /// Parse an event spec.
    pub fn parse(spec: &str) -> Self {
        parse(spec)
    }
}

/// Split `spec` into its event name and modifier set.
///
/// Prefix order does not matter and repeated modifiers collapse. The name is
/// returned verbatim (no case folding).
pub fn parse(spec: &str) -> ParsedEvent {
    let mut modifiers = Modifiers::empty();
    let mut rest = spec;
    while let Some(c) = rest.chars().next() {
        let Some(modifier) = Modifiers::from_prefix(c) else {
            break;
        };
        modifiers |= modifier;
        rest = &rest[c.len_utf8()..];
    }
    ParsedEvent {
        name: rest.to_owned(),
        modifiers,
    }
}

impl FromStr for ParsedEvent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl fmt::Display for ParsedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CAPTURE) {
            f.write_str("!")?;
        }
        if self.modifiers.contains(Modifiers::ONCE) {
            f.write_str("~")?;
        }
        if self.modifiers.contains(Modifiers::PASSIVE) {
            f.write_str("&")?;
        }
        f.write_str(&self.name)
    }
}

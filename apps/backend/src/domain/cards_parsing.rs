//! Parsing of the external catalog's type line and frame string.
//!
//! The catalog reports a card's kind as a free-form type line such as
//! "Fusion Monster" or "Continuous Spell Card", and a lowercase frame string
//! such as "effect_pendulum". Both are resolved to closed enums exactly once,
//! when the snapshot is captured, so no validation path ever inspects a
//! string again.

use crate::domain::cards::{CardCategory, FrameType};
use crate::errors::domain::DomainError;

impl CardCategory {
    /// Classify a catalog type line.
    ///
    /// Extra-Deck keywords are only honored for monsters: a hypothetical
    /// "Fusion Recovery Spell Card" stays a Spell.
    pub fn from_type_line(type_line: &str) -> Result<Self, DomainError> {
        if type_line.trim().is_empty() {
            return Err(DomainError::validation("empty card type line"));
        }
        if type_line.contains("Spell") {
            return Ok(Self::Spell);
        }
        if type_line.contains("Trap") {
            return Ok(Self::Trap);
        }
        if !type_line.contains("Monster") {
            return Err(DomainError::validation(format!(
                "unrecognized card type line: {type_line}"
            )));
        }
        if type_line.contains("Fusion") {
            Ok(Self::Fusion)
        } else if type_line.contains("Synchro") {
            Ok(Self::Synchro)
        } else if type_line.contains("XYZ") || type_line.contains("Xyz") {
            Ok(Self::Xyz)
        } else if type_line.contains("Link") {
            Ok(Self::Link)
        } else if type_line.contains("Ritual") {
            Ok(Self::Ritual)
        } else if type_line.contains("Normal") {
            Ok(Self::Normal)
        } else {
            Ok(Self::Effect)
        }
    }
}

impl FrameType {
    /// Resolve a catalog frame string. Any pendulum variant collapses to
    /// [`FrameType::Pendulum`].
    pub fn from_catalog(frame: &str) -> Result<Self, DomainError> {
        let frame = frame.trim().to_ascii_lowercase();
        if frame.contains("pendulum") {
            return Ok(Self::Pendulum);
        }
        match frame.as_str() {
            "normal" | "token" => Ok(Self::Normal),
            "effect" => Ok(Self::Effect),
            "ritual" => Ok(Self::Ritual),
            "fusion" => Ok(Self::Fusion),
            "synchro" => Ok(Self::Synchro),
            "xyz" => Ok(Self::Xyz),
            "link" => Ok(Self::Link),
            "spell" => Ok(Self::Spell),
            "trap" => Ok(Self::Trap),
            other => Err(DomainError::validation(format!(
                "unrecognized frame type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_line_classifies_extra_deck_monsters() {
        assert_eq!(
            CardCategory::from_type_line("Fusion Monster").unwrap(),
            CardCategory::Fusion
        );
        assert_eq!(
            CardCategory::from_type_line("Synchro Tuner Monster").unwrap(),
            CardCategory::Synchro
        );
        assert_eq!(
            CardCategory::from_type_line("XYZ Monster").unwrap(),
            CardCategory::Xyz
        );
        assert_eq!(
            CardCategory::from_type_line("Link Monster").unwrap(),
            CardCategory::Link
        );
    }

    #[test]
    fn type_line_spell_trap_win_over_keywords() {
        // A spell whose name-like type line mentions an Extra Deck keyword must
        // not be classified as a monster.
        assert_eq!(
            CardCategory::from_type_line("Fusion Recovery Spell Card").unwrap(),
            CardCategory::Spell
        );
        assert_eq!(
            CardCategory::from_type_line("Counter Trap Card").unwrap(),
            CardCategory::Trap
        );
    }

    #[test]
    fn type_line_main_deck_monsters() {
        assert_eq!(
            CardCategory::from_type_line("Effect Monster").unwrap(),
            CardCategory::Effect
        );
        assert_eq!(
            CardCategory::from_type_line("Normal Monster").unwrap(),
            CardCategory::Normal
        );
        assert_eq!(
            CardCategory::from_type_line("Ritual Effect Monster").unwrap(),
            CardCategory::Ritual
        );
        assert_eq!(
            CardCategory::from_type_line("Flip Effect Monster").unwrap(),
            CardCategory::Effect
        );
    }

    #[test]
    fn type_line_rejects_garbage() {
        assert!(CardCategory::from_type_line("").is_err());
        assert!(CardCategory::from_type_line("Planeswalker").is_err());
    }

    #[test]
    fn frame_collapses_pendulum_family() {
        assert_eq!(
            FrameType::from_catalog("effect_pendulum").unwrap(),
            FrameType::Pendulum
        );
        assert_eq!(
            FrameType::from_catalog("xyz_pendulum").unwrap(),
            FrameType::Pendulum
        );
        assert_eq!(
            FrameType::from_catalog("normal_pendulum").unwrap(),
            FrameType::Pendulum
        );
    }

    #[test]
    fn frame_parses_plain_values() {
        assert_eq!(FrameType::from_catalog("link").unwrap(), FrameType::Link);
        assert_eq!(FrameType::from_catalog("Spell").unwrap(), FrameType::Spell);
        assert!(FrameType::from_catalog("hologram").is_err());
    }
}

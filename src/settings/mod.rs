//! Limb factory configuration.
//!
//! [`LimbFactorySettings`] is read once from the resource catalog (see
//! [`catalog`]) and inserted as a Bevy resource. Spawners borrow it; nothing
//! mutates it after start-up.

pub mod catalog;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::components::SpriteId;
use crate::limb::LimbKind;
use crate::template::TemplateId;

pub use catalog::{load_dir, parse_records, Catalog};

/// Errors raised while loading or validating the settings catalog.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The catalog directory or one of its records could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// A record of a known type was malformed.
    #[error("malformed record in {origin}: {source}")]
    Parse {
        /// Where the record came from.
        origin: String,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
    /// No `LimbFactorySettings` record exists in the catalog.
    #[error("no LimbFactorySettings record found in {origin}")]
    MissingSettings {
        /// Catalog that was scanned.
        origin: String,
    },
    /// A random range is reversed, negative or not finite.
    #[error("invalid {name} range [{min}, {max}]")]
    InvalidRange {
        /// Which range failed.
        name: &'static str,
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// The limb lifetime is not a positive, finite number of seconds.
    #[error("alive_time must be positive and finite, got {0}")]
    InvalidAliveTime(f32),
    /// Two template records share an identifier.
    #[error("duplicate template id {0}")]
    DuplicateTemplate(TemplateId),
}

/// Inclusive range of impulse magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImpulseRange {
    /// Smallest magnitude drawn.
    pub min: f32,
    /// Largest magnitude drawn.
    pub max: f32,
}

impl ImpulseRange {
    /// Creates a range from `min` to `max`.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `value`'s magnitude lies within the range.
    #[must_use]
    pub fn contains_magnitude(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value.abs())
    }

    const fn validate(&self, name: &'static str) -> Result<(), SettingsError> {
        let valid = self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max;
        if valid {
            Ok(())
        } else {
            Err(SettingsError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// How the sign of a translation component is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationSign {
    /// `-1` or `+1` with equal odds.
    #[default]
    FairCoin,
    /// `-1`, `0` or `+1` with equal odds. A zero sign cancels the axis
    /// entirely. This is the original game's tuning; opt in per settings
    /// record to reproduce it.
    ThreeWay,
}

/// Sprites chosen by limb kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KindSprites {
    /// Sprite used for arms.
    pub arm: SpriteId,
    /// Sprite used for legs.
    pub leg: SpriteId,
}

impl KindSprites {
    /// Sprite for `kind`; heads have none.
    #[must_use]
    pub const fn for_kind(&self, kind: LimbKind) -> Option<&SpriteId> {
        match kind {
            LimbKind::Arm => Some(&self.arm),
            LimbKind::Leg => Some(&self.leg),
            LimbKind::Head => None,
        }
    }
}

/// Process-wide configuration for the limb factory.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct LimbFactorySettings {
    /// Template instanced for detached limbs.
    pub limb_template: TemplateId,
    /// Template instanced for limb weapons.
    pub weapon_template: TemplateId,
    /// Fallback sprites for detached limbs with no matching source.
    pub limb_sprites: KindSprites,
    /// Sprites for limb weapons.
    pub weapon_sprites: KindSprites,
    /// Magnitude range of each translation impulse component.
    pub translation: ImpulseRange,
    /// Magnitude range of the torque impulse.
    pub rotation: ImpulseRange,
    /// Seconds a detached limb stays in the scene.
    pub alive_time: f32,
    /// Sign distribution for translation components.
    #[serde(default)]
    pub translation_sign: TranslationSign,
}

impl LimbFactorySettings {
    /// Checks ranges and lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidRange`] for a reversed, negative or
    /// non-finite range and [`SettingsError::InvalidAliveTime`] for a
    /// non-positive lifetime.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.translation.validate("translation")?;
        self.rotation.validate("rotation")?;
        if !(self.alive_time.is_finite() && self.alive_time > 0.0) {
            return Err(SettingsError::InvalidAliveTime(self.alive_time));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> LimbFactorySettings {
        LimbFactorySettings {
            limb_template: TemplateId::new("limb"),
            weapon_template: TemplateId::new("limb_weapon"),
            limb_sprites: KindSprites {
                arm: SpriteId::new("sprites/arm.png"),
                leg: SpriteId::new("sprites/leg.png"),
            },
            weapon_sprites: KindSprites {
                arm: SpriteId::new("sprites/arm_weapon.png"),
                leg: SpriteId::new("sprites/leg_weapon.png"),
            },
            translation: ImpulseRange::new(1.0, 2.0),
            rotation: ImpulseRange::new(3.0, 4.0),
            alive_time: 5.0,
            translation_sign: TranslationSign::default(),
        }
    }

    #[rstest]
    fn valid_settings_pass(settings: LimbFactorySettings) {
        assert!(settings.validate().is_ok());
    }

    #[rstest]
    #[case::reversed(ImpulseRange::new(2.0, 1.0))]
    #[case::negative(ImpulseRange::new(-1.0, 1.0))]
    #[case::infinite(ImpulseRange::new(0.0, f32::INFINITY))]
    #[case::nan(ImpulseRange::new(f32::NAN, 1.0))]
    fn bad_rotation_range_is_rejected(
        mut settings: LimbFactorySettings,
        #[case] range: ImpulseRange,
    ) {
        settings.rotation = range;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidRange {
                name: "rotation",
                ..
            })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f32::NAN)]
    fn bad_alive_time_is_rejected(mut settings: LimbFactorySettings, #[case] alive_time: f32) {
        settings.alive_time = alive_time;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidAliveTime(_))
        ));
    }

    #[rstest]
    fn sprites_are_selected_by_kind(settings: LimbFactorySettings) {
        let sprites = &settings.limb_sprites;
        assert_eq!(
            sprites.for_kind(LimbKind::Arm).map(SpriteId::as_str),
            Some("sprites/arm.png")
        );
        assert_eq!(
            sprites.for_kind(LimbKind::Leg).map(SpriteId::as_str),
            Some("sprites/leg.png")
        );
        assert!(sprites.for_kind(LimbKind::Head).is_none());
    }

    #[rstest]
    fn translation_sign_defaults_to_fair_coin() {
        let json = r#"{
            "limb_template": "limb",
            "weapon_template": "limb_weapon",
            "limb_sprites": { "arm": "a.png", "leg": "l.png" },
            "weapon_sprites": { "arm": "aw.png", "leg": "lw.png" },
            "translation": { "min": 1.0, "max": 2.0 },
            "rotation": { "min": 3.0, "max": 4.0 },
            "alive_time": 5.0
        }"#;
        let parsed: LimbFactorySettings =
            serde_json::from_str(json).expect("settings should parse");
        assert_eq!(parsed.translation_sign, TranslationSign::FairCoin);
    }
}

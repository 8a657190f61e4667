//! Randomised spawn impulses.
//!
//! Detached limbs get a one-off push and spin so they scatter instead of
//! dropping in place. Magnitudes come from the configured ranges; signs are
//! drawn separately.

use std::ops::{BitOr, BitOrAssign};

use crate::rng::RandomSource;
use crate::settings::{LimbFactorySettings, TranslationSign};

/// Which impulses a spawned limb receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsFlags(u8);

impl PhysicsFlags {
    /// No impulse.
    pub const NONE: Self = Self(0);
    /// Linear push along x and y.
    pub const TRANSLATE: Self = Self(1 << 0);
    /// Spin around z.
    pub const ROTATE: Self = Self(1 << 1);
    /// Push and spin.
    pub const ALL: Self = Self(Self::TRANSLATE.0 | Self::ROTATE.0);

    /// Whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for PhysicsFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for PhysicsFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PhysicsFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Draws one translation impulse component.
///
/// The sign comes first, then a magnitude from `settings.translation`. Under
/// [`TranslationSign::ThreeWay`] the sign may be zero, cancelling the axis.
///
/// # Examples
///
/// ```
/// use limbfall::{translation_component, LimbRng};
/// # use limbfall::settings::{ImpulseRange, KindSprites, LimbFactorySettings, TranslationSign};
/// # let settings = LimbFactorySettings {
/// #     limb_template: "limb".into(),
/// #     weapon_template: "limb_weapon".into(),
/// #     limb_sprites: KindSprites { arm: "arm.png".into(), leg: "leg.png".into() },
/// #     weapon_sprites: KindSprites { arm: "aw.png".into(), leg: "lw.png".into() },
/// #     translation: ImpulseRange::new(1.0, 2.0),
/// #     rotation: ImpulseRange::new(3.0, 4.0),
/// #     alive_time: 5.0,
/// #     translation_sign: TranslationSign::FairCoin,
/// # };
/// let mut rng = LimbRng::new(42);
/// let push = translation_component(&settings, &mut rng);
/// assert!((1.0..=2.0).contains(&push.abs()));
/// ```
pub fn translation_component<R>(settings: &LimbFactorySettings, rng: &mut R) -> f32
where
    R: RandomSource + ?Sized,
{
    let sign = match settings.translation_sign {
        TranslationSign::ThreeWay => unit_sign(rng.uniform_int(-1, 1)),
        TranslationSign::FairCoin => coin_sign(rng),
    };
    let range = settings.translation;
    rng.uniform(range.min, range.max) * sign
}

/// Draws the torque impulse: a magnitude from `settings.rotation` with a fair
/// sign.
pub fn rotation_value<R>(settings: &LimbFactorySettings, rng: &mut R) -> f32
where
    R: RandomSource + ?Sized,
{
    let sign = coin_sign(rng);
    let range = settings.rotation;
    rng.uniform(range.min, range.max) * sign
}

fn coin_sign<R>(rng: &mut R) -> f32
where
    R: RandomSource + ?Sized,
{
    if rng.uniform_int(0, 1) == 1 {
        -1.0
    } else {
        1.0
    }
}

const fn unit_sign(draw: i32) -> f32 {
    match draw.signum() {
        -1 => -1.0,
        0 => 0.0,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SpriteId;
    use crate::rng::mock::MockRandomSource;
    use crate::rng::LimbRng;
    use crate::settings::{ImpulseRange, KindSprites};
    use approx::assert_relative_eq;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> LimbFactorySettings {
        LimbFactorySettings {
            limb_template: "limb".into(),
            weapon_template: "limb_weapon".into(),
            limb_sprites: KindSprites {
                arm: SpriteId::new("arm.png"),
                leg: SpriteId::new("leg.png"),
            },
            weapon_sprites: KindSprites {
                arm: SpriteId::new("arm_weapon.png"),
                leg: SpriteId::new("leg_weapon.png"),
            },
            translation: ImpulseRange::new(1.0, 2.0),
            rotation: ImpulseRange::new(3.0, 4.0),
            alive_time: 5.0,
            translation_sign: TranslationSign::FairCoin,
        }
    }

    #[rstest]
    fn flags_combine() {
        let flags = PhysicsFlags::TRANSLATE | PhysicsFlags::ROTATE;
        assert_eq!(flags, PhysicsFlags::ALL);
        assert_eq!(PhysicsFlags::default(), PhysicsFlags::ALL);
        assert!(flags.contains(PhysicsFlags::ROTATE));
        assert!(!PhysicsFlags::TRANSLATE.contains(PhysicsFlags::ROTATE));
        assert!(PhysicsFlags::NONE.is_empty());
        let mut built = PhysicsFlags::NONE;
        built |= PhysicsFlags::ROTATE;
        assert_eq!(built, PhysicsFlags::ROTATE);
    }

    #[rstest]
    #[case::heads(0, 1.5)]
    #[case::tails(1, -1.5)]
    fn fair_coin_translation_sign(
        settings: LimbFactorySettings,
        #[case] coin: i32,
        #[case] expected: f32,
    ) {
        let mut rng = MockRandomSource::new();
        rng.expect_uniform_int()
            .with(eq(0), eq(1))
            .times(1)
            .return_const(coin);
        rng.expect_uniform()
            .with(eq(1.0), eq(2.0))
            .times(1)
            .return_const(1.5_f32);
        assert_relative_eq!(translation_component(&settings, &mut rng), expected);
    }

    #[rstest]
    #[case::negative(-1, -1.25)]
    #[case::cancelled(0, 0.0)]
    #[case::positive(1, 1.25)]
    fn three_way_translation_sign(
        mut settings: LimbFactorySettings,
        #[case] sign: i32,
        #[case] expected: f32,
    ) {
        settings.translation_sign = TranslationSign::ThreeWay;
        let mut rng = MockRandomSource::new();
        rng.expect_uniform_int()
            .with(eq(-1), eq(1))
            .times(1)
            .return_const(sign);
        rng.expect_uniform().times(1).return_const(1.25_f32);
        assert_relative_eq!(translation_component(&settings, &mut rng), expected);
    }

    #[rstest]
    fn rotation_draws_from_rotation_range(settings: LimbFactorySettings) {
        let mut rng = MockRandomSource::new();
        rng.expect_uniform_int().times(1).return_const(1);
        rng.expect_uniform()
            .with(eq(3.0), eq(4.0))
            .times(1)
            .return_const(3.5_f32);
        assert_relative_eq!(rotation_value(&settings, &mut rng), -3.5);
    }

    #[rstest]
    fn magnitudes_stay_in_range(settings: LimbFactorySettings) {
        let mut rng = LimbRng::new(99);
        for _ in 0..512 {
            let push = translation_component(&settings, &mut rng);
            assert!(settings.translation.contains_magnitude(push), "push {push}");
            let spin = rotation_value(&settings, &mut rng);
            assert!(settings.rotation.contains_magnitude(spin), "spin {spin}");
        }
    }

    #[rstest]
    fn three_way_sign_is_zero_or_in_range(mut settings: LimbFactorySettings) {
        settings.translation_sign = TranslationSign::ThreeWay;
        let mut rng = LimbRng::new(5);
        let mut zeros = 0;
        for _ in 0..512 {
            let push = translation_component(&settings, &mut rng);
            if push.abs() < f32::EPSILON {
                zeros += 1;
            } else {
                assert!(settings.translation.contains_magnitude(push), "push {push}");
            }
        }
        assert!(zeros > 0, "three-way sign should sometimes cancel the axis");
    }
}

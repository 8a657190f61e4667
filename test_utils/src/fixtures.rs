//! Sample settings and templates.

use limbfall::settings::{ImpulseRange, KindSprites};
use limbfall::template::{BodyTemplate, Bounds, VisualTemplate};
use limbfall::{
    Catalog, EntityTemplate, LimbFactorySettings, SpriteId, TemplateCatalog, TranslationSign,
};

/// Default sprite for unmatched arms.
pub const ARM_SPRITE: &str = "sprites/limbs/arm.png";
/// Default sprite for unmatched legs.
pub const LEG_SPRITE: &str = "sprites/limbs/leg.png";
/// Sprite for arm weapons.
pub const ARM_WEAPON_SPRITE: &str = "sprites/weapons/arm_club.png";
/// Sprite for leg weapons.
pub const LEG_WEAPON_SPRITE: &str = "sprites/weapons/leg_club.png";

/// Template with a body and visual.
pub const LIMB_TEMPLATE: &str = "detached_limb";
/// Template with neither body nor visual.
pub const BARE_LIMB_TEMPLATE: &str = "bare_limb";
/// Weapon template carrying a `LimbWeapon`.
pub const WEAPON_TEMPLATE: &str = "limb_weapon";
/// Weapon template missing its `LimbWeapon`.
pub const UNARMED_WEAPON_TEMPLATE: &str = "unarmed_weapon";

/// Settings with translation `[1, 2]`, rotation `[3, 4]` and a five second
/// lifetime.
pub fn sample_settings() -> LimbFactorySettings {
    LimbFactorySettings {
        limb_template: LIMB_TEMPLATE.into(),
        weapon_template: WEAPON_TEMPLATE.into(),
        limb_sprites: KindSprites {
            arm: SpriteId::new(ARM_SPRITE),
            leg: SpriteId::new(LEG_SPRITE),
        },
        weapon_sprites: KindSprites {
            arm: SpriteId::new(ARM_WEAPON_SPRITE),
            leg: SpriteId::new(LEG_WEAPON_SPRITE),
        },
        translation: ImpulseRange::new(1.0, 2.0),
        rotation: ImpulseRange::new(3.0, 4.0),
        alive_time: 5.0,
        translation_sign: TranslationSign::FairCoin,
    }
}

fn template(id: &str, body: bool, visual: bool, weapon_behaviour: bool) -> EntityTemplate {
    EntityTemplate {
        id: id.into(),
        name: id.to_owned(),
        bounds: Bounds {
            width: 0.5,
            height: 1.0,
        },
        body: body.then_some(BodyTemplate { mass: 1.0 }),
        visual: visual.then(VisualTemplate::default),
        weapon_behaviour,
    }
}

/// The four sample templates.
pub fn sample_templates() -> TemplateCatalog {
    [
        template(LIMB_TEMPLATE, true, true, false),
        template(BARE_LIMB_TEMPLATE, false, false, false),
        template(WEAPON_TEMPLATE, false, true, true),
        template(UNARMED_WEAPON_TEMPLATE, false, true, false),
    ]
    .into_iter()
    .collect()
}

/// Sample settings paired with the sample templates.
pub fn sample_catalog() -> Catalog {
    Catalog {
        settings: sample_settings(),
        templates: sample_templates(),
    }
}

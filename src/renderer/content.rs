//! Sprite resolution by content name

use glam::IVec2;

use crate::consts::{EXPLOSION_FRAMES_PER_ROW, EXPLOSION_NUM_ROWS};
use crate::sim::{EntitySizes, ProjectileKind};

/// Opaque handle to a texture owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A loaded sprite and its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub texture: TextureId,
    pub width: i32,
    pub height: i32,
}

impl Sprite {
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

/// Resolves a content name to a sprite
pub trait ContentLoader {
    fn load_sprite(&mut self, name: &str) -> Sprite;
}

/// Every sprite the game draws, loaded once up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Content {
    pub burger: Sprite,
    pub cabbage: Sprite,
    pub french_fries: Sprite,
    pub cabbage_projectile: Sprite,
    pub ketchup: Sprite,
    /// 3x3 sprite sheet
    pub explosion: Sprite,
}

impl Content {
    pub fn load(loader: &mut impl ContentLoader) -> Self {
        Self {
            burger: loader.load_sprite("burger"),
            cabbage: loader.load_sprite("cabbage"),
            french_fries: loader.load_sprite("frenchfries"),
            cabbage_projectile: loader.load_sprite("cabbageProjectile"),
            ketchup: loader.load_sprite("Ketchup"),
            explosion: loader.load_sprite("explosion"),
        }
    }

    pub fn projectile(&self, kind: ProjectileKind) -> Sprite {
        match kind {
            ProjectileKind::PlayerShot => self.french_fries,
            ProjectileKind::EnemyShot => self.cabbage_projectile,
            ProjectileKind::PlantedItem => self.ketchup,
        }
    }

    /// Entity sizes the simulation builds rectangles from
    pub fn sizes(&self) -> EntitySizes {
        EntitySizes {
            burger: self.burger.size(),
            cabbage: self.cabbage.size(),
            french_fries: self.french_fries.size(),
            cabbage_shot: self.cabbage_projectile.size(),
            ketchup: self.ketchup.size(),
            explosion_frame: IVec2::new(
                self.explosion.width / EXPLOSION_FRAMES_PER_ROW,
                self.explosion.height / EXPLOSION_NUM_ROWS,
            ),
        }
    }
}

/// Loader that hands out sequential handles with sizes from a fixed table
///
/// Used when no real asset pipeline is attached (headless runs, tests).
#[derive(Debug, Clone)]
pub struct FixedSizeLoader {
    sizes: EntitySizes,
    next_id: u32,
}

impl FixedSizeLoader {
    pub fn new(sizes: EntitySizes) -> Self {
        Self { sizes, next_id: 1 }
    }
}

impl Default for FixedSizeLoader {
    fn default() -> Self {
        Self::new(EntitySizes::default())
    }
}

impl ContentLoader for FixedSizeLoader {
    fn load_sprite(&mut self, name: &str) -> Sprite {
        let size = match name {
            "burger" => self.sizes.burger,
            "cabbage" => self.sizes.cabbage,
            "frenchfries" => self.sizes.french_fries,
            "cabbageProjectile" => self.sizes.cabbage_shot,
            "Ketchup" => self.sizes.ketchup,
            "explosion" => IVec2::new(
                self.sizes.explosion_frame.x * EXPLOSION_FRAMES_PER_ROW,
                self.sizes.explosion_frame.y * EXPLOSION_NUM_ROWS,
            ),
            other => {
                log::warn!("Unknown sprite {:?}, using 1x1", other);
                IVec2::ONE
            }
        };
        let texture = TextureId(self.next_id);
        self.next_id += 1;
        Sprite {
            texture,
            width: size.x,
            height: size.y,
        }
    }
}

//! Static level geometry
//!
//! Colliders are fixed at construction. Platforms come first in the
//! collider list, followed by tile-map rectangles.

use glam::Vec2;

use super::rect::Rect;

/// Platform size used by the demo layout
pub const PLATFORM_SIZE: Vec2 = Vec2::new(200.0, 20.0);

/// Bottom-left corners of the demo platforms, a staircase rising to the right
const DEMO_PLATFORMS: [(f32, f32); 10] = [
    (100.0, 150.0),
    (400.0, 300.0),
    (700.0, 450.0),
    (2300.0, 600.0),
    (3100.0, 750.0),
    (3900.0, 900.0),
    (4700.0, 1050.0),
    (5500.0, 1200.0),
    (6300.0, 1350.0),
    (7100.0, 1500.0),
];

#[derive(Debug, Clone)]
pub struct Level {
    colliders: Vec<Rect>,
    platform_count: usize,
    /// Horizontal extent; bullets outside `[0, width]` are culled
    pub width: f32,
    pub height: f32,
    pub player_spawn: Vec2,
}

impl Level {
    /// Build a level from platforms and tile rectangles
    pub fn new(
        platforms: Vec<Rect>,
        tiles: Vec<Rect>,
        width: f32,
        height: f32,
        player_spawn: Vec2,
    ) -> Self {
        let platform_count = platforms.len();
        let mut colliders = platforms;
        colliders.extend(tiles);
        Self {
            colliders,
            platform_count,
            width,
            height,
            player_spawn,
        }
    }

    /// The stock 8000x2000 level with ten floating platforms
    pub fn demo() -> Self {
        let platforms = DEMO_PLATFORMS
            .iter()
            .map(|&(x, y)| Rect::at(Vec2::new(x, y), PLATFORM_SIZE))
            .collect();
        Self::new(platforms, Vec::new(), 8000.0, 2000.0, Vec2::new(928.0, 540.0))
    }

    /// Every static collider, platforms first
    pub fn colliders(&self) -> &[Rect] {
        &self.colliders
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.colliders[..self.platform_count]
    }

    /// Enemy spawn point on a platform: its top-left corner
    pub fn spawn_point(platform: &Rect) -> Vec2 {
        Vec2::new(platform.x, platform.top())
    }
}

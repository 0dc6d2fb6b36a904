use log::{debug, trace};

use crate::Vec2;
use crate::camera::camera_offset;
use crate::world::{HeightLayer, WorldState};

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer presents
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Drawing surface the scene is rendered onto. Nothing is ever read back.
pub trait Canvas {
    fn clear(&mut self, color: u32);
    fn fill_polygon(&mut self, points: &[Vec2], color: u32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32);
    /// Draw `overlay` on top of this surface, skipping its transparent pixels.
    fn composite(&mut self, overlay: &Self, offset: [i32; 2]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub wall: u32,
    pub cap: u32,
    /// Transparent key of the cap overlay.
    pub cap_key: u32,
    pub player: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: pack_rgb(0xFF, 0xFF, 0xFF),
            wall: pack_rgb(0x00, 0x00, 0x00),
            cap: pack_rgb(0x11, 0x11, 0x11),
            cap_key: pack_rgb(0xFF, 0x00, 0xFF),
            player: pack_rgb(0x00, 0x00, 0x00),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
}

/// Redraw the whole scene. Expensive: call only after the player moved or
/// the view changed.
///
/// Bases and side faces go to `screen`; roofs go to the `cap` overlay which
/// is composited last, so every roof covers every side face without any
/// depth sorting.
pub fn render_scene<C: Canvas>(
    screen: &mut C,
    cap: &mut C,
    world: &mut WorldState,
    palette: &Palette,
) -> FrameStats {
    let viewport = world.viewport;
    let offset = camera_offset(world.player.position);
    let mut stats = FrameStats::default();

    screen.clear(palette.background);
    cap.clear(palette.cap_key);
    screen.fill_circle(viewport.center(), world.player.radius, palette.player);

    for (i, wall) in world.walls.iter_mut().enumerate() {
        let skirt = wall.cap_square(offset, &viewport, HeightLayer::Bottom);
        if !wall.recheck_visible(offset, &viewport) {
            trace!("wall #{i} culled");
            stats.culled += 1;
            continue;
        }
        let top = wall.cap_square(offset, &viewport, HeightLayer::Top);

        // Side faces join opposite corners of the skirt to the matching roof corners.
        let side_a = [skirt[0], skirt[2], top[2], top[0]];
        let side_b = [skirt[1], skirt[3], top[3], top[1]];
        screen.fill_polygon(&skirt, palette.wall);
        screen.fill_polygon(&side_a, palette.wall);
        screen.fill_polygon(&side_b, palette.wall);
        cap.fill_polygon(&top, palette.cap);
        stats.drawn += 1;
    }

    screen.composite(cap, [0, 0]);
    debug!("redraw: {} walls drawn, {} culled", stats.drawn, stats.culled);
    stats
}

use crate::Vec2;

/// Fixed pixel-size view onto the world. The player always sits at the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(0.5 * self.width, 0.5 * self.height)
    }

    /// Translate a world point into screen space. `offset` is the camera
    /// offset, i.e. the negated player position.
    #[inline]
    pub fn to_screen(&self, p: Vec2, offset: Vec2) -> Vec2 {
        p + offset + self.center()
    }

    /// Scale a screen point's offset from the viewport center by `k`.
    /// This is the whole "projection": no divide, just a linear push away
    /// from (k > 1) or toward (k < 1) the vanishing point.
    #[inline]
    pub fn scale_from_center(&self, p: Vec2, k: f32) -> Vec2 {
        let c = self.center();
        (p - c) * k + c
    }

    /// True when every point lies on the same outside side of the screen
    /// rectangle. Cheap rejection only: large quads whose corners are all
    /// outside on different sides are kept.
    pub fn all_outside(&self, pts: &[Vec2]) -> bool {
        if pts.is_empty() {
            return true;
        }
        let left = pts.iter().all(|p| p.x < 0.0);
        let above = pts.iter().all(|p| p.y < 0.0);
        let right = pts.iter().all(|p| p.x > self.width);
        let below = pts.iter().all(|p| p.y > self.height);
        left || above || right || below
    }
}

/// Camera offset for a player position: world geometry is drawn at `-position`.
#[inline]
pub fn camera_offset(player_pos: Vec2) -> Vec2 {
    -player_pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_center() {
        let vp = Viewport::new(500, 400);
        let p = vp.to_screen(Vec2::new(0.0, 0.0), camera_offset(Vec2::zeros()));
        assert_eq!(p, Vec2::new(250.0, 200.0));
    }

    #[test]
    fn test_player_position_shifts_world() {
        let vp = Viewport::new(500, 500);
        let player = Vec2::new(30.0, -20.0);
        let p = vp.to_screen(Vec2::new(30.0, -20.0), camera_offset(player));
        assert_eq!(p, vp.center());
    }

    #[test]
    fn test_scale_from_center() {
        let vp = Viewport::new(500, 500);
        let p = Vec2::new(300.0, 250.0);
        assert_eq!(vp.scale_from_center(p, 1.0), p);
        assert_eq!(vp.scale_from_center(p, 2.0), Vec2::new(350.0, 250.0));
        assert_eq!(vp.scale_from_center(p, 0.5), Vec2::new(275.0, 250.0));
        assert_eq!(vp.scale_from_center(vp.center(), 7.0), vp.center());
    }

    #[test]
    fn test_all_outside() {
        let vp = Viewport::new(100, 100);
        let left = [Vec2::new(-5.0, -50.0), Vec2::new(-1.0, 500.0)];
        assert!(vp.all_outside(&left));
        // Straddles the left edge.
        let straddle = [Vec2::new(-5.0, 10.0), Vec2::new(5.0, 10.0)];
        assert!(!vp.all_outside(&straddle));
        // Corners outside on different sides are not rejected.
        let spanning = [Vec2::new(-10.0, 50.0), Vec2::new(110.0, 50.0)];
        assert!(!vp.all_outside(&spanning));
        let above = [Vec2::new(-20.0, -1.0), Vec2::new(120.0, -30.0)];
        assert!(vp.all_outside(&above));
        let right = [Vec2::new(101.0, -20.0), Vec2::new(150.0, 120.0)];
        assert!(vp.all_outside(&right));
        let below = [Vec2::new(-20.0, 101.0), Vec2::new(120.0, 130.0)];
        assert!(vp.all_outside(&below));
        // Sitting exactly on the far edge is not outside.
        assert!(!vp.all_outside(&[Vec2::new(100.0, 50.0), Vec2::new(150.0, 50.0)]));
    }
}

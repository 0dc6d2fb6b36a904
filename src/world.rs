use std::fmt;

use log::debug;

use crate::Vec2;
use crate::camera::Viewport;
use crate::collision;
use crate::error::InvalidGeometry;
use crate::player::Player;

/// Directed wall side with its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub p1: Vec2,
    pub p2: Vec2,
    pub delta: Vec2,
    /// Zero for a zero-length edge.
    pub normal: Vec2,
}

impl Edge {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        let delta = p2 - p1;
        // Clockwise winding puts the interior on the right of `delta`,
        // so the left-hand perpendicular faces out.
        let normal = Vec2::new(-delta.y, delta.x)
            .try_normalize(0.0)
            .unwrap_or_else(Vec2::zeros);
        Self {
            p1,
            p2,
            delta,
            normal,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.delta.norm_squared() == 0.0
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.p1 + self.p2) * 0.5
    }
}

/// Corner as supplied by level data, before heights are normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerSpec {
    Xy(f32, f32),
    XyTop(f32, f32, f32),
    XyBottomTop(f32, f32, f32, f32),
}

impl CornerSpec {
    pub fn arity(&self) -> usize {
        match self {
            CornerSpec::Xy(..) => 2,
            CornerSpec::XyTop(..) => 3,
            CornerSpec::XyBottomTop(..) => 4,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match *self {
            CornerSpec::Xy(x, y)
            | CornerSpec::XyTop(x, y, _)
            | CornerSpec::XyBottomTop(x, y, _, _) => Vec2::new(x, y),
        }
    }
}

/// Heights shared by all four corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Heights {
    #[default]
    Unspecified,
    /// Top height; bottom stays at ground level.
    Flat(f32),
    Span { bottom: f32, top: f32 },
}

/// Which height scalar a cap projection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightLayer {
    /// Skirt baseline.
    Bottom,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub pos: Vec2,
    pub bottom: f32,
    pub top: f32,
}

impl Corner {
    #[inline]
    pub fn height(&self, layer: HeightLayer) -> f32 {
        match layer {
            HeightLayer::Bottom => self.bottom,
            HeightLayer::Top => self.top,
        }
    }
}

pub const GROUND_HEIGHT: f32 = 1.0;

/// Quadrilateral footprint with per-corner bottom/top heights.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    corners: [Corner; 4],
    edges: [Edge; 4],
    raised: bool,
    /// Recomputed on every render pass.
    pub visible: bool,
}

impl Wall {
    pub fn new(specs: [CornerSpec; 4], heights: Heights) -> Result<Self, InvalidGeometry> {
        let arities = specs.map(|c| c.arity());
        if arities.iter().any(|&a| a != arities[0]) {
            return Err(InvalidGeometry::ArityMismatch { arities });
        }

        let positions = specs.map(|c| c.pos());
        if !is_clockwise(&positions) {
            return Err(InvalidGeometry::NotClockwise);
        }

        let corners = normalize_heights(specs, heights)?;
        let raised = corners
            .iter()
            .any(|c| c.bottom > GROUND_HEIGHT || c.top > GROUND_HEIGHT);
        let edges = std::array::from_fn(|i| Edge::new(positions[i], positions[(i + 1) % 4]));

        Ok(Self {
            corners,
            edges,
            raised,
            visible: true,
        })
    }

    /// Footprint from bare (x, y) corners with a flat top height.
    pub fn flat(points: [[f32; 2]; 4], top: f32) -> Result<Self, InvalidGeometry> {
        Self::new(points.map(|[x, y]| CornerSpec::Xy(x, y)), Heights::Flat(top))
    }

    pub fn corners(&self) -> &[Corner; 4] {
        &self.corners
    }

    pub fn edges(&self) -> &[Edge; 4] {
        &self.edges
    }

    /// Any corner above ground level. Raised walls are drawn but never collide.
    pub fn raised(&self) -> bool {
        self.raised
    }

    /// Screen-space footprint.
    pub fn base_square(&self, offset: Vec2, viewport: &Viewport) -> [Vec2; 4] {
        self.corners.map(|c| viewport.to_screen(c.pos, offset))
    }

    /// Footprint pushed away from the viewport center by each corner's height.
    pub fn cap_square(&self, offset: Vec2, viewport: &Viewport, layer: HeightLayer) -> [Vec2; 4] {
        let base = self.base_square(offset, viewport);
        std::array::from_fn(|i| viewport.scale_from_center(base[i], self.corners[i].height(layer)))
    }

    pub fn recheck_visible(&mut self, offset: Vec2, viewport: &Viewport) -> bool {
        self.visible = !viewport.all_outside(&self.base_square(offset, viewport));
        self.visible
    }
}

fn normalize_heights(
    specs: [CornerSpec; 4],
    heights: Heights,
) -> Result<[Corner; 4], InvalidGeometry> {
    let (bottom, top) = match heights {
        Heights::Unspecified => (GROUND_HEIGHT, None),
        Heights::Flat(top) => (GROUND_HEIGHT, Some(top)),
        Heights::Span { bottom, top } => (bottom, Some(top)),
    };

    match (specs[0].arity(), top) {
        (2, None) => return Err(InvalidGeometry::MissingHeight { arity: 2 }),
        (3, Some(top)) => debug!("per-corner tops override shared top {top}"),
        (4, Some(_)) => debug!("per-corner heights override shared {heights:?}"),
        _ => {}
    }

    Ok(specs.map(|c| match c {
        CornerSpec::Xy(x, y) => Corner {
            pos: Vec2::new(x, y),
            bottom,
            top: top.unwrap_or(GROUND_HEIGHT),
        },
        CornerSpec::XyTop(x, y, top) => Corner {
            pos: Vec2::new(x, y),
            bottom,
            top,
        },
        CornerSpec::XyBottomTop(x, y, bottom, top) => Corner {
            pos: Vec2::new(x, y),
            bottom,
            top,
        },
    }))
}

/// Closed-polygon sum of `(next.x - cur.x) * (next.y + cur.y)`.
/// Positive for clockwise winding (y axis up).
pub fn winding_sum(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let cur = points[i];
            let next = points[(i + 1) % n];
            (next.x - cur.x) * (next.y + cur.y)
        })
        .sum()
}

pub fn is_clockwise(points: &[Vec2]) -> bool {
    winding_sum(points) > 0.0
}

impl fmt::Display for Wall {
    /// One row per corner, columns right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 4]> = self
            .corners
            .iter()
            .map(|c| [c.pos.x, c.pos.y, c.bottom, c.top].map(|v| v.to_string()))
            .collect();
        let widths: [usize; 4] =
            std::array::from_fn(|col| rows.iter().map(|r| r[col].len()).max().unwrap_or(0));

        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>width$}", cell, width = widths[col])?;
            }
        }
        Ok(())
    }
}

/// Everything one session mutates: static walls, the player, and the view.
pub struct WorldState {
    pub walls: Vec<Wall>,
    pub player: Player,
    pub viewport: Viewport,
}

impl WorldState {
    pub fn new(walls: Vec<Wall>, player: Player, viewport: Viewport) -> Self {
        Self {
            walls,
            player,
            viewport,
        }
    }

    /// One fixed step of movement. Returns true when the player tried to
    /// move, i.e. when the scene needs a redraw.
    pub fn tick(&mut self) -> bool {
        let step = self.player.step_vector();
        if step == Vec2::zeros() {
            return false;
        }
        collision::resolve_movement(self, step);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn square() -> Wall {
        Wall::flat([[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]], 1.0).unwrap()
    }

    fn pts(raw: &[[f32; 2]]) -> Vec<Vec2> {
        raw.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
    }

    #[test]
    fn test_edge_normals_are_unit_and_outward() {
        let walls = [
            square(),
            Wall::flat([[-700.0, -50.0], [-610.0, 25.0], [-590.0, 25.0], [-500.0, -25.0]], 2.0)
                .unwrap(),
            Wall::flat([[700.0, -300.0], [700.0, -350.0], [-300.0, -350.0], [-300.0, -300.0]], 2.0)
                .unwrap(),
        ];
        for wall in &walls {
            let centroid = wall.corners().iter().map(|c| c.pos).sum::<Vec2>() / 4.0;
            for edge in wall.edges() {
                assert!((edge.normal.norm() - 1.0).abs() < EPS);
                assert!(edge.normal.dot(&(edge.midpoint() - centroid)) > 0.0);
            }
        }
    }

    #[test]
    fn test_degenerate_edge_has_zero_normal() {
        let e = Edge::new(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
        assert!(e.is_degenerate());
        assert_eq!(e.normal, Vec2::zeros());
    }

    #[test]
    fn test_clockwise_rotation_and_reversal() {
        let mut p = pts(&[[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]]);
        assert!(is_clockwise(&p));
        let sum = winding_sum(&p);
        for _ in 0..4 {
            p.rotate_left(1);
            assert!(is_clockwise(&p));
            assert!((winding_sum(&p) - sum).abs() < EPS);
        }
        p.reverse();
        assert!(!is_clockwise(&p));
        assert!((winding_sum(&p) + sum).abs() < EPS);
    }

    #[test]
    fn test_rejects_counter_clockwise() {
        let err = Wall::flat([[0.0, 0.0], [50.0, 0.0], [50.0, 50.0], [0.0, 50.0]], 2.0);
        assert_eq!(err, Err(InvalidGeometry::NotClockwise));
    }

    #[test]
    fn test_rejects_mixed_arity() {
        let err = Wall::new(
            [
                CornerSpec::Xy(0.0, 0.0),
                CornerSpec::XyTop(0.0, 50.0, 2.0),
                CornerSpec::Xy(50.0, 50.0),
                CornerSpec::Xy(50.0, 0.0),
            ],
            Heights::Flat(2.0),
        );
        assert_eq!(
            err,
            Err(InvalidGeometry::ArityMismatch {
                arities: [2, 3, 2, 2]
            })
        );
    }

    #[test]
    fn test_rejects_missing_height() {
        let err = Wall::new(
            [
                CornerSpec::Xy(0.0, 0.0),
                CornerSpec::Xy(0.0, 50.0),
                CornerSpec::Xy(50.0, 50.0),
                CornerSpec::Xy(50.0, 0.0),
            ],
            Heights::Unspecified,
        );
        assert_eq!(err, Err(InvalidGeometry::MissingHeight { arity: 2 }));
    }

    #[test]
    fn test_height_shorthands() {
        let flat = Wall::flat([[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]], 3.0).unwrap();
        assert!(flat.corners().iter().all(|c| c.bottom == 1.0 && c.top == 3.0));

        let span = Wall::new(
            [
                CornerSpec::Xy(0.0, 0.0),
                CornerSpec::Xy(0.0, 50.0),
                CornerSpec::Xy(50.0, 50.0),
                CornerSpec::Xy(50.0, 0.0),
            ],
            Heights::Span {
                bottom: 1.5,
                top: 2.0,
            },
        )
        .unwrap();
        assert!(span.corners().iter().all(|c| c.bottom == 1.5 && c.top == 2.0));

        let per_corner = Wall::new(
            [
                CornerSpec::XyTop(0.0, 0.0, 2.0),
                CornerSpec::XyTop(0.0, 50.0, 3.0),
                CornerSpec::XyTop(50.0, 50.0, 3.0),
                CornerSpec::XyTop(50.0, 0.0, 2.0),
            ],
            Heights::Unspecified,
        )
        .unwrap();
        let tops: Vec<f32> = per_corner.corners().iter().map(|c| c.top).collect();
        assert_eq!(tops, vec![2.0, 3.0, 3.0, 2.0]);
        assert!(per_corner.corners().iter().all(|c| c.bottom == 1.0));

        let full = Wall::new(
            [
                CornerSpec::XyBottomTop(-350.0, -50.0, 1.5, 2.0),
                CornerSpec::XyBottomTop(-350.0, 50.0, 1.5, 2.0),
                CornerSpec::XyBottomTop(-300.0, 50.0, 1.5, 2.0),
                CornerSpec::XyBottomTop(-300.0, -50.0, 1.5, 2.0),
            ],
            Heights::Flat(9.0),
        )
        .unwrap();
        assert!(full.corners().iter().all(|c| c.bottom == 1.5 && c.top == 2.0));
    }

    #[test]
    fn test_raised_flag() {
        assert!(!square().raised());
        let tall = Wall::flat([[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]], 2.0).unwrap();
        assert!(tall.raised());
    }

    #[test]
    fn test_cap_square_identity_at_ground_height() {
        let wall = square();
        let vp = Viewport::new(500, 500);
        let offset = Vec2::new(-12.0, 40.0);
        let base = wall.base_square(offset, &vp);
        assert_eq!(wall.cap_square(offset, &vp, HeightLayer::Top), base);
        assert_eq!(wall.cap_square(offset, &vp, HeightLayer::Bottom), base);
    }

    #[test]
    fn test_cap_square_scales_from_center() {
        let wall = Wall::flat([[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]], 2.0).unwrap();
        let vp = Viewport::new(500, 500);
        let top = wall.cap_square(Vec2::zeros(), &vp, HeightLayer::Top);
        // (50, 50) sits 50px right and below center; height 2 doubles that.
        assert_eq!(top[2], Vec2::new(350.0, 350.0));
        assert_eq!(top[0], vp.center());
    }

    #[test]
    fn test_recheck_visible() {
        let mut wall = square();
        let vp = Viewport::new(500, 500);

        assert!(wall.recheck_visible(Vec2::zeros(), &vp));
        // Footprint lands at x in [-310, -260]: all left of the screen.
        assert!(!wall.recheck_visible(Vec2::new(-560.0, 0.0), &vp));
        assert!(!wall.visible);
        // Straddles the left boundary.
        assert!(wall.recheck_visible(Vec2::new(-270.0, 0.0), &vp));
        // All below.
        assert!(!wall.recheck_visible(Vec2::new(0.0, 300.0), &vp));
        // All right: footprint at x in [510, 560].
        assert!(!wall.recheck_visible(Vec2::new(260.0, 0.0), &vp));
        // All above: footprint at y in [-60, -10].
        assert!(!wall.recheck_visible(Vec2::new(0.0, -310.0), &vp));
        // Touching the right boundary still counts as on screen.
        assert!(wall.recheck_visible(Vec2::new(250.0, 0.0), &vp));
        assert!(wall.visible);
    }

    #[test]
    fn test_display_aligns_columns() {
        let wall = Wall::flat([[-50.0, 150.0], [-50.0, 100.0], [-100.0, 100.0], [-100.0, 150.0]], 2.5)
            .unwrap();
        let text = wall.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], " -50, 150, 1, 2.5");
        assert_eq!(lines[2], "-100, 100, 1, 2.5");
    }
}

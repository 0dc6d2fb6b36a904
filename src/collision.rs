use crate::Vec2;
use crate::world::{Wall, WorldState};

/// Adjust an intended displacement against every edge of every visible,
/// ground-level wall.
///
/// Edges are visited in wall order and each contact pushes the *current*
/// vector out along the edge normal by its current length, so later edges
/// see the already-deflected vector. Two simultaneous contacts can therefore
/// resolve differently depending on wall order.
pub fn deflect(walls: &[Wall], position: Vec2, radius: f32, mut vector: Vec2) -> Vec2 {
    let r2 = radius * radius;

    for wall in walls {
        if !wall.visible || wall.raised() {
            continue;
        }

        for edge in wall.edges() {
            if edge.is_degenerate() {
                continue;
            }
            let u = edge.delta;
            let target = position + vector;
            let t = ((target - edge.p1).dot(&u) / u.dot(&u)).clamp(0.0, 1.0);
            let closest = edge.p1 + u * t;

            if (closest - target).norm_squared() <= r2 {
                vector += edge.normal * vector.norm();
            }
        }
    }

    vector
}

/// Deflect `step` and commit it to the player position.
pub fn resolve_movement(world: &mut WorldState, step: Vec2) -> Vec2 {
    let player = &mut world.player;
    let vector = deflect(&world.walls, player.position, player.radius, step);
    player.position += vector;
    player.position
}

/// Squared distance from `p` to the closed segment `a`-`b`.
pub fn segment_distance_squared(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let u = b - a;
    let len2 = u.dot(&u);
    if len2 == 0.0 {
        return (p - a).norm_squared();
    }
    let t = ((p - a).dot(&u) / len2).clamp(0.0, 1.0);
    (a + u * t - p).norm_squared()
}

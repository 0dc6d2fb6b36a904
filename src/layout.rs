//! Built-in level data.

use crate::error::{InvalidGeometry, LayoutError};
use crate::world::{CornerSpec, Heights, Wall};

/// Validate every entry; the first bad wall rejects the whole set.
pub fn build<I>(entries: I) -> Result<Vec<Wall>, LayoutError>
where
    I: IntoIterator<Item = Result<Wall, InvalidGeometry>>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, wall)| wall.map_err(|source| LayoutError { index, source }))
        .collect()
}

fn full(points: [[f32; 4]; 4]) -> Result<Wall, InvalidGeometry> {
    Wall::new(
        points.map(|[x, y, b, t]| CornerSpec::XyBottomTop(x, y, b, t)),
        Heights::Unspecified,
    )
}

/// Two rows of five pillars growing taller to the east, fenced top and
/// bottom, with a raised structure on the west side.
pub fn orez_pillars() -> Result<Vec<Wall>, LayoutError> {
    let mut entries = Vec::new();

    for x in 0..5 {
        for y in 0..2 {
            let (x0, y0) = (150.0 * x as f32, -250.0 * y as f32);
            entries.push(Wall::flat(
                [
                    [x0 - 50.0, y0 + 150.0],
                    [x0 - 50.0, y0 + 100.0],
                    [x0 - 100.0, y0 + 100.0],
                    [x0 - 100.0, y0 + 150.0],
                ],
                x as f32 + 1.1,
            ));
        }
    }

    // Fences
    entries.push(Wall::flat(
        [[700.0, -300.0], [700.0, -350.0], [-300.0, -350.0], [-300.0, -300.0]],
        2.0,
    ));
    entries.push(Wall::flat(
        [[-300.0, 300.0], [-300.0, 350.0], [700.0, 350.0], [700.0, 300.0]],
        2.0,
    ));

    // West structure; the middle piece floats above ground as a capstone.
    entries.push(full([
        [-350.0, 50.0, 1.0, 2.0],
        [-350.0, 350.0, 1.0, 2.0],
        [-300.0, 350.0, 1.0, 2.0],
        [-300.0, 50.0, 1.0, 2.0],
    ]));
    entries.push(full([
        [-350.0, -50.0, 1.5, 2.0],
        [-350.0, 50.0, 1.5, 2.0],
        [-300.0, 50.0, 1.5, 2.0],
        [-300.0, -50.0, 1.5, 2.0],
    ]));
    entries.push(full([
        [-300.0, -350.0, 1.0, 2.0],
        [-350.0, -350.0, 1.0, 2.0],
        [-350.0, -50.0, 1.0, 2.0],
        [-300.0, -50.0, 1.0, 2.0],
    ]));

    entries.push(Wall::flat(
        [[700.0, -350.0], [700.0, 350.0], [750.0, 350.0], [750.0, -350.0]],
        2.0,
    ));
    entries.push(Wall::flat(
        [[-700.0, -50.0], [-610.0, 25.0], [-590.0, 25.0], [-500.0, -25.0]],
        2.0,
    ));

    // Ground-level slabs between the pillar rows. These are the only
    // walls that block the player.
    for x in 0..3 {
        let x0 = 150.0 + 175.0 * x as f32;
        entries.push(Wall::flat(
            [
                [x0 - 40.0, -30.0],
                [x0 - 40.0, 30.0],
                [x0 + 40.0, 30.0],
                [x0 + 40.0, -30.0],
            ],
            1.0,
        ));
    }

    build(entries)
}

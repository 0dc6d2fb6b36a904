use bitflags::bitflags;

use crate::Vec2;

bitflags! {
    /// Direction keys currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Heading: u8 {
        const NORTH = 1;
        const WEST = 2;
        const SOUTH = 4;
        const EAST = 8;
    }
}

impl Heading {
    const VERTICAL: Heading = Heading::NORTH.union(Heading::SOUTH);
    const HORIZONTAL: Heading = Heading::WEST.union(Heading::EAST);

    /// Drop both keys of any opposite pair. The held mask itself is left
    /// untouched so releasing one key restores the other.
    pub fn cancel_opposites(self) -> Heading {
        let mut h = self;
        if h.contains(Self::VERTICAL) {
            h.remove(Self::VERTICAL);
        }
        if h.contains(Self::HORIZONTAL) {
            h.remove(Self::HORIZONTAL);
        }
        h
    }

    pub fn is_diagonal(self) -> bool {
        self.intersects(Self::VERTICAL) && self.intersects(Self::HORIZONTAL)
    }

    /// Unit direction in screen orientation (y grows downward).
    pub fn unit(self) -> Vec2 {
        let mut v = Vec2::zeros();
        if self.contains(Heading::NORTH) {
            v.y -= 1.0;
        }
        if self.contains(Heading::WEST) {
            v.x -= 1.0;
        }
        if self.contains(Heading::SOUTH) {
            v.y += 1.0;
        }
        if self.contains(Heading::EAST) {
            v.x += 1.0;
        }
        v
    }
}

pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    pub step: f32,
    pub diag_step: f32,
    pub heading: Heading,
}

impl Player {
    pub fn new(position: Vec2, radius: f32, step: f32) -> Self {
        Self {
            position,
            radius,
            step,
            diag_step: step / std::f32::consts::SQRT_2,
            heading: Heading::empty(),
        }
    }

    /// Displacement intended for this tick from the held keys.
    pub fn step_vector(&self) -> Vec2 {
        let h = self.heading.cancel_opposites();
        if h.is_empty() {
            return Vec2::zeros();
        }
        let speed = if h.is_diagonal() {
            self.diag_step
        } else {
            self.step
        };
        h.unit() * speed
    }
}

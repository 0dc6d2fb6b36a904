use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::Vec2;
use crate::renderer::Canvas;

/// Software surface of packed 0RGB pixels.
pub struct Framebuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
    /// Pixels of this color are skipped when the buffer is composited.
    pub color_key: Option<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
            color_key: None,
        }
    }

    pub fn with_color_key(width: usize, height: usize, key: u32) -> Self {
        let mut fb = Self::new(width, height);
        fb.color_key = Some(key);
        fb.pixels.fill(key);
        fb
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Inclusive range of rows whose pixel centers fall in [y_min, y_max].
    fn row_span(&self, y_min: f32, y_max: f32) -> Option<(usize, usize)> {
        let first = (y_min - 0.5).ceil().max(0.0);
        let last = (y_max - 0.5).floor().min(self.height as f32 - 1.0);
        if !(first <= last) {
            return None;
        }
        Some((first as usize, last as usize))
    }
}

/// Fill pixels whose centers lie in [x0, x1).
#[inline]
fn fill_span(row: &mut [u32], x0: f32, x1: f32, color: u32) {
    let start = (x0 - 0.5).ceil().max(0.0) as usize;
    let end = (x1 - 0.5).ceil().min(row.len() as f32).max(0.0) as usize;
    if start < end {
        row[start..end].fill(color);
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self, color: u32) {
        self.pixels.par_iter_mut().for_each(|p| *p = color);
    }

    /// Even-odd scanline fill sampled at pixel centers. Handles the
    /// self-intersecting quads the side faces can degenerate into.
    fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }
        let y_min = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let y_max = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let Some((first, last)) = self.row_span(y_min, y_max) else {
            return;
        };

        let w = self.width;
        let n = points.len();
        self.pixels[first * w..(last + 1) * w]
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(i, row)| {
                let sy = (first + i) as f32 + 0.5;
                let mut xs: Vec<f32> = Vec::with_capacity(n);
                for j in 0..n {
                    let a = points[j];
                    let b = points[(j + 1) % n];
                    if (a.y <= sy) != (b.y <= sy) {
                        xs.push(a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y));
                    }
                }
                xs.sort_by(|a, b| a.total_cmp(b));
                for pair in xs.chunks_exact(2) {
                    fill_span(row, pair[0], pair[1], color);
                }
            });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        if radius <= 0.0 {
            return;
        }
        let Some((first, last)) = self.row_span(center.y - radius, center.y + radius) else {
            return;
        };
        let r2 = radius * radius;
        let w = self.width;
        self.pixels[first * w..(last + 1) * w]
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(i, row)| {
                let dy = (first + i) as f32 + 0.5 - center.y;
                let half = (r2 - dy * dy).max(0.0).sqrt();
                fill_span(row, center.x - half, center.x + half, color);
            });
    }

    fn composite(&mut self, overlay: &Self, offset: [i32; 2]) {
        let key = overlay.color_key;
        let (ow, oh) = (overlay.width as i64, overlay.height as i64);
        let [ox, oy] = offset.map(i64::from);
        let w = self.width;

        self.pixels.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            let sy = y as i64 - oy;
            if sy < 0 || sy >= oh {
                return;
            }
            let src = &overlay.pixels[sy as usize * overlay.width..(sy as usize + 1) * overlay.width];
            for (x, dst) in row.iter_mut().enumerate() {
                let sx = x as i64 - ox;
                if sx < 0 || sx >= ow {
                    continue;
                }
                let c = src[sx as usize];
                if Some(c) != key {
                    *dst = c;
                }
            }
        });
    }
}

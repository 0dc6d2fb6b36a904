use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from window pixels to viewport pixels.
/// `None` marks the letterbox bars.
pub struct ScaleLut {
    src_x: Vec<Option<usize>>,
    src_y: Vec<Option<usize>>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

/// Uniform scale that fits `src` into `dst`, centered.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return ScaleLut {
            src_x: vec![None; dst_w],
            src_y: vec![None; dst_h],
        };
    }

    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let axis = |dst: usize, src: usize| -> Vec<Option<usize>> {
        let used = src as f32 * scale;
        let pad = 0.5 * (dst as f32 - used);
        (0..dst)
            .map(|d| {
                let s = ((d as f32 + 0.5 - pad) / scale).floor();
                (s >= 0.0 && s < src as f32).then_some(s as usize)
            })
            .collect()
    };

    ScaleLut {
        src_x: axis(dst_w, src_w),
        src_y: axis(dst_h, src_h),
    }
}

/// Nearest-neighbour stretch, rows in parallel.
pub fn blit_letterboxed(dst: &mut [u32], src: &[u32], sw: usize, lut: &ScaleLut, border: u32) {
    let dw = lut.src_x.len();
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(Some(sy)) = lut.src_y.get(y) else {
            dst_row.fill(border);
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (d, sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *d = match sx {
                Some(sx) => src_row[*sx],
                None => border,
            };
        }
    });
}

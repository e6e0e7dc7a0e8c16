use std::cmp;

use super::load_frames::NvFrame;

/// Order of chroma samples in the interleaved plane
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Layout {
    /// U before V
    Nv12,
    /// V before U
    Nv21,
}

impl Layout {
    /// Only `nv21` selects NV21, any other name falls back to NV12.
    pub fn from_name(name: &str) -> Self {
        match name {
            "nv21" => Layout::Nv21,
            _ => Layout::Nv12,
        }
    }

    /// Positions of U and V inside a chroma pair
    fn uv_pos(self) -> (usize, usize) {
        match self {
            Layout::Nv12 => (0, 1),
            Layout::Nv21 => (1, 0),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Nv12
    }
}

// BT.601 limited range coefficients in 20 bit fixed point
const CY: i32 = 1_220_542;
const CUB: i32 = 2_116_026;
const CUG: i32 = -409_993;
const CVG: i32 = -852_492;
const CVR: i32 = 1_673_527;
const SHIFT: u32 = 20;
const ROUND: i32 = 1 << (SHIFT - 1);

fn saturate(v: i32) -> u8 {
    (v >> SHIFT).max(0).min(255) as u8
}

/// Chroma contribution shared by a 2x2 luma block
#[derive(Copy, Clone)]
struct Chroma {
    r: i32,
    g: i32,
    b: i32,
}

impl Chroma {
    fn new(u: u8, v: u8) -> Self {
        let u = u as i32 - 128;
        let v = v as i32 - 128;
        Self {
            r: ROUND + CVR*v,
            g: ROUND + CVG*v + CUG*u,
            b: ROUND + CUB*u,
        }
    }

    fn apply(self, y: u8, dst: &mut [u8]) {
        let y = cmp::max(y as i32 - 16, 0)*CY;
        dst[0] = saturate(y + self.r);
        dst[1] = saturate(y + self.g);
        dst[2] = saturate(y + self.b);
    }
}

/// Converts a single YUV sample to RGB
pub fn yuv2rgb_pixel(y: u8, u: u8, v: u8) -> [u8; 3] {
    let mut rgb = [0u8; 3];
    Chroma::new(u, v).apply(y, &mut rgb);
    rgb
}

/// Converts NV12/NV21 frame to packed 8-bit RGB
pub fn nv2rgb(src: &NvFrame, layout: Layout, dst: &mut [u8]) {
    let (width, height) = (src.width(), src.height());
    assert_eq!(dst.len(), 3*width*height);
    let (u_pos, v_pos) = layout.uv_pos();

    for (y, row) in dst.chunks_exact_mut(3*width).enumerate() {
        let luma = src.luma_row(y).chunks_exact(2);
        let chroma = src.chroma_row(y).chunks_exact(2);
        for ((lum, uv), pix) in luma.zip(chroma).zip(row.chunks_exact_mut(6)) {
            let c = Chroma::new(uv[u_pos], uv[v_pos]);
            c.apply(lum[0], &mut pix[..3]);
            c.apply(lum[1], &mut pix[3..]);
        }
    }
}

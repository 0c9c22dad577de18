//! Premultiplied RGBA8 blending primitives.

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

/// Overlap of a `w x h` layer placed at `(x, y)` with a `dst_w x dst_h` surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub src_x: u32,
    pub src_y: u32,
    pub dst_x: u32,
    pub dst_y: u32,
    pub cols: u32,
    pub rows: u32,
}

/// `None` when the layer lies entirely off the surface.
pub fn clip_rect(dst_w: u32, dst_h: u32, w: u32, h: u32, x: i64, y: i64) -> Option<ClipRect> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(w)).min(i64::from(dst_w));
    let y1 = (y + i64::from(h)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(ClipRect {
        src_x: (x0 - x) as u32,
        src_y: (y0 - y) as u32,
        dst_x: x0 as u32,
        dst_y: y0 as u32,
        cols: (x1 - x0) as u32,
        rows: (y1 - y0) as u32,
    })
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

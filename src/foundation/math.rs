pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Source-over blend of a straight-alpha RGBA8 color onto an opaque RGBA8 pixel.
pub(crate) fn blend_straight_over_opaque(dst: &mut [u8], src: [u8; 4]) {
    let a = u16::from(src[3]);
    if a == 0 {
        return;
    }
    let inv = 255 - a;
    for c in 0..3 {
        let v = mul_div255_u16(u16::from(src[c]), a) + mul_div255_u16(u16::from(dst[c]), inv);
        dst[c] = v.min(255) as u8;
    }
    dst[3] = 255;
}

/// Source-over blend of a premultiplied RGBA8 pixel onto an opaque RGBA8 pixel.
pub(crate) fn blend_premul_over_opaque(dst: &mut [u8], src: &[u8]) {
    let a = u16::from(src[3]);
    if a == 0 {
        return;
    }
    let inv = 255 - a;
    for c in 0..3 {
        let v = u16::from(src[c]) + mul_div255_u16(u16::from(dst[c]), inv);
        dst[c] = v.min(255) as u8;
    }
    dst[3] = 255;
}

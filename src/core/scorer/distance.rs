//! Per-pixel colour distance over two equally sized RGBA grids.

/// Largest possible RGB distance, `sqrt(3 * 255^2)`
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// Euclidean distance between two pixels in RGB space. Alpha is ignored.
pub fn color_distance(a: &[u8], b: &[u8]) -> f64 {
    (squared_distance(a, b) as f64).sqrt()
}

fn squared_distance(a: &[u8], b: &[u8]) -> u32 {
    a[..3]
        .iter()
        .zip(&b[..3])
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Count positions where the two grids' colours are closer than `threshold`.
///
/// Both buffers are RGBA and must have the same length.
pub fn count_matching_pixels(a: &[u8], b: &[u8], threshold: f64) -> u64 {
    debug_assert_eq!(a.len(), b.len());

    // d < t  <=>  d^2 < t^2 for non-negative values; avoids a sqrt per pixel
    let threshold_sq = threshold * threshold;
    a.chunks_exact(4)
        .zip(b.chunks_exact(4))
        .filter(|(pa, pb)| (squared_distance(pa, pb) as f64) < threshold_sq)
        .count() as u64
}

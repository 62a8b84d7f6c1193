/// Maps a rotation in degrees onto `[0, 360)`.
pub fn normalize_degrees(rotation: f64) -> f64 {
    let normalized = ((rotation % 360.0) + 360.0) % 360.0;
    // -0.0 and rounding up to exactly 360.0 both collapse to 0
    if normalized >= 360.0 || normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}

/// Index of the segment the animation is currently over, counted in the
/// direction the wheel turns.
pub fn segment_at(rotation: f64, entry_count: usize) -> usize {
    assert!(entry_count > 0, "segment_at requires at least one entry");
    let degrees_per_segment = 360.0 / entry_count as f64;
    let segment = (normalize_degrees(rotation) / degrees_per_segment).floor() as usize;
    segment.min(entry_count - 1)
}

/// Index of the entry that sits under the fixed pointer at 12 o'clock once the
/// wheel has turned `rotation` degrees clockwise.
///
/// Segments are laid out clockwise from the top in index order and the wheel
/// turns clockwise, so the winner walks backwards through the indices.
///
/// # Panics
///
/// Panics if `entry_count` is zero.
pub fn resolve(rotation: f64, entry_count: usize) -> usize {
    assert!(entry_count > 0, "resolve requires at least one entry");
    let n = entry_count as f64;
    let segments_rotated = normalize_degrees(rotation) / (360.0 / n);
    let winner = (n - segments_rotated).floor() as i64;
    winner.rem_euclid(entry_count as i64) as usize
}

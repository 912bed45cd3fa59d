//! Tests for transparency profiles, discontinuity detection and the grid hint

#[cfg(test)]
mod tests {
    use spritegrid::analysis::transparency::{
        find_discontinuities, horizontal_profile, profile_transparency, vertical_profile,
    };
    use spritegrid::raster::buffer::PixelBuffer;
    use spritegrid::raster::region::GridCandidate;

    // Two opaque 4x4 blocks separated by a transparent 2 px column gap
    fn two_blocks() -> PixelBuffer {
        PixelBuffer::from_fn(10, 4, |x, _| {
            let alpha = if (4..6).contains(&x) { 0 } else { 255 };
            [10, 10, 10, alpha]
        })
        .unwrap()
    }

    // Tests profiles are per column and per row
    // Verified by swapping the reduction axes
    #[test]
    fn test_profiles_axes() {
        let buffer = two_blocks();
        let horizontal = horizontal_profile(&buffer);
        let vertical = vertical_profile(&buffer);

        assert_eq!(horizontal.len(), 10);
        assert_eq!(vertical.len(), 4);
        assert!(horizontal[0].abs() < f64::EPSILON);
        assert!((horizontal[4] - 1.0).abs() < f64::EPSILON);
        assert!((vertical[0] - 0.2).abs() < 1e-12);
    }

    // Tests only jumps strictly above the threshold are reported
    // Verified by reporting the index before the jump
    #[test]
    fn test_find_discontinuities() {
        let profile = [0.0, 0.0, 1.0, 1.0, 0.8, 0.0];
        assert_eq!(find_discontinuities(&profile, 0.3), vec![2, 5]);
        assert_eq!(find_discontinuities(&profile, 0.1), vec![2, 4, 5]);
        assert!(find_discontinuities(&[], 0.3).is_empty());
        assert!(find_discontinuities(&[0.5], 0.3).is_empty());
    }

    // Tests the suggested grid counts breaks plus one on each axis
    // Verified by omitting the +1
    #[test]
    fn test_suggested_grid() {
        let profile = profile_transparency(&two_blocks(), 0.3);

        assert_eq!(profile.column_breaks, vec![4, 6]);
        assert!(profile.row_breaks.is_empty());
        assert_eq!(profile.suggested_grid(), (3, 1));
        assert_eq!(
            profile.suggested_candidate(),
            Some(GridCandidate::new(3, 1).unwrap())
        );
    }

    // Tests semi-transparent pixels don't count as transparent
    // Verified by treating alpha < 255 as transparent
    #[test]
    fn test_semi_transparent_not_counted() {
        let buffer = PixelBuffer::from_fn(3, 3, |_, _| [0, 0, 0, 1]).unwrap();
        let profile = profile_transparency(&buffer, 0.3);
        assert!(profile.horizontal.iter().all(|v| v.abs() < f64::EPSILON));
        assert_eq!(profile.suggested_grid(), (1, 1));
    }
}

//! Tests for the structure score, feature scores and the decision ladder

#[cfg(test)]
mod tests {
    use spritegrid::inference::classifier::{
        ContentType, LadderThresholds, classify_cell, classify_cells, decide, feature_scores,
        structure_score,
    };
    use spritegrid::io::configuration::AnalysisConfig;
    use spritegrid::raster::buffer::PixelBuffer;
    use spritegrid::raster::mask::ContentMask;
    use spritegrid::raster::region::{GridCandidate, Region};

    fn uniform(width: u32, height: u32, pixel: [u8; 4]) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |_, _| pixel).unwrap()
    }

    // Tests a solid block has full structure and a top-heavy one half
    // Verified by scanning all rows instead of the middle half
    #[test]
    fn test_structure_score() {
        let solid = uniform(8, 8, [0, 0, 0, 255]);
        let mask = ContentMask::from_region(&solid, &solid.bounds(), 0);
        assert!((structure_score(&mask, 0.6) - 1.0).abs() < f64::EPSILON);

        let top = PixelBuffer::from_fn(8, 8, |_, y| [0, 0, 0, if y < 4 { 255 } else { 0 }]).unwrap();
        let mask = ContentMask::from_region(&top, &top.bounds(), 0);
        assert!((structure_score(&mask, 0.6) - 0.5).abs() < f64::EPSILON);
    }

    // Tests masks too short for a middle half score zero
    // Verified by dividing by h/2 without a guard
    #[test]
    fn test_structure_score_short_mask() {
        let line = uniform(8, 1, [0, 0, 0, 255]);
        let mask = ContentMask::from_region(&line, &line.bounds(), 0);
        assert!(structure_score(&mask, 0.6).abs() < f64::EPSILON);
    }

    // Tests low coverage is Empty whatever the feature scores
    // Verified by checking desk before coverage
    #[test]
    fn test_decide_empty_first() {
        let ladder = LadderThresholds::default();
        assert_eq!(decide(0.05, 1.0, 1.0, &ladder), ContentType::Empty);
        assert_eq!(decide(0.1, 1.0, 1.0, &ladder), ContentType::Empty);
    }

    // Tests each rung of the ladder in order
    // Verified by swapping the furniture and character rungs
    #[test]
    fn test_decide_ladder_order() {
        let ladder = LadderThresholds::default();
        assert_eq!(decide(0.5, 0.5, 0.0, &ladder), ContentType::Furniture);
        assert_eq!(
            decide(0.5, 0.35, 0.25, &ladder),
            ContentType::FurnitureWithCharacter
        );
        assert_eq!(decide(0.5, 0.3, 0.5, &ladder), ContentType::Character);
        assert_eq!(decide(0.5, 0.2, 0.2, &ladder), ContentType::Mixed);
        assert_eq!(decide(0.5, 0.05, 0.0, &ladder), ContentType::Unknown);
    }

    // Tests uniform gray reads as metal with full structure and no character
    // Verified by weighting metal with the wood weight
    #[test]
    fn test_feature_scores_gray() {
        let buffer = uniform(10, 10, [128, 128, 128, 255]);
        let config = AnalysisConfig::default();
        let scores = feature_scores(&buffer, &buffer.bounds(), &config);

        assert!((scores.metal - 1.0).abs() < f64::EPSILON);
        assert!(scores.wood.abs() < f64::EPSILON);
        assert!((scores.structure - 1.0).abs() < f64::EPSILON);
        assert!((scores.desk - 0.6).abs() < 1e-12);
        assert!(scores.character.abs() < f64::EPSILON);
    }

    // Tests transparent pixels are excluded from color fractions
    // Verified by sampling every pixel regardless of alpha
    #[test]
    fn test_feature_scores_ignore_transparent() {
        let buffer = PixelBuffer::from_fn(10, 10, |x, _| {
            if x < 5 {
                [220, 170, 130, 255]
            } else {
                [128, 128, 128, 0]
            }
        })
        .unwrap();
        let scores = feature_scores(&buffer, &buffer.bounds(), &AnalysisConfig::default());

        assert!((scores.skin - 1.0).abs() < f64::EPSILON);
        assert!(scores.metal.abs() < f64::EPSILON);
    }

    // Tests a single cell record carries its grid position
    // Verified by computing the row from the column count
    #[test]
    fn test_classify_cell_position() {
        let buffer = uniform(30, 20, [128, 128, 128, 255]);
        let candidate = GridCandidate::new(3, 2).unwrap();
        let region = Region::new(20, 10, 30, 20).unwrap();
        let record = classify_cell(&buffer, &candidate, 5, region, &AnalysisConfig::default());

        assert_eq!((record.index, record.col, record.row), (5, 2, 1));
        assert_eq!(record.region, region);
        assert_eq!(record.content, ContentType::Furniture);
    }

    // Tests a 1x1 grid yields one record spanning the image
    // Verified by returning cells for the remainder strip
    #[test]
    fn test_classify_cells_single() {
        let buffer = uniform(17, 9, [0, 0, 0, 0]);
        let candidate = GridCandidate::new(1, 1).unwrap();
        let records = classify_cells(&buffer, &candidate, &AnalysisConfig::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, buffer.bounds());
        assert_eq!(records[0].content, ContentType::Empty);
    }

    // Tests records come back in row-major order
    // Verified by collecting from an unordered parallel iterator
    #[test]
    fn test_classify_cells_ordered() {
        let buffer = uniform(40, 30, [0, 0, 0, 255]);
        let candidate = GridCandidate::new(4, 3).unwrap();
        let records = classify_cells(&buffer, &candidate, &AnalysisConfig::default()).unwrap();

        assert_eq!(records.len(), 12);
        for (expected, record) in records.iter().enumerate() {
            assert_eq!(record.index, expected);
        }
        assert_eq!((records[7].col, records[7].row), (3, 1));
    }

    // Tests grids finer than the image are reported, not silently empty
    // Verified by returning an empty record list
    #[test]
    fn test_classify_cells_too_fine() {
        let buffer = uniform(4, 4, [0, 0, 0, 255]);
        let candidate = GridCandidate::new(5, 1).unwrap();
        assert!(classify_cells(&buffer, &candidate, &AnalysisConfig::default()).is_err());
    }

    // Tests verdict flags and labels
    // Verified by counting Mixed as furniture
    #[test]
    fn test_content_type_flags() {
        assert!(ContentType::FurnitureWithCharacter.has_furniture());
        assert!(ContentType::FurnitureWithCharacter.has_character());
        assert!(!ContentType::Mixed.has_furniture());
        assert!(!ContentType::Furniture.has_character());
        assert_eq!(ContentType::ALL.len(), 6);
        assert_eq!(
            ContentType::FurnitureWithCharacter.to_string(),
            "furniture+character"
        );
    }
}

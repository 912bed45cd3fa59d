//! Tests for texture-atlas frame layout and serialization

#[cfg(test)]
mod tests {
    use spritegrid::io::atlas::build_atlas;
    use spritegrid::raster::region::GridCandidate;

    // Tests one frame per cell keyed by row-major index
    // Verified by keying frames column-major
    #[test]
    fn test_build_atlas_frames() {
        let grid = GridCandidate::new(3, 2).unwrap();
        let atlas = build_atlas("sheet.png", 96, 64, &grid).unwrap();

        assert_eq!(atlas.textures.len(), 1);
        let texture = &atlas.textures[0];
        assert_eq!(texture.image, "sheet.png");
        assert_eq!((texture.size.w, texture.size.h), (96, 64));
        assert_eq!(texture.frames.len(), 6);

        let frame = &texture.frames["frame_004"];
        assert_eq!((frame.frame.x, frame.frame.y), (32, 32));
        assert_eq!((frame.frame.w, frame.frame.h), (32, 32));
        assert_eq!((frame.source_size.w, frame.source_size.h), (32, 32));
        assert!(!frame.rotated && !frame.trimmed);
    }

    // Tests frame keys use camelCase field names in JSON
    // Verified by removing the serde rename
    #[test]
    fn test_atlas_json_shape() {
        let grid = GridCandidate::new(1, 1).unwrap();
        let atlas = build_atlas("a.png", 16, 16, &grid).unwrap();
        let json = serde_json::to_value(&atlas).unwrap();

        let frame = &json["textures"][0]["frames"]["frame_000"];
        assert_eq!(frame["spriteSourceSize"]["w"], 16);
        assert_eq!(frame["sourceSize"]["h"], 16);
        assert_eq!(json["textures"][0]["format"], "RGBA8888");
    }

    // Tests grids finer than the sheet can't be described
    // Verified by emitting zero-sized frames
    #[test]
    fn test_build_atlas_too_fine() {
        let grid = GridCandidate::new(20, 1).unwrap();
        assert!(build_atlas("a.png", 10, 10, &grid).is_err());
    }
}

//! Tests for report assembly and the report sinks

#[cfg(test)]
mod tests {
    use spritegrid::inference::pipeline::{GridChoice, analyze_sheet};
    use spritegrid::io::configuration::AnalysisConfig;
    use spritegrid::io::report::{JsonFileSink, ResultSink, SheetReport, write_json};
    use spritegrid::raster::buffer::PixelBuffer;
    use spritegrid::raster::region::GridCandidate;
    use std::fs;
    use tempfile::TempDir;

    fn report_for(buffer: &PixelBuffer, choice: GridChoice) -> SheetReport {
        let candidates = vec![GridCandidate::new(2, 1).unwrap()];
        let analysis =
            analyze_sheet(buffer, candidates, choice, &AnalysisConfig::default()).unwrap();
        SheetReport::from_analysis("sheet.png", buffer.width(), buffer.height(), analysis)
    }

    fn left_block() -> PixelBuffer {
        PixelBuffer::from_fn(20, 10, |x, _| [90, 90, 90, if x < 10 { 255 } else { 0 }]).unwrap()
    }

    // Tests a searched sheet reports its ranking and cells
    // Verified by flagging searched grids as forced
    #[test]
    fn test_report_from_search() {
        let report = report_for(&left_block(), GridChoice::Search);

        assert_eq!(report.source, "sheet.png");
        assert_eq!((report.width, report.height), (20, 10));
        assert!(!report.forced_grid);
        assert!(!report.undetermined);
        assert!(!report.ranking.is_empty());
        assert_eq!(report.cells.len(), 2);
        assert_eq!(report.transparency.column_breaks, vec![10]);
        assert_eq!(report.transparency.suggested_grid, (2, 1));
    }

    // Tests forced and undetermined sheets are distinguished
    // Verified by deriving undetermined from an empty ranking
    #[test]
    fn test_report_forced_and_undetermined() {
        let forced = report_for(
            &left_block(),
            GridChoice::Forced(GridCandidate::new(1, 1).unwrap()),
        );
        assert!(forced.forced_grid);
        assert!(!forced.undetermined);
        assert!(forced.ranking.is_empty());

        let blank = PixelBuffer::from_fn(20, 10, |_, _| [0, 0, 0, 0]).unwrap();
        let undetermined = report_for(&blank, GridChoice::Search);
        assert!(undetermined.undetermined);
        assert!(undetermined.grid.is_none());
        assert!(undetermined.cells.is_empty());
    }

    // Tests the file sink writes parseable JSON with the expected keys
    // Verified by writing Debug output instead of JSON
    #[test]
    fn test_json_file_sink() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sheet_analysis.json");
        let mut sink = JsonFileSink::new(path.clone());
        assert_eq!(sink.path(), path.as_path());

        sink.accept(&report_for(&left_block(), GridChoice::Search)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["width"], 20);
        assert_eq!(json["grid"]["cols"], 2);
        assert_eq!(json["cells"][0]["content"], "furniture");
        assert_eq!(json["summary"]["content_cells"], 1);
        assert_eq!(json["cutout_background"], true);
    }

    // Tests the cutout flag follows the share of fully transparent pixels
    // Verified by reading the flag from the opaque fraction
    #[test]
    fn test_report_cutout_background() {
        assert!(report_for(&left_block(), GridChoice::Search).cutout_background);

        let opaque = PixelBuffer::from_fn(20, 10, |_, _| [90, 90, 90, 255]).unwrap();
        assert!(!report_for(&opaque, GridChoice::Search).cutout_background);
    }

    // Tests writing into an unwritable location fails cleanly
    // Verified by ignoring the write result
    #[test]
    fn test_write_json_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        assert!(write_json(&blocker.join("report.json"), &1).is_err());
    }
}

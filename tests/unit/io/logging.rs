//! Tests for log level selection and subscriber installation

#[cfg(test)]
mod tests {
    use spritegrid::io::logging::{init_logging, log_level};
    use tracing::Level;

    // Tests quiet lowers and verbose raises the level, quiet winning
    // Verified by checking verbose first
    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), Level::INFO);
        assert_eq!(log_level(true, false), Level::WARN);
        assert_eq!(log_level(false, true), Level::DEBUG);
        assert_eq!(log_level(true, true), Level::WARN);
    }

    // Tests a second installation is refused rather than panicking
    // Verified by using init instead of try_init
    #[test]
    fn test_init_logging_once() {
        init_logging(Level::WARN);
        assert!(!init_logging(Level::DEBUG));
    }
}

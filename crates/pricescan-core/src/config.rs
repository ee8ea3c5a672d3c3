use std::path::PathBuf;

/// Directory results are written to unless overridden.
pub const DEFAULT_OUTPUT_DIR: &str = "output_data";

/// Settings for one directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub input_dir: PathBuf,
    /// Maximum number of source files to process; zero yields an empty run.
    pub limit: usize,
    pub output_dir: PathBuf,
    /// Fixed seed for reproducible window draws; entropy when `None`.
    pub seed: Option<u64>,
}

impl ScanConfig {
    pub fn new(input_dir: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            input_dir: input_dir.into(),
            limit,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            seed: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_output_data_dir() {
        let config = ScanConfig::new("prices", 3);
        assert_eq!(config.output_dir, PathBuf::from("output_data"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn accepts_zero_limit() {
        assert_eq!(ScanConfig::new("prices", 0).limit, 0);
    }

    #[test]
    fn builder_overrides() {
        let config = ScanConfig::new("prices", 1)
            .with_output_dir("out")
            .with_seed(Some(9));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.seed, Some(9));
    }
}

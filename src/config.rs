//! Run configuration for the test runner

use clap::ValueEnum;

/// How a finished run is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree with a summary line
    #[default]
    Console,
    /// One JSON document
    Json,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Show passing outcomes and their notes
    pub verbose: bool,
    /// Treat tests that recorded no outcome as failures
    pub strict: bool,
    /// Style console output with ANSI colors
    pub color: bool,
    /// Keep only tests (or groups) whose name contains this keyword
    pub filter: Option<String>,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            strict: false,
            color: true,
            filter: None,
            format: OutputFormat::Console,
        }
    }
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set the keyword filter; an empty keyword clears it
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.filter = (!keyword.is_empty()).then_some(keyword);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

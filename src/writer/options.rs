//! Conversion options.

/// What to do when two worksheets resolve to the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateSheetPolicy {
    /// The later worksheet replaces the earlier one, keeping its position
    #[default]
    LastWins,
    /// Fail the conversion
    Error,
}

/// What to do when a header row repeats a non-blank column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateHeaderPolicy {
    /// Write the repeated names as they are
    #[default]
    Keep,
    /// Fail the conversion
    Error,
}

/// Options for converting a workbook.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Handling of repeated worksheet names
    pub duplicate_sheets: DuplicateSheetPolicy,

    /// Handling of repeated header names
    pub duplicate_headers: DuplicateHeaderPolicy,

    /// Style the header row (bold, thin border, centred)
    pub bold_headers: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            duplicate_sheets: DuplicateSheetPolicy::LastWins,
            duplicate_headers: DuplicateHeaderPolicy::Keep,
            bold_headers: true,
        }
    }
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate worksheet name policy.
    pub fn with_duplicate_sheets(mut self, policy: DuplicateSheetPolicy) -> Self {
        self.duplicate_sheets = policy;
        self
    }

    /// Set the duplicate header policy.
    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.duplicate_headers = policy;
        self
    }

    /// Enable or disable bold header rows.
    pub fn with_bold_headers(mut self, enabled: bool) -> Self {
        self.bold_headers = enabled;
        self
    }

    /// Reject duplicate sheet names and duplicate headers.
    pub fn strict() -> Self {
        Self::default()
            .with_duplicate_sheets(DuplicateSheetPolicy::Error)
            .with_duplicate_headers(DuplicateHeaderPolicy::Error)
    }
}

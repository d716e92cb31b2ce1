//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including raw probe output.
    Verbose,
    /// Show per-entry progress and the summary.
    #[default]
    Normal,
    /// Show the summary and remediation only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows raw probe output.
    pub fn shows_probe_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows a progress line per entry.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

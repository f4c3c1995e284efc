use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lcm::LcmFile;

/// Part of an LCM file a check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Signature, version, identifiers and counts
    Header,
    /// Fixed-size peak records
    PeakTable,
    /// Point count, span and trace points
    Trace,
    /// End marker and anything after it
    Footer,
}

impl Section {
    /// Sections in file order
    pub const ALL: [Section; 4] = [
        Section::Header,
        Section::PeakTable,
        Section::Trace,
        Section::Footer,
    ];

    fn title(self) -> &'static str {
        match self {
            Section::Header => "Header",
            Section::PeakTable => "Peak table",
            Section::Trace => "Trace",
            Section::Footer => "Footer",
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Readable, but not what this crate writes
    Warning(String),
    /// The file cannot be trusted
    Failed(String),
}

impl CheckStatus {
    /// Whether the check passed without remarks
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    /// Whether the check produced a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    /// Whether the check failed
    pub fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// One check, located in the file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheck {
    /// Section the check belongs to
    pub section: Section,
    /// Short name, unique within a report
    pub name: String,
    /// Result
    pub status: CheckStatus,
    /// Byte offset of the offending field, when one can be named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl ValidationCheck {
    pub(crate) fn ok(section: Section, name: impl Into<String>) -> Self {
        Self::with_status(section, name, CheckStatus::Ok)
    }

    pub(crate) fn warning(
        section: Section,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_status(section, name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(
        section: Section,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_status(section, name, CheckStatus::Failed(message.into()))
    }

    fn with_status(section: Section, name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            section,
            name: name.into(),
            status,
            offset: None,
        }
    }

    /// Attach the byte offset the check refers to
    pub(crate) fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// What the file says about itself, once it decodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LcmSummary {
    /// Format version
    pub version: u16,
    /// Stored sample identifier
    pub sample_id: String,
    /// Stored sample name
    pub sample_name: String,
    /// Stored analysis time
    pub analysis_date: Option<DateTime<Utc>>,
    /// Number of peak records
    pub peak_count: usize,
    /// Number of trace points
    pub trace_points: usize,
    /// Trace span in minutes
    pub trace_span: f32,
    /// Bytes up to and including the footer
    pub file_len: usize,
}

impl LcmSummary {
    pub(crate) fn new(file: &LcmFile, file_len: usize) -> Self {
        Self {
            version: file.version,
            sample_id: file.sample_id.clone(),
            sample_name: file.sample_name.clone(),
            analysis_date: file.analysis_date(),
            peak_count: file.peaks.len(),
            trace_points: file.trace.len(),
            trace_span: file.trace.max_time,
            file_len,
        }
    }
}

/// Check totals by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckCounts {
    /// Passed checks
    pub passed: usize,
    /// Warnings
    pub warnings: usize,
    /// Failed checks
    pub failed: usize,
}

/// Findings for one LCM file, in file order
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Path or label of the validated data
    pub source: String,
    /// Decoded header and sizes; absent when the file does not decode
    pub summary: Option<LcmSummary>,
    /// Every check that ran
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Empty report for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            summary: None,
            checks: Vec::new(),
        }
    }

    pub(crate) fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Whether no check failed
    pub fn is_valid(&self) -> bool {
        !self.has_failures()
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Checks of one section
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(move |c| c.section == section)
    }

    /// Earliest failed check in the file
    pub fn first_failure(&self) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.status.is_failed())
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Whether any check warned
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    /// Totals by outcome
    pub fn counts(&self) -> CheckCounts {
        self.checks.iter().fold(CheckCounts::default(), |mut counts, c| {
            match c.status {
                CheckStatus::Ok => counts.passed += 1,
                CheckStatus::Warning(_) => counts.warnings += 1,
                CheckStatus::Failed(_) => counts.failed += 1,
            }
            counts
        })
    }

    /// Machine-readable form of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Report text with the outcome of each check colored
    #[cfg(feature = "colorized_output")]
    pub fn format_colored(&self) -> String {
        use console::style;

        let mut out = String::new();
        self.write_text(&mut out, |tone, text| match tone {
            Tone::Heading => style(text).bold().cyan().to_string(),
            Tone::Pass => style(text).green().to_string(),
            Tone::Warn => style(text).yellow().bold().to_string(),
            Tone::Fail => style(text).red().bold().to_string(),
        });
        out
    }

    fn write_text(&self, out: &mut String, paint: impl Fn(Tone, &str) -> String) {
        out.push_str(&paint(Tone::Heading, &format!("LCM validation: {}", self.source)));
        out.push('\n');

        if let Some(summary) = &self.summary {
            out.push_str(&format!(
                "Sample {} \"{}\" (v{}), {} peaks, {} trace points over {:.3} min, {} bytes\n",
                summary.sample_id,
                summary.sample_name,
                summary.version,
                summary.peak_count,
                summary.trace_points,
                summary.trace_span,
                summary.file_len
            ));
        }

        for section in Section::ALL {
            let mut checks = self.section(section).peekable();
            if checks.peek().is_none() {
                continue;
            }
            out.push('\n');
            out.push_str(&paint(Tone::Heading, section.title()));
            out.push('\n');
            for check in checks {
                let location = check
                    .offset
                    .map(|o| format!(" @ 0x{:04X}", o))
                    .unwrap_or_default();
                let line = match &check.status {
                    CheckStatus::Ok => paint(Tone::Pass, &format!("  ok    {}", check.name)),
                    CheckStatus::Warning(msg) => paint(
                        Tone::Warn,
                        &format!("  warn  {}{}: {}", check.name, location, msg),
                    ),
                    CheckStatus::Failed(msg) => paint(
                        Tone::Fail,
                        &format!("  FAIL  {}{}: {}", check.name, location, msg),
                    ),
                };
                out.push_str(&line);
                out.push('\n');
            }
        }

        let counts = self.counts();
        let verdict = if self.has_failures() {
            paint(Tone::Fail, "INVALID")
        } else if self.has_warnings() {
            paint(Tone::Warn, "VALID with warnings")
        } else {
            paint(Tone::Pass, "VALID")
        };
        out.push_str(&format!(
            "\nResult: {} ({} passed, {} warnings, {} failed)\n",
            verdict, counts.passed, counts.warnings, counts.failed
        ));
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_text(&mut out, |_, text| text.to_string());
        f.write_str(&out)
    }
}

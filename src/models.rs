//! Core data models for vapt-chart
//!
//! Severity levels, the per-severity totals produced by the aggregator,
//! and the fixed color palette every renderer draws from.

use serde::{Deserialize, Serialize};

/// Severity levels tracked by a VAPT report, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All levels in the fixed order Critical, High, Medium, Low
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Capitalized label used in legends and tables
    pub fn label(&self) -> &'static str {
        self.style().label
    }

    /// Palette entry for this level
    pub fn style(&self) -> &'static SeverityStyle {
        &SEVERITY_PALETTE[*self as usize]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// `#RRGGBB` form for HTML/SVG output
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fill and text color for one severity level
#[derive(Debug)]
pub struct SeverityStyle {
    pub severity: Severity,
    pub label: &'static str,
    pub fill: Rgb,
    pub text: Rgb,
}

/// Severity palette, indexed by `Severity as usize`
pub static SEVERITY_PALETTE: [SeverityStyle; 4] = [
    SeverityStyle {
        severity: Severity::Critical,
        label: "Critical",
        fill: Rgb(0xC0, 0x00, 0x00), // deep red
        text: Rgb::WHITE,
    },
    SeverityStyle {
        severity: Severity::High,
        label: "High",
        fill: Rgb(0xFF, 0x00, 0x00), // bright red
        text: Rgb::WHITE,
    },
    SeverityStyle {
        severity: Severity::Medium,
        label: "Medium",
        fill: Rgb(0xFF, 0xC0, 0x00), // amber
        text: Rgb::BLACK,
    },
    SeverityStyle {
        severity: Severity::Low,
        label: "Low",
        fill: Rgb(0x92, 0xD0, 0x50), // light green
        text: Rgb::BLACK,
    },
];

/// Table header row: white bold text on black
pub const HEADER_FILL: Rgb = Rgb::BLACK;
pub const HEADER_TEXT: Rgb = Rgb::WHITE;

/// Totals per severity level for one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl SeverityCounts {
    pub fn new(critical: u64, high: u64, medium: u64, low: u64) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
        }
    }

    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Counts in the fixed order Critical, High, Medium, Low
    pub fn as_array(&self) -> [u64; 4] {
        [self.critical, self.high, self.medium, self.low]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, u64)> + '_ {
        Severity::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Sum of all four levels (saturating)
    pub fn total(&self) -> u64 {
        self.as_array()
            .iter()
            .fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    /// True when every level is zero
    pub fn is_empty(&self) -> bool {
        self.as_array().iter().all(|&n| n == 0)
    }

    /// Element-wise saturating addition
    pub fn saturating_add(self, other: SeverityCounts) -> SeverityCounts {
        SeverityCounts {
            critical: self.critical.saturating_add(other.critical),
            high: self.high.saturating_add(other.high),
            medium: self.medium.saturating_add(other.medium),
            low: self.low.saturating_add(other.low),
        }
    }
}

impl std::fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "critical={} high={} medium={} low={}",
            self.critical, self.high, self.medium, self.low
        )
    }
}

use serde::{Deserialize, Serialize};

const HOUR: f64 = 60.0 * 60.0;
const DAY: f64 = 24.0 * HOUR;
/// Months are counted as 31 days throughout.
const MONTH: f64 = 31.0 * DAY;

/// Change failure rates at or below this ratio are Elite; anything above is Low.
const ELITE_FAILURE_RATE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Elite,
    High,
    Medium,
    Low,
    NotApplicable,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Elite => "Elite",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::NotApplicable => "N/A",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    LeadTime,
    DeploymentFrequency,
    ChangeFailureRate,
    TimeToRestoreService,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Hours,
    Days,
    Months,
}

impl Unit {
    fn seconds(self) -> f64 {
        match self {
            Self::Hours => HOUR,
            Self::Days => DAY,
            Self::Months => MONTH,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Months => "months",
        }
    }
}

/// A tier applies to values strictly below `below`.
struct Band {
    below: f64,
    tier: Tier,
    unit: Unit,
}

const LEAD_TIME_BANDS: &[Band] = &[
    Band {
        below: HOUR,
        tier: Tier::Elite,
        unit: Unit::Hours,
    },
    Band {
        below: 7.0 * DAY,
        tier: Tier::High,
        unit: Unit::Days,
    },
    Band {
        below: 6.0 * MONTH,
        tier: Tier::Medium,
        unit: Unit::Months,
    },
];

const DEPLOYMENT_FREQUENCY_BANDS: &[Band] = &[
    Band {
        below: 12.0 * HOUR,
        tier: Tier::Elite,
        unit: Unit::Hours,
    },
    Band {
        below: 31.0 * DAY,
        tier: Tier::High,
        unit: Unit::Days,
    },
    Band {
        below: 6.0 * MONTH,
        tier: Tier::Medium,
        unit: Unit::Months,
    },
];

const RESTORE_TIME_BANDS: &[Band] = &[
    Band {
        below: HOUR,
        tier: Tier::Elite,
        unit: Unit::Hours,
    },
    Band {
        below: DAY,
        tier: Tier::High,
        unit: Unit::Hours,
    },
    Band {
        below: 7.0 * DAY,
        tier: Tier::Medium,
        unit: Unit::Days,
    },
];

impl MetricKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::LeadTime => "Change lead time",
            Self::DeploymentFrequency => "Deployment frequency",
            Self::ChangeFailureRate => "Change failure rate",
            Self::TimeToRestoreService => "Time to restore service",
        }
    }

    fn missing_reason(self) -> &'static str {
        match self {
            Self::LeadTime => "no deployments or commits",
            Self::DeploymentFrequency | Self::ChangeFailureRate => "no deployments found",
            Self::TimeToRestoreService => "no issues or deployments found",
        }
    }

    fn measured_between(self) -> &'static str {
        match self {
            Self::LeadTime => "between commit and deploy",
            Self::DeploymentFrequency => "between deployments",
            Self::ChangeFailureRate => "",
            Self::TimeToRestoreService => "between issue opened and deployment",
        }
    }

    /// Bands in ascending order plus the unit used past the last band (Low).
    fn bands(self) -> (&'static [Band], Unit) {
        match self {
            Self::LeadTime => (LEAD_TIME_BANDS, Unit::Months),
            Self::DeploymentFrequency => (DEPLOYMENT_FREQUENCY_BANDS, Unit::Months),
            Self::TimeToRestoreService => (RESTORE_TIME_BANDS, Unit::Days),
            Self::ChangeFailureRate => (&[], Unit::Hours),
        }
    }
}

/// A metric value with its tier and a one-line explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub value: Option<f64>,
    pub tier: Tier,
    pub summary: String,
}

pub fn classify(kind: MetricKind, value: Option<f64>) -> Classification {
    let Some(value) = value else {
        return Classification {
            value: None,
            tier: Tier::NotApplicable,
            summary: format!("{}: N/A ({})", kind.label(), kind.missing_reason()),
        };
    };

    let (tier, summary) = match kind {
        MetricKind::ChangeFailureRate => classify_failure_rate(value),
        _ => classify_duration(kind, value),
    };

    Classification {
        value: Some(value),
        tier,
        summary,
    }
}

fn classify_failure_rate(rate: f64) -> (Tier, String) {
    let tier = if rate <= ELITE_FAILURE_RATE {
        Tier::Elite
    } else {
        Tier::Low
    };
    let summary = format!(
        "{}: {tier} ({:.0}%)",
        MetricKind::ChangeFailureRate.label(),
        rate * 100.0
    );
    (tier, summary)
}

fn classify_duration(kind: MetricKind, seconds: f64) -> (Tier, String) {
    let (bands, low_unit) = kind.bands();
    let (tier, unit) = bands
        .iter()
        .find(|band| seconds < band.below)
        .map_or((Tier::Low, low_unit), |band| (band.tier, band.unit));

    let summary = format!(
        "{}: {tier} (Average {:.2} {} {})",
        kind.label(),
        seconds / unit.seconds(),
        unit.name(),
        kind.measured_between()
    );
    (tier, summary)
}

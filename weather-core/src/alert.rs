//! Severity classification of current conditions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Normal,
    Warning,
    Critical,
}

impl AlertTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTier::Normal => "Normal",
            AlertTier::Warning => "Warning",
            AlertTier::Critical => "Critical",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertTier::Normal => "🟢",
            AlertTier::Warning => "🟡",
            AlertTier::Critical => "🔴",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AlertTier::Normal => "green",
            AlertTier::Warning => "yellow",
            AlertTier::Critical => "red",
        }
    }

    /// Icon plus name, e.g. `"🔴 Critical"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon(), self.as_str())
    }
}

impl std::fmt::Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub tier: AlertTier,
    pub label: String,
    pub color: &'static str,
    pub message: &'static str,
}

struct Rule {
    applies: fn(f64, f64) -> bool,
    tier: AlertTier,
    message: &'static str,
}

// Evaluated top to bottom, first match wins.
const RULES: &[Rule] = &[
    Rule {
        applies: |t, _| t < -10.0,
        tier: AlertTier::Critical,
        message: "Extreme cold conditions - Exercise caution",
    },
    Rule {
        applies: |t, _| t > 40.0,
        tier: AlertTier::Critical,
        message: "Extreme heat conditions - Limit exposure",
    },
    Rule {
        applies: |_, w| w > 20.0,
        tier: AlertTier::Critical,
        message: "High wind speeds - Operations may be affected",
    },
    Rule {
        applies: |t, _| t < 0.0,
        tier: AlertTier::Warning,
        message: "Cold conditions - Take necessary precautions",
    },
    Rule {
        applies: |t, _| t > 35.0,
        tier: AlertTier::Warning,
        message: "Hot conditions - Stay hydrated",
    },
    Rule {
        applies: |_, w| w > 15.0,
        tier: AlertTier::Warning,
        message: "Moderate wind speeds - Monitor conditions",
    },
];

const NORMAL_MESSAGE: &str = "Normal operating conditions";

/// Classify temperature (°C) and wind speed (km/h) into a tier and advisory.
pub fn classify(temperature_c: f64, wind_speed_kmh: f64) -> Alert {
    let (tier, message) = RULES
        .iter()
        .find(|rule| (rule.applies)(temperature_c, wind_speed_kmh))
        .map(|rule| (rule.tier, rule.message))
        .unwrap_or((AlertTier::Normal, NORMAL_MESSAGE));

    Alert { tier, label: tier.label(), color: tier.color(), message }
}

pub fn tier(temperature_c: f64, wind_speed_kmh: f64) -> AlertTier {
    classify(temperature_c, wind_speed_kmh).tier
}

pub fn advisory(temperature_c: f64, wind_speed_kmh: f64) -> &'static str {
    classify(temperature_c, wind_speed_kmh).message
}

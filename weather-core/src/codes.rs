//! WMO weather interpretation codes as reported by Open-Meteo.

/// Every code with a known label, in ascending order.
pub const KNOWN_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rainstorm"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

pub const UNKNOWN: &str = "Unknown";

/// Human-readable label for a weather code; `"Unknown"` for anything unmapped.
pub fn describe(code: i64) -> &'static str {
    KNOWN_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| KNOWN_CODES[idx].1)
        .unwrap_or(UNKNOWN)
}

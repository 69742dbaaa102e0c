//! Plain-text output for the terminal commands.

use weather_core::{Notice, NoticeLevel, WeatherCard};

pub fn card(card: &WeatherCard) -> String {
    let c = &card.conditions;
    let observed = c
        .observed_at
        .map(|t| format!("Observed:    {} (local)\n", t.format("%Y-%m-%d %H:%M")))
        .unwrap_or_default();

    format!(
        "### {name}\n\
         Temperature: {temp}°C\n\
         Weather:     {desc}\n\
         Humidity:    {humidity}%\n\
         Wind Speed:  {wind} km/h\n\
         {observed}\
         Status:      {label}\n             \
         {message}\n\
         Image:       {image}",
        name = card.location.name,
        temp = c.temperature_c,
        desc = card.description,
        humidity = c.humidity_pct,
        wind = c.wind_speed_kmh,
        label = card.alert.label,
        message = card.alert.message,
        image = card.image_url,
    )
}

pub fn notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("{prefix}: {}", notice.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{CurrentConditions, Location};

    #[test]
    fn card_lists_every_field() {
        let card = WeatherCard::new(
            Location::new("Ladakh", 34.1526, 77.5771),
            CurrentConditions {
                temperature_c: -15.0,
                humidity_pct: 40.0,
                wind_speed_kmh: 5.0,
                weather_code: 71,
                observed_at: None,
            },
            "https://image.pollinations.ai",
        );

        let text = super::card(&card);
        assert!(text.starts_with("### Ladakh\n"));
        assert!(text.contains("Temperature: -15°C"));
        assert!(text.contains("Weather:     Slight snow"));
        assert!(text.contains("Humidity:    40%"));
        assert!(text.contains("Status:      🔴 Critical"));
        assert!(text.contains("Extreme cold conditions - Exercise caution"));
        assert!(!text.contains("Observed"));
    }

    #[test]
    fn notice_is_prefixed_by_level() {
        assert_eq!(notice(&Notice::warning("careful")), "warning: careful");
        assert_eq!(notice(&Notice::error("boom")), "error: boom");
    }
}

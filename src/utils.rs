use chrono::{Duration, Local};
use num_format::{Locale, ToFormattedString};

#[derive(Clone)]
pub struct NumberFormatOptions {
    pub use_comma: bool,
    pub use_human: bool,
    pub locale: String,
    pub decimal_places: usize,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            use_comma: false,
            use_human: false,
            locale: "en".to_string(),
            decimal_places: 2,
        }
    }
}

/// Format a number for display. Accepts both u32 and u64.
pub fn format_number(n: impl Into<u64>, options: &NumberFormatOptions) -> String {
    let n: u64 = n.into();
    let locale = match options.locale.as_str() {
        "de" => Locale::de,
        "fr" => Locale::fr,
        "es" => Locale::es,
        "it" => Locale::it,
        "ja" => Locale::ja,
        "ko" => Locale::ko,
        "zh" => Locale::zh,
        _ => Locale::en,
    };

    if options.use_human {
        if n >= 1_000_000_000_000 {
            format!(
                "{:.prec$}t",
                n as f64 / 1_000_000_000_000.0,
                prec = options.decimal_places
            )
        } else if n >= 1_000_000_000 {
            format!(
                "{:.prec$}b",
                n as f64 / 1_000_000_000.0,
                prec = options.decimal_places
            )
        } else if n >= 1_000_000 {
            format!(
                "{:.prec$}m",
                n as f64 / 1_000_000.0,
                prec = options.decimal_places
            )
        } else if n >= 1_000 {
            format!(
                "{:.prec$}k",
                n as f64 / 1_000.0,
                prec = options.decimal_places
            )
        } else {
            n.to_string()
        }
    } else if options.use_comma {
        n.to_formatted_string(&locale)
    } else {
        n.to_string()
    }
}

/// Format a minute total for the dashboard cards: minutes below an hour,
/// hours (one decimal when it matters) above.
pub fn format_minutes(minutes: f64, options: &NumberFormatOptions) -> String {
    let minutes = minutes.max(0.0);
    if minutes < 60.0 {
        format!("{}m", minutes.round() as u64)
    } else {
        let hours = minutes / 60.0;
        if hours < 100.0 && hours.fract().abs() > 0.05 {
            format!("{hours:.1}h")
        } else {
            format!("{}h", format_number(hours.round() as u64, options))
        }
    }
}

/// Short "Mon D" label for a week bucket, counted back from today. The
/// series has no real timestamps; this only anchors the axis visually.
pub fn week_date_label(weeks_ago: i64) -> String {
    let date = Local::now().date_naive() - Duration::weeks(weeks_ago);
    date.format("%b %-d").to_string()
}

use chrono::{DateTime, Local};
use sys_locale::get_locale;

/// Display timestamp for a completion happening now.
pub fn completion_timestamp() -> String {
    format_local(Local::now(), &get_locale().unwrap_or_default())
}

/// Renders a local time the way the browser's `toLocaleString()` would:
/// month-first with a 12-hour clock for US English locales, day-first with a
/// 24-hour clock everywhere else (including Spanish locales).
fn format_local(at: DateTime<Local>, locale: &str) -> String {
    if is_us_english(locale) {
        at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    } else {
        at.format("%-d/%-m/%Y, %H:%M:%S").to_string()
    }
}

fn is_us_english(locale: &str) -> bool {
    let normalized = locale.trim().to_lowercase().replace('_', "-");
    normalized == "en" || normalized.starts_with("en-us")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn afternoon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).single().unwrap()
    }

    #[test]
    fn day_first_24_hour_clock_for_spanish_locales() {
        assert_eq!(format_local(afternoon(), "es-ES"), "2/1/2024, 15:04:05");
        assert_eq!(format_local(afternoon(), "es-MX"), "2/1/2024, 15:04:05");
        // Unknown or empty locales fall into the same bucket.
        assert_eq!(format_local(afternoon(), ""), "2/1/2024, 15:04:05");
    }

    #[test]
    fn month_first_12_hour_clock_for_us_english() {
        assert_eq!(format_local(afternoon(), "en-US"), "1/2/2024, 3:04:05 PM");
        assert_eq!(format_local(afternoon(), "en_US.UTF-8"), "1/2/2024, 3:04:05 PM");
        // British English keeps the day-first form.
        assert_eq!(format_local(afternoon(), "en-GB"), "2/1/2024, 15:04:05");
    }
}

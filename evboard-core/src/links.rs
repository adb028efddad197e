//! Derived deep links.
//!
//! Pure builders for the outbound links shown on each event card: a Google
//! Calendar render-template URL and a Google Maps search URL. No network,
//! no state.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::Event;

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";
const MAPS_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Inert href for events with no usable location.
pub const MAP_PLACEHOLDER: &str = "#";

/// Formats event dates accept in rough order of likelihood. The upstream
/// date field is free-form, so this is best-effort.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y", "%m/%d/%Y"];

/// Build a Google Calendar deep link for the event.
///
/// The event window is fixed at 10:00-12:00 on the event's date, emitted in
/// compact basic format (`YYYYMMDDTHHMMSSZ`). If the free-form date does not
/// parse, the `dates` parameter is omitted so the link still opens a valid
/// prefilled template.
pub fn calendar_link(event: &Event) -> String {
    let mut link = format!(
        "{}&text={}&details={}&location={}",
        CALENDAR_BASE,
        urlencoding::encode(&event.title),
        urlencoding::encode(&event.description),
        urlencoding::encode(event.location.as_deref().unwrap_or_default()),
    );

    if let Some(date) = parse_event_date(&event.date) {
        let start = date.and_hms_opt(10, 0, 0).expect("valid fixed time");
        let end = date.and_hms_opt(12, 0, 0).expect("valid fixed time");
        link.push_str(&format!(
            "&dates={}/{}",
            compact_timestamp(start),
            compact_timestamp(end)
        ));
    }

    link
}

/// Build a Google Maps deep link for the event.
///
/// Coordinates win over the free-text location; with neither, the inert
/// placeholder is returned so the caller renders a dead link instead of a
/// broken one.
pub fn map_link(event: &Event) -> String {
    if let Some(coords) = &event.coordinates {
        return format!("{}{},{}", MAPS_BASE, coords.lat, coords.lng);
    }

    match event.location.as_deref() {
        Some(location) if !location.trim().is_empty() => {
            format!("{}{}", MAPS_BASE, urlencoding::encode(location))
        }
        _ => MAP_PLACEHOLDER.to_string(),
    }
}

fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn compact_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Coordinates;

    fn event() -> Event {
        Event {
            title: "DevFest 2025".into(),
            date: "2025-10-12".into(),
            mode: "In-person".into(),
            description: "Talks & workshops".into(),
            location: Some("Community Hall, MG Road".into()),
            coordinates: None,
        }
    }

    // --- calendar_link ---

    #[test]
    fn calendar_link_has_two_hour_window_from_ten() {
        let link = calendar_link(&event());
        assert!(link.contains("&dates=20251012T100000Z/20251012T120000Z"));
    }

    #[test]
    fn calendar_link_percent_encodes_free_text() {
        let link = calendar_link(&event());
        assert!(link.starts_with(CALENDAR_BASE));
        assert!(link.contains("text=DevFest%202025"));
        assert!(link.contains("details=Talks%20%26%20workshops"));
        assert!(link.contains("location=Community%20Hall%2C%20MG%20Road"));
    }

    #[test]
    fn calendar_link_parses_human_date() {
        let mut e = event();
        e.date = "October 12, 2025".into();
        let link = calendar_link(&e);
        assert!(link.contains("&dates=20251012T100000Z/20251012T120000Z"));
    }

    #[test]
    fn calendar_link_omits_dates_when_unparseable() {
        let mut e = event();
        e.date = "sometime next month".into();
        let link = calendar_link(&e);
        assert!(!link.contains("&dates="));
        assert!(link.contains("text=DevFest%202025"));
    }

    #[test]
    fn calendar_link_tolerates_missing_location() {
        let mut e = event();
        e.location = None;
        let link = calendar_link(&e);
        assert!(link.contains("location=&dates="));
    }

    // --- map_link ---

    #[test]
    fn map_link_prefers_coordinates() {
        let mut e = event();
        e.coordinates = Some(Coordinates {
            lat: 12.9716,
            lng: 77.5946,
        });
        assert_eq!(
            map_link(&e),
            "https://www.google.com/maps/search/?api=1&query=12.9716,77.5946"
        );
    }

    #[test]
    fn map_link_falls_back_to_encoded_location() {
        assert_eq!(
            map_link(&event()),
            "https://www.google.com/maps/search/?api=1&query=Community%20Hall%2C%20MG%20Road"
        );
    }

    #[test]
    fn map_link_placeholder_when_nothing_known() {
        let mut e = event();
        e.location = None;
        assert_eq!(map_link(&e), MAP_PLACEHOLDER);

        e.location = Some("   ".into());
        assert_eq!(map_link(&e), MAP_PLACEHOLDER);
    }
}

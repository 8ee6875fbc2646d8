//! Club events shown on the home page.

use chrono::NaiveDate;

/// A scheduled club event.
///
/// Events are compiled into the site, not user data. The only structured
/// field is `date`; `time` is free display text such as `7:00 PM - 9:00 PM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    /// Sign-up link; the card title links here when present.
    pub url: Option<String>,
}

impl Event {
    /// Whether the event falls on or after `today`.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    /// Date as shown on event cards, e.g. `Mon, Sep 15, 2025`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%a, %b %-d, %Y").to_string()
    }
}

/// Events on or after `today`, soonest first.
///
/// Events sharing a date keep their relative order.
#[must_use]
pub fn upcoming(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.is_upcoming(today)).collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming
}

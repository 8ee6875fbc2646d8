//! Club event listing compiled into the site.
//!
//! Edit [`EVENTS`] to publish or retire events; past events drop off the
//! page automatically.

use chrono::{DateTime, FixedOffset, NaiveDate};
use mathsoc_core::{Event, upcoming};

struct EventSeed {
    id: u32,
    title: &'static str,
    description: &'static str,
    date: NaiveDate,
    time: &'static str,
    location: &'static str,
    url: Option<&'static str>,
}

/// Evaluated at compile time, so a bad date fails the build.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid event date"),
    }
}

const EVENTS: &[EventSeed] = &[
    EventSeed {
        id: 1,
        title: "LaTeX Workshop Stage 1 - Basics: Document 📄",
        description: "Learn LaTeX fundamentals: document structure, math, tables, and referencing — perfect for reports and assignments.",
        date: date(2025, 9, 15),
        time: "7:00 PM - 9:00 PM",
        location: "S17 04-06",
        url: Some("https://nus.campuslabs.com/engage/submitter/form/start/696279"),
    },
    EventSeed {
        id: 2,
        title: "LaTeX Workshop Stage 2 - Basics: Presentation 🧮",
        description: "Design polished slides with Beamer: layouts, overlays, visuals, and equations.",
        date: date(2025, 10, 6),
        time: "7:00 PM - 9:00 PM",
        location: "S17 04-06",
        url: Some("https://nus.campuslabs.com/engage/submitter/form/start/696371"),
    },
    EventSeed {
        id: 3,
        title: "LaTeX Workship Stage 3 - Advanced: Typesetting & Visualisation 📊",
        description: "Master TikZ and PGFPlots, customise environments for theorems, proofs, and structured layouts.",
        date: date(2025, 10, 27),
        time: "7:00 PM - 9:00 PM",
        location: "S17 04-06",
        url: Some("https://nus.campuslabs.com/engage/submitter/form/start/696372"),
    },
    EventSeed {
        id: 4,
        title: "🧩 NUS Cubing: Beginner Workshop! 🎉",
        description: "Ever stared at a Rubik's Cube and wondered “how on earth do I solve this? 🤯\n Join us and solve your first cube — guaranteed! 🚀 No experience needed, just curiosity and a cube in your hands!",
        date: date(2025, 9, 18),
        time: "6:00 PM - 8:00 PM",
        location: "S17 04-04",
        url: Some("https://forms.cloud.microsoft/r/Gw42DvQP1i"),
    },
];

/// Every configured event, in declaration order.
#[must_use]
pub fn club_events() -> Vec<Event> {
    EVENTS
        .iter()
        .map(|seed| Event {
            id: seed.id,
            title: seed.title.to_owned(),
            description: seed.description.to_owned(),
            date: seed.date,
            time: seed.time.to_owned(),
            location: seed.location.to_owned(),
            url: seed.url.map(str::to_owned),
        })
        .collect()
}

/// Events on or after the calendar date of `now`, soonest first.
#[must_use]
pub fn upcoming_events(now: DateTime<FixedOffset>) -> Vec<Event> {
    let events = club_events();
    upcoming(&events, now.date_naive())
        .into_iter()
        .cloned()
        .collect()
}

//! Turn decision dates plus fetched data into calendar events.

use chrono::{NaiveDate, TimeDelta};

use crate::data::MarketExpectation;
use crate::domain::{
    CalendarEvent, EventDescription, EventTiming, Institution, PAST_OUTLOOK, PENDING_AVERAGE,
    PENDING_EXPECTATION, PENDING_OUTLOOK, PENDING_RATE, RateSeries, format_rate,
};
use crate::math::{classify, rate_at_or_before, trailing_average};
use crate::schedule::{Schedule, fomc_announcement};

/// Build every event in the schedule, COPOM first, each institution in date order.
///
/// `today` splits past decisions (rate looked up, surprise classified) from
/// future ones (placeholders plus the market outlook).
pub fn build_events(
    schedule: &Schedule,
    series: &RateSeries,
    expectation: &MarketExpectation,
    today: NaiveDate,
) -> Vec<CalendarEvent> {
    let mut events = copom_events(schedule, series, expectation, today);
    events.extend(fomc_events(schedule));
    events
}

fn copom_events(
    schedule: &Schedule,
    series: &RateSeries,
    expectation: &MarketExpectation,
    today: NaiveDate,
) -> Vec<CalendarEvent> {
    let dates = schedule.dates_for(Institution::Copom);
    let rates: Vec<Option<f64>> = dates
        .iter()
        .map(|&date| {
            if date <= today {
                rate_at_or_before(series, date)
            } else {
                None
            }
        })
        .collect();

    let summary = format!(
        "{} {} — Decisão da Selic (após fechamento)",
        Institution::Copom.flag(),
        Institution::Copom.display_name()
    );

    dates
        .iter()
        .enumerate()
        .map(|(idx, &date)| {
            let is_past = date <= today;
            let rate = rates[idx];
            let average = trailing_average(&rates, idx, schedule.rates.window);

            let expectation_text = if is_past {
                classify(rate, expectation.median, schedule.rates.tolerance)
                    .label()
                    .to_string()
            } else {
                PENDING_EXPECTATION.to_string()
            };
            let outlook = if is_past {
                PAST_OUTLOOK.to_string()
            } else {
                expectation
                    .outlook_text()
                    .unwrap_or_else(|| PENDING_OUTLOOK.to_string())
            };

            CalendarEvent {
                uid: event_uid(Institution::Copom, date, &schedule.calendar.uid_domain),
                institution: Institution::Copom,
                summary: summary.clone(),
                timing: all_day(date),
                description: EventDescription {
                    rate: rate.map(format_rate).unwrap_or_else(|| PENDING_RATE.to_string()),
                    expectation: expectation_text,
                    average: average
                        .map(format_rate)
                        .unwrap_or_else(|| PENDING_AVERAGE.to_string()),
                    outlook,
                    window: schedule.rates.window,
                },
            }
        })
        .collect()
}

fn fomc_events(schedule: &Schedule) -> Vec<CalendarEvent> {
    let announcement = &schedule.announcement;
    let time_et = announcement.time_et.format("%H:%M");

    schedule
        .dates_for(Institution::Fomc)
        .into_iter()
        .map(|date| {
            let (timing, when) = if announcement.timed {
                let start = fomc_announcement(date, announcement);
                let timing = EventTiming::Timed {
                    start,
                    end: start + announcement.duration,
                    tzid: schedule.calendar.timezone.clone(),
                };
                (timing, format!("{time_et} ET"))
            } else {
                (all_day(date), format!("horário típico {time_et} ET"))
            };

            CalendarEvent {
                uid: event_uid(Institution::Fomc, date, &schedule.calendar.uid_domain),
                institution: Institution::Fomc,
                summary: format!(
                    "{} {} — Decisão de juros ({when})",
                    Institution::Fomc.flag(),
                    Institution::Fomc.display_name()
                ),
                timing,
                description: EventDescription::pending(schedule.rates.window),
            }
        })
        .collect()
}

/// `copom-rate-20250129@juros`
pub fn event_uid(institution: Institution, date: NaiveDate, domain: &str) -> String {
    format!("{}-{}@{domain}", institution.tag(), date.format("%Y%m%d"))
}

fn all_day(date: NaiveDate) -> EventTiming {
    EventTiming::AllDay {
        start: date,
        end_exclusive: date + TimeDelta::days(1),
    }
}

//! iCalendar rendering.
//!
//! Built on the `icalendar` crate; the only post-processing is swapping the
//! crate's default `PRODID` for ours.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::domain::{CalendarEvent, CalendarSection, EventTiming};

/// Render a complete `VCALENDAR` with one `VEVENT` per event.
///
/// `generated_at` becomes every event's `DTSTAMP`.
pub fn render_calendar(
    header: &CalendarSection,
    events: &[CalendarEvent],
    generated_at: DateTime<Utc>,
) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-CALNAME", header.name.as_str()));
    cal.append_property(Property::new("X-WR-TIMEZONE", header.timezone.as_str()));

    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();
    for event in events {
        cal.push(to_ics_event(event, &dtstamp));
    }

    let cal = cal.done();
    replace_prodid(&cal.to_string(), &header.prodid)
}

fn to_ics_event(event: &CalendarEvent, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.add_property("DTSTAMP", dtstamp);

    match &event.timing {
        EventTiming::AllDay {
            start,
            end_exclusive,
        } => {
            ics_event.append_property(date_property("DTSTART", start.format("%Y%m%d").to_string()));
            ics_event.append_property(date_property(
                "DTEND",
                end_exclusive.format("%Y%m%d").to_string(),
            ));
        }
        EventTiming::Timed { start, end, tzid } => {
            ics_event.append_property(zoned_property("DTSTART", start.format("%Y%m%dT%H%M%S").to_string(), tzid));
            ics_event.append_property(zoned_property("DTEND", end.format("%Y%m%dT%H%M%S").to_string(), tzid));
        }
    }

    ics_event.summary(&event.summary);
    ics_event.description(&event.description.render());
    ics_event.done()
}

fn date_property(name: &str, value: String) -> Property {
    let mut prop = Property::new(name, value);
    prop.append_parameter(ValueType::Date);
    prop
}

fn zoned_property(name: &str, value: String, tzid: &str) -> Property {
    let mut prop = Property::new(name, value);
    prop.add_parameter("TZID", tzid);
    prop
}

/// Swap the calendar-level `PRODID` line and normalize line endings to CRLF.
fn replace_prodid(ics: &str, prodid: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_header = true;

    for line in ics.lines() {
        if line == "BEGIN:VEVENT" {
            in_header = false;
        }
        if in_header && line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    use crate::domain::{EventDescription, Institution};

    fn unfold(ics: &str) -> String {
        ics.replace("\r\n ", "")
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn all_day_event() -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        CalendarEvent {
            uid: "copom-rate-20250129@juros".to_string(),
            institution: Institution::Copom,
            summary: "COPOM decision".to_string(),
            timing: EventTiming::AllDay {
                start,
                end_exclusive: NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
            },
            description: EventDescription::pending(12),
        }
    }

    #[test]
    fn header_carries_our_metadata() {
        let ics = unfold(&render_calendar(&CalendarSection::default(), &[], generated_at()));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains("PRODID:-//Calendario Taxa de Juros//PT-BR//v3.0\r\n"));
        assert!(!ics.contains("ICALENDAR-RS"));
        assert!(ics.contains("METHOD:PUBLISH\r\n"));
        assert!(ics.contains("X-WR-CALNAME:📈 Taxa de Juros (FED + COPOM)\r\n"));
        assert!(ics.contains("X-WR-TIMEZONE:America/Sao_Paulo\r\n"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn all_day_event_uses_date_values() {
        let ics = unfold(&render_calendar(
            &CalendarSection::default(),
            &[all_day_event()],
            generated_at(),
        ));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("UID:copom-rate-20250129@juros\r\n"));
        assert!(ics.contains("DTSTAMP:20250101T120000Z\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250129\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250130\r\n"));
        assert!(ics.contains("SUMMARY:COPOM decision\r\n"));
        assert!(ics.contains("taxa divulgada: a divulgar"));
        assert!(ics.contains("expectativa: a definir (mercado)"));
    }

    #[test]
    fn timed_event_uses_tzid() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 29)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        let mut event = all_day_event();
        event.timing = EventTiming::Timed {
            start,
            end: start + chrono::TimeDelta::hours(1),
            tzid: "America/Sao_Paulo".to_string(),
        };
        let ics = unfold(&render_calendar(&CalendarSection::default(), &[event], generated_at()));
        assert!(ics.contains("DTSTART;TZID=America/Sao_Paulo:20250129T160000\r\n"));
        assert!(ics.contains("DTEND;TZID=America/Sao_Paulo:20250129T170000\r\n"));
    }

    #[test]
    fn every_line_ends_with_crlf() {
        let ics = render_calendar(&CalendarSection::default(), &[all_day_event()], generated_at());
        assert!(ics.ends_with("\r\n"));
        assert_eq!(ics.matches('\n').count(), ics.matches("\r\n").count());
    }
}

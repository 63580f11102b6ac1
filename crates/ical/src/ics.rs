//! RFC 5545 text rendering.
//!
//! Produces one VEVENT per input event, each with its own VALARM and,
//! when present, an RRULE with an occurrence-count bound. Timed events
//! are written as local times tagged with the reference TZID; all-day
//! events use `VALUE=DATE` bounds.

use chrono::Duration;

use pawcal_schedule::{
    AlarmAction, AlarmRelation, EventWindow, Frequency, ReminderEvent, REFERENCE_TZID,
};

use crate::traits::{CalendarSerializer, IcalError};

const PRODID: &str = "-//Pet Medication Reminder//Boehringer Ingelheim//EN";
const CRLF: &str = "\r\n";

/// Maximum content-line length in octets before folding (RFC 5545 §3.1).
const FOLD_LIMIT: usize = 75;

#[derive(Debug, Default)]
pub struct IcsSerializer;

impl IcsSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl CalendarSerializer for IcsSerializer {
    fn serialize(&self, events: &[ReminderEvent]) -> Result<Vec<u8>, IcalError> {
        let mut out = String::new();
        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, &format!("PRODID:{}", PRODID));
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, "CALSCALE:GREGORIAN");
        push_line(&mut out, "METHOD:PUBLISH");
        for event in events {
            write_event(&mut out, event)?;
        }
        push_line(&mut out, "END:VCALENDAR");
        Ok(out.into_bytes())
    }
}

fn write_event(out: &mut String, event: &ReminderEvent) -> Result<(), IcalError> {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("SUMMARY:{}", escape_text(&event.title)));
    push_line(
        out,
        &format!("DESCRIPTION:{}", escape_text(&event.description)),
    );

    match event.window {
        EventWindow::AllDay { date } => {
            let end = date
                .succ_opt()
                .ok_or_else(|| IcalError::Serialize(format!("event date out of range: {date}")))?;
            push_line(out, &format!("DTSTART;VALUE=DATE:{}", date.format("%Y%m%d")));
            push_line(out, &format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
        }
        EventWindow::Timed { start } => {
            let end = start.checked_add_signed(Duration::hours(1)).ok_or_else(|| {
                IcalError::Serialize(format!("event time out of range: {start}"))
            })?;
            push_line(
                out,
                &format!(
                    "DTSTART;TZID={}:{}",
                    REFERENCE_TZID,
                    start.format("%Y%m%dT%H%M%S")
                ),
            );
            push_line(
                out,
                &format!(
                    "DTEND;TZID={}:{}",
                    REFERENCE_TZID,
                    end.format("%Y%m%dT%H%M%S")
                ),
            );
        }
    }

    push_line(
        out,
        &format!("DTSTAMP:{}", event.created_at.format("%Y%m%dT%H%M%SZ")),
    );
    push_line(out, &format!("UID:{}", event.uid));

    if let Some(recurrence) = event.recurrence {
        let freq = match recurrence.frequency {
            Frequency::Monthly => "MONTHLY",
        };
        push_line(
            out,
            &format!("RRULE:FREQ={};COUNT={}", freq, recurrence.count),
        );
    }

    if !event.categories.is_empty() {
        let categories: Vec<String> = event.categories.iter().map(|c| escape_text(c)).collect();
        push_line(out, &format!("CATEGORIES:{}", categories.join(",")));
    }

    push_line(out, "BEGIN:VALARM");
    let action = match event.alarm.action {
        AlarmAction::Display => "DISPLAY",
    };
    push_line(out, &format!("ACTION:{}", action));
    push_line(
        out,
        &format!("DESCRIPTION:{}", escape_text(&event.alarm.message)),
    );
    let related = match event.alarm.relation {
        AlarmRelation::Start => "START",
        AlarmRelation::End => "END",
    };
    push_line(
        out,
        &format!(
            "TRIGGER;RELATED={}:{}",
            related,
            format_trigger(event.alarm.offset)
        ),
    );
    push_line(out, "END:VALARM");
    push_line(out, "END:VEVENT");
    Ok(())
}

/// Append a content line, folding at [`FOLD_LIMIT`] octets.
/// Continuation lines begin with a single space.
fn push_line(buf: &mut String, line: &str) {
    let mut rest = line;
    let mut first = true;
    loop {
        let budget = if first { FOLD_LIMIT } else { FOLD_LIMIT - 1 };
        if !first {
            buf.push(' ');
        }
        if rest.len() <= budget {
            buf.push_str(rest);
            break;
        }
        let mut cut = budget;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        buf.push_str(&rest[..cut]);
        buf.push_str(CRLF);
        rest = &rest[cut..];
        first = false;
    }
    buf.push_str(CRLF);
}

/// Escape TEXT values per RFC 5545 §3.3.11.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Render a signed offset as an ISO 8601 duration (e.g. `PT12H`, `-PT15M`).
fn format_trigger(offset: Duration) -> String {
    let total = offset.num_seconds();
    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    let mut secs = total.unsigned_abs();
    out.push('P');
    let days = secs / 86_400;
    secs %= 86_400;
    if days > 0 {
        out.push_str(&format!("{}D", days));
    }
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    if hours > 0 || minutes > 0 || seconds > 0 || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || (days == 0 && hours == 0 && minutes == 0) {
            out.push_str(&format!("{}S", seconds));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pawcal_core::ReminderRequest;
    use pawcal_schedule::ReminderScheduleBuilder;

    fn request(time_of_day: Option<NaiveTime>) -> ReminderRequest {
        ReminderRequest {
            pet_name: "Daisy".to_string(),
            product_name: "NexGard SPECTRA".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            dose_count: 12,
            time_of_day,
            notes: None,
        }
    }

    fn render(time_of_day: Option<NaiveTime>, notes: Option<&str>) -> String {
        let mut req = request(time_of_day);
        req.notes = notes.map(str::to_string);
        let events = ReminderScheduleBuilder::build(req).unwrap().into_events();
        let bytes = IcsSerializer::new().serialize(&events).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn all_day_calendar_has_date_bounds_and_monthly_rrule() {
        let ics = render(None, None);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//Pet Medication Reminder//Boehringer Ingelheim//EN"));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240115"));
        assert!(ics.contains("DTEND;VALUE=DATE:20240116"));
        assert!(ics.contains("RRULE:FREQ=MONTHLY;COUNT=12"));
        assert!(ics.contains("TRIGGER;RELATED=START:PT12H"));
        // Refill: two months later, single occurrence, 10h alarm.
        assert!(ics.contains("DTSTART;VALUE=DATE:20240315"));
        assert!(ics.contains("TRIGGER;RELATED=START:PT10H"));
        assert_eq!(ics.matches("RRULE:").count(), 1);
        assert!(ics.contains("CATEGORIES:MEDICATION,REFILL,PET_CARE"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn timed_calendar_uses_tzid_and_lead_time_alarms() {
        let ics = render(NaiveTime::from_hms_opt(8, 30, 0), None);

        assert!(ics.contains(&format!("DTSTART;TZID={}:20240115T083000", REFERENCE_TZID)));
        assert!(ics.contains(&format!("DTEND;TZID={}:20240115T093000", REFERENCE_TZID)));
        assert!(ics.contains(&format!("DTSTART;TZID={}:20240315T083000", REFERENCE_TZID)));
        assert_eq!(ics.matches("TRIGGER;RELATED=START:-PT15M").count(), 2);
        assert!(!ics.contains("VALUE=DATE:"));
    }

    #[test]
    fn every_event_carries_alarm_and_uid() {
        let ics = render(None, None);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 2);
        assert_eq!(ics.matches("ACTION:DISPLAY").count(), 2);
        assert_eq!(ics.matches("UID:").count(), 2);
        assert_eq!(ics.matches("DTSTAMP:").count(), 2);
    }

    #[test]
    fn text_values_are_escaped() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");

        // Builder joins notes with a newline, which must render as \n.
        let ics = render(None, Some("ok"));
        assert!(ics.contains("Pet: Daisy\\nok"));
    }

    #[test]
    fn long_lines_are_folded_with_continuation() {
        let mut req = request(None);
        req.notes = Some("x".repeat(200));
        let events = ReminderScheduleBuilder::build(req).unwrap().into_events();
        let ics = String::from_utf8(IcsSerializer::new().serialize(&events).unwrap()).unwrap();

        assert!(ics.contains("\r\n x"));
        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "unfolded line: {line:?}");
        }
    }

    #[test]
    fn trigger_formatting() {
        assert_eq!(format_trigger(Duration::hours(12)), "PT12H");
        assert_eq!(format_trigger(Duration::hours(10)), "PT10H");
        assert_eq!(format_trigger(-Duration::minutes(15)), "-PT15M");
        assert_eq!(format_trigger(Duration::zero()), "PT0S");
        assert_eq!(format_trigger(Duration::days(1)), "P1D");
        assert_eq!(
            format_trigger(-(Duration::hours(1) + Duration::minutes(30))),
            "-PT1H30M"
        );
    }
}

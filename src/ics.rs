//! iCalendar output for homework.
use chrono::{Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

use crate::homework::Homework;

const PRODID: &str = "-//huiswerk-ical//EN";

#[derive(Debug, Clone)]
pub struct CalendarOptions {
    pub name: String,
    /// Zone used to place the reminder on the previous evening.
    pub timezone: Tz,
    pub reminder_hour: u32,
    pub duration: Duration,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            name: "Huiswerk".to_string(),
            timezone: chrono_tz::Europe::Amsterdam,
            reminder_hour: 17,
            duration: Duration::minutes(60),
        }
    }
}

pub fn generate_ics(homework: &[Homework], options: &CalendarOptions) -> String {
    let mut cal = Calendar::new();
    // X-WR-CALNAME: display name most clients honour
    cal.append_property(Property::new("X-WR-CALNAME", &options.name));

    for hw in homework {
        cal.push(event(hw, options));
    }

    let cal = cal.done();
    rewrite_prodid(&cal.to_string())
}

fn event(hw: &Homework, options: &CalendarOptions) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@huiswerk-ical", hw.identifier));
    ics_event.summary(&hw.title());
    ics_event.description(hw.body());

    let dtstamp = hw.created.unwrap_or_else(Utc::now);
    ics_event.add_property("DTSTAMP", utc_stamp(&dtstamp));
    ics_event.add_property("DTSTART", utc_stamp(&hw.date));
    ics_event.add_property("DTEND", utc_stamp(&(hw.date + options.duration)));

    if let Some(lead) = reminder_lead(hw, options) {
        let alarm = Alarm::display(&hw.title(), Trigger::before_start(lead));
        ics_event.alarm(alarm);
    }

    ics_event.done()
}

fn utc_stamp(t: &chrono::DateTime<Utc>) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Time between the reminder and the start. The reminder falls on the previous local day at
/// `reminder_hour`, keeping the start's minutes and seconds.
fn reminder_lead(hw: &Homework, options: &CalendarOptions) -> Option<Duration> {
    let local = hw.date.with_timezone(&options.timezone);
    let evening = local
        .date_naive()
        .pred_opt()?
        .and_hms_opt(options.reminder_hour, local.minute(), local.second())?;
    let at = options.timezone.from_local_datetime(&evening).earliest()?;
    let lead = hw.date - at.with_timezone(&Utc);
    (lead > Duration::zero()).then_some(lead)
}

fn rewrite_prodid(ics: &str) -> String {
    let mut out = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            out.push_str("PRODID:");
            out.push_str(PRODID);
        } else {
            out.push_str(line);
        }
        out.push_str("\r\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homework() -> Homework {
        Homework {
            subject: "Hoofdstuk 3".to_string(),
            description: "Lees paragraaf 3.1".to_string(),
            subject_code: "netl".to_string(),
            identifier: "4242".to_string(),
            date: Utc.with_ymd_and_hms(2024, 9, 2, 8, 30, 0).unwrap(),
            created: Some(Utc.with_ymd_and_hms(2024, 8, 30, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn event_carries_title_times_and_uid() {
        let ics = generate_ics(&[homework()], &CalendarOptions::default());
        assert!(ics.contains("UID:4242@huiswerk-ical"), "ICS:\n{ics}");
        assert!(ics.contains("SUMMARY:Hoofdstuk 3 | netl"), "ICS:\n{ics}");
        assert!(ics.contains("DTSTART:20240902T083000Z"), "ICS:\n{ics}");
        assert!(ics.contains("DTEND:20240902T093000Z"), "ICS:\n{ics}");
        assert!(ics.contains("DTSTAMP:20240830T120000Z"), "ICS:\n{ics}");
        assert!(ics.contains(&format!("PRODID:{PRODID}")), "ICS:\n{ics}");
    }

    #[test]
    fn reminder_is_previous_evening_local_time() {
        // start is 10:30 local, so the reminder is 2024-09-01 17:30 local (15:30 UTC)
        let lead = reminder_lead(&homework(), &CalendarOptions::default()).unwrap();
        assert_eq!(lead, Duration::hours(17));

        let ics = generate_ics(&[homework()], &CalendarOptions::default());
        assert!(ics.contains("BEGIN:VALARM"), "ICS:\n{ics}");
    }

    #[test]
    fn impossible_reminder_hour_drops_the_alarm() {
        let options = CalendarOptions { reminder_hour: 24, ..CalendarOptions::default() };
        assert_eq!(reminder_lead(&homework(), &options), None);

        let ics = generate_ics(&[homework()], &options);
        assert!(!ics.contains("BEGIN:VALARM"), "ICS:\n{ics}");
    }
}

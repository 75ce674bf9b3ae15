use huiswerk_ical::homework;
use huiswerk_ical::ics::{CalendarOptions, generate_ics};

const FIXTURE: &str = include_str!("../fixtures/welcome.json");

#[test]
fn fixture_yields_one_homework_per_item() {
    let welcome = huiswerk_ical::parse(FIXTURE).unwrap();
    let all = homework::collect(&welcome);
    assert_eq!(all.len(), 2);

    assert_eq!(all[0].title(), "Hoofdstuk 3 | netl");
    assert_eq!(all[0].body(), "Lees paragraaf 3.1 en maak opdracht 1 t/m 4");
    assert_eq!(all[0].identifier, "7001");

    // no subject: the title is just the subject code
    assert_eq!(all[1].title(), "wisb");
    assert_eq!(all[1].body(), "Maak 12, 13 en 14");
}

#[test]
fn items_without_links_are_skipped() {
    let mut welcome = huiswerk_ical::parse(FIXTURE).unwrap();
    welcome.items[0].studiewijzer_item.links.clear();
    let all = homework::collect(&welcome);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].subject_code, "wisb");
}

#[test]
fn items_without_a_date_are_skipped() {
    let mut doc: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    doc["items"][1]["datumTijd"] = serde_json::Value::Null;
    let welcome = huiswerk_ical::parse(&doc.to_string()).unwrap();
    let all = homework::collect(&welcome);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].identifier, "7001");
}

#[test]
fn calendar_has_an_event_per_homework() {
    let welcome = huiswerk_ical::parse(FIXTURE).unwrap();
    let ics = generate_ics(&homework::collect(&welcome), &CalendarOptions::default());
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2, "ICS:\n{ics}");
    assert!(ics.contains("UID:7001@huiswerk-ical"), "ICS:\n{ics}");
    assert!(ics.contains("UID:7002@huiswerk-ical"), "ICS:\n{ics}");
    assert!(ics.contains("DTSTART:20240903T063000Z"), "ICS:\n{ics}");
}

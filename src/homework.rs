//! Calendar-ready homework records derived from parsed items.
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Item, Welcome};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

#[derive(Debug, Clone, PartialEq)]
pub struct Homework {
    pub subject: String,
    /// Plain text, tags stripped.
    pub description: String,
    pub subject_code: String,
    /// First link id of the studiewijzer item, as written on the wire.
    pub identifier: String,
    pub date: DateTime<Utc>,
    pub created: Option<DateTime<Utc>>,
}

impl Homework {
    /// `None` when the item has no link to take an identifier from, or no date.
    pub fn from_item(item: &Item) -> Option<Self> {
        let wijzer = &item.studiewijzer_item;
        let identifier = wijzer.links.first()?.id.to_string();
        let date = item.datum_tijd?;
        Some(Homework {
            subject: wijzer.onderwerp.clone(),
            description: strip_html(&wijzer.omschrijving),
            subject_code: item.lesgroep.vak.afkorting.clone(),
            identifier,
            date,
            created: item.aangemaakt_op_datum_tijd,
        })
    }

    /// `"<subject> | <code>"`, or just the code when either text is empty.
    pub fn title(&self) -> String {
        if self.description.is_empty() || self.subject.is_empty() {
            self.subject_code.clone()
        } else {
            format!("{} | {}", self.subject, self.subject_code)
        }
    }

    pub fn body(&self) -> &str {
        if self.description.is_empty() { &self.subject } else { &self.description }
    }
}

pub fn collect(welcome: &Welcome) -> Vec<Homework> {
    welcome
        .items
        .iter()
        .filter_map(|item| {
            let homework = Homework::from_item(item);
            if homework.is_none() {
                tracing::warn!(
                    vak = %item.lesgroep.vak.afkorting,
                    links = item.studiewijzer_item.links.len(),
                    dated = item.datum_tijd.is_some(),
                    "skipping item without identifier or date"
                );
            }
            homework
        })
        .collect()
}

pub fn strip_html(src: &str) -> String {
    HTML_TAG.replace_all(src, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn homework(subject: &str, description: &str) -> Homework {
        Homework {
            subject: subject.to_string(),
            description: description.to_string(),
            subject_code: "netl".to_string(),
            identifier: "1".to_string(),
            date: Utc.with_ymd_and_hms(2024, 9, 2, 8, 30, 0).unwrap(),
            created: None,
        }
    }

    #[test]
    fn strips_tags_but_keeps_text() {
        assert_eq!(strip_html("<p>Lees <b>H3</b> &amp; maak 4</p>"), "Lees H3 &amp; maak 4");
        assert_eq!(strip_html("geen tags"), "geen tags");
    }

    #[test]
    fn title_falls_back_to_subject_code() {
        assert_eq!(homework("Hoofdstuk 3", "Lezen").title(), "Hoofdstuk 3 | netl");
        assert_eq!(homework("Hoofdstuk 3", "").title(), "netl");
        assert_eq!(homework("", "Lezen").title(), "netl");
    }

    #[test]
    fn body_prefers_description() {
        assert_eq!(homework("Hoofdstuk 3", "Lezen").body(), "Lezen");
        assert_eq!(homework("Hoofdstuk 3", "").body(), "Hoofdstuk 3");
    }
}

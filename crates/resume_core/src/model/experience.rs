//! Dated role/engagement entry nested inside organization sections.
//!
//! # Invariants
//! - `finish_date` is never earlier than `start_date`.
//! - `title` is never empty.

use crate::model::resume::ResumeValidationError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Label rendered instead of a finish date for ongoing experiences.
pub const CURRENT_LABEL: &str = "Now";

/// One period of work or study.
///
/// Equality is structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(with = "crate::util::date::iso")]
    pub start_date: NaiveDate,
    /// A date after "today" means the experience is still ongoing.
    #[serde(with = "crate::util::date::iso")]
    pub finish_date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Experience {
    /// Creates a validated experience entry.
    ///
    /// # Errors
    /// - `EmptyExperienceTitle` when `title` is empty.
    /// - `InvalidExperiencePeriod` when `finish_date < start_date`.
    pub fn new(
        start_date: NaiveDate,
        finish_date: NaiveDate,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ResumeValidationError> {
        let experience = Self {
            start_date,
            finish_date,
            title: title.into(),
            description,
        };
        experience.validate()?;
        Ok(experience)
    }

    pub fn validate(&self) -> Result<(), ResumeValidationError> {
        if self.title.is_empty() {
            return Err(ResumeValidationError::EmptyExperienceTitle);
        }
        if self.finish_date < self.start_date {
            return Err(ResumeValidationError::InvalidExperiencePeriod {
                start: self.start_date,
                finish: self.finish_date,
            });
        }
        Ok(())
    }

    /// Whether the experience is still ongoing relative to `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.finish_date > today
    }

    /// Renders `MM/YYYY - MM/YYYY`, or `MM/YYYY - Now` for ongoing entries.
    pub fn period_text(&self, today: NaiveDate) -> String {
        let finish = if self.is_current(today) {
            CURRENT_LABEL.to_string()
        } else {
            month_year(self.finish_date)
        };
        format!("{} - {}", month_year(self.start_date), finish)
    }

    /// Same as [`Experience::period_text`] using the local calendar date.
    pub fn period_text_now(&self) -> String {
        self.period_text(Local::now().date_naive())
    }
}

fn month_year(date: NaiveDate) -> String {
    format!("{:02}/{:04}", date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::Experience;
    use crate::model::resume::ResumeValidationError;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn new_rejects_finish_before_start() {
        let err = Experience::new(date(2020, 5), date(2019, 1), "Engineer", None).unwrap_err();
        assert_eq!(
            err,
            ResumeValidationError::InvalidExperiencePeriod {
                start: date(2020, 5),
                finish: date(2019, 1),
            }
        );
    }

    #[test]
    fn new_rejects_empty_title() {
        let err = Experience::new(date(2020, 5), date(2021, 1), "", None).unwrap_err();
        assert_eq!(err, ResumeValidationError::EmptyExperienceTitle);

        let blank = Experience::new(date(2020, 5), date(2021, 1), "  ", None).unwrap();
        assert_eq!(blank.title, "  ");
    }

    #[test]
    fn period_text_renders_month_and_year() {
        let experience = Experience::new(date(2010, 3), date(2012, 11), "Dev", None).unwrap();
        assert_eq!(experience.period_text(date(2024, 1)), "03/2010 - 11/2012");
    }

    #[test]
    fn future_finish_date_renders_as_current() {
        let experience = Experience::new(date(2022, 1), date(2030, 1), "Lead", None).unwrap();
        assert!(experience.is_current(date(2024, 6)));
        assert_eq!(experience.period_text(date(2024, 6)), "01/2022 - Now");
    }

    #[test]
    fn same_start_and_finish_is_valid() {
        assert!(Experience::new(date(2022, 1), date(2022, 1), "Intern", None).is_ok());
    }
}

use chrono::{Datelike, NaiveDate};

use crate::models::AgeGroup;

/// Age below which a user is bucketed as a teen
const ADULT_AGE: i32 = 20;

/// Derives a user's age and age group from their raw birth date.
///
/// Age is calendar-year arithmetic (current year minus birth year). Birth
/// dates that are absent or fail to parse count as age 0, which lands in the
/// teen bucket.
pub fn classify(birth_date: Option<&str>, today: NaiveDate) -> (i32, AgeGroup) {
    let age = birth_date
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .map(|born| today.year() - born.year())
        .unwrap_or(0);

    let group = if age < ADULT_AGE {
        AgeGroup::Teen
    } else {
        AgeGroup::Adult
    };

    (age, group)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_adult_classification() {
        let (age, group) = classify(Some("1990-03-01"), today());
        assert_eq!(age, 34);
        assert_eq!(group, AgeGroup::Adult);
    }

    #[test]
    fn test_teen_classification() {
        let (age, group) = classify(Some("2008-11-20"), today());
        assert_eq!(age, 16);
        assert_eq!(group, AgeGroup::Teen);
    }

    #[test]
    fn test_exact_boundary_is_adult() {
        let (age, group) = classify(Some("2004-12-31"), today());
        assert_eq!(age, 20);
        assert_eq!(group, AgeGroup::Adult);
    }

    #[test]
    fn test_unparseable_birth_date_counts_as_age_zero() {
        let (age, group) = classify(Some("not-a-date"), today());
        assert_eq!(age, 0);
        assert_eq!(group, AgeGroup::Teen);
    }

    #[test]
    fn test_missing_birth_date_counts_as_age_zero() {
        let (age, group) = classify(None, today());
        assert_eq!(age, 0);
        assert_eq!(group, AgeGroup::Teen);
    }
}

//! Statistics summary served by `GET /api/dashboard/stats`
//!
//! Three independent count-by-key views over the person table. Each view is
//! produced by its own grouping query; nothing ties the three together.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fixed age brackets used to bucket records for the age dimension
///
/// Brackets are disjoint and cover every non-negative age. They are not
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    /// 0 to 18 inclusive
    Minor,
    /// 19 to 35 inclusive
    YoungAdult,
    /// 36 to 60 inclusive
    Adult,
    /// Over 60
    Senior,
}

impl AgeBracket {
    /// All brackets, ordered by minimum age
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Minor,
        AgeBracket::YoungAdult,
        AgeBracket::Adult,
        AgeBracket::Senior,
    ];

    /// Bucket an age
    pub fn classify(age: u32) -> AgeBracket {
        match age {
            0..=18 => AgeBracket::Minor,
            19..=35 => AgeBracket::YoungAdult,
            36..=60 => AgeBracket::Adult,
            _ => AgeBracket::Senior,
        }
    }

    /// Inclusive lower bound
    pub fn min_age(self) -> u32 {
        match self {
            AgeBracket::Minor => 0,
            AgeBracket::YoungAdult => 19,
            AgeBracket::Adult => 36,
            AgeBracket::Senior => 61,
        }
    }

    /// Inclusive upper bound, `None` for the open-ended bracket
    pub fn max_age(self) -> Option<u32> {
        match self {
            AgeBracket::Minor => Some(18),
            AgeBracket::YoungAdult => Some(35),
            AgeBracket::Adult => Some(60),
            AgeBracket::Senior => None,
        }
    }

    /// Wire label (`"0-18"`, `"19-35"`, `"36-60"`, `"60+"`)
    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Minor => "0-18",
            AgeBracket::YoungAdult => "19-35",
            AgeBracket::Adult => "36-60",
            AgeBracket::Senior => "60+",
        }
    }

    /// Parse a wire label
    pub fn from_label(label: &str) -> Option<AgeBracket> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    /// SQL `CASE` expression mapping `column` to bracket labels
    ///
    /// Generated from the same bounds as [`AgeBracket::classify`] so the store
    /// and the in-process rule cannot disagree.
    pub fn sql_case(column: &str) -> String {
        let mut sql = String::from("CASE");
        for bracket in Self::ALL {
            if let Some(max) = bracket.max_age() {
                sql.push_str(&format!(
                    " WHEN {} BETWEEN {} AND {} THEN '{}'",
                    column,
                    bracket.min_age(),
                    max,
                    bracket.label()
                ));
            } else {
                sql.push_str(&format!(" ELSE '{}'", bracket.label()));
            }
        }
        sql.push_str(" END");
        sql
    }
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Record count for one profession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProfessionCount {
    pub profession: String,
    pub count: i64,
}

/// Record count for one age bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AgeRangeCount {
    pub age_range: String,
    pub count: i64,
}

/// Record count for one registration month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}

/// The three aggregate views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Ordered by count, highest first
    pub profession_stats: Vec<ProfessionCount>,
    /// Ordered by bracket minimum age
    pub age_range_stats: Vec<AgeRangeCount>,
    /// Ordered chronologically; months without records are absent
    pub monthly_stats: Vec<MonthCount>,
}

impl StatisticsSummary {
    /// True when no dimension has any entry
    pub fn is_empty(&self) -> bool {
        self.profession_stats.is_empty()
            && self.age_range_stats.is_empty()
            && self.monthly_stats.is_empty()
    }
}

/// Validate a month key and return it in canonical `YYYY-MM` form
///
/// Accepts a single-digit month (`2024-3`) and zero-pads it so that
/// lexicographic comparison stays chronological.
pub fn normalize_month_key(input: &str) -> Result<String> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| Error::InvalidInput(format!("Invalid month '{}', expected YYYY-MM", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(AgeBracket::classify(0), AgeBracket::Minor);
        assert_eq!(AgeBracket::classify(18), AgeBracket::Minor);
        assert_eq!(AgeBracket::classify(19), AgeBracket::YoungAdult);
        assert_eq!(AgeBracket::classify(35), AgeBracket::YoungAdult);
        assert_eq!(AgeBracket::classify(36), AgeBracket::Adult);
        assert_eq!(AgeBracket::classify(60), AgeBracket::Adult);
        assert_eq!(AgeBracket::classify(61), AgeBracket::Senior);
        assert_eq!(AgeBracket::classify(u32::MAX), AgeBracket::Senior);
    }

    #[test]
    fn test_classify_total_and_disjoint() {
        for age in 0..=150u32 {
            let containing: Vec<AgeBracket> = AgeBracket::ALL
                .into_iter()
                .filter(|b| age >= b.min_age() && b.max_age().map_or(true, |max| age <= max))
                .collect();
            assert_eq!(containing, vec![AgeBracket::classify(age)], "age {}", age);
        }
    }

    #[test]
    fn test_brackets_ordered_by_min_age() {
        let mins: Vec<u32> = AgeBracket::ALL.iter().map(|b| b.min_age()).collect();
        let mut sorted = mins.clone();
        sorted.sort_unstable();
        assert_eq!(mins, sorted);
    }

    #[test]
    fn test_label_round_trip() {
        for bracket in AgeBracket::ALL {
            assert_eq!(AgeBracket::from_label(bracket.label()), Some(bracket));
        }
        assert_eq!(AgeBracket::from_label("18-30"), None);
    }

    #[test]
    fn test_sql_case_expression() {
        assert_eq!(
            AgeBracket::sql_case("age"),
            "CASE WHEN age BETWEEN 0 AND 18 THEN '0-18' \
             WHEN age BETWEEN 19 AND 35 THEN '19-35' \
             WHEN age BETWEEN 36 AND 60 THEN '36-60' \
             ELSE '60+' END"
        );
    }

    #[test]
    fn test_summary_json_field_names() {
        let summary = StatisticsSummary {
            profession_stats: vec![ProfessionCount {
                profession: "Nurse".to_string(),
                count: 2,
            }],
            age_range_stats: vec![AgeRangeCount {
                age_range: "19-35".to_string(),
                count: 2,
            }],
            monthly_stats: vec![MonthCount {
                month: "2024-01".to_string(),
                count: 2,
            }],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["professionStats"][0]["profession"], "Nurse");
        assert_eq!(json["ageRangeStats"][0]["age_range"], "19-35");
        assert_eq!(json["monthlyStats"][0]["month"], "2024-01");
        assert_eq!(json["monthlyStats"][0]["count"], 2);
    }

    #[test]
    fn test_normalize_month_key() {
        assert_eq!(normalize_month_key("2024-02").unwrap(), "2024-02");
        assert_eq!(normalize_month_key("2024-2").unwrap(), "2024-02");
        assert!(normalize_month_key("2024-13").is_err());
        assert!(normalize_month_key("february").is_err());
    }
}

//! Statistics grouping queries
//!
//! Each dimension is one round trip. [`statistics_summary`] issues the three
//! in sequence without a shared transaction, so a concurrent insert can land
//! between them and the dimension totals may disagree.

use roster_common::stats::{AgeRangeCount, MonthCount, ProfessionCount};
use roster_common::{AgeBracket, Result, StatisticsSummary};
use sqlx::SqlitePool;

/// Count per profession, highest count first (name breaks ties)
pub async fn profession_stats(pool: &SqlitePool) -> Result<Vec<ProfessionCount>> {
    let rows = sqlx::query_as::<_, ProfessionCount>(
        r#"
        SELECT profession, COUNT(*) AS count
        FROM persons
        GROUP BY profession
        ORDER BY count DESC, profession ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count per age bracket, youngest bracket first
///
/// Brackets without records are absent.
pub async fn age_range_stats(pool: &SqlitePool) -> Result<Vec<AgeRangeCount>> {
    let sql = format!(
        "SELECT {} AS age_range, COUNT(*) AS count
         FROM persons
         GROUP BY age_range
         ORDER BY MIN(age) ASC",
        AgeBracket::sql_case("age")
    );

    let rows = sqlx::query_as::<_, AgeRangeCount>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Count per registration month (`YYYY-MM`, UTC), oldest first
///
/// Only months with at least one record appear.
pub async fn monthly_stats(pool: &SqlitePool) -> Result<Vec<MonthCount>> {
    let rows = sqlx::query_as::<_, MonthCount>(
        r#"
        SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
        FROM persons
        GROUP BY month
        ORDER BY month ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All three views, computed fresh
pub async fn statistics_summary(pool: &SqlitePool) -> Result<StatisticsSummary> {
    let profession_stats = profession_stats(pool).await?;
    let age_range_stats = age_range_stats(pool).await?;
    let monthly_stats = monthly_stats(pool).await?;

    Ok(StatisticsSummary {
        profession_stats,
        age_range_stats,
        monthly_stats,
    })
}

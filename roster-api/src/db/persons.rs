//! Person record queries

use chrono::{DateTime, Utc};
use roster_common::{NewPerson, PersonRecord, Result};
use sqlx::SqlitePool;

/// Insert a validated record and return it as stored
pub async fn insert_person(
    pool: &SqlitePool,
    person: &NewPerson,
    created_at: DateTime<Utc>,
) -> Result<PersonRecord> {
    let record = sqlx::query_as::<_, PersonRecord>(
        r#"
        INSERT INTO persons
            (first_name, last_name, birth_date, age, profession, address, phone, photo_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, first_name, last_name, birth_date, age, profession, address, phone, photo_url, created_at
        "#,
    )
    .bind(&person.first_name)
    .bind(&person.last_name)
    .bind(person.birth_date)
    .bind(person.age)
    .bind(&person.profession)
    .bind(&person.address)
    .bind(&person.phone)
    .bind(&person.photo_url)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// All records, newest first
pub async fn list_persons(pool: &SqlitePool) -> Result<Vec<PersonRecord>> {
    let records = sqlx::query_as::<_, PersonRecord>(
        r#"
        SELECT id, first_name, last_name, birth_date, age, profession, address, phone, photo_url, created_at
        FROM persons
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use roster_common::db::init_database;

    fn person(first_name: &str) -> NewPerson {
        NewPerson {
            first_name: first_name.to_string(),
            last_name: "Paredes".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            age: 34,
            profession: "Dentist".to_string(),
            address: "Calle Larga 5, Cuenca".to_string(),
            phone: "0991234567".to_string(),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("roster.db")).await.unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let first = insert_person(&pool, &person("Luis"), created_at).await.unwrap();
        let rosa = person("Rosa").with_photo_url("/uploads/a.png");
        let second = insert_person(&pool, &rosa, created_at).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.first_name, "Luis");
        assert_eq!(first.age, 34);
        assert_eq!(first.created_at, created_at);
        assert_eq!(first.photo_url, None);
        assert_eq!(second.photo_url.as_deref(), Some("/uploads/a.png"));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("roster.db")).await.unwrap();

        let older = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        insert_person(&pool, &person("Old"), older).await.unwrap();
        insert_person(&pool, &person("New"), newer).await.unwrap();
        insert_person(&pool, &person("SameTimeLater"), newer).await.unwrap();

        let names: Vec<String> = list_persons(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.first_name)
            .collect();
        assert_eq!(names, vec!["SameTimeLater", "New", "Old"]);
    }
}

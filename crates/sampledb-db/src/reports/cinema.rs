//! Cinema reports over cinemas, movies and screenings.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::Connection;
use sampledb_common::{Money, Result, ScreeningId};
use serde::Serialize;

use super::collect;
use super::table::{ReportRow, ReportTable};
use crate::executor::{self, Fetch};
use crate::models::{last_show_day, Movie};
use crate::queries::movies::map_movie;
use crate::tables::Table;

impl ReportRow for Movie {
    const COLUMNS: &'static [&'static str] =
        &["movie_id", "title", "genre", "duration_minutes", "rating"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.genre.clone(),
            self.duration_minutes.to_string(),
            self.rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
        ]
    }
}

/// A screening with its cinema and movie resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub screening_id: ScreeningId,
    pub cinema: String,
    pub movie: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub show_days: i64,
}

impl ReportRow for ScheduleEntry {
    const COLUMNS: &'static [&'static str] =
        &["screening_id", "cinema", "movie", "start_date", "end_date", "show_days"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.screening_id.to_string(),
            self.cinema.clone(),
            self.movie.clone(),
            self.start_date.to_string(),
            self.end_date.to_string(),
            self.show_days.to_string(),
        ]
    }
}

/// A screening in one particular cinema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CinemaScreening {
    pub screening_id: ScreeningId,
    pub title: String,
    pub genre: String,
    pub start_date: NaiveDate,
    pub show_days: i64,
    pub ticket_price: Money,
}

impl ReportRow for CinemaScreening {
    const COLUMNS: &'static [&'static str] =
        &["screening_id", "title", "genre", "start_date", "show_days", "ticket_price"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.screening_id.to_string(),
            self.title.clone(),
            self.genre.clone(),
            self.start_date.to_string(),
            self.show_days.to_string(),
            self.ticket_price.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSummary {
    pub genre: String,
    pub movie_count: i64,
    pub avg_duration_minutes: f64,
}

impl ReportRow for GenreSummary {
    const COLUMNS: &'static [&'static str] = &["genre", "movie_count", "avg_duration_minutes"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.genre.clone(),
            self.movie_count.to_string(),
            format!("{:.1}", self.avg_duration_minutes),
        ]
    }
}

/// Full contents of each given table, one result set per table.
///
/// Only identifiers from [`Table`] reach the statement text.
pub fn dump_tables(conn: &Connection, tables: &[Table]) -> Result<Vec<ReportTable>> {
    tables
        .iter()
        .map(|table| {
            let set = executor::execute(
                conn,
                &format!("SELECT * FROM {} ORDER BY 1", table.as_str()),
                &[],
                Fetch::Rows,
            )?
            .into_result_set();
            Ok(ReportTable::from_result_set(format!("Table: {}", table), &set))
        })
        .collect()
}

/// Movies of the given genre.
pub fn movies_by_genre(conn: &Connection, genre: &str) -> Result<Vec<Movie>> {
    collect(
        conn,
        "SELECT movie_id, title, genre, duration_minutes, rating
         FROM movies WHERE genre = :genre ORDER BY title",
        rusqlite::named_params! { ":genre": genre },
        map_movie,
    )
}

/// Movies whose genre is drama.
pub fn dramas(conn: &Connection) -> Result<Vec<Movie>> {
    movies_by_genre(conn, "drama")
}

/// Movies ordered from best to worst rating; unrated movies last.
pub fn top_rated(conn: &Connection) -> Result<Vec<Movie>> {
    collect(
        conn,
        "SELECT movie_id, title, genre, duration_minutes, rating
         FROM movies ORDER BY rating IS NULL, rating DESC, title",
        [],
        map_movie,
    )
}

/// Every screening with cinema and movie names, by start date.
pub fn schedule(conn: &Connection) -> Result<Vec<ScheduleEntry>> {
    collect(
        conn,
        "SELECT s.screening_id, c.name, m.title, s.start_date, s.show_days
         FROM screenings s
         JOIN cinemas c ON s.cinema_id = c.cinema_id
         JOIN movies m ON s.movie_id = m.movie_id
         ORDER BY s.start_date, s.screening_id",
        [],
        |row| {
            let start_date: NaiveDate = row.get(3)?;
            let show_days: i64 = row.get(4)?;
            let end_date = last_show_day(start_date, show_days).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    Type::Integer,
                    format!("{} show days from {} runs past the calendar", show_days, start_date)
                        .into(),
                )
            })?;
            Ok(ScheduleEntry {
                screening_id: ScreeningId::from(row.get::<_, i64>(0)?),
                cinema: row.get(1)?,
                movie: row.get(2)?,
                start_date,
                end_date,
                show_days,
            })
        },
    )
}

/// Screenings of the cinema with the given name.
pub fn cinema_screenings(conn: &Connection, cinema_name: &str) -> Result<Vec<CinemaScreening>> {
    collect(
        conn,
        "SELECT s.screening_id, m.title, m.genre, s.start_date, s.show_days, c.ticket_price_minor
         FROM screenings s
         JOIN cinemas c ON s.cinema_id = c.cinema_id
         JOIN movies m ON s.movie_id = m.movie_id
         WHERE c.name = :name
         ORDER BY s.start_date, s.screening_id",
        rusqlite::named_params! { ":name": cinema_name },
        |row| {
            Ok(CinemaScreening {
                screening_id: ScreeningId::from(row.get::<_, i64>(0)?),
                title: row.get(1)?,
                genre: row.get(2)?,
                start_date: row.get(3)?,
                show_days: row.get(4)?,
                ticket_price: Money::from_minor(row.get(5)?),
            })
        },
    )
}

/// Movie count and average duration per genre.
pub fn genre_summary(conn: &Connection) -> Result<Vec<GenreSummary>> {
    collect(
        conn,
        "SELECT genre, COUNT(*) AS movie_count, AVG(duration_minutes) AS avg_duration_minutes
         FROM movies
         GROUP BY genre
         ORDER BY genre",
        [],
        |row| {
            Ok(GenreSummary {
                genre: row.get(0)?,
                movie_count: row.get(1)?,
                avg_duration_minutes: row.get(2)?,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{init_memory_pool, DbPool};
    use crate::schema::create_tables;
    use crate::seed;
    use sampledb_common::{Error, Variant};

    fn seeded() -> DbPool {
        let pool = init_memory_pool().unwrap();
        {
            let conn = pool.get().unwrap();
            create_tables(&conn, Variant::Cinema).unwrap();
            seed::load_cinema(&conn).unwrap();
        }
        pool
    }

    #[test]
    fn test_dramas_returns_exactly_one() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let rows = dramas(&conn).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].genre, "drama");
        assert_eq!(rows[0].title, "Shadows of Forgotten Ancestors");
    }

    #[test]
    fn test_top_rated_order() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let titles: Vec<_> = top_rated(&conn)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Interstellar", "Shadows of Forgotten Ancestors", "Dovbush"]
        );
    }

    #[test]
    fn test_schedule_end_dates() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let rows = schedule(&conn).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].cinema, "Kyiv");
        assert_eq!(rows[0].end_date, NaiveDate::from_ymd_opt(2024, 11, 26).unwrap());
        assert_eq!(rows[3].movie, "Interstellar");
        assert_eq!(rows[3].end_date, NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
    }

    #[test]
    fn test_schedule_single_day_run() {
        let pool = seeded();
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO screenings (cinema_id, movie_id, start_date, show_days)
             VALUES (1, 1, '2025-01-10', 1)",
            [],
        )
        .unwrap();

        let rows = schedule(&conn).unwrap();

        let last = rows.last().unwrap();
        assert_eq!(last.start_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(last.end_date, last.start_date);
    }

    #[test]
    fn test_schedule_end_date_overflow_is_an_error() {
        let pool = seeded();
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO screenings (cinema_id, movie_id, start_date, show_days)
             VALUES (1, 1, '2024-11-20', 1000000000)",
            [],
        )
        .unwrap();

        let result = schedule(&conn);

        assert!(matches!(result, Err(Error::Query(_))));
    }

    #[test]
    fn test_cinema_screenings() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let rows = cinema_screenings(&conn, "Multiplex Lavina").unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Dovbush", "Interstellar"]);
        assert!(rows.iter().all(|r| r.ticket_price == Money::from_major(220)));

        assert!(cinema_screenings(&conn, "Nowhere").unwrap().is_empty());
    }

    #[test]
    fn test_genre_summary() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let rows = genre_summary(&conn).unwrap();

        let genres: Vec<_> = rows.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, vec!["drama", "historical", "sci-fi"]);
        assert!(rows.iter().all(|r| r.movie_count == 1));
        assert_eq!(rows[2].avg_duration_minutes, 169.0);
    }

    #[test]
    fn test_dump_tables() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let tables = dump_tables(&conn, Table::for_variant(Variant::Cinema)).unwrap();

        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].title, "Table: cinemas");
        assert_eq!(tables[0].columns[0], "cinema_id");
        assert_eq!(tables[1].rows.len(), 3);
        assert_eq!(tables[2].rows.len(), 4);
    }

    #[test]
    fn test_movie_cells() {
        let pool = seeded();
        let conn = pool.get().unwrap();

        let rows = dramas(&conn).unwrap();
        assert_eq!(rows[0].cells()[4], "8.0");
    }
}

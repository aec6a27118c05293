//! Screening database queries.

use rusqlite::{Connection, Row};
use sampledb_common::{CinemaId, MovieId, Result, ScreeningId};

use crate::models::{NewScreening, Screening};
use crate::sql_error;

fn map_screening(row: &Row<'_>) -> rusqlite::Result<Screening> {
    Ok(Screening {
        id: ScreeningId::from(row.get::<_, i64>(0)?),
        cinema_id: CinemaId::from(row.get::<_, i64>(1)?),
        movie_id: MovieId::from(row.get::<_, i64>(2)?),
        start_date: row.get(3)?,
        show_days: row.get(4)?,
    })
}

/// Schedule a movie in a cinema.
///
/// # Returns
///
/// * `Ok(Screening)` - The created screening
/// * `Err(Error::Constraint)` - Unknown cinema/movie or non-positive show days
pub fn create_screening(conn: &Connection, new: &NewScreening) -> Result<Screening> {
    conn.execute(
        "INSERT INTO screenings (cinema_id, movie_id, start_date, show_days)
         VALUES (:cinema_id, :movie_id, :start_date, :show_days)",
        rusqlite::named_params! {
            ":cinema_id": new.cinema_id.get(),
            ":movie_id": new.movie_id.get(),
            ":start_date": new.start_date,
            ":show_days": new.show_days,
        },
    )
    .map_err(sql_error)?;

    Ok(Screening {
        id: ScreeningId::from(conn.last_insert_rowid()),
        cinema_id: new.cinema_id,
        movie_id: new.movie_id,
        start_date: new.start_date,
        show_days: new.show_days,
    })
}

/// List all screenings ordered by start date.
pub fn list_screenings(conn: &Connection) -> Result<Vec<Screening>> {
    let mut stmt = conn
        .prepare(
            "SELECT screening_id, cinema_id, movie_id, start_date, show_days
             FROM screenings ORDER BY start_date, screening_id",
        )
        .map_err(sql_error)?;

    let screenings = stmt
        .query_map([], map_screening)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(screenings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCinema, NewMovie};
    use crate::pool::init_memory_pool;
    use crate::queries::{cinemas, movies};
    use crate::schema::create_tables;
    use chrono::NaiveDate;
    use sampledb_common::{Error, Money, Variant};

    fn setup(conn: &Connection) -> (CinemaId, MovieId) {
        create_tables(conn, Variant::Cinema).unwrap();
        let cinema = cinemas::create_cinema(
            conn,
            &NewCinema {
                name: "Kyiv",
                ticket_price: Money::from_major(150),
                seat_count: 300,
                address: None,
                phone: None,
            },
        )
        .unwrap();
        let movie = movies::create_movie(
            conn,
            &NewMovie {
                title: "Interstellar",
                genre: "sci-fi",
                duration_minutes: 169,
                rating: Some(8.7),
            },
        )
        .unwrap();
        (cinema.id, movie.id)
    }

    fn screening(cinema_id: CinemaId, movie_id: MovieId) -> NewScreening {
        NewScreening {
            cinema_id,
            movie_id,
            start_date: NaiveDate::from_ymd_opt(2024, 11, 22).unwrap(),
            show_days: 14,
        }
    }

    #[test]
    fn test_create_screening() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (cinema_id, movie_id) = setup(&conn);

        let created = create_screening(&conn, &screening(cinema_id, movie_id)).unwrap();

        assert_eq!(list_screenings(&conn).unwrap(), vec![created]);
    }

    #[test]
    fn test_unknown_movie_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (cinema_id, _) = setup(&conn);

        let err = create_screening(&conn, &screening(cinema_id, MovieId::from(42))).unwrap_err();
        assert!(matches!(err, Error::Constraint(_)));
    }

    #[test]
    fn test_deleting_cinema_cascades() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (cinema_id, movie_id) = setup(&conn);
        create_screening(&conn, &screening(cinema_id, movie_id)).unwrap();

        assert!(cinemas::delete_cinema(&conn, cinema_id).unwrap());

        assert!(list_screenings(&conn).unwrap().is_empty());
        assert!(movies::get_movie(&conn, movie_id).unwrap().is_some());
    }

    #[test]
    fn test_deleting_movie_cascades() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (cinema_id, movie_id) = setup(&conn);
        create_screening(&conn, &screening(cinema_id, movie_id)).unwrap();

        assert!(movies::delete_movie(&conn, movie_id).unwrap());

        assert!(list_screenings(&conn).unwrap().is_empty());
    }
}

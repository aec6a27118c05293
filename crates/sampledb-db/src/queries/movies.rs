//! Movie database queries.

use rusqlite::{Connection, Row};
use sampledb_common::{MovieId, Result};

use crate::models::{Movie, NewMovie};
use crate::sql_error;

pub(crate) fn map_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: MovieId::from(row.get::<_, i64>(0)?),
        title: row.get(1)?,
        genre: row.get(2)?,
        duration_minutes: row.get(3)?,
        rating: row.get(4)?,
    })
}

/// Round a rating to the single decimal place the schema keeps.
fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

/// Create a new movie. The rating is rounded to one decimal place.
pub fn create_movie(conn: &Connection, new: &NewMovie<'_>) -> Result<Movie> {
    let rating = new.rating.map(round_rating);

    conn.execute(
        "INSERT INTO movies (title, genre, duration_minutes, rating)
         VALUES (:title, :genre, :duration_minutes, :rating)",
        rusqlite::named_params! {
            ":title": new.title,
            ":genre": new.genre,
            ":duration_minutes": new.duration_minutes,
            ":rating": rating,
        },
    )
    .map_err(sql_error)?;

    Ok(Movie {
        id: MovieId::from(conn.last_insert_rowid()),
        title: new.title.to_string(),
        genre: new.genre.to_string(),
        duration_minutes: new.duration_minutes,
        rating,
    })
}

/// Get a movie by ID.
pub fn get_movie(conn: &Connection, id: MovieId) -> Result<Option<Movie>> {
    let result = conn.query_row(
        "SELECT movie_id, title, genre, duration_minutes, rating FROM movies WHERE movie_id = :id",
        rusqlite::named_params! { ":id": id.get() },
        map_movie,
    );

    match result {
        Ok(movie) => Ok(Some(movie)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// List all movies ordered by ID.
pub fn list_movies(conn: &Connection) -> Result<Vec<Movie>> {
    let mut stmt = conn
        .prepare("SELECT movie_id, title, genre, duration_minutes, rating FROM movies ORDER BY movie_id")
        .map_err(sql_error)?;

    let movies = stmt
        .query_map([], map_movie)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(movies)
}

/// Delete a movie (cascades to its screenings).
pub fn delete_movie(conn: &Connection, id: MovieId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM movies WHERE movie_id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(sql_error)?;

    Ok(rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use crate::schema::create_tables;
    use sampledb_common::{Error, Variant};

    #[test]
    fn test_create_movie_rounds_rating() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_tables(&conn, Variant::Cinema).unwrap();

        let created = create_movie(
            &conn,
            &NewMovie {
                title: "Interstellar",
                genre: "sci-fi",
                duration_minutes: 169,
                rating: Some(8.66),
            },
        )
        .unwrap();

        let found = get_movie(&conn, created.id).unwrap().unwrap();
        assert_eq!(found.rating, Some(8.7));
        assert_eq!(found, created);
    }

    #[test]
    fn test_rating_above_ten_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_tables(&conn, Variant::Cinema).unwrap();

        let err = create_movie(
            &conn,
            &NewMovie {
                title: "Too Good",
                genre: "drama",
                duration_minutes: 100,
                rating: Some(11.0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Constraint(_)));
    }

    #[test]
    fn test_unrated_movie() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_tables(&conn, Variant::Cinema).unwrap();

        let created = create_movie(
            &conn,
            &NewMovie {
                title: "Untitled",
                genre: "drama",
                duration_minutes: 90,
                rating: None,
            },
        )
        .unwrap();

        assert_eq!(list_movies(&conn).unwrap(), vec![created.clone()]);
        assert!(delete_movie(&conn, created.id).unwrap());
        assert!(list_movies(&conn).unwrap().is_empty());
    }
}

//! Pipeline integration tests against file-backed databases.

use sampledb::pipeline::{run_pipeline, PipelineOptions};
use sampledb::render::OutputFormat;
use sampledb_common::{Error, Variant};
use sampledb_db::pool::{get_conn, init_pool, PoolOptions};
use sampledb_db::reports::ReportParams;
use sampledb_db::tables::{count_rows, Table};
use tempfile::tempdir;

fn options(variant: Variant) -> PipelineOptions {
    PipelineOptions {
        variant,
        ..PipelineOptions::default()
    }
}

#[test]
fn data_survives_the_process() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shop.sqlite");
    let path = path.to_str().unwrap();

    {
        let pool = init_pool(path, PoolOptions::default()).unwrap();
        let conn = get_conn(&pool).unwrap();
        run_pipeline(&conn, &options(Variant::Commerce), &mut std::io::sink()).unwrap();
    }

    let pool = init_pool(path, PoolOptions::default()).unwrap();
    let conn = get_conn(&pool).unwrap();
    assert_eq!(count_rows(&conn, Table::Clients).unwrap(), 2);
    assert_eq!(count_rows(&conn, Table::Sales).unwrap(), 3);
}

#[test]
fn both_variants_share_one_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("both.sqlite");
    let pool = init_pool(path.to_str().unwrap(), PoolOptions::default()).unwrap();
    let conn = get_conn(&pool).unwrap();

    for variant in Variant::ALL {
        let summary = run_pipeline(&conn, &options(variant), &mut std::io::sink()).unwrap();
        assert!(summary.succeeded(), "{variant}: {:?}", summary.failures);
    }

    assert_eq!(count_rows(&conn, Table::Products).unwrap(), 3);
    assert_eq!(count_rows(&conn, Table::Screenings).unwrap(), 4);
}

#[test]
fn cinema_text_output_lists_every_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("films.sqlite");
    let pool = init_pool(path.to_str().unwrap(), PoolOptions::default()).unwrap();
    let conn = get_conn(&pool).unwrap();

    let mut out = Vec::new();
    let options = PipelineOptions {
        variant: Variant::Cinema,
        params: ReportParams {
            cinema_name: "Multiplex Lavina".into(),
            ..ReportParams::default()
        },
        format: OutputFormat::Text,
        reset: false,
    };
    run_pipeline(&conn, &options, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    for table in Table::for_variant(Variant::Cinema) {
        assert!(text.contains(&format!("== Table: {} ==", table)));
    }
    assert!(text.contains("Screenings of one cinema 'Multiplex Lavina'"));
    assert!(text.contains("Dovbush"));
}

#[test]
fn missing_directory_is_a_connection_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.sqlite");

    let Err(err) = init_pool(path.to_str().unwrap(), PoolOptions::default()) else {
        panic!("pool opened in a missing directory");
    };
    assert!(matches!(err, Error::Connection(_)));
}

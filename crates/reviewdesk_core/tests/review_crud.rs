use reviewdesk_core::db::{bootstrap_schema, open_db, open_db_in_memory};
use reviewdesk_core::{
    EmployeeId, RepoError, Review, ReviewRepository, ReviewStateError, ReviewValidationError,
    SqliteEmployeeRepository, SqliteReviewRepository,
};
use rusqlite::{params, Connection};

fn setup() -> (Connection, EmployeeId) {
    let conn = open_db_in_memory().unwrap();
    bootstrap_schema(&conn).unwrap();
    let employee = SqliteEmployeeRepository::new(&conn)
        .insert_employee("Lee", "Manager")
        .unwrap();
    (conn, employee.id)
}

#[test]
fn create_and_find_roundtrip() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let created = repo.create(2023, "ok", employee_id).unwrap();
    let id = created.id().unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id(), Some(id));
    assert_eq!(loaded.year(), 2023);
    assert_eq!(loaded.summary(), "ok");
    assert_eq!(loaded.employee_id(), employee_id);
    assert_eq!(loaded, created);
}

#[test]
fn find_by_id_returns_none_for_missing_row() {
    let (conn, _) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    assert!(repo.find_by_id(404).unwrap().is_none());
}

#[test]
fn construct_does_not_write() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let review = repo.new_review(2022, "pending", employee_id).unwrap();
    assert_eq!(review.id(), None);
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn construct_rejects_invalid_fields() {
    let (conn, employee_id) = setup();
    let repo = SqliteReviewRepository::new(&conn);

    let err = repo.new_review(1999, "fine", employee_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::YearTooEarly { year: 1999 })
    ));
    repo.new_review(2000, "fine", employee_id).unwrap();

    for summary in ["", "   "] {
        let err = repo.new_review(2020, summary, employee_id).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ReviewValidationError::BlankSummary)
        ));
    }

    let err = repo.new_review(2020, "fine", employee_id + 100).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::UnknownEmployee { .. })
    ));
}

#[test]
fn save_updates_persisted_review_in_place() {
    let (conn, employee_id) = setup();
    let second_employee = SqliteEmployeeRepository::new(&conn)
        .insert_employee("Sasha", "Engineer")
        .unwrap();
    let mut repo = SqliteReviewRepository::new(&conn);

    let mut review = repo.create(2021, "first draft", employee_id).unwrap();
    let id = review.id().unwrap();

    review.set_year(2022).unwrap();
    review.set_summary("final text").unwrap();
    review
        .set_employee_id(second_employee.id, &SqliteEmployeeRepository::new(&conn))
        .unwrap();
    assert_eq!(repo.save(&mut review).unwrap(), id);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.year(), 2022);
    assert_eq!(loaded.summary(), "final text");
    assert_eq!(loaded.employee_id(), second_employee.id);
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn update_and_delete_require_persisted_review() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let mut transient = repo.new_review(2024, "never saved", employee_id).unwrap();

    let err = repo.update(&mut transient).unwrap_err();
    assert!(matches!(
        err,
        RepoError::State(ReviewStateError::NotPersisted { action: "update" })
    ));
    let err = repo.delete(&mut transient).unwrap_err();
    assert!(matches!(
        err,
        RepoError::State(ReviewStateError::NotPersisted { action: "delete" })
    ));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn delete_removes_row_and_resets_id() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let mut review = repo.create(2023, "to remove", employee_id).unwrap();
    let id = review.id().unwrap();
    assert!(repo.tracked(id).is_some());

    repo.delete(&mut review).unwrap();

    assert_eq!(review.id(), None);
    assert!(repo.tracked(id).is_none());
    assert!(repo.find_by_id(id).unwrap().is_none());
}

#[test]
fn deleted_review_can_be_saved_again_as_new_row() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let mut review = repo.create(2023, "recycled", employee_id).unwrap();
    repo.delete(&mut review).unwrap();

    let new_id = repo.save(&mut review).unwrap();
    assert_eq!(review.id(), Some(new_id));
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn update_of_externally_deleted_row_returns_not_found() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let mut review = repo.create(2023, "gone soon", employee_id).unwrap();
    let id = review.id().unwrap();
    conn.execute("DELETE FROM reviews WHERE id = ?1;", [id])
        .unwrap();

    let err = repo.update(&mut review).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    let err = repo.delete(&mut review).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    assert_eq!(review.id(), Some(id));
}

#[test]
fn get_all_returns_every_review_in_id_order() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    let ids: Vec<_> = (0..4)
        .map(|offset| {
            repo.create(2020 + offset, &format!("review {offset}"), employee_id)
                .unwrap()
                .id()
                .unwrap()
        })
        .collect();

    let all = repo.get_all().unwrap();
    assert_eq!(all.len(), 4);
    let loaded_ids: Vec<_> = all.iter().filter_map(Review::id).collect();
    assert_eq!(loaded_ids, ids);
}

#[test]
fn find_by_employee_filters_rows() {
    let (conn, first) = setup();
    let second = SqliteEmployeeRepository::new(&conn)
        .insert_employee("Sasha", "Engineer")
        .unwrap()
        .id;
    let mut repo = SqliteReviewRepository::new(&conn);

    repo.create(2021, "a", first).unwrap();
    repo.create(2022, "b", second).unwrap();
    repo.create(2023, "c", first).unwrap();

    let reviews = repo.find_by_employee(first).unwrap();
    let years: Vec<_> = reviews.iter().map(Review::year).collect();
    assert_eq!(years, vec![2021, 2023]);
    assert!(repo.find_by_employee(second + 1).unwrap().is_empty());
}

#[test]
fn identity_map_tracks_saved_and_fetched_rows_per_repository() {
    let (conn, employee_id) = setup();
    let created_id = {
        let mut writer = SqliteReviewRepository::new(&conn);
        let review = writer.create(2023, "tracked", employee_id).unwrap();
        assert_eq!(writer.tracked_len(), 1);
        review.id().unwrap()
    };

    let mut reader = SqliteReviewRepository::new(&conn);
    assert_eq!(reader.tracked_len(), 0);

    reader.find_by_id(created_id).unwrap();
    assert_eq!(reader.tracked(created_id).unwrap().summary(), "tracked");

    conn.execute(
        "UPDATE reviews SET summary = 'changed elsewhere' WHERE id = ?1;",
        [created_id],
    )
    .unwrap();
    assert_eq!(reader.tracked(created_id).unwrap().summary(), "tracked");
}

#[test]
fn invalid_persisted_row_is_rejected_on_read() {
    let (conn, employee_id) = setup();
    conn.execute(
        "INSERT INTO reviews (id, year, summary, employee_id) VALUES (?1, ?2, ?3, ?4);",
        params![9, 1990, "legacy row", employee_id],
    )
    .unwrap();
    let mut repo = SqliteReviewRepository::new(&conn);

    let err = repo.find_by_id(9).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("reviews row 9")));
}

#[test]
fn null_columns_are_rejected_with_row_context() {
    let (conn, employee_id) = setup();
    conn.execute(
        "INSERT INTO reviews (id, year, summary, employee_id) VALUES (?1, ?2, NULL, ?3);",
        params![3, 2020, employee_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO reviews (id, year, summary, employee_id) VALUES (?1, NULL, ?2, ?3);",
        params![4, "no year", employee_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO reviews (id, year, summary, employee_id) VALUES (?1, ?2, ?3, NULL);",
        params![5, 2021, "no employee"],
    )
    .unwrap();
    let mut repo = SqliteReviewRepository::new(&conn);

    let err = repo.find_by_id(3).unwrap_err();
    assert!(
        matches!(&err, RepoError::InvalidData(message) if message == "reviews row 3: summary is NULL"),
        "unexpected error: {err}"
    );
    let err = repo.find_by_id(4).unwrap_err();
    assert!(matches!(&err, RepoError::InvalidData(message) if message.contains("year is NULL")));
    let err = repo.find_by_id(5).unwrap_err();
    assert!(
        matches!(&err, RepoError::InvalidData(message) if message.contains("employee_id is NULL"))
    );

    let err = repo.get_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.starts_with("reviews row 3")));
    assert_eq!(repo.tracked_len(), 0);
}

#[test]
fn foreign_key_violation_propagates_as_db_error() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);
    let mut review = repo.new_review(2023, "orphan", employee_id).unwrap();

    conn.execute("DELETE FROM employees WHERE id = ?1;", [employee_id])
        .unwrap();

    let err = repo.save(&mut review).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(review.id(), None);
}

#[test]
fn create_and_drop_table_are_idempotent() {
    let (conn, employee_id) = setup();
    let mut repo = SqliteReviewRepository::new(&conn);

    repo.create_table().unwrap();
    repo.create(2023, "kept", employee_id).unwrap();
    repo.create_table().unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 1);

    repo.drop_table().unwrap();
    repo.drop_table().unwrap();
    assert_eq!(repo.tracked_len(), 0);

    repo.create_table().unwrap();
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn reviews_persist_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.sqlite3");

    let (employee_id, review_id) = {
        let conn = open_db(&path).unwrap();
        bootstrap_schema(&conn).unwrap();
        let employee = SqliteEmployeeRepository::new(&conn)
            .insert_employee("Lee", "Manager")
            .unwrap();
        let mut repo = SqliteReviewRepository::new(&conn);
        let review = repo.create(2025, "durable", employee.id).unwrap();
        (employee.id, review.id().unwrap())
    };

    let conn = open_db(&path).unwrap();
    let mut repo = SqliteReviewRepository::new(&conn);
    let loaded = repo.find_by_id(review_id).unwrap().unwrap();
    assert_eq!(loaded.summary(), "durable");
    assert_eq!(loaded.employee_id(), employee_id);
}

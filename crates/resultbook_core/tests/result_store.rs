use chrono::NaiveDate;
use resultbook_core::{
    grade, FixedClock, Field, FieldErrorKind, Grade, MemoryPersistence, PersistenceAdapter,
    PersistenceError, RawResultInput, ResultStore, Stats, StoreError,
};

fn store() -> ResultStore<MemoryPersistence, FixedClock> {
    let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    ResultStore::with_clock(MemoryPersistence::new(), clock)
}

fn input(roll_no: &str, score: &str) -> RawResultInput {
    RawResultInput::new(roll_no, "Jane Doe", "2000-01-01", score)
}

#[test]
fn add_list_and_stats_scenario() {
    let mut store = store();

    let record = store
        .add(&RawResultInput::new("A1", "Jane Doe", "2000-01-01", "85"))
        .unwrap();
    assert_eq!(record.roll_no, "A1");
    assert_eq!(record.score, 85);
    assert_eq!(grade(record.score), Grade::B);

    let listed = store.list();
    assert_eq!(listed, vec![record]);
    assert_eq!(
        store.stats(),
        Stats {
            count: 1,
            average: 85.0,
            max: 85,
            min: 85
        }
    );
}

#[test]
fn duplicate_roll_no_in_other_case_is_rejected() {
    let mut store = store();
    store.add(&input("ab-1", "50")).unwrap();

    let err = store.add(&input("AB-1", "60")).unwrap_err();
    match err {
        StoreError::Validation(errors) => {
            assert_eq!(errors.kind(Field::RollNo), Some(FieldErrorKind::Duplicate));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.list().len(), 1);
}

#[test]
fn rejected_add_leaves_storage_untouched() {
    let mut store = store();
    store.add(&input("A1", "50")).unwrap();
    let before = store.adapter().payload().map(str::to_owned);

    let err = store.add(&input("A2", "150")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.adapter().payload().map(str::to_owned), before);
}

#[test]
fn rejected_add_on_empty_store_writes_nothing() {
    let mut store = store();
    store.add(&RawResultInput::default()).unwrap_err();
    assert!(store.adapter().payload().is_none());
}

#[test]
fn ids_are_unique_and_increasing_within_one_instant() {
    let mut store = store();
    let first = store.add(&input("A1", "10")).unwrap();
    let second = store.add(&input("A2", "20")).unwrap();
    let third = store.add(&input("A3", "30")).unwrap();
    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[test]
fn delete_is_idempotent() {
    let mut store = store();
    let keep = store.add(&input("A1", "10")).unwrap();
    let gone = store.add(&input("A2", "20")).unwrap();

    store.delete(gone.id).unwrap();
    let once = store.list();
    store.delete(gone.id).unwrap();
    let twice = store.list();

    assert_eq!(once, twice);
    assert_eq!(twice, vec![keep]);
}

#[test]
fn delete_of_unknown_id_is_a_noop() {
    let mut store = store();
    store.add(&input("A1", "10")).unwrap();
    let before = store.adapter().payload().map(str::to_owned);
    store.delete(42).unwrap();
    assert_eq!(store.adapter().payload().map(str::to_owned), before);
}

#[test]
fn list_sorts_by_roll_no_regardless_of_insertion_order() {
    let mut store = store();
    for roll_no in ["c3", "A1", "b2", "B1", "10"] {
        store.add(&input(roll_no, "50")).unwrap();
    }

    let rolls: Vec<String> = store.list().into_iter().map(|r| r.roll_no).collect();
    assert_eq!(rolls, vec!["10", "A1", "B1", "b2", "c3"]);
}

#[test]
fn list_does_not_rewrite_storage_order() {
    let mut store = store();
    store.add(&input("Z9", "50")).unwrap();
    store.add(&input("A1", "50")).unwrap();
    let _ = store.list();

    let stored: Vec<String> = store
        .adapter()
        .load()
        .into_iter()
        .map(|r| r.roll_no)
        .collect();
    assert_eq!(stored, vec!["Z9", "A1"]);
}

#[test]
fn clear_all_empties_the_store() {
    let mut store = store();
    store.add(&input("A1", "50")).unwrap();
    store.add(&input("A2", "70")).unwrap();

    store.clear_all().unwrap();

    assert!(store.list().is_empty());
    assert_eq!(store.stats(), Stats::default());
}

#[test]
fn date_of_birth_of_today_is_accepted() {
    let mut store = store();
    let record = store
        .add(&RawResultInput::new("A1", "Jane Doe", "2026-10-19", "50"))
        .unwrap();
    assert_eq!(record.dob, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
}

fn store_with_payload(payload: &str) -> ResultStore<MemoryPersistence, FixedClock> {
    let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    ResultStore::with_clock(MemoryPersistence::with_payload(payload), clock)
}

#[test]
fn bad_record_does_not_cost_the_good_ones_on_add() {
    let mut store = store_with_payload(
        r#"[
            {"id":1,"rollNo":"A1","studentName":"Jane Doe","dob":"2000-01-01","score":85},
            {"id":2,"rollNo":"B1","studentName":"John Roe","dob":"2001-05-06","score":40},
            {"id":3,"rollNo":"C1","studentName":"Ann Lee","dob":"2002-07-08","score":null}
        ]"#,
    );
    assert_eq!(store.list().len(), 2);

    let err = store.add(&input("a1", "70")).unwrap_err();
    match err {
        StoreError::Validation(errors) => {
            assert_eq!(errors.kind(Field::RollNo), Some(FieldErrorKind::Duplicate));
        }
        other => panic!("unexpected error: {other}"),
    }

    let added = store.add(&input("D1", "70")).unwrap();
    let rolls: Vec<String> = store.list().into_iter().map(|r| r.roll_no).collect();
    assert_eq!(rolls, vec!["A1", "B1", "D1"]);
    assert!(added.id > 3);
}

#[test]
fn unreadable_payload_is_listed_empty_but_never_overwritten() {
    let mut store = store_with_payload("oops");
    assert!(store.list().is_empty());
    assert_eq!(store.stats(), Stats::default());

    let err = store.add(&input("A1", "50")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Persistence(PersistenceError::Corrupt(_))
    ));
    let err = store.delete(1).unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));

    assert_eq!(store.adapter().payload(), Some("oops"));
}

#[test]
fn clear_all_recovers_from_unreadable_payload() {
    let mut store = store_with_payload("oops");
    store.clear_all().unwrap();
    store.add(&input("A1", "50")).unwrap();
    assert_eq!(store.list().len(), 1);
}

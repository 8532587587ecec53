//! Tests for the table state engine.

use super::*;
use crate::model::CellValue;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u32,
    name: String,
    age: Option<u32>,
}

impl Row for Person {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn person(id: u32, name: &str, age: Option<u32>) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
    }
}

fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("name", "Name", |p: &Person| CellValue::from(p.name.as_str())).sortable(),
        Column::new("age", "Age", |p: &Person| CellValue::from(p.age)).sortable(),
    ]
}

fn people(n: u32) -> Vec<Person> {
    (1..=n)
        .map(|i| person(i, &format!("person{i}"), Some(20 + i)))
        .collect()
}

fn page_size(n: usize) -> PageSize {
    PageSize::new(n).unwrap()
}

fn table(rows: Vec<Person>, config: TableConfig) -> TableState<Person> {
    TableState::new(columns(), config)
        .unwrap()
        .with_rows(rows)
        .unwrap()
}

type Calls = Rc<RefCell<Vec<Vec<u32>>>>;

/// Attach an observer that records the ids of every notification.
fn record_calls(table: &mut TableState<Person>) -> Calls {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    table.set_observer(move |rows: &[Person]| {
        sink.borrow_mut().push(rows.iter().map(|p| p.id).collect());
    });
    calls
}

fn page_ids(table: &TableState<Person>) -> Vec<u32> {
    table.view().page_slice.iter().map(|p| p.id).collect()
}

// ===== Construction =====

#[test]
fn new_table_starts_unsorted_unselected_on_page_one() {
    let table = table(people(3), TableConfig::default());
    assert_eq!(table.sort(), None);
    assert!(table.selection().is_empty());
    assert_eq!(table.current_page(), 1);
    assert_eq!(page_ids(&table), vec![1, 2, 3]);
}

#[test]
fn duplicate_column_keys_are_rejected() {
    let mut cols = columns();
    cols.push(Column::new("age", "Age again", |p: &Person| CellValue::from(p.age)));
    let err = TableState::new(cols, TableConfig::default()).unwrap_err();
    assert_eq!(err, GridError::DuplicateColumnKey { key: "age".into() });
}

#[test]
fn duplicate_row_ids_are_rejected_and_state_kept() {
    let mut table = table(people(2), TableConfig::default());
    let err = table
        .set_rows(vec![person(7, "a", None), person(7, "b", None)])
        .unwrap_err();
    assert_eq!(err, GridError::DuplicateRowId { id: "7".into() });
    assert_eq!(table.rows().len(), 2);
}

// ===== Sorting =====

#[test]
fn header_activation_sorts_ascending_then_descending() {
    let mut table = table(
        vec![
            person(1, "a", Some(30)),
            person(2, "b", Some(25)),
            person(3, "c", Some(35)),
        ],
        TableConfig::default(),
    );

    let outcome = table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    assert!(outcome.is_changed());
    assert_eq!(page_ids(&table), vec![2, 1, 3]);

    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    assert_eq!(page_ids(&table), vec![3, 1, 2]);
    assert_eq!(table.sort(), Some(&SortConfig::descending("age")));
}

#[test]
fn third_activation_returns_to_ascending() {
    let mut table = table(people(3), TableConfig::default());
    for _ in 0..3 {
        table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    }
    assert_eq!(table.sort(), Some(&SortConfig::ascending("age")));
}

#[test]
fn clear_sort_restores_insertion_order() {
    let mut table = table(people(3), TableConfig::default());
    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    assert_eq!(page_ids(&table), vec![3, 2, 1]);

    assert!(table.handle(TableEvent::ClearSort).unwrap().is_changed());
    assert_eq!(page_ids(&table), vec![1, 2, 3]);
    assert!(!table.handle(TableEvent::ClearSort).unwrap().is_changed());
}

#[test]
fn unknown_header_is_a_noop() {
    let mut table = table(people(3), TableConfig::default());
    let outcome = table.handle(TableEvent::HeaderActivated("salary".into())).unwrap();
    assert_eq!(outcome, EventOutcome::Unchanged);
    assert_eq!(table.sort(), None);
}

#[test]
fn sort_does_not_reset_page() {
    let mut table = table(people(10), TableConfig::default().with_page_size(page_size(3)));
    table.handle(TableEvent::GoToPage(2)).unwrap();
    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    assert_eq!(table.current_page(), 2);
}

// ===== Selection =====

#[test]
fn select_all_then_clear_notifies_with_full_payloads() {
    let mut table = table(people(6), TableConfig::default().with_page_size(page_size(2)));
    let calls = record_calls(&mut table);

    table.handle(TableEvent::SelectAllActivated).unwrap();
    assert!(table.view().all_selected);

    table.handle(TableEvent::SelectAllActivated).unwrap();
    assert!(table.selection().is_empty());

    assert_eq!(
        *calls.borrow(),
        vec![vec![1, 2, 3, 4, 5, 6], Vec::<u32>::new()]
    );
}

#[test]
fn single_mode_keeps_one_selected_row() {
    let mut table = table(
        people(3),
        TableConfig::default().with_selection_mode(SelectionMode::Single),
    );
    let calls = record_calls(&mut table);

    table.handle(TableEvent::RowActivated(1)).unwrap();
    table.handle(TableEvent::RowActivated(2)).unwrap();
    assert_eq!(table.selected_rows(), vec![person(2, "person2", Some(22))]);

    table.handle(TableEvent::RowActivated(2)).unwrap();
    assert!(table.selection().is_empty());
    assert_eq!(*calls.borrow(), vec![vec![1], vec![2], vec![]]);
}

#[test]
fn select_all_is_ignored_in_single_mode() {
    let mut table = table(
        people(3),
        TableConfig::default().with_selection_mode(SelectionMode::Single),
    );
    let calls = record_calls(&mut table);
    let outcome = table.handle(TableEvent::SelectAllActivated).unwrap();
    assert_eq!(outcome, EventOutcome::Unchanged);
    assert!(calls.borrow().is_empty());
}

#[test]
fn observer_receives_rows_in_input_order_not_click_order() {
    let mut table = table(people(5), TableConfig::default());
    let calls = record_calls(&mut table);

    table.handle(TableEvent::RowActivated(4)).unwrap();
    table.handle(TableEvent::RowActivated(2)).unwrap();

    assert_eq!(calls.borrow().last(), Some(&vec![2, 4]));
}

#[test]
fn observer_payload_ignores_sort_order() {
    let mut table = table(people(4), TableConfig::default());
    let calls = record_calls(&mut table);
    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
    table.handle(TableEvent::HeaderActivated("age".into())).unwrap();

    table.handle(TableEvent::RowActivated(4)).unwrap();
    table.handle(TableEvent::RowActivated(1)).unwrap();

    assert_eq!(calls.borrow().last(), Some(&vec![1, 4]));
}

#[test]
fn selection_survives_page_changes() {
    let mut table = table(people(6), TableConfig::default().with_page_size(page_size(2)));
    table.handle(TableEvent::RowActivated(1)).unwrap();
    table.handle(TableEvent::NextPage).unwrap();
    table.handle(TableEvent::RowActivated(3)).unwrap();
    table.handle(TableEvent::NextPage).unwrap();

    let view = table.view();
    assert_eq!(view.selected_ids, vec![1, 3]);
    assert!(view.partially_selected);
    assert!(!view.all_selected);
}

#[test]
fn unknown_row_id_is_an_error_and_selection_unchanged() {
    let mut table = table(people(3), TableConfig::default());
    let calls = record_calls(&mut table);
    table.handle(TableEvent::RowActivated(1)).unwrap();

    let err = table.handle(TableEvent::RowActivated(99)).unwrap_err();
    assert_eq!(err, GridError::UnknownRowId { id: "99".into() });
    assert_eq!(table.view().selected_ids, vec![1]);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn non_selectable_table_ignores_selection_events() {
    let mut table = table(people(3), TableConfig::default().with_selectable(false));
    let calls = record_calls(&mut table);

    assert_eq!(
        table.handle(TableEvent::RowActivated(1)).unwrap(),
        EventOutcome::Unchanged
    );
    assert_eq!(
        table.handle(TableEvent::SelectAllActivated).unwrap(),
        EventOutcome::Unchanged
    );
    assert!(table.selection().is_empty());
    assert!(calls.borrow().is_empty());
}

#[test]
fn clear_selection_notifies_once() {
    let mut table = table(people(3), TableConfig::default());
    table.handle(TableEvent::RowActivated(2)).unwrap();
    let calls = record_calls(&mut table);

    assert!(table.handle(TableEvent::ClearSelection).unwrap().is_changed());
    assert!(!table.handle(TableEvent::ClearSelection).unwrap().is_changed());
    assert_eq!(*calls.borrow(), vec![Vec::<u32>::new()]);
}

#[test]
fn replacing_rows_prunes_missing_selected_ids() {
    let mut table = table(people(4), TableConfig::default());
    table.handle(TableEvent::RowActivated(2)).unwrap();
    table.handle(TableEvent::RowActivated(4)).unwrap();
    let calls = record_calls(&mut table);

    table.set_rows(people(3)).unwrap();

    assert_eq!(table.view().selected_ids, vec![2]);
    assert_eq!(*calls.borrow(), vec![vec![2]]);
}

#[test]
fn replacing_rows_keeping_selected_ids_does_not_notify() {
    let mut table = table(people(4), TableConfig::default());
    table.handle(TableEvent::RowActivated(2)).unwrap();
    let calls = record_calls(&mut table);

    table.set_rows(people(5)).unwrap();
    assert!(calls.borrow().is_empty());
}

// ===== Pagination =====

#[test]
fn paging_walks_through_rows_and_clamps() {
    let mut table = table(people(5), TableConfig::default().with_page_size(page_size(2)));
    assert_eq!(table.total_pages(), 3);

    assert_eq!(
        table.handle(TableEvent::PrevPage).unwrap(),
        EventOutcome::Unchanged
    );
    table.handle(TableEvent::NextPage).unwrap();
    assert_eq!(page_ids(&table), vec![3, 4]);
    table.handle(TableEvent::LastPage).unwrap();
    assert_eq!(page_ids(&table), vec![5]);
    assert_eq!(
        table.handle(TableEvent::NextPage).unwrap(),
        EventOutcome::Unchanged
    );
    table.handle(TableEvent::GoToPage(0)).unwrap();
    assert_eq!(table.current_page(), 1);
    table.handle(TableEvent::GoToPage(42)).unwrap();
    assert_eq!(table.current_page(), 3);
    table.handle(TableEvent::FirstPage).unwrap();
    assert_eq!(table.current_page(), 1);
}

#[test]
fn shrinking_rows_clamps_current_page() {
    let config = TableConfig::default()
        .with_page_size(page_size(2))
        .with_page_reset(PageResetPolicy::Clamp);
    let mut table = table(people(10), config);
    table.handle(TableEvent::GoToPage(5)).unwrap();
    assert_eq!(table.current_page(), 5);

    table.set_rows(people(3)).unwrap();

    assert_eq!(table.current_page(), 2);
    assert_eq!(page_ids(&table), vec![3]);
}

#[test]
fn row_count_change_resets_to_first_page_by_default() {
    let mut table = table(people(10), TableConfig::default().with_page_size(page_size(2)));
    table.handle(TableEvent::GoToPage(3)).unwrap();

    table.set_rows(people(9)).unwrap();
    assert_eq!(table.current_page(), 1);
}

#[test]
fn same_row_count_keeps_page_under_reset_policy() {
    let mut table = table(people(10), TableConfig::default().with_page_size(page_size(2)));
    table.handle(TableEvent::GoToPage(3)).unwrap();

    table.set_rows(people(10)).unwrap();
    assert_eq!(table.current_page(), 3);
}

// ===== Loading and empty =====

#[test]
fn loading_view_skips_derivation() {
    let mut table = table(people(3), TableConfig::default());
    table.set_loading(true);

    let view = table.view();
    assert!(view.loading);
    assert!(view.page_slice.is_empty());
    assert_eq!(view.total_pages, 1);
    assert!(!view.is_empty);

    table.set_loading(false);
    assert_eq!(page_ids(&table), vec![1, 2, 3]);
}

#[test]
fn empty_table_reports_empty_with_one_page() {
    let table = table(Vec::new(), TableConfig::default());
    let view = table.view();
    assert!(view.is_empty);
    assert!(!view.loading);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.empty_message, "No data available");
    assert!(!view.all_selected);
}

#[test]
fn select_all_on_empty_table_notifies_with_nothing() {
    let mut table = table(Vec::new(), TableConfig::default());
    let calls = record_calls(&mut table);
    let outcome = table.handle(TableEvent::SelectAllActivated).unwrap();
    assert_eq!(outcome, EventOutcome::Unchanged);
    assert_eq!(*calls.borrow(), vec![Vec::<u32>::new()]);
}

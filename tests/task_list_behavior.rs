use chrono::NaiveDate;
use grumblebug::error::CommandError;
use grumblebug::model::TaskKind;
use grumblebug::store::TaskList;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn list_of(n: usize) -> TaskList {
    let mut list = TaskList::new();
    for i in 1..=n {
        list.add_todo(&format!("task {}", i));
    }
    list
}

#[test]
fn test_mark_then_unmark_restores_state() {
    let mut list = list_of(4);
    list.mark(3).unwrap();
    let before: Vec<bool> = list.iter().map(|t| t.is_done).collect();

    for i in 1..=4 {
        let original = list.get(i).unwrap().is_done;
        list.mark(i as i64).unwrap();
        assert!(list.get(i).unwrap().is_done);
        list.unmark(i as i64).unwrap();
        assert!(!list.get(i).unwrap().is_done);
        if original {
            list.mark(i as i64).unwrap();
        }
    }

    let after: Vec<bool> = list.iter().map(|t| t.is_done).collect();
    assert_eq!(before, after);
}

#[test]
fn test_bounds_are_one_based() {
    let mut list = list_of(2);
    assert!(matches!(
        list.mark(0),
        Err(CommandError::IndexOutOfRange { index: 0, len: 2 })
    ));
    assert!(matches!(
        list.unmark(3),
        Err(CommandError::IndexOutOfRange { index: 3, len: 2 })
    ));
    assert!(matches!(
        list.delete(-5),
        Err(CommandError::IndexOutOfRange { .. })
    ));
    assert!(list.get(0).is_none());
    assert!(list.get(3).is_none());
    assert_eq!(list.len(), 2);
}

#[test]
fn test_delete_shifts_later_tasks_down() {
    let mut list = list_of(4);
    let removed = list.delete(2).unwrap();
    assert_eq!(removed.description, "task 2");
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(2).unwrap().description, "task 3");
    assert_eq!(list.get(3).unwrap().description, "task 4");
}

#[test]
fn test_delete_from_the_end_empties_list() {
    let mut list = list_of(5);
    for i in (1..=5).rev() {
        let before = list.len();
        list.delete(i).unwrap();
        assert_eq!(list.len(), before - 1);
    }
    assert!(list.is_empty());
    assert_eq!(list.render(), "Nothing on the list. Lazy, huh?");
}

#[test]
fn test_add_event_rejects_reversed_dates() {
    let mut list = list_of(1);
    let snapshot = list.clone();

    let result = list.add_event("trip", date(2024, 5, 3), date(2024, 5, 1));
    assert!(matches!(result, Err(CommandError::LogicalOrder)));
    assert_eq!(list, snapshot);

    list.add_event("trip", date(2024, 5, 1), date(2024, 5, 3)).unwrap();
    assert_eq!(
        list.get(2).unwrap().kind,
        TaskKind::Event {
            start: date(2024, 5, 1),
            end: date(2024, 5, 3)
        }
    );
}

#[test]
fn test_render_numbers_every_task() {
    let mut list = TaskList::new();
    list.add_todo("buy milk");
    list.add_deadline("submit", date(2024, 5, 1));
    list.add_event("trip", date(2024, 5, 1), date(2024, 5, 3));
    list.mark(2).unwrap();

    assert_eq!(
        list.render(),
        "1.[T][ ] buy milk\n\
         2.[D][X] submit (by: 2024-05-01)\n\
         3.[E][ ] trip (from: 2024-05-01 to: 2024-05-03)"
    );
}

#[test]
fn test_find_is_case_sensitive_substring() {
    let mut list = TaskList::new();
    list.add_todo("buy milk");
    list.add_todo("Milkshake");
    list.add_todo("buttermilk pancakes");

    assert_eq!(
        list.find_matches("milk"),
        "1.[T][ ] buy milk\n3.[T][ ] buttermilk pancakes"
    );
    assert_eq!(list.find_matches("Milk"), "2.[T][ ] Milkshake");
    assert_eq!(list.find_matches("tea"), "Nothing matches that. Typical.");
}

mod common;

use chrono::{Duration, Utc};
use task_tracker::{EmptyState, Filter, Priority, TaskFields};

#[test]
fn listing_orders_by_completion_priority_and_due_date() {
    // Arrange
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("alice").unwrap();
    let today = Utc::now().date_naive();
    let repo = session.tasks_mut().unwrap();
    let d = repo
        .create(TaskFields::new("D").priority(Priority::Medium))
        .unwrap();
    repo.toggle_complete(d.id());
    repo.create(TaskFields::new("C").priority(Priority::Low))
        .unwrap();
    repo.create(
        TaskFields::new("B")
            .priority(Priority::High)
            .due_date(Some(today + Duration::days(2))),
    )
    .unwrap();
    repo.create(
        TaskFields::new("A")
            .priority(Priority::High)
            .due_date(Some(today + Duration::days(1))),
    )
    .unwrap();

    // Act
    let visible = session.visible_tasks().unwrap();

    // Assert
    let titles: Vec<&str> = visible.iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D"]);
}

#[test]
fn search_finds_tasks_case_insensitively() {
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("alice").unwrap();
    let repo = session.tasks_mut().unwrap();
    repo.create(TaskFields::new("Buy Milk")).unwrap();
    repo.create(TaskFields::new("Gym").category("Health")).unwrap();

    session.set_search("milk");
    let milk: Vec<String> = session
        .visible_tasks()
        .unwrap()
        .iter()
        .map(|task| task.title().to_string())
        .collect();
    session.set_search("HEALTH");
    let health: Vec<String> = session
        .visible_tasks()
        .unwrap()
        .iter()
        .map(|task| task.title().to_string())
        .collect();

    assert_eq!(milk, vec!["Buy Milk"]);
    assert_eq!(health, vec!["Gym"]);
}

#[test]
fn empty_states_depend_on_search_then_filter() {
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("alice").unwrap();

    assert_eq!(session.empty_state().unwrap(), Some(EmptyState::NoTasks));

    session.tasks_mut().unwrap().create(TaskFields::new("Open")).unwrap();
    session.set_filter(Filter::Completed);
    assert_eq!(session.empty_state().unwrap(), Some(EmptyState::NoCompletedTasks));

    session.set_search("zzz");
    assert_eq!(session.empty_state().unwrap(), Some(EmptyState::NoSearchResults));

    session.set_search("");
    session.set_filter(Filter::Pending);
    assert_eq!(session.empty_state().unwrap(), None);
}

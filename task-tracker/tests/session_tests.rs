mod common;

use std::fs;
use task_tracker::storage::{TASKS_KEY, USER_KEY};
use task_tracker::{Filter, Priority, SessionError, SessionState, Task, TaskFields};

#[test]
fn tasks_survive_logout_and_relogin() {
    // Arrange
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("alice").unwrap();
    let repo = session.tasks_mut().unwrap();
    repo.create(TaskFields::new("Water plants")).unwrap();
    repo.create(TaskFields::new("Buy Milk").priority(Priority::High)).unwrap();
    let before = session.tasks().unwrap().list().to_vec();

    // Act
    session.logout();
    assert!(matches!(session.tasks(), Err(SessionError::NotLoggedIn)));
    session.login("alice").unwrap();

    // Assert
    assert_eq!(session.tasks().unwrap().list(), before.as_slice());
}

#[test]
fn a_new_process_resumes_the_saved_session() {
    let dir = common::setup_dir();
    {
        let mut session = common::open_session(&dir);
        session.login("bob").unwrap();
        session
            .tasks_mut()
            .unwrap()
            .create(TaskFields::new("Call mum"))
            .unwrap();
    }

    let session = common::open_session(&dir);

    assert_eq!(session.state(), SessionState::LoggedIn);
    assert_eq!(session.user().unwrap().username(), "bob");
    assert_eq!(session.tasks().unwrap().list()[0].title(), "Call mum");
}

#[test]
fn after_logout_a_new_process_starts_logged_out() {
    let dir = common::setup_dir();
    {
        let mut session = common::open_session(&dir);
        session.login("bob").unwrap();
        session.logout();
    }

    let session = common::open_session(&dir);

    assert_eq!(session.state(), SessionState::LoggedOut);
    assert!(!dir.path().join(format!("{}.json", USER_KEY)).exists());
}

#[test]
fn every_mutation_is_written_through_as_a_json_array() {
    // Arrange
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("carol").unwrap();
    let tasks_file = dir.path().join(format!("{}.json", TASKS_KEY));
    let read_stored = || -> Vec<Task> {
        serde_json::from_str(&fs::read_to_string(&tasks_file).unwrap()).unwrap()
    };

    // Act + Assert
    let repo = session.tasks_mut().unwrap();
    let task = repo.create(TaskFields::new("Draft")).unwrap();
    assert_eq!(read_stored().len(), 1);

    repo.toggle_complete(task.id());
    assert!(read_stored()[0].is_completed());

    repo.update(task.id(), TaskFields::new("Final")).unwrap();
    assert_eq!(read_stored()[0].title(), "Final");

    repo.delete(task.id());
    assert!(read_stored().is_empty());
}

#[test]
fn corrupted_task_file_degrades_to_an_empty_collection() {
    let dir = common::setup_dir();
    fs::write(dir.path().join(format!("{}.json", TASKS_KEY)), "not json at all").unwrap();
    let mut session = common::open_session(&dir);

    session.login("dave").unwrap();

    assert!(session.tasks().unwrap().list().is_empty());
}

#[test]
fn corrupted_user_file_starts_logged_out() {
    let dir = common::setup_dir();
    fs::write(dir.path().join(format!("{}.json", USER_KEY)), "[1, 2").unwrap();

    let session = common::open_session(&dir);

    assert_eq!(session.state(), SessionState::LoggedOut);
}

#[test]
fn view_state_resets_on_logout() {
    let dir = common::setup_dir();
    let mut session = common::open_session(&dir);
    session.login("erin").unwrap();
    session.set_filter(Filter::Pending);
    session.set_search("milk");

    session.logout();
    session.login("erin").unwrap();

    assert_eq!(session.view().filter, Filter::All);
    assert_eq!(session.view().search, "");
    assert!(!session.view().form_open);
}

#[test]
fn blank_and_duplicate_stored_records_do_not_block_toggling() {
    // Arrange
    let dir = common::setup_dir();
    let record = |title: &str| {
        format!(
            r#"{{"id":"x","title":"{}","description":"","completed":false,"priority":"medium","category":"Work","createdAt":"2025-01-01T12:00:00Z","updatedAt":"2025-01-01T12:00:00Z"}}"#,
            title
        )
    };
    fs::write(
        dir.path().join(format!("{}.json", TASKS_KEY)),
        format!("[{},{}]", record("   "), record("dup")),
    )
    .unwrap();
    let mut session = common::open_session(&dir);
    session.login("alice").unwrap();

    // Act
    let toggled = session.tasks_mut().unwrap().toggle_complete("x");

    // Assert
    assert_eq!(toggled.unwrap().title(), "dup");
    let tasks = session.tasks().unwrap().list();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].is_completed());
}

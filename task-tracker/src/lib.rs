//! A personal task tracker: a single user's task list, persisted locally,
//! with filtered, searchable and consistently ordered views.
pub mod clock;
pub mod config;
pub mod render;
pub mod repository;
pub mod session;
pub mod storage;
pub mod task;
pub mod user;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use repository::TaskRepository;
pub use session::{Session, SessionError, SessionState, ViewState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, TaskStore};
pub use task::{DEFAULT_CATEGORY, Priority, SUGGESTED_CATEGORIES, Task, TaskError, TaskFields};
pub use user::User;
pub use view::{EmptyState, Filter, TaskCounts};

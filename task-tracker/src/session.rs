use crate::clock::Clock;
use crate::repository::TaskRepository;
use crate::storage::{KeyValueStore, TaskStore};
use crate::task::Task;
use crate::user::{self, User};
use crate::view::{self, EmptyState, Filter, TaskCounts};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidUser(#[from] user::Error),
    #[error("Not logged in; run `task-tracker login <username>` first")]
    NotLoggedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Transient view settings. Reset on logout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: Filter,
    pub search: String,
    pub form_open: bool,
}

/// Owns the login state and, through it, access to the task repository.
pub struct Session<S, C> {
    store: TaskStore<S>,
    repository: TaskRepository<S, C>,
    user: Option<User>,
    view: ViewState,
    dark_mode: bool,
}

impl<S: KeyValueStore + Clone, C: Clock> Session<S, C> {
    /// Starts a session, logging straight back in if a user was saved.
    #[tracing::instrument(skip_all)]
    pub fn restore(store: S, clock: C) -> Self {
        let store = TaskStore::new(store);
        let mut session = Self {
            repository: TaskRepository::new(store.clone(), clock),
            user: store.load_user(),
            dark_mode: store.load_dark_mode(),
            view: ViewState::default(),
            store,
        };
        if let Some(user) = &session.user {
            tracing::debug!("Restored session for {}", user.username());
            session.repository.hydrate();
        }
        session
    }

    pub fn state(&self) -> SessionState {
        match self.user {
            Some(_) => SessionState::LoggedIn,
            None => SessionState::LoggedOut,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[tracing::instrument(skip(self))]
    pub fn login(&mut self, username: &str) -> Result<&User, SessionError> {
        let user = User::new(username)?;
        if let Err(err) = self.store.save_user(&user) {
            tracing::warn!("Failed to persist user {}: {}", user.username(), err);
        }
        self.repository.hydrate();
        tracing::info!("Logged in as {}", user.username());
        Ok(self.user.insert(user))
    }

    /// Forgets the saved user and resets everything transient. Stored tasks
    /// are left in place for the next login.
    #[tracing::instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear_user() {
            tracing::warn!("Failed to clear saved user: {}", err);
        }
        if let Some(user) = self.user.take() {
            tracing::info!("Logged out {}", user.username());
        }
        self.repository.clear();
        self.view = ViewState::default();
    }

    pub fn tasks(&self) -> Result<&TaskRepository<S, C>, SessionError> {
        match self.user {
            Some(_) => Ok(&self.repository),
            None => Err(SessionError::NotLoggedIn),
        }
    }

    pub fn tasks_mut(&mut self) -> Result<&mut TaskRepository<S, C>, SessionError> {
        match self.user {
            Some(_) => Ok(&mut self.repository),
            None => Err(SessionError::NotLoggedIn),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.view.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    pub fn open_form(&mut self) {
        self.view.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.view.form_open = false;
    }

    /// The current collection through the current filter and search.
    pub fn visible_tasks(&self) -> Result<Vec<&Task>, SessionError> {
        let tasks = self.tasks()?.list();
        Ok(view::visible_tasks(tasks, self.view.filter, &self.view.search))
    }

    pub fn empty_state(&self) -> Result<Option<EmptyState>, SessionError> {
        let visible = self.visible_tasks()?;
        Ok(view::empty_state(&visible, self.view.filter, &self.view.search))
    }

    pub fn counts(&self) -> Result<TaskCounts, SessionError> {
        Ok(TaskCounts::from_tasks(self.tasks()?.list()))
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        if let Err(err) = self.store.save_dark_mode(self.dark_mode) {
            tracing::warn!("Failed to persist theme preference: {}", err);
        }
        self.dark_mode
    }
}

use task_tracker::{FileStore, Session, SystemClock};
use tempfile::TempDir;

pub fn setup_dir() -> TempDir {
    tempfile::tempdir().expect("cannot create temporary data directory")
}

pub fn open_session(dir: &TempDir) -> Session<FileStore, SystemClock> {
    Session::restore(FileStore::new(dir.path()), SystemClock)
}

//! Test utilities for the client crate.
//!
//! Shared by unit tests (in `src/`), integration tests (in `tests/`) and
//! doctests. Only compiled for tests or with the `test-support` feature.

pub mod cap_fs {
    //! Capability-scoped file helpers for tests.
    //!
    //! Tests read and seed credential documents through `cap_std::fs::Dir`
    //! rather than ambient `std::fs` calls.

    use std::io;

    use camino::Utf8Path;
    use cap_std::{ambient_authority, fs::Dir};

    fn open_parent(path: &Utf8Path) -> io::Result<(Dir, &str)> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
        })?;
        let parent = path
            .parent()
            .filter(|dir_path| !dir_path.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        Ok((Dir::open_ambient_dir(parent, ambient_authority())?, file_name))
    }

    /// Read a UTF-8 file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use globaldorm_client::test_support::UsersWorkspace;
    /// use globaldorm_client::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let workspace = UsersWorkspace::new()?;
    /// write_file(workspace.path(), "[]")?;
    /// assert_eq!(read_file_to_string(workspace.path())?, "[]");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(path: &Utf8Path) -> io::Result<String> {
        let (dir, file_name) = open_parent(path)?;
        dir.read_to_string(file_name)
    }

    /// Create or truncate a file with `contents`.
    pub fn write_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        let (dir, file_name) = open_parent(path)?;
        dir.write(file_name, contents)
    }

    /// Whether `path` names an existing entry.
    #[must_use]
    pub fn path_exists(path: &Utf8Path) -> bool {
        open_parent(path).is_ok_and(|(dir, file_name)| dir.exists(file_name))
    }
}

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use crate::domain::RoomRequest;
use crate::domain::ports::{RoomResponse, RoomTransport, RoomTransportError};

/// Scratch directory holding a not-yet-created `users.json`.
#[derive(Debug)]
pub struct UsersWorkspace {
    _temp: TempDir,
    path: Utf8PathBuf,
}

impl UsersWorkspace {
    /// Create a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> io::Result<Self> {
        let temp = TempDir::new()?;
        let path = Utf8PathBuf::from_path_buf(temp.path().join("users.json")).map_err(|path| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("temporary path {} is not UTF-8", path.display()),
            )
        })?;
        Ok(Self { _temp: temp, path })
    }

    /// Path of the credential document inside the workspace.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Room transport double that records requests and replays queued answers.
///
/// When the queue is empty every request receives `200 []`.
#[derive(Debug, Default)]
pub struct StubRoomTransport {
    responses: Mutex<VecDeque<Result<RoomResponse, RoomTransportError>>>,
    requests: Mutex<Vec<RoomRequest>>,
}

impl StubRoomTransport {
    /// Queue a response for the next unanswered request.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(RoomResponse::new(status, body)));
        self
    }

    /// Queue a transport failure for the next unanswered request.
    #[must_use]
    pub fn with_failure(self, error: RoomTransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, answer: Result<RoomResponse, RoomTransportError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(answer);
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RoomRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RoomTransport for StubRoomTransport {
    async fn send(&self, request: &RoomRequest) -> Result<RoomResponse, RoomTransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(RoomResponse::new(200, "[]")))
    }
}

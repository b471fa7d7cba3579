/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The identity a request is made with.
///
/// Threaded explicitly through resolution and mutation entry points;
/// there is no ambient "current user" state anywhere in this workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// No authenticated identity. Only system defaults apply.
    Anonymous,
    /// An authenticated user and the role names the gateway granted it.
    User { user_id: DbId, roles: Vec<String> },
}

impl Viewer {
    /// The user id, or `None` for anonymous viewers.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { user_id, .. } => Some(*user_id),
        }
    }

    /// Role names granted to this viewer. Empty for anonymous viewers.
    pub fn roles(&self) -> &[String] {
        match self {
            Viewer::Anonymous => &[],
            Viewer::User { roles, .. } => roles,
        }
    }
}

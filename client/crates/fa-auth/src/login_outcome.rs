use crate::Session;

/// What a successful sign-in hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: Session,
    /// The backend wants the user to pick a username next.
    pub needs_username: bool,
}

/// The one-time message the backend expects signed.
///
/// Consumed by signing so a challenge cannot be reused across attempts.
#[derive(Debug, PartialEq, Eq)]
pub struct NonceChallenge(String);

impl NonceChallenge {
    pub(crate) fn new(message: String) -> Self {
        Self(message)
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

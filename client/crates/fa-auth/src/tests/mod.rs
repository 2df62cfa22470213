mod errors;
mod username;

use crate::{Session, UserProfile};

pub(crate) const ADDRESS: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCd1234";

pub(crate) fn sample_session() -> Session {
    Session::new(
        "tok1",
        Some("ref1".to_string()),
        Some(UserProfile {
            id: Some(7),
            display_name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            username: Some("ada".to_string()),
            ..UserProfile::default()
        }),
    )
}

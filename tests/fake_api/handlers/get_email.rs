//! GET /api/emails/{id}
//!
//! Fetching an unread inbox message marks it read, matching the real
//! server's behavior.

use crate::fake_api::state::ApiState;

pub fn handle_get_email(state: &mut ApiState, user: &str, id: &str) -> (u16, serde_json::Value) {
    let Some(email) = state
        .emails
        .iter_mut()
        .find(|e| e.owner == user && e.id == id)
    else {
        return (404, serde_json::json!({ "detail": "Email not found" }));
    };

    if email.folder == "inbox" && !email.read {
        email.read = true;
    }

    (200, email.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_api::state::StateBuilder;

    #[test]
    fn fetch_marks_inbox_mail_read() {
        let mut state = StateBuilder::new()
            .account("bob@example.com", "pw")
            .email("inbox", "a@x.com", "Hi", "body", false)
            .build();
        let id = state.emails[0].id.clone();

        let (status, body) = handle_get_email(&mut state, "bob@example.com", &id);

        assert_eq!(status, 200);
        assert_eq!(body["read"], true);
        assert!(state.emails[0].read);
    }

    #[test]
    fn fetch_outside_inbox_leaves_read_flag() {
        let mut state = StateBuilder::new()
            .account("bob@example.com", "pw")
            .email("drafts", "bob@example.com", "Draft", "wip", false)
            .build();
        let id = state.emails[0].id.clone();

        let (_, body) = handle_get_email(&mut state, "bob@example.com", &id);
        assert_eq!(body["read"], false);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut state = StateBuilder::new().account("bob@example.com", "pw").build();
        let (status, _) = handle_get_email(&mut state, "bob@example.com", "email_404");
        assert_eq!(status, 404);
    }

    #[test]
    fn cannot_fetch_another_users_mail() {
        let mut state = StateBuilder::new()
            .account("bob@example.com", "pw")
            .email("inbox", "a@x.com", "Secret", "body", false)
            .account("eve@example.com", "pw")
            .build();
        let id = state.emails[0].id.clone();

        let (status, _) = handle_get_email(&mut state, "eve@example.com", &id);
        assert_eq!(status, 404);
    }
}

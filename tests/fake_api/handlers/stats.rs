//! GET /api/account/stats

use crate::fake_api::state::{ApiState, VALID_FOLDERS};

pub fn handle_stats(state: &ApiState, user: &str) -> (u16, serde_json::Value) {
    let mut body = serde_json::Map::new();

    for folder in VALID_FOLDERS {
        let count = state
            .emails
            .iter()
            .filter(|e| e.owner == user && e.folder == folder)
            .count();
        body.insert(folder.to_string(), count.into());
    }

    let unread = state
        .emails
        .iter()
        .filter(|e| e.owner == user && e.folder == "inbox" && !e.read)
        .count();
    body.insert("unread".to_string(), unread.into());

    let (used, quota) = state
        .account(user)
        .map_or((0, 1000), |acc| (acc.storage_used, acc.storage_quota));
    body.insert("storage_used".to_string(), used.into());
    body.insert("storage_quota".to_string(), quota.into());

    (200, serde_json::Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_api::state::StateBuilder;

    #[test]
    fn counts_per_folder_and_unread() {
        let state = StateBuilder::new()
            .account("bob@example.com", "pw")
            .email("inbox", "a@x.com", "One", "b", false)
            .email("inbox", "b@x.com", "Two", "b", true)
            .email("sent", "bob@example.com", "Three", "b", true)
            .build();

        let (status, body) = handle_stats(&state, "bob@example.com");

        assert_eq!(status, 200);
        assert_eq!(body["inbox"], 2);
        assert_eq!(body["sent"], 1);
        assert_eq!(body["drafts"], 0);
        assert_eq!(body["unread"], 1);
        assert_eq!(body["storage_quota"], 1000);
    }

    #[test]
    fn empty_account_is_all_zeroes() {
        let state = StateBuilder::new().account("bob@example.com", "pw").build();
        let (_, body) = handle_stats(&state, "bob@example.com");

        for folder in VALID_FOLDERS {
            assert_eq!(body[folder], 0);
        }
        assert_eq!(body["unread"], 0);
    }
}

//! POST /api/emails/send
//!
//! Stores the message in the sender's sent folder and delivers a copy
//! to the inbox of every recipient that has an account here.

use crate::fake_api::state::{ApiState, StoredEmail};
use chrono::Utc;

fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn handle_send(
    state: &mut ApiState,
    user: &str,
    payload: &serde_json::Value,
) -> (u16, serde_json::Value) {
    let to = string_list(payload.get("to"));
    let cc = string_list(payload.get("cc"));
    let subject = payload["subject"].as_str().unwrap_or_default().to_string();
    let body = payload["body"].as_str().unwrap_or_default().to_string();

    let email_id = state.fresh_email_id();
    let now = Utc::now();

    state.emails.push(StoredEmail {
        id: email_id.clone(),
        owner: user.to_string(),
        from: user.to_string(),
        to: to.clone(),
        cc: cc.clone(),
        subject: subject.clone(),
        body: body.clone(),
        timestamp: now,
        read: true,
        folder: "sent".to_string(),
    });

    // Local delivery for recipients we know about.
    let recipients: Vec<String> = to
        .iter()
        .chain(cc.iter())
        .filter(|addr| state.account(addr).is_some())
        .cloned()
        .collect();
    for recipient in recipients {
        let id = state.fresh_email_id();
        state.emails.push(StoredEmail {
            id,
            owner: recipient.clone(),
            from: user.to_string(),
            to: vec![recipient],
            cc: cc.clone(),
            subject: subject.clone(),
            body: body.clone(),
            timestamp: now,
            read: false,
            folder: "inbox".to_string(),
        });
    }

    (
        200,
        serde_json::json!({
            "success": true,
            "email_id": email_id,
            "message": "Email sent successfully",
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_api::state::StateBuilder;

    #[test]
    fn send_lands_in_sent_folder() {
        let mut state = StateBuilder::new().account("bob@example.com", "pw").build();
        let payload = serde_json::json!({
            "to": ["stranger@elsewhere.com"],
            "subject": "Hi",
            "body": "text",
            "cc": [],
            "bcc": [],
        });

        let (status, body) = handle_send(&mut state, "bob@example.com", &payload);

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        let sent = state.folder_emails("bob@example.com", "sent");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Hi");
        assert!(sent[0].read);
    }

    #[test]
    fn known_recipient_gets_an_unread_inbox_copy() {
        let mut state = StateBuilder::new()
            .account("bob@example.com", "pw")
            .account("alice@example.com", "pw")
            .build();
        let payload = serde_json::json!({
            "to": ["alice@example.com"],
            "subject": "Lunch",
            "body": "Today?",
            "cc": [],
            "bcc": [],
        });

        handle_send(&mut state, "bob@example.com", &payload);

        let inbox = state.folder_emails("alice@example.com", "inbox");
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].from, "bob@example.com");
        assert!(!inbox[0].read);
    }

    #[test]
    fn unknown_recipient_gets_nothing_locally() {
        let mut state = StateBuilder::new().account("bob@example.com", "pw").build();
        let payload = serde_json::json!({
            "to": ["ghost@nowhere.com"],
            "subject": "Hello?",
            "body": "",
            "cc": [],
            "bcc": [],
        });

        handle_send(&mut state, "bob@example.com", &payload);
        assert_eq!(state.emails.len(), 1); // sender's copy only
    }
}

//! Fabricated seed data for the mock directory

use super::directory::{AccountStatus, MockAccount, MockDirectory};
use crate::folder::Folder;
use crate::types::EmailMessage;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Usernames offered as suggestions in the bulk-creation workflow.
pub const SAMPLE_USERNAMES: [&str; 10] = [
    "amit.sharma",
    "priya.patel",
    "rajesh.kumar",
    "john.smith",
    "emma.johnson",
    "michael.brown",
    "sophia.davis",
    "olivia.wilson",
    "lucas.jackson",
    "charlotte.martin",
];

fn ts(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap_or_else(|_| Utc::now())
}

fn message(
    id: &str,
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    timestamp: &str,
    read: bool,
    folder: Folder,
) -> EmailMessage {
    EmailMessage {
        id: id.to_string(),
        from: from.to_string(),
        to: vec![to.to_string()],
        cc: Vec::new(),
        bcc: Vec::new(),
        subject: subject.to_string(),
        body: body.to_string(),
        timestamp: ts(timestamp),
        read,
        folder,
        attachments: Vec::new(),
    }
}

fn account(
    id: &str,
    username: &str,
    password: &str,
    created_at: &str,
    folders: HashMap<Folder, Vec<EmailMessage>>,
) -> MockAccount {
    let mut full = HashMap::new();
    for folder in Folder::ALL {
        full.insert(folder, Vec::new());
    }
    full.extend(folders);

    MockAccount {
        id: id.to_string(),
        email: format!("{username}@yourdomain.com"),
        username: username.to_string(),
        password: password.to_string(),
        status: AccountStatus::Active,
        created_at: ts(created_at),
        folders: full,
    }
}

/// Build the seeded directory: two accounts with a handful of mail.
pub(super) fn seed() -> MockDirectory {
    let mut dir = MockDirectory::new();

    dir.push_seed_account(account(
        "acc_1",
        "john.doe",
        "password123",
        "2024-01-15T10:30:00Z",
        HashMap::from([
            (
                Folder::Inbox,
                vec![
                    message(
                        "email_1",
                        "client@example.com",
                        "john.doe@yourdomain.com",
                        "Welcome to our platform",
                        "Thank you for joining our platform. We're excited to have you on board!",
                        "2024-01-20T14:30:00Z",
                        false,
                        Folder::Inbox,
                    ),
                    message(
                        "email_2",
                        "support@business.com",
                        "john.doe@yourdomain.com",
                        "Your account has been verified",
                        "Congratulations! Your account has been successfully verified.",
                        "2024-01-19T11:15:00Z",
                        true,
                        Folder::Inbox,
                    ),
                ],
            ),
            (
                Folder::Sent,
                vec![message(
                    "email_3",
                    "john.doe@yourdomain.com",
                    "manager@company.com",
                    "Project Update",
                    "Here's the latest update on the project progress.",
                    "2024-01-18T16:45:00Z",
                    true,
                    Folder::Sent,
                )],
            ),
        ]),
    ));

    dir.push_seed_account(account(
        "acc_2",
        "sarah.wilson",
        "secure456",
        "2024-01-16T09:15:00Z",
        HashMap::from([
            (
                Folder::Inbox,
                vec![message(
                    "email_4",
                    "newsletter@tech.com",
                    "sarah.wilson@yourdomain.com",
                    "Weekly Tech Newsletter",
                    "This week's top tech stories and trends.",
                    "2024-01-21T08:00:00Z",
                    false,
                    Folder::Inbox,
                )],
            ),
            (
                Folder::Drafts,
                vec![message(
                    "email_5",
                    "sarah.wilson@yourdomain.com",
                    "team@project.com",
                    "Meeting Notes",
                    "Draft of meeting notes from yesterday's discussion.",
                    "2024-01-20T17:30:00Z",
                    true,
                    Folder::Drafts,
                )],
            ),
        ]),
    ));

    dir.reserve_ids(3, 6);
    dir
}

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use agenda_core::clock::FixedClock;
use agenda_core::gateway::memory::MemoryStore;

use super::*;

fn user_service() -> UserService {
    UserService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap())),
    )
}

fn ana() -> RegisterUser {
    RegisterUser {
        name: "Ana".to_string(),
        email: "ana@salon.com".to_string(),
        password: "s3cret-pass".to_string(),
        role: Role::Client,
    }
}

#[test_log::test(tokio::test)]
async fn registered_user_keeps_only_the_hash() {
    let users = user_service();

    let user = users.register(ana()).await.unwrap();

    assert_eq!(user.id(), Some(1));
    assert!(user.is_client());
    assert_eq!(user.email().as_str(), "ana@salon.com");
    assert_ne!(user.password_hash(), "s3cret-pass");
    assert_eq!(users.find(1).await.unwrap(), user);
}

#[test_log::test(tokio::test)]
async fn duplicate_email_is_a_conflict() {
    let users = user_service();
    users.register(ana()).await.unwrap();

    let err = users
        .register(RegisterUser {
            name: "Ana Paula".to_string(),
            role: Role::Admin,
            ..ana()
        })
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(matches!(err, ServiceError::EmailTaken(ref email) if email == "ana@salon.com"));
}

#[test_log::test(tokio::test)]
async fn invalid_registrations_are_input_errors() {
    let users = user_service();

    for (request, message) in [
        (
            RegisterUser {
                email: "ana-at-salon".to_string(),
                ..ana()
            },
            "Invalid user: invalid email format",
        ),
        (
            RegisterUser {
                password: "12345".to_string(),
                ..ana()
            },
            "Invalid user: password must be at least 6 characters",
        ),
        (
            RegisterUser {
                name: " ".to_string(),
                ..ana()
            },
            "Invalid user: name is required",
        ),
    ] {
        let err = users.register(request).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), message);
    }

    assert!(users.find(1).await.unwrap_err().is_not_found());
}

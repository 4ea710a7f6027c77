use rolegate_core::AppError;
use rolegate_domain::{Role, UserId};

use crate::test_support::{FakeUserRepository, harness, harness_with};
use crate::{CreateUserInput, LoginUserInput, PublicUser, UpdateUserInput, UserService};

fn registration(email: &str) -> CreateUserInput {
    CreateUserInput {
        email: email.to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        password: "analytical-engine".to_owned(),
    }
}

async fn register(service: &UserService, email: &str) -> PublicUser {
    service
        .create(registration(email))
        .await
        .unwrap_or_else(|error| panic!("registration failed: {error}"))
}

#[tokio::test]
async fn create_normalizes_email_and_assigns_user_role() {
    let harness = harness();
    let user = register(&harness.user_service, "  Ada@Example.COM ").await;

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.roles, vec!["user".to_owned()]);

    let stored = harness.repository.stored("ada@example.com").await;
    assert_eq!(
        stored.map(|record| record.password_hash),
        Some("hashed:analytical-engine".to_owned())
    );
}

#[tokio::test]
async fn create_duplicate_email_is_validation_error_naming_email() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;

    let result = harness
        .user_service
        .create(registration("ADA@example.com"))
        .await;

    match result {
        Err(AppError::Validation(message)) => {
            assert_eq!(message, "email ada@example.com is already registered");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(harness.repository.len().await, 1);
}

#[tokio::test]
async fn create_hides_raw_store_errors() {
    let harness = harness_with(FakeUserRepository::failing_inserts());

    let result = harness
        .user_service
        .create(registration("ada@example.com"))
        .await;

    match result {
        Err(AppError::Internal(message)) => {
            assert_eq!(message, "failed to create user");
        }
        other => panic!("expected internal error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_rejects_weak_password_before_writing() {
    let harness = harness();
    let mut input = registration("ada@example.com");
    input.password = "short".to_owned();

    let result = harness.user_service.create(input).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(harness.repository.write_count(), 0);
}

#[tokio::test]
async fn find_by_email_matches_any_case() {
    let harness = harness();
    let created = register(&harness.user_service, "ada@example.com").await;

    let found = harness.user_service.find_by_email("ADA@Example.com").await;
    assert_eq!(found.ok().map(|user| user.id), Some(created.id));
}

#[tokio::test]
async fn find_missing_user_is_not_found() {
    let harness = harness();

    let by_email = harness.user_service.find_by_email("ghost@example.com").await;
    assert!(matches!(by_email, Err(AppError::NotFound(_))));

    let by_id = harness.user_service.find_by_id(UserId::new()).await;
    assert!(matches!(by_id, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_returns_users_in_email_order() {
    let harness = harness();
    register(&harness.user_service, "zed@example.com").await;
    register(&harness.user_service, "amy@example.com").await;

    let users = harness.user_service.list().await.unwrap_or_default();
    let emails: Vec<&str> = users.iter().map(|user| user.email.as_str()).collect();
    assert_eq!(emails, vec!["amy@example.com", "zed@example.com"]);
}

#[tokio::test]
async fn update_with_empty_patch_returns_existing_without_write() {
    let harness = harness();
    let created = register(&harness.user_service, "ada@example.com").await;
    let writes_before = harness.repository.write_count();

    let updated = harness
        .user_service
        .update("ada@example.com", UpdateUserInput::default())
        .await;

    assert_eq!(updated.ok(), Some(created));
    assert_eq!(harness.repository.write_count(), writes_before);
}

#[tokio::test]
async fn update_never_changes_email_or_roles() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;
    let writes_before = harness.repository.write_count();

    let updated = harness
        .user_service
        .update(
            "ada@example.com",
            UpdateUserInput {
                email: Some("other@example.com".to_owned()),
                roles: Some(vec!["admin".to_owned()]),
                ..UpdateUserInput::default()
            },
        )
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert_eq!(updated.email, "ada@example.com");
    assert_eq!(updated.roles, vec!["user".to_owned()]);
    assert_eq!(harness.repository.write_count(), writes_before);
}

#[tokio::test]
async fn update_applies_names_and_rehashes_password() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;

    let updated = harness
        .user_service
        .update(
            "ADA@example.com",
            UpdateUserInput {
                first_name: Some(" Augusta ".to_owned()),
                last_name: Some("   ".to_owned()),
                password: Some("difference-engine".to_owned()),
                ..UpdateUserInput::default()
            },
        )
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.last_name, "Lovelace");

    let stored = harness.repository.stored("ada@example.com").await;
    assert_eq!(
        stored.map(|record| record.password_hash),
        Some("hashed:difference-engine".to_owned())
    );
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let harness = harness();
    let result = harness
        .user_service
        .update(
            "ghost@example.com",
            UpdateUserInput {
                first_name: Some("Casper".to_owned()),
                ..UpdateUserInput::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn remove_deletes_user_and_reports_missing() {
    let harness = harness();
    let created = register(&harness.user_service, "ada@example.com").await;

    let removed = harness.user_service.remove("Ada@Example.com").await;
    assert_eq!(removed.ok().map(|user| user.id), Some(created.id));
    assert_eq!(harness.repository.len().await, 0);

    let again = harness.user_service.remove("ada@example.com").await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn add_role_is_idempotent() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;

    let first = harness
        .user_service
        .add_role(Role::Admin, "ada@example.com")
        .await;
    assert!(first.is_ok());
    let writes_after_first = harness.repository.write_count();

    let second = harness
        .user_service
        .add_role(Role::Admin, "ada@example.com")
        .await
        .unwrap_or_else(|error| panic!("add_role failed: {error}"));

    let admin_count = second.roles.iter().filter(|role| *role == "admin").count();
    assert_eq!(admin_count, 1);
    assert_eq!(second.roles, vec!["user".to_owned(), "admin".to_owned()]);
    assert_eq!(harness.repository.write_count(), writes_after_first);
}

#[tokio::test]
async fn remove_role_absent_is_noop() {
    let harness = harness();
    let created = register(&harness.user_service, "ada@example.com").await;
    let writes_before = harness.repository.write_count();

    let result = harness
        .user_service
        .remove_role(Role::Admin, "ada@example.com")
        .await;

    assert_eq!(result.ok(), Some(created));
    assert_eq!(harness.repository.write_count(), writes_before);
}

#[tokio::test]
async fn remove_role_filters_role_out() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;
    let _ = harness
        .user_service
        .add_role(Role::Admin, "ada@example.com")
        .await;

    let result = harness
        .user_service
        .remove_role(Role::Admin, "ada@example.com")
        .await
        .unwrap_or_else(|error| panic!("remove_role failed: {error}"));

    assert_eq!(result.roles, vec!["user".to_owned()]);
}

#[tokio::test]
async fn remove_last_role_is_rejected() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;

    let result = harness
        .user_service
        .remove_role(Role::User, "ada@example.com")
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn role_changes_on_missing_user_are_not_found() {
    let harness = harness();

    let added = harness
        .user_service
        .add_role(Role::Admin, "ghost@example.com")
        .await;
    assert!(matches!(added, Err(AppError::NotFound(_))));

    let removed = harness
        .user_service
        .remove_role(Role::Admin, "ghost@example.com")
        .await;
    assert!(matches!(removed, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let harness = harness();
    let created = register(&harness.user_service, "ada@example.com").await;

    let token = harness
        .user_service
        .login(LoginUserInput {
            email: "ADA@example.com".to_owned(),
            password: "analytical-engine".to_owned(),
        })
        .await
        .unwrap_or_else(|error| panic!("login failed: {error}"));

    assert_eq!(token.access_token, format!("token-for-{}", created.id));
}

#[tokio::test]
async fn login_failure_message_is_identical_for_unknown_email_and_wrong_password() {
    let harness = harness();
    register(&harness.user_service, "ada@example.com").await;

    let wrong_password = harness
        .user_service
        .login(LoginUserInput {
            email: "ada@example.com".to_owned(),
            password: "not-the-password".to_owned(),
        })
        .await;
    let unknown_email = harness
        .user_service
        .login(LoginUserInput {
            email: "ghost@example.com".to_owned(),
            password: "analytical-engine".to_owned(),
        })
        .await;

    let messages: Vec<String> = [wrong_password, unknown_email]
        .into_iter()
        .map(|result| match result {
            Err(AppError::Unauthorized(message)) => message,
            other => panic!("expected unauthorized, got {other:?}"),
        })
        .collect();
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn ensure_admin_creates_and_promotes_once() {
    let harness = harness();

    let first = harness
        .user_service
        .ensure_admin("Root@Example.com", Some("bootstrap-secret"))
        .await
        .unwrap_or_else(|error| panic!("ensure_admin failed: {error}"));
    assert_eq!(first.email, "root@example.com");
    assert_eq!(first.roles, vec!["user".to_owned(), "admin".to_owned()]);

    let second = harness
        .user_service
        .ensure_admin("root@example.com", None)
        .await
        .unwrap_or_else(|error| panic!("ensure_admin failed: {error}"));
    assert_eq!(second, first);
}

#[tokio::test]
async fn ensure_admin_requires_password_for_new_account() {
    let harness = harness();
    let result = harness
        .user_service
        .ensure_admin("root@example.com", None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

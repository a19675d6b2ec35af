//! Tests for db::repository::error module.

use intramural::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("test_operation");
    assert_eq!(ctx.operation, Some("test_operation".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("bulk_insert_games")
        .with_entity("game")
        .with_entity_id(42)
        .with_details("timeout occurred")
        .retryable();

    assert_eq!(ctx.operation, Some("bulk_insert_games".to_string()));
    assert_eq!(ctx.entity, Some("game".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(ctx.details, Some("timeout occurred".to_string()));
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("get_team")
        .with_entity("team")
        .with_entity_id("123")
        .with_details("extra info")
        .retryable();

    let display = format!("{}", ctx);
    assert!(display.contains("operation=get_team"));
    assert!(display.contains("entity=team"));
    assert!(display.contains("id=123"));
    assert!(display.contains("details=extra info"));
    assert!(display.contains("retryable=true"));
}

#[test]
fn test_error_context_default_displays_nothing() {
    assert_eq!(format!("{}", ErrorContext::default()), "");
}

#[test]
fn test_repository_error_messages() {
    let cases = [
        (RepositoryError::connection("connection failed"), "Connection error"),
        (RepositoryError::not_found("team not found"), "Not found"),
        (RepositoryError::conflict("duplicate"), "Conflict"),
        (RepositoryError::validation("invalid data"), "validation error"),
        (
            RepositoryError::transaction_with_context("commit failed", ErrorContext::default()),
            "Transaction error",
        ),
        (RepositoryError::configuration("missing config"), "Configuration error"),
    ];
    for (err, prefix) in cases {
        assert!(
            err.to_string().contains(prefix),
            "'{}' should contain '{}'",
            err,
            prefix
        );
    }
}

#[test]
fn test_only_connection_errors_are_retryable() {
    assert!(RepositoryError::connection("temp failure").is_retryable());
    assert!(!RepositoryError::not_found("missing").is_retryable());
    assert!(!RepositoryError::validation("invalid").is_retryable());
    assert!(
        !RepositoryError::transaction_with_context("rolled back", ErrorContext::default())
            .is_retryable()
    );
}

#[test]
fn test_repository_error_with_operation() {
    let err = RepositoryError::transaction_with_context("error", ErrorContext::default())
        .with_operation("bulk_insert_games");
    assert!(err.to_string().contains("operation=bulk_insert_games"));
}

#[test]
fn test_repository_error_with_entity() {
    let err = RepositoryError::validation("bad reference").with_entity("team", 9);
    let ctx = err.context();
    assert_eq!(ctx.entity.as_deref(), Some("team"));
    assert_eq!(ctx.entity_id.as_deref(), Some("9"));
    assert!(err.to_string().contains("id=9"));
}

#[test]
fn test_not_found_with_context() {
    let err = RepositoryError::not_found_with_context(
        "Game 5 not found",
        ErrorContext::new("delete_game").with_entity("game").with_entity_id(5),
    );
    assert!(err.is_not_found());
    assert!(err.to_string().contains("operation=delete_game"));
}

//! Integration tests for User repository using in-memory SurrealDB.

use roombook_core::error::RoombookError;
use roombook_core::models::user::{CreateUser, UpdateUser, UserRole};
use roombook_core::repository::{Pagination, UserRepository};
use roombook_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roombook_db::run_migrations(&db).await.unwrap();
    db
}

fn new_user(email: &str, role: UserRole) -> CreateUser {
    CreateUser {
        email: email.into(),
        full_name: "Test User".into(),
        password: "SuperSecret123!".into(),
        role,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("alice@example.com", UserRole::Student))
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.full_name, "Test User");
    assert_eq!(user.role, UserRole::Student);
    assert!(user.is_active);

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn get_user_by_email() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("eve@example.com", UserRole::Lecturer))
        .await
        .unwrap();

    let fetched = repo.get_by_email("eve@example.com").await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.role, UserRole::Lecturer);

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, RoombookError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(new_user("dup@example.com", UserRole::Student))
        .await
        .unwrap();
    let err = repo
        .create(new_user("dup@example.com", UserRole::Student))
        .await
        .unwrap_err();

    assert!(matches!(err, RoombookError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("frank@example.com", UserRole::Student))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                full_name: Some("Franklin".into()),
                role: Some(UserRole::Manager),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_name, "Franklin");
    assert_eq!(updated.role, UserRole::Manager);
    assert_eq!(updated.email, "frank@example.com"); // unchanged
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn deactivate_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("grace@example.com", UserRole::Student))
        .await
        .unwrap();

    repo.update(
        user.id,
        UpdateUser {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Deactivation keeps the record.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo
        .update(uuid::Uuid::new_v4(), UpdateUser::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RoombookError::NotFound { .. }));
}

#[tokio::test]
async fn set_password_replaces_hash() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("henry@example.com", UserRole::Student))
        .await
        .unwrap();

    repo.set_password(user.id, "AnotherSecret456!")
        .await
        .unwrap();

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_ne!(fetched.password_hash, user.password_hash);
    assert!(fetched.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn list_users_with_pagination() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    for i in 0..5 {
        repo.create(new_user(&format!("user{i}@example.com"), UserRole::Student))
            .await
            .unwrap();
    }

    let page1 = repo.list(Pagination::new(1, 2).unwrap()).await.unwrap();
    assert_eq!(page1.total, 5);
    assert_eq!(page1.items.len(), 2);
    assert_eq!(page1.total_pages, 3);

    let page3 = repo.list(Pagination::new(3, 2).unwrap()).await.unwrap();
    assert_eq!(page3.items.len(), 1);
}

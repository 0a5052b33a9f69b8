//! Integration tests for the SurrealDB school repository against an
//! in-memory instance.

use kantin_core::error::KantinError;
use kantin_core::models::school::{CreateSchool, UpdateSchool};
use kantin_core::repository::{Pagination, SchoolRepository};
use kantin_db::repository::SurrealSchoolRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealSchoolRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    kantin_db::run_migrations(&db).await.unwrap();
    SurrealSchoolRepository::new(db)
}

fn create_input(name: &str) -> CreateSchool {
    CreateSchool {
        name: name.into(),
        address: "Jl. Merdeka No. 1".into(),
    }
}

#[tokio::test]
async fn create_issues_an_api_key() {
    let repo = setup().await;

    let school = repo.create(create_input("SDN 01")).await.unwrap();
    assert_eq!(school.name, "SDN 01");
    assert!(!school.api_key.is_empty());

    // Keys are unique per school.
    let other = repo.create(create_input("SDN 02")).await.unwrap();
    assert_ne!(school.api_key, other.api_key);
}

#[tokio::test]
async fn get_by_api_key_resolves_the_school() {
    let repo = setup().await;
    let school = repo.create(create_input("SDN 03")).await.unwrap();

    let resolved = repo.get_by_api_key(&school.api_key).await.unwrap();
    assert_eq!(resolved.id, school.id);
    assert_eq!(resolved.name, school.name);
}

#[tokio::test]
async fn unknown_api_key_is_not_found() {
    let repo = setup().await;
    repo.create(create_input("SDN 04")).await.unwrap();

    let err = repo.get_by_api_key("bogus-key").await.unwrap_err();
    assert!(matches!(err, KantinError::NotFound { .. }));
}

#[tokio::test]
async fn update_does_not_touch_the_api_key() {
    let repo = setup().await;
    let school = repo.create(create_input("SDN 05")).await.unwrap();

    let updated = repo
        .update(
            school.id,
            UpdateSchool {
                address: Some("Jl. Baru No. 9".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.address, "Jl. Baru No. 9");
    assert_eq!(updated.name, "SDN 05");
    assert_eq!(updated.api_key, school.api_key);
}

#[tokio::test]
async fn delete_and_list() {
    let repo = setup().await;
    let keep = repo.create(create_input("SDN 06")).await.unwrap();
    let gone = repo.create(create_input("SDN 07")).await.unwrap();

    repo.delete(gone.id).await.unwrap();

    let err = repo.get_by_id(gone.id).await.unwrap_err();
    assert!(matches!(err, KantinError::NotFound { .. }));

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, keep.id);

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, KantinError::NotFound { .. }));
}

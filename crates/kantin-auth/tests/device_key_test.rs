//! Device-key authenticator tests against an in-memory school store
//! double.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use kantin_auth::device::DeviceKeyAuthenticator;
use kantin_auth::error::AuthError;
use kantin_core::error::{KantinError, KantinResult};
use kantin_core::models::school::{CreateSchool, School, UpdateSchool};
use kantin_core::repository::{PaginatedResult, Pagination, SchoolRepository};
use uuid::Uuid;

#[derive(Default)]
struct InMemorySchoolStore {
    schools: Mutex<HashMap<String, School>>,
}

impl InMemorySchoolStore {
    fn insert(&self, school: School) {
        self.schools
            .lock()
            .unwrap()
            .insert(school.api_key.clone(), school);
    }
}

impl SchoolRepository for &InMemorySchoolStore {
    async fn create(&self, _input: CreateSchool) -> KantinResult<School> {
        unimplemented!("not exercised by these tests")
    }

    async fn get_by_id(&self, _id: Uuid) -> KantinResult<School> {
        unimplemented!("not exercised by these tests")
    }

    async fn get_by_api_key(&self, key: &str) -> KantinResult<School> {
        self.schools
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| KantinError::NotFound {
                entity: "school".into(),
                id: format!("api_key={key}"),
            })
    }

    async fn update(&self, _id: Uuid, _input: UpdateSchool) -> KantinResult<School> {
        unimplemented!("not exercised by these tests")
    }

    async fn delete(&self, _id: Uuid) -> KantinResult<()> {
        unimplemented!("not exercised by these tests")
    }

    async fn list(&self, _pagination: Pagination) -> KantinResult<PaginatedResult<School>> {
        unimplemented!("not exercised by these tests")
    }
}

fn test_school(api_key: &str) -> School {
    let now = Utc::now();
    School {
        id: Uuid::new_v4(),
        name: "SDN 01 Menteng".into(),
        address: "Jl. Besuki No. 4, Jakarta".into(),
        api_key: api_key.into(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn missing_key_is_rejected() {
    let store = InMemorySchoolStore::default();
    let auth = DeviceKeyAuthenticator::new(&store);

    let err = auth.authenticate(None).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingApiKey));
}

#[tokio::test]
async fn empty_key_is_rejected_as_missing() {
    let store = InMemorySchoolStore::default();
    let auth = DeviceKeyAuthenticator::new(&store);

    let err = auth.authenticate(Some("")).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingApiKey));
}

#[tokio::test]
async fn unknown_key_is_rejected() {
    let store = InMemorySchoolStore::default();
    store.insert(test_school("key-known"));
    let auth = DeviceKeyAuthenticator::new(&store);

    let err = auth.authenticate(Some("key-unknown")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidApiKey));
}

#[tokio::test]
async fn known_key_resolves_the_stored_school_exactly() {
    let store = InMemorySchoolStore::default();
    let school = test_school("key-known");
    store.insert(school.clone());
    let auth = DeviceKeyAuthenticator::new(&store);

    let resolved = auth.authenticate(Some("key-known")).await.unwrap();
    assert_eq!(resolved.id, school.id);
    assert_eq!(resolved.name, school.name);
    assert_eq!(resolved.address, school.address);
    assert_eq!(resolved.api_key, school.api_key);
}

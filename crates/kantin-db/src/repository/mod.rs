//! SurrealDB repository implementations for the `kantin-core` traits.

mod school;
mod user;

pub use school::SurrealSchoolRepository;
pub use user::SurrealUserRepository;

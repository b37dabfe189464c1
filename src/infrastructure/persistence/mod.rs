mod in_memory_repository;
mod pg_pool;
mod pg_prescription_repository;

pub use in_memory_repository::InMemoryPrescriptionRepository;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_prescription_repository::PgPrescriptionRepository;

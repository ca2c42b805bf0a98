//! Review ledger.
//!
//! Reviews are create-only: anyone may list them, only a caller with a
//! verified bearer token may add one.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::{DatabaseConfig, ReviewsConfig};
pub use domain::error::ReviewError;
pub use domain::model::{NewReview, Review};
pub use domain::repo::ReviewsRepository;
pub use domain::service::ReviewService;
pub use infra::storage::sea_orm_repo::SeaOrmReviewsRepository;

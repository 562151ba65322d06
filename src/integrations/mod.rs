//! External Integrations
//!
//! Clients for the external data sources:
//! - GitHub (repositories, user profile)
//! - USGS water services (instantaneous discharge)
//!
//! Responses are treated as opaque JSON beyond the few fields the portfolio
//! and dashboard read.

mod client;
mod github;
pub mod usgs;

pub use client::{ApiClient, ClientError, ClientResult, Endpoints};
pub use github::{GitHubUser, Repository, RepositorySource};
pub use usgs::{StreamflowReading, StreamflowSummary};

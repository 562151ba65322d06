//! State Management
//!
//! - **Store**: observable container with shallow-merge updates
//! - **DashboardState**: the record the dashboard keeps in a store

mod dashboard;
mod store;

pub use dashboard::{DashboardData, DashboardState, StateUpdate, Theme};
pub use store::{Listener, Merge, Store, Subscription};

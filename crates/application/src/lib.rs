//! Application services and ports.

#![forbid(unsafe_code)]

mod assignment_engine;
mod authorization_ports;
mod bootstrap_service;
mod permission_catalog;
mod role_registry;

#[cfg(test)]
mod test_support;

pub use assignment_engine::AssignmentEngine;
pub use authorization_ports::{
    AssignmentRepository, PermissionRepository, RoleAssignment, RoleRepository, UserRepository,
};
pub use bootstrap_service::{AuthorizationBootstrap, SeedStatus, SeedSummary, UserSeedPlan};
pub use permission_catalog::PermissionCatalog;
pub use role_registry::RoleRegistry;

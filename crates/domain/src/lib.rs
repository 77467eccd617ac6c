//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
mod principal;
mod role;
mod seed;
mod user;

pub use permission::{Permission, PermissionId};
pub use principal::{Principal, PrincipalId};
pub use role::{Role, RoleId};
pub use seed::{DefaultPermission, DefaultRole};
pub use user::{EmailAddress, User};

mod assignments;
mod repositories;

pub use assignments::RoleAssignment;
pub use repositories::{AssignmentRepository, PermissionRepository, RoleRepository, UserRepository};

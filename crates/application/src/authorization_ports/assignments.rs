use chrono::{DateTime, Utc};
use rolegate_domain::{PrincipalId, RoleId};

/// Binding record mapping a principal to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Principal holding the role.
    pub principal_id: PrincipalId,
    /// Assigned role.
    pub role_id: RoleId,
    /// Time the binding was first created.
    pub assigned_at: DateTime<Utc>,
}

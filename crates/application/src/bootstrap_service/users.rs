use rolegate_core::{AppError, AppResult};
use rolegate_domain::{DefaultRole, User};
use tracing::info;

use crate::UserRepository;

use super::{AuthorizationBootstrap, UserSeedPlan};

impl AuthorizationBootstrap {
    /// Creates seed users and assigns their roles.
    ///
    /// `plan.employee_count` users receive `employee`, then the superuser
    /// receives `admin`. Requires the role bootstrap to have run. Every user,
    /// email and role is checked before the first user is saved.
    pub async fn seed_users(
        &self,
        users: &dyn UserRepository,
        plan: &UserSeedPlan,
    ) -> AppResult<Vec<User>> {
        let planned = planned_users(plan)?;
        self.check_seed_targets(users, planned.as_slice()).await?;

        let mut created = Vec::with_capacity(planned.len());
        for (user, role) in planned {
            users.save_user(user.clone()).await?;
            self.engine.assign_role(&user, role.as_str()).await?;
            created.push(user);
        }

        info!(
            users = created.len(),
            employees = plan.employee_count,
            "user seed completed"
        );

        Ok(created)
    }

    async fn check_seed_targets(
        &self,
        users: &dyn UserRepository,
        planned: &[(User, DefaultRole)],
    ) -> AppResult<()> {
        for role in [DefaultRole::Employee, DefaultRole::Admin] {
            self.registry.find(role.as_str()).await?;
        }

        for (user, _) in planned {
            if users
                .find_user_by_email(user.email().as_str())
                .await?
                .is_some()
            {
                return Err(AppError::DuplicateName(format!(
                    "user '{}' already exists",
                    user.email().as_str()
                )));
            }
        }

        Ok(())
    }
}

fn planned_users(plan: &UserSeedPlan) -> AppResult<Vec<(User, DefaultRole)>> {
    let mut planned = Vec::with_capacity(plan.employee_count + 1);
    for index in 1..=plan.employee_count {
        let user = User::new(
            format!("Employee {index}"),
            format!("employee{index}@example.com"),
        )?;
        planned.push((user, DefaultRole::Employee));
    }

    let superuser = User::new(plan.superuser_name.as_str(), plan.superuser_email.as_str())?;
    if planned
        .iter()
        .any(|(user, _)| user.email() == superuser.email())
    {
        return Err(AppError::DuplicateName(format!(
            "superuser email '{}' collides with a seeded employee",
            superuser.email().as_str()
        )));
    }
    planned.push((superuser, DefaultRole::Admin));

    Ok(planned)
}

use std::collections::BTreeSet;
use std::future::Future;

use proptest::prelude::*;
use proptest::sample::subsequence;
use rolegate_core::AppError;
use rolegate_domain::{DefaultPermission, Permission, PrincipalId, Role};

use crate::AssignmentRepository;
use crate::test_support::{Services, services};

const PERMISSION_NAMES: [&str; 5] = [
    "view users",
    "create users",
    "edit users",
    "delete users",
    "lock user",
];

async fn create_permissions(services: &Services) -> Vec<Permission> {
    let mut created = Vec::new();
    for name in PERMISSION_NAMES {
        let permission = services.catalog.create(name).await;
        assert!(permission.is_ok());
        created.push(permission.unwrap_or_else(|_| unreachable!()));
    }
    created
}

async fn create_role(services: &Services, name: &str) -> Role {
    let role = services.registry.create(name).await;
    assert!(role.is_ok());
    role.unwrap_or_else(|_| unreachable!())
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|error| panic!("failed to build test runtime: {error}"))
        .block_on(future)
}

#[tokio::test]
async fn seeded_scenario_answers_permission_queries() {
    let services = services();
    let permissions = create_permissions(&services).await;
    let admin = create_role(&services, "admin").await;
    let manager = create_role(&services, "manager").await;
    create_role(&services, "employee").await;

    assert!(
        services
            .engine
            .give_permission(&admin, permissions.as_slice())
            .await
            .is_ok()
    );
    assert!(
        services
            .engine
            .give_permission_by_name(&manager, &["view users"])
            .await
            .is_ok()
    );

    let admin_user = PrincipalId::new();
    let manager_user = PrincipalId::new();
    let employee_user = PrincipalId::new();
    assert!(
        services
            .engine
            .assign_role(&admin_user, "admin")
            .await
            .is_ok()
    );
    assert!(
        services
            .engine
            .assign_role(&manager_user, "manager")
            .await
            .is_ok()
    );
    assert!(
        services
            .engine
            .assign_role(&employee_user, "employee")
            .await
            .is_ok()
    );

    let engine = &services.engine;
    assert!(matches!(engine.has_permission(&admin_user, "delete users").await, Ok(true)));
    assert!(matches!(engine.has_permission(&manager_user, "delete users").await, Ok(false)));
    assert!(matches!(engine.has_permission(&manager_user, "view users").await, Ok(true)));
    assert!(matches!(engine.has_permission(&employee_user, "view users").await, Ok(false)));
}

#[tokio::test]
async fn principal_without_roles_has_no_permissions() {
    let services = services();
    create_permissions(&services).await;
    let principal = PrincipalId::new();

    for name in PERMISSION_NAMES {
        assert!(matches!(services.engine.has_permission(&principal, name).await, Ok(false)));
    }
    assert!(matches!(
        services.engine.has_permission(&principal, "not registered").await,
        Ok(false)
    ));
    assert!(
        services
            .engine
            .effective_permissions(&principal)
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn unknown_role_assignment_leaves_roles_unchanged() {
    let services = services();
    create_role(&services, "employee").await;
    let principal = PrincipalId::new();
    assert!(
        services
            .engine
            .assign_role(&principal, "employee")
            .await
            .is_ok()
    );

    let result = services.engine.assign_role(&principal, "superuser").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let roles = services.engine.principal_roles(&principal).await.unwrap_or_default();
    assert_eq!(roles, BTreeSet::from(["employee".to_owned()]));
}

#[tokio::test]
async fn assigning_same_role_twice_is_a_no_op() {
    let services = services();
    create_role(&services, "manager").await;
    let principal = PrincipalId::new();

    assert!(
        services
            .engine
            .assign_role(&principal, "manager")
            .await
            .is_ok()
    );
    assert!(
        services
            .engine
            .assign_role(&principal, "manager")
            .await
            .is_ok()
    );

    let assignments = services.engine.list_role_assignments().await.unwrap_or_default();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].principal_id, principal);
}

#[tokio::test]
async fn unregistered_role_cannot_receive_permissions() {
    let services = services();
    let permissions = create_permissions(&services).await;
    let detached = Role::new("ghost").unwrap_or_else(|_| unreachable!());

    let result = services
        .engine
        .give_permission(&detached, permissions.as_slice())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn unregistered_permission_is_not_bound() {
    let services = services();
    create_permissions(&services).await;
    let role = create_role(&services, "admin").await;
    let impostor = Permission::new("view users").unwrap_or_else(|_| unreachable!());

    let result = services.engine.give_permission(&role, &[impostor]).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(
        services
            .engine
            .role_permissions("admin")
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn unknown_permission_name_binds_nothing() {
    let services = services();
    create_permissions(&services).await;
    let role = create_role(&services, "manager").await;

    let result = services
        .engine
        .give_permission_by_name(&role, &["view users", "approve users"])
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(
        services
            .engine
            .role_permissions("manager")
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn require_permission_reports_forbidden() {
    let services = services();
    create_permissions(&services).await;
    create_role(&services, "employee").await;
    let principal = PrincipalId::new();
    assert!(
        services
            .engine
            .assign_role(&principal, "employee")
            .await
            .is_ok()
    );

    let result = services
        .engine
        .require_permission(&principal, DefaultPermission::LockUser.as_str())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn store_keeps_one_binding_per_pair() {
    let services = services();
    let permissions = create_permissions(&services).await;
    let role = create_role(&services, "admin").await;
    let doubled: Vec<Permission> = permissions
        .iter()
        .chain(permissions.iter())
        .cloned()
        .collect();

    assert!(
        services
            .engine
            .give_permission(&role, doubled.as_slice())
            .await
            .is_ok()
    );

    let bound = services
        .store
        .list_role_permissions(role.id())
        .await
        .unwrap_or_default();
    assert_eq!(bound.len(), PERMISSION_NAMES.len());
}

proptest! {
    #[test]
    fn give_permission_is_idempotent(selected in subsequence(PERMISSION_NAMES.to_vec(), 0..=5)) {
        let (once, twice) = block_on(async {
            let services = services();
            create_permissions(&services).await;
            let first = create_role(&services, "once").await;
            let second = create_role(&services, "twice").await;
            let permissions = services
                .catalog
                .find_many(selected.as_slice())
                .await
                .unwrap_or_default();

            let _ = services.engine.give_permission(&first, permissions.as_slice()).await;
            let _ = services.engine.give_permission(&second, permissions.as_slice()).await;
            let _ = services.engine.give_permission(&second, permissions.as_slice()).await;

            (
                services.engine.role_permissions("once").await.unwrap_or_default(),
                services.engine.role_permissions("twice").await.unwrap_or_default(),
            )
        });

        prop_assert_eq!(once.len(), selected.len());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn effective_permissions_are_union_of_roles(
        left in subsequence(PERMISSION_NAMES.to_vec(), 0..=5),
        right in subsequence(PERMISSION_NAMES.to_vec(), 0..=5),
    ) {
        let effective = block_on(async {
            let services = services();
            create_permissions(&services).await;
            let left_role = create_role(&services, "left").await;
            let right_role = create_role(&services, "right").await;
            let _ = services.engine.give_permission_by_name(&left_role, left.as_slice()).await;
            let _ = services.engine.give_permission_by_name(&right_role, right.as_slice()).await;

            let principal = PrincipalId::new();
            let _ = services.engine.assign_role(&principal, "left").await;
            let _ = services.engine.assign_role(&principal, "right").await;

            services.engine.effective_permissions(&principal).await.unwrap_or_default()
        });

        let expected: BTreeSet<String> = left
            .iter()
            .chain(right.iter())
            .map(|name| (*name).to_owned())
            .collect();
        prop_assert_eq!(effective, expected);
    }
}

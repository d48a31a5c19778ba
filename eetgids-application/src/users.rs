use super::*;

/// Mirrors the authenticated user into the local store.
pub fn sync_user(connections: &sqlite::Connections, user_id: &Id, email: &str) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::sync_user(conn, user_id, email))?)
}

pub fn change_user_role(
    connections: &sqlite::Connections,
    admin_id: &Id,
    user_id: &str,
    role: Role,
) -> Result<User> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::change_user_role(conn, admin_id, user_id, role).inspect_err(|err| {
            warn!("Failed to change role of user {user_id}: {err}");
        })
    })?)
}

pub fn set_user_role_by_email(
    connections: &sqlite::Connections,
    email: &str,
    role: Role,
) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::set_user_role_by_email(conn, email, role))?)
}

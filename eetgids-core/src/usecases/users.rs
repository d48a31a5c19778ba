use super::{parse_email, prelude::*};

/// Mirrors a user of the identity provider into the local store.
///
/// New users get the default role. The role of known users
/// is never changed here.
pub fn sync_user<R: UserRepo>(repo: &R, id: &Id, email: &str) -> Result<User> {
    let email = parse_email(email)?;
    match repo.try_get_user(id.as_str())? {
        Some(mut user) => {
            if user.email != email {
                user.email = email;
                repo.update_user(&user)?;
            }
            Ok(user)
        }
        None => {
            let user = User {
                id: id.clone(),
                email,
                role: Role::default(),
            };
            repo.create_user(&user)?;
            log::info!("Registered new user {}", user.id);
            Ok(user)
        }
    }
}

/// Returns the user if it has at least the given role.
pub fn authorize_role<R: UserRepo>(repo: &R, user_id: Option<&Id>, min_role: Role) -> Result<User> {
    let user_id = user_id.ok_or(Error::Unauthorized)?;
    let user = repo
        .try_get_user(user_id.as_str())?
        .ok_or(Error::Unauthorized)?;
    if user.role < min_role {
        log::debug!("User {} lacks the {} role", user.id, min_role.as_str());
        return Err(Error::Forbidden);
    }
    Ok(user)
}

pub fn change_user_role<R: UserRepo>(repo: &R, admin_id: &Id, user_id: &str, role: Role) -> Result<User> {
    let admin = authorize_role(repo, Some(admin_id), Role::Admin)?;
    if admin.id.as_str() == user_id && role < admin.role {
        // Admins cannot demote themselves
        return Err(Error::Forbidden);
    }
    let mut user = repo.try_get_user(user_id)?.ok_or(RepoError::NotFound)?;
    user.role = role;
    repo.update_user(&user)?;
    log::info!("Changed role of user {} to {}", user.id, role.as_str());
    Ok(user)
}

/// Used for bootstrapping the first admin from the command line.
pub fn set_user_role_by_email<R: UserRepo>(repo: &R, email: &str, role: Role) -> Result<User> {
    let mut user = repo
        .try_get_user_by_email(email.trim())?
        .ok_or(RepoError::NotFound)?;
    user.role = role;
    repo.update_user(&user)?;
    log::info!("Changed role of user {} to {}", user.id, role.as_str());
    Ok(user)
}

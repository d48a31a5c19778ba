use super::*;

impl_repo!(UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
});

fn into_new_user(u: &User) -> models::NewUser<'_> {
    models::NewUser {
        id: u.id.as_str(),
        email: u.email.as_str(),
        role: u.role.to_primitive(),
    }
}

fn load_user(u: models::UserEntity) -> Result<User> {
    let models::UserEntity { id, email, role } = u;
    let email = email
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid e-mail address of user {id}: {email}"))?;
    let role = Role::try_from_primitive(role).unwrap_or_else(|| {
        log::warn!("Unknown role {role} of user {id}");
        Role::default()
    });
    Ok(User {
        id: id.into(),
        email,
        role,
    })
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    diesel::insert_into(schema::users::table)
        .values(&into_new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::update(dsl::users.filter(dsl::id.eq(u.id.as_str())))
        .set(&into_new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn try_get_user(conn: &mut SqliteConnection, id: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

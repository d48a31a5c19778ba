use eetgids_db_sqlite::Connections as ConnectionPool;
use rocket::{
    outcome::try_outcome,
    request::{FromRequest, Outcome},
    Request, State,
};
use std::ops::Deref;

/// The managed connection pool as a request guard.
///
/// Cloning is cheap, so handlers can move a clone into
/// a blocking task.
#[derive(Clone)]
pub struct Connections(ConnectionPool);

impl From<ConnectionPool> for Connections {
    fn from(pool: ConnectionPool) -> Self {
        Self(pool)
    }
}

impl Deref for Connections {
    type Target = ConnectionPool;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Connections {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let pool = try_outcome!(request.guard::<&State<Connections>>().await);
        Outcome::Success(pool.inner().clone())
    }
}

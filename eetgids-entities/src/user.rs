use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumString, IntoStaticStr};

use crate::{email::EmailAddress, id::Id};

pub type RolePrimitive = i16;

/// A user known from the identity provider.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id    : Id,
    pub email : EmailAddress,
    pub role  : Role,
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User  = 1,
    Admin = 2,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn try_from_primitive(from: RolePrimitive) -> Option<Self> {
        Self::from_i16(from)
    }

    pub fn to_primitive(self) -> RolePrimitive {
        self.to_i16().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_and_names() {
        assert!(Role::Admin > Role::User);
        assert_eq!(Role::Admin, "admin".parse().unwrap());
        assert_eq!("user", Role::default().as_str());
        assert_eq!(Some(Role::Admin), Role::try_from_primitive(Role::Admin.to_primitive()));
        assert_eq!(None, Role::try_from_primitive(0));
    }
}

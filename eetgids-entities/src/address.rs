use itertools::Itertools as _;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.postal_code.is_none() && self.city.is_none()
    }

    /// Single line representation, e.g. "Damstraat 1, 1012 JL Amsterdam".
    pub fn to_single_line(&self) -> String {
        let locality = [self.postal_code.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .join(" ");
        let line = [self.street.as_deref(), Some(locality.as_str())]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .join(", ");
        line
    }
}

use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CuisineType {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

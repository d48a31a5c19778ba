use super::*;

impl_repo!(CuisineRepo {
    fn create_cuisine(&self, cuisine: &CuisineType) -> Result<()>;
    fn get_cuisine_by_slug(&self, slug: &str) -> Result<CuisineType>;
    fn all_cuisines(&self) -> Result<Vec<CuisineType>>;
});

fn create_cuisine(conn: &mut SqliteConnection, cuisine: &CuisineType) -> Result<()> {
    let new_cuisine = models::NewCuisineType {
        id: cuisine.id.as_str(),
        name: &cuisine.name,
        slug: &cuisine.slug,
        icon: cuisine.icon.as_deref(),
    };
    diesel::insert_into(schema::cuisine_types::table)
        .values(&new_cuisine)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_cuisine_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<CuisineType> {
    use schema::cuisine_types::dsl;
    Ok(load_cuisine(
        schema::cuisine_types::table
            .filter(dsl::slug.eq(slug))
            .first::<models::CuisineTypeEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn all_cuisines(conn: &mut SqliteConnection) -> Result<Vec<CuisineType>> {
    use schema::cuisine_types::dsl;
    Ok(schema::cuisine_types::table
        .order_by(dsl::name)
        .load::<models::CuisineTypeEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_cuisine)
        .collect())
}

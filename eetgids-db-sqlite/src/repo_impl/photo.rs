use super::*;

impl_repo!(PhotoRepo {
    fn create_photo(&self, photo: &RestaurantPhoto) -> Result<()>;
    fn get_photo(&self, id: &str) -> Result<RestaurantPhoto>;
    fn approved_photos_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<RestaurantPhoto>>;
    fn all_photos_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<RestaurantPhoto>>;
    fn pending_photos(&self, pagination: &Pagination) -> Result<Vec<RestaurantPhoto>>;
    fn approve_photo(&self, id: &str) -> Result<()>;
    fn set_primary_photo(&self, restaurant_id: &str, photo_id: &str) -> Result<()>;
    fn delete_photo(&self, id: &str) -> Result<()>;
});

fn load_photo(photo: models::RestaurantPhotoEntity) -> Result<RestaurantPhoto> {
    let models::RestaurantPhotoEntity {
        id,
        restaurant_id,
        url,
        caption,
        is_primary,
        approved,
        uploaded_by,
        created_at,
    } = photo;
    let url = url
        .parse()
        .map_err(|err| anyhow::anyhow!("Invalid URL of photo {id}: {err}"))?;
    Ok(RestaurantPhoto {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        url,
        caption,
        is_primary: into_flag(is_primary),
        approved: into_flag(approved),
        uploaded_by: uploaded_by.map(Into::into),
        created_at: Timestamp::from_millis(created_at),
    })
}

fn load_photos(rows: Vec<models::RestaurantPhotoEntity>) -> Result<Vec<RestaurantPhoto>> {
    rows.into_iter().map(load_photo).collect()
}

fn create_photo(conn: &mut SqliteConnection, photo: &RestaurantPhoto) -> Result<()> {
    let new_photo = models::NewRestaurantPhoto {
        id: photo.id.as_str(),
        restaurant_id: photo.restaurant_id.as_str(),
        url: photo.url.as_str(),
        caption: photo.caption.as_deref(),
        is_primary: from_flag(photo.is_primary),
        approved: from_flag(photo.approved),
        uploaded_by: photo.uploaded_by.as_ref().map(Id::as_str),
        created_at: photo.created_at.as_millis(),
    };
    diesel::insert_into(schema::restaurant_photos::table)
        .values(&new_photo)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_photo(conn: &mut SqliteConnection, id: &str) -> Result<RestaurantPhoto> {
    use schema::restaurant_photos::dsl;
    load_photo(
        schema::restaurant_photos::table
            .filter(dsl::id.eq(id))
            .first::<models::RestaurantPhotoEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn approved_photos_of_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: &str,
) -> Result<Vec<RestaurantPhoto>> {
    use schema::restaurant_photos::dsl;
    load_photos(
        schema::restaurant_photos::table
            .filter(dsl::restaurant_id.eq(restaurant_id))
            .filter(dsl::approved.ne(0))
            .order_by(dsl::is_primary.desc())
            .then_order_by(dsl::created_at)
            .then_order_by(dsl::id)
            .load::<models::RestaurantPhotoEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn all_photos_of_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: &str,
) -> Result<Vec<RestaurantPhoto>> {
    use schema::restaurant_photos::dsl;
    load_photos(
        schema::restaurant_photos::table
            .filter(dsl::restaurant_id.eq(restaurant_id))
            .order_by(dsl::created_at)
            .then_order_by(dsl::id)
            .load::<models::RestaurantPhotoEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn pending_photos(
    conn: &mut SqliteConnection,
    pagination: &Pagination,
) -> Result<Vec<RestaurantPhoto>> {
    use schema::restaurant_photos::dsl;
    let mut query = schema::restaurant_photos::table
        .filter(dsl::approved.eq(0))
        .order_by(dsl::created_at)
        .then_order_by(dsl::id)
        .into_boxed();
    let (limit, offset) = limit_offset(pagination);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    if let Some(offset) = offset {
        query = query.offset(offset);
    }
    load_photos(
        query
            .load::<models::RestaurantPhotoEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn approve_photo(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::restaurant_photos::dsl;
    let count = diesel::update(dsl::restaurant_photos.filter(dsl::id.eq(id)))
        .set(dsl::approved.eq(from_flag(true)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn set_primary_photo(conn: &mut SqliteConnection, restaurant_id: &str, photo_id: &str) -> Result<()> {
    use schema::restaurant_photos::dsl;
    diesel::update(
        dsl::restaurant_photos
            .filter(dsl::restaurant_id.eq(restaurant_id))
            .filter(dsl::id.ne(photo_id)),
    )
    .set(dsl::is_primary.eq(from_flag(false)))
    .execute(conn)
    .map_err(from_diesel_err)?;
    let count = diesel::update(
        dsl::restaurant_photos
            .filter(dsl::restaurant_id.eq(restaurant_id))
            .filter(dsl::id.eq(photo_id)),
    )
    .set(dsl::is_primary.eq(from_flag(true)))
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_photo(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::restaurant_photos::dsl;
    let count = diesel::delete(dsl::restaurant_photos.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

use diesel::sqlite::Sqlite;

use super::*;

impl_repo!(RestaurantRepo {
    fn create_restaurant(&self, restaurant: &Restaurant, cuisine_ids: &[Id]) -> Result<()>;
    fn get_restaurant(&self, id: &str) -> Result<Restaurant>;
    fn get_restaurant_with_relations(&self, id: &str) -> Result<RestaurantWithRelations>;
    fn get_restaurant_by_slug(&self, city_id: &str, slug: &str) -> Result<RestaurantWithRelations>;
    fn restaurant_slug_exists(&self, city_id: &str, slug: &str) -> Result<bool>;
    fn query_restaurants(&self, query: &RestaurantQuery, pagination: &Pagination) -> Result<(Vec<RestaurantWithRelations>, u64)>;
    fn restaurants_with_position(&self) -> Result<Vec<RestaurantWithRelations>>;
    fn list_restaurants(&self, pagination: &Pagination) -> Result<Vec<Restaurant>>;
    fn count_restaurants(&self) -> Result<u64>;
    fn set_restaurant_owner(&self, id: &str, owner: &Id) -> Result<()>;
    fn set_restaurant_rating(&self, id: &str, rating: Option<AvgRating>, review_count: u32) -> Result<()>;
});

fn into_new_restaurant(r: &Restaurant) -> Result<models::NewRestaurant<'_>> {
    let Restaurant {
        id,
        name,
        slug,
        address,
        pos,
        contact,
        price_range,
        rating,
        review_count,
        verified,
        claimed,
        owner,
        features,
        specialties,
        description,
        city_id,
        created_at,
    } = r;
    Ok(models::NewRestaurant {
        id: id.as_str(),
        city_id: city_id.as_ref().map(Id::as_str),
        name,
        name_search: search_key(name),
        slug,
        street: address.street.as_deref(),
        postal_code: address.postal_code.as_deref(),
        city_name: address.city.as_deref(),
        lat: pos.map(MapPoint::lat),
        lng: pos.map(MapPoint::lng),
        phone: contact.phone.as_deref(),
        email: contact.email.as_ref().map(EmailAddress::as_str),
        website: contact.website.as_ref().map(Url::as_str),
        price_range: price_range.map(PriceRangePrimitive::from),
        rating: rating.map(f64::from),
        review_count: i32::try_from(*review_count).unwrap_or(i32::MAX),
        verified: from_flag(*verified),
        claimed: from_flag(*claimed),
        owner_id: owner.as_ref().map(Id::as_str),
        features: encode_list(features)?,
        specialties: encode_list(specialties)?,
        description: description.as_deref(),
        created_at: created_at.as_millis(),
    })
}

fn create_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &Restaurant,
    cuisine_ids: &[Id],
) -> Result<()> {
    diesel::insert_into(schema::restaurants::table)
        .values(&into_new_restaurant(restaurant)?)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let links: Vec<_> = cuisine_ids
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .map(|cuisine_id| models::NewRestaurantCuisine {
            restaurant_id: restaurant.id.as_str(),
            cuisine_id: cuisine_id.as_str(),
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_into(schema::restaurant_cuisines::table)
            .values(&links)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    Ok(())
}

fn get_restaurant_entity(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<models::RestaurantEntity> {
    use schema::restaurants::dsl;
    schema::restaurants::table
        .filter(dsl::id.eq(id))
        .first::<models::RestaurantEntity>(conn)
        .map_err(from_diesel_err)
}

fn get_restaurant(conn: &mut SqliteConnection, id: &str) -> Result<Restaurant> {
    get_restaurant_entity(conn, id).map(load_restaurant)
}

fn get_restaurant_with_relations(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<RestaurantWithRelations> {
    let row = get_restaurant_entity(conn, id)?;
    load_restaurants_with_relations(conn, vec![row])?
        .into_iter()
        .next()
        .ok_or(repo::Error::NotFound)
}

fn get_restaurant_by_slug(
    conn: &mut SqliteConnection,
    city_id: &str,
    slug: &str,
) -> Result<RestaurantWithRelations> {
    use schema::restaurants::dsl;
    let row = schema::restaurants::table
        .filter(dsl::city_id.eq(city_id))
        .filter(dsl::slug.eq(slug))
        .first::<models::RestaurantEntity>(conn)
        .map_err(from_diesel_err)?;
    load_restaurants_with_relations(conn, vec![row])?
        .into_iter()
        .next()
        .ok_or(repo::Error::NotFound)
}

fn restaurant_slug_exists(conn: &mut SqliteConnection, city_id: &str, slug: &str) -> Result<bool> {
    use schema::restaurants::dsl;
    let count = schema::restaurants::table
        .filter(dsl::city_id.eq(city_id))
        .filter(dsl::slug.eq(slug))
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count > 0)
}

/// Escapes the wildcards of a LIKE pattern with `\`.
fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// All filters of the query without ordering and pagination.
fn filtered_restaurants(query: &RestaurantQuery) -> schema::restaurants::BoxedQuery<'_, Sqlite> {
    use schema::{restaurant_cuisines::dsl as rc_dsl, restaurants::dsl};

    let RestaurantQuery {
        city_id,
        cuisine_id,
        min_rating,
        min_reviews,
        price_ranges,
        name_contains,
        sort_by: _,
        sort_order: _,
    } = query;

    let mut boxed = schema::restaurants::table.into_boxed();
    if let Some(city_id) = city_id {
        boxed = boxed.filter(dsl::city_id.eq(city_id.as_str()));
    }
    if let Some(cuisine_id) = cuisine_id {
        let restaurant_ids = schema::restaurant_cuisines::table
            .filter(rc_dsl::cuisine_id.eq(cuisine_id.as_str()))
            .select(rc_dsl::restaurant_id);
        boxed = boxed.filter(dsl::id.eq_any(restaurant_ids));
    }
    if let Some(min_rating) = min_rating {
        boxed = boxed.filter(dsl::rating.ge(*min_rating));
    }
    if let Some(min_reviews) = min_reviews {
        boxed = boxed.filter(dsl::review_count.ge(i32::try_from(*min_reviews).unwrap_or(i32::MAX)));
    }
    if !price_ranges.is_empty() {
        let price_ranges: Vec<_> = price_ranges
            .iter()
            .copied()
            .map(PriceRangePrimitive::from)
            .collect();
        boxed = boxed.filter(dsl::price_range.eq_any(price_ranges));
    }
    if let Some(text) = name_contains.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like_pattern(&search_key(text)));
        boxed = boxed.filter(dsl::name_search.like(pattern).escape('\\'));
    }
    boxed
}

fn query_restaurants(
    conn: &mut SqliteConnection,
    query: &RestaurantQuery,
    pagination: &Pagination,
) -> Result<(Vec<RestaurantWithRelations>, u64)> {
    use schema::restaurants::dsl;

    let total = filtered_restaurants(query)
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;

    let mut boxed = filtered_restaurants(query);
    boxed = match (query.sort_by, query.sort_order) {
        (SortBy::Rating, SortOrder::Desc) => boxed.order_by(dsl::rating.desc()),
        (SortBy::Rating, SortOrder::Asc) => boxed.order_by(dsl::rating.asc()),
        (SortBy::Reviews, SortOrder::Desc) => boxed.order_by(dsl::review_count.desc()),
        (SortBy::Reviews, SortOrder::Asc) => boxed.order_by(dsl::review_count.asc()),
        (SortBy::Name, SortOrder::Desc) => boxed.order_by(dsl::name.desc()),
        (SortBy::Name, SortOrder::Asc) => boxed.order_by(dsl::name.asc()),
    };
    // Stable order of equal keys
    boxed = boxed.then_order_by(dsl::name.asc()).then_order_by(dsl::id.asc());

    let (limit, offset) = limit_offset(pagination);
    if let Some(limit) = limit {
        boxed = boxed.limit(limit);
    }
    if let Some(offset) = offset {
        boxed = boxed.offset(offset);
    }

    let rows = boxed
        .load::<models::RestaurantEntity>(conn)
        .map_err(from_diesel_err)?;
    let restaurants = load_restaurants_with_relations(conn, rows)?;
    Ok((restaurants, total.max(0) as u64))
}

fn restaurants_with_position(conn: &mut SqliteConnection) -> Result<Vec<RestaurantWithRelations>> {
    use schema::restaurants::dsl;
    let rows = schema::restaurants::table
        .filter(dsl::lat.is_not_null())
        .filter(dsl::lng.is_not_null())
        .load::<models::RestaurantEntity>(conn)
        .map_err(from_diesel_err)?;
    log::debug!("Loaded {} restaurants with a position", rows.len());
    load_restaurants_with_relations(conn, rows)
}

fn list_restaurants(conn: &mut SqliteConnection, pagination: &Pagination) -> Result<Vec<Restaurant>> {
    use schema::restaurants::dsl;
    let mut boxed = schema::restaurants::table.order_by(dsl::id).into_boxed();
    let (limit, offset) = limit_offset(pagination);
    if let Some(limit) = limit {
        boxed = boxed.limit(limit);
    }
    if let Some(offset) = offset {
        boxed = boxed.offset(offset);
    }
    Ok(boxed
        .load::<models::RestaurantEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_restaurant)
        .collect())
}

fn count_restaurants(conn: &mut SqliteConnection) -> Result<u64> {
    let count = schema::restaurants::table
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count.max(0) as u64)
}

fn set_restaurant_owner(conn: &mut SqliteConnection, id: &str, owner: &Id) -> Result<()> {
    use schema::restaurants::dsl;
    let count = diesel::update(dsl::restaurants.filter(dsl::id.eq(id)))
        .set((
            dsl::owner_id.eq(owner.as_str()),
            dsl::claimed.eq(from_flag(true)),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn set_restaurant_rating(
    conn: &mut SqliteConnection,
    id: &str,
    rating: Option<AvgRating>,
    review_count: u32,
) -> Result<()> {
    use schema::restaurants::dsl;
    let count = diesel::update(dsl::restaurants.filter(dsl::id.eq(id)))
        .set((
            dsl::rating.eq(rating.map(f64::from)),
            dsl::review_count.eq(i32::try_from(review_count).unwrap_or(i32::MAX)),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

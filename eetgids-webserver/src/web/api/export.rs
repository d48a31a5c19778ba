use super::*;

#[get("/export/restaurants.csv")]
pub fn csv_export(
    connections: sqlite::Connections,
    auth: Auth,
) -> result::Result<(ContentType, String), ApiError> {
    let db = connections.shared()?;
    auth.user_with_min_role(&db, Role::Admin)?;

    let query = RestaurantQuery {
        sort_by: SortBy::Name,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    let pagination = Pagination {
        offset: None,
        limit: Some(db.count_restaurants()?.max(1)),
    };
    let (restaurants, _) = db.query_restaurants(&query, &pagination)?;
    // Release the database connection asap
    drop(db);

    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in restaurants
        .into_iter()
        .map(adapters::csv::RestaurantRecord::from)
    {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    let data = String::from_utf8(wtr.into_inner()?)?;

    Ok((ContentType::CSV, data))
}

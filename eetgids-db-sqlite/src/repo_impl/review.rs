use super::*;

impl_repo!(ReviewRepo {
    fn create_review(&self, review: &Review) -> Result<()>;
    fn get_review(&self, id: &str) -> Result<Review>;
    fn approved_reviews_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<Review>>;
    fn pending_reviews(&self, pagination: &Pagination) -> Result<Vec<Review>>;
    fn approve_review(&self, id: &str) -> Result<()>;
    fn delete_review(&self, id: &str) -> Result<()>;
});

fn load_review(review: models::ReviewEntity) -> Result<Review> {
    let models::ReviewEntity {
        id,
        restaurant_id,
        rating,
        title,
        content,
        user_id,
        guest_name,
        guest_email,
        approved,
        verified,
        created_at,
    } = review;
    let author = match (user_id, guest_name, guest_email) {
        (Some(user_id), None, None) => Author::User(user_id.into()),
        (None, Some(name), Some(email)) => Author::Guest {
            name,
            email: email
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid guest e-mail address of review {id}"))?,
        },
        _ => {
            return Err(anyhow::anyhow!("Ambiguous author of review {id}").into());
        }
    };
    let rating = RatingValue::try_from(i64::from(rating))
        .map_err(|value| anyhow::anyhow!("Invalid rating value {value} of review {id}"))?;
    Ok(Review {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        rating,
        title,
        content,
        author,
        approved: into_flag(approved),
        verified: into_flag(verified),
        created_at: Timestamp::from_millis(created_at),
    })
}

fn load_reviews(rows: Vec<models::ReviewEntity>) -> Result<Vec<Review>> {
    rows.into_iter().map(load_review).collect()
}

fn create_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    let (user_id, guest_name, guest_email) = match &review.author {
        Author::User(id) => (Some(id.as_str()), None, None),
        Author::Guest { name, email } => (None, Some(name.as_str()), Some(email.as_str())),
    };
    let new_review = models::NewReview {
        id: review.id.as_str(),
        restaurant_id: review.restaurant_id.as_str(),
        rating: i16::from(review.rating.to_u8()),
        title: review.title.as_deref(),
        content: &review.content,
        user_id,
        guest_name,
        guest_email,
        approved: from_flag(review.approved),
        verified: from_flag(review.verified),
        created_at: review.created_at.as_millis(),
    };
    diesel::insert_into(schema::reviews::table)
        .values(&new_review)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_review(conn: &mut SqliteConnection, id: &str) -> Result<Review> {
    use schema::reviews::dsl;
    load_review(
        schema::reviews::table
            .filter(dsl::id.eq(id))
            .first::<models::ReviewEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn approved_reviews_of_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: &str,
) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    load_reviews(
        schema::reviews::table
            .filter(dsl::restaurant_id.eq(restaurant_id))
            .filter(dsl::approved.ne(0))
            .order_by(dsl::created_at.desc())
            .then_order_by(dsl::id) // disambiguation of equal time stamps
            .load::<models::ReviewEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn pending_reviews(conn: &mut SqliteConnection, pagination: &Pagination) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let mut query = schema::reviews::table
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
    load_reviews(
        query
            .load::<models::ReviewEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn approve_review(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::reviews::dsl;
    let count = diesel::update(dsl::reviews.filter(dsl::id.eq(id)))
        .set(dsl::approved.eq(from_flag(true)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_review(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::reviews::dsl;
    let count = diesel::delete(dsl::reviews.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        email -> Text,
        role -> SmallInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Reference data
///////////////////////////////////////////////////////////////////////

table! {
    cities (id) {
        id -> Text,
        name -> Text,
        slug -> Text,
        province -> Text,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        description -> Nullable<Text>,
    }
}

table! {
    cuisine_types (id) {
        id -> Text,
        name -> Text,
        slug -> Text,
        icon -> Nullable<Text>,
    }
}

///////////////////////////////////////////////////////////////////////
// Restaurants
///////////////////////////////////////////////////////////////////////

table! {
    restaurants (id) {
        id -> Text,
        city_id -> Nullable<Text>,
        name -> Text,
        name_search -> Text,
        slug -> Text,
        street -> Nullable<Text>,
        postal_code -> Nullable<Text>,
        city_name -> Nullable<Text>,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        phone -> Nullable<Text>,
        email -> Nullable<Text>,
        website -> Nullable<Text>,
        price_range -> Nullable<SmallInt>,
        rating -> Nullable<Double>,
        review_count -> Integer,
        verified -> SmallInt,
        claimed -> SmallInt,
        owner_id -> Nullable<Text>,
        features -> Text,
        specialties -> Text,
        description -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    restaurant_cuisines (restaurant_id, cuisine_id) {
        restaurant_id -> Text,
        cuisine_id -> Text,
    }
}

joinable!(restaurants -> cities (city_id));
joinable!(restaurant_cuisines -> restaurants (restaurant_id));
joinable!(restaurant_cuisines -> cuisine_types (cuisine_id));

///////////////////////////////////////////////////////////////////////
// User contributions
///////////////////////////////////////////////////////////////////////

table! {
    reviews (id) {
        id -> Text,
        restaurant_id -> Text,
        rating -> SmallInt,
        title -> Nullable<Text>,
        content -> Text,
        user_id -> Nullable<Text>,
        guest_name -> Nullable<Text>,
        guest_email -> Nullable<Text>,
        approved -> SmallInt,
        verified -> SmallInt,
        created_at -> BigInt,
    }
}

table! {
    favorites (user_id, restaurant_id) {
        user_id -> Text,
        restaurant_id -> Text,
        created_at -> BigInt,
    }
}

table! {
    restaurant_claims (id) {
        id -> Text,
        restaurant_id -> Text,
        user_id -> Text,
        business_email -> Text,
        phone -> Nullable<Text>,
        message -> Nullable<Text>,
        status -> SmallInt,
        rejection_reason -> Nullable<Text>,
        reviewed_by -> Nullable<Text>,
        reviewed_at -> Nullable<BigInt>,
        created_at -> BigInt,
    }
}

table! {
    restaurant_photos (id) {
        id -> Text,
        restaurant_id -> Text,
        url -> Text,
        caption -> Nullable<Text>,
        is_primary -> SmallInt,
        approved -> SmallInt,
        uploaded_by -> Nullable<Text>,
        created_at -> BigInt,
    }
}

joinable!(reviews -> restaurants (restaurant_id));
joinable!(favorites -> restaurants (restaurant_id));
joinable!(restaurant_claims -> restaurants (restaurant_id));
joinable!(restaurant_photos -> restaurants (restaurant_id));

///////////////////////////////////////////////////////////////////////
// Administration
///////////////////////////////////////////////////////////////////////

table! {
    import_jobs (id) {
        id -> Text,
        status -> SmallInt,
        processed_cities -> Integer,
        imported_restaurants -> Integer,
        imported_reviews -> Integer,
        skipped_restaurants -> Integer,
        last_city -> Nullable<Text>,
        errors -> Text,
        created_at -> BigInt,
        started_at -> Nullable<BigInt>,
        updated_at -> BigInt,
        finished_at -> Nullable<BigInt>,
    }
}

table! {
    ad_placements (id) {
        id -> Text,
        name -> Text,
        position -> SmallInt,
        image_url -> Text,
        target_url -> Text,
        active -> SmallInt,
        starts_at -> Nullable<BigInt>,
        ends_at -> Nullable<BigInt>,
    }
}

allow_tables_to_appear_in_same_query!(
    users,
    cities,
    cuisine_types,
    restaurants,
    restaurant_cuisines,
    reviews,
    favorites,
    restaurant_claims,
    restaurant_photos,
    import_jobs,
    ad_placements,
);

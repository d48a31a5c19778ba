// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use std::collections::{HashMap, HashSet};

use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use eetgids_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

/// Implements a repository trait for all connection types
/// by delegating each method to the free function of the
/// same name.
macro_rules! impl_repo {
    (@conn $conn:ty, $repo:ident { $(fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)* }) => {
        impl $repo for $conn {
            $(
                fn $name(&self $(, $arg: $ty)*) -> $ret {
                    $name(&mut self.conn.borrow_mut() $(, $arg)*)
                }
            )*
        }
    };
    ($repo:ident { $(fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)* }) => {
        impl_repo!(@conn DbReadOnly<'_>, $repo { $(fn $name(&self $(, $arg: $ty)*) -> $ret;)* });
        impl_repo!(@conn DbReadWrite<'_>, $repo { $(fn $name(&self $(, $arg: $ty)*) -> $ret;)* });
        impl_repo!(@conn DbConnection<'_>, $repo { $(fn $name(&self $(, $arg: $ty)*) -> $ret;)* });
    };
}

mod ad;
mod city;
mod claim;
mod cuisine;
mod favorite;
mod import_job;
mod photo;
mod restaurant;
mod review;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

// SQLite limits the number of host parameters per statement.
const MAX_BIND_PARAMS_PER_QUERY: usize = 500;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn from_flag(flag: bool) -> i16 {
    i16::from(flag)
}

fn into_flag(flag: i16) -> bool {
    flag != 0
}

fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).map_err(|err| repo::Error::Other(err.into()))
}

fn decode_list(json: &str) -> Result<Vec<String>> {
    if json.is_empty() {
        return Ok(vec![]);
    }
    serde_json::from_str(json).map_err(|err| repo::Error::Other(err.into()))
}

/// Folds case for substring search, including non-ASCII letters.
fn search_key(text: &str) -> String {
    text.to_lowercase()
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Translates the pagination into `(LIMIT, OFFSET)`.
///
/// Offsets beyond `i64::MAX` are clamped, i.e. they skip all rows.
fn limit_offset(pagination: &Pagination) -> (Option<i64>, Option<i64>) {
    let offset = saturating_i64(pagination.offset.unwrap_or(0));
    let limit = pagination.limit.map(saturating_i64);
    // SQLite does not support an OFFSET without a LIMIT
    // <https://www.sqlite.org/lang_select.html>
    match (limit, offset > 0) {
        (Some(limit), true) => (Some(limit), Some(offset)),
        (Some(limit), false) => (Some(limit), None),
        (None, true) => (Some(i64::MAX), Some(offset)),
        (None, false) => (None, None),
    }
}

fn load_url(url: &str) -> Option<Url> {
    url.parse()
        .map_err(|err| {
            // This should never happen if URLs have been validated properly on insert
            log::error!("Failed to load invalid URL '{url}': {err}");
        })
        .ok()
}

fn load_email(email: &str) -> Option<EmailAddress> {
    email
        .parse()
        .map_err(|_| {
            log::error!("Failed to load invalid e-mail address '{email}'");
        })
        .ok()
}

fn load_pos(lat: Option<f64>, lng: Option<f64>) -> Option<MapPoint> {
    let (lat, lng) = lat.zip(lng)?;
    MapPoint::try_from_lat_lng_deg(lat, lng)
        .map_err(|err| {
            log::error!("Failed to load invalid position ({lat},{lng}): {err}");
        })
        .ok()
}

fn load_city(city: models::CityEntity) -> City {
    let models::CityEntity {
        id,
        name,
        slug,
        province,
        lat,
        lng,
        description,
    } = city;
    City {
        id: id.into(),
        name,
        slug,
        province,
        center: load_pos(lat, lng),
        description,
    }
}

fn load_cuisine(cuisine: models::CuisineTypeEntity) -> CuisineType {
    let models::CuisineTypeEntity {
        id,
        name,
        slug,
        icon,
    } = cuisine;
    CuisineType {
        id: id.into(),
        name,
        slug,
        icon,
    }
}

fn load_restaurant(restaurant: models::RestaurantEntity) -> Restaurant {
    let models::RestaurantEntity {
        id,
        city_id,
        name,
        name_search: _,
        slug,
        street,
        postal_code,
        city_name,
        lat,
        lng,
        phone,
        email,
        website,
        price_range,
        rating,
        review_count,
        verified,
        claimed,
        owner_id,
        features,
        specialties,
        description,
        created_at,
    } = restaurant;
    let price_range = price_range.and_then(|p| {
        PriceRange::try_from(p)
            .map_err(|err| log::warn!("Ignoring price range of restaurant {id}: {err}"))
            .ok()
    });
    Restaurant {
        name,
        slug,
        address: Address {
            street,
            postal_code,
            city: city_name,
        },
        pos: load_pos(lat, lng),
        contact: Contact {
            phone,
            email: email.as_deref().and_then(load_email),
            website: website.as_deref().and_then(load_url),
        },
        price_range,
        rating: rating.map(AvgRating::from),
        review_count: u32::try_from(review_count).unwrap_or_default(),
        verified: into_flag(verified),
        claimed: into_flag(claimed),
        owner: owner_id.map(Into::into),
        features: load_list(&id, "features", &features),
        specialties: load_list(&id, "specialties", &specialties),
        description,
        city_id: city_id.map(Into::into),
        created_at: Timestamp::from_millis(created_at),
        id: id.into(),
    }
}

fn load_list(id: &str, column: &str, json: &str) -> Vec<String> {
    decode_list(json).unwrap_or_else(|err| {
        log::warn!("Ignoring {column} of restaurant {id}: {err}");
        vec![]
    })
}

/// Resolves city and cuisines of all given restaurants
/// with a constant number of queries per chunk.
fn load_restaurants_with_relations(
    conn: &mut SqliteConnection,
    rows: Vec<models::RestaurantEntity>,
) -> Result<Vec<RestaurantWithRelations>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let city_ids: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.city_id.as_deref())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let mut cities = HashMap::with_capacity(city_ids.len());
    for chunk in city_ids.chunks(MAX_BIND_PARAMS_PER_QUERY) {
        use schema::cities::dsl;
        for city in schema::cities::table
            .filter(dsl::id.eq_any(chunk))
            .load::<models::CityEntity>(conn)
            .map_err(from_diesel_err)?
        {
            let city = load_city(city);
            cities.insert(city.id.clone(), city);
        }
    }

    let restaurant_ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    let mut cuisines: HashMap<String, Vec<CuisineType>> = HashMap::new();
    for chunk in restaurant_ids.chunks(MAX_BIND_PARAMS_PER_QUERY) {
        use schema::{cuisine_types::dsl as c_dsl, restaurant_cuisines::dsl as rc_dsl};
        let links = schema::restaurant_cuisines::table
            .inner_join(schema::cuisine_types::table)
            .filter(rc_dsl::restaurant_id.eq_any(chunk))
            .select((rc_dsl::restaurant_id, schema::cuisine_types::all_columns))
            .order_by(c_dsl::name)
            .load::<(String, models::CuisineTypeEntity)>(conn)
            .map_err(from_diesel_err)?;
        for (restaurant_id, cuisine) in links {
            cuisines
                .entry(restaurant_id)
                .or_default()
                .push(load_cuisine(cuisine));
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let city = row
                .city_id
                .as_deref()
                .and_then(|id| cities.get(id))
                .cloned();
            let cuisines = cuisines.remove(&row.id).unwrap_or_default();
            RestaurantWithRelations {
                restaurant: load_restaurant(row),
                city,
                cuisines,
            }
        })
        .collect())
}

use super::prelude::*;
use crate::util::validate::non_blank;

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// User-facing filter options of a restaurant listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    pub city_slug: Option<String>,
    pub cuisine_slug: Option<String>,
    pub min_rating: Option<f64>,
    pub min_reviews: Option<u32>,
    pub price_ranges: Vec<PriceRange>,
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    /// 1-based
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPage {
    pub restaurants: Vec<RestaurantWithRelations>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl RestaurantPage {
    pub const fn empty(page: u64, limit: u64) -> Self {
        Self {
            restaurants: Vec::new(),
            total: 0,
            page,
            limit,
        }
    }

    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count()
    }
}

/// Converts a 1-based page number and page size into an offset/limit pair.
///
/// Pages beyond the range of an offset end up behind the last row.
pub fn page_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64, Pagination) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let pagination = Pagination {
        offset: Some((page - 1).saturating_mul(limit)),
        limit: Some(limit),
    };
    (page, limit, pagination)
}

/// Resolves city and cuisine slugs into ids.
///
/// Returns `None` if one of the slugs is unknown, i.e. if
/// the query could not match any restaurant.
pub fn resolve_restaurant_query<R>(repo: &R, filter: &RestaurantFilter) -> Result<Option<RestaurantQuery>>
where
    R: CityRepo + CuisineRepo,
{
    let city_id = match filter.city_slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => match repo.get_city_by_slug(slug) {
            Ok(city) => Some(city.id),
            Err(RepoError::NotFound) => {
                log::debug!("Unknown city '{slug}' in restaurant query");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };
    let cuisine_id = match filter.cuisine_slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => match repo.get_cuisine_by_slug(slug) {
            Ok(cuisine) => Some(cuisine.id),
            Err(RepoError::NotFound) => {
                log::debug!("Unknown cuisine '{slug}' in restaurant query");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };
    let mut price_ranges = filter.price_ranges.clone();
    price_ranges.sort_unstable();
    price_ranges.dedup();
    Ok(Some(RestaurantQuery {
        city_id,
        cuisine_id,
        min_rating: filter.min_rating.filter(|r| r.is_finite()),
        min_reviews: filter.min_reviews,
        price_ranges,
        name_contains: non_blank(filter.search.clone()),
        sort_by: filter.sort_by.unwrap_or_default(),
        sort_order: filter.sort_order.unwrap_or_default(),
    }))
}

pub fn query_restaurants<R>(repo: &R, filter: &RestaurantFilter) -> Result<RestaurantPage>
where
    R: CityRepo + CuisineRepo + RestaurantRepo,
{
    let (page, limit, pagination) = page_pagination(filter.page, filter.limit);
    let Some(query) = resolve_restaurant_query(repo, filter)? else {
        return Ok(RestaurantPage::empty(page, limit));
    };
    let (restaurants, total) = repo.query_restaurants(&query, &pagination)?;
    Ok(RestaurantPage {
        restaurants,
        total,
        page,
        limit,
    })
}

use std::collections::HashMap;

use super::{prelude::*, query_restaurants::*};

pub const TOP_CUISINES: usize = 5;

/// Maximum number of matching restaurants taken into account.
pub const STATS_SAMPLE_LIMIT: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuisineFrequency {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceShare {
    pub price_range: PriceRange,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingStats {
    pub restaurant_count: usize,
    pub average_rating: Option<f64>,
    pub top_cuisines: Vec<CuisineFrequency>,
    pub price_distribution: Vec<PriceShare>,
}

/// Mean rating of all restaurants that have at least one review.
pub fn average_rating(restaurants: &[RestaurantWithRelations]) -> Option<f64> {
    let (sum, count) = restaurants
        .iter()
        .map(|r| &r.restaurant)
        .filter(|r| r.review_count > 0)
        .filter_map(|r| r.rating)
        .fold((0.0, 0u32), |(sum, count), rating| {
            (sum + f64::from(rating), count + 1)
        });
    (count > 0).then(|| sum / f64::from(count))
}

/// The most frequent cuisine names, ties ordered by name.
///
/// Cuisine types sharing a name are counted together and
/// linked by the slug of the first one.
pub fn top_cuisines(restaurants: &[RestaurantWithRelations], n: usize) -> Vec<CuisineFrequency> {
    let mut counts: HashMap<&str, CuisineFrequency> = HashMap::new();
    for cuisine in restaurants.iter().flat_map(|r| &r.cuisines) {
        counts
            .entry(cuisine.name.as_str())
            .or_insert_with(|| CuisineFrequency {
                name: cuisine.name.clone(),
                slug: cuisine.slug.clone(),
                count: 0,
            })
            .count += 1;
    }
    let mut frequencies: Vec<_> = counts.into_values().collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    frequencies.truncate(n);
    frequencies
}

/// `count` as a percentage of `total`, 0 if `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Share of each price tier among all restaurants, in tier order.
pub fn price_distribution(restaurants: &[RestaurantWithRelations]) -> Vec<PriceShare> {
    let total = restaurants.len();
    PriceRange::ALL
        .into_iter()
        .map(|price_range| {
            let count = restaurants
                .iter()
                .filter(|r| r.restaurant.price_range == Some(price_range))
                .count();
            PriceShare {
                price_range,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

pub fn aggregate_listing(restaurants: &[RestaurantWithRelations]) -> ListingStats {
    ListingStats {
        restaurant_count: restaurants.len(),
        average_rating: average_rating(restaurants),
        top_cuisines: top_cuisines(restaurants, TOP_CUISINES),
        price_distribution: price_distribution(restaurants),
    }
}

/// Statistics of all restaurants matching the filter, ignoring its paging.
pub fn listing_stats<R>(repo: &R, filter: &RestaurantFilter) -> Result<ListingStats>
where
    R: CityRepo + CuisineRepo + RestaurantRepo,
{
    let Some(query) = resolve_restaurant_query(repo, filter)? else {
        return Ok(aggregate_listing(&[]));
    };
    let pagination = Pagination {
        offset: None,
        limit: Some(STATS_SAMPLE_LIMIT),
    };
    let (restaurants, total) = repo.query_restaurants(&query, &pagination)?;
    if total > STATS_SAMPLE_LIMIT {
        log::debug!("Listing statistics only cover {STATS_SAMPLE_LIMIT} of {total} restaurants");
    }
    Ok(aggregate_listing(&restaurants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eetgids_entities::builders::*;

    fn listed(restaurant: Restaurant, cuisines: &[&str]) -> RestaurantWithRelations {
        RestaurantWithRelations {
            restaurant,
            city: None,
            cuisines: cuisines
                .iter()
                .map(|name| {
                    CuisineType::build()
                        .id(&format!("id-{name}"))
                        .name(name)
                        .slug(&name.to_lowercase())
                        .finish()
                })
                .collect(),
        }
    }

    #[test]
    fn average_excludes_restaurants_without_reviews() {
        let restaurants = [
            listed(Restaurant::build().rating(5.0, 0).finish(), &[]),
            listed(Restaurant::build().rating(3.0, 2).finish(), &[]),
        ];
        assert_eq!(Some(3.0), average_rating(&restaurants));
    }

    #[test]
    fn average_of_unrated_listing_is_none() {
        let restaurants = [
            listed(Restaurant::build().finish(), &[]),
            listed(Restaurant::build().rating(4.0, 0).finish(), &[]),
        ];
        assert_eq!(None, average_rating(&restaurants));
        assert_eq!(None, average_rating(&[]));
    }

    #[test]
    fn top_cuisines_by_count_then_name() {
        let restaurants = [
            listed(Restaurant::build().finish(), &["Thais", "Italiaans"]),
            listed(Restaurant::build().finish(), &["Italiaans", "Frans"]),
            listed(Restaurant::build().finish(), &["Japans", "Thais"]),
            listed(Restaurant::build().finish(), &["Indiaas", "Grieks"]),
            listed(Restaurant::build().finish(), &["Chinees", "Italiaans"]),
        ];
        let top = top_cuisines(&restaurants, TOP_CUISINES);
        let names: Vec<_> = top.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(
            vec![
                ("Italiaans", 3),
                ("Thais", 2),
                ("Chinees", 1),
                ("Frans", 1),
                ("Grieks", 1),
            ],
            names
        );
    }

    #[test]
    fn cuisine_types_with_equal_names_share_a_count() {
        let cuisine = |id: &str, slug: &str| {
            CuisineType::build().id(id).name("Surinaams").slug(slug).finish()
        };
        let restaurants = [
            RestaurantWithRelations {
                restaurant: Restaurant::build().finish(),
                city: None,
                cuisines: vec![cuisine("k1", "surinaams")],
            },
            RestaurantWithRelations {
                restaurant: Restaurant::build().finish(),
                city: None,
                cuisines: vec![cuisine("k2", "surinaamse-keuken")],
            },
            listed(Restaurant::build().finish(), &["Thais"]),
        ];
        let top = top_cuisines(&restaurants, TOP_CUISINES);
        assert_eq!(2, top.len());
        assert_eq!("Surinaams", top[0].name);
        assert_eq!(2, top[0].count);
        assert_eq!("surinaams", top[0].slug);
    }

    #[test]
    fn zero_total_yields_zero_percentage() {
        assert_eq!(0.0, percentage(0, 0));
        let distribution = price_distribution(&[]);
        assert_eq!(4, distribution.len());
        assert!(distribution.iter().all(|s| s.percentage == 0.0 && s.count == 0));
    }

    #[test]
    fn price_shares() {
        let restaurants = [
            listed(Restaurant::build().price_range(PriceRange::Moderate).finish(), &[]),
            listed(Restaurant::build().price_range(PriceRange::Moderate).finish(), &[]),
            listed(Restaurant::build().price_range(PriceRange::Luxury).finish(), &[]),
            listed(Restaurant::build().finish(), &[]),
        ];
        let stats = aggregate_listing(&restaurants);
        assert_eq!(4, stats.restaurant_count);
        let shares: Vec<_> = stats
            .price_distribution
            .iter()
            .map(|s| (s.price_range, s.count, s.percentage))
            .collect();
        assert_eq!(
            vec![
                (PriceRange::Budget, 0, 0.0),
                (PriceRange::Moderate, 2, 50.0),
                (PriceRange::Expensive, 0, 0.0),
                (PriceRange::Luxury, 1, 25.0),
            ],
            shares
        );
    }
}

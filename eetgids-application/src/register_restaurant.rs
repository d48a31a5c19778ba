use super::*;

pub fn register_restaurant<N>(
    connections: &sqlite::Connections,
    notify: &N,
    owner: Option<&Id>,
    new_restaurant: usecases::NewRestaurant,
) -> Result<Restaurant>
where
    N: NotificationGateway + ?Sized,
{
    let restaurant = connections
        .exclusive()?
        .transaction(|conn| usecases::register_restaurant(conn, owner, new_restaurant))?;
    notify.notify(NotificationEvent::RestaurantRegistered {
        restaurant: &restaurant,
    });
    Ok(restaurant)
}

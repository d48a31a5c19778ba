use super::{parse_web_url, prelude::*};
use crate::util::validate::non_blank;

#[derive(Debug, Clone, Default)]
pub struct NewAdPlacement {
    pub name: String,
    pub position: String,
    pub image_url: String,
    pub target_url: String,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

fn validate_ad(id: Id, new: NewAdPlacement) -> Result<AdPlacement> {
    let NewAdPlacement {
        name,
        position,
        image_url,
        target_url,
        active,
        starts_at,
        ends_at,
    } = new;
    let name = non_blank(Some(name)).ok_or(Error::Name)?;
    let position = position.trim().parse::<AdPosition>().map_err(|_| Error::AdPosition)?;
    let image_url = parse_web_url(Some(&image_url))?.ok_or(Error::Url)?;
    let target_url = parse_web_url(Some(&target_url))?.ok_or(Error::Url)?;
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end <= start {
            return Err(Error::EndBeforeStart);
        }
    }
    Ok(AdPlacement {
        id,
        name,
        position,
        image_url,
        target_url,
        active,
        starts_at,
        ends_at,
    })
}

pub fn create_ad<R: AdRepo>(repo: &R, new: NewAdPlacement) -> Result<AdPlacement> {
    let ad = validate_ad(Id::new(), new)?;
    repo.create_ad(&ad)?;
    log::info!("Created ad placement {} ({})", ad.id, ad.name);
    Ok(ad)
}

pub fn update_ad<R: AdRepo>(repo: &R, id: &str, new: NewAdPlacement) -> Result<AdPlacement> {
    let old = repo.get_ad(id)?;
    let ad = validate_ad(old.id, new)?;
    repo.update_ad(&ad)?;
    log::info!("Updated ad placement {}", ad.id);
    Ok(ad)
}

pub fn delete_ad<R: AdRepo>(repo: &R, id: &str) -> Result<()> {
    repo.delete_ad(id)?;
    log::info!("Deleted ad placement {id}");
    Ok(())
}

/// Ads that are switched on and scheduled for `now`.
pub fn active_ads<R: AdRepo>(repo: &R, position: Option<AdPosition>, now: Timestamp) -> Result<Vec<AdPlacement>> {
    Ok(repo
        .all_ads()?
        .into_iter()
        .filter(|ad| position.map_or(true, |p| ad.position == p))
        .filter(|ad| ad.is_active_at(now))
        .collect())
}

use super::*;

const ADMIN_PAGE_LIMIT: u64 = 50;

/// Non-admins are sent back to the home page.
fn admin_user(db: &sqlite::Connections, auth: &Auth) -> result::Result<User, PageError> {
    let db = db.shared()?;
    match auth.user_with_min_role(&db, Role::Admin) {
        Ok(user) => Ok(user),
        Err(err) => {
            let status = err.business().and_then(api::business_error_status);
            if status == Some(Status::Unauthorized) || status == Some(Status::Forbidden) {
                debug!("Denied access to the admin pages: {err}");
                return Err(PageError::Redirect(Redirect::to(uri!(super::get_index))));
            }
            Err(err.into())
        }
    }
}

fn admin_pagination(page: Option<u64>) -> Pagination {
    let (_, _, pagination) = usecases::page_pagination(page, Some(ADMIN_PAGE_LIMIT));
    pagination
}

fn admin_viewer<'a>(user: User, cfg: &'a Cfg) -> view::Viewer<'a> {
    view::Viewer {
        user: Some(user),
        sign_in_url: cfg.sign_in_url.as_deref(),
    }
}

fn admin_action<T>(result: result::Result<T, AppError>, target: &str, success: &str) -> FormResult {
    match result {
        Ok(_) => Ok(Flash::success(Redirect::to(target.to_owned()), success)),
        Err(err) => form_error(err.into(), target.to_owned()),
    }
}

#[get("/admin")]
pub fn get_dashboard(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
) -> Page {
    let admin = admin_user(&db, &auth)?;
    let db = db.shared()?;
    let pagination = Pagination {
        offset: None,
        limit: Some(ADMIN_PAGE_LIMIT),
    };
    let dashboard = view::Dashboard {
        restaurant_count: db.count_restaurants()?,
        pending_reviews: usecases::pending_reviews(&db, &pagination)?.len(),
        pending_claims: usecases::claims_by_status(&db, Some(ClaimStatus::Pending), &pagination)?
            .len(),
        pending_photos: usecases::pending_photos(&db, &pagination)?.len(),
        import_job: usecases::import_job_status(&db)?,
        page_limit: ADMIN_PAGE_LIMIT,
    };
    Ok(view::admin_dashboard(&admin_viewer(admin, cfg), &dashboard))
}

#[get("/admin/reviews?<page>")]
pub fn get_reviews(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
    page: Option<u64>,
) -> Page {
    let admin = admin_user(&db, &auth)?;
    let db = db.shared()?;
    let reviews = usecases::pending_reviews(&db, &admin_pagination(page))?;
    let reviews = reviews
        .into_iter()
        .map(|review| {
            let restaurant = db.get_restaurant_with_relations(review.restaurant_id.as_str())?;
            Ok((review, restaurant))
        })
        .collect::<result::Result<Vec<_>, RepoError>>()?;
    Ok(view::admin_reviews(&admin_viewer(admin, cfg), flash, &reviews))
}

#[post("/admin/reviews/<id>/approve")]
pub fn post_approve_review(db: sqlite::Connections, auth: Auth, id: &str) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::approve_review(&db, id),
        "/admin/reviews",
        "De review is goedgekeurd.",
    )
}

#[post("/admin/reviews/<id>/reject")]
pub fn post_reject_review(db: sqlite::Connections, auth: Auth, id: &str) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::reject_review(&db, id),
        "/admin/reviews",
        "De review is verwijderd.",
    )
}

#[get("/admin/claims?<status>&<page>")]
pub fn get_claims(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
    status: Option<&str>,
    page: Option<u64>,
) -> Page {
    let admin = admin_user(&db, &auth)?;
    let status = match status {
        None | Some("") => ClaimStatus::Pending,
        Some(status) => status.parse().unwrap_or_else(|_| {
            debug!("Unknown claim status '{status}'");
            ClaimStatus::Pending
        }),
    };
    let db = db.shared()?;
    let claims = usecases::claims_by_status(&db, Some(status), &admin_pagination(page))?;
    let claims = claims
        .into_iter()
        .map(|claim| {
            let restaurant = db.get_restaurant_with_relations(claim.restaurant_id.as_str())?;
            Ok((claim, restaurant))
        })
        .collect::<result::Result<Vec<_>, RepoError>>()?;
    Ok(view::admin_claims(
        &admin_viewer(admin, cfg),
        flash,
        status,
        &claims,
    ))
}

#[post("/admin/claims/<id>/approve")]
pub fn post_approve_claim(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
) -> FormResult {
    let admin = admin_user(&db, &auth)?;
    admin_action(
        flows::approve_claim(&db, &***notify, id, &admin.id),
        "/admin/claims",
        "De claim is goedgekeurd.",
    )
}

#[derive(FromForm)]
pub struct ClaimRejectionForm {
    reason: Option<String>,
}

#[post("/admin/claims/<id>/reject", data = "<rejection>")]
pub fn post_reject_claim(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
    rejection: Form<ClaimRejectionForm>,
) -> FormResult {
    let admin = admin_user(&db, &auth)?;
    let reason = rejection
        .into_inner()
        .reason
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty());
    admin_action(
        flows::reject_claim(&db, &***notify, id, &admin.id, reason),
        "/admin/claims",
        "De claim is afgewezen.",
    )
}

#[get("/admin/photos?<page>")]
pub fn get_photos(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
    page: Option<u64>,
) -> Page {
    let admin = admin_user(&db, &auth)?;
    let db = db.shared()?;
    let photos = usecases::pending_photos(&db, &admin_pagination(page))?;
    let photos = photos
        .into_iter()
        .map(|photo| {
            let restaurant = db.get_restaurant_with_relations(photo.restaurant_id.as_str())?;
            Ok((photo, restaurant))
        })
        .collect::<result::Result<Vec<_>, RepoError>>()?;
    Ok(view::admin_photos(
        &admin_viewer(admin, cfg),
        flash,
        &photos,
        usecases::DEFAULT_PHOTO_BATCH_SIZE,
    ))
}

#[post("/admin/photos/<id>/approve")]
pub fn post_approve_photo(db: sqlite::Connections, auth: Auth, id: &str) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::approve_photo(&db, id),
        "/admin/photos",
        "De foto is goedgekeurd.",
    )
}

#[post("/admin/photos/<id>/reject")]
pub fn post_reject_photo(db: sqlite::Connections, auth: Auth, id: &str) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::reject_photo(&db, id),
        "/admin/photos",
        "De foto is verwijderd.",
    )
}

#[post("/admin/photos/<id>/primary")]
pub fn post_primary_photo(db: sqlite::Connections, auth: Auth, id: &str) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::set_primary_photo(&db, id),
        "/admin/photos",
        "De hoofdfoto is ingesteld.",
    )
}

#[get("/admin/import")]
pub fn get_import(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
) -> Page {
    let admin = admin_user(&db, &auth)?;
    let job = usecases::import_job_status(&db.shared()?)?;
    Ok(view::admin_import(
        &admin_viewer(admin, cfg),
        flash,
        job.as_ref(),
    ))
}

#[post("/admin/import")]
pub fn post_start_import(db: sqlite::Connections, auth: Auth) -> FormResult {
    admin_user(&db, &auth)?;
    admin_action(
        flows::control_import_job(&db, usecases::ImportAction::Start),
        "/admin/import",
        "De import is gestart.",
    )
}

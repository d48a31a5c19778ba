use super::*;

#[post("/import-jobs", format = "application/json", data = "<control>")]
pub fn post_import_job(
    db: sqlite::Connections,
    auth: Auth,
    control: JsonResult<json::ImportJobControl>,
) -> Result<Option<json::ImportJob>> {
    require_admin(&db, &auth)?;
    let action = control?.into_inner().action.parse::<usecases::ImportAction>()?;
    let job = flows::control_import_job(&db, action)?;
    Ok(Json(job.map(Into::into)))
}

/// Progress reports of the external import worker.
#[put("/import-jobs/<id>", format = "application/json", data = "<progress>")]
pub fn put_import_job_progress(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    cfg: &State<Cfg>,
    auth: Auth,
    id: &str,
    progress: JsonResult<json::ImportJobProgress>,
) -> Result<json::ImportJob> {
    auth.has_worker_token(cfg)?;
    let progress = from_json::import_job_progress(progress?.into_inner())?;
    let job = flows::report_import_job_progress(&db, id, progress)?;
    if job.status.is_terminal() {
        // The import may have added cities and cuisines
        cache.invalidate();
    }
    Ok(Json(job.into()))
}

#[post("/photo-refresh", format = "application/json", data = "<request>")]
pub async fn post_photo_refresh(
    db: sqlite::Connections,
    photo_source: &State<PhotoSource>,
    auth: Auth,
    request: JsonResult<'_, json::PhotoRefreshRequest>,
) -> Result<json::PhotoRefreshResult> {
    let params = from_json::photo_refresh_params(request?.into_inner());
    require_admin(&db, &auth)?;
    let photo_source = photo_source.inner().clone();
    let batch = run_blocking(move || flows::refresh_photos(&db, &*photo_source, params)).await?;
    Ok(Json(to_json::photo_refresh_result(batch)))
}

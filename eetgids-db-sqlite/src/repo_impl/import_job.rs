use super::*;

impl_repo!(ImportJobRepo {
    fn create_import_job(&self, job: &ImportJob) -> Result<()>;
    fn get_import_job(&self, id: &str) -> Result<ImportJob>;
    fn latest_import_job(&self) -> Result<Option<ImportJob>>;
    fn update_import_job(&self, job: &ImportJob) -> Result<()>;
});

fn counter(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn into_new_import_job(job: &ImportJob) -> Result<models::NewImportJob<'_>> {
    let ImportJob {
        id,
        status,
        counters,
        last_city,
        errors,
        created_at,
        started_at,
        updated_at,
        finished_at,
    } = job;
    Ok(models::NewImportJob {
        id: id.as_str(),
        status: ImportJobStatusPrimitive::from(*status),
        processed_cities: counter(counters.processed_cities),
        imported_restaurants: counter(counters.imported_restaurants),
        imported_reviews: counter(counters.imported_reviews),
        skipped_restaurants: counter(counters.skipped_restaurants),
        last_city: last_city.as_deref(),
        errors: encode_list(errors)?,
        created_at: created_at.as_millis(),
        started_at: started_at.map(Timestamp::as_millis),
        updated_at: updated_at.as_millis(),
        finished_at: finished_at.map(Timestamp::as_millis),
    })
}

fn load_import_job(job: models::ImportJobEntity) -> Result<ImportJob> {
    let models::ImportJobEntity {
        id,
        status,
        processed_cities,
        imported_restaurants,
        imported_reviews,
        skipped_restaurants,
        last_city,
        errors,
        created_at,
        started_at,
        updated_at,
        finished_at,
    } = job;
    let status = ImportJobStatus::try_from(status).map_err(anyhow::Error::from)?;
    Ok(ImportJob {
        id: id.into(),
        status,
        counters: ImportJobCounters {
            processed_cities: u32::try_from(processed_cities).unwrap_or_default(),
            imported_restaurants: u32::try_from(imported_restaurants).unwrap_or_default(),
            imported_reviews: u32::try_from(imported_reviews).unwrap_or_default(),
            skipped_restaurants: u32::try_from(skipped_restaurants).unwrap_or_default(),
        },
        last_city,
        errors: decode_list(&errors)?,
        created_at: Timestamp::from_millis(created_at),
        started_at: started_at.map(Timestamp::from_millis),
        updated_at: Timestamp::from_millis(updated_at),
        finished_at: finished_at.map(Timestamp::from_millis),
    })
}

fn create_import_job(conn: &mut SqliteConnection, job: &ImportJob) -> Result<()> {
    diesel::insert_into(schema::import_jobs::table)
        .values(&into_new_import_job(job)?)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_import_job(conn: &mut SqliteConnection, id: &str) -> Result<ImportJob> {
    use schema::import_jobs::dsl;
    load_import_job(
        schema::import_jobs::table
            .filter(dsl::id.eq(id))
            .first::<models::ImportJobEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn latest_import_job(conn: &mut SqliteConnection) -> Result<Option<ImportJob>> {
    use schema::import_jobs::dsl;
    schema::import_jobs::table
        .order_by(dsl::created_at.desc())
        .then_order_by(diesel::dsl::sql::<diesel::sql_types::BigInt>("rowid DESC")) // disambiguation of equal time stamps
        .first::<models::ImportJobEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_import_job)
        .transpose()
}

fn update_import_job(conn: &mut SqliteConnection, job: &ImportJob) -> Result<()> {
    use schema::import_jobs::dsl;
    let count = diesel::update(dsl::import_jobs.filter(dsl::id.eq(job.id.as_str())))
        .set(&into_new_import_job(job)?)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

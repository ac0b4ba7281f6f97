//! Tap analytics endpoint.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError, web};
use chrono::SecondsFormat;

use taps_core::domain::{DateRange, Interval, TimeBucketCount, mask_token};
use taps_core::error::RepoError;
use taps_core::ports::RateLimitDecision;
use taps_shared::dto::{TapsAnalyticsQuery, TimePeriodCount};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// GET /api/taps/analytics
///
/// Steps run in order and the first failure ends the request: parameters,
/// rate limit, token, interval, dates, query.
pub async fn taps_analytics(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let params = match parse_query(query.into_inner()) {
        Ok(params) => params,
        Err(e) => return e.error_response(),
    };

    let decision = state
        .rate_limiter
        .check(&params.token, state.requests_per_window)
        .await;

    let mut response = match aggregate(&state, &params, &decision).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => e.error_response(),
    };

    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining));

    response
}

async fn aggregate(
    state: &AppState,
    params: &TapsAnalyticsQuery,
    decision: &RateLimitDecision,
) -> AppResult<Vec<TimePeriodCount>> {
    if !decision.allowed {
        return Err(AppError::RateLimited {
            limit: decision.limit,
            window_minutes: (decision.retry_after.as_secs_f64() / 60.0).round() as u64,
            retry_after_secs: decision.retry_after_secs(),
        });
    }

    let team = state
        .teams
        .find_by_token(&params.token)
        .await?
        .ok_or_else(|| {
            tracing::debug!(token = %mask_token(&params.token), "Unknown API token");
            AppError::InvalidCredential
        })?;

    let interval: Interval = params.interval.parse()?;
    let range = DateRange::parse(&params.start_date, &params.end_date)?;

    if range.is_inverted() {
        tracing::debug!(team_id = team.id, "Inverted date range, nothing to aggregate");
        return Ok(Vec::new());
    }

    let rows = tokio::time::timeout(
        state.query_timeout,
        state.analytics.count_taps(team.id, interval, range),
    )
    .await
    .map_err(|_| RepoError::Timeout(state.query_timeout))??;

    Ok(rows.iter().map(to_time_period).collect())
}

fn to_time_period(row: &TimeBucketCount) -> TimePeriodCount {
    TimePeriodCount {
        time_period: row.bucket_start.to_rfc3339_opts(SecondsFormat::Millis, true),
        count: row.count.to_string(),
    }
}

/// Pull the four required parameters out of the raw query pairs.
///
/// A parameter that is absent or empty is missing; one given more than once
/// is rejected as an array. Missing takes precedence.
fn parse_query(pairs: Vec<(String, String)>) -> AppResult<TapsAnalyticsQuery> {
    let mut token = Vec::new();
    let mut interval = Vec::new();
    let mut start_date = Vec::new();
    let mut end_date = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "token" => token.push(value),
            "interval" => interval.push(value),
            "start_date" => start_date.push(value),
            "end_date" => end_date.push(value),
            _ => {}
        }
    }

    let fields = [&token, &interval, &start_date, &end_date];
    let missing = |values: &Vec<String>| match values.as_slice() {
        [] => true,
        [single] => single.is_empty(),
        _ => false,
    };

    if fields.iter().any(|values| missing(*values)) {
        return Err(AppError::MissingParameters);
    }
    if fields.iter().any(|values| values.len() > 1) {
        return Err(AppError::RepeatedParameters);
    }

    let single = |mut values: Vec<String>| values.pop().unwrap_or_default();
    Ok(TapsAnalyticsQuery {
        token: single(token),
        interval: single(interval),
        start_date: single(start_date),
        end_date: single(end_date),
    })
}

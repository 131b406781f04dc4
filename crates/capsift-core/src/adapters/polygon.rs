use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{DailyBar, IsoDate, MetadataRecord, Symbol};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, NoopHttpClient, ReqwestHttpClient};
use crate::provider::{
    DailyBarsRequest, MarketDataSource, PageCursor, SourceError, TickerPage, TickerPageRequest,
};
use crate::ValidationError;

const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Aggregates page cap documented by the provider.
const AGGS_PAGE_LIMIT: usize = 5_000;

/// Polygon.io adapter for the market-data capability surface.
///
/// Listing and aggregate endpoints paginate through `next_url`; the adapter
/// hands those URLs back as opaque cursors and follows them verbatim on the
/// next call, re-applying auth headers each time.
#[derive(Clone)]
pub struct PolygonAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
    timeout_ms: u64,
}

impl Default for PolygonAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth: HttpAuth::None,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl PolygonAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, auth: HttpAuth) -> Self {
        Self {
            http_client,
            auth,
            ..Self::default()
        }
    }

    /// Production adapter: reqwest transport plus a bearer key taken from
    /// `CAPSIFT_POLYGON_API_KEY`, falling back to `POLYGON_API_KEY`.
    pub fn from_env() -> Result<Self, SourceError> {
        let key = std::env::var("CAPSIFT_POLYGON_API_KEY")
            .or_else(|_| std::env::var("POLYGON_API_KEY"))
            .map_err(|_| {
                SourceError::invalid_request(
                    "no provider API key: set CAPSIFT_POLYGON_API_KEY or POLYGON_API_KEY",
                )
            })?;

        Ok(Self::with_http_client(
            Arc::new(ReqwestHttpClient::new()),
            HttpAuth::BearerToken(key),
        ))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn get_json(&self, url: &str) -> Result<String, SourceError> {
        let request = HttpRequest::get(url)
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::transport(error.message()))?;

        tracing::debug!(url, status = response.status, "provider call completed");

        if !response.is_success() {
            return Err(SourceError::status(response.status));
        }

        Ok(response.body)
    }

    fn listing_url(&self, request: &TickerPageRequest) -> String {
        format!(
            "{}/v3/reference/tickers?market={}&type={}&active={}&order=asc&sort=ticker&limit={}",
            self.base_url,
            urlencoding::encode(&request.market),
            urlencoding::encode(&request.security_type),
            request.active,
            request.page_size,
        )
    }

    fn details_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/v3/reference/tickers/{}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
        )
    }

    fn aggs_url(&self, request: &DailyBarsRequest) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true&sort=asc&limit={}",
            self.base_url,
            urlencoding::encode(request.symbol.as_str()),
            request.from,
            request.to,
            AGGS_PAGE_LIMIT,
        )
    }
}

impl MarketDataSource for PolygonAdapter {
    fn ticker_page<'a>(
        &'a self,
        request: TickerPageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TickerPage, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let url = match &request.cursor {
                Some(cursor) => cursor.as_str().to_owned(),
                None => self.listing_url(&request),
            };

            let body = self.get_json(&url).await?;
            let payload = serde_json::from_str::<ListingResponse>(&body)
                .map_err(|error| SourceError::decode(format!("ticker listing: {error}")))?;

            let symbols = payload
                .results
                .iter()
                .map(|row| Symbol::parse(&row.ticker).map_err(validation_to_error))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(TickerPage {
                symbols,
                next: payload.next_url.map(PageCursor::new),
            })
        })
    }

    fn ticker_details<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<MetadataRecord, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.get_json(&self.details_url(symbol)).await?;
            let payload = serde_json::from_str::<DetailsResponse>(&body)
                .map_err(|error| SourceError::decode(format!("ticker details: {error}")))?;

            let details = payload.results.ok_or_else(|| {
                SourceError::decode("ticker details payload is missing 'results'")
            })?;

            normalize_details(details)
        })
    }

    fn daily_bars<'a>(
        &'a self,
        request: DailyBarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DailyBar>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let mut url = self.aggs_url(&request);
            let mut bars = Vec::new();

            loop {
                let body = self.get_json(&url).await?;
                let payload = serde_json::from_str::<AggsResponse>(&body)
                    .map_err(|error| SourceError::decode(format!("daily aggregates: {error}")))?;

                for row in payload.results {
                    bars.push(normalize_agg(row)?);
                }

                match payload.next_url {
                    Some(next) => url = next,
                    None => break,
                }
            }

            Ok(bars)
        })
    }
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    results: Vec<ListingRow>,
    next_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    ticker: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    results: Option<TickerDetails>,
}

/// Reference payload for one ticker. Absent fields stay absent in the
/// domain record; only the symbol itself is required.
#[derive(Debug, Deserialize)]
struct TickerDetails {
    ticker: String,
    #[serde(default)]
    active: bool,
    #[serde(rename = "type")]
    security_type: Option<String>,
    market_cap: Option<f64>,
    primary_exchange: Option<String>,
    sic_description: Option<String>,
    list_date: Option<String>,
    name: Option<String>,
    description: Option<String>,
    total_employees: Option<u64>,
    share_class_shares_outstanding: Option<f64>,
    weighted_shares_outstanding: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AggsResponse {
    #[serde(default)]
    results: Vec<AggRow>,
    next_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggRow {
    t: i64,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: Option<f64>,
}

fn normalize_details(payload: TickerDetails) -> Result<MetadataRecord, SourceError> {
    let symbol = Symbol::parse(&payload.ticker).map_err(validation_to_error)?;
    let list_date = payload
        .list_date
        .as_deref()
        .map(IsoDate::parse)
        .transpose()
        .map_err(validation_to_error)?;

    Ok(MetadataRecord {
        symbol,
        active: payload.active,
        security_type: payload.security_type.unwrap_or_default(),
        market_cap: payload.market_cap,
        primary_exchange: payload.primary_exchange.unwrap_or_default(),
        industry_description: payload.sic_description,
        list_date,
        display_name: payload.name,
        description: payload.description,
        employee_count: payload.total_employees,
        shares_outstanding: payload.share_class_shares_outstanding,
        weighted_shares_outstanding: payload.weighted_shares_outstanding,
    })
}

fn normalize_agg(row: AggRow) -> Result<DailyBar, SourceError> {
    let date = IsoDate::from_unix_millis(row.t).map_err(validation_to_error)?;
    Ok(DailyBar {
        date,
        open: row.o,
        high: row.h,
        low: row.l,
        close: row.c,
        volume: row.v,
    })
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::decode(error.to_string())
}

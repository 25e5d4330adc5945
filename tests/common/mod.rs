//! Shared fixtures for router tests: a canned market data provider,
//! in-memory repositories and a verifier seeded with the fixture JWKS.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use jiff::civil::{Date, date};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use serde_json::{Value, json};

use equity_rs::AppState;
use equity_rs::api::routes::create_router;
use equity_rs::charting::{FinancialRecord, InstitutionalHolder, StatementField};
use equity_rs::config::Settings;
use equity_rs::error::{AppError, AppResult};
use equity_rs::external::market::{
    CompanyProfile, Financials, Fundamentals, KeyMetrics, MarketDataProvider, PeriodRecords,
    PricePoint, Timeframe,
};
use equity_rs::models::NewUser;
use equity_rs::repositories::{MemoryStore, Repositories, UserRepository};
use equity_rs::utils::JwksVerifier;

pub const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/jwt_private.pem");
pub const JWKS: &str = include_str!("../fixtures/jwks.json");
pub const KID: &str = "test-key-1";

/// Provider returning a small, fixed data set for any ticker.
///
/// Counts every call and can be told to fail one operation, or all of them.
#[derive(Default)]
pub struct CannedProvider {
    calls: AtomicUsize,
    failing: Option<&'static str>,
    fail_all: bool,
}

impl CannedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Fails only `operation`: `fundamentals`, `financials`,
    /// `institutional_holders` or `price_history`.
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            failing: Some(operation),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, operation: &'static str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.failing == Some(operation) {
            return Err(AppError::upstream(
                "canned",
                operation,
                anyhow::anyhow!("429 Too Many Requests"),
            ));
        }
        Ok(())
    }
}

fn income(dates: [Date; 2]) -> Vec<FinancialRecord> {
    vec![
        FinancialRecord::new(dates[0])
            .with(StatementField::Revenue, 200_000_000.0)
            .with(StatementField::GrossProfit, 140_000_000.0)
            .with(StatementField::NetIncome, 70_000_000.0),
        FinancialRecord::new(dates[1])
            .with(StatementField::Revenue, 160_000_000.0)
            .with(StatementField::NetIncome, 50_000_000.0),
    ]
}

fn cash_flow(dates: [Date; 2]) -> Vec<FinancialRecord> {
    vec![FinancialRecord::new(dates[0]).with(StatementField::FreeCashFlow, 60_000_000.0)]
}

fn balance_sheet(dates: [Date; 2]) -> Vec<FinancialRecord> {
    vec![
        FinancialRecord::new(dates[0])
            .with(StatementField::CashAndEquivalents, 80_000_000.0)
            .with(StatementField::TotalDebt, 40_000_000.0),
    ]
}

fn both_periods(build: fn([Date; 2]) -> Vec<FinancialRecord>) -> PeriodRecords {
    PeriodRecords {
        quarterly: build([date(2024, 3, 31), date(2023, 12, 31)]),
        yearly: build([date(2023, 6, 30), date(2022, 6, 30)]),
    }
}

#[async_trait]
impl MarketDataProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn fundamentals(&self, ticker: &str) -> AppResult<Fundamentals> {
        self.enter("fundamentals")?;
        Ok(Fundamentals {
            profile: CompanyProfile {
                symbol: ticker.to_string(),
                company_name: "Microsoft Corporation".into(),
                industry: Some("Software".into()),
                city: Some("Redmond".into()),
                state: Some("WA".into()),
                country: Some("US".into()),
                market_cap: Some(3.1e12),
                year_high: Some(468.35),
                year_low: Some(309.45),
                ..CompanyProfile::default()
            },
            metrics: KeyMetrics {
                pe_ratio: Some(36.0),
                ..KeyMetrics::default()
            },
            shares_outstanding: 1000.0,
            price_target: Some(480.0),
        })
    }

    async fn financials(&self, _ticker: &str) -> AppResult<Financials> {
        self.enter("financials")?;
        Ok(Financials {
            income: both_periods(income),
            cash_flow: both_periods(cash_flow),
            balance_sheet: both_periods(balance_sheet),
        })
    }

    async fn institutional_holders(&self, _ticker: &str) -> AppResult<Vec<InstitutionalHolder>> {
        self.enter("institutional_holders")?;
        Ok(vec![
            InstitutionalHolder {
                name: "BlackRock Inc".into(),
                shares: 150.0,
            },
            InstitutionalHolder {
                name: "Vanguard Group Inc".into(),
                shares: 600.0,
            },
        ])
    }

    async fn price_history(
        &self,
        _ticker: &str,
        timeframe: Timeframe,
        today: Date,
    ) -> AppResult<Vec<PricePoint>> {
        self.enter("price_history")?;
        // Newest first, to check the service orders them.
        Ok(vec![
            PricePoint {
                date: today.to_string(),
                close: 420.0,
            },
            PricePoint {
                date: timeframe.start_date(today).to_string(),
                close: 400.0,
            },
        ])
    }
}

pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.database.url = "postgres://localhost/equity_test".into();
    settings.auth.jwks_uri = "http://127.0.0.1:1/jwks".into();
    settings.provider.fmp_api_key = "test".into();
    settings
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_provider(CannedProvider::new())
    }

    pub fn failing_provider() -> Self {
        Self::with_provider(CannedProvider::failing())
    }

    fn with_provider(provider: CannedProvider) -> Self {
        let settings = settings();
        let keys: JwkSet = serde_json::from_str(JWKS).expect("fixture JWKS");
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &settings.auth, &keys);

        let store = Arc::new(MemoryStore::default());
        let state = AppState::from_parts(
            Repositories::from_store(store.clone()),
            Arc::new(provider),
            Arc::new(verifier),
            Arc::new(settings),
            None,
        );
        Self {
            router: create_router(state),
            store,
        }
    }

    pub async fn seed_user(&self, id: &str, clerk_id: &str) {
        self.store
            .create(NewUser {
                id: id.into(),
                clerk_id: clerk_id.into(),
                email: format!("{}@example.com", id),
            })
            .await
            .expect("seed user");
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// RS256 token for `sub`, signed with the fixture key.
pub fn token_for(sub: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());
    let claims = json!({"sub": sub, "exp": get_current_timestamp() + 600});
    encode(&header, &claims, &EncodingKey::from_rsa_pem(PRIVATE_KEY).unwrap()).unwrap()
}

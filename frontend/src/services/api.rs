use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AuthStatus, BudgetComparison, BudgetMap, CategoryTotal, DashboardSummary, DateRange,
    ErrorBody, Expense, GoalContributionRequest, GoalContributionResponse, LearningPeriodAnalysis,
    LearningPeriodStatus, MonthlyReport, MonthlyTrendPoint, NewExpense, NewSavingsEntry,
    NewSavingsGoal, SavingsEntry, SavingsGoal,
};

/// How a failure is surfaced to the user; every kind is handled the same way
/// (log, notify, abort) but logs keep them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Application,
    Validation,
}

/// Tagged failure of a single API call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Network(_) => FailureKind::Network,
            ApiError::Http { .. } | ApiError::Decode(_) | ApiError::Encode(_) => {
                FailureKind::Application
            }
        }
    }

    /// Message from the server, when it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A request as seen by the transport: path (with query) relative to the API base
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw status and body.
///
/// Only transport failures (fetch rejected) are errors here; HTTP status
/// handling belongs to [`ApiClient`].
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String>;
}

/// Transport backed by the browser fetch API
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        use gloo::net::http::Request;

        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };

        let response = match request.body {
            Some(body) => builder
                .json(&body)
                .map_err(|e| format!("Failed to serialize request: {}", e))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

/// API client for the finance tracker backend
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Client talking to the backend at `base_url` through fetch
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(Rc::new(GlooTransport::new(base_url)))
    }

    // ============= Auth =============

    pub async fn current_user(&self) -> ApiResult<AuthStatus> {
        self.get("/api/auth/me").await
    }

    // ============= Expenses =============

    pub async fn list_expenses(&self, range: &DateRange) -> ApiResult<Vec<Expense>> {
        self.get(&format!("/api/expenses{}", range.to_query())).await
    }

    pub async fn create_expense(&self, expense: &NewExpense) -> ApiResult<()> {
        self.send_unit(Method::Post, "/api/expenses", Some(encode(expense)?))
            .await
    }

    pub async fn delete_expense(&self, id: i64) -> ApiResult<()> {
        self.send_unit(Method::Delete, &format!("/api/expenses/{}", id), None)
            .await
    }

    // ============= Budgets =============

    pub async fn get_budgets(&self) -> ApiResult<BudgetMap> {
        self.get("/api/budgets").await
    }

    /// Replaces the whole budget map on the server
    pub async fn save_budgets(&self, budgets: &BudgetMap) -> ApiResult<()> {
        self.send_unit(Method::Post, "/api/budgets", Some(encode(budgets)?))
            .await
    }

    // ============= Savings =============

    pub async fn list_savings(&self) -> ApiResult<Vec<SavingsEntry>> {
        self.get("/api/savings").await
    }

    pub async fn create_savings(&self, entry: &NewSavingsEntry) -> ApiResult<()> {
        self.send_unit(Method::Post, "/api/savings", Some(encode(entry)?))
            .await
    }

    pub async fn delete_savings(&self, id: i64) -> ApiResult<()> {
        self.send_unit(Method::Delete, &format!("/api/savings/{}", id), None)
            .await
    }

    // ============= Savings goals =============

    pub async fn list_goals(&self, archived: bool) -> ApiResult<Vec<SavingsGoal>> {
        self.get(&format!("/api/savings-goals?archived={}", archived))
            .await
    }

    pub async fn create_goal(&self, goal: &NewSavingsGoal) -> ApiResult<()> {
        self.send_unit(Method::Post, "/api/savings-goals", Some(encode(goal)?))
            .await
    }

    /// Adds to a goal; a `success: false` body is turned into an error
    pub async fn add_to_goal(&self, id: i64, amount: f64) -> ApiResult<GoalContributionResponse> {
        let body = encode(&GoalContributionRequest { amount })?;
        let response: GoalContributionResponse = self
            .send_json(Method::Post, &format!("/api/savings-goals/{}/add", id), Some(body))
            .await?;

        if response.success {
            Ok(response)
        } else {
            Err(ApiError::Http {
                status: 200,
                message: response.error.unwrap_or_default(),
            })
        }
    }

    pub async fn archive_goal(&self, id: i64) -> ApiResult<()> {
        self.send_unit(Method::Post, &format!("/api/savings-goals/{}/archive", id), None)
            .await
    }

    pub async fn delete_goal(&self, id: i64) -> ApiResult<()> {
        self.send_unit(Method::Delete, &format!("/api/savings-goals/{}", id), None)
            .await
    }

    // ============= Dashboard & visualizations =============

    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        self.get("/api/dashboard").await
    }

    pub async fn monthly_trends(&self) -> ApiResult<Vec<MonthlyTrendPoint>> {
        self.get("/api/visualizations/monthly-trends").await
    }

    pub async fn category_breakdown(&self, range: &DateRange) -> ApiResult<Vec<CategoryTotal>> {
        self.get(&format!(
            "/api/visualizations/category-breakdown{}",
            range.to_query()
        ))
        .await
    }

    pub async fn budget_vs_actual(&self) -> ApiResult<Vec<BudgetComparison>> {
        self.get("/api/visualizations/budget-vs-actual").await
    }

    // ============= Reports =============

    pub async fn available_months(&self) -> ApiResult<Vec<String>> {
        self.get("/api/reports/available-months").await
    }

    pub async fn monthly_report(&self, year_month: &str) -> ApiResult<MonthlyReport> {
        self.get(&format!("/api/reports/monthly/{}", year_month)).await
    }

    // ============= Learning period =============

    pub async fn learning_period_status(&self) -> ApiResult<LearningPeriodStatus> {
        self.get("/api/learning-period/status").await
    }

    pub async fn learning_period_analysis(&self) -> ApiResult<LearningPeriodAnalysis> {
        self.get("/api/learning-period/analysis").await
    }

    // ============= Plumbing =============

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(Method::Get, path, None).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let response = self.send_checked(method, path, body).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<()> {
        self.send_checked(method, path, body).await.map(|_| ())
    }

    async fn send_checked(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<RawResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ApiError::Network)?;

        if response.ok() {
            Ok(response)
        } else {
            Err(ApiError::Http {
                status: response.status,
                message: error_message(&response.body),
            })
        }
    }
}

fn encode<T: Serialize>(value: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Prefer the backend's `{"error": "..."}` text over the raw body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    }
}

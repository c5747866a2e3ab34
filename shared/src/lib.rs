use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed spending categories offered by the entry and budget forms.
///
/// Serialized with the human-readable name the backend stores ("Dining Out").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Transportation,
    Gas,
    Entertainment,
    Utilities,
    Shopping,
    Healthcare,
    Housing,
    Insurance,
    Subscriptions,
    Other,
}

impl Category {
    /// Every category, in the order the forms list them
    pub const ALL: [Category; 12] = [
        Category::Groceries,
        Category::DiningOut,
        Category::Transportation,
        Category::Gas,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Healthcare,
        Category::Housing,
        Category::Insurance,
        Category::Subscriptions,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::DiningOut => "Dining Out",
            Category::Transportation => "Transportation",
            Category::Gas => "Gas",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Housing => "Housing",
            Category::Insurance => "Insurance",
            Category::Subscriptions => "Subscriptions",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Expense as returned by `GET /api/expenses`.
///
/// The category stays a plain string: older backends know categories that
/// are not in [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
}

/// Body of `POST /api/expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

/// Optional inclusive date bounds used by the expense list and the
/// category breakdown chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// No bounds at all, i.e. "fetch everything"
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Query string including the leading `?`, or an empty string when unbounded.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(start) = self.start {
            params.push(format!("start_date={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = self.end {
            params.push(format!("end_date={}", end.format("%Y-%m-%d")));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Monthly limit per category name, as stored by `/api/budgets`.
///
/// A category that is absent has no budget; it is never sent as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetMap(BTreeMap<String, f64>);

impl BudgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit for a category, 0 when no budget is set
    pub fn limit(&self, category: Category) -> f64 {
        self.0.get(category.as_str()).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, category: Category, limit: f64) {
        self.0.insert(category.as_str().to_string(), limit);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(category.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, limit)| (name.as_str(), *limit))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(Category, f64)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        let mut map = BudgetMap::new();
        for (category, limit) in iter {
            map.insert(category, limit);
        }
        map
    }
}

/// Savings ledger entry from `GET /api/savings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: Option<String>,
}

/// Body of `POST /api/savings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavingsEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}

/// A named savings target with incremental contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub progress_percentage: f64,
    /// Completion or archival timestamp (ISO 8601), if any
    pub completed_at: Option<String>,
    #[serde(default, alias = "archived")]
    pub is_archived: bool,
}

/// Body of `POST /api/savings-goals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
}

/// Body of `POST /api/savings-goals/{id}/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalContributionRequest {
    pub amount: f64,
}

/// Response of `POST /api/savings-goals/{id}/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalContributionResponse {
    pub success: bool,
    /// Set when this contribution reached the target
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Budget health of one category, as computed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Exceeded,
    NoBudget,
    Under,
    Over,
    #[serde(other)]
    Unknown,
}

impl BudgetStatus {
    /// CSS modifier class used by the progress and report rows
    pub fn css_class(&self) -> &'static str {
        match self {
            BudgetStatus::Safe => "safe",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
            BudgetStatus::NoBudget => "no_budget",
            BudgetStatus::Under => "under",
            BudgetStatus::Over => "over",
            BudgetStatus::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCategory {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Current month spending against budget, from `GET /api/dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub categories: Vec<DashboardCategory>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
    #[serde(default)]
    pub is_learning_period: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCategory {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    /// Budget minus spent; negative when over budget
    pub difference: f64,
    pub percentage: f64,
    pub transaction_count: u32,
    pub status: BudgetStatus,
}

/// Read-only monthly summary from `GET /api/reports/monthly/{yyyy-mm}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_saved: f64,
    pub total_difference: f64,
    pub categories: Vec<ReportCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// `yyyy-mm`
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
}

/// Onboarding gate from `GET /api/learning-period/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPeriodStatus {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub is_complete: bool,
    #[serde(default)]
    pub suggested_budgets: Option<BudgetMap>,
}

/// Spending analysis from `GET /api/learning-period/analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPeriodAnalysis {
    pub total_spending: f64,
    #[serde(default)]
    pub category_totals: BTreeMap<String, f64>,
    pub suggested_budgets: BudgetMap,
    #[serde(default)]
    pub insights: Vec<String>,
}

/// Response of `GET /api/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Error payload the backend attaches to failed requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: Option<bool>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_category_uses_display_names_on_the_wire() {
        assert_eq!(serde_json::to_value(Category::DiningOut).unwrap(), json!("Dining Out"));
        assert_eq!(serde_json::to_value(Category::Groceries).unwrap(), json!("Groceries"));

        let parsed: Category = serde_json::from_value(json!("Dining Out")).unwrap();
        assert_eq!(parsed, Category::DiningOut);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Subscriptions".parse::<Category>(), Ok(Category::Subscriptions));
        assert_eq!(" Gas ".parse::<Category>(), Ok(Category::Gas));
        assert_eq!(
            "Pets".parse::<Category>(),
            Err(UnknownCategory("Pets".to_string()))
        );

        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_new_expense_body() {
        let expense = NewExpense {
            date: date("2024-03-01"),
            category: Category::Groceries,
            amount: 42.5,
            description: "milk".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&expense).unwrap(),
            json!({
                "date": "2024-03-01",
                "category": "Groceries",
                "amount": 42.5,
                "description": "milk"
            })
        );
    }

    #[test]
    fn test_expense_keeps_unknown_categories() {
        let expense: Expense = serde_json::from_value(json!({
            "id": 7,
            "date": "2024-02-11",
            "category": "Pets",
            "amount": 12.0,
            "description": null
        }))
        .unwrap();

        assert_eq!(expense.category, "Pets");
        assert_eq!(expense.description, None);
    }

    #[test]
    fn test_date_range_query() {
        assert_eq!(DateRange::default().to_query(), "");
        assert!(DateRange::default().is_unbounded());

        let start_only = DateRange::new(Some(date("2024-03-01")), None);
        assert_eq!(start_only.to_query(), "?start_date=2024-03-01");

        let end_only = DateRange::new(None, Some(date("2024-03-31")));
        assert_eq!(end_only.to_query(), "?end_date=2024-03-31");

        let both = DateRange::new(Some(date("2024-03-01")), Some(date("2024-03-31")));
        assert_eq!(both.to_query(), "?start_date=2024-03-01&end_date=2024-03-31");
        assert_eq!(both.to_query(), both.to_query());
    }

    #[test]
    fn test_budget_map_defaults_to_zero() {
        let map: BudgetMap = serde_json::from_value(json!({
            "Groceries": 400.0,
            "Dining Out": 120.0
        }))
        .unwrap();

        assert_eq!(map.limit(Category::Groceries), 400.0);
        assert_eq!(map.limit(Category::DiningOut), 120.0);
        assert_eq!(map.limit(Category::Housing), 0.0);
        assert!(!map.contains(Category::Housing));
        assert_eq!(map.total(), 520.0);
    }

    #[test]
    fn test_budget_map_serializes_as_plain_object() {
        let map: BudgetMap = [(Category::Gas, 60.0), (Category::Other, 25.5)]
            .into_iter()
            .collect();

        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({ "Gas": 60.0, "Other": 25.5 })
        );
    }

    #[test]
    fn test_budget_status_tolerates_unknown_values() {
        let status: BudgetStatus = serde_json::from_value(json!("no_budget")).unwrap();
        assert_eq!(status, BudgetStatus::NoBudget);
        assert_eq!(status.css_class(), "no_budget");

        let unknown: BudgetStatus = serde_json::from_value(json!("on_fire")).unwrap();
        assert_eq!(unknown, BudgetStatus::Unknown);
    }

    #[test]
    fn test_savings_goal_accepts_archived_alias() {
        let goal: SavingsGoal = serde_json::from_value(json!({
            "id": 3,
            "name": "Bike",
            "target_amount": 500.0,
            "current_amount": 500.0,
            "progress_percentage": 100.0,
            "completed_at": "2024-04-02T10:00:00",
            "archived": true
        }))
        .unwrap();

        assert!(goal.is_archived);
        assert_eq!(goal.completed_at.as_deref(), Some("2024-04-02T10:00:00"));

        let active: SavingsGoal = serde_json::from_value(json!({
            "id": 4,
            "name": "Trip",
            "target_amount": 900.0,
            "current_amount": 10.0,
            "progress_percentage": 1.1,
            "completed_at": null
        }))
        .unwrap();
        assert!(!active.is_archived);
    }

    #[test]
    fn test_goal_contribution_response_defaults() {
        let response: GoalContributionResponse =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(response.success);
        assert!(!response.completed);
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_learning_period_status_without_suggestions() {
        let status: LearningPeriodStatus = serde_json::from_value(json!({
            "start_date": "2024-03-01",
            "days_elapsed": 12,
            "days_remaining": 18,
            "is_complete": false
        }))
        .unwrap();

        assert_eq!(status.start_date, Some(date("2024-03-01")));
        assert_eq!(status.days_remaining, 18);
        assert_eq!(status.suggested_budgets, None);
    }
}

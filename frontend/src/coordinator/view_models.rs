//! Display-ready data handed to the renderer.
//!
//! All formatting happens here so the components only lay things out.

use shared::{
    BudgetComparison, BudgetMap, Category, CategoryTotal, DashboardSummary, Expense,
    LearningPeriodAnalysis, LearningPeriodStatus, MonthlyReport, MonthlyTrendPoint, SavingsEntry,
    SavingsGoal,
};

use crate::services::date_utils::{
    format_currency, format_month_label, format_short_date, format_timestamp_date,
};

// ============= Expenses =============

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseListView {
    pub rows: Vec<ExpenseRow>,
}

impl ExpenseListView {
    pub const EMPTY_MESSAGE: &'static str = "No expenses found";

    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let rows = expenses
            .iter()
            .map(|expense| ExpenseRow {
                id: expense.id,
                date: format_short_date(expense.date),
                category: expense.category.clone(),
                description: expense
                    .description
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or("-")
                    .to_string(),
                amount: format_currency(expense.amount),
            })
            .collect();
        Self { rows }
    }
}

// ============= Dashboard =============

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProgressView {
    pub category: String,
    pub status_class: &'static str,
    /// "$spent / $budget"
    pub amount_summary: String,
    /// Progress bar width, capped at 100
    pub fill_percent: f64,
    pub used_label: String,
    pub remaining_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_budget: String,
    pub total_spent: String,
    pub total_remaining: String,
    pub categories: Vec<CategoryProgressView>,
    pub in_learning_period: bool,
}

impl DashboardView {
    pub fn from_summary(summary: &DashboardSummary) -> Self {
        let categories = summary
            .categories
            .iter()
            .map(|cat| CategoryProgressView {
                category: cat.category.clone(),
                status_class: cat.status.css_class(),
                amount_summary: format!(
                    "{} / {}",
                    format_currency(cat.spent),
                    format_currency(cat.budget)
                ),
                fill_percent: cat.percentage.clamp(0.0, 100.0),
                used_label: format!("{:.1}% used", cat.percentage),
                remaining_label: format!("{} remaining", format_currency(cat.remaining)),
            })
            .collect();

        Self {
            total_budget: format_currency(summary.total_budget),
            total_spent: format_currency(summary.total_spent),
            total_remaining: format_currency(summary.total_remaining),
            categories,
            in_learning_period: summary.is_learning_period,
        }
    }

    /// Shown instead of the progress rows when no category has a budget
    pub fn shows_no_budget_message(&self) -> bool {
        self.categories.is_empty()
    }
}

// ============= Budget setup =============

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInputView {
    pub category: Category,
    /// Initial input value; "0" when the category has no budget
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetFormView {
    pub inputs: Vec<BudgetInputView>,
}

impl BudgetFormView {
    /// One input per fixed category, in form order
    pub fn from_budgets(budgets: &BudgetMap) -> Self {
        let inputs = Category::ALL
            .iter()
            .map(|&category| BudgetInputView {
                category,
                value: budgets.limit(category).to_string(),
            })
            .collect();
        Self { inputs }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LearningPeriodView {
    InProgress {
        days_elapsed: u32,
        days_remaining: u32,
    },
    Complete {
        total_spending: String,
        insights: Vec<String>,
        has_suggestions: bool,
    },
}

impl LearningPeriodView {
    pub fn in_progress(status: &LearningPeriodStatus) -> Self {
        LearningPeriodView::InProgress {
            days_elapsed: status.days_elapsed,
            days_remaining: status.days_remaining,
        }
    }

    pub fn complete(analysis: Option<&LearningPeriodAnalysis>, has_suggestions: bool) -> Self {
        match analysis {
            Some(analysis) => LearningPeriodView::Complete {
                total_spending: format_currency(analysis.total_spending),
                insights: analysis.insights.clone(),
                has_suggestions,
            },
            None => LearningPeriodView::Complete {
                total_spending: format_currency(0.0),
                insights: Vec::new(),
                has_suggestions,
            },
        }
    }

    pub fn headline(&self) -> String {
        match self {
            LearningPeriodView::InProgress {
                days_elapsed,
                days_remaining,
            } => format!(
                "Learning your spending: day {} of {} ({} days left)",
                days_elapsed,
                days_elapsed + days_remaining,
                days_remaining
            ),
            LearningPeriodView::Complete { total_spending, .. } => {
                format!("Learning period complete: {} tracked", total_spending)
            }
        }
    }
}

// ============= Savings =============

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRow {
    pub id: i64,
    pub date: String,
    pub description: Option<String>,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsListView {
    pub rows: Vec<SavingsRow>,
}

impl SavingsListView {
    pub const EMPTY_MESSAGE: &'static str = "No savings recorded yet";

    pub fn from_entries(entries: &[SavingsEntry]) -> Self {
        let rows = entries
            .iter()
            .map(|entry| SavingsRow {
                id: entry.id,
                date: format_short_date(entry.date),
                description: entry
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty()),
                amount: format_currency(entry.amount),
            })
            .collect();
        Self { rows }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalAction {
    AddMoney,
    Archive,
    Delete,
}

impl GoalAction {
    pub fn label(&self) -> &'static str {
        match self {
            GoalAction::AddMoney => "Add Money",
            GoalAction::Archive => "Archive",
            GoalAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoalActions {
    Active,
    Archived { archived_on: String },
}

impl GoalActions {
    pub fn available(&self) -> &'static [GoalAction] {
        match self {
            GoalActions::Active => &[GoalAction::AddMoney, GoalAction::Archive, GoalAction::Delete],
            GoalActions::Archived { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalItemView {
    pub id: i64,
    pub name: String,
    /// "$current of $target"
    pub amount_summary: String,
    pub progress_percent: f64,
    pub progress_label: String,
    pub completed: bool,
    pub actions: GoalActions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalListView {
    pub archived: bool,
    pub items: Vec<GoalItemView>,
}

impl GoalListView {
    pub fn from_goals(goals: &[SavingsGoal], archived: bool) -> Self {
        let items = goals
            .iter()
            .map(|goal| {
                let actions = if archived {
                    GoalActions::Archived {
                        archived_on: goal
                            .completed_at
                            .as_deref()
                            .map(format_timestamp_date)
                            .unwrap_or_else(|| "-".to_string()),
                    }
                } else {
                    GoalActions::Active
                };

                GoalItemView {
                    id: goal.id,
                    name: goal.name.clone(),
                    amount_summary: format!(
                        "{} of {}",
                        format_currency(goal.current_amount),
                        format_currency(goal.target_amount)
                    ),
                    progress_percent: goal.progress_percentage.clamp(0.0, 100.0),
                    progress_label: format!("{:.0}% complete", goal.progress_percentage),
                    completed: goal.progress_percentage >= 100.0,
                    actions,
                }
            })
            .collect();

        Self { archived, items }
    }

    pub fn empty_message(&self) -> &'static str {
        if self.archived {
            "No archived goals"
        } else {
            "No active goals. Create one to get started!"
        }
    }

    /// Label of the button that switches to the other list
    pub fn toggle_label(&self) -> &'static str {
        if self.archived {
            "View Active Goals"
        } else {
            "View Archived Goals"
        }
    }
}

// ============= Reports =============

#[derive(Debug, Clone, PartialEq)]
pub struct ReportMonthOption {
    /// `yyyy-mm`
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportMonthsView {
    /// Newest first
    pub options: Vec<ReportMonthOption>,
    pub selected: Option<String>,
}

impl ReportMonthsView {
    pub fn from_months(months: &[String], selected: Option<String>) -> Self {
        let options = months
            .iter()
            .rev()
            .map(|month| ReportMonthOption {
                value: month.clone(),
                label: format_month_label(month).unwrap_or_else(|| month.clone()),
            })
            .collect();
        Self { options, selected }
    }

    pub fn contains(&self, month: &str) -> bool {
        self.options.iter().any(|option| option.value == month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCategoryView {
    pub category: String,
    pub status_class: &'static str,
    pub transactions_label: String,
    pub budget: String,
    pub spent: String,
    /// "Under" or "Over"
    pub variance_label: &'static str,
    pub variance_amount: String,
    pub within_budget: bool,
    pub percent_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub month: String,
    pub month_label: String,
    pub total_budget: String,
    pub total_spent: String,
    pub total_saved: String,
    /// Absolute value; `within_budget` carries the sign
    pub difference: String,
    pub within_budget: bool,
    pub categories: Vec<ReportCategoryView>,
}

impl ReportView {
    pub const EMPTY_MESSAGE: &'static str = "No expense data for this month";

    pub fn from_report(month: &str, report: &MonthlyReport) -> Self {
        let categories = report
            .categories
            .iter()
            .map(|cat| {
                let within_budget = cat.difference >= 0.0;
                ReportCategoryView {
                    category: cat.category.clone(),
                    status_class: cat.status.css_class(),
                    transactions_label: transactions_label(cat.transaction_count),
                    budget: format_currency(cat.budget),
                    spent: format_currency(cat.spent),
                    variance_label: if within_budget { "Under" } else { "Over" },
                    variance_amount: format_currency(cat.difference.abs()),
                    within_budget,
                    percent_label: format!("{:.1}%", cat.percentage),
                }
            })
            .collect();

        Self {
            month: month.to_string(),
            month_label: format_month_label(month).unwrap_or_else(|| month.to_string()),
            total_budget: format_currency(report.total_budget),
            total_spent: format_currency(report.total_spent),
            total_saved: format_currency(report.total_saved),
            difference: format_currency(report.total_difference.abs()),
            within_budget: report.total_difference >= 0.0,
            categories,
        }
    }
}

fn transactions_label(count: u32) -> String {
    if count == 1 {
        "1 transaction".to_string()
    } else {
        format!("{} transactions", count)
    }
}

// ============= Charts =============

/// What to draw; the painter decides how
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line {
        labels: Vec<String>,
        values: Vec<f64>,
        series: String,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    GroupedBars {
        labels: Vec<String>,
        budget: Vec<f64>,
        actual: Vec<f64>,
    },
}

impl ChartSpec {
    pub fn monthly_trends(points: &[MonthlyTrendPoint]) -> Self {
        ChartSpec::Line {
            labels: points
                .iter()
                .map(|p| {
                    format_month_label(&p.month)
                        .map(|label| short_month_label(&label))
                        .unwrap_or_else(|| p.month.clone())
                })
                .collect(),
            values: points.iter().map(|p| p.total).collect(),
            series: "Total Spending".to_string(),
        }
    }

    pub fn category_breakdown(totals: &[CategoryTotal]) -> Self {
        ChartSpec::Pie {
            labels: totals.iter().map(|t| t.category.clone()).collect(),
            values: totals.iter().map(|t| t.total).collect(),
        }
    }

    pub fn budget_vs_actual(rows: &[BudgetComparison]) -> Self {
        ChartSpec::GroupedBars {
            labels: rows.iter().map(|r| r.category.clone()).collect(),
            budget: rows.iter().map(|r| r.budget).collect(),
            actual: rows.iter().map(|r| r.actual).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Line { values, .. } | ChartSpec::Pie { values, .. } => values.is_empty(),
            ChartSpec::GroupedBars { labels, .. } => labels.is_empty(),
        }
    }
}

/// "March 2024" -> "Mar 2024"
fn short_month_label(label: &str) -> String {
    match label.split_once(' ') {
        Some((month, year)) => format!("{} {}", month.chars().take(3).collect::<String>(), year),
        None => label.to_string(),
    }
}

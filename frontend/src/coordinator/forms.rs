//! Raw form values as read from the DOM, and their conversion to request bodies.

use std::collections::BTreeMap;

use shared::{BudgetMap, Category, DateRange, NewExpense, NewSavingsEntry};

use crate::services::date_utils::parse_input_date;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a valid date")]
    InvalidDate(String),
    #[error("Please choose a category")]
    UnknownCategory(String),
    #[error("Please enter a valid amount")]
    InvalidAmount(String),
    #[error("Please enter a valid target amount")]
    InvalidTarget(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl ExpenseForm {
    /// The inputs are constrained by the browser already; this only parses them
    pub fn parse(&self) -> Result<NewExpense, FormError> {
        Ok(NewExpense {
            date: required_date(&self.date)?,
            category: self
                .category
                .parse::<Category>()
                .map_err(|e| FormError::UnknownCategory(e.0))?,
            amount: parse_amount(&self.amount)?,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsForm {
    pub date: String,
    pub amount: String,
    pub description: String,
}

impl SavingsForm {
    pub fn parse(&self) -> Result<NewSavingsEntry, FormError> {
        Ok(NewSavingsEntry {
            date: required_date(&self.date)?,
            amount: parse_amount(&self.amount)?,
            description: self.description.trim().to_string(),
        })
    }
}

/// Both bounds optional; an empty input leaves that side open
pub fn parse_date_range(start: &str, end: &str) -> Result<DateRange, FormError> {
    let start = parse_input_date(start).map_err(|_| FormError::InvalidDate(start.to_string()))?;
    let end = parse_input_date(end).map_err(|_| FormError::InvalidDate(end.to_string()))?;
    Ok(DateRange::new(start, end))
}

/// Build the map sent to `POST /api/budgets`.
///
/// Every fixed category is read; missing or unparsable input counts as 0,
/// and only strictly positive limits are kept.
pub fn parse_budget_inputs(inputs: &BTreeMap<Category, String>) -> BudgetMap {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let limit = inputs
                .get(&category)
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(0.0);
            (limit > 0.0).then_some((category, limit))
        })
        .collect()
}

/// A finite number greater than zero
pub fn parse_positive_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn required_date(raw: &str) -> Result<chrono::NaiveDate, FormError> {
    match parse_input_date(raw) {
        Ok(Some(date)) => Ok(date),
        _ => Err(FormError::InvalidDate(raw.to_string())),
    }
}

fn parse_amount(raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expense_form_parses_native_inputs() {
        let form = ExpenseForm {
            date: "2024-03-01".to_string(),
            category: "Groceries".to_string(),
            amount: "42.5".to_string(),
            description: " milk ".to_string(),
        };

        assert_eq!(
            form.parse().unwrap(),
            NewExpense {
                date: date("2024-03-01"),
                category: Category::Groceries,
                amount: 42.5,
                description: "milk".to_string(),
            }
        );
    }

    #[test]
    fn test_expense_form_rejects_missing_fields() {
        let form = ExpenseForm {
            date: String::new(),
            category: "Groceries".to_string(),
            amount: "1".to_string(),
            description: String::new(),
        };
        assert_eq!(form.parse(), Err(FormError::InvalidDate(String::new())));

        let form = ExpenseForm {
            date: "2024-03-01".to_string(),
            category: String::new(),
            amount: "1".to_string(),
            description: String::new(),
        };
        assert!(matches!(form.parse(), Err(FormError::UnknownCategory(_))));

        let form = ExpenseForm {
            date: "2024-03-01".to_string(),
            category: "Gas".to_string(),
            amount: "abc".to_string(),
            description: String::new(),
        };
        assert_eq!(form.parse(), Err(FormError::InvalidAmount("abc".to_string())));
    }

    #[test]
    fn test_savings_form() {
        let form = SavingsForm {
            date: "2024-03-05".to_string(),
            amount: "100".to_string(),
            description: String::new(),
        };
        let entry = form.parse().unwrap();
        assert_eq!(entry.date, date("2024-03-05"));
        assert_eq!(entry.amount, 100.0);
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_budget_inputs_keep_only_positive_values() {
        let inputs: BTreeMap<Category, String> = [
            (Category::Groceries, "400".to_string()),
            (Category::DiningOut, "0".to_string()),
            (Category::Gas, "".to_string()),
            (Category::Housing, "not a number".to_string()),
            (Category::Other, "-15".to_string()),
            (Category::Utilities, " 89.99 ".to_string()),
        ]
        .into_iter()
        .collect();

        let budgets = parse_budget_inputs(&inputs);

        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets.limit(Category::Groceries), 400.0);
        assert_eq!(budgets.limit(Category::Utilities), 89.99);
        assert!(!budgets.contains(Category::DiningOut));
        assert!(!budgets.contains(Category::Other));
    }

    #[test]
    fn test_budget_inputs_all_empty() {
        assert!(parse_budget_inputs(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_parse_positive_amount() {
        assert_eq!(parse_positive_amount("25"), Some(25.0));
        assert_eq!(parse_positive_amount(" 0.01 "), Some(0.01));
        assert_eq!(parse_positive_amount("0"), None);
        assert_eq!(parse_positive_amount("-5"), None);
        assert_eq!(parse_positive_amount("abc"), None);
        assert_eq!(parse_positive_amount(""), None);
        assert_eq!(parse_positive_amount("inf"), None);
        assert_eq!(parse_positive_amount("NaN"), None);
    }

    #[test]
    fn test_parse_date_range() {
        assert!(parse_date_range("", "").unwrap().is_unbounded());

        let range = parse_date_range("2024-03-01", "").unwrap();
        assert_eq!(range.start, Some(date("2024-03-01")));
        assert_eq!(range.end, None);

        assert!(parse_date_range("yesterday", "").is_err());
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use shared::{BudgetMap, DateRange};

use super::ports::{ChartError, ChartHandle};

/// Mutually exclusive panels of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Expenses,
    Dashboard,
    Budget,
    Savings,
    Reports,
    Visualizations,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Expenses,
        Tab::Dashboard,
        Tab::Budget,
        Tab::Savings,
        Tab::Reports,
        Tab::Visualizations,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Expenses => "Expenses",
            Tab::Dashboard => "Dashboard",
            Tab::Budget => "Budget Setup",
            Tab::Savings => "Savings",
            Tab::Reports => "Monthly Reports",
            Tab::Visualizations => "Visualizations",
        }
    }

    /// Element id of the tab's panel
    pub fn panel_id(&self) -> &'static str {
        match self {
            Tab::Expenses => "expenses",
            Tab::Dashboard => "dashboard",
            Tab::Budget => "budget",
            Tab::Savings => "savings",
            Tab::Reports => "reports",
            Tab::Visualizations => "visualizations",
        }
    }

    /// The refresh routine run when this tab becomes active
    pub fn loader(&self) -> Loader {
        match self {
            Tab::Expenses => Loader::ExpenseList,
            Tab::Dashboard => Loader::Dashboard,
            Tab::Budget => Loader::BudgetSetup,
            Tab::Savings => Loader::SavingsAndGoals,
            Tab::Reports => Loader::Reports,
            Tab::Visualizations => Loader::Visualizations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    ExpenseList,
    Dashboard,
    BudgetSetup,
    SavingsAndGoals,
    Reports,
    Visualizations,
}

/// Canvases owned by the visualizations tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartSlot {
    MonthlyTrends,
    CategoryBreakdown,
    BudgetVsActual,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] = [
        ChartSlot::MonthlyTrends,
        ChartSlot::CategoryBreakdown,
        ChartSlot::BudgetVsActual,
    ];

    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::MonthlyTrends => "monthly-trends-chart",
            ChartSlot::CategoryBreakdown => "category-breakdown-chart",
            ChartSlot::BudgetVsActual => "budget-vs-actual-chart",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::MonthlyTrends => "Monthly Spending Trends",
            ChartSlot::CategoryBreakdown => "Spending by Category",
            ChartSlot::BudgetVsActual => "Budget vs Actual (This Month)",
        }
    }
}

/// At most one live chart per slot
#[derive(Default)]
pub struct ChartRegistry {
    handles: BTreeMap<ChartSlot, Box<dyn ChartHandle>>,
}

impl ChartRegistry {
    /// Dispose the slot's current chart, then store whatever `draw` produces.
    ///
    /// The old chart is gone even when drawing fails.
    pub fn replace<F>(&mut self, slot: ChartSlot, draw: F) -> Result<(), ChartError>
    where
        F: FnOnce() -> Result<Box<dyn ChartHandle>, ChartError>,
    {
        if let Some(mut previous) = self.handles.remove(&slot) {
            previous.dispose();
        }

        let handle = draw()?;
        self.handles.insert(slot, handle);
        Ok(())
    }

    #[cfg(test)]
    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.handles.contains_key(&slot)
    }

    pub fn dispose_all(&mut self) {
        for (_, mut handle) in std::mem::take(&mut self.handles) {
            handle.dispose();
        }
    }
}

impl fmt::Debug for ChartRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handles.keys()).finish()
    }
}

/// Everything the page remembers between interactions.
///
/// The server stays authoritative: `cached_budgets` is only a convenience
/// copy and is re-read whenever the budget tab opens.
#[derive(Debug, Default)]
pub struct ViewState {
    pub active_tab: Tab,
    pub cached_budgets: BudgetMap,
    pub charts: ChartRegistry,
    pub show_archived_goals: bool,
    /// Goal toolbar is wired once, on the first savings tab visit
    pub goal_controls_ready: bool,
    pub expense_filter: DateRange,
    pub chart_range: DateRange,
    pub report_month: Option<String>,
    pub suggested_budgets: Option<BudgetMap>,
}

impl ViewState {
    pub fn new(initial_tab: Tab) -> Self {
        Self {
            active_tab: initial_tab,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct LoggedHandle {
        name: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ChartHandle for LoggedHandle {
        fn dispose(&mut self) {
            self.events.borrow_mut().push(format!("dispose {}", self.name));
        }
    }

    fn handle(name: &'static str, events: &Rc<RefCell<Vec<String>>>) -> Box<dyn ChartHandle> {
        events.borrow_mut().push(format!("draw {}", name));
        Box::new(LoggedHandle {
            name,
            events: events.clone(),
        })
    }

    #[test]
    fn test_every_tab_has_its_own_loader() {
        let loaders: Vec<Loader> = Tab::ALL.iter().map(|tab| tab.loader()).collect();
        assert_eq!(
            loaders,
            vec![
                Loader::ExpenseList,
                Loader::Dashboard,
                Loader::BudgetSetup,
                Loader::SavingsAndGoals,
                Loader::Reports,
                Loader::Visualizations,
            ]
        );
    }

    #[test]
    fn test_tab_deserializes_from_snake_case() {
        let tab: Tab = serde_json::from_str("\"visualizations\"").unwrap();
        assert_eq!(tab, Tab::Visualizations);
    }

    #[test]
    fn test_registry_disposes_before_drawing_replacement() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::default();

        registry
            .replace(ChartSlot::MonthlyTrends, || Ok(handle("first", &events)))
            .unwrap();
        registry
            .replace(ChartSlot::MonthlyTrends, || Ok(handle("second", &events)))
            .unwrap();

        assert_eq!(
            *events.borrow(),
            vec!["draw first", "dispose first", "draw second"]
        );
        assert!(registry.is_live(ChartSlot::MonthlyTrends));
    }

    #[test]
    fn test_registry_slots_are_independent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::default();

        registry
            .replace(ChartSlot::MonthlyTrends, || Ok(handle("trends", &events)))
            .unwrap();
        registry
            .replace(ChartSlot::BudgetVsActual, || Ok(handle("bars", &events)))
            .unwrap();

        assert_eq!(*events.borrow(), vec!["draw trends", "draw bars"]);
        assert!(!registry.is_live(ChartSlot::CategoryBreakdown));
    }

    #[test]
    fn test_failed_draw_leaves_slot_empty() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::default();

        registry
            .replace(ChartSlot::CategoryBreakdown, || Ok(handle("pie", &events)))
            .unwrap();
        let result = registry.replace(ChartSlot::CategoryBreakdown, || {
            Err(ChartError::CanvasMissing("category-breakdown-chart".to_string()))
        });

        assert!(result.is_err());
        assert!(!registry.is_live(ChartSlot::CategoryBreakdown));
        assert_eq!(*events.borrow(), vec!["draw pie", "dispose pie"]);
    }

    #[test]
    fn test_dispose_all() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::default();
        registry
            .replace(ChartSlot::MonthlyTrends, || Ok(handle("a", &events)))
            .unwrap();
        registry
            .replace(ChartSlot::BudgetVsActual, || Ok(handle("b", &events)))
            .unwrap();

        registry.dispose_all();

        for slot in ChartSlot::ALL {
            assert!(!registry.is_live(slot));
        }
        assert!(events.borrow().contains(&"dispose a".to_string()));
        assert!(events.borrow().contains(&"dispose b".to_string()));
    }

    #[test]
    fn test_view_state_starts_on_requested_tab() {
        let state = ViewState::new(Tab::Reports);
        assert_eq!(state.active_tab, Tab::Reports);
        assert!(!state.show_archived_goals);
        assert!(!state.goal_controls_ready);
        assert!(state.cached_budgets.is_empty());
        assert!(state.expense_filter.is_unbounded());
    }
}

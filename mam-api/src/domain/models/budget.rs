use super::{round2, Project, ProjectId};

/// Utilization above this percentage is flagged as near/over budget.
pub const NEAR_BUDGET_THRESHOLD_PCT: i64 = 80;

/// Spent hours of a project compared against its budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectBudget {
    pub project_id: ProjectId,
    pub spent_hours: f64,
    /// `None` when the project has no budget (unset or zero hours).
    pub utilization: Option<BudgetUtilization>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUtilization {
    pub budget_hours: i32,
    pub utilization_pct: i64,
    /// Negative once the budget is exceeded.
    pub remaining_hours: f64,
}

impl BudgetUtilization {
    /// Compute utilization of `budget_hours` given `spent_hours`.
    ///
    /// Returns `None` for a missing or zero budget instead of dividing by it.
    pub fn compute(spent_hours: f64, budget_hours: Option<i32>) -> Option<Self> {
        let budget_hours = budget_hours.filter(|b| *b > 0)?;
        let budget = f64::from(budget_hours);

        Some(Self {
            budget_hours,
            utilization_pct: (spent_hours / budget * 100.0).round() as i64,
            remaining_hours: round2(budget - spent_hours),
        })
    }

    pub fn is_near_budget(&self) -> bool {
        self.utilization_pct > NEAR_BUDGET_THRESHOLD_PCT
    }
}

impl ProjectBudget {
    pub fn for_project(project: &Project) -> Self {
        let spent_hours = f64::from(project.total_minutes) / 60.0;

        Self {
            project_id: project.id,
            spent_hours: round2(spent_hours),
            utilization: BudgetUtilization::compute(spent_hours, project.budget_hours),
        }
    }

    pub fn is_near_budget(&self) -> bool {
        self.utilization
            .as_ref()
            .is_some_and(BudgetUtilization::is_near_budget)
    }
}

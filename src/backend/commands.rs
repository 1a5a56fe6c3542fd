//! One request type per backend command.
//!
//! Field names serialize in camelCase because Tauri maps the Rust command
//! parameters (`budget_id`) to camelCase argument keys (`budgetId`).

use serde::Serialize;

use super::Command;
use crate::model::{
    BudgetChangeHistoryEntry, BudgetDraft, BudgetTemplate, BudgetTemplateWithCategories, CategoryStats,
    GlobalCategory, GlobalCategoryDraft, LedgerEntry, MonthlyBudget, NewCategory, NewEntry, TemplateDraft,
    UpdateEntry,
};
use crate::sorting::{BudgetSort, LedgerSort};

macro_rules! command {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? } => $wire:literal -> $out:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(pub $field: $ty),*
        }

        impl Command for $name {
            const NAME: &'static str = $wire;
            type Output = $out;
        }
    };
}

command! {
    /// Creates the base tables when missing.
    InitDatabase {} => "init_database" -> ()
}

command! {
    ListMonthlyBudgets {} => "list_monthly_budgets" -> Vec<MonthlyBudget>
}

command! {
    ListMonthlyBudgetsSorted { args: BudgetSort } => "list_monthly_budgets_sorted" -> Vec<MonthlyBudget>
}

command! {
    /// Returns the new budget id.
    CreateMonthlyBudget { args: BudgetDraft } => "create_monthly_budget" -> i64
}

command! {
    DeleteMonthlyBudget { budget_id: i64 } => "delete_monthly_budget" -> ()
}

command! {
    FinishMonthlyBudget { budget_id: i64 } => "finish_monthly_budget" -> ()
}

command! {
    UnfinishMonthlyBudget { budget_id: i64 } => "unfinish_monthly_budget" -> ()
}

command! {
    UpdateBudgetTitle { budget_id: i64, title: String } => "update_budget_title" -> ()
}

command! {
    GetBudgetChangeHistory { budget_id: i64 } => "get_budget_change_history" -> Vec<BudgetChangeHistoryEntry>
}

command! {
    GetBudgetCategoriesWithStats { budget_id: i64 } => "get_budget_categories_with_stats" -> Vec<CategoryStats>
}

command! {
    GetCategoryLedger {
        category_id: i64,
        limit: u32,
        offset: u32,
        sort: LedgerSort,
    } => "get_category_ledger" -> Vec<LedgerEntry>
}

command! {
    AddCategoryEntry { payload: NewEntry } => "add_category_entry" -> LedgerEntry
}

command! {
    UpdateCategoryEntry { payload: UpdateEntry } => "update_category_entry" -> ()
}

command! {
    SoftDeleteCategoryEntry { entry_id: i64 } => "soft_delete_category_entry" -> ()
}

command! {
    SetCategoryAllocatedAmount { category_id: i64, amount: f64 } => "set_category_allocated_amount" -> ()
}

command! {
    /// Returns the new category id.
    AddBudgetCategory { payload: NewCategory } => "add_budget_category" -> i64
}

command! {
    GetGlobalCategories {} => "get_global_categories" -> Vec<GlobalCategory>
}

command! {
    CreateGlobalCategory { args: GlobalCategoryDraft } => "create_global_category" -> GlobalCategory
}

command! {
    UpdateGlobalCategory {
        category_id: i64,
        args: GlobalCategoryDraft,
    } => "update_global_category" -> GlobalCategory
}

command! {
    DeleteGlobalCategory { category_id: i64 } => "delete_global_category" -> ()
}

command! {
    GetBudgetTemplates {} => "get_budget_templates" -> Vec<BudgetTemplate>
}

command! {
    GetBudgetTemplateWithCategories {
        template_id: i64,
    } => "get_budget_template_with_categories" -> BudgetTemplateWithCategories
}

command! {
    CreateBudgetTemplate { args: TemplateDraft } => "create_budget_template" -> BudgetTemplateWithCategories
}

command! {
    UpdateBudgetTemplate {
        template_id: i64,
        args: TemplateDraft,
    } => "update_budget_template" -> BudgetTemplateWithCategories
}

command! {
    DeleteBudgetTemplate { template_id: i64 } => "delete_budget_template" -> ()
}

command! {
    /// Replaces the budget's categories with the template's, server side.
    ApplyTemplateToBudget { budget_id: i64, template_id: i64 } => "apply_template_to_budget" -> ()
}

command! {
    /// Idempotent schema setup; returns a status message.
    RunMigration {} => "run_migration" -> String
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arguments_use_tauri_key_names() {
        let cmd = GetCategoryLedger {
            category_id: 5,
            limit: 50,
            offset: 0,
            sort: LedgerSort::DateDesc,
        };
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({"categoryId": 5, "limit": 50, "offset": 0, "sort": "date_desc"})
        );
        assert_eq!(GetCategoryLedger::NAME, "get_category_ledger");
    }

    #[test]
    fn argument_free_commands_send_an_empty_object() {
        assert_eq!(serde_json::to_value(RunMigration {}).unwrap(), json!({}));
    }

    #[test]
    fn nested_template_args_keep_snake_case() {
        let cmd = UpdateBudgetTemplate {
            template_id: 2,
            args: TemplateDraft {
                name: "Lean".to_string(),
                description: None,
                categories: vec![crate::model::TemplateCategoryDraft {
                    global_category_id: 8,
                    allocated_amount: 120.0,
                    category_type: crate::model::CategoryKind::Savings,
                    sort_order: 0,
                }],
            },
        };
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({
                "templateId": 2,
                "args": {
                    "name": "Lean",
                    "description": null,
                    "categories": [{
                        "global_category_id": 8,
                        "allocated_amount": 120.0,
                        "category_type": "savings",
                        "sort_order": 0
                    }]
                }
            })
        );
    }
}

//! Templates and global categories.
//!
//! These pages keep their own request state instead of going through the
//! budget store. A missing template schema is reported as
//! [`Loaded::NeedsMigration`] so the page can offer the one-time setup.

use crate::backend::commands::{
    CreateBudgetTemplate, CreateGlobalCategory, DeleteBudgetTemplate, DeleteGlobalCategory, GetBudgetTemplateWithCategories,
    GetBudgetTemplates, GetGlobalCategories, RunMigration, UpdateBudgetTemplate, UpdateGlobalCategory,
};
use crate::backend::Backend;
use crate::error::{BackendError, Result, ValidationError};
use crate::model::{
    BudgetTemplate, BudgetTemplateWithCategories, CategoryKind, GlobalCategory, GlobalCategoryDraft, TemplateCategoryDraft,
    TemplateDraft,
};
use crate::validation;

pub const ALL_CATEGORIES_USED: &str = "All available categories have already been added to this template.";

#[derive(Clone, Debug, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    NeedsMigration,
}

impl<T> Loaded<T> {
    fn from_result(result: std::result::Result<T, BackendError>) -> Result<Self> {
        match result {
            Ok(value) => Ok(Loaded::Ready(value)),
            Err(err) if err.is_schema_not_ready() => {
                tracing::warn!(error = %err, "template schema missing");
                Ok(Loaded::NeedsMigration)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub templates: Vec<BudgetTemplate>,
    pub global_categories: Vec<GlobalCategory>,
}

/// Templates and global categories together, as the templates page needs both.
pub async fn load_catalog<B: Backend>(backend: &B) -> Result<Loaded<Catalog>> {
    let templates = match Loaded::from_result(backend.call(&GetBudgetTemplates {}).await)? {
        Loaded::Ready(templates) => templates,
        Loaded::NeedsMigration => return Ok(Loaded::NeedsMigration),
    };
    let global_categories = match Loaded::from_result(backend.call(&GetGlobalCategories {}).await)? {
        Loaded::Ready(categories) => categories,
        Loaded::NeedsMigration => return Ok(Loaded::NeedsMigration),
    };
    Ok(Loaded::Ready(Catalog {
        templates,
        global_categories,
    }))
}

pub async fn load_templates<B: Backend>(backend: &B) -> Result<Loaded<Vec<BudgetTemplate>>> {
    Loaded::from_result(backend.call(&GetBudgetTemplates {}).await)
}

pub async fn load_global_categories<B: Backend>(backend: &B) -> Result<Loaded<Vec<GlobalCategory>>> {
    Loaded::from_result(backend.call(&GetGlobalCategories {}).await)
}

/// One-time schema setup. Safe to run again.
pub async fn run_migration<B: Backend>(backend: &B) -> Result<String> {
    let message = backend.call(&RunMigration {}).await?;
    tracing::info!(%message, "migration finished");
    Ok(message)
}

fn normalized(draft: &GlobalCategoryDraft) -> GlobalCategoryDraft {
    GlobalCategoryDraft {
        name: draft.name.trim().to_string(),
        description: draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
    }
}

pub async fn create_global_category<B: Backend>(backend: &B, draft: &GlobalCategoryDraft) -> Result<GlobalCategory> {
    let args = normalized(draft);
    validation::validate_global_category(&args)?;
    let created = backend.call(&CreateGlobalCategory { args }).await?;
    tracing::info!(id = created.global_category_id, "global category created");
    Ok(created)
}

pub async fn update_global_category<B: Backend>(
    backend: &B,
    category_id: i64,
    draft: &GlobalCategoryDraft,
) -> Result<GlobalCategory> {
    let args = normalized(draft);
    validation::validate_global_category(&args)?;
    Ok(backend.call(&UpdateGlobalCategory { category_id, args }).await?)
}

pub async fn delete_global_category<B: Backend>(backend: &B, category_id: i64) -> Result<()> {
    backend.call(&DeleteGlobalCategory { category_id }).await?;
    tracing::info!(category_id, "global category deleted");
    Ok(())
}

pub async fn load_template<B: Backend>(backend: &B, template_id: i64) -> Result<BudgetTemplateWithCategories> {
    Ok(backend.call(&GetBudgetTemplateWithCategories { template_id }).await?)
}

/// Create the template, or replace `editing` with it.
pub async fn save_template<B: Backend>(
    backend: &B,
    editing: Option<i64>,
    draft: &TemplateDraft,
) -> Result<BudgetTemplateWithCategories> {
    let mut args = draft.clone();
    args.name = args.name.trim().to_string();
    args.description = args
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    validation::validate_template(&args)?;
    let saved = match editing {
        Some(template_id) => backend.call(&UpdateBudgetTemplate { template_id, args }).await?,
        None => backend.call(&CreateBudgetTemplate { args }).await?,
    };
    tracing::info!(template_id = saved.template_id, "template saved");
    Ok(saved)
}

pub async fn delete_template<B: Backend>(backend: &B, template_id: i64) -> Result<()> {
    backend.call(&DeleteBudgetTemplate { template_id }).await?;
    tracing::info!(template_id, "template deleted");
    Ok(())
}

impl TemplateDraft {
    /// Editable copy of a stored template.
    pub fn from_template(template: &BudgetTemplateWithCategories) -> Self {
        let mut categories = template.categories.clone();
        categories.sort_by_key(|c| c.sort_order);
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            categories: categories
                .iter()
                .map(|c| TemplateCategoryDraft {
                    global_category_id: c.global_category_id,
                    allocated_amount: c.allocated_amount,
                    category_type: c.category_type,
                    sort_order: c.sort_order,
                })
                .collect(),
        }
    }

    /// Append the first global category not yet in the draft.
    pub fn add_next_category(&mut self, globals: &[GlobalCategory]) -> std::result::Result<(), ValidationError> {
        let next = globals
            .iter()
            .find(|g| !self.categories.iter().any(|c| c.global_category_id == g.global_category_id))
            .ok_or_else(|| ValidationError::new("categories", ALL_CATEGORIES_USED))?;
        self.categories.push(TemplateCategoryDraft {
            global_category_id: next.global_category_id,
            allocated_amount: 0.0,
            category_type: CategoryKind::Expense,
            sort_order: self.categories.len() as i32,
        });
        Ok(())
    }

    pub fn remove_category(&mut self, index: usize) {
        if index < self.categories.len() {
            self.categories.remove(index);
            for (order, category) in self.categories.iter_mut().enumerate() {
                category.sort_order = order as i32;
            }
        }
    }

    pub fn set_global_category(&mut self, index: usize, global_category_id: i64) {
        if let Some(category) = self.categories.get_mut(index) {
            category.global_category_id = global_category_id;
        }
    }

    pub fn set_amount(&mut self, index: usize, amount: f64) {
        if let Some(category) = self.categories.get_mut(index) {
            category.allocated_amount = amount;
        }
    }

    pub fn set_kind(&mut self, index: usize, kind: CategoryKind) {
        if let Some(category) = self.categories.get_mut(index) {
            category.category_type = kind;
        }
    }

    pub fn total(&self) -> f64 {
        self.categories.iter().map(|c| c.allocated_amount).sum()
    }
}

/// Name of a global category for display, "Unknown" if it was deleted.
pub fn global_category_name(globals: &[GlobalCategory], global_category_id: i64) -> &str {
    globals
        .iter()
        .find(|g| g.global_category_id == global_category_id)
        .map(|g| g.name.as_str())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(id: i64, name: &str) -> GlobalCategory {
        GlobalCategory {
            global_category_id: id,
            name: name.to_string(),
            description: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn adds_unused_categories_in_order_until_exhausted() {
        let globals = [global(1, "Rent"), global(2, "Food")];
        let mut draft = TemplateDraft::default();
        draft.add_next_category(&globals).unwrap();
        draft.add_next_category(&globals).unwrap();
        assert_eq!(
            draft.categories.iter().map(|c| c.global_category_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        let err = draft.add_next_category(&globals).unwrap_err();
        assert_eq!(err.message, ALL_CATEGORIES_USED);
    }

    #[test]
    fn removing_renumbers_sort_order() {
        let globals = [global(1, "Rent"), global(2, "Food"), global(3, "Fun")];
        let mut draft = TemplateDraft::default();
        for _ in 0..3 {
            draft.add_next_category(&globals).unwrap();
        }
        draft.set_amount(2, 50.0);
        draft.set_amount(0, 900.0);
        draft.remove_category(1);
        assert_eq!(draft.categories[1].global_category_id, 3);
        assert_eq!(draft.categories[1].sort_order, 1);
        assert_eq!(draft.total(), 950.0);
    }

    #[test]
    fn deleted_globals_render_as_unknown() {
        let globals = [global(1, "Rent")];
        assert_eq!(global_category_name(&globals, 1), "Rent");
        assert_eq!(global_category_name(&globals, 9), "Unknown");
    }
}

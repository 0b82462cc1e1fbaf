//! JSON file store under the centavo home directory.
//!
//! This is the record-store collaborator the core trusts: it owns
//! creation-time validation (positive amounts, known categories), keeps
//! budget running sums in sync with stored expenses, and acts as the
//! notification sink (persistence + dedupe + milestone flagging).

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use centavo_core::category::{ExpenseCategory, GoalCategory, IncomeCategory};
use centavo_core::goals::GoalRecord;
use centavo_core::insight::{InsightEvent, InsightKind};
use centavo_core::records::{BudgetRecord, ExpenseRecord, IncomeRecord, month_key};

const INCOMES: &str = "receitas.json";
const EXPENSES: &str = "despesas.json";
const GOALS: &str = "sonhos.json";
const BUDGETS: &str = "orcamentos.json";
const NOTIFICATIONS: &str = "notificacoes.json";

/// A persisted notification, as the notification pane would list it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredNotification {
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at_utc: String,
}

pub struct Store {
    home: PathBuf,
}

impl Store {
    pub fn open(home: PathBuf) -> Result<Self> {
        fs::create_dir_all(&home).with_context(|| format!("create {}", home.display()))?;
        Ok(Self { home })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.home.join(name)
    }

    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let p = self.path(name);
        if !p.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
    }

    fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let p = self.path(name);
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    fn next_id(&self, prefix: &str, existing: usize) -> String {
        // Millis plus position keeps ids unique even inside one batch.
        format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), existing)
    }

    // --- incomes ---

    pub fn incomes(&self) -> Result<Vec<IncomeRecord>> {
        self.read_collection(INCOMES)
    }

    pub fn add_income(
        &self,
        description: &str,
        amount: f64,
        category: IncomeCategory,
        date: NaiveDate,
    ) -> Result<IncomeRecord> {
        if amount <= 0.0 {
            bail!("amount must be positive, got {amount}");
        }
        if description.trim().is_empty() {
            bail!("description must not be empty");
        }
        let mut items = self.incomes()?;
        let record = IncomeRecord::new(
            self.next_id("rec", items.len()),
            amount,
            description.trim(),
            category,
            date,
        );
        items.push(record.clone());
        self.write_collection(INCOMES, &items)?;
        Ok(record)
    }

    // --- expenses ---

    pub fn expenses(&self) -> Result<Vec<ExpenseRecord>> {
        self.read_collection(EXPENSES)
    }

    pub fn add_expense(
        &self,
        description: &str,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
        is_paid: bool,
    ) -> Result<ExpenseRecord> {
        if amount <= 0.0 {
            bail!("amount must be positive, got {amount}");
        }
        if description.trim().is_empty() {
            bail!("description must not be empty");
        }
        let mut items = self.expenses()?;
        let mut record = ExpenseRecord::new(
            self.next_id("desp", items.len()),
            amount,
            description.trim(),
            category,
            date,
        );
        record.is_paid = is_paid;
        items.push(record.clone());
        self.write_collection(EXPENSES, &items)?;
        self.sync_budget(category, &month_key(date))?;
        Ok(record)
    }

    pub fn set_expense_paid(&self, id: &str, paid: bool) -> Result<ExpenseRecord> {
        let mut items = self.expenses()?;
        let record = items
            .iter_mut()
            .find(|e| e.id == id)
            .with_context(|| format!("no expense with id {id}"))?;
        record.is_paid = paid;
        let updated = record.clone();
        self.write_collection(EXPENSES, &items)?;
        Ok(updated)
    }

    pub fn import_expenses(&self, rows: &[centavo_ingest::ImportedExpense]) -> Result<usize> {
        let mut items = self.expenses()?;
        let mut touched: Vec<(ExpenseCategory, String)> = Vec::new();
        for row in rows {
            let mut record = ExpenseRecord::new(
                self.next_id("desp", items.len()),
                row.amount,
                row.description.clone(),
                row.category,
                row.date,
            );
            record.is_paid = row.is_paid;
            touched.push((row.category, month_key(row.date)));
            items.push(record);
        }
        self.write_collection(EXPENSES, &items)?;
        touched.sort();
        touched.dedup();
        for (category, month) in touched {
            self.sync_budget(category, &month)?;
        }
        Ok(rows.len())
    }

    // --- goals ---

    pub fn goals(&self) -> Result<Vec<GoalRecord>> {
        self.read_collection(GOALS)
    }

    pub fn add_goal(
        &self,
        title: &str,
        description: &str,
        target_amount: f64,
        target_date: NaiveDate,
        category: GoalCategory,
        priority: u8,
    ) -> Result<GoalRecord> {
        if target_amount <= 0.0 {
            bail!("target amount must be positive, got {target_amount}");
        }
        if title.trim().is_empty() {
            bail!("title must not be empty");
        }
        let mut items = self.goals()?;
        let record = GoalRecord {
            id: self.next_id("sonho", items.len()),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            target_amount,
            current_amount: 0.0,
            target_date,
            category,
            priority: priority.clamp(1, 3),
            notified: false,
            created_at: Utc::now(),
        };
        items.push(record.clone());
        self.write_collection(GOALS, &items)?;
        Ok(record)
    }

    pub fn deposit_goal(&self, id: &str, amount: f64) -> Result<GoalRecord> {
        if amount <= 0.0 {
            bail!("deposit must be positive, got {amount}");
        }
        let mut items = self.goals()?;
        let record = items
            .iter_mut()
            .find(|g| g.id == id)
            .with_context(|| format!("no goal with id {id}"))?;
        record.current_amount += amount;
        let updated = record.clone();
        self.write_collection(GOALS, &items)?;
        Ok(updated)
    }

    /// Flip the one-time milestone flag after its insight was delivered.
    pub fn mark_goals_notified(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut items = self.goals()?;
        for g in items.iter_mut() {
            if ids.contains(&g.id) {
                g.notified = true;
            }
        }
        self.write_collection(GOALS, &items)
    }

    // --- budgets ---

    pub fn budgets(&self) -> Result<Vec<BudgetRecord>> {
        self.read_collection(BUDGETS)
    }

    pub fn add_budget(
        &self,
        category: ExpenseCategory,
        month: &str,
        limit_amount: f64,
        alert_percent: f64,
    ) -> Result<BudgetRecord> {
        if limit_amount <= 0.0 {
            bail!("limit must be positive, got {limit_amount}");
        }
        let mut items = self.budgets()?;
        if items.iter().any(|b| b.category == category && b.month_key == month) {
            bail!("budget for {} in {} already exists", category.label(), month);
        }
        let mut record = BudgetRecord {
            id: self.next_id("orc", items.len()),
            category,
            month_key: month.to_string(),
            limit_amount,
            current_amount: 0.0,
            alert_percent: alert_percent.clamp(1.0, 100.0),
        };
        // Pick up expenses recorded before the budget existed.
        record.current_amount = self.category_month_total(category, month)?;
        items.push(record.clone());
        self.write_collection(BUDGETS, &items)?;
        Ok(record)
    }

    fn category_month_total(&self, category: ExpenseCategory, month: &str) -> Result<f64> {
        Ok(self
            .expenses()?
            .iter()
            .filter(|e| e.category == category && month_key(e.date) == month)
            .map(|e| e.amount)
            .sum())
    }

    /// Recompute a budget's running sum from stored expenses. The core
    /// evaluator only ever reads `current_amount`; this is where it is
    /// kept truthful.
    fn sync_budget(&self, category: ExpenseCategory, month: &str) -> Result<()> {
        let mut items = self.budgets()?;
        let mut changed = false;
        let total = self.category_month_total(category, month)?;
        for b in items.iter_mut() {
            if b.category == category && b.month_key == month {
                b.current_amount = total;
                changed = true;
            }
        }
        if changed {
            self.write_collection(BUDGETS, &items)?;
        }
        Ok(())
    }

    // --- notifications (the sink) ---

    pub fn notifications(&self) -> Result<Vec<StoredNotification>> {
        self.read_collection(NOTIFICATIONS)
    }

    /// Append insights as notifications, skipping any whose title and
    /// message already exist verbatim (the watch loop re-evaluates every
    /// tick; identical findings must not pile up).
    pub fn append_notifications(&self, insights: &[InsightEvent]) -> Result<usize> {
        let mut items = self.notifications()?;
        let mut appended = 0usize;
        for insight in insights {
            let duplicate = items
                .iter()
                .any(|n| n.title == insight.title && n.message == insight.message);
            if duplicate {
                continue;
            }
            items.push(StoredNotification {
                id: self.next_id("notif", items.len()),
                kind: insight.kind,
                title: insight.title.clone(),
                message: insight.message.clone(),
                read: false,
                created_at_utc: Utc::now().to_rfc3339(),
            });
            appended += 1;
        }
        if appended > 0 {
            self.write_collection(NOTIFICATIONS, &items)?;
        }
        Ok(appended)
    }

    pub fn mark_notification_read(&self, id: &str) -> Result<()> {
        let mut items = self.notifications()?;
        let n = items
            .iter_mut()
            .find(|n| n.id == id)
            .with_context(|| format!("no notification with id {id}"))?;
        n.read = true;
        self.write_collection(NOTIFICATIONS, &items)
    }
}

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod chat;
mod config;
mod dashboard;
mod insights_cmd;
mod report_cmd;
mod state;
mod store;
mod watch;

use centavo_core::category::{ExpenseCategory, GoalCategory, IncomeCategory};
use centavo_core::classify::{self, Domain};
use config::{Config, load_config};
use store::Store;

#[derive(Parser, Debug)]
#[command(name = "centavo", version, about = "Centavo — controle financeiro pessoal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the centavo home, default config, and empty stores
    Setup,

    /// Register a new record
    Add {
        #[command(subcommand)]
        command: AddCommand,
    },

    /// Mark an expense as paid
    Pay { id: String },

    /// Mark an expense as unpaid again
    Unpay { id: String },

    /// Add money to a savings goal
    Deposit { goal_id: String, amount: f64 },

    /// Totals, category breakdown, and goal progress
    Dashboard,

    /// Run the rule catalog and persist the resulting notifications
    Insights {
        /// Print only; don't touch the notification store
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// List stored notifications, newest first
    Notifications {
        /// Mark one notification as read
        #[arg(long)]
        mark_read: Option<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Monthly report: summary, trends, forecasts, health
    Report {
        /// Month to report on (YYYY-MM, default: current)
        #[arg(long)]
        month: Option<String>,
    },

    /// Import expenses from a CSV file
    Import {
        /// Path to the CSV (template: `centavo import --template`)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the CSV template and exit
        #[arg(long, default_value_t = false)]
        template: bool,
    },

    /// List the built-in category set
    Categories,

    /// Classify a description into a category (debug aid)
    Classify {
        /// receita | despesa | sonho
        #[arg(long)]
        domain: String,

        #[arg(long)]
        text: String,
    },

    /// Chat with the keyword assistant
    Chat,

    /// Periodic analysis loop (the notification scheduler)
    Watch {
        /// Run a single pass and exit
        #[arg(long, default_value_t = false)]
        once: bool,
    },
}

#[derive(Subcommand, Debug)]
enum AddCommand {
    /// New income ("receita")
    Income {
        description: String,
        amount: f64,

        /// Category label; classified from the description when omitted
        #[arg(long)]
        category: Option<String>,

        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// New expense ("despesa")
    Expense {
        description: String,
        amount: f64,

        /// Category label; classified from the description when omitted
        #[arg(long)]
        category: Option<String>,

        /// Due date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Already paid
        #[arg(long, default_value_t = false)]
        paid: bool,
    },

    /// New savings goal ("sonho")
    Goal {
        title: String,
        target_amount: f64,

        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Category label; classified from the title when omitted
        #[arg(long)]
        category: Option<String>,

        /// 1 (highest) to 3
        #[arg(long, default_value_t = 2)]
        priority: u8,
    },

    /// New monthly budget ("orçamento")
    Budget {
        category: String,
        limit_amount: f64,

        /// YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,

        #[arg(long, default_value_t = 80.0)]
        alert_percent: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    let store = Store::open(state::ensure_centavo_home()?)?;

    match cli.command {
        Command::Setup => run_setup(&config)?,

        Command::Add { command } => run_add(&store, &config, command)?,

        Command::Pay { id } => {
            let e = store.set_expense_paid(&id, true)?;
            println!("Paga: {} — R$ {:.2}", e.description, e.amount);
        }

        Command::Unpay { id } => {
            let e = store.set_expense_paid(&id, false)?;
            println!("Reaberta: {} — R$ {:.2}", e.description, e.amount);
        }

        Command::Deposit { goal_id, amount } => {
            let g = store.deposit_goal(&goal_id, amount)?;
            println!(
                "Depósito em \"{}\": R$ {:.2} de R$ {:.2}",
                g.title, g.current_amount, g.target_amount
            );
        }

        Command::Dashboard => {
            let snapshot = dashboard::load_snapshot(&store, &config)?;
            dashboard::print_dashboard(&snapshot);
        }

        Command::Insights { dry_run } => {
            insights_cmd::run_insights(&store, &config, dry_run)?;
        }

        Command::Notifications { mark_read, limit } => {
            if let Some(id) = mark_read {
                store.mark_notification_read(&id)?;
                println!("Lida: {id}");
            } else {
                let mut items = store.notifications()?;
                items.reverse();
                for n in items.iter().take(limit) {
                    let flag = if n.read { " " } else { "*" };
                    println!("{flag} [{}] {} — {}", n.id, n.title, n.message);
                }
                if items.is_empty() {
                    println!("Nenhuma notificação.");
                }
            }
        }

        Command::Report { month } => {
            report_cmd::run_report(&store, &config, month)?;
        }

        Command::Import { csv, template } => run_import(&store, csv, template)?,

        Command::Categories => {
            for def in centavo_core::builtin_categories() {
                let scope = match def.applies_to {
                    centavo_core::AppliesTo::Income => "receita",
                    centavo_core::AppliesTo::Expense => "despesa",
                    centavo_core::AppliesTo::Both => "ambas",
                };
                println!("{:<14} [{}]  icon={:<16} cor={}", def.name, scope, def.icon, def.color);
            }
        }

        Command::Classify { domain, text } => {
            let domain = Domain::from_str(&domain)
                .context("domain must be one of: receita, despesa, sonho")?;
            println!("{}", classify::classify(domain, &text));
        }

        Command::Chat => chat::run_chat(&store, &config)?,

        Command::Watch { once } => watch::run_watch(&store, &config, once).await?,
    }

    Ok(())
}

fn run_setup(config: &Config) -> Result<()> {
    let home = state::ensure_centavo_home()?;
    let config_file = config::config_path()?;
    if !config_file.exists() {
        config::save_config(config)?;
    }
    let profile = state::read_profile()?;
    if profile.created_at_utc.is_none() {
        state::write_profile(&state::Profile {
            created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
            timezone: config.watch.timezone.clone(),
        })?;
    }

    println!("Pronto. Arquivos em {}", home.display());
    println!("- {}", config_file.display());
    println!("\nPróximos passos:");
    println!("- centavo add income \"Salário\" 3000");
    println!("- centavo add expense \"Aluguel\" 1200 --date 2024-03-05");
    println!("- centavo dashboard");
    Ok(())
}

fn parse_date(s: Option<String>, config: &Config) -> Result<NaiveDate> {
    match s {
        None => Ok(config.local_today()),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD")),
    }
}

fn run_add(store: &Store, config: &Config, command: AddCommand) -> Result<()> {
    match command {
        AddCommand::Income { description, amount, category, date } => {
            let category = match category {
                Some(s) => IncomeCategory::from_label(&s)
                    .with_context(|| format!("unknown income category '{s}'"))?,
                None => classify::classify_income(&description),
            };
            let date = parse_date(date, config)?;
            let r = store.add_income(&description, amount, category, date)?;
            println!(
                "Receita [{}]: {} — R$ {:.2} ({})",
                r.id, r.description, r.amount, r.category.label()
            );
        }

        AddCommand::Expense { description, amount, category, date, paid } => {
            let category = match category {
                Some(s) => ExpenseCategory::from_label(&s)
                    .with_context(|| format!("unknown expense category '{s}'"))?,
                None => classify::classify_expense(&description),
            };
            let date = parse_date(date, config)?;
            let e = store.add_expense(&description, amount, category, date, paid)?;
            println!(
                "Despesa [{}]: {} — R$ {:.2} ({}, vence {})",
                e.id, e.description, e.amount, e.category.label(), e.date
            );
        }

        AddCommand::Goal { title, target_amount, date, description, category, priority } => {
            let category = match category {
                Some(s) => GoalCategory::from_label(&s)
                    .with_context(|| format!("unknown goal category '{s}'"))?,
                None => classify::classify_goal(&title),
            };
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?;
            let g = store.add_goal(&title, &description, target_amount, date, category, priority)?;
            println!(
                "Sonho [{}]: {} — meta R$ {:.2} até {}",
                g.id, g.title, g.target_amount, g.target_date
            );
        }

        AddCommand::Budget { category, limit_amount, month, alert_percent } => {
            let category = ExpenseCategory::from_label(&category)
                .with_context(|| format!("unknown expense category '{category}'"))?;
            let month = month.unwrap_or_else(|| centavo_core::month_key(config.local_today()));
            let b = store.add_budget(category, &month, limit_amount, alert_percent)?;
            println!(
                "Orçamento [{}]: {} em {} — limite R$ {:.2}, alerta em {:.0}%",
                b.id, b.category.label(), b.month_key, b.limit_amount, b.alert_percent
            );
        }
    }
    Ok(())
}

fn run_import(store: &Store, csv: Option<PathBuf>, template: bool) -> Result<()> {
    if template {
        println!("{}", centavo_ingest::sample_csv());
        return Ok(());
    }
    let Some(csv_path) = csv else {
        bail!("pass --csv <path>, or --template for the expected layout");
    };
    if !csv_path.exists() {
        bail!("CSV not found: {}", csv_path.display());
    }

    let report = centavo_ingest::parse_despesas_csv(&csv_path)
        .with_context(|| format!("parsing {}", csv_path.display()))?;

    if report.is_empty() {
        bail!(
            "no valid expense found in {} ({} row(s) skipped)",
            csv_path.display(),
            report.skipped
        );
    }

    let imported = store.import_expenses(&report.rows)?;
    println!(
        "Importadas {} despesa(s) de {} ({} linha(s) ignorada(s))",
        imported,
        csv_path.display(),
        report.skipped
    );
    Ok(())
}

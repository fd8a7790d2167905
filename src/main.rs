use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use sweetbook::config::{self, data_dir, ensure_initialized, init_data_dir, load_settings};
use sweetbook::ledger::DATE_FORMAT;
use sweetbook::{
    pricing, ConsoleNotifier, ExpenseDraft, GoalSettings, Ledger, LedgerError, Notifier,
    ProductDraft, RecordFilter, RecordId, Result, SaleDraft, Settings, SilentNotifier, TomlStore,
};

#[derive(Parser)]
#[command(name = "sweetbook")]
#[command(version, about = "Bookkeeping for small bakeries: expenses, sales and stock", long_about = None)]
struct Cli {
    /// Path to data directory (default: XDG data dir)
    #[arg(short = 'C', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directory with a settings template
    Init,

    /// Show record counts and goals
    Status,

    /// Record an expense
    AddExpense {
        /// What was bought (e.g., "Flour")
        #[arg(long)]
        concept: String,

        /// Amount bought
        #[arg(short, long)]
        quantity: String,

        /// Unit of the amount (kg, lt, unit...)
        #[arg(short, long)]
        unit: String,

        /// Total cost of the purchase
        #[arg(long)]
        cost: String,

        /// Expense category (e.g., Ingredients, Packaging)
        #[arg(long)]
        category: String,

        /// Purchase date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses
    Expenses {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// From this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Up to this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an expense
    RemoveExpense {
        /// Expense id from 'expenses'
        id: RecordId,
    },

    /// Record a sale, taking units out of stock
    AddSale {
        /// Product name
        #[arg(short, long)]
        product: String,

        /// Units sold
        #[arg(short, long)]
        quantity: String,

        /// Price per unit (default: the product's sale price)
        #[arg(long)]
        price: Option<String>,

        /// Client name
        #[arg(long)]
        client: Option<String>,

        /// Payment method
        #[arg(long, default_value = "Cash")]
        payment: String,

        /// Sale date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List sales
    Sales {
        /// Only this product
        #[arg(long)]
        product: Option<String>,

        /// From this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Up to this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete a sale, putting its units back in stock
    RemoveSale {
        /// Sale id from 'sales'
        id: RecordId,
    },

    /// Add a product to the catalog
    AddProduct {
        /// Product name, used to match sales
        #[arg(short, long)]
        name: String,

        /// Cost to produce one unit
        #[arg(long)]
        cost: String,

        /// Sale price of one unit
        #[arg(long)]
        price: String,

        /// Product category
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Preparation time (free text, e.g., "2h")
        #[arg(long)]
        prep_time: Option<String>,

        /// Units in stock; leave out to not track stock
        #[arg(long)]
        stock: Option<String>,

        /// Alert when stock falls to this level
        #[arg(long)]
        min_stock: Option<String>,
    },

    /// List products
    Products,

    /// Delete a product (its sales are kept)
    RemoveProduct {
        /// Product id from 'products'
        id: RecordId,
    },

    /// Set the units in stock for a product
    SetStock {
        /// Product id from 'products'
        id: RecordId,

        /// New stock level
        stock: String,
    },

    /// Add units to a product's stock
    Restock {
        /// Product id from 'products'
        id: RecordId,

        /// Units to add
        quantity: String,
    },

    /// Change a product's cost and price
    Reprice {
        /// Product id from 'products'
        id: RecordId,

        /// New cost to produce one unit
        #[arg(long)]
        cost: String,

        /// New sale price of one unit
        #[arg(long)]
        price: String,
    },

    /// Show totals, margins and best sellers
    Dashboard {
        /// Print the metrics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or set revenue and units goals (saving re-arms alerts)
    Goals {
        /// Revenue goal, 0 to disable
        #[arg(long)]
        revenue: Option<f64>,

        /// Units sold goal, 0 to disable
        #[arg(long)]
        units: Option<f64>,
    },

    /// List products with active low-stock alerts
    Alerts,

    /// Calculate the cost of one unit of a purchase
    UnitCost {
        /// Total cost
        #[arg(long)]
        cost: f64,

        /// Units bought
        #[arg(short, long)]
        quantity: f64,
    },

    /// Suggest a sale price for a target margin
    Price {
        /// Cost of one unit
        #[arg(long)]
        cost: f64,

        /// Target margin in percent of the price
        #[arg(short, long)]
        margin: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    trace!("Using data directory {}", dir.display());

    match cli.command {
        Commands::Init => cmd_init(&dir),
        Commands::Status => cmd_status(&dir),
        Commands::AddExpense {
            concept,
            quantity,
            unit,
            cost,
            category,
            date,
        } => {
            let draft = ExpenseDraft {
                date: date.unwrap_or_else(today),
                concept,
                quantity,
                unit,
                cost,
                category,
            };
            cmd_add_expense(&dir, &draft)
        }
        Commands::Expenses { category, from, to } => {
            let filter = RecordFilter {
                category,
                from: parse_filter_date("from", from.as_deref())?,
                to: parse_filter_date("to", to.as_deref())?,
                ..Default::default()
            };
            cmd_expenses(&dir, &filter)
        }
        Commands::RemoveExpense { id } => cmd_remove_expense(&dir, id),
        Commands::AddSale {
            product,
            quantity,
            price,
            client,
            payment,
            date,
        } => cmd_add_sale(
            &dir,
            SaleDraft {
                date: date.unwrap_or_else(today),
                product_name: product,
                quantity,
                unit_price: price.unwrap_or_default(),
                client,
                payment_method: payment,
            },
        ),
        Commands::Sales { product, from, to } => {
            let filter = RecordFilter {
                product,
                from: parse_filter_date("from", from.as_deref())?,
                to: parse_filter_date("to", to.as_deref())?,
                ..Default::default()
            };
            cmd_sales(&dir, &filter)
        }
        Commands::RemoveSale { id } => cmd_remove_sale(&dir, id),
        Commands::AddProduct {
            name,
            cost,
            price,
            category,
            description,
            prep_time,
            stock,
            min_stock,
        } => {
            let draft = ProductDraft {
                name,
                description,
                production_cost: cost,
                sale_price: price,
                prep_time,
                category,
                stock,
                stock_minimum: min_stock,
            };
            cmd_add_product(&dir, &draft)
        }
        Commands::Products => cmd_products(&dir),
        Commands::RemoveProduct { id } => cmd_remove_product(&dir, id),
        Commands::SetStock { id, stock } => cmd_set_stock(&dir, id, &stock),
        Commands::Restock { id, quantity } => cmd_restock(&dir, id, &quantity),
        Commands::Reprice { id, cost, price } => cmd_reprice(&dir, id, &cost, &price),
        Commands::Dashboard { json } => cmd_dashboard(&dir, json),
        Commands::Goals { revenue, units } => cmd_goals(&dir, revenue, units),
        Commands::Alerts => cmd_alerts(&dir),
        Commands::UnitCost { cost, quantity } => {
            let value = pricing::unit_cost(cost, quantity)?;
            println!("Unit cost: {value:.2}");
            Ok(())
        }
        Commands::Price { cost, margin } => {
            let value = pricing::suggested_price(cost, margin)?;
            println!("Suggested price: {value:.2} ({margin}% margin)");
            Ok(())
        }
    }
}

fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

fn parse_filter_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| LedgerError::Validation {
                field,
                reason: format!("'{s}' is not a YYYY-MM-DD date"),
            })
        })
        .transpose()
}

/// Load settings and ledger for a command
fn open<N: Notifier>(dir: &Path, notifier: N) -> Result<(Settings, TomlStore, Ledger<N>)> {
    ensure_initialized(dir)?;
    let settings = load_settings(dir)?;
    let store = TomlStore::new(dir);
    let ledger = Ledger::load(&store, notifier)?;
    Ok((settings, store, ledger))
}

/// Initialize data directory with the settings template
fn cmd_init(dir: &Path) -> Result<()> {
    init_data_dir(dir)?;

    println!("Initialized sweetbook data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set your business name:  $EDITOR {}",
        dir.join(config::SETTINGS_FILE).display()
    );
    println!("  2. Add your products:       sweetbook add-product --name <name> --cost <cost> --price <price> --category <category>");
    println!("  3. Record sales:            sweetbook add-sale --product <name> --quantity <units>");

    Ok(())
}

fn cmd_status(dir: &Path) -> Result<()> {
    let (settings, _, ledger) = open(dir, SilentNotifier)?;
    let symbol = &settings.display.currency_symbol;
    let goals = ledger.goals();

    println!("Ledger Status");
    println!("{}", "-".repeat(50));
    println!("Data directory:   {}", dir.display());
    println!("Business:         {}", settings.business.name);
    if let Some(owner) = &settings.business.owner {
        println!("Owner:            {owner}");
    }
    println!("Expenses:         {}", ledger.expenses().len());
    println!("Sales:            {}", ledger.sales().len());
    println!("Products:         {}", ledger.products().len());
    println!("Revenue goal:     {}", goal_text(goals.revenue_goal, |v| format_money(v, symbol)));
    println!("Units goal:       {}", goal_text(goals.units_goal, |v| v.to_string()));

    Ok(())
}

fn goal_text(goal: f64, fmt: impl Fn(f64) -> String) -> String {
    if goal > 0.0 {
        fmt(goal)
    } else {
        "disabled".to_string()
    }
}

// Table row structs for tabled
#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CONCEPT")]
    concept: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "COST")]
    cost: String,
    #[tabled(rename = "UNIT COST")]
    unit_cost: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
}

#[derive(Tabled)]
struct SaleRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "PRICE")]
    unit_price: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "PAYMENT")]
    payment: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "COST")]
    cost: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "PROFIT")]
    profit: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
    #[tabled(rename = "STOCK")]
    stock: String,
    #[tabled(rename = "MIN")]
    minimum: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Two decimals with thousands separators, e.g. "$1,250.00"
fn format_money(value: f64, currency_symbol: &str) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}{currency_symbol}{}.{:02}",
        format_grouped_int(cents / 100),
        cents % 100
    )
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn cmd_add_expense(dir: &Path, draft: &ExpenseDraft) -> Result<()> {
    let (settings, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let expense = ledger.add_expense(draft)?;
    ledger.save(&store)?;

    println!(
        "Added expense #{}: {} {} {} for {}",
        expense.id,
        expense.quantity,
        expense.unit,
        expense.concept,
        format_money(expense.cost, &settings.display.currency_symbol)
    );
    Ok(())
}

fn cmd_expenses(dir: &Path, filter: &RecordFilter) -> Result<()> {
    let (settings, _, ledger) = open(dir, SilentNotifier)?;
    let symbol = &settings.display.currency_symbol;

    let expenses: Vec<_> = ledger.filter_expenses(filter).collect();
    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            date: e.date.to_string(),
            concept: e.concept.clone(),
            quantity: format!("{} {}", e.quantity, e.unit),
            cost: format_money(e.cost, symbol),
            unit_cost: format_money(e.unit_cost(), symbol),
            category: e.category.clone(),
        })
        .collect();

    let total: f64 = expenses.iter().map(|e| e.cost).sum();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "Total: {} expenses, {}",
        expenses.len(),
        format_money(total, symbol)
    );
    Ok(())
}

fn cmd_remove_expense(dir: &Path, id: RecordId) -> Result<()> {
    let (_, store, mut ledger) = open(dir, ConsoleNotifier)?;
    match ledger.remove_expense(id) {
        Some(expense) => {
            ledger.save(&store)?;
            println!("Removed expense #{} ({})", expense.id, expense.concept);
        }
        None => println!("No expense with id {id}, nothing removed."),
    }
    Ok(())
}

fn cmd_add_sale(dir: &Path, mut draft: SaleDraft) -> Result<()> {
    let (settings, store, mut ledger) = open(dir, ConsoleNotifier)?;

    if draft.unit_price.is_empty() {
        if let Some(product) = ledger.product_named(draft.product_name.trim()) {
            draft.unit_price = product.sale_price.to_string();
        }
    }

    let sale = ledger.add_sale(&draft)?;
    ledger.save(&store)?;

    println!(
        "Added sale #{}: {} x {} for {}",
        sale.id,
        sale.quantity,
        sale.product_name,
        format_money(sale.total, &settings.display.currency_symbol)
    );
    if let Some(stock) = ledger.product_named(&sale.product_name).and_then(|p| p.stock) {
        println!("  Stock left: {stock}");
    }
    Ok(())
}

fn cmd_sales(dir: &Path, filter: &RecordFilter) -> Result<()> {
    let (settings, _, ledger) = open(dir, SilentNotifier)?;
    let symbol = &settings.display.currency_symbol;

    let sales: Vec<_> = ledger.filter_sales(filter).collect();
    if sales.is_empty() {
        println!("No sales recorded.");
        return Ok(());
    }

    let rows: Vec<SaleRow> = sales
        .iter()
        .map(|s| SaleRow {
            id: s.id,
            date: s.date.to_string(),
            product: s.product_name.clone(),
            quantity: s.quantity.to_string(),
            unit_price: format_money(s.unit_price, symbol),
            total: format_money(s.total, symbol),
            client: s.client.clone().unwrap_or_default(),
            payment: s.payment_method.clone(),
        })
        .collect();

    let total: f64 = sales.iter().map(|s| s.total).sum();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} sales, {}", sales.len(), format_money(total, symbol));
    Ok(())
}

fn cmd_remove_sale(dir: &Path, id: RecordId) -> Result<()> {
    let (_, store, mut ledger) = open(dir, ConsoleNotifier)?;
    match ledger.remove_sale(id) {
        Some(sale) => {
            ledger.save(&store)?;
            println!(
                "Removed sale #{} ({} x {})",
                sale.id, sale.quantity, sale.product_name
            );
        }
        None => println!("No sale with id {id}, nothing removed."),
    }
    Ok(())
}

fn cmd_add_product(dir: &Path, draft: &ProductDraft) -> Result<()> {
    let (settings, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let product = ledger.add_product(draft)?;
    ledger.save(&store)?;

    println!(
        "Added product #{}: {} at {}",
        product.id,
        product.name,
        format_money(product.sale_price, &settings.display.currency_symbol)
    );
    Ok(())
}

fn cmd_products(dir: &Path) -> Result<()> {
    let (settings, _, ledger) = open(dir, SilentNotifier)?;
    let symbol = &settings.display.currency_symbol;

    if ledger.products().is_empty() {
        println!("No products in the catalog.");
        return Ok(());
    }

    let rows: Vec<ProductRow> = ledger
        .products()
        .iter()
        .map(|p| ProductRow {
            id: p.id,
            name: p.name.clone(),
            category: p.category.clone(),
            cost: format_money(p.production_cost, symbol),
            price: format_money(p.sale_price, symbol),
            profit: format_money(p.unit_margin(), symbol),
            margin: pricing::product_margin(p.production_cost, p.sale_price)
                .map(|m| format!("{m:.1}%"))
                .unwrap_or_else(|_| "-".to_string()),
            stock: format_optional(p.stock),
            minimum: format_optional(p.stock_minimum),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}

fn cmd_remove_product(dir: &Path, id: RecordId) -> Result<()> {
    let (_, store, mut ledger) = open(dir, ConsoleNotifier)?;
    match ledger.remove_product(id) {
        Some(product) => {
            ledger.save(&store)?;
            println!("Removed product #{} ({})", product.id, product.name);
        }
        None => println!("No product with id {id}, nothing removed."),
    }
    Ok(())
}

fn cmd_set_stock(dir: &Path, id: RecordId, stock: &str) -> Result<()> {
    let (_, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let product = ledger.set_stock(id, stock)?;
    ledger.save(&store)?;
    println!(
        "Stock of {} set to {}",
        product.name,
        format_optional(product.stock)
    );
    Ok(())
}

fn cmd_restock(dir: &Path, id: RecordId, quantity: &str) -> Result<()> {
    let (_, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let product = ledger.restock(id, quantity)?;
    ledger.save(&store)?;
    println!(
        "Restocked {}, now {} in stock",
        product.name,
        format_optional(product.stock)
    );
    Ok(())
}

fn cmd_reprice(dir: &Path, id: RecordId, cost: &str, price: &str) -> Result<()> {
    let (settings, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let product = ledger.reprice_product(id, cost, price)?;
    ledger.save(&store)?;
    let symbol = &settings.display.currency_symbol;
    println!(
        "Repriced {}: cost {}, price {}",
        product.name,
        format_money(product.production_cost, symbol),
        format_money(product.sale_price, symbol)
    );
    Ok(())
}

fn cmd_dashboard(dir: &Path, json: bool) -> Result<()> {
    let (settings, _, ledger) = open(dir, SilentNotifier)?;
    let snap = ledger.compute_aggregates();

    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }

    let symbol = &settings.display.currency_symbol;
    let goals = ledger.goals();

    println!("Dashboard: {}", settings.business.name);
    println!("{}", "-".repeat(50));
    println!("Total spent:        {}", format_money(snap.total_spent, symbol));
    println!("Total sold:         {}", format_money(snap.total_sold, symbol));
    println!("Net profit:         {}", format_money(snap.net_profit, symbol));
    println!("Margin:             {:.1}%", snap.margin_percent);
    println!("Units sold:         {}", snap.units_sold);
    println!(
        "Best seller:        {}",
        snap.best_selling_product.as_deref().unwrap_or("-")
    );
    println!("Best month:         {}", snap.best_month);
    println!(
        "Avg daily revenue:  {}",
        format_money(snap.average_daily_revenue, symbol)
    );
    println!(
        "Ingredients cost:   {}",
        format_money(snap.cost_of_ingredients, symbol)
    );
    if let Some(progress) = snap.revenue_goal_progress {
        println!(
            "Revenue goal:       {} / {} ({:.1}%)",
            format_money(snap.total_sold, symbol),
            format_money(goals.revenue_goal, symbol),
            progress
        );
    }
    if goals.units_goal > 0.0 {
        println!(
            "Units goal:         {} / {}",
            snap.units_sold, goals.units_goal
        );
    }
    if !snap.low_stock_products.is_empty() {
        println!("Low stock:          {}", snap.low_stock_products.join(", "));
    }

    if !snap.monthly_revenue.is_empty() {
        let rows: Vec<MonthRow> = snap
            .monthly_revenue
            .iter()
            .map(|m| MonthRow {
                month: m.label.clone(),
                revenue: format_money(m.total, symbol),
            })
            .collect();
        println!();
        println!("{}", Table::new(rows).with(Style::rounded()).to_string());
    }

    Ok(())
}

fn cmd_goals(dir: &Path, revenue: Option<f64>, units: Option<f64>) -> Result<()> {
    let (settings, store, mut ledger) = open(dir, ConsoleNotifier)?;
    let symbol = &settings.display.currency_symbol;
    let current = ledger.goals();

    if revenue.is_some() || units.is_some() {
        let goals = GoalSettings {
            revenue_goal: revenue.unwrap_or(current.revenue_goal),
            units_goal: units.unwrap_or(current.units_goal),
        };
        ledger.save_configuration(goals)?;
        ledger.save(&store)?;
        println!("Saved goals, alerts re-armed");
    }

    let goals = ledger.goals();
    println!("Revenue goal: {}", goal_text(goals.revenue_goal, |v| format_money(v, symbol)));
    println!("Units goal:   {}", goal_text(goals.units_goal, |v| v.to_string()));
    Ok(())
}

fn cmd_alerts(dir: &Path) -> Result<()> {
    let (_, _, ledger) = open(dir, SilentNotifier)?;
    let alerts = ledger.low_stock_alerts();

    if alerts.is_empty() {
        println!("No low-stock alerts.");
        return Ok(());
    }

    println!("Low-stock alerts:");
    for name in alerts {
        match ledger.product_named(name) {
            Some(p) => println!(
                "  {} - {} left (minimum {})",
                name,
                format_optional(p.stock),
                format_optional(p.stock_minimum)
            ),
            None => println!("  {name}"),
        }
    }
    Ok(())
}

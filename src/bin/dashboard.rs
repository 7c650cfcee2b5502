//! CLI front-end for the merchant dashboard.
//!
//! Lists, inspects and edits merchants and products on a dashboard
//! backend, and can run the fallback server itself.

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use merchant_dashboard::actions::{ActionResult, BlockingActions};
use merchant_dashboard::backend::BlockingBackend;
use merchant_dashboard::client::DashboardBlockingClient;
use merchant_dashboard::list::{DEFAULT_PAGE_SIZE, ListView, PAGE_SIZE_OPTIONS, Searchable};
use merchant_dashboard::models::{
    Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, OfferType, Product, ProductId,
    ProductPatch, Status, parse_number,
};
use owo_colors::OwoColorize;

/// Environment variable holding the backend base URL.
const BASE_URL_ENV: &str = "SERVER_HOST";

/// Merchant and product management from the command line.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about)]
struct Cli {
    /// Backend base URL (overrides the `SERVER_HOST` env var).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Manage merchants.
    #[command(subcommand)]
    Merchants(MerchantCommand),
    /// Manage merchant products.
    #[command(subcommand)]
    Products(ProductCommand),
    /// Run the fallback HTTP server.
    #[cfg(feature = "server")]
    Serve(ServeArgs),
}

/// `merchants` subcommands.
#[derive(Debug, Subcommand)]
enum MerchantCommand {
    /// List merchants, one page at a time.
    List(ListArgs),
    /// Show a single merchant.
    Show {
        /// Merchant ID, e.g. `M000001`.
        id: String,
    },
    /// Create a merchant.
    Add(AddMerchantArgs),
    /// Update fields of a merchant.
    Edit {
        /// Merchant ID.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: EditMerchantArgs,
    },
    /// Delete a merchant.
    Delete {
        /// Merchant ID.
        id: String,
    },
}

/// `products` subcommands.
#[derive(Debug, Subcommand)]
enum ProductCommand {
    /// List products, one page at a time.
    List {
        /// Search and pagination.
        #[command(flatten)]
        list: ListArgs,
        /// Only show products of this merchant.
        #[arg(long, value_name = "MERCHANT_ID")]
        merchant: Option<String>,
    },
    /// Show a single product.
    Show {
        /// Product ID, e.g. `P000001`.
        id: String,
    },
    /// Create a product.
    Add(AddProductArgs),
    /// Update fields of a product.
    Edit {
        /// Product ID.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: EditProductArgs,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
    },
}

/// Search and pagination flags shared by the list commands.
#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive name filter.
    #[arg(long, short)]
    search: Option<String>,
    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page (10, 25 or 50).
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    per_page: usize,
}

/// Arguments for `merchants add`.
#[derive(Debug, Args)]
struct AddMerchantArgs {
    /// Explicit ID; assigned by the backend when omitted.
    #[arg(long)]
    id: Option<String>,
    /// Display name.
    #[arg(long)]
    name: String,
    /// Logo image URL.
    #[arg(long)]
    logo_url: String,
    /// Storefront URL.
    #[arg(long)]
    url: String,
    /// Free-text description.
    #[arg(long, default_value = "")]
    description: String,
    /// Best offer amount, e.g. `10`.
    #[arg(long, default_value = "")]
    best_offer_amount: String,
    /// `amount` or `percent`.
    #[arg(long, default_value_t = OfferType::Amount, value_parser = parse_offer_type)]
    best_offer_type: OfferType,
    /// `active` or `inactive`.
    #[arg(long, default_value_t = Status::Active, value_parser = parse_status)]
    status: Status,
}

/// Arguments for `merchants edit`; only given flags change.
#[derive(Debug, Default, Args)]
struct EditMerchantArgs {
    /// New display name.
    #[arg(long)]
    name: Option<String>,
    /// New logo URL.
    #[arg(long)]
    logo_url: Option<String>,
    /// New storefront URL.
    #[arg(long)]
    url: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New best offer amount.
    #[arg(long)]
    best_offer_amount: Option<String>,
    /// New best offer type.
    #[arg(long, value_parser = parse_offer_type)]
    best_offer_type: Option<OfferType>,
    /// New status.
    #[arg(long, value_parser = parse_status)]
    status: Option<Status>,
}

/// Arguments for `products add`.
#[derive(Debug, Args)]
struct AddProductArgs {
    /// Explicit ID; assigned by the backend when omitted.
    #[arg(long)]
    id: Option<String>,
    /// Owning merchant ID.
    #[arg(long, value_name = "MERCHANT_ID")]
    merchant: String,
    /// Product name.
    #[arg(long)]
    name: String,
    /// Product description.
    #[arg(long)]
    description: String,
    /// Price, e.g. `15000`.
    #[arg(long, value_parser = parse_price)]
    price: f64,
    /// Offer amount.
    #[arg(long, default_value_t = 0.0, value_parser = parse_offer_amount)]
    offer_amount: f64,
    /// `amount` or `percent`.
    #[arg(long, default_value_t = OfferType::Amount, value_parser = parse_offer_type)]
    offer_type: OfferType,
    /// Image URL.
    #[arg(long, default_value = "")]
    image_url: String,
    /// Product page URL.
    #[arg(long, default_value = "")]
    url: String,
    /// `active` or `inactive`.
    #[arg(long, default_value_t = Status::Active, value_parser = parse_status)]
    status: Status,
    /// Tag; repeat for several.
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Parameter as `name=value`; repeat for several.
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

/// Arguments for `products edit`; only given flags change.
#[derive(Debug, Default, Args)]
struct EditProductArgs {
    /// New name.
    #[arg(long)]
    name: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New price.
    #[arg(long, value_parser = parse_price)]
    price: Option<f64>,
    /// New offer amount.
    #[arg(long, value_parser = parse_offer_amount)]
    offer_amount: Option<f64>,
    /// New offer type.
    #[arg(long, value_parser = parse_offer_type)]
    offer_type: Option<OfferType>,
    /// New image URL.
    #[arg(long)]
    image_url: Option<String>,
    /// New product page URL.
    #[arg(long)]
    url: Option<String>,
    /// New status.
    #[arg(long, value_parser = parse_status)]
    status: Option<Status>,
    /// Replacement tag list; repeat for several.
    #[arg(long = "tag")]
    tags: Option<Vec<String>>,
    /// Replacement parameters as `name=value`; repeat for several.
    #[arg(long = "param", value_parser = parse_param)]
    params: Option<Vec<(String, String)>>,
}

/// Flags for `dashboard serve`.
#[cfg(feature = "server")]
#[derive(Debug, Args)]
struct ServeArgs {
    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: core::net::SocketAddr,
    /// Seed the store with demo merchants and products.
    #[arg(long)]
    seed: bool,
    /// Proxy every route to this backend instead of serving from memory.
    #[arg(long, value_name = "URL")]
    upstream: Option<String>,
    /// Disable permissive CORS.
    #[arg(long)]
    no_cors: bool,
}

/// Parses a page size, accepting only the offered options.
fn parse_page_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|err| format!("{err}"))?;
    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZE_OPTIONS:?}"))
    }
}

/// Parses a product price.
fn parse_price(s: &str) -> Result<f64, String> {
    parse_number("merchantProductPrice", s).map_err(|err| err.to_string())
}

/// Parses a product offer amount.
fn parse_offer_amount(s: &str) -> Result<f64, String> {
    parse_number("merchantProductOfferAmount", s).map_err(|err| err.to_string())
}

/// Parses an offer type flag.
fn parse_offer_type(s: &str) -> Result<OfferType, String> {
    s.parse().map_err(|err: merchant_dashboard::DashboardError| err.to_string())
}

/// Parses a status flag.
fn parse_status(s: &str) -> Result<Status, String> {
    s.parse().map_err(|err: merchant_dashboard::DashboardError| err.to_string())
}

/// Parses a `name=value` product parameter.
fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(format!("expected `name=value`, got {s:?}")),
    }
}

/// Resolves the backend base URL from the flag or the environment.
fn resolve_base_url(flag: Option<String>) -> Option<String> {
    flag.or_else(|| {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|val| !val.trim().is_empty())
    })
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let command = match cli.command {
        #[cfg(feature = "server")]
        Command::Serve(args) => return cmd_serve(args),
        Command::Merchants(command) => Resource::Merchants(command),
        Command::Products(command) => Resource::Products(command),
    };

    let mut builder = DashboardBlockingClient::builder();
    if let Some(url) = resolve_base_url(cli.base_url) {
        builder = builder.base_url(url);
    }
    let client = match builder.build() {
        Ok(client) => client,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build client: {err}",
                "error:".red().bold()
            )?;
            writeln!(
                io::stderr().lock(),
                "  {} set {} or pass --base-url",
                "hint:".cyan(),
                BASE_URL_ENV
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&BlockingActions::new(client), command)
}

/// Subcommands that talk to a backend.
#[derive(Debug)]
enum Resource {
    /// `dashboard merchants ...`
    Merchants(MerchantCommand),
    /// `dashboard products ...`
    Products(ProductCommand),
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<B: BlockingBackend>(
    actions: &BlockingActions<B>,
    command: Resource,
) -> io::Result<ExitCode> {
    match command {
        Resource::Merchants(MerchantCommand::List(args)) => cmd_list_merchants(actions, &args),
        Resource::Merchants(MerchantCommand::Show { id }) => {
            finish(actions.fetch_merchant(&MerchantId::new(id)), |merchant| {
                print_merchant(&merchant)
            })
        }
        Resource::Merchants(MerchantCommand::Add(args)) => {
            let result = actions.add_merchant(args.into_input());
            finish(result, |merchant| {
                print_done("Created merchant", merchant.id.as_inner())
            })
        }
        Resource::Merchants(MerchantCommand::Edit { id, fields }) => {
            let result = actions.update_merchant(&MerchantId::new(id), fields.into_patch());
            finish(result, |merchant| print_merchant(&merchant))
        }
        Resource::Merchants(MerchantCommand::Delete { id }) => {
            finish(actions.delete_merchant(&MerchantId::new(id)), |deleted| {
                print_done("Deleted merchant", deleted.as_inner())
            })
        }
        Resource::Products(ProductCommand::List { list, merchant }) => {
            cmd_list_products(actions, &list, merchant.as_deref())
        }
        Resource::Products(ProductCommand::Show { id }) => {
            finish(actions.fetch_product(&ProductId::new(id)), |product| {
                print_product(&product)
            })
        }
        Resource::Products(ProductCommand::Add(args)) => {
            let result = actions.add_product(args.into_input());
            finish(result, |product| {
                print_done("Created product", product.id.as_inner())
            })
        }
        Resource::Products(ProductCommand::Edit { id, fields }) => {
            let result = actions.update_product(&ProductId::new(id), fields.into_patch());
            finish(result, |product| print_product(&product))
        }
        Resource::Products(ProductCommand::Delete { id }) => {
            finish(actions.delete_product(&ProductId::new(id)), |deleted| {
                print_done("Deleted product", deleted.as_inner())
            })
        }
    }
}

/// Renders a successful action with `render`, or prints its error.
fn finish<T, F>(result: ActionResult<T>, render: F) -> io::Result<ExitCode>
where
    F: FnOnce(T) -> io::Result<()>,
{
    match result.into_result() {
        Ok(data) => {
            render(data)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            writeln!(io::stderr().lock(), "{} {message}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes `merchants list`.
fn cmd_list_merchants<B: BlockingBackend>(
    actions: &BlockingActions<B>,
    args: &ListArgs,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching merchants...");
    let result = actions.fetch_merchants();
    spinner.finish_and_clear();

    finish(result, |merchants| {
        let view = build_view(merchants, args);
        print_merchants_table(&view)
    })
}

/// Executes `products list`.
fn cmd_list_products<B: BlockingBackend>(
    actions: &BlockingActions<B>,
    args: &ListArgs,
    merchant: Option<&str>,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching merchant products...");
    let result = actions.fetch_products();
    spinner.finish_and_clear();

    finish(result, |mut products| {
        if let Some(merchant_id) = merchant {
            products.retain(|product| product.merchant_id.as_inner() == merchant_id);
        }
        let view = build_view(products, args);
        print_products_table(&view)
    })
}

/// Builds a list view positioned by the search and paging flags.
fn build_view<T: Searchable>(items: Vec<T>, args: &ListArgs) -> ListView<T> {
    let mut view = ListView::with_items(items).page_size(args.per_page);
    if let Some(query) = args.search.as_deref() {
        view.set_query(query);
    }
    view.set_page(args.page);
    view
}

/// Executes `serve`: runs the fallback server until interrupted.
#[cfg(feature = "server")]
fn cmd_serve(args: ServeArgs) -> io::Result<ExitCode> {
    use merchant_dashboard::server::{self, ServerConfig};

    let mut builder = ServerConfig::builder()
        .addr(args.addr)
        .cors(!args.no_cors)
        .seed_demo_data(args.seed);
    if let Some(upstream) = args.upstream {
        builder = builder.upstream(upstream);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(server::serve(builder.build())) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} server failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

impl AddMerchantArgs {
    /// Converts the flags into a create input.
    fn into_input(self) -> NewMerchant {
        NewMerchant {
            id: self.id.map(MerchantId::new),
            description: self.description,
            best_offer_amount: self.best_offer_amount,
            best_offer_type: self.best_offer_type,
            status: self.status,
            ..NewMerchant::new(self.name, self.logo_url, self.url)
        }
    }
}

impl EditMerchantArgs {
    /// Converts the flags into a patch.
    fn into_patch(self) -> MerchantPatch {
        MerchantPatch {
            name: self.name,
            logo_url: self.logo_url,
            url: self.url,
            description: self.description,
            best_offer_amount: self.best_offer_amount,
            best_offer_type: self.best_offer_type,
            status: self.status,
        }
    }
}

impl AddProductArgs {
    /// Converts the flags into a create input.
    fn into_input(self) -> NewProduct {
        NewProduct {
            id: self.id.map(ProductId::new),
            offer_amount: self.offer_amount,
            offer_type: self.offer_type,
            image_url: self.image_url,
            url: self.url,
            status: self.status,
            tags: self.tags,
            parameters: self.params.into_iter().collect(),
            ..NewProduct::new(
                MerchantId::new(self.merchant),
                self.name,
                self.description,
                self.price,
            )
        }
    }
}

impl EditProductArgs {
    /// Converts the flags into a patch.
    fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            offer_amount: self.offer_amount,
            offer_type: self.offer_type,
            image_url: self.image_url,
            url: self.url,
            status: self.status,
            tags: self.tags,
            parameters: self.params.map(|params| params.into_iter().collect()),
        }
    }
}

/// Prints a one-line confirmation.
fn print_done(label: &str, id: &str) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{} {}", label.green().bold(), id.bold())
}

/// Prints the "Showing X to Y of Z entries" footer with the page position.
fn print_window<W: io::Write, T: Searchable>(out: &mut W, view: &ListView<T>) -> io::Result<()> {
    let window = view.window();
    writeln!(
        out,
        "Showing {} to {} of {} entries {}",
        window.first,
        window.last,
        window.total,
        format_args!("(page {} of {})", view.page(), view.total_pages().max(1)).dimmed()
    )
}

/// Prints the current page of merchants in a table.
fn print_merchants_table(view: &ListView<Merchant>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let rows = view.page_items();
    if rows.is_empty() {
        writeln!(out, "{}", "No merchants found.".dimmed())?;
        return print_window(&mut out, view);
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("URL").fg(Color::Cyan),
        Cell::new("Best Offer").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Products").fg(Color::Cyan),
    ]);

    for merchant in rows {
        _ = table.add_row(vec![
            Cell::new(merchant.id.as_inner()),
            Cell::new(&merchant.name),
            Cell::new(&merchant.url),
            Cell::new(format_offer(&merchant.best_offer_amount, merchant.best_offer_type)),
            status_cell(merchant.status),
            Cell::new(merchant.products.len()),
        ]);
    }

    writeln!(out, "{}", "Merchants".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    print_window(&mut out, view)
}

/// Prints the current page of products in a table.
fn print_products_table(view: &ListView<Product>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let rows = view.page_items();
    if rows.is_empty() {
        writeln!(out, "{}", "No products found.".dimmed())?;
        return print_window(&mut out, view);
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Merchant").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Price").fg(Color::Cyan),
        Cell::new("Offer").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Tags").fg(Color::Cyan),
    ]);

    for product in rows {
        _ = table.add_row(vec![
            Cell::new(product.id.as_inner()),
            Cell::new(product.merchant_id.as_inner()),
            Cell::new(&product.name),
            Cell::new(format!("{:.2}", product.price)),
            Cell::new(format_offer(
                &format!("{}", product.offer_amount),
                product.offer_type,
            )),
            status_cell(product.status),
            Cell::new(product.tags.join(", ")),
        ]);
    }

    writeln!(out, "{}", "Merchant Products".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    print_window(&mut out, view)
}

/// Prints every field of a merchant.
fn print_merchant(merchant: &Merchant) -> io::Result<()> {
    let mut table = detail_table();
    _ = table.add_row(vec![Cell::new("Name"), Cell::new(&merchant.name)]);
    _ = table.add_row(vec![Cell::new("Logo URL"), Cell::new(&merchant.logo_url)]);
    _ = table.add_row(vec![Cell::new("URL"), Cell::new(&merchant.url)]);
    _ = table.add_row(vec![
        Cell::new("Description"),
        Cell::new(&merchant.description),
    ]);
    _ = table.add_row(vec![
        Cell::new("Best Offer"),
        Cell::new(format_offer(
            &merchant.best_offer_amount,
            merchant.best_offer_type,
        )),
    ]);
    _ = table.add_row(vec![Cell::new("Status"), status_cell(merchant.status)]);
    _ = table.add_row(vec![
        Cell::new("Products"),
        Cell::new(merchant.products.len()),
    ]);

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        "Merchant".green().bold(),
        merchant.id.as_inner().bold()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints every field of a product.
fn print_product(product: &Product) -> io::Result<()> {
    let mut table = detail_table();
    _ = table.add_row(vec![
        Cell::new("Merchant"),
        Cell::new(product.merchant_id.as_inner()),
    ]);
    _ = table.add_row(vec![Cell::new("Name"), Cell::new(&product.name)]);
    _ = table.add_row(vec![
        Cell::new("Description"),
        Cell::new(&product.description),
    ]);
    _ = table.add_row(vec![
        Cell::new("Price"),
        Cell::new(format!("{:.2}", product.price)),
    ]);
    _ = table.add_row(vec![
        Cell::new("Offer"),
        Cell::new(format_offer(
            &format!("{}", product.offer_amount),
            product.offer_type,
        )),
    ]);
    _ = table.add_row(vec![Cell::new("Image URL"), Cell::new(&product.image_url)]);
    _ = table.add_row(vec![Cell::new("URL"), Cell::new(&product.url)]);
    _ = table.add_row(vec![Cell::new("Status"), status_cell(product.status)]);
    _ = table.add_row(vec![
        Cell::new("Tags"),
        Cell::new(product.tags.join(", ")),
    ]);
    for (name, value) in &product.parameters {
        _ = table.add_row(vec![Cell::new(format!("  {name}")), Cell::new(value)]);
    }

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        "Product".green().bold(),
        product.id.as_inner().bold()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates an empty two-column field/value table.
fn detail_table() -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Field").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    table
}

/// Formats an offer as `10%` or `10`, or an em dash when unset.
fn format_offer(amount: &str, kind: OfferType) -> String {
    let trimmed = amount.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return "\u{2014}".to_owned();
    }
    match kind {
        OfferType::Percent => format!("{trimmed}%"),
        OfferType::Amount => trimmed.to_owned(),
    }
}

/// Colors a status cell.
fn status_cell(status: Status) -> Cell {
    match status {
        Status::Active => Cell::new(status).fg(Color::Green),
        Status::Inactive => Cell::new(status).fg(Color::DarkGrey),
    }
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

//! # Terminal Front End
//!
//! Line-oriented rendering of the three screens. Each input line is one
//! command; the output is the screen it leads to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [All Products]   Cart (3)                                             │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  The Complete Snowboard                                                 │
//! │  $699.95                                                                │
//! │  [Show Variants]                                                        │
//! │  >> Added to cart!  (entering, opacity 0.62)                            │
//! │                                                                         │
//! │  > add_                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removal confirmations take the next line as the answer (`y` confirms,
//! anything else cancels). An empty line re-renders the current screen,
//! which is how toast progress shows up.

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::cart::{
    self as cart_commands, CartResponse, QuantityOutcome, RemovalPrompt, EMPTY_CART_SUBTITLE,
    EMPTY_CART_TITLE,
};
use crate::commands::product::{self as product_commands, ProductDetailsView};
use crate::commands::{catalog as catalog_commands, config as config_commands};
use crate::error::{AppError, AppResult};
use crate::navigation::{cart_badge, Navigator, Route, Tab};
use crate::state::{CartState, CatalogState, ConfigState, ADDED_TO_CART};
use storefront_core::{ToastPhase, PRICE_UNAVAILABLE};

const HELP: &str = "\
Products tab:
  list                 product list
  open <n|id>          open a product
  variants             show / hide the variant grid
  select <n|id>        pick a variant
  add                  add the selected variant to the cart
  back                 back to the product list
Cart tab:
  cart                 show the cart
  inc <n> / dec <n>    step line n up or down
  qty <n> <text>       type a quantity for line n
  remove <n>           remove line n (asks first)
  clear                empty the cart
  checkout             check out
Other:
  tab <products|cart>  switch tab
  config               show configuration
  help                 this text
  quit                 exit";

// =============================================================================
// Command Parsing
// =============================================================================

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Open(String),
    Variants,
    Select(String),
    Add,
    Back,
    Cart,
    Increment(usize),
    Decrement(usize),
    Quantity(usize, String),
    Remove(usize),
    Clear,
    Checkout,
    SwitchTab(Tab),
    Config,
    Help,
    Quit,
}

fn line_number(arg: Option<&str>) -> Result<usize, AppError> {
    let arg = arg.ok_or_else(|| AppError::validation("Line number is required"))?;
    arg.parse::<usize>()
        .map_err(|_| AppError::validation(format!("Not a line number: {}", arg)))
}

fn required(arg: Option<&str>, what: &str) -> Result<String, AppError> {
    arg.map(str::to_string)
        .ok_or_else(|| AppError::validation(format!("{} is required", what)))
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let rest = parts.next().map(str::trim).filter(|r| !r.is_empty());

        match name.as_str() {
            "list" | "ls" => Ok(Command::List),
            "open" => Ok(Command::Open(required(rest, "Product number or id")?)),
            "variants" => Ok(Command::Variants),
            "select" => Ok(Command::Select(required(rest, "Variant number or id")?)),
            "add" => Ok(Command::Add),
            "back" => Ok(Command::Back),
            "cart" => Ok(Command::Cart),
            "inc" | "+" => Ok(Command::Increment(line_number(rest)?)),
            "dec" | "-" => Ok(Command::Decrement(line_number(rest)?)),
            "qty" => {
                let rest = required(rest, "Line number")?;
                let (line, text) = match rest.split_once(char::is_whitespace) {
                    Some((line, text)) => (line, text.trim()),
                    None => (rest.as_str(), ""),
                };
                Ok(Command::Quantity(line_number(Some(line))?, text.to_string()))
            }
            "remove" | "rm" => Ok(Command::Remove(line_number(rest)?)),
            "clear" => Ok(Command::Clear),
            "checkout" => Ok(Command::Checkout),
            "tab" => Ok(Command::SwitchTab(required(rest, "Tab")?.parse()?)),
            "config" => Ok(Command::Config),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(AppError::validation(format!(
                "Unknown command: '{}'. Type 'help' for a list",
                other
            ))),
        }
    }
}

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Shell
// =============================================================================

/// The screens, their state and an output sink.
pub struct Shell<W: Write> {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartState,
    nav: Navigator,
    pending_removal: Option<RemovalPrompt>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: ConfigState, catalog: CatalogState, cart: CartState, out: W) -> Self {
        Shell {
            config,
            catalog,
            cart,
            nav: Navigator::new(),
            pending_removal: None,
            out,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Consumes the shell, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Store name, then the product list.
    pub fn start(&mut self) -> AppResult<()> {
        writeln!(self.out, "{}", self.config.store_name)?;
        writeln!(self.out, "Type 'help' for commands.")?;
        self.render_current()
    }

    pub fn prompt(&mut self) -> AppResult<()> {
        if self.pending_removal.is_some() {
            write!(self.out, "[y/N] ")?;
        } else {
            write!(self.out, "> ")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Handles one input line. Command errors are printed, not returned.
    pub fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        if let Some(prompt) = self.pending_removal.take() {
            return self.answer_removal(&prompt, line).map(|_| Flow::Continue);
        }

        if line.trim().is_empty() {
            self.render_current()?;
            return Ok(Flow::Continue);
        }

        let result = line.parse::<Command>().and_then(|command| {
            debug!(?command, "terminal command");
            self.execute(command)
        });

        match result {
            Ok(flow) => Ok(flow),
            Err(err) => {
                writeln!(self.out, "error {}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> AppResult<Flow> {
        match command {
            Command::List => {
                self.nav.switch_tab(Tab::Collection);
                self.nav.pop_to_root();
                self.render_current()?;
            }
            Command::Open(arg) => {
                let view =
                    product_commands::open_product(&self.catalog, &self.config, &mut self.nav, &arg)?;
                self.render_details(&view)?;
            }
            Command::Variants => {
                let view = product_commands::toggle_variants(&self.catalog, &mut self.nav)?;
                self.render_details(&view)?;
            }
            Command::Select(arg) => {
                let response = product_commands::select_variant(&self.catalog, &mut self.nav, &arg)?;
                if !response.accepted {
                    writeln!(self.out, "That variant is not available.")?;
                }
                self.render_details(&response.view)?;
            }
            Command::Add => {
                let response = product_commands::add_to_cart(&self.catalog, &self.cart, &mut self.nav)?;
                if response.change.is_none() {
                    writeln!(self.out, "Nothing selected.")?;
                }
                self.render_current()?;
            }
            Command::Back => {
                product_commands::go_back(&mut self.nav)?;
                self.render_current()?;
            }
            Command::Cart => {
                self.nav.switch_tab(Tab::Cart);
                self.render_current()?;
            }
            Command::Increment(line) => {
                self.nav.switch_tab(Tab::Cart);
                let outcome = cart_commands::increment(&self.cart, line)?;
                self.quantity_outcome(outcome)?;
            }
            Command::Decrement(line) => {
                self.nav.switch_tab(Tab::Cart);
                let outcome = cart_commands::decrement(&self.cart, line)?;
                self.quantity_outcome(outcome)?;
            }
            Command::Quantity(line, text) => {
                self.nav.switch_tab(Tab::Cart);
                let outcome = cart_commands::set_quantity_text(&self.cart, line, &text)?;
                self.quantity_outcome(outcome)?;
            }
            Command::Remove(line) => {
                self.nav.switch_tab(Tab::Cart);
                let prompt = cart_commands::request_removal(&self.cart, line)?;
                self.ask_removal(prompt)?;
            }
            Command::Clear => {
                self.nav.switch_tab(Tab::Cart);
                let response = cart_commands::clear_cart(&self.cart);
                self.render_cart(&response)?;
            }
            Command::Checkout => {
                self.nav.switch_tab(Tab::Cart);
                let ack = cart_commands::checkout(&self.cart)?;
                writeln!(self.out, "{}", ack.title)?;
                writeln!(self.out, "{}", ack.message)?;
                writeln!(self.out, "({})", ack.acknowledged_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
            }
            Command::SwitchTab(tab) => {
                self.nav.switch_tab(tab);
                self.render_current()?;
            }
            Command::Config => {
                let rendered = config_commands::render_config(&self.config)?;
                write!(self.out, "{}", rendered)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Removal Confirmation
    // =========================================================================

    fn quantity_outcome(&mut self, outcome: QuantityOutcome) -> AppResult<()> {
        match outcome {
            QuantityOutcome::Updated(response) => self.render_cart(&response),
            QuantityOutcome::ConfirmRemoval(prompt) => self.ask_removal(prompt),
        }
    }

    fn ask_removal(&mut self, prompt: RemovalPrompt) -> AppResult<()> {
        writeln!(self.out, "{}", prompt.title)?;
        writeln!(self.out, "{} ({})", prompt.message, prompt.item_title)?;
        self.pending_removal = Some(prompt);
        Ok(())
    }

    fn answer_removal(&mut self, prompt: &RemovalPrompt, answer: &str) -> AppResult<()> {
        let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        debug!(variant_id = %prompt.variant_id, confirmed, "removal answered");

        let response = if confirmed {
            cart_commands::confirm_removal(&self.cart, prompt)
        } else {
            writeln!(self.out, "Cancelled.")?;
            cart_commands::get_cart(&self.cart)
        };
        self.render_cart(&response)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_current(&mut self) -> AppResult<()> {
        match self.nav.active_tab() {
            Tab::Cart => {
                let response = cart_commands::get_cart(&self.cart);
                self.render_cart(&response)
            }
            Tab::Collection => match self.nav.collection_route() {
                Route::ProductList => self.render_list(),
                Route::ProductDetails { .. } => {
                    let view = product_commands::get_product_details(&self.catalog, &self.nav)?;
                    self.render_details(&view)
                }
            },
        }
    }

    fn render_tabs(&mut self) -> AppResult<()> {
        let badge = cart_badge(self.cart.total_quantity())
            .map(|count| format!(" ({})", count))
            .unwrap_or_default();
        let (products, cart) = match self.nav.active_tab() {
            Tab::Collection => (format!("[{}]", Tab::Collection), format!("{}{}", Tab::Cart, badge)),
            Tab::Cart => (Tab::Collection.to_string(), format!("[{}{}]", Tab::Cart, badge)),
        };
        writeln!(self.out, "{}   {}", products, cart)?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        Ok(())
    }

    fn price(&self, display_price: &str) -> String {
        if display_price == PRICE_UNAVAILABLE {
            PRICE_UNAVAILABLE.to_string()
        } else {
            format!("{}{}", self.config.currency_symbol, display_price)
        }
    }

    fn render_list(&mut self) -> AppResult<()> {
        self.render_tabs()?;
        for (index, card) in catalog_commands::list_products(&self.catalog).iter().enumerate() {
            let price = self.price(&card.display_price);
            writeln!(self.out, "{:>2}. {}  {}", index + 1, card.title, price)?;
        }
        Ok(())
    }

    fn render_details(&mut self, view: &ProductDetailsView) -> AppResult<()> {
        self.render_tabs()?;
        writeln!(self.out, "{}", view.title)?;
        writeln!(self.out, "{}", self.price(&view.display_price))?;
        if !view.image_url.is_empty() {
            writeln!(self.out, "image: {}", view.image_url)?;
        }
        if !view.description.is_empty() {
            writeln!(self.out, "{}", view.description)?;
        }

        writeln!(self.out, "[{}]", view.grid_label)?;
        if view.grid_expanded {
            for (index, row) in view.variants.iter().enumerate() {
                let marker = if row.selected { '*' } else { ' ' };
                writeln!(self.out, " {} {}. {}", marker, index + 1, row.label)?;
            }
        }

        for frame in &view.toasts {
            let phase = match frame.phase {
                ToastPhase::Entering => "entering",
                ToastPhase::Visible => "visible",
                ToastPhase::Exiting => "exiting",
                ToastPhase::Removed => continue,
            };
            writeln!(
                self.out,
                ">> {}  ({}, opacity {:.2})",
                ADDED_TO_CART, phase, frame.opacity
            )?;
        }
        Ok(())
    }

    fn render_cart(&mut self, response: &CartResponse) -> AppResult<()> {
        self.render_tabs()?;
        if response.items.is_empty() {
            writeln!(self.out, "{}", EMPTY_CART_TITLE)?;
            writeln!(self.out, "{}", EMPTY_CART_SUBTITLE)?;
            writeln!(self.out, "[Checkout] (disabled)")?;
            return Ok(());
        }

        for (index, item) in response.items.iter().enumerate() {
            let line = cart_commands::format_line(&self.config, item);
            writeln!(
                self.out,
                "{:>2}. {} - {}  {}",
                index + 1,
                item.title,
                item.variant_title,
                line
            )?;
        }
        let total = self.config.format_currency(response.totals.total_price);
        writeln!(self.out, "Total: {}", total)?;
        writeln!(self.out, "[Checkout]")?;
        Ok(())
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(config: ConfigState, catalog: CatalogState, cart: CartState) -> AppResult<()> {
    let mut shell = Shell::new(config, catalog, cart, std::io::stdout());
    shell.start()?;
    shell.prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if shell.handle_line(&line)? == Flow::Quit {
            break;
        }
        shell.prompt()?;
    }
    Ok(())
}

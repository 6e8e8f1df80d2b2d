mod checkout;

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use storefront_core::config::ShopConfig;
use storefront_core::Catalog;

use crate::menu::MenuChoice;
use crate::render::Renderer;

const CHOICE_PROMPT: &str = "Enter your choice (1-4): ";
const PAUSE_PROMPT: &str = "Press Enter to continue...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub banner: bool,
    pub pause_after_action: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { banner: true, pause_after_action: true }
    }
}

impl From<&ShopConfig> for SessionOptions {
    fn from(shop: &ShopConfig) -> Self {
        Self { banner: shop.banner, pause_after_action: shop.pause_after_action }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    AwaitingInput,
    Dispatch(MenuChoice),
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub orders_placed: u32,
    pub orders_failed: u32,
    pub revenue: Decimal,
    pub ended_by: SessionEnd,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            orders_placed: 0,
            orders_failed: 0,
            revenue: Decimal::ZERO,
            ended_by: SessionEnd::EndOfInput,
        }
    }
}

/// Outcome of a step that reads input: keep going, or the input ran dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

/// Blocking menu loop over one reader and one writer.
pub struct Session<R, W> {
    catalog: Catalog,
    input: R,
    output: W,
    renderer: Renderer,
    options: SessionOptions,
    summary: SessionSummary,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(
        catalog: Catalog,
        input: R,
        output: W,
        renderer: Renderer,
        options: SessionOptions,
    ) -> Self {
        Self { catalog, input, output, renderer, options, summary: SessionSummary::default() }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.output)
    }

    pub fn run(&mut self) -> Result<SessionSummary> {
        tracing::info!(
            event_name = "shop.session.started",
            products = self.catalog.len(),
            "shopping session started"
        );

        let mut state = SessionState::Menu;
        loop {
            state = match state {
                SessionState::Menu => {
                    self.show_menu()?;
                    SessionState::AwaitingInput
                }
                SessionState::AwaitingInput => self.await_choice()?,
                SessionState::Dispatch(choice) => self.dispatch(choice)?,
                SessionState::Exit => break,
            };
        }

        tracing::info!(
            event_name = "shop.session.ended",
            orders_placed = self.summary.orders_placed,
            orders_failed = self.summary.orders_failed,
            revenue = %self.summary.revenue,
            ended_by = ?self.summary.ended_by,
            "shopping session ended"
        );
        Ok(self.summary.clone())
    }

    fn show_menu(&mut self) -> Result<()> {
        if self.options.banner {
            writeln!(self.output, "{}", self.renderer.banner())?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.renderer.notice("Please choose an option:"))?;
        for choice in MenuChoice::ALL {
            let number = self.renderer.accent(&format!("{}.", choice.number()));
            writeln!(self.output, "{number} {}", choice.label())?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn await_choice(&mut self) -> Result<SessionState> {
        let Some(line) = self.prompt(CHOICE_PROMPT)? else {
            return Ok(self.end_of_input());
        };

        match MenuChoice::parse(&line) {
            Some(choice) => Ok(SessionState::Dispatch(choice)),
            None => {
                tracing::debug!(event_name = "shop.menu.invalid_choice", input = %line);
                let message = "Invalid choice. Please enter a number between 1 and 4.";
                writeln!(self.output, "{}", self.renderer.notice(message))?;
                self.pause()
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<SessionState> {
        let flow = match choice {
            MenuChoice::ListProducts => {
                self.list_products()?;
                Flow::Continue
            }
            MenuChoice::ShowTotal => {
                self.show_total_quantity()?;
                Flow::Continue
            }
            MenuChoice::MakeOrder => self.checkout()?,
            MenuChoice::Quit => {
                self.farewell()?;
                self.summary.ended_by = SessionEnd::Quit;
                return Ok(SessionState::Exit);
            }
        };

        match flow {
            Flow::Continue => self.pause(),
            Flow::EndOfInput => Ok(self.end_of_input()),
        }
    }

    fn list_products(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.renderer.header("AVAILABLE PRODUCTS"))?;

        let products = self.catalog.list();
        if products.is_empty() {
            writeln!(self.output, "{}", self.renderer.notice("No active products available!"))?;
            return Ok(());
        }

        writeln!(self.output, "{}", self.renderer.product_lines(&products))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn show_total_quantity(&mut self) -> Result<()> {
        let total = self.catalog.total_quantity();
        writeln!(self.output, "{}", self.renderer.header("INVENTORY STATUS"))?;
        writeln!(
            self.output,
            "{} {}",
            self.renderer.notice("Total number of items in store:"),
            self.renderer.accent(&total.to_string())
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.renderer.header("THANK YOU FOR SHOPPING WITH US"))?;
        writeln!(self.output, "{}", self.renderer.notice("Goodbye!"))?;
        Ok(())
    }

    fn pause(&mut self) -> Result<SessionState> {
        if !self.options.pause_after_action {
            return Ok(SessionState::Menu);
        }

        writeln!(self.output)?;
        match self.prompt(PAUSE_PROMPT)? {
            Some(_) => Ok(SessionState::Menu),
            None => Ok(self.end_of_input()),
        }
    }

    fn end_of_input(&mut self) -> SessionState {
        self.summary.ended_by = SessionEnd::EndOfInput;
        SessionState::Exit
    }

    /// Writes `text` without a newline and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", self.renderer.notice(text))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

//! Rendering of operation results, and the confirmation prompt.

use serde::Serialize;
use std::io::{self, BufRead, Write};

use lumina_core::{
    Cart, CartChange, CartOutcome, CartResult, CartSnapshot, CheckoutStatus, Notice,
};

/// Everything one invocation reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub outcome: CartOutcome,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<bool>,

    pub cart: CartSnapshot,

    #[serde(skip)]
    pub view: View,
}

/// Which part of the cart the text output shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Notice only.
    #[default]
    Notice,
    /// Every line item and the totals.
    Items,
    /// Item count and total price.
    Totals,
    /// `true` / `false`.
    Contains,
}

impl Report {
    /// A read-only projection.
    pub fn view(cart: &Cart, view: View) -> Self {
        Report {
            outcome: CartOutcome::success(),
            notice: None,
            contains: None,
            cart: cart.snapshot(),
            view,
        }
    }

    /// Result of a mutation.
    pub fn change(result: &CartResult<CartChange>, cart: &Cart) -> Self {
        Report {
            outcome: CartOutcome::from(result),
            notice: Some(Notice::for_result(result)),
            contains: None,
            cart: cart.snapshot(),
            view: View::Notice,
        }
    }

    /// Result of a checkout request.
    pub fn checkout(result: &CartResult<CheckoutStatus>, cart: &Cart) -> Self {
        Report {
            outcome: CartOutcome::from(result),
            notice: Some(Notice::for_checkout(result)),
            contains: None,
            cart: cart.snapshot(),
            view: View::Notice,
        }
    }

    /// Writes the report as text or JSON.
    pub fn write_to(&self, out: &mut impl Write, json: bool) -> io::Result<()> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)?;
            return writeln!(out);
        }

        if let Some(notice) = &self.notice {
            writeln!(out, "{}", notice.message)?;
        }

        match self.view {
            View::Notice => {}
            View::Items => {
                if self.cart.items.is_empty() {
                    writeln!(out, "Giỏ hàng trống")?;
                }
                for item in &self.cart.items {
                    writeln!(
                        out,
                        "{}\t{}\tx{}\t{}",
                        item.id,
                        item.name,
                        item.quantity,
                        item.line_total()
                    )?;
                }
                self.write_totals(out)?;
            }
            View::Totals => self.write_totals(out)?,
            View::Contains => writeln!(out, "{}", self.contains.unwrap_or(false))?,
        }

        Ok(())
    }

    fn write_totals(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "Tổng cộng: {} sản phẩm, {}",
            self.cart.item_count, self.cart.total_display
        )
    }
}

/// Asks `prompt` on `output` and reads a yes/no answer from `input`.
///
/// Anything but an explicit yes (`y`, `yes`, `c`, `có`) declines, EOF included.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "c" | "có"
    ))
}

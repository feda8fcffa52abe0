//! Print price table.

use std::io::Write;

use gallery_core::price_table;
use gallery_storefront::StorefrontState;

use super::stdout;

/// Print every size and type with its dimensions and price.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn show(state: &StorefrontState) -> std::io::Result<()> {
    let mut out = stdout();
    writeln!(out, "{:<6} {:<16} {:<18} {:>8}", "Size", "Dimensions", "Type", "Price")?;
    for row in price_table() {
        writeln!(
            out,
            "{:<6} {:<16} {:<18} {:>8}",
            row.size.display_name(),
            row.size.dimensions(),
            row.print_type.display_name(),
            state.format_price(row.price),
        )?;
    }
    Ok(())
}

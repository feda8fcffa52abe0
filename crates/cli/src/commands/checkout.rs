//! Checkout payload output.

use std::io::Write;

use gallery_storefront::StorefrontState;

use super::stdout;

/// Write the checkout payload for the current cart as pretty JSON.
///
/// # Errors
///
/// Returns an error if the cart is empty, a price has no minor-unit
/// representation, or stdout cannot be written.
pub fn show(state: &StorefrontState) -> Result<(), Box<dyn std::error::Error>> {
    let payload = state.checkout_payload()?;
    let json = serde_json::to_string_pretty(&payload)?;
    writeln!(stdout(), "{json}")?;
    Ok(())
}

//! Plain-text rendering of the quote table.
use dashboard_common::model::Quote;

/// Render quotes as an aligned table, one row per ticker in the order given.
pub fn render_table(account_id: &str, quotes: &[Quote]) -> String {
    let mut out = format!(
        "account {}\n{:<8} {:>10} {:>8}  {}\n",
        account_id, "TICKER", "PRICE", "CHANGE", "UPDATED"
    );
    for quote in quotes {
        out.push_str(&format!(
            "{:<8} {:>10.2} {:>+8.2}  {}\n",
            quote.ticker,
            quote.price,
            quote.change,
            quote.updated_at.format("%H:%M:%S")
        ));
    }
    out
}

//! Basket rendering

use checkout::basket::{Basket, TotalCost};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Render `basket` as a table followed by its total.
pub(crate) fn basket(basket: &Basket, currency: Option<&'static Currency>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Quantity"]);

    for (identity, quantity) in basket.items().sorted() {
        builder.push_record([identity.to_string(), quantity.to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    format!(
        "Client {}\n{table}\nTotal: {}",
        basket.client(),
        total(basket.total_cost(), currency)
    )
}

fn total(total: Option<TotalCost>, currency: Option<&'static Currency>) -> String {
    let Some(total) = total else {
        return "pending".to_string();
    };

    match (currency, i64::try_from(total.to_minor())) {
        (Some(currency), Ok(minor)) => Money::from_minor(minor, currency).to_string(),
        _ => total.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use checkout::basket::{BasketItems, ClientId};
    use rusty_money::iso::GBP;

    use super::*;

    #[test]
    fn total_formats_with_currency() {
        let basket = Basket::new(ClientId::new(1));

        assert_eq!(total(basket.total_cost(), Some(GBP)), "£0.00");
        assert_eq!(total(basket.total_cost(), None), "0");
    }

    #[test]
    fn basket_lists_items_in_order() {
        let basket = Basket::unpriced(
            ClientId::new(3),
            BasketItems::from([("Milk", 2), ("Apple", 5)]),
        );

        let rendered = super::basket(&basket, Some(GBP));

        let apple = rendered.find("Apple");
        let milk = rendered.find("Milk");

        assert!(rendered.starts_with("Client 3"), "missing header: {rendered}");
        assert!(apple < milk, "items should be sorted: {rendered}");
        assert!(rendered.ends_with("Total: pending"), "missing total: {rendered}");
    }
}

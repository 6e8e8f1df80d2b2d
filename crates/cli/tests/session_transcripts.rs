use std::io::Cursor;

use rust_decimal::Decimal;
use storefront_cli::render::Renderer;
use storefront_cli::session::{Session, SessionEnd, SessionOptions, SessionSummary};
use storefront_core::store::default_catalog;
use storefront_core::{Catalog, Product, ProductId};

fn quiet() -> SessionOptions {
    SessionOptions { banner: false, pause_after_action: false }
}

fn widget_catalog() -> Catalog {
    Catalog::new(vec![Product::new("widget", "Widget", Decimal::new(5, 0), 10).expect("valid")])
        .expect("unique ids")
}

fn shop_catalog() -> Catalog {
    default_catalog().expect("built-in catalog is valid")
}

fn run_session(
    catalog: Catalog,
    script: &str,
    options: SessionOptions,
) -> (SessionSummary, Catalog, String) {
    let mut session = Session::new(
        catalog,
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        Renderer::plain(),
        options,
    );
    let summary = session.run().expect("in-memory io does not fail");
    let (catalog, output) = session.into_parts();
    (summary, catalog, String::from_utf8(output).expect("output is utf-8"))
}

fn quantity_of(catalog: &Catalog, id: &str) -> Option<u32> {
    catalog.find(&ProductId(id.to_string())).map(Product::quantity)
}

#[test]
fn quit_says_goodbye_and_ends_session() {
    let (summary, _, output) = run_session(shop_catalog(), "4\n", quiet());

    assert_eq!(summary.ended_by, SessionEnd::Quit);
    assert!(output.contains("THANK YOU FOR SHOPPING WITH US"));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn menu_lists_the_four_options() {
    let (_, _, output) = run_session(shop_catalog(), "4\n", quiet());

    assert!(output.contains("Please choose an option:"));
    assert!(output.contains("1. List all products in store"));
    assert!(output.contains("2. Show total amount in store"));
    assert!(output.contains("3. Make an order"));
    assert!(output.contains("4. Quit"));
    assert!(output.contains("Enter your choice (1-4): "));
}

#[test]
fn listing_shows_active_products_in_order() {
    let (_, _, output) = run_session(shop_catalog(), "1\n4\n", quiet());

    assert!(output.contains("AVAILABLE PRODUCTS"));
    assert!(output.contains(
        "1. MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!"
    ));
    assert!(output.contains(
        "4. Windows License, Price: $125.00, non-physical product - Not Stocked, Promotion: 30% off!"
    ));
    assert!(output.contains("5. Shipping, Price: $10.00, Quantity: 250, Max Purchase: 1"));
}

#[test]
fn total_reports_sum_of_quantities() {
    let (_, catalog, output) = run_session(shop_catalog(), "2\n4\n", quiet());

    assert!(output.contains("INVENTORY STATUS"));
    assert!(output.contains("Total number of items in store: 1100"));
    assert_eq!(catalog.total_quantity(), 1_100);
}

#[test]
fn invalid_choices_are_reported_and_reprompted() {
    let (summary, _, output) = run_session(shop_catalog(), "9\nabc\n\n4\n", quiet());

    let complaints =
        output.matches("Invalid choice. Please enter a number between 1 and 4.").count();
    assert_eq!(complaints, 3);
    assert_eq!(summary.ended_by, SessionEnd::Quit);
}

#[test]
fn end_of_input_ends_session_without_goodbye() {
    let (summary, _, output) = run_session(shop_catalog(), "", quiet());

    assert_eq!(summary.ended_by, SessionEnd::EndOfInput);
    assert!(!output.contains("Goodbye!"));
}

#[test]
fn ordering_within_stock_charges_and_decrements() {
    let (summary, catalog, output) = run_session(widget_catalog(), "3\n1\n3\n0\n2\n4\n", quiet());

    assert!(output.contains("NEW ORDER"));
    assert!(output.contains("Enter quantity for Widget (Available: 10): "));
    assert!(output.contains("Added 3 x Widget to your order."));
    assert!(output.contains("ORDER SUMMARY"));
    assert!(output.contains("Order completed! Total price: $15.00"));
    assert!(output.contains("Total number of items in store: 7"));

    assert_eq!(quantity_of(&catalog, "widget"), Some(7));
    assert_eq!(summary.orders_placed, 1);
    assert_eq!(summary.revenue, Decimal::new(15, 0));
}

#[test]
fn ordering_beyond_stock_is_refused_and_stock_is_kept() {
    let (summary, catalog, output) = run_session(widget_catalog(), "3\n1\n20\n", quiet());

    assert!(output.contains("Not enough stock for 'Widget'. Available: 10. Please try again."));
    assert_eq!(quantity_of(&catalog, "widget"), Some(10));
    assert_eq!(summary.orders_placed, 0);
    assert_eq!(summary.ended_by, SessionEnd::EndOfInput);
}

#[test]
fn refused_quantity_can_be_corrected() {
    let (_, catalog, output) = run_session(widget_catalog(), "3\n1\n20\n3\n0\n4\n", quiet());

    assert!(output.contains("Not enough stock for 'Widget'. Available: 10. Please try again."));
    assert!(output.contains("Order completed! Total price: $15.00"));
    assert_eq!(quantity_of(&catalog, "widget"), Some(7));
}

#[test]
fn product_selection_rejects_bad_input() {
    let (summary, _, output) = run_session(widget_catalog(), "3\nfoo\n9\n0\n4\n", quiet());

    assert!(output.contains("Invalid input. Please enter a number for the product."));
    assert!(output.contains("Invalid product number. Please try again."));
    assert!(output.contains("Order cancelled or empty."));
    assert_eq!(summary.orders_placed, 0);
}

#[test]
fn quantity_must_be_a_positive_number() {
    let (_, catalog, output) =
        run_session(widget_catalog(), "3\n1\n0\n-2\nlots\n2\n0\n4\n", quiet());

    assert_eq!(output.matches("Quantity must be a positive number. Please try again.").count(), 2);
    assert_eq!(output.matches("Invalid input for quantity. Please enter a number.").count(), 1);
    assert!(output.contains("Order completed! Total price: $10.00"));
    assert_eq!(quantity_of(&catalog, "widget"), Some(8));
}

#[test]
fn shipping_is_limited_to_one_per_order() {
    let (_, catalog, output) = run_session(shop_catalog(), "3\n5\n1\n5\n0\n4\n", quiet());

    assert!(output.contains(
        "Warning: 'Shipping' is limited to one per order and is already in your cart. \
         Please choose another product."
    ));
    assert!(output.contains("Order completed! Total price: $10.00"));
    assert_eq!(quantity_of(&catalog, "shipping"), Some(249));
}

#[test]
fn limited_quantity_above_maximum_is_refused() {
    let (_, _, output) = run_session(shop_catalog(), "3\n5\n2\n1\n0\n4\n", quiet());

    assert!(output
        .contains("Error: Cannot order more than 1 of 'Shipping' at a time. Please try again."));
    assert!(output.contains("Added 1 x Shipping to your order."));
}

#[test]
fn non_stocked_prompt_has_no_availability() {
    let (_, catalog, output) = run_session(shop_catalog(), "3\n4\n3\n0\n4\n", quiet());

    assert!(output.contains("Enter quantity for Windows License: "));
    assert!(output.contains("Order completed! Total price: $262.50"));
    assert_eq!(quantity_of(&catalog, "windows-license"), Some(0));
}

#[test]
fn promotions_show_on_the_receipt() {
    let (summary, catalog, output) =
        run_session(shop_catalog(), "3\n1\n2\n4\n1\n5\n1\n0\n4\n", quiet());

    assert!(output.contains("2 x MacBook Air M2: $2175.00 (Second Half price! saved $725.00)"));
    assert!(output.contains("1 x Windows License: $87.50 (30% off! saved $37.50)"));
    assert!(output.contains("1 x Shipping: $10.00"));
    assert!(output.contains("Order completed! Total price: $2272.50"));

    assert_eq!(summary.revenue, Decimal::new(227_250, 2));
    assert_eq!(quantity_of(&catalog, "macbook-air-m2"), Some(98));
    assert_eq!(catalog.total_quantity(), 1_097);
}

#[test]
fn cart_counts_against_remaining_stock() {
    let script = "3\n1\n6\n1\n5\n4\n1\n0\n1\n4\n";
    let (summary, catalog, output) = run_session(widget_catalog(), script, quiet());

    assert!(output.contains("Enter quantity for Widget (Available: 4): "));
    assert!(output.contains("Not enough stock for 'Widget'. Available: 4. Please try again."));
    assert!(output.contains(
        "No more 'Widget' can be added to this order. Please choose another product."
    ));
    assert!(output.contains("Order completed! Total price: $50.00"));
    assert!(output.contains("No active products available!"));

    assert_eq!(quantity_of(&catalog, "widget"), Some(0));
    assert_eq!(summary.orders_placed, 1);
}

#[test]
fn cart_refuses_quantities_it_cannot_hold() {
    let script = "3\n4\n4294967290\n4\n10\n5\n4\n0\n4\n";
    let (summary, _, output) = run_session(shop_catalog(), script, quiet());

    assert!(output.contains("Added 4294967290 x Windows License to your order."));
    assert!(output
        .contains("Cannot add 10 more of 'Windows License' to this order. Please try again."));
    assert!(output.contains("Added 5 x Windows License to your order."));
    assert!(output.contains(
        "No more 'Windows License' can be added to this order. Please choose another product."
    ));
    assert!(output.contains("4294967295 x Windows License: $375809638312.50"));
    assert_eq!(summary.revenue, Decimal::new(37_580_963_831_250, 2));
}

#[test]
fn order_too_expensive_to_price_is_cancelled() {
    let price = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
    let catalog = Catalog::new(vec![Product::new("pricey", "Pricey", price, 10).expect("valid")])
        .expect("unique ids");

    let (summary, catalog, output) = run_session(catalog, "3\n1\n2\n0\n4\n", quiet());

    assert!(output.contains(
        "Error during order processing: The price of 'Pricey' is too large for that quantity. \
         Order cancelled."
    ));
    assert_eq!(quantity_of(&catalog, "pricey"), Some(10));
    assert_eq!(summary.orders_placed, 0);
    assert_eq!(summary.orders_failed, 1);
}

#[test]
fn sold_out_store_has_nothing_to_order() {
    let mut catalog = widget_catalog();
    catalog.order(&ProductId("widget".to_string()), 10).expect("whole stock");

    let (summary, _, output) = run_session(catalog, "3\n4\n", quiet());

    assert!(output.contains("No products available to order!"));
    assert_eq!(summary.orders_placed, 0);
}

#[test]
fn end_of_input_mid_order_leaves_stock_untouched() {
    let (summary, catalog, _) = run_session(widget_catalog(), "3\n1\n4\n", quiet());

    assert_eq!(summary.ended_by, SessionEnd::EndOfInput);
    assert_eq!(summary.orders_placed, 0);
    assert_eq!(quantity_of(&catalog, "widget"), Some(10));
}

#[test]
fn pause_waits_for_enter_between_actions() {
    let options = SessionOptions { banner: false, pause_after_action: true };

    let (summary, _, output) = run_session(shop_catalog(), "2\n\n4\n", options);
    assert!(output.contains("Press Enter to continue..."));
    assert_eq!(summary.ended_by, SessionEnd::Quit);

    let (summary, _, _) = run_session(shop_catalog(), "2\n", options);
    assert_eq!(summary.ended_by, SessionEnd::EndOfInput);
}

#[test]
fn banner_is_printed_with_each_menu_when_enabled() {
    let options = SessionOptions { banner: true, pause_after_action: false };
    let (_, _, with_banner) = run_session(shop_catalog(), "2\n4\n", options);
    let (_, _, without_banner) = run_session(shop_catalog(), "2\n4\n", quiet());

    let banner_line = Renderer::plain().banner();
    let first_line = banner_line.lines().next().expect("banner has lines");
    assert_eq!(with_banner.matches(first_line).count(), 2);
    assert!(!without_banner.contains(first_line));
}

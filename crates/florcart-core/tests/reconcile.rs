//! End-to-end reconciliation over raw page text.

use florcart_core::{
    CartReconciler, CartSnapshot, ExpectedLineItem, LineItemText, RawCart,
    ReconciliationMismatch, parse_money,
};
use rust_decimal_macros::dec;

fn category_cards() -> Vec<LineItemText> {
    vec![
        LineItemText::new("Rose Bundle", "$12.00"),
        LineItemText::new("Tulip Set", "$8.50"),
    ]
}

fn cart_page(subtotal: &str) -> RawCart {
    RawCart {
        rows: vec![
            LineItemText::new("Rose Bundle - 12 stems", "$12.00"),
            LineItemText::new("TULIP SET", "$8.50"),
        ],
        subtotal: Some(subtotal.to_string()),
        row_subtotals: vec!["$12.00".into(), "$8.50".into()],
        empty_state_visible: false,
    }
}

#[test]
fn two_products_reconcile_against_cart() {
    let reconciler = CartReconciler::default();
    let cards = category_cards();
    let snapshot = CartSnapshot::from_raw(&cart_page("$20.50")).expect("cart parses");

    assert_eq!(reconciler.items_count(&snapshot), 2);
    for card in &cards {
        let price = parse_money(&card.price).expect("card price parses");
        assert!(
            reconciler.contains_product(&snapshot, &card.name, price),
            "{} should be in the cart",
            card.name
        );
    }

    let expected = reconciler
        .compute_expected_subtotal(&cards)
        .expect("prices parse");
    assert_eq!(expected.as_decimal(), dec!(20.50));
    assert!(reconciler.subtotal_matches(expected, snapshot.subtotal));
    assert!(!reconciler.is_empty(&snapshot));
}

#[test]
fn full_reconciliation_report_matches() {
    let reconciler = CartReconciler::default();
    let expected: Vec<ExpectedLineItem> = category_cards()
        .iter()
        .map(ExpectedLineItem::parse)
        .collect::<Result<_, _>>()
        .expect("cards parse");
    let snapshot = CartSnapshot::from_raw(&cart_page("$20.50")).expect("cart parses");

    let report = reconciler.reconcile(&expected, &snapshot);

    assert!(report.is_match(), "unexpected mismatches: {:?}", report.mismatches);
    assert_eq!(report.items_count, 2);
    assert_eq!(report.expected_subtotal, report.observed_subtotal);
}

#[test]
fn small_subtotal_drift_is_tolerated() {
    let reconciler = CartReconciler::default();
    let expected = reconciler
        .compute_expected_subtotal(&category_cards())
        .expect("prices parse");

    for shown in ["$20.99", "$20.01"] {
        let rounded = CartSnapshot::from_raw(&cart_page(shown)).expect("cart parses");
        assert!(reconciler.subtotal_matches(expected, rounded.subtotal), "{shown}");
    }

    // exactly half a unit away is already too far
    let half_off = CartSnapshot::from_raw(&cart_page("$21")).expect("cart parses");
    assert!(!reconciler.subtotal_matches(expected, half_off.subtotal));

    let with_shipping = CartSnapshot::from_raw(&cart_page("$25.50")).expect("cart parses");
    assert!(!reconciler.subtotal_matches(expected, with_shipping.subtotal));
}

#[test]
fn subtotal_with_fees_is_reported_not_raised() {
    let reconciler = CartReconciler::default();
    let expected: Vec<ExpectedLineItem> = category_cards()
        .iter()
        .map(ExpectedLineItem::parse)
        .collect::<Result<_, _>>()
        .expect("cards parse");
    let snapshot = CartSnapshot::from_raw(&cart_page("$25.50")).expect("cart parses");

    let report = reconciler.reconcile(&expected, &snapshot);

    assert!(matches!(
        report.mismatches.as_slice(),
        [ReconciliationMismatch::Subtotal { .. }]
    ));
}

#[test]
fn peso_storefront_prices() {
    let reconciler = CartReconciler::default();
    let cards = vec![
        LineItemText::new("Ramo de Rosas Rojas", "$ 89.900"),
        LineItemText::new("Caja Amor Eterno", "$ 120.000"),
    ];
    let raw = RawCart {
        rows: vec![
            LineItemText::new("Ramo de rosas rojas", "$89.900"),
            LineItemText::new("Caja amor eterno", "$120.000"),
        ],
        subtotal: Some("Subtotal $209.900".into()),
        row_subtotals: vec![],
        empty_state_visible: false,
    };
    let snapshot = CartSnapshot::from_raw(&raw).expect("cart parses");

    let expected = reconciler.compute_expected_subtotal(&cards).expect("prices parse");
    assert_eq!(expected.as_decimal(), dec!(209900));
    assert!(reconciler.subtotal_matches(expected, snapshot.subtotal));
    assert!(reconciler.contains_product(&snapshot, "ramo de rosas", parse_money("89900").unwrap()));
}

#[test]
fn cart_after_removing_last_item_is_empty() {
    let reconciler = CartReconciler::default();
    let raw = RawCart {
        subtotal: None,
        empty_state_visible: true,
        ..RawCart::default()
    };

    let snapshot = CartSnapshot::from_raw(&raw).expect("empty cart parses");
    assert_eq!(reconciler.items_count(&snapshot), 0);
    assert!(reconciler.is_empty(&snapshot));
}

#[test]
fn raw_cart_deserializes_from_page_json() {
    let json = r#"{
        "rows": [{"name": "Rosa", "price": "$10.000"}],
        "subtotal": "$10.000",
        "row_subtotals": ["$10.000"],
        "empty_state_visible": false
    }"#;

    let raw: RawCart = serde_json::from_str(json).expect("valid cart json");
    let snapshot = CartSnapshot::from_raw(&raw).expect("cart parses");
    assert_eq!(snapshot.subtotal.as_decimal(), dec!(10000));

    let sparse: RawCart = serde_json::from_str("{}").expect("defaults apply");
    assert_eq!(sparse, RawCart::default());
}

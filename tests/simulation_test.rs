//! End-to-end simulation runs through the library API

use std::sync::atomic::AtomicBool;

use store_sim::domain::{OutputData, RunError, SimulationInput, ValidationError};
use store_sim::domain::types::{CheckoutId, CustomerTypeId, EntityKind, ProductId};
use store_sim::infra::Summary;
use store_sim::io::{Egress, EgressTarget, InputSource};
use store_sim::services::{Engine, EngineSettings, Scenario};
use tempfile::tempdir;

const ONE_PRODUCT: &str = r#"{
    "days": 1,
    "customersPerHour": 10,
    "products": [{"id": 1, "name": "widget", "price": 100}],
    "customerTypes": [
        {"id": 1, "name": "regular", "frequency": 1.0, "impulsivity": 0.0, "patience": 100,
         "interests": {"1": 1.0}}
    ],
    "checkouts": [{"id": 1, "capacity": 10, "humanCost": 10, "technicalCost": 5}]
}"#;

const GROCERY: &str = r#"{
    "days": 3,
    "CustomersPerHour": 45,
    "categories": [{"id": 1, "name": "dairy"}, {"id": 2, "name": "bakery"}],
    "products": [
        {"id": 10, "name": "milk", "price": 25, "categoryID": 1},
        {"id": 11, "name": "yoghurt", "price": 35, "categoryID": 1},
        {"id": 20, "name": "bread", "price": 40, "categoryID": 2},
        {"id": 30, "name": "batteries", "price": 120}
    ],
    "customers": [
        {"id": 1, "name": "student", "frequency": 0.25, "impulsivity": 0.5, "patience": 3,
         "interests": {"30": 0.1}, "categoryInterests": {"1": 0.6, "2": 0.3}},
        {"id": 2, "name": "family", "frequency": 0.5, "impulsivity": 0.2, "patience": 25,
         "interests": {"10": 0.9, "11": 0.7, "20": 0.8, "30": 0.2}},
        {"id": 3, "name": "retiree", "frequency": 0.25, "impulsivity": 0.05, "patience": 60,
         "interests": {"30": 0.0}, "categoryInterests": {"1": 0.4, "2": 0.9}}
    ],
    "checkouts": [
        {"id": 1, "capacity": 20, "humanCost": 20, "technicalCost": 4},
        {"id": 2, "capacity": 40, "humanCost": 1, "technicalCost": 9}
    ],
    "calendar": {"deviations": {"2": {"30": 1.0}}}
}"#;

fn scenario(json: &str) -> Result<Scenario, ValidationError> {
    Scenario::from_input(&SimulationInput::from_json(json).unwrap())
}

fn run(json: &str, seed: u64) -> OutputData {
    Engine::new(scenario(json).unwrap(), EngineSettings::with_seed(seed)).run()
}

#[test]
fn test_one_product_store() {
    let output = run(ONE_PRODUCT, 17);

    assert_eq!(output.op_costs, 120);
    assert_eq!(output.reneged, 0);
    assert_eq!(output.profits, 100 * output.products_purchased);
    assert_eq!(output.transactions + output.remaining_at_close, output.times_visited);
    assert!(output.times_visited > 0);

    let lane = &output.checkout_output[&CheckoutId(1)];
    assert_eq!(lane.human_cost, 80);
    assert_eq!(lane.technical_cost, 40);
    assert_eq!(lane.transactions, output.transactions);

    let regular = &output.customer_type_output[&CustomerTypeId(1)];
    assert_eq!(regular.visits, output.times_visited);
    assert_eq!(regular.total_profit, output.profits);
}

#[test]
fn test_grocery_accounting() {
    let output = run(GROCERY, 2024);

    assert_eq!(output.transactions + output.reneged + output.remaining_at_close, output.times_visited);
    assert_eq!(output.simulated_minutes, 3 * 8 * 60);
    assert_eq!(output.op_costs, (20 + 4 + 1 + 9) * 8 * 3);

    let sold: u64 = output.product_output.values().map(|p| p.amount_sold).sum();
    assert_eq!(sold, output.products_purchased);
    let revenue: u64 = output.product_output.values().map(|p| p.amount_sold * p.price).sum();
    assert_eq!(revenue, output.profits);

    for product in output.product_output.values() {
        assert_eq!(product.amount_sold, product.sold_by_shopping_list + product.sold_by_impulse);
    }

    let reneged_by_type: u64 = output.customer_type_output.values().map(|t| t.reneged).sum();
    assert_eq!(reneged_by_type, output.reneged);
    let reneged_by_lane: u64 = output.checkout_output.values().map(|c| c.reneged).sum();
    assert_eq!(reneged_by_lane, output.reneged);

    let ids: Vec<ProductId> = output.product_output.keys().copied().collect();
    assert_eq!(ids, vec![ProductId(10), ProductId(11), ProductId(20), ProductId(30)]);
}

#[test]
fn test_calendar_can_switch_demand_off() {
    let json = ONE_PRODUCT.replace(
        "\"checkouts\"",
        "\"calendar\": {\"deviations\": {\"0\": {\"1\": 0.0}}},\n    \"checkouts\"",
    );
    let output = run(&json, 3);

    assert!(output.times_visited > 0);
    assert_eq!(output.products_purchased, 0);
    assert_eq!(output.profits, 0);
    assert_eq!(output.transactions + output.remaining_at_close, output.times_visited);
}

#[test]
fn test_same_seed_writes_identical_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    Egress::new(EgressTarget::File(first.clone()), true).write_output(&run(GROCERY, 99)).unwrap();
    Egress::new(EgressTarget::File(second.clone()), true).write_output(&run(GROCERY, 99)).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_file_input_round_trip() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.json");
    std::fs::write(&input_path, GROCERY).unwrap();
    let output_path = dir.path().join("out").join("output.json");

    let input = InputSource::File(input_path).load().unwrap();
    let output = Engine::new(Scenario::from_input(&input).unwrap(), EngineSettings::with_seed(5)).run();
    Egress::new(EgressTarget::File(output_path.clone()), false).write_output(&output).unwrap();

    let written = OutputData::from_json(std::fs::read_to_string(&output_path).unwrap().trim()).unwrap();
    assert_eq!(written, output);

    let summary = Summary::from_output(&written);
    assert_eq!(summary.lanes.len(), 2);
    assert_eq!(summary.net_result, output.profits as i64 - output.op_costs as i64);
}

#[test]
fn test_cancelled_run_has_no_result() {
    let stop = AtomicBool::new(true);
    let result = Engine::new(scenario(GROCERY).unwrap(), EngineSettings::with_seed(1)).run_until(&stop);
    assert_eq!(result.unwrap_err(), RunError::Cancelled { day: 0, minute: 0 });
}

#[test]
fn test_frequencies_must_sum_to_one() {
    let json = GROCERY.replace("\"frequency\": 0.5", "\"frequency\": 0.4");
    assert!(matches!(scenario(&json), Err(ValidationError::FrequencySum { .. })));
}

#[test]
fn test_uncovered_product_is_rejected() {
    let json = GROCERY.replace("\"interests\": {\"30\": 0.0}, ", "");
    assert_eq!(
        scenario(&json).unwrap_err(),
        ValidationError::MissingInterest { customer_type: "retiree".to_string(), product: 30 }
    );
}

#[test]
fn test_duplicate_product_is_rejected() {
    let json = GROCERY.replace("{\"id\": 11, \"name\": \"yoghurt\"", "{\"id\": 10, \"name\": \"yoghurt\"");
    assert_eq!(
        scenario(&json).unwrap_err(),
        ValidationError::DuplicateId { kind: EntityKind::Product, id: 10 }
    );
}

#[test]
fn test_undeclared_category_is_rejected() {
    let json = GROCERY.replace("\"categoryID\": 2", "\"categoryID\": 7");
    assert_eq!(scenario(&json).unwrap_err(), ValidationError::UnknownCategory { product: 20, category: 7 });
}

#[test]
fn test_patience_above_limit_is_rejected() {
    let json = GROCERY.replace("\"patience\": 60", "\"patience\": 101");
    assert!(matches!(scenario(&json), Err(ValidationError::OutOfRange { value, .. }) if value == 101.0));
}

#[test]
fn test_non_positive_price_is_rejected() {
    let json = ONE_PRODUCT.replace("\"price\": 100", "\"price\": 0");
    assert_eq!(scenario(&json).unwrap_err(), ValidationError::NonPositivePrice { product: 1, price: 0 });
}

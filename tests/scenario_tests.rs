/// End-to-end operator scenarios against an in-process backend.
mod support;

use bistro_admin::{
    AdminConsole, ConnectionConfig, EntityKind, MutationOutcome, ScriptedInteract,
};
use serde_json::json;
use support::obj;

fn console_for(base_url: &str) -> AdminConsole {
    AdminConsole::connect(&ConnectionConfig::new(base_url)).expect("console wiring")
}

#[tokio::test]
async fn creating_a_second_person_adds_exactly_one_matching_row() {
    let (base_url, backend) = support::spawn().await;
    backend.seed(
        "persons",
        obj(json!({ "id": 1, "name": "Ana", "age": 30, "gender": "F", "contact": "555" })),
    );

    let mut console = console_for(&base_url);
    let station = console.station_mut(EntityKind::Person).unwrap();
    station.refresh().await;
    assert_eq!(station.render().rows.len(), 1);
    assert_eq!(station.render().rows[0].cells, ["1", "Ana", "30", "F", "555"]);

    let form = station.form_mut();
    form.set_value(0, "Bo".to_string());
    form.set_value(1, "25".to_string());
    form.set_value(2, "M".to_string());
    form.set_value(3, "111".to_string());
    assert_eq!(station.submit_create().await, MutationOutcome::Applied);

    let render = station.render();
    assert_eq!(render.rows.len(), 2);
    assert_eq!(render.rows[0].cells, ["1", "Ana", "30", "F", "555"]);
    assert_eq!(render.rows[1].cells[1..], ["Bo", "25", "M", "111"]);
    assert!(render.rows[1].id > 1, "the backend assigns the new id");
}

#[tokio::test]
async fn confirmed_delete_removes_the_person_from_the_next_render() {
    let (base_url, backend) = support::spawn().await;
    backend.seed(
        "persons",
        obj(json!({ "id": 1, "name": "Ana", "age": 30, "gender": "F", "contact": "555" })),
    );
    backend.seed(
        "persons",
        obj(json!({ "id": 2, "name": "Bo", "age": 25, "gender": "M", "contact": "111" })),
    );

    let mut console = console_for(&base_url);
    let station = console.station_mut(EntityKind::Person).unwrap();
    station.refresh().await;
    assert_eq!(station.render().rows.len(), 2);

    let mut prompts = ScriptedInteract::confirming(true);
    assert_eq!(station.delete(1, &mut prompts).await, MutationOutcome::Applied);

    let ids: Vec<_> = station.render().rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, [2]);
}

#[tokio::test]
async fn orders_are_not_checked_against_customers_client_side() {
    let (base_url, backend) = support::spawn().await;
    backend.seed("persons", support::person("Ana", 30, "F", "555"));
    backend.seed("customers", obj(json!({ "id": 1, "person_id": 1 })));

    let mut console = console_for(&base_url);

    let customers = console.station_mut(EntityKind::Customer).unwrap();
    customers.refresh().await;
    let mut prompts = ScriptedInteract::confirming(true);
    assert_eq!(customers.delete(1, &mut prompts).await, MutationOutcome::Applied);
    assert!(customers.render().rows.is_empty());

    // The order still goes out referencing the deleted customer; whether
    // that is valid is the backend's call alone.
    let orders = console.station_mut(EntityKind::Order).unwrap();
    orders.refresh().await;
    let form = orders.form_mut();
    form.set_value(0, "1".to_string());
    form.set_value(1, "2026-08-05".to_string());
    form.set_value(2, "12:30".to_string());
    assert_eq!(orders.submit_create().await, MutationOutcome::Applied);

    assert_eq!(orders.render().rows.len(), 1);
    assert_eq!(
        orders.render().rows[0].cells[1..],
        ["1", "2026-08-05", "12:30"]
    );
}

#[tokio::test]
async fn refresh_all_loads_every_entity_kind_independently() {
    let (base_url, backend) = support::spawn().await;
    backend.seed("persons", support::person("Ana", 30, "F", "555"));
    backend.seed(
        "fooditems",
        obj(json!({ "id": 1, "name": "Empanada", "price": 4.5, "availability": true })),
    );
    backend.seed(
        "orders",
        obj(json!({ "id": 1, "customer_id": 9, "order_date": "2026-08-05", "order_time": "12:30" })),
    );

    let mut console = console_for(&base_url);
    console.refresh_all().await;

    assert_eq!(console.station(EntityKind::Person).unwrap().render().rows.len(), 1);
    assert_eq!(console.station(EntityKind::FoodItem).unwrap().render().rows.len(), 1);
    assert_eq!(console.station(EntityKind::Order).unwrap().render().rows.len(), 1);
    // Kinds with no records still render their headers.
    let payments = console.station(EntityKind::Payment).unwrap().render();
    assert!(payments.rows.is_empty());
    assert_eq!(payments.columns, ["ID", "Order ID", "Type", "Amount"]);

    let food = console.station(EntityKind::FoodItem).unwrap().render();
    assert_eq!(food.rows[0].cells, ["1", "Empanada", "4.5", "true"]);
}

//! Integration tests for `DieselLogisticsRepository` against PostgreSQL.
//!
//! Seeds a small fleet with raw SQL and checks that every reference comes
//! back resolved.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use depot::domain::ports::LogisticsRepository;
use depot::outbound::persistence::DieselLogisticsRepository;
use rstest::rstest;

mod support;

use support::{TestDatabase, fresh_database};

const SEED_SQL: &str = "
    INSERT INTO equipment (name, type, status, description) VALUES
        ('KamAZ-6520', 'dump truck', 'active', NULL),
        ('BelAZ-7540', NULL, 'repair', 'Front axle');
    INSERT INTO locations (name, type, coordinates) VALUES
        ('North pit', 'quarry', '55.75,37.61'),
        ('Crusher', 'plant', NULL);
    INSERT INTO distances (location_from_id, location_to_id, distance_km, estimated_time_min) VALUES
        (1, 2, 12.50, 25);
    INSERT INTO body_weights (equipment_id, empty_weight_kg, max_load_kg, effective_date) VALUES
        (2, 11000, 20000, '2024-01-15');
    INSERT INTO cargo_types (name, code, density_kg_m3) VALUES
        ('Gravel', 'GRV', 1600.00);
    INSERT INTO shipments (equipment_id, cargo_type_id, load_location_id, unload_location_id,
                           planned_datetime, weight_kg, status) VALUES
        (1, 1, 1, 2, '2024-05-01 08:30:00', 18000, 'planned');
";

async fn seeded() -> Option<(TestDatabase, DieselLogisticsRepository)> {
    let db = fresh_database().await?;
    db.execute(SEED_SQL);
    let repo = DieselLogisticsRepository::new(db.pool().await);
    Some((db, repo))
}

#[rstest]
#[tokio::test]
async fn equipment_lists_in_id_order() {
    let Some((_db, repo)) = seeded().await else {
        return;
    };

    let equipment = repo.list_equipment().await.expect("list succeeds");

    let names: Vec<_> = equipment.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["KamAZ-6520", "BelAZ-7540"]);
    assert_eq!(equipment[0].kind.as_deref(), Some("dump truck"));
    assert_eq!(equipment[1].kind, None);
}

#[rstest]
#[tokio::test]
async fn distance_resolves_both_locations() {
    let Some((_db, repo)) = seeded().await else {
        return;
    };

    let distance = repo
        .find_distance(1)
        .await
        .expect("query succeeds")
        .expect("distance exists");

    assert_eq!(distance.from_location.name, "North pit");
    assert_eq!(distance.to_location.name, "Crusher");
    assert_eq!(
        distance.distance_km,
        BigDecimal::from_str("12.50").expect("decimal")
    );
    assert_eq!(distance.estimated_time_min, Some(25));
}

#[rstest]
#[tokio::test]
async fn body_weight_carries_its_equipment() {
    let Some((_db, repo)) = seeded().await else {
        return;
    };

    let weights = repo.list_body_weights().await.expect("list succeeds");

    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].equipment_id, 2);
    assert_eq!(weights[0].equipment.name, "BelAZ-7540");
    assert_eq!(weights[0].effective_date, NaiveDate::from_ymd_opt(2024, 1, 15));
}

#[rstest]
#[tokio::test]
async fn shipment_resolves_every_reference() {
    let Some((_db, repo)) = seeded().await else {
        return;
    };

    let shipments = repo.list_shipments().await.expect("list succeeds");
    let single = repo.find_shipment(1).await.expect("query succeeds");

    assert_eq!(shipments.len(), 1);
    let shipment = &shipments[0];
    assert_eq!(shipment.equipment.name, "KamAZ-6520");
    assert_eq!(shipment.cargo_type.code.as_deref(), Some("GRV"));
    assert_eq!(shipment.load_location.name, "North pit");
    assert_eq!(shipment.unload_location.name, "Crusher");
    assert_eq!(
        shipment.planned_datetime,
        NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(8, 30, 0))
    );
    assert_eq!(single.as_ref(), Some(shipment));
}

#[rstest]
#[tokio::test]
async fn missing_ids_return_none() {
    let Some((_db, repo)) = seeded().await else {
        return;
    };

    assert!(repo.find_equipment(99).await.expect("query").is_none());
    assert!(repo.find_location(99).await.expect("query").is_none());
    assert!(repo.find_distance(99).await.expect("query").is_none());
    assert!(repo.find_body_weight(99).await.expect("query").is_none());
    assert!(repo.find_cargo_type(99).await.expect("query").is_none());
    assert!(repo.find_shipment(99).await.expect("query").is_none());
}

#[rstest]
#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let Some((db, repo)) = seeded().await else {
        return;
    };

    let outcome = db.try_execute("DELETE FROM locations WHERE id = 1");

    assert!(outcome.is_err(), "locations in use must be protected");
    assert!(repo.find_location(1).await.expect("query").is_some());
}

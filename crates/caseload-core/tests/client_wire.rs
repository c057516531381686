//! Serialized client shape, as exchanged with host UIs.

use caseload_core::models::{Allocation, Client, ClientStatus, UnitsMode};
use caseload_core::roster::{RosterIntent, UnitsChange};
use serde_json::json;

#[test]
fn test_monthly_client_from_record() {
    let record = json!({
        "id": "1700000000000",
        "name": "Riley Chen",
        "clinician": "Dr. Patel",
        "assignedDate": "2024-02-14",
        "unitsUsed": 30,
        "status": "Current Authorization (New LBS)",
        "lastUpdated": "2024-03-01T12:00:00Z",
        "unitsMode": "monthly",
        "monthsAssigned": 2
    });

    let client: Client = serde_json::from_value(record).unwrap();
    assert_eq!(client.id.as_str(), "1700000000000");
    assert_eq!(client.units_used, 30.0);
    assert_eq!(client.allocation, Allocation::Monthly { months_assigned: 2 });
    assert_eq!(client.status, ClientStatus::CurrentAuthorizationNewLbs);
    assert_eq!(client.assigned_date.to_string(), "2024-02-14");
}

#[test]
fn test_missing_months_defaults_to_one() {
    let record = json!({
        "id": "c2",
        "name": "Jo",
        "clinician": "Dr. Patel",
        "assignedDate": "2024-02-14",
        "unitsUsed": 5.5,
        "status": "Newly Assigned",
        "lastUpdated": "2024-03-01T12:00:00Z",
        "unitsMode": "monthly"
    });

    let client: Client = serde_json::from_value(record).unwrap();
    assert_eq!(client.months_assigned(), Some(1));
    assert_eq!(client.units_mode(), UnitsMode::Monthly);
}

#[test]
fn test_annual_client_serializes_without_months() {
    let record = json!({
        "id": "c3",
        "name": "Sam",
        "clinician": "Dr. Okafor",
        "assignedDate": "2023-11-30",
        "unitsUsed": 480,
        "status": "New Authorization",
        "lastUpdated": "2024-01-05T08:30:00Z",
        "unitsMode": "annual"
    });

    let client: Client = serde_json::from_value(record).unwrap();
    assert_eq!(client.allocation, Allocation::Annual);

    let value = serde_json::to_value(&client).unwrap();
    assert_eq!(value["unitsMode"], "annual");
    assert!(value.get("monthsAssigned").is_none());
    assert_eq!(value["assignedDate"], "2023-11-30");
    assert_eq!(value["status"], "New Authorization");
}

#[test]
fn test_annual_record_with_leftover_months() {
    // Records switched back from monthly can keep a stale monthsAssigned key
    let record = json!({
        "id": "c6",
        "name": "Lee",
        "clinician": "Dr. Okafor",
        "assignedDate": "2023-11-30",
        "unitsUsed": 200,
        "status": "Newly Assigned",
        "lastUpdated": "2024-01-05T08:30:00Z",
        "unitsMode": "annual",
        "monthsAssigned": 3
    });

    let client: Client = serde_json::from_value(record).unwrap();
    assert_eq!(client.allocation, Allocation::Annual);
    assert_eq!(client.months_assigned(), None);
    assert_eq!(client.capacity(), 960.0);

    let value = serde_json::to_value(&client).unwrap();
    assert_eq!(value["unitsMode"], "annual");
    assert!(value.get("monthsAssigned").is_none());
}

#[test]
fn test_unknown_status_is_rejected() {
    let record = json!({
        "id": "c4",
        "name": "Max",
        "clinician": "Dr. Okafor",
        "assignedDate": "2023-11-30",
        "unitsUsed": 0,
        "status": "Discharged",
        "lastUpdated": "2024-01-05T08:30:00Z",
        "unitsMode": "annual"
    });

    assert!(serde_json::from_value::<Client>(record).is_err());
}

#[test]
fn test_units_intent_shape() {
    let change = UnitsChange::normalized("c5".into(), 42.0, Allocation::Monthly { months_assigned: 3 });
    let value = serde_json::to_value(RosterIntent::ChangeUnits(change)).unwrap();
    assert_eq!(value["type"], "changeUnits");
    assert_eq!(value["id"], "c5");
    assert_eq!(value["unitsUsed"], 42.0);
    assert_eq!(value["unitsMode"], "monthly");
    assert_eq!(value["monthsAssigned"], 3);
}

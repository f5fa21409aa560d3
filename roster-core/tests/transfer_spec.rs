use std::sync::Arc;

use roster_core::db::MemoryBlobStore;
use roster_core::models::*;
use roster_core::transfer::ImportError;
use roster_core::RosterStore;
use speculate2::speculate;

speculate! {
    before {
        let store = RosterStore::open(Arc::new(MemoryBlobStore::new()));
        store.add_person(Person::new("1234567", "Dana Levi"));
        store.add_vehicle(Vehicle::new("12345", "Jeep"));
        store.add_assignment(Assignment::new("12345", "1234567", true));
        store.set_convoy_info(ConvoyInfo {
            goal: "Eilat".to_string(),
            date: "2026-10-20".to_string(),
            time: "06:00".to_string(),
        });
    }

    describe "export_json" {
        it "uses the persisted field names" {
            let json: serde_json::Value =
                serde_json::from_str(&store.export_json().expect("export failed")).unwrap();

            assert_eq!(json["people"][0]["fullName"], "Dana Levi");
            assert_eq!(json["vehicles"][0]["designation"], "Jeep");
            assert_eq!(json["assignments"][0]["vehicleId"], "12345");
            assert_eq!(json["convoyInfo"]["date"], "2026-10-20");
        }
    }

    describe "import_json" {
        it "restores an exported roster into a fresh store" {
            let exported = store.export_json().expect("export failed");

            let other = RosterStore::open(Arc::new(MemoryBlobStore::new()));
            other.import_json(&exported).expect("import failed");

            assert_eq!(other.export_snapshot(), store.export_snapshot());
        }

        it "leaves state untouched on malformed input" {
            let before = store.export_snapshot();

            let result = store.import_json("{\"people\": [");
            assert!(matches!(result, Err(ImportError::Parse(_))));
            assert_eq!(store.export_snapshot(), before);
        }

        it "reports a readable message" {
            let err = store.import_json("42").unwrap_err();
            assert!(err.to_string().starts_with("Invalid roster file"));
        }

        it "defaults missing sections" {
            store
                .import_json(r#"{"vehicles":[{"vehicleId":"67890","designation":"Truck"}]}"#)
                .expect("import failed");

            let snapshot = store.snapshot();
            assert_eq!(snapshot.vehicles, vec![Vehicle::new("67890", "Truck")]);
            assert!(snapshot.people.is_empty());
            assert!(snapshot.assignments.is_empty());
            assert!(snapshot.convoy_info.is_none());
        }
    }
}

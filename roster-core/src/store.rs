//! The authoritative roster state.
//!
//! [`RosterStore`] owns the people, vehicles, assignments and convoy info. Every
//! mutation builds a new [`AppData`] from the current one, writes it through the
//! [`BlobStore`] under [`STORAGE_KEY`], then publishes it on a watch channel.
//! Readers only ever see complete snapshots.
//!
//! Writes are serialized by a single lock around the update-persist-publish
//! sequence. Persistence failures are logged and do not roll back the
//! in-memory change.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::db::BlobStore;
use crate::models::*;

/// Key under which the serialized snapshot is persisted.
pub const STORAGE_KEY: &str = "convoy-roster-data";

/// Shared handle to the roster. Cloning is cheap and every clone sees the same state.
#[derive(Clone)]
pub struct RosterStore {
    inner: Arc<Inner>,
}

struct Inner {
    blobs: Arc<dyn BlobStore>,
    writer: Mutex<()>,
    tx: watch::Sender<Arc<AppData>>,
}

impl RosterStore {
    /// Opens the store, loading any snapshot previously saved in `blobs`.
    ///
    /// A missing or unreadable snapshot yields an empty roster.
    pub fn open(blobs: Arc<dyn BlobStore>) -> Self {
        let initial = load_snapshot(blobs.as_ref());
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self {
            inner: Arc::new(Inner {
                blobs,
                writer: Mutex::new(()),
                tx,
            }),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<AppData> {
        self.inner.tx.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver holds the current snapshot immediately and is marked
    /// changed on every later commit.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppData>> {
        self.inner.tx.subscribe()
    }

    // ============================================================
    // People
    // ============================================================

    /// Appends a person. Uniqueness of `id_number` is the caller's job.
    pub fn add_person(&self, person: Person) {
        self.commit("add_person", |data| data.people.push(person));
    }

    /// Appends a person unless one with the same `id_number` exists.
    ///
    /// The check and the append happen in one commit. Returns false, leaving
    /// the roster unchanged, on a duplicate.
    pub fn add_person_if_absent(&self, person: Person) -> bool {
        self.commit_if("add_person", |data| {
            if data.find_person(&person.id_number).is_some() {
                return false;
            }
            data.people.push(person);
            true
        })
    }

    /// Removes the person and every assignment referencing them.
    pub fn remove_person(&self, id_number: &str) {
        self.commit("remove_person", |data| {
            data.people.retain(|p| p.id_number != id_number);
            data.assignments.retain(|a| a.person_id != id_number);
        });
    }

    // ============================================================
    // Vehicles
    // ============================================================

    /// Appends a vehicle. Uniqueness of `vehicle_id` is the caller's job.
    pub fn add_vehicle(&self, vehicle: Vehicle) {
        self.commit("add_vehicle", |data| data.vehicles.push(vehicle));
    }

    /// Appends a vehicle unless one with the same `vehicle_id` exists.
    /// Returns false on a duplicate.
    pub fn add_vehicle_if_absent(&self, vehicle: Vehicle) -> bool {
        self.commit_if("add_vehicle", |data| {
            if data.find_vehicle(&vehicle.vehicle_id).is_some() {
                return false;
            }
            data.vehicles.push(vehicle);
            true
        })
    }

    /// Removes the vehicle and every assignment referencing it.
    pub fn remove_vehicle(&self, vehicle_id: &str) {
        self.commit("remove_vehicle", |data| {
            data.vehicles.retain(|v| v.vehicle_id != vehicle_id);
            data.assignments.retain(|a| a.vehicle_id != vehicle_id);
        });
    }

    // ============================================================
    // Assignments
    // ============================================================

    /// Adds an assignment, or updates `stay` on the existing one for the same
    /// vehicle/person pair. An updated assignment keeps its position.
    pub fn add_assignment(&self, assignment: Assignment) {
        self.commit("add_assignment", |data| {
            match data
                .assignments
                .iter_mut()
                .find(|a| a.matches(&assignment.vehicle_id, &assignment.person_id))
            {
                Some(existing) => existing.stay = assignment.stay,
                None => data.assignments.push(assignment),
            }
        });
    }

    pub fn remove_assignment(&self, vehicle_id: &str, person_id: &str) {
        self.commit("remove_assignment", |data| {
            data.assignments.retain(|a| !a.matches(vehicle_id, person_id));
        });
    }

    // ============================================================
    // Bulk operations
    // ============================================================

    /// Empties people, vehicles and assignments. Convoy info is kept.
    pub fn clear_all(&self) {
        self.commit("clear_all", |data| {
            data.people.clear();
            data.vehicles.clear();
            data.assignments.clear();
        });
    }

    /// Empties assignments and drops the convoy info.
    pub fn clear_assignments(&self) {
        self.commit("clear_assignments", |data| {
            data.assignments.clear();
            data.convoy_info = None;
        });
    }

    pub fn set_convoy_info(&self, info: ConvoyInfo) {
        self.commit("set_convoy_info", |data| data.convoy_info = Some(info));
    }

    /// Returns an owned copy of the current state.
    pub fn export_snapshot(&self) -> AppData {
        AppData::clone(&self.snapshot())
    }

    /// Replaces the whole state with `data`.
    ///
    /// References are not checked; dangling assignments are kept and simply
    /// left out of reports.
    pub fn import_snapshot(&self, data: AppData) {
        self.commit("import_snapshot", |current| *current = data);
    }

    fn commit(&self, op: &str, mutate: impl FnOnce(&mut AppData)) {
        self.commit_if(op, |data| {
            mutate(data);
            true
        });
    }

    /// Applies `mutate` under the writer lock. Nothing is persisted or
    /// published when it returns false.
    fn commit_if(&self, op: &str, mutate: impl FnOnce(&mut AppData) -> bool) -> bool {
        let _guard = self
            .inner
            .writer
            .lock()
            .expect("roster writer lock poisoned");

        let mut next = AppData::clone(&self.inner.tx.borrow());
        if !mutate(&mut next) {
            return false;
        }

        self.persist(&next);
        tracing::debug!(
            op,
            people = next.people.len(),
            vehicles = next.vehicles.len(),
            assignments = next.assignments.len(),
            "Roster updated"
        );
        self.inner.tx.send_replace(Arc::new(next));
        true
    }

    fn persist(&self, data: &AppData) {
        let bytes = match serde_json::to_vec(data) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to serialize roster snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.inner.blobs.save(STORAGE_KEY, &bytes) {
            tracing::error!("Failed to persist roster snapshot: {:#}", e);
        }
    }
}

fn load_snapshot(blobs: &dyn BlobStore) -> AppData {
    match blobs.load(STORAGE_KEY) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Discarding unreadable roster snapshot: {}", e);
                AppData::default()
            }
        },
        Ok(None) => AppData::default(),
        Err(e) => {
            tracing::warn!("Failed to load roster snapshot: {:#}", e);
            AppData::default()
        }
    }
}

//! Profile repository view
//!
//! Read-only snapshot query the engine pulls applicable profiles from. The
//! surrounding system (message handlers, persistence) owns profile mutation;
//! the engine only ever sees an internally consistent snapshot for the
//! duration of one `resolve()` call.

use super::model::{ChargingProfile, ChargingProfilePurpose};

/// Read-only query interface over installed charging profiles.
pub trait ProfileView {
    /// Profiles applicable to `connector_id` under the given active
    /// transaction.
    ///
    /// Connector 0 means station-wide; its profiles apply to every
    /// connector. TxProfiles bound to a different transaction are not
    /// returned.
    fn profiles_for(
        &self,
        connector_id: u32,
        active_transaction_id: Option<i32>,
    ) -> Vec<ChargingProfile>;
}

/// Selection criteria of a ClearChargingProfile request.
///
/// Every field is optional; `None` means the field is not filtered on, so
/// the default value matches every installed profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearProfileCriteria {
    /// Match one specific profile id.
    pub profile_id: Option<i32>,
    /// Match profiles installed on this connector (0 = station-wide).
    pub connector_id: Option<u32>,
    pub purpose: Option<ChargingProfilePurpose>,
    pub stack_level: Option<i32>,
}

impl ClearProfileCriteria {
    fn matches(&self, entry: &InstalledProfile) -> bool {
        self.profile_id.map_or(true, |id| entry.profile.id == id)
            && self.connector_id.map_or(true, |c| entry.connector_id == c)
            && self.purpose.map_or(true, |p| entry.profile.purpose == p)
            && self.stack_level.map_or(true, |s| entry.profile.stack_level == s)
    }
}

/// A profile installed on a specific connector.
#[derive(Debug, Clone)]
pub struct InstalledProfile {
    /// Connector the profile was set on (0 = station-wide).
    pub connector_id: u32,
    pub profile: ChargingProfile,
}

/// Plain in-memory [`ProfileView`] backed by a vector of installed profiles.
///
/// Suitable as the snapshot type handed to the engine: build it from live
/// storage, then resolve against it without further synchronization.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileView {
    entries: Vec<InstalledProfile>,
}

impl InMemoryProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a profile on a connector. A profile with the same id on the
    /// same connector is replaced (SetChargingProfile semantics).
    pub fn install(&mut self, connector_id: u32, profile: ChargingProfile) {
        self.entries
            .retain(|e| !(e.connector_id == connector_id && e.profile.id == profile.id));
        self.entries.push(InstalledProfile {
            connector_id,
            profile,
        });
    }

    /// Remove every installed profile with the given profile id.
    pub fn remove(&mut self, profile_id: i32) {
        self.entries.retain(|e| e.profile.id != profile_id);
    }

    /// Remove every installed profile matching the criteria
    /// (ClearChargingProfile semantics). Returns how many were removed.
    pub fn clear(&mut self, criteria: &ClearProfileCriteria) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !criteria.matches(e));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProfileView for InMemoryProfileView {
    fn profiles_for(
        &self,
        connector_id: u32,
        active_transaction_id: Option<i32>,
    ) -> Vec<ChargingProfile> {
        self.entries
            .iter()
            .filter(|e| e.connector_id == 0 || e.connector_id == connector_id)
            .filter(|e| {
                e.profile.purpose != ChargingProfilePurpose::TxProfile
                    || e.profile.applies_to_transaction(active_transaction_id)
            })
            .map(|e| e.profile.clone())
            .collect()
    }
}

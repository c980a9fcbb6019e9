//! Facility directory endpoint.
//!
//! Maps to `GET /facilities` on the directory backend. The backend is loose
//! about types: coordinates may arrive as JSON numbers or strings, and the
//! photo is either a serialized byte buffer, an already-encoded string, or
//! absent. All of that is normalized here so the rest of the workspace only
//! ever sees a clean [`Facility`].

use crate::client::{join_url, FinderClient};
use crate::error::DirectoryError;
use crate::traits::DirectoryProvider;
use carefind_core::model::{photo_data_url, Facility};
use carefind_geo::Coordinate;
use serde::Deserialize;
use tracing::{debug, warn};

/// Facility directory interface.
#[derive(Clone)]
pub struct DirectoryApi {
    client: FinderClient,
}

impl DirectoryApi {
    pub(crate) fn new(client: FinderClient) -> Self {
        Self { client }
    }

    /// Fetch every facility in the directory.
    ///
    /// Records with unusable coordinates are dropped with a warning rather
    /// than failing the whole fetch; a failed fetch itself is fatal for the
    /// calling cycle.
    pub async fn fetch(&self) -> Result<Vec<Facility>, DirectoryError> {
        let url = join_url(&self.client.config().directory_url, "facilities");
        let records: Vec<RawFacilityRecord> = self.client.get(&url).await?;

        let total = records.len();
        let facilities: Vec<Facility> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                record.into_facility().map_err(|reason| {
                    warn!(facility_id = id, %reason, "Dropping undecodable facility record");
                }).ok()
            })
            .collect();

        debug!(total, kept = facilities.len(), "Fetched facility directory");
        Ok(facilities)
    }
}

impl DirectoryProvider for DirectoryApi {
    async fn fetch_facilities(&self) -> Result<Vec<Facility>, DirectoryError> {
        self.fetch().await
    }
}

// ============================================================================
// Raw wire types
// ============================================================================

/// A facility record as the backend serves it.
#[derive(Debug, Clone, Deserialize)]
struct RawFacilityRecord {
    id: i64,
    name: String,
    latitude: NumberOrString,
    longitude: NumberOrString,
    #[serde(rename = "waitTimeMinutes", default)]
    wait_time_minutes: u32,
    #[serde(default)]
    street: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    photo: Option<RawPhoto>,
}

impl RawFacilityRecord {
    fn into_facility(self) -> Result<Facility, String> {
        let latitude = self.latitude.as_f64().ok_or("latitude is not a number")?;
        let longitude = self.longitude.as_f64().ok_or("longitude is not a number")?;
        let coordinate =
            Coordinate::try_new(latitude, longitude).map_err(|e| e.to_string())?;

        Ok(Facility {
            id: self.id,
            name: self.name,
            coordinate,
            wait_time_minutes: self.wait_time_minutes,
            street: self.street,
            district: self.district,
            city: self.city,
            region: self.region,
            photo: self.photo.and_then(RawPhoto::into_data_url),
        })
    }
}

/// A numeric field that may be serialized as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// The photo payload: a serialized byte buffer or an already-usable string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPhoto {
    Buffer {
        #[serde(rename = "type")]
        kind: String,
        data: Vec<u8>,
    },
    Encoded(String),
}

impl RawPhoto {
    /// Normalize to a displayable data URL. The payload is otherwise opaque.
    fn into_data_url(self) -> Option<String> {
        match self {
            Self::Buffer { kind, data } if kind == "Buffer" => Some(photo_data_url(&data)),
            Self::Buffer { .. } => None,
            Self::Encoded(s) => Some(s),
        }
    }
}

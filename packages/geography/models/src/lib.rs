#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point and zip-code centroid types.
//!
//! These types are shared between the location decoder, the nearest-zip
//! resolver, and the dataset cleaners that attach zip codes to records.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair decoded from a raw location field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Squared planar distance in degree space.
    ///
    /// No geodetic correction is applied, so this is only meaningful for
    /// ranking candidates inside a single metropolitan region.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        let d_lat = other.latitude - self.latitude;
        let d_lon = other.longitude - self.longitude;
        d_lat * d_lat + d_lon * d_lon
    }
}

/// Representative point for a single zip code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipCentroid {
    /// Zip code, kept as text to preserve leading zeros.
    pub zip: String,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
}

impl ZipCentroid {
    #[must_use]
    pub fn new(zip: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            zip: zip.into(),
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Ordered set of zip centroids used as the nearest-neighbor candidates.
///
/// Insertion order is preserved and only matters for breaking distance ties:
/// the earlier centroid wins. Duplicate zip codes are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZipReferenceTable {
    centroids: Vec<ZipCentroid>,
}

impl ZipReferenceTable {
    #[must_use]
    pub const fn new(centroids: Vec<ZipCentroid>) -> Self {
        Self { centroids }
    }

    #[must_use]
    pub fn centroids(&self) -> &[ZipCentroid] {
        &self.centroids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ZipCentroid> {
        self.centroids.iter()
    }
}

impl From<Vec<ZipCentroid>> for ZipReferenceTable {
    fn from(centroids: Vec<ZipCentroid>) -> Self {
        Self::new(centroids)
    }
}

impl FromIterator<ZipCentroid> for ZipReferenceTable {
    fn from_iter<T: IntoIterator<Item = ZipCentroid>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ZipReferenceTable {
    type Item = &'a ZipCentroid;
    type IntoIter = std::slice::Iter<'a, ZipCentroid>;

    fn into_iter(self) -> Self::IntoIter {
        self.centroids.iter()
    }
}

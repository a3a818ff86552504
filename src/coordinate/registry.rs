//! Spatial reference registry
//!
//! Resolves identifier strings such as `EPSG:4326`, `urn:ogc:def:crs:EPSG::3857`
//! or `WGS84` into shared `SrsRef` handles. The registry is built lazily on
//! first use and caches every handle it hands out, so equal identifiers
//! share one instance across the whole process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::crs::CoordinateSystem;
use super::srs::SrsRef;
use crate::errors::{WarpError, WarpResult};

lazy_static! {
    // Parse the built-in definitions on first use
    static ref SRS_DEFINITIONS: SrsDefinitions = {
        let content = include_str!("../../srs_definitions.toml");
        SrsDefinitions::from_str(content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse SRS definitions: {}", e);
                SrsDefinitions::default()
            })
    };

    static ref SRS_CACHE: Mutex<HashMap<String, SrsRef>> = Mutex::new(HashMap::new());

    static ref EPSG_PATTERN: Regex =
        Regex::new(r"^(?:URN:OGC:DEF:CRS:EPSG:[0-9.]*:|EPSG::?)?([0-9]+)$")
            .expect("EPSG identifier pattern is valid");
}

/// Aliases and display names for built-in references
#[derive(Debug, Default)]
pub struct SrsDefinitions {
    /// Maps alternative identifiers to canonical identifiers
    pub aliases: HashMap<String, String>,
    /// Maps EPSG codes to display names
    pub names: HashMap<u32, String>,
}

impl SrsDefinitions {
    /// Parse definitions from a TOML string
    pub fn from_str(content: &str) -> WarpResult<Self> {
        let toml_value: toml::Value = content.parse()?;

        let mut defs = SrsDefinitions::default();

        if let Some(table) = toml_value.get("aliases").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let Some(target) = v.as_str() {
                    defs.aliases.insert(normalize(k), normalize(target));
                }
            }
        }

        if let Some(table) = toml_value.get("names").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(code), Some(name)) = (k.parse::<u32>(), v.as_str()) {
                    defs.names.insert(code, name.to_string());
                }
            }
        }

        Ok(defs)
    }
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_uppercase()
}

fn lock_cache() -> MutexGuard<'static, HashMap<String, SrsRef>> {
    // A panic while holding the lock cannot leave the map half-updated.
    match SRS_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Process-wide lookup of spatial references
pub struct SrsRegistry;

impl SrsRegistry {
    /// Resolve an identifier into a shared spatial reference handle
    ///
    /// # Arguments
    /// * `identifier` - EPSG code, EPSG/URN identifier or a known alias
    ///
    /// # Returns
    /// The shared handle, or `WarpError::UnknownSrs`
    pub fn get_srs(identifier: &str) -> WarpResult<SrsRef> {
        let mut key = normalize(identifier);
        if let Some(canonical) = SRS_DEFINITIONS.aliases.get(&key) {
            debug!("Resolved SRS alias {} to {}", key, canonical);
            key = canonical.clone();
        }

        let mut cache = lock_cache();
        if let Some(srs) = cache.get(&key) {
            return Ok(srs.clone());
        }

        let code = Self::parse_epsg_code(&key)
            .ok_or_else(|| WarpError::UnknownSrs(identifier.to_string()))?;
        let canonical_key = format!("EPSG:{}", code);
        if let Some(srs) = cache.get(&canonical_key) {
            let srs = srs.clone();
            cache.insert(key, srs.clone());
            return Ok(srs);
        }

        let srs = CoordinateSystem::from_epsg(code)
            .map_err(|_| WarpError::UnknownSrs(identifier.to_string()))?
            .into_ref();
        debug!("Created spatial reference {} for {}", srs.display_name(), canonical_key);

        cache.insert(canonical_key.clone(), srs.clone());
        if key != canonical_key {
            cache.insert(key, srs.clone());
        }
        Ok(srs)
    }

    /// Register a caller-defined reference under an identifier
    ///
    /// A later registration under the same identifier replaces the earlier one.
    pub fn register(identifier: &str, srs: SrsRef) {
        let key = normalize(identifier);
        debug!("Registering spatial reference {} as {}", srs.display_name(), key);
        lock_cache().insert(key, srs);
    }

    /// Extract the EPSG code from an identifier such as `EPSG:4326`
    pub fn parse_epsg_code(identifier: &str) -> Option<u32> {
        let normalized = normalize(identifier);
        EPSG_PATTERN
            .captures(&normalized)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    }

    /// Display name for an EPSG code from the built-in definitions
    pub fn name_for_code(code: u32) -> Option<String> {
        SRS_DEFINITIONS.names.get(&code).cloned()
    }
}

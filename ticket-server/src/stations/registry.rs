//! Station registry: bidirectional name ↔ code lookup.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::domain::StationCode;

use super::error::{StationError, StationNotFound};

/// Separator between records in the registry blob.
const RECORD_SEPARATOR: char = '@';

/// Separator between fields within a record.
const FIELD_SEPARATOR: char = '|';

/// Field positions within a registry record.
const NAME_FIELD: usize = 1;
const CODE_FIELD: usize = 2;

/// Immutable station lookup built from an upstream registry blob.
///
/// Build it once and share it by reference (or behind an `Arc`) across
/// queries; nothing mutates it after construction.
///
/// # Examples
///
/// ```
/// use ticket_server::stations::StationRegistry;
///
/// let registry = StationRegistry::decode("@bjb|北京北|VAP|beijingbei|bjb|0|0357|北京|||");
/// assert_eq!(registry.resolve("北京北").unwrap().as_str(), "VAP");
/// assert_eq!(registry.name_of("VAP"), Some("北京北"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    name_to_code: HashMap<String, StationCode>,
    code_to_name: HashMap<StationCode, String>,
}

impl StationRegistry {
    /// Decode a registry blob.
    ///
    /// The blob is a sequence of `@`-separated records of `|`-separated
    /// fields, e.g. `bjb|北京北|VAP|beijingbei|bjb|0|0357|北京|||`. Field 1 is
    /// the station name and field 2 its code. Records with fewer than 3
    /// fields are skipped; on duplicate names or codes the last record wins.
    ///
    /// An empty or entirely malformed blob yields an empty registry.
    pub fn decode(blob: &str) -> Self {
        let mut name_to_code = HashMap::new();
        let mut code_to_name = HashMap::new();
        let mut skipped = 0usize;

        for record in blob.split(RECORD_SEPARATOR) {
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            if fields.len() <= CODE_FIELD {
                skipped += 1;
                continue;
            }

            let name = fields[NAME_FIELD].to_string();
            let code = StationCode::new(fields[CODE_FIELD]);
            name_to_code.insert(name.clone(), code.clone());
            code_to_name.insert(code, name);
        }

        debug!(
            stations = name_to_code.len(),
            skipped, "decoded station registry"
        );

        Self {
            name_to_code,
            code_to_name,
        }
    }

    /// Decode a registry from raw bytes, replacing invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::decode(&String::from_utf8_lossy(bytes))
    }

    /// Read and decode a registry blob from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| StationError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Resolve a user-supplied station name or code to a code.
    ///
    /// Checks, in order:
    /// 1. A canonical-looking code (3 uppercase ASCII letters) is returned
    ///    unchanged, without consulting the registry. Upstream rejects it
    ///    later if it does not exist.
    /// 2. An exact station-name match.
    /// 3. A linear scan of known codes for an exact match. This is O(n) in
    ///    the number of stations (a few thousand) and catches codes that fail
    ///    the canonical shape check.
    pub fn resolve(&self, identifier: &str) -> Result<StationCode, StationNotFound> {
        if StationCode::is_canonical(identifier) {
            return Ok(StationCode::new(identifier));
        }

        if let Some(code) = self.name_to_code.get(identifier) {
            debug!(identifier, code = %code, "resolved station by name");
            return Ok(code.clone());
        }

        if let Some(code) = self
            .name_to_code
            .values()
            .find(|code| code.as_str() == identifier)
        {
            debug!(identifier, "resolved station by code scan");
            return Ok(code.clone());
        }

        Err(StationNotFound::new(identifier))
    }

    /// Look up a station name by code.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    /// Look up a station code by exact name.
    pub fn code_of(&self, name: &str) -> Option<&StationCode> {
        self.name_to_code.get(name)
    }

    /// Number of distinct station names.
    pub fn len(&self) -> usize {
        self.name_to_code.len()
    }

    /// Check if the registry has no stations.
    pub fn is_empty(&self) -> bool {
        self.name_to_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB: &str = "@bjb|北京北|VAP|beijingbei|bjb|0|0357|北京|||\
                        @bjd|北京东|BOP|beijingdong|bjd|1|0357|北京|||\
                        @wha|武汉|WHN|wuhan|wh|2|1802|武汉|||";

    #[test]
    fn decode_builds_both_directions() {
        let registry = StationRegistry::decode(BLOB);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.code_of("北京东").unwrap().as_str(), "BOP");
        assert_eq!(registry.name_of("WHN"), Some("武汉"));
    }

    #[test]
    fn decode_skips_short_records() {
        let registry = StationRegistry::decode("junk@a|b@bjb|北京北|VAP@@x");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of("VAP"), Some("北京北"));
    }

    #[test]
    fn decode_tolerates_script_prefix() {
        let blob = "var station_names ='@bjb|北京北|VAP|beijingbei|bjb|0|0357|北京|||';";
        let registry = StationRegistry::decode(blob);
        assert_eq!(registry.name_of("VAP"), Some("北京北"));
    }

    #[test]
    fn decode_empty_blob() {
        assert!(StationRegistry::decode("").is_empty());
        assert!(StationRegistry::decode("@@@").is_empty());
        assert!(StationRegistry::decode("no separators here").is_empty());
    }

    #[test]
    fn duplicate_name_last_wins() {
        let registry = StationRegistry::decode("@a|南站|AAA@b|南站|BBB");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.code_of("南站").unwrap().as_str(), "BBB");
        assert_eq!(registry.resolve("南站").unwrap().as_str(), "BBB");
    }

    #[test]
    fn resolve_by_name() {
        let registry = StationRegistry::decode(BLOB);
        assert_eq!(registry.resolve("北京北").unwrap().as_str(), "VAP");
    }

    #[test]
    fn resolve_canonical_code_passes_through() {
        let registry = StationRegistry::decode(BLOB);
        assert_eq!(registry.resolve("VAP").unwrap().as_str(), "VAP");

        // Not in the registry, but shaped like a code
        let empty = StationRegistry::default();
        assert_eq!(empty.resolve("VAP").unwrap().as_str(), "VAP");
        assert_eq!(empty.resolve("ZZZ").unwrap().as_str(), "ZZZ");
    }

    #[test]
    fn resolve_scans_codes_for_non_canonical_shape() {
        let registry = StationRegistry::decode("@x|老站|old1");
        assert_eq!(registry.resolve("old1").unwrap().as_str(), "old1");
    }

    #[test]
    fn resolve_lowercase_code_is_not_uppercased() {
        let registry = StationRegistry::decode(BLOB);
        let err = registry.resolve("vap").unwrap_err();
        assert_eq!(err.identifier(), "vap");
    }

    #[test]
    fn resolve_prefers_name_over_code_scan() {
        // "ab" is both a name and a code
        let registry = StationRegistry::decode("@x|ab|XYZ@y|其他|ab");
        assert_eq!(registry.resolve("ab").unwrap().as_str(), "XYZ");
    }

    #[test]
    fn resolve_unknown_fails() {
        let registry = StationRegistry::decode(BLOB);
        let err = registry.resolve("上海").unwrap_err();
        assert_eq!(err.to_string(), "station not found: 上海");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("city.json");
        std::fs::write(&path, BLOB).unwrap();

        let registry = StationRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = StationRegistry::load("/nonexistent/city.json").unwrap_err();
        assert!(matches!(err, StationError::Io { .. }));
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Known H-record codes and their display titles
///
/// Lookup is on the upper-cased key. Codes not listed here are dropped.
pub const METADATA_LABELS: &[(&str, &str)] = &[
    ("HFDTE", "Flight Date"),
    ("HFFXA", "Fix Accuracy"),
    ("HFPLTPILOTINCHARGE", "Pilot (P1)"),
    ("HFPLTPILOT", "Pilot (P1)"),
    ("HFCM2CREW2", "Pilot (P2)"),
    ("HFGTYGLIDERTYPE", "Glider Type"),
    ("HFGIDGLIDERID", "Glider Reg"),
    ("HFDTM100GPSDATUM", "GPS Datum"),
    ("HFFTYFRTYPE", "Logger Type"),
    ("HFRFWFIRMWAREVERSION", "Firmware Version"),
    ("HFRHWHARDWAREVERSION", "Hardware Version"),
    ("HFGPS", "GPS unit"),
    ("HFPRSPRESSALTSENSOR", "Pressure Sensor"),
    ("HFCIDCOMPETITIONID", "Competition Number"),
    ("HFCCLCOMPETITIONCLASS", "Competition Class"),
    ("HFTZNTIMEZONE", "Timezone"),
];

/// Look up the display title for an upper-cased header code
pub fn metadata_label(code: &str) -> Option<&'static str> {
    METADATA_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
}

/// A recognized header field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetadataEntry {
    /// Upper-cased header code, e.g. `HFPLTPILOT`
    pub code: String,
    /// Human-readable title, e.g. `Pilot (P1)`
    pub title: String,
    /// Raw value text following the key
    pub value: String,
}

impl MetadataEntry {
    /// Build an entry for `key`, or `None` if the key is not a known code
    pub fn from_key(key: &str, value: &str) -> Option<Self> {
        let code = key.to_uppercase();
        let title = metadata_label(&code)?;
        Some(Self {
            code,
            title: title.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Written out independently of METADATA_LABELS so a typo in either fails
    const DOCUMENTED_LABELS: [(&str, &str); 16] = [
        ("HFDTE", "Flight Date"),
        ("HFFXA", "Fix Accuracy"),
        ("HFPLTPILOTINCHARGE", "Pilot (P1)"),
        ("HFPLTPILOT", "Pilot (P1)"),
        ("HFCM2CREW2", "Pilot (P2)"),
        ("HFGTYGLIDERTYPE", "Glider Type"),
        ("HFGIDGLIDERID", "Glider Reg"),
        ("HFDTM100GPSDATUM", "GPS Datum"),
        ("HFFTYFRTYPE", "Logger Type"),
        ("HFRFWFIRMWAREVERSION", "Firmware Version"),
        ("HFRHWHARDWAREVERSION", "Hardware Version"),
        ("HFGPS", "GPS unit"),
        ("HFPRSPRESSALTSENSOR", "Pressure Sensor"),
        ("HFCIDCOMPETITIONID", "Competition Number"),
        ("HFCCLCOMPETITIONCLASS", "Competition Class"),
        ("HFTZNTIMEZONE", "Timezone"),
    ];

    #[test]
    fn test_every_code_maps_to_its_label() {
        for (code, label) in DOCUMENTED_LABELS {
            assert_eq!(metadata_label(code), Some(label), "code {code}");
        }
        assert_eq!(METADATA_LABELS.len(), DOCUMENTED_LABELS.len());
    }

    #[test]
    fn test_every_lowercase_code_maps_to_its_label() {
        for (code, label) in DOCUMENTED_LABELS {
            let entry = MetadataEntry::from_key(&code.to_lowercase(), "value")
                .unwrap_or_else(|| panic!("{code} not recognized in lower case"));
            assert_eq!(entry.code, code);
            assert_eq!(entry.title, label);
        }
    }

    #[test]
    fn test_unknown_code_has_no_label() {
        assert_eq!(metadata_label("HFXYZ"), None);
        assert_eq!(metadata_label("hfdte"), None);
    }

    #[test]
    fn test_from_key_is_case_insensitive() {
        let entry = MetadataEntry::from_key("hfgtyglidertype", "LS8").unwrap();
        assert_eq!(entry.code, "HFGTYGLIDERTYPE");
        assert_eq!(entry.title, "Glider Type");
        assert_eq!(entry.value, "LS8");
        assert!(MetadataEntry::from_key("HFUNKNOWN", "x").is_none());
    }
}

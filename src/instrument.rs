use std::fmt::Display;

/// Groups of sensors sharing the same field naming and masking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    /// NASA ocean-color L2 products (NetCDF, `geophysical_data` group)
    OceanColor,
    /// GCOM-C/SGLI products (HDF5, `Image_data` group, `Error_DN` sentinel)
    Sgli,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instrument {
    Octs,
    SeaWiFS,
    ModisAqua,
    ViirsSnpp,
    ViirsJpss1,
    Goci,
    Sgli,
    Unknown(String),
}

impl Instrument {
    pub fn parse(name: &str) -> Self {
        match name {
            "octs" => Instrument::Octs,
            "seawifs" => Instrument::SeaWiFS,
            "modisa" => Instrument::ModisAqua,
            "viirsn" => Instrument::ViirsSnpp,
            "viirsj" => Instrument::ViirsJpss1,
            "goci" => Instrument::Goci,
            "sgli" => Instrument::Sgli,
            other => Instrument::Unknown(other.to_string()),
        }
    }

    pub fn family(&self) -> Option<SensorFamily> {
        match self {
            Instrument::Octs
            | Instrument::SeaWiFS
            | Instrument::ModisAqua
            | Instrument::ViirsSnpp
            | Instrument::ViirsJpss1
            | Instrument::Goci => Some(SensorFamily::OceanColor),
            Instrument::Sgli => Some(SensorFamily::Sgli),
            Instrument::Unknown(_) => None,
        }
    }

    /// Name of the field to read from a file of this instrument.
    ///
    /// The choice depends on substrings of the file's basename: SST products
    /// carry `sst`/`SST`, SGLI ocean reflectance products carry `NWLR_412`.
    /// Returns `None` when the instrument has no extraction rule.
    pub fn field_key(&self, basename: &str) -> Option<&'static str> {
        match self.family()? {
            SensorFamily::OceanColor => {
                if basename.contains("SST") {
                    Some("sst")
                } else {
                    Some("chlor_a")
                }
            }
            SensorFamily::Sgli => {
                let mut key = "CHLA";
                if basename.contains("NWLR") {
                    key = "NWLR_412";
                }
                // SST wins when both substrings are present
                if basename.contains("SST") {
                    key = "SST";
                }
                Some(key)
            }
        }
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instrument::Octs => write!(f, "octs"),
            Instrument::SeaWiFS => write!(f, "seawifs"),
            Instrument::ModisAqua => write!(f, "modisa"),
            Instrument::ViirsSnpp => write!(f, "viirsn"),
            Instrument::ViirsJpss1 => write!(f, "viirsj"),
            Instrument::Goci => write!(f, "goci"),
            Instrument::Sgli => write!(f, "sgli"),
            Instrument::Unknown(name) => write!(f, "{}", name),
        }
    }
}

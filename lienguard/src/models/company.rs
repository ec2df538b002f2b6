//! Source company tags

use lienguard_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Company a contact export file came from.
///
/// HTS and DXS exports are reconciled against accounts-receivable ledgers;
/// ONCO and VRFS conventionally arrive with lien-exports ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Company {
    #[serde(rename = "HTS")]
    Hts,
    #[serde(rename = "DXS")]
    Dxs,
    #[serde(rename = "ONCO")]
    Onco,
    #[serde(rename = "VRFS")]
    Vrfs,
}

impl Company {
    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Hts => "HTS",
            Company::Dxs => "DXS",
            Company::Onco => "ONCO",
            Company::Vrfs => "VRFS",
        }
    }

    /// Companies whose ledgers are accounts-receivable exports (variant A).
    pub fn uses_ar_ledger(&self) -> bool {
        matches!(self, Company::Hts | Company::Dxs)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Company {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HTS" => Ok(Company::Hts),
            "DXS" => Ok(Company::Dxs),
            "ONCO" => Ok(Company::Onco),
            "VRFS" => Ok(Company::Vrfs),
            other => Err(Error::Config(format!(
                "Unknown company tag '{}' (expected HTS, DXS, ONCO or VRFS)",
                other
            ))),
        }
    }
}

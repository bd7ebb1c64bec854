//! SPDX license lookup.
//!
//! Covers the identifiers commonly declared by Python projects. Lookup is
//! case-insensitive; deprecated identifiers (e.g. `GPL-3.0`) still resolve.

use serde::Serialize;
use thiserror::Error;

/// Error looking up a license identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LicenseError {
    #[error("a license identifier is required")]
    Missing,

    #[error("invalid license id: {0}")]
    Unknown(String),
}

/// A resolved SPDX license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct License {
    /// SPDX identifier
    pub id: &'static str,

    /// Full license name
    pub name: &'static str,

    /// Approved by the Open Source Initiative
    pub is_osi_approved: bool,

    /// Identifier is deprecated by SPDX
    pub is_deprecated: bool,
}

const fn license(
    id: &'static str,
    name: &'static str,
    is_osi_approved: bool,
    is_deprecated: bool,
) -> License {
    License {
        id,
        name,
        is_osi_approved,
        is_deprecated,
    }
}

static LICENSES: &[License] = &[
    license("0BSD", "BSD Zero Clause License", true, false),
    license("AFL-3.0", "Academic Free License v3.0", true, false),
    license("AGPL-3.0", "GNU Affero General Public License v3.0", true, true),
    license("AGPL-3.0-only", "GNU Affero General Public License v3.0 only", true, false),
    license("AGPL-3.0-or-later", "GNU Affero General Public License v3.0 or later", true, false),
    license("Apache-1.1", "Apache License 1.1", true, false),
    license("Apache-2.0", "Apache License 2.0", true, false),
    license("Artistic-2.0", "Artistic License 2.0", true, false),
    license("BSD-2-Clause", "BSD 2-Clause \"Simplified\" License", true, false),
    license("BSD-3-Clause", "BSD 3-Clause \"New\" or \"Revised\" License", true, false),
    license("BSD-4-Clause", "BSD 4-Clause \"Original\" or \"Old\" License", false, false),
    license("BSL-1.0", "Boost Software License 1.0", true, false),
    license("CC0-1.0", "Creative Commons Zero v1.0 Universal", false, false),
    license("CDDL-1.0", "Common Development and Distribution License 1.0", true, false),
    license("EPL-1.0", "Eclipse Public License 1.0", true, false),
    license("EPL-2.0", "Eclipse Public License 2.0", true, false),
    license("EUPL-1.1", "European Union Public License 1.1", true, false),
    license("EUPL-1.2", "European Union Public License 1.2", true, false),
    license("GPL-2.0", "GNU General Public License v2.0 only", true, true),
    license("GPL-2.0+", "GNU General Public License v2.0 or later", true, true),
    license("GPL-2.0-only", "GNU General Public License v2.0 only", true, false),
    license("GPL-2.0-or-later", "GNU General Public License v2.0 or later", true, false),
    license("GPL-3.0", "GNU General Public License v3.0 only", true, true),
    license("GPL-3.0+", "GNU General Public License v3.0 or later", true, true),
    license("GPL-3.0-only", "GNU General Public License v3.0 only", true, false),
    license("GPL-3.0-or-later", "GNU General Public License v3.0 or later", true, false),
    license("ISC", "ISC License", true, false),
    license("LGPL-2.1", "GNU Lesser General Public License v2.1 only", true, true),
    license("LGPL-2.1+", "GNU Lesser General Public License v2.1 or later", true, true),
    license("LGPL-2.1-only", "GNU Lesser General Public License v2.1 only", true, false),
    license("LGPL-2.1-or-later", "GNU Lesser General Public License v2.1 or later", true, false),
    license("LGPL-3.0", "GNU Lesser General Public License v3.0 only", true, true),
    license("LGPL-3.0+", "GNU Lesser General Public License v3.0 or later", true, true),
    license("LGPL-3.0-only", "GNU Lesser General Public License v3.0 only", true, false),
    license("LGPL-3.0-or-later", "GNU Lesser General Public License v3.0 or later", true, false),
    license("MIT", "MIT License", true, false),
    license("MPL-1.1", "Mozilla Public License 1.1", true, false),
    license("MPL-2.0", "Mozilla Public License 2.0", true, false),
    license("MS-PL", "Microsoft Public License", true, false),
    license("NCSA", "University of Illinois/NCSA Open Source License", true, false),
    license("OFL-1.1", "SIL Open Font License 1.1", true, false),
    license("PostgreSQL", "PostgreSQL License", true, false),
    license("PSF-2.0", "Python Software Foundation License 2.0", false, false),
    license("Python-2.0", "Python License 2.0", true, false),
    license("Unlicense", "The Unlicense", true, false),
    license("UPL-1.0", "Universal Permissive License v1.0", true, false),
    license("WTFPL", "Do What The F*ck You Want To Public License", false, false),
    license("Zlib", "zlib License", true, false),
];

impl License {
    /// Look up a license by SPDX identifier.
    pub fn by_id(id: &str) -> Result<License, LicenseError> {
        if id.is_empty() {
            return Err(LicenseError::Missing);
        }

        LICENSES
            .iter()
            .find(|l| l.id.eq_ignore_ascii_case(id))
            .copied()
            .ok_or_else(|| LicenseError::Unknown(id.to_string()))
    }

    /// Trove classifier name, where PyPI uses a different name than SPDX.
    fn classifier_name(&self) -> &'static str {
        if !self.is_osi_approved {
            return "Other/Proprietary License";
        }

        match self.id {
            "AGPL-3.0" | "AGPL-3.0-only" => "GNU Affero General Public License v3",
            "AGPL-3.0-or-later" => "GNU Affero General Public License v3 or later (AGPLv3+)",
            "Apache-2.0" => "Apache Software License",
            "BSD-2-Clause" | "BSD-3-Clause" | "0BSD" => "BSD License",
            "BSL-1.0" => "Boost Software License 1.0 (BSL-1.0)",
            "EPL-1.0" => "Eclipse Public License 1.0 (EPL-1.0)",
            "EPL-2.0" => "Eclipse Public License 2.0 (EPL-2.0)",
            "EUPL-1.1" => "European Union Public Licence 1.1 (EUPL 1.1)",
            "EUPL-1.2" => "European Union Public Licence 1.2 (EUPL 1.2)",
            "GPL-2.0" | "GPL-2.0-only" => "GNU General Public License v2 (GPLv2)",
            "GPL-2.0+" | "GPL-2.0-or-later" => "GNU General Public License v2 or later (GPLv2+)",
            "GPL-3.0" | "GPL-3.0-only" => "GNU General Public License v3 (GPLv3)",
            "GPL-3.0+" | "GPL-3.0-or-later" => "GNU General Public License v3 or later (GPLv3+)",
            "ISC" => "ISC License (ISCL)",
            "LGPL-2.1" | "LGPL-2.1-only" | "LGPL-2.1+" | "LGPL-2.1-or-later" => {
                "GNU Lesser General Public License v2 or later (LGPLv2+)"
            }
            "LGPL-3.0" | "LGPL-3.0-only" => "GNU Lesser General Public License v3 (LGPLv3)",
            "LGPL-3.0+" | "LGPL-3.0-or-later" => {
                "GNU Lesser General Public License v3 or later (LGPLv3+)"
            }
            "MIT" => "MIT License",
            "MPL-1.1" => "Mozilla Public License 1.1 (MPL 1.1)",
            "MPL-2.0" => "Mozilla Public License 2.0 (MPL 2.0)",
            "Python-2.0" => "Python Software Foundation License",
            "Unlicense" => "The Unlicense (Unlicense)",
            "UPL-1.0" => "Universal Permissive License (UPL)",
            "Zlib" => "zlib/libpng License",
            _ => self.name,
        }
    }

    /// Get the PyPI trove classifier for this license.
    pub fn classifier(&self) -> String {
        let mut parts = vec!["License"];
        if self.is_osi_approved {
            parts.push("OSI Approved");
        }
        parts.push(self.classifier_name());
        parts.join(" :: ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mit = License::by_id("mit").unwrap();
        assert_eq!(mit.id, "MIT");
        assert_eq!(mit.name, "MIT License");
        assert!(mit.is_osi_approved);
        assert!(!mit.is_deprecated);
    }

    #[test]
    fn test_deprecated_identifier_resolves() {
        let gpl = License::by_id("GPL-3.0").unwrap();
        assert!(gpl.is_deprecated);
    }

    #[test]
    fn test_unknown_and_missing() {
        assert_eq!(
            License::by_id("Not-A-License"),
            Err(LicenseError::Unknown("Not-A-License".to_string()))
        );
        assert_eq!(License::by_id(""), Err(LicenseError::Missing));
    }

    #[test]
    fn test_classifier() {
        assert_eq!(
            License::by_id("MIT").unwrap().classifier(),
            "License :: OSI Approved :: MIT License"
        );
        assert_eq!(
            License::by_id("Apache-2.0").unwrap().classifier(),
            "License :: OSI Approved :: Apache Software License"
        );
        assert_eq!(
            License::by_id("CC0-1.0").unwrap().classifier(),
            "License :: Other/Proprietary License"
        );
    }
}

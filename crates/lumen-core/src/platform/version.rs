// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing of graphics-driver version strings.
//!
//! Drivers report strings such as `"4.5.0 NVIDIA 390.12"` or
//! `"OpenGL ES 3.2 Mesa 23.0"`. The version is the first whitespace-delimited
//! token that begins with a digit; it must have two to four numeric components.

use std::fmt;
use std::str::FromStr;

/// A dotted version number: `major.minor[.build[.revision]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Optional third component.
    pub build: Option<u32>,
    /// Optional fourth component.
    pub revision: Option<u32>,
}

impl Version {
    /// The `0.0` version, used when a driver reports nothing usable.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a two-component version.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// Creates a three-component version.
    pub const fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }

    /// Extracts and parses the version from a full driver string.
    pub fn from_driver_string(text: &str) -> Result<Self, VersionParseError> {
        let token = version_token(text).ok_or_else(|| VersionParseError::NoVersionToken {
            input: text.to_string(),
        })?;
        token.parse()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses a bare token such as `"4.5.0"`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let components = token
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| VersionParseError::InvalidComponent {
                        token: token.to_string(),
                        component: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match components.as_slice() {
            [major, minor] => Ok(Version::new(*major, *minor)),
            [major, minor, build] => Ok(Version::with_build(*major, *minor, *build)),
            [major, minor, build, revision] => Ok(Version {
                major: *major,
                minor: *minor,
                build: Some(*build),
                revision: Some(*revision),
            }),
            _ => Err(VersionParseError::ComponentCount {
                token: token.to_string(),
                count: components.len(),
            }),
        }
    }
}

/// Returns the first whitespace-delimited token that starts with an ASCII digit.
pub fn version_token(text: &str) -> Option<&str> {
    text.split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
}

/// An error produced while parsing a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// No token in the string begins with a digit.
    NoVersionToken {
        /// The full string that was searched.
        input: String,
    },
    /// A component of the version token is not a non-negative integer.
    InvalidComponent {
        /// The version token.
        token: String,
        /// The offending component.
        component: String,
    },
    /// The version token has fewer than two or more than four components.
    ComponentCount {
        /// The version token.
        token: String,
        /// How many components were found.
        count: usize,
    },
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionParseError::NoVersionToken { input } => {
                write!(f, "No version number found in '{input}'")
            }
            VersionParseError::InvalidComponent { token, component } => {
                write!(f, "Invalid component '{component}' in version '{token}'")
            }
            VersionParseError::ComponentCount { token, count } => write!(
                f,
                "Version '{token}' has {count} components, expected 2 to 4"
            ),
        }
    }
}

impl std::error::Error for VersionParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vendor_suffixed_version() {
        let version = Version::from_driver_string("4.5.0 NVIDIA 390.12").unwrap();
        assert_eq!(version, Version::with_build(4, 5, 0));
        assert_eq!(version.to_string(), "4.5.0");
    }

    #[test]
    fn skips_leading_words() {
        let version = Version::from_driver_string("OpenGL ES 3.2 Mesa 23.0.4").unwrap();
        assert_eq!(version, Version::new(3, 2));
    }

    #[test]
    fn shading_language_style_minor() {
        let version = Version::from_driver_string("4.50 NVIDIA").unwrap();
        assert_eq!(version, Version::new(4, 50));
        assert!(version > Version::new(4, 5));
    }

    #[test]
    fn no_digit_token_is_an_error() {
        assert_eq!(
            Version::from_driver_string("unknown"),
            Err(VersionParseError::NoVersionToken {
                input: "unknown".to_string()
            })
        );
        assert!(matches!(
            Version::from_driver_string(""),
            Err(VersionParseError::NoVersionToken { .. })
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(
            "4".parse::<Version>(),
            Err(VersionParseError::ComponentCount { count: 1, .. })
        ));
        assert!(matches!(
            "1.2.3.4.5".parse::<Version>(),
            Err(VersionParseError::ComponentCount { count: 5, .. })
        ));
        assert!(matches!(
            "3.3.0-mesa".parse::<Version>(),
            Err(VersionParseError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn zero_version_formats_as_two_components() {
        assert_eq!(Version::ZERO.to_string(), "0.0");
        assert_eq!(Version::default(), Version::ZERO);
        assert_eq!("1.2.3.4".parse::<Version>().unwrap().to_string(), "1.2.3.4");
    }
}

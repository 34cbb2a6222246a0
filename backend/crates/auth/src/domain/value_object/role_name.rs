use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a role a permission grants (e.g. `"customer"`)
///
/// Roles are open-ended: new ones are created through the role operation, so
/// this is a string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Role implicitly granted at registration
    pub const CUSTOMER: &'static str = "customer";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn customer() -> Self {
        Self::new(Self::CUSTOMER)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

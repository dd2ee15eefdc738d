//! Branch Model

use serde::{Deserialize, Serialize};

/// Hospital branch (tenant / location partition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl Branch {
    /// `"CODE - Name"` as shown in headers
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let b = Branch {
            id: "b-1".into(),
            code: "BLR".into(),
            name: "Bengaluru Central".into(),
            city: None,
        };
        assert_eq!(b.display_name(), "BLR - Bengaluru Central");
    }
}

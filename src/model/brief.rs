// src/model/brief.rs

/// The four-field design brief collected from the user. Cloned per
/// submission; the service treats every field as opaque text.
#[derive(Debug, Clone, Default)]
pub struct DesignInput {
    pub project_name: String,
    pub requirements: String,
    pub target_users: String,
    pub spatial_context: String,
}

impl DesignInput {
    pub fn is_complete(&self) -> bool {
        !self.project_name.trim().is_empty()
            && !self.requirements.trim().is_empty()
            && !self.target_users.trim().is_empty()
            && !self.spatial_context.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_brief_is_incomplete() {
        assert!(!DesignInput::default().is_complete());
    }

    #[test]
    fn whitespace_only_field_is_incomplete() {
        let input = DesignInput {
            project_name: "Library".to_string(),
            requirements: "quiet study pods".to_string(),
            target_users: "   ".to_string(),
            spatial_context: "120 sqm, north light".to_string(),
        };
        assert!(!input.is_complete());
    }

    #[test]
    fn filled_brief_is_complete() {
        let input = DesignInput {
            project_name: "Library".to_string(),
            requirements: "quiet study pods".to_string(),
            target_users: "students".to_string(),
            spatial_context: "120 sqm, north light".to_string(),
        };
        assert!(input.is_complete());
    }
}

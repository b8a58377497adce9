// src/service/prompt.rs
use crate::model::DesignInput;

/// Assemble the single instruction sent to the service. The brief fields are
/// embedded verbatim; the trailing guidance steers how the model populates
/// the graph and radar sections of the schema.
pub fn build_prompt(input: &DesignInput) -> String {
    format!(
        "You are a world-class design strategist and architect.\n\
         Analyze the following project and create a visual pre-design strategy.\n\
         \n\
         Project name: {project_name}\n\
         Design requirements: {requirements}\n\
         Target user groups: {target_users}\n\
         Spatial context / constraints: {spatial_context}\n\
         \n\
         The output must be valid JSON strictly conforming to the schema.\n\
         \n\
         For 'spatialGraphData' (the spatial relationship graph):\n\
         - Create nodes for the key spatial zones (type='zone', group=1).\n\
         - Create nodes for the user groups (type='user', group=2).\n\
         - Create nodes for the key design elements or features (type='element', group=3).\n\
         - Connect them with links showing interaction, circulation, or adjacency needs.\n\
         \n\
         For 'radarChartData' (the radar chart):\n\
         - Pick 5-6 dimensions relevant to the project type (e.g. a hospital: \
         hygiene, workflow, comfort; a startup office: collaboration, flexibility, technology).",
        project_name = input.project_name,
        requirements = input.requirements,
        target_users = input.target_users,
        spatial_context = input.spatial_context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_four_fields() {
        let input = DesignInput {
            project_name: "New Future Library".to_string(),
            requirements: "quiet study pods".to_string(),
            target_users: "students and researchers".to_string(),
            spatial_context: "120 sqm, north light".to_string(),
        };
        let prompt = build_prompt(&input);
        assert!(prompt.contains("New Future Library"));
        assert!(prompt.contains("quiet study pods"));
        assert!(prompt.contains("students and researchers"));
        assert!(prompt.contains("120 sqm, north light"));
    }

    #[test]
    fn prompt_carries_graph_authoring_guidance() {
        let prompt = build_prompt(&DesignInput::default());
        assert!(prompt.contains("spatialGraphData"));
        assert!(prompt.contains("type='zone'"));
        assert!(prompt.contains("radarChartData"));
    }
}

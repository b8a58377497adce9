// src/service/schema.rs
use serde_json::{json, Value};

/// Structured-output schema attached to every request. Constrains the
/// response to the exact shape `StrategyAnalysis` deserializes, so the chart
/// and graph views can consume the result without derived computation.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "coreConcept": {
                "type": "STRING",
                "description": "A short, punchy concept title for the design strategy (e.g. 'Fluid Connectivity', 'Quiet Oasis')."
            },
            "designPrinciples": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "3-5 key design principles derived from the requirements."
            },
            "radarChartData": {
                "type": "ARRAY",
                "description": "5-6 axes of radar chart data scoring key performance indicators (0-100).",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "subject": { "type": "STRING", "description": "Axis label (e.g. Sustainability, Circulation, Aesthetics, Cost efficiency, Social interaction)." },
                        "A": { "type": "NUMBER", "description": "Score for this strategy (0-100)." },
                        "fullMark": { "type": "NUMBER", "description": "Always 100." }
                    },
                    "required": ["subject", "A", "fullMark"]
                }
            },
            "spatialGraphData": {
                "type": "OBJECT",
                "description": "Nodes and links representing spatial adjacency and user-space relationships.",
                "properties": {
                    "nodes": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": { "type": "STRING", "description": "Unique node id." },
                                "label": { "type": "STRING", "description": "Display name (e.g. 'Lobby', 'Gen Z', 'Quiet zone')." },
                                "group": { "type": "NUMBER", "description": "Group id for coloring (1=zone, 2=user, 3=element)." },
                                "type": { "type": "STRING", "enum": ["zone", "user", "element"] }
                            },
                            "required": ["id", "label", "group", "type"]
                        }
                    },
                    "links": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "source": { "type": "STRING", "description": "Source node id." },
                                "target": { "type": "STRING", "description": "Target node id." },
                                "value": { "type": "NUMBER", "description": "Strength of the connection (1-10)." }
                            },
                            "required": ["source", "target", "value"]
                        }
                    }
                },
                "required": ["nodes", "links"]
            },
            "detailedAnalysis": {
                "type": "STRING",
                "description": "A detailed strategy analysis in Markdown, about two paragraphs, explaining why these spatial relationships and metrics were chosen."
            },
            "colorPaletteSuggestion": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 4 hex color codes suggesting the mood of the space."
            }
        },
        "required": [
            "coreConcept",
            "designPrinciples",
            "radarChartData",
            "spatialGraphData",
            "detailedAnalysis",
            "colorPaletteSuggestion"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_every_top_level_field() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in [
            "coreConcept",
            "designPrinciples",
            "radarChartData",
            "spatialGraphData",
            "detailedAnalysis",
            "colorPaletteSuggestion",
        ] {
            assert!(required.contains(&field), "missing required field {field}");
            assert!(schema["properties"].get(field).is_some());
        }
    }

    #[test]
    fn node_kind_enum_matches_model() {
        let schema = response_schema();
        let kinds = &schema["properties"]["spatialGraphData"]["properties"]["nodes"]["items"]
            ["properties"]["type"]["enum"];
        assert_eq!(*kinds, json!(["zone", "user", "element"]));
    }
}

// ABOUTME: Tests for the snapshot data model
// Verifies correct parsing of host-written graph state JSON

#[cfg(test)]
mod tests {
    use crate::data::model::{CellValue, Expression, GraphState};

    fn sample_snapshot() -> &'static str {
        r##"{
            "version": 11,
            "randomSeed": "ab12cd",
            "graph": {"viewport": {"xmin": -10, "xmax": 10}},
            "expressions": {
                "list": [
                    {"type": "folder", "id": "2", "title": "Measurements", "collapsed": false},
                    {"type": "expression", "id": "3", "latex": "y=x^2", "color": "#c74440"},
                    {
                        "type": "table",
                        "id": "4",
                        "columns": [
                            {"latex": "x_1", "values": [1, 2, 3], "color": "#2d70b3"},
                            {"latex": "y_1", "values": ["0.5", null, "4"], "hidden": false}
                        ]
                    },
                    {"type": "text", "id": "5", "text": "notes"},
                    {"type": "simulation", "id": "6"}
                ]
            }
        }"##
    }

    #[test]
    fn test_parse_full_snapshot() {
        let state = GraphState::from_json(sample_snapshot()).unwrap();
        assert_eq!(state.version, Some(11));
        assert_eq!(state.expressions().len(), 5);
    }

    #[test]
    fn test_variant_classification() {
        let state = GraphState::from_json(sample_snapshot()).unwrap();
        let list = state.expressions();

        match &list[0] {
            Expression::Folder(folder) => {
                assert_eq!(folder.title, "Measurements");
                assert_eq!(folder.id.as_deref(), Some("2"));
            }
            other => panic!("expected folder, got {:?}", other),
        }

        // Plain expressions, text notes and unknown future types all
        // classify as Other
        assert!(matches!(list[1], Expression::Other));
        assert!(matches!(list[3], Expression::Other));
        assert!(matches!(list[4], Expression::Other));
    }

    #[test]
    fn test_table_columns_and_values() {
        let state = GraphState::from_json(sample_snapshot()).unwrap();
        let table = match &state.expressions()[2] {
            Expression::Table(table) => table,
            other => panic!("expected table, got {:?}", other),
        };

        let columns = table.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].latex, "x_1");
        assert_eq!(
            columns[0].values,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0)
            ]
        );

        // The host stores edited cells as text and blank cells as null
        assert_eq!(
            columns[1].values,
            vec![
                CellValue::Text("0.5".to_string()),
                CellValue::Empty,
                CellValue::Text("4".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let state = GraphState::from_json(
            r#"{"expressions": {"list": [
                {"type": "folder", "id": "1"},
                {"type": "table", "id": "2"},
                {"type": "table", "id": "3", "columns": [{"values": [1]}]}
            ]}}"#,
        )
        .unwrap();

        match &state.expressions()[0] {
            Expression::Folder(folder) => assert_eq!(folder.title, ""),
            other => panic!("expected folder, got {:?}", other),
        }
        match &state.expressions()[1] {
            Expression::Table(table) => assert!(table.columns().is_empty()),
            other => panic!("expected table, got {:?}", other),
        }
        match &state.expressions()[2] {
            Expression::Table(table) => assert_eq!(table.columns()[0].latex, ""),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_expression_list() {
        let state = GraphState::from_json(r#"{"expressions": {"list": []}}"#).unwrap();
        assert!(state.expressions().is_empty());

        // A missing list key still parses to an empty sequence
        let state = GraphState::from_json(r#"{"expressions": {}}"#).unwrap();
        assert!(state.expressions().is_empty());
    }

    #[test]
    fn test_missing_expressions_is_an_error() {
        let result = GraphState::from_json(r#"{"version": 11}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GraphState::from_json("not json").is_err());
    }
}

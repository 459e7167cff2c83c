//! Import pipeline tests

use noml_sdk::import::{NomlImporter, ParseOutcome, parse_and_validate};
use noml_sdk::validation::{ValidationOptions, ValidationResult};

const MINIMAL: &str = r#"
version: "0.1"
database: firestore
collections:
  users:
    fields:
      email: { type: string, required: true }
"#;

mod outcome_tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_only_input() {
        for input in ["", "   ", "\n\n", "# draft\n# nothing yet\n"] {
            assert_eq!(parse_and_validate(input), ParseOutcome::Empty, "{:?}", input);
        }
        assert_eq!(parse_and_validate("").validation(), None);
    }

    #[test]
    fn test_unterminated_structure_is_syntax_failure() {
        let outcome = parse_and_validate("collections:\n  users: { fields: [\n");
        assert!(matches!(outcome, ParseOutcome::SyntaxFailure { .. }));

        let report = outcome.report();
        assert!(report.schema.is_none());
        assert!(report.parse_error.is_some());
        assert_eq!(report.validation, Some(ValidationResult::unparsed()));
    }

    #[test]
    fn test_multiple_documents_are_rejected() {
        let outcome = parse_and_validate("version: '1'\n---\nversion: '2'\n");
        assert!(outcome.parse_error().is_some());
    }

    #[test]
    fn test_valid_minimal_document() {
        let outcome = parse_and_validate(MINIMAL);
        assert!(outcome.is_valid());
        assert!(outcome.parse_error().is_none());
        let validation = outcome.validation().unwrap();
        assert!(validation.errors.is_empty());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_non_mapping_root_reports_missing_keys() {
        let outcome = parse_and_validate("- just\n- a list\n");
        let validation = outcome.validation().unwrap();
        let paths: Vec<&str> = validation.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["version", "database", "collections"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "version: '1'\ncollections:\n  a: { fields: { x: {} } }\n  b: {}\n";
        assert_eq!(parse_and_validate(input), parse_and_validate(input));
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        let outcome = parse_and_validate("version: \"0.1\"\ndatabase: firestore\ncollections: {}");
        let validation = outcome.validation().unwrap();
        assert!(!validation.valid);
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(validation.errors[0].path, "collections");
        assert_eq!(
            validation.errors[0].message,
            "At least one collection is required"
        );
    }

    #[test]
    fn test_collection_with_subcollection_is_valid() {
        let outcome = parse_and_validate(
            r#"
version: "0.1"
database: firestore
collections:
  users:
    fields:
      email: { type: string, required: true }
    subcollections:
      settings:
        fields:
          theme: { type: string }
"#,
        );
        let validation = outcome.validation().unwrap();
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn test_field_without_type() {
        let outcome = parse_and_validate(
            r#"
version: "0.1"
database: firestore
collections:
  users:
    fields:
      email: { type: string }
      role: { }
"#,
        );
        let validation = outcome.validation().unwrap();
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(validation.errors[0].path, "collections.users.fields.role.type");
        assert_eq!(validation.errors[0].message, "Field \"role\" must have a type");
    }

    #[test]
    fn test_unknown_database_is_only_a_warning() {
        let outcome = parse_and_validate(&MINIMAL.replace("firestore", "mongodb"));
        let validation = outcome.validation().unwrap();
        assert!(validation.valid);
        assert_eq!(validation.warnings.len(), 1);
        assert_eq!(validation.warnings[0].path, "database");
        assert!(validation.warnings[0].message.contains("\"mongodb\""));
    }
}

mod forward_compatibility_tests {
    use super::*;

    #[test]
    fn test_extra_keys_add_no_diagnostics() {
        let extended = r#"
version: "0.1"
database: firestore
x-generator: noml-studio
collections:
  users:
    ttl: 30d
    fields:
      email: { type: string, required: true, pii: true }
    subcollections:
      settings:
        owner: self
        fields:
          theme: { type: string, experimental: yes }
"#;
        let outcome = parse_and_validate(extended);
        let validation = outcome.validation().unwrap();
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert!(validation.warnings.is_empty());
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_report_json_for_parsed_document() {
        let outcome = parse_and_validate(MINIMAL);
        let json = serde_json::to_value(outcome.report()).unwrap();

        assert_eq!(json["schema"]["version"], "0.1");
        assert_eq!(json["schema"]["collections"]["users"]["fields"]["email"]["type"], "string");
        assert_eq!(json["validation"]["valid"], true);
        assert!(json["parseError"].is_null());
    }

    #[test]
    fn test_report_json_for_diagnostics() {
        let outcome = parse_and_validate("database: firestore\ncollections: {}\n");
        let json = serde_json::to_value(outcome.report()).unwrap();
        let errors = json["validation"]["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["path"], "version");
        assert_eq!(errors[0]["severity"], "error");
    }
}

mod reference_option_tests {
    use super::*;

    const DANGLING: &str = r#"
version: "0.1"
database: firestore
collections:
  posts:
    fields:
      author: { type: reference, target: members }
      status: { type: PostStatus }
"#;

    #[test]
    fn test_reference_checks_are_off_by_default() {
        let validation = parse_and_validate(DANGLING).validation().unwrap();
        assert!(validation.valid);
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_reference_checks_only_add_warnings() {
        let importer =
            NomlImporter::with_options(ValidationOptions::new().check_references(true));
        let validation = importer.parse_and_validate(DANGLING).validation().unwrap();
        assert!(validation.valid);
        assert!(validation.errors.is_empty());

        let paths: Vec<&str> = validation.warnings.iter().map(|w| w.path.as_str()).collect();
        assert!(paths.contains(&"collections.posts.fields.author.target"));
        assert!(paths.contains(&"collections.posts.fields.status.type"));
    }
}

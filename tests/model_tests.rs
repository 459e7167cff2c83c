//! Schema model tests

use noml_sdk::import::parse_and_validate;
use noml_sdk::models::field::{ArrayItems, DefaultSentinel};
use noml_sdk::models::{FieldKind, FirestoreType, NomlSchema};

const BLOG: &str = r#"
version: "0.1"
database: firestore
metadata:
  name: Sample Blog App
  description: A simple blog application schema

enums:
  UserRole:
    description: User permission levels
    values: [user, admin, moderator]
  PostStatus:
    description: Publication status of posts
    values: [draft, published, archived]
    transitions:
      draft: [published]
      published: [archived]
  Theme:
    description: UI theme options
    values: [light, dark, system]

collections:
  users:
    description: User accounts
    fields:
      email:
        type: string
        required: true
        description: User email address
        example: "user@example.com"
      displayName:
        type: string
        description: Display name
      role:
        type: UserRole
        default: user
      createdAt:
        type: timestamp
        default: serverTimestamp
    subcollections:
      settings:
        description: User preferences
        fields:
          theme:
            type: Theme
            default: light
          notifications:
            type: boolean
            example: true

  posts:
    description: Blog posts
    keys:
      foreign:
        - field: authorRef
          references: users.email
    fields:
      title:
        type: string
        required: true
        constraints:
          maxLength: 120
      authorRef:
        type: reference
        target: users
      tags:
        type: array
        items:
          type: string
      status:
        type: PostStatus
        default: draft
"#;

fn blog() -> NomlSchema {
    let outcome = parse_and_validate(BLOG);
    assert!(outcome.is_valid());
    outcome.schema().unwrap().to_schema().unwrap()
}

mod schema_tests {
    use super::*;

    #[test]
    fn test_header() {
        let schema = blog();
        assert_eq!(schema.version.as_deref(), Some("0.1"));
        assert!(schema.is_supported_database());
        assert_eq!(schema.display_name(), "Sample Blog App");
        assert_eq!(
            schema.display_description(),
            Some("A simple blog application schema")
        );
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = blog();
        let enums: Vec<&str> = schema.enums.keys().map(String::as_str).collect();
        assert_eq!(enums, vec!["UserRole", "PostStatus", "Theme"]);

        let tree: Vec<String> = schema
            .collections_tree()
            .into_iter()
            .map(|(path, _, _)| path)
            .collect();
        assert_eq!(
            tree,
            vec![
                "collections.users",
                "collections.users.subcollections.settings",
                "collections.posts",
            ]
        );
    }

    #[test]
    fn test_find_nested_collection() {
        let schema = blog();
        let settings = schema.find_collection("settings").unwrap();
        assert_eq!(settings.field_count(), 2);
        assert!(schema.find_collection("comments").is_none());
    }
}

mod field_tests {
    use super::*;

    #[test]
    fn test_field_kinds() {
        let schema = blog();
        let users = &schema.collections["users"];
        let posts = &schema.collections["posts"];

        assert_eq!(
            users.fields["email"].kind,
            FieldKind::Primitive(FirestoreType::String)
        );
        assert!(users.fields["email"].required);
        assert_eq!(users.fields["role"].kind, FieldKind::Named("UserRole".to_string()));
        assert_eq!(
            posts.fields["authorRef"].kind,
            FieldKind::Reference {
                target: Some("users".to_string())
            }
        );
        assert_eq!(
            posts.fields["tags"].kind,
            FieldKind::Array {
                items: Some(ArrayItems::Typed {
                    item_type: "string".to_string()
                })
            }
        );
        assert_eq!(posts.fields["tags"].type_display(), "array<string>");
        assert_eq!(posts.fields["authorRef"].type_display(), "ref → users");
    }

    #[test]
    fn test_defaults_and_legacy_constraints() {
        let schema = blog();
        let users = &schema.collections["users"];
        assert_eq!(
            users.fields["createdAt"].default_sentinel(),
            Some(DefaultSentinel::ServerTimestamp)
        );
        assert_eq!(users.fields["role"].default_sentinel(), None);

        let title = &schema.collections["posts"].fields["title"];
        assert_eq!(title.validation.as_ref().unwrap().max_length, Some(120));
    }

    #[test]
    fn test_allowed_values_from_enum() {
        let schema = blog();
        let status = &schema.collections["posts"].fields["status"];
        assert_eq!(
            schema.allowed_values(status),
            Some(vec![
                "draft".to_string(),
                "published".to_string(),
                "archived".to_string()
            ])
        );
        let title = &schema.collections["posts"].fields["title"];
        assert_eq!(schema.allowed_values(title), None);
    }
}

mod enum_tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let schema = blog();
        let status = &schema.enums["PostStatus"];
        assert_eq!(status.reachable_from("draft"), vec!["published", "archived"]);
        assert_eq!(status.terminal_values(), vec!["archived"]);
        assert!(schema.enums["Theme"].transitions.is_empty());
    }
}

mod key_tests {
    use super::*;

    #[test]
    fn test_foreign_key_target() {
        let schema = blog();
        let keys = schema.collections["posts"].keys.as_ref().unwrap();
        assert_eq!(keys.foreign[0].target(), Some(("users", "email")));
    }
}

mod lenient_model_tests {
    use super::*;
    use noml_sdk::models::SortOrder;

    #[test]
    fn test_mistyped_descriptive_attributes_still_convert() {
        let outcome = parse_and_validate(
            r#"
version: "0.1"
database: firestore
metadata: { name: 2024, description: [draft] }
collections:
  orders:
    description: 42
    path: 7
    fields:
      total: { type: number, description: true, source: 1 }
    indexes:
      - fields: [total]
        order: [ASC]
        description: 3
"#,
        );
        assert!(outcome.is_valid());

        let schema = outcome.schema().unwrap().to_schema().unwrap();
        assert_eq!(schema.display_name(), "2024");
        let orders = &schema.collections["orders"];
        assert_eq!(orders.description.as_deref(), Some("42"));
        assert_eq!(orders.path.as_deref(), Some("7"));
        assert_eq!(orders.fields["total"].description.as_deref(), Some("true"));
        assert_eq!(
            orders.indexes[0].resolved_fields()[0].order,
            Some(SortOrder::Asc)
        );
    }
}

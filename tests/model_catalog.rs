//! Model Catalogue Tests
//!
//! The declarative catalogue must agree with the record types that
//! validation produces, and its relationships must be closed.

use garagenet::form::{build_payload, dispatch, FormModel, FormVisitor};
use garagenet::schema::{
    catalog, check_catalog, find, AuthProvider, EntityName, FieldType, Operation, RelationKind,
};
use serde_json::{json, Value};

// =============================================================================
// Consistency
// =============================================================================

#[test]
fn test_catalog_relations_are_closed() {
    assert_eq!(check_catalog(&catalog()), Ok(()));
}

#[test]
fn test_every_belongs_to_key_is_an_id_field() {
    for model in catalog() {
        for relation in model.relations.iter().filter(|r| r.kind == RelationKind::BelongsTo) {
            let field = model.field(relation.key).unwrap();
            assert_eq!(field.field_type, FieldType::Id, "{}.{}", model.name, relation.key);
        }
    }
}

#[test]
fn test_enum_fields_list_their_variants() {
    let part = find("Part").unwrap();
    match &part.field("condition").unwrap().field_type {
        FieldType::Enum { values } => {
            assert!(values.contains(&"USED_GOOD"));
            assert!(values.contains(&"REBUILD_REQUIRED"));
        }
        other => panic!("condition should be an enum, got {:?}", other),
    }
}

// =============================================================================
// Catalogue vs Payloads
// =============================================================================

struct BlankPayloadKeys(Value);

impl FormVisitor for BlankPayloadKeys {
    type Output = Vec<String>;

    fn visit<M: FormModel>(self) -> Vec<String> {
        let draft: M::Draft = serde_json::from_value(self.0).unwrap();
        let payload = build_payload::<M>(&draft).unwrap();
        payload.as_object().unwrap().keys().cloned().collect()
    }
}

fn minimal_drafts() -> Vec<(EntityName, Value)> {
    let contact = json!([{"name": "J Smith", "phone": "5551234567"}]);
    let address = json!({"street": "1 Main St", "city": "Kingston", "state": "NY", "zip": "12401"});
    vec![
        (EntityName::Garage, json!({"name": "G", "address": address, "contacts": contact})),
        (EntityName::Club, json!({"name": "C", "description": "D", "contacts": contact})),
        (EntityName::Project, json!({"title": "T", "veteranId": "v", "veteranName": "V"})),
        (
            EntityName::Part,
            json!({"name": "P", "category": "FRAME", "condition": "NEW", "cost": "$1", "garageId": "g"}),
        ),
        (EntityName::ProjectPart, json!({"projectId": "p", "partName": "N"})),
        (EntityName::Event, json!({"title": "E", "eventType": "MEETING", "startDateTime": "2024-05-01T18:00"})),
        (EntityName::Ride, json!({"createdBy": "u"})),
        (EntityName::EventRegistration, json!({"eventId": "e", "userId": "u", "userName": "U"})),
    ]
}

#[test]
fn test_required_fields_always_in_payload() {
    for (entity, draft) in minimal_drafts() {
        let keys = dispatch(entity, BlankPayloadKeys(draft));
        let model = find(entity.as_str()).unwrap();
        for field in model.required_fields() {
            assert!(
                keys.iter().any(|k| k == field.name),
                "{} payload is missing required {}",
                entity,
                field.name
            );
        }
    }
}

#[test]
fn test_payload_fields_are_declared() {
    for (entity, draft) in minimal_drafts() {
        let keys = dispatch(entity, BlankPayloadKeys(draft));
        let model = find(entity.as_str()).unwrap();
        for key in keys {
            assert!(model.field(&key).is_some(), "{}.{} is not in the catalogue", entity, key);
        }
    }
}

// =============================================================================
// Authorization Placeholders
// =============================================================================

#[test]
fn test_models_only_grant_public_read() {
    for model in catalog().into_iter().filter(|m| m.is_model()) {
        assert_eq!(model.authorization.len(), 1, "{}", model.name);
        let rule = &model.authorization[0];
        assert_eq!(rule.allow, AuthProvider::PublicApiKey);
        assert_eq!(rule.operations, vec![Operation::Read]);
    }
}

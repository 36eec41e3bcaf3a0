//! Declarative model catalogue
//!
//! Mirrors the schema registered with the managed data service: models,
//! embedded custom types, field types, relationships and authorization
//! rules. Nothing here is enforced client-side; validation lives in
//! `validator`. The catalogue exists so the data shape can be inspected,
//! printed, and checked for internal consistency.
//!
//! Authorization rules are placeholders copied from the deployed schema
//! (public API key may read). Real role-based rules (owner, officer, admin)
//! are undefined; nothing in this crate enforces them.

use serde::Serialize;
use serde_json::{json, Value};

use super::entities::EntityName;
use super::enums::{
    ContactPreference, DifficultyLevel, EventType, LocationType, PartCategory, PartCondition,
    Priority, ProjectStatus, RegistrationStatus,
};

/// Field types understood by the data service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldType {
    Id,
    String,
    Email,
    Phone,
    Url,
    Float,
    Integer,
    Boolean,
    Date,
    DateTime,
    Json,
    /// Closed enumeration
    Enum { values: Vec<&'static str> },
    /// Embedded custom type
    Ref { target: &'static str },
}

impl FieldType {
    /// Returns the type name for display
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Id => "id",
            FieldType::String => "string",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Float => "float",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Json => "json",
            FieldType::Enum { .. } => "enum",
            FieldType::Ref { .. } => "ref",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// Who a rule admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthProvider {
    /// Anyone holding the shared API key
    PublicApiKey,
    /// Any signed-in user
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRule {
    pub allow: AuthProvider,
    pub operations: Vec<Operation>,
}

impl AuthRule {
    pub fn public_read() -> Self {
        Self {
            allow: AuthProvider::PublicApiKey,
            operations: vec![Operation::Read],
        }
    }

    pub fn authenticated() -> Self {
        Self {
            allow: AuthProvider::Authenticated,
            operations: vec![Operation::Create, Operation::Read, Operation::Update, Operation::Delete],
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: &'static str,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub required: bool,
    /// Field holds a list of `field_type`
    pub list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Field-level rules narrowing the model's rules
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorization: Vec<AuthRule>,
}

impl FieldDef {
    /// Create a required field
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            list: false,
            default: None,
            authorization: Vec::new(),
        }
    }

    /// Create an optional field
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Marks the field as a list
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Restricts the field to signed-in users
    pub fn authenticated_only(mut self) -> Self {
        self.authorization = vec![AuthRule::authenticated()];
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
    HasOne,
}

/// Relationship between two models, joined on `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub name: &'static str,
    pub kind: RelationKind,
    pub target: EntityName,
    /// Foreign-key field; lives on the belongs-to side
    pub key: &'static str,
}

impl Relation {
    pub fn belongs_to(name: &'static str, target: EntityName, key: &'static str) -> Self {
        Self {
            name,
            kind: RelationKind::BelongsTo,
            target,
            key,
        }
    }

    pub fn has_many(name: &'static str, target: EntityName, key: &'static str) -> Self {
        Self {
            name,
            kind: RelationKind::HasMany,
            target,
            key,
        }
    }

    pub fn has_one(name: &'static str, target: EntityName, key: &'static str) -> Self {
        Self {
            name,
            kind: RelationKind::HasOne,
            target,
            key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    /// Persisted model with server-assigned id and timestamps
    Model,
    /// Embedded value type with no identity
    CustomType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDef {
    pub name: &'static str,
    pub kind: ModelKind,
    pub fields: Vec<FieldDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorization: Vec<AuthRule>,
}

impl ModelDef {
    fn model(name: EntityName, fields: Vec<FieldDef>, relations: Vec<Relation>) -> Self {
        Self {
            name: name.as_str(),
            kind: ModelKind::Model,
            fields,
            relations,
            authorization: vec![AuthRule::public_read()],
        }
    }

    fn custom_type(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            name,
            kind: ModelKind::CustomType,
            fields,
            relations: Vec::new(),
            authorization: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields a create payload must carry (server-managed `id` excluded)
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(|f| f.required && f.name != "id")
    }

    pub fn is_model(&self) -> bool {
        self.kind == ModelKind::Model
    }
}

fn enum_of(values: Vec<&'static str>) -> FieldType {
    FieldType::Enum { values }
}

fn reference(target: &'static str) -> FieldType {
    FieldType::Ref { target }
}

fn images() -> FieldDef {
    FieldDef::optional("images", FieldType::String).list().default_value(json!([]))
}

/// Every model and custom type in the directory schema
pub fn catalog() -> Vec<ModelDef> {
    use EntityName as E;
    use FieldDef as F;
    use FieldType as T;

    vec![
        ModelDef::custom_type(
            "Location",
            vec![
                F::required("name", T::String),
                F::optional("title", T::String),
                F::optional("description", T::String),
                F::required("type", enum_of(LocationType::names())),
                F::optional("stop", T::Boolean).default_value(json!(false)),
                F::required("lat", T::Float),
                F::required("long", T::Float),
            ],
        ),
        ModelDef::custom_type(
            "Address",
            vec![
                F::required("street", T::String),
                F::required("city", T::String),
                F::required("state", T::String),
                F::required("zip", T::String),
                F::optional("country", T::String).default_value(json!("USA")),
                F::optional("location", reference("Location")),
            ],
        ),
        ModelDef::custom_type(
            "Contact",
            vec![
                F::required("name", T::String),
                F::optional("title", T::String),
                F::optional("email", T::Email).authenticated_only(),
                F::required("phone", T::Phone).authenticated_only(),
                F::optional("website", T::Url),
                F::optional("preference", enum_of(ContactPreference::names())).default_value(json!("ANY")),
            ],
        ),
        ModelDef::model(
            E::Garage,
            vec![
                F::required("id", T::Id),
                F::required("name", T::String),
                F::required("address", reference("Address")),
                F::required("contacts", reference("Contact")).list(),
                F::optional("description", T::String),
                F::optional("hoursOfOperation", T::String),
                F::optional("specialties", T::String).list().default_value(json!([])),
                F::optional("amenities", T::String).list().default_value(json!([])),
                F::optional("isActive", T::Boolean).default_value(json!(true)),
                F::optional("website", T::Url),
                images(),
            ],
            vec![
                Relation::has_many("projects", E::Project, "garageId"),
                Relation::has_many("parts", E::Part, "garageId"),
            ],
        ),
        ModelDef::model(
            E::Club,
            vec![
                F::required("id", T::Id),
                F::required("name", T::String),
                F::optional("website", T::Url),
                F::optional("address", reference("Address")),
                F::required("contacts", reference("Contact")).list(),
                F::required("description", T::String),
                F::optional("isActive", T::Boolean).default_value(json!(true)),
                images(),
            ],
            vec![Relation::has_many("events", E::Event, "hostClubId")],
        ),
        ModelDef::model(
            E::Project,
            vec![
                F::required("id", T::Id),
                F::required("title", T::String),
                F::optional("description", T::String),
                F::required("veteranId", T::String),
                F::required("veteranName", T::String),
                F::optional("status", enum_of(ProjectStatus::names())).default_value(json!("PLANNING")),
                F::optional("progressPercentage", T::Float).default_value(json!(0)),
                F::optional("startDate", T::Date),
                F::optional("targetCompletionDate", T::Date),
                F::optional("actualCompletionDate", T::Date),
                F::optional("garageId", T::Id),
                images(),
            ],
            vec![
                Relation::belongs_to("garage", E::Garage, "garageId"),
                Relation::has_many("parts", E::ProjectPart, "projectId"),
            ],
        ),
        ModelDef::model(
            E::Part,
            vec![
                F::required("id", T::Id),
                F::required("name", T::String),
                F::optional("partNumber", T::String),
                F::required("category", enum_of(PartCategory::names())),
                F::required("condition", enum_of(PartCondition::names())),
                F::optional("fitsModels", T::String).list().default_value(json!([])),
                F::optional("description", T::String),
                images(),
                F::required("cost", T::String),
                F::optional("isAvailable", T::Boolean).default_value(json!(true)),
                F::required("garageId", T::Id),
            ],
            vec![
                Relation::belongs_to("garage", E::Garage, "garageId"),
                Relation::has_many("projectParts", E::ProjectPart, "partId"),
            ],
        ),
        ModelDef::model(
            E::ProjectPart,
            vec![
                F::required("id", T::Id),
                F::required("projectId", T::Id),
                F::optional("partId", T::Id),
                F::required("partName", T::String),
                F::optional("isObtained", T::Boolean).default_value(json!(false)),
                F::optional("notes", T::String),
                F::optional("priority", enum_of(Priority::names())).default_value(json!("MEDIUM")),
            ],
            vec![
                Relation::belongs_to("project", E::Project, "projectId"),
                Relation::belongs_to("part", E::Part, "partId"),
            ],
        ),
        ModelDef::model(
            E::Event,
            vec![
                F::required("id", T::Id),
                F::required("title", T::String),
                F::optional("description", T::String),
                F::optional("address", reference("Address")),
                F::optional("website", T::Url),
                F::required("eventType", enum_of(EventType::names())),
                F::required("startDateTime", T::DateTime),
                F::optional("endDateTime", T::DateTime),
                F::optional("registrationTime", T::DateTime),
                F::optional("ksuTime", T::DateTime),
                F::optional("maxParticipants", T::Integer),
                F::optional("currentParticipants", T::Integer).default_value(json!(0)),
                F::optional("registrationRequired", T::Boolean).default_value(json!(false)),
                F::optional("hostClubId", T::Id),
            ],
            vec![
                Relation::belongs_to("hostClub", E::Club, "hostClubId"),
                Relation::has_one("ride", E::Ride, "eventId"),
                Relation::has_many("registrations", E::EventRegistration, "eventId"),
            ],
        ),
        ModelDef::model(
            E::Ride,
            vec![
                F::required("id", T::Id),
                F::optional("name", T::String),
                F::optional("description", T::String),
                F::optional("start", reference("Address")),
                F::optional("end", reference("Address")),
                F::optional("points", reference("Location")).list().default_value(json!([])),
                F::optional("distance", T::Float),
                F::optional("estimatedDuration", T::Float),
                F::optional("difficultyLevel", enum_of(DifficultyLevel::names())).default_value(json!("BEGINNER")),
                F::optional("routeData", T::Json),
                F::required("createdBy", T::String),
                F::optional("isPublic", T::Boolean).default_value(json!(true)),
                F::optional("eventId", T::Id),
            ],
            vec![Relation::belongs_to("event", E::Event, "eventId")],
        ),
        ModelDef::model(
            E::EventRegistration,
            vec![
                F::required("id", T::Id),
                F::required("eventId", T::Id),
                F::required("userId", T::String),
                F::required("userName", T::String),
                F::optional("registrationDate", T::DateTime),
                F::optional("status", enum_of(RegistrationStatus::names())).default_value(json!("REGISTERED")),
                F::optional("notes", T::String),
            ],
            vec![Relation::belongs_to("event", E::Event, "eventId")],
        ),
    ]
}

/// Looks up a model or custom type by name
pub fn find(name: &str) -> Option<ModelDef> {
    catalog().into_iter().find(|m| m.name == name)
}

/// Checks that the catalogue is internally consistent.
///
/// - every `Ref` names a known custom type
/// - every relation targets a persisted model
/// - every belongs-to key is a field of its model
/// - every belongs-to has an inverse has-many/has-one on the same key
///
/// Returns every problem found.
pub fn check_catalog(models: &[ModelDef]) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    for model in models {
        for field in &model.fields {
            if let FieldType::Ref { target } = &field.field_type {
                let known = models
                    .iter()
                    .any(|m| m.name == *target && m.kind == ModelKind::CustomType);
                if !known {
                    problems.push(format!(
                        "{}.{} refers to unknown custom type '{}'",
                        model.name, field.name, target
                    ));
                }
            }
        }

        for relation in &model.relations {
            let Some(target) = models
                .iter()
                .find(|m| m.name == relation.target.as_str() && m.is_model())
            else {
                problems.push(format!(
                    "{}.{} targets unknown model '{}'",
                    model.name, relation.name, relation.target
                ));
                continue;
            };

            if relation.kind != RelationKind::BelongsTo {
                continue;
            }
            if model.field(relation.key).is_none() {
                problems.push(format!(
                    "{}.{} uses key '{}' which is not a field of {}",
                    model.name, relation.name, relation.key, model.name
                ));
            }
            let has_inverse = target.relations.iter().any(|inverse| {
                inverse.kind != RelationKind::BelongsTo
                    && inverse.target.as_str() == model.name
                    && inverse.key == relation.key
            });
            if !has_inverse {
                problems.push(format!(
                    "{}.{} has no inverse relation on {}",
                    model.name, relation.name, target.name
                ));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_consistent() {
        assert_eq!(check_catalog(&catalog()), Ok(()));
    }

    #[test]
    fn test_every_entity_has_a_model() {
        for entity in EntityName::ALL {
            let model = find(entity.as_str()).unwrap();
            assert!(model.is_model());
            assert!(model.field("id").is_some());
        }
    }

    #[test]
    fn test_authorization_is_placeholder_read_only() {
        for model in catalog().iter().filter(|m| m.is_model()) {
            assert_eq!(model.authorization, vec![AuthRule::public_read()]);
        }
    }

    #[test]
    fn test_contact_personal_fields_are_authenticated() {
        let contact = find("Contact").unwrap();
        assert!(!contact.field("phone").unwrap().authorization.is_empty());
        assert!(!contact.field("email").unwrap().authorization.is_empty());
        assert!(contact.field("name").unwrap().authorization.is_empty());
    }

    #[test]
    fn test_missing_inverse_is_reported() {
        let mut models = catalog();
        for model in models.iter_mut().filter(|m| m.name == "Club") {
            model.relations.clear();
        }
        let problems = check_catalog(&models).unwrap_err();
        assert!(problems.iter().any(|p| p.contains("Event.hostClub")));
    }

    #[test]
    fn test_unknown_ref_is_reported() {
        let mut models = catalog();
        models.retain(|m| m.name != "Location");
        let problems = check_catalog(&models).unwrap_err();
        assert!(problems.iter().any(|p| p.contains("unknown custom type 'Location'")));
    }

    #[test]
    fn test_field_type_serialization() {
        let field = FieldDef::required("category", enum_of(vec!["ENGINE"]));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "enum");
        assert_eq!(json["values"], serde_json::json!(["ENGINE"]));
        assert_eq!(json["required"], true);
    }
}

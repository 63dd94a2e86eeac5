use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::tuan::Role;
use models::tuan::{validate_email, validate_name};

use crate::errors::ServiceError;
use crate::pagination::{SortKey, SortOrder};

/// Stored document. Timestamps are kept for ordering but not exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuan {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuanView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<Tuan> for TuanView {
    fn from(t: Tuan) -> Self {
        Self { id: t.id, name: t.name, email: t.email, role: t.role }
    }
}

/// Creation payload. Fields are optional here so that missing ones surface
/// as validation messages rather than body-shape errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTuanInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Validated creation fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewTuan {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl CreateTuanInput {
    pub fn validate(self) -> Result<NewTuan, ServiceError> {
        let name = validate_name(self.name.as_deref().unwrap_or_default())?;
        let email = validate_email(self.email.as_deref().unwrap_or_default())?;
        let role = match self.role.as_deref() {
            Some(r) => r.parse()?,
            None => Role::default(),
        };
        Ok(NewTuan { name, email, role })
    }
}

impl NewTuan {
    pub fn into_document(self, now: DateTime<Utc>) -> Tuan {
        Tuan { id: Uuid::new_v4(), name: self.name, email: self.email, role: self.role, created_at: now, updated_at: now }
    }
}

/// Partial update payload; only these fields are updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTuanInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TuanPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UpdateTuanInput {
    pub fn validate(self) -> Result<TuanPatch, ServiceError> {
        if self.name.is_none() && self.email.is_none() && self.role.is_none() {
            return Err(ServiceError::BadRequest("update body must contain at least one of name, email, role".into()));
        }
        Ok(TuanPatch {
            name: self.name.as_deref().map(validate_name).transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
            role: self.role.as_deref().map(str::parse).transpose()?,
        })
    }
}

impl TuanPatch {
    /// Copy of `current` with the provided fields overlaid.
    pub fn apply(&self, current: &Tuan, now: DateTime<Utc>) -> Tuan {
        Tuan {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            role: self.role.unwrap_or(current.role),
            created_at: current.created_at,
            updated_at: now,
        }
    }
}

/// Equality filter for list queries. Values are compared as given, so a
/// role no Tuan carries narrows to nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TuanFilter {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl TuanFilter {
    pub fn matches(&self, t: &Tuan) -> bool {
        self.name.as_ref().map_or(true, |n| *n == t.name)
            && self.role.as_deref().map_or(true, |r| r == t.role.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuanSortField {
    Name,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

impl TuanSortField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "role" => Some(Self::Role),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn compare(self, a: &Tuan, b: &Tuan) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Email => a.email.cmp(&b.email),
            Self::Role => a.role.as_str().cmp(b.role.as_str()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Recognised sort keys; unknown fields are dropped, none left means `createdAt` ascending.
pub fn resolve_sort(keys: &[SortKey]) -> Vec<(TuanSortField, SortOrder)> {
    let resolved: Vec<_> = keys
        .iter()
        .filter_map(|k| TuanSortField::from_key(&k.field).map(|f| (f, k.order)))
        .collect();
    if resolved.is_empty() {
        vec![(TuanSortField::CreatedAt, SortOrder::Asc)]
    } else {
        resolved
    }
}

/// Compare by each key in turn; ties fall back to id for a stable order.
pub fn compare_by(sort: &[(TuanSortField, SortOrder)], a: &Tuan, b: &Tuan) -> Ordering {
    sort.iter()
        .map(|(field, order)| {
            let ord = field.compare(a, b);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn doc(name: &str, email: &str, role: Role, offset_secs: i64) -> Tuan {
        let at = Utc::now() + Duration::seconds(offset_secs);
        Tuan { id: Uuid::new_v4(), name: name.into(), email: email.into(), role, created_at: at, updated_at: at }
    }

    #[test]
    fn create_input_defaults_role_and_normalizes() -> Result<(), ServiceError> {
        let new = CreateTuanInput { name: Some(" A ".into()), email: Some("A@X.com".into()), role: None }.validate()?;
        assert_eq!(new, NewTuan { name: "A".into(), email: "a@x.com".into(), role: Role::User });
        Ok(())
    }

    #[test]
    fn create_input_rejects_missing_or_bad_fields() {
        let missing_email = CreateTuanInput { name: Some("A".into()), ..Default::default() }.validate();
        assert!(matches!(missing_email, Err(ServiceError::BadRequest(ref m)) if m == "email is required"));
        let bad_role = CreateTuanInput { name: Some("A".into()), email: Some("a@x.com".into()), role: Some("root".into()) }.validate();
        assert!(matches!(bad_role, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(matches!(UpdateTuanInput::default().validate(), Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn patch_overlays_only_provided_fields() -> Result<(), ServiceError> {
        let current = doc("A", "a@x.com", Role::User, 0);
        let patch = UpdateTuanInput { role: Some("admin".into()), ..Default::default() }.validate()?;
        let later = current.updated_at + Duration::seconds(5);
        let updated = patch.apply(&current, later);
        assert_eq!(updated.name, "A");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.created_at, current.created_at);
        assert_eq!(updated.updated_at, later);
        // the stored record is untouched
        assert_eq!(current.role, Role::User);
        Ok(())
    }

    #[test]
    fn filter_matches_on_equality() {
        let t = doc("A", "a@x.com", Role::User, 0);
        assert!(TuanFilter::default().matches(&t));
        assert!(TuanFilter { name: Some("A".into()), role: Some("user".into()) }.matches(&t));
        assert!(!TuanFilter { role: Some("admin".into()), ..Default::default() }.matches(&t));
        assert!(!TuanFilter { role: Some("manager".into()), ..Default::default() }.matches(&t));
        assert!(!TuanFilter { name: Some("a".into()), ..Default::default() }.matches(&t));
    }

    #[test]
    fn sort_resolution_and_ordering() {
        let keys = vec![
            SortKey { field: "password".into(), order: SortOrder::Asc },
            SortKey { field: "name".into(), order: SortOrder::Desc },
        ];
        let sort = resolve_sort(&keys);
        assert_eq!(sort, vec![(TuanSortField::Name, SortOrder::Desc)]);
        assert_eq!(resolve_sort(&[]), vec![(TuanSortField::CreatedAt, SortOrder::Asc)]);

        let mut docs = vec![doc("B", "b@x.com", Role::User, 0), doc("C", "c@x.com", Role::User, 1), doc("A", "a@x.com", Role::User, 2)];
        docs.sort_by(|a, b| compare_by(&sort, a, b));
        let names: Vec<_> = docs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);

        docs.sort_by(|a, b| compare_by(&resolve_sort(&[]), a, b));
        let names: Vec<_> = docs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn view_hides_timestamps() {
        let json = serde_json::to_value(TuanView::from(doc("A", "a@x.com", Role::Admin, 0))).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("createdAt").is_none());
        assert!(json.get("id").is_some());
    }
}

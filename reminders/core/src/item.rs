use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single reminder as seen by users of the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Item {
    /// Identifier assigned by storage when the item was created
    pub id: i32,
    /// User-visible label
    pub text: String,
    /// Whether the reminder has been ticked off
    pub completed: bool,
}

impl Item {
    pub fn new(id: i32, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }
}

/// Presence of a single field in a partial update.
///
/// A key missing from the JSON body is `Absent`, an explicit `null` is `Null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Absent
    }
}

impl<T> PatchField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PatchField::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchField::Null)
    }

    /// Returns the value if one was supplied. `Null` and `Absent` both yield `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            PatchField::Value(value) => Some(value),
            PatchField::Absent | PatchField::Null => None,
        }
    }
}

impl<T> From<T> for PatchField<T> {
    fn from(value: T) -> Self {
        PatchField::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PatchField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => PatchField::Value(value),
            None => PatchField::Null,
        })
    }
}

impl<T: Serialize> Serialize for PatchField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatchField::Value(value) => serializer.serialize_some(value),
            PatchField::Absent | PatchField::Null => serializer.serialize_none(),
        }
    }
}

/// Partial update of an item. Only fields that are present are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemPatch {
    /// New label; stored as sent
    #[serde(default, skip_serializing_if = "PatchField::is_absent")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub text: PatchField<String>,
    /// New completion state
    #[serde(default, skip_serializing_if = "PatchField::is_absent")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<bool>))]
    pub completed: PatchField<bool>,
}

impl ItemPatch {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: PatchField::Value(text.into()),
            ..Default::default()
        }
    }

    pub fn with_completed(completed: bool) -> Self {
        Self {
            completed: PatchField::Value(completed),
            ..Default::default()
        }
    }
}

/// Body of `POST /items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateItemRequest {
    /// Label for the new item; surrounding whitespace is trimmed
    #[serde(default)]
    pub text: String,
}

/// Response of `GET /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemsResponse {
    /// Items ordered newest first
    pub items: Vec<Item>,
}

/// Response carrying a single created or updated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemResponse {
    pub item: Item,
}

/// Response of `DELETE /items/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Short human-readable description
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

//! Profile form, its stored record, and the profile validator.

use serde::{Deserialize, Serialize};

use crate::validation::{FormField, ValidationErrors};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const FAVORITE_FOOD_REQUIRED: &str = "Favorite food is required";

/// Editable fields of the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    FirstName,
    LastName,
    FavoriteFood,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::FavoriteFood,
    ];
}

impl FormField for ProfileField {
    fn name(self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::FavoriteFood => "favoriteFood",
        }
    }
}

/// In-memory values of the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub favorite_food: String,
}

impl ProfileForm {
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::FavoriteFood => &self.favorite_food,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::FavoriteFood => &mut self.favorite_food,
        };
        *slot = value.into();
    }
}

/// Stored representation of a profile, keyed by user id in the `profiles`
/// collection.
///
/// Fields missing from a stored document come back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub favorite_food: String,
}

impl From<ProfileRecord> for ProfileForm {
    fn from(record: ProfileRecord) -> Self {
        Self {
            first_name: record.first_name,
            last_name: record.last_name,
            favorite_food: record.favorite_food,
        }
    }
}

impl From<&ProfileForm> for ProfileRecord {
    fn from(form: &ProfileForm) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            favorite_food: form.favorite_food.clone(),
        }
    }
}

/// Report every profile field that is empty after trimming.
pub fn validate_profile(form: &ProfileForm) -> ValidationErrors<ProfileField> {
    let mut errors = ValidationErrors::new();
    errors.require_non_empty(ProfileField::FirstName, &form.first_name, FIRST_NAME_REQUIRED);
    errors.require_non_empty(ProfileField::LastName, &form.last_name, LAST_NAME_REQUIRED);
    errors.require_non_empty(
        ProfileField::FavoriteFood,
        &form.favorite_food,
        FAVORITE_FOOD_REQUIRED,
    );
    errors
}

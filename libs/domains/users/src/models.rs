use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// User entity, stored in the `users` collection.
///
/// Field names are the wire and storage contract: `nickname`, `password`,
/// `gender`, `phoneNumber`, `interests`. The MongoDB `_id` is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Unique, human-chosen identifier
    #[validate(length(min = 1, message = "nickname is required"))]
    pub nickname: String,
    /// Stored as given
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    pub phone_number: Option<String>,
    /// `null` decodes as an empty list
    #[serde(deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
}

impl User {
    pub fn new(
        nickname: impl Into<String>,
        password: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            password: password.into(),
            gender: gender.into(),
            ..Self::default()
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Overwrite every field with the client-supplied values.
    ///
    /// Nothing is merged: an absent phone number or an empty interest list in
    /// `input` clears the stored one.
    pub fn replace_with(&mut self, input: User) {
        self.nickname = input.nickname;
        self.password = input.password;
        self.gender = input.gender;
        self.phone_number = input.phone_number;
        self.interests = if input.interests.is_empty() {
            Vec::new()
        } else {
            input.interests
        };
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of a store-level update once the record is known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field changed
    Modified,
    /// Record matched but already held these values
    Unchanged,
}

/// `?nickname=` query parameter for lookup and delete.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NicknameQuery {
    /// Nickname of the user
    pub nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let user = User::new("ana", "p1", "f")
            .with_phone_number("+351 900 000 000")
            .with_interests(["chess"]);

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "nickname": "ana",
                "password": "p1",
                "gender": "f",
                "phoneNumber": "+351 900 000 000",
                "interests": ["chess"]
            })
        );
    }

    #[test]
    fn test_optional_fields_default_when_absent_or_null() {
        let user: User =
            serde_json::from_value(json!({"nickname": "ana", "password": "p1", "gender": "f", "interests": null}))
                .unwrap();
        assert_eq!(user.phone_number, None);
        assert!(user.interests.is_empty());

        let bare: User = serde_json::from_value(json!({"nickname": "ana"})).unwrap();
        assert_eq!(bare.password, "");
        assert!(bare.validate().is_err());
    }

    #[test]
    fn test_validation_reports_each_missing_mandatory_field() {
        let errors = User::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nickname"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("gender"));

        assert!(User::new("ana", "p1", "f").validate().is_ok());
    }

    #[test]
    fn test_replace_with_clears_interests_and_phone() {
        let mut stored = User::new("ana", "p1", "f")
            .with_phone_number("123")
            .with_interests(["chess", "go"]);

        stored.replace_with(User::new("ana", "p2", "f"));

        assert_eq!(stored.password, "p2");
        assert_eq!(stored.phone_number, None);
        assert!(stored.interests.is_empty());
    }

    #[test]
    fn test_replace_with_takes_new_interests_in_order() {
        let mut stored = User::new("ana", "p1", "f").with_interests(["go"]);
        stored.replace_with(User::new("ana", "p1", "f").with_interests(["chess", "tennis"]));
        assert_eq!(stored.interests, vec!["chess", "tennis"]);
    }
}

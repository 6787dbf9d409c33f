use crate::api::converter::ApiConverter;
use crate::api::wire::ApiUser;
use crate::error::ConversionError;
use crate::model::{User, UserKind};
use crate::types::UserId;

/// Users decode in full; on the way out only the ID is sent.
pub struct UserConverter;

impl ApiConverter for UserConverter {
    type Api = ApiUser;
    type Model = User;
    const NAME: &'static str = "UserConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiUser) -> Result<User, ConversionError> {
        let kind = match api.kind.as_deref() {
            None => UserKind::Partial,
            Some("person") => UserKind::Person {
                email: api.person.and_then(|person| person.email),
            },
            Some("bot") => UserKind::Bot,
            Some(other) => {
                log::warn!("Unknown user type '{}', keeping it as Unknown", other);
                UserKind::Unknown {
                    type_name: other.to_string(),
                }
            }
        };
        Ok(User {
            id: UserId::from_wire(api.id),
            name: api.name,
            avatar_url: api.avatar_url,
            kind,
        })
    }

    fn model_to_api(&self, model: &User) -> Result<ApiUser, ConversionError> {
        Ok(ApiUser {
            object: Some("user".to_string()),
            id: model.id.to_string(),
            kind: None,
            name: None,
            avatar_url: None,
            person: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_person_and_partial_users() {
        let person: ApiUser = serde_json::from_value(json!({
            "object": "user",
            "id": "u1",
            "type": "person",
            "name": "Leia",
            "avatar_url": null,
            "person": {"email": "leia@example.com"}
        }))
        .unwrap();
        let user = UserConverter.api_to_model(person).unwrap();
        assert_eq!(user.email(), Some("leia@example.com"));
        assert_eq!(user.name.as_deref(), Some("Leia"));

        let partial: ApiUser = serde_json::from_value(json!({"object": "user", "id": "u2"})).unwrap();
        assert_eq!(UserConverter.api_to_model(partial).unwrap().kind, UserKind::Partial);
    }

    #[test]
    fn test_encode_sends_only_the_id() {
        let api = UserConverter
            .model_to_api(&User::reference(UserId::from_wire("u1")))
            .unwrap();
        assert_eq!(
            serde_json::to_value(api).unwrap(),
            json!({"object": "user", "id": "u1"})
        );
    }
}

use std::sync::Arc;

use serde_json::Value;

use crate::config::FunctionProfile;
use crate::response::ResponseEnvelope;
use crate::store::{NewUser, UserStore};

/// Creates the profile's user on every invocation and reports the outcome
/// as a [`ResponseEnvelope`].
#[derive(Clone)]
pub struct CreateUserHandler {
    store: Arc<dyn UserStore>,
    profile: FunctionProfile,
}

impl CreateUserHandler {
    pub fn new(store: Arc<dyn UserStore>, profile: FunctionProfile) -> Self {
        Self { store, profile }
    }

    pub fn profile(&self) -> &FunctionProfile {
        &self.profile
    }

    /// Handle one invocation. The event is opaque; `None` and JSON `null` are
    /// both accepted. Always yields exactly one envelope.
    #[tracing::instrument(
        name = "CreateUserHandler::handle",
        skip(self, event),
        fields(function = %self.profile.name, has_event = event.is_some_and(|e| !e.is_null()))
    )]
    pub async fn handle(&self, event: Option<&Value>) -> ResponseEnvelope {
        let user = NewUser {
            name: self.profile.user_name.clone(),
            email: self.profile.user_email.clone(),
        };

        tracing::info!("Creating user");
        match self.store.create_user(user).await {
            Ok(created) => {
                tracing::info!(user_id = created.id, "User created");
                ResponseEnvelope::ok(self.profile.success_message.clone())
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to create user");
                let message = err
                    .message()
                    .unwrap_or_else(|| self.profile.fallback_message.clone());
                ResponseEnvelope::internal_error(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::user;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Outcome {
        Created,
        Rejected(&'static str),
        Unspecified,
    }

    struct StubStore {
        outcome: Outcome,
        calls: Mutex<Vec<NewUser>>,
    }

    impl StubStore {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl UserStore for StubStore {
        async fn create_user(&self, user: NewUser) -> Result<user::Model, StoreError> {
            self.calls.lock().unwrap().push(user.clone());
            match self.outcome {
                Outcome::Created => Ok(user::Model {
                    id: 1,
                    email: user.email,
                    name: Some(user.name),
                }),
                Outcome::Rejected(msg) => Err(StoreError::rejected(msg)),
                Outcome::Unspecified => Err(StoreError::Unspecified),
            }
        }
    }

    #[tokio::test]
    async fn success_returns_profile_message() {
        let store = StubStore::new(Outcome::Created);
        let handler = CreateUserHandler::new(store.clone(), FunctionProfile::default());

        let envelope = handler.handle(None).await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(
            envelope.body,
            r#"{"message":"hello world from function1 qwerwtr123"}"#
        );
        assert_eq!(
            *store.calls.lock().unwrap(),
            vec![NewUser {
                name: "Alice".to_string(),
                email: "alice@prisma.io123".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn rejection_message_is_returned() {
        let handler = CreateUserHandler::new(
            StubStore::new(Outcome::Rejected("connection refused")),
            FunctionProfile::default(),
        );

        let envelope = handler.handle(None).await;

        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body, r#"{"message":"connection refused"}"#);
    }

    #[tokio::test]
    async fn messageless_failure_uses_fallback() {
        let profile = FunctionProfile {
            fallback_message: "something broke".to_string(),
            ..Default::default()
        };
        let handler = CreateUserHandler::new(StubStore::new(Outcome::Unspecified), profile);

        let envelope = handler.handle(None).await;

        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.message_body().unwrap().message, "something broke");
    }

    #[tokio::test]
    async fn event_shape_does_not_matter() {
        let store = StubStore::new(Outcome::Created);
        let handler = CreateUserHandler::new(store.clone(), FunctionProfile::default());

        let events = [
            Value::Null,
            serde_json::json!({ "httpMethod": "POST", "body": null }),
            serde_json::json!([1, 2, 3]),
            serde_json::json!("plain"),
        ];
        for event in &events {
            let envelope = handler.handle(Some(event)).await;
            assert!(envelope.is_success());
        }

        assert_eq!(store.calls.lock().unwrap().len(), events.len());
    }

    #[tokio::test]
    async fn each_invocation_creates_once() {
        let store = StubStore::new(Outcome::Rejected("boom"));
        let handler = CreateUserHandler::new(store.clone(), FunctionProfile::default());

        handler.handle(None).await;
        handler.handle(None).await;

        assert_eq!(store.calls.lock().unwrap().len(), 2);
    }
}

tonic::include_proto!("clientapi");

mod impls {
    use std::fmt;

    use super::*;

    impl TextMessage {
        pub fn new(message: impl Into<String>, recipient: impl Into<String>) -> Self {
            Self {
                r#for: recipient.into(),
                message: message.into(),
            }
        }

        pub fn recipient(&self) -> &str {
            &self.r#for
        }
    }

    impl fmt::Display for WorkerDetails {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Name: {}, Id: {}", self.name, self.id)
        }
    }

    impl fmt::Display for Subscription {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "\tId: {}, Label: {}", self.id, self.label)
        }
    }
}

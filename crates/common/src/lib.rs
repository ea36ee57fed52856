pub mod types;

pub mod utils {
    pub mod logging;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_serializes_as_object() {
        let v = serde_json::to_value(types::Message::new("hello")).expect("serialize");
        assert_eq!(v, serde_json::json!({"message": "hello"}));
    }
}

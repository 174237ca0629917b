//! Success envelope shared by every 2xx JSON response.

use serde::Serialize;

/// Fixed success wrapper: `{"status":"success","data":...}`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope<T: Serialize> {
    status: &'static str,
    data: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Wrap a response payload.
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wraps_the_payload_under_data() {
        let value = serde_json::to_value(SuccessEnvelope::new(json!({ "id": 1 })))
            .expect("envelope serialises");
        assert_eq!(value, json!({ "status": "success", "data": { "id": 1 } }));
    }
}

/// The uniform success envelope returned by every handler
///
/// Every successful response body has the same four fields:
/// `{"statusCode", "data", "message", "success"}`, with `success` derived
/// from the status code.
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    /// 200 envelope wrapped in an actix response
    pub fn ok(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(200, data, message))
    }

    /// 201 envelope wrapped in an actix response
    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Created().json(Self::new(201, data, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_field_names_are_camel_case() {
        let envelope = ApiResponse::new(200, serde_json::json!({"id": 1}), "Success");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "Success");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn success_derives_from_status_code() {
        assert!(ApiResponse::new(201, (), "created").success);
        assert!(ApiResponse::new(399, (), "edge").success);
        assert!(!ApiResponse::new(400, (), "bad").success);
        assert!(!ApiResponse::new(500, (), "broken").success);
    }
}

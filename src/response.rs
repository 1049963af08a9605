//! Alert headers attached to mutation responses: `X-<app>-alert` carries a
//! message key, `X-<app>-params` the affected id.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

fn alert(application: &str, message: String, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let pairs = [
        (format!("x-{}-alert", application.to_ascii_lowercase()), message),
        (format!("x-{}-params", application.to_ascii_lowercase()), param.to_string()),
    ];
    for (name, value) in pairs {
        // Application names that are not valid header tokens simply get no alert.
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            headers.insert(name, value);
        }
    }
    headers
}

pub fn entity_created(application: &str, entity: &str, id: i64) -> HeaderMap {
    alert(application, format!("{}.{}.created", application, entity), &id.to_string())
}

pub fn entity_updated(application: &str, entity: &str, id: i64) -> HeaderMap {
    alert(application, format!("{}.{}.updated", application, entity), &id.to_string())
}

pub fn entity_deleted(application: &str, entity: &str, id: i64) -> HeaderMap {
    alert(application, format!("{}.{}.deleted", application, entity), &id.to_string())
}

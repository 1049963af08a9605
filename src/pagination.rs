//! Page request parsing from `page` / `size` / `sort` query parameters, and the
//! `X-Total-Count` / `Link` response headers.

use crate::error::AppError;
use crate::model::EntityDescriptor;
use crate::sql::{Direction, PageRequest, SortOrder};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Build a page request. Unparseable `page`/`size` fall back to defaults;
/// sort properties must name a column of `entity`.
///
/// `sort` follows `prop[,prop...][,asc|desc]` and may repeat.
pub fn page_request(entity: &EntityDescriptor, params: &[(String, String)]) -> Result<PageRequest, AppError> {
    let mut page = 0u32;
    let mut size = PageRequest::DEFAULT_SIZE;
    let mut sort = Vec::new();
    for (k, v) in params {
        match k.as_str() {
            "page" => page = v.parse().unwrap_or(0),
            "size" => {
                size = v
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .unwrap_or(PageRequest::DEFAULT_SIZE)
            }
            "sort" => sort.extend(parse_sort(entity, v)?),
            _ => {}
        }
    }
    let mut request = PageRequest::new(page, size);
    request.sort = sort;
    Ok(request)
}

fn parse_sort(entity: &EntityDescriptor, value: &str) -> Result<Vec<SortOrder>, AppError> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    let direction = match parts.last().map(|s| s.to_ascii_lowercase()) {
        Some(d) if d == "desc" => {
            parts.pop();
            Direction::Desc
        }
        Some(d) if d == "asc" => {
            parts.pop();
            Direction::Asc
        }
        _ => Direction::Asc,
    };
    parts
        .into_iter()
        .map(|prop| {
            entity
                .column_by_property(prop)
                .map(|c| SortOrder {
                    column: c.name,
                    direction,
                })
                .ok_or_else(|| {
                    AppError::bad_request(
                        entity.entity_name,
                        "sortinvalid",
                        format!("cannot sort by unknown property: {}", prop),
                    )
                })
        })
        .collect()
}

/// Query string with `page` and `size` replaced, other parameters kept as sent.
fn page_uri(path: &str, query: Option<&str>, page: u64, size: u32) -> String {
    let mut parts: Vec<String> = query
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("page=") && !p.starts_with("size="))
        .map(str::to_string)
        .collect();
    parts.push(format!("page={}", page));
    parts.push(format!("size={}", size));
    format!("{}?{}", path, parts.join("&"))
}

/// `X-Total-Count` plus a `Link` header with next, prev, last and first pages.
pub fn pagination_headers(path: &str, query: Option<&str>, page: &PageRequest, total: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(TOTAL_COUNT_HEADER), HeaderValue::from(total));

    let current = u64::from(page.page);
    let last = page.total_pages(total).saturating_sub(1);
    let link = |p: u64, rel: &str| format!("<{}>; rel=\"{}\"", page_uri(path, query, p, page.size), rel);
    let mut links = Vec::new();
    if current < last {
        links.push(link(current + 1, "next"));
    }
    if current > 0 {
        links.push(link(current - 1, "prev"));
    }
    links.push(link(last, "last"));
    links.push(link(0, "first"));
    if let Ok(v) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(header::LINK, v);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RATINGS, USERS};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults() {
        let p = page_request(&USERS, &[]).unwrap();
        assert_eq!(p, PageRequest::new(0, 20));
        let p = page_request(&USERS, &params(&[("page", "x"), ("size", "0")])).unwrap();
        assert_eq!(p, PageRequest::new(0, 20));
    }

    #[test]
    fn size_is_capped() {
        let p = page_request(&USERS, &params(&[("size", "50000")])).unwrap();
        assert_eq!(p.size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn sort_properties_resolve_to_columns() {
        let p = page_request(
            &USERS,
            &params(&[("sort", "lastName,desc"), ("sort", "firstName,id"), ("page", "3")]),
        )
        .unwrap();
        assert_eq!(p.page, 3);
        assert_eq!(
            p.sort,
            vec![
                SortOrder {
                    column: "last_name",
                    direction: Direction::Desc
                },
                SortOrder {
                    column: "first_name",
                    direction: Direction::Asc
                },
                SortOrder {
                    column: "id",
                    direction: Direction::Asc
                },
            ]
        );
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        let err = page_request(&RATINGS, &params(&[("sort", "stars,asc")])).unwrap_err();
        assert_eq!(err.code(), "sortinvalid");
    }

    #[test]
    fn link_header_on_middle_page() {
        let page = PageRequest::new(1, 10);
        let headers = pagination_headers("/api/public/movies", Some("page=1&size=10&sort=title,asc"), &page, 35);
        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "35");
        let link = headers.get(header::LINK).unwrap().to_str().unwrap();
        assert_eq!(
            link,
            "</api/public/movies?sort=title,asc&page=2&size=10>; rel=\"next\",\
             </api/public/movies?sort=title,asc&page=0&size=10>; rel=\"prev\",\
             </api/public/movies?sort=title,asc&page=3&size=10>; rel=\"last\",\
             </api/public/movies?sort=title,asc&page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn link_header_with_no_rows() {
        let headers = pagination_headers("/api/public/movies", None, &PageRequest::default(), 0);
        let link = headers.get(header::LINK).unwrap().to_str().unwrap();
        assert!(!link.contains("rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));
        assert!(link.contains("</api/public/movies?page=0&size=20>; rel=\"last\""));
    }
}

use crate::error::{RankerError, Result};
use url::Url;

/// Pagination relations carried by a response's `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    /// Parse a header such as
    /// `<https://api.github.com/orgs/x/repos?page=2>; rel="next", <...?page=5>; rel="last"`.
    /// Unknown relations and malformed entries are ignored.
    pub fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let target = match parts.next().map(str::trim) {
                Some(t) if t.starts_with('<') && t.ends_with('>') => &t[1..t.len() - 1],
                _ => continue,
            };

            for param in parts {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    match rel {
                        "next" => links.next = Some(target.to_string()),
                        "last" => links.last = Some(target.to_string()),
                        _ => {}
                    }
                }
            }
        }

        links
    }
}

/// Read the `page` query parameter of a pagination URL.
pub fn page_number(link: &str) -> Result<u64> {
    let url = Url::parse(link).map_err(|e| {
        RankerError::ImproperlyFormattedData(format!("Bad pagination URL {}: {}", link, e))
    })?;

    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            RankerError::ImproperlyFormattedData(format!("No page parameter in {}", link))
        })?;

    page.parse::<u64>()
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| {
            RankerError::ImproperlyFormattedData(format!(
                "Page number '{}' in {} is not a positive integer",
                page, link
            ))
        })
}

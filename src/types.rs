use serde::Deserialize;
use serde_json::Value;

// GitHub API response structures

/// One entry of `GET /orgs/{org}/repos`. Only `name` and `id` are decoded
/// strictly; count fields are read on demand so a bad value in one of them
/// only matters when ranking by it.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub id: u64,
    #[serde(default)]
    pub stargazers_count: Option<Value>,
    #[serde(default)]
    pub forks_count: Option<Value>,
}

impl GitHubRepo {
    pub fn stars(&self) -> Result<u64, String> {
        count_value(self.stargazers_count.as_ref(), "stargazers_count")
    }

    pub fn forks(&self) -> Result<u64, String> {
        count_value(self.forks_count.as_ref(), "forks_count")
    }
}

fn count_value(value: Option<&Value>, field: &str) -> Result<u64, String> {
    match value {
        None | Some(Value::Null) => Err(format!("missing {}", field)),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| format!("malformed {}: {}", field, v)),
    }
}

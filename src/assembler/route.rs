use serde::{Deserialize, Serialize};

/// The endpoint a compiled unit is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
    /// Overrides the name derived from `name`.
    #[serde(default)]
    pub function_name: Option<String>,
}

impl RouteSpec {
    pub fn new(id: &str, name: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            description: String::new(),
            function_name: None,
        }
    }

    pub fn with_function_name(mut self, function_name: &str) -> Self {
        self.function_name = Some(function_name.to_string());
        self
    }

    /// Name of the orchestration function: the explicit name if set, otherwise the
    /// route name as a lower-case identifier followed by `suffix`.
    ///
    /// ```
    /// use kumitate::assembler::RouteSpec;
    ///
    /// let route = RouteSpec::new("r1", "Get User-Profile", "/users/{id}");
    /// assert_eq!(route.function_name("_request"), "get_user_profile_request");
    /// ```
    pub fn function_name(&self, suffix: &str) -> String {
        match &self.function_name {
            Some(explicit) => explicit.clone(),
            None => format!("{}{}", identifier(&self.name), suffix),
        }
    }
}

fn identifier(name: &str) -> String {
    let mut ident: String = name
        .trim()
        .chars()
        .filter(|c| *c != '/')
        .map(|c| match c {
            ' ' | '-' => '_',
            c if c.is_alphanumeric() || c == '_' => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_function_name_wins() {
        let route = RouteSpec::new("r", "Create Order", "/orders").with_function_name("place");
        assert_eq!(route.function_name("_request"), "place");
    }

    #[test]
    fn derived_name_is_a_valid_identifier() {
        let route = RouteSpec::new("r", "3d/Render v2", "/render");
        assert_eq!(route.function_name("_request"), "_3drender_v2_request");
    }
}

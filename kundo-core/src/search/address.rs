//! Shareable address state for the search page.

/// The part of the search page that lives in its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressState {
    pub query: String,
    pub page: u32,
}

impl Default for AddressState {
    fn default() -> Self {
        Self::new("", 1)
    }
}

impl AddressState {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
        }
    }

    /// Reads the initial state from raw `q` / `page` parameters.
    ///
    /// A missing, non-numeric or zero page means page 1.
    pub fn from_params(query: Option<&str>, page: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1);
        Self::new(query.unwrap_or_default(), page)
    }

    /// `q=<query>&page=<n>`, leaving out `q` when empty and `page` when 1.
    pub fn query_string(&self) -> String {
        let mut params = Vec::with_capacity(2);
        if !self.query.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.query)));
        }
        if self.page > 1 {
            params.push(format!("page={}", self.page));
        }
        params.join("&")
    }

    /// Location of the search page for this state.
    pub fn to_href(&self) -> String {
        self.href_for("/")
    }

    /// `path` with this state appended as a query string.
    pub fn href_for(&self, path: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Same query, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self::new(self.query.clone(), page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_omits_defaults() {
        assert_eq!(AddressState::default().to_href(), "/");
        assert_eq!(AddressState::new("", 1).to_href(), "/");
        assert_eq!(AddressState::new("matrix", 1).to_href(), "/?q=matrix");
        assert_eq!(AddressState::new("", 3).to_href(), "/?page=3");
        assert_eq!(
            AddressState::new("Blade Runner", 2).to_href(),
            "/?q=Blade%20Runner&page=2"
        );
    }

    #[test]
    fn test_from_params_defaults_page() {
        assert_eq!(
            AddressState::from_params(Some("alien"), None),
            AddressState::new("alien", 1)
        );
        assert_eq!(AddressState::from_params(None, Some("abc")).page, 1);
        assert_eq!(AddressState::from_params(None, Some("0")).page, 1);
        assert_eq!(AddressState::from_params(None, Some("-2")).page, 1);
        assert_eq!(AddressState::from_params(None, Some(" 4 ")).page, 4);
    }

    #[test]
    fn test_href_for_other_paths() {
        let address = AddressState::new("a&b", 1).with_page(3);
        assert_eq!(address.href_for("/htmx/search"), "/htmx/search?q=a%26b&page=3");
    }
}

//! Request routing for the three read endpoints.
//!
//! Paths are parsed once into a [`Route`] and dispatched with a `match`, so the server
//! never splits strings ad hoc. Unknown company or account ids still produce a valid
//! route; only the path *shape* decides whether a request is recognized.

/// A parsed request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/companies`
    ListCompanies,
    /// `/companies/{companyId}/accounts`
    ListAccounts {
        /// Company whose accounts are requested.
        company_id: String,
    },
    /// `/accounts/{accountId}/data`
    GetAccountData {
        /// Account whose quotes are requested.
        account_id: String,
    },
    /// Any other path.
    Unrecognized,
}

impl Route {
    /// Parse a request target into a route.
    ///
    /// The query string and fragment are ignored, as is a single trailing slash.
    /// Ids must be non-empty; `/companies//accounts` is unrecognized.
    pub fn parse(target: &str) -> Self {
        let path = target.split(['?', '#']).next().unwrap_or_default();
        let Some(rest) = path.strip_prefix('/') else {
            return Route::Unrecognized;
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();

        match segments.as_slice() {
            ["companies"] => Route::ListCompanies,
            ["companies", id, "accounts"] if !id.is_empty() => Route::ListAccounts {
                company_id: id.to_string(),
            },
            ["accounts", id, "data"] if !id.is_empty() => Route::GetAccountData {
                account_id: id.to_string(),
            },
            _ => Route::Unrecognized,
        }
    }

    /// Path a viewer requests for this route; `None` for `Unrecognized`.
    pub fn path(&self) -> Option<String> {
        match self {
            Route::ListCompanies => Some(String::from("/companies")),
            Route::ListAccounts { company_id } => Some(format!("/companies/{}/accounts", company_id)),
            Route::GetAccountData { account_id } => Some(format!("/accounts/{}/data", account_id)),
            Route::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_endpoints() {
        assert_eq!(Route::parse("/companies"), Route::ListCompanies);
        assert_eq!(
            Route::parse("/companies/c1/accounts"),
            Route::ListAccounts {
                company_id: "c1".into()
            }
        );
        assert_eq!(
            Route::parse("/accounts/a2/data"),
            Route::GetAccountData {
                account_id: "a2".into()
            }
        );
    }

    #[test]
    fn ignores_query_string_and_trailing_slash() {
        assert_eq!(Route::parse("/companies/?t=1"), Route::ListCompanies);
        assert_eq!(
            Route::parse("/accounts/a1/data/"),
            Route::GetAccountData {
                account_id: "a1".into()
            }
        );
    }

    #[test]
    fn unknown_shapes_are_unrecognized() {
        for target in [
            "/unknown/path",
            "",
            "companies",
            "/",
            "/companies/c1",
            "/companies//accounts",
            "/accounts/a1",
            "/accounts/a1/data/extra",
            "/COMPANIES",
        ] {
            assert_eq!(Route::parse(target), Route::Unrecognized, "{target}");
        }
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::ListAccounts {
            company_id: "c2".into(),
        };
        let path = route.path().unwrap();
        assert_eq!(Route::parse(&path), route);
        assert_eq!(Route::Unrecognized.path(), None);
    }
}

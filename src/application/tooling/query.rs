//! Translation of validated tool arguments into Karbon's OData-style query
//! parameters.

use crate::types::{
    ClientType, GetClientArgs, GetWorkItemByIdArgs, GetWorkItemsArgs, SearchClientsArgs,
};

pub const MAX_PAGE_SIZE: f64 = 100.0;
pub const DEFAULT_SEARCH_PAGE_SIZE: f64 = 50.0;
pub const DEFAULT_WORK_ITEM_PAGE_SIZE: f64 = 100.0;

const WORK_ITEMS: &str = "WorkItems";
const WORK_ITEM_ORDER: &str = "StartDate desc";

/// Ordered query parameters. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteQuery {
    params: Vec<(&'static str, String)>,
}

impl RemoteQuery {
    fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A single GET against the API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    pub path: String,
    pub query: RemoteQuery,
}

/// The three collection queries behind `search_clients`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSearchPlan {
    pub contacts: RemoteRequest,
    pub organizations: RemoteRequest,
    pub client_groups: RemoteRequest,
}

/// Caps a requested page size at 100. There is deliberately no lower bound.
pub fn page_size(requested: Option<f64>, default: f64) -> f64 {
    requested.unwrap_or(default).min(MAX_PAGE_SIZE)
}

pub fn client_lookup(args: &GetClientArgs) -> RemoteRequest {
    RemoteRequest {
        path: resource_path(args.client_type.collection(), &args.client_id),
        query: RemoteQuery::default().with("$expand", args.client_type.detail_expand()),
    }
}

pub fn client_search(args: &SearchClientsArgs) -> ClientSearchPlan {
    let top = format_page_size(page_size(args.max_results, DEFAULT_SEARCH_PAGE_SIZE));
    let term = args.search_term.as_str();

    let name_or_email = format!(
        "({}) or ({})",
        contains("FullName", term),
        contains("EmailAddress", term)
    );
    let search = |kind: ClientType, filter: String| RemoteRequest {
        path: format!("/{}", kind.collection()),
        query: RemoteQuery::default()
            .with("$filter", filter)
            .with("$expand", kind.search_expand())
            .with("$top", top.clone()),
    };

    ClientSearchPlan {
        contacts: search(ClientType::Contact, name_or_email.clone()),
        organizations: search(ClientType::Organization, name_or_email),
        client_groups: search(ClientType::ClientGroup, contains("FullName", term)),
    }
}

pub fn work_item_listing(args: &GetWorkItemsArgs) -> RemoteRequest {
    let top = page_size(args.max_results, DEFAULT_WORK_ITEM_PAGE_SIZE);
    let mut query = RemoteQuery::default()
        .with("$top", format_page_size(top))
        .with("$orderby", WORK_ITEM_ORDER);
    if let Some(filter) = work_item_filter(args) {
        query = query.with("$filter", filter);
    }
    RemoteRequest {
        path: format!("/{WORK_ITEMS}"),
        query,
    }
}

pub fn work_item_lookup(args: &GetWorkItemByIdArgs) -> RemoteRequest {
    RemoteRequest {
        path: resource_path(WORK_ITEMS, &args.work_item_key),
        query: RemoteQuery::default(),
    }
}

/// Conjunction of the supplied work item filters, in the order client key,
/// work type, title. Empty strings add no clause.
pub fn work_item_filter(args: &GetWorkItemsArgs) -> Option<String> {
    let present = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };

    let mut clauses = Vec::new();
    if let Some(client_key) = present(&args.client_key) {
        clauses.push(equals("ClientKey", &client_key));
    }
    if let Some(work_type) = present(&args.work_type) {
        clauses.push(equals("WorkType", &work_type));
    }
    if let Some(title) = present(&args.title_filter) {
        clauses.push(format!("({})", contains("Title", &title)));
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" and "))
    }
}

/// Places a caller-supplied value into a filter string literal.
///
/// The value is inserted verbatim: embedded quotes are not escaped, so a value
/// containing `'` changes the shape of the expression. Escaping belongs here
/// and nowhere else.
pub fn filter_literal(value: &str) -> String {
    format!("'{value}'")
}

/// Caller-supplied keys are used as path segments verbatim, like filter values.
fn resource_path(collection: &str, key: &str) -> String {
    format!("/{collection}/{key}")
}

fn contains(field: &str, value: &str) -> String {
    format!("contains({field}, {})", filter_literal(value))
}

fn equals(field: &str, value: &str) -> String {
    format!("{field} eq {}", filter_literal(value))
}

fn format_page_size(size: f64) -> String {
    size.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_items(
        client_key: Option<&str>,
        work_type: Option<&str>,
        title_filter: Option<&str>,
    ) -> GetWorkItemsArgs {
        GetWorkItemsArgs {
            client_key: client_key.map(String::from),
            work_type: work_type.map(String::from),
            title_filter: title_filter.map(String::from),
            max_results: None,
        }
    }

    #[test]
    fn client_lookup_selects_collection_and_expand_per_type() {
        let cases = [
            (ClientType::Contact, "/Contacts/abc", "BusinessCards,ClientTeam"),
            (
                ClientType::Organization,
                "/Organizations/abc",
                "BusinessCards,ClientTeam,Contacts",
            ),
            (ClientType::ClientGroup, "/ClientGroups/abc", "BusinessCard,ClientTeam"),
        ];
        for (client_type, path, expand) in cases {
            let request = client_lookup(&GetClientArgs {
                client_id: "abc".to_string(),
                client_type,
            });
            assert_eq!(request.path, path);
            assert_eq!(request.query.get("$expand"), Some(expand));
            assert_eq!(request.query.iter().count(), 1);
        }
    }

    #[test]
    fn search_builds_name_and_email_filters() {
        let plan = client_search(&SearchClientsArgs {
            search_term: "Smith".to_string(),
            max_results: None,
        });

        let expected = "(contains(FullName, 'Smith')) or (contains(EmailAddress, 'Smith'))";
        assert_eq!(plan.contacts.path, "/Contacts");
        assert_eq!(plan.contacts.query.get("$filter"), Some(expected));
        assert_eq!(plan.contacts.query.get("$expand"), Some("BusinessCards"));
        assert_eq!(plan.organizations.path, "/Organizations");
        assert_eq!(plan.organizations.query.get("$filter"), Some(expected));
        assert_eq!(plan.organizations.query.get("$expand"), Some("BusinessCards"));
        assert_eq!(plan.client_groups.path, "/ClientGroups");
        assert_eq!(
            plan.client_groups.query.get("$filter"),
            Some("contains(FullName, 'Smith')")
        );
        assert_eq!(plan.client_groups.query.get("$expand"), Some("BusinessCard"));
    }

    #[test]
    fn search_parameter_order_is_filter_expand_top() {
        let plan = client_search(&SearchClientsArgs {
            search_term: "a".to_string(),
            max_results: Some(10.0),
        });
        let names: Vec<&str> = plan.contacts.query.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["$filter", "$expand", "$top"]);
        assert_eq!(plan.contacts.query.get("$top"), Some("10"));
    }

    #[test]
    fn search_page_size_defaults_to_fifty_and_caps_at_hundred() {
        let default = client_search(&SearchClientsArgs {
            search_term: "a".to_string(),
            max_results: None,
        });
        assert_eq!(default.client_groups.query.get("$top"), Some("50"));

        let capped = client_search(&SearchClientsArgs {
            search_term: "a".to_string(),
            max_results: Some(500.0),
        });
        for request in [&capped.contacts, &capped.organizations, &capped.client_groups] {
            assert_eq!(request.query.get("$top"), Some("100"));
        }
    }

    #[test]
    fn page_size_has_no_lower_clamp() {
        assert_eq!(page_size(Some(0.0), 50.0), 0.0);
        assert_eq!(page_size(Some(-5.0), 50.0), -5.0);
        assert_eq!(page_size(Some(2.5), 50.0), 2.5);
        assert_eq!(format_page_size(2.5), "2.5");
        assert_eq!(format_page_size(-5.0), "-5");
    }

    #[test]
    fn work_item_listing_without_filters_omits_filter_parameter() {
        let request = work_item_listing(&GetWorkItemsArgs::default());
        assert_eq!(request.path, "/WorkItems");
        assert_eq!(request.query.get("$filter"), None);
        assert_eq!(request.query.get("$orderby"), Some("StartDate desc"));
        assert_eq!(request.query.get("$top"), Some("100"));
    }

    #[test]
    fn work_item_filter_joins_clauses_in_fixed_order() {
        assert_eq!(
            work_item_filter(&work_items(Some("abc"), Some("Tax"), None)).as_deref(),
            Some("ClientKey eq 'abc' and WorkType eq 'Tax'")
        );
        assert_eq!(
            work_item_filter(&work_items(Some("abc"), Some("Tax"), Some("2024"))).as_deref(),
            Some("ClientKey eq 'abc' and WorkType eq 'Tax' and (contains(Title, '2024'))")
        );
        assert_eq!(
            work_item_filter(&work_items(None, None, Some("Payroll"))).as_deref(),
            Some("(contains(Title, 'Payroll'))")
        );
    }

    #[test]
    fn empty_strings_add_no_filter_clause() {
        assert_eq!(work_item_filter(&work_items(Some(""), Some(""), Some(""))), None);
        assert_eq!(
            work_item_filter(&work_items(Some(""), Some("Tax"), None)).as_deref(),
            Some("WorkType eq 'Tax'")
        );
    }

    #[test]
    fn values_are_interpolated_without_escaping() {
        assert_eq!(filter_literal("O'Brien"), "'O'Brien'");
        assert_eq!(
            work_item_filter(&work_items(Some("x' or 1 eq 1 or 'y"), None, None)).as_deref(),
            Some("ClientKey eq 'x' or 1 eq 1 or 'y'")
        );

        let request = work_item_lookup(&GetWorkItemByIdArgs {
            work_item_key: "A/B".to_string(),
        });
        assert_eq!(request.path, "/WorkItems/A/B");
        assert!(request.query.is_empty());
    }
}

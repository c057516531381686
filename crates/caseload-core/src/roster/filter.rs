use tracing::trace;

use crate::models::Client;
use crate::utils::contains_ignore_case;

/// Clients whose name contains `query`, ignoring case, in their original order.
///
/// An empty query keeps every client.
pub fn filter_by_name<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    if query.is_empty() {
        return clients.iter().collect();
    }

    let query = query.to_lowercase();
    let matched: Vec<&Client> = clients
        .iter()
        .filter(|c| contains_ignore_case(&c.name, &query))
        .collect();

    trace!(total = clients.len(), matched = matched.len(), %query, "Filtered roster by name");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client(id: &str, name: &str) -> Client {
        Client::new(id, name, "Dr. Grey", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn roster() -> Vec<Client> {
        vec![
            client("1", "Maria Lopez"),
            client("2", "Sam Carter"),
            client("3", "MARIANNE Ho"),
            client("4", "Tom Ruiz"),
        ]
    }

    fn ids(clients: &[&Client]) -> Vec<String> {
        clients.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let clients = roster();
        assert_eq!(ids(&filter_by_name(&clients, "")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let clients = roster();
        assert_eq!(ids(&filter_by_name(&clients, "maria")), vec!["1", "3"]);
        assert_eq!(ids(&filter_by_name(&clients, "RUIZ")), vec!["4"]);
    }

    #[test]
    fn test_substring_anywhere_in_name() {
        let clients = roster();
        assert_eq!(ids(&filter_by_name(&clients, "art")), vec!["2"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let clients = roster();
        assert!(filter_by_name(&clients, "zzz").is_empty());
    }

    #[test]
    fn test_only_name_is_searched() {
        let clients = roster();
        assert!(filter_by_name(&clients, "Grey").is_empty());
    }
}

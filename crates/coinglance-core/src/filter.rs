//! Name search over a coin list.

use crate::Coin;

/// Returns the coins whose `name` contains `query`, ignoring case.
///
/// Only the name is searched; symbol and id never match. A blank query keeps
/// every coin, and surrounding whitespace in the query is ignored. Input order
/// is preserved.
pub fn filter_by_name(coins: &[Coin], query: &str) -> Vec<Coin> {
    let needle = query.trim();
    if needle.is_empty() {
        return coins.to_vec();
    }

    let needle = needle.to_lowercase();
    coins
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, name: &str, symbol: &str) -> Coin {
        Coin::new(id, name, symbol, 1.0, Some(0.0)).expect("valid coin")
    }

    fn sample() -> Vec<Coin> {
        vec![
            coin("bitcoin", "Bitcoin", "btc"),
            coin("ethereum", "Ethereum", "eth"),
            coin("bitcoin-cash", "Bitcoin Cash", "bch"),
            coin("tether", "Tether", "usdt"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let coins = sample();
        assert_eq!(filter_by_name(&coins, ""), coins);
    }

    #[test]
    fn whitespace_query_is_identity() {
        let coins = sample();
        assert_eq!(filter_by_name(&coins, "   \t"), coins);
    }

    #[test]
    fn match_ignores_case() {
        let coins = vec![coin("bitcoin", "Bitcoin", "btc")];
        assert_eq!(
            filter_by_name(&coins, "BIT"),
            filter_by_name(&coins, "bit")
        );
        assert_eq!(filter_by_name(&coins, "BIT").len(), 1);
    }

    #[test]
    fn no_match_yields_empty() {
        let coins = vec![coin("bitcoin", "Bitcoin", "btc")];
        assert!(filter_by_name(&coins, "xyz").is_empty());
    }

    #[test]
    fn symbol_and_id_are_not_searched() {
        let coins = sample();
        assert!(filter_by_name(&coins, "usdt").is_empty());
        assert!(filter_by_name(&coins, "bitcoin-cash").is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let names: Vec<String> = filter_by_name(&sample(), "coin")
            .into_iter()
            .map(|coin| coin.name)
            .collect();
        assert_eq!(names, vec!["Bitcoin", "Bitcoin Cash"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let coins = sample();
        for query in ["", "e", "BIT", "cash", "nothing"] {
            let once = filter_by_name(&coins, query);
            assert_eq!(filter_by_name(&once, query), once, "query {query:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let coins = sample();
        assert_eq!(filter_by_name(&coins, "  ether "), filter_by_name(&coins, "ether"));
    }
}

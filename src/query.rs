//! Ordered query-parameter construction.
//!
//! The OpenSky API represents array-valued parameters by repeating the
//! same name (`icao24=a&icao24=b`), with no bracket suffixes or comma
//! joining. Items are kept in insertion order so request URLs are
//! deterministic in logs.

use std::fmt::Display;

/// Builds an ordered list of `(name, value)` query items.
#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    items: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one scalar parameter.
    pub fn param(mut self, name: &'static str, value: impl Display) -> Self {
        self.items.push((name, value.to_string()));
        self
    }

    /// Append one scalar parameter, or nothing if the value is absent.
    pub fn opt_param(self, name: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Append a boolean flag: `true` encodes as `name=1`, `false` emits
    /// nothing at all (absence means "off").
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on {
            self.param(name, 1)
        } else {
            self
        }
    }

    /// Append one item per element, all under the same name, preserving
    /// the caller-supplied order.
    pub fn repeated<T: Display>(
        mut self,
        name: &'static str,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        for value in values {
            self.items.push((name, value.to_string()));
        }
        self
    }

    pub fn into_items(self) -> Vec<(&'static str, String)> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Icao24;

    #[test]
    fn test_empty_builder() {
        assert!(QueryBuilder::new().into_items().is_empty());
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let items = QueryBuilder::new()
            .param("begin", 1_517_227_200u64)
            .param("end", 1_517_230_800u64)
            .param("airport", "EDDF")
            .into_items();

        assert_eq!(
            items,
            vec![
                ("begin", "1517227200".to_string()),
                ("end", "1517230800".to_string()),
                ("airport", "EDDF".to_string()),
            ]
        );
    }

    #[test]
    fn test_opt_param() {
        let items = QueryBuilder::new()
            .opt_param("time", Some(42u64))
            .opt_param("extended", None::<u64>)
            .into_items();
        assert_eq!(items, vec![("time", "42".to_string())]);
    }

    #[test]
    fn test_flag_encoding() {
        let items = QueryBuilder::new().flag("extended", true).into_items();
        assert_eq!(items, vec![("extended", "1".to_string())]);

        assert!(QueryBuilder::new().flag("extended", false).into_items().is_empty());
    }

    #[test]
    fn test_repeated_items() {
        let transponders = ["3c6444", "4b1805", "A4F3C2"]
            .iter()
            .map(|s| Icao24::new(s).unwrap())
            .collect::<Vec<_>>();

        let items = QueryBuilder::new()
            .repeated("icao24", &transponders)
            .into_items();

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|(name, _)| *name == "icao24"));
        assert_eq!(
            items.iter().map(|(_, v)| v.as_str()).collect::<Vec<_>>(),
            vec!["3c6444", "4b1805", "a4f3c2"]
        );
    }

    #[test]
    fn test_repeated_empty_sequence() {
        let items = QueryBuilder::new()
            .repeated("serials", Vec::<u64>::new())
            .into_items();
        assert!(items.is_empty());
    }
}

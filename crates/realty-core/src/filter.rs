// ── Filter predicates for resource collections ──
//
// Pure, order-preserving narrowing of a snapshot by a search term (OR over
// the entity's text fields) and categorical facets (AND across facets).

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::model::{ContentPage, Job, Property, TeamMember, User};

/// Sentinel value that disables a categorical filter.
pub const ALL: &str = "all";

/// An entity that can be searched and faceted.
pub trait Filterable {
    /// Text fields matched against the search term.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a named categorical facet, or `None` if the entity has no
    /// such facet.
    fn facet(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// One categorical filter value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(want) => value == Some(want.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// `"all"` (any case) or an empty string means no filtering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_owned()))
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |v| v.parse().unwrap_or_default())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(v) => f.write_str(v),
        }
    }
}

/// Search term plus named categorical filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    search: String,
    categories: BTreeMap<String, CategoryFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn category(mut self, facet: impl Into<String>, filter: CategoryFilter) -> Self {
        self.set_category(facet, filter);
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_category(&mut self, facet: impl Into<String>, filter: CategoryFilter) {
        self.categories.insert(facet.into(), filter);
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryFilter)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.matches_search(item)
            && self
                .categories
                .iter()
                .all(|(facet, filter)| filter.matches(item.facet(facet).as_deref()))
    }

    /// Case-insensitive substring match of the term as given. Surrounding
    /// whitespace is part of the term.
    fn matches_search<T: Filterable>(&self, item: &T) -> bool {
        let needle = self.search.to_lowercase();
        needle.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }

    /// The matching subsequence of `items`, in original order.
    pub fn apply<T: Filterable>(&self, items: &[Arc<T>]) -> Vec<Arc<T>> {
        items
            .iter()
            .filter(|item| self.matches(item.as_ref()))
            .cloned()
            .collect()
    }
}

/// Filter `items` by `search` and categorical `filters`.
pub fn filter<T: Filterable>(
    items: &[Arc<T>],
    search: &str,
    filters: &[(&str, CategoryFilter)],
) -> Vec<Arc<T>> {
    let spec = filters.iter().fold(FilterSpec::new().search(search), |spec, (facet, f)| {
        spec.category(*facet, f.clone())
    });
    spec.apply(items)
}

fn flag(value: bool) -> Cow<'static, str> {
    Cow::Borrowed(if value { "true" } else { "false" })
}

// ── Entity facets ────────────────────────────────────────────────────

impl Filterable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            _ => None,
        }
    }
}

impl Filterable for Property {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.location.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "type" => Some(Cow::Borrowed(self.property_type.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "featured" => Some(flag(self.featured)),
            _ => None,
        }
    }
}

impl Filterable for TeamMember {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            _ => None,
        }
    }
}

impl Filterable for Job {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.department.as_str(), self.location.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "type" => Some(Cow::Borrowed(self.job_type.as_str())),
            "remote" => Some(flag(self.remote)),
            _ => None,
        }
    }
}

impl Filterable for ContentPage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.slug.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "published" => Some(flag(self.published)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn property(title: &str, location: &str, kind: &str) -> Arc<Property> {
        Arc::new(Property {
            title: title.into(),
            location: location.into(),
            property_type: kind.into(),
            status: "available".into(),
            ..Property::default()
        })
    }

    fn titles(items: &[Arc<Property>]) -> Vec<&str> {
        items.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn villa_search_with_all_type() {
        let items = vec![
            property("Sunset Villa", "Malibu", "villa"),
            property("Downtown Loft", "Chicago", "apartment"),
        ];
        let visible = filter(&items, "villa", &[("type", "all".parse().unwrap())]);
        assert_eq!(titles(&visible), ["Sunset Villa"]);
    }

    #[test]
    fn search_covers_every_text_field() {
        let items = vec![
            property("Harbour House", "Sydney", "house"),
            property("Garden Flat", "London", "apartment"),
        ];
        assert_eq!(titles(&filter(&items, "LONDON", &[])), ["Garden Flat"]);
    }

    #[test]
    fn facets_are_anded() {
        let items = vec![
            property("A", "x", "villa"),
            property("B", "x", "house"),
        ];
        let spec = FilterSpec::new()
            .category("type", CategoryFilter::only("villa"))
            .category("status", CategoryFilter::only("sold"));
        assert!(spec.apply(&items).is_empty());

        let spec = FilterSpec::new().category("type", CategoryFilter::only("villa"));
        assert_eq!(titles(&spec.apply(&items)), ["A"]);
    }

    #[test]
    fn category_compares_exactly() {
        let items = vec![property("A", "x", "Villa"), property("B", "x", "villa")];
        let visible = filter(&items, "", &[("type", CategoryFilter::only("villa"))]);
        assert_eq!(titles(&visible), ["B"]);
    }

    #[test]
    fn search_term_is_not_trimmed() {
        let items = vec![property("Villa", "x", "villa"), property("Villa Rosa", "x", "villa")];
        assert_eq!(titles(&filter(&items, "villa ", &[])), ["Villa Rosa"]);
        assert_eq!(titles(&filter(&items, " ", &[])), ["Villa Rosa"]);
    }

    #[test]
    fn unknown_facet_never_matches_a_value() {
        let items = vec![property("A", "x", "villa")];
        let spec = FilterSpec::new().category("colour", CategoryFilter::only("red"));
        assert!(spec.apply(&items).is_empty());
        let spec = FilterSpec::new().category("colour", CategoryFilter::All);
        assert_eq!(spec.apply(&items).len(), 1);
    }

    #[test]
    fn category_filter_parsing() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "studio".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::only("studio")
        );
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
    }

    #[test]
    fn job_remote_facet() {
        let remote = Arc::new(Job {
            title: "Analyst".into(),
            remote: true,
            ..Job::default()
        });
        let onsite = Arc::new(Job {
            title: "Agent".into(),
            ..Job::default()
        });
        let spec = FilterSpec::new().category("remote", CategoryFilter::only("true"));
        let out = spec.apply(&[remote, onsite]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Analyst");
    }

    fn arb_property() -> impl Strategy<Value = Arc<Property>> {
        (
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,12}",
            prop::sample::select(vec!["villa", "Villa", "apartment", "house", "HOUSE", "studio"]),
        )
            .prop_map(|(t, l, k)| property(&t, &l, k))
    }

    proptest! {
        #[test]
        fn result_is_the_ordered_matching_subsequence(
            items in prop::collection::vec(arb_property(), 0..20),
            search in "[ ]?[a-zA-Z]{0,3}[ ]?",
            kind in prop::sample::select(vec!["all", "villa", "Villa", "house"]),
        ) {
            let out = filter(&items, &search, &[("type", kind.parse().unwrap())]);

            let term = search.to_lowercase();
            let keep = |p: &Property| {
                (p.title.to_lowercase().contains(&term) || p.location.to_lowercase().contains(&term))
                    && (kind == "all" || p.property_type == kind)
            };

            let expected: Vec<_> = items.iter().filter(|p| keep(p)).collect();
            prop_assert_eq!(out.len(), expected.len());
            for (a, b) in out.iter().zip(expected) {
                prop_assert!(Arc::ptr_eq(a, b));
            }

            // filtering the result again changes nothing
            let again = filter(&out, &search, &[("type", kind.parse().unwrap())]);
            prop_assert_eq!(again.len(), out.len());
        }
    }
}

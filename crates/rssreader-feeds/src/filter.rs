//! Filter.

use super::*;

/// A predicate deciding whether an article is part of a traversal's output.
pub trait ArticleFilter {
    /// Check whether the article passes.
    fn apply(&self, article: &Article) -> Result<bool>;
}

/// Built-in filters.
#[derive(Clone, Debug)]
pub enum Filter {
    /// The article must carry at least one of the categories.
    Categories(CategorySet),
}

impl ArticleFilter for Filter {
    fn apply(&self, article: &Article) -> Result<bool> {
        match self {
            Filter::Categories(categories) => categories.apply(article),
        }
    }
}

impl From<CategorySet> for Filter {
    fn from(value: CategorySet) -> Self {
        Filter::Categories(value)
    }
}

/// Set of allowed categories. Matching is exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: HashSet<String>,
}

impl CategorySet {
    /// Create a category set. Duplicates collapse.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a category is allowed.
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl ArticleFilter for CategorySet {
    fn apply(&self, article: &Article) -> Result<bool> {
        Ok(article
            .categories()
            .iter()
            .any(|category| self.categories.contains(category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(categories: &[&str]) -> Article {
        let mut builder = ArticleBuilder::new();
        builder.title("a");
        for category in categories {
            builder.category(*category);
        }
        builder.build()
    }

    #[test]
    fn matches_any_shared_category() {
        let set = CategorySet::new(["tech", "science"]);
        assert!(set.apply(&article(&["uk", "science"])).unwrap());
        assert!(!set.apply(&article(&["uk", "politics"])).unwrap());
    }

    #[test]
    fn is_case_sensitive() {
        let set = CategorySet::new(["tech"]);
        assert!(!set.apply(&article(&["Tech"])).unwrap());
    }

    #[test]
    fn uncategorized_articles_never_match() {
        let set = CategorySet::new(["tech"]);
        assert!(!set.apply(&article(&[])).unwrap());
    }

    #[test]
    fn duplicates_collapse() {
        let set = CategorySet::new(vec!["tech".to_string(), "tech".into()]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("tech"));
    }

    #[test]
    fn enum_dispatches_to_variant() {
        let filter = Filter::from(CategorySet::new(["uk"]));
        assert!(filter.apply(&article(&["uk", "uk"])).unwrap());
        assert!(!filter.apply(&article(&["fr"])).unwrap());
    }
}

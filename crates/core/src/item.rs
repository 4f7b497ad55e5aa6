use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::file::FileRecord;
use crate::user::User;

/// A record that can live in a paginated list.
pub trait ListItem: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;

    /// Stringified fields a local search looks at.
    fn search_fields(&self) -> Vec<String>;

    /// Case-insensitive substring match over [`search_fields`](Self::search_fields).
    ///
    /// An empty or blank term matches everything.
    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields().iter().any(|field| field.to_lowercase().contains(&needle))
    }
}

impl ListItem for FileRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.mime_type.clone()]
    }
}

impl ListItem for User {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.first_name.clone(), self.surname.clone(), self.email.clone(), self.dob_display()]
    }
}

/// Items of `items` matching `term`, in their original order.
pub fn filter_items<'a, T: ListItem>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn user(id: u64, first: &str, email: &str) -> User {
        User {
            id,
            email: email.to_owned(),
            first_name: first.to_owned(),
            surname: "Smith".to_owned(),
            dob: Utc.with_ymd_and_hms(1990, 4, 21, 0, 0, 0).single(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let u = user(1, "Alice", "alice@example.com");
        assert!(u.matches("ALI"));
        assert!(u.matches("smith"));
        assert!(!u.matches("bob"));
    }

    #[test]
    fn test_match_on_rendered_dob() {
        let u = user(1, "Alice", "alice@example.com");
        assert!(u.matches("21/04"));
        assert!(!u.matches("1990-04"));
    }

    #[test]
    fn test_blank_term_matches_all() {
        let users = vec![user(1, "Alice", "a@x.io"), user(2, "Bob", "b@x.io")];
        assert_eq!(filter_items(&users, "  ").len(), 2);
        assert_eq!(filter_items(&users, "bob").len(), 1);
    }
}

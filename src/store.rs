//! Store: the record kept by the table, heap and loader.

use core::fmt;
use core::hash::{Hash, Hasher};

/// A store owner paired with a sales figure.
///
/// `owner` is the key: it alone feeds `Hash`, so updating `sales` through
/// [`Store::set_sales`] never changes the bucket a stored copy lives in.
#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    owner: String,
    sales: f64,
}

impl Store {
    pub fn new(owner: impl Into<String>, sales: f64) -> Self {
        Self {
            owner: owner.into(),
            sales,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn sales(&self) -> f64 {
        self.sales
    }

    pub fn set_sales(&mut self, sales: f64) {
        self.sales = sales;
    }
}

impl Hash for Store {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store{{Owner='{}', Sales={:.2}}}", self.owner, self.sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::PolyState;
    use core::hash::BuildHasher;

    /// Invariant: the hash depends on the owner only.
    #[test]
    fn hash_ignores_sales() {
        let s = PolyState;
        let a = Store::new("Target", 850.25);
        let b = Store::new("Target", 1.0);
        assert_eq!(s.hash_one(&a), s.hash_one(&b));
        assert_ne!(s.hash_one(&a), s.hash_one(&Store::new("Costco", 850.25)));
    }

    /// Invariant: a clone shares no state with its source.
    #[test]
    fn clone_is_independent() {
        let original = Store::new("Aldi", 400.0);
        let mut copy = original.clone();
        copy.set_sales(0.0);
        assert_eq!(original.sales(), 400.0);
        assert_eq!(copy.sales(), 0.0);
        assert_eq!(copy.owner(), "Aldi");
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(
            Store::new("Walmart", 1000.5).to_string(),
            "Store{Owner='Walmart', Sales=1000.50}"
        );
        assert_eq!(Store::new("", 0.0).to_string(), "Store{Owner='', Sales=0.00}");
    }
}

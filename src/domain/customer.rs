//! Transient customer model
//!
//! A `Customer` is created at its spawn tick and owned by exactly one
//! collection until it leaves: the in-store roster while shopping, then a
//! single checkout queue. Moving between them is a move of the value, so a
//! customer can never sit in two places at once.

use smallvec::SmallVec;

use crate::domain::types::{ProductIdx, TypeIdx};

/// Customer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerPhase {
    /// Walking the store, working through the shopping list
    Shopping,
    /// Waiting in a checkout queue
    Queued,
    /// Head of a queue, items being scanned
    Served,
    /// Paid and left; set just before the departure is recorded and logged
    Departed,
    /// Gave up waiting in the queue; set just before the renege is recorded and logged
    Reneged,
}

impl CustomerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerPhase::Shopping => "shopping",
            CustomerPhase::Queued => "queued",
            CustomerPhase::Served => "served",
            CustomerPhase::Departed => "departed",
            CustomerPhase::Reneged => "reneged",
        }
    }
}

/// Why an item ended up in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    ShoppingList,
    Impulse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product: ProductIdx,
    pub source: PickSource,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub customer_type: TypeIdx,
    /// Interest per product as resolved on the spawn day
    interests: Vec<f64>,
    pub impulsivity: f64,
    /// Minutes tolerated as a non-head queue member
    pub patience: u32,
    /// LIFO: products still to pick
    shopping_list: Vec<ProductIdx>,
    /// LIFO: products picked but not yet paid for
    cart: SmallVec<[CartItem; 8]>,
    pub cooldown: u32,
    pub minutes_in_queue: u32,
    pub time_in_store: u32,
    phase: CustomerPhase,
}

impl Customer {
    pub fn new(
        customer_type: TypeIdx,
        interests: Vec<f64>,
        impulsivity: f64,
        patience: u32,
        shopping_list: Vec<ProductIdx>,
    ) -> Self {
        Self {
            customer_type,
            interests,
            impulsivity,
            patience,
            shopping_list,
            cart: SmallVec::new(),
            cooldown: 0,
            minutes_in_queue: 0,
            time_in_store: 0,
            phase: CustomerPhase::Shopping,
        }
    }

    #[inline]
    pub fn phase(&self) -> CustomerPhase {
        self.phase
    }

    #[inline]
    pub fn set_phase(&mut self, phase: CustomerPhase) {
        self.phase = phase;
    }

    /// Interests the shopping list was drawn from, fixed for the whole visit
    pub fn interests(&self) -> &[f64] {
        &self.interests
    }

    /// Mean shopping list length for this customer's interests
    pub fn expected_items(&self) -> f64 {
        self.interests.iter().sum()
    }

    pub fn shopping_list(&self) -> &[ProductIdx] {
        &self.shopping_list
    }

    /// Take the next product off the shopping list
    #[inline]
    pub fn next_from_list(&mut self) -> Option<ProductIdx> {
        self.shopping_list.pop()
    }

    #[inline]
    pub fn put_in_cart(&mut self, product: ProductIdx, source: PickSource) {
        self.cart.push(CartItem { product, source });
    }

    /// Hand the most recently picked item to the cashier
    #[inline]
    pub fn take_from_cart(&mut self) -> Option<CartItem> {
        self.cart.pop()
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_cart_are_lifo() {
        let mut customer =
            Customer::new(TypeIdx(0), vec![1.0, 1.0], 0.0, 10, vec![ProductIdx(0), ProductIdx(1)]);
        assert_eq!(customer.phase(), CustomerPhase::Shopping);

        let first = customer.next_from_list().unwrap();
        assert_eq!(first, ProductIdx(1));
        customer.put_in_cart(first, PickSource::ShoppingList);
        customer.put_in_cart(ProductIdx(0), PickSource::Impulse);

        assert_eq!(
            customer.take_from_cart(),
            Some(CartItem { product: ProductIdx(0), source: PickSource::Impulse })
        );
        assert_eq!(customer.take_from_cart().unwrap().source, PickSource::ShoppingList);
        assert_eq!(customer.take_from_cart(), None);
        assert_eq!(customer.shopping_list(), &[ProductIdx(0)]);
    }

    #[test]
    fn test_expected_items_sums_interests() {
        let customer = Customer::new(TypeIdx(1), vec![0.5, 0.25, 0.0], 0.0, 10, Vec::new());
        assert_eq!(customer.expected_items(), 0.75);
        assert_eq!(customer.interests().len(), 3);
    }
}

use serde::{Deserialize, Serialize};

/// The party a price is computed for: adult count, one age per child, and
/// accompanying pets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMix {
    pub adults: i32,
    pub children_ages: Vec<i32>,
    pub pets: i32,
}

impl GuestMix {
    pub fn new(adults: i32, children_ages: Vec<i32>, pets: i32) -> Self {
        Self {
            adults,
            children_ages,
            pets,
        }
    }

    pub fn children(&self) -> i32 {
        self.children_ages.len() as i32
    }

    /// Child ages, youngest first.
    pub fn sorted_children_ages(&self) -> Vec<i32> {
        let mut ages = self.children_ages.clone();
        ages.sort_unstable();
        ages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_are_counted_and_sorted() {
        let guests = GuestMix::new(2, vec![12, 4, 7], 1);
        assert_eq!(guests.children(), 3);
        assert_eq!(guests.sorted_children_ages(), vec![4, 7, 12]);
    }
}

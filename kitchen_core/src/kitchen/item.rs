use std::fmt;

use serde::{Deserialize, Serialize};

/// Heat time in turns for a slice of each flavor, indexed by [`Flavor`] discriminant.
const SLICE_HEAT_TIMES: [u32; 2] = [3, 5];

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Vanilla = 0,
    Chocolate = 1,
}

impl Flavor {
    pub fn heat_time(self) -> u32 {
        SLICE_HEAT_TIMES[self as usize]
    }

    pub fn initial(self) -> char {
        match self {
            Flavor::Vanilla => 'v',
            Flavor::Chocolate => 'c',
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Food {
    pub flavor: Flavor,
    pub heated: bool,
    pub heat_time: u32,
}

impl Food {
    /// A fresh, cold slice from a cake box.
    pub fn slice(flavor: Flavor) -> Self {
        Food {
            flavor,
            heated: false,
            heat_time: flavor.heat_time(),
        }
    }
}

/// What a chef has in hand, or what sits in an item slot.
///
/// Bare plates stack as `CleanPlates`/`DirtyPlates` with a count, while a
/// single clean plate is always the `Plate` variant. The two forms are never
/// interchangeable, so anything producing a clean stack goes through
/// [`CarriedItem::clean_stack`].
///
/// A plate holds at most one food. Multi-item plates are deliberately not
/// supported.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CarriedItem {
    #[default]
    Nothing,
    CleanPlates {
        count: u32,
    },
    DirtyPlates {
        count: u32,
    },
    Plate {
        contents: Option<Food>,
    },
}

impl CarriedItem {
    pub const EMPTY_PLATE: CarriedItem = CarriedItem::Plate { contents: None };

    /// Normalized representation of `count` clean plates held together.
    pub fn clean_stack(count: u32) -> Self {
        match count {
            0 => CarriedItem::Nothing,
            1 => CarriedItem::EMPTY_PLATE,
            count => CarriedItem::CleanPlates { count },
        }
    }

    pub fn plate_with(food: Food) -> Self {
        CarriedItem::Plate {
            contents: Some(food),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, CarriedItem::Nothing)
    }

    /// Number of clean plates if this item is only clean plates (or nothing).
    pub fn clean_plate_count(&self) -> Option<u32> {
        match self {
            CarriedItem::Nothing => Some(0),
            CarriedItem::Plate { contents: None } => Some(1),
            CarriedItem::CleanPlates { count } => Some(*count),
            CarriedItem::Plate { contents: Some(_) } | CarriedItem::DirtyPlates { .. } => None,
        }
    }

    /// Merges `taken` clean plates into this item, if it can hold them.
    pub fn merge_clean(&self, taken: u32) -> Option<Self> {
        self.clean_plate_count()
            .map(|held| CarriedItem::clean_stack(held + taken))
    }

    /// A single empty plate, in either representation.
    pub fn is_single_empty_plate(&self) -> bool {
        matches!(
            self,
            CarriedItem::Plate { contents: None } | CarriedItem::CleanPlates { count: 1 }
        )
    }

    pub fn food(&self) -> Option<&Food> {
        match self {
            CarriedItem::Plate { contents } => contents.as_ref(),
            _ => None,
        }
    }

    pub fn has_heated_food(&self) -> bool {
        self.food().is_some_and(|food| food.heated)
    }
}

impl fmt::Display for CarriedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarriedItem::Nothing => Ok(()),
            CarriedItem::CleanPlates { count } => write!(f, "plate x{count}"),
            CarriedItem::DirtyPlates { count } => write!(f, "dirty x{count}"),
            CarriedItem::Plate { contents: None } => write!(f, "plate"),
            CarriedItem::Plate {
                contents: Some(food),
            } => {
                let heated = if food.heated { "+" } else { "" };
                write!(f, "{}{heated}", food.flavor.initial())
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clean_stack_of_one_is_a_plate() {
        assert_eq!(CarriedItem::Nothing, CarriedItem::clean_stack(0));
        assert_eq!(CarriedItem::EMPTY_PLATE, CarriedItem::clean_stack(1));
        assert_eq!(
            CarriedItem::CleanPlates { count: 2 },
            CarriedItem::clean_stack(2)
        );
    }

    #[test]
    fn merge_never_yields_single_clean_plate_stack() {
        let starts = [
            CarriedItem::Nothing,
            CarriedItem::EMPTY_PLATE,
            CarriedItem::CleanPlates { count: 1 },
            CarriedItem::CleanPlates { count: 2 },
            CarriedItem::CleanPlates { count: 7 },
        ];
        for start in starts {
            for taken in 0..=10 {
                let merged = start
                    .merge_clean(taken)
                    .expect("clean plates can always be merged");
                assert_ne!(
                    CarriedItem::CleanPlates { count: 1 },
                    merged,
                    "merging {taken} into {start:?}"
                );
                let held = start.clean_plate_count().unwrap();
                assert_eq!(Some(held + taken), merged.clean_plate_count());
                if held + taken == 1 {
                    assert_eq!(CarriedItem::EMPTY_PLATE, merged);
                }
            }
        }
    }

    #[test]
    fn food_and_dirty_plates_cannot_take_clean_plates() {
        let cake = CarriedItem::plate_with(Food::slice(Flavor::Vanilla));
        assert_eq!(None, cake.merge_clean(2));
        assert_eq!(None, CarriedItem::DirtyPlates { count: 2 }.merge_clean(1));
    }

    #[test]
    fn heat_times_come_from_table() {
        assert_eq!(3, Food::slice(Flavor::Vanilla).heat_time);
        assert_eq!(5, Food::slice(Flavor::Chocolate).heat_time);
        assert!(!Food::slice(Flavor::Chocolate).heated);
    }

    #[test]
    fn labels() {
        let mut food = Food::slice(Flavor::Chocolate);
        assert_eq!("c", CarriedItem::plate_with(food).to_string());
        food.heated = true;
        assert_eq!("c+", CarriedItem::plate_with(food).to_string());
        assert_eq!("dirty x3", CarriedItem::DirtyPlates { count: 3 }.to_string());
        assert_eq!("", CarriedItem::Nothing.to_string());
    }
}

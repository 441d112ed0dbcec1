//! The fixed table of split-shot sizes.

use crate::grams::Centigrams;

/// A named split-shot size with a fixed mass. Identity is `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeightClass {
    pub id: &'static str,
    pub name: &'static str,
    pub mass: Centigrams,
}

const fn class(id: &'static str, name: &'static str, centigrams: i64) -> WeightClass {
    WeightClass { id, name, mass: Centigrams::new(centigrams) }
}

// Descending mass. Masses are distinct.
static CATALOG: [WeightClass; 19] = [
    class("3SSG", "3SSG", 480),
    class("2SSG", "2SSG", 320),
    class("LG", "LG", 300),
    class("LSG", "LSG", 200),
    class("SSG", "SSG", 160),
    class("AAA", "AAA", 80),
    class("AB", "AB", 60),
    class("BB", "BB", 40),
    class("1", "no1", 30),
    class("3", "no3", 25),
    class("4", "no4", 20),
    class("5", "no5", 15),
    class("6", "no6", 10),
    class("8", "no8", 6),
    class("9", "no9", 5),
    class("10", "no10", 4),
    class("11", "no11", 3),
    class("12", "no12", 2),
    class("13", "no13", 1),
];

/// All weight classes, heaviest first.
pub fn catalog() -> &'static [WeightClass] {
    &CATALOG
}

pub fn lookup(id: &str) -> Option<&'static WeightClass> {
    CATALOG.iter().find(|c| c.id == id)
}

//! Cooking method and option definitions

use serde::Serialize;

/// A single doneness choice within a cooking method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CookingOption {
    pub name: &'static str,
    pub duration_minutes: u32,
    pub description: &'static str,
}

impl CookingOption {
    /// Full countdown length of this option in seconds
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

/// An egg cooking technique with its doneness options and tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CookingMethod {
    pub key: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub options: &'static [CookingOption],
    pub tips: &'static [&'static str],
}

impl CookingMethod {
    /// Get an option by its zero-based position
    pub fn option(&self, index: usize) -> Option<&'static CookingOption> {
        self.options.get(index)
    }

    /// Shortest and longest option duration in minutes
    pub fn duration_range(&self) -> (u32, u32) {
        let durations = self.options.iter().map(|o| o.duration_minutes);
        let min = durations.clone().min().unwrap_or(0);
        let max = durations.max().unwrap_or(0);
        (min, max)
    }

    /// Duration range formatted for listings, e.g. "6-12 minutes"
    pub fn duration_label(&self) -> String {
        match self.duration_range() {
            (min, max) if min == max => format!("{} minutes", min),
            (min, max) => format!("{}-{} minutes", min, max),
        }
    }
}

const TIP_ROOM_TEMP: &str = "Use room temperature eggs for more consistent results";
const TIP_FRESH_EGGS: &str = "Use fresh eggs for best results";
const TIP_GENTLE_HEAT: &str = "Cook over low to medium heat for best results";
const TIP_TIMING: &str = "Start timing after the water comes to a rolling boil";

pub(super) const METHODS: &[CookingMethod] = &[
    CookingMethod {
        key: "boiled",
        name: "Boiled Egg",
        summary: "Perfect hard or soft boiled eggs",
        icon: "🥚",
        color: "blue",
        options: &[
            CookingOption {
                name: "Soft Boiled",
                duration_minutes: 6,
                description: "Runny yolk, firm white",
            },
            CookingOption {
                name: "Medium Boiled",
                duration_minutes: 8,
                description: "Slightly runny yolk",
            },
            CookingOption {
                name: "Hard Boiled",
                duration_minutes: 12,
                description: "Firm yolk and white",
            },
        ],
        tips: &[
            TIP_ROOM_TEMP,
            "Add a pinch of salt to the water to prevent cracking",
            TIP_TIMING,
            "For easy peeling, cool eggs in ice water after cooking",
        ],
    },
    CookingMethod {
        key: "poached",
        name: "Poached Egg",
        summary: "Delicate poached eggs with runny yolk",
        icon: "🍳",
        color: "green",
        options: &[
            CookingOption {
                name: "Runny Yolk",
                duration_minutes: 3,
                description: "Perfect for eggs benedict",
            },
            CookingOption {
                name: "Firm Yolk",
                duration_minutes: 4,
                description: "More set yolk",
            },
        ],
        tips: &[
            TIP_FRESH_EGGS,
            "Add a splash of vinegar to help the egg white coagulate",
            "Create a gentle whirlpool in the water before adding the egg",
            "Use a slotted spoon to remove the egg from water",
        ],
    },
    CookingMethod {
        key: "fried",
        name: "Fried Egg",
        summary: "Sunny side up or over easy",
        icon: "🍳",
        color: "yellow",
        options: &[
            CookingOption {
                name: "Sunny Side Up",
                duration_minutes: 2,
                description: "Runny yolk, crispy edges",
            },
            CookingOption {
                name: "Over Easy",
                duration_minutes: 3,
                description: "Flipped once, runny yolk",
            },
            CookingOption {
                name: "Over Medium",
                duration_minutes: 4,
                description: "Flipped, semi-runny yolk",
            },
        ],
        tips: &[
            "Use a non-stick pan or well-seasoned cast iron",
            "Heat the pan over medium heat before adding oil",
            "Crack the egg into a small bowl first, then slide into pan",
            "For over easy/medium, flip gently to avoid breaking the yolk",
        ],
    },
    CookingMethod {
        key: "scrambled",
        name: "Scrambled Egg",
        summary: "Fluffy and creamy scrambled eggs",
        icon: "🥚",
        color: "orange",
        options: &[
            CookingOption {
                name: "Soft & Creamy",
                duration_minutes: 3,
                description: "Moist and fluffy",
            },
            CookingOption {
                name: "Firm",
                duration_minutes: 5,
                description: "Well-cooked and dry",
            },
        ],
        tips: &[
            "Whisk eggs with a splash of milk or cream for creamier texture",
            TIP_GENTLE_HEAT,
            "Stir constantly with a rubber spatula for even cooking",
            "Remove from heat just before fully cooked - eggs continue cooking",
        ],
    },
];

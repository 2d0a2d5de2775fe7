//! Cycling flavor text for objects that hold no clue.
//!
//! Each object cycles through its pool in order so repeated interactions read
//! differently; unknown objects fall back to a generic pool. Content is data,
//! not logic: the session consults this table only after clue resolution
//! comes up empty.

use std::collections::HashMap;

const LUNCHBOX: &[&str] = &[
    "Smells like old egg salad...",
    "Just a few crumbs and a wrapper.",
    "An empty juice box and a note from Mom.",
    "Thermos is empty. Tragedy.",
];

const TRASH: &[&str] = &[
    "Just wadded up drafts of bad poetry.",
    "An empty soda can and some lint.",
    "Why are you digging in the trash?",
    "Candy wrappers and regret.",
];

const MUG: &[&str] = &[
    "Stained with years of black coffee.",
    "World's Okayest Archivist.",
    "Empty. Need more caffeine.",
    "Cold tea dregs.",
];

const PLANT: &[&str] = &[
    "It's plastic. Very convincing.",
    "Needs water. Or dusting. Or both.",
    "Leaves are brown. It's dead, Jim.",
    "Photosynthesizing quietly.",
];

const SAFE: &[&str] = &[
    "A heavy-duty safe, bolted to the floor.",
    "The combination dial shows slight wear from frequent access.",
    "The door seal is intact. It's been properly maintained.",
];

const FILING_CABINET: &[&str] = &[
    "Tax returns from 1982.",
    "Empty folders labeled 'Top Secret'.",
    "Overdue library book notices.",
    "Just paperwork. Boring paperwork.",
];

const BOOK_CLUSTER: &[&str] = &[
    "'History of Lint'. Fascinating.",
    "Just boring encyclopedias.",
    "Pages and pages of words.",
    "Dusty old tomes.",
];

const LAMP: &[&str] = &[
    "I love lamp.",
    "It's bright. Ow.",
    "Sheds some light on the situation.",
    "Flickering ominously.",
];

const CLOCK: &[&str] = &[
    "Time is ticking.",
    "Is it stopped? No, just slow.",
    "Tick... tock...",
];

const RADIO: &[&str] = &[
    "Playing static.",
    "It's stuck on the polka station.",
    "Breaking news: You're still trapped.",
];

const GLOBE: &[&str] = &[
    "I can see my house from here!",
    "Spinning around the world.",
    "The world is your oyster.",
];

const BRIEFCASE: &[&str] = &[
    "Locked. Probably full of papers.",
    "Smells like leather and business.",
    "Heavy.",
];

const KEYBOARD: &[&str] = &[
    "Sticky keys. Gross.",
    "Missing the 'Any' key.",
    "Clickety-clack.",
];

const GENERIC: &[&str] = &[
    "Just dust bunnies.",
    "Nothing useful here.",
    "Looks insignificant.",
    "Just clutter.",
    "Red herring.",
    "A spider scuttles away.",
    "Keep searching!",
    "Not a clue.",
];

fn pool_for(name: &str) -> &'static [&'static str] {
    // Numbered variants share their family's pool.
    if name.starts_with("filing_cabinet") {
        return FILING_CABINET;
    }
    if name.starts_with("book_cluster") {
        return BOOK_CLUSTER;
    }
    if name.contains("lamp") {
        return LAMP;
    }
    match name {
        "lunchbox" => LUNCHBOX,
        "trash" => TRASH,
        "mug" => MUG,
        "plant" => PLANT,
        "safe" => SAFE,
        "clock" => CLOCK,
        "radio" => RADIO,
        "globe" => GLOBE,
        "briefcase" => BRIEFCASE,
        "keyboard" => KEYBOARD,
        _ => GENERIC,
    }
}

/// Per-object cycling cursor over the description pools.
#[derive(Debug, Clone, Default)]
pub struct FlavorTable {
    cursors: HashMap<String, usize>,
}

impl FlavorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next description for an object, advancing its cycle.
    pub fn next(&mut self, name: &str) -> String {
        let pool = pool_for(name);
        let cursor = self.cursors.entry(name.to_string()).or_insert(0);
        let text = pool[*cursor % pool.len()];
        *cursor = (*cursor + 1) % pool.len();
        text.to_string()
    }

    /// Restart an object's cycle.
    pub fn reset(&mut self, name: &str) {
        self.cursors.remove(name);
    }
}

/// Render an object name for modal titles: `filing_cabinet_1` becomes
/// `FILING CABINET 1`.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.replace('_', " ").to_uppercase()
}
